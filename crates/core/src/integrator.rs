//! Fixed-pass explicit integration schemes.
//!
//! An [`Integrator`] owns two rules: how each state slot's value moves during
//! a pass, and how the clock moves after it. Stage and event logic only ever
//! look at [`Clock::is_ready`], so they are independent of the pass count.

mod euler;
mod midpoint;
mod rk4;

pub use euler::Euler;
pub use midpoint::Midpoint;
pub use rk4::Rk4;

use crate::{Clock, StateSlot, TimeScale};

/// An explicit multi-pass integration scheme.
///
/// For every pass the engine samples each slot's derivative into
/// [`StateSlot::derivative`]`(pass)` (snapshotting the start value on pass 0),
/// then calls [`Integrator::update_value`] on every slot, then calls
/// [`Integrator::advance_clock`] once.
///
/// `PASSES` must be between 1 and [`MAX_PASSES`](crate::MAX_PASSES).
pub trait Integrator {
    /// Name used in logs and configuration errors.
    const NAME: &'static str;

    /// Number of passes per full step.
    const PASSES: usize;

    /// Applies the value update for `pass` to one slot.
    ///
    /// `dt` is the length of the full step in seconds.
    fn update_value(&self, pass: usize, dt: f64, slot: &mut StateSlot);

    /// Moves the clock after `pass` has been applied to every slot.
    ///
    /// Must call [`Clock::end_pass`] with [`Integrator::PASSES`] exactly once.
    fn advance_clock<T: TimeScale>(&self, clock: &mut Clock<T>);
}
