use crate::{Clock, Integrator, StateSlot, TimeScale};

/// Explicit forward Euler.
///
/// ```text
/// x(t + dt) = x(t) + dt * xd(t)
/// ```
///
/// A single pass, so every tick commits a full step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Euler;

impl Integrator for Euler {
    const NAME: &'static str = "euler";
    const PASSES: usize = 1;

    fn update_value(&self, _pass: usize, dt: f64, slot: &mut StateSlot) {
        slot.set_value(slot.start_value() + dt * slot.derivative(0));
    }

    fn advance_clock<T: TimeScale>(&self, clock: &mut Clock<T>) {
        clock.snap_to_boundary();
        clock.end_pass(Self::PASSES);
    }
}
