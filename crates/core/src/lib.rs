//! Core engine for staged hybrid simulations.
//!
//! A simulation advances the integrated state of a set of heterogeneous
//! objects through an ordered sequence of stages:
//!
//! - [`World`] is the arena owning every object, its [`StateSlot`]s and the
//!   rate fields that feed their derivatives.
//! - [`SimObject`] is user behavior run against borrowed views of the world.
//! - [`Stage`] is an ordered object set sharing one base step period.
//! - [`Integrator`] is a fixed-pass scheme ([`Euler`], [`Midpoint`], [`Rk4`])
//!   owning both the per-pass value update and the per-pass clock advance.
//! - [`Clock`] keeps time, with epsilon-tolerant events and sampling.
//! - [`Simulation`] is the step state machine tying these together.
//!
//! Time is generic over [`TimeScale`], implemented for plain `f64` seconds and
//! for `uom::si::f64::Time`.

mod clock;
mod error;
pub mod integrator;
mod object;
mod observer;
pub mod simulation;
mod stage;
mod state;
pub mod time;
mod world;

#[cfg(test)]
mod test_utils;

pub use clock::Clock;
pub use error::ConfigError;
pub use integrator::{Euler, Integrator, Midpoint, Rk4};
pub use object::{InitContext, ReportContext, SimObject, UpdateContext};
pub use observer::Observer;
pub use simulation::{Action, Event, EventKind, Phase, Simulation, SimulationBuilder, Solution, Status};
pub use stage::Stage;
pub use state::{MAX_PASSES, StateSlot};
pub use time::{Period, PeriodError, TimeScale};
pub use world::{ObjectBuilder, ObjectId, RateId, Source, StateId, World};
