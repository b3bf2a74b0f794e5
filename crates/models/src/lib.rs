//! Reference objects for the Cadence engine.
//!
//! The objects here are ordinary [`SimObject`](cadence_core::SimObject)
//! implementations. They double as worked examples of the object contract:
//! each declares its states through an object builder, keeps the returned
//! handles, and seeds its states only on its first initialization of a run.
//!
//! [`pursuit::Pursuit`] assembles [`Target`], [`Radar`] and [`Missile`] into
//! the two-stage acquire-then-engage scenario.

mod lag;
mod missile;
pub mod pursuit;
mod radar;
mod target;
mod timer;

pub use lag::{Lag, LagHandle};
pub use missile::{Missile, MissileHandle};
pub use radar::{Radar, RadarHandle};
pub use target::{Target, TargetHandle};
pub use timer::Timer;
