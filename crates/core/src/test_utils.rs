//! Objects used by the engine's unit tests.

mod constant;
mod decay;
mod passive;
mod recorder;
mod ramp;

pub(crate) use constant::Constant;
pub(crate) use decay::Decay;
pub(crate) use passive::Passive;
pub(crate) use recorder::{Call, Log, Recorder};
pub(crate) use ramp::Ramp;
