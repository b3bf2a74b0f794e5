use thiserror::Error;

use crate::PeriodError;

/// Errors detected while wiring objects or assembling a simulation.
///
/// These are configuration mistakes. They are reported once, at construction,
/// and a running simulation never produces them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("a simulation needs at least one stage")]
    NoStages,

    #[error("stage `{stage}` has no objects")]
    EmptyStage { stage: String },

    #[error("stage `{stage}` has an invalid base period")]
    InvalidPeriod {
        stage: String,
        #[source]
        source: PeriodError,
    },

    #[error("no run horizon was set")]
    MissingHorizon,

    #[error("invalid run horizon")]
    InvalidHorizon(#[source] PeriodError),

    #[error("stage `{stage}` refers to object #{index}, which is not in the world")]
    UnknownObject { stage: String, index: usize },

    #[error("stage `{stage}` lists object `{object}` more than once")]
    DuplicateObject { stage: String, object: String },

    #[error("state `{state}` of object `{object}` has no derivative source")]
    Unwired { object: String, state: String },

    #[error("state `{state}` of object `{object}` is already wired")]
    AlreadyWired { object: String, state: String },

    #[error("object `{object}` cannot wire state #{index}, which it does not own")]
    ForeignState { object: String, index: usize },

    #[error("derivative source of state `{state}` of object `{object}` does not exist")]
    UnknownSource { object: String, state: String },

    #[error("integrator `{name}` declares {passes} passes, expected 1 to 4")]
    UnsupportedPasses { name: &'static str, passes: usize },
}
