/// How a run terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The clock reached the run horizon.
    ReachedHorizon,

    /// An object requested a halt.
    Halted,

    /// A stage transition was requested from the last stage.
    StagesExhausted,

    /// The observer returned [`Action::StopEarly`](super::Action::StopEarly).
    StoppedByObserver,
}

/// Summary of a finished run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Solution<T> {
    pub status: Status,

    /// Simulation time at termination.
    pub time: T,

    /// Committed full steps.
    pub steps: usize,

    /// Integrator passes, i.e. steps times the pass count.
    pub ticks: usize,

    /// Stage transitions consumed, including one that exhausted the stages.
    pub transitions: usize,

    /// Index of the stage that was active last.
    pub stage: usize,
}
