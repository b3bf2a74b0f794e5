/// Requests an observer can make of a running simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// End the run once the current full step commits.
    StopEarly,
}
