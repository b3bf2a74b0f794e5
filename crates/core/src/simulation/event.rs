use crate::{RateId, StateId, TimeScale, World};

/// Which report an [`Event`] follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// The first tick after a stage was entered, before any state moves.
    Baseline,
    /// A committed full step.
    Step,
    /// The last report of the run.
    Final,
}

/// Emitted to the observer right after every stage report.
#[derive(Debug)]
pub struct Event<'a, T> {
    pub kind: EventKind,

    /// Index of the reporting stage.
    pub stage: usize,
    pub stage_name: &'a str,

    /// Committed steps so far, counted across all stages.
    pub step: usize,
    pub time: T,

    world: &'a World<T>,
}

impl<'a, T> Event<'a, T> {
    pub(crate) fn new(
        kind: EventKind,
        stage: usize,
        stage_name: &'a str,
        step: usize,
        time: T,
        world: &'a World<T>,
    ) -> Self {
        Self {
            kind,
            stage,
            stage_name,
            step,
            time,
            world,
        }
    }

    #[must_use]
    pub fn world(&self) -> &'a World<T> {
        self.world
    }
}

impl<T: TimeScale> Event<'_, T> {
    #[must_use]
    pub fn value(&self, id: StateId) -> f64 {
        self.world.value(id)
    }

    #[must_use]
    pub fn rate(&self, id: RateId) -> f64 {
        self.world.rate(id)
    }
}
