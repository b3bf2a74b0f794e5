//! The simulated object contract and the views objects receive.

use std::ops::Range;

use crate::{Clock, RateId, StateId, StateSlot, TimeScale, world::Rate};

/// A user-defined entity whose states are advanced by the engine.
///
/// An object declares its states and rates through
/// [`World::spawn`](crate::World::spawn) and keeps the returned handles to
/// address them from its callbacks. The callbacks receive views of the world
/// that enforce ownership: any value can be read, but an object only writes
/// its own rates (in `update`) and its own state values (in `init`).
pub trait SimObject<T> {
    /// Called each time a stage containing this object is entered.
    ///
    /// Check [`InitContext::init_count`] to avoid reseeding states carried
    /// over from an earlier stage.
    fn init(&mut self, _ctx: &mut InitContext<'_>) {}

    /// Computes derivative-producing rates for the current pass.
    ///
    /// Called once per pass of every full step, in stage declaration order.
    fn update(&mut self, ctx: &mut UpdateContext<'_, T>);

    /// Emits output.
    ///
    /// Called on the first tick of a stage, on every committed step, and once
    /// more when the run terminates. The object decides whether to emit using
    /// the clock view. A request raised from a committed-step report takes
    /// effect at that same commit.
    fn report(&mut self, _ctx: &mut ReportContext<'_, T>) {}
}

/// One-shot requests raised by objects during `update`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Control {
    pub(crate) transition: bool,
    pub(crate) halt: bool,
}

/// View passed to [`SimObject::init`].
pub struct InitContext<'a> {
    pub(crate) object: &'a str,
    pub(crate) init_count: u32,
    pub(crate) own_states: Range<usize>,
    pub(crate) own_rates: Range<usize>,
    pub(crate) states: &'a mut [StateSlot],
    pub(crate) rates: &'a mut [Rate],
}

impl InitContext<'_> {
    /// Number of earlier stage entries for this object in the current run.
    #[must_use]
    pub fn init_count(&self) -> u32 {
        self.init_count
    }

    /// Whether this is the object's first stage entry of the run.
    #[must_use]
    pub fn is_first(&self) -> bool {
        self.init_count == 0
    }

    #[must_use]
    pub fn value(&self, id: StateId) -> f64 {
        self.states[id.0].value()
    }

    #[must_use]
    pub fn rate(&self, id: RateId) -> f64 {
        self.rates[id.0].value
    }

    /// Seeds one of this object's states.
    ///
    /// # Panics
    ///
    /// Panics if `id` belongs to another object.
    pub fn set_value(&mut self, id: StateId, value: f64) {
        assert!(
            self.own_states.contains(&id.0),
            "object `{}` cannot seed state #{}, which it does not own",
            self.object,
            id.0,
        );
        self.states[id.0].set_value(value);
    }

    /// Seeds one of this object's rates.
    ///
    /// # Panics
    ///
    /// Panics if `id` belongs to another object.
    pub fn set_rate(&mut self, id: RateId, value: f64) {
        assert!(
            self.own_rates.contains(&id.0),
            "object `{}` cannot write rate #{}, which it does not own",
            self.object,
            id.0,
        );
        self.rates[id.0].value = value;
    }
}

/// View passed to [`SimObject::update`].
///
/// Exposes the clock, read access to every state and rate, write access to
/// the object's own rates, and the run-wide stage transition and halt
/// requests.
pub struct UpdateContext<'a, T> {
    pub(crate) object: &'a str,
    pub(crate) own_rates: Range<usize>,
    pub(crate) states: &'a [StateSlot],
    pub(crate) rates: &'a mut [Rate],
    pub(crate) clock: &'a mut Clock<T>,
    pub(crate) control: &'a mut Control,
}

impl<T: TimeScale> UpdateContext<'_, T> {
    #[must_use]
    pub fn now(&self) -> T {
        self.clock.now()
    }

    #[must_use]
    pub fn dt(&self) -> T {
        self.clock.dt()
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.clock.is_ready()
    }

    #[must_use]
    pub fn tick_first(&self) -> bool {
        self.clock.tick_first()
    }

    #[must_use]
    pub fn tick_last(&self) -> bool {
        self.clock.tick_last()
    }

    /// See [`Clock::sample`].
    pub fn sample(&mut self, period: T) -> bool {
        self.clock.sample(period)
    }

    /// See [`Clock::event`].
    pub fn event(&mut self, at: T) -> bool {
        self.clock.event(at)
    }

    #[must_use]
    pub fn clock(&self) -> &Clock<T> {
        self.clock
    }

    #[must_use]
    pub fn value(&self, id: StateId) -> f64 {
        self.states[id.0].value()
    }

    #[must_use]
    pub fn rate(&self, id: RateId) -> f64 {
        self.rates[id.0].value
    }

    /// Writes one of this object's rates.
    ///
    /// # Panics
    ///
    /// Panics if `id` belongs to another object.
    pub fn set_rate(&mut self, id: RateId, value: f64) {
        assert!(
            self.own_rates.contains(&id.0),
            "object `{}` cannot write rate #{}, which it does not own",
            self.object,
            id.0,
        );
        self.rates[id.0].value = value;
    }

    /// Asks to leave the active stage once the current full step commits.
    pub fn request_stage_transition(&mut self) {
        self.control.transition = true;
    }

    /// Asks to end the run once the current full step commits.
    pub fn request_halt(&mut self) {
        self.control.halt = true;
    }
}

/// View passed to [`SimObject::report`].
pub struct ReportContext<'a, T> {
    pub(crate) states: &'a [StateSlot],
    pub(crate) rates: &'a [Rate],
    pub(crate) clock: &'a mut Clock<T>,
    pub(crate) control: &'a mut Control,
}

impl<T: TimeScale> ReportContext<'_, T> {
    #[must_use]
    pub fn now(&self) -> T {
        self.clock.now()
    }

    #[must_use]
    pub fn tick_first(&self) -> bool {
        self.clock.tick_first()
    }

    #[must_use]
    pub fn tick_last(&self) -> bool {
        self.clock.tick_last()
    }

    /// See [`Clock::sample`].
    ///
    /// Sampling from a report also clips the next step, so every sample point
    /// is landed on exactly.
    pub fn sample(&mut self, period: T) -> bool {
        self.clock.sample(period)
    }

    /// See [`Clock::sample_step`].
    #[must_use]
    pub fn sample_step(&self) -> bool {
        self.clock.sample_step()
    }

    #[must_use]
    pub fn clock(&self) -> &Clock<T> {
        self.clock
    }

    #[must_use]
    pub fn value(&self, id: StateId) -> f64 {
        self.states[id.0].value()
    }

    #[must_use]
    pub fn rate(&self, id: RateId) -> f64 {
        self.rates[id.0].value
    }

    /// Asks to leave the active stage once the current full step commits.
    ///
    /// On a committed-step report this is the step that just committed.
    pub fn request_stage_transition(&mut self) {
        self.control.transition = true;
    }

    /// Asks to end the run once the current full step commits.
    pub fn request_halt(&mut self) {
        self.control.halt = true;
    }
}
