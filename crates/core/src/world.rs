//! The object arena.
//!
//! A [`World`] owns every simulated object together with the state slots and
//! rate fields the objects declare. Objects never hold references to each
//! other. They hold [`StateId`] and [`RateId`] handles instead, and every
//! cross-object read goes through the world.

mod builder;

use std::{fmt, ops::Range};

use crate::{
    Clock, Integrator, SimObject, StateSlot, TimeScale,
    object::{Control, InitContext, ReportContext, UpdateContext},
};

pub use builder::ObjectBuilder;

/// Handle to an object in a [`World`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub(crate) usize);

/// Handle to an integrated state slot in a [`World`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(pub(crate) usize);

/// Handle to a rate field in a [`World`].
///
/// A rate is a value written by its owning object during `update` and read as
/// the derivative of any state wired to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RateId(pub(crate) usize);

impl ObjectId {
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl StateId {
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl RateId {
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Where a state slot reads its derivative from.
///
/// The source may belong to the slot's own object or to any other object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// The current value of another state slot.
    State(StateId),
    /// A rate field written during `update`.
    Rate(RateId),
}

impl From<StateId> for Source {
    fn from(id: StateId) -> Self {
        Self::State(id)
    }
}

impl From<RateId> for Source {
    fn from(id: RateId) -> Self {
        Self::Rate(id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Rate {
    pub(crate) name: String,
    pub(crate) value: f64,
}

struct Entry<T> {
    name: String,
    object: Box<dyn SimObject<T>>,
    states: Range<usize>,
    rates: Range<usize>,
    init_count: u32,
}

/// Arena owning the objects of a simulation and all of their data.
///
/// Handles returned by one world are meaningless in another. Passing a foreign
/// handle to any accessor panics or reads an unrelated value.
pub struct World<T> {
    entries: Vec<Entry<T>>,
    states: Vec<StateSlot>,
    rates: Vec<Rate>,
    retired_states: Vec<Range<usize>>,
    retired_rates: Vec<Range<usize>>,
}

impl<T: TimeScale> Default for World<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TimeScale> World<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            states: Vec::new(),
            rates: Vec::new(),
            retired_states: Vec::new(),
            retired_rates: Vec::new(),
        }
    }

    /// Starts declaring a new object.
    ///
    /// The object is only added once [`ObjectBuilder::finish`] succeeds.
    pub fn spawn(&mut self, name: impl Into<String>) -> ObjectBuilder<'_, T> {
        ObjectBuilder::new(self, name.into())
    }

    /// Number of objects in the world.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: ObjectId) -> bool {
        id.0 < self.entries.len()
    }

    /// Name the object was spawned with.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not an object of this world.
    #[must_use]
    pub fn name(&self, id: ObjectId) -> &str {
        &self.entries[id.0].name
    }

    /// Number of times a stage containing the object has been entered.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not an object of this world.
    #[must_use]
    pub fn init_count(&self, id: ObjectId) -> u32 {
        self.entries[id.0].init_count
    }

    /// Current value of a state slot.
    #[must_use]
    pub fn value(&self, id: StateId) -> f64 {
        self.states[id.0].value()
    }

    /// Current value of a rate field.
    #[must_use]
    pub fn rate(&self, id: RateId) -> f64 {
        self.rates[id.0].value
    }

    /// Name the rate was declared with.
    #[must_use]
    pub fn rate_name(&self, id: RateId) -> &str {
        &self.rates[id.0].name
    }

    #[must_use]
    pub fn slot(&self, id: StateId) -> &StateSlot {
        &self.states[id.0]
    }

    /// Overwrites a state value from outside the step loop.
    ///
    /// Drivers use this between runs or between steps to impose new initial
    /// conditions.
    pub fn set_value(&mut self, id: StateId, value: f64) {
        self.states[id.0].set_value(value);
    }

    /// State slots owned by an object, in declaration order.
    pub fn states_of(&self, id: ObjectId) -> impl Iterator<Item = StateId> + use<T> {
        self.entries[id.0].states.clone().map(StateId)
    }

    /// Rate fields owned by an object, in declaration order.
    pub fn rates_of(&self, id: ObjectId) -> impl Iterator<Item = RateId> + use<T> {
        self.entries[id.0].rates.clone().map(RateId)
    }

    pub(crate) fn reset_init_counts(&mut self) {
        for entry in &mut self.entries {
            entry.init_count = 0;
        }
    }

    pub(crate) fn init_object(&mut self, id: ObjectId) {
        let Self {
            entries,
            states,
            rates,
            ..
        } = self;
        let entry = &mut entries[id.0];

        let mut ctx = InitContext {
            object: &entry.name,
            init_count: entry.init_count,
            own_states: entry.states.clone(),
            own_rates: entry.rates.clone(),
            states,
            rates,
        };
        entry.object.init(&mut ctx);
        entry.init_count += 1;
    }

    pub(crate) fn update_object(&mut self, id: ObjectId, clock: &mut Clock<T>, control: &mut Control) {
        let Self {
            entries,
            states,
            rates,
            ..
        } = self;
        let entry = &mut entries[id.0];

        let mut ctx = UpdateContext {
            object: &entry.name,
            own_rates: entry.rates.clone(),
            states,
            rates,
            clock,
            control,
        };
        entry.object.update(&mut ctx);
    }

    pub(crate) fn report_object(&mut self, id: ObjectId, clock: &mut Clock<T>, control: &mut Control) {
        let Self {
            entries,
            states,
            rates,
            ..
        } = self;
        let entry = &mut entries[id.0];

        let mut ctx = ReportContext {
            states,
            rates,
            clock,
            control,
        };
        entry.object.report(&mut ctx);
    }

    /// Records the derivative of every slot of `id` for `pass`.
    pub(crate) fn sample_derivatives(&mut self, id: ObjectId, pass: usize) {
        for index in self.entries[id.0].states.clone() {
            let derivative = match self.states[index].source() {
                Source::State(source) => self.states[source.0].value(),
                Source::Rate(source) => self.rates[source.0].value,
            };
            self.states[index].sample(pass, derivative);
        }
    }

    /// Applies the integrator's value update to every slot of `id`.
    pub(crate) fn advance_states<A: Integrator>(
        &mut self,
        id: ObjectId,
        integrator: &A,
        pass: usize,
        dt: f64,
    ) {
        let range = self.entries[id.0].states.clone();
        for slot in &mut self.states[range] {
            integrator.update_value(pass, dt, slot);
        }
    }
}

impl<T> fmt::Debug for World<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("World")
            .field(
                "objects",
                &self.entries.iter().map(|e| &e.name).collect::<Vec<_>>(),
            )
            .field("states", &self.states)
            .field("rates", &self.rates)
            .finish()
    }
}
