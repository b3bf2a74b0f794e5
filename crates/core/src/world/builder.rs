use std::ops::Range;

use crate::{ConfigError, ObjectId, RateId, SimObject, Source, StateId, StateSlot, TimeScale};

use super::{Entry, Rate, World};

struct PendingState {
    name: String,
    value: f64,
    source: Option<Source>,
}

/// Declares the states and rates of a new object and wires its derivatives.
///
/// Handles are handed out as soon as a state or rate is declared, so an
/// object's own states can be wired to each other before it is finished.
/// No object is added to the world until [`ObjectBuilder::finish`] succeeds.
///
/// A builder dropped without finishing, or whose `finish` fails, retires the
/// handles it issued. Their indices are never reissued, and wiring a state to
/// one fails with [`ConfigError::UnknownSource`].
///
/// ```
/// use cadence_core::{SimObject, UpdateContext, World};
///
/// struct Idle;
///
/// impl SimObject<f64> for Idle {
///     fn update(&mut self, _ctx: &mut UpdateContext<'_, f64>) {}
/// }
///
/// let mut world = World::<f64>::new();
/// let mut body = world.spawn("body");
/// let x = body.state("x", 0.0);
/// let v = body.state("v", 1.0);
/// let a = body.rate("a", 0.0);
/// body.integrate(x, v)?;
/// body.integrate(v, a)?;
/// let id = body.finish(Idle)?;
///
/// assert_eq!(world.name(id), "body");
/// assert_eq!(world.value(v), 1.0);
/// # Ok::<(), cadence_core::ConfigError>(())
/// ```
pub struct ObjectBuilder<'w, T> {
    world: &'w mut World<T>,
    name: String,
    states: Vec<PendingState>,
    rates: Vec<Rate>,
}

impl<'w, T: TimeScale> ObjectBuilder<'w, T> {
    pub(super) fn new(world: &'w mut World<T>, name: String) -> Self {
        Self {
            world,
            name,
            states: Vec::new(),
            rates: Vec::new(),
        }
    }

    /// Handle the object will have once finished.
    #[must_use]
    pub fn id(&self) -> ObjectId {
        ObjectId(self.world.entries.len())
    }

    /// Declares an integrated state with its initial value.
    pub fn state(&mut self, name: impl Into<String>, initial: f64) -> StateId {
        let id = StateId(self.world.states.len() + self.states.len());
        self.states.push(PendingState {
            name: name.into(),
            value: initial,
            source: None,
        });
        id
    }

    /// Declares a rate field with its initial value.
    pub fn rate(&mut self, name: impl Into<String>, initial: f64) -> RateId {
        let id = RateId(self.world.rates.len() + self.rates.len());
        self.rates.push(Rate {
            name: name.into(),
            value: initial,
        });
        id
    }

    /// Binds the derivative of one of this object's states to `source`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ForeignState`] if `state` was not declared on
    /// this builder, or [`ConfigError::AlreadyWired`] if it is already bound.
    pub fn integrate(&mut self, state: StateId, source: impl Into<Source>) -> Result<(), ConfigError> {
        let pending = state
            .0
            .checked_sub(self.world.states.len())
            .and_then(|offset| self.states.get_mut(offset))
            .ok_or_else(|| ConfigError::ForeignState {
                object: self.name.clone(),
                index: state.0,
            })?;

        if pending.source.is_some() {
            return Err(ConfigError::AlreadyWired {
                object: self.name.clone(),
                state: pending.name.clone(),
            });
        }

        pending.source = Some(source.into());
        Ok(())
    }

    /// Validates the wiring and adds the object to the world.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Unwired`] if a declared state has no derivative
    /// source, or [`ConfigError::UnknownSource`] if a source does not resolve
    /// to a state or rate of the world.
    pub fn finish(mut self, object: impl SimObject<T> + 'static) -> Result<ObjectId, ConfigError> {
        let state_count = self.world.states.len() + self.states.len();
        let rate_count = self.world.rates.len() + self.rates.len();

        let mut slots = Vec::with_capacity(self.states.len());
        for pending in &self.states {
            let Some(source) = pending.source else {
                return Err(ConfigError::Unwired {
                    object: self.name.clone(),
                    state: pending.name.clone(),
                });
            };

            let resolves = match source {
                Source::State(id) => id.0 < state_count && !is_retired(&self.world.retired_states, id.0),
                Source::Rate(id) => id.0 < rate_count && !is_retired(&self.world.retired_rates, id.0),
            };
            if !resolves {
                return Err(ConfigError::UnknownSource {
                    object: self.name.clone(),
                    state: pending.name.clone(),
                });
            }

            slots.push(StateSlot::new(pending.name.clone(), pending.value, source));
        }

        self.states.clear();
        let rates = std::mem::take(&mut self.rates);
        let name = std::mem::take(&mut self.name);

        let world = &mut *self.world;
        let id = ObjectId(world.entries.len());

        let state_range = world.states.len()..world.states.len() + slots.len();
        let rate_range = world.rates.len()..world.rates.len() + rates.len();

        world.states.extend(slots);
        world.rates.extend(rates);
        world.entries.push(Entry {
            name,
            object: Box::new(object),
            states: state_range,
            rates: rate_range,
            init_count: 0,
        });

        Ok(id)
    }
}

impl<T> Drop for ObjectBuilder<'_, T> {
    /// Parks the slots of an unfinished object in the world, owned by no
    /// object, so the handles already issued for them never alias another
    /// object's data.
    fn drop(&mut self) {
        let world = &mut *self.world;

        if !self.states.is_empty() {
            let start = world.states.len();
            for (offset, pending) in self.states.drain(..).enumerate() {
                let own = Source::State(StateId(start + offset));
                world.states.push(StateSlot::new(pending.name, pending.value, own));
            }
            world.retired_states.push(start..world.states.len());
        }

        if !self.rates.is_empty() {
            let start = world.rates.len();
            world.rates.append(&mut self.rates);
            world.retired_rates.push(start..world.rates.len());
        }
    }
}

fn is_retired(retired: &[Range<usize>], index: usize) -> bool {
    retired.iter().any(|range| range.contains(&index))
}
