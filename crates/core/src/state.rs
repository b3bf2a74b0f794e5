use crate::Source;

/// Largest pass count an integrator may declare.
pub const MAX_PASSES: usize = 4;

/// Storage for one integrated variable.
///
/// A slot holds the current value and the [`Source`] its derivative is read
/// from. `x0` and the per-pass derivative samples are scratch space, rewritten
/// on every full step.
#[derive(Debug, Clone, PartialEq)]
pub struct StateSlot {
    name: String,
    value: f64,
    source: Source,
    x0: f64,
    xd: [f64; MAX_PASSES],
}

impl StateSlot {
    pub(crate) fn new(name: String, value: f64, source: Source) -> Self {
        Self {
            name,
            value,
            source,
            x0: value,
            xd: [0.0; MAX_PASSES],
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current value.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Where the derivative of this slot is read from.
    #[must_use]
    pub fn source(&self) -> Source {
        self.source
    }

    /// Value at the start of the current full step.
    #[must_use]
    pub fn start_value(&self) -> f64 {
        self.x0
    }

    /// Derivative sampled at `pass` of the current full step.
    ///
    /// # Panics
    ///
    /// Panics if `pass >= MAX_PASSES`.
    #[must_use]
    pub fn derivative(&self, pass: usize) -> f64 {
        self.xd[pass]
    }

    /// Overwrites the current value.
    ///
    /// Integrators call this from their value-update rule.
    pub fn set_value(&mut self, value: f64) {
        self.value = value;
    }

    /// Records the derivative for `pass`, snapshotting the start value on the
    /// first pass of a step.
    pub(crate) fn sample(&mut self, pass: usize, derivative: f64) {
        if pass == 0 {
            self.x0 = self.value;
        }
        self.xd[pass] = derivative;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::{RateId, StateId};

    #[test]
    fn first_pass_snapshots_value() {
        let mut slot = StateSlot::new("x".into(), 2.0, Source::Rate(RateId(0)));

        slot.sample(0, 0.5);
        slot.set_value(3.0);
        slot.sample(1, 0.25);

        assert_eq!(slot.start_value(), 2.0);
        assert_eq!(slot.value(), 3.0);
        assert_eq!(slot.derivative(0), 0.5);
        assert_eq!(slot.derivative(1), 0.25);
    }

    #[test]
    fn later_passes_keep_snapshot() {
        let mut slot = StateSlot::new("x".into(), 1.0, Source::State(StateId(1)));

        slot.sample(0, 1.0);
        slot.set_value(5.0);
        slot.sample(3, 1.0);

        assert_eq!(slot.start_value(), 1.0);
        assert_eq!(slot.name(), "x");
        assert_eq!(slot.source(), Source::State(StateId(1)));
    }
}
