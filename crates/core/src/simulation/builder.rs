use std::collections::HashSet;

use crate::{ConfigError, Integrator, MAX_PASSES, ObjectId, Period, Stage, TimeScale, World};

use super::Simulation;

struct PendingStage<T> {
    name: String,
    period: T,
    objects: Vec<ObjectId>,
}

/// Assembles a [`Simulation`] from a world, an ordered list of stages, and a
/// run horizon.
///
/// Nothing is validated until [`SimulationBuilder::build`].
pub struct SimulationBuilder<T> {
    world: World<T>,
    stages: Vec<PendingStage<T>>,
    horizon: Option<T>,
}

impl<T: TimeScale> SimulationBuilder<T> {
    pub(super) fn new(world: World<T>) -> Self {
        Self {
            world,
            stages: Vec::new(),
            horizon: None,
        }
    }

    /// Appends a stage that advances `objects`, in the given order, with the
    /// base step `period`.
    #[must_use]
    pub fn stage(
        mut self,
        name: impl Into<String>,
        period: T,
        objects: impl IntoIterator<Item = ObjectId>,
    ) -> Self {
        self.stages.push(PendingStage {
            name: name.into(),
            period,
            objects: objects.into_iter().collect(),
        });
        self
    }

    /// Sets the time at which the run ends.
    #[must_use]
    pub fn horizon(mut self, horizon: T) -> Self {
        self.horizon = Some(horizon);
        self
    }

    /// Validates the configuration and builds the simulation.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] describing the first problem found. The checks
    /// run in this order: the integrator's pass count, the presence of at
    /// least one stage, each stage (non-empty, positive period, known and
    /// distinct objects), and finally the horizon.
    pub fn build<A: Integrator>(self, integrator: A) -> Result<Simulation<T, A>, ConfigError> {
        if A::PASSES == 0 || A::PASSES > MAX_PASSES {
            return Err(ConfigError::UnsupportedPasses {
                name: A::NAME,
                passes: A::PASSES,
            });
        }

        if self.stages.is_empty() {
            return Err(ConfigError::NoStages);
        }

        let mut stages = Vec::with_capacity(self.stages.len());
        for pending in self.stages {
            stages.push(validate_stage(&self.world, pending)?);
        }

        let horizon = self.horizon.ok_or(ConfigError::MissingHorizon)?;
        let horizon = Period::new(horizon).map_err(ConfigError::InvalidHorizon)?;

        Ok(Simulation::new(self.world, stages, integrator, horizon))
    }
}

fn validate_stage<T: TimeScale>(world: &World<T>, pending: PendingStage<T>) -> Result<Stage<T>, ConfigError> {
    let PendingStage {
        name,
        period,
        objects,
    } = pending;

    if objects.is_empty() {
        return Err(ConfigError::EmptyStage { stage: name });
    }

    let period = match Period::new(period) {
        Ok(period) => period,
        Err(source) => return Err(ConfigError::InvalidPeriod { stage: name, source }),
    };

    let mut seen = HashSet::with_capacity(objects.len());
    for &id in &objects {
        if !world.contains(id) {
            return Err(ConfigError::UnknownObject {
                stage: name,
                index: id.index(),
            });
        }
        if !seen.insert(id) {
            return Err(ConfigError::DuplicateObject {
                stage: name,
                object: world.name(id).to_owned(),
            });
        }
    }

    Ok(Stage::new(name, period, objects))
}
