use crate::{ConfigError, ObjectId, RateId, SimObject, StateId, TimeScale, UpdateContext, World};

/// A state integrated from a fixed rate.
#[derive(Debug)]
pub(crate) struct Constant {
    rate: RateId,
    value: f64,
}

pub(crate) struct ConstantHandle {
    pub(crate) id: ObjectId,
    pub(crate) state: StateId,
    pub(crate) rate: RateId,
}

impl Constant {
    pub(crate) fn spawn<T: TimeScale>(
        world: &mut World<T>,
        name: &str,
        initial: f64,
        rate: f64,
    ) -> Result<ConstantHandle, ConfigError> {
        let mut builder = world.spawn(name);
        let state = builder.state("x", initial);
        let rate_id = builder.rate("rate", rate);
        builder.integrate(state, rate_id)?;
        let id = builder.finish(Constant {
            rate: rate_id,
            value: rate,
        })?;

        Ok(ConstantHandle {
            id,
            state,
            rate: rate_id,
        })
    }
}

impl<T: TimeScale> SimObject<T> for Constant {
    fn update(&mut self, ctx: &mut UpdateContext<'_, T>) {
        ctx.set_rate(self.rate, self.value);
    }
}
