use crate::{ConfigError, ObjectId, RateId, SimObject, StateId, TimeScale, UpdateContext, World};

/// Integrates the clock, `dx/dt = t`, from `x = 0`.
#[derive(Debug)]
pub(crate) struct Ramp {
    rate: RateId,
}

pub(crate) struct RampHandle {
    pub(crate) id: ObjectId,
    pub(crate) x: StateId,
}

impl Ramp {
    pub(crate) fn spawn<T: TimeScale>(world: &mut World<T>, name: &str) -> Result<RampHandle, ConfigError> {
        let mut builder = world.spawn(name);
        let x = builder.state("x", 0.0);
        let rate = builder.rate("t", 0.0);
        builder.integrate(x, rate)?;
        let id = builder.finish(Ramp { rate })?;

        Ok(RampHandle { id, x })
    }
}

impl<T: TimeScale> SimObject<T> for Ramp {
    fn update(&mut self, ctx: &mut UpdateContext<'_, T>) {
        let t = ctx.now().seconds();
        ctx.set_rate(self.rate, t);
    }
}
