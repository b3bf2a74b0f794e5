use crate::{ConfigError, ObjectId, RateId, SimObject, StateId, TimeScale, UpdateContext, World};

/// Exponential decay, `dx/dt = -k * x`.
#[derive(Debug)]
pub(crate) struct Decay {
    x: StateId,
    rate: RateId,
    k: f64,
}

pub(crate) struct DecayHandle {
    pub(crate) id: ObjectId,
    pub(crate) x: StateId,
}

impl Decay {
    pub(crate) fn spawn<T: TimeScale>(
        world: &mut World<T>,
        name: &str,
        x0: f64,
        k: f64,
    ) -> Result<DecayHandle, ConfigError> {
        let mut builder = world.spawn(name);
        let x = builder.state("x", x0);
        let rate = builder.rate("xd", -k * x0);
        builder.integrate(x, rate)?;
        let id = builder.finish(Decay { x, rate, k })?;

        Ok(DecayHandle { id, x })
    }
}

impl<T: TimeScale> SimObject<T> for Decay {
    fn update(&mut self, ctx: &mut UpdateContext<'_, T>) {
        let x = ctx.value(self.x);
        ctx.set_rate(self.rate, -self.k * x);
    }
}
