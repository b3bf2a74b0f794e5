use cadence_core::{
    ConfigError, InitContext, ObjectId, RateId, ReportContext, SimObject, StateId, TimeScale,
    UpdateContext, World,
};
use tracing::info;
use uom::si::{
    f64::{Length, Velocity},
    length::meter,
    velocity::meter_per_second,
};

/// A point moving at constant velocity in the plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    x0: f64,
    y0: f64,
    vx: f64,
    vy: f64,
}

/// Handles into the world for a spawned [`Target`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetHandle {
    pub id: ObjectId,
    /// Position along x, in meters.
    pub x: StateId,
    /// Position along y, in meters.
    pub y: StateId,
}

impl Target {
    #[must_use]
    pub fn new(x: Length, y: Length, vx: Velocity, vy: Velocity) -> Self {
        Self {
            x0: x.get::<meter>(),
            y0: y.get::<meter>(),
            vx: vx.get::<meter_per_second>(),
            vy: vy.get::<meter_per_second>(),
        }
    }

    /// Adds the target to `world` under `name`.
    ///
    /// # Errors
    ///
    /// Propagates wiring errors from the object builder.
    pub fn spawn<T: TimeScale>(self, world: &mut World<T>, name: &str) -> Result<TargetHandle, ConfigError> {
        let mut builder = world.spawn(name);
        let x = builder.state("x", self.x0);
        let y = builder.state("y", self.y0);
        let vx = builder.rate("vx", self.vx);
        let vy = builder.rate("vy", self.vy);
        builder.integrate(x, vx)?;
        builder.integrate(y, vy)?;

        let handle = TargetHandle {
            id: builder.id(),
            x,
            y,
        };
        builder.finish(Body {
            params: self,
            handle,
            vx,
            vy,
        })?;

        Ok(handle)
    }
}

struct Body {
    params: Target,
    handle: TargetHandle,
    vx: RateId,
    vy: RateId,
}

impl<T: TimeScale> SimObject<T> for Body {
    fn init(&mut self, ctx: &mut InitContext<'_>) {
        if ctx.is_first() {
            ctx.set_value(self.handle.x, self.params.x0);
            ctx.set_value(self.handle.y, self.params.y0);
        }
    }

    fn update(&mut self, ctx: &mut UpdateContext<'_, T>) {
        ctx.set_rate(self.vx, self.params.vx);
        ctx.set_rate(self.vy, self.params.vy);
    }

    fn report(&mut self, ctx: &mut ReportContext<'_, T>) {
        if ctx.sample(T::from_seconds(1.0)) || ctx.tick_first() || ctx.tick_last() {
            info!(
                t = ctx.now().seconds(),
                x = ctx.value(self.handle.x),
                y = ctx.value(self.handle.y),
                "target"
            );
        }
    }
}
