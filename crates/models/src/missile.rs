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

use crate::TargetHandle;

/// A constant-speed pursuer whose velocity always points at its target.
///
/// Requests a halt once it comes within the kill radius of the target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Missile {
    x0: f64,
    y0: f64,
    speed: f64,
    kill_radius: f64,
}

/// Handles into the world for a spawned [`Missile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissileHandle {
    pub id: ObjectId,
    pub x: StateId,
    pub y: StateId,
    /// Distance to the target from the latest update, in meters.
    pub range: RateId,
}

impl Missile {
    /// Creates a missile at `(x, y)`. The kill radius defaults to 0.1 m.
    #[must_use]
    pub fn new(x: Length, y: Length, speed: Velocity) -> Self {
        Self {
            x0: x.get::<meter>(),
            y0: y.get::<meter>(),
            speed: speed.get::<meter_per_second>(),
            kill_radius: 0.1,
        }
    }

    #[must_use]
    pub fn with_kill_radius(mut self, radius: Length) -> Self {
        self.kill_radius = radius.get::<meter>();
        self
    }

    /// Adds the missile to `world`, homing on `target`.
    ///
    /// # Errors
    ///
    /// Propagates wiring errors from the object builder.
    pub fn spawn<T: TimeScale>(
        self,
        world: &mut World<T>,
        name: &str,
        target: TargetHandle,
    ) -> Result<MissileHandle, ConfigError> {
        let mut builder = world.spawn(name);
        let x = builder.state("x", self.x0);
        let y = builder.state("y", self.y0);
        let vx = builder.rate("vx", 0.0);
        let vy = builder.rate("vy", 0.0);
        let range = builder.rate("range", f64::INFINITY);
        builder.integrate(x, vx)?;
        builder.integrate(y, vy)?;

        let handle = MissileHandle {
            id: builder.id(),
            x,
            y,
            range,
        };
        builder.finish(Pursuer {
            params: self,
            handle,
            vx,
            vy,
            target,
        })?;

        Ok(handle)
    }
}

struct Pursuer {
    params: Missile,
    handle: MissileHandle,
    vx: RateId,
    vy: RateId,
    target: TargetHandle,
}

impl<T: TimeScale> SimObject<T> for Pursuer {
    fn init(&mut self, ctx: &mut InitContext<'_>) {
        if ctx.is_first() {
            ctx.set_value(self.handle.x, self.params.x0);
            ctx.set_value(self.handle.y, self.params.y0);
        }
    }

    fn update(&mut self, ctx: &mut UpdateContext<'_, T>) {
        let dx = ctx.value(self.target.x) - ctx.value(self.handle.x);
        let dy = ctx.value(self.target.y) - ctx.value(self.handle.y);
        let d = dx.hypot(dy);

        ctx.set_rate(self.vx, self.params.speed * dx / d);
        ctx.set_rate(self.vy, self.params.speed * dy / d);
        ctx.set_rate(self.handle.range, d);

        if d <= self.params.kill_radius {
            ctx.request_halt();
        }
    }

    fn report(&mut self, ctx: &mut ReportContext<'_, T>) {
        if ctx.sample(T::from_seconds(1.0)) || ctx.tick_first() || ctx.tick_last() {
            info!(
                t = ctx.now().seconds(),
                x = ctx.value(self.handle.x),
                y = ctx.value(self.handle.y),
                range = ctx.rate(self.handle.range),
                "missile"
            );
        }
    }
}
