use cadence_core::{
    ConfigError, InitContext, ObjectId, RateId, ReportContext, SimObject, StateId, TimeScale,
    UpdateContext, World,
};
use tracing::info;
use uom::si::{
    angle::{degree, radian},
    angular_velocity::radian_per_second,
    f64::{Angle, AngularVelocity},
};

use crate::TargetHandle;

/// A tracking radar modelled as a second-order servo on the target bearing.
///
/// ```text
/// theta' = omega
/// omega' = wn^2 * err - 2 * zeta * wn * omega,    err = atan(y_t / x_t) - theta
/// ```
///
/// The first time `|err|` drops below the lock threshold the radar requests a
/// stage transition. The lock persists across stages within a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Radar {
    theta0: f64,
    wn: f64,
    zeta: f64,
    lock: f64,
}

/// Handles into the world for a spawned [`Radar`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RadarHandle {
    pub id: ObjectId,
    /// Antenna angle, in radians.
    pub theta: StateId,
    /// Antenna rate, in radians per second.
    pub omega: StateId,
    /// Bearing error from the latest update, in radians.
    pub error: RateId,
}

impl Radar {
    /// Creates a radar pointing at `theta` with the given natural frequency
    /// and damping ratio. The lock threshold defaults to one degree.
    #[must_use]
    pub fn new(theta: Angle, wn: AngularVelocity, zeta: f64) -> Self {
        Self {
            theta0: theta.get::<radian>(),
            wn: wn.get::<radian_per_second>(),
            zeta,
            lock: Angle::new::<degree>(1.0).get::<radian>(),
        }
    }

    #[must_use]
    pub fn with_lock_threshold(mut self, lock: Angle) -> Self {
        self.lock = lock.get::<radian>();
        self
    }

    /// Adds the radar to `world`, tracking `target`.
    ///
    /// # Errors
    ///
    /// Propagates wiring errors from the object builder.
    pub fn spawn<T: TimeScale>(
        self,
        world: &mut World<T>,
        name: &str,
        target: TargetHandle,
    ) -> Result<RadarHandle, ConfigError> {
        let mut builder = world.spawn(name);
        let theta = builder.state("theta", self.theta0);
        let omega = builder.state("omega", 0.0);
        let omega_rate = builder.rate("omega_rate", 0.0);
        let error = builder.rate("error", 0.0);
        builder.integrate(theta, omega)?;
        builder.integrate(omega, omega_rate)?;

        let handle = RadarHandle {
            id: builder.id(),
            theta,
            omega,
            error,
        };
        builder.finish(Servo {
            params: self,
            handle,
            omega_rate,
            target,
            engaged: false,
        })?;

        Ok(handle)
    }
}

struct Servo {
    params: Radar,
    handle: RadarHandle,
    omega_rate: RateId,
    target: TargetHandle,
    engaged: bool,
}

impl<T: TimeScale> SimObject<T> for Servo {
    fn init(&mut self, ctx: &mut InitContext<'_>) {
        if ctx.is_first() {
            ctx.set_value(self.handle.theta, self.params.theta0);
            ctx.set_value(self.handle.omega, 0.0);
            self.engaged = false;
        }
    }

    fn update(&mut self, ctx: &mut UpdateContext<'_, T>) {
        let Radar { wn, zeta, lock, .. } = self.params;

        let bearing = (ctx.value(self.target.y) / ctx.value(self.target.x)).atan();
        let err = bearing - ctx.value(self.handle.theta);

        if err.abs() < lock && !self.engaged {
            self.engaged = true;
            ctx.request_stage_transition();
        }

        let omega = ctx.value(self.handle.omega);
        ctx.set_rate(self.omega_rate, err * wn * wn - 2.0 * zeta * wn * omega);
        ctx.set_rate(self.handle.error, err);
    }

    fn report(&mut self, ctx: &mut ReportContext<'_, T>) {
        if ctx.sample(T::from_seconds(1.0)) || ctx.tick_first() || ctx.tick_last() {
            let err = Angle::new::<radian>(ctx.rate(self.handle.error));
            info!(
                t = ctx.now().seconds(),
                error_deg = err.get::<degree>(),
                "radar"
            );
        }
    }
}
