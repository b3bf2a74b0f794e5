use cadence_core::{
    ConfigError, InitContext, ObjectId, RateId, ReportContext, SimObject, StateId, TimeScale,
    UpdateContext, World,
};
use tracing::info;

/// A first-order lag driving `gamma` toward a commanded value.
///
/// ```text
/// gamma' = k * (gamma_cmd - gamma) / v
/// ```
///
/// The time constant is `v / k`. `gamma` is seeded only on the first
/// initialization of a run, so a lag listed in several stages carries its
/// state across them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lag {
    gamma0: f64,
    gamma_cmd: f64,
    k: f64,
    v: f64,
}

/// Handles into the world for a spawned [`Lag`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LagHandle {
    pub id: ObjectId,
    pub gamma: StateId,
}

impl Default for Lag {
    /// A unit step from rest with a one second time constant.
    fn default() -> Self {
        Self {
            gamma0: 0.0,
            gamma_cmd: 1.0,
            k: 1000.0,
            v: 1000.0,
        }
    }
}

impl Lag {
    #[must_use]
    pub fn new(gamma0: f64, gamma_cmd: f64, k: f64, v: f64) -> Self {
        Self {
            gamma0,
            gamma_cmd,
            k,
            v,
        }
    }

    /// Time constant `v / k`, in seconds.
    #[must_use]
    pub fn time_constant(&self) -> f64 {
        self.v / self.k
    }

    /// Adds the lag to `world` under `name`.
    ///
    /// # Errors
    ///
    /// Propagates wiring errors from the object builder.
    pub fn spawn<T: TimeScale>(self, world: &mut World<T>, name: &str) -> Result<LagHandle, ConfigError> {
        let mut builder = world.spawn(name);
        let gamma = builder.state("gamma", self.gamma0);
        let gamma_rate = builder.rate("gamma_rate", 0.0);
        builder.integrate(gamma, gamma_rate)?;

        let handle = LagHandle {
            id: builder.id(),
            gamma,
        };
        builder.finish(Filter {
            params: self,
            gamma,
            gamma_rate,
        })?;

        Ok(handle)
    }
}

struct Filter {
    params: Lag,
    gamma: StateId,
    gamma_rate: RateId,
}

impl<T: TimeScale> SimObject<T> for Filter {
    fn init(&mut self, ctx: &mut InitContext<'_>) {
        if ctx.is_first() {
            ctx.set_value(self.gamma, self.params.gamma0);
        }
    }

    fn update(&mut self, ctx: &mut UpdateContext<'_, T>) {
        let Lag { gamma_cmd, k, v, .. } = self.params;
        let gamma = ctx.value(self.gamma);
        ctx.set_rate(self.gamma_rate, k * (gamma_cmd - gamma) / v);
    }

    fn report(&mut self, ctx: &mut ReportContext<'_, T>) {
        if ctx.sample(T::from_seconds(0.1)) {
            info!(t = ctx.now().seconds(), gamma = ctx.value(self.gamma), "lag");
        }
    }
}
