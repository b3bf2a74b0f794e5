use cadence_core::{
    ConfigError, InitContext, ObjectId, ReportContext, SimObject, TimeScale, UpdateContext,
    World,
};

/// Requests a stage transition at a fixed time.
///
/// While its time lies ahead, the timer registers it as a clock event so a
/// step lands on it exactly. The request is made from the report of the first
/// committed step at or after that time, so the next stage starts there even
/// if other objects shortened the step. A timer whose time has already passed
/// when its stage is entered requests the transition from the baseline report,
/// and the stage is left after one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timer {
    at: f64,
    fired: bool,
}

impl Timer {
    /// A timer firing at `at` seconds.
    #[must_use]
    pub fn new(at: f64) -> Self {
        Self { at, fired: false }
    }

    /// Adds the timer to `world` under `name`.
    ///
    /// # Errors
    ///
    /// Propagates errors from the object builder.
    pub fn spawn<T: TimeScale>(self, world: &mut World<T>, name: &str) -> Result<ObjectId, ConfigError> {
        world.spawn(name).finish(self)
    }
}

impl<T: TimeScale> SimObject<T> for Timer {
    fn init(&mut self, ctx: &mut InitContext<'_>) {
        if ctx.is_first() {
            self.fired = false;
        }
    }

    fn update(&mut self, ctx: &mut UpdateContext<'_, T>) {
        if !self.fired {
            ctx.event(T::from_seconds(self.at));
        }
    }

    fn report(&mut self, ctx: &mut ReportContext<'_, T>) {
        if self.fired || ctx.tick_last() {
            return;
        }

        if ctx.now() + T::epsilon() >= T::from_seconds(self.at) {
            self.fired = true;
            ctx.request_stage_transition();
        }
    }
}
