//! The two-stage pursuit scenario.
//!
//! A target crosses the plane at constant velocity. During `acquire` a radar
//! slews onto it, and once the radar locks the run moves to `engage`, where a
//! missile launched from the origin chases the target until it comes within
//! its kill radius and halts the run.

use cadence_core::{
    Action, ConfigError, Event, Observer, Rk4, Simulation, Solution, TimeScale, World,
};
use uom::si::{
    angle::degree,
    angular_velocity::radian_per_second,
    f64::{Angle, AngularVelocity, Length, Time, Velocity},
    length::meter,
    time::second,
    velocity::meter_per_second,
};

use crate::{Missile, MissileHandle, Radar, RadarHandle, Target, TargetHandle};

/// Step size and horizon shared by both stages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PursuitConfig {
    pub step: Time,
    pub horizon: Time,
}

impl Default for PursuitConfig {
    fn default() -> Self {
        Self {
            step: Time::new::<second>(1.0e-4),
            horizon: Time::new::<second>(10.0),
        }
    }
}

/// An assembled pursuit run along with the handles of its objects.
#[derive(Debug)]
pub struct Pursuit<T> {
    pub simulation: Simulation<T, Rk4>,
    pub target: TargetHandle,
    pub radar: RadarHandle,
    pub missile: MissileHandle,
}

impl<T: TimeScale> Pursuit<T> {
    /// Builds the scenario.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the step or horizon is not positive.
    pub fn new(config: &PursuitConfig) -> Result<Self, ConfigError> {
        let mut world = World::new();

        let target = Target::new(
            Length::new::<meter>(20.0),
            Length::new::<meter>(5.0),
            Velocity::new::<meter_per_second>(-1.0),
            Velocity::new::<meter_per_second>(0.0),
        )
        .spawn(&mut world, "target")?;

        let radar = Radar::new(
            Angle::new::<degree>(60.0),
            AngularVelocity::new::<radian_per_second>(2.643),
            0.7,
        )
        .spawn(&mut world, "radar", target)?;

        let missile = Missile::new(
            Length::new::<meter>(0.0),
            Length::new::<meter>(0.0),
            Velocity::new::<meter_per_second>(2.0),
        )
        .spawn(&mut world, "missile", target)?;

        let step = T::from_seconds(config.step.get::<second>());
        let simulation = Simulation::builder(world)
            .stage("acquire", step, [target.id, radar.id])
            .stage("engage", step, [target.id, missile.id, radar.id])
            .horizon(T::from_seconds(config.horizon.get::<second>()))
            .build(Rk4)?;

        Ok(Self {
            simulation,
            target,
            radar,
            missile,
        })
    }

    pub fn run(&mut self) -> Solution<T> {
        self.simulation.run()
    }

    pub fn run_observed<O>(&mut self, observer: O) -> Solution<T>
    where
        O: for<'a> Observer<Event<'a, T>, Action>,
    {
        self.simulation.run_observed(observer)
    }

    /// Current missile to target distance, in meters.
    #[must_use]
    pub fn distance(&self) -> f64 {
        distance(self.simulation.world(), self.target, self.missile)
    }
}

/// Missile to target distance in `world`, in meters.
#[must_use]
pub fn distance<T: TimeScale>(world: &World<T>, target: TargetHandle, missile: MissileHandle) -> f64 {
    let dx = world.value(target.x) - world.value(missile.x);
    let dy = world.value(target.y) - world.value(missile.y);
    dx.hypot(dy)
}
