//! The step state machine.
//!
//! A [`Simulation`] owns a [`World`], its ordered [`Stage`]s, an
//! [`Integrator`], and the [`Clock`]. Each call to [`Simulation::step`]
//! advances one committed full step, running as many integrator passes
//! ("ticks") as that takes. Every tick follows the same protocol:
//!
//! 1. Register the run horizon as a clock event.
//! 2. Update the active stage's objects.
//! 3. On the first tick after entering the stage, emit a baseline report.
//! 4. Propagate every state for the current pass.
//! 5. Let the integrator move the clock.
//!
//! When the clock becomes ready the step commits. The stage reports, then
//! pending stage transition and halt requests (including any raised by those
//! reports) are consumed, and the horizon is
//! checked. Requests raised mid-step therefore take effect only on a committed
//! boundary.

mod action;
mod builder;
mod event;
mod solution;

pub use action::Action;
pub use builder::SimulationBuilder;
pub use event::{Event, EventKind};
pub use solution::{Solution, Status};

use tracing::{debug, info, trace};

use crate::{Clock, Integrator, Observer, Period, Rk4, Stage, TimeScale, World, object::Control};

/// Where a simulation is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Built but never started.
    Idle,
    /// Stepping the stage with this index.
    Advancing(usize),
    /// The run has ended.
    Terminated(Status),
}

/// A staged hybrid simulation.
///
/// # Example
///
/// ```
/// use cadence_core::{Euler, SimObject, Simulation, Status, UpdateContext, World};
///
/// struct Still;
///
/// impl SimObject<f64> for Still {
///     fn update(&mut self, _ctx: &mut UpdateContext<'_, f64>) {}
/// }
///
/// let mut world = World::<f64>::new();
/// let mut body = world.spawn("body");
/// let x = body.state("x", 0.0);
/// let v = body.rate("v", 2.0);
/// body.integrate(x, v)?;
/// let body = body.finish(Still)?;
///
/// let mut sim = Simulation::builder(world)
///     .stage("coast", 0.1, [body])
///     .horizon(1.0)
///     .build(Euler)?;
///
/// let solution = sim.run();
/// assert_eq!(solution.status, Status::ReachedHorizon);
/// assert_eq!(solution.steps, 10);
/// assert!((sim.world().value(x) - 2.0).abs() < 1e-12);
/// # Ok::<(), cadence_core::ConfigError>(())
/// ```
#[derive(Debug)]
pub struct Simulation<T, A = Rk4> {
    world: World<T>,
    stages: Vec<Stage<T>>,
    integrator: A,
    clock: Clock<T>,
    horizon: Period<T>,
    control: Control,
    phase: Phase,
    active: usize,
    steps: usize,
    ticks: usize,
    transitions: usize,
}

impl<T: TimeScale> Simulation<T> {
    /// Starts configuring a simulation over `world`.
    #[must_use]
    pub fn builder(world: World<T>) -> SimulationBuilder<T> {
        SimulationBuilder::new(world)
    }
}

impl<T: TimeScale, A: Integrator> Simulation<T, A> {
    pub(crate) fn new(world: World<T>, stages: Vec<Stage<T>>, integrator: A, horizon: Period<T>) -> Self {
        Self {
            world,
            stages,
            integrator,
            clock: Clock::new(),
            horizon,
            control: Control::default(),
            phase: Phase::Idle,
            active: 0,
            steps: 0,
            ticks: 0,
            transitions: 0,
        }
    }

    /// Rewinds the clock and enters the first stage.
    ///
    /// Every stage is marked incomplete, every object's init count is zeroed,
    /// and the first stage's objects are initialized. State values are left as
    /// they are, so objects decide through their init count whether to
    /// reseed. Later stages initialize their objects when they are entered.
    pub fn start(&mut self) {
        self.clock.init();
        self.clock.reset(self.stages[0].period().get());
        self.control = Control::default();

        for stage in &mut self.stages {
            stage.activate();
        }
        self.world.reset_init_counts();
        self.stages[0].init_objects(&mut self.world);

        self.phase = Phase::Advancing(0);
        self.active = 0;
        self.steps = 0;
        self.ticks = 0;
        self.transitions = 0;

        info!(
            integrator = A::NAME,
            stages = self.stages.len(),
            horizon = self.horizon.get().seconds(),
            "simulation started"
        );
        debug!(stage = self.stages[0].name(), index = 0, "entering stage");
    }

    /// Advances one committed full step without observation.
    ///
    /// See [`Simulation::step_observed`].
    pub fn step(&mut self) -> Phase {
        self.step_observed(&mut ())
    }

    /// Advances one committed full step, emitting an [`Event`] after every
    /// report.
    ///
    /// Starts the run first if it is [`Phase::Idle`]. Does nothing once the
    /// run is [`Phase::Terminated`].
    ///
    /// A [`Action::StopEarly`] returned for a baseline or step event ends the
    /// run when this step commits. Actions returned for the final event are
    /// ignored.
    pub fn step_observed<O>(&mut self, observer: &mut O) -> Phase
    where
        O: for<'a> Observer<Event<'a, T>, Action>,
    {
        match self.phase {
            Phase::Idle => self.start(),
            Phase::Advancing(_) => {}
            Phase::Terminated(_) => return self.phase,
        }

        let origin = self.active;

        // A completed stage is never re-entered.
        if self.stages[origin].is_completed() {
            self.terminate(origin, Status::StagesExhausted, observer);
            return self.phase;
        }

        let mut stop = false;

        loop {
            self.clock.event(self.horizon.get());

            self.stages[origin].update(&mut self.world, &mut self.clock, &mut self.control);

            if self.clock.tick_first() {
                self.stages[origin].report(&mut self.world, &mut self.clock, &mut self.control);
                stop |= self.emit(origin, EventKind::Baseline, observer);
                self.clock.set_tick_first(false);
            }

            self.stages[origin].propagate(&mut self.world, &self.integrator, &self.clock);
            self.integrator.advance_clock(&mut self.clock);
            self.ticks += 1;

            if self.clock.is_ready() {
                break;
            }
        }

        self.steps += 1;
        self.stages[origin].report(&mut self.world, &mut self.clock, &mut self.control);
        stop |= self.emit(origin, EventKind::Step, observer);

        trace!(
            stage = origin,
            step = self.steps,
            time = self.clock.now().seconds(),
            "step committed"
        );

        let exhausted = self.consume_transition();
        let halted = std::mem::take(&mut self.control.halt);
        let reached = self.clock.now() + T::epsilon() >= self.horizon.get();

        if halted {
            debug!(stage = origin, "halt requested");
        }

        let status = if halted {
            Some(Status::Halted)
        } else if exhausted {
            Some(Status::StagesExhausted)
        } else if reached {
            Some(Status::ReachedHorizon)
        } else if stop {
            Some(Status::StoppedByObserver)
        } else {
            None
        };

        match status {
            Some(status) => self.terminate(origin, status, observer),
            None => self.phase = Phase::Advancing(self.active),
        }

        self.phase
    }

    /// Runs from the start until termination without observation.
    pub fn run(&mut self) -> Solution<T> {
        self.run_observed(())
    }

    /// Runs from the start until termination.
    ///
    /// The run always begins with [`Simulation::start`], even if an earlier
    /// run was interrupted or completed.
    pub fn run_observed<O>(&mut self, mut observer: O) -> Solution<T>
    where
        O: for<'a> Observer<Event<'a, T>, Action>,
    {
        self.start();
        loop {
            if let Phase::Terminated(status) = self.step_observed(&mut observer) {
                return self.summary(status);
            }
        }
    }

    /// Asks to leave the active stage at the next committed step.
    pub fn request_stage_transition(&mut self) {
        self.control.transition = true;
    }

    /// Asks to end the run at the next committed step.
    pub fn request_halt(&mut self) {
        self.control.halt = true;
    }

    /// Summary of the run, once it has terminated.
    #[must_use]
    pub fn solution(&self) -> Option<Solution<T>> {
        match self.phase {
            Phase::Terminated(status) => Some(self.summary(status)),
            _ => None,
        }
    }

    #[must_use]
    pub fn world(&self) -> &World<T> {
        &self.world
    }

    /// Mutable access to the world between steps.
    pub fn world_mut(&mut self) -> &mut World<T> {
        &mut self.world
    }

    #[must_use]
    pub fn clock(&self) -> &Clock<T> {
        &self.clock
    }

    #[must_use]
    pub fn stages(&self) -> &[Stage<T>] {
        &self.stages
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn horizon(&self) -> T {
        self.horizon.get()
    }

    #[must_use]
    pub fn integrator(&self) -> &A {
        &self.integrator
    }

    /// Consumes a pending transition request, entering the next stage.
    ///
    /// Returns `true` if the request came from the last stage.
    fn consume_transition(&mut self) -> bool {
        if !std::mem::take(&mut self.control.transition) {
            return false;
        }

        let from = self.active;
        self.stages[from].complete();
        self.transitions += 1;

        let next = from + 1;
        if next >= self.stages.len() {
            debug!(stage = from, "transition requested from the last stage");
            return true;
        }

        self.active = next;
        self.clock.reset(self.stages[next].period().get());
        self.clock.set_tick_first(true);
        self.stages[next].init_objects(&mut self.world);

        debug!(
            from = self.stages[from].name(),
            to = self.stages[next].name(),
            time = self.clock.now().seconds(),
            "entering stage"
        );
        false
    }

    /// Emits the final report of `stage` and ends the run.
    fn terminate<O>(&mut self, stage: usize, status: Status, observer: &mut O)
    where
        O: for<'a> Observer<Event<'a, T>, Action>,
    {
        self.clock.set_tick_last(true);
        self.stages[stage].report(&mut self.world, &mut self.clock, &mut self.control);
        self.emit(stage, EventKind::Final, observer);

        self.phase = Phase::Terminated(status);

        info!(
            status = ?status,
            time = self.clock.now().seconds(),
            steps = self.steps,
            "simulation terminated"
        );
    }

    /// Sends an event to the observer and reports whether it asked to stop.
    fn emit<O>(&self, stage: usize, kind: EventKind, observer: &mut O) -> bool
    where
        O: for<'a> Observer<Event<'a, T>, Action>,
    {
        let event = Event::new(
            kind,
            stage,
            self.stages[stage].name(),
            self.steps,
            self.clock.now(),
            &self.world,
        );
        matches!(observer.observe(&event), Some(Action::StopEarly))
    }

    fn summary(&self, status: Status) -> Solution<T> {
        Solution {
            status,
            time: self.clock.now(),
            steps: self.steps,
            ticks: self.ticks,
            transitions: self.transitions,
            stage: self.active,
        }
    }
}
