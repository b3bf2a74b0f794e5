use crate::{Clock, Integrator, ObjectId, Period, TimeScale, World, object::Control};

/// An ordered set of objects advanced together with one base period.
///
/// Objects are visited in declaration order by every fan-out. A stage is
/// entered at most once per run and never revisited once completed.
#[derive(Debug, Clone, PartialEq)]
pub struct Stage<T> {
    name: String,
    period: Period<T>,
    objects: Vec<ObjectId>,
    completed: bool,
}

impl<T: TimeScale> Stage<T> {
    pub(crate) fn new(name: String, period: Period<T>, objects: Vec<ObjectId>) -> Self {
        Self {
            name,
            period,
            objects,
            completed: false,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Base integration period.
    #[must_use]
    pub fn period(&self) -> Period<T> {
        self.period
    }

    #[must_use]
    pub fn objects(&self) -> &[ObjectId] {
        &self.objects
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub(crate) fn activate(&mut self) {
        self.completed = false;
    }

    pub(crate) fn complete(&mut self) {
        self.completed = true;
    }

    pub(crate) fn init_objects(&self, world: &mut World<T>) {
        for &id in &self.objects {
            world.init_object(id);
        }
    }

    pub(crate) fn update(&self, world: &mut World<T>, clock: &mut Clock<T>, control: &mut Control) {
        for &id in &self.objects {
            world.update_object(id, clock, control);
        }
    }

    /// Applies the current pass to every state of every object.
    ///
    /// All derivatives are sampled before any value moves, so a state-sourced
    /// derivative always reads the value from before this pass.
    pub(crate) fn propagate<A: Integrator>(&self, world: &mut World<T>, integrator: &A, clock: &Clock<T>) {
        let pass = clock.pass();
        let dt = clock.dt().seconds();

        for &id in &self.objects {
            world.sample_derivatives(id, pass);
        }
        for &id in &self.objects {
            world.advance_states(id, integrator, pass, dt);
        }
    }

    pub(crate) fn report(&self, world: &mut World<T>, clock: &mut Clock<T>, control: &mut Control) {
        for &id in &self.objects {
            world.report_object(id, clock, control);
        }
    }
}
