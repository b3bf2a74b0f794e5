use std::{cell::RefCell, rc::Rc};

use crate::{
    ConfigError, InitContext, ObjectId, ReportContext, SimObject, TimeScale, UpdateContext, World,
};

/// A callback made by the engine, as seen by a [`Recorder`].
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Init {
        object: &'static str,
        count: u32,
    },
    Update {
        object: &'static str,
        time: f64,
    },
    Report {
        object: &'static str,
        time: f64,
        first: bool,
        last: bool,
        hit: bool,
    },
}

pub(crate) type Log = Rc<RefCell<Vec<Call>>>;

/// A stateless object that records every callback into a shared log.
///
/// It can also request a stage transition or a halt once the clock reaches a
/// given time, from its update or from its report, and sample from its report.
#[derive(Debug)]
pub(crate) struct Recorder {
    name: &'static str,
    log: Log,
    transition_at: Option<f64>,
    halt_at: Option<f64>,
    report_halt_at: Option<f64>,
    sample_every: Option<f64>,
    requested: bool,
}

impl Recorder {
    pub(crate) fn new(name: &'static str, log: &Log) -> Self {
        Self {
            name,
            log: Rc::clone(log),
            transition_at: None,
            halt_at: None,
            report_halt_at: None,
            sample_every: None,
            requested: false,
        }
    }

    pub(crate) fn transition_at(mut self, time: f64) -> Self {
        self.transition_at = Some(time);
        self
    }

    pub(crate) fn halt_at(mut self, time: f64) -> Self {
        self.halt_at = Some(time);
        self
    }

    pub(crate) fn report_halt_at(mut self, time: f64) -> Self {
        self.report_halt_at = Some(time);
        self
    }

    pub(crate) fn sample_every(mut self, period: f64) -> Self {
        self.sample_every = Some(period);
        self
    }

    pub(crate) fn spawn<T: TimeScale>(self, world: &mut World<T>) -> Result<ObjectId, ConfigError> {
        world.spawn(self.name).finish(self)
    }
}

impl<T: TimeScale> SimObject<T> for Recorder {
    fn init(&mut self, ctx: &mut InitContext<'_>) {
        self.requested = false;
        self.log.borrow_mut().push(Call::Init {
            object: self.name,
            count: ctx.init_count(),
        });
    }

    fn update(&mut self, ctx: &mut UpdateContext<'_, T>) {
        let time = ctx.now().seconds();
        self.log.borrow_mut().push(Call::Update {
            object: self.name,
            time,
        });

        if let Some(at) = self.transition_at {
            if !self.requested && time + 1.0e-9 >= at {
                self.requested = true;
                ctx.request_stage_transition();
            }
        }

        if let Some(at) = self.halt_at {
            if time + 1.0e-9 >= at {
                ctx.request_halt();
            }
        }
    }

    fn report(&mut self, ctx: &mut ReportContext<'_, T>) {
        let hit = self
            .sample_every
            .is_some_and(|period| ctx.sample(T::from_seconds(period)));

        self.log.borrow_mut().push(Call::Report {
            object: self.name,
            time: ctx.now().seconds(),
            first: ctx.tick_first(),
            last: ctx.tick_last(),
            hit,
        });

        if let Some(at) = self.report_halt_at {
            if ctx.now().seconds() + 1.0e-9 >= at {
                ctx.request_halt();
            }
        }
    }
}
