use crate::TimeScale;

/// Simulation time bookkeeping.
///
/// The clock tracks the current time `t`, the size `dt` of the step about to
/// be taken, the base integration period `dtp` of the active stage, and the
/// time `t1` of the nearest upcoming boundary (base step, event, or sample
/// point, whichever comes first).
///
/// Multi-pass integrators move `t` through intermediate points within one full
/// step. The clock is *ready* only when `t` lies on a committed boundary, and
/// only then do [`Clock::event`] and [`Clock::sample`] schedule anything.
///
/// All boundary comparisons use [`TimeScale::epsilon`]. `t1 >= t` always holds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Clock<T> {
    t: T,
    dt: T,
    dtp: T,
    t1: T,
    pass: usize,
    ready: bool,
    tick_first: bool,
    tick_last: bool,
}

impl<T: TimeScale> Default for Clock<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TimeScale> Clock<T> {
    /// Creates an initialized clock at time zero with no period set.
    #[must_use]
    pub fn new() -> Self {
        let zero = T::zero();
        Self {
            t: zero,
            dt: zero,
            dtp: zero,
            t1: zero,
            pass: 0,
            ready: true,
            tick_first: true,
            tick_last: false,
        }
    }

    /// Rewinds the clock to time zero, on a committed boundary.
    pub fn init(&mut self) {
        self.t = T::zero();
        self.pass = 0;
        self.ready = true;
        self.tick_first = true;
        self.tick_last = false;
    }

    /// Sets a new base period and schedules the next boundary one period out.
    ///
    /// Called once per stage activation.
    pub fn reset(&mut self, period: T) {
        self.dtp = period;
        self.dt = period;
        self.t1 = self.t + period;
    }

    /// Registers an event at `t_event`.
    ///
    /// If the event lies strictly between now and the next boundary (outside
    /// the epsilon band on both sides), the next step is shortened to land on
    /// it. The next boundary never moves later.
    ///
    /// Returns `true` if the event is occurring now, i.e. `t_event` is within
    /// epsilon of the current time. Mid-step calls do nothing and return `false`.
    pub fn event(&mut self, t_event: T) -> bool {
        if !self.ready {
            return false;
        }

        let eps = T::epsilon();

        if t_event < self.t1 - eps && t_event >= self.t + eps {
            self.t1 = t_event;
        }

        self.dt = self.t1 - self.t;

        (t_event - self.t).abs() < eps
    }

    /// Schedules periodic sampling every `period`.
    ///
    /// Shrinks the next boundary to the next multiple of `period` if that comes
    /// sooner, which may force a shorter-than-normal full step so sampling
    /// points are never overshot.
    ///
    /// Returns `true` if the current time is within epsilon of a multiple of
    /// `period`. Mid-step calls do nothing and return `false`.
    pub fn sample(&mut self, period: T) -> bool {
        if !self.ready {
            return false;
        }

        let eps = T::epsilon();
        let ts = self.t.next_multiple(period);

        if ts < self.t1 - eps {
            self.t1 = ts;
        }

        self.dt = self.t1 - self.t;

        // `ts - t` lies in (0, period], so it is time to sample when it is
        // within epsilon of `period`.
        self.t - ts + period < eps
    }

    /// Returns `true` on every committed step.
    #[must_use]
    pub fn sample_step(&self) -> bool {
        self.ready
    }

    /// Current time.
    #[must_use]
    pub fn now(&self) -> T {
        self.t
    }

    /// Size of the step about to be taken. May be shorter than the period.
    #[must_use]
    pub fn dt(&self) -> T {
        self.dt
    }

    /// Base integration period of the active stage.
    #[must_use]
    pub fn period(&self) -> T {
        self.dtp
    }

    /// Time of the nearest upcoming boundary.
    #[must_use]
    pub fn next_boundary(&self) -> T {
        self.t1
    }

    /// Index of the integrator pass about to run.
    #[must_use]
    pub fn pass(&self) -> usize {
        self.pass
    }

    /// Whether the current time lies on a committed step boundary.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Whether this is the first tick since the last stage entry.
    #[must_use]
    pub fn tick_first(&self) -> bool {
        self.tick_first
    }

    /// Whether this is the final tick of the run.
    #[must_use]
    pub fn tick_last(&self) -> bool {
        self.tick_last
    }

    /// Moves the current time forward by `delta` within a full step.
    pub fn advance_by(&mut self, delta: T) {
        self.t = self.t + delta;
    }

    /// Moves the current time onto the next boundary.
    ///
    /// Snapping, rather than adding `dt`, keeps rounding from accumulating
    /// across the partial advances of a multi-pass step.
    pub fn snap_to_boundary(&mut self) {
        self.t = self.t1;
    }

    /// Ends the current pass of a `passes`-pass integrator.
    ///
    /// When the pass counter wraps to zero the step commits: the clock becomes
    /// ready and the next boundary moves to the following multiple of the base
    /// period. Returns whether the step committed.
    pub fn end_pass(&mut self, passes: usize) -> bool {
        self.pass = (self.pass + 1) % passes;
        self.ready = self.pass == 0;

        if self.ready {
            self.t1 = self.t.next_multiple(self.dtp);
        }

        self.ready
    }

    pub(crate) fn set_tick_first(&mut self, tick_first: bool) {
        self.tick_first = tick_first;
    }

    pub(crate) fn set_tick_last(&mut self, tick_last: bool) {
        self.tick_last = tick_last;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use proptest::{prelude::*, test_runner::TestCaseError};

    use crate::{Integrator, Midpoint, Rk4};

    fn clock(period: f64) -> Clock<f64> {
        let mut clock = Clock::new();
        clock.init();
        clock.reset(period);
        clock
    }

    /// Commits a single-pass step onto the next boundary.
    fn commit(clock: &mut Clock<f64>) {
        clock.snap_to_boundary();
        clock.end_pass(1);
    }

    /// Drives `steps` full steps of `integrator`, registering an event and a
    /// sampling period on every committed tick and checking that no step runs
    /// past either of them.
    fn check_multi_pass<A: Integrator>(
        integrator: &A,
        dtp: f64,
        period: f64,
        offsets: &[f64],
        steps: usize,
    ) -> Result<(), TestCaseError> {
        let eps = f64::epsilon();
        let mut clock = clock(dtp);

        for step in 0..steps {
            let t = clock.now();
            prop_assert!(clock.is_ready());

            let event = t + offsets[step % offsets.len()];
            clock.event(event);
            clock.sample(period);

            let deadline = t.next_multiple(dtp).min(t.next_multiple(period)).min(event);
            let boundary = clock.next_boundary();

            let mut passes = 0;
            loop {
                if !clock.is_ready() {
                    // Mid-step scheduling is inert.
                    prop_assert!(!clock.sample(period));
                    prop_assert!(!clock.event(0.5 * (clock.now() + boundary)));
                    prop_assert_eq!(clock.next_boundary(), boundary);
                }

                integrator.advance_clock(&mut clock);
                passes += 1;
                if clock.is_ready() {
                    break;
                }
            }

            prop_assert_eq!(passes, A::PASSES);
            prop_assert!(clock.now() > t);
            prop_assert!(clock.now() <= deadline + eps);
        }

        Ok(())
    }

    #[test]
    fn init_and_reset() {
        let clock = clock(0.1);

        assert_relative_eq!(clock.now(), 0.0);
        assert_relative_eq!(clock.dt(), 0.1);
        assert_relative_eq!(clock.period(), 0.1);
        assert_relative_eq!(clock.next_boundary(), 0.1);
        assert_eq!(clock.pass(), 0);
        assert!(clock.is_ready());
        assert!(clock.tick_first());
        assert!(!clock.tick_last());
    }

    #[test]
    fn event_inside_step_clips_boundary() {
        let mut clock = clock(0.1);

        assert!(!clock.event(0.04));
        assert_relative_eq!(clock.next_boundary(), 0.04);
        assert_relative_eq!(clock.dt(), 0.04);

        // A later event never moves the boundary back out.
        assert!(!clock.event(0.07));
        assert_relative_eq!(clock.next_boundary(), 0.04);
    }

    #[test]
    fn event_outside_step_is_ignored() {
        let mut clock = clock(0.1);

        assert!(!clock.event(0.5));
        assert_relative_eq!(clock.next_boundary(), 0.1);

        assert!(!clock.event(-1.0));
        assert_relative_eq!(clock.next_boundary(), 0.1);

        // Within epsilon of the boundary itself.
        assert!(!clock.event(0.1 - 1.0e-9));
        assert_relative_eq!(clock.next_boundary(), 0.1);
    }

    #[test]
    fn event_fires_when_reached() {
        let mut clock = clock(0.1);

        clock.event(0.25);
        commit(&mut clock);
        commit(&mut clock);
        assert!(!clock.event(0.25));
        assert_relative_eq!(clock.next_boundary(), 0.25);

        commit(&mut clock);
        assert_relative_eq!(clock.now(), 0.25);
        assert!(clock.event(0.25));
    }

    #[test]
    fn sample_shortens_step_to_sample_point() {
        let mut clock = clock(0.1);
        commit(&mut clock);

        assert!(!clock.sample(0.15));
        assert_relative_eq!(clock.next_boundary(), 0.15);
        assert_relative_eq!(clock.dt(), 0.05, epsilon = 1.0e-12);

        commit(&mut clock);
        assert!(clock.sample(0.15));

        // Back on the base grid after the short step.
        assert_relative_eq!(clock.next_boundary(), 0.2);
    }

    #[test]
    fn sample_at_time_zero() {
        let mut clock = clock(0.1);
        assert!(clock.sample(1.0));
        assert_relative_eq!(clock.next_boundary(), 0.1);
    }

    #[test]
    fn mid_step_scheduling_is_a_no_op() {
        let mut clock = clock(0.1);
        clock.advance_by(0.05);
        assert!(!clock.end_pass(2));

        assert!(!clock.is_ready());
        assert!(!clock.sample_step());
        assert!(!clock.sample(0.05));
        assert!(!clock.event(0.05));
        assert_relative_eq!(clock.next_boundary(), 0.1);
        assert_relative_eq!(clock.dt(), 0.1);

        clock.snap_to_boundary();
        assert!(clock.end_pass(2));
        assert_relative_eq!(clock.now(), 0.1);
        assert_relative_eq!(clock.next_boundary(), 0.2);
    }

    #[test]
    fn si_clock_tracks_boundaries() {
        use uom::si::{f64::Time, time::second};

        let mut clock = Clock::<Time>::new();
        clock.init();
        clock.reset(Time::new::<second>(0.5));

        assert!(!clock.event(Time::new::<second>(0.2)));
        clock.snap_to_boundary();
        clock.end_pass(1);

        assert_relative_eq!(clock.now().get::<second>(), 0.2);
        assert_relative_eq!(clock.next_boundary().get::<second>(), 0.5);
        assert!(clock.event(Time::new::<second>(0.2)));
    }

    proptest! {
        #[test]
        fn sampling_never_overshoots(
            base in 1_u32..500,
            every in 1_u32..200,
            steps in 1_usize..400,
        ) {
            let dtp = f64::from(base) * 1.0e-3;
            let period = f64::from(every) * 1.0e-2;
            let eps = f64::epsilon();

            let mut clock = clock(dtp);
            let mut last = f64::NEG_INFINITY;

            for _ in 0..steps {
                let t = clock.now();
                let remainder = t.rem_euclid(period);
                let on_grid = remainder < eps || remainder > period - eps;

                prop_assert_eq!(clock.sample(period), on_grid);
                prop_assert!(clock.dt() <= period + eps);
                prop_assert!(clock.dt() > 0.0);
                prop_assert!(clock.next_boundary() >= t);
                prop_assert!(t > last);

                last = t;
                commit(&mut clock);
            }
        }

        #[test]
        fn events_only_clip_inside_the_step(
            base in 1_u32..100,
            at in -1.0_f64..1.0,
        ) {
            let dtp = f64::from(base) * 1.0e-2;
            let eps = f64::epsilon();

            let mut clock = clock(dtp);
            let before = clock.next_boundary();
            clock.event(at);

            if at >= eps && at < before - eps {
                prop_assert_eq!(clock.next_boundary(), at);
            } else {
                prop_assert_eq!(clock.next_boundary(), before);
            }
            prop_assert!(clock.next_boundary() >= clock.now());
        }

        #[test]
        fn multi_pass_steps_never_overshoot_events_or_samples(
            base in 1_u32..500,
            every in 1_u32..200,
            offsets in prop::collection::vec(1_u32..1000, 1..16),
            steps in 1_usize..200,
            rk4 in any::<bool>(),
        ) {
            let dtp = f64::from(base) * 1.0e-3;
            let period = f64::from(every) * 1.0e-2;
            let offsets: Vec<f64> = offsets.into_iter().map(|o| f64::from(o) * 1.0e-3).collect();

            if rk4 {
                check_multi_pass(&Rk4, dtp, period, &offsets, steps)?;
            } else {
                check_multi_pass(&Midpoint, dtp, period, &offsets, steps)?;
            }
        }
    }
}
