use crate::{Clock, Integrator, StateSlot, TimeScale};

/// Second-order explicit midpoint method.
///
/// Pass 0 predicts the half-step state from the start derivative and moves
/// the clock to the half-step point. Pass 1 takes the full step with the
/// derivative sampled there and snaps the clock onto the boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Midpoint;

impl Integrator for Midpoint {
    const NAME: &'static str = "midpoint";
    const PASSES: usize = 2;

    fn update_value(&self, pass: usize, dt: f64, slot: &mut StateSlot) {
        let x0 = slot.start_value();
        let value = match pass {
            0 => x0 + 0.5 * dt * slot.derivative(0),
            _ => x0 + dt * slot.derivative(1),
        };
        slot.set_value(value);
    }

    fn advance_clock<T: TimeScale>(&self, clock: &mut Clock<T>) {
        if clock.pass() == 0 {
            clock.advance_by(clock.dt() / 2.0);
        } else {
            clock.snap_to_boundary();
        }
        clock.end_pass(Self::PASSES);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::{Simulation, World, test_utils::Decay};

    #[test]
    fn one_step_matches_taylor_polynomial() {
        let h = 0.1;
        let mut world = World::<f64>::new();
        let decay = Decay::spawn(&mut world, "decay", 1.0, 1.0).expect("should spawn");

        let mut sim = Simulation::builder(world)
            .stage("decay", h, [decay.id])
            .horizon(h)
            .build(Midpoint)
            .expect("should build");
        sim.run();

        assert_relative_eq!(sim.world().value(decay.x), 1.0 - h + h * h / 2.0, epsilon = 1.0e-14);
    }

    #[test]
    fn clock_visits_half_step() {
        let mut clock = Clock::<f64>::new();
        clock.reset(0.5);

        Midpoint.advance_clock(&mut clock);
        assert!(!clock.is_ready());
        assert_eq!(clock.pass(), 1);
        assert_relative_eq!(clock.now(), 0.25);

        Midpoint.advance_clock(&mut clock);
        assert!(clock.is_ready());
        assert_eq!(clock.pass(), 0);
        assert_relative_eq!(clock.now(), 0.5);
        assert_relative_eq!(clock.next_boundary(), 1.0);
    }
}
