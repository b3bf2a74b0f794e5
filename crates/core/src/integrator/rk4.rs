use crate::{Clock, Integrator, StateSlot, TimeScale};

/// Classical fourth-order Runge-Kutta.
///
/// | pass | value after the pass                   | clock after the pass |
/// |------|----------------------------------------|----------------------|
/// | 0    | `x0 + dt/2 * k1`                       | `t + dt/2`           |
/// | 1    | `x0 + dt/2 * k2`                       | held                 |
/// | 2    | `x0 + dt * k3`                         | `t1`                 |
/// | 3    | `x0 + dt/6 * (k1 + 2k2 + 2k3 + k4)`    | held, step commits   |
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rk4;

impl Integrator for Rk4 {
    const NAME: &'static str = "rk4";
    const PASSES: usize = 4;

    fn update_value(&self, pass: usize, dt: f64, slot: &mut StateSlot) {
        let x0 = slot.start_value();
        let value = match pass {
            0 => x0 + 0.5 * dt * slot.derivative(0),
            1 => x0 + 0.5 * dt * slot.derivative(1),
            2 => x0 + dt * slot.derivative(2),
            _ => {
                let k = slot.derivative(0)
                    + 2.0 * slot.derivative(1)
                    + 2.0 * slot.derivative(2)
                    + slot.derivative(3);
                x0 + dt / 6.0 * k
            }
        };
        slot.set_value(value);
    }

    fn advance_clock<T: TimeScale>(&self, clock: &mut Clock<T>) {
        match clock.pass() {
            0 => clock.advance_by(clock.dt() / 2.0),
            2 => clock.snap_to_boundary(),
            _ => {}
        }
        clock.end_pass(Self::PASSES);
    }
}
