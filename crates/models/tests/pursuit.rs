use cadence_core::{Action, Event, EventKind, Status, TimeScale};
use cadence_models::pursuit::{self, Pursuit, PursuitConfig};
use uom::si::{f64::Time, time::second};

/// Runs the scenario and returns the solution with the distance seen by the
/// final event.
fn run<T: TimeScale>() -> (cadence_core::Solution<T>, f64, Vec<EventKind>) {
    let mut scenario = Pursuit::<T>::new(&PursuitConfig::default()).expect("should build");
    let (target, missile) = (scenario.target, scenario.missile);

    let mut last_distance = f64::NAN;
    let mut baselines = Vec::new();
    let solution = scenario.run_observed(|event: &Event<'_, T>| -> Option<Action> {
        match event.kind {
            EventKind::Final => {
                last_distance = pursuit::distance(event.world(), target, missile);
            }
            EventKind::Baseline => baselines.push(event.kind),
            EventKind::Step => {}
        }
        None
    });

    assert!((scenario.distance() - last_distance).abs() < 1.0e-12);
    (solution, last_distance, baselines)
}

#[test]
fn missile_intercepts_target_in_seconds() {
    let (solution, distance, baselines) = run::<f64>();

    assert_eq!(solution.status, Status::Halted);
    assert_eq!(solution.transitions, 1);
    assert_eq!(solution.stage, 1);
    assert_eq!(baselines.len(), 2, "each stage reports one baseline");
    assert!(solution.time < 10.0, "halted at {}", solution.time);
    assert!(distance <= 0.1 + <f64 as TimeScale>::epsilon(), "missed by {distance}");
}

#[test]
fn missile_intercepts_target_with_si_time() {
    let (solution, distance, _) = run::<Time>();

    assert_eq!(solution.status, Status::Halted);
    assert_eq!(solution.transitions, 1);
    assert!(solution.time < Time::new::<second>(10.0));
    assert!(distance <= 0.1 + 1.0e-8, "missed by {distance}");
}

#[test]
fn both_time_scales_agree() {
    let (plain, _, _) = run::<f64>();
    let (si, _, _) = run::<Time>();

    assert_eq!(plain.steps, si.steps);
    assert!((plain.time - si.time.get::<second>()).abs() < 1.0e-9);
}
