use approx::assert_relative_eq;
use cadence_core::{Euler, Midpoint, Simulation, Status, World};
use cadence_models::{Lag, Timer};

#[test]
fn euler_tracks_the_exponential_response() {
    let mut world = World::<f64>::new();
    let lag = Lag::default().spawn(&mut world, "lag").expect("should spawn");

    let mut sim = Simulation::builder(world)
        .stage("step", 0.01, [lag.id])
        .horizon(2.0)
        .build(Euler)
        .expect("should build");
    let solution = sim.run();

    assert_eq!(solution.status, Status::ReachedHorizon);
    assert_eq!(solution.steps, 200);
    assert_relative_eq!(
        sim.world().value(lag.gamma),
        1.0 - (-2.0_f64).exp(),
        epsilon = 0.01
    );
}

#[test]
fn time_constant_follows_gain_and_speed() {
    let lag = Lag::new(0.0, 1.0, 500.0, 1000.0);
    assert_relative_eq!(lag.time_constant(), 2.0);
}

#[test]
fn state_carries_across_stages() {
    let mut world = World::<f64>::new();
    let lag = Lag::default().spawn(&mut world, "lag").expect("should spawn");
    let timer = Timer::new(1.0).spawn(&mut world, "timer").expect("should spawn");

    let mut sim = Simulation::builder(world)
        .stage("rise", 0.01, [timer, lag.id])
        .stage("hold", 0.01, [timer, lag.id])
        .horizon(2.0)
        .build(Midpoint)
        .expect("should build");
    let solution = sim.run();

    assert_eq!(solution.transitions, 1);
    assert_eq!(sim.world().init_count(lag.id), 2);

    // A reseed on entering `hold` would leave gamma near 1 - e^-1.
    assert_relative_eq!(
        sim.world().value(lag.gamma),
        1.0 - (-2.0_f64).exp(),
        epsilon = 1.0e-4
    );
}
