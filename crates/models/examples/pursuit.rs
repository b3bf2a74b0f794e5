//! Runs the pursuit scenario and logs object reports.
//!
//! ```sh
//! cargo run -p cadence-models --example pursuit
//! ```

use cadence_models::pursuit::{Pursuit, PursuitConfig};
use uom::si::{f64::Time, time::second};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let mut scenario = Pursuit::<Time>::new(&PursuitConfig::default())?;
    let solution = scenario.run();

    println!(
        "{:?} at t = {:.4} s after {} steps ({} transitions), miss distance {:.4} m",
        solution.status,
        solution.time.get::<second>(),
        solution.steps,
        solution.transitions,
        scenario.distance(),
    );

    Ok(())
}
