//! Headless snowfall run with stats printed every simulated second.
//!
//! ```sh
//! RUST_LOG=info cargo run --example blizzard --release
//! ```

use glam::Vec3;
use snow3d::{SnowSimulation, SnowfallConfig};

fn main() {
    env_logger::init();

    let mut config = SnowfallConfig::default();
    config.flakes_per_second = 600.0;
    config.wind = Vec3::new(8.0, 0.0, 3.0);
    config.seed = 2024;

    let mut sim = SnowSimulation::new(&config);
    let dt = 1.0 / 60.0;
    let seconds = 120;

    println!(
        "blizzard: {} flakes/s, wind {:?}, cap {}",
        config.flakes_per_second, config.wind, config.max_flakes
    );

    for second in 1..=seconds {
        for _ in 0..60 {
            sim.update(dt);
        }

        let interior = sim.cover.interior_len();
        let coverage = sim.cover.coverage();
        let covered = coverage[..interior].iter().filter(|c| **c >= 1.0).count();
        let total: f32 = coverage[..interior].iter().sum();
        let peak = sim.cover.positions()[..interior]
            .iter()
            .map(|p| p.y)
            .fold(f32::MIN, f32::max);

        if second % 10 == 0 {
            println!(
                "t={:>4}s live={:>5} spawned={:>7} coverage_sum={:>9.2} saturated={:>5}/{} peak_y={:.3}",
                second,
                sim.snowflake_count(),
                sim.flakes.spawned_total(),
                total,
                covered,
                interior,
                peak
            );
        }
    }

    sim.cover.recompute_normals();
    println!(
        "done: {} frames, {} live flakes, {} spawned",
        sim.frame(),
        sim.snowflake_count(),
        sim.flakes.spawned_total()
    );
}
