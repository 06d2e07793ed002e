//! 4th-order Runge-Kutta integration of a single snowflake.
//!
//! Two RK4 passes per step, each combining four samples with (1,2,2,1)/6
//! weights:
//!
//! - The position pass samples velocity at sub-steps 0, dt/2 (twice), and dt,
//!   advancing it with the previous step's acceleration cache as a first-order
//!   proxy. It does not re-derive acceleration from the force model.
//! - The velocity pass evaluates the force model at the same four stage
//!   points. Drag deliberately reuses the flake's stored start-of-step
//!   velocity at every stage rather than the evolving stage candidate; the
//!   stages therefore differ only in their turbulence samples. This matches
//!   the reference trajectories exactly.
//!
//! The acceleration cache is then refreshed as `(v_new - v_old) / dt` for the
//! next step's position pass.

use rand::Rng;

use crate::forces::ForceParams;
use crate::particle::Snowflake;

/// Advance one flake by `dt`. A non-positive `dt` is a no-op.
pub fn step<R: Rng>(flake: &mut Snowflake, dt: f32, forces: &ForceParams, rng: &mut R) {
    if dt <= 0.0 {
        return;
    }

    let pos = flake.position;
    let vel = flake.velocity;
    let acc = flake.acceleration;
    let size = flake.size;

    // Position pass: velocity sampled with the previous acceleration cache.
    let k1 = dt * vel;
    let k2 = dt * (vel + acc * (0.5 * dt));
    let k3 = dt * (vel + acc * (0.5 * dt));
    let k4 = dt * (vel + acc * dt);
    let new_position = pos + (k1 + 2.0 * k2 + 2.0 * k3 + k4) / 6.0;

    // Velocity pass: four force evaluations, fresh turbulence each.
    let a1 = dt * forces.acceleration(size, vel, rng);
    let a2 = dt * forces.acceleration(size, vel, rng);
    let a3 = dt * forces.acceleration(size, vel, rng);
    let a4 = dt * forces.acceleration(size, vel, rng);
    let new_velocity = vel + (a1 + 2.0 * a2 + 2.0 * a3 + a4) / 6.0;

    flake.acceleration = (new_velocity - vel) / dt;
    flake.position = new_position;
    flake.velocity = new_velocity;
}
