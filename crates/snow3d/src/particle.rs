//! Snowflake representation and the live-flake collection.

use glam::{Quat, Vec3};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use crate::constants::DEFAULT_FLAKE_SIZE;
use crate::cover::SnowCover;
use crate::forces::ForceParams;
use crate::integrator;

/// A single falling snow grain.
#[derive(Clone, Copy, Debug)]
pub struct Snowflake {
    /// World position
    pub position: Vec3,
    /// Current velocity
    pub velocity: Vec3,
    /// Acceleration cache from the previous step; recomputed every step as
    /// `(new_velocity - old_velocity) / dt` and used as the velocity proxy
    /// inside the next step's position pass.
    pub acceleration: Vec3,
    /// Size/mass scalar, strictly positive. Also the rendered radius.
    pub size: f32,
    /// Fixed at spawn time, consumed only by the renderer.
    pub orientation: Quat,
    /// Collection-assigned id; keys this flake's turbulence stream.
    pub id: u64,
}

impl Snowflake {
    /// Create a stationary flake at the given position.
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            acceleration: Vec3::ZERO,
            size: DEFAULT_FLAKE_SIZE,
            orientation: Quat::IDENTITY,
            id: 0,
        }
    }

    /// Flake with an explicit size and orientation, still starting at rest.
    pub fn new(position: Vec3, size: f32, orientation: Quat) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            acceleration: Vec3::ZERO,
            size,
            orientation,
            id: 0,
        }
    }
}

/// Owned snapshot of one flake's renderable state.
#[derive(Clone, Copy, Debug)]
pub struct FlakeInstance {
    pub position: Vec3,
    pub orientation: Quat,
    pub size: f32,
}

/// The set of live snowflakes.
pub struct Snowflakes {
    pub list: Vec<Snowflake>,
    /// Total flakes ever spawned; also the next id to hand out.
    spawned_total: u64,
}

impl Snowflakes {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self {
            list: Vec::new(),
            spawned_total: 0,
        }
    }

    /// Create with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            list: Vec::with_capacity(capacity),
            spawned_total: 0,
        }
    }

    /// Take ownership of a new flake, assigning it the next id.
    pub fn push(&mut self, mut flake: Snowflake) {
        flake.id = self.spawned_total;
        self.spawned_total += 1;
        self.list.push(flake);
    }

    /// Number of live flakes.
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Total flakes ever spawned over the collection's lifetime.
    pub fn spawned_total(&self) -> u64 {
        self.spawned_total
    }

    /// Remove all flakes without depositing them.
    pub fn clear(&mut self) {
        self.list.clear();
    }

    /// Advance every flake by one step.
    ///
    /// Flakes are independent during integration, so this runs in parallel.
    /// Each flake draws its turbulence samples from a ChaCha8 stream seeded
    /// from `(seed, id, frame)`, which keeps runs reproducible regardless of
    /// thread scheduling.
    pub fn integrate_all(&mut self, dt: f32, forces: &ForceParams, seed: u64, frame: u64) {
        if dt <= 0.0 {
            return;
        }
        self.list.par_iter_mut().for_each(|flake| {
            let mut rng = ChaCha8Rng::seed_from_u64(stream_seed(seed, flake.id, frame));
            integrator::step(flake, dt, forces, &mut rng);
        });
    }

    /// Remove flakes that have fallen past the ground plane, depositing each
    /// one's final position into the cover exactly once.
    ///
    /// Deposits mutate shared vertex state, so this pass is serial and runs
    /// after all integrations for the tick. Non-finite flakes are dropped
    /// without a deposit. Returns the number of flakes settled.
    pub fn settle_landed(&mut self, cover: &mut SnowCover) -> usize {
        let before = self.list.len();
        let mut settled = 0;
        self.list.retain(|flake| {
            if !flake.position.is_finite() || !flake.velocity.is_finite() {
                return false;
            }
            if flake.position.y < 0.0 {
                cover.deposit(flake.position);
                settled += 1;
                return false;
            }
            true
        });
        debug_assert!(before - self.list.len() >= settled);
        settled
    }

    /// Owned snapshot of every live flake's renderable state.
    pub fn instances(&self) -> Vec<FlakeInstance> {
        self.list
            .iter()
            .map(|flake| FlakeInstance {
                position: flake.position,
                orientation: flake.orientation,
                size: flake.size,
            })
            .collect()
    }
}

impl Default for Snowflakes {
    fn default() -> Self {
        Self::new()
    }
}

/// Splitmix64-style mix of the master seed with a flake's id and the current
/// frame, giving each flake a decorrelated turbulence stream per tick.
pub(crate) fn stream_seed(seed: u64, id: u64, frame: u64) -> u64 {
    let mut z = seed
        .wrapping_add(id.wrapping_mul(0x9e37_79b9_7f4a_7c15))
        .wrapping_add(frame.wrapping_mul(0xbf58_476d_1ce4_e5b9));
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_assigns_sequential_ids() {
        let mut flakes = Snowflakes::new();
        flakes.push(Snowflake::at(Vec3::ZERO));
        flakes.push(Snowflake::at(Vec3::ONE));
        assert_eq!(flakes.list[0].id, 0);
        assert_eq!(flakes.list[1].id, 1);
        assert_eq!(flakes.spawned_total(), 2);
    }

    #[test]
    fn test_settle_deposits_landed_flakes() {
        let mut flakes = Snowflakes::new();
        let mut cover = SnowCover::default();

        flakes.push(Snowflake::at(Vec3::new(0.0, 5.0, 0.0))); // Still airborne
        flakes.push(Snowflake::at(Vec3::new(0.0, -0.01, 0.0))); // Landed

        let settled = flakes.settle_landed(&mut cover);
        assert_eq!(settled, 1);
        assert_eq!(flakes.len(), 1);
        assert!((flakes.list[0].position.y - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_settle_drops_non_finite_without_deposit() {
        let mut flakes = Snowflakes::new();
        let mut cover = SnowCover::default();
        let total_before: f32 = cover.coverage().iter().sum();

        flakes.push(Snowflake::at(Vec3::new(f32::NAN, -1.0, 0.0)));
        let settled = flakes.settle_landed(&mut cover);

        assert_eq!(settled, 0);
        assert!(flakes.is_empty());
        let total_after: f32 = cover.coverage().iter().sum();
        assert_eq!(total_before, total_after, "NaN flake must not deposit");
    }

    #[test]
    fn test_stream_seed_varies_by_id_and_frame() {
        let base = stream_seed(42, 0, 0);
        assert_ne!(base, stream_seed(42, 1, 0));
        assert_ne!(base, stream_seed(42, 0, 1));
        assert_eq!(base, stream_seed(42, 0, 0));
    }
}
