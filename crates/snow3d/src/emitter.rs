//! Rate-controlled snowfall emitter.
//!
//! Each tick the emitter converts `flakes_per_second * dt` into a whole
//! number of new flakes, carrying the fractional remainder across ticks so
//! the long-run spawn rate stays exact at any frame rate.

use glam::{Quat, Vec3};
use rand::Rng;

use crate::constants::{DEFAULT_FLAKES_PER_SECOND, DEFAULT_MAX_FLAKES, MAX_FLAKES_PER_SECOND};
use crate::particle::Snowflake;

/// Spawns snowflakes inside an axis-aligned box at a target rate, subject to
/// a population ceiling.
#[derive(Clone, Debug)]
pub struct SnowfallEmitter {
    bounds_min: Vec3,
    bounds_max: Vec3,
    flakes_per_second: f32,
    /// Fractional-flake carry-over, always in [0, 1).
    pending: f32,
    /// Hard cap on simultaneously live flakes.
    pub max_flakes: usize,
    /// Size assigned to every new flake.
    pub flake_size: f32,
}

impl SnowfallEmitter {
    /// Emitter over the given box. Corner order per axis is not guaranteed by
    /// callers, so the box is normalized here.
    pub fn new(corner_a: Vec3, corner_b: Vec3, flake_size: f32) -> Self {
        let mut emitter = Self {
            bounds_min: Vec3::ZERO,
            bounds_max: Vec3::ZERO,
            flakes_per_second: DEFAULT_FLAKES_PER_SECOND,
            pending: 0.0,
            max_flakes: DEFAULT_MAX_FLAKES,
            flake_size,
        };
        emitter.set_bounds(corner_a, corner_b);
        emitter
    }

    /// Replace the spawn box, normalizing the corners per axis.
    pub fn set_bounds(&mut self, corner_a: Vec3, corner_b: Vec3) {
        self.bounds_min = corner_a.min(corner_b);
        self.bounds_max = corner_a.max(corner_b);
    }

    /// Normalized spawn box as (min, max).
    pub fn bounds(&self) -> (Vec3, Vec3) {
        (self.bounds_min, self.bounds_max)
    }

    /// Set the target spawn rate, clamped to the supported range.
    pub fn set_rate(&mut self, flakes_per_second: f32) {
        self.flakes_per_second = flakes_per_second.clamp(0.0, MAX_FLAKES_PER_SECOND);
    }

    pub fn rate(&self) -> f32 {
        self.flakes_per_second
    }

    /// Whole flakes owed this tick, consuming the fractional carry.
    fn take_spawn_count(&mut self, dt: f32) -> usize {
        let rate = self.flakes_per_second * dt;
        let whole = rate.floor();
        self.pending += rate - whole;
        let extra = self.pending.floor();
        self.pending -= extra;
        (whole + extra) as usize
    }

    /// Create this tick's new flakes.
    ///
    /// `live_count` is the caller-owned population; spawning stops as soon as
    /// it would exceed `max_flakes`. Hitting the ceiling is throttling, not an
    /// error: the remainder of the batch is skipped and the condition reported
    /// once via the log.
    pub fn emit<R: Rng>(&mut self, dt: f32, live_count: usize, rng: &mut R) -> Vec<Snowflake> {
        if dt <= 0.0 {
            return Vec::new();
        }

        let wanted = self.take_spawn_count(dt);
        let room = self.max_flakes.saturating_sub(live_count);
        if wanted > room {
            log::warn!(
                "snowflake cap {} reached, dropping {} of {} spawns this tick",
                self.max_flakes,
                wanted - room,
                wanted
            );
        }

        let count = wanted.min(room);
        let mut flakes = Vec::with_capacity(count);
        for _ in 0..count {
            let position = Vec3::new(
                sample_axis(rng, self.bounds_min.x, self.bounds_max.x),
                sample_axis(rng, self.bounds_min.y, self.bounds_max.y),
                sample_axis(rng, self.bounds_min.z, self.bounds_max.z),
            );
            flakes.push(Snowflake::new(position, self.flake_size, random_rotation(rng)));
        }
        flakes
    }
}

/// Uniform sample on [min, max]; a degenerate axis yields its single value.
fn sample_axis<R: Rng>(rng: &mut R, min: f32, max: f32) -> f32 {
    if max > min {
        rng.gen_range(min..max)
    } else {
        min
    }
}

/// Uniformly random 3D rotation: axis uniform on the sphere
/// (theta = acos(2u - 1), phi = 2*pi*v), angle uniform in [0, 2*pi).
fn random_rotation<R: Rng>(rng: &mut R) -> Quat {
    let u: f32 = rng.gen();
    let v: f32 = rng.gen();
    let theta = (2.0 * u - 1.0).clamp(-1.0, 1.0).acos();
    let phi = std::f32::consts::TAU * v;

    let axis = Vec3::new(
        theta.sin() * phi.cos(),
        theta.sin() * phi.sin(),
        theta.cos(),
    );
    let angle = rng.gen_range(0.0..std::f32::consts::TAU);
    Quat::from_axis_angle(axis.normalize_or(Vec3::Y), angle)
}
