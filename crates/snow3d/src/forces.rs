//! Force model for a falling snowflake.
//!
//! The instantaneous acceleration is `(gravity + drag + wind + turbulence) / size`,
//! with the flake's size standing in for its mass. Gravity, drag, and wind all
//! scale with size, so they cancel out of the acceleration; only the turbulence
//! term gives smaller flakes a visibly more erratic path.

use glam::Vec3;
use rand::Rng;
use rand_distr::StandardNormal;

use crate::constants::{DRAG_COEFF, GRAVITY, TURBULENCE_SCALE};

/// Shared parameters of the force model.
#[derive(Clone, Copy, Debug)]
pub struct ForceParams {
    /// Gravity magnitude, applied in -Y.
    pub gravity: f32,
    /// Linear drag coefficient.
    pub drag_coeff: f32,
    /// Process-wide wind vector, runtime-adjustable.
    pub wind: Vec3,
    /// Turbulence radius std-dev is `turbulence_scale * size`. Zero disables
    /// the stochastic term, making integration fully deterministic.
    pub turbulence_scale: f32,
}

impl Default for ForceParams {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            drag_coeff: DRAG_COEFF,
            wind: Vec3::ZERO,
            turbulence_scale: TURBULENCE_SCALE,
        }
    }
}

impl ForceParams {
    /// Instantaneous acceleration of a flake of the given size and velocity.
    ///
    /// The velocity passed in is the flake's stored start-of-step velocity,
    /// not the RK stage candidate: drag reuses it at every stage, matching
    /// the reference trajectories (see `integrator`). Each call draws a fresh
    /// turbulence sample, so repeated evaluations differ only in that term.
    pub fn acceleration<R: Rng>(&self, size: f32, velocity: Vec3, rng: &mut R) -> Vec3 {
        debug_assert!(size > 0.0, "flake size must be strictly positive");

        let gravity = Vec3::new(0.0, -self.gravity * size, 0.0);
        let drag = -self.drag_coeff * size * velocity;
        let wind = size * self.wind;
        let turbulence = self.sample_turbulence(size, rng);

        (gravity + drag + wind + turbulence) / size
    }

    /// Random lateral perturbation: radius `|N(0, scale * size)|`, direction
    /// uniform in the ground plane.
    fn sample_turbulence<R: Rng>(&self, size: f32, rng: &mut R) -> Vec3 {
        if self.turbulence_scale <= 0.0 {
            return Vec3::ZERO;
        }
        let sigma = self.turbulence_scale * size;
        let normal: f32 = rng.sample(StandardNormal);
        let radius = (normal * sigma).abs();
        let theta = rng.gen_range(0.0..std::f32::consts::TAU);
        radius * Vec3::new(theta.cos(), 0.0, theta.sin())
    }
}
