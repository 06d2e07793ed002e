//! Physical constants and reference tuning values for the snow simulation.
//!
//! ## Units
//!
//! Positions are meters, velocities m/s, accelerations m/s². `size` doubles as
//! the flake's mass in this model, so forces are accumulated in size-scaled
//! units and divided back out by `size` to get acceleration.

/// Gravity acceleration magnitude (m/s²), applied in -Y.
pub const GRAVITY: f32 = 9.81;

/// Linear viscous drag coefficient. Opposes the flake's current velocity.
///
/// Terminal fall speed works out to `GRAVITY / DRAG_COEFF` ≈ 1.3 m/s,
/// independent of flake size (both gravity and drag scale with size).
pub const DRAG_COEFF: f32 = 7.5;

/// Standard deviation of the turbulence radius is `TURBULENCE_SCALE * size`.
/// Set the force model's scale to 0.0 to disable turbulence entirely.
pub const TURBULENCE_SCALE: f32 = 18.0;

/// Default flake size/mass.
pub const DEFAULT_FLAKE_SIZE: f32 = 0.0002;

/// Hard cap on simultaneously live snowflakes.
pub const DEFAULT_MAX_FLAKES: usize = 9000;

/// Default spawn rate (flakes per second).
pub const DEFAULT_FLAKES_PER_SECOND: f32 = 100.0;

/// Upper bound for the runtime-adjustable spawn rate.
pub const MAX_FLAKES_PER_SECOND: f32 = 800.0;

// =============================================================================
// Accumulation surface
// =============================================================================

/// Number of grid divisions per axis of the accumulation surface.
pub const COVER_DIVISIONS: usize = 50;

/// The surface spans [-COVER_HALF_EXTENT, COVER_HALF_EXTENT] on X and Z.
pub const COVER_HALF_EXTENT: f32 = 10.0;

/// Resting height of the bare surface, slightly above the ground plane.
pub const COVER_BASE_HEIGHT: f32 = 0.005;

/// Deposits influence vertices up to this Euclidean distance from the
/// landing point; beyond it the contribution is exactly zero.
pub const DEPOSIT_RADIUS: f32 = 1.0;

/// Per-vertex coverage gain is `min(DEPOSIT_STRENGTH, DEPOSIT_STRENGTH / dist)`.
pub const DEPOSIT_STRENGTH: f32 = 0.005;

/// Once a vertex's coverage saturates at 1.0, further deposits raise its
/// height by this fraction of the coverage influence.
pub const SATURATED_HEIGHT_GAIN: f32 = 0.3;
