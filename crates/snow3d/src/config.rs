//! Simulation configuration.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::constants::{
    COVER_DIVISIONS, COVER_HALF_EXTENT, DEFAULT_FLAKES_PER_SECOND, DEFAULT_FLAKE_SIZE,
    DEFAULT_MAX_FLAKES,
};

/// Construction parameters for a [`crate::SnowSimulation`].
///
/// Defaults reproduce the reference scene: a 21 m spawn sheet at y = 12 above
/// a 20 m plateau, 100 flakes/s, capped at 9000 live flakes.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SnowfallConfig {
    /// One corner of the spawn box. Axis order against `spawn_max` is not
    /// significant; the emitter normalizes per axis.
    #[serde(with = "vec3_serde")]
    pub spawn_min: Vec3,
    /// Opposite corner of the spawn box.
    #[serde(with = "vec3_serde")]
    pub spawn_max: Vec3,

    /// Target spawn rate (flakes per second), runtime-adjustable later.
    pub flakes_per_second: f32,
    /// Hard cap on live flakes.
    pub max_flakes: usize,
    /// Size/mass assigned to each flake.
    pub flake_size: f32,

    /// Initial wind vector, runtime-adjustable later.
    #[serde(with = "vec3_serde")]
    pub wind: Vec3,

    /// Accumulation-surface grid divisions per axis.
    pub cover_divisions: usize,
    /// Accumulation surface spans [-half_extent, half_extent] on X and Z.
    pub cover_half_extent: f32,

    /// Master seed for all randomness (spawn positions, orientations,
    /// turbulence streams).
    pub seed: u64,
}

impl Default for SnowfallConfig {
    fn default() -> Self {
        Self {
            spawn_min: Vec3::new(-10.5, 12.0, -10.5),
            spawn_max: Vec3::new(10.5, 12.0, 10.5),
            flakes_per_second: DEFAULT_FLAKES_PER_SECOND,
            max_flakes: DEFAULT_MAX_FLAKES,
            flake_size: DEFAULT_FLAKE_SIZE,
            wind: Vec3::ZERO,
            cover_divisions: COVER_DIVISIONS,
            cover_half_extent: COVER_HALF_EXTENT,
            seed: 0,
        }
    }
}

impl SnowfallConfig {
    /// Save configuration to a JSON file.
    pub fn save_json(&self, path: &std::path::Path) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load configuration from a JSON file.
    pub fn load_json(path: &std::path::Path) -> Result<Self, Box<dyn std::error::Error>> {
        let json = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&json)?;
        Ok(config)
    }
}

/// Custom serde module for Vec3 (glam doesn't have serde by default)
mod vec3_serde {
    use glam::Vec3;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    struct Vec3Repr {
        x: f32,
        y: f32,
        z: f32,
    }

    pub fn serialize<S>(vec: &Vec3, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        Vec3Repr {
            x: vec.x,
            y: vec.y,
            z: vec.z,
        }
        .serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec3, D::Error>
    where
        D: Deserializer<'de>,
    {
        let repr = Vec3Repr::deserialize(deserializer)?;
        Ok(Vec3::new(repr.x, repr.y, repr.z))
    }
}
