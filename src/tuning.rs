//! Data-driven game balance
//!
//! Every physical and layout constant the simulation reads lives in [`Tuning`]. The
//! defaults reproduce the shipped game feel; a JSON file may override any subset.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::consts::*;
use crate::error::ConfigError;

/// Simulation constants and content tables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Physics ===
    pub base_gravity: f32,
    /// Negative = upward (screen space)
    pub base_jump_impulse: f32,
    pub scroll_speed: f32,
    pub ground_y: f32,

    // === Player ===
    pub player_size: f32,
    pub player_x: f32,
    pub max_jump_charges: u8,
    pub landing_tolerance: f32,
    pub platform_death_depth: f32,
    pub ground_epsilon: f32,
    pub feet_inset: f32,
    pub feet_height: f32,
    pub feet_tolerance: f32,
    pub hard_landing_speed: f32,
    pub spin_rate: f32,
    pub tumble_rate: f32,
    pub tumble_kick: f32,

    // === Level layout ===
    pub lead_distance: f32,
    pub zone_gap: f32,
    pub obstacle_gap: f32,
    pub trailing_threshold: f32,
    pub zone_width: f32,
    pub zone_height: f32,
    pub zone_lift: f32,
    pub zone_phase_step: f32,

    // === Cosmetics ===
    pub dust_interval: u32,
    /// Intensity of the dust burst emitted when the player lands
    pub landing_dust_intensity: f32,
    /// Base seed for particle jitter (combined with the level index)
    pub particle_seed: u64,

    /// Obstacle and gravity zone kind tables
    pub catalog: Catalog,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            base_gravity: BASE_GRAVITY,
            base_jump_impulse: BASE_JUMP_IMPULSE,
            scroll_speed: SCROLL_SPEED,
            ground_y: GROUND_Y,

            player_size: PLAYER_SIZE,
            player_x: PLAYER_X,
            max_jump_charges: MAX_JUMP_CHARGES,
            landing_tolerance: LANDING_TOLERANCE,
            platform_death_depth: PLATFORM_DEATH_DEPTH,
            ground_epsilon: GROUND_EPSILON,
            feet_inset: FEET_INSET,
            feet_height: FEET_HEIGHT,
            feet_tolerance: FEET_TOLERANCE,
            hard_landing_speed: HARD_LANDING_SPEED,
            spin_rate: SPIN_RATE,
            tumble_rate: TUMBLE_RATE,
            tumble_kick: TUMBLE_KICK,

            lead_distance: LEAD_DISTANCE,
            zone_gap: ZONE_GAP,
            obstacle_gap: OBSTACLE_GAP,
            trailing_threshold: TRAILING_THRESHOLD,
            zone_width: ZONE_WIDTH,
            zone_height: ZONE_HEIGHT,
            zone_lift: ZONE_LIFT,
            zone_phase_step: ZONE_PHASE_STEP,

            dust_interval: DUST_INTERVAL,
            landing_dust_intensity: 1.4,
            particle_seed: 0x00C0_FFEE,

            catalog: Catalog::default(),
        }
    }
}

/// Allowed range for `landing_dust_intensity`
const MIN_DUST_INTENSITY: f32 = 0.5;
const MAX_DUST_INTENSITY: f32 = 4.0;

impl Tuning {
    /// Load tuning from a JSON file. Missing fields keep their defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let tuning: Tuning = load_json(path)?;
        Ok(tuning.sanitized())
    }

    /// Load tuning from `path`, falling back to defaults on any error
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };
        match Self::load_from(path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(e) => {
                log::warn!("Using default tuning: {}", e);
                Self::default()
            }
        }
    }

    /// Player's resting y (top edge) on the ground line
    pub fn player_rest_y(&self) -> f32 {
        self.ground_y - self.player_size
    }

    /// Correct out-of-range values in place instead of rejecting the file
    fn sanitized(mut self) -> Self {
        let defaults = Tuning::default();
        if self.max_jump_charges == 0 {
            log::warn!("max_jump_charges must be at least 1, using 1");
            self.max_jump_charges = 1;
        }
        if self.player_size.is_nan() || self.player_size <= 0.0 {
            self.player_size = defaults.player_size;
        }
        if self.scroll_speed.is_nan() || self.scroll_speed < 0.0 {
            self.scroll_speed = defaults.scroll_speed;
        }
        self.landing_tolerance = self.landing_tolerance.max(0.0);
        self.platform_death_depth = self.platform_death_depth.max(0.0);
        self.zone_gap = self.zone_gap.max(0.0);
        self.obstacle_gap = self.obstacle_gap.max(0.0);
        self.dust_interval = self.dust_interval.max(1);
        if !self.landing_dust_intensity.is_finite() {
            self.landing_dust_intensity = defaults.landing_dust_intensity;
        }
        self.landing_dust_intensity = self
            .landing_dust_intensity
            .clamp(MIN_DUST_INTENSITY, MAX_DUST_INTENSITY);
        self.catalog = self.catalog.sanitized();
        self
    }
}

/// Read and deserialize a JSON config file
pub(crate) fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning: Tuning = serde_json::from_str(r#"{"scroll_speed": 9.0}"#).unwrap();
        assert_eq!(tuning.scroll_speed, 9.0);
        assert_eq!(tuning.base_gravity, BASE_GRAVITY);
        assert_eq!(tuning.catalog, Catalog::default());
    }

    #[test]
    fn test_sanitized_fixes_zero_charges() {
        let tuning: Tuning = serde_json::from_str(r#"{"max_jump_charges": 0}"#).unwrap();
        let tuning = tuning.sanitized();
        assert_eq!(tuning.max_jump_charges, 1);
    }

    #[test]
    fn test_sanitized_clamps_dust_intensity() {
        let tuning: Tuning = serde_json::from_str(r#"{"landing_dust_intensity": 5.0e7}"#).unwrap();
        assert_eq!(tuning.sanitized().landing_dust_intensity, 4.0);
        let tuning: Tuning = serde_json::from_str(r#"{"landing_dust_intensity": -3.0}"#).unwrap();
        assert_eq!(tuning.sanitized().landing_dust_intensity, 0.5);
        let mut tuning = Tuning::default();
        tuning.landing_dust_intensity = f32::NAN;
        assert_eq!(tuning.sanitized().landing_dust_intensity, 1.4);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let path = Path::new("/definitely/not/here/tuning.json");
        assert!(matches!(Tuning::load_from(path), Err(ConfigError::Io { .. })));
        assert_eq!(Tuning::load_or_default(Some(path)), Tuning::default());
    }

    #[test]
    fn test_rest_y() {
        let tuning = Tuning::default();
        assert_eq!(tuning.player_rest_y(), 280.0);
    }
}
