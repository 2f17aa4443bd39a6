//! Colors for game elements (linear RGBA)

use crate::catalog::{ObstacleKind, ZoneKind};
use crate::sim::gravity::{LABEL_HIGH, LABEL_LOW};
use crate::sim::particles::ParticleKind;

pub const GROUND: [f32; 4] = [0.078, 0.078, 0.078, 1.0];
pub const BANNER_FAIL: [f32; 4] = [1.0, 0.196, 0.196, 1.0];
pub const BANNER_SUCCESS: [f32; 4] = [0.196, 1.0, 0.196, 1.0];

pub const SPIKE: [f32; 4] = [1.0, 0.196, 0.196, 1.0];
pub const CUBE: [f32; 4] = [0.196, 1.0, 0.196, 1.0];
pub const LONG_SPIKE: [f32; 4] = [1.0, 1.0, 0.0, 1.0];
pub const MINI_SPIKE: [f32; 4] = [1.0, 0.647, 0.0, 1.0];

pub const ZONE_LOW: [f32; 4] = [0.678, 0.847, 0.902, 1.0];
pub const ZONE_HIGH: [f32; 4] = [0.294, 0.0, 0.51, 1.0];
pub const ZONE_NORMAL: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

pub const PLAYER_NORMAL: [f32; 4] = [0.0, 1.0, 1.0, 1.0];

pub const DUST: [f32; 4] = [0.667, 0.667, 0.667, 1.0];
pub const ZONE_SPARK: [f32; 4] = [0.863, 0.863, 0.863, 1.0];

/// Brightening per spent jump charge
const CHARGE_BRIGHTEN: f32 = 50.0 / 255.0;
const MAX_BRIGHTEN: f32 = 100.0 / 255.0;

pub fn obstacle(kind: ObstacleKind) -> [f32; 4] {
    match kind {
        ObstacleKind::Spike => SPIKE,
        ObstacleKind::Cube => CUBE,
        ObstacleKind::LongSpike => LONG_SPIKE,
        ObstacleKind::MiniSpike => MINI_SPIKE,
    }
}

pub fn zone(kind: ZoneKind) -> [f32; 4] {
    match kind {
        ZoneKind::Low => ZONE_LOW,
        ZoneKind::High => ZONE_HIGH,
        ZoneKind::Normal => ZONE_NORMAL,
    }
}

/// Player tint for the active gravity effect label
pub fn gravity(label: &str) -> [f32; 4] {
    match label {
        LABEL_LOW => ZONE_LOW,
        LABEL_HIGH => ZONE_HIGH,
        _ => PLAYER_NORMAL,
    }
}

/// Lighten `base` for every spent jump charge
pub fn player(base: [f32; 4], charges: u8, max_charges: u8) -> [f32; 4] {
    let spent = max_charges.saturating_sub(charges) as f32;
    let lift = (spent * CHARGE_BRIGHTEN).min(MAX_BRIGHTEN);
    [
        (base[0] + lift).min(1.0),
        (base[1] + lift).min(1.0),
        (base[2] + lift).min(1.0),
        base[3],
    ]
}

/// Particle color at the given opacity
pub fn particle(kind: ParticleKind, alpha: f32) -> [f32; 4] {
    let base = match kind {
        ParticleKind::Dust => DUST,
        ParticleKind::Zone => ZONE_SPARK,
    };
    [base[0], base[1], base[2], alpha]
}
