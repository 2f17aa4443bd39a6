//! Gravity zone effect model
//!
//! A zone's multiplier maps to an absolute (gravity, jump impulse, label) triple computed
//! from the *base* values, so consecutive zones never compound.

/// Label for the default gravity state
pub const LABEL_NORMAL: &str = "NORMAL";
pub const LABEL_LOW: &str = "LOW GRAVITY";
pub const LABEL_HIGH: &str = "HIGH GRAVITY";

/// Jump impulse scale under low gravity
const LOW_JUMP_SCALE: f32 = 0.8;
/// Jump impulse scale under high gravity
const HIGH_JUMP_SCALE: f32 = 1.5;

/// Ambient gravity state committed by a zone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravityEffect {
    pub gravity: f32,
    pub jump_impulse: f32,
    pub label: &'static str,
}

impl GravityEffect {
    /// The un-modified base state
    pub fn normal(base_gravity: f32, base_jump_impulse: f32) -> Self {
        Self {
            gravity: base_gravity,
            jump_impulse: base_jump_impulse,
            label: LABEL_NORMAL,
        }
    }
}

/// Compute the gravity state for a zone multiplier
pub fn compute_gravity(multiplier: f32, base_gravity: f32, base_jump_impulse: f32) -> GravityEffect {
    let gravity = base_gravity * multiplier;
    if multiplier < 1.0 {
        GravityEffect {
            gravity,
            jump_impulse: base_jump_impulse * LOW_JUMP_SCALE,
            label: LABEL_LOW,
        }
    } else if multiplier > 1.0 {
        GravityEffect {
            gravity,
            jump_impulse: base_jump_impulse * HIGH_JUMP_SCALE,
            label: LABEL_HIGH,
        }
    } else {
        GravityEffect {
            gravity,
            jump_impulse: base_jump_impulse,
            label: LABEL_NORMAL,
        }
    }
}
