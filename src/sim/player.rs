//! The player cube: vertical physics, landing, jump charges and spin
//!
//! The player never moves horizontally; the world scrolls past it.

use glam::Vec2;

use super::rect::Rect;
use super::state::Obstacle;
use crate::tuning::Tuning;

/// Visual spin while airborne
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinMode {
    /// Jump charges left: slow spin
    Spin,
    /// All charges spent: fast tumble
    Tumble,
}

/// Physics constants the player reads every tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerParams {
    pub ground_y: f32,
    pub landing_tolerance: f32,
    pub ground_epsilon: f32,
    pub feet_inset: f32,
    pub feet_height: f32,
    pub feet_tolerance: f32,
    pub hard_landing_speed: f32,
    pub spin_rate: f32,
    pub tumble_rate: f32,
    pub tumble_kick: f32,
}

impl PlayerParams {
    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self {
            ground_y: tuning.ground_y,
            landing_tolerance: tuning.landing_tolerance,
            ground_epsilon: tuning.ground_epsilon,
            feet_inset: tuning.feet_inset,
            feet_height: tuning.feet_height,
            feet_tolerance: tuning.feet_tolerance,
            hard_landing_speed: tuning.hard_landing_speed,
            spin_rate: tuning.spin_rate,
            tumble_rate: tuning.tumble_rate,
            tumble_kick: tuning.tumble_kick,
        }
    }
}

/// The controlled cube
#[derive(Debug, Clone)]
pub struct Player {
    /// Left edge (fixed)
    pub x: f32,
    /// Top edge
    pub y: f32,
    pub size: f32,
    /// Positive = falling (screen space)
    pub velocity_y: f32,
    /// Visual rotation in degrees
    pub rotation: f32,
    pub jump_charges: u8,
    pub max_jump_charges: u8,
    pub airborne: bool,
    params: PlayerParams,
}

impl Player {
    /// A grounded player with full charges
    pub fn new(tuning: &Tuning) -> Self {
        let params = PlayerParams::from_tuning(tuning);
        let max_jump_charges = tuning.max_jump_charges.max(1);
        Self {
            x: tuning.player_x,
            y: tuning.player_rest_y(),
            size: tuning.player_size,
            velocity_y: 0.0,
            rotation: 0.0,
            jump_charges: max_jump_charges,
            max_jump_charges,
            airborne: false,
            params,
        }
    }

    /// Top edge when resting on the ground line
    #[inline]
    pub fn rest_y(&self) -> f32 {
        self.params.ground_y - self.size
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.size
    }

    pub fn hitbox(&self) -> Rect {
        Rect::new(self.x, self.y, self.size, self.size)
    }

    /// Bottom-centre point, where dust is emitted
    pub fn feet(&self) -> Vec2 {
        Vec2::new(self.x + self.size / 2.0, self.bottom())
    }

    pub fn spin_mode(&self) -> SpinMode {
        if self.jump_charges == 0 {
            SpinMode::Tumble
        } else {
            SpinMode::Spin
        }
    }

    /// Spend a jump charge. Returns false (and changes nothing) when no charge is left.
    pub fn jump(&mut self, jump_impulse: f32) -> bool {
        if self.jump_charges == 0 {
            return false;
        }
        self.velocity_y = jump_impulse;
        self.jump_charges -= 1;
        self.airborne = true;
        if self.jump_charges == 0 {
            self.rotation = self.params.tumble_kick;
        }
        true
    }

    /// Advance one tick under `gravity`, resolving landings on platforms and the ground.
    ///
    /// Returns true when the player just landed (on a platform, or hard onto the ground).
    /// The signal is cosmetic; hazard checks are a separate pass.
    pub fn step(&mut self, gravity: f32, obstacles: &[Obstacle]) -> bool {
        self.velocity_y += gravity;
        self.y += self.velocity_y;

        let mut landed_on_platform = false;
        let hitbox = self.hitbox();
        for obstacle in obstacles.iter().filter(|o| o.profile.is_platform()) {
            let top = obstacle.hitbox(self.params.ground_y);
            if !hitbox.intersects(&top) {
                continue;
            }
            // Falling onto the top face, within one step of it
            let reach = top.top() + self.velocity_y + self.params.landing_tolerance;
            if self.velocity_y >= 0.0 && self.bottom() <= reach {
                self.y = top.top() - self.size;
                self.land();
                landed_on_platform = true;
            }
        }

        let rest_y = self.rest_y();
        let mut hard_landing = false;
        if self.y >= rest_y {
            hard_landing = self.velocity_y > self.params.hard_landing_speed;
            self.y = rest_y;
            self.land();
        }

        if self.airborne || self.y < rest_y {
            if self.velocity_y == 0.0 {
                self.rotation = 0.0;
            } else {
                self.rotation -= match self.spin_mode() {
                    SpinMode::Tumble => self.params.tumble_rate,
                    SpinMode::Spin => self.params.spin_rate,
                };
            }
        } else {
            self.rotation = 0.0;
        }

        hard_landing || landed_on_platform
    }

    /// Resting on the ground line or on top of a platform (cosmetic use only)
    pub fn is_grounded(&self, obstacles: &[Obstacle]) -> bool {
        if self.y >= self.rest_y() - self.params.ground_epsilon {
            return true;
        }

        let p = &self.params;
        let feet = Rect::new(
            self.x + p.feet_inset,
            self.bottom() - 1.0,
            self.size - p.feet_inset * 2.0,
            p.feet_height,
        );
        obstacles
            .iter()
            .filter(|o| o.profile.is_platform())
            .map(|o| o.hitbox(p.ground_y))
            .any(|top| feet.intersects(&top) && (self.bottom() - top.top()).abs() <= p.feet_tolerance)
    }

    fn land(&mut self) {
        self.velocity_y = 0.0;
        self.airborne = false;
        self.jump_charges = self.max_jump_charges;
    }
}
