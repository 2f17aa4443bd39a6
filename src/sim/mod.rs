//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per frame
//! - Layout without randomness; particle jitter from a seeded RNG only
//! - Stable iteration order (stream order of instances)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod gravity;
pub mod level;
pub mod particles;
pub mod player;
pub mod rect;
pub mod state;
pub mod tick;

pub use gravity::{GravityEffect, compute_gravity};
pub use level::Level;
pub use particles::{Particle, ParticleKind, ParticleSystem};
pub use player::{Player, SpinMode};
pub use rect::Rect;
pub use state::{GameEvent, GamePhase, GameState, GravityZone, Obstacle, SessionState};
pub use tick::{InputEvent, TickInput, tick};
