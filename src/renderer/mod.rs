//! Rendering sink interface
//!
//! The core never draws. [`draw_scene`] walks the game state back to front and hands each
//! drawable to a [`DrawSink`] supplied by whatever renderer hosts the game.

pub mod colors;

use glam::Vec2;

use crate::catalog::{ObstacleKind, ZoneKind};
use crate::consts::SCREEN_WIDTH;
use crate::sim::particles::ParticleKind;
use crate::sim::rect::Rect;
use crate::sim::state::{GamePhase, GameState};

/// Heads-up display values
#[derive(Debug, Clone, PartialEq)]
pub struct Hud<'a> {
    pub score: u64,
    /// 1-based
    pub level_number: usize,
    pub level_count: usize,
    pub level_name: &'a str,
    pub jump_charges: u8,
    pub max_jump_charges: u8,
    pub effect_label: &'static str,
    pub effect_color: [f32; 4],
}

/// One thing to draw
#[derive(Debug, Clone, PartialEq)]
pub enum Drawable<'a> {
    Ground {
        y: f32,
        width: f32,
        color: [f32; 4],
    },
    Obstacle {
        kind: ObstacleKind,
        /// Drawn footprint (not the hitbox)
        bounds: Rect,
        color: [f32; 4],
    },
    Zone {
        kind: ZoneKind,
        bounds: Rect,
        activated: bool,
        /// Ring animation phase in [0, 2π)
        phase: f32,
        /// Effect text drawn above the zone
        label: &'a str,
        color: [f32; 4],
    },
    Player {
        bounds: Rect,
        /// Degrees
        rotation: f32,
        color: [f32; 4],
    },
    Particle {
        kind: ParticleKind,
        pos: Vec2,
        radius: f32,
        color: [f32; 4],
    },
    Hud(Hud<'a>),
    /// Level select screen
    Menu {
        selected: usize,
        count: usize,
        name: &'a str,
    },
    /// End-of-run overlay
    Banner {
        phase: GamePhase,
        score: u64,
        color: [f32; 4],
    },
}

/// Receives drawables from [`draw_scene`]
pub trait DrawSink {
    fn draw(&mut self, item: Drawable<'_>);
}

/// HUD values for the current session
pub fn hud(state: &GameState) -> Hud<'_> {
    let label = state.effect_label();
    Hud {
        score: state.score(),
        level_number: state.session.level_index + 1,
        level_count: state.level_count(),
        level_name: state.level_name(),
        jump_charges: state.player.jump_charges,
        max_jump_charges: state.player.max_jump_charges,
        effect_label: label,
        effect_color: colors::gravity(label),
    }
}

/// Emit the whole frame, back to front
pub fn draw_scene(state: &GameState, sink: &mut impl DrawSink) {
    let ground_y = state.tuning.ground_y;
    sink.draw(Drawable::Ground {
        y: ground_y,
        width: SCREEN_WIDTH,
        color: colors::GROUND,
    });

    let Some(level) = &state.level else {
        sink.draw(Drawable::Menu {
            selected: state.selected_level,
            count: state.level_count(),
            name: state.level_name(),
        });
        return;
    };

    for zone in &level.zones {
        sink.draw(Drawable::Zone {
            kind: zone.kind,
            bounds: zone.hitbox(ground_y),
            activated: zone.activated,
            phase: zone.phase,
            label: &state.tuning.catalog.zone_spec(zone.kind).label,
            color: colors::zone(zone.kind),
        });
    }
    for obstacle in &level.obstacles {
        sink.draw(Drawable::Obstacle {
            kind: obstacle.kind,
            bounds: obstacle.bounds(ground_y),
            color: colors::obstacle(obstacle.kind),
        });
    }
    for particle in level.particles.particles().iter().filter(|p| p.is_visible()) {
        sink.draw(Drawable::Particle {
            kind: particle.kind,
            pos: particle.pos,
            radius: particle.size.max(1.0),
            color: colors::particle(particle.kind, particle.alpha()),
        });
    }

    let player = &state.player;
    let tint = colors::gravity(state.effect_label());
    sink.draw(Drawable::Player {
        bounds: player.hitbox(),
        rotation: player.rotation,
        color: colors::player(tint, player.jump_charges, player.max_jump_charges),
    });
    sink.draw(Drawable::Hud(hud(state)));

    let banner = match state.phase {
        GamePhase::GameOver => Some(colors::BANNER_FAIL),
        GamePhase::LevelComplete | GamePhase::CampaignComplete => Some(colors::BANNER_SUCCESS),
        GamePhase::Menu | GamePhase::Playing => None,
    };
    if let Some(color) = banner {
        sink.draw(Drawable::Banner {
            phase: state.phase,
            score: state.score(),
            color,
        });
    }
}

/// Sink that only counts what it is given (headless runs, tests)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub obstacles: usize,
    pub zones: usize,
    pub particles: usize,
    pub players: usize,
    pub overlays: usize,
}

impl FrameStats {
    pub fn total(&self) -> usize {
        self.obstacles + self.zones + self.particles + self.players + self.overlays
    }
}

impl DrawSink for FrameStats {
    fn draw(&mut self, item: Drawable<'_>) {
        match item {
            Drawable::Obstacle { .. } => self.obstacles += 1,
            Drawable::Zone { .. } => self.zones += 1,
            Drawable::Particle { .. } => self.particles += 1,
            Drawable::Player { .. } => self.players += 1,
            Drawable::Menu { .. } | Drawable::Banner { .. } => self.overlays += 1,
            Drawable::Ground { .. } | Drawable::Hud(_) => {}
        }
    }
}
