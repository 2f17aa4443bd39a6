//! Game state and core simulation types
//!
//! Everything the frame loop mutates lives here: world instances, the session values a zone
//! can change, and the phase machine's bookkeeping.

use super::collision::{obstacle_bounds, profile_hitbox, zone_trigger};
use super::gravity::GravityEffect;
use super::level::Level;
use super::player::Player;
use super::rect::Rect;
use crate::catalog::{CollisionProfile, GravityZoneKindSpec, ObstacleKind, ObstacleKindSpec, ZoneKind};
use crate::levels::LevelLibrary;
use crate::settings::Settings;
use crate::tuning::Tuning;
use crate::wrap_phase;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    /// Level select
    #[default]
    Menu,
    /// Active run
    Playing,
    /// Player hit a hazard
    GameOver,
    /// Every instance of the level scrolled past
    LevelComplete,
    /// Last level finished
    CampaignComplete,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Menu => "menu",
            GamePhase::Playing => "playing",
            GamePhase::GameOver => "game_over",
            GamePhase::LevelComplete => "level_complete",
            GamePhase::CampaignComplete => "campaign_complete",
        }
    }
}

/// Things that happened during a tick, for outer collaborators (audio, UI)
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    LevelStarted { index: usize },
    Jumped { charges_left: u8 },
    Landed,
    ZoneActivated { kind: ZoneKind, label: &'static str },
    Died { kind: ObstacleKind },
    LevelCompleted { index: usize },
    CampaignCompleted,
    Quit,
}

/// An obstacle placed in the world
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    /// Left edge; decreases as the world scrolls
    pub x: f32,
    pub width: f32,
    pub height: f32,
    pub profile: CollisionProfile,
}

impl Obstacle {
    pub fn new(id: u32, x: f32, spec: &ObstacleKindSpec) -> Self {
        Self {
            id,
            kind: spec.kind,
            x,
            width: spec.width,
            height: spec.height,
            profile: spec.profile,
        }
    }

    /// Drawn footprint
    pub fn bounds(&self, ground_y: f32) -> Rect {
        obstacle_bounds(self.x, self.width, self.height, ground_y)
    }

    pub fn hitbox(&self, ground_y: f32) -> Rect {
        profile_hitbox(self.bounds(ground_y), &self.profile)
    }
}

/// A gravity zone placed in the world
#[derive(Debug, Clone, PartialEq)]
pub struct GravityZone {
    pub id: u32,
    pub kind: ZoneKind,
    pub x: f32,
    pub multiplier: f32,
    pub width: f32,
    pub height: f32,
    /// Gap between the trigger region's bottom and the ground line
    pub lift: f32,
    /// One-shot latch: set on first overlap, never cleared
    pub activated: bool,
    /// Animation phase in [0, 2π)
    pub phase: f32,
}

impl GravityZone {
    pub fn new(id: u32, x: f32, spec: &GravityZoneKindSpec, tuning: &Tuning) -> Self {
        Self {
            id,
            kind: spec.kind,
            x,
            multiplier: spec.multiplier,
            width: tuning.zone_width,
            height: tuning.zone_height,
            lift: tuning.zone_lift,
            activated: false,
            phase: 0.0,
        }
    }

    pub fn hitbox(&self, ground_y: f32) -> Rect {
        zone_trigger(self.x, self.width, self.height, self.lift, ground_y)
    }

    pub fn animate(&mut self, step: f32) {
        self.phase = wrap_phase(self.phase + step);
    }
}

/// Per-run values, reset on every level (re)start
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub level_index: usize,
    /// Ticks survived in this run
    pub score: u64,
    /// Ambient gravity, jump impulse and label (changed by zones)
    pub gravity: GravityEffect,
    /// Consecutive grounded-and-still ticks since the last dust puff
    pub dust_timer: u32,
}

impl SessionState {
    pub fn new(level_index: usize, tuning: &Tuning) -> Self {
        Self {
            level_index,
            score: 0,
            gravity: GravityEffect::normal(tuning.base_gravity, tuning.base_jump_impulse),
            dust_timer: 0,
        }
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: GamePhase,
    /// Level highlighted in the menu
    pub selected_level: usize,
    pub session: SessionState,
    pub player: Player,
    /// Active level (None until the first start)
    pub level: Option<Level>,
    /// Events raised by the most recent tick
    pub events: Vec<GameEvent>,
    /// Simulation tick counter (all phases)
    pub time_ticks: u64,
    pub library: LevelLibrary,
    pub tuning: Tuning,
    pub settings: Settings,
    quit: bool,
}

impl GameState {
    /// A fresh game sitting in the menu
    pub fn new(library: LevelLibrary, tuning: Tuning, settings: Settings) -> Self {
        Self {
            phase: GamePhase::Menu,
            selected_level: 0,
            session: SessionState::new(0, &tuning),
            player: Player::new(&tuning),
            level: None,
            events: Vec::new(),
            time_ticks: 0,
            library,
            tuning,
            settings,
            quit: false,
        }
    }

    /// Reset player, level and session for `index` (clamped) and enter Playing
    pub fn start_level(&mut self, index: i64) {
        let index = self.library.clamp(index);
        let level = Level::create(&self.library, index as i64, &self.tuning, &self.settings);
        log::info!(
            "Starting level {}/{}: {} ({} obstacles, {} zones)",
            index + 1,
            self.library.count(),
            level.name,
            level.obstacles.len(),
            level.zones.len()
        );

        self.player = Player::new(&self.tuning);
        self.session = SessionState::new(index, &self.tuning);
        self.level = Some(level);
        self.selected_level = index;
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::LevelStarted { index });
    }

    /// Restart the level of the current session
    pub fn restart_level(&mut self) {
        self.start_level(self.session.level_index as i64);
    }

    /// Leave the current run and return to level select
    pub fn return_to_menu(&mut self) {
        self.selected_level = self.session.level_index;
        self.level = None;
        self.phase = GamePhase::Menu;
    }

    /// Move the menu selection by `delta`, wrapping around the library
    pub fn cycle_selection(&mut self, delta: i64) {
        let count = self.library.count() as i64;
        self.selected_level = (self.selected_level as i64 + delta).rem_euclid(count) as usize;
    }

    pub fn is_last_level(&self) -> bool {
        self.session.level_index + 1 >= self.library.count()
    }

    pub fn level_count(&self) -> usize {
        self.library.count()
    }

    /// Name of the level being played (or selected, in the menu)
    pub fn level_name(&self) -> &str {
        match &self.level {
            Some(level) => &level.name,
            None => self.library.name(self.selected_level as i64),
        }
    }

    pub fn score(&self) -> u64 {
        self.session.score
    }

    pub fn effect_label(&self) -> &'static str {
        self.session.gravity.label
    }

    pub fn request_quit(&mut self) {
        if !self.quit {
            log::info!("Quit requested");
            self.quit = true;
            self.events.push(GameEvent::Quit);
        }
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }
}
