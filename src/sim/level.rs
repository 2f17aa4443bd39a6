//! World generator: lays a level definition out along the x axis and scrolls it
//!
//! Layout is deterministic. The cursor starts `lead_distance` off screen; zones advance it by
//! `zone_gap`, obstacles by `obstacle_gap` (except the last item of a group), and every group
//! is followed by its spacing.

use glam::Vec2;

use super::particles::ParticleSystem;
use super::state::{GravityZone, Obstacle};
use crate::catalog::ItemKind;
use crate::levels::{LevelDefinition, LevelLibrary};
use crate::settings::Settings;
use crate::tuning::Tuning;

/// A playable level: live obstacles, zones and cosmetic particles
#[derive(Debug, Clone)]
pub struct Level {
    /// Library index this level was generated from
    pub index: usize,
    pub name: String,
    pub obstacles: Vec<Obstacle>,
    pub zones: Vec<GravityZone>,
    pub particles: ParticleSystem,
    /// Cursor position after the last pattern entry, at generation time
    pub layout_end: f32,
    trailing_threshold: f32,
    zone_phase_step: f32,
}

impl Level {
    /// Generate the level at `index` (clamped into the library's range)
    pub fn create(library: &LevelLibrary, index: i64, tuning: &Tuning, settings: &Settings) -> Self {
        let index = library.clamp(index);
        Self::from_definition(index, library.get(index as i64), tuning, settings)
    }

    pub fn from_definition(
        index: usize,
        definition: &LevelDefinition,
        tuning: &Tuning,
        settings: &Settings,
    ) -> Self {
        let catalog = &tuning.catalog;
        let mut obstacles = Vec::new();
        let mut zones = Vec::new();
        let mut next_id = 1u32;
        let mut cursor = tuning.lead_distance;

        for entry in &definition.patterns {
            let last = entry.items.len().saturating_sub(1);
            for (i, item) in entry.items.iter().enumerate() {
                match *item {
                    ItemKind::Zone(kind) => {
                        zones.push(GravityZone::new(next_id, cursor, catalog.zone_spec(kind), tuning));
                        cursor += tuning.zone_gap;
                    }
                    ItemKind::Obstacle(kind) => {
                        obstacles.push(Obstacle::new(next_id, cursor, catalog.obstacle_spec(kind)));
                        if i < last {
                            cursor += tuning.obstacle_gap;
                        }
                    }
                }
                next_id += 1;
            }
            cursor += entry.spacing as f32;
        }

        let seed = tuning.particle_seed ^ (index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
        Self {
            index,
            name: definition.name.clone(),
            obstacles,
            zones,
            particles: ParticleSystem::new(seed, settings.max_particles(), settings.burst_scale()),
            layout_end: cursor,
            trailing_threshold: tuning.trailing_threshold,
            zone_phase_step: tuning.zone_phase_step,
        }
    }

    /// Scroll every instance left, retire the ones behind the trailing bound and age particles.
    ///
    /// Returns true once no obstacle or zone is left.
    pub fn tick(&mut self, scroll_speed: f32) -> bool {
        for obstacle in &mut self.obstacles {
            obstacle.x -= scroll_speed;
        }
        for zone in &mut self.zones {
            zone.x -= scroll_speed;
            zone.animate(self.zone_phase_step);
        }

        let threshold = self.trailing_threshold;
        self.obstacles.retain(|o| o.x > threshold);
        self.zones.retain(|z| z.x > threshold);
        self.particles.tick();

        self.is_complete()
    }

    pub fn is_complete(&self) -> bool {
        self.obstacles.is_empty() && self.zones.is_empty()
    }

    pub fn spawn_dust_effect(&mut self, pos: Vec2, intensity: f32) {
        self.particles.spawn_dust(pos, intensity);
    }

    pub fn spawn_zone_effect(&mut self, pos: Vec2, intensity: f32) {
        self.particles.spawn_zone(pos, intensity);
    }

    /// Live instances, obstacles then zones
    pub fn instance_count(&self) -> usize {
        self.obstacles.len() + self.zones.len()
    }
}
