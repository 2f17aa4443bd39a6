//! Cosmetic particles (dust puffs and zone bursts)
//!
//! Particles never feed back into the simulation. Jitter comes from a seeded PCG stream so
//! a replayed run looks identical.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Particle flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleKind {
    Dust,
    Zone,
}

/// A particle for visual effects
#[derive(Debug, Clone)]
pub struct Particle {
    pub kind: ParticleKind,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Per-particle downward acceleration
    pub gravity: f32,
    pub size: f32,
    /// Remaining ticks
    pub lifetime: i32,
}

impl Particle {
    /// Opacity in [0, 1] (fades over the last 25 ticks)
    pub fn alpha(&self) -> f32 {
        (self.lifetime as f32 * 10.0 / 255.0).clamp(0.0, 1.0)
    }

    /// Too small or expired particles are not drawn
    pub fn is_visible(&self) -> bool {
        self.lifetime > 0 && self.size > 0.2
    }

    fn update(&mut self) {
        self.pos += self.vel;
        self.vel.y += self.gravity;
        self.lifetime -= 1;
        self.size *= 0.97;
    }
}

/// Slot arena of live particles
#[derive(Debug, Clone)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
    rng: Pcg32,
    max_particles: usize,
    burst_scale: f32,
}

impl ParticleSystem {
    pub fn new(seed: u64, max_particles: usize, burst_scale: f32) -> Self {
        Self {
            particles: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            max_particles,
            burst_scale,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Dust puff emitted behind the player
    pub fn spawn_dust(&mut self, pos: Vec2, intensity: f32) {
        let intensity = intensity.max(0.5);
        let count = burst_count(2, 5.0, intensity, self.burst_scale).min(self.free_slots());
        for _ in 0..count {
            let particle = Particle {
                kind: ParticleKind::Dust,
                pos: pos + Vec2::new(
                    self.rng.random_range(-6i32..=2) as f32,
                    self.rng.random_range(-3i32..=2) as f32,
                ),
                vel: Vec2::new(
                    self.rng.random_range(-3.2f32..=-0.6) * intensity,
                    self.rng.random_range(-1.7f32..=-0.2) * intensity,
                ),
                gravity: 0.09,
                size: self.rng.random_range(1.8f32..=4.0) * intensity.min(1.6),
                lifetime: (24.0 * intensity) as i32,
            };
            self.push(particle);
        }
    }

    /// Burst around an activated gravity zone
    pub fn spawn_zone(&mut self, pos: Vec2, intensity: f32) {
        let intensity = intensity.max(0.5);
        let count = burst_count(8, 12.0, intensity, self.burst_scale).min(self.free_slots());
        for _ in 0..count {
            let particle = Particle {
                kind: ParticleKind::Zone,
                pos: pos + Vec2::new(
                    self.rng.random_range(-14i32..=14) as f32,
                    self.rng.random_range(-12i32..=12) as f32,
                ),
                vel: Vec2::new(
                    self.rng.random_range(-2.6f32..=2.6) * intensity,
                    self.rng.random_range(-2.6f32..=2.6) * intensity,
                ),
                gravity: 0.03,
                size: self.rng.random_range(2.0f32..=5.0) * intensity.min(1.8),
                lifetime: (34.0 * intensity) as i32,
            };
            self.push(particle);
        }
    }

    /// Prune expired particles, then age the rest by one tick
    pub fn tick(&mut self) {
        self.particles.retain(|p| p.lifetime > 0);
        for particle in &mut self.particles {
            particle.update();
        }
    }

    fn free_slots(&self) -> usize {
        self.max_particles.saturating_sub(self.particles.len())
    }

    fn push(&mut self, particle: Particle) {
        if self.particles.len() < self.max_particles {
            self.particles.push(particle);
        }
    }
}

/// max(min, ⌊base · intensity⌋), scaled down for reduced motion
fn burst_count(min: usize, base: f32, intensity: f32, scale: f32) -> usize {
    let count = ((base * intensity) as usize).max(min);
    ((count as f32 * scale) as usize).max(1)
}
