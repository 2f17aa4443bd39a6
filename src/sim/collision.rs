//! Hitboxes and collision verdicts
//!
//! Obstacles rest on the ground line. Their hitbox is the drawn footprint shrunk by the
//! kind's inset (hazards) or the full footprint (platforms). Zones trigger on a region
//! lifted slightly above the ground.

use super::rect::Rect;
use super::state::{GravityZone, Obstacle};
use crate::catalog::{CollisionProfile, ObstacleKind};

/// Drawn footprint of an obstacle standing on `ground_y`
pub fn obstacle_bounds(x: f32, width: f32, height: f32, ground_y: f32) -> Rect {
    Rect::new(x, ground_y - height, width, height)
}

/// Collision rectangle for a footprint under the given profile.
///
/// Insets never produce a negative size; an over-inset hazard collapses to a zero-width strip.
pub fn profile_hitbox(bounds: Rect, profile: &CollisionProfile) -> Rect {
    match profile {
        CollisionProfile::Platform => bounds,
        CollisionProfile::Hazard { inset } => {
            let w = (bounds.w - inset.left - inset.right).max(0.0);
            let h = (bounds.h - inset.top).max(0.0);
            Rect::new(bounds.x + inset.left, bounds.bottom() - h, w, h)
        }
    }
}

/// Trigger region of a zone at `x`: `width`×`height`, its bottom `lift` above the ground
pub fn zone_trigger(x: f32, width: f32, height: f32, lift: f32, ground_y: f32) -> Rect {
    Rect::new(x, ground_y - lift - height, width, height)
}

/// Whether touching `obstacle` kills the player.
///
/// Platforms only kill when the player's bottom sinks more than `death_depth` below their
/// top; grazing a side or the top face is forgiven. Hazards kill on any overlap.
pub fn is_fatal(player: &Rect, obstacle: &Obstacle, ground_y: f32, death_depth: f32) -> bool {
    let hitbox = obstacle.hitbox(ground_y);
    if !player.intersects(&hitbox) {
        return false;
    }
    match obstacle.profile {
        CollisionProfile::Platform => player.bottom() > hitbox.top() + death_depth,
        CollisionProfile::Hazard { .. } => true,
    }
}

/// First obstacle (in stream order) that kills the player, if any
pub fn find_fatal_obstacle(
    player: &Rect,
    obstacles: &[Obstacle],
    ground_y: f32,
    death_depth: f32,
) -> Option<ObstacleKind> {
    obstacles
        .iter()
        .find(|obstacle| is_fatal(player, obstacle, ground_y, death_depth))
        .map(|obstacle| obstacle.kind)
}

/// Indices of zones the player overlaps that have not fired yet
pub fn pending_zone_hits(player: &Rect, zones: &[GravityZone], ground_y: f32) -> Vec<usize> {
    zones
        .iter()
        .enumerate()
        .filter(|(_, zone)| !zone.activated && player.intersects(&zone.hitbox(ground_y)))
        .map(|(i, _)| i)
        .collect()
}
