//! Idle/demo controller
//!
//! Confirms through menus and jumps over whatever comes next. It reads the same state a
//! player would see and only ever produces input events.

use super::state::{GamePhase, GameState};
use super::tick::InputEvent;

/// How far ahead (in ticks of scroll) a grounded player starts its jump
const LOOKAHEAD_TICKS: f32 = 6.0;
/// Height above a hazard's top at which a falling player spends its spare charge
const RESCUE_HEIGHT: f32 = 24.0;

/// Input the autopilot wants this frame, if any
pub fn plan(state: &GameState) -> Option<InputEvent> {
    match state.phase {
        GamePhase::Menu | GamePhase::LevelComplete => Some(InputEvent::Confirm),
        GamePhase::Playing => should_jump(state).then_some(InputEvent::Jump),
        GamePhase::GameOver | GamePhase::CampaignComplete => None,
    }
}

fn should_jump(state: &GameState) -> bool {
    let Some(level) = &state.level else {
        return false;
    };
    let player = &state.player;
    let ground_y = state.tuning.ground_y;
    let body = player.hitbox();

    // Nearest obstacle not yet passed, ignoring platforms the player is already above
    let threat = level
        .obstacles
        .iter()
        .map(|o| (o, o.hitbox(ground_y)))
        .filter(|(o, hitbox)| {
            hitbox.right() > body.left() && !(o.profile.is_platform() && hitbox.top() >= body.bottom())
        })
        .min_by(|(_, a), (_, b)| a.left().total_cmp(&b.left()));
    let Some((obstacle, hitbox)) = threat else {
        return false;
    };

    let gap = hitbox.left() - body.right();
    if !player.airborne {
        return gap > 0.0 && gap <= state.tuning.scroll_speed * LOOKAHEAD_TICKS;
    }

    // Falling onto a hazard with a charge left
    let above = hitbox.top() - body.bottom();
    !obstacle.profile.is_platform()
        && player.velocity_y > 0.0
        && player.jump_charges > 0
        && gap <= state.tuning.scroll_speed * LOOKAHEAD_TICKS
        && (0.0..=RESCUE_HEIGHT).contains(&above)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ItemKind, ObstacleKind};
    use crate::levels::{LevelDefinition, LevelLibrary, PatternEntry};
    use crate::settings::Settings;
    use crate::sim::level::Level;
    use crate::sim::tick::{TickInput, tick};
    use crate::tuning::Tuning;

    fn playing_with(kind: ObstacleKind, x: f32) -> GameState {
        let mut state = GameState::new(LevelLibrary::builtin(), Tuning::default(), Settings::default());
        state.start_level(0);
        let definition = LevelDefinition {
            name: "Autopilot".to_string(),
            patterns: vec![PatternEntry {
                items: vec![ItemKind::Obstacle(kind)],
                spacing: 0,
            }],
        };
        let mut level = Level::from_definition(0, &definition, &state.tuning, &state.settings);
        level.obstacles[0].x = x;
        state.level = Some(level);
        state
    }

    #[test]
    fn test_confirms_menus() {
        let mut state = GameState::new(LevelLibrary::builtin(), Tuning::default(), Settings::default());
        assert_eq!(plan(&state), Some(InputEvent::Confirm));
        state.phase = GamePhase::LevelComplete;
        assert_eq!(plan(&state), Some(InputEvent::Confirm));
        state.phase = GamePhase::GameOver;
        assert_eq!(plan(&state), None);
    }

    #[test]
    fn test_waits_then_jumps() {
        // Spike hitbox left = x + 10; player right = 140
        let far = playing_with(ObstacleKind::Spike, 400.0);
        assert_eq!(plan(&far), None);
        let near = playing_with(ObstacleKind::Spike, 160.0);
        assert_eq!(plan(&near), Some(InputEvent::Jump));
    }

    #[test]
    fn test_clears_a_single_spike() {
        let mut state = playing_with(ObstacleKind::Spike, 400.0);
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        for _ in 0..120 {
            tick(&mut state, &input);
            if state.phase != GamePhase::Playing {
                break;
            }
        }
        assert_eq!(state.phase, GamePhase::LevelComplete);
    }
}
