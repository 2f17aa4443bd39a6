//! Fixed timestep simulation tick
//!
//! One call per rendered frame: apply the frame's input events, then (while playing) run
//! physics, dust cadence, level scroll and the two collision sweeps in that order.

use super::autopilot;
use super::collision::{find_fatal_obstacle, pending_zone_hits};
use super::gravity::compute_gravity;
use super::state::{GameEvent, GamePhase, GameState};

/// Discrete input events, already mapped from hardware by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Jump,
    Restart,
    NavigatePrevious,
    NavigateNext,
    Confirm,
    Quit,
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Events in arrival order
    pub events: Vec<InputEvent>,
    /// Idle/demo mode: the autopilot adds its own events
    pub autopilot: bool,
}

impl TickInput {
    pub fn with(events: &[InputEvent]) -> Self {
        Self {
            events: events.to_vec(),
            ..Default::default()
        }
    }
}

/// Advance the game by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();
    if state.quit_requested() {
        return;
    }

    let mut events = input.events.clone();
    if input.autopilot {
        events.extend(autopilot::plan(state));
    }

    for event in events {
        apply_input(state, event);
        if state.quit_requested() {
            return;
        }
    }

    state.time_ticks += 1;
    if state.phase == GamePhase::Playing {
        step_playing(state);
    }
}

/// Map one input event to a transition or player action for the current phase
fn apply_input(state: &mut GameState, event: InputEvent) {
    if event == InputEvent::Quit {
        state.request_quit();
        return;
    }

    match (state.phase, event) {
        (GamePhase::Menu, InputEvent::NavigatePrevious) => state.cycle_selection(-1),
        (GamePhase::Menu, InputEvent::NavigateNext) => state.cycle_selection(1),
        (GamePhase::Menu, InputEvent::Confirm | InputEvent::Jump) => {
            state.start_level(state.selected_level as i64);
        }

        (GamePhase::Playing, InputEvent::Jump) => {
            if state.player.jump(state.session.gravity.jump_impulse) {
                state.events.push(GameEvent::Jumped {
                    charges_left: state.player.jump_charges,
                });
            }
        }
        (GamePhase::Playing, InputEvent::Restart) => state.restart_level(),

        (GamePhase::GameOver, InputEvent::Restart) => state.restart_level(),
        (GamePhase::GameOver, InputEvent::Confirm) => state.return_to_menu(),

        (GamePhase::LevelComplete, InputEvent::Restart) => state.restart_level(),
        (GamePhase::LevelComplete, InputEvent::Confirm | InputEvent::NavigateNext) => {
            advance_level(state);
        }

        (GamePhase::CampaignComplete, InputEvent::Restart) => state.start_level(0),
        (GamePhase::CampaignComplete, InputEvent::Confirm) => state.return_to_menu(),

        _ => {}
    }
}

/// Next level, or the campaign end after the last one
fn advance_level(state: &mut GameState) {
    if state.is_last_level() {
        log::info!("Campaign complete (final score {})", state.session.score);
        state.phase = GamePhase::CampaignComplete;
        state.events.push(GameEvent::CampaignCompleted);
    } else {
        state.start_level(state.session.level_index as i64 + 1);
    }
}

fn step_playing(state: &mut GameState) {
    let GameState {
        phase,
        session,
        player,
        level,
        events,
        tuning,
        ..
    } = state;
    let Some(level) = level.as_mut() else {
        return;
    };

    session.score += 1;

    if player.step(session.gravity.gravity, &level.obstacles) {
        level.spawn_dust_effect(player.feet(), tuning.landing_dust_intensity);
        events.push(GameEvent::Landed);
    }

    // Dust while running along the ground or a platform
    if player.is_grounded(&level.obstacles) && player.velocity_y.abs() < 0.1 {
        session.dust_timer += 1;
        if session.dust_timer >= tuning.dust_interval {
            level.spawn_dust_effect(player.feet(), 1.0);
            session.dust_timer = 0;
        }
    } else {
        session.dust_timer = 0;
    }

    if level.tick(tuning.scroll_speed) {
        log::info!(
            "Level {} complete: {} (score {})",
            session.level_index + 1,
            level.name,
            session.score
        );
        *phase = GamePhase::LevelComplete;
        events.push(GameEvent::LevelCompleted {
            index: session.level_index,
        });
        return;
    }

    let hitbox = player.hitbox();
    if let Some(kind) = find_fatal_obstacle(
        &hitbox,
        &level.obstacles,
        tuning.ground_y,
        tuning.platform_death_depth,
    ) {
        log::debug!("Hit {} at score {}", kind.as_str(), session.score);
        *phase = GamePhase::GameOver;
        events.push(GameEvent::Died { kind });
    }

    for i in pending_zone_hits(&hitbox, &level.zones, tuning.ground_y) {
        let zone = &mut level.zones[i];
        let effect = compute_gravity(zone.multiplier, tuning.base_gravity, tuning.base_jump_impulse);
        zone.activated = true;
        let center = zone.hitbox(tuning.ground_y).center();
        let kind = zone.kind;

        log::debug!("Zone {} activated: {}", kind.as_str(), effect.label);
        session.gravity = effect;
        level.spawn_zone_effect(center, 1.0);
        events.push(GameEvent::ZoneActivated {
            kind,
            label: effect.label,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CollisionProfile, HitboxInset, ItemKind, ObstacleKind, ZoneKind};
    use crate::levels::{LevelDefinition, LevelLibrary, PatternEntry};
    use crate::settings::Settings;
    use crate::sim::level::Level;
    use crate::tuning::Tuning;

    fn new_state() -> GameState {
        GameState::new(LevelLibrary::builtin(), Tuning::default(), Settings::default())
    }

    fn press(state: &mut GameState, event: InputEvent) {
        tick(state, &TickInput::with(&[event]));
    }

    /// Replace the active level with one built from `patterns`
    fn install_level(state: &mut GameState, patterns: Vec<PatternEntry>) {
        let definition = LevelDefinition {
            name: "Scripted".to_string(),
            patterns,
        };
        let level = Level::from_definition(0, &definition, &state.tuning, &state.settings);
        state.level = Some(level);
    }

    #[test]
    fn test_menu_navigation_and_start() {
        let mut state = new_state();
        press(&mut state, InputEvent::NavigatePrevious);
        assert_eq!(state.selected_level, 2);
        press(&mut state, InputEvent::NavigateNext);
        press(&mut state, InputEvent::NavigateNext);
        assert_eq!(state.selected_level, 1);
        assert_eq!(state.phase, GamePhase::Menu);

        press(&mut state, InputEvent::Confirm);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.session.level_index, 1);
        // The starting frame already runs one playing step
        assert_eq!(state.score(), 1);
        assert!(state.events.contains(&GameEvent::LevelStarted { index: 1 }));
    }

    #[test]
    fn test_score_counts_playing_ticks_only() {
        let mut state = new_state();
        for _ in 0..5 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.score(), 0);
        assert_eq!(state.time_ticks, 5);

        press(&mut state, InputEvent::Jump);
        for _ in 0..9 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.score(), 10);
    }

    #[test]
    fn test_jump_uses_session_impulse() {
        let mut state = new_state();
        state.start_level(0);
        state.session.gravity = compute_gravity(2.0, 0.8, -12.0);
        press(&mut state, InputEvent::Jump);
        // Impulse -18 then one step of gravity 1.6
        assert!((state.player.velocity_y - (-18.0 + 1.6)).abs() < 1e-4);
        assert!(state.events.contains(&GameEvent::Jumped { charges_left: 1 }));
    }

    #[test]
    fn test_hazard_ends_run() {
        let mut state = new_state();
        state.start_level(0);
        install_level(
            &mut state,
            vec![PatternEntry {
                items: vec![ItemKind::Obstacle(ObstacleKind::Spike)],
                spacing: 0,
            }],
        );
        // After this tick's scroll the spike hitbox spans x 134..154
        if let Some(level) = state.level.as_mut() {
            level.obstacles[0].x = 130.0;
        }
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.events.contains(&GameEvent::Died {
            kind: ObstacleKind::Spike
        }));

        // Frozen until restart
        let score = state.score();
        tick(&mut state, &TickInput::default());
        assert_eq!(state.score(), score);

        press(&mut state, InputEvent::Restart);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.session.level_index, 0);
        assert_eq!(state.score(), 1);
    }

    #[test]
    fn test_game_over_confirm_returns_to_menu() {
        let mut state = new_state();
        press(&mut state, InputEvent::NavigateNext);
        press(&mut state, InputEvent::Confirm);
        state.phase = GamePhase::GameOver;
        press(&mut state, InputEvent::Confirm);
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.selected_level, 1);
        assert!(state.level.is_none());
    }

    #[test]
    fn test_standing_on_cube_is_safe() {
        let mut state = new_state();
        state.start_level(0);
        install_level(
            &mut state,
            vec![PatternEntry {
                items: vec![ItemKind::Obstacle(ObstacleKind::Cube)],
                spacing: 0,
            }],
        );
        if let Some(level) = state.level.as_mut() {
            level.obstacles[0].x = 100.0;
        }
        state.player.y = 240.0;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player.bottom(), 280.0);
    }

    #[test]
    fn test_hazard_kills_while_landing_on_cube() {
        let mut state = new_state();
        // A tall, uninset long spike whose hitbox reaches above the cube's top face
        for spec in &mut state.tuning.catalog.obstacles {
            if spec.kind == ObstacleKind::LongSpike {
                spec.height = 60.0;
                spec.profile = CollisionProfile::Hazard {
                    inset: HitboxInset::default(),
                };
            }
        }
        state.start_level(0);
        install_level(
            &mut state,
            vec![PatternEntry {
                items: vec![
                    ItemKind::Obstacle(ObstacleKind::Cube),
                    ItemKind::Obstacle(ObstacleKind::LongSpike),
                ],
                spacing: 0,
            }],
        );
        if let Some(level) = state.level.as_mut() {
            level.obstacles[0].x = 100.0;
            level.obstacles[1].x = 130.0;
        }
        state.player.y = 240.0;
        state.player.airborne = true;

        tick(&mut state, &TickInput::default());
        // Landed on the cube and died on the spike in the same tick
        assert_eq!(state.player.bottom(), 280.0);
        assert!(state.events.contains(&GameEvent::Landed));
        assert!(state.events.contains(&GameEvent::Died {
            kind: ObstacleKind::LongSpike
        }));
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_zone_fires_once() {
        let mut state = new_state();
        state.start_level(0);
        install_level(
            &mut state,
            vec![PatternEntry {
                items: vec![ItemKind::Zone(ZoneKind::Low)],
                spacing: 0,
            }],
        );
        if let Some(level) = state.level.as_mut() {
            level.zones[0].x = 120.0;
        }

        tick(&mut state, &TickInput::default());
        let activations = |state: &GameState| {
            state
                .events
                .iter()
                .filter(|e| matches!(e, GameEvent::ZoneActivated { .. }))
                .count()
        };
        assert_eq!(activations(&state), 1);
        assert_eq!(state.effect_label(), "LOW GRAVITY");
        assert!((state.session.gravity.gravity - 0.4).abs() < 1e-6);
        assert!((state.session.gravity.jump_impulse - (-9.6)).abs() < 1e-5);

        // Still overlapping on the next tick: no second activation
        let particles = state.level.as_ref().map(|l| l.particles.len()).unwrap_or(0);
        tick(&mut state, &TickInput::default());
        assert_eq!(activations(&state), 0);
        assert!(state.level.as_ref().is_some_and(|l| l.particles.len() <= particles));
    }

    #[test]
    fn test_level_complete_and_campaign() {
        let mut state = new_state();
        state.start_level(2);
        if let Some(level) = state.level.as_mut() {
            level.obstacles.clear();
            level.zones.clear();
        }
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::LevelComplete);
        assert!(state.events.contains(&GameEvent::LevelCompleted { index: 2 }));

        press(&mut state, InputEvent::NavigateNext);
        assert_eq!(state.phase, GamePhase::CampaignComplete);
        assert!(state.events.contains(&GameEvent::CampaignCompleted));

        press(&mut state, InputEvent::Restart);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.session.level_index, 0);
    }

    #[test]
    fn test_level_complete_advances() {
        let mut state = new_state();
        state.start_level(0);
        state.phase = GamePhase::LevelComplete;
        press(&mut state, InputEvent::Confirm);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.session.level_index, 1);
        assert_eq!(state.selected_level, 1);
    }

    #[test]
    fn test_quit_stops_everything() {
        let mut state = new_state();
        state.start_level(0);
        tick(
            &mut state,
            &TickInput::with(&[InputEvent::Quit, InputEvent::Jump]),
        );
        assert!(state.quit_requested());
        assert_eq!(state.events, vec![GameEvent::Quit]);
        assert_eq!(state.player.jump_charges, state.player.max_jump_charges);

        let ticks = state.time_ticks;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.time_ticks, ticks);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_restart_while_playing_resets_gravity() {
        let mut state = new_state();
        state.start_level(1);
        state.session.gravity = compute_gravity(0.5, 0.8, -12.0);
        state.session.score = 500;
        press(&mut state, InputEvent::Restart);
        assert_eq!(state.effect_label(), "NORMAL");
        assert_eq!(state.session.level_index, 1);
        assert_eq!(state.score(), 1);
    }

    #[test]
    fn test_idle_dust_cadence() {
        let mut state = new_state();
        state.start_level(0);
        for _ in 0..5 {
            tick(&mut state, &TickInput::default());
        }
        assert!(state.level.as_ref().is_some_and(|l| l.particles.is_empty()));
        tick(&mut state, &TickInput::default());
        assert!(state.level.as_ref().is_some_and(|l| !l.particles.is_empty()));
        assert_eq!(state.session.dust_timer, 0);
    }
}
