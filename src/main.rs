//! Cube Dash headless runner
//!
//! Loads levels and configuration, then drives the fixed-step loop without a window. The
//! autopilot plays by default; deaths are retried up to a limit.

use std::path::PathBuf;

use structopt::StructOpt;

use cube_dash::levels::parse::to_text;
use cube_dash::renderer::{FrameStats, draw_scene};
use cube_dash::sim::{GameEvent, GamePhase, GameState, InputEvent, TickInput, tick};
use cube_dash::consts::TICKS_PER_SECOND;
use cube_dash::{LevelLibrary, QualityPreset, Settings, Tuning};

#[derive(StructOpt, Debug)]
#[structopt(name = "cube-dash")]
struct Options {
    /// Directory holding *.json / *.txt level files
    #[structopt(short, long, parse(from_os_str), default_value = "levels")]
    levels: PathBuf,

    /// Tuning overrides (JSON)
    #[structopt(long, parse(from_os_str))]
    tuning: Option<PathBuf>,

    /// Settings file (JSON)
    #[structopt(long, parse(from_os_str))]
    settings: Option<PathBuf>,

    /// Quality preset override (low, medium, high)
    #[structopt(short, long)]
    quality: Option<String>,

    /// Level to start from (1-based, clamped)
    #[structopt(long, default_value = "1")]
    level: i64,

    /// Stop after this many ticks
    #[structopt(short, long, default_value = "36000")]
    ticks: u64,

    /// Give up after this many deaths on one level
    #[structopt(long, default_value = "5")]
    max_retries: u32,

    /// Never jump (runs until the first hazard)
    #[structopt(long)]
    no_autopilot: bool,

    /// Print every loaded level in text form and exit
    #[structopt(long)]
    dump_levels: bool,
}

/// Totals collected over a run
#[derive(Debug, Default)]
struct RunStats {
    jumps: u32,
    deaths: u32,
    zones: u32,
    levels_cleared: u32,
    peak_drawables: usize,
}

fn main() {
    env_logger::init();
    let opt = Options::from_args();
    log::info!("Cube Dash (headless) starting...");

    let tuning = Tuning::load_or_default(opt.tuning.as_deref());
    let mut settings = Settings::load_or_default(opt.settings.as_deref());
    if let Some(name) = &opt.quality {
        match QualityPreset::from_name(name) {
            Some(preset) => settings.quality = preset,
            None => log::warn!("Unknown quality preset '{}', keeping {}", name, settings.quality.as_str()),
        }
    }
    let library = LevelLibrary::load(&opt.levels, &tuning.catalog);

    if opt.dump_levels {
        for level in library.levels() {
            println!("{}", to_text(level));
        }
        return;
    }

    let mut state = GameState::new(library, tuning, settings);
    state.selected_level = state.library.clamp(level_index(opt.level));
    let stats = run(&mut state, &opt);

    println!(
        "{} after {} ticks ({:.1}s): level {}/{} '{}', score {}, jumps {}, deaths {}, zones {}, cleared {}, peak drawables {}",
        state.phase.as_str(),
        state.time_ticks,
        state.time_ticks as f64 / f64::from(TICKS_PER_SECOND),
        state.session.level_index + 1,
        state.level_count(),
        state.level_name(),
        state.score(),
        stats.jumps,
        stats.deaths,
        stats.zones,
        stats.levels_cleared,
        stats.peak_drawables,
    );
}

/// 0-based level index for a 1-based command line value
fn level_index(level: i64) -> i64 {
    level.saturating_sub(1)
}

fn run(state: &mut GameState, opt: &Options) -> RunStats {
    let mut stats = RunStats::default();
    let mut level_deaths = 0;

    for _ in 0..opt.ticks {
        let mut input = TickInput {
            autopilot: !opt.no_autopilot,
            ..Default::default()
        };
        match state.phase {
            GamePhase::Menu | GamePhase::LevelComplete if opt.no_autopilot => {
                input.events.push(InputEvent::Confirm);
            }
            GamePhase::GameOver if level_deaths > opt.max_retries => {
                log::warn!("Giving up on '{}' after {} deaths", state.level_name(), level_deaths);
                input.events.push(InputEvent::Quit);
            }
            GamePhase::GameOver => input.events.push(InputEvent::Restart),
            GamePhase::CampaignComplete => input.events.push(InputEvent::Quit),
            _ => {}
        }

        tick(state, &input);

        for event in &state.events {
            log::debug!("{:?}", event);
            match event {
                GameEvent::Jumped { .. } => stats.jumps += 1,
                GameEvent::Died { .. } => {
                    stats.deaths += 1;
                    level_deaths += 1;
                }
                GameEvent::ZoneActivated { .. } => stats.zones += 1,
                GameEvent::LevelCompleted { .. } => {
                    stats.levels_cleared += 1;
                    level_deaths = 0;
                }
                _ => {}
            }
        }

        let mut frame = FrameStats::default();
        draw_scene(state, &mut frame);
        stats.peak_drawables = stats.peak_drawables.max(frame.total());

        if state.quit_requested() {
            break;
        }
    }
    stats
}
