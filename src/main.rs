//! Eco Runner headless host
//!
//! Drives the engine with a synthetic frame clock and renders snapshots as
//! text. Usage: `eco-runner [easy|medium|hard]`, with optional settings JSON
//! pointed to by `ECO_RUNNER_SETTINGS`.

use std::cell::RefCell;
use std::error::Error;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use eco_runner::consts::*;
use eco_runner::engine::{Presenter, Snapshot};
use eco_runner::sim::{EntityKind, GameEvent, RunSummary, SessionPhase};
use eco_runner::tuning::fact_text;
use eco_runner::{Autopilot, Engine, HighScores, Settings};

const LANE_COLUMNS: usize = 60;

/// Prints a HUD line and an ASCII lane every few frames
struct TerminalPresenter {
    print_every: u64,
    frames: u64,
}

impl TerminalPresenter {
    fn new(print_every: u64) -> Self {
        Self {
            print_every: print_every.max(1),
            frames: 0,
        }
    }

    fn lane(snapshot: &Snapshot) -> String {
        let mut lane = vec!['.'; LANE_COLUMNS];
        let Some(view) = &snapshot.session else {
            return String::new();
        };
        let column = |x: f32| {
            let c = (x / PLAY_FIELD_WIDTH * LANE_COLUMNS as f32).floor();
            (c >= 0.0 && (c as usize) < LANE_COLUMNS).then_some(c as usize)
        };

        for entity in view.entities.iter().filter(|e| !e.consumed) {
            let glyph = match entity.kind {
                EntityKind::Pollution => 'X',
                EntityKind::Green if entity.pos.y > 0.0 => 'G',
                EntityKind::Green => 'g',
                EntityKind::Shield => 'S',
                EntityKind::Fact => '?',
            };
            if let Some(c) = column(entity.pos.x) {
                lane[c] = glyph;
            }
        }
        if let Some(c) = column(PLAYER_X) {
            lane[c] = if view.player.grounded() { '@' } else { '^' };
        }
        lane.into_iter().collect()
    }
}

impl Presenter for TerminalPresenter {
    fn present(&mut self, snapshot: &Snapshot) {
        for event in &snapshot.events {
            match event {
                GameEvent::FactUnlocked { index } => println!("  fact: {}", fact_text(*index)),
                GameEvent::ComboBonus { combo } => println!("  combo x{combo}!"),
                GameEvent::PollutionHit => println!("  ouch, pollution"),
                GameEvent::ShieldAbsorbed => println!("  shield absorbed a hit"),
                _ => {}
            }
        }

        if snapshot.phase != SessionPhase::Running || snapshot.suspended {
            return;
        }
        self.frames += 1;
        if !self.frames.is_multiple_of(self.print_every) {
            return;
        }
        let Some(view) = &snapshot.session else {
            return;
        };
        println!(
            "{} | score {:>4} | carbon {:>5.1}/{:<3.0} | lives {} | combo {:>2} | shields {} | {:>6.1}m",
            Self::lane(snapshot),
            view.score,
            view.carbon_level,
            view.max_carbon,
            view.lives,
            view.combo_count,
            view.shield_count,
            view.distance_traveled,
        );
    }

    fn game_over(&mut self, summary: &RunSummary) {
        println!(
            "GAME OVER ({:?}) score={} distance={:.1}m facts={}",
            summary.reason, summary.score, summary.distance_traveled, summary.facts_unlocked
        );
    }
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x5eed)
}

fn main() -> Result<(), Box<dyn Error>> {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();

    let mut settings = Settings::from_env()?;
    if let Some(level) = std::env::args().nth(1) {
        settings.level = level.parse()?;
    }
    let seed = settings.seed.unwrap_or_else(time_seed);

    let highscores = Rc::new(RefCell::new(HighScores::new()));
    let board = highscores.clone();

    let mut engine = Engine::new(seed).with_max_frame_dt(settings.max_frame_dt);
    log::info!(
        "Eco Runner (headless) starting: level={} seed={}",
        settings.level,
        engine.seed()
    );
    engine.set_presenter(TerminalPresenter::new(settings.print_every));
    engine.on_complete(move |summary| {
        if let Some(rank) = board.borrow_mut().add(summary) {
            println!("New high score! rank #{rank}");
        }
    });

    let autopilot = Autopilot::default();
    let mut now_ms = 0.0;

    for run in 0..settings.runs.max(1) {
        if run == 0 {
            engine.start(settings.level);
        } else {
            engine.restart();
        }

        let mut frames = 0;
        while engine.frame(now_ms) && frames < settings.max_frames {
            if settings.autopilot && autopilot.decide(&engine.snapshot()) {
                engine.jump();
            }
            now_ms += settings.frame_ms;
            frames += 1;
        }

        match engine.phase() {
            SessionPhase::GameOver(_) => {
                if let Some(summary) = engine.last_summary() {
                    println!("{}", serde_json::to_string_pretty(summary)?);
                }
            }
            _ => log::info!("Frame limit reached, abandoning run {}", run + 1),
        }
    }

    // the menu has nothing to draw in the terminal
    engine.clear_presenter();
    engine.return_to_menu();

    let board = highscores.borrow();
    println!("=== Leaderboard ===");
    for (i, entry) in board.entries.iter().enumerate() {
        println!(
            "{:>2}. {:>5}  {:<6} {:>7.1}m  facts {}",
            i + 1,
            entry.score,
            entry.level.as_str(),
            entry.distance,
            entry.facts
        );
    }
    if board.is_empty() {
        println!("(no scores)");
    }

    Ok(())
}
