//! Session state machine and host-facing surface
//!
//! The host drives the engine with a self-scheduling frame callback
//! (`frame(now_ms)`) plus a handful of input handlers. Rendering and reward
//! bookkeeping are plugged in from outside: a [`Presenter`] receives
//! snapshots, and a completion listener receives the [`RunSummary`] of each
//! finished run exactly once.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::MAX_FRAME_DT;
use crate::sim::{
    self, Entity, GameClock, GameEvent, GameOverReason, GameSession, PlayerState, RunSummary,
    SessionPhase,
};
use crate::tuning::{LevelKey, TuningError};

/// Presentation sink. Every hook is optional; unimplemented hooks are no-ops.
pub trait Presenter {
    /// Called after every tick and after every discrete input event
    fn present(&mut self, _snapshot: &Snapshot) {}

    /// Called once when a run ends
    fn game_over(&mut self, _summary: &RunSummary) {}
}

/// Read-only view of a live session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionView {
    pub score: u32,
    pub carbon_level: f32,
    pub max_carbon: f32,
    pub lives: u8,
    pub combo_count: u32,
    pub shield_count: u32,
    pub facts_unlocked: u32,
    pub distance_traveled: f32,
    pub player: PlayerState,
    pub entities: Vec<Entity>,
}

impl From<&GameSession> for SessionView {
    fn from(session: &GameSession) -> Self {
        Self {
            score: session.score,
            carbon_level: session.carbon_level,
            max_carbon: session.config().max_carbon,
            lives: session.lives,
            combo_count: session.combo_count,
            shield_count: session.shield_count,
            facts_unlocked: session.facts_unlocked,
            distance_traveled: session.distance_traveled,
            player: session.player,
            entities: session.entities.clone(),
        }
    }
}

/// Immutable engine snapshot handed to presenters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: SessionPhase,
    pub suspended: bool,
    pub level: Option<LevelKey>,
    pub session: Option<SessionView>,
    /// Events produced by the step that led to this snapshot
    pub events: Vec<GameEvent>,
}

type CompletionListener = Box<dyn FnMut(&RunSummary)>;

/// Owns the current session and gates every mutation on the phase
pub struct Engine {
    seed: u64,
    rng: Pcg32,
    clock: GameClock,
    phase: SessionPhase,
    level: Option<LevelKey>,
    session: Option<GameSession>,
    suspended: bool,
    last_events: Vec<GameEvent>,
    last_summary: Option<RunSummary>,
    presenter: Option<Box<dyn Presenter>>,
    on_complete: Option<CompletionListener>,
}

impl Engine {
    /// Create an idle engine with the given RNG seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            clock: GameClock::new(MAX_FRAME_DT),
            phase: SessionPhase::Idle,
            level: None,
            session: None,
            suspended: false,
            last_events: Vec::new(),
            last_summary: None,
            presenter: None,
            on_complete: None,
        }
    }

    /// Override the per-tick delta clamp
    pub fn with_max_frame_dt(mut self, max_dt: f32) -> Self {
        self.clock = GameClock::new(max_dt);
        self
    }

    pub fn set_presenter(&mut self, presenter: impl Presenter + 'static) {
        self.presenter = Some(Box::new(presenter));
    }

    pub fn clear_presenter(&mut self) {
        self.presenter = None;
    }

    /// Register the listener notified once per finished run
    pub fn on_complete(&mut self, listener: impl FnMut(&RunSummary) + 'static) {
        self.on_complete = Some(Box::new(listener));
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    pub fn level(&self) -> Option<LevelKey> {
        self.level
    }

    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    /// Summary of the most recently finished run
    pub fn last_summary(&self) -> Option<&RunSummary> {
        self.last_summary.as_ref()
    }

    /// Whether the host should schedule another frame
    pub fn wants_frame(&self) -> bool {
        self.phase == SessionPhase::Running && !self.suspended
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            suspended: self.suspended,
            level: self.level,
            session: self.session.as_ref().map(SessionView::from),
            events: self.last_events.clone(),
        }
    }

    // === Input surface ===

    /// Begin a run from the menu
    pub fn start(&mut self, level: LevelKey) {
        if self.phase != SessionPhase::Idle {
            log::warn!("start({}) ignored in phase {:?}", level, self.phase);
            return;
        }
        self.rng = Pcg32::seed_from_u64(self.seed);
        self.begin_session(level);
        log::info!("Session started: level={} seed={}", level, self.seed);
        self.publish();
    }

    /// Begin a run from a level name; unknown names are rejected before
    /// anything changes
    pub fn start_named(&mut self, name: &str) -> Result<(), TuningError> {
        let level = name.parse::<LevelKey>()?;
        self.start(level);
        Ok(())
    }

    pub fn jump(&mut self) {
        if !self.wants_frame() {
            return;
        }
        if let Some(session) = self.session.as_mut() {
            if sim::jump(session) != sim::JumpOutcome::Ignored {
                self.last_events = session.drain_events();
                self.publish();
            }
        }
    }

    /// Suspend or resume ticking; `now_ms` restarts the clock on resume
    pub fn toggle_pause(&mut self, now_ms: f64) {
        if self.phase != SessionPhase::Running {
            return;
        }
        self.suspended = !self.suspended;
        if self.suspended {
            log::info!("Paused");
        } else {
            self.clock.resume(now_ms);
            log::info!("Resumed");
        }
        self.last_events.clear();
        self.publish();
    }

    /// Fresh session under the current level, straight into Running
    pub fn restart(&mut self) {
        let Some(level) = self.level else {
            log::warn!("restart ignored: no level selected");
            return;
        };
        if self.phase == SessionPhase::Idle {
            log::warn!("restart ignored in phase Idle");
            return;
        }
        self.begin_session(level);
        log::info!("Session restarted: level={}", level);
        self.publish();
    }

    /// Discard the session and go back to Idle
    pub fn return_to_menu(&mut self) {
        if self.phase == SessionPhase::Idle {
            return;
        }
        self.session = None;
        self.level = None;
        self.suspended = false;
        self.clock.reset();
        self.phase = SessionPhase::Idle;
        self.last_events.clear();
        log::info!("Returned to menu");
        self.publish();
    }

    // === Scheduling ===

    /// Frame callback. Returns whether another frame should be scheduled.
    pub fn frame(&mut self, now_ms: f64) -> bool {
        if !self.wants_frame() {
            return false;
        }
        let dt = self.clock.advance(now_ms);
        self.step(dt)
    }

    /// Run one tick with an explicit delta (clamped like host deltas)
    pub fn step(&mut self, dt: f32) -> bool {
        if !self.wants_frame() {
            return false;
        }
        let dt = if dt.is_finite() {
            dt.clamp(0.0, self.clock.max_dt())
        } else {
            0.0
        };
        let Some(session) = self.session.as_mut() else {
            return false;
        };

        let outcome = sim::tick(session, dt, &mut self.rng);
        self.last_events = session.drain_events();
        if let Some(reason) = outcome {
            self.finish(reason);
        }
        self.publish();

        self.wants_frame()
    }

    fn begin_session(&mut self, level: LevelKey) {
        self.level = Some(level);
        self.session = Some(GameSession::new(level));
        self.phase = SessionPhase::Running;
        self.suspended = false;
        self.clock.reset();
        self.last_events.clear();
    }

    fn finish(&mut self, reason: GameOverReason) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let summary = session.summary(reason);
        self.phase = SessionPhase::GameOver(reason);
        log::info!(
            "Game over ({:?}): score={} carbon={:.1} distance={:.1}m facts={}",
            reason,
            summary.score,
            summary.carbon_level,
            summary.distance_traveled,
            summary.facts_unlocked
        );

        if let Some(listener) = self.on_complete.as_mut() {
            listener(&summary);
        }
        if let Some(presenter) = self.presenter.as_mut() {
            presenter.game_over(&summary);
        }
        self.last_summary = Some(summary);
    }

    fn publish(&mut self) {
        if self.presenter.is_none() {
            return;
        }
        let snapshot = self.snapshot();
        if let Some(presenter) = self.presenter.as_mut() {
            presenter.present(&snapshot);
        }
    }
}
