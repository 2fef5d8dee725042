//! Game state and core simulation types
//!
//! Everything one run owns lives here; the orchestrator is its only writer.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::collision::CrashCause;
use super::laser::Laser;
use super::pipe::Pipe;
use crate::Viewport;
use crate::consts::SKIPPED_SCORE;
use crate::tuning::{DifficultyTier, Tuning, TuningError};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Bird is flying
    Running,
    /// Run ended (terminal)
    GameOver,
}

/// Things that happened during a tick, drained by the game loop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PipePassed { score: u32 },
    TierReached { tier: usize, name: String },
    LaserVolley { count: u32 },
    Crashed { cause: CrashCause, score: u32 },
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub viewport: Viewport,
    /// Validated at construction; read through `tuning()`
    pub(crate) tuning: Tuning,
    pub bird: Body,
    /// Active pipes, oldest first
    pub pipes: Vec<Pipe>,
    /// Active lasers, oldest first
    pub lasers: Vec<Laser>,
    pub score: u32,
    /// Index into `tuning.tiers`
    pub tier_index: usize,
    /// Frames completed so far (spawn cadence is keyed off this)
    pub frame_count: u64,
    pub phase: GamePhase,
    pub crash: Option<CrashCause>,
    /// Events from the latest tick
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create a new run with the stock tier table
    pub fn new(seed: u64, viewport: Viewport) -> Self {
        Self::build(seed, viewport, Tuning::default())
    }

    /// Create a new run with custom tuning
    pub fn with_tuning(seed: u64, viewport: Viewport, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::build(seed, viewport, tuning))
    }

    fn build(seed: u64, viewport: Viewport, tuning: Tuning) -> Self {
        Self {
            seed,
            viewport,
            tuning,
            bird: Body::bird(),
            pipes: Vec::new(),
            lasers: Vec::new(),
            score: 0,
            tier_index: 0,
            frame_count: 0,
            phase: GamePhase::Running,
            crash: None,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Current difficulty tier
    pub fn tier(&self) -> &DifficultyTier {
        self.tuning
            .tier(self.tier_index)
            .expect("validated tuning has at least one tier")
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Score one passed pipe; the skipped score is never shown
    pub fn award_pipe(&mut self) {
        self.score += 1;
        if self.score == SKIPPED_SCORE {
            self.score += 1;
        }
        self.events.push(GameEvent::PipePassed { score: self.score });
    }

    /// Enter the terminal phase
    pub fn end_run(&mut self, cause: CrashCause) {
        self.phase = GamePhase::GameOver;
        self.crash = Some(cause);
        self.events.push(GameEvent::Crashed {
            cause,
            score: self.score,
        });
    }

    /// Close out a rendered frame
    pub fn end_frame(&mut self) {
        self.frame_count += 1;
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
