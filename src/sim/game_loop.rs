//! Frame-driven game loop
//!
//! The host calls `frame` from its display refresh callback and keeps
//! rescheduling until it gets `LoopControl::Halt`.

use super::state::{GameEvent, GameState};
use super::tick::{TickInput, tick};
use crate::highscores::{HighScoreStore, record_score};
use crate::renderer::{FrameView, Renderer};

/// What the host should do after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    /// Schedule another frame
    Continue,
    /// Run is over; stop scheduling
    Halt,
}

/// Turns host timestamps into elapsed seconds
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    /// Seconds since the previous call; the first call reports zero
    pub fn elapsed(&mut self, now_ms: f64) -> f32 {
        match self.last_ms.replace(now_ms) {
            Some(last) => ((now_ms - last).max(0.0) / 1000.0) as f32,
            None => 0.0,
        }
    }
}

pub struct GameLoop {
    pub state: GameState,
    clock: FrameClock,
    pending_jump: bool,
    halted: bool,
}

impl GameLoop {
    pub fn new(state: GameState) -> Self {
        Self {
            state,
            clock: FrameClock::default(),
            pending_jump: false,
            halted: false,
        }
    }

    /// Queue a flap for the next frame
    pub fn jump(&mut self) {
        self.pending_jump = true;
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Update, render, then count the frame
    pub fn frame(
        &mut self,
        now_ms: f64,
        renderer: &mut impl Renderer,
        store: &mut impl HighScoreStore,
    ) -> LoopControl {
        if self.halted || self.state.is_over() {
            self.halted = true;
            return LoopControl::Halt;
        }

        let dt = self.clock.elapsed(now_ms);
        let input = TickInput {
            jump: std::mem::take(&mut self.pending_jump),
        };
        tick(&mut self.state, &input, dt);
        self.log_events();

        let high_score = record_score(store, self.state.score);
        renderer.draw(&FrameView::capture(&self.state, high_score));
        self.state.end_frame();

        if self.state.is_over() {
            self.halted = true;
            LoopControl::Halt
        } else {
            LoopControl::Continue
        }
    }

    fn log_events(&mut self) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::PipePassed { score } => log::info!("Score: {}", score),
                GameEvent::TierReached { tier, name } => {
                    log::info!("Tier {} reached: {}", tier, name)
                }
                GameEvent::LaserVolley { count } => log::debug!("Laser volley x{}", count),
                GameEvent::Crashed { cause, score } => log::info!(
                    "Game over ({:?}) with score {} after {} frames",
                    cause,
                    score,
                    self.state.frame_count
                ),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Viewport;
    use crate::consts::*;
    use crate::highscores::MemoryStore;

    #[derive(Default)]
    struct Recorder {
        frames: Vec<FrameView>,
    }

    impl Renderer for Recorder {
        fn draw(&mut self, frame: &FrameView) {
            self.frames.push(frame.clone());
        }
    }

    fn new_loop() -> GameLoop {
        let mut state = GameState::new(11, Viewport::new(800.0, 600.0));
        state.bird.pos.y = 200.0;
        GameLoop::new(state)
    }

    #[test]
    fn test_clock_first_call_is_zero() {
        let mut clock = FrameClock::default();
        assert_eq!(clock.elapsed(5000.0), 0.0);
        assert!((clock.elapsed(5016.0) - 0.016).abs() < 1e-6);
        // Clock going backwards never yields negative time
        assert_eq!(clock.elapsed(4000.0), 0.0);
    }

    #[test]
    fn test_first_frame_has_no_time_spike() {
        let mut game = new_loop();
        let mut renderer = Recorder::default();
        let mut store = MemoryStore::new();

        // A large host timestamp on the first frame must not move the bird
        assert_eq!(game.frame(123_456.0, &mut renderer, &mut store), LoopControl::Continue);
        assert_eq!(game.state.bird.pos.y, 200.0);
        assert_eq!(game.state.frame_count, 1);

        game.frame(123_456.0 + 1000.0 / 60.0, &mut renderer, &mut store);
        assert!(game.state.bird.pos.y > 200.0);
        assert_eq!(renderer.frames.len(), 2);
        assert_eq!(game.state.frame_count, 2);
    }

    #[test]
    fn test_jump_consumed_once() {
        let mut game = new_loop();
        let mut renderer = Recorder::default();
        let mut store = MemoryStore::new();

        game.frame(0.0, &mut renderer, &mut store);
        game.jump();
        game.frame(16.0, &mut renderer, &mut store);
        assert!(game.state.bird.vel.y < 0.0);
        let vy = game.state.bird.vel.y;

        game.frame(32.0, &mut renderer, &mut store);
        assert!(game.state.bird.vel.y > vy);
    }

    #[test]
    fn test_halts_after_rendering_game_over() {
        let mut game = new_loop();
        let mut renderer = Recorder::default();
        let mut store = MemoryStore::new();

        game.frame(0.0, &mut renderer, &mut store);
        game.state.bird.pos.y = 600.0 - FLOOR_HEIGHT;

        assert_eq!(game.frame(16.0, &mut renderer, &mut store), LoopControl::Halt);
        assert!(game.is_halted());
        let last = renderer.frames.last().unwrap();
        assert!(last.game_over);

        // Further scheduling is a no-op
        let frames = game.state.frame_count;
        assert_eq!(game.frame(32.0, &mut renderer, &mut store), LoopControl::Halt);
        assert_eq!(renderer.frames.len(), 2);
        assert_eq!(game.state.frame_count, frames);
    }

    #[test]
    fn test_high_score_synced_each_frame() {
        let mut game = new_loop();
        let mut renderer = Recorder::default();
        let mut store = MemoryStore::with_score(2);

        game.state.score = 1;
        game.frame(0.0, &mut renderer, &mut store);
        assert_eq!(renderer.frames[0].high_score, 2);
        assert_eq!(store.writes, 0);

        game.state.score = 3;
        game.frame(16.0, &mut renderer, &mut store);
        assert_eq!(renderer.frames[1].high_score, 3);
        assert_eq!(store.high_score(), 3);
        assert_eq!(store.writes, 1);
    }

    #[test]
    fn test_events_drained() {
        let mut game = new_loop();
        let mut renderer = Recorder::default();
        let mut store = MemoryStore::new();
        game.state.tier_index = 3;

        game.frame(0.0, &mut renderer, &mut store);
        assert!(game.state.events.is_empty());
        assert_eq!(renderer.frames[0].lasers.len(), 2);
    }
}
