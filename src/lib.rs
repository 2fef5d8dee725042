//! Flappy Lasers - A side-scrolling arcade game
//!
//! Core modules:
//! - `sim`: Simulation (bird physics, pipes, lasers, collisions, game loop)
//! - `tuning`: Data-driven difficulty tiers and rule switches
//! - `renderer`: Per-frame view handed to the renderer (Canvas 2D on the web)
//! - `highscores`: High score persistence

pub mod highscores;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use highscores::{HighScoreStore, MemoryStore};
pub use tuning::{Rules, Tuning, TuningError};

/// Game configuration constants
///
/// Velocities and accelerations are in pixels per frame at 60 fps; the
/// simulation scales them by real elapsed time.
pub mod consts {
    /// Frames per second the velocity units are expressed in
    pub const REFERENCE_FPS: f32 = 60.0;

    /// Bird sprite is 34x24, drawn at double size
    pub const BIRD_WIDTH: f32 = 34.0 * 2.0;
    pub const BIRD_HEIGHT: f32 = 24.0 * 2.0;
    /// Fixed horizontal lane of the bird
    pub const BIRD_X: f32 = 50.0;
    pub const BIRD_JUMP_VELOCITY: f32 = -10.0;
    pub const BIRD_GRAVITY: f32 = 0.6;

    pub const PIPE_WIDTH: f32 = 75.0;
    /// Leftward scroll speed before the tier multiplier
    pub const PIPE_VELOCITY: f32 = -5.0;
    /// Vertical sway of moving pipes (pixels per frame at peak)
    pub const PIPE_SWAY_AMPLITUDE: f32 = 5.0;
    /// Frame count divisor for the sway sine
    pub const PIPE_SWAY_PERIOD: f32 = 10.0;

    /// Scrolling ground strip
    pub const FLOOR_WIDTH: f32 = 500.0;
    pub const FLOOR_HEIGHT: f32 = 100.0;

    /// Beam thickness of a laser
    pub const LASER_WIDTH: f32 = 10.0;
    /// Laser lifetime in frames
    pub const LASER_LIFETIME: f32 = 100.0;

    /// Frames each bird flap sprite is shown for
    pub const SPRITE_FRAME_TICKS: u64 = 10;
    pub const SPRITE_FRAME_COUNT: u64 = 3;

    /// The score nobody is allowed to see
    pub const SKIPPED_SCORE: u32 = 69;
}

/// Browser viewport dimensions the playfield is laid out in
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}
