//! Simulation module
//!
//! All gameplay logic lives here:
//! - Frame-rate independent integration (velocities in 60 fps units)
//! - Injectable randomness (seeded PCG by default)
//! - No rendering, storage, or platform dependencies

pub mod autopilot;
pub mod body;
pub mod collision;
pub mod game_loop;
pub mod laser;
pub mod level;
pub mod pipe;
pub mod random;
pub mod state;
pub mod tick;

pub use autopilot::autopilot;
pub use body::Body;
pub use collision::{Aabb, CrashCause, segment_hits_aabb};
pub use game_loop::{FrameClock, GameLoop, LoopControl};
pub use laser::Laser;
pub use level::{advance_tier, tier_for_score};
pub use pipe::Pipe;
pub use random::{RandomSource, ScriptedRandom};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick, tick_with_rng};
