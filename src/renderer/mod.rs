//! Rendering boundary
//!
//! The simulation hands a `FrameView` to a `Renderer` once per frame. The
//! renderer owns every drawing call and asset lookup.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::GameState;

/// Draws one frame
pub trait Renderer {
    fn draw(&mut self, frame: &FrameView);
}

/// Discards frames (headless runs)
#[derive(Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn draw(&mut self, _frame: &FrameView) {}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipeView {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub gap: f32,
    pub moving: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaserView {
    pub start: Vec2,
    pub end: Vec2,
    pub width: f32,
    pub life: f32,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameView {
    pub width: f32,
    pub height: f32,
    pub bird_pos: Vec2,
    pub bird_size: Vec2,
    /// Flap sprite: 0 = down, 1 = mid, 2 = up
    pub bird_frame: u32,
    pub pipes: Vec<PipeView>,
    pub lasers: Vec<LaserView>,
    pub score: u32,
    pub high_score: u32,
    pub tier_index: usize,
    pub tier_name: String,
    /// Horizontal scroll of the ground strip, in `0..FLOOR_WIDTH`
    pub floor_offset: f32,
    pub game_over: bool,
}

impl FrameView {
    pub fn capture(state: &GameState, high_score: u32) -> Self {
        let tier = state.tier();
        let scroll = state.frame_count as f32 * (PIPE_VELOCITY * tier.speed).abs();

        Self {
            width: state.viewport.width,
            height: state.viewport.height,
            bird_pos: state.bird.pos,
            bird_size: state.bird.size,
            bird_frame: bird_sprite_frame(state.frame_count),
            pipes: state
                .pipes
                .iter()
                .map(|p| PipeView {
                    pos: p.pos,
                    width: p.width,
                    height: p.height,
                    gap: p.gap,
                    moving: p.moving,
                })
                .collect(),
            lasers: state
                .lasers
                .iter()
                .map(|l| LaserView {
                    start: l.start,
                    end: l.end,
                    width: l.width,
                    life: l.life,
                })
                .collect(),
            score: state.score,
            high_score,
            tier_index: state.tier_index,
            tier_name: tier.name.clone(),
            floor_offset: scroll % FLOOR_WIDTH,
            game_over: state.is_over(),
        }
    }
}

pub fn bird_sprite_frame(frame: u64) -> u32 {
    ((frame / SPRITE_FRAME_TICKS) % SPRITE_FRAME_COUNT) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Viewport;
    use crate::sim::Pipe;

    #[test]
    fn test_sprite_cycle() {
        assert_eq!(bird_sprite_frame(0), 0);
        assert_eq!(bird_sprite_frame(9), 0);
        assert_eq!(bird_sprite_frame(10), 1);
        assert_eq!(bird_sprite_frame(25), 2);
        assert_eq!(bird_sprite_frame(30), 0);
    }

    #[test]
    fn test_capture() {
        let mut state = GameState::new(3, Viewport::new(800.0, 600.0));
        state.pipes.push(Pipe::new(1, Vec2::new(300.0, 0.0), 120.0, 200.0, 1.0, true));
        state.frame_count = 120;
        state.score = 4;

        let view = FrameView::capture(&state, 9);
        assert_eq!(view.pipes.len(), 1);
        assert!(view.pipes[0].moving);
        assert_eq!(view.score, 4);
        assert_eq!(view.high_score, 9);
        assert_eq!(view.tier_name, "Normal pipes");
        // 120 frames * 5 px = 600, wrapped at 500
        assert_eq!(view.floor_offset, 100.0);
        assert!(!view.game_over);

        let json = serde_json::to_string(&view).unwrap();
        assert!(json.contains("\"tier_name\":\"Normal pipes\""));
    }
}
