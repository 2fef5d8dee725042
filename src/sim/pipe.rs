//! Pipe pairs: a top pipe and a bottom pipe separated by a gap

use glam::Vec2;

use super::collision::Aabb;
use super::random::RandomSource;
use crate::Viewport;
use crate::consts::*;
use crate::tuning::DifficultyTier;

/// A pipe pair scrolling leftward across the playfield
#[derive(Debug, Clone, PartialEq)]
pub struct Pipe {
    pub id: u32,
    /// Top-left corner of the top pipe
    pub pos: Vec2,
    pub width: f32,
    /// Height of the top pipe
    pub height: f32,
    /// Vertical opening between the top and bottom pipe
    pub gap: f32,
    pub passed: bool,
    /// Speed multiplier of the tier this pipe spawned under
    pub speed: f32,
    /// Sways vertically (spawn-time tier setting)
    pub moving: bool,
}

impl Pipe {
    pub fn new(id: u32, pos: Vec2, height: f32, gap: f32, speed: f32, moving: bool) -> Self {
        Self {
            id,
            pos,
            width: PIPE_WIDTH,
            height,
            gap,
            passed: false,
            speed,
            moving,
        }
    }

    /// Spawn at the right edge with a random height and gap
    pub fn spawn(
        id: u32,
        viewport: &Viewport,
        tier: &DifficultyTier,
        rng: &mut impl RandomSource,
    ) -> Self {
        let height = rng.next_range(0.0, 0.5) * viewport.height;
        let gap = rng.next_range(tier.pipe_spacing, tier.pipe_spacing * 2.0);
        Self::new(
            id,
            Vec2::new(viewport.width, 0.0),
            height,
            gap,
            tier.speed,
            tier.moving_pipes,
        )
    }

    /// Scroll left and, for moving pipes, sway vertically
    pub fn advance(&mut self, dt: f32, frame: u64, viewport: &Viewport) {
        self.pos.x += PIPE_VELOCITY * self.speed * dt * REFERENCE_FPS;

        if self.moving {
            let direction = if self.sway_anchor() > viewport.height / 4.0 {
                1.0
            } else {
                -1.0
            };
            let phase = frame as f32 / PIPE_SWAY_PERIOD;
            self.pos.y += phase.sin() * PIPE_SWAY_AMPLITUDE * direction;
        }
    }

    /// Marks the pipe passed the first time its right edge clears `bird_x`
    ///
    /// Returns true only on that first crossing.
    pub fn check_passed(&mut self, bird_x: f32) -> bool {
        if self.passed || self.right() >= bird_x {
            return false;
        }
        self.passed = true;
        true
    }

    /// Fully scrolled off the left edge
    pub fn has_finished_passing(&self) -> bool {
        self.right() < 0.0
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.width
    }

    /// Reference height that picks the sway direction
    ///
    /// Measured as half the gap below the pipe's top-left corner, without the
    /// top pipe's height, so it is not the middle of the opening. The sway
    /// direction depends on this exact value.
    pub fn sway_anchor(&self) -> f32 {
        self.pos.y + self.gap / 2.0
    }

    pub fn top_bounds(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, Vec2::new(self.width, self.height))
    }

    /// Bottom pipe runs from the end of the gap to the bottom of the viewport
    pub fn bottom_bounds(&self, viewport: &Viewport) -> Aabb {
        let top = self.pos.y + self.height + self.gap;
        Aabb::new(
            Vec2::new(self.pos.x, top),
            Vec2::new(self.right(), viewport.height.max(top)),
        )
    }
}
