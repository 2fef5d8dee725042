//! Kinematic body for the bird

use glam::Vec2;

use super::collision::Aabb;
use crate::consts::*;

/// Point-mass body with a fixed-size bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub pos: Vec2,
    /// Pixels per frame at 60 fps
    pub vel: Vec2,
    pub acc: Vec2,
    pub size: Vec2,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            acc: Vec2::ZERO,
            size,
        }
    }

    /// The player's bird at the start of a run
    pub fn bird() -> Self {
        let mut body = Self::new(
            Vec2::new(BIRD_X, 0.0),
            Vec2::new(BIRD_WIDTH, BIRD_HEIGHT),
        );
        body.acc.y = BIRD_GRAVITY;
        body
    }

    /// Advance by `dt` seconds
    pub fn integrate(&mut self, dt: f32) {
        self.vel += self.acc * dt;
        self.pos += self.vel * dt * REFERENCE_FPS;
    }

    /// Override vertical velocity (jump)
    pub fn apply_impulse(&mut self, vy: f32) {
        self.vel.y = vy;
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }
}
