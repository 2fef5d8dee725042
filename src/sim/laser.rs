//! Laser beams: short-lived line segments fired at the bird's lane

use glam::Vec2;

use super::collision::Aabb;
use super::random::RandomSource;
use crate::Viewport;
use crate::consts::*;

#[derive(Debug, Clone, PartialEq)]
pub struct Laser {
    pub id: u32,
    /// Emitter end, on the right edge of the viewport
    pub start: Vec2,
    /// Target end, in the bird's lane
    pub end: Vec2,
    pub width: f32,
    /// Frames left before the beam fades
    pub life: f32,
    /// Speed multiplier at spawn, used when lasers drift
    pub speed: f32,
}

impl Laser {
    pub fn new(id: u32, start: Vec2, end: Vec2, speed: f32) -> Self {
        Self {
            id,
            start,
            end,
            width: LASER_WIDTH,
            life: LASER_LIFETIME,
            speed,
        }
    }

    /// Fire from a random height on the right edge to a random height in the bird's lane
    pub fn spawn(id: u32, viewport: &Viewport, speed: f32, rng: &mut impl RandomSource) -> Self {
        let start = Vec2::new(viewport.width, rng.next_unit() * viewport.height);
        let end = Vec2::new(BIRD_X, rng.next_unit() * viewport.height);
        Self::new(id, start, end, speed)
    }

    /// Count down the lifetime, optionally scrolling with the pipes
    pub fn advance(&mut self, dt: f32, drift: bool) {
        self.life -= dt * REFERENCE_FPS;

        if drift {
            let dx = PIPE_VELOCITY * self.speed * dt * REFERENCE_FPS;
            self.start.x += dx;
            self.end.x += dx;
        }
    }

    pub fn is_expired(&self) -> bool {
        self.life < 0.0
    }

    /// Box around the beam, including its thickness
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.start.min(self.end), self.start.max(self.end)).inflate(self.width / 2.0)
    }
}
