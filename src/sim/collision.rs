//! Collision detection between the bird and the playfield hazards
//!
//! Everything is axis-aligned. With `Rules::precise_lasers` on, a laser box
//! hit must also be confirmed by clipping the beam against the bird's box.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::laser::Laser;
use super::pipe::Pipe;
use crate::Viewport;
use crate::consts::FLOOR_HEIGHT;
use crate::tuning::Rules;

/// Axis-aligned bounding box (`min` is the top-left corner, y grows down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos, pos + size)
    }

    /// Strict overlap: boxes sharing only an edge do not collide
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    /// Grow by `amount` on every side
    pub fn inflate(&self, amount: f32) -> Self {
        Self::new(self.min - Vec2::splat(amount), self.max + Vec2::splat(amount))
    }
}

/// What ended the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrashCause {
    Pipe,
    Ground,
    Ceiling,
    Laser,
}

/// Does the segment `a -> b` pass through the interior of `aabb`?
///
/// Liang-Barsky clip; the clipped interval must have positive length, so a
/// segment grazing an edge or corner is not a hit.
pub fn segment_hits_aabb(a: Vec2, b: Vec2, aabb: &Aabb) -> bool {
    let d = b - a;
    let mut t_enter = 0.0f32;
    let mut t_exit = 1.0f32;

    for axis in 0..2 {
        let (origin, dir, lo, hi) = (a[axis], d[axis], aabb.min[axis], aabb.max[axis]);
        if dir.abs() < f32::EPSILON {
            // Parallel: must lie strictly between the slabs
            if origin <= lo || origin >= hi {
                return false;
            }
            continue;
        }
        let t0 = (lo - origin) / dir;
        let t1 = (hi - origin) / dir;
        let (near, far) = if t0 < t1 { (t0, t1) } else { (t1, t0) };
        t_enter = t_enter.max(near);
        t_exit = t_exit.min(far);
        if t_enter >= t_exit {
            return false;
        }
    }

    true
}

pub fn bird_hits_pipe(bird: &Aabb, pipe: &Pipe, viewport: &Viewport) -> bool {
    bird.overlaps(&pipe.top_bounds()) || bird.overlaps(&pipe.bottom_bounds(viewport))
}

/// Has the bird sunk into the ground strip?
pub fn bird_hits_ground(bird: &Body, viewport: &Viewport) -> bool {
    bird.bottom() + FLOOR_HEIGHT >= viewport.height
}

pub fn bird_above_ceiling(bird: &Body) -> bool {
    bird.pos.y < 0.0
}

/// Box overlap with the beam's bounds; `precise` also requires the beam itself to cross the bird
pub fn bird_hits_laser(bird: &Aabb, laser: &Laser, precise: bool) -> bool {
    if !bird.overlaps(&laser.bounds()) {
        return false;
    }
    !precise || segment_hits_aabb(laser.start, laser.end, &bird.inflate(laser.width / 2.0))
}

/// Run every game-over check against the current world
///
/// Returns the first cause found, pipes before ground before lasers.
pub fn evaluate(
    bird: &Body,
    pipes: &[Pipe],
    lasers: &[Laser],
    viewport: &Viewport,
    rules: &Rules,
) -> Option<CrashCause> {
    let bounds = bird.bounds();

    if pipes.iter().any(|pipe| bird_hits_pipe(&bounds, pipe, viewport)) {
        return Some(CrashCause::Pipe);
    }
    if bird_hits_ground(bird, viewport) {
        return Some(CrashCause::Ground);
    }
    if rules.ceiling_is_fatal && bird_above_ceiling(bird) {
        return Some(CrashCause::Ceiling);
    }
    let precise = rules.precise_lasers;
    if lasers.iter().any(|laser| bird_hits_laser(&bounds, laser, precise)) {
        return Some(CrashCause::Laser);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    fn viewport() -> Viewport {
        Viewport::new(800.0, 600.0)
    }

    fn bird_at(x: f32, y: f32) -> Body {
        let mut bird = Body::bird();
        bird.pos = Vec2::new(x, y);
        bird
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        let bird = Aabb::from_pos_size(Vec2::ZERO, Vec2::new(BIRD_WIDTH, BIRD_HEIGHT));
        let right = Aabb::from_pos_size(Vec2::new(BIRD_WIDTH, 0.0), Vec2::new(75.0, 100.0));
        let below = Aabb::from_pos_size(Vec2::new(0.0, BIRD_HEIGHT), Vec2::new(75.0, 100.0));
        assert!(!bird.overlaps(&right));
        assert!(!right.overlaps(&bird));
        assert!(!bird.overlaps(&below));
    }

    #[test]
    fn test_overlap() {
        let a = Aabb::from_pos_size(Vec2::ZERO, Vec2::new(10.0, 10.0));
        let b = Aabb::from_pos_size(Vec2::new(9.0, 9.0), Vec2::new(10.0, 10.0));
        let far = Aabb::from_pos_size(Vec2::new(50.0, 0.0), Vec2::new(10.0, 10.0));
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&far));
    }

    #[test]
    fn test_bird_hits_top_pipe() {
        let pipe = Pipe::new(1, Vec2::new(60.0, 0.0), 200.0, 150.0, 1.0, false);
        let bird = bird_at(BIRD_X, 100.0);
        assert!(bird_hits_pipe(&bird.bounds(), &pipe, &viewport()));
    }

    #[test]
    fn test_bird_in_gap_is_safe() {
        // Gap spans y in 200..350, bird is 48 tall
        let pipe = Pipe::new(1, Vec2::new(60.0, 0.0), 200.0, 150.0, 1.0, false);
        let bird = bird_at(BIRD_X, 250.0);
        assert!(!bird_hits_pipe(&bird.bounds(), &pipe, &viewport()));
    }

    #[test]
    fn test_bird_hits_bottom_pipe() {
        let pipe = Pipe::new(1, Vec2::new(60.0, 0.0), 200.0, 150.0, 1.0, false);
        let bird = bird_at(BIRD_X, 320.0);
        assert!(bird_hits_pipe(&bird.bounds(), &pipe, &viewport()));
    }

    #[test]
    fn test_ground() {
        let vp = viewport();
        let limit = vp.height - FLOOR_HEIGHT - BIRD_HEIGHT;
        assert!(!bird_hits_ground(&bird_at(BIRD_X, limit - 1.0), &vp));
        assert!(bird_hits_ground(&bird_at(BIRD_X, limit + 1.0), &vp));
    }

    #[test]
    fn test_ceiling_only_when_enabled() {
        let bird = bird_at(BIRD_X, -10.0);
        let fatal = Rules {
            ceiling_is_fatal: true,
            ..Rules::default()
        };
        assert_eq!(evaluate(&bird, &[], &[], &viewport(), &Rules::default()), None);
        assert_eq!(
            evaluate(&bird, &[], &[], &viewport(), &fatal),
            Some(CrashCause::Ceiling)
        );
    }

    #[test]
    fn test_segment_through_box() {
        let aabb = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        assert!(segment_hits_aabb(Vec2::new(-5.0, 5.0), Vec2::new(15.0, 5.0), &aabb));
        assert!(segment_hits_aabb(Vec2::new(-5.0, -5.0), Vec2::new(15.0, 15.0), &aabb));
        // Ends before reaching the box
        assert!(!segment_hits_aabb(Vec2::new(-5.0, 5.0), Vec2::new(-1.0, 5.0), &aabb));
        // Runs along the top edge
        assert!(!segment_hits_aabb(Vec2::new(-5.0, 0.0), Vec2::new(15.0, 0.0), &aabb));
        // Passes by diagonally, clear of the corner
        assert!(!segment_hits_aabb(Vec2::new(0.0, 20.0), Vec2::new(20.0, 0.0), &aabb));
    }

    #[test]
    fn test_laser_box_and_beam_modes() {
        let bird = bird_at(BIRD_X, 300.0).bounds();

        let through = Laser::new(1, Vec2::new(800.0, 320.0), Vec2::new(BIRD_X, 320.0), 1.0);
        assert!(bird_hits_laser(&bird, &through, false));
        assert!(bird_hits_laser(&bird, &through, true));

        // Bounding box covers the bird but the diagonal beam itself misses it
        let diagonal = Laser::new(2, Vec2::new(800.0, 600.0), Vec2::new(BIRD_X, 0.0), 1.0);
        assert!(diagonal.bounds().overlaps(&bird));
        assert!(bird_hits_laser(&bird, &diagonal, false));
        assert!(!bird_hits_laser(&bird, &diagonal, true));

        let above = Laser::new(3, Vec2::new(800.0, 100.0), Vec2::new(BIRD_X, 120.0), 1.0);
        assert!(!bird_hits_laser(&bird, &above, false));
        assert!(!bird_hits_laser(&bird, &above, true));
    }

    #[test]
    fn test_evaluate_priority() {
        let vp = viewport();
        let limit = vp.height - FLOOR_HEIGHT - BIRD_HEIGHT;
        let bird = bird_at(BIRD_X, limit + 5.0);
        let pipe = Pipe::new(1, Vec2::new(60.0, 0.0), 0.0, 100.0, 1.0, false);
        assert_eq!(evaluate(&bird, &[pipe], &[], &vp, &Rules::default()), Some(CrashCause::Pipe));
        assert_eq!(evaluate(&bird, &[], &[], &vp, &Rules::default()), Some(CrashCause::Ground));
    }
}
