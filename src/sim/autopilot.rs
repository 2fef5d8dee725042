//! Demo controller: flaps whenever the bird sinks below the next gap

use super::state::GameState;
use super::tick::TickInput;
use crate::consts::FLOOR_HEIGHT;

/// Clearance kept above the bottom pipe / ground
const MARGIN: f32 = 12.0;

pub fn autopilot(state: &GameState) -> TickInput {
    let bird = &state.bird;

    // Next pipe the bird hasn't cleared yet
    let floor = state
        .pipes
        .iter()
        .filter(|p| p.right() >= bird.pos.x)
        .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x))
        .map(|p| p.pos.y + p.height + p.gap)
        .unwrap_or(state.viewport.height / 2.0)
        .min(state.viewport.height - FLOOR_HEIGHT);

    TickInput {
        jump: bird.vel.y >= 0.0 && bird.bottom() > floor - MARGIN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Viewport;
    use crate::sim::pipe::Pipe;
    use glam::Vec2;

    #[test]
    fn test_flaps_when_sinking_low() {
        let mut state = GameState::new(1, Viewport::new(800.0, 600.0));
        state.bird.pos.y = 100.0;
        assert!(!autopilot(&state).jump);

        state.bird.pos.y = 280.0;
        assert!(autopilot(&state).jump);

        // Already rising
        state.bird.vel.y = -5.0;
        assert!(!autopilot(&state).jump);
    }

    #[test]
    fn test_targets_next_gap() {
        let mut state = GameState::new(1, Viewport::new(800.0, 600.0));
        state.pipes.push(Pipe::new(1, Vec2::new(300.0, 0.0), 50.0, 100.0, 1.0, false));
        // Gap bottom at 150
        state.bird.pos.y = 120.0;
        assert!(autopilot(&state).jump);
        state.bird.pos.y = 50.0;
        assert!(!autopilot(&state).jump);
    }
}
