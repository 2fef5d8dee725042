//! Per-frame simulation update
//!
//! Order within a tick: jump, bird, pipes (scoring and tier changes),
//! lasers, collision checks, then retirement and spawning. A crash stops the
//! tick before anything is retired or spawned.

use super::collision;
use super::laser::Laser;
use super::level::advance_tier;
use super::pipe::Pipe;
use super::random::RandomSource;
use super::state::{GameEvent, GameState};
use crate::consts::*;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Flap (space bar)
    pub jump: bool,
}

/// Advance the game by `dt` seconds using the run's own RNG
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    let mut rng = state.rng.clone();
    tick_with_rng(state, input, dt, &mut rng);
    state.rng = rng;
}

/// Advance the game by `dt` seconds drawing spawn parameters from `rng`
pub fn tick_with_rng(
    state: &mut GameState,
    input: &TickInput,
    dt: f32,
    rng: &mut impl RandomSource,
) {
    if state.is_over() {
        return;
    }

    if input.jump {
        state.bird.apply_impulse(BIRD_JUMP_VELOCITY);
    }
    state.bird.integrate(dt);

    update_pipes(state, dt);
    update_lasers(state, dt);

    if let Some(cause) = collision::evaluate(
        &state.bird,
        &state.pipes,
        &state.lasers,
        &state.viewport,
        &state.tuning.rules,
    ) {
        log::debug!("Crash at frame {}: {:?}", state.frame_count, cause);
        state.end_run(cause);
        return;
    }

    state.pipes.retain(|pipe| !pipe.has_finished_passing());
    state.lasers.retain(|laser| !laser.is_expired());

    spawn_pipes(state, rng);
    spawn_lasers(state, rng);
}

fn update_pipes(state: &mut GameState, dt: f32) {
    let bird_x = state.bird.pos.x;
    let frame = state.frame_count;
    let viewport = state.viewport;

    let mut passed = 0;
    for pipe in &mut state.pipes {
        pipe.advance(dt, frame, &viewport);
        if pipe.check_passed(bird_x) {
            passed += 1;
        }
    }

    for _ in 0..passed {
        state.award_pipe();
    }
    if passed > 0 {
        update_tier(state);
    }
}

/// Move up the tier table as far as the score allows
fn update_tier(state: &mut GameState) {
    let next = advance_tier(&state.tuning.tiers, state.tier_index, state.score);
    for tier in state.tier_index + 1..=next {
        let name = state.tuning.tiers[tier].name.clone();
        state.events.push(GameEvent::TierReached { tier, name });
    }
    state.tier_index = next;
}

fn update_lasers(state: &mut GameState, dt: f32) {
    let drift = state.tuning.rules.lasers_drift;
    for laser in &mut state.lasers {
        laser.advance(dt, drift);
    }
}

fn spawn_pipes(state: &mut GameState, rng: &mut impl RandomSource) {
    let tier = state.tier().clone();
    if !tier.spawns_pipe_at(state.frame_count) {
        return;
    }
    let id = state.next_entity_id();
    let pipe = Pipe::spawn(id, &state.viewport, &tier, rng);
    state.pipes.push(pipe);
}

fn spawn_lasers(state: &mut GameState, rng: &mut impl RandomSource) {
    let tier = state.tier().clone();
    if !tier.fires_lasers_at(state.frame_count) {
        return;
    }
    for _ in 0..tier.laser_count {
        let id = state.next_entity_id();
        let laser = Laser::spawn(id, &state.viewport, tier.speed, rng);
        state.lasers.push(laser);
    }
    state.events.push(GameEvent::LaserVolley {
        count: tier.laser_count,
    });
}
