//! Simulation tick
//!
//! Advances the clock and the ghosts by `dt_ms`, then resolves collisions.
//! The host loop is responsible for clamping `dt_ms`; a tick applies
//! whatever it is given.

use super::grid::{Cell, Direction};
use super::state::{GameState, LossCause, RoundOutcome};

/// Advance the round by `dt_ms` milliseconds
pub fn tick(state: &mut GameState, dt_ms: f32) {
    if !state.is_running() || dt_ms <= 0.0 {
        return;
    }

    state.time_ticks += 1;
    state.elapsed_ms += dt_ms;

    // Countdown, then the dark: only time past zero counts toward the grace window
    if state.countdown_ms > 0.0 {
        let overshoot = dt_ms - state.countdown_ms;
        state.countdown_ms = (state.countdown_ms - dt_ms).max(0.0);
        if overshoot > 0.0 {
            state.darken_ms += overshoot;
        }
    } else {
        state.darken_ms += dt_ms;
    }

    if state.darken_ms > state.config.timeout_grace_ms {
        state.end_round(RoundOutcome::Lost(LossCause::TimedOut));
        return;
    }

    move_ghosts(state, dt_ms);
    state.check_collisions();
}

/// Each ghost whose cooldown runs out tries the six directions in random order
/// and takes the first passable one, or stays put.
fn move_ghosts(state: &mut GameState, dt_ms: f32) {
    let (min_ms, max_ms) = (state.config.ghost_move_min_ms, state.config.ghost_move_max_ms);

    for i in 0..state.ghosts.len() {
        state.ghosts[i].cooldown_ms -= dt_ms;
        if state.ghosts[i].cooldown_ms > 0.0 {
            continue;
        }
        state.ghosts[i].cooldown_ms = state.rng.range_f32(min_ms, max_ms);

        let mut dirs = Direction::ALL;
        state.rng.shuffle(&mut dirs);

        let from = state.ghosts[i].pos;
        if let Some(to) = first_passable(state, from, &dirs) {
            log::debug!("Ghost {} {:?} -> {:?}", state.ghosts[i].id, from.as_tuple(), to.as_tuple());
            state.ghosts[i].pos = to;
        }
    }
}

fn first_passable(state: &GameState, from: Cell, dirs: &[Direction]) -> Option<Cell> {
    dirs.iter().find_map(|&dir| {
        state
            .grid
            .step(from, dir)
            .filter(|&to| state.grid.is_passable(from, to))
    })
}
