//! Fixed timestep simulation tick
//!
//! One tick runs, in order: physics, pipe stream, collisions and scoring,
//! then the feedback countdowns. After game over only physics keeps running,
//! so the bird visibly drops while everything else freezes.

use super::collision;
use super::physics;
use super::rng::RandomSource;
use super::state::{GameEvent, GameOverCause, SessionState};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump pressed since the last tick (edge-triggered)
    pub jump: bool,
    /// Demo mode - the simulation flies itself
    pub autopilot: bool,
}

/// Advance the session by one tick, returning what happened
pub fn tick(
    state: &mut SessionState,
    input: &TickInput,
    rng: &mut dyn RandomSource,
) -> Vec<GameEvent> {
    let mut events = Vec::new();
    let running = !state.is_game_over();

    let jump = running && (input.jump || (input.autopilot && autopilot_wants_jump(state)));

    state.time_ticks += 1;

    if jump {
        physics::jump(&mut state.player, state.profile.jump_impulse);
        events.push(GameEvent::Jumped);
    }
    physics::integrate(&mut state.player, state.profile.gravity);

    if running {
        state.advance_obstacles(rng);
        evaluate(state, &mut events);
    }

    state.player.invincibility = state.player.invincibility.saturating_sub(1);
    state.screen_shake = state.screen_shake.saturating_sub(1);

    events
}

/// Pipe collisions, pass scoring, then the boundary rule
fn evaluate(state: &mut SessionState, events: &mut Vec<GameEvent>) {
    let gap = state.profile.gap;
    let size = state.config.player_size;

    for i in 0..state.obstacles.len() {
        if state.is_game_over() {
            break;
        }

        if state.player.invincibility == 0
            && collision::hits_obstacle(&state.player, &state.obstacles[i], gap, &state.config)
        {
            register_hit(state, events);
            if state.is_game_over() {
                break;
            }
        }

        let obstacle = &state.obstacles[i];
        if !obstacle.passed && collision::trailing_edge_passed(obstacle, &state.config) {
            let deviation = (state.player.center(size) - obstacle.gap_center(gap)).abs();
            state.obstacles[i].passed = true;
            state.apply_pass(deviation, events);
        }
    }

    if collision::out_of_bounds(state.player.y, state.config.height)
        && state.end(GameOverCause::OutOfBounds)
    {
        events.push(GameEvent::GameOver {
            cause: GameOverCause::OutOfBounds,
        });
    }
}

/// A pipe hit: count it, maybe end the session, then grant invincibility
fn register_hit(state: &mut SessionState, events: &mut Vec<GameEvent>) {
    state.player.collisions += 1;
    events.push(GameEvent::Hit {
        collisions: state.player.collisions,
    });

    if state.player.collisions >= state.config.max_collisions && state.end(GameOverCause::Pipe) {
        events.push(GameEvent::GameOver {
            cause: GameOverCause::Pipe,
        });
    }

    state.player.invincibility = state.config.invincibility_ticks;
    state.screen_shake = state.config.shake_ticks;
}

/// Demo-mode controller.
///
/// Keeps the bird's centre oscillating in a band just under the next gap
/// centre: jump when falling and the next tick would sink below the band.
pub fn autopilot_wants_jump(state: &SessionState) -> bool {
    let profile = &state.profile;
    let size = state.config.player_size;

    let rise = profile.jump_impulse * profile.jump_impulse / (2.0 * profile.gravity);
    let aim = state
        .obstacles
        .iter()
        .find(|o| !collision::trailing_edge_passed(o, &state.config))
        .map(|o| o.gap_center(profile.gap))
        .unwrap_or(state.config.height / 2.0);
    let floor = aim + rise / 2.0;

    let next_center = state.player.center(size) + state.player.velocity + profile.gravity;
    state.player.velocity >= 0.0 && next_center > floor
}
