use hecs::World;

use crate::components::{Ball, Paddle, Side};
use crate::config::Config;
use crate::resources::{AiState, Clock, GameRng, Mode};

/// Drive the right paddle while the match is in VS-AI mode.
///
/// Engage/idle state machine: IDLE -> ENGAGED once the ball is on the AI
/// half and the reaction delay has elapsed; ENGAGED -> IDLE once the ball
/// returns to the player half, after a short cool-down that stops the state
/// flapping when the ball re-crosses the midline within a tick.
pub fn drive_opponent(
    world: &mut World,
    mode: Mode,
    clock: &Clock,
    config: &Config,
    ai: &mut AiState,
    rng: &mut GameRng,
) {
    if mode != Mode::VsAi {
        return;
    }

    let ball = match world.query::<&Ball>().iter().next().map(|(_e, b)| *b) {
        Some(ball) => ball,
        None => return,
    };

    let now = clock.now_ms;
    let on_ai_half = ball.pos.x >= config.court_width / 2.0;

    if !ai.engaged {
        if !on_ai_half {
            return;
        }
        if now - ai.last_transition_ms < ai.reaction_delay_ms as f64 {
            return;
        }
        ai.engaged = true;
        ai.last_transition_ms = now;
    } else if !on_ai_half {
        if now - ai.last_transition_ms >= config.ai_disengage_cooldown_ms as f64 {
            ai.engaged = false;
            ai.last_transition_ms = now;
            ai.reaction_delay_ms = config.ai_initial_delay_ms;
            return;
        }
        // Within the cool-down: keep tracking through the midline crossing.
    }

    // Occasional "thinking" pause.
    if rng.chance(config.ai_skip_chance) {
        return;
    }

    let ball_center_y = ball.center_y(config);
    let mut target_y = ball_center_y;

    // Noisy linear time-to-impact projection when the ball approaches.
    if ball.vel.x > 0.0 {
        let distance = config.court_width - config.paddle_width - ball.pos.x;
        if distance > 0.0 {
            let time_to_impact = distance / ball.vel.x;
            let prediction_error = (rng.f32() - 0.5) * config.ai_prediction_error;
            target_y = ball_center_y + ball.vel.y * time_to_impact + prediction_error;
        }
    }

    target_y += (rng.f32() - 0.5) * config.ai_perturbation * 2.0;
    if rng.chance(config.ai_overshoot_chance) {
        target_y += (rng.f32() - 0.5) * config.ai_overshoot;
    }

    for (_entity, paddle) in world.query_mut::<&mut Paddle>() {
        if paddle.side != Side::Right {
            continue;
        }
        let paddle_center = paddle.y + config.paddle_height / 2.0;
        let diff = target_y - paddle_center;
        // Deadband: hold still near the target to avoid jitter.
        if diff.abs() > config.ai_deadband {
            let speed = (diff.abs() * config.ai_speed_multiplier).min(config.ai_max_speed);
            paddle.y = config.clamp_paddle_y(paddle.y + speed.copysign(diff));
        }
    }
}
