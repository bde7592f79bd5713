use hecs::World;

use crate::components::{Ball, Paddle, Side};
use crate::config::Config;
use crate::resources::{Events, GameRng};

/// Deterministic paddle reflection, shared by the server systems and the
/// client prediction so both derive the same bounce from the same inputs.
///
/// Overlap is an AABB test restricted to the paddle's edge-facing half-plane:
/// the ball must be moving toward the paddle, otherwise no collision is
/// applied (prevents a double bounce within one tick). On contact the
/// outgoing angle is proportional to where the ball struck the paddle, up to
/// `max_bounce_angle`, the speed is floored at `ball_min_speed`, and the
/// ball is repositioned flush against the paddle edge to prevent tunneling.
///
/// Returns true if a bounce was applied.
pub fn paddle_bounce(side: Side, paddle_y: f32, ball: &mut Ball, config: &Config) -> bool {
    let moving_toward = match side {
        Side::Left => ball.vel.x < 0.0,
        Side::Right => ball.vel.x > 0.0,
    };
    if !moving_toward {
        return false;
    }

    let paddle_x = config.paddle_x(side);
    let ball_left = ball.pos.x;
    let ball_right = ball.pos.x + config.ball_size;
    let in_x_range = ball_right >= paddle_x && ball_left <= paddle_x + config.paddle_width;

    let ball_top = ball.pos.y;
    let ball_bottom = ball.pos.y + config.ball_size;
    let in_y_range = ball_bottom > paddle_y && ball_top < paddle_y + config.paddle_height;

    if !(in_x_range && in_y_range) {
        return false;
    }

    let paddle_center = paddle_y + config.paddle_height / 2.0;
    let offset =
        ((ball.center_y(config) - paddle_center) / (config.paddle_height / 2.0)).clamp(-1.0, 1.0);
    let angle = offset * config.max_bounce_angle;
    let speed = ball.speed().max(config.ball_min_speed);

    let vx = (angle.cos() * speed).abs();
    ball.vel.x = match side {
        Side::Left => vx,
        Side::Right => -vx,
    };
    ball.vel.y = angle.sin() * speed;

    // Flush against the paddle edge.
    ball.pos.x = match side {
        Side::Left => paddle_x + config.paddle_width,
        Side::Right => paddle_x - config.ball_size,
    };

    true
}

/// World wrapper: resolve paddle collisions for both sides, then apply the
/// server-only bounded random speed variation. The minimum-speed floor is
/// re-applied afterwards so the variation can never drop the ball below it.
pub fn resolve_paddles(world: &mut World, config: &Config, events: &mut Events, rng: &mut GameRng) {
    let paddles: Vec<(Side, f32)> = world
        .query::<&Paddle>()
        .iter()
        .map(|(_e, p)| (p.side, p.y))
        .collect();

    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        for &(side, paddle_y) in &paddles {
            if paddle_bounce(side, paddle_y, ball, config) {
                let variation = rng.range(config.speed_variation_min, config.speed_variation_max);
                ball.vel *= variation;
                let speed = ball.speed();
                if speed < config.ball_min_speed {
                    ball.vel *= config.ball_min_speed / speed;
                }
                events.ball_hit_paddle = Some(side);
            }
        }
    }
}
