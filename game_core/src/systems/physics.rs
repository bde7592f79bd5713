use hecs::World;

use crate::components::{Ball, Side};
use crate::config::Config;
use crate::resources::Events;

/// Integrate the ball one tick forward. No bounds checking here.
pub fn advance(ball: &mut Ball) {
    ball.pos += ball.vel;
}

/// Reflect the ball off the top/bottom walls, clamping it back into the
/// court. Elastic on the vertical axis: |vy| is preserved, only the sign
/// flips. Returns true if a wall was hit.
pub fn reflect_walls(ball: &mut Ball, config: &Config) -> bool {
    let max_y = config.court_height - config.ball_size;
    if ball.pos.y <= 0.0 {
        ball.pos.y = 0.0;
        ball.vel.y = ball.vel.y.abs();
        true
    } else if ball.pos.y >= max_y {
        ball.pos.y = max_y;
        ball.vel.y = -ball.vel.y.abs();
        true
    } else {
        false
    }
}

/// Which side scores if the ball has crossed a goal line, if any.
pub fn detect_goal(ball: &Ball, config: &Config) -> Option<Side> {
    if ball.pos.x < 0.0 {
        Some(Side::Right)
    } else if ball.pos.x > config.court_width {
        Some(Side::Left)
    } else {
        None
    }
}

/// World wrapper: advance the ball and resolve wall contact.
pub fn move_ball(world: &mut World, config: &Config, events: &mut Events) {
    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        advance(ball);
        if reflect_walls(ball, config) {
            events.ball_hit_wall = true;
        }
    }
}
