//! Forward projection of the ball between authoritative snapshots.
//!
//! Runs the same wall and paddle reflection rules as the server so the
//! locally rendered bounce matches what the next snapshot will show.

use game_core::systems::{collision::paddle_bounce, physics::reflect_walls};
use game_core::{Ball, Config, Side};
use glam::Vec2;

/// Project the ball forward from its snapshot position.
///
/// `vel_per_tick` is the authoritative velocity in distance per tick; it is
/// scaled by the tick rate to distance per second before extrapolating over
/// `elapsed_s`. Reflections use the currently interpolated paddle positions,
/// not the snapshot ones.
pub fn project_ball(
    pos: Vec2,
    vel_per_tick: Vec2,
    elapsed_s: f32,
    left_paddle_y: f32,
    right_paddle_y: f32,
    config: &Config,
) -> Ball {
    let vel_per_sec = vel_per_tick * config.tick_rate;
    let mut ball = Ball::new(pos + vel_per_sec * elapsed_s, vel_per_tick);

    reflect_walls(&mut ball, config);
    if !paddle_bounce(Side::Left, left_paddle_y, &mut ball, config) {
        paddle_bounce(Side::Right, right_paddle_y, &mut ball, config);
    }
    ball
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projects_along_velocity() {
        let config = Config::new();
        // 6 px/tick at 60 ticks/s is 360 px/s.
        let ball = project_ball(
            Vec2::new(100.0, 300.0),
            Vec2::new(6.0, 0.0),
            0.1,
            250.0,
            250.0,
            &config,
        );
        assert!((ball.pos.x - 136.0).abs() < 1e-3);
        assert_eq!(ball.pos.y, 300.0);
    }

    #[test]
    fn test_projection_reflects_off_ceiling() {
        let config = Config::new();
        let ball = project_ball(
            Vec2::new(400.0, 5.0),
            Vec2::new(0.0, -2.0),
            0.1,
            250.0,
            250.0,
            &config,
        );
        // 120 px/s upward for 100 ms overshoots the ceiling; clamped back.
        assert_eq!(ball.pos.y, 0.0);
        assert!(ball.vel.y > 0.0, "velocity mirrored downward");
    }

    #[test]
    fn test_projection_bounces_off_paddle() {
        let config = Config::new();
        // Heading left into the left paddle face at y=250..350.
        let ball = project_ball(
            Vec2::new(40.0, 290.0),
            Vec2::new(-6.0, 0.0),
            0.1,
            250.0,
            250.0,
            &config,
        );
        assert!(ball.vel.x > 0.0, "bounce mirrored locally");
        assert_eq!(ball.pos.x, config.paddle_width);
    }

    #[test]
    fn test_no_bounce_when_moving_away() {
        let config = Config::new();
        let ball = project_ball(
            Vec2::new(15.0, 290.0),
            Vec2::new(6.0, 0.0),
            0.0,
            250.0,
            250.0,
            &config,
        );
        assert_eq!(ball.vel.x, 6.0, "outbound ball untouched by the paddle");
    }
}
