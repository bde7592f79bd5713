use glam::Vec2;

use crate::config::Config;

/// Which side of the court a paddle defends. Left is "player1" on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Paddle component, anchored at its top edge.
#[derive(Debug, Clone, Copy)]
pub struct Paddle {
    pub side: Side,
    pub y: f32,
}

impl Paddle {
    pub fn new(side: Side, y: f32) -> Self {
        Self { side, y }
    }
}

/// Last-known directional input for a paddle. Replaced wholesale on every
/// inbound input event; latest wins, there is no queue.
#[derive(Debug, Clone, Copy, Default)]
pub struct PaddleInput {
    pub up: bool,
    pub down: bool,
}

impl PaddleInput {
    pub fn new() -> Self {
        Self::default()
    }
}

/// The ball, anchored at its top-left corner. Velocity is in
/// distance-per-tick units on the server.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self { pos, vel }
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    pub fn center_y(&self, config: &Config) -> f32 {
        self.pos.y + config.ball_size / 2.0
    }

    /// Ball in its initial serving position: centered, moving down-right.
    pub fn serve(config: &Config) -> Self {
        Self {
            pos: config.ball_spawn(),
            vel: Vec2::splat(config.ball_initial_speed),
        }
    }

    /// Re-center after a goal and serve at the initial speed with the
    /// horizontal direction reversed.
    pub fn reset_after_goal(&mut self, config: &Config) {
        let dir = if self.vel.x < 0.0 { 1.0 } else { -1.0 };
        self.pos = config.ball_spawn();
        self.vel = Vec2::new(dir * config.ball_initial_speed, config.ball_initial_speed);
    }
}
