use glam::Vec2;
use serde::Deserialize;

use crate::components::Side;

/// Game tuning parameters. Every value can be overridden from the server
/// config file without a code change.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct Config {
    // Court
    pub court_width: f32,
    pub court_height: f32,

    // Paddle
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub player_speed: f32, // distance per tick

    // Ball
    pub ball_size: f32,
    pub ball_initial_speed: f32,
    pub ball_min_speed: f32,
    pub max_bounce_angle: f32, // radians
    pub speed_variation_min: f32,
    pub speed_variation_max: f32,

    // Timing
    pub tick_rate: f32,      // simulation ticks per second
    pub broadcast_rate: f32, // snapshot broadcasts per second
    pub interpolation_window_ms: f32,

    // Match
    pub winning_score: u8,

    // Opponent controller
    pub ai_initial_delay_ms: f32,
    pub ai_reaction_min_ms: f32,
    pub ai_reaction_max_ms: f32,
    pub ai_disengage_cooldown_ms: f32,
    pub ai_perturbation: f32,
    pub ai_prediction_error: f32,
    pub ai_overshoot_chance: f32,
    pub ai_overshoot: f32,
    pub ai_skip_chance: f32,
    pub ai_speed_multiplier: f32,
    pub ai_max_speed: f32,
    pub ai_deadband: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            court_width: 800.0,
            court_height: 600.0,
            paddle_width: 20.0,
            paddle_height: 100.0,
            player_speed: 10.0,
            ball_size: 20.0,
            ball_initial_speed: 6.0,
            ball_min_speed: 6.0,
            max_bounce_angle: std::f32::consts::FRAC_PI_4,
            speed_variation_min: 0.8,
            speed_variation_max: 1.2,
            tick_rate: 60.0,
            broadcast_rate: 60.0,
            interpolation_window_ms: 50.0,
            winning_score: 11,
            ai_initial_delay_ms: 500.0,
            ai_reaction_min_ms: 50.0,
            ai_reaction_max_ms: 150.0,
            ai_disengage_cooldown_ms: 100.0,
            ai_perturbation: 30.0,
            ai_prediction_error: 50.0,
            ai_overshoot_chance: 0.15,
            ai_overshoot: 40.0,
            ai_skip_chance: 0.1,
            ai_speed_multiplier: 0.1,
            ai_max_speed: 10.0,
            ai_deadband: 5.0,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// X position of a paddle's left edge.
    pub fn paddle_x(&self, side: Side) -> f32 {
        match side {
            Side::Left => 0.0,
            Side::Right => self.court_width - self.paddle_width,
        }
    }

    /// Largest valid paddle top-edge position.
    pub fn max_paddle_y(&self) -> f32 {
        self.court_height - self.paddle_height
    }

    /// Clamp a paddle top edge to the court.
    pub fn clamp_paddle_y(&self, y: f32) -> f32 {
        y.clamp(0.0, self.max_paddle_y())
    }

    /// Paddle top edge when centered vertically.
    pub fn paddle_spawn_y(&self) -> f32 {
        self.court_height / 2.0 - self.paddle_height / 2.0
    }

    /// Ball top-left corner when centered.
    pub fn ball_spawn(&self) -> Vec2 {
        Vec2::new(
            self.court_width / 2.0 - self.ball_size / 2.0,
            self.court_height / 2.0 - self.ball_size / 2.0,
        )
    }

    pub fn tick_interval_ms(&self) -> f32 {
        1000.0 / self.tick_rate
    }

    pub fn broadcast_interval_ms(&self) -> f32 {
        1000.0 / self.broadcast_rate
    }
}
