use crate::components::Side;
use crate::config::Config;

/// Simulation clock. Milliseconds are derived from the tick counter so the
/// core never touches the wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct Clock {
    pub tick: u64,
    pub now_ms: f64,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, dt_ms: f32) {
        self.tick += 1;
        self.now_ms += dt_ms as f64;
    }
}

/// Match score. Monotonically non-decreasing until reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub left: u8,
    pub right: u8,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, side: Side) {
        match side {
            Side::Left => self.left += 1,
            Side::Right => self.right += 1,
        }
    }

    pub fn get(&self, side: Side) -> u8 {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Whether the right side is a remote player or the opponent controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Pvp,
    VsAi,
}

/// Match lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Waiting,
    Playing,
    Paused,
    Finished,
}

/// Events that occurred during this tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct Events {
    pub ball_hit_wall: bool,
    pub ball_hit_paddle: Option<Side>,
    pub goal: Option<Side>,
    pub finished: Option<Side>,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Seeded random number generator so tests can pin outcomes.
pub struct GameRng(pub rand::rngs::StdRng);

impl GameRng {
    pub fn new(seed: u64) -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::seed_from_u64(seed))
    }

    pub fn f32(&mut self) -> f32 {
        use rand::Rng;
        self.0.gen::<f32>()
    }

    pub fn range(&mut self, lo: f32, hi: f32) -> f32 {
        use rand::Rng;
        self.0.gen_range(lo..hi)
    }

    pub fn chance(&mut self, p: f32) -> bool {
        use rand::Rng;
        self.0.gen_bool(p as f64)
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(12345)
    }
}

/// Opponent controller state. Mutated only by the AI system; reset on ball
/// reset and on mode changes.
#[derive(Debug, Clone, Copy)]
pub struct AiState {
    pub engaged: bool,
    pub last_transition_ms: f64,
    pub reaction_delay_ms: f32,
}

impl AiState {
    pub fn new(config: &Config) -> Self {
        Self {
            engaged: false,
            last_transition_ms: 0.0,
            reaction_delay_ms: config.ai_initial_delay_ms,
        }
    }

    /// Back to idle with the long initial delay (mode change, match reset).
    pub fn reset(&mut self, now_ms: f64, config: &Config) {
        self.engaged = false;
        self.last_transition_ms = now_ms;
        self.reaction_delay_ms = config.ai_initial_delay_ms;
    }

    /// Back to idle with a freshly rolled reaction delay (ball reset).
    pub fn reroll(&mut self, now_ms: f64, rng: &mut GameRng, config: &Config) {
        self.reset(now_ms, config);
        self.reaction_delay_ms = rng.range(config.ai_reaction_min_ms, config.ai_reaction_max_ms);
    }
}
