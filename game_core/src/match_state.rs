use hecs::World;

use crate::components::{Ball, Paddle, PaddleInput, Side};
use crate::config::Config;
use crate::resources::{AiState, Clock, Events, GameRng, Mode, Phase, Score};
use crate::{create_ball, create_paddle, step};

/// Read-only projection of the authoritative match state, emitted to
/// subscribers. A transient value with no identity beyond its tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    pub tick: u64,
    pub left_paddle_y: f32,
    pub right_paddle_y: f32,
    pub ball_x: f32,
    pub ball_y: f32,
    pub ball_vx: f32,
    pub ball_vy: f32,
    pub score: Score,
    pub mode: Mode,
    pub phase: Phase,
    pub winner: Option<Side>,
}

/// The authoritative match. Sole mutator of the world and its resources;
/// every external mutation funnels through here so the clamping and
/// win-check invariants hold after every call.
pub struct MatchState {
    world: World,
    config: Config,
    clock: Clock,
    score: Score,
    mode: Mode,
    phase: Phase,
    winner: Option<Side>,
    ai: AiState,
    events: Events,
    rng: GameRng,
}

impl MatchState {
    pub fn new(config: Config, seed: u64) -> Self {
        let mut world = World::new();
        let spawn_y = config.paddle_spawn_y();
        create_paddle(&mut world, Side::Left, spawn_y);
        create_paddle(&mut world, Side::Right, spawn_y);
        let ball = Ball::serve(&config);
        create_ball(&mut world, ball.pos, ball.vel);
        let ai = AiState::new(&config);

        Self {
            world,
            config,
            clock: Clock::new(),
            score: Score::new(),
            mode: Mode::default(),
            phase: Phase::default(),
            winner: None,
            ai,
            events: Events::new(),
            rng: GameRng::new(seed),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn events(&self) -> Events {
        self.events
    }

    /// Advance the simulation by one fixed tick. A no-op unless Playing;
    /// returns whether a step actually ran.
    pub fn tick(&mut self) -> bool {
        if self.phase != Phase::Playing {
            return false;
        }

        let winner = step(
            &mut self.world,
            &mut self.clock,
            &self.config,
            self.mode,
            &mut self.score,
            &mut self.events,
            &mut self.ai,
            &mut self.rng,
        );

        if let Some(side) = winner {
            self.phase = Phase::Finished;
            self.winner = Some(side);
            self.events.finished = Some(side);
        }
        true
    }

    /// Replace a side's held input wholesale. Input for the automated side
    /// is silently dropped outside PVP mode.
    pub fn set_input(&mut self, side: Side, up: bool, down: bool) {
        if side == Side::Right && self.mode != Mode::Pvp {
            return;
        }
        for (_e, (paddle, input)) in self.world.query_mut::<(&Paddle, &mut PaddleInput)>() {
            if paddle.side == side {
                *input = PaddleInput { up, down };
            }
        }
    }

    /// Set a paddle to an absolute position (administrative surface).
    /// Clamped to the court; returns the applied position, or None when the
    /// side is automated and the move is rejected.
    pub fn move_paddle(&mut self, side: Side, y: f32) -> Option<f32> {
        if side == Side::Right && self.mode != Mode::Pvp {
            return None;
        }
        let clamped = self.config.clamp_paddle_y(y);
        for (_e, paddle) in self.world.query_mut::<&mut Paddle>() {
            if paddle.side == side {
                paddle.y = clamped;
            }
        }
        Some(clamped)
    }

    /// Switch mode: resets score and ball and re-arms the opponent
    /// controller. A finished match drops back to Waiting.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.score.reset();
        self.reset_ball();
        self.ai.reset(self.clock.now_ms, &self.config);
        if self.phase == Phase::Finished {
            self.phase = Phase::Waiting;
            self.winner = None;
        }
    }

    pub fn increment_score(&mut self, side: Side) {
        self.score.increment(side);
    }

    /// Re-center paddles and ball, zero the score, keep the mode.
    pub fn reset(&mut self) {
        let spawn_y = self.config.paddle_spawn_y();
        for (_e, paddle) in self.world.query_mut::<&mut Paddle>() {
            paddle.y = spawn_y;
        }
        for (_e, input) in self.world.query_mut::<&mut PaddleInput>() {
            *input = PaddleInput::new();
        }
        self.reset_ball();
        self.score.reset();
        self.phase = Phase::Waiting;
        self.winner = None;
        self.ai.reset(self.clock.now_ms, &self.config);
    }

    /// Request a phase transition. Only transitions of the lifecycle state
    /// machine are applied (WAITING -> PLAYING <-> PAUSED -> WAITING);
    /// anything else is ignored. Returns whether the transition was applied.
    pub fn set_phase(&mut self, requested: Phase) -> bool {
        let allowed = matches!(
            (self.phase, requested),
            (Phase::Waiting, Phase::Playing)
                | (Phase::Playing, Phase::Paused)
                | (Phase::Paused, Phase::Playing)
                | (Phase::Playing, Phase::Waiting)
                | (Phase::Paused, Phase::Waiting)
        );
        if allowed {
            self.phase = requested;
        }
        allowed
    }

    pub fn snapshot(&self) -> Snapshot {
        let (ball_x, ball_y, ball_vx, ball_vy) = self
            .world
            .query::<&Ball>()
            .iter()
            .next()
            .map(|(_e, b)| (b.pos.x, b.pos.y, b.vel.x, b.vel.y))
            .unwrap_or((0.0, 0.0, 0.0, 0.0));

        Snapshot {
            tick: self.clock.tick,
            left_paddle_y: self.paddle_y(Side::Left),
            right_paddle_y: self.paddle_y(Side::Right),
            ball_x,
            ball_y,
            ball_vx,
            ball_vy,
            score: self.score,
            mode: self.mode,
            phase: self.phase,
            winner: self.winner,
        }
    }

    pub fn paddle_y(&self, side: Side) -> f32 {
        self.world
            .query::<&Paddle>()
            .iter()
            .find(|(_e, p)| p.side == side)
            .map(|(_e, p)| p.y)
            .unwrap_or_else(|| self.config.paddle_spawn_y())
    }

    pub fn ball(&self) -> Option<Ball> {
        self.world.query::<&Ball>().iter().next().map(|(_e, b)| *b)
    }

    fn reset_ball(&mut self) {
        let serve = Ball::serve(&self.config);
        for (_e, ball) in self.world.query_mut::<&mut Ball>() {
            *ball = serve;
        }
    }

    /// Overwrite the ball state directly. A seam for tests and scripted
    /// scenarios; normal play never calls this and it is not part of the
    /// manager's mutator contract.
    #[doc(hidden)]
    pub fn place_ball(&mut self, new_ball: Ball) {
        for (_e, ball) in self.world.query_mut::<&mut Ball>() {
            *ball = new_ball;
        }
    }

    #[cfg(test)]
    pub(crate) fn set_score(&mut self, left: u8, right: u8) {
        self.score = Score { left, right };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn playing_match() -> MatchState {
        let mut m = MatchState::new(Config::new(), 7);
        assert!(m.set_phase(Phase::Playing));
        m
    }

    #[test]
    fn test_initial_snapshot() {
        let m = MatchState::new(Config::new(), 7);
        let snap = m.snapshot();
        assert_eq!(snap.phase, Phase::Waiting);
        assert_eq!(snap.mode, Mode::Pvp);
        assert_eq!(snap.score, Score::new());
        assert_eq!(snap.left_paddle_y, 250.0);
        assert_eq!(snap.right_paddle_y, 250.0);
        assert_eq!(snap.ball_x, 390.0);
        assert_eq!(snap.ball_y, 290.0);
        assert!(snap.winner.is_none());
    }

    #[test]
    fn test_tick_noop_unless_playing() {
        let mut m = MatchState::new(Config::new(), 7);
        let before = m.snapshot();
        m.tick();
        assert_eq!(m.snapshot(), before, "Waiting match does not advance");

        m.set_phase(Phase::Playing);
        m.set_phase(Phase::Paused);
        m.tick();
        assert_eq!(m.snapshot().tick, before.tick, "Paused match does not advance");
    }

    #[test]
    fn test_tick_moves_ball() {
        let mut m = playing_match();
        let before = m.snapshot();
        m.tick();
        let after = m.snapshot();
        assert_eq!(after.tick, before.tick + 1);
        assert_eq!(after.ball_x, before.ball_x + before.ball_vx);
        assert_eq!(after.ball_y, before.ball_y + before.ball_vy);
    }

    #[test]
    fn test_move_paddle_clamps() {
        let mut m = playing_match();
        assert_eq!(m.move_paddle(Side::Left, -50.0), Some(0.0));
        assert_eq!(m.move_paddle(Side::Left, 5000.0), Some(500.0));
        assert_eq!(m.paddle_y(Side::Left), 500.0);
    }

    #[test]
    fn test_move_automated_paddle_rejected() {
        let mut m = playing_match();
        m.set_mode(Mode::VsAi);
        let before = m.paddle_y(Side::Right);
        assert_eq!(m.move_paddle(Side::Right, 100.0), None);
        assert_eq!(m.paddle_y(Side::Right), before, "no change on rejection");
        assert_eq!(m.move_paddle(Side::Left, 100.0), Some(100.0));
    }

    #[test]
    fn test_input_for_automated_side_dropped() {
        let mut m = playing_match();
        m.set_mode(Mode::VsAi);
        m.set_phase(Phase::Playing);
        m.set_input(Side::Right, true, false);
        let before = m.paddle_y(Side::Right);
        // Ball on the player half keeps the controller idle.
        m.place_ball(Ball::new(Vec2::new(100.0, 300.0), Vec2::new(-6.0, 0.0)));
        m.tick();
        assert_eq!(m.paddle_y(Side::Right), before);
    }

    #[test]
    fn test_set_mode_resets_score_and_ball() {
        let mut m = playing_match();
        m.increment_score(Side::Left);
        m.place_ball(Ball::new(Vec2::new(100.0, 100.0), Vec2::new(-6.0, 2.0)));
        m.set_mode(Mode::VsAi);
        let snap = m.snapshot();
        assert_eq!(snap.score, Score::new());
        assert_eq!(snap.ball_x, 390.0);
        assert_eq!(snap.mode, Mode::VsAi);
        assert_eq!(snap.phase, Phase::Playing, "mode change keeps a live phase");
    }

    #[test]
    fn test_finish_freezes_simulation() {
        let mut m = playing_match();
        m.set_score(10, 7);
        // Ball about to exit the right edge: left scores the winning point.
        m.place_ball(Ball::new(Vec2::new(799.0, 300.0), Vec2::new(6.0, 0.0)));
        m.tick();
        let snap = m.snapshot();
        assert_eq!(snap.phase, Phase::Finished);
        assert_eq!(snap.winner, Some(Side::Left));
        assert_eq!(snap.score.left, 11);

        // Frozen: further ticks change nothing.
        let frozen = m.snapshot();
        for _ in 0..10 {
            m.tick();
        }
        assert_eq!(m.snapshot(), frozen);
    }

    #[test]
    fn test_reset_after_finish() {
        let mut m = playing_match();
        m.set_score(11, 3);
        m.tick();
        m.set_score(11, 3);
        m.reset();
        let snap = m.snapshot();
        assert_eq!(snap.phase, Phase::Waiting);
        assert_eq!(snap.score, Score::new());
        assert!(snap.winner.is_none());
        assert_eq!(snap.left_paddle_y, 250.0);
        assert_eq!(snap.mode, Mode::Pvp, "mode preserved across reset");
    }

    #[test]
    fn test_phase_transitions() {
        let mut m = MatchState::new(Config::new(), 7);
        assert!(!m.set_phase(Phase::Paused), "cannot pause before start");
        assert!(m.set_phase(Phase::Playing));
        assert!(m.set_phase(Phase::Paused));
        assert!(m.set_phase(Phase::Playing));
        assert!(m.set_phase(Phase::Waiting));
        assert!(!m.set_phase(Phase::Finished), "finish is never external");
    }

    #[test]
    fn test_set_mode_lifts_finished_match() {
        let mut m = playing_match();
        m.set_score(11, 0);
        m.tick();
        m.set_score(11, 0);
        // tick() with a stale winning score finishes the match.
        assert_eq!(m.phase(), Phase::Finished);
        m.set_mode(Mode::Pvp);
        assert_eq!(m.phase(), Phase::Waiting);
        assert!(m.snapshot().winner.is_none());
    }
}
