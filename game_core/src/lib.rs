pub mod components;
pub mod config;
pub mod match_state;
pub mod resources;
pub mod systems;
pub mod termination;

pub use components::*;
pub use config::Config;
pub use match_state::{MatchState, Snapshot};
pub use resources::*;
pub use termination::{evaluate, Outcome};

use hecs::{Entity, World};

pub fn create_paddle(world: &mut World, side: Side, y: f32) -> Entity {
    world.spawn((Paddle { side, y }, PaddleInput::new()))
}

pub fn create_ball(world: &mut World, pos: glam::Vec2, vel: glam::Vec2) -> Entity {
    world.spawn((Ball::new(pos, vel),))
}

/// Advance the simulation by one fixed tick.
///
/// Order matters: ball movement and wall bounces first, then paddle
/// movement (manual and automated), then paddle collisions against the
/// already-moved paddles, then goals, then the win check. Returns the
/// winner once a side reaches the winning score.
#[allow(clippy::too_many_arguments)]
pub fn step(
    world: &mut World,
    clock: &mut Clock,
    config: &Config,
    mode: Mode,
    score: &mut Score,
    events: &mut Events,
    ai: &mut AiState,
    rng: &mut GameRng,
) -> Option<Side> {
    events.clear();
    clock.advance(config.tick_interval_ms());

    systems::move_ball(world, config, events);
    systems::apply_inputs(world, mode, config);
    systems::drive_opponent(world, mode, clock, config, ai, rng);
    systems::resolve_paddles(world, config, events, rng);
    systems::resolve_goals(world, config, clock, score, events, ai, rng);

    let outcome = evaluate(score, config.winning_score);
    if outcome.over {
        events.finished = outcome.winner;
    }
    outcome.winner
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    struct Harness {
        world: World,
        clock: Clock,
        config: Config,
        score: Score,
        events: Events,
        ai: AiState,
        rng: GameRng,
    }

    impl Harness {
        fn new() -> Self {
            let config = Config::new();
            let mut world = World::new();
            create_paddle(&mut world, Side::Left, config.paddle_spawn_y());
            create_paddle(&mut world, Side::Right, config.paddle_spawn_y());
            let ball = Ball::serve(&config);
            create_ball(&mut world, ball.pos, ball.vel);
            let ai = AiState::new(&config);
            Self {
                world,
                clock: Clock::new(),
                config,
                score: Score::new(),
                events: Events::new(),
                ai,
                rng: GameRng::new(42),
            }
        }

        fn step(&mut self, mode: Mode) -> Option<Side> {
            step(
                &mut self.world,
                &mut self.clock,
                &self.config,
                mode,
                &mut self.score,
                &mut self.events,
                &mut self.ai,
                &mut self.rng,
            )
        }

        fn ball(&self) -> Ball {
            self.world
                .query::<&Ball>()
                .iter()
                .next()
                .map(|(_e, b)| *b)
                .unwrap()
        }
    }

    #[test]
    fn test_step_advances_clock_and_ball() {
        let mut h = Harness::new();
        let before = h.ball();
        assert_eq!(h.step(Mode::Pvp), None);
        assert_eq!(h.clock.tick, 1);
        assert!((h.clock.now_ms - 1000.0 / 60.0).abs() < 1e-6);
        assert_eq!(h.ball().pos, before.pos + before.vel);
    }

    #[test]
    fn test_step_reports_winner() {
        let mut h = Harness::new();
        h.score = Score { left: 10, right: 4 };
        for (_e, ball) in h.world.query_mut::<&mut Ball>() {
            *ball = Ball::new(Vec2::new(799.0, 300.0), Vec2::new(6.0, 0.0));
        }
        let winner = h.step(Mode::Pvp);
        assert_eq!(winner, Some(Side::Left));
        assert_eq!(h.events.finished, Some(Side::Left));
        assert_eq!(h.score.left, 11);
    }

    #[test]
    fn test_events_cleared_each_step() {
        let mut h = Harness::new();
        h.events.ball_hit_wall = true;
        h.events.goal = Some(Side::Left);
        h.step(Mode::Pvp);
        assert!(!h.events.ball_hit_wall);
        assert!(h.events.goal.is_none());
    }
}
