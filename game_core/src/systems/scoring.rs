use hecs::World;

use crate::components::Ball;
use crate::config::Config;
use crate::resources::{AiState, Clock, Events, GameRng, Score};
use crate::systems::physics::detect_goal;

/// Check for a goal and, if one occurred, credit the scorer, re-serve the
/// ball toward the scorer's side and re-roll the opponent reaction delay.
pub fn resolve_goals(
    world: &mut World,
    config: &Config,
    clock: &Clock,
    score: &mut Score,
    events: &mut Events,
    ai: &mut AiState,
    rng: &mut GameRng,
) {
    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        if let Some(scorer) = detect_goal(ball, config) {
            score.increment(scorer);
            events.goal = Some(scorer);
            ball.reset_after_goal(config);
            ai.reroll(clock.now_ms, rng, config);
        }
    }
}
