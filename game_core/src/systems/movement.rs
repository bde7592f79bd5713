use hecs::World;

use crate::components::{Paddle, PaddleInput, Side};
use crate::config::Config;
use crate::resources::Mode;

/// Apply held directional input to each manually controlled paddle.
///
/// Up is evaluated before down on the same value, so both flags held at once
/// net to zero. The result is clamped once at the end. The right paddle only
/// accepts manual movement in PVP mode; while automated its position is
/// owned by the opponent controller.
pub fn apply_inputs(world: &mut World, mode: Mode, config: &Config) {
    for (_entity, (paddle, input)) in world.query_mut::<(&mut Paddle, &PaddleInput)>() {
        if paddle.side == Side::Right && mode != Mode::Pvp {
            continue;
        }
        let mut y = paddle.y;
        if input.up {
            y -= config.player_speed;
        }
        if input.down {
            y += config.player_speed;
        }
        paddle.y = config.clamp_paddle_y(y);
    }
}
