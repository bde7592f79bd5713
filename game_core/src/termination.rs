use crate::components::Side;
use crate::resources::Score;

/// Result of a win-condition check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub over: bool,
    pub winner: Option<Side>,
}

impl Outcome {
    pub fn ongoing() -> Self {
        Self {
            over: false,
            winner: None,
        }
    }
}

/// Pure win evaluation: the match is over once either side reaches the
/// winning score. No win-by-two margin. The left side is tested first; both
/// sides being at or above the threshold cannot happen under single-point
/// scoring.
pub fn evaluate(score: &Score, winning_score: u8) -> Outcome {
    if score.left >= winning_score {
        Outcome {
            over: true,
            winner: Some(Side::Left),
        }
    } else if score.right >= winning_score {
        Outcome {
            over: true,
            winner: Some(Side::Right),
        }
    } else {
        Outcome::ongoing()
    }
}
