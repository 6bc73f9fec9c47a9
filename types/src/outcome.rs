use serde::{Deserialize, Serialize};

/// Result of settling one bet.
///
/// Produced once per bet and never mutated. `raw_win` records what the game's
/// intrinsic randomness decided; `final_win` is the result after the
/// forced-loss override. The override only ever turns a win into a loss, so
/// `final_win` implies `raw_win`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BetOutcome {
    pub raw_win: bool,
    pub final_win: bool,
    /// Multiplier applied to the stake, after the payout-time cap.
    pub multiplier: f64,
    /// Amount returned to the player (0 on a loss).
    pub payout: f64,
}

impl BetOutcome {
    /// Whether the forced-loss override fired for this bet.
    pub fn forced_loss(&self) -> bool {
        self.raw_win && !self.final_win
    }
}
