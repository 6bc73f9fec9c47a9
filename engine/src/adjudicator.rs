//! Forced-loss adjudication.
//!
//! Decides the final win/loss for one bet by combining the game's intrinsic
//! randomness with the configured forced-loss chance. The override is
//! one-directional: it only ever removes wins. A genuine loss is never turned
//! into a win, and the forced-loss draw is a fresh uniform sample independent
//! of whatever draw produced the raw outcome.

use rand::Rng;
use syncnet_types::BetOutcome;

/// Terminal classification of one bet.
///
/// `ForcedLoss` is kept distinct from `NaturalLoss` so Mines can present a
/// forced loss exactly like a mine hit while leaving the revealed cell
/// logically mine-free.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Adjudication {
    Win,
    NaturalLoss,
    ForcedLoss,
}

impl Adjudication {
    pub fn is_win(self) -> bool {
        matches!(self, Adjudication::Win)
    }
}

/// Classify a raw outcome under the configured forced-loss chance.
///
/// `loss_chance` is a percentage in `[0, 100]`. The draw happens only when a
/// nominal win is on the table.
pub fn adjudicate<R: Rng + ?Sized>(
    raw_win: bool,
    loss_chance: f64,
    rng: &mut R,
) -> Adjudication {
    if !raw_win {
        return Adjudication::NaturalLoss;
    }
    if loss_chance > 0.0 {
        let draw = rng.gen_range(0.0..100.0);
        if draw < loss_chance {
            return Adjudication::ForcedLoss;
        }
    }
    Adjudication::Win
}

/// Final win/loss for one bet (the consumer-facing form of [`adjudicate`]).
pub fn apply_settings<R: Rng + ?Sized>(raw_win: bool, loss_chance: f64, rng: &mut R) -> bool {
    adjudicate(raw_win, loss_chance, rng).is_win()
}

/// Settle one bet: adjudicate, cap the multiplier, and compute the payout.
pub fn settle<R: Rng + ?Sized>(
    stake: f64,
    multiplier: f64,
    max_multiplier: f64,
    raw_win: bool,
    loss_chance: f64,
    rng: &mut R,
) -> BetOutcome {
    let adjudication = adjudicate(raw_win, loss_chance, rng);
    let capped = multiplier.min(max_multiplier);
    let final_win = adjudication.is_win();
    BetOutcome {
        raw_win,
        final_win,
        multiplier: capped,
        payout: if final_win { stake * capped } else { 0.0 },
    }
}
