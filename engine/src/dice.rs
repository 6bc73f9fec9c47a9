//! Dice roll settlement.
//!
//! One bet per roll: the player picks a target in 1..=98 and a direction, the
//! roll is a uniform draw in [0, 100), and the raw result is a strict
//! comparison against the target. Adjudication (the forced-loss override)
//! uses a second, independent draw.

use crate::adjudicator::settle;
use crate::multiplier::dice_multiplier;
use crate::{EngineError, GameError};
use rand::Rng;
use syncnet_types::{BetOutcome, DiceSettings};

/// Which side of the target wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BetDirection {
    Over,
    Under,
}

/// A validated dice bet: target in 1..=98 plus a direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DiceBet {
    target: f64,
    direction: BetDirection,
}

impl DiceBet {
    pub fn new(target: f64, direction: BetDirection) -> Result<Self, GameError> {
        if !(1.0..=98.0).contains(&target) {
            return Err(GameError::TargetOutOfRange(target));
        }
        Ok(Self { target, direction })
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn direction(&self) -> BetDirection {
        self.direction
    }

    /// Win chance in percent: `100 - target` betting over, `target` betting
    /// under.
    pub fn win_chance(&self) -> f64 {
        match self.direction {
            BetDirection::Over => 100.0 - self.target,
            BetDirection::Under => self.target,
        }
    }

    /// Strict comparison of a roll against the target; landing exactly on the
    /// target loses either way.
    pub fn raw_win(&self, roll: f64) -> bool {
        match self.direction {
            BetDirection::Over => roll > self.target,
            BetDirection::Under => roll < self.target,
        }
    }
}

/// A settled roll, with the raw roll value kept for display.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DiceRoll {
    pub roll: f64,
    pub outcome: BetOutcome,
}

/// Roll once and settle the bet against the given settings snapshot.
pub fn roll<R: Rng + ?Sized>(
    settings: &DiceSettings,
    bet: &DiceBet,
    stake: f64,
    rng: &mut R,
) -> Result<DiceRoll, EngineError> {
    let multiplier = dice_multiplier(settings, bet.win_chance())?;
    let roll_value = rng.gen_range(0.0..100.0);
    let raw_win = bet.raw_win(roll_value);
    let outcome = settle(
        stake,
        multiplier,
        settings.max_multiplier,
        raw_win,
        settings.loss_chance,
        rng,
    );
    Ok(DiceRoll {
        roll: roll_value,
        outcome,
    })
}
