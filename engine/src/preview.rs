//! Aggregate expected-value previews for the admin settings console.
//!
//! These are whole-game averages shown while an operator edits the
//! configuration; they are never used to settle an individual bet.

use crate::{dice_multiplier, EngineError};
use syncnet_types::{CrashSettings, DiceSettings, MinesSettings};

/// Expected value of a Mines bet, in percent of the stake.
///
/// Combines the fair whole-board multiplier, the house edge, and the
/// forced-loss chance into a single per-bet average.
pub fn mines_expected_value(settings: &MinesSettings) -> Result<f64, EngineError> {
    let grid = f64::from(settings.grid_size);
    let mines = f64::from(settings.mine_count);
    if settings.mine_count >= settings.grid_size {
        return Err(EngineError::NoSafeSquares {
            revealed: 0,
            mines: settings.mine_count,
            grid: settings.grid_size,
        });
    }
    let fair = grid / (grid - mines);
    let actual = fair * (1.0 - settings.house_edge / 100.0);
    let effective_win_chance = ((grid - mines) / grid) * (1.0 - settings.loss_chance / 100.0);
    Ok((actual * effective_win_chance - 1.0) * 100.0)
}

/// Expected value of a Dice bet at the configured win chance, in percent.
pub fn dice_expected_value(settings: &DiceSettings) -> Result<f64, EngineError> {
    let multiplier = dice_multiplier(settings, settings.win_chance)?;
    let effective_win_chance = settings.win_chance * (1.0 - settings.loss_chance / 100.0);
    Ok(((multiplier * effective_win_chance) / 100.0 - 1.0) * 100.0)
}

/// Expected value of a Crash bet: the house edge, negated.
pub fn crash_expected_value(settings: &CrashSettings) -> f64 {
    -settings.house_edge
}

/// Average crash point shown in the admin preview (`100 / crash_chance`).
pub fn crash_average_point(settings: &CrashSettings) -> Result<f64, EngineError> {
    if !(settings.crash_chance > 0.0 && settings.crash_chance <= 100.0) {
        return Err(EngineError::DegenerateCrashChance(settings.crash_chance));
    }
    Ok(100.0 / settings.crash_chance)
}
