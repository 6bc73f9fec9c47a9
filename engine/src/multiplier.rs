//! Per-bet multiplier calculation.
//!
//! Converts a game's configuration and the player's chosen risk parameter
//! into the payable multiplier: the reciprocal of the win probability with the
//! house edge shaved off. All functions are pure and reject degenerate input
//! instead of returning `Infinity` or `NaN`.

use crate::EngineError;
use syncnet_types::{DiceSettings, MinesSettings};

/// Probability that the next reveal is safe after `revealed` safe cells.
///
/// `(safe - revealed) / (grid - revealed)`; strictly decreases as reveals
/// accumulate. Errors once every safe square is already revealed.
pub fn mines_win_probability(
    settings: &MinesSettings,
    revealed: u8,
) -> Result<f64, EngineError> {
    let grid = i32::from(settings.grid_size);
    let mines = i32::from(settings.mine_count);
    let revealed_cells = i32::from(revealed);
    let safe = grid - mines;
    if safe - revealed_cells <= 0 {
        return Err(EngineError::NoSafeSquares {
            revealed,
            mines: settings.mine_count,
            grid: settings.grid_size,
        });
    }
    Ok(f64::from(safe - revealed_cells) / f64::from(grid - revealed_cells))
}

/// Multiplier owed after `revealed` successful safe reveals.
///
/// Exactly 1.0 at zero reveals (no profit, no loss); from the first reveal on,
/// `1 / win_probability * (1 - house_edge / 100)`. Strictly increases with
/// each successful reveal for fixed settings.
pub fn mines_multiplier(settings: &MinesSettings, revealed: u8) -> Result<f64, EngineError> {
    if revealed == 0 {
        return Ok(1.0);
    }
    let win_probability = mines_win_probability(settings, revealed)?;
    Ok((1.0 / win_probability) * (1.0 - settings.house_edge / 100.0))
}

/// Dice multiplier for a win chance `win_chance` (percent, exclusive 0..100).
///
/// `100 / win_chance * (1 - house_edge / 100)`.
pub fn dice_multiplier(settings: &DiceSettings, win_chance: f64) -> Result<f64, EngineError> {
    if !(win_chance > 0.0 && win_chance < 100.0) {
        return Err(EngineError::DegenerateWinChance(win_chance));
    }
    let fair = 100.0 / win_chance;
    Ok(fair * (1.0 - settings.house_edge / 100.0))
}
