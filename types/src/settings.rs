use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error as ThisError;

/// Grid sizes the Mines board supports (4x4, 5x5, 6x6).
pub const GRID_SIZES: [u8; 3] = [16, 25, 36];

/// Validation failure for a settings write.
///
/// Raised at the write boundary; out-of-range values are rejected, never
/// clamped. Messages carry the wire-format field name so the admin console can
/// point at the offending input.
#[derive(Clone, Debug, PartialEq, ThisError)]
pub enum SettingsError {
    #[error("{field} must be within 0..=100 (got {got})")]
    PercentOutOfRange { field: &'static str, got: f64 },
    #[error("{field} must be strictly between 0 and 100 (got {got})")]
    DegenerateChance { field: &'static str, got: f64 },
    #[error("{field} must be positive (got {got})")]
    NonPositiveMultiplier { field: &'static str, got: f64 },
    #[error("mines.gridSize must be 16, 25, or 36 (got {0})")]
    UnsupportedGridSize(u8),
    #[error("mines.mineCount must be within 1..={max} on a {grid} cell grid (got {got})")]
    MineCountOutOfRange { got: u8, max: u8, grid: u8 },
}

fn check_percent(field: &'static str, got: f64) -> Result<(), SettingsError> {
    if (0.0..=100.0).contains(&got) {
        Ok(())
    } else {
        Err(SettingsError::PercentOutOfRange { field, got })
    }
}

fn check_multiplier(field: &'static str, got: f64) -> Result<(), SettingsError> {
    if got.is_finite() && got > 0.0 {
        Ok(())
    } else {
        Err(SettingsError::NonPositiveMultiplier { field, got })
    }
}

/// Game identifiers for the payout engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Game {
    Mines,
    Dice,
    Crash,
}

impl Game {
    pub fn as_str(&self) -> &'static str {
        match self {
            Game::Mines => "mines",
            Game::Dice => "dice",
            Game::Crash => "crash",
        }
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mines payout configuration.
///
/// `loss_chance` is an additional per-reveal probability of forcing a loss on
/// top of the board's intrinsic odds; it only ever converts a win into a loss.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MinesSettings {
    /// Percentage subtracted from the fair payout.
    pub house_edge: f64,
    /// Mines hidden on the board (must leave at least one safe square).
    pub mine_count: u8,
    /// Total cells on the board (16, 25, or 36).
    pub grid_size: u8,
    /// Payout-time cap on the multiplier.
    pub max_multiplier: f64,
    /// Forced-loss chance applied after every successful reveal.
    pub loss_chance: f64,
}

impl Default for MinesSettings {
    fn default() -> Self {
        Self {
            house_edge: 1.0,
            mine_count: 5,
            grid_size: 25,
            max_multiplier: 100.0,
            loss_chance: 5.0,
        }
    }
}

impl MinesSettings {
    /// Number of cells on the board that do not hold a mine.
    pub fn safe_squares(&self) -> u8 {
        self.grid_size.saturating_sub(self.mine_count)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        check_percent("mines.houseEdge", self.house_edge)?;
        check_percent("mines.lossChance", self.loss_chance)?;
        check_multiplier("mines.maxMultiplier", self.max_multiplier)?;
        if !GRID_SIZES.contains(&self.grid_size) {
            return Err(SettingsError::UnsupportedGridSize(self.grid_size));
        }
        if self.mine_count == 0 || self.mine_count >= self.grid_size {
            return Err(SettingsError::MineCountOutOfRange {
                got: self.mine_count,
                max: self.grid_size - 1,
                grid: self.grid_size,
            });
        }
        Ok(())
    }
}

/// Dice payout configuration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiceSettings {
    /// Percentage subtracted from the fair payout.
    pub house_edge: f64,
    /// Default win chance shown in the admin preview (exclusive 0..100).
    pub win_chance: f64,
    /// Payout-time cap on the multiplier.
    pub max_multiplier: f64,
    /// Forced-loss chance applied after a winning roll.
    pub loss_chance: f64,
}

impl Default for DiceSettings {
    fn default() -> Self {
        Self {
            house_edge: 1.0,
            win_chance: 49.0,
            max_multiplier: 98.0,
            loss_chance: 3.0,
        }
    }
}

impl DiceSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        check_percent("dice.houseEdge", self.house_edge)?;
        check_percent("dice.lossChance", self.loss_chance)?;
        check_multiplier("dice.maxMultiplier", self.max_multiplier)?;
        // A 0% win chance divides by zero in the multiplier formula and a 100%
        // chance pays out unconditionally, so both ends are excluded.
        if !(self.win_chance > 0.0 && self.win_chance < 100.0) {
            return Err(SettingsError::DegenerateChance {
                field: "dice.winChance",
                got: self.win_chance,
            });
        }
        Ok(())
    }
}

/// Crash payout configuration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrashSettings {
    /// Percentage subtracted from the fair payout.
    pub house_edge: f64,
    /// Per-tick crash probability, drives the average crash point display.
    pub crash_chance: f64,
    /// Payout-time cap on the multiplier.
    pub max_multiplier: f64,
}

impl Default for CrashSettings {
    fn default() -> Self {
        Self {
            house_edge: 1.0,
            crash_chance: 1.0,
            max_multiplier: 100.0,
        }
    }
}

impl CrashSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        check_percent("crash.houseEdge", self.house_edge)?;
        check_multiplier("crash.maxMultiplier", self.max_multiplier)?;
        // Zero would make the average-crash-point display divide by zero.
        if !(self.crash_chance > 0.0 && self.crash_chance <= 100.0) {
            return Err(SettingsError::DegenerateChance {
                field: "crash.crashChance",
                got: self.crash_chance,
            });
        }
        Ok(())
    }
}

/// Aggregate payout configuration for every game.
///
/// One global configuration applies to all players. Admin updates replace the
/// whole aggregate; last writer wins. The wire format matches the JSON
/// document the platform already persists under its settings key, so field
/// names are camelCase.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct GameSettings {
    #[serde(rename = "minesSettings")]
    pub mines: MinesSettings,
    #[serde(rename = "diceSettings")]
    pub dice: DiceSettings,
    #[serde(rename = "crashSettings")]
    pub crash: CrashSettings,
}

impl GameSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        self.mines.validate()?;
        self.dice.validate()?;
        self.crash.validate()
    }

    /// Extract the sub-config for one game.
    pub fn section(&self, game: Game) -> GameSection {
        match game {
            Game::Mines => GameSection::Mines(self.mines),
            Game::Dice => GameSection::Dice(self.dice),
            Game::Crash => GameSection::Crash(self.crash),
        }
    }

    /// Replace the sub-config named by the section, leaving the others intact.
    pub fn replace_section(&mut self, section: GameSection) {
        match section {
            GameSection::Mines(s) => self.mines = s,
            GameSection::Dice(s) => self.dice = s,
            GameSection::Crash(s) => self.crash = s,
        }
    }
}

/// One game's sub-config, tagged with the game it belongs to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GameSection {
    Mines(MinesSettings),
    Dice(DiceSettings),
    Crash(CrashSettings),
}

impl GameSection {
    pub fn game(&self) -> Game {
        match self {
            GameSection::Mines(_) => Game::Mines,
            GameSection::Dice(_) => Game::Dice,
            GameSection::Crash(_) => Game::Crash,
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        match self {
            GameSection::Mines(s) => s.validate(),
            GameSection::Dice(s) => s.validate(),
            GameSection::Crash(s) => s.validate(),
        }
    }
}
