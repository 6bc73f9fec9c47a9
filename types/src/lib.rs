//! Shared types for the Sync Network payout engine.
//!
//! Defines the per-game payout configuration (settings aggregate, validation,
//! wire format) and the bet-outcome types consumed by game UIs and the admin
//! console.

mod outcome;
mod settings;

pub use outcome::BetOutcome;
pub use settings::{
    CrashSettings, DiceSettings, Game, GameSection, GameSettings, MinesSettings, SettingsError,
    GRID_SIZES,
};
