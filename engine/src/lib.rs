//! Sync Network payout engine.
//!
//! This crate contains the payout math shared by the Mines and Dice games and
//! the admin settings console: multiplier calculation, expected-value
//! previews, the forced-loss adjudicator, per-game round helpers, and the
//! settings store.
//!
//! ## Purity requirements
//! - Multiplier calculation and adjudication are pure; randomness always comes
//!   from an injected [`rand::Rng`], never from a hidden global. The default
//!   source is presentation-tier only and can be swapped for a verifiable RNG.
//! - Outcome computation is synchronous and independent of any presentation
//!   timing (dice-roll animations are the caller's concern).
//!
//! ## Consumer contract
//! UI code reads settings through [`SettingsStore`], computes multipliers with
//! [`mines_multiplier`] / [`dice_multiplier`], and settles bets with
//! [`apply_settings`] / [`settle`] (or the [`mines`] / [`dice`] round helpers,
//! which wire those steps together).

pub mod adjudicator;
pub mod dice;
pub mod mines;
pub mod multiplier;
pub mod preview;
pub mod store;

mod error;


#[cfg(any(test, feature = "mocks"))]
pub mod mocks;

pub use adjudicator::{adjudicate, apply_settings, settle, Adjudication};
pub use dice::{BetDirection, DiceBet, DiceRoll};
pub use error::{EngineError, GameError};
pub use mines::{MinesRound, Reveal};
pub use multiplier::{dice_multiplier, mines_multiplier, mines_win_probability};
pub use preview::{
    crash_average_point, crash_expected_value, dice_expected_value, mines_expected_value,
};
pub use store::{MemoryBackend, SettingsBackend, SettingsStore, StoreError, SETTINGS_KEY};
