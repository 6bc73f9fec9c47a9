//! Trial runner for the payout engine.
//!
//! Drives the engine the way a game UI would (settings snapshot per bet,
//! multiplier, adjudication) for a configurable number of trials, and
//! reports observed return-to-player against the configured expected value.

use anyhow::Result;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use syncnet_engine::store::{SettingsBackend, SettingsStore};
use syncnet_engine::{dice, BetDirection, DiceBet, MinesRound, Reveal};
use syncnet_types::Game;
use tracing::info;

/// One simulation run.
#[derive(Clone, Copy, Debug)]
pub struct TrialConfig {
    pub game: Game,
    pub trials: u64,
    /// Stake per bet.
    pub bet: f64,
    pub seed: u64,
    /// Safe reveals a Mines trial attempts before cashing out.
    pub mines_reveals: u8,
}

impl Default for TrialConfig {
    fn default() -> Self {
        Self {
            game: Game::Dice,
            trials: 10_000,
            bet: 1.0,
            seed: 0,
            mines_reveals: 3,
        }
    }
}

/// Aggregate result of a run.
#[derive(Clone, Copy, Debug, Default)]
pub struct TrialReport {
    pub trials: u64,
    pub wagered: f64,
    pub returned: f64,
    pub wins: u64,
    pub forced_losses: u64,
}

impl TrialReport {
    /// Observed return-to-player (returned / wagered).
    pub fn rtp(&self) -> f64 {
        if self.wagered == 0.0 {
            return 0.0;
        }
        self.returned / self.wagered
    }
}

/// Run the configured number of trials against the given store.
pub async fn run<B: SettingsBackend>(
    config: TrialConfig,
    store: &SettingsStore<B>,
) -> Result<TrialReport> {
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let mut report = TrialReport {
        trials: config.trials,
        ..Default::default()
    };

    for trial in 0..config.trials {
        match config.game {
            Game::Dice => {
                let settings = store.get_dice().await;
                let bet = DiceBet::new(50.0, BetDirection::Over)?;
                let result = dice::roll(&settings, &bet, config.bet, &mut rng)?;
                report.wagered += config.bet;
                report.returned += result.outcome.payout;
                if result.outcome.final_win {
                    report.wins += 1;
                }
                if result.outcome.forced_loss() {
                    report.forced_losses += 1;
                }
            }
            Game::Mines => {
                let settings = store.get_mines().await;
                let mut round = MinesRound::new(settings, &mut rng)?;
                report.wagered += config.bet;
                let mut lost = false;
                let mut forced = false;
                for _ in 0..config.mines_reveals {
                    // Naive strategy: reveal the lowest untouched cell.
                    let Some(cell) =
                        (0..settings.grid_size).find(|c| !round.revealed().contains(c))
                    else {
                        break;
                    };
                    match round.reveal(cell, &mut rng)? {
                        Reveal::Safe { .. } => {}
                        Reveal::Cleared { .. } => break,
                        Reveal::MineHit => {
                            lost = true;
                            break;
                        }
                        Reveal::ForcedLoss => {
                            lost = true;
                            forced = true;
                            break;
                        }
                    }
                }
                if forced {
                    report.forced_losses += 1;
                }
                if !lost {
                    let multiplier = round.multiplier().min(settings.max_multiplier);
                    report.returned += config.bet * multiplier;
                    report.wins += 1;
                }
            }
            Game::Crash => {
                anyhow::bail!("crash is preview-only; no playable round to simulate");
            }
        }

        if trial > 0 && trial % 100_000 == 0 {
            info!(trial, rtp = report.rtp(), "simulation progress");
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use syncnet_engine::store::MemoryBackend;
    use syncnet_engine::{dice_expected_value, mines_expected_value};
    use syncnet_types::{DiceSettings, GameSection};

    #[tokio::test]
    async fn dice_rtp_tracks_the_configured_expected_value() {
        let store = SettingsStore::new(MemoryBackend::default());
        let config = TrialConfig {
            game: Game::Dice,
            trials: 20_000,
            seed: 1,
            ..Default::default()
        };
        let report = run(config, &store).await.unwrap();

        assert_eq!(report.trials, 20_000);
        assert!((report.wagered - 20_000.0).abs() < 1e-9);
        // Even-chance bet at 1% edge and 3% forced loss: RTP = 1.98 * 0.485.
        let expected = 1.98 * 0.5 * 0.97;
        assert!(
            (report.rtp() - expected).abs() < 0.03,
            "rtp {} too far from {expected}",
            report.rtp()
        );
    }

    #[tokio::test]
    async fn forced_losses_are_counted() {
        let store = SettingsStore::new(MemoryBackend::default());
        let brutal = DiceSettings {
            loss_chance: 100.0,
            ..Default::default()
        };
        store.set_for(GameSection::Dice(brutal)).await.unwrap();

        let config = TrialConfig {
            game: Game::Dice,
            trials: 500,
            seed: 2,
            ..Default::default()
        };
        let report = run(config, &store).await.unwrap();
        assert_eq!(report.wins, 0);
        assert!(report.forced_losses > 0);
        assert_eq!(report.returned, 0.0);
    }

    #[tokio::test]
    async fn mines_run_produces_a_sane_report() {
        let store = SettingsStore::new(MemoryBackend::default());
        let config = TrialConfig {
            game: Game::Mines,
            trials: 2_000,
            seed: 3,
            ..Default::default()
        };
        let report = run(config, &store).await.unwrap();
        assert_eq!(report.trials, 2_000);
        assert!(report.wins > 0);
        assert!(report.wins < 2_000);
        assert!(report.rtp() > 0.0);
    }

    #[tokio::test]
    async fn crash_is_not_simulatable() {
        let store = SettingsStore::new(MemoryBackend::default());
        let config = TrialConfig {
            game: Game::Crash,
            trials: 1,
            ..Default::default()
        };
        assert!(run(config, &store).await.is_err());
    }

    #[tokio::test]
    async fn previews_stay_available_for_reports() {
        let store = SettingsStore::new(MemoryBackend::default());
        let settings = store.get().await;
        assert!(mines_expected_value(&settings.mines).unwrap() < 0.0);
        assert!(dice_expected_value(&settings.dice).unwrap() < 0.0);
    }
}
