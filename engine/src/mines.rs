//! Mines round state machine.
//!
//! One round: mines are placed uniformly at random when the round starts, the
//! player reveals cells one at a time, and the payable multiplier is
//! recomputed after every successful reveal. The forced-loss adjudicator runs
//! after **each** successful reveal, not once per round, so the cumulative
//! forced-loss probability over a long streak exceeds the configured
//! per-reveal chance. That compounding matches the deployed behavior and is
//! preserved deliberately (see DESIGN.md).
//!
//! Terminal transitions:
//! - `MineHit` — the revealed cell held a mine.
//! - `ForcedLoss` — the reveal was safe but the override fired. Presented to
//!   the player exactly like a mine hit; the revealed cell is *not* tagged as
//!   a mine.
//! - `Cleared` — every safe cell revealed; a deterministic win paid at the
//!   configured multiplier cap.
//! - Cash-out via [`MinesRound::cash_out`].

use crate::adjudicator::{adjudicate, Adjudication};
use crate::multiplier::mines_multiplier;
use crate::GameError;
use rand::Rng;
use syncnet_types::{BetOutcome, MinesSettings, SettingsError};

/// Result of revealing one cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Reveal {
    /// Safe reveal; the round continues at the new multiplier.
    Safe { multiplier: f64 },
    /// The cell held a mine. Terminal.
    MineHit,
    /// The forced-loss override fired on a safe reveal. Terminal, and shown to
    /// the player as a mine hit even though the cell is mine-free.
    ForcedLoss,
    /// All safe cells revealed. Terminal win at the multiplier cap.
    Cleared { multiplier: f64 },
}

/// One Mines game against an immutable settings snapshot.
pub struct MinesRound {
    settings: MinesSettings,
    mines: Vec<u8>,
    revealed: Vec<u8>,
    multiplier: f64,
    complete: bool,
}

impl MinesRound {
    /// Start a round, placing `mine_count` mines uniformly without
    /// replacement.
    pub fn new<R: Rng + ?Sized>(
        settings: MinesSettings,
        rng: &mut R,
    ) -> Result<Self, SettingsError> {
        settings.validate()?;
        let mut mines: Vec<u8> = rand::seq::index::sample(
            rng,
            usize::from(settings.grid_size),
            usize::from(settings.mine_count),
        )
        .into_iter()
        .map(|cell| cell as u8)
        .collect();
        mines.sort_unstable();
        Ok(Self {
            settings,
            mines,
            revealed: Vec::new(),
            multiplier: 1.0,
            complete: false,
        })
    }

    /// Current payable multiplier (1.0 before any reveal).
    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    /// Cells revealed so far, in reveal order.
    pub fn revealed(&self) -> &[u8] {
        &self.revealed
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Whether the given cell holds a mine. A `ForcedLoss` round ends with
    /// the last revealed cell still mine-free.
    pub fn is_mine(&self, cell: u8) -> bool {
        self.mines.binary_search(&cell).is_ok()
    }

    /// Reveal one cell. Runs the forced-loss adjudicator after every safe
    /// reveal; a fresh draw per reveal, independent of mine placement.
    pub fn reveal<R: Rng + ?Sized>(&mut self, cell: u8, rng: &mut R) -> Result<Reveal, GameError> {
        if self.complete {
            return Err(GameError::RoundComplete);
        }
        if cell >= self.settings.grid_size {
            return Err(GameError::CellOutOfRange {
                cell,
                grid: self.settings.grid_size,
            });
        }
        if self.revealed.contains(&cell) {
            return Err(GameError::CellAlreadyRevealed(cell));
        }

        if self.is_mine(cell) {
            self.complete = true;
            return Ok(Reveal::MineHit);
        }

        self.revealed.push(cell);

        if adjudicate(true, self.settings.loss_chance, rng) == Adjudication::ForcedLoss {
            self.complete = true;
            return Ok(Reveal::ForcedLoss);
        }

        let revealed = self.revealed.len() as u8;
        if revealed == self.settings.safe_squares() {
            // Full clear: the next-reveal formula has no next reveal left, so
            // the deterministic win pays the configured cap.
            self.complete = true;
            self.multiplier = self.settings.max_multiplier;
            return Ok(Reveal::Cleared {
                multiplier: self.multiplier,
            });
        }

        self.multiplier = mines_multiplier(&self.settings, revealed)?;
        Ok(Reveal::Safe {
            multiplier: self.multiplier,
        })
    }

    /// Cash out at the current multiplier. At zero reveals this returns the
    /// stake unchanged (multiplier 1.0: no profit, no loss).
    pub fn cash_out(&mut self, stake: f64) -> Result<BetOutcome, GameError> {
        if self.complete {
            return Err(GameError::RoundComplete);
        }
        self.complete = true;
        let multiplier = self.multiplier.min(self.settings.max_multiplier);
        Ok(BetOutcome {
            raw_win: true,
            final_win: true,
            multiplier,
            payout: stake * multiplier,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn no_forced_loss() -> MinesSettings {
        MinesSettings {
            loss_chance: 0.0,
            ..Default::default()
        }
    }

    fn safe_cell(round: &MinesRound) -> u8 {
        (0..round.settings.grid_size)
            .find(|&cell| !round.is_mine(cell) && !round.revealed().contains(&cell))
            .expect("board always has a safe unrevealed cell in these tests")
    }

    fn mine_cell(round: &MinesRound) -> u8 {
        (0..round.settings.grid_size)
            .find(|&cell| round.is_mine(cell))
            .expect("board always has mines")
    }

    #[test]
    fn places_the_configured_number_of_mines() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let round = MinesRound::new(MinesSettings::default(), &mut rng).unwrap();
        assert_eq!(round.mines.len(), 5);
        assert!(round.mines.iter().all(|&cell| cell < 25));
        // Sampled without replacement: all distinct.
        let mut unique = round.mines.clone();
        unique.dedup();
        assert_eq!(unique.len(), 5);
    }

    #[test]
    fn rejects_invalid_settings() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let bad = MinesSettings {
            mine_count: 25,
            ..Default::default()
        };
        assert!(MinesRound::new(bad, &mut rng).is_err());
    }

    #[test]
    fn multiplier_grows_while_revealing_safe_cells() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut round = MinesRound::new(no_forced_loss(), &mut rng).unwrap();
        let mut previous = round.multiplier();
        assert_eq!(previous, 1.0);
        for _ in 0..5 {
            let cell = safe_cell(&round);
            match round.reveal(cell, &mut rng).unwrap() {
                Reveal::Safe { multiplier } => {
                    assert!(multiplier > previous);
                    previous = multiplier;
                }
                other => panic!("expected safe reveal, got {other:?}"),
            }
        }
    }

    #[test]
    fn mine_hit_is_terminal() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut round = MinesRound::new(no_forced_loss(), &mut rng).unwrap();
        let cell = mine_cell(&round);
        assert_eq!(round.reveal(cell, &mut rng).unwrap(), Reveal::MineHit);
        assert!(round.is_complete());
        assert_eq!(
            round.reveal(safe_cell(&round), &mut rng),
            Err(GameError::RoundComplete)
        );
        assert_eq!(round.cash_out(10.0), Err(GameError::RoundComplete));
    }

    #[test]
    fn forced_loss_fires_on_a_mine_free_cell() {
        // lossChance=100 forces the override on the very first safe reveal.
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let settings = MinesSettings {
            loss_chance: 100.0,
            ..Default::default()
        };
        let mut round = MinesRound::new(settings, &mut rng).unwrap();
        let cell = safe_cell(&round);
        assert_eq!(round.reveal(cell, &mut rng).unwrap(), Reveal::ForcedLoss);
        assert!(round.is_complete());
        // The transition is presentational only: the cell holds no mine.
        assert!(!round.is_mine(cell));
        assert_eq!(round.revealed(), &[cell]);
    }

    #[test]
    fn full_clear_is_a_deterministic_win() {
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let settings = MinesSettings {
            mine_count: 24,
            loss_chance: 0.0,
            ..Default::default()
        };
        // 24 mines on a 25 cell grid: exactly one safe cell.
        let mut round = MinesRound::new(settings, &mut rng).unwrap();
        let cell = safe_cell(&round);
        match round.reveal(cell, &mut rng).unwrap() {
            Reveal::Cleared { multiplier } => assert_eq!(multiplier, 100.0),
            other => panic!("expected cleared board, got {other:?}"),
        }
        assert!(round.is_complete());
    }

    #[test]
    fn cash_out_before_any_reveal_returns_the_stake() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut round = MinesRound::new(no_forced_loss(), &mut rng).unwrap();
        let outcome = round.cash_out(0.5).unwrap();
        assert_eq!(outcome.multiplier, 1.0);
        assert_eq!(outcome.payout, 0.5);
        assert!(outcome.final_win);
    }

    #[test]
    fn cash_out_after_one_reveal_on_default_board() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut round = MinesRound::new(no_forced_loss(), &mut rng).unwrap();
        let cell = safe_cell(&round);
        round.reveal(cell, &mut rng).unwrap();
        let outcome = round.cash_out(1.0).unwrap();
        // (24/19) * 0.99 displayed as 1.25.
        assert_eq!((outcome.multiplier * 100.0).round() / 100.0, 1.25);
    }

    #[test]
    fn rejects_out_of_range_and_repeated_cells() {
        let mut rng = ChaCha8Rng::seed_from_u64(13);
        let mut round = MinesRound::new(no_forced_loss(), &mut rng).unwrap();
        assert_eq!(
            round.reveal(25, &mut rng),
            Err(GameError::CellOutOfRange { cell: 25, grid: 25 })
        );
        let cell = safe_cell(&round);
        round.reveal(cell, &mut rng).unwrap();
        assert_eq!(
            round.reveal(cell, &mut rng),
            Err(GameError::CellAlreadyRevealed(cell))
        );
    }
}
