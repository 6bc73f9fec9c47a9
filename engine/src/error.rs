use thiserror::Error as ThisError;

/// Domain error from the multiplier / expected-value calculators.
///
/// Out-of-range input signals an error rather than silently producing
/// `Infinity` or `NaN`.
#[derive(Clone, Debug, PartialEq, ThisError)]
pub enum EngineError {
    #[error("no safe squares remain (revealed={revealed}, mines={mines}, grid={grid})")]
    NoSafeSquares { revealed: u8, mines: u8, grid: u8 },
    #[error("win chance must be strictly between 0 and 100 (got {0})")]
    DegenerateWinChance(f64),
    #[error("crash chance must be within (0, 100] (got {0})")]
    DegenerateCrashChance(f64),
}

/// Invalid move against a game round.
#[derive(Clone, Debug, PartialEq, ThisError)]
pub enum GameError {
    #[error("round is already complete")]
    RoundComplete,
    #[error("cell {cell} is outside the {grid} cell grid")]
    CellOutOfRange { cell: u8, grid: u8 },
    #[error("cell {0} was already revealed")]
    CellAlreadyRevealed(u8),
    #[error("dice target must be within 1..=98 (got {0})")]
    TargetOutOfRange(f64),
    #[error(transparent)]
    Engine(#[from] EngineError),
}
