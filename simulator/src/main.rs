use anyhow::Result;
use clap::{Parser, ValueEnum};
use syncnet_engine::store::{MemoryBackend, SettingsStore};
use syncnet_engine::{crash_expected_value, dice_expected_value, mines_expected_value};
use syncnet_simulator::{run, TrialConfig};
use syncnet_types::Game;
use tracing::info;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum GameArg {
    Mines,
    Dice,
    Crash,
}

impl From<GameArg> for Game {
    fn from(arg: GameArg) -> Self {
        match arg {
            GameArg::Mines => Game::Mines,
            GameArg::Dice => Game::Dice,
            GameArg::Crash => Game::Crash,
        }
    }
}

#[derive(Debug, Parser)]
#[command(about = "Run payout-engine trials and report observed RTP.")]
struct Args {
    /// Game to simulate.
    #[arg(long, value_enum, default_value_t = GameArg::Dice)]
    game: GameArg,

    /// Number of bets to place.
    #[arg(long, default_value_t = 100_000)]
    trials: u64,

    /// Stake per bet.
    #[arg(long, default_value_t = 1.0)]
    bet: f64,

    /// RNG seed for reproducible runs.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Safe reveals a Mines trial attempts before cashing out.
    #[arg(long, default_value_t = 3)]
    mines_reveals: u8,
}

fn build_config(args: &Args) -> TrialConfig {
    TrialConfig {
        game: args.game.into(),
        trials: args.trials,
        bet: args.bet,
        seed: args.seed,
        mines_reveals: args.mines_reveals,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args = Args::parse();
    let config = build_config(&args);
    info!(
        game = %config.game,
        trials = config.trials,
        seed = config.seed,
        "starting simulation"
    );

    let store = SettingsStore::new(MemoryBackend::default());
    let settings = store.get().await;
    let expected = match config.game {
        Game::Mines => Some(mines_expected_value(&settings.mines)?),
        Game::Dice => Some(dice_expected_value(&settings.dice)?),
        Game::Crash => Some(crash_expected_value(&settings.crash)),
    };

    let report = run(config, &store).await?;
    info!(
        trials = report.trials,
        wagered = report.wagered,
        returned = report.returned,
        wins = report.wins,
        forced_losses = report.forced_losses,
        rtp = report.rtp(),
        expected_value_pct = ?expected,
        "simulation complete"
    );
    Ok(())
}
