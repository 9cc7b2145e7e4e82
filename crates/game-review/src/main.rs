//! Game Review - classifies the moves of a chess game.
//!
//! Fetches engine evaluations from the Lichess cloud-eval API, grades every
//! move from brilliant to blunder, and names the opening. Results are
//! printed as JSON on stdout; logs go to stderr.

mod config;
mod input;
mod review;

use std::path::PathBuf;

use chess_analysis::GameAnalyzer;
use chess_openings::OpeningDatabase;
use clap::{Parser, Subcommand};
use cloud_eval::{EvalFetcher, LichessClient};
use config::ReviewConfig;
use input::GameFile;
use tracing_subscriber::EnvFilter;

/// Game Review - chess move classification and opening detection.
#[derive(Parser)]
#[command(name = "game-review")]
#[command(about = "Classify the moves of a chess game")]
struct Cli {
    /// Path to the configuration file
    #[arg(long, default_value_os_t = ReviewConfig::default_path())]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch cloud evaluations for a list of positions
    Evaluate {
        /// File with one FEN per line
        #[arg(long)]
        fens: PathBuf,
        /// Principal variations per position
        #[arg(long)]
        multi_pv: Option<u8>,
    },
    /// Review a replayed game
    Analyze {
        /// Game file (JSON with moves, positions and optional evaluations)
        #[arg(long)]
        game: PathBuf,
        /// Do not fetch evaluations; moves without one stay unclassified
        #[arg(long)]
        offline: bool,
        /// Principal variations per position
        #[arg(long)]
        multi_pv: Option<u8>,
    },
    /// List known openings
    Openings {
        /// Only openings whose name contains this text
        #[arg(short, long)]
        search: Option<String>,
        /// Only openings whose ECO code starts with this prefix
        #[arg(long)]
        eco: Option<String>,
    },
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ReviewConfig::load(&cli.config)?;

    let loaded;
    let openings = match &config.openings_path {
        Some(path) => {
            loaded = OpeningDatabase::load(path)?;
            tracing::info!("Loaded {} openings from {}", loaded.len(), path.display());
            &loaded
        }
        None => OpeningDatabase::builtin(),
    };

    let fetcher = || -> anyhow::Result<EvalFetcher<LichessClient>> {
        let client = LichessClient::from_config(&config.cloud_eval)?;
        let fetcher = EvalFetcher::new(client, &config.cloud_eval);
        fetcher
            .cache()
            .spawn_sweeper(config.cloud_eval.sweep_interval());
        Ok(fetcher)
    };

    match cli.command {
        Commands::Evaluate { fens, multi_pv } => {
            let fens = input::read_fens(&fens)?;
            let multi_pv = multi_pv.unwrap_or(config.cloud_eval.multi_pv);
            tracing::info!("Evaluating {} positions", fens.len());
            let report = fetcher()?.evaluate_batch(&fens, multi_pv).await?;
            print_json(&report)?;
        }
        Commands::Analyze {
            game,
            offline,
            multi_pv,
        } => {
            let game = GameFile::load(&game)?;
            let multi_pv = multi_pv.unwrap_or(config.cloud_eval.multi_pv);
            let fetcher = if offline || game.evaluations.is_some() {
                None
            } else {
                Some(fetcher()?)
            };

            let evaluations = review::game_evaluations(&game, fetcher.as_ref(), multi_pv).await?;
            let analysis = review::analyze(&GameAnalyzer::new(openings), &game, &evaluations)?;
            print_json(&analysis)?;
        }
        Commands::Openings { search, eco } => {
            let mut entries = match &search {
                Some(query) => openings.search(query),
                None => openings.all().iter().collect(),
            };
            if let Some(prefix) = &eco {
                entries.retain(|e| e.eco.starts_with(prefix.as_str()));
            }
            for entry in entries {
                println!("{}  {:<45} {}", entry.eco, entry.name, entry.moves.join(" "));
            }
        }
    }

    Ok(())
}
