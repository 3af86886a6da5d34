//! Dev utility: replay a transcript file against a passage at a simulated
//! cadence and print what a UI collaborator would render: snapshots,
//! heatmap, tier transitions, pronunciation feedback.
//!
//! Each line of the transcript file is treated as one finalized
//! recognition fragment.

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing_subscriber::EnvFilter;

use lectio::config::Config;
use lectio::engine::adaptive::{AdaptiveController, DifficultyTier};
use lectio::passage::{Passage, PassageCatalog};
use lectio::session::ReadingSession;

#[derive(Parser)]
#[command(
    name = "replay_session",
    version,
    about = "Replay a transcript file against a passage"
)]
struct Cli {
    #[arg(help = "File whose lines are finalized transcript fragments")]
    transcript: PathBuf,

    #[arg(short, long, help = "Read the passage from a text file instead of the catalog")]
    passage: Option<PathBuf>,

    #[arg(short, long, help = "Difficulty tier (beginner, intermediate, advanced)")]
    tier: Option<String>,

    #[arg(long, default_value_t = 2000, help = "Simulated ms between fragments")]
    interval_ms: u64,

    #[arg(long, default_value_t = 0, help = "Seed for catalog passage selection")]
    seed: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut config = Config::load()?;
    config.validate();

    let tier = match &cli.tier {
        Some(key) => DifficultyTier::from_key(key)
            .with_context(|| format!("unknown tier: {key}"))?,
        None => config.starting_tier(),
    };

    let passage = match &cli.passage {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            Passage::from_text(tier, &text)?
        }
        None => PassageCatalog::new(SmallRng::seed_from_u64(cli.seed)).select(tier)?,
    };

    let fragments = fs::read_to_string(&cli.transcript)
        .with_context(|| format!("failed to read {}", cli.transcript.display()))?;

    println!("passage [{}]: {}", passage.tier().to_key(), passage.text());
    println!();

    let controller = AdaptiveController::with_thresholds(tier, config.thresholds());
    let mut session = ReadingSession::new(&passage, controller);

    let t0 = Instant::now();
    session.start(t0);
    let epoch = session.epoch();

    let mut now = t0;
    for fragment in fragments.lines().filter(|l| !l.trim().is_empty()) {
        now += Duration::from_millis(cli.interval_ms);
        let Some(update) = session.push_final(fragment, epoch, now) else {
            continue;
        };
        println!(
            "+{:>5}ms  wpm {:>3}  acc {:>3}%  progress {:>3}%  \"{}\"",
            now.duration_since(t0).as_millis(),
            update.snapshot.wpm,
            update.snapshot.accuracy,
            update.snapshot.progress_percent,
            fragment.trim(),
        );
        if update.decision.transitioned {
            println!("          >> difficulty now {}", update.decision.tier.to_key());
        }
    }

    let feedback: Vec<_> = session
        .pronunciation()
        .into_iter()
        .filter(|f| f.suggestion.is_some())
        .collect();

    let heatmap = session.alignment().errors.clone();
    let result = session.stop(now);

    println!();
    println!(
        "result: wpm {}  accuracy {}%  progress {}%  errors {}  elapsed {:.1}s",
        result.wpm,
        result.accuracy,
        result.progress_percent,
        result.error_count,
        result.elapsed_secs,
    );
    println!("heatmap: {heatmap:?}");

    for item in feedback {
        if let Some(suggestion) = item.suggestion {
            println!(
                "word {:>2}: said \"{}\" for \"{}\" ({}): {}",
                item.index, item.spoken, item.target, item.score, suggestion
            );
        }
    }

    Ok(())
}
