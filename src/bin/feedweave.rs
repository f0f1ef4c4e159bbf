//! Feedweave CLI: inspect seeds, shuffles and merged feeds.
//!
//! ```bash
//! feedweave seed viewer-42
//! feedweave shuffle --seed 42 a1 a2 a3 a4
//! feedweave preview --posts posts.json --ads ads.json --every 3 --identity viewer-42
//! ```

use clap::{ArgAction, Args, Parser, Subcommand};
use feedweave::{
    Cadence, FeedConfig, FeedPlanner, FileSeedStore, MemorySeedStore, Seed, SeedStore,
    SessionSeeds, hash_string_to_seed, seeded_shuffle,
};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "feedweave",
    version,
    about = "Session-stable ad interleaving for content feeds"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the seed derived from a string
    Seed(SeedArgs),

    /// Shuffle items with a seed
    Shuffle(ShuffleArgs),

    /// Merge a posts file and an advertisers file into a feed
    Preview(PreviewArgs),
}

#[derive(Args, Debug)]
struct SeedArgs {
    /// String to hash
    input: String,
}

#[derive(Args, Debug)]
struct ShuffleArgs {
    /// Integer seed, or any other string to hash into one
    #[arg(long, allow_hyphen_values = true)]
    seed: String,

    /// Items to shuffle
    items: Vec<String>,

    /// Output as a JSON array instead of one item per line
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,
}

#[derive(Args, Debug)]
struct PreviewArgs {
    /// JSON array of posts, already in feed order
    #[arg(long)]
    posts: PathBuf,

    /// JSON array of advertisers
    #[arg(long)]
    ads: PathBuf,

    /// Place an ad before every Nth post (overrides config)
    #[arg(long, allow_hyphen_values = true)]
    every: Option<i64>,

    /// Viewer identity; omitted means anonymous
    #[arg(long)]
    identity: Option<String>,

    /// JSON file persisting session seeds between runs
    #[arg(long)]
    seed_store: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Keep advertisers in the given order
    #[arg(long, action = ArgAction::SetTrue)]
    no_shuffle: bool,
}

// ---------------------------------------------------------------------------
// Seed / shuffle
// ---------------------------------------------------------------------------

fn parse_seed(raw: &str) -> Seed {
    if let Ok(value) = raw.parse::<u64>() {
        return Seed::wrapping(value);
    }
    if let Ok(value) = raw.parse::<i64>() {
        return Seed::wrapping_signed(value);
    }
    Seed::from_str_hash(raw)
}

#[allow(clippy::needless_pass_by_value)]
fn cmd_seed(args: SeedArgs) -> Result<(), String> {
    println!("{}", hash_string_to_seed(&args.input));
    Ok(())
}

#[allow(clippy::needless_pass_by_value)]
fn cmd_shuffle(args: ShuffleArgs) -> Result<(), String> {
    let seed = parse_seed(&args.seed);
    let shuffled = seeded_shuffle(&args.items, seed);
    if args.json {
        let json = serde_json::to_string(&shuffled).map_err(|e| e.to_string())?;
        println!("{json}");
    } else {
        for item in shuffled {
            println!("{item}");
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Preview
// ---------------------------------------------------------------------------

fn load_array(path: &Path) -> Result<Vec<Value>, String> {
    let json =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    match serde_json::from_str(&json) {
        Ok(Value::Array(values)) => Ok(values),
        Ok(_) => Err(format!("{} must contain a JSON array", path.display())),
        Err(e) => Err(format!("Failed to parse {}: {e}", path.display())),
    }
}

fn load_config(args: &PreviewArgs) -> feedweave::Result<FeedConfig> {
    let mut config = match &args.config {
        Some(path) => FeedConfig::from_path(path)?,
        None => FeedConfig::default(),
    };
    config = config.apply_env()?;
    if let Some(every) = args.every {
        config.ad_cadence = Cadence::try_from(every)?;
    }
    if args.no_shuffle {
        config.shuffle_advertisers = false;
    }
    Ok(config)
}

fn resolve_seed<S: SeedStore>(store: S, config: &FeedConfig, identity: Option<&str>) -> Seed {
    let mut seeds = SessionSeeds::new(store, config.seed_namespace.clone());
    let resolution = seeds.resolve(identity);
    tracing::info!(seed = resolution.seed.get(), origin = ?resolution.origin, "session seed");
    resolution.seed
}

fn cmd_preview(args: PreviewArgs) -> Result<(), String> {
    let config = load_config(&args).map_err(|e| e.to_string())?;
    let posts = load_array(&args.posts)?;
    let ads = load_array(&args.ads)?;

    let identity = args.identity.as_deref();
    let seed = match &args.seed_store {
        Some(path) => resolve_seed(FileSeedStore::new(path), &config, identity),
        None => resolve_seed(
            MemorySeedStore::new().with_event_capacity(0),
            &config,
            identity,
        ),
    };

    let feed = FeedPlanner::new(config).plan(posts, &ads, seed, |_: &Value| true);
    let json = serde_json::to_string_pretty(&feed).map_err(|e| e.to_string())?;
    println!("{json}");
    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Seed(args) => cmd_seed(args),
        Command::Shuffle(args) => cmd_shuffle(args),
        Command::Preview(args) => cmd_preview(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(msg) => {
            eprintln!("Error: {msg}");
            ExitCode::FAILURE
        }
    }
}
