use std::fmt;

use sawadee_core::model::{QuizDomain, StatsMap};
use storage::repository::Storage;
use tracing_subscriber::EnvFilter;

const DEFAULT_ITEMS: &str = "ก,ข,ค,ง,จ,ฉ,ช,ซ,ด,ต";

#[derive(Debug, Clone)]
struct Args {
    db_url: String,
    domain: QuizDomain,
    items: Vec<String>,
    answers: u32,
}

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDomain { raw: String },
    InvalidAnswers { raw: String },
    InvalidDbUrl { raw: String },
    EmptyItems,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDomain { raw } => write!(f, "invalid --domain value: {raw}"),
            ArgsError::InvalidAnswers { raw } => write!(f, "invalid --answers value: {raw}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::EmptyItems => write!(f, "--items must name at least one item"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn split_items(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

impl Args {
    fn parse() -> Result<Self, ArgsError> {
        let mut db_url =
            std::env::var("SAWADEE_DB_URL").unwrap_or_else(|_| "sqlite:sawadee.sqlite3".into());
        let mut domain = QuizDomain::InitialConsonant;
        let mut items = split_items(DEFAULT_ITEMS);
        let mut answers = std::env::var("SAWADEE_SEED_ANSWERS")
            .ok()
            .and_then(|value| value.parse::<u32>().ok())
            .unwrap_or(6);

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = value;
                }
                "--domain" => {
                    let value = require_value(&mut args, "--domain")?;
                    domain = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidDomain { raw: value.clone() })?;
                }
                "--items" => {
                    let value = require_value(&mut args, "--items")?;
                    items = split_items(&value);
                }
                "--answers" => {
                    let value = require_value(&mut args, "--answers")?;
                    answers = value
                        .parse::<u32>()
                        .map_err(|_| ArgsError::InvalidAnswers { raw: value.clone() })?;
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        if items.is_empty() {
            return Err(ArgsError::EmptyItems);
        }

        Ok(Self {
            db_url,
            domain,
            items,
            answers,
        })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p storage --bin seed -- [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --db <sqlite_url>         SQLite URL (default: sqlite:sawadee.sqlite3)");
    eprintln!("  --domain <domain>         initial_consonant, final_consonant, vowel, number, word");
    eprintln!("  --items <a,b,c>           Comma separated item keys");
    eprintln!("  --answers <n>             Answers recorded per item (default: 6)");
    eprintln!("  -h, --help                Show this help");
    eprintln!();
    eprintln!("Environment (same as flags):");
    eprintln!("  SAWADEE_DB_URL, SAWADEE_SEED_ANSWERS");
    eprintln!("  RUST_LOG controls log output (default: info)");
}

/// Spread items across every familiarity range: the first item is always
/// wrong, later items get right more often.
fn seeded_stats(items: &[String], answers: u32) -> StatsMap {
    let mut stats = StatsMap::new();
    let spread = u64::try_from(items.len()).unwrap_or(u64::MAX).max(1);
    for (index, item) in (0_u64..).zip(items) {
        for answer in 0..answers {
            stats.record_answer(item, is_seeded_correct(index, answer, answers, spread));
        }
    }
    stats
}

/// Answer `answer` of item `index` is correct for the first `index / spread`
/// share of `answers`. Computed in `u128`, so it cannot overflow.
fn is_seeded_correct(index: u64, answer: u32, answers: u32, spread: u64) -> bool {
    u128::from(answer) * u128::from(spread) < u128::from(index) * u128::from(answers)
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse().map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let storage = Storage::sqlite(&args.db_url).await?;

    let mut stats = storage.stats.load_stats(args.domain).await?.unwrap_or_default();
    for (key, stat) in seeded_stats(&args.items, args.answers).iter() {
        stats.insert(key, *stat);
    }
    storage.stats.save_stats(args.domain, &stats).await?;

    tracing::info!(
        domain = %args.domain,
        items = args.items.len(),
        answers = args.answers,
        db = %args.db_url,
        "seeded answer stats"
    );

    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
