//! Regenerates the phrase store out of band.
//!
//! ```bash
//! phrasepool-reset        # 300 phrases
//! phrasepool-reset 1000
//! phrasepool-reset 10     # raised to 50
//! phrasepool-reset lots   # not a number, 300
//! ```

use clap::Parser;
use phrasepool::{DEFAULT_SEED_SIZE, FilePool, TemplateGenerator};
use phrasepool_server::server::{config::StoreArgs, telemetry::init_telemetry};

#[derive(Parser, Debug)]
#[command(
    name = "phrasepool-reset",
    version,
    about = "Replace the phrase store with a fresh set of unique phrases"
)]
struct ResetArgs {
    /// How many phrases to generate. Values below 50 are raised to 50 and
    /// anything that is not a number means 300.
    #[arg(allow_negative_numbers = true)]
    count: Option<String>,

    #[command(flatten)]
    store: StoreArgs,
}

fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let args = ResetArgs::parse();
    init_telemetry()?;

    let words = args.store.load_words()?;
    let available = words.combinations();
    let pool = FilePool::new(&args.store.data_path, TemplateGenerator::with_words(words))
        .with_available(available);

    match pool.reset(parse_count(args.count.as_deref())) {
        Ok(count) => {
            println!(
                "Reset phrase database with {count} phrases at {}.",
                pool.path().display()
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to reset database");
            Err(e.into())
        }
    }
}

/// Lenient count parsing: fractions round up, zero and negatives are left for
/// [`FilePool::reset`] to raise to its floor, and anything unparseable falls
/// back to [`DEFAULT_SEED_SIZE`].
fn parse_count(raw: Option<&str>) -> usize {
    match raw.map(str::trim).and_then(|raw| raw.parse::<f64>().ok()) {
        Some(count) if count.is_finite() => {
            if count <= 0.0 {
                0
            } else {
                // Saturates at usize::MAX.
                count.ceil() as usize
            }
        }
        _ => DEFAULT_SEED_SIZE,
    }
}
