//! Logging setup shared by the server and reset binaries.
//!
//! Events go to stdout through `tracing_subscriber::fmt`. The filter comes
//! from `RUST_LOG` and defaults to `info`:
//!
//! ```bash
//! RUST_LOG=phrasepool=debug,info cargo run --bin phrasepool-server
//! ```

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub fn init_telemetry() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_thread_ids(true)
                .with_line_number(true)
                .with_target(false)
                .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
                .with_file(true)
                .pretty(),
        )
        .try_init()?;

    Ok(())
}
