use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use core::time::Duration;
use phrasepool::{FileStorage, LocalPool, TemplateGenerator, Words};
use phrasepool_client::{HttpIssuer, Issuer, Offline, Shell, View};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "phrasepool",
    version,
    about = "Draw a fresh, quirky phrase for your next round"
)]
struct CliArgs {
    /// Base URL of the phrase server.
    ///
    /// Environment variable: `PHRASE_SERVER_URL`
    #[arg(long, env = "PHRASE_SERVER_URL", default_value_t = String::from("http://127.0.0.1:3000"))]
    server_url: String,

    /// Give up on the server after this many milliseconds. Waits forever
    /// when unset.
    ///
    /// Environment variable: `PHRASE_REQUEST_TIMEOUT_MS`
    #[arg(long, env = "PHRASE_REQUEST_TIMEOUT_MS")]
    timeout_ms: Option<u64>,

    /// Directory holding the local pool's history.
    ///
    /// Environment variable: `PHRASE_STORAGE_DIR`
    #[arg(long, env = "PHRASE_STORAGE_DIR", default_value = ".local")]
    storage_dir: PathBuf,

    /// Vocabulary for the local pool. The built-in one is used when absent.
    ///
    /// Environment variable: `PHRASE_WORDS`
    #[arg(long, env = "PHRASE_WORDS")]
    words: Option<PathBuf>,

    /// Never contact a server; always use the local pool.
    #[arg(long, conflicts_with = "no_fallback")]
    offline: bool,

    /// Show server failures instead of falling back to the local pool.
    #[arg(long)]
    no_fallback: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Command {
    /// Show the next phrase.
    Next,
    /// Forget every phrase the local pool has issued.
    ResetLocal,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    if args.offline {
        let shell = Shell::with_fallback(Offline, local_pool(&args)?);
        return run(shell, args.command).await;
    }

    let issuer = HttpIssuer::new(&args.server_url, args.timeout_ms.map(Duration::from_millis))?;
    if args.no_fallback {
        run(Shell::new(issuer), args.command).await
    } else {
        run(Shell::with_fallback(issuer, local_pool(&args)?), args.command).await
    }
}

fn local_pool(args: &CliArgs) -> anyhow::Result<LocalPool<FileStorage>> {
    let words = match &args.words {
        Some(path) => Words::from_json_file(path)
            .with_context(|| format!("loading vocabulary from {}", path.display()))?,
        None => Words::default(),
    };

    Ok(LocalPool::new(
        FileStorage::new(&args.storage_dir),
        TemplateGenerator::with_words(words),
    ))
}

async fn run<I: Issuer>(mut shell: Shell<I>, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Next => match shell.generate().await {
            View::Error(message) => bail!(message),
            view => println!("{view}"),
        },
        Command::ResetLocal => {
            if !shell.reset_local() {
                bail!("reset-local needs the local fallback; drop --no-fallback");
            }
            println!("Local phrase history cleared.");
        }
    }

    Ok(())
}
