use anyhow::{Context, bail};
use clap::{Args, Parser};
use phrasepool::{DEFAULT_DATA_PATH, DEFAULT_SEED_SIZE, Words};
use std::path::PathBuf;

/// Where the phrase store lives and what vocabulary feeds it.
///
/// Shared by the server and the reset binary so both always agree on the
/// store they operate on.
#[derive(Args, Debug, Clone)]
pub struct StoreArgs {
    /// Path of the JSON phrase store, relative to the working directory.
    ///
    /// Environment variable: `PHRASE_DATA_PATH`
    #[arg(long, env = "PHRASE_DATA_PATH", default_value = DEFAULT_DATA_PATH)]
    pub data_path: PathBuf,

    /// Optional JSON vocabulary file with `nouns`, `adjectives`, `verbs` and
    /// `extras` arrays. The built-in vocabulary is used when absent.
    ///
    /// Environment variable: `PHRASE_WORDS`
    #[arg(long, env = "PHRASE_WORDS")]
    pub words: Option<PathBuf>,
}

impl StoreArgs {
    /// Loads the configured vocabulary.
    ///
    /// # Errors
    /// - If the vocabulary file cannot be read or is invalid.
    pub fn load_words(&self) -> anyhow::Result<Words> {
        match &self.words {
            Some(path) => Words::from_json_file(path)
                .with_context(|| format!("loading vocabulary from {}", path.display())),
            None => Ok(Words::default()),
        }
    }
}

/// Runtime configuration for the `phrasepool-server` binary.
///
/// All values are parsed from CLI arguments or environment variables (a
/// `.env` file is honoured), with defaults that match a local checkout.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "phrasepool-server",
    version,
    about = "An HTTP service issuing never-repeating drawing-game phrases"
)]
pub struct CliArgs {
    /// Address to listen on.
    ///
    /// Environment variable: `SERVER_ADDR`
    #[arg(long, env = "SERVER_ADDR", default_value_t = String::from("0.0.0.0:3000"))]
    pub server_addr: String,

    /// Number of unique phrases a missing store is seeded with on first use.
    ///
    /// Environment variable: `PHRASE_SEED_SIZE`
    #[arg(long, env = "PHRASE_SEED_SIZE", default_value_t = DEFAULT_SEED_SIZE)]
    pub seed_size: usize,

    #[command(flatten)]
    pub store: StoreArgs,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub server_addr: String,
    pub data_path: PathBuf,
    pub seed_size: usize,
    pub words: Words,
}

impl TryFrom<CliArgs> for ServerConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let words = args.store.load_words()?;

        if args.seed_size > words.combinations() {
            bail!(
                "PHRASE_SEED_SIZE ({}) exceeds the {} distinct phrases the vocabulary can produce",
                args.seed_size,
                words.combinations()
            );
        }

        Ok(Self {
            server_addr: args.server_addr,
            data_path: args.store.data_path,
            seed_size: args.seed_size,
            words,
        })
    }
}
