use crate::server::config::ServerConfig;
use parking_lot::Mutex;
use phrasepool::{FilePool, TemplateGenerator};
use std::sync::Arc;

/// Shared state handed to every handler.
///
/// The pool sits behind a mutex so that requests served by this process
/// issue one at a time; two requests can never observe the same store
/// contents and hand out the same phrase.
#[derive(Clone)]
pub struct AppState {
    pub pool: Arc<Mutex<FilePool>>,
}

impl AppState {
    pub fn new(pool: FilePool) -> Self {
        Self {
            pool: Arc::new(Mutex::new(pool)),
        }
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        let available = config.words.combinations();
        let pool = FilePool::new(
            &config.data_path,
            TemplateGenerator::with_words(config.words.clone()),
        )
        .with_seed_size(config.seed_size)
        .with_available(available);

        Self::new(pool)
    }
}
