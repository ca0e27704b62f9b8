use std::collections::HashSet;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{IssueStatus, PhraseGenerator, PhrasePool, Result, SEEN_KEY, Storage, TemplateGenerator};

/// Draws a local pool makes before giving up and reporting depletion.
pub const DEFAULT_MAX_ATTEMPTS: usize = 200;

/// A generate-and-check pool that needs no server.
///
/// Instead of a pre-generated collection, the pool keeps a record of every
/// phrase it has issued, serialised as a JSON array under one storage key.
/// Issuing draws fresh phrases until one is not in the record, for at most
/// [`DEFAULT_MAX_ATTEMPTS`] draws.
///
/// Depletion here is a heuristic: it means that many consecutive draws all
/// collided with history, not that the phrase space is truly exhausted.
///
/// Storage is best effort. A record that is missing, unreadable or corrupt
/// counts as empty, and failed writes are logged and ignored, so the worst a
/// broken storage can do is let phrases repeat.
///
/// # Example
/// ```
/// use phrasepool::{IssueStatus, LocalPool, MemoryStorage, TemplateGenerator};
///
/// let pool = LocalPool::new(MemoryStorage::default(), TemplateGenerator::default());
/// let first = pool.issue_next().into_phrase().unwrap();
/// assert!(pool.seen().contains(&first));
///
/// pool.reset_local();
/// assert!(pool.seen().is_empty());
/// ```
#[derive(Debug)]
pub struct LocalPool<S, G = TemplateGenerator>
where
    S: Storage,
    G: PhraseGenerator,
{
    storage: S,
    generator: G,
    key: String,
    max_attempts: usize,
}

impl<S, G> LocalPool<S, G>
where
    S: Storage,
    G: PhraseGenerator,
{
    /// Creates a pool recording history in `storage` under [`SEEN_KEY`].
    pub fn new(storage: S, generator: G) -> Self {
        Self {
            storage,
            generator,
            key: SEEN_KEY.to_string(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Sets how many draws are made before reporting depletion.
    #[must_use]
    pub const fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Records history under `key` instead of [`SEEN_KEY`].
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Issues a phrase not yet in the seen record, or reports depletion.
    ///
    /// On success the phrase is appended to the record and the record is
    /// persisted. On depletion the record is left untouched.
    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip(self), fields(key = %self.key)))]
    pub fn issue_next(&self) -> IssueStatus {
        let mut seen = self.seen();
        let members: HashSet<&str> = seen.iter().map(String::as_str).collect();

        let mut fresh = None;
        for _ in 0..self.max_attempts {
            let phrase = self.generator.generate();
            if !members.contains(phrase.as_str()) {
                fresh = Some(phrase);
                break;
            }
        }

        let Some(phrase) = fresh else {
            #[cfg(feature = "tracing")]
            tracing::debug!(attempts = self.max_attempts, "local pool depleted");
            return IssueStatus::Depleted;
        };

        seen.push(phrase.clone());
        self.persist(&seen);
        IssueStatus::Ready { phrase }
    }

    /// Forgets every issued phrase. Failures are logged and ignored.
    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip(self), fields(key = %self.key)))]
    pub fn reset_local(&self) {
        if let Err(_e) = self.storage.remove_item(&self.key) {
            #[cfg(feature = "tracing")]
            tracing::warn!(error = %_e, "failed to clear seen phrases");
        }
    }

    /// Returns the seen record, in issue order. Unreadable or corrupt data
    /// yields an empty record.
    pub fn seen(&self) -> Vec<String> {
        let raw = match self.storage.get_item(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(error = %_e, "failed to read seen phrases");
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(seen) => seen,
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(error = %_e, "discarding corrupt seen phrases");
                Vec::new()
            }
        }
    }

    fn persist(&self, seen: &[String]) {
        let result = serde_json::to_string(seen)
            .map_err(|e| crate::Error::Storage {
                reason: e.to_string(),
            })
            .and_then(|raw| self.storage.set_item(&self.key, &raw));

        if let Err(_e) = result {
            #[cfg(feature = "tracing")]
            tracing::warn!(error = %_e, "failed to persist seen phrases");
        }
    }
}

impl<S, G> PhrasePool for LocalPool<S, G>
where
    S: Storage,
    G: PhraseGenerator,
{
    type Err = core::convert::Infallible;

    fn try_issue_next(&self) -> Result<IssueStatus, Self::Err> {
        Ok(self.issue_next())
    }
}
