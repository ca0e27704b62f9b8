use std::{
    fs,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;
#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    Error, IssueStatus, PhraseGenerator, PhrasePool, RandSource, Result, TemplateGenerator,
    ThreadRandom, generate_unique,
};

/// Number of phrases a missing store is seeded with.
pub const DEFAULT_SEED_SIZE: usize = 300;

/// Smallest pool [`FilePool::reset`] will generate.
pub const MIN_RESET_SIZE: usize = 50;

/// Store location relative to the working directory.
pub const DEFAULT_DATA_PATH: &str = ".data/phrases.json";

/// A pre-generated phrase pool persisted as a JSON array on disk.
///
/// The file is the pool's only state. Issuing reads the whole array, removes
/// one entry picked uniformly at random, and rewrites the whole array.
/// Nothing records what has already been issued; a phrase is simply gone.
///
/// The pool does not lock the file. Callers sharing one store across threads
/// must serialise calls themselves; separate processes racing on the same
/// file can double-issue.
///
/// # Example
/// ```
/// use phrasepool::{FilePool, IssueStatus, PhrasePool, TemplateGenerator};
///
/// let dir = tempfile::tempdir().unwrap();
/// let pool = FilePool::new(dir.path().join("phrases.json"), TemplateGenerator::default())
///     .with_seed_size(10);
///
/// assert_eq!(pool.remaining().unwrap(), 10);
/// let IssueStatus::Ready { phrase } = pool.try_issue_next().unwrap() else {
///     unreachable!()
/// };
/// assert!(!phrase.is_empty());
/// assert_eq!(pool.remaining().unwrap(), 9);
/// ```
#[derive(Debug)]
pub struct FilePool<G = TemplateGenerator, R = ThreadRandom>
where
    G: PhraseGenerator,
    R: RandSource,
{
    path: PathBuf,
    seed_size: usize,
    available: usize,
    generator: G,
    rng: R,
}

impl<G> FilePool<G, ThreadRandom>
where
    G: PhraseGenerator,
{
    /// Creates a pool stored at `path`, seeding from `generator` when needed.
    ///
    /// Nothing touches the disk until the first operation.
    pub fn new(path: impl Into<PathBuf>, generator: G) -> Self {
        Self::with_rng(path, generator, ThreadRandom)
    }
}

impl<G, R> FilePool<G, R>
where
    G: PhraseGenerator,
    R: RandSource,
{
    /// Like [`FilePool::new`] but picks issued entries with `rng`.
    pub fn with_rng(path: impl Into<PathBuf>, generator: G, rng: R) -> Self {
        Self {
            path: path.into(),
            seed_size: DEFAULT_SEED_SIZE,
            available: usize::MAX,
            generator,
            rng,
        }
    }

    /// Sets how many phrases a missing store is seeded with.
    #[must_use]
    pub const fn with_seed_size(mut self, seed_size: usize) -> Self {
        self.seed_size = seed_size;
        self
    }

    /// Caps how many distinct phrases the generator is assumed to reach.
    ///
    /// Seeding or resetting beyond this fails with
    /// [`Error::NotEnoughPhrases`] instead of generating forever. Pass
    /// [`Words::combinations`](crate::Words::combinations) here.
    #[must_use]
    pub const fn with_available(mut self, available: usize) -> Self {
        self.available = available;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub const fn seed_size(&self) -> usize {
        self.seed_size
    }

    /// Seeds the store with [`Self::seed_size`] unique phrases if it does not
    /// exist yet.
    ///
    /// Once the file exists this is a no-op, whatever it contains, including
    /// an empty array. Creating the parent directory is best effort; if it
    /// fails, the write that follows reports the real problem.
    ///
    /// # Errors
    /// - [`Error::Write`] if the seeded store cannot be written.
    /// - [`Error::NotEnoughPhrases`] if the generator cannot reach the seed
    ///   size.
    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip(self), fields(path = %self.path.display())))]
    pub fn ensure_initialized(&self) -> Result<()> {
        if let Some(parent) = self.parent_dir() {
            let _ = fs::create_dir_all(parent);
        }

        if fs::metadata(&self.path).is_ok() {
            return Ok(());
        }

        let phrases = generate_unique(&self.generator, self.seed_size, self.available)?;
        self.write(&phrases)?;

        #[cfg(feature = "tracing")]
        tracing::info!(count = phrases.len(), "seeded phrase store");
        Ok(())
    }

    /// Replaces the store with `max(MIN_RESET_SIZE, target)` fresh unique
    /// phrases.
    ///
    /// The previous contents are discarded unconditionally and the parent
    /// directory is created if needed. Returns the new pool size.
    ///
    /// # Errors
    /// - [`Error::Write`] if the directory or the store cannot be written.
    /// - [`Error::NotEnoughPhrases`] if the generator cannot reach the size.
    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip(self), fields(path = %self.path.display())))]
    pub fn reset(&self, target: usize) -> Result<usize> {
        if let Some(parent) = self.parent_dir() {
            fs::create_dir_all(parent).map_err(|source| Error::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let count = target.max(MIN_RESET_SIZE);
        let phrases = generate_unique(&self.generator, count, self.available)?;
        self.write(&phrases)?;

        #[cfg(feature = "tracing")]
        tracing::info!(count, "reset phrase store");
        Ok(count)
    }

    /// Issues one phrase, seeding the store first if it is missing.
    ///
    /// # Errors
    /// - [`Error::Read`] or [`Error::Corrupt`] if the store cannot be loaded.
    /// - [`Error::Write`] if the reduced store cannot be written back.
    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip(self), fields(path = %self.path.display())))]
    pub fn issue_next(&self) -> Result<IssueStatus> {
        self.ensure_initialized()?;

        let mut phrases = self.read()?;
        if phrases.is_empty() {
            #[cfg(feature = "tracing")]
            tracing::debug!("phrase store depleted");
            return Ok(IssueStatus::Depleted);
        }

        let index = self.rng.index(phrases.len());
        let phrase = phrases.remove(index);
        self.write(&phrases)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(remaining = phrases.len(), "issued phrase");
        Ok(IssueStatus::Ready { phrase })
    }

    /// Number of phrases left, seeding the store first if it is missing.
    ///
    /// # Errors
    /// - Same as [`Self::issue_next`], minus the write-back.
    pub fn remaining(&self) -> Result<usize> {
        self.ensure_initialized()?;
        Ok(self.read()?.len())
    }

    /// Loads the full persisted collection.
    ///
    /// # Errors
    /// - [`Error::Read`] if the file is missing or unreadable.
    /// - [`Error::Corrupt`] if it is not a JSON array of strings.
    pub fn read(&self) -> Result<Vec<String>> {
        let raw = fs::read_to_string(&self.path).map_err(|source| Error::Read {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| Error::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn write(&self, phrases: &[String]) -> Result<()> {
        let dir = self.parent_dir().unwrap_or_else(|| Path::new("."));
        let write_err = |source| Error::Write {
            path: self.path.clone(),
            source,
        };

        let file = NamedTempFile::new_in(dir).map_err(write_err)?;
        let mut writer = BufWriter::new(&file);
        serde_json::to_writer_pretty(&mut writer, phrases).map_err(|e| write_err(e.into()))?;
        writer.flush().map_err(write_err)?;
        drop(writer);

        file.persist(&self.path).map_err(|e| write_err(e.error))?;
        Ok(())
    }

    fn parent_dir(&self) -> Option<&Path> {
        self.path.parent().filter(|p| !p.as_os_str().is_empty())
    }
}

impl<G, R> PhrasePool for FilePool<G, R>
where
    G: PhraseGenerator,
    R: RandSource,
{
    type Err = Error;

    fn try_issue_next(&self) -> Result<IssueStatus> {
        self.issue_next()
    }
}
