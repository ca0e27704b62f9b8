use crate::{Error, Result, Storage};
use std::{
    fs,
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};
use tempfile::NamedTempFile;

/// A [`Storage`] keeping one file per key inside a directory.
///
/// Keys are mapped to file names by replacing every character outside
/// `[A-Za-z0-9._-]` with `_`, so `pictionary-phrase-generator:seen` lands in
/// `pictionary-phrase-generator_seen.json`. Writes are atomic.
#[derive(Clone, Debug)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Creates a storage rooted at `dir`. The directory is created lazily on
    /// first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{name}.json"))
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(Error::Read { path, source }),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key);
        let write_err = |source| Error::Write {
            path: path.clone(),
            source,
        };

        fs::create_dir_all(&self.dir).map_err(write_err)?;
        let mut file = NamedTempFile::new_in(&self.dir).map_err(write_err)?;
        file.write_all(value.as_bytes()).map_err(write_err)?;
        file.persist(&path).map_err(|e| write_err(e.error))?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(Error::Write { path, source }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SEEN_KEY;

    #[test]
    fn round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("local"));

        assert_eq!(storage.get_item(SEEN_KEY).unwrap(), None);
        storage.set_item(SEEN_KEY, r#"["A Quick Fox Jumps"]"#).unwrap();
        assert_eq!(
            storage.get_item(SEEN_KEY).unwrap().as_deref(),
            Some(r#"["A Quick Fox Jumps"]"#)
        );
        assert!(
            dir.path()
                .join("local")
                .join("pictionary-phrase-generator_seen.json")
                .exists()
        );

        storage.remove_item(SEEN_KEY).unwrap();
        assert_eq!(storage.get_item(SEEN_KEY).unwrap(), None);
        storage.remove_item(SEEN_KEY).unwrap();
    }

    #[test]
    fn unreadable_entry_surfaces_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        // A directory where the entry file should be cannot be read as text.
        fs::create_dir(dir.path().join("blocked.json")).unwrap();

        assert!(matches!(storage.get_item("blocked"), Err(Error::Read { .. })));
    }
}
