//! Persistent key/value storage for client state.

use std::{
    collections::HashMap,
    fs,
    io::{self, ErrorKind, Write},
    path::{Path, PathBuf},
};

/// Somewhere to keep small pieces of client state between runs.
pub trait TokenStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a key. Removing a key that was never set is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Stores each key as a file inside a directory.
///
/// ```text
/// <dir>/
/// └── rideshare.token
/// ```
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self { FileStorage { dir: dir.into() } }

    pub fn dir(&self) -> &Path { &self.dir }

    fn path(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_');

        if valid && !key.starts_with('.') {
            Ok(self.dir.join(key))
        } else {
            Err(StorageError::InvalidKey(key.to_string()))
        }
    }
}

impl TokenStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path(key)?;

        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io { path, source: e }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path(key)?;

        create_private_dir(&self.dir).map_err(|e| StorageError::Io {
            path: self.dir.clone(),
            source: e,
        })?;
        log::debug!("Writing \"{}\" to {}", key, path.display());

        write_private(&path, value)
            .map_err(|e| StorageError::Io { path, source: e })
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let path = self.path(key)?;

        match fs::remove_file(&path) {
            Ok(()) => {
                log::debug!("Removed {}", path.display());
                Ok(())
            },
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Io { path, source: e }),
        }
    }
}

/// Create a directory (and its parents) only the current user can enter.
fn create_private_dir(dir: &Path) -> io::Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o700);
    }

    builder.create(dir)
}

/// Write a file only the current user can read, tightening the permissions
/// of any file which was already there.
fn write_private(path: &Path, value: &str) -> io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
    }

    file.write_all(value.as_bytes())
}

/// Storage which only lives as long as the process.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self { MemoryStorage::default() }
}

impl TokenStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.values.remove(key);
        Ok(())
    }
}

/// Errors encountered while reading or writing client state.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("\"{0}\" can't be used as a storage key")]
    InvalidKey(String),
    #[error("Unable to access {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join(format!("rideshare-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn file_storage_round_trip() {
        let dir = scratch_dir("round-trip");
        let mut storage = FileStorage::new(&dir);

        assert_eq!(storage.get("rideshare.token").unwrap(), None);

        storage.set("rideshare.token", "abc").unwrap();
        assert_eq!(
            storage.get("rideshare.token").unwrap().as_deref(),
            Some("abc")
        );
        assert!(dir.join("rideshare.token").exists());

        storage.remove("rideshare.token").unwrap();
        assert_eq!(storage.get("rideshare.token").unwrap(), None);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn values_survive_a_new_handle() {
        let dir = scratch_dir("reopen");
        FileStorage::new(&dir).set("rideshare.token", "abc").unwrap();

        let got = FileStorage::new(&dir).get("rideshare.token").unwrap();

        assert_eq!(got.as_deref(), Some("abc"));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn removing_a_missing_key_is_fine() {
        let dir = scratch_dir("missing");
        let mut storage = FileStorage::new(&dir);

        storage.remove("rideshare.token").unwrap();
    }

    #[test]
    fn keys_cant_escape_the_directory() {
        let storage = FileStorage::new(scratch_dir("escape"));

        for key in &["../passwd", "a/b", "", ".hidden"] {
            let got = storage.get(key).unwrap_err();
            assert!(matches!(got, StorageError::InvalidKey(_)), "{}", key);
        }
    }

    #[cfg(unix)]
    #[test]
    fn tokens_are_only_readable_by_their_owner() {
        use std::os::unix::fs::PermissionsExt;

        let dir = scratch_dir("private");
        let mut storage = FileStorage::new(&dir);

        storage.set("rideshare.token", "secret").unwrap();

        let mode = |path: &Path| {
            fs::metadata(path).unwrap().permissions().mode() & 0o777
        };
        assert_eq!(mode(&dir.join("rideshare.token")), 0o600);
        assert_eq!(mode(&dir), 0o700);
        let _ = fs::remove_dir_all(&dir);
    }

    #[cfg(unix)]
    #[test]
    fn overwriting_a_readable_token_makes_it_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = scratch_dir("tighten");
        let path = dir.join("rideshare.token");
        fs::create_dir_all(&dir).unwrap();
        fs::write(&path, "old").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        FileStorage::new(&dir).set("rideshare.token", "new").unwrap();

        let got = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(got, 0o600);
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn memory_storage_round_trip() {
        let mut storage = MemoryStorage::new();

        storage.set("k", "v").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("v"));

        storage.remove("k").unwrap();
        assert_eq!(storage.get("k").unwrap(), None);
    }
}
