//! Persistent key-value storage for the high score
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A string-to-string store that outlives a single game
pub(crate) trait KeyValueStore: fmt::Debug {
    /// Look up the value stored under `key`.  A key that has never been set
    /// is `Ok(None)`.
    fn get(&self, key: &str) -> Result<Option<String>, LoadError>;

    fn set(&mut self, key: &str, value: String) -> Result<(), SaveError>;
}

impl<K: KeyValueStore + ?Sized> KeyValueStore for Box<K> {
    fn get(&self, key: &str) -> Result<Option<String>, LoadError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), SaveError> {
        (**self).set(key, value)
    }
}

/// A store kept in memory only; everything is forgotten on exit
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct MemoryStore(HashMap<String, String>);

impl MemoryStore {
    pub(crate) fn new() -> MemoryStore {
        MemoryStore::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, LoadError> {
        Ok(self.0.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), SaveError> {
        self.0.insert(key.to_owned(), value);
        Ok(())
    }
}

/// A store backed by a JSON object in a file on disk.  The file is re-read
/// on every access, and a missing file is treated as an empty store.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub(crate) fn new(path: PathBuf) -> JsonFileStore {
        JsonFileStore { path }
    }

    /// Return the default path for the high score file
    pub(crate) fn default_path() -> Option<PathBuf> {
        dirs::data_local_dir().map(|p| p.join("gridsnake").join("highscore.json"))
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, LoadError> {
        let src = match fs_err::read(&self.path) {
            Ok(src) => src,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(LoadError::read(e)),
        };
        serde_json::from_slice(&src).map_err(LoadError::deserialize)
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, LoadError> {
        Ok(self.load()?.remove(key))
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), SaveError> {
        let mut entries = self.load().map_err(SaveError::reload)?;
        entries.insert(key.to_owned(), value);
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs_err::create_dir_all(parent).map_err(SaveError::mkdir)?;
        }
        let mut src = serde_json::to_string_pretty(&entries).map_err(SaveError::serialize)?;
        src.push('\n');
        fs_err::write(&self.path, &src).map_err(SaveError::write)?;
        Ok(())
    }
}

#[derive(Debug, Error)]
#[error("failed to save data to store")]
pub(crate) struct SaveError(#[source] SaveErrorSource);

impl SaveError {
    fn reload(e: LoadError) -> Self {
        SaveError(SaveErrorSource::Reload(e))
    }

    fn mkdir(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Mkdir(e))
    }

    fn serialize(e: serde_json::Error) -> Self {
        SaveError(SaveErrorSource::Serialize(e))
    }

    fn write(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Write(e))
    }
}

#[derive(Debug, Error)]
enum SaveErrorSource {
    #[error("failed to read existing entries")]
    Reload(#[source] LoadError),
    #[error("failed to create parent directories")]
    Mkdir(#[source] std::io::Error),
    #[error("failed to serialize entries")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to write store to disk")]
    Write(#[source] std::io::Error),
}

#[derive(Debug, Error)]
#[error("failed to read data from store")]
pub(crate) struct LoadError(#[source] LoadErrorSource);

impl LoadError {
    fn read(e: std::io::Error) -> Self {
        LoadError(LoadErrorSource::Read(e))
    }

    fn deserialize(e: serde_json::Error) -> Self {
        LoadError(LoadErrorSource::Deserialize(e))
    }
}

#[derive(Debug, Error)]
enum LoadErrorSource {
    #[error("failed to read store file")]
    Read(#[source] std::io::Error),
    #[error("failed to deserialize store file")]
    Deserialize(#[source] serde_json::Error),
}
