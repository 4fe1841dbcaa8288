use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use thiserror::Error;

const BLOB_EXTENSION: &str = "json";
const TEMP_SUFFIX: &str = ".tmp";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("missing HOME environment variable")]
    MissingHomeDirectory,
    #[error("invalid settings key: {0:?}")]
    InvalidKey(String),
    #[error("failed to serialize settings blob")]
    Serialize(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Named string blobs that outlive the process.
pub trait SettingsStore {
    fn read(&self, key: &str) -> StorageResult<Option<String>>;
    fn write(&self, key: &str, contents: &str) -> StorageResult<()>;
}

/// Stores each key as `<key>.json` inside one directory.
#[derive(Debug, Clone)]
pub struct FileSettingsStore {
    root: PathBuf,
}

impl FileSettingsStore {
    pub const fn with_root(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn with_default_root() -> StorageResult<Self> {
        let data_home = std::env::var_os("XDG_DATA_HOME").map(PathBuf::from);
        let home = std::env::var_os("HOME").map(PathBuf::from);
        let root = default_data_root(data_home.as_deref(), home.as_deref())?;
        Ok(Self::with_root(root))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for_key(&self, key: &str) -> StorageResult<PathBuf> {
        validate_key(key)?;
        let mut path = self.root.clone();
        path.push(format!("{key}.{BLOB_EXTENSION}"));
        Ok(path)
    }
}

impl SettingsStore for FileSettingsStore {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.path_for_key(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StorageError::Io(err)),
        }
    }

    fn write(&self, key: &str, contents: &str) -> StorageResult<()> {
        let path = self.path_for_key(key)?;
        fs::create_dir_all(&self.root)?;

        let mut staging = path.clone().into_os_string();
        staging.push(TEMP_SUFFIX);
        let staging = PathBuf::from(staging);
        fs::write(&staging, contents)?;
        if let Err(err) = fs::rename(&staging, &path) {
            let _ = fs::remove_file(&staging);
            return Err(StorageError::Io(err));
        }
        Ok(())
    }
}

/// In-process store. Clones share the same blobs.
#[derive(Debug, Clone, Default)]
pub struct MemorySettingsStore {
    blobs: Rc<RefCell<HashMap<String, String>>>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blob(key: &str, contents: &str) -> Self {
        let store = Self::new();
        store
            .blobs
            .borrow_mut()
            .insert(key.to_string(), contents.to_string());
        store
    }
}

impl SettingsStore for MemorySettingsStore {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        validate_key(key)?;
        Ok(self.blobs.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, contents: &str) -> StorageResult<()> {
        validate_key(key)?;
        self.blobs
            .borrow_mut()
            .insert(key.to_string(), contents.to_string());
        Ok(())
    }
}

fn validate_key(key: &str) -> StorageResult<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

pub(crate) fn default_data_root(
    xdg_data_home: Option<&Path>,
    home: Option<&Path>,
) -> StorageResult<PathBuf> {
    let mut root = match xdg_data_home.filter(|path| !path.as_os_str().is_empty()) {
        Some(path) => path.to_path_buf(),
        None => {
            let home = home.ok_or(StorageError::MissingHomeDirectory)?;
            home.join(".local").join("share")
        }
    };
    root.push(crate::config::APP_DIR);
    Ok(root)
}
