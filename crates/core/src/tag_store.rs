//! Persisted tag -> folder mapping.

use crate::error::{Result, TaggerError};
use crate::models::TagFolderMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct TagStore {
    path: PathBuf,
    folders: TagFolderMap,
}

impl TagStore {
    /// Opens the store at `path`, loading whatever mapping is already there.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let mut store = TagStore {
            path: path.into(),
            folders: TagFolderMap::new(),
        };
        store.folders = store.load();
        store
    }

    pub fn folders(&self) -> &TagFolderMap {
        &self.folders
    }

    pub fn folder_for(&self, tag: &str) -> Option<&Path> {
        self.folders.get(tag).map(PathBuf::as_path)
    }

    /// Reads the mapping from disk. A missing, unreadable or malformed file
    /// counts as no prior configuration.
    pub fn load(&self) -> TagFolderMap {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No tag config at {:?}", self.path);
                return TagFolderMap::new();
            }
            Err(e) => {
                warn!("Could not read tag config {:?}: {}", self.path, e);
                return TagFolderMap::new();
            }
        };
        match serde_json::from_str::<TagFolderMap>(&content) {
            Ok(map) => map,
            Err(e) => {
                warn!("Ignoring malformed tag config {:?}: {}", self.path, e);
                TagFolderMap::new()
            }
        }
    }

    /// Overwrites the file with `map`.
    pub fn save(&self, map: &TagFolderMap) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(map)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Maps `tag` (trimmed) to `folder` and persists immediately. If the
    /// write fails the in-memory mapping is rolled back.
    pub fn set_folder(&mut self, tag: &str, folder: impl Into<PathBuf>) -> Result<()> {
        let tag = tag.trim();
        if tag.is_empty() {
            return Err(TaggerError::validation("Enter or select a tag first."));
        }
        let folder = folder.into();
        let previous = self.folders.insert(tag.to_string(), folder.clone());
        if let Err(e) = self.save(&self.folders) {
            match previous {
                Some(p) => self.folders.insert(tag.to_string(), p),
                None => self.folders.remove(tag),
            };
            return Err(e);
        }
        info!("Tag '{}' assigned to folder {:?}", tag, folder);
        Ok(())
    }
}
