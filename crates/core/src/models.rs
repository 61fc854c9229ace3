use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// One regular file discovered by a scan. Rebuilt from scratch on every scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub path: PathBuf,
    /// Base name; the key used for tag lookups.
    pub name: String,
    /// Extension without the leading dot, case preserved.
    pub ext: String,
    pub size: u64,
    /// Seconds since the Unix epoch.
    pub mtime: i64,
}

impl FileRecord {
    /// Extension as shown in the type column, e.g. `.xlsx`.
    pub fn suffix(&self) -> String {
        format!(".{}", self.ext)
    }

    pub fn modified_display(&self) -> String {
        DateTime::from_timestamp(self.mtime, 0)
            .map(|t| t.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default()
    }
}

/// Tag name to destination folder, persisted as a flat JSON object.
pub type TagFolderMap = BTreeMap<String, PathBuf>;

/// A file that was moved (or, in a dry run, would be moved).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovedFile {
    pub file_name: String,
    pub tag: String,
    pub from: PathBuf,
    pub to: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveFailure {
    pub file_name: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CleanupReport {
    pub moved_count: usize,
    pub dry_run: bool,
    pub moves: Vec<MovedFile>,
    pub failures: Vec<MoveFailure>,
}

/// Row of the file table: name, tag, type, modified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRow {
    pub name: String,
    pub tag: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub modified: String,
    pub path: PathBuf,
}
