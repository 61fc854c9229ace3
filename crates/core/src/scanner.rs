//! Lists the top-level office documents in a fixed set of root folders.

use crate::error::{Result, TaggerError};
use crate::models::FileRecord;
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct Scanner {
    roots: Vec<PathBuf>,
    filter: GlobSet,
    files: Vec<FileRecord>,
}

impl Scanner {
    /// `extensions` may be given with or without the leading dot; matching
    /// ignores case.
    pub fn new(roots: Vec<PathBuf>, extensions: &[String]) -> Result<Self> {
        Ok(Scanner {
            roots,
            filter: build_extension_set(extensions)?,
            files: Vec::new(),
        })
    }

    /// Result of the last scan.
    pub fn files(&self) -> &[FileRecord] {
        &self.files
    }

    pub fn files_mut(&mut self) -> &mut Vec<FileRecord> {
        &mut self.files
    }

    /// Replaces the current result set with a fresh, non-recursive listing of
    /// every root. Missing roots are skipped.
    pub fn scan(&mut self) -> &[FileRecord] {
        let mut files = Vec::new();
        for root in &self.roots {
            if !root.is_dir() {
                debug!("Skipping missing scan root {:?}", root);
                continue;
            }
            let before = files.len();
            for entry in WalkDir::new(root)
                .min_depth(1)
                .max_depth(1)
                .sort_by_file_name()
            {
                let entry = match entry {
                    Ok(e) => e,
                    Err(e) => {
                        warn!("Unreadable entry under {:?}: {}", root, e);
                        continue;
                    }
                };
                if !entry.file_type().is_file() || !self.accepts(entry.path()) {
                    continue;
                }
                match record_for(entry.path()) {
                    Some(record) => files.push(record),
                    None => debug!("No metadata for {:?}", entry.path()),
                }
            }
            debug!("Scanned {:?}: {} matching files", root, files.len() - before);
        }
        self.files = files;
        &self.files
    }

    pub fn accepts(&self, path: &Path) -> bool {
        // A bare dotfile such as `.csv` has no extension.
        let has_ext = path.extension().is_some();
        has_ext
            && path
                .file_name()
                .map(|name| self.filter.is_match(Path::new(name)))
                .unwrap_or(false)
    }
}

fn record_for(path: &Path) -> Option<FileRecord> {
    let meta = fs::metadata(path).ok()?;
    let mtime = meta
        .modified()
        .ok()
        .and_then(|t| t.duration_since(std::time::UNIX_EPOCH).ok())
        .map(|d| d.as_secs() as i64)
        .unwrap_or_default();
    Some(FileRecord {
        path: path.to_path_buf(),
        name: path.file_name()?.to_string_lossy().into_owned(),
        ext: path
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_default(),
        size: meta.len(),
        mtime,
    })
}

fn build_extension_set(extensions: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for ext in extensions {
        let ext = ext.trim().trim_start_matches('.');
        if ext.is_empty() {
            continue;
        }
        let glob = GlobBuilder::new(&format!("*.{}", ext))
            .case_insensitive(true)
            .literal_separator(true)
            .build()
            .map_err(|e| TaggerError::Config(format!("bad extension {:?}: {}", ext, e)))?;
        builder.add(glob);
    }
    builder
        .build()
        .map_err(|e| TaggerError::Config(format!("bad extension filter: {}", e)))
}
