//! Session state and the command handlers the front ends call.

use crate::config::AppConfig;
use crate::error::{Result, TaggerError};
use crate::models::{CleanupReport, FileRecord, FileRow, TagFolderMap};
use crate::organizer::Organizer;
use crate::scanner::Scanner;
use crate::sort::{self, SortKey, SortState};
use crate::tag_store::TagStore;
use crate::tags::TagAssigner;
use std::path::PathBuf;
use tracing::info;

/// Everything a session mutates: scanned files, tags, the persisted folder
/// map and the sort toggles. Created at startup, dropped at exit; only the
/// folder map is written to disk.
#[derive(Debug)]
pub struct App {
    scanner: Scanner,
    tags: TagAssigner,
    store: TagStore,
    organizer: Organizer,
    sort_state: SortState,
    known_tags: Vec<String>,
}

impl App {
    pub fn new(scanner: Scanner, store: TagStore, organizer: Organizer) -> Self {
        let known_tags = store.folders().keys().cloned().collect();
        App {
            scanner,
            tags: TagAssigner::new(),
            store,
            organizer,
            sort_state: SortState::default(),
            known_tags,
        }
    }

    pub fn from_config(cfg: &AppConfig) -> Result<Self> {
        let scanner = Scanner::new(cfg.roots(), &cfg.scan.extensions)?;
        let store = TagStore::open(&cfg.store.tag_config);
        Ok(App::new(scanner, store, Organizer::from_config(&cfg.organize)))
    }

    pub fn set_dry_run(&mut self, enabled: bool) {
        self.organizer = self.organizer.clone().dry_run(enabled);
    }

    pub fn scan(&mut self) -> &[FileRecord] {
        let files = self.scanner.scan();
        info!("Scan found {} files", files.len());
        files
    }

    pub fn files(&self) -> &[FileRecord] {
        self.scanner.files()
    }

    pub fn tags(&self) -> &TagAssigner {
        &self.tags
    }

    pub fn folders(&self) -> &TagFolderMap {
        self.store.folders()
    }

    pub fn organizer(&self) -> &Organizer {
        &self.organizer
    }

    /// Tags from the folder map plus every tag assigned this session, in
    /// first-seen order.
    pub fn known_tags(&self) -> &[String] {
        &self.known_tags
    }

    /// Tags the named files. Every name must belong to the current scan.
    pub fn assign_tag<S: AsRef<str>>(&mut self, file_names: &[S], tag: &str) -> Result<usize> {
        if let Some(unknown) = file_names
            .iter()
            .map(AsRef::as_ref)
            .find(|name| !self.files().iter().any(|f| f.name == *name))
        {
            return Err(TaggerError::validation(format!(
                "No scanned file named '{}'.",
                unknown
            )));
        }
        let count = self
            .tags
            .assign_tag(file_names.iter().map(|n| n.as_ref().to_string()), tag)?;
        self.remember_tag(tag.trim());
        Ok(count)
    }

    pub fn set_folder(&mut self, tag: &str, folder: impl Into<PathBuf>) -> Result<()> {
        self.store.set_folder(tag, folder)?;
        self.remember_tag(tag.trim());
        Ok(())
    }

    /// Runs the organizer over the current scan, then rescans so moved files
    /// drop out of the list.
    pub fn cleanup(&mut self) -> CleanupReport {
        let report = self
            .organizer
            .cleanup(self.scanner.files(), &self.tags, self.store.folders());
        self.scan();
        report
    }

    /// Sorts the current file list by `key`, alternating direction on each
    /// call for the same column. Returns `true` when the sort was descending.
    pub fn sort_by_column(&mut self, key: SortKey) -> bool {
        let descending = self.sort_state.toggle(key);
        self.sort(key, descending);
        descending
    }

    pub fn sort(&mut self, key: SortKey, descending: bool) {
        sort::sort_files(self.scanner.files_mut(), key, descending, &self.tags);
    }

    pub fn rows(&self) -> Vec<FileRow> {
        self.files()
            .iter()
            .map(|f| FileRow {
                name: f.name.clone(),
                tag: self.tags.tag_or_empty(&f.name).to_string(),
                kind: f.suffix(),
                modified: f.modified_display(),
                path: f.path.clone(),
            })
            .collect()
    }

    fn remember_tag(&mut self, tag: &str) {
        if !tag.is_empty() && !self.known_tags.iter().any(|t| t == tag) {
            self.known_tags.push(tag.to_string());
        }
    }
}
