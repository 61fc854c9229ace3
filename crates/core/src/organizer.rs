//! Moves tagged files into their tag folders.

use crate::config::OrganizeConfig;
use crate::error::{Result, TaggerError};
use crate::models::{CleanupReport, FileRecord, MoveFailure, MovedFile, TagFolderMap};
use crate::tags::TagAssigner;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct Organizer {
    default_base: PathBuf,
    copy_then_delete: bool,
    dry_run: bool,
}

impl Organizer {
    pub fn new(default_base: impl Into<PathBuf>) -> Self {
        Organizer {
            default_base: default_base.into(),
            copy_then_delete: false,
            dry_run: false,
        }
    }

    pub fn from_config(cfg: &OrganizeConfig) -> Self {
        Organizer::new(&cfg.default_base)
            .copy_then_delete(cfg.copy_then_delete)
            .dry_run(cfg.dry_run)
    }

    pub fn copy_then_delete(mut self, enabled: bool) -> Self {
        self.copy_then_delete = enabled;
        self
    }

    pub fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    /// Explicit folder for `tag`, else `<default_base>/<tag>`.
    pub fn destination_for(&self, tag: &str, folders: &TagFolderMap) -> PathBuf {
        folders
            .get(tag)
            .cloned()
            .unwrap_or_else(|| self.default_base.join(tag))
    }

    /// Moves every tagged file in `files` into its destination, keeping the
    /// base name. Untagged files are left alone. A failure is recorded and
    /// the batch carries on.
    pub fn cleanup(
        &self,
        files: &[FileRecord],
        tags: &TagAssigner,
        folders: &TagFolderMap,
    ) -> CleanupReport {
        let mut report = CleanupReport {
            dry_run: self.dry_run,
            ..CleanupReport::default()
        };
        for file in files {
            let Some(tag) = tags.get_tag(&file.name) else {
                continue;
            };
            let dest_dir = self.destination_for(tag, folders);
            let target = dest_dir.join(&file.name);
            let planned = MovedFile {
                file_name: file.name.clone(),
                tag: tag.to_string(),
                from: file.path.clone(),
                to: target.clone(),
            };
            if self.dry_run {
                report.moves.push(planned);
                continue;
            }
            match self.move_into(&file.path, &dest_dir, &target) {
                Ok(()) => {
                    info!("Moved {:?} -> {:?}", file.path, target);
                    report.moved_count += 1;
                    report.moves.push(planned);
                }
                Err(e) => {
                    warn!("Failed to move {}: {}", file.name, e);
                    report.failures.push(MoveFailure {
                        file_name: file.name.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }
        info!(
            "Cleanup finished: {} moved, {} failed",
            report.moved_count,
            report.failures.len()
        );
        report
    }

    fn move_into(&self, from: &Path, dest_dir: &Path, target: &Path) -> Result<()> {
        fs::create_dir_all(dest_dir)?;
        if target.exists() {
            return Err(TaggerError::DestinationExists {
                path: target.to_path_buf(),
            });
        }
        if self.copy_then_delete {
            return copy_and_remove(from, target);
        }
        match fs::rename(from, target) {
            Ok(()) => Ok(()),
            Err(e) if is_cross_device(&e) => {
                debug!("{:?} is on another filesystem, copying", target);
                copy_and_remove(from, target)
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Copy followed by removal of `from`. If the source cannot be removed the
/// copy is deleted again so a failed move leaves only the original.
fn copy_and_remove(from: &Path, target: &Path) -> Result<()> {
    fs::copy(from, target)?;
    if let Err(e) = fs::remove_file(from) {
        if let Err(cleanup) = fs::remove_file(target) {
            warn!("Could not remove partial copy {:?}: {}", target, cleanup);
        }
        return Err(e.into());
    }
    Ok(())
}

// EXDEV on unix, ERROR_NOT_SAME_DEVICE on windows.
fn is_cross_device(err: &io::Error) -> bool {
    let code = if cfg!(windows) { 17 } else { 18 };
    err.raw_os_error() == Some(code)
}
