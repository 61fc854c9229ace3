//! One-shot subcommand handlers.

use crate::render;
use anyhow::{bail, Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tagger_core::sort::SortKey;
use tagger_core::App;

/// `TAG=FILE[,FILE...]` as given to `cleanup --assign`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub tag: String,
    pub files: Vec<String>,
}

pub fn parse_assignment(raw: &str) -> Result<Assignment> {
    let Some((tag, files)) = raw.split_once('=') else {
        bail!("expected TAG=FILE[,FILE...], got '{}'", raw);
    };
    let files: Vec<String> = files
        .split(',')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(String::from)
        .collect();
    Ok(Assignment {
        tag: tag.trim().to_string(),
        files,
    })
}

/// Relative folders are anchored at the current directory before they are
/// persisted.
pub fn absolute_folder(folder: &Path) -> Result<PathBuf> {
    if folder.is_absolute() {
        return Ok(folder.to_path_buf());
    }
    let cwd = std::env::current_dir().context("could not read current directory")?;
    Ok(cwd.join(folder))
}

pub fn run_scan<W: Write>(
    app: &mut App,
    sort: Option<SortKey>,
    descending: bool,
    json: bool,
    out: &mut W,
) -> Result<()> {
    app.scan();
    if let Some(key) = sort {
        app.sort(key, descending);
    }
    let rows = app.rows();
    if json {
        render::json(out, &rows)?;
    } else {
        render::files_table(out, &rows)?;
    }
    Ok(())
}

pub fn run_folders<W: Write>(app: &App, json: bool, out: &mut W) -> Result<()> {
    if json {
        render::json(out, app.folders())?;
    } else {
        render::folders_table(out, app.folders())?;
    }
    Ok(())
}

pub fn run_set_folder<W: Write>(app: &mut App, tag: &str, folder: &Path, out: &mut W) -> Result<()> {
    let folder = absolute_folder(folder)?;
    app.set_folder(tag, &folder)?;
    writeln!(out, "Tag '{}' assigned to folder:\n{}", tag.trim(), folder.display())?;
    Ok(())
}

pub fn run_cleanup<W: Write>(
    app: &mut App,
    assignments: &[Assignment],
    dry_run: bool,
    json: bool,
    out: &mut W,
) -> Result<()> {
    app.scan();
    for a in assignments {
        app.assign_tag(&a.files, &a.tag)
            .with_context(|| format!("cannot tag {:?} as '{}'", a.files, a.tag))?;
    }
    if dry_run {
        app.set_dry_run(true);
    }
    let report = app.cleanup();
    if json {
        render::json(out, &report)?;
    } else {
        render::cleanup_summary(out, &report)?;
    }
    Ok(())
}
