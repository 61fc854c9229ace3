//! Text and JSON output for the file table and reports.

use serde::Serialize;
use std::io::{self, Write};
use tagger_core::models::{CleanupReport, FileRow, TagFolderMap};

const HEADERS: [&str; 4] = ["Filename", "Tag", "Type", "Modified"];

pub fn json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> io::Result<()> {
    let text = serde_json::to_string_pretty(value).map_err(io::Error::from)?;
    writeln!(out, "{}", text)
}

pub fn files_table<W: Write>(out: &mut W, rows: &[FileRow]) -> io::Result<()> {
    if rows.is_empty() {
        return writeln!(out, "No matching files found.");
    }
    let cells: Vec<[&str; 4]> = rows
        .iter()
        .map(|r| [r.name.as_str(), r.tag.as_str(), r.kind.as_str(), r.modified.as_str()])
        .collect();
    let mut widths = HEADERS.map(str::len);
    for row in &cells {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }
    write_row(out, &HEADERS, &widths)?;
    for row in &cells {
        write_row(out, row, &widths)?;
    }
    Ok(())
}

fn write_row<W: Write>(out: &mut W, cells: &[&str; 4], widths: &[usize; 4]) -> io::Result<()> {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, w)| format!("{:<width$}", cell, width = *w))
        .collect::<Vec<_>>()
        .join("  ");
    writeln!(out, "{}", line.trim_end())
}

pub fn folders_table<W: Write>(out: &mut W, folders: &TagFolderMap) -> io::Result<()> {
    if folders.is_empty() {
        return writeln!(out, "No tag folders configured.");
    }
    let width = folders.keys().map(|k| k.chars().count()).max().unwrap_or(0);
    for (tag, folder) in folders {
        writeln!(out, "{:<width$}  {}", tag, folder.display(), width = width)?;
    }
    Ok(())
}

pub fn cleanup_summary<W: Write>(out: &mut W, report: &CleanupReport) -> io::Result<()> {
    if report.dry_run {
        for m in &report.moves {
            writeln!(out, "would move {} -> {}", m.from.display(), m.to.display())?;
        }
        return writeln!(out, "dry-run: {} files would be moved.", report.moves.len());
    }
    for f in &report.failures {
        writeln!(out, "Failed to move {}: {}", f.file_name, f.reason)?;
    }
    writeln!(out, "{} files moved successfully.", report.moved_count)?;
    if !report.failures.is_empty() {
        writeln!(out, "{} files could not be moved.", report.failures.len())?;
    }
    Ok(())
}
