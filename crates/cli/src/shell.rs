//! Interactive session: one command per line, dispatched against a single
//! `App` until `quit` or end of input.

use crate::commands::absolute_folder;
use crate::render;
use anyhow::Result;
use std::io::{BufRead, Write};
use std::path::Path;
use tagger_core::sort::SortKey;
use tagger_core::App;

const HELP: &str = "\
commands:
  scan                     rescan the source folders and list files
  list                     list files from the last scan
  tag <TAG> <FILE>...      tag files (quote names containing spaces)
  folder <TAG> <PATH>      set the destination folder for a tag
  folders                  show tag folders
  tags                     show known tags
  sort <COLUMN>            sort by name, tag, type or modified (repeat to reverse)
  preview                  show what cleanup would move
  cleanup                  move tagged files into their folders
  help                     show this help
  quit                     leave the session";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Scan,
    List,
    Tag { tag: String, files: Vec<String> },
    Folder { tag: String, path: String },
    Folders,
    Tags,
    Sort(SortKey),
    Preview,
    Cleanup,
    Help,
    Quit,
}

impl ShellCommand {
    /// `Ok(None)` for a blank line.
    pub fn parse(line: &str) -> std::result::Result<Option<Self>, String> {
        let words = split_words(line)?;
        let Some((head, rest)) = words.split_first() else {
            return Ok(None);
        };
        let cmd = match (head.to_lowercase().as_str(), rest) {
            ("scan", []) => ShellCommand::Scan,
            ("list" | "ls", []) => ShellCommand::List,
            ("tag", [tag, files @ ..]) => ShellCommand::Tag {
                tag: tag.clone(),
                files: files.to_vec(),
            },
            ("folder", [tag, path]) => ShellCommand::Folder {
                tag: tag.clone(),
                path: path.clone(),
            },
            ("folders", []) => ShellCommand::Folders,
            ("tags", []) => ShellCommand::Tags,
            ("sort", [column]) => ShellCommand::Sort(column.parse()?),
            ("preview", []) => ShellCommand::Preview,
            ("cleanup", []) => ShellCommand::Cleanup,
            ("help" | "?", _) => ShellCommand::Help,
            ("quit" | "exit", []) => ShellCommand::Quit,
            ("tag", []) => return Err("usage: tag <TAG> <FILE>...".into()),
            ("folder", _) => return Err("usage: folder <TAG> <PATH>".into()),
            ("sort", _) => return Err("usage: sort <name|tag|type|modified>".into()),
            (other, _) => return Err(format!("unknown command '{}' (try 'help')", other)),
        };
        Ok(Some(cmd))
    }
}

/// Whitespace-separated words; double quotes group a word containing
/// spaces.
pub fn split_words(line: &str) -> std::result::Result<Vec<String>, String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quoted = false;
    for c in line.chars() {
        match c {
            '"' => {
                quoted = !quoted;
                in_word = true;
            }
            c if c.is_whitespace() && !quoted => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            c => {
                current.push(c);
                in_word = true;
            }
        }
    }
    if quoted {
        return Err("unterminated quote".into());
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

enum Flow {
    Continue,
    Quit,
}

/// Scans once, then serves commands read from `input`. User errors are
/// printed and the session goes on; only I/O failures end it early.
pub fn run<R: BufRead, W: Write>(app: &mut App, mut input: R, out: &mut W) -> Result<()> {
    app.scan();
    render::files_table(out, &app.rows())?;
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        // Undecodable bytes become U+FFFD and fail as an unknown command or
        // file name instead of ending the session.
        let line = String::from_utf8_lossy(&buf);
        let cmd = match ShellCommand::parse(&line) {
            Ok(Some(cmd)) => cmd,
            Ok(None) => continue,
            Err(msg) => {
                writeln!(out, "error: {}", msg)?;
                continue;
            }
        };
        if let Flow::Quit = dispatch(app, cmd, out)? {
            break;
        }
    }
    Ok(())
}

fn dispatch<W: Write>(app: &mut App, cmd: ShellCommand, out: &mut W) -> Result<Flow> {
    match cmd {
        ShellCommand::Scan => {
            app.scan();
            render::files_table(out, &app.rows())?;
        }
        ShellCommand::List => render::files_table(out, &app.rows())?,
        ShellCommand::Tag { tag, files } => match app.assign_tag(&files, &tag) {
            Ok(n) => writeln!(out, "Tagged {} file(s) as '{}'.", n, tag.trim())?,
            Err(e) => writeln!(out, "error: {}", e)?,
        },
        ShellCommand::Folder { tag, path } => {
            let folder = absolute_folder(Path::new(&path))?;
            match app.set_folder(&tag, &folder) {
                Ok(()) => writeln!(
                    out,
                    "Tag '{}' assigned to folder:\n{}",
                    tag.trim(),
                    folder.display()
                )?,
                Err(e) => writeln!(out, "error: {}", e)?,
            }
        }
        ShellCommand::Folders => render::folders_table(out, app.folders())?,
        ShellCommand::Tags => {
            if app.known_tags().is_empty() {
                writeln!(out, "No tags yet.")?;
            }
            for tag in app.known_tags() {
                writeln!(out, "{}", tag)?;
            }
        }
        ShellCommand::Sort(key) => {
            let descending = app.sort_by_column(key);
            writeln!(
                out,
                "Sorted by {} ({}).",
                key,
                if descending { "descending" } else { "ascending" }
            )?;
            render::files_table(out, &app.rows())?;
        }
        ShellCommand::Preview => {
            let report = app
                .organizer()
                .clone()
                .dry_run(true)
                .cleanup(app.files(), app.tags(), app.folders());
            render::cleanup_summary(out, &report)?;
        }
        ShellCommand::Cleanup => {
            let report = app.cleanup();
            render::cleanup_summary(out, &report)?;
            render::files_table(out, &app.rows())?;
        }
        ShellCommand::Help => writeln!(out, "{}", HELP)?,
        ShellCommand::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}
