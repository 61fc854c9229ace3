use crate::models::FileRecord;
use crate::tags::TagAssigner;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Sortable columns of the file table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Name,
    Tag,
    #[serde(rename = "type")]
    Extension,
    Modified,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name" | "filename" => Ok(SortKey::Name),
            "tag" => Ok(SortKey::Tag),
            "type" | "ext" | "extension" => Ok(SortKey::Extension),
            "modified" | "mtime" => Ok(SortKey::Modified),
            other => Err(format!(
                "unknown sort column '{}' (expected name, tag, type or modified)",
                other
            )),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SortKey::Name => "name",
            SortKey::Tag => "tag",
            SortKey::Extension => "type",
            SortKey::Modified => "modified",
        };
        f.write_str(label)
    }
}

/// Stable sort: records with equal keys keep their relative order in both
/// directions. Names and tags compare case-insensitively; a missing tag
/// sorts as the empty string.
pub fn sort_files(files: &mut [FileRecord], key: SortKey, descending: bool, tags: &TagAssigner) {
    files.sort_by(|a, b| {
        let ord = compare(a, b, key, tags);
        if descending {
            ord.reverse()
        } else {
            ord
        }
    });
}

fn compare(a: &FileRecord, b: &FileRecord, key: SortKey, tags: &TagAssigner) -> Ordering {
    match key {
        SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        SortKey::Tag => tags
            .tag_or_empty(&a.name)
            .to_lowercase()
            .cmp(&tags.tag_or_empty(&b.name).to_lowercase()),
        SortKey::Extension => a.ext.cmp(&b.ext),
        SortKey::Modified => a.mtime.cmp(&b.mtime),
    }
}

/// Per-column direction toggle. The first sort on a column is ascending,
/// each further one flips it.
#[derive(Debug, Clone, Default)]
pub struct SortState {
    next_descending: HashMap<SortKey, bool>,
}

impl SortState {
    /// Returns the direction to use now (`true` = descending) and flips the
    /// stored one.
    pub fn toggle(&mut self, key: SortKey) -> bool {
        let descending = self.next_descending.get(&key).copied().unwrap_or(false);
        self.next_descending.insert(key, !descending);
        descending
    }
}
