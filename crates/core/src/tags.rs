use crate::error::{Result, TaggerError};
use std::collections::HashMap;

/// Session-only map from file base name to tag.
///
/// Lookups are by name alone, so files sharing a name in different roots
/// share a tag.
#[derive(Debug, Clone, Default)]
pub struct TagAssigner {
    tags: HashMap<String, String>,
}

impl TagAssigner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tags every name in `file_names`, replacing earlier tags. The tag is
    /// trimmed; an empty tag or an empty selection is rejected without
    /// touching the map. Returns the number of names tagged.
    pub fn assign_tag<I, S>(&mut self, file_names: I, tag: &str) -> Result<usize>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = file_names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return Err(TaggerError::validation("Select a file to tag."));
        }
        let tag = tag.trim();
        if tag.is_empty() {
            return Err(TaggerError::validation("Enter or select a tag name."));
        }
        for name in &names {
            self.tags.insert(name.clone(), tag.to_string());
        }
        Ok(names.len())
    }

    pub fn get_tag(&self, file_name: &str) -> Option<&str> {
        self.tags.get(file_name).map(String::as_str)
    }

    /// Tag or the empty string, as shown in the table.
    pub fn tag_or_empty(&self, file_name: &str) -> &str {
        self.get_tag(file_name).unwrap_or("")
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }
}
