//! Repository contents domain types.
//!
//! This module contains the types returned by the GitHub Contents API, both
//! for directory listings and for single files.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

use crate::Error;

#[cfg(test)]
#[path = "contents_tests.rs"]
mod tests;

/// A single entry in a GitHub repository directory listing.
///
/// # Examples
///
/// ```rust
/// use github_client::{TreeEntry, EntryType};
///
/// let entry = TreeEntry {
///     name: "web".to_string(),
///     path: "deployment/k8s/prod/web".to_string(),
///     entry_type: EntryType::Dir,
///     sha: "abc123".to_string(),
///     size: 0,
///     download_url: None,
/// };
///
/// assert!(entry.is_dir());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeEntry {
    /// Entry name (e.g., "web", "values.yaml")
    pub name: String,

    /// Full path within repository (e.g., "deployment/k8s/prod/web")
    pub path: String,

    /// Entry type (file, directory, symlink, submodule)
    #[serde(rename = "type")]
    pub entry_type: EntryType,

    /// Git SHA of the entry
    #[serde(default)]
    pub sha: String,

    /// Size in bytes (0 for directories)
    #[serde(default)]
    pub size: u64,

    /// Download URL for files (None for directories)
    #[serde(default)]
    pub download_url: Option<String>,
}

impl TreeEntry {
    /// Returns `true` when the entry is a directory.
    pub fn is_dir(&self) -> bool {
        self.entry_type == EntryType::Dir
    }

    /// Returns `true` when the entry is a regular file.
    pub fn is_file(&self) -> bool {
        self.entry_type == EntryType::File
    }
}

/// Type of entry in a repository directory.
///
/// Maps to GitHub's content type field in the Contents API response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    /// Regular file
    File,

    /// Directory (can contain other entries)
    Dir,

    /// Symbolic link
    Symlink,

    /// Git submodule reference
    Submodule,
}

/// A single file as returned by the Contents API when the path names a file.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct FileContent {
    #[serde(rename = "type")]
    pub entry_type: EntryType,

    #[serde(default)]
    pub content: Option<String>,

    #[serde(default)]
    pub encoding: Option<String>,
}

impl FileContent {
    /// Decodes the file body into UTF-8 text.
    ///
    /// GitHub wraps base64 content at 60 columns, so embedded whitespace is
    /// stripped before decoding.
    pub(crate) fn decode(&self) -> Result<String, Error> {
        if self.entry_type != EntryType::File {
            return Err(Error::InvalidResponse);
        }

        let raw = self.content.as_deref().unwrap_or_default();
        match self.encoding.as_deref() {
            Some("base64") => {
                let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
                let bytes = STANDARD
                    .decode(compact.as_bytes())
                    .map_err(|_| Error::InvalidResponse)?;
                String::from_utf8(bytes).map_err(|_| Error::InvalidResponse)
            }
            Some("") | None => Ok(raw.to_string()),
            Some(_) => Err(Error::InvalidResponse),
        }
    }
}
