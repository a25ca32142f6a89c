//! Repository locator keys.
//!
//! A locator identifies a stored file independent of physical location as a
//! colon-delimited key with two or three segments:
//!
//! ```text
//! default:test-file.txt                repository + file
//! amazon-s3:2014/15/06:123-456-798     repository + folder + file
//! ```
//!
//! The key is the wire format: the persistence layer stores it as an opaque
//! string column and hands it back verbatim. Parsing determines arity purely
//! from the segment count — exactly 2 segments means no folder, exactly 3
//! means a folder is present, anything else is malformed. An empty middle
//! segment (`repo::file`) normalizes to "no folder".

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedLocatorError {
    #[error("locator key must contain 2 or 3 segments separated with ':', got {0}")]
    SegmentCount(usize),
    #[error("a non-empty repository id is required")]
    EmptyRepositoryId,
    #[error("a non-empty file id is required")]
    EmptyFileId,
}

/// A single file in a specific repository, optionally within a folder.
///
/// Construction enforces that `repository_id` and `file_id` are non-empty,
/// so every value of this type serializes to a parseable key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RepositoryLocator {
    repository_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    folder_id: Option<String>,
    file_id: String,
}

impl RepositoryLocator {
    /// Create a locator. An empty or absent folder id means the file lives
    /// in the repository root.
    pub fn new(
        repository_id: &str,
        folder_id: Option<&str>,
        file_id: &str,
    ) -> Result<Self, MalformedLocatorError> {
        if repository_id.is_empty() {
            return Err(MalformedLocatorError::EmptyRepositoryId);
        }
        if file_id.is_empty() {
            return Err(MalformedLocatorError::EmptyFileId);
        }
        Ok(Self {
            repository_id: repository_id.to_string(),
            folder_id: folder_id.filter(|f| !f.is_empty()).map(str::to_string),
            file_id: file_id.to_string(),
        })
    }

    /// Parse a colon-delimited locator key.
    pub fn parse_key(key: &str) -> Result<Self, MalformedLocatorError> {
        let parts: Vec<&str> = key.split(':').collect();
        match parts.as_slice() {
            [repository_id, file_id] => Self::new(repository_id, None, file_id),
            [repository_id, folder_id, file_id] => {
                Self::new(repository_id, Some(folder_id), file_id)
            }
            other => Err(MalformedLocatorError::SegmentCount(other.len())),
        }
    }

    /// Serialize back to the colon-delimited key.
    pub fn to_key(&self) -> String {
        match &self.folder_id {
            Some(folder_id) => format!("{}:{}:{}", self.repository_id, folder_id, self.file_id),
            None => format!("{}:{}", self.repository_id, self.file_id),
        }
    }

    pub fn repository_id(&self) -> &str {
        &self.repository_id
    }

    /// Folder within the repository, `None` for the repository root.
    pub fn folder_id(&self) -> Option<&str> {
        self.folder_id.as_deref()
    }

    pub fn file_id(&self) -> &str {
        &self.file_id
    }

    /// Extension of the file id — the segment after its last dot, empty
    /// string if it has none.
    pub fn extension(&self) -> &str {
        extension_of(&self.file_id)
    }

    /// Clone this locator with the file id's extension replaced.
    ///
    /// An empty `extension` removes any current extension instead; a missing
    /// one is added. Useful for deriving generated files that must carry the
    /// same extension as their original.
    pub fn with_extension(&self, extension: &str) -> Result<Self, MalformedLocatorError> {
        let stem = match self.file_id.rsplit_once('.') {
            Some((stem, _)) => stem,
            None => &self.file_id,
        };
        let file_id = if extension.is_empty() {
            stem.to_string()
        } else {
            format!("{}.{}", stem, extension.trim_start_matches('.'))
        };
        Self::new(&self.repository_id, self.folder_id.as_deref(), &file_id)
    }

    /// Clone this locator with the extension taken from another path.
    pub fn with_extension_from(&self, path: &str) -> Result<Self, MalformedLocatorError> {
        self.with_extension(extension_of(path))
    }

    /// Clone this locator with a suffix appended to the file id.
    pub fn with_suffix(&self, suffix: &str) -> Self {
        Self {
            repository_id: self.repository_id.clone(),
            folder_id: self.folder_id.clone(),
            file_id: format!("{}{}", self.file_id, suffix),
        }
    }
}

impl fmt::Display for RepositoryLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_key())
    }
}

impl FromStr for RepositoryLocator {
    type Err = MalformedLocatorError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        Self::parse_key(key)
    }
}

/// Extension of a path's trailing segment, empty string if none.
fn extension_of(path: &str) -> &str {
    let file_name = path.rsplit_once('/').map_or(path, |(_, name)| name);
    file_name.rsplit_once('.').map_or("", |(_, ext)| ext)
}
