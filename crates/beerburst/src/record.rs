//! Input records and loading

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;

/// One entry of the flat description list.
///
/// `name` is optional so that malformed entries deserialize and can be
/// skipped by the builder instead of failing the whole file.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DescriptionRecord {
    /// Unique description name
    #[serde(default)]
    pub name: Option<String>,

    /// Name of the parent description, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

impl DescriptionRecord {
    /// A record with no parent.
    pub fn root(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            parent: None,
        }
    }

    /// A record attached to `parent`.
    pub fn child(name: impl Into<String>, parent: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            parent: Some(parent.into()),
        }
    }

    /// The name, if present and non-empty.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.is_empty())
    }

    /// The parent name, if present and non-empty.
    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref().filter(|p| !p.is_empty())
    }
}

/// Parse records from a JSON string.
pub fn parse_records(json: &str) -> Result<Vec<DescriptionRecord>> {
    Ok(serde_json::from_str(json)?)
}

/// Read records from any reader holding a JSON array.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<DescriptionRecord>> {
    Ok(serde_json::from_reader(reader)?)
}

/// Load records from a JSON file on disk.
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<DescriptionRecord>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let records = read_records(BufReader::new(file))?;
    debug!(path = %path.display(), count = records.len(), "loaded description records");
    Ok(records)
}
