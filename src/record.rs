//! Version records
//!
//! A metadata record file holds one JSON object per line, one per published
//! version. Only the `vers` field is interpreted; every other field is kept
//! verbatim so the derived metadata file is a faithful copy of the record.

use serde_json::{Map, Value};

/// Key holding the version identifier
pub const VERSION_KEY: &str = "vers";

/// One published version of a package
#[derive(Debug, Clone, PartialEq)]
pub struct VersionRecord {
    version: String,
    fields: Map<String, Value>,
}

impl VersionRecord {
    /// Wrap a parsed object, returning `None` unless `vers` is a non-empty string
    pub fn from_fields(fields: Map<String, Value>) -> Option<Self> {
        let version = match fields.get(VERSION_KEY) {
            Some(Value::String(v)) if !v.is_empty() => v.clone(),
            _ => return None,
        };
        Some(Self { version, fields })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Pretty-printed JSON with two-space indentation
    pub fn to_pretty_json(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec_pretty(&self.fields)
    }
}

/// Classification of a single line of a record file
#[derive(Debug)]
pub enum RecordLine {
    /// Empty or whitespace only
    Blank,
    /// Not shaped like `{...}`; never handed to the parser
    NotAnObject,
    /// Shaped like an object but not valid JSON
    Malformed(serde_json::Error),
    /// Valid object without a usable `vers` field
    Unversioned,
    Version(VersionRecord),
}

/// Cheap shape check run before the JSON parser.
///
/// Anything rejected here would also be rejected as an object by the parser,
/// so the check only saves work.
pub fn looks_like_object(line: &str) -> bool {
    line.starts_with('{') && line.ends_with('}')
}

/// Classify one raw line of a record file
pub fn parse_line(line: &str) -> RecordLine {
    let line = line.trim();
    if line.is_empty() {
        return RecordLine::Blank;
    }
    if !looks_like_object(line) {
        return RecordLine::NotAnObject;
    }
    match serde_json::from_str::<Map<String, Value>>(line) {
        Ok(fields) => match VersionRecord::from_fields(fields) {
            Some(record) => RecordLine::Version(record),
            None => RecordLine::Unversioned,
        },
        Err(e) => RecordLine::Malformed(e),
    }
}
