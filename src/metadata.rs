//! Field metadata reader.
//!
//! Parses the raw metadata string of one struct field into key lookups. The
//! grammar is struct-tag syntax: space-separated `key:"value"` pairs, where
//! the value splits on commas into a name and an ordered option list, e.g.
//! `validate:"required,min=1,max=10"`.

use crate::error::{Error, Result};
use log::debug;

/// Metadata key for the body/serialization name of a field
pub const JSON: &str = "json";
/// Metadata key binding a field to the query string
pub const QUERY: &str = "query";
/// Metadata key binding a field to a path segment
pub const PATH: &str = "path";
/// Metadata key binding a field to a request header
pub const HEADER: &str = "header";
/// Metadata key binding a field to a cookie
pub const COOKIE: &str = "cookie";
/// Metadata key holding a validation expression
pub const VALIDATE: &str = "validate";
/// Metadata key holding a human-readable description
pub const DESCRIPTION: &str = "description";
/// Metadata key holding a default value
pub const DEFAULT: &str = "default";
/// Metadata key holding an example value
pub const EXAMPLE: &str = "example";
/// Metadata key flattening the field's own properties into the parent
pub const EMBED: &str = "embed";
/// Validation expression name marking a field or parameter as required
pub const REQUIRED: &str = "required";

/// The parsed value of one metadata key: a name and its trailing options.
///
/// For `validate:"required,min=1"` the name is `required` and the options are
/// `["min=1"]`. A bare `key:""` yields an empty name and no options, which is
/// distinguishable from the key being absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagValue {
    /// First comma-separated element of the value
    pub name: String,
    /// Remaining comma-separated elements, in order
    pub options: Vec<String>,
}

/// Read-only view over one field's raw metadata string
#[derive(Debug, Clone, Default)]
pub struct FieldMetadata {
    entries: Vec<(String, TagValue)>,
}

impl FieldMetadata {
    /// Parses a raw metadata string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MetadataSyntax`] on a key without `:"` or on an
    /// unbalanced quote. Synthesis of the enclosing model aborts on this
    /// error.
    pub fn parse(raw: &str) -> Result<Self> {
        let mut entries = Vec::new();
        let mut rest = raw.trim_start();

        while !rest.is_empty() {
            let colon = rest.find(':').ok_or_else(|| {
                Error::MetadataSyntax(format!("missing ':' in metadata {:?}", raw))
            })?;
            let key = rest[..colon].trim();
            if key.is_empty() || key.contains(char::is_whitespace) || key.contains(',') {
                return Err(Error::MetadataSyntax(format!(
                    "bad key {:?} in metadata {:?}",
                    key, raw
                )));
            }

            let value = rest[colon + 1..].strip_prefix('"').ok_or_else(|| {
                Error::MetadataSyntax(format!("missing opening quote in metadata {:?}", raw))
            })?;
            let end = value.find('"').ok_or_else(|| {
                Error::MetadataSyntax(format!("unbalanced quote in metadata {:?}", raw))
            })?;

            entries.push((key.to_string(), TagValue::parse(&value[..end])));
            rest = value[end + 1..].trim_start();
        }

        debug!("parsed {} metadata entries from {:?}", entries.len(), raw);
        Ok(Self { entries })
    }

    /// Looks up a key, returning `None` when it is absent.
    ///
    /// When a key is repeated, the first occurrence wins.
    pub fn get(&self, key: &str) -> Option<&TagValue> {
        self.entries
            .iter()
            .find(|(entry_key, _)| entry_key == key)
            .map(|(_, value)| value)
    }
}

impl TagValue {
    fn parse(value: &str) -> Self {
        let mut items = value.split(',');
        let name = items.next().unwrap_or_default().to_string();
        let options = items.map(str::to_string).collect();
        Self { name, options }
    }
}
