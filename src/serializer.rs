//! Serialization of the final OpenAPI document to YAML or JSON.

use crate::openapi_builder::OpenApiDocument;
use anyhow::{Context, Result};
use log::debug;
use std::fs;
use std::path::Path;

/// Serializes an OpenAPI document to YAML.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn serialize_yaml(doc: &OpenApiDocument) -> Result<String> {
    debug!("serializing OpenAPI document to YAML");
    serde_yaml::to_string(doc).context("Failed to serialize OpenAPI document to YAML")
}

/// Serializes an OpenAPI document to pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn serialize_json(doc: &OpenApiDocument) -> Result<String> {
    debug!("serializing OpenAPI document to JSON");
    serde_json::to_string_pretty(doc).context("Failed to serialize OpenAPI document to JSON")
}

/// Writes string content to a file, creating parent directories as needed.
///
/// # Errors
///
/// Returns an error if a directory or the file cannot be created or written.
pub fn write_to_file(content: &str, path: &Path) -> Result<()> {
    debug!("writing document to {}", path.display());

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    fs::write(path, content)
        .with_context(|| format!("Failed to write to file: {}", path.display()))?;

    debug!("wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::Route;
    use crate::openapi_builder::OpenApiBuilder;
    use tempfile::TempDir;

    fn create_test_document() -> OpenApiDocument {
        let mut builder =
            OpenApiBuilder::new().with_info("Test API", "1.0.0", Some("A test API".to_string()));
        builder.add_route(&Route::new("/health", "get"));
        builder.build()
    }

    #[test]
    fn test_serialize_yaml() {
        let yaml = serialize_yaml(&create_test_document()).unwrap();

        assert!(yaml.contains("openapi:"));
        assert!(yaml.contains("3.0.0"));
        assert!(yaml.contains("title: Test API"));
        assert!(yaml.contains("/health"));
    }

    #[test]
    fn test_serialize_json_round_trips() {
        let json = serialize_json(&create_test_document()).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["openapi"], "3.0.0");
        assert_eq!(parsed["info"]["title"], "Test API");
        assert!(parsed["paths"]["/health"]["get"].is_object());
    }

    #[test]
    fn test_json_is_pretty_printed() {
        let json = serialize_json(&create_test_document()).unwrap();
        assert!(json.contains('\n'));
        assert!(json.contains("  "));
    }

    #[test]
    fn test_write_to_file_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("docs/api/openapi.json");

        write_to_file("{}", &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn test_write_to_file_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("openapi.yaml");

        write_to_file("first", &path).unwrap();
        write_to_file("second", &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
    }
}
