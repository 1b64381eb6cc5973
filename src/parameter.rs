//! Parameter extractor.
//!
//! Walks the top-level fields of a request model and turns every field that
//! carries a binding key into a typed parameter. Binding keys are checked in
//! the fixed priority order query, path, header, cookie; the first key
//! present wins and supplies the parameter name. Fields with no binding key
//! contribute nothing and are skipped silently.

use crate::constraint::validate_schema;
use crate::descriptor::TypeDescriptor;
use crate::error::{Error, Result};
use crate::metadata::{self, FieldMetadata};
use crate::schema::{schema_for_type, Schema};
use log::debug;

/// Where an inbound parameter value is read from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterLocation {
    /// Query-string parameter
    Query,
    /// Path-segment parameter
    Path,
    /// Request-header parameter
    Header,
    /// Cookie parameter
    Cookie,
}

impl ParameterLocation {
    /// The OpenAPI `in` value for this location
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterLocation::Query => "query",
            ParameterLocation::Path => "path",
            ParameterLocation::Header => "header",
            ParameterLocation::Cookie => "cookie",
        }
    }
}

/// A typed request parameter extracted from one model field.
///
/// A `Parameter` always has a resolved location; fields that resolve to none
/// are discarded during extraction rather than kept in a half-built state.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    /// Parameter name, taken from the winning binding key's value
    pub name: String,
    /// Binding location
    pub location: ParameterLocation,
    /// Whether the parameter is required
    pub required: bool,
    /// Human-readable description
    pub description: Option<String>,
    /// Schema of the parameter value
    pub schema: Schema,
}

/// Binding keys in priority order
const BINDING_KEYS: [(&str, ParameterLocation); 4] = [
    (metadata::QUERY, ParameterLocation::Query),
    (metadata::PATH, ParameterLocation::Path),
    (metadata::HEADER, ParameterLocation::Header),
    (metadata::COOKIE, ParameterLocation::Cookie),
];

/// Extracts the parameter list of a request model, in field declaration
/// order.
///
/// An absent or non-composite model yields an empty list. A field with an
/// `embed` marker contributes the parameters of its own type, flattened in
/// place.
///
/// # Errors
///
/// Aborts on malformed field metadata or on a bad validation option; the
/// assembler drops the owning route in that case instead of failing the
/// whole batch.
pub fn parameters_from_model(model: Option<&TypeDescriptor>) -> Result<Vec<Parameter>> {
    let mut parameters = Vec::new();
    let Some(TypeDescriptor::Composite(fields)) = model else {
        return Ok(parameters);
    };

    for field in fields {
        let meta = FieldMetadata::parse(&field.metadata)?;

        // The original merged embedded parameters only when the recursive
        // call failed; merging on success is the evidently intended behavior.
        if meta.get(metadata::EMBED).is_some() {
            parameters.extend(parameters_from_model(Some(&field.ty))?);
        }

        let (name, location) = match resolve_binding(&meta) {
            Ok(binding) => binding,
            Err(Error::NoBindingLocation) => continue,
            Err(err) => return Err(err),
        };

        let mut schema = schema_for_type(&field.ty)?;
        let description = meta.get(metadata::DESCRIPTION).map(|tag| tag.name.clone());

        let mut required = false;
        if let Some(validate) = meta.get(metadata::VALIDATE) {
            required = validate.name == metadata::REQUIRED;
            if !validate.options.is_empty() {
                schema = validate_schema(schema, &validate.options)?;
            }
        }

        if let Some(tag) = meta.get(metadata::DEFAULT) {
            schema.default = Some(tag.name.clone());
        }
        if let Some(tag) = meta.get(metadata::EXAMPLE) {
            schema.example = Some(tag.name.clone());
        }

        debug!("extracted {} parameter {:?}", location.as_str(), name);
        parameters.push(Parameter {
            name,
            location,
            required,
            description,
            schema,
        });
    }

    Ok(parameters)
}

/// Resolves a field's binding location from its metadata, first key wins
fn resolve_binding(meta: &FieldMetadata) -> Result<(String, ParameterLocation)> {
    for (key, location) in BINDING_KEYS {
        if let Some(tag) = meta.get(key) {
            return Ok((tag.name.clone(), location));
        }
    }
    Err(Error::NoBindingLocation)
}
