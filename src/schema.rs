//! Schema synthesizer - converts type descriptors to OpenAPI schemas.
//!
//! [`schema_for_type`] classifies a descriptor by shape (primitive, text,
//! upload, composite, sequence, mapping) and [`schema_for_model`] builds
//! object schemas field by field, reading each field's metadata for its body
//! name, required marker, description, default and example.

use crate::descriptor::{FieldDescriptor, PrimitiveKind, TypeDescriptor};
use crate::error::{Error, Result};
use crate::metadata::{self, FieldMetadata};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// OpenAPI Schema node.
///
/// Exactly one of the four classifications (primitive, string, object, array)
/// holds at a time; the constructors below are the only way core code builds
/// one. The cross-cutting fields (description, default, example, bounds,
/// length, enum) are set through the `with_*` methods.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// The type of the schema (string, integer, number, boolean, object, array)
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,
    /// Format for string and integer types (e.g. "int64", "byte", "binary")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Human-readable description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Default value, kept string-typed as written in the metadata
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    /// Example value, kept string-typed as written in the metadata
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    /// Inclusive lower bound for numeric values
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    /// Inclusive upper bound for numeric values
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    /// Exact-length constraint, lower half
    #[serde(rename = "minLength", skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    /// Exact-length constraint, upper half
    #[serde(rename = "maxLength", skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
    /// Enumerated allowed values, order-preserved
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
    /// Properties for object schemas, keyed by body name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, Schema>>,
    /// Required property names for object schemas
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
    /// Item schema for array schemas
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
}

impl Schema {
    fn typed(schema_type: &str, format: Option<&str>) -> Self {
        Self {
            schema_type: Some(schema_type.to_string()),
            format: format.map(str::to_string),
            ..Self::default()
        }
    }

    /// A plain integer schema
    pub fn integer() -> Self {
        Self::typed("integer", None)
    }

    /// An integer schema with format "int32"
    pub fn int32() -> Self {
        Self::typed("integer", Some("int32"))
    }

    /// An integer schema with format "int64"
    pub fn int64() -> Self {
        Self::typed("integer", Some("int64"))
    }

    /// A number schema, used for floating point of any width
    pub fn number() -> Self {
        Self::typed("number", None)
    }

    /// A boolean schema
    pub fn boolean() -> Self {
        Self::typed("boolean", None)
    }

    /// A plain string schema
    pub fn string() -> Self {
        Self::typed("string", None)
    }

    /// A string schema with format "byte" (base64 convention)
    pub fn bytes() -> Self {
        Self::typed("string", Some("byte"))
    }

    /// A string schema with format "date-time"
    pub fn date_time() -> Self {
        Self::typed("string", Some("date-time"))
    }

    /// A string schema with format "binary", used for file uploads
    pub fn binary() -> Self {
        Self::typed("string", Some("binary"))
    }

    /// An object schema with an empty property map
    pub fn object() -> Self {
        Self {
            schema_type: Some("object".to_string()),
            properties: Some(BTreeMap::new()),
            ..Self::default()
        }
    }

    /// An array schema over the given item schema
    pub fn array(items: Schema) -> Self {
        Self {
            schema_type: Some("array".to_string()),
            items: Some(Box::new(items)),
            ..Self::default()
        }
    }

    /// Set the inclusive minimum bound
    pub fn with_minimum(mut self, minimum: f64) -> Self {
        self.minimum = Some(minimum);
        self
    }

    /// Set the inclusive maximum bound
    pub fn with_maximum(mut self, maximum: f64) -> Self {
        self.maximum = Some(maximum);
        self
    }

    /// Set an exact-length constraint (both length halves)
    pub fn with_length(mut self, length: u64) -> Self {
        self.min_length = Some(length);
        self.max_length = Some(length);
        self
    }

    /// Set the enumerated allowed values
    pub fn with_enum(mut self, values: Vec<String>) -> Self {
        self.enum_values = Some(values);
        self
    }
}

/// Synthesizes a schema for a type descriptor.
///
/// Primitive classification follows the width and signedness of the kind:
/// unsigned integers additionally carry a minimum of zero, 32-bit and 64-bit
/// integers carry the matching format, floats of any width become plain
/// numbers. A sequence of uploads becomes an array of binary strings; every
/// other non-scalar shape falls through to [`schema_for_model`].
///
/// # Errors
///
/// Fails only when the fall-through reaches a composite whose field metadata
/// is malformed.
pub fn schema_for_type(ty: &TypeDescriptor) -> Result<Schema> {
    use PrimitiveKind::*;

    let schema = match ty {
        TypeDescriptor::Primitive(I8) | TypeDescriptor::Primitive(I16) => Schema::integer(),
        TypeDescriptor::Primitive(U8) | TypeDescriptor::Primitive(U16) => {
            Schema::integer().with_minimum(0.0)
        }
        TypeDescriptor::Primitive(I32) => Schema::int32(),
        TypeDescriptor::Primitive(U32) => Schema::int32().with_minimum(0.0),
        TypeDescriptor::Primitive(I64) => Schema::int64(),
        TypeDescriptor::Primitive(U64) => Schema::int64().with_minimum(0.0),
        TypeDescriptor::Primitive(F32) | TypeDescriptor::Primitive(F64) => Schema::number(),
        TypeDescriptor::Primitive(Bool) => Schema::boolean(),
        TypeDescriptor::Text => Schema::string(),
        TypeDescriptor::Bytes => Schema::bytes(),
        TypeDescriptor::DateTime => Schema::date_time(),
        TypeDescriptor::Upload => Schema::binary(),
        TypeDescriptor::Sequence(element) if **element == TypeDescriptor::Upload => {
            Schema::array(Schema::binary())
        }
        _ => schema_for_model(Some(ty))?,
    };

    Ok(schema)
}

/// Synthesizes a schema for a model descriptor.
///
/// A composite becomes an object schema built field by field, a sequence an
/// array over its element's model schema, a mapping a free-form object. An
/// absent model yields an empty object schema. Scalar shapes delegate back to
/// [`schema_for_type`].
///
/// # Errors
///
/// Aborts the whole model on the first field whose metadata cannot be parsed
/// or that lacks both a `json` name and an `embed` marker.
pub fn schema_for_model(model: Option<&TypeDescriptor>) -> Result<Schema> {
    let Some(ty) = model else {
        return Ok(Schema::object());
    };

    let schema = match ty {
        TypeDescriptor::Composite(fields) => {
            let mut schema = Schema::object();
            for (index, field) in fields.iter().enumerate() {
                apply_field(field, index, &mut schema)?;
            }
            schema
        }
        TypeDescriptor::Sequence(element) => Schema::array(schema_for_model(Some(element))?),
        TypeDescriptor::Mapping => Schema::object(),
        _ => schema_for_type(ty)?,
    };

    Ok(schema)
}

/// Adds one composite field to its parent object schema
fn apply_field(field: &FieldDescriptor, index: usize, parent: &mut Schema) -> Result<()> {
    let meta = FieldMetadata::parse(&field.metadata)?;

    if meta.get(metadata::EMBED).is_some() {
        let embedded = schema_for_model(Some(&field.ty))?;
        merge_embedded(embedded, parent);
        return Ok(());
    }

    let mut field_schema = schema_for_type(&field.ty)?;

    let name = match meta.get(metadata::JSON) {
        Some(tag) => tag.name.clone(),
        None => return Err(Error::MissingBindingName(format!("#{}", index))),
    };

    if let Some(validate) = meta.get(metadata::VALIDATE) {
        if validate.name == metadata::REQUIRED {
            parent
                .required
                .get_or_insert_with(Vec::new)
                .push(name.clone());
        }
    }
    if let Some(tag) = meta.get(metadata::DESCRIPTION) {
        field_schema.description = Some(tag.name.clone());
    }
    if let Some(tag) = meta.get(metadata::DEFAULT) {
        field_schema.default = Some(tag.name.clone());
    }
    if let Some(tag) = meta.get(metadata::EXAMPLE) {
        field_schema.example = Some(tag.name.clone());
    }

    if let Some(properties) = parent.properties.as_mut() {
        debug!("adding property {:?} to object schema", name);
        properties.insert(name, field_schema);
    }

    Ok(())
}

/// Flattens an embedded object schema into its parent.
///
/// Properties already declared on the parent win on name collision.
fn merge_embedded(embedded: Schema, parent: &mut Schema) {
    if let (Some(embedded_props), Some(parent_props)) =
        (embedded.properties, parent.properties.as_mut())
    {
        for (name, property) in embedded_props {
            parent_props.entry(name).or_insert(property);
        }
    }
    if let Some(embedded_required) = embedded.required {
        parent
            .required
            .get_or_insert_with(Vec::new)
            .extend(embedded_required);
    }
}
