//! Type descriptors for data-model introspection.
//!
//! The schema synthesizer does not inspect live values; callers describe the
//! shape of each request or response model once, as a tree of
//! [`TypeDescriptor`] values. Because a descriptor owns its children, a model
//! graph can never contain a cycle, which keeps the recursive synthesis in
//! [`crate::schema`] total.

/// Primitive value kinds, carrying width and signedness
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Bool,
}

/// The shape of a model type, resolved once per model
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDescriptor {
    /// A numeric or boolean scalar
    Primitive(PrimitiveKind),
    /// Plain text
    Text,
    /// A byte sequence, rendered as a base64 string schema
    Bytes,
    /// A calendar-time value, rendered as a date-time string schema
    DateTime,
    /// A single file-upload payload, rendered as a binary string schema
    Upload,
    /// A struct-like composite with tagged fields in declaration order
    Composite(Vec<FieldDescriptor>),
    /// A homogeneous sequence of the element type
    Sequence(Box<TypeDescriptor>),
    /// A mapping with undeclared keys, rendered as a free-form object schema
    Mapping,
}

/// One field of a composite type: its raw metadata string and its type.
///
/// The metadata string uses struct-tag syntax, e.g.
/// `query:"name" validate:"required,min=1" json:"name" description:"a name"`.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    /// Raw metadata string, read through [`crate::metadata::FieldMetadata`]
    pub metadata: String,
    /// The field's type
    pub ty: TypeDescriptor,
}

impl TypeDescriptor {
    /// Shorthand for a composite descriptor
    pub fn composite(fields: Vec<FieldDescriptor>) -> Self {
        TypeDescriptor::Composite(fields)
    }

    /// Shorthand for a sequence descriptor
    pub fn sequence(element: TypeDescriptor) -> Self {
        TypeDescriptor::Sequence(Box::new(element))
    }
}

impl FieldDescriptor {
    /// Create a field descriptor from its metadata string and type
    pub fn new(metadata: impl Into<String>, ty: TypeDescriptor) -> Self {
        Self {
            metadata: metadata.into(),
            ty,
        }
    }
}
