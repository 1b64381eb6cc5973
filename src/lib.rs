//! OpenAPI from comments - derives an OpenAPI 3.0 document from route
//! annotations in source comments and field-tagged data models.
//!
//! Route handlers declare their routes through structured annotations in doc
//! comments (`@router`, `@summary`, `@description`, `@response`), and data
//! models are described once as type descriptors whose field metadata uses
//! struct-tag syntax. The library turns both into an in-memory OpenAPI
//! document ready for YAML or JSON serialization.
//!
//! # Architecture
//!
//! 1. [`source`] - scans directories and collects annotated comment groups
//! 2. [`annotation`] - parses comment lines into [`annotation::Route`] records
//! 3. [`descriptor`] - the type-descriptor model for request/response shapes
//! 4. [`metadata`] - reads a field's struct-tag metadata string
//! 5. [`constraint`] - translates validation options into schema constraints
//! 6. [`schema`] - synthesizes OpenAPI schemas from type descriptors
//! 7. [`parameter`] - extracts typed parameters from request models
//! 8. [`openapi_builder`] - assembles the final document
//! 9. [`serializer`] - serializes the document to YAML or JSON
//!
//! # Example
//!
//! ```
//! use openapi_from_comments::annotation::{ResponseSpec, Route};
//! use openapi_from_comments::descriptor::{FieldDescriptor, TypeDescriptor};
//! use openapi_from_comments::openapi_builder::OpenApiBuilder;
//! use openapi_from_comments::serializer::serialize_json;
//!
//! let product = TypeDescriptor::composite(vec![
//!     FieldDescriptor::new(r#"json:"content""#, TypeDescriptor::Text),
//! ]);
//!
//! let route = Route::new("/product/:id", "get").with_response(
//!     "200",
//!     ResponseSpec {
//!         description: "one product".to_string(),
//!         model: Some(product),
//!         ..ResponseSpec::default()
//!     },
//! );
//!
//! let mut builder = OpenApiBuilder::new().with_info("my title", "2.0.0", None);
//! builder.add_route(&route);
//! let json = serialize_json(&builder.build()).unwrap();
//! assert!(json.contains("/product/{id}"));
//! ```
//!
//! # Command-Line Interface
//!
//! For command-line usage, see the [`cli`] module which scans one or more
//! directories and writes the generated document.

pub mod annotation;
pub mod cli;
pub mod constraint;
pub mod descriptor;
pub mod error;
pub mod metadata;
pub mod openapi_builder;
pub mod parameter;
pub mod schema;
pub mod serializer;
pub mod source;
