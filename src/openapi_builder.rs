//! OpenAPI document assembler.
//!
//! Groups route records by sanitized path, attaches one operation per HTTP
//! method and renders each declared response through the schema synthesizer.
//! A route whose model cannot be introspected is dropped with a warning;
//! assigning a second route to the same path and method overwrites the first.

use crate::annotation::Route;
use crate::parameter::{parameters_from_model, Parameter as ExtractedParameter};
use crate::schema::{schema_for_model, Schema};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// OpenAPI document builder
pub struct OpenApiBuilder {
    info: Info,
    servers: Vec<Server>,
    paths: BTreeMap<String, PathItem>,
}

/// OpenAPI Info object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Info {
    /// API title
    pub title: String,
    /// API version
    pub version: String,
    /// API description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Terms-of-service URL
    #[serde(rename = "termsOfService", skip_serializing_if = "Option::is_none")]
    pub terms_of_service: Option<String>,
    /// Contact information
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,
    /// License information
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<License>,
}

/// OpenAPI Contact object
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Contact {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// OpenAPI License object
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct License {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// OpenAPI Server object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Server {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// OpenAPI PathItem object - all operations for a single path
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub get: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub put: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patch: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<Operation>,
}

/// OpenAPI Operation object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Operation {
    /// Grouping tags
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub tags: Vec<String>,
    /// Operation identifier
    #[serde(rename = "operationId", skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    /// Single-line summary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Multi-line description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the operation is deprecated
    #[serde(skip_serializing_if = "std::ops::Not::not", default)]
    pub deprecated: bool,
    /// Parameters in field-declaration order
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub parameters: Vec<Parameter>,
    /// Responses keyed by status code
    pub responses: BTreeMap<String, ResponseObject>,
}

/// OpenAPI Parameter object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name
    pub name: String,
    /// Binding location (query, path, header, cookie)
    #[serde(rename = "in")]
    pub location: String,
    /// Whether the parameter is required
    pub required: bool,
    /// Parameter description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Parameter value schema
    pub schema: Schema,
}

/// OpenAPI Response object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseObject {
    /// Response description
    pub description: String,
    /// Response headers
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub headers: BTreeMap<String, HeaderObject>,
    /// Response bodies keyed by content type
    pub content: BTreeMap<String, MediaType>,
}

/// OpenAPI Header object
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HeaderObject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
}

/// OpenAPI MediaType object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaType {
    /// Schema for this media type
    pub schema: Schema,
}

/// Complete OpenAPI document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenApiDocument {
    /// OpenAPI version
    pub openapi: String,
    /// API info
    pub info: Info,
    /// Server list
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub servers: Vec<Server>,
    /// Paths, keyed by sanitized path
    pub paths: BTreeMap<String, PathItem>,
}

/// Rewrites every colon-prefixed path segment into brace notation.
///
/// `/product/:id` becomes `/product/{id}`; paths without colon segments pass
/// through unchanged, which makes the function idempotent.
pub fn sanitize_path(path: &str) -> String {
    path.split('/')
        .map(|segment| match segment.strip_prefix(':') {
            Some(name) if !name.is_empty() => format!("{{{}}}", name),
            _ => segment.to_string(),
        })
        .collect::<Vec<_>>()
        .join("/")
}

impl OpenApiBuilder {
    /// Creates a builder with default info
    pub fn new() -> Self {
        debug!("initializing OpenApiBuilder");
        Self {
            info: Info {
                title: "Generated API".to_string(),
                version: "1.0.0".to_string(),
                description: None,
                terms_of_service: None,
                contact: None,
                license: None,
            },
            servers: Vec::new(),
            paths: BTreeMap::new(),
        }
    }

    /// Sets title, version and description
    pub fn with_info(
        mut self,
        title: impl Into<String>,
        version: impl Into<String>,
        description: Option<String>,
    ) -> Self {
        self.info.title = title.into();
        self.info.version = version.into();
        self.info.description = description;
        self
    }

    /// Sets the terms-of-service URL
    pub fn with_terms_of_service(mut self, url: impl Into<String>) -> Self {
        self.info.terms_of_service = Some(url.into());
        self
    }

    /// Sets the contact section
    pub fn with_contact(mut self, contact: Contact) -> Self {
        self.info.contact = Some(contact);
        self
    }

    /// Sets the license section
    pub fn with_license(mut self, license: License) -> Self {
        self.info.license = Some(license);
        self
    }

    /// Appends a server entry
    pub fn with_server(mut self, url: impl Into<String>, description: Option<String>) -> Self {
        self.servers.push(Server {
            url: url.into(),
            description,
        });
        self
    }

    /// Adds one route to the document.
    ///
    /// The route is dropped, with a warning, when its model cannot be
    /// introspected - a synthesis failure for one route never aborts the
    /// batch. A route for an already-occupied path and method overwrites the
    /// previous operation.
    pub fn add_route(&mut self, route: &Route) {
        debug!("adding route {} {}", route.method, route.path);

        let parameters = match parameters_from_model(route.model.as_ref()) {
            Ok(parameters) => parameters,
            Err(err) => {
                warn!(
                    "skipping route {} {}: {}",
                    route.method, route.path, err
                );
                return;
            }
        };

        let responses = match Self::build_responses(route) {
            Ok(responses) => responses,
            Err(err) => {
                warn!(
                    "skipping route {} {}: {}",
                    route.method, route.path, err
                );
                return;
            }
        };

        let operation = Operation {
            tags: route.tags.clone(),
            operation_id: non_empty(&route.operation_id),
            summary: non_empty(&route.summary),
            description: non_empty(&route.description),
            deprecated: route.deprecated,
            parameters: parameters.into_iter().map(Parameter::from).collect(),
            responses,
        };

        let path = sanitize_path(&route.path);
        let item = self.paths.entry(path).or_default();
        let slot = match route.method.as_str() {
            "GET" => &mut item.get,
            "POST" => &mut item.post,
            "PUT" => &mut item.put,
            "DELETE" => &mut item.delete,
            "PATCH" => &mut item.patch,
            "OPTIONS" => &mut item.options,
            "HEAD" => &mut item.head,
            "TRACE" => &mut item.trace,
            other => {
                warn!("unsupported HTTP method {:?} for {}", other, route.path);
                return;
            }
        };
        if slot.is_some() {
            debug!(
                "overwriting operation {} {}",
                route.method, route.path
            );
        }
        *slot = Some(operation);
    }

    fn build_responses(route: &Route) -> crate::error::Result<BTreeMap<String, ResponseObject>> {
        let mut responses = BTreeMap::new();
        for (status, spec) in &route.responses {
            let schema = schema_for_model(spec.model.as_ref())?;
            let mut content = BTreeMap::new();
            content.insert(route.response_content_type.clone(), MediaType { schema });

            let headers = spec
                .headers
                .iter()
                .map(|(name, header)| {
                    (
                        name.clone(),
                        HeaderObject {
                            description: header.description.clone(),
                            schema: header.schema.clone(),
                        },
                    )
                })
                .collect();

            responses.insert(
                status.clone(),
                ResponseObject {
                    description: spec.description.clone(),
                    headers,
                    content,
                },
            );
        }
        Ok(responses)
    }

    /// Builds the final document
    pub fn build(self) -> OpenApiDocument {
        debug!("building final OpenAPI document");
        OpenApiDocument {
            openapi: "3.0.0".to_string(),
            info: self.info,
            servers: self.servers,
            paths: self.paths,
        }
    }
}

impl Default for OpenApiBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ExtractedParameter> for Parameter {
    fn from(parameter: ExtractedParameter) -> Self {
        Self {
            name: parameter.name,
            location: parameter.location.as_str().to_string(),
            required: parameter.required,
            description: parameter.description,
            schema: parameter.schema,
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
