//! Annotation parser - turns comment text into route records.
//!
//! Each declaration contributes one ordered group of comment lines. The first
//! whitespace-delimited token of a trimmed line, lower-cased, selects a
//! [`Directive`]; the remainder of the line is its payload. Unknown
//! directives are ignored.
//!
//! ```
//! use openapi_from_comments::annotation::Route;
//!
//! let route = Route::from_comment_group(&[
//!     "@summary List products".to_string(),
//!     "@description Returns the product catalog.".to_string(),
//!     "@router /products [get]".to_string(),
//!     "@response 200 nil the catalog".to_string(),
//! ]).unwrap();
//! assert_eq!(route.method, "GET");
//! assert_eq!(route.path, "/products");
//! ```

use crate::descriptor::TypeDescriptor;
use crate::error::{Error, Result};
use crate::schema::Schema;
use log::debug;
use std::collections::BTreeMap;

/// Default content type for route responses
pub const MIME_APPLICATION_JSON: &str = "application/json";

const ROUTER_PARTS: usize = 2;
const RESPONSE_PARTS: usize = 3;
const RESPONSE_PARTS_WITHOUT_DESC: usize = 2;

/// Recognized annotation directives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    /// `@description` - appends to the route description
    Description,
    /// `@summary` - overwrites the route summary
    Summary,
    /// `@router` - declares the route path and HTTP method
    Router,
    /// `@response` - declares a response by status code
    Response,
    /// Anything else, ignored by the parser
    Unknown,
}

impl Directive {
    /// Classifies the lower-cased first token of an annotation line
    fn from_token(token: &str) -> Self {
        match token.to_lowercase().as_str() {
            "@description" => Directive::Description,
            "@summary" => Directive::Summary,
            "@router" => Directive::Router,
            "@response" => Directive::Response,
            _ => Directive::Unknown,
        }
    }
}

/// A declared response: description, optional body model, response headers
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResponseSpec {
    /// Free-text description from the `@response` payload
    pub description: String,
    /// Response-body model; responses parsed from comments carry none
    pub model: Option<TypeDescriptor>,
    /// Response headers by name
    pub headers: BTreeMap<String, Header>,
}

/// A response header declaration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Header {
    /// Header description
    pub description: Option<String>,
    /// Header value schema
    pub schema: Option<Schema>,
}

/// One route-handler declaration: path, method and operation metadata.
///
/// Routes come from two places: the annotation parser fills one in from a
/// comment group, and callers build them programmatically with [`Route::new`]
/// and the `with_*` methods to attach models and metadata that comments
/// cannot express.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Route {
    /// Route path, may contain colon-style placeholders (`/product/:id`)
    pub path: String,
    /// Upper-cased HTTP verb
    pub method: String,
    /// Single-line summary
    pub summary: String,
    /// Multi-line description, newline-joined from repeated directives
    pub description: String,
    /// Whether the operation is deprecated
    pub deprecated: bool,
    /// Free-form tag list
    pub tags: Vec<String>,
    /// Operation identifier
    pub operation_id: String,
    /// Request model used for parameter extraction
    pub model: Option<TypeDescriptor>,
    /// Declared responses, keyed by status-code string
    pub responses: BTreeMap<String, ResponseSpec>,
    /// Content type the response bodies are rendered under
    pub response_content_type: String,
}

impl Route {
    /// Creates a route for the given path and method
    pub fn new(path: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method: method.into().to_uppercase(),
            response_content_type: MIME_APPLICATION_JSON.to_string(),
            ..Self::default()
        }
    }

    /// Parses a whole comment group into a route.
    ///
    /// # Errors
    ///
    /// Fails on the first malformed `@router` or `@response` payload,
    /// aborting the whole group.
    pub fn from_comment_group(lines: &[String]) -> Result<Self> {
        let mut route = Route {
            response_content_type: MIME_APPLICATION_JSON.to_string(),
            ..Self::default()
        };
        for line in lines {
            route.parse_comment(line)?;
        }
        Ok(route)
    }

    /// Parses one comment line.
    ///
    /// Comment markers and surrounding whitespace are stripped; empty lines
    /// and unknown directives are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AnnotationSyntax`] on a malformed `@router` or
    /// `@response` payload.
    pub fn parse_comment(&mut self, comment: &str) -> Result<()> {
        let line = comment.trim_start_matches('/').trim();
        if line.is_empty() {
            return Ok(());
        }

        let token = line.split_whitespace().next().unwrap_or_default();
        let payload = line[token.len()..].trim();

        match Directive::from_token(token) {
            Directive::Description => self.parse_description(payload),
            Directive::Summary => self.summary = payload.to_string(),
            Directive::Router => self.parse_router(payload)?,
            Directive::Response => self.parse_response(payload)?,
            Directive::Unknown => debug!("ignoring directive {:?}", token),
        }

        Ok(())
    }

    fn parse_description(&mut self, payload: &str) {
        if self.description.is_empty() {
            self.description = payload.to_string();
            return;
        }
        self.description.push('\n');
        self.description.push_str(payload);
    }

    fn parse_router(&mut self, payload: &str) -> Result<()> {
        let fields: Vec<&str> = payload.split_whitespace().collect();
        if fields.len() != ROUTER_PARTS {
            return Err(Error::AnnotationSyntax(format!(
                "@router expects \"<path> [<method>]\", got {:?}",
                payload
            )));
        }

        self.path = fields[0].to_string();
        self.method = fields[1]
            .trim_matches(|c| c == '[' || c == ']')
            .to_uppercase();

        Ok(())
    }

    fn parse_response(&mut self, payload: &str) -> Result<()> {
        let fields: Vec<&str> = payload.splitn(RESPONSE_PARTS, ' ').collect();
        if fields.len() < RESPONSE_PARTS_WITHOUT_DESC {
            return Err(Error::AnnotationSyntax(format!(
                "@response expects \"<status> <model> [description]\", got {:?}",
                payload
            )));
        }

        // fields[1] is a model placeholder, discarded; models are attached
        // programmatically through with_response.
        let description = fields
            .get(RESPONSE_PARTS - 1)
            .copied()
            .unwrap_or_default()
            .to_string();

        self.responses.insert(
            fields[0].to_string(),
            ResponseSpec {
                description,
                ..ResponseSpec::default()
            },
        );

        Ok(())
    }

    /// Appends tags to the route
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Sets the route summary
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    /// Sets the route description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Marks the route as deprecated
    pub fn deprecated(mut self) -> Self {
        self.deprecated = true;
        self
    }

    /// Sets the operation identifier
    pub fn with_operation_id(mut self, id: impl Into<String>) -> Self {
        self.operation_id = id.into();
        self
    }

    /// Attaches the request model used for parameter extraction
    pub fn with_model(mut self, model: TypeDescriptor) -> Self {
        self.model = Some(model);
        self
    }

    /// Declares or replaces a response for a status code
    pub fn with_response(mut self, status: impl Into<String>, response: ResponseSpec) -> Self {
        self.responses.insert(status.into(), response);
        self
    }

    /// Sets the response content type, `application/json` by default
    pub fn with_response_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.response_content_type = content_type.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_router_variants() {
        let cases = [
            ("/bar [get]", "/bar", "GET"),
            ("/bar post", "/bar", "POST"),
            ("/bar/foo/baz GET", "/bar/foo/baz", "GET"),
        ];

        for (payload, want_path, want_method) in cases {
            let mut route = Route::default();
            route.parse_router(payload).unwrap();
            assert_eq!(route.path, want_path, "payload {:?}", payload);
            assert_eq!(route.method, want_method, "payload {:?}", payload);
        }
    }

    #[test]
    fn test_parse_router_wrong_field_count() {
        for payload in ["/bar", "/bar [get] extra"] {
            let mut route = Route::default();
            let result = route.parse_router(payload);
            assert!(
                matches!(result, Err(Error::AnnotationSyntax(_))),
                "payload {:?}",
                payload
            );
        }
    }

    #[test]
    fn test_parse_description_joins_with_newline() {
        let mut route = Route::default();
        route.parse_description("biloute bar baz");
        assert_eq!(route.description, "biloute bar baz");

        route.parse_description("second line");
        assert_eq!(route.description, "biloute bar baz\nsecond line");
    }

    #[test]
    fn test_summary_is_overwritten_not_appended() {
        let mut route = Route::default();
        route.parse_comment("@summary first").unwrap();
        route.parse_comment("@summary second").unwrap();
        assert_eq!(route.summary, "second");
    }

    #[test]
    fn test_parse_response_variants() {
        let cases = [
            ("200 nil my description", "200", "my description"),
            ("404 nil not found result", "404", "not found result"),
            ("500 nil", "500", ""),
        ];

        for (payload, want_status, want_description) in cases {
            let mut route = Route::default();
            route.parse_response(payload).unwrap();
            let response = route
                .responses
                .get(want_status)
                .unwrap_or_else(|| panic!("status {:?} missing", want_status));
            assert_eq!(response.description, want_description);
            assert!(response.model.is_none());
        }
    }

    #[test]
    fn test_parse_response_too_few_fields() {
        let mut route = Route::default();
        let result = route.parse_response("200");
        assert!(matches!(result, Err(Error::AnnotationSyntax(_))));
    }

    #[test]
    fn test_parse_comment_strips_markers_and_skips_empty() {
        let mut route = Route::default();
        route.parse_comment("// @router /bar [get]").unwrap();
        route.parse_comment("///").unwrap();
        route.parse_comment("   ").unwrap();
        assert_eq!(route.path, "/bar");
        assert_eq!(route.method, "GET");
    }

    #[test]
    fn test_directives_are_case_insensitive() {
        let mut route = Route::default();
        route.parse_comment("@Router /bar [get]").unwrap();
        route.parse_comment("@Summary foo route").unwrap();
        assert_eq!(route.path, "/bar");
        assert_eq!(route.summary, "foo route");
    }

    #[test]
    fn test_unknown_directive_is_ignored() {
        let mut route = Route::default();
        route.parse_comment("@produce json").unwrap();
        assert_eq!(route, Route::default());
    }

    #[test]
    fn test_from_comment_group() {
        let lines = vec![
            "ExampleEndpoint foo".to_string(),
            "@Summary foo route".to_string(),
            "@Description return a basic message".to_string(),
            "@Response 200 ModelExample response description".to_string(),
            "@Response 400 ModelExample bad response".to_string(),
            "@Router / [get]".to_string(),
        ];

        let route = Route::from_comment_group(&lines).unwrap();
        assert_eq!(route.path, "/");
        assert_eq!(route.method, "GET");
        assert_eq!(route.summary, "foo route");
        assert_eq!(route.description, "return a basic message");
        assert_eq!(route.responses.len(), 2);
        assert_eq!(route.response_content_type, MIME_APPLICATION_JSON);
    }

    #[test]
    fn test_from_comment_group_aborts_on_bad_line() {
        let lines = vec![
            "@Summary foo".to_string(),
            "@Router /bar".to_string(),
        ];
        let result = Route::from_comment_group(&lines);
        assert!(matches!(result, Err(Error::AnnotationSyntax(_))));
    }

    #[test]
    fn test_builder_methods() {
        let route = Route::new("/product/:id", "get")
            .with_tags(["catalog", "product"])
            .with_summary("one product")
            .with_description("fetch one product by id")
            .with_operation_id("getProduct")
            .deprecated();

        assert_eq!(route.method, "GET");
        assert_eq!(route.tags, vec!["catalog", "product"]);
        assert_eq!(route.summary, "one product");
        assert_eq!(route.operation_id, "getProduct");
        assert!(route.deprecated);
        assert_eq!(route.response_content_type, MIME_APPLICATION_JSON);
    }

    #[test]
    fn test_with_response_overwrites_status() {
        let route = Route::new("/", "get")
            .with_response("200", ResponseSpec::default())
            .with_response(
                "200",
                ResponseSpec {
                    description: "fake response".to_string(),
                    ..ResponseSpec::default()
                },
            );

        assert_eq!(route.responses.len(), 1);
        assert_eq!(route.responses["200"].description, "fake response");
    }
}
