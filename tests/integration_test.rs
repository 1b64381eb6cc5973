use openapi_from_comments::{
    annotation::{ResponseSpec, Route, MIME_APPLICATION_JSON},
    descriptor::{FieldDescriptor, PrimitiveKind, TypeDescriptor},
    openapi_builder::OpenApiBuilder,
    serializer::{serialize_json, serialize_yaml},
    source::routes_from_directory,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

/// Helper function to create a temporary project from (path, content) pairs
fn create_test_project(files: Vec<(&str, &str)>) -> TempDir {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");

    for (path, content) in files {
        let file_path = temp_dir.path().join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(&file_path, content).expect("Failed to write test file");
    }

    temp_dir
}

const HANDLERS: &str = r#"
/// ExampleEndpoint foo
/// @Summary foo route
/// @Description return a basic message
/// @Response 200 ModelExample response description
/// @Response 400 ModelExample bad response
/// @Router / [get]
pub fn foo() {}

/// @Summary product route
/// @Description return one product
/// @Response 200 Product the product
/// @Response 404 Product not found
/// @Router /product/:id [get]
pub fn product() {}

/// A helper without annotations.
pub fn helper() {}
"#;

#[test]
fn test_comment_scan_end_to_end() {
    let temp_dir = create_test_project(vec![("src/handlers.rs", HANDLERS)]);

    let routes = routes_from_directory(temp_dir.path()).expect("Failed to collect routes");
    assert_eq!(routes.len(), 2);

    let mut builder = OpenApiBuilder::new().with_info(
        "my title",
        "2.0.0",
        Some("my description".to_string()),
    );
    for route in &routes {
        builder.add_route(route);
    }
    let document = builder.build();

    assert_eq!(document.openapi, "3.0.0");
    assert_eq!(document.info.title, "my title");
    assert_eq!(document.paths.len(), 2);
    assert!(document.paths.contains_key("/"));
    assert!(document.paths.contains_key("/product/{id}"));

    let operation = document.paths["/"].get.as_ref().unwrap();
    assert_eq!(operation.summary.as_deref(), Some("foo route"));
    assert_eq!(operation.responses.len(), 2);

    // Responses parsed from comments carry no model: empty object schemas.
    let ok = &operation.responses["200"];
    assert_eq!(ok.description, "response description");
    let schema = &ok.content[MIME_APPLICATION_JSON].schema;
    assert_eq!(schema.schema_type.as_deref(), Some("object"));
    assert!(schema.properties.as_ref().unwrap().is_empty());

    let yaml = serialize_yaml(&document).expect("Failed to serialize to YAML");
    assert!(yaml.contains("openapi: 3.0.0") || yaml.contains("openapi: '3.0.0'"));
    assert!(yaml.contains("/product/{id}"));

    let json = serialize_json(&document).expect("Failed to serialize to JSON");
    assert!(json.contains("\"openapi\": \"3.0.0\""));
    assert!(json.contains("/product/{id}"));
}

#[test]
fn test_programmatic_route_with_model_end_to_end() {
    let product = TypeDescriptor::composite(vec![FieldDescriptor::new(
        r#"json:"content""#,
        TypeDescriptor::Text,
    )]);

    let request = TypeDescriptor::composite(vec![
        FieldDescriptor::new(
            r#"path:"id" validate:"required" description:"product id""#,
            TypeDescriptor::Primitive(PrimitiveKind::I64),
        ),
        FieldDescriptor::new(
            r#"query:"verbose" default:"false""#,
            TypeDescriptor::Primitive(PrimitiveKind::Bool),
        ),
    ]);

    let route = Route::new("/product/:id", "get")
        .with_tags(["catalog"])
        .with_operation_id("getProduct")
        .with_model(request)
        .with_response(
            "200",
            ResponseSpec {
                description: "the product".to_string(),
                model: Some(product.clone()),
                ..ResponseSpec::default()
            },
        )
        .with_response(
            "404",
            ResponseSpec {
                description: "not found".to_string(),
                model: Some(product),
                ..ResponseSpec::default()
            },
        );

    let mut builder = OpenApiBuilder::new();
    builder.add_route(&route);
    let document = builder.build();

    let json = serialize_json(&document).expect("Failed to serialize to JSON");
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

    let operation = &parsed["paths"]["/product/{id}"]["get"];
    assert_eq!(operation["operationId"], "getProduct");
    assert_eq!(operation["tags"][0], "catalog");

    let parameters = operation["parameters"].as_array().unwrap();
    assert_eq!(parameters.len(), 2);
    assert_eq!(parameters[0]["name"], "id");
    assert_eq!(parameters[0]["in"], "path");
    assert_eq!(parameters[0]["required"], true);
    assert_eq!(parameters[0]["schema"]["type"], "integer");
    assert_eq!(parameters[0]["schema"]["format"], "int64");
    assert_eq!(parameters[1]["name"], "verbose");
    assert_eq!(parameters[1]["schema"]["default"], "false");

    for status in ["200", "404"] {
        let schema =
            &operation["responses"][status]["content"][MIME_APPLICATION_JSON]["schema"];
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["properties"]["content"]["type"], "string");
    }
}

#[test]
fn test_malformed_annotation_aborts_the_run() {
    let temp_dir = create_test_project(vec![(
        "src/bad.rs",
        "/// @Router /bad [get] extra\npub fn bad() {}",
    )]);

    let result = routes_from_directory(temp_dir.path());
    assert!(result.is_err());
    let message = result.unwrap_err().to_string();
    assert!(message.contains("bad.rs"), "message: {}", message);
}

#[test]
fn test_empty_project_yields_empty_document() {
    let temp_dir = create_test_project(vec![("src/lib.rs", "pub fn nothing() {}")]);

    let routes = routes_from_directory(temp_dir.path()).unwrap();
    assert!(routes.is_empty());

    let document = OpenApiBuilder::new().build();
    let yaml = serialize_yaml(&document).unwrap();
    assert!(yaml.contains("paths: {}"));
}
