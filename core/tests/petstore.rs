use apidesc_core::{
    AppError, Describer, DescriberConfig, Harness, IdLevel, SchemaKind, SwaggerDescriber,
};
use http::{Method, Request, Response, StatusCode};
use pretty_assertions::assert_eq;
use std::fs;
use std::sync::Arc;
use std::thread;

const PETSTORE: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/tests/fixtures/petstore-expanded.yaml"
);

fn petstore() -> SwaggerDescriber {
    SwaggerDescriber::load(PETSTORE).unwrap()
}

#[test]
fn test_hierarchy_enumeration() {
    let api = petstore();
    assert_eq!(api.title(), "Swagger Petstore");
    assert_eq!(api.topics(), vec!["/pets", "/pets/{id}"]);
    assert_eq!(
        api.operations(""),
        vec!["/pets/{id}.get", "addPet", "deletePet", "findPets"]
    );
    assert_eq!(api.operations("/pets"), vec!["addPet", "findPets"]);
    assert_eq!(
        api.scenarios("addPet"),
        vec!["addPet.200", "addPet.default"]
    );
    assert_eq!(api.requests("addPet.200"), vec!["addPet.200.0"]);
    assert_eq!(api.requests("").len(), api.scenarios("").len());
}

#[test]
fn test_unknown_filters_are_empty() {
    let api = petstore();
    assert!(api.operations("/owners").is_empty());
    assert!(api.scenarios("feedPet").is_empty());
    assert!(api.requests("addPet.404").is_empty());
}

#[test]
fn test_add_pet_request() {
    let api = petstore();
    let (req, expected) = api.get_request("addPet.200.0", "", &[]).unwrap();
    assert_eq!(req.method(), Method::POST);
    assert_eq!(req.uri(), "http://petstore.swagger.io/api/pets");
    assert!(req.body().is_empty());

    assert_eq!(expected.status, Some(StatusCode::OK));
    assert_eq!(expected.status_text, "OK");
    assert_eq!(expected.description, "pet response");
    let schema = expected.schema.unwrap();
    assert_eq!(schema.kind, SchemaKind::Object);
    assert_eq!(schema.required, vec!["id", "name"]);
}

#[test]
fn test_add_pet_with_body() {
    let api = petstore();
    let body = r#"{"name":"rex","tag":"dog"}"#;
    let (req, _) = api.get_request("addPet.200.0", body, &[]).unwrap();
    assert_eq!(req.body(), body);
    assert_eq!(req.headers()["content-type"], "application/json");
}

#[test]
fn test_find_pets_query_and_headers() {
    let api = petstore();
    let (req, expected) = api
        .get_request(
            "findPets.200.0",
            "",
            &["&limit", "10", "&tags", "dog,cat", ":X-Request-Id", "abc"],
        )
        .unwrap();
    assert_eq!(
        req.uri(),
        "http://petstore.swagger.io/api/pets?limit=10&tags=dog%2Ccat"
    );
    assert_eq!(req.headers()["x-request-id"], "abc");

    let schema = expected.schema.unwrap();
    assert_eq!(schema.kind, SchemaKind::Array);
    assert_eq!(schema.items.unwrap().properties.len(), 3);
}

#[test]
fn test_path_parameter_required() {
    let api = petstore();
    let err = api.get_request("/pets/{id}.get.200.0", "", &[]).unwrap_err();
    assert!(matches!(err, AppError::ParamFormat(_)));

    let (req, _) = api
        .get_request("/pets/{id}.get.200.0", "", &["=id", "42"])
        .unwrap();
    assert_eq!(req.method(), Method::GET);
    assert_eq!(req.uri(), "http://petstore.swagger.io/api/pets/42");
}

#[test]
fn test_expected_responses() {
    let api = petstore();
    let deleted = api.get_expected_response("deletePet.204.0").unwrap();
    assert_eq!(deleted.status_code(), 204);
    assert_eq!(deleted.status_text, "No Content");
    assert!(deleted.schema.is_none());

    let fallback = api.get_expected_response("deletePet.default.0").unwrap();
    assert_eq!(fallback.status_code(), 0);
    assert_eq!(fallback.status_text, "");
    assert_eq!(fallback.description, "unexpected error");
}

#[test]
fn test_unknown_request_id() {
    let api = petstore();
    match api.get_expected_response("deletePet.404.0").unwrap_err() {
        AppError::UnknownId { level, id } => {
            assert_eq!(level, IdLevel::Request);
            assert_eq!(id, "deletePet.404.0");
        }
        other => panic!("expected UnknownId, got {:?}", other),
    }
}

#[test]
fn test_types_and_schemas() {
    let api = petstore();
    assert_eq!(api.types(), vec!["Error", "NewPet", "Pet"]);

    let pet = api.get_schema("Pet").unwrap();
    assert_eq!(pet.kind, SchemaKind::Object);
    assert!(pet.is_required("id"));
    assert!(pet.is_required("name"));
    assert!(!pet.is_required("tag"));
    let names: Vec<&str> = pet.properties.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["name", "tag", "id"]);
    assert_eq!(pet.properties["id"].format.as_deref(), Some("int64"));
}

#[test]
fn test_configured_base_url() {
    let cfg = DescriberConfig::with_base_url("http://127.0.0.1:8080/");
    let api = SwaggerDescriber::load_with_config(PETSTORE, &cfg).unwrap();
    let (req, _) = api
        .get_request("deletePet.204.0", "", &["=id", "7"])
        .unwrap();
    assert_eq!(req.method(), Method::DELETE);
    assert_eq!(req.uri(), "http://127.0.0.1:8080/pets/7");
}

#[test]
fn test_harness_against_stub() {
    let api = petstore();
    let stub = |req: &Request<String>| {
        let status = if req.uri().path().ends_with("/pets/1") {
            404
        } else {
            200
        };
        Response::builder()
            .status(status)
            .body(String::new())
            .map_err(|e| AppError::General(e.to_string()))
    };
    let harness = Harness::new(&api, stub);

    assert!(harness.test_request("findPets.200.0", "", &[]).is_ok());
    let err = harness
        .test_request("/pets/{id}.get.200.0", "", &["=id", "1"])
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "HTTP status expected: 200 OK. Got: 404 Not Found."
    );
}

#[test]
fn test_duplicate_operation_id_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dup.yaml");
    fs::write(
        &path,
        r#"
swagger: "2.0"
info: { title: Dup, version: "1" }
paths:
  /a:
    get:
      operationId: fetch
      responses: { "200": { description: ok } }
  /b:
    get:
      operationId: fetch
      responses: { "200": { description: ok } }
"#,
    )
    .unwrap();

    let err = SwaggerDescriber::load(&path).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Duplicate operationId `fetch`: declared by GET /a and GET /b"
    );
}

#[test]
fn test_shared_across_threads() {
    let api: Arc<dyn Describer> = Arc::new(petstore());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let api = Arc::clone(&api);
            thread::spawn(move || api.operations(""))
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), api.operations(""));
    }
}
