#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use classbook::classbook_config::CorsConfig;
use classbook::router::init_router;
use classbook::services::SchoolServices;
use classbook::state::AppState;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

/// Router over empty in-memory stores.
pub fn setup_test_app() -> Router {
    let state = AppState {
        services: SchoolServices::memory(),
        cors_config: CorsConfig::from_lookup(|_| None),
    };
    init_router(state)
}

/// Sends one request and returns the status and the decoded body
/// (`Value::Null` when the body is empty).
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

pub fn unique_document(prefix: &str) -> String {
    format!("{prefix}-{}", &Uuid::new_v4().simple().to_string()[..8])
}

pub fn teacher_body(document: &str) -> Value {
    json!({
        "firstName": "Ada",
        "surname": "Lovelace",
        "document": document,
        "phone": "+55 41 99999-0000",
        "email": "ada@school.test",
        "hiringDate": "2020-02-01T09:00:00Z",
        "salary": 4200.5,
        "major": "Mathematics"
    })
}

pub fn parent_body(document: &str) -> Value {
    json!({
        "firstName": "Marta",
        "surname": "Souza",
        "phones": ["+55 41 98888-0000"],
        "emails": ["marta@home.test"],
        "address": [{
            "street": "Rua XV",
            "number": "100",
            "neighborhood": "Centro",
            "city": "Curitiba",
            "state": "PR",
            "zipCode": "80020-000"
        }],
        "document": document
    })
}

pub fn student_body(document: &str, class: &str, parents: &[&str]) -> Value {
    json!({
        "firstName": "Lia",
        "surname": "Souza",
        "birthDate": "2015-06-10T00:00:00Z",
        "document": document,
        "bloodType": "O+",
        "allergies": ["peanut"],
        "startDate": "2023-02-01T00:00:00Z",
        "class": class,
        "parents": parents
    })
}

fn id_of(body: &Value) -> String {
    body["id"].as_str().unwrap().to_string()
}

pub async fn create_teacher(app: &Router) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/v1/teachers",
        Some(teacher_body(&unique_document("T"))),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    id_of(&body)
}

pub async fn create_class(app: &Router, code: &str, teacher: Option<&str>) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/v1/classes",
        Some(json!({ "code": code, "teacher": teacher })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    id_of(&body)
}

pub async fn create_parent(app: &Router) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/v1/parents",
        Some(parent_body(&unique_document("P"))),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    id_of(&body)
}

pub async fn create_student(app: &Router, class: &str, parents: &[&str]) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/v1/students",
        Some(student_body(&unique_document("S"), class, parents)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    id_of(&body)
}
