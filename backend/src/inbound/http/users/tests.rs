//! Tests for the user resources.

use super::*;
use crate::inbound::http::test_utils::{memory_state, read_error, test_app};
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::{fixture, rstest};
use serde_json::json;

#[derive(Debug)]
struct ValidationExpectation<'a> {
    field: &'a str,
    code: &'a str,
    top_code: &'a str,
}

#[fixture]
fn valid_user() -> Value {
    json!({
        "first_name": "Ada",
        "last_name": "Lovelace",
        "email": "ada@example.com",
        "password": "secret1",
    })
}

async fn post_user(body: Value) -> actix_web::dev::ServiceResponse {
    let app = actix_test::init_service(test_app(memory_state())).await;
    let req = actix_test::TestRequest::post()
        .uri("/api/v1/users")
        .set_json(body)
        .to_request();
    actix_test::call_service(&app, req).await
}

#[rstest]
#[actix_web::test]
async fn create_answers_created_with_the_record(valid_user: Value) {
    let res = post_user(valid_user).await;

    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["first_name"], "Ada");
    assert_eq!(body["password"], "secret1");
    assert_eq!(body["created_at"], body["updated_at"]);
    assert!(body["id"].as_str().is_some());
}

#[rstest]
#[case(
    "email",
    json!(null),
    ValidationExpectation { field: "email", code: "missing_field", top_code: "missing_field" }
)]
#[case(
    "email",
    json!("not-an-email"),
    ValidationExpectation { field: "email", code: "invalid_format", top_code: "invalid_field" }
)]
#[case(
    "password",
    json!("short"),
    ValidationExpectation { field: "password", code: "too_short", top_code: "invalid_field" }
)]
#[case(
    "first_name",
    json!("Ada2"),
    ValidationExpectation { field: "first_name", code: "invalid_characters", top_code: "invalid_field" }
)]
#[actix_web::test]
async fn field_failures_name_the_field(
    mut valid_user: Value,
    #[case] field: &str,
    #[case] value: Value,
    #[case] expected: ValidationExpectation<'_>,
) {
    let object = valid_user.as_object_mut().expect("object");
    if value.is_null() {
        object.remove(field);
    } else {
        object.insert(field.to_owned(), value);
    }

    let res = post_user(valid_user).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["code"], expected.top_code);
    assert_eq!(body["details"]["field"], expected.field);
    assert_eq!(body["details"]["code"], expected.code);
}

#[rstest]
#[actix_web::test]
async fn reviews_of_unknown_users_are_not_found() {
    let app = actix_test::init_service(test_app(memory_state())).await;
    let req = actix_test::TestRequest::get()
        .uri(&format!(
            "/api/v1/users/{}/reviews",
            crate::domain::EntityId::random()
        ))
        .to_request();

    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let err = read_error(res).await;
    assert!(err.message().starts_with("User not found"));
}
