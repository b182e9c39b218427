//! Tests for HTTP error mapping.

use actix_web::body::to_bytes;
use actix_web::{App, test as actix_test, web};
use rstest::{fixture, rstest};
use serde_json::json;

use super::*;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn storage_failure() -> Error {
    Error::internal("relation \"articles\" does not exist")
        .with_trace_id(TRACE_ID)
        .with_details(json!({ "sqlstate": "42P01" }))
}

async fn render(error: &Error) -> (StatusCode, Option<String>, ErrorEnvelope) {
    let response = ResponseError::error_response(error);
    let status = response.status();
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .map(|value| value.to_str().expect("ascii header").to_owned());
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let envelope = serde_json::from_slice(&bytes).expect("envelope deserialises");
    (status, header, envelope)
}

#[rstest]
#[case(Error::malformed_input("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] error: Error, #[case] expected: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), expected);
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted(storage_failure: Error) {
    let (status, header, envelope) = render(&storage_failure).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(header.as_deref(), Some(TRACE_ID));
    assert_eq!(
        envelope,
        ErrorEnvelope {
            status: 500,
            code: "internal".to_owned(),
            message: INTERNAL_MESSAGE.to_owned(),
            trace_id: Some(TRACE_ID.to_owned()),
            details: None,
        }
    );
}

#[rstest]
#[actix_web::test]
async fn client_errors_keep_message_and_details() {
    let error = Error::malformed_input("sort_by must be one of created_at, votes")
        .with_details(json!({ "field": "sort_by", "value": "bogus" }));

    let (status, header, envelope) = render(&error).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(header, None);
    assert_eq!(envelope.status, 400);
    assert_eq!(envelope.code, "malformed_input");
    assert_eq!(envelope.message, "sort_by must be one of created_at, votes");
    assert_eq!(envelope.trace_id, None);
    assert_eq!(
        envelope.details,
        Some(json!({ "field": "sort_by", "value": "bogus" }))
    );
}

#[rstest]
fn envelope_serialises_camel_case_and_omits_absent_fields() {
    let value = serde_json::to_value(ErrorEnvelope::from(&Error::not_found("gone")))
        .expect("serialises");

    assert_eq!(
        value,
        json!({ "status": 404, "code": "not_found", "message": "gone" })
    );
}

#[derive(serde::Deserialize)]
struct Payload {
    #[expect(dead_code, reason = "only the extractor outcome matters")]
    count: i32,
}

async fn accept(_payload: web::Json<Payload>) -> HttpResponse {
    HttpResponse::Ok().finish()
}

#[rstest]
#[actix_web::test]
async fn malformed_json_uses_the_envelope() {
    let app = actix_test::init_service(
        App::new()
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .route("/", web::post().to(accept)),
    )
    .await;

    let req = actix_test::TestRequest::post()
        .uri("/")
        .insert_header(("content-type", "application/json"))
        .set_payload("{ not json")
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let envelope: ErrorEnvelope = actix_test::read_body_json(res).await;
    assert_eq!(envelope.code, "malformed_input");
    assert_eq!(envelope.details, Some(json!({ "code": "invalid_json" })));
}

#[rstest]
#[actix_web::test]
async fn unmatched_routes_are_not_found() {
    let app = actix_test::init_service(App::new().default_service(web::to(route_not_found))).await;

    let res = actix_test::call_service(&app, actix_test::TestRequest::get().uri("/nope").to_request()).await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let envelope: ErrorEnvelope = actix_test::read_body_json(res).await;
    assert_eq!(envelope.message, "route not found");
    assert_eq!(envelope.details, Some(json!({ "path": "/nope" })));
}
