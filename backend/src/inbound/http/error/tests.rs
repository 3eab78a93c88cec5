//! Tests for HTTP error mapping.

use super::*;
use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use rstest::rstest;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

async fn render(error: &Error) -> (StatusCode, Option<String>, ErrorResponse) {
    let response = ResponseError::error_response(error);
    let status = response.status();
    let trace = response
        .headers()
        .get(TRACE_ID_HEADER)
        .map(|value| value.to_str().expect("ascii header").to_owned());
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let body = serde_json::from_slice(&bytes).expect("error envelope");
    (status, trace, body)
}

#[rstest]
#[case(
    Error::invalid_input("Username is required"),
    StatusCode::BAD_REQUEST,
    "Username is required"
)]
#[case(
    Error::upstream_auth_failure("Reddit authentication failed"),
    StatusCode::UNAUTHORIZED,
    "Reddit authentication failed"
)]
#[case(
    Error::subject_not_found("Reddit user not found"),
    StatusCode::NOT_FOUND,
    "Reddit user not found"
)]
#[case(
    Error::no_content("This user has no public comments"),
    StatusCode::NOT_FOUND,
    "This user has no public comments"
)]
#[case(
    Error::upstream_protocol("listing malformed"),
    StatusCode::INTERNAL_SERVER_ERROR,
    "Error: listing malformed"
)]
#[case(
    Error::completion_failure("completion timed out after 30000 ms"),
    StatusCode::INTERNAL_SERVER_ERROR,
    "Error: completion timed out after 30000 ms"
)]
#[case(Error::unknown("boom"), StatusCode::INTERNAL_SERVER_ERROR, "Error: boom")]
#[actix_web::test]
async fn kinds_map_to_status_and_envelope(
    #[case] error: Error,
    #[case] expected_status: StatusCode,
    #[case] expected_message: &str,
) {
    let (status, _, body) = render(&error).await;

    assert_eq!(status, expected_status);
    assert_eq!(
        body,
        ErrorResponse {
            error: expected_message.to_owned()
        }
    );
}

#[actix_web::test]
async fn trace_id_is_echoed_in_header() {
    let error = Error::unknown("boom").with_trace_id(TRACE_ID);

    let (_, trace, _) = render(&error).await;

    assert_eq!(trace.as_deref(), Some(TRACE_ID));
}

#[actix_web::test]
async fn missing_trace_id_omits_header() {
    let (_, trace, _) = render(&Error::invalid_input("bad")).await;

    assert!(trace.is_none());
}

async fn handled_body(err: JsonPayloadError) -> (StatusCode, ErrorResponse) {
    let req = actix_web::test::TestRequest::default().to_http_request();
    let response = json_error_handler(err, &req).error_response();
    let status = response.status();
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    (status, serde_json::from_slice(&bytes).expect("error envelope"))
}

fn deserialize_error(raw: &str) -> JsonPayloadError {
    let error = serde_json::from_str::<serde_json::Value>(raw).expect_err("invalid JSON");
    JsonPayloadError::Deserialize(error)
}

#[rstest]
#[case::missing_content_type(JsonPayloadError::ContentType, "Username is required")]
#[case::empty_body(deserialize_error(""), "Username is required")]
#[case::truncated_body(deserialize_error("{\"username\": "), "Malformed JSON body")]
#[actix_web::test]
async fn body_errors_become_invalid_input(
    #[case] err: JsonPayloadError,
    #[case] expected_message: &str,
) {
    let (status, body) = handled_body(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.error, expected_message);
}
