use axum::{http::StatusCode, response::IntoResponse};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};
use slotsync_api::middleware::error_handling::AppError;
use slotsync_core::errors::SlotError;

async fn body_json(error: AppError) -> (StatusCode, Value) {
    let response = error.into_response();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    (status, serde_json::from_slice(&bytes).expect("Body is not JSON"))
}

#[rstest]
#[case::not_found(SlotError::NotFound("Schedule missing".to_string()), StatusCode::NOT_FOUND)]
#[case::validation(SlotError::Validation("title must not be blank".to_string()), StatusCode::UNPROCESSABLE_ENTITY)]
#[case::integrity(SlotError::Integrity("schedule does not exist".to_string()), StatusCode::UNPROCESSABLE_ENTITY)]
#[case::database(SlotError::Database(eyre::eyre!("connection refused")), StatusCode::INTERNAL_SERVER_ERROR)]
#[case::internal(SlotError::Internal("worker crashed".into()), StatusCode::INTERNAL_SERVER_ERROR)]
#[tokio::test]
async fn test_error_status_mapping(#[case] error: SlotError, #[case] expected: StatusCode) {
    let error = AppError::from(error);
    assert_eq!(error.status(), expected);

    let (status, _) = body_json(error).await;
    assert_eq!(status, expected);
}

#[tokio::test]
async fn test_error_body_carries_message() {
    let (status, body) =
        body_json(AppError::from(SlotError::NotFound("Availability with ID 4 not found".to_string())))
            .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({ "error": "Resource not found: Availability with ID 4 not found" })
    );
}

#[tokio::test]
async fn test_eyre_report_is_internal_error() {
    let (status, body) = body_json(AppError::from(eyre::eyre!("pool timed out"))).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Database error: pool timed out" }));
}
