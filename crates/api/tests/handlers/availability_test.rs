use axum::http::StatusCode;
use mockall::predicate;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use slotsync_core::{errors::SlotError, models::availability::AvailabilityWithTimeslots};
use uuid::Uuid;

use crate::test_utils::{TestContext, at, availability_fixture};

#[tokio::test]
async fn test_create_availability() {
    let mut ctx = TestContext::new();
    let schedule_uuid = Uuid::new_v4();

    ctx.availability_repo
        .expect_create_availability()
        .withf(move |request| {
            request.schedule_uuid == schedule_uuid
                && request.guest_user_name == "Aiko"
                && request.timeslots.len() == 1
                && request.timeslots[0].schedule_timeslot_id == 1
                && request.timeslots[0].start_time == at(9, 0)
        })
        .times(1)
        .returning(move |request| {
            let slots: Vec<_> = request
                .timeslots
                .iter()
                .map(|slot| (slot.schedule_timeslot_id, slot.start_time, slot.end_time))
                .collect();
            Ok(availability_fixture(
                7,
                request.schedule_uuid,
                &request.guest_user_name,
                &slots,
            ))
        });

    let server = ctx.server();
    let response = server
        .post("/availabilities")
        .json(&json!({
            "schedule_uuid": schedule_uuid,
            "guest_user_name": "Aiko",
            "timeslots": [
                {
                    "schedule_timeslot_id": 1,
                    "start_time": "2025-01-01T09:00:00",
                    "end_time": "2025-01-01T10:00:00"
                }
            ]
        }))
        .await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["id"], json!(7));
    assert_eq!(body["schedule_uuid"], json!(schedule_uuid.to_string()));
    assert_eq!(body["guest_user_name"], json!("Aiko"));
    assert_eq!(body["availability_timeslots"][0]["schedule_timeslot_id"], json!(1));
    assert_eq!(
        body["availability_timeslots"][0]["end_time"],
        json!("2025-01-01T10:00:00")
    );
}

#[tokio::test]
async fn test_create_availability_accepts_space_separated_datetimes() {
    let mut ctx = TestContext::new();
    let schedule_uuid = Uuid::new_v4();

    ctx.availability_repo
        .expect_create_availability()
        .withf(|request| {
            request.timeslots[0].start_time == at(9, 0) && request.timeslots[0].end_time == at(9, 30)
        })
        .times(1)
        .returning(move |request| {
            Ok(availability_fixture(
                8,
                request.schedule_uuid,
                &request.guest_user_name,
                &[(2, at(9, 0), at(9, 30))],
            ))
        });

    let server = ctx.server();
    let response = server
        .post("/availabilities")
        .json(&json!({
            "schedule_uuid": schedule_uuid,
            "guest_user_name": "Bram",
            "timeslots": [
                {
                    "schedule_timeslot_id": 2,
                    "start_time": "2025-01-01 09:00",
                    "end_time": "2025-01-01 09:30:00"
                }
            ]
        }))
        .await;

    response.assert_status_ok();
}

#[tokio::test]
async fn test_create_availability_rejected_reference_is_unprocessable() {
    let mut ctx = TestContext::new();

    ctx.availability_repo
        .expect_create_availability()
        .times(1)
        .returning(|_| {
            Err(SlotError::Integrity(
                "schedule_timeslot_id does not belong to the schedule".to_string(),
            ))
        });

    let server = ctx.server();
    let response = server
        .post("/availabilities")
        .json(&json!({
            "schedule_uuid": Uuid::new_v4(),
            "guest_user_name": "Aiko",
            "timeslots": [
                {
                    "schedule_timeslot_id": 99,
                    "start_time": "2025-01-01T09:00:00",
                    "end_time": "2025-01-01T10:00:00"
                }
            ]
        }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body = response.json::<Value>();
    assert!(body["error"].as_str().unwrap().starts_with("Integrity error"));
}

#[tokio::test]
async fn test_create_availability_blank_guest_name_is_unprocessable() {
    let mut ctx = TestContext::new();
    ctx.availability_repo.expect_create_availability().never();

    let server = ctx.server();
    let response = server
        .post("/availabilities")
        .json(&json!({
            "schedule_uuid": Uuid::new_v4(),
            "guest_user_name": "   ",
            "timeslots": []
        }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body = response.json::<Value>();
    assert_eq!(
        body["error"],
        json!("Validation error: guest_user_name must not be blank")
    );
}

#[tokio::test]
async fn test_create_availability_bad_datetime_is_unprocessable() {
    let mut ctx = TestContext::new();
    ctx.availability_repo.expect_create_availability().never();

    let server = ctx.server();
    let response = server
        .post("/availabilities")
        .json(&json!({
            "schedule_uuid": Uuid::new_v4(),
            "guest_user_name": "Aiko",
            "timeslots": [
                { "schedule_timeslot_id": 1, "start_time": "tomorrow", "end_time": "later" }
            ]
        }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_get_availability() {
    let mut ctx = TestContext::new();
    let stored = availability_fixture(
        3,
        Uuid::new_v4(),
        "Aiko",
        &[(1, at(9, 0), at(10, 0)), (2, at(11, 0), at(12, 0))],
    );
    let expected = stored.clone();

    ctx.availability_repo
        .expect_get_availability()
        .with(predicate::eq(3))
        .times(1)
        .returning(move |_| Ok(Some(stored.clone())));

    let server = ctx.server();
    let response = server.get("/availabilities/3").await;

    response.assert_status_ok();
    assert_eq!(response.json::<AvailabilityWithTimeslots>(), expected);
}

#[tokio::test]
async fn test_get_availability_unknown_id_is_not_found() {
    let mut ctx = TestContext::new();
    ctx.availability_repo
        .expect_get_availability()
        .with(predicate::eq(999))
        .times(1)
        .returning(|_| Ok(None));

    let server = ctx.server();
    let response = server.get("/availabilities/999").await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body = response.json::<Value>();
    assert_eq!(
        body["error"],
        json!("Resource not found: Availability with ID 999 not found")
    );
}

#[tokio::test]
async fn test_get_availability_non_numeric_id_is_unprocessable() {
    let mut ctx = TestContext::new();
    ctx.availability_repo.expect_get_availability().never();

    let server = ctx.server();
    let response = server.get("/availabilities/abc").await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_delete_availability() {
    let mut ctx = TestContext::new();
    let schedule_uuid = Uuid::new_v4();

    ctx.availability_repo
        .expect_delete_availability()
        .with(predicate::eq(3), predicate::eq(schedule_uuid))
        .times(1)
        .returning(|id, _| Ok(Some(id)));

    let server = ctx.server();
    let response = server
        .delete("/availabilities/3")
        .add_query_param("schedule_uuid", schedule_uuid)
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>(),
        json!({
            "message": "Availability 3 deleted",
            "availability_id": 3,
            "schedule_uuid": schedule_uuid.to_string(),
        })
    );
}

#[tokio::test]
async fn test_delete_availability_on_other_schedule_is_not_found() {
    let mut ctx = TestContext::new();
    let schedule_uuid = Uuid::new_v4();

    ctx.availability_repo
        .expect_delete_availability()
        .with(predicate::eq(999), predicate::eq(schedule_uuid))
        .times(1)
        .returning(|_, _| Ok(None));

    let server = ctx.server();
    let response = server
        .delete("/availabilities/999")
        .add_query_param("schedule_uuid", schedule_uuid)
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body = response.json::<Value>();
    assert_eq!(
        body["error"],
        json!(format!(
            "Resource not found: Availability with ID 999 not found on schedule {schedule_uuid}"
        ))
    );
}

#[tokio::test]
async fn test_delete_availability_without_schedule_uuid_is_unprocessable() {
    let mut ctx = TestContext::new();
    ctx.availability_repo.expect_delete_availability().never();

    let server = ctx.server();
    let response = server.delete("/availabilities/3").await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}
