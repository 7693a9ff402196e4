use async_trait::async_trait;
use chrono::NaiveDateTime;
use slotsync_core::{
    errors::SlotResult,
    models::schedule::{CreateScheduleRequest, ScheduleWithAvailabilities, ScheduleWithTimeslots},
};
use sqlx::PgConnection;
use uuid::Uuid;

use super::{PgRepository, availability, db_error, finish};
use crate::models::{DbSchedule, DbScheduleTimeslot};

#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    /// Inserts the schedule and all of its timeslots atomically.
    async fn create_schedule(&self, request: CreateScheduleRequest) -> SlotResult<ScheduleWithTimeslots>;

    async fn get_schedule(&self, uuid: Uuid) -> SlotResult<Option<ScheduleWithTimeslots>>;

    /// Loads the schedule, its timeslots, its availabilities and their
    /// timeslots with one query per level.
    async fn get_schedule_with_availabilities(
        &self,
        uuid: Uuid,
    ) -> SlotResult<Option<ScheduleWithAvailabilities>>;

    /// Deletes the schedule and, through cascading foreign keys, everything
    /// that hangs off it.
    async fn delete_schedule(&self, uuid: Uuid) -> SlotResult<Option<Uuid>>;
}

#[async_trait]
impl ScheduleRepository for PgRepository {
    async fn create_schedule(&self, request: CreateScheduleRequest) -> SlotResult<ScheduleWithTimeslots> {
        let uuid = Uuid::new_v4();

        tracing::debug!(
            "Creating schedule: uuid={}, title={}, timeslots={}",
            uuid, request.title, request.timeslots.len()
        );

        let mut tx = self.begin().await?;
        let result = insert_schedule(&mut tx, uuid, &request).await.map_err(db_error);
        let schedule = finish(tx, result).await?;

        tracing::debug!("Schedule created successfully: uuid={}", uuid);
        Ok(schedule)
    }

    async fn get_schedule(&self, uuid: Uuid) -> SlotResult<Option<ScheduleWithTimeslots>> {
        tracing::debug!("Getting schedule by uuid: {}", uuid);

        let mut tx = self.begin().await?;
        let result = fetch_schedule(&mut tx, uuid).await.map_err(db_error);
        let schedule = finish(tx, result).await?;

        if schedule.is_none() {
            tracing::debug!("Schedule not found: uuid={}", uuid);
        }
        Ok(schedule)
    }

    async fn get_schedule_with_availabilities(
        &self,
        uuid: Uuid,
    ) -> SlotResult<Option<ScheduleWithAvailabilities>> {
        tracing::debug!("Getting schedule with availabilities: {}", uuid);

        let mut tx = self.begin().await?;
        let result = fetch_schedule_with_availabilities(&mut tx, uuid)
            .await
            .map_err(db_error);
        finish(tx, result).await
    }

    async fn delete_schedule(&self, uuid: Uuid) -> SlotResult<Option<Uuid>> {
        tracing::debug!("Deleting schedule: {}", uuid);

        let mut tx = self.begin().await?;
        let result = sqlx::query_scalar::<_, Uuid>(
            r#"
            DELETE FROM schedules
            WHERE uuid = $1
            RETURNING uuid
            "#,
        )
        .bind(uuid)
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_error);
        finish(tx, result).await
    }
}

async fn insert_schedule(
    conn: &mut PgConnection,
    uuid: Uuid,
    request: &CreateScheduleRequest,
) -> sqlx::Result<ScheduleWithTimeslots> {
    let schedule = sqlx::query_as::<_, DbSchedule>(
        r#"
        INSERT INTO schedules (uuid, title)
        VALUES ($1, $2)
        RETURNING uuid, title, created_at, updated_at
        "#,
    )
    .bind(uuid)
    .bind(&request.title)
    .fetch_one(&mut *conn)
    .await?;

    if request.timeslots.is_empty() {
        return Ok(schedule.with_timeslots(Vec::new()));
    }

    let (starts, ends): (Vec<NaiveDateTime>, Vec<NaiveDateTime>) = request
        .timeslots
        .iter()
        .map(|slot| (slot.start_time, slot.end_time))
        .unzip();

    let mut timeslots = sqlx::query_as::<_, DbScheduleTimeslot>(
        r#"
        INSERT INTO schedule_timeslots (schedule_uuid, start_time, end_time)
        SELECT $1, slot.start_time, slot.end_time
        FROM UNNEST($2::timestamp[], $3::timestamp[]) AS slot(start_time, end_time)
        RETURNING id, schedule_uuid, start_time, end_time, created_at, updated_at
        "#,
    )
    .bind(uuid)
    .bind(starts)
    .bind(ends)
    .fetch_all(&mut *conn)
    .await?;
    timeslots.sort_by_key(|slot| slot.id);

    Ok(schedule.with_timeslots(timeslots))
}

async fn fetch_schedule(conn: &mut PgConnection, uuid: Uuid) -> sqlx::Result<Option<ScheduleWithTimeslots>> {
    let Some(schedule) = sqlx::query_as::<_, DbSchedule>(
        r#"
        SELECT uuid, title, created_at, updated_at
        FROM schedules
        WHERE uuid = $1
        "#,
    )
    .bind(uuid)
    .fetch_optional(&mut *conn)
    .await?
    else {
        return Ok(None);
    };

    let timeslots = sqlx::query_as::<_, DbScheduleTimeslot>(
        r#"
        SELECT id, schedule_uuid, start_time, end_time, created_at, updated_at
        FROM schedule_timeslots
        WHERE schedule_uuid = $1
        ORDER BY id ASC
        "#,
    )
    .bind(uuid)
    .fetch_all(&mut *conn)
    .await?;

    Ok(Some(schedule.with_timeslots(timeslots)))
}

async fn fetch_schedule_with_availabilities(
    conn: &mut PgConnection,
    uuid: Uuid,
) -> sqlx::Result<Option<ScheduleWithAvailabilities>> {
    let Some(schedule) = fetch_schedule(conn, uuid).await? else {
        return Ok(None);
    };
    let availabilities = availability::fetch_availabilities_for_schedule(conn, uuid).await?;

    Ok(Some(ScheduleWithAvailabilities::new(schedule, availabilities)))
}
