use async_trait::async_trait;
use mockall::mock;
use slotsync_core::{
    errors::SlotResult,
    models::{
        availability::{AvailabilityWithTimeslots, CreateAvailabilityRequest},
        schedule::{CreateScheduleRequest, ScheduleWithAvailabilities, ScheduleWithTimeslots},
    },
};
use uuid::Uuid;

use crate::repositories::{AvailabilityRepository, ScheduleRepository};

mock! {
    pub ScheduleRepo {}

    #[async_trait]
    impl ScheduleRepository for ScheduleRepo {
        async fn create_schedule(
            &self,
            request: CreateScheduleRequest,
        ) -> SlotResult<ScheduleWithTimeslots>;

        async fn get_schedule(
            &self,
            uuid: Uuid,
        ) -> SlotResult<Option<ScheduleWithTimeslots>>;

        async fn get_schedule_with_availabilities(
            &self,
            uuid: Uuid,
        ) -> SlotResult<Option<ScheduleWithAvailabilities>>;

        async fn delete_schedule(
            &self,
            uuid: Uuid,
        ) -> SlotResult<Option<Uuid>>;
    }
}

mock! {
    pub AvailabilityRepo {}

    #[async_trait]
    impl AvailabilityRepository for AvailabilityRepo {
        async fn create_availability(
            &self,
            request: CreateAvailabilityRequest,
        ) -> SlotResult<AvailabilityWithTimeslots>;

        async fn get_availability(
            &self,
            id: i64,
        ) -> SlotResult<Option<AvailabilityWithTimeslots>>;

        async fn delete_availability(
            &self,
            id: i64,
            schedule_uuid: Uuid,
        ) -> SlotResult<Option<i64>>;
    }
}
