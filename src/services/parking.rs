use crate::domain::parking::{AssignParkingSlot, ParkingSlot};
use crate::domain::types::ParkingSlotId;
use crate::errors::ApiResult;
use crate::forms::parking::AssignSlotForm;
use crate::pagination::{ListQueryState, Page};
use crate::query::{MutationKind, QueryState, keys};
use crate::repository::ApiRequest;
use crate::services::{Dashboard, Resource};

impl Resource for ParkingSlot {
    const KEY: &'static str = keys::PARKING;
    const PATH: &'static str = "/parking-slots";
}

pub async fn list_parking_slots(
    dashboard: &Dashboard,
    state: &ListQueryState,
) -> QueryState<Page<ParkingSlot>> {
    dashboard.query_list(state).await
}

/// Assigns a slot to a resident's vehicle.
pub async fn assign_parking_slot(
    dashboard: &Dashboard,
    id: ParkingSlotId,
    form: AssignSlotForm,
) -> ApiResult<Option<ParkingSlot>> {
    let payload = AssignParkingSlot::try_from(form)?;
    dashboard
        .mutate_with(
            MutationKind::AssignParkingSlot,
            ApiRequest::post(format!("{}/assign", ParkingSlot::item_path(id.get())), &payload)?,
        )
        .await
}

/// Frees a slot so it can be assigned again.
pub async fn release_parking_slot(
    dashboard: &Dashboard,
    id: ParkingSlotId,
) -> ApiResult<Option<ParkingSlot>> {
    dashboard
        .mutate_with(
            MutationKind::ReleaseParkingSlot,
            ApiRequest::action(format!("{}/release", ParkingSlot::item_path(id.get()))),
        )
        .await
}
