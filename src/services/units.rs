use crate::domain::types::UnitId;
use crate::domain::unit::{Unit, UpdateUnitStatus};
use crate::errors::ApiResult;
use crate::forms::units::UnitStatusForm;
use crate::pagination::{ListQueryState, Page};
use crate::query::{MutationKind, QueryState, keys};
use crate::repository::ApiRequest;
use crate::services::{Dashboard, Resource};

impl Resource for Unit {
    const KEY: &'static str = keys::UNITS;
    const PATH: &'static str = "/units";
}

pub async fn list_units(dashboard: &Dashboard, state: &ListQueryState) -> QueryState<Page<Unit>> {
    dashboard.query_list(state).await
}

pub async fn get_unit(dashboard: &Dashboard, id: UnitId) -> QueryState<Unit> {
    dashboard.query_item(id.get()).await
}

/// Moves a unit to a new occupancy status.
pub async fn update_unit_status(
    dashboard: &Dashboard,
    id: UnitId,
    form: UnitStatusForm,
) -> ApiResult<Option<Unit>> {
    let payload = UpdateUnitStatus::try_from(form)?;
    dashboard
        .mutate_with(
            MutationKind::UpdateUnitStatus,
            ApiRequest::patch(format!("{}/status", Unit::item_path(id.get())), &payload)?,
        )
        .await
}
