use crate::domain::staff::{NewStaffMember, StaffMember, UpdateStaffMember};
use crate::domain::types::StaffId;
use crate::errors::ApiResult;
use crate::forms::staff::StaffForm;
use crate::pagination::{ListQueryState, Page};
use crate::query::{MutationKind, QueryState, keys};
use crate::repository::ApiRequest;
use crate::services::{Dashboard, Resource};

impl Resource for StaffMember {
    const KEY: &'static str = keys::STAFF;
    const PATH: &'static str = "/building-staff";
}

/// Returns the staff directory page for the given screen state.
pub async fn list_staff(
    dashboard: &Dashboard,
    state: &ListQueryState,
) -> QueryState<Page<StaffMember>> {
    dashboard.query_list(state).await
}

pub async fn get_staff_member(dashboard: &Dashboard, id: StaffId) -> QueryState<StaffMember> {
    dashboard.query_item(id.get()).await
}

/// Validates the form and hires a new staff member.
pub async fn create_staff_member(
    dashboard: &Dashboard,
    form: StaffForm,
) -> ApiResult<Option<StaffMember>> {
    let payload = NewStaffMember::try_from(form)?;
    dashboard
        .mutate_with(
            MutationKind::CreateStaff,
            ApiRequest::post(StaffMember::PATH, &payload)?,
        )
        .await
}

/// Validates the form and applies it to an existing staff member.
pub async fn update_staff_member(
    dashboard: &Dashboard,
    id: StaffId,
    form: StaffForm,
) -> ApiResult<Option<StaffMember>> {
    let payload: UpdateStaffMember = form.into_update()?;
    dashboard
        .mutate_with(
            MutationKind::UpdateStaff,
            ApiRequest::put(StaffMember::item_path(id.get()), &payload)?,
        )
        .await
}

pub async fn delete_staff_member(dashboard: &Dashboard, id: StaffId) -> ApiResult<()> {
    dashboard
        .mutate(
            MutationKind::DeleteStaff,
            ApiRequest::delete(StaffMember::item_path(id.get())),
        )
        .await
        .map(|_| ())
}
