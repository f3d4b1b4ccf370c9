use crate::domain::service_request::{
    AssignServiceRequest, NewServiceRequest, ServiceRequest, UpdateRequestStatus,
};
use crate::domain::types::ServiceRequestId;
use crate::dto::list::ListMode;
use crate::errors::ApiResult;
use crate::forms::service_requests::{AssignRequestForm, NewRequestForm, RequestStatusForm};
use crate::pagination::{ListQueryState, Page};
use crate::query::{MutationKind, QueryState, keys};
use crate::repository::ApiRequest;
use crate::services::{Dashboard, Resource};

// The request queue grows without bound, so the backend pages it.
impl Resource for ServiceRequest {
    const KEY: &'static str = keys::SERVICE_REQUESTS;
    const PATH: &'static str = "/service-requests";
    const MODE: ListMode = ListMode::Server;
}

pub async fn list_service_requests(
    dashboard: &Dashboard,
    state: &ListQueryState,
) -> QueryState<Page<ServiceRequest>> {
    dashboard.query_list(state).await
}

pub async fn get_service_request(
    dashboard: &Dashboard,
    id: ServiceRequestId,
) -> QueryState<ServiceRequest> {
    dashboard.query_item(id.get()).await
}

/// Opens a new maintenance request for a unit.
pub async fn create_service_request(
    dashboard: &Dashboard,
    form: NewRequestForm,
) -> ApiResult<Option<ServiceRequest>> {
    let payload = NewServiceRequest::try_from(form)?;
    dashboard
        .mutate_with(
            MutationKind::CreateServiceRequest,
            ApiRequest::post(ServiceRequest::PATH, &payload)?,
        )
        .await
}

/// Hands a request to a staff member.
pub async fn assign_service_request(
    dashboard: &Dashboard,
    id: ServiceRequestId,
    form: AssignRequestForm,
) -> ApiResult<Option<ServiceRequest>> {
    let payload = AssignServiceRequest::try_from(form)?;
    dashboard
        .mutate_with(
            MutationKind::AssignServiceRequest,
            ApiRequest::post(
                format!("{}/assign", ServiceRequest::item_path(id.get())),
                &payload,
            )?,
        )
        .await
}

pub async fn update_request_status(
    dashboard: &Dashboard,
    id: ServiceRequestId,
    form: RequestStatusForm,
) -> ApiResult<Option<ServiceRequest>> {
    let payload = UpdateRequestStatus::try_from(form)?;
    dashboard
        .mutate_with(
            MutationKind::UpdateRequestStatus,
            ApiRequest::patch(
                format!("{}/status", ServiceRequest::item_path(id.get())),
                &payload,
            )?,
        )
        .await
}

pub async fn delete_service_request(dashboard: &Dashboard, id: ServiceRequestId) -> ApiResult<()> {
    dashboard
        .mutate(
            MutationKind::DeleteServiceRequest,
            ApiRequest::delete(ServiceRequest::item_path(id.get())),
        )
        .await
        .map(|_| ())
}
