use crate::domain::amenity::{Amenity, AmenityPayload};
use crate::domain::types::AmenityId;
use crate::errors::ApiResult;
use crate::forms::amenities::AmenityForm;
use crate::pagination::{ListQueryState, Page};
use crate::query::{MutationKind, QueryState, keys};
use crate::repository::ApiRequest;
use crate::services::{Dashboard, Resource};

impl Resource for Amenity {
    const KEY: &'static str = keys::AMENITIES;
    const PATH: &'static str = "/amenities";
}

pub async fn list_amenities(
    dashboard: &Dashboard,
    state: &ListQueryState,
) -> QueryState<Page<Amenity>> {
    dashboard.query_list(state).await
}

pub async fn get_amenity(dashboard: &Dashboard, id: AmenityId) -> QueryState<Amenity> {
    dashboard.query_item(id.get()).await
}

pub async fn create_amenity(
    dashboard: &Dashboard,
    form: AmenityForm,
) -> ApiResult<Option<Amenity>> {
    let payload = AmenityPayload::try_from(form)?;
    dashboard
        .mutate_with(
            MutationKind::CreateAmenity,
            ApiRequest::post(Amenity::PATH, &payload)?,
        )
        .await
}

pub async fn update_amenity(
    dashboard: &Dashboard,
    id: AmenityId,
    form: AmenityForm,
) -> ApiResult<Option<Amenity>> {
    let payload = AmenityPayload::try_from(form)?;
    dashboard
        .mutate_with(
            MutationKind::UpdateAmenity,
            ApiRequest::put(Amenity::item_path(id.get()), &payload)?,
        )
        .await
}

pub async fn delete_amenity(dashboard: &Dashboard, id: AmenityId) -> ApiResult<()> {
    dashboard
        .mutate(
            MutationKind::DeleteAmenity,
            ApiRequest::delete(Amenity::item_path(id.get())),
        )
        .await
        .map(|_| ())
}
