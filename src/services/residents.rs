use crate::domain::resident::Resident;
use crate::domain::types::ResidentId;
use crate::pagination::{ListQueryState, Page};
use crate::query::{QueryState, keys};
use crate::services::{Dashboard, Resource};

impl Resource for Resident {
    const KEY: &'static str = keys::RESIDENTS;
    const PATH: &'static str = "/residents";
}

/// Returns the resident directory page for the given screen state.
pub async fn list_residents(
    dashboard: &Dashboard,
    state: &ListQueryState,
) -> QueryState<Page<Resident>> {
    dashboard.query_list(state).await
}

pub async fn get_resident(dashboard: &Dashboard, id: ResidentId) -> QueryState<Resident> {
    dashboard.query_item(id.get()).await
}
