use crate::domain::document::{DocumentDecision, TenantDocument};
use crate::domain::types::DocumentId;
use crate::errors::ApiResult;
use crate::forms::documents::DocumentDecisionForm;
use crate::pagination::{ListQueryState, Page};
use crate::query::{MutationKind, QueryState, keys};
use crate::repository::ApiRequest;
use crate::services::{Dashboard, Resource};

impl Resource for TenantDocument {
    const KEY: &'static str = keys::DOCUMENTS;
    const PATH: &'static str = "/tenant-documents";
}

pub async fn list_documents(
    dashboard: &Dashboard,
    state: &ListQueryState,
) -> QueryState<Page<TenantDocument>> {
    dashboard.query_list(state).await
}

/// Verifies or rejects an uploaded document.
pub async fn review_document(
    dashboard: &Dashboard,
    id: DocumentId,
    form: DocumentDecisionForm,
) -> ApiResult<Option<TenantDocument>> {
    let payload = DocumentDecision::try_from(form)?;
    dashboard
        .mutate_with(
            MutationKind::ReviewDocument,
            ApiRequest::patch(
                format!("{}/verify", TenantDocument::item_path(id.get())),
                &payload,
            )?,
        )
        .await
}
