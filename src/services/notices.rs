use crate::domain::notice::{Notice, NoticeDraft};
use crate::domain::types::NoticeId;
use crate::errors::ApiResult;
use crate::forms::notices::NoticeForm;
use crate::pagination::{ListQueryState, Page};
use crate::query::{MutationKind, QueryState, keys};
use crate::repository::ApiRequest;
use crate::services::{Dashboard, Resource};

impl Resource for Notice {
    const KEY: &'static str = keys::NOTICES;
    const PATH: &'static str = "/notices";
}

pub async fn list_notices(
    dashboard: &Dashboard,
    state: &ListQueryState,
) -> QueryState<Page<Notice>> {
    dashboard.query_list(state).await
}

pub async fn get_notice(dashboard: &Dashboard, id: NoticeId) -> QueryState<Notice> {
    dashboard.query_item(id.get()).await
}

/// Validates the form and stores it as a draft notice.
pub async fn create_notice(
    dashboard: &Dashboard,
    form: NoticeForm,
) -> ApiResult<Option<Notice>> {
    let payload = NoticeDraft::try_from(form)?;
    dashboard
        .mutate_with(
            MutationKind::CreateNotice,
            ApiRequest::post(Notice::PATH, &payload)?,
        )
        .await
}

pub async fn update_notice(
    dashboard: &Dashboard,
    id: NoticeId,
    form: NoticeForm,
) -> ApiResult<Option<Notice>> {
    let payload = NoticeDraft::try_from(form)?;
    dashboard
        .mutate_with(
            MutationKind::UpdateNotice,
            ApiRequest::put(Notice::item_path(id.get()), &payload)?,
        )
        .await
}

/// Makes a notice visible to residents.
pub async fn publish_notice(dashboard: &Dashboard, id: NoticeId) -> ApiResult<Option<Notice>> {
    dashboard
        .mutate_with(
            MutationKind::PublishNotice,
            ApiRequest::action(format!("{}/publish", Notice::item_path(id.get()))),
        )
        .await
}

pub async fn archive_notice(dashboard: &Dashboard, id: NoticeId) -> ApiResult<Option<Notice>> {
    dashboard
        .mutate_with(
            MutationKind::ArchiveNotice,
            ApiRequest::action(format!("{}/archive", Notice::item_path(id.get()))),
        )
        .await
}

pub async fn delete_notice(dashboard: &Dashboard, id: NoticeId) -> ApiResult<()> {
    dashboard
        .mutate(
            MutationKind::DeleteNotice,
            ApiRequest::delete(Notice::item_path(id.get())),
        )
        .await
        .map(|_| ())
}
