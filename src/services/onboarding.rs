use crate::domain::onboarding::{
    ApplicationReview, NewOnboardingApplication, OnboardingApplication,
};
use crate::domain::types::ApplicationId;
use crate::errors::ApiResult;
use crate::forms::onboarding::{ApplicationForm, ReviewForm};
use crate::pagination::{ListQueryState, Page};
use crate::query::{MutationKind, QueryState, keys};
use crate::repository::ApiRequest;
use crate::services::{Dashboard, Resource};

impl Resource for OnboardingApplication {
    const KEY: &'static str = keys::ONBOARDING;
    const PATH: &'static str = "/tenant-onboarding";
}

pub async fn list_applications(
    dashboard: &Dashboard,
    state: &ListQueryState,
) -> QueryState<Page<OnboardingApplication>> {
    dashboard.query_list(state).await
}

pub async fn get_application(
    dashboard: &Dashboard,
    id: ApplicationId,
) -> QueryState<OnboardingApplication> {
    dashboard.query_item(id.get()).await
}

pub async fn submit_application(
    dashboard: &Dashboard,
    form: ApplicationForm,
) -> ApiResult<Option<OnboardingApplication>> {
    let payload = NewOnboardingApplication::try_from(form)?;
    dashboard
        .mutate_with(
            MutationKind::SubmitApplication,
            ApiRequest::post(OnboardingApplication::PATH, &payload)?,
        )
        .await
}

/// Approves or rejects an application. Approval creates the resident on
/// the backend, so resident and unit lists go stale too.
pub async fn review_application(
    dashboard: &Dashboard,
    id: ApplicationId,
    form: ReviewForm,
) -> ApiResult<Option<OnboardingApplication>> {
    let payload = ApplicationReview::try_from(form)?;
    dashboard
        .mutate_with(
            MutationKind::ReviewApplication,
            ApiRequest::post(
                format!("{}/review", OnboardingApplication::item_path(id.get())),
                &payload,
            )?,
        )
        .await
}
