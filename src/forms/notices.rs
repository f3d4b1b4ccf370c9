use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

use crate::domain::notice::NoticeDraft;
use crate::domain::types::{Label, NoticeBody, NoticeTitle, Priority};
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
/// Form data for drafting or editing a notice.
pub struct NoticeForm {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1))]
    pub content: String,
    #[validate(length(min = 1))]
    pub category: String,
    pub priority: String,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl TryFrom<NoticeForm> for NoticeDraft {
    type Error = FormError;

    fn try_from(form: NoticeForm) -> Result<Self, Self::Error> {
        form.validate()?;
        let priority = form
            .priority
            .parse::<Priority>()
            .map_err(|_| FormError::InvalidStatus(form.priority.clone()))?;

        Ok(NoticeDraft {
            title: NoticeTitle::new(form.title).map_err(|_| FormError::InvalidName)?,
            content: NoticeBody::new(form.content).map_err(|_| FormError::InvalidName)?,
            category: Label::new(form.category).map_err(|_| FormError::InvalidName)?,
            priority,
            expires_at: form.expires_at,
        })
    }
}
