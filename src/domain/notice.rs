use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{Label, NoticeBody, NoticeId, NoticeStatus, NoticeTitle, Priority};
use crate::pagination::ListItem;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Notice {
    pub id: NoticeId,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub category: String,
    pub priority: Priority,
    pub status: NoticeStatus,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl ListItem for Notice {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.title.as_str(),
            self.content.as_str(),
            self.category.as_str(),
        ]
    }

    fn category(&self, name: &str) -> Option<&str> {
        match name {
            "status" => Some(self.status.as_str()),
            "priority" => Some(self.priority.as_str()),
            "category" => Some(self.category.as_str()),
            _ => None,
        }
    }
}

/// Validated payload used both for drafting and editing a notice.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct NoticeDraft {
    pub title: NoticeTitle,
    pub content: NoticeBody,
    pub category: Label,
    pub priority: Priority,
    pub expires_at: Option<DateTime<Utc>>,
}
