use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{ApplicationId, DocumentId, DocumentStatus};
use crate::pagination::ListItem;

/// Document uploaded by a tenant and awaiting verification.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TenantDocument {
    pub id: DocumentId,
    pub document_name: String,
    pub document_type: String,
    pub tenant_name: String,
    #[serde(default)]
    pub application_id: Option<ApplicationId>,
    pub status: DocumentStatus,
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default)]
    pub remarks: Option<String>,
    #[serde(default)]
    pub uploaded_at: Option<DateTime<Utc>>,
}

impl ListItem for TenantDocument {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.document_name.as_str(),
            self.tenant_name.as_str(),
            self.document_type.as_str(),
        ]
    }

    fn category(&self, name: &str) -> Option<&str> {
        match name {
            "status" => Some(self.status.as_str()),
            "document_type" => Some(self.document_type.as_str()),
            _ => None,
        }
    }
}

/// Verification decision for a document.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct DocumentDecision {
    pub status: DocumentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}
