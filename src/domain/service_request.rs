use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    Label, Priority, RequestStatus, RequestTitle, ServiceRequestId, StaffId, UnitId,
};
use crate::pagination::ListItem;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ServiceRequest {
    pub id: ServiceRequestId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    pub priority: Priority,
    pub status: RequestStatus,
    #[serde(default)]
    pub unit_id: Option<UnitId>,
    #[serde(default)]
    pub unit_number: Option<String>,
    #[serde(default)]
    pub assigned_to: Option<StaffId>,
    #[serde(default)]
    pub assigned_to_name: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl ListItem for ServiceRequest {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![
            self.title.as_str(),
            self.description.as_str(),
            self.category.as_str(),
        ];
        fields.extend(self.unit_number.as_deref());
        fields.extend(self.assigned_to_name.as_deref());
        fields
    }

    fn category(&self, name: &str) -> Option<&str> {
        match name {
            "status" => Some(self.status.as_str()),
            "priority" => Some(self.priority.as_str()),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct NewServiceRequest {
    pub title: RequestTitle,
    pub description: String,
    pub category: Label,
    pub priority: Priority,
    pub unit_id: UnitId,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct AssignServiceRequest {
    pub staff_id: StaffId,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct UpdateRequestStatus {
    pub status: RequestStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}
