use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{EmailAddress, Label, PersonName, PhoneNumber, StaffId, StaffStatus};
use crate::pagination::ListItem;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct StaffMember {
    pub id: StaffId,
    pub full_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub role_name: String,
    pub department: String,
    pub status: StaffStatus,
    #[serde(default)]
    pub shift: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl ListItem for StaffMember {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![
            self.full_name.as_str(),
            self.role_name.as_str(),
            self.department.as_str(),
        ];
        fields.extend(self.email.as_deref());
        fields.extend(self.phone.as_deref());
        fields
    }

    fn category(&self, name: &str) -> Option<&str> {
        match name {
            "department" => Some(self.department.as_str()),
            "status" => Some(self.status.as_str()),
            _ => None,
        }
    }
}

/// Validated payload for hiring a staff member.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct NewStaffMember {
    pub full_name: PersonName,
    pub email: Option<EmailAddress>,
    pub phone: Option<PhoneNumber>,
    pub role_name: Label,
    pub department: Label,
    pub shift: Option<String>,
}

/// Validated payload for editing a staff member.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct UpdateStaffMember {
    pub full_name: PersonName,
    pub email: Option<EmailAddress>,
    pub phone: Option<PhoneNumber>,
    pub role_name: Label,
    pub department: Label,
    /// Left out of the request when `None` so the stored status stays.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<StaffStatus>,
    pub shift: Option<String>,
}
