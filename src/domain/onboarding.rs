use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    ApplicationId, ApplicationStatus, EmailAddress, PersonName, PhoneNumber, UnitId,
};
use crate::pagination::ListItem;

/// Tenant onboarding application.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct OnboardingApplication {
    pub id: ApplicationId,
    pub tenant_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub unit_id: Option<UnitId>,
    #[serde(default)]
    pub unit_number: Option<String>,
    pub status: ApplicationStatus,
    #[serde(default)]
    pub move_in_date: Option<NaiveDate>,
    #[serde(default)]
    pub documents_verified: u32,
    #[serde(default)]
    pub documents_total: u32,
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
}

impl OnboardingApplication {
    /// Whether every uploaded document has been verified.
    pub fn documents_complete(&self) -> bool {
        self.documents_total > 0 && self.documents_verified >= self.documents_total
    }
}

impl ListItem for OnboardingApplication {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.tenant_name.as_str(), self.email.as_str()];
        fields.extend(self.unit_number.as_deref());
        fields
    }

    fn category(&self, name: &str) -> Option<&str> {
        match name {
            "status" => Some(self.status.as_str()),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct NewOnboardingApplication {
    pub tenant_name: PersonName,
    pub email: EmailAddress,
    pub phone: Option<PhoneNumber>,
    pub unit_id: UnitId,
    pub move_in_date: NaiveDate,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ApplicationReview {
    pub status: ApplicationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}
