use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::types::{ResidentId, ResidentType, UnitId};
use crate::pagination::ListItem;

/// Entry of the resident directory.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Resident {
    pub id: ResidentId,
    pub full_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub unit_id: Option<UnitId>,
    #[serde(default)]
    pub unit_number: Option<String>,
    pub resident_type: ResidentType,
    #[serde(default)]
    pub move_in_date: Option<NaiveDate>,
}

impl ListItem for Resident {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.full_name.as_str()];
        fields.extend(self.unit_number.as_deref());
        fields.extend(self.email.as_deref());
        fields.extend(self.phone.as_deref());
        fields
    }

    fn category(&self, name: &str) -> Option<&str> {
        match name {
            "resident_type" => Some(self.resident_type.as_str()),
            _ => None,
        }
    }
}
