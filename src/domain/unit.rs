use serde::{Deserialize, Serialize};

use crate::domain::types::{UnitId, UnitStatus};
use crate::pagination::ListItem;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Unit {
    pub id: UnitId,
    pub unit_number: String,
    #[serde(default)]
    pub building: String,
    #[serde(default)]
    pub floor: Option<i32>,
    pub unit_type: String,
    pub status: UnitStatus,
    #[serde(default)]
    pub area_sqft: Option<f64>,
    #[serde(default)]
    pub owner_name: Option<String>,
    #[serde(default)]
    pub tenant_name: Option<String>,
}

impl ListItem for Unit {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.unit_number.as_str(), self.building.as_str()];
        fields.extend(self.owner_name.as_deref());
        fields.extend(self.tenant_name.as_deref());
        fields
    }

    fn category(&self, name: &str) -> Option<&str> {
        match name {
            "status" => Some(self.status.as_str()),
            "unit_type" => Some(self.unit_type.as_str()),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct UpdateUnitStatus {
    pub status: UnitStatus,
}
