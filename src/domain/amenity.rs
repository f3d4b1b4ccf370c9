use serde::{Deserialize, Serialize};

use crate::domain::types::{AmenityId, AmenityName, AmenityStatus};
use crate::pagination::ListItem;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Amenity {
    pub id: AmenityId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub capacity: Option<u32>,
    pub status: AmenityStatus,
    #[serde(default)]
    pub booking_required: bool,
}

impl ListItem for Amenity {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        fields.extend(self.description.as_deref());
        fields.extend(self.location.as_deref());
        fields
    }

    fn category(&self, name: &str) -> Option<&str> {
        match name {
            "status" => Some(self.status.as_str()),
            _ => None,
        }
    }
}

/// Validated payload used both for creating and editing an amenity.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct AmenityPayload {
    pub name: AmenityName,
    pub description: Option<String>,
    pub location: Option<String>,
    pub capacity: Option<u32>,
    pub status: AmenityStatus,
    pub booking_required: bool,
}
