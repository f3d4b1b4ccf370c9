use serde::{Deserialize, Serialize};

use crate::domain::types::{ParkingSlotId, ParkingStatus, ResidentId, VehicleNumber};
use crate::pagination::ListItem;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ParkingSlot {
    pub id: ParkingSlotId,
    pub slot_number: String,
    pub slot_type: String,
    pub status: ParkingStatus,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub resident_id: Option<ResidentId>,
    #[serde(default)]
    pub resident_name: Option<String>,
    #[serde(default)]
    pub vehicle_number: Option<String>,
}

impl ListItem for ParkingSlot {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.slot_number.as_str()];
        fields.extend(self.vehicle_number.as_deref());
        fields.extend(self.resident_name.as_deref());
        fields
    }

    fn category(&self, name: &str) -> Option<&str> {
        match name {
            "status" => Some(self.status.as_str()),
            "slot_type" => Some(self.slot_type.as_str()),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct AssignParkingSlot {
    pub resident_id: ResidentId,
    pub vehicle_number: VehicleNumber,
}
