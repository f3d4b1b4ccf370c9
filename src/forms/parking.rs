use serde::Deserialize;

use crate::domain::parking::AssignParkingSlot;
use crate::domain::types::{ResidentId, VehicleNumber};
use crate::forms::FormError;

#[derive(Debug, Deserialize)]
/// Form data for allocating a slot to a resident's vehicle.
pub struct AssignSlotForm {
    pub resident_id: i64,
    pub vehicle_number: String,
}

impl TryFrom<AssignSlotForm> for AssignParkingSlot {
    type Error = FormError;

    fn try_from(form: AssignSlotForm) -> Result<Self, Self::Error> {
        Ok(AssignParkingSlot {
            resident_id: ResidentId::new(form.resident_id).map_err(|_| FormError::InvalidId)?,
            vehicle_number: VehicleNumber::new(form.vehicle_number)
                .map_err(|_| FormError::InvalidVehicleNumber)?,
        })
    }
}
