use serde::Deserialize;
use validator::Validate;

use crate::domain::amenity::AmenityPayload;
use crate::domain::types::{AmenityName, AmenityStatus};
use crate::forms::{FormError, optional_text};

#[derive(Debug, Deserialize, Validate)]
/// Form data for creating or editing an amenity.
pub struct AmenityForm {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[validate(range(min = 1, max = 10000))]
    #[serde(default)]
    pub capacity: Option<u32>,
    pub status: String,
    #[serde(default)]
    pub booking_required: bool,
}

impl TryFrom<AmenityForm> for AmenityPayload {
    type Error = FormError;

    fn try_from(form: AmenityForm) -> Result<Self, Self::Error> {
        form.validate()?;
        let status = form
            .status
            .parse::<AmenityStatus>()
            .map_err(|_| FormError::InvalidStatus(form.status.clone()))?;

        Ok(AmenityPayload {
            name: AmenityName::new(form.name).map_err(|_| FormError::InvalidName)?,
            description: optional_text(form.description),
            location: optional_text(form.location),
            capacity: form.capacity,
            status,
            booking_required: form.booking_required,
        })
    }
}
