use serde::Deserialize;

use crate::domain::types::UnitStatus;
use crate::domain::unit::UpdateUnitStatus;
use crate::forms::FormError;

#[derive(Debug, Deserialize)]
pub struct UnitStatusForm {
    pub status: String,
}

impl TryFrom<UnitStatusForm> for UpdateUnitStatus {
    type Error = FormError;

    fn try_from(form: UnitStatusForm) -> Result<Self, Self::Error> {
        let status = form
            .status
            .parse::<UnitStatus>()
            .map_err(|_| FormError::InvalidStatus(form.status))?;
        Ok(UpdateUnitStatus { status })
    }
}
