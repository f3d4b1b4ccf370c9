use serde::Deserialize;
use validator::Validate;

use crate::domain::service_request::{
    AssignServiceRequest, NewServiceRequest, UpdateRequestStatus,
};
use crate::domain::types::{Label, Priority, RequestStatus, RequestTitle, StaffId, UnitId};
use crate::forms::{FormError, optional_text};

#[derive(Debug, Deserialize, Validate)]
/// Form data for raising a service request on behalf of a unit.
pub struct NewRequestForm {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[validate(length(min = 1))]
    pub category: String,
    pub priority: String,
    pub unit_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct AssignRequestForm {
    pub staff_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct RequestStatusForm {
    pub status: String,
    #[serde(default)]
    pub note: Option<String>,
}

impl TryFrom<NewRequestForm> for NewServiceRequest {
    type Error = FormError;

    fn try_from(form: NewRequestForm) -> Result<Self, Self::Error> {
        form.validate()?;
        let priority = form
            .priority
            .parse::<Priority>()
            .map_err(|_| FormError::InvalidStatus(form.priority.clone()))?;

        Ok(NewServiceRequest {
            title: RequestTitle::new(form.title).map_err(|_| FormError::InvalidName)?,
            description: form.description.trim().to_string(),
            category: Label::new(form.category).map_err(|_| FormError::InvalidName)?,
            priority,
            unit_id: UnitId::new(form.unit_id).map_err(|_| FormError::InvalidId)?,
        })
    }
}

impl TryFrom<AssignRequestForm> for AssignServiceRequest {
    type Error = FormError;

    fn try_from(form: AssignRequestForm) -> Result<Self, Self::Error> {
        Ok(AssignServiceRequest {
            staff_id: StaffId::new(form.staff_id).map_err(|_| FormError::InvalidId)?,
        })
    }
}

impl TryFrom<RequestStatusForm> for UpdateRequestStatus {
    type Error = FormError;

    fn try_from(form: RequestStatusForm) -> Result<Self, Self::Error> {
        let status = form
            .status
            .parse::<RequestStatus>()
            .map_err(|_| FormError::InvalidStatus(form.status.clone()))?;
        Ok(UpdateRequestStatus {
            status,
            note: optional_text(form.note),
        })
    }
}
