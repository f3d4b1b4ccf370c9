use serde::Deserialize;
use validator::Validate;

use crate::domain::staff::{NewStaffMember, UpdateStaffMember};
use crate::domain::types::{EmailAddress, Label, PersonName, PhoneNumber, StaffStatus};
use crate::forms::{FormError, optional_text};

#[derive(Debug, Deserialize, Validate)]
/// Form data for hiring or editing a staff member.
pub struct StaffForm {
    #[validate(length(min = 1))]
    pub full_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[validate(length(min = 1))]
    pub role_name: String,
    #[validate(length(min = 1))]
    pub department: String,
    /// Only read when editing; new hires start active.
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub shift: Option<String>,
}

struct StaffFields {
    full_name: PersonName,
    email: Option<EmailAddress>,
    phone: Option<PhoneNumber>,
    role_name: Label,
    department: Label,
    shift: Option<String>,
}

impl StaffForm {
    fn fields(self) -> Result<(StaffFields, Option<String>), FormError> {
        self.validate()?;

        let email = optional_text(self.email)
            .map(EmailAddress::new)
            .transpose()
            .map_err(|_| FormError::InvalidEmail)?;
        let phone = optional_text(self.phone)
            .map(PhoneNumber::new)
            .transpose()
            .map_err(|_| FormError::InvalidPhoneNumber)?;

        let fields = StaffFields {
            full_name: PersonName::new(self.full_name).map_err(|_| FormError::InvalidName)?,
            email,
            phone,
            role_name: Label::new(self.role_name).map_err(|_| FormError::InvalidName)?,
            department: Label::new(self.department).map_err(|_| FormError::InvalidName)?,
            shift: optional_text(self.shift),
        };
        Ok((fields, optional_text(self.status)))
    }

    /// Payload for an edit; an omitted status is not sent.
    pub fn into_update(self) -> Result<UpdateStaffMember, FormError> {
        let (fields, status) = self.fields()?;
        let status = status
            .map(|raw| {
                raw.parse::<StaffStatus>()
                    .map_err(|_| FormError::InvalidStatus(raw))
            })
            .transpose()?;

        Ok(UpdateStaffMember {
            full_name: fields.full_name,
            email: fields.email,
            phone: fields.phone,
            role_name: fields.role_name,
            department: fields.department,
            status,
            shift: fields.shift,
        })
    }
}

impl TryFrom<StaffForm> for NewStaffMember {
    type Error = FormError;

    fn try_from(form: StaffForm) -> Result<Self, Self::Error> {
        let (fields, _) = form.fields()?;
        Ok(NewStaffMember {
            full_name: fields.full_name,
            email: fields.email,
            phone: fields.phone,
            role_name: fields.role_name,
            department: fields.department,
            shift: fields.shift,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> StaffForm {
        StaffForm {
            full_name: "  Maya Fernandes ".into(),
            email: Some("Maya@Tower.example".into()),
            phone: Some("   ".into()),
            role_name: "Security Supervisor".into(),
            department: "Security".into(),
            status: None,
            shift: Some("night".into()),
        }
    }

    #[test]
    fn new_staff_is_normalized() {
        let payload = NewStaffMember::try_from(form()).unwrap();
        assert_eq!(payload.full_name.as_str(), "Maya Fernandes");
        assert_eq!(payload.email.unwrap().as_str(), "maya@tower.example");
        assert!(payload.phone.is_none());
    }

    #[test]
    fn unknown_status_is_rejected() {
        let mut form = form();
        form.status = Some("retired".into());
        assert!(matches!(
            form.into_update(),
            Err(FormError::InvalidStatus(status)) if status == "retired"
        ));
    }

    #[test]
    fn omitted_status_is_not_sent_on_update() {
        let payload = form().into_update().unwrap();
        assert_eq!(payload.status, None);
        let body = serde_json::to_value(&payload).unwrap();
        assert!(body.get("status").is_none());

        let mut form = form();
        form.status = Some("on_leave".into());
        let body = serde_json::to_value(form.into_update().unwrap()).unwrap();
        assert_eq!(body["status"], "on_leave");
    }

    #[test]
    fn empty_role_fails_validation() {
        let mut form = form();
        form.role_name = String::new();
        assert!(matches!(
            NewStaffMember::try_from(form),
            Err(FormError::Validation(_))
        ));
    }
}
