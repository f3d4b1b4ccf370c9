use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::domain::onboarding::{ApplicationReview, NewOnboardingApplication};
use crate::domain::types::{ApplicationStatus, EmailAddress, PersonName, PhoneNumber, UnitId};
use crate::forms::{FormError, optional_text};

#[derive(Debug, Deserialize, Validate)]
/// Form data for starting a tenant onboarding application.
pub struct ApplicationForm {
    #[validate(length(min = 1))]
    pub tenant_name: String,
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub unit_id: i64,
    /// Expected move-in date as `YYYY-MM-DD`.
    pub move_in_date: String,
}

#[derive(Debug, Deserialize)]
pub struct ReviewForm {
    pub status: String,
    #[serde(default)]
    pub remarks: Option<String>,
}

impl TryFrom<ApplicationForm> for NewOnboardingApplication {
    type Error = FormError;

    fn try_from(form: ApplicationForm) -> Result<Self, Self::Error> {
        form.validate()?;
        let move_in_date = NaiveDate::parse_from_str(form.move_in_date.trim(), "%Y-%m-%d")
            .map_err(|_| FormError::InvalidDate(form.move_in_date.clone()))?;
        let phone = optional_text(form.phone)
            .map(PhoneNumber::new)
            .transpose()
            .map_err(|_| FormError::InvalidPhoneNumber)?;

        Ok(NewOnboardingApplication {
            tenant_name: PersonName::new(form.tenant_name).map_err(|_| FormError::InvalidName)?,
            email: EmailAddress::new(form.email).map_err(|_| FormError::InvalidEmail)?,
            phone,
            unit_id: UnitId::new(form.unit_id).map_err(|_| FormError::InvalidId)?,
            move_in_date,
        })
    }
}

impl TryFrom<ReviewForm> for ApplicationReview {
    type Error = FormError;

    fn try_from(form: ReviewForm) -> Result<Self, Self::Error> {
        let status = match form.status.parse::<ApplicationStatus>() {
            Ok(status) if status != ApplicationStatus::Pending => status,
            _ => return Err(FormError::InvalidStatus(form.status)),
        };
        let remarks = optional_text(form.remarks);
        if status == ApplicationStatus::Rejected && remarks.is_none() {
            return Err(FormError::MissingRemarks);
        }
        Ok(ApplicationReview { status, remarks })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_in_date_must_be_iso() {
        let form = ApplicationForm {
            tenant_name: "Ravi Menon".into(),
            email: "ravi@example.com".into(),
            phone: None,
            unit_id: 7,
            move_in_date: "07/01/2026".into(),
        };
        assert!(matches!(
            NewOnboardingApplication::try_from(form),
            Err(FormError::InvalidDate(_))
        ));
    }

    #[test]
    fn approval_without_remarks_is_fine() {
        let review = ApplicationReview::try_from(ReviewForm {
            status: "approved".into(),
            remarks: None,
        })
        .unwrap();
        assert_eq!(review.status, ApplicationStatus::Approved);
    }
}
