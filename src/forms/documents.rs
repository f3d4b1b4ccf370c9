use serde::Deserialize;

use crate::domain::document::DocumentDecision;
use crate::domain::types::DocumentStatus;
use crate::forms::{FormError, optional_text};

#[derive(Debug, Deserialize)]
/// Reviewer decision on an uploaded tenant document.
pub struct DocumentDecisionForm {
    pub status: String,
    #[serde(default)]
    pub remarks: Option<String>,
}

impl TryFrom<DocumentDecisionForm> for DocumentDecision {
    type Error = FormError;

    fn try_from(form: DocumentDecisionForm) -> Result<Self, Self::Error> {
        let status = match form.status.parse::<DocumentStatus>() {
            Ok(status @ (DocumentStatus::Verified | DocumentStatus::Rejected)) => status,
            _ => return Err(FormError::InvalidStatus(form.status)),
        };
        let remarks = optional_text(form.remarks);
        if status == DocumentStatus::Rejected && remarks.is_none() {
            return Err(FormError::MissingRemarks);
        }
        Ok(DocumentDecision { status, remarks })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_requires_remarks() {
        let form = DocumentDecisionForm {
            status: "rejected".into(),
            remarks: Some(" ".into()),
        };
        assert!(matches!(
            DocumentDecision::try_from(form),
            Err(FormError::MissingRemarks)
        ));
    }

    #[test]
    fn pending_is_not_a_decision() {
        let form = DocumentDecisionForm {
            status: "pending".into(),
            remarks: None,
        };
        assert!(matches!(
            DocumentDecision::try_from(form),
            Err(FormError::InvalidStatus(_))
        ));
    }
}
