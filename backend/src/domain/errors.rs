//! Error taxonomy shared by the rotation core and the services around it.
use chrono::NaiveDate;

use super::models::MemberValidationError;

#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    /// The reference date precedes the rotation anchor
    #[error("Reference date {reference} precedes the rotation anchor {anchor}")]
    InvalidRange {
        anchor: NaiveDate,
        reference: NaiveDate,
    },

    #[error("Member store unavailable: {0:#}")]
    StoreUnavailable(#[source] anyhow::Error),

    #[error(transparent)]
    Validation(#[from] MemberValidationError),
}

impl QueueError {
    /// Classify a failure coming back from the member store
    pub fn from_store(error: anyhow::Error) -> Self {
        match error.downcast::<MemberValidationError>() {
            Ok(validation) => QueueError::Validation(validation),
            Err(other) => QueueError::StoreUnavailable(other),
        }
    }

    /// Machine-readable kind used in API error bodies
    pub fn kind(&self) -> &'static str {
        match self {
            QueueError::InvalidRange { .. } => "invalid_range",
            QueueError::StoreUnavailable(_) => "store_unavailable",
            QueueError::Validation(_) => "validation_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_store_keeps_validation_errors() {
        let error = anyhow::Error::new(MemberValidationError::EmptyName);
        let classified = QueueError::from_store(error);
        assert!(matches!(classified, QueueError::Validation(MemberValidationError::EmptyName)));
        assert_eq!(classified.kind(), "validation_error");
    }

    #[test]
    fn test_from_store_wraps_io_failures() {
        let error = anyhow::anyhow!("disk on fire");
        let classified = QueueError::from_store(error);
        assert!(matches!(classified, QueueError::StoreUnavailable(_)));
        assert!(classified.to_string().contains("disk on fire"));
    }
}
