use thiserror::Error;

use crate::lock::LockError;
use crate::store::StoreError;

/// Error taxonomy for dispensary operations.
///
/// Business-rule violations (`DuplicateId`, `InvalidInput`,
/// `InsufficientStock`) are detected before any mutation and carry the
/// entity and quantities involved. `Storage` wraps commit failures; the
/// store guarantees nothing was applied when one is reported.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DispensaryError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    #[error("duplicate id {id}")]
    DuplicateId { id: String },

    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("insufficient stock of {name} ({medication_id}): required {required}, available {available}")]
    InsufficientStock {
        medication_id: String,
        name: String,
        required: u32,
        available: u32,
    },

    #[error("storage failure: {0}")]
    Storage(#[from] StoreError),
}

impl DispensaryError {
    pub(crate) fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        DispensaryError::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub(crate) fn duplicate_id(id: impl Into<String>) -> Self {
        DispensaryError::DuplicateId { id: id.into() }
    }

    pub(crate) fn invalid_input(reason: impl Into<String>) -> Self {
        DispensaryError::InvalidInput {
            reason: reason.into(),
        }
    }
}

impl From<LockError> for DispensaryError {
    fn from(err: LockError) -> Self {
        DispensaryError::Storage(StoreError::Backend(err.to_string()))
    }
}
