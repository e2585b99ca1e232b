use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Validation: {0}")]
    Validation(String),

    #[error("Unrecognized time slot: {0}")]
    InvalidSlot(String),

    #[error("Slot already booked: {classroom} on {date} at {slot}")]
    SlotTaken {
        classroom: String,
        date: String,
        slot: String,
    },

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Not eligible: {0}")]
    NotEligible(String),

    #[error("Already registered: {0}")]
    AlreadyRegistered(String),

    #[error("Already exists: {0}")]
    Conflict(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Operation timed out: {0}")]
    Timeout(&'static str),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl DomainError {
    /// Whether the client may resubmit the same request and expect a
    /// different outcome.
    pub fn is_transient(&self) -> bool {
        matches!(self, DomainError::Timeout(_))
    }

    pub fn not_found(entity: &'static str, field: &'static str, value: impl Into<String>) -> Self {
        DomainError::NotFound {
            entity,
            field,
            value: value.into(),
        }
    }
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        DomainError::Storage(e.to_string())
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
