//! The module contains the error the engine can throw.
//!
//! Projections never fail: empty windows, empty results and out of range page
//! indexes degrade to empty or clamped output. Errors only come from parsing
//! external input:
//!
//! - [`InvalidPageSize`] a page size outside the offered options.
//! - [`UnknownColumn`] a column key the table does not have.
//! - [`InvalidTimezone`] a timezone that is not an IANA name.
//! - [`InvalidDate`] a date that is not `yyyy-MM-dd`.
//! - [`InvalidAmount`] an amount that is not a decimal number.
//!
//!  [`InvalidPageSize`]: EngineError::InvalidPageSize
//!  [`UnknownColumn`]: EngineError::UnknownColumn
//!  [`InvalidTimezone`]: EngineError::InvalidTimezone
//!  [`InvalidDate`]: EngineError::InvalidDate
//!  [`InvalidAmount`]: EngineError::InvalidAmount
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid page size: {0}")]
    InvalidPageSize(String),
    #[error("\"{0}\" column not found!")]
    UnknownColumn(String),
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InvalidPageSize(a), Self::InvalidPageSize(b)) => a == b,
            (Self::UnknownColumn(a), Self::UnknownColumn(b)) => a == b,
            (Self::InvalidTimezone(a), Self::InvalidTimezone(b)) => a == b,
            (Self::InvalidDate(a), Self::InvalidDate(b)) => a == b,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::Json(a), Self::Json(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
