use thiserror::Error;

/// Input rejected before anything is submitted.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("{field} has an invalid value: {value}")]
    Invalid { field: &'static str, value: String },
    #[error("No record found for {0}")]
    NotFound(String),
}
