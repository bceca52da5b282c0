//! Error types for unit conversion.

use thiserror::Error;

/// Errors that can occur while converting a value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConvertError {
    /// The unit symbol is not known in the requested domain.
    #[error("unknown {domain} unit: {unit}")]
    UnknownUnit {
        /// Domain label (`length` or `temperature`).
        domain: &'static str,
        /// The symbol that failed to parse.
        unit: String,
    },

    /// The domain name is not `length` or `temperature`.
    #[error("unknown conversion domain: {domain}")]
    UnknownDomain {
        /// The rejected name.
        domain: String,
    },

    /// The input value is NaN or infinite.
    #[error("invalid value: {value}")]
    InvalidValue {
        /// The rejected value.
        value: f64,
    },
}

impl ConvertError {
    /// Creates an unknown-unit error.
    pub fn unknown_unit(domain: &'static str, unit: impl Into<String>) -> Self {
        Self::UnknownUnit {
            domain,
            unit: unit.into(),
        }
    }
}
