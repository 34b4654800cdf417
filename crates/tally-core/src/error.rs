//! Error types for Tally

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Input rejected before any computation ran (bad dates, non-finite
    /// amounts, parameters outside their documented range)
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Import error: {0}")]
    Import(String),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl Error {
    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }

    /// True for errors caused by caller input rather than I/O or config
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_) | Error::Import(_) | Error::Csv(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Reject NaN and infinities in a numeric series
pub(crate) fn ensure_finite(values: &[f64], what: &str) -> Result<()> {
    if let Some(pos) = values.iter().position(|v| !v.is_finite()) {
        return Err(Error::validation(format!(
            "{} contains a non-finite value at index {}",
            what, pos
        )));
    }
    Ok(())
}

/// Reject a single non-finite parameter
pub(crate) fn ensure_finite_value(value: f64, what: &str) -> Result<()> {
    if !value.is_finite() {
        return Err(Error::validation(format!("{} must be a finite number", what)));
    }
    Ok(())
}
