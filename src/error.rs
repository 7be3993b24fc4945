//! Error handling for cryptotax
//!
//! Defines custom error types and establishes a unified Result type
//! using anyhow for context chaining and error propagation.

use thiserror::Error;

/// Core error types for tax computation and import operations
#[derive(Error, Debug)]
pub enum TaxError {
    #[error("parse error: {0}")]
    ParseError(String),

    #[error("validation error: {0}")]
    ValidationError(String),

    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("io error")]
    Io(#[from] std::io::Error),
}

/// Result type alias for tax operations
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_formatting_is_readable() {
        let err = TaxError::ParseError("bad timestamp".to_string());
        assert_eq!(err.to_string(), "parse error: bad timestamp");
    }

    #[test]
    fn test_anyhow_context_chains_errors() {
        use anyhow::Context;
        let result: Result<()> =
            Err(anyhow::anyhow!("original error")).context("failed to import transactions");
        match result {
            Err(e) => {
                let msg = e.to_string();
                assert!(msg.contains("failed to import transactions"));
                let debug_msg = format!("{:?}", e);
                assert!(debug_msg.contains("original error") || msg.contains("original error"));
            }
            Ok(_) => panic!("expected error"),
        }
    }

    #[test]
    fn test_tax_error_variants() {
        let validation_err = TaxError::ValidationError("test".to_string());
        assert!(validation_err.to_string().starts_with("validation error"));

        let format_err = TaxError::UnsupportedFormat("xlsx".to_string());
        assert!(format_err.to_string().starts_with("unsupported file format"));
    }
}
