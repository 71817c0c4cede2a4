//! Error types shared by every calculator

use crate::calculator::CalculatorKind;
use thiserror::Error;

/// Result alias used throughout the engine
pub type CalcResult<T> = Result<T, CalcError>;

/// Why a calculation was rejected
#[derive(Debug, Error)]
pub enum CalcError {
    /// A field is outside the domain where its formula is defined
    #[error("invalid input `{field}`: {reason}")]
    InvalidInput {
        field: &'static str,
        reason: String,
    },

    /// A formula produced NaN or infinity
    #[error("{calculator} produced a degenerate `{output}` ({value})")]
    DegenerateResult {
        calculator: CalculatorKind,
        output: &'static str,
        value: f64,
    },

    /// Request body could not be decoded into a known calculator input
    #[error("malformed request: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("unknown calculator: {0}")]
    UnknownCalculator(String),
}

impl CalcError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// Field name for input errors, if any
    pub fn field(&self) -> Option<&'static str> {
        match self {
            CalcError::InvalidInput { field, .. } => Some(field),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_message_names_field() {
        let err = CalcError::invalid("heightCm", "must be greater than zero");
        assert_eq!(
            err.to_string(),
            "invalid input `heightCm`: must be greater than zero"
        );
        assert_eq!(err.field(), Some("heightCm"));
    }

    #[test]
    fn test_degenerate_message_names_calculator() {
        let err = CalcError::DegenerateResult {
            calculator: CalculatorKind::Emi,
            output: "monthlyEmi",
            value: f64::INFINITY,
        };
        assert_eq!(err.to_string(), "emi produced a degenerate `monthlyEmi` (inf)");
        assert!(err.field().is_none());
    }
}
