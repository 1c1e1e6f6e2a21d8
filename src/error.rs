//! Error taxonomy for graphic construction.
//!
//! Every error is a programmer/input error raised synchronously at
//! construction time. There is nothing to retry.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphicError {
    #[error("Invalid value {value} for {parameter}: {reason}")]
    InvalidParameter {
        parameter: &'static str,
        value: f64,
        reason: String,
    },

    #[error("Invalid operand for {operation}: {parameter} is not a graphic")]
    InvalidOperand {
        operation: String,
        parameter: String,
    },

    #[error("Unknown anchor ({x}, {y}): not one of the nine named points")]
    UnknownAnchor { x: f64, y: f64 },
}

impl GraphicError {
    pub(crate) fn invalid(parameter: &'static str, value: f64, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            parameter,
            value,
            reason: reason.into(),
        }
    }

    pub(crate) fn operand(operation: impl Into<String>, parameter: impl Into<String>) -> Self {
        Self::InvalidOperand {
            operation: operation.into(),
            parameter: parameter.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GraphicError>;
