//! Parameter Validation - Checks Before Construction
//!
//! Every builder validates its numeric inputs here, before any outline
//! is built. Failures are reported, never clamped.

use crate::error::{GraphicError, Result};

/// A size, radius or side: finite and strictly positive.
pub fn check_length(parameter: &'static str, value: f64) -> Result<f64> {
    check_finite(parameter, value)?;
    if value <= 0.0 {
        return Err(GraphicError::invalid(parameter, value, "must be a positive number"));
    }
    Ok(value)
}

/// A value inside the closed range `[lower, upper]`.
pub fn check_range(parameter: &'static str, value: f64, lower: f64, upper: f64) -> Result<f64> {
    check_finite(parameter, value)?;
    if value < lower || value > upper {
        return Err(GraphicError::invalid(
            parameter,
            value,
            format!("must be between {} and {}", lower, upper),
        ));
    }
    Ok(value)
}

pub fn check_finite(parameter: &'static str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(GraphicError::invalid(parameter, value, "must be a finite number"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_rejects_zero_and_negative() {
        assert!(check_length("width", 0.0).is_err());
        assert!(check_length("width", -1.0).is_err());
        assert_eq!(check_length("width", 0.5).unwrap(), 0.5);
    }

    #[test]
    fn test_length_rejects_nan() {
        let err = check_length("height", f64::NAN).unwrap_err();
        assert!(err.to_string().contains("height"));
    }

    #[test]
    fn test_range_is_inclusive() {
        assert!(check_range("angle", 0.0, 0.0, 360.0).is_ok());
        assert!(check_range("angle", 360.0, 0.0, 360.0).is_ok());
        assert!(check_range("angle", 360.5, 0.0, 360.0).is_err());
        assert!(check_range("angle", -0.5, 0.0, 360.0).is_err());
    }

    #[test]
    fn test_range_message_names_bounds() {
        let err = check_range("red", 300.0, 0.0, 255.0).unwrap_err();
        assert!(err.to_string().contains("between 0 and 255"));
    }
}
