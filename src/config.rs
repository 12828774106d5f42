//! Operator-supplied numeric parameters.

use crate::error::InputError;

/// Lateral tolerance used when the operator leaves the field untouched.
pub const DEFAULT_LATERAL_TOLERANCE: f64 = 50.0;

/// Geometry of the two welding stubs laid across a gap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeldingParameters {
    /// Distance from the bar axis to each stub axis.
    pub perpendicular_offset: f64,
    /// Length of each stub.
    pub stub_length: f64,
}

/// Inputs that drive gap adjustment, collinearity and containment checks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GapParameters {
    /// Width of the gap to open at the target point; `0` closes it.
    pub gap: f64,
    /// Lateral offset tolerance for collinearity and box expansion.
    pub lateral_tolerance: f64,
    /// Welding stub geometry, when stubs are requested.
    pub welding: Option<WeldingParameters>,
}

impl Default for GapParameters {
    fn default() -> Self {
        Self {
            gap: 0.0,
            lateral_tolerance: DEFAULT_LATERAL_TOLERANCE,
            welding: None,
        }
    }
}

impl GapParameters {
    /// Parses gap and tolerance from operator text and validates them.
    ///
    /// # Errors
    ///
    /// Returns an error if either value is not a number or out of range.
    pub fn from_text(gap: &str, lateral_tolerance: &str) -> Result<Self, InputError> {
        let params = Self {
            gap: parse_number("gap", gap)?,
            lateral_tolerance: parse_number("lateral tolerance", lateral_tolerance)?,
            welding: None,
        };
        params.validate()?;
        Ok(params)
    }

    /// Requests welding stubs with the given geometry.
    #[must_use]
    pub fn with_welding(mut self, perpendicular_offset: f64, stub_length: f64) -> Self {
        self.welding = Some(WeldingParameters {
            perpendicular_offset,
            stub_length,
        });
        self
    }

    /// Checks every value against its allowed range.
    ///
    /// # Errors
    ///
    /// Returns the first out-of-range value.
    pub fn validate(&self) -> Result<(), InputError> {
        non_negative("gap", self.gap)?;
        non_negative("lateral tolerance", self.lateral_tolerance)?;
        if let Some(welding) = &self.welding {
            welding.validate()?;
        }
        Ok(())
    }
}

impl WeldingParameters {
    /// Both values must be finite and strictly positive.
    ///
    /// # Errors
    ///
    /// Returns the first out-of-range value.
    pub fn validate(&self) -> Result<(), InputError> {
        positive("perpendicular offset", self.perpendicular_offset)?;
        positive("stub length", self.stub_length)
    }
}

fn parse_number(parameter: &'static str, text: &str) -> Result<f64, InputError> {
    text.trim()
        .parse::<f64>()
        .map_err(|_| InputError::NotANumber {
            parameter,
            text: text.to_owned(),
        })
}

fn non_negative(parameter: &'static str, value: f64) -> Result<(), InputError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(InputError::OutOfRange {
            parameter,
            value,
            requirement: "finite and >= 0",
        })
    }
}

fn positive(parameter: &'static str, value: f64) -> Result<(), InputError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(InputError::OutOfRange {
            parameter,
            value,
            requirement: "finite and > 0",
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_operator_text() {
        let params = GapParameters::from_text(" 25 ", "12.5").unwrap();
        assert!((params.gap - 25.0).abs() < f64::EPSILON);
        assert!((params.lateral_tolerance - 12.5).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_non_numeric_text() {
        let err = GapParameters::from_text("abc", "1").unwrap_err();
        assert!(matches!(err, InputError::NotANumber { parameter: "gap", .. }));
    }

    #[test]
    fn rejects_negative_and_non_finite_values() {
        assert!(GapParameters::from_text("-1", "1").is_err());
        assert!(GapParameters::from_text("1", "NaN").is_err());
        assert!(GapParameters::from_text("inf", "1").is_err());
    }

    #[test]
    fn welding_values_must_be_positive() {
        let params = GapParameters::default().with_welding(0.0, 100.0);
        assert!(matches!(
            params.validate(),
            Err(InputError::OutOfRange { parameter: "perpendicular offset", .. })
        ));
        assert!(GapParameters::default().with_welding(20.0, 100.0).validate().is_ok());
    }

    #[test]
    fn default_matches_operator_defaults() {
        let params = GapParameters::default();
        assert!(params.gap.abs() < f64::EPSILON);
        assert!((params.lateral_tolerance - DEFAULT_LATERAL_TOLERANCE).abs() < f64::EPSILON);
        assert!(params.validate().is_ok());
    }
}
