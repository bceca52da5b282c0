//! Length and temperature unit conversion.
//!
//! Length converts through the metre using per-unit factors; temperature
//! converts through Celsius. [`format_number`] renders results the way the
//! converter widget displays them.
//!
//! # Example
//!
//! ```
//! use converter_download::convert::{Domain, convert, format_number};
//!
//! let feet = convert(1.0, "m", "ft", Domain::Length).unwrap();
//! assert_eq!(format_number(feet), "3.28084");
//!
//! let fahrenheit = convert(100.0, "c", "f", Domain::Temperature).unwrap();
//! assert_eq!(format_number(fahrenheit), "212");
//! ```

mod error;
mod units;

pub use error::ConvertError;
pub use units::{Domain, LengthUnit, TemperatureUnit};

/// Converts `value` from one unit to another within `domain`.
///
/// Unit symbols are case-insensitive (`m`, `km`, `ft`, `c`, `F`, ...).
pub fn convert(value: f64, from: &str, to: &str, domain: Domain) -> Result<f64, ConvertError> {
    if !value.is_finite() {
        return Err(ConvertError::InvalidValue { value });
    }

    match domain {
        Domain::Length => {
            let from: LengthUnit = from.parse()?;
            let to: LengthUnit = to.parse()?;
            Ok(from.convert(value, to))
        }
        Domain::Temperature => {
            let from: TemperatureUnit = from.parse()?;
            let to: TemperatureUnit = to.parse()?;
            Ok(from.convert(value, to))
        }
    }
}

/// Formats a conversion result for display.
///
/// Magnitudes below `0.01` or above `1_000_000` use exponential notation
/// with four fraction digits (`1.2346e+7`). Everything else is rounded to
/// five decimal places with trailing zeros dropped.
#[must_use]
pub fn format_number(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude < 0.01 || magnitude > 1_000_000.0 {
        return format_exponential(value);
    }

    let rounded = (value * 100_000.0).round() / 100_000.0;
    format!("{rounded}")
}

fn format_exponential(value: f64) -> String {
    let formatted = format!("{value:.4e}");
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => formatted,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_convert_length_through_metres() {
        approx(convert(1.0, "km", "m", Domain::Length).unwrap(), 1000.0);
        approx(convert(250.0, "cm", "mm", Domain::Length).unwrap(), 2500.0);
        approx(convert(1.0, "m", "in", Domain::Length).unwrap(), 39.3701);
        approx(convert(3.28084, "ft", "m", Domain::Length).unwrap(), 1.0);
    }

    #[test]
    fn test_convert_temperature_through_celsius() {
        approx(convert(100.0, "c", "f", Domain::Temperature).unwrap(), 212.0);
        approx(convert(32.0, "f", "c", Domain::Temperature).unwrap(), 0.0);
        approx(convert(0.0, "k", "c", Domain::Temperature).unwrap(), -273.15);
        approx(convert(212.0, "F", "K", Domain::Temperature).unwrap(), 373.15);
    }

    #[test]
    fn test_convert_same_unit_is_identity() {
        approx(convert(42.5, "mi", "mi", Domain::Length).unwrap(), 42.5);
        approx(convert(-40.0, "c", "c", Domain::Temperature).unwrap(), -40.0);
    }

    #[test]
    fn test_convert_rejects_unit_from_other_domain() {
        let err = convert(1.0, "c", "m", Domain::Length).unwrap_err();
        assert!(matches!(err, ConvertError::UnknownUnit { .. }), "{err:?}");

        let err = convert(1.0, "m", "f", Domain::Temperature).unwrap_err();
        assert!(err.to_string().contains("temperature"), "{err}");
    }

    #[test]
    fn test_convert_rejects_non_finite_values() {
        assert!(matches!(
            convert(f64::NAN, "m", "km", Domain::Length),
            Err(ConvertError::InvalidValue { .. })
        ));
        assert!(convert(f64::INFINITY, "c", "f", Domain::Temperature).is_err());
    }

    #[test]
    fn test_format_number_rounds_and_trims() {
        assert_eq!(format_number(3.280_839_999), "3.28084");
        assert_eq!(format_number(212.0), "212");
        assert_eq!(format_number(-40.0), "-40");
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(1_000_000.0), "1000000");
    }

    #[test]
    fn test_format_number_uses_exponent_outside_display_range() {
        assert_eq!(format_number(12_345_678.0), "1.2346e+7");
        assert_eq!(format_number(0.001), "1.0000e-3");
        assert_eq!(format_number(0.0), "0.0000e+0");
        assert_eq!(format_number(-0.000_621_371), "-6.2137e-4");
    }
}
