//! Temperature unit conversion.
//!
//! The gateway stores and reports temperatures in Celsius while the alert
//! policy and the dashboard display work in Fahrenheit, so values cross this
//! boundary constantly. Rounding is half-away-from-zero on the scaled value,
//! matching what the gateway applies to stored settings.
//!
//! Both conversions fail closed: a non-finite input yields `None` instead of
//! propagating NaN into alert comparisons.

/// Decimal digits for display conversions (Celsius to Fahrenheit).
pub const DISPLAY_PRECISION: u32 = 1;

/// Decimal digits for settings conversions (Fahrenheit to Celsius).
///
/// Settings precision matters more than display precision: the converted
/// value round-trips into the gateway's stored configuration.
pub const SETTINGS_PRECISION: u32 = 2;

/// Convert Celsius to Fahrenheit, rounded to `precision` decimal digits.
#[must_use]
pub fn celsius_to_fahrenheit(celsius: f64, precision: u32) -> Option<f64> {
    if !celsius.is_finite() {
        return None;
    }
    Some(round_to(celsius * 9.0 / 5.0 + 32.0, precision))
}

/// Convert Fahrenheit to Celsius, rounded to `precision` decimal digits.
#[must_use]
pub fn fahrenheit_to_celsius(fahrenheit: f64, precision: u32) -> Option<f64> {
    if !fahrenheit.is_finite() {
        return None;
    }
    Some(round_to((fahrenheit - 32.0) * 5.0 / 9.0, precision))
}

/// Round half-away-from-zero on the value scaled by `10^precision`.
fn round_to(value: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_celsius_to_fahrenheit_anchors() {
        assert_eq!(celsius_to_fahrenheit(0.0, 1), Some(32.0));
        assert_eq!(celsius_to_fahrenheit(100.0, 1), Some(212.0));
        assert_eq!(celsius_to_fahrenheit(-40.0, 1), Some(-40.0));
    }

    #[test]
    fn test_fahrenheit_to_celsius_anchors() {
        assert_eq!(fahrenheit_to_celsius(32.0, 2), Some(0.0));
        assert_eq!(fahrenheit_to_celsius(212.0, 2), Some(100.0));
        assert_eq!(fahrenheit_to_celsius(90.0, 2), Some(32.22));
        assert_eq!(fahrenheit_to_celsius(34.0, 2), Some(1.11));
    }

    #[test]
    fn test_rounding_half_away_from_zero() {
        assert_eq!(round_to(0.5, 0), 1.0);
        assert_eq!(round_to(-0.5, 0), -1.0);
        assert_eq!(round_to(2.5, 0), 3.0);
        assert_eq!(round_to(-2.5, 0), -3.0);
    }

    #[test]
    fn test_negative_display_conversion() {
        assert_eq!(celsius_to_fahrenheit(-18.0, 1), Some(-0.4));
    }

    #[test]
    fn test_non_finite_inputs_fail_closed() {
        assert_eq!(celsius_to_fahrenheit(f64::NAN, 1), None);
        assert_eq!(celsius_to_fahrenheit(f64::INFINITY, 1), None);
        assert_eq!(fahrenheit_to_celsius(f64::NAN, 2), None);
        assert_eq!(fahrenheit_to_celsius(f64::NEG_INFINITY, 2), None);
    }

    proptest! {
        // Round trip at settings precision stays within 0.01 of the input
        // for the whole physical sensor range.
        #[test]
        fn prop_round_trip_within_tolerance(c in -90.0f64..150.0) {
            let f = celsius_to_fahrenheit(c, 2).unwrap();
            let back = fahrenheit_to_celsius(f, 2).unwrap();
            prop_assert!((back - c).abs() <= 0.01, "c={c} back={back}");
        }
    }
}
