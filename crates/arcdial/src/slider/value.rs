use super::MAX_DECIMAL_PRECISION;
use crate::config::{ColorToken, RingName};
use std::fmt;

/// One ring's value as reported to listeners.
///
/// `value` is already formatted to the configured precision; equality is
/// therefore on what the user sees, not on the raw angle.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SliderValue {
    pub name: RingName,
    pub color: ColorToken,
    pub value: String,
}

impl SliderValue {
    pub fn new(name: RingName, color: ColorToken, value: f64, precision: usize) -> Self {
        Self {
            name,
            color,
            value: format_value(value, precision),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.value.parse().ok()
    }
}

impl fmt::Display for SliderValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

/// Fixed-point formatting with ties rounded away from zero (`0.5` shows as
/// `1`, `2.5` as `3`). Never yields a negative zero.
pub fn format_value(value: f64, precision: usize) -> String {
    let precision = precision.min(MAX_DECIMAL_PRECISION);
    let scale = 10f64.powi(precision as i32);
    let scaled = (value * scale).round();
    let rounded = if scaled.is_finite() { scaled / scale } else { value };

    let formatted = format!("{rounded:.precision$}");
    match formatted.strip_prefix('-') {
        Some(unsigned) if unsigned.chars().all(|c| c == '0' || c == '.') => unsigned.to_string(),
        _ => formatted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_value_precision() {
        assert_eq!(format_value(1234.5678, 0), "1235");
        assert_eq!(format_value(1234.5678, 2), "1234.57");
        assert_eq!(format_value(-12.26, 1), "-12.3");
    }

    #[test]
    fn test_format_value_ties_round_away_from_zero() {
        let halves: Vec<_> = [0.5, 1.5, 2.5, 3.5].iter().map(|&v| format_value(v, 0)).collect();
        assert_eq!(halves, vec!["1", "2", "3", "4"]);
        assert_eq!(format_value(-2.5, 0), "-3");
        assert_eq!(format_value(0.25, 1), "0.3");
    }

    #[test]
    fn test_format_value_clamps_precision() {
        assert_eq!(format_value(1.0, 70_000), format_value(1.0, MAX_DECIMAL_PRECISION));
        assert_eq!(format_value(1e300, 17).len(), 301 + 18);
    }

    #[test]
    fn test_format_value_drops_negative_zero() {
        assert_eq!(format_value(-1e-13, 0), "0");
        assert_eq!(format_value(-0.0004, 2), "0.00");
        assert_eq!(format_value(-0.4, 0), "0");
        assert_eq!(format_value(-0.6, 0), "-1");
    }

    #[test]
    fn test_equality_is_on_formatted_value() {
        let a = SliderValue::new(RingName::new("a"), ColorToken::new("red"), 10.0001, 2);
        let b = SliderValue::new(RingName::new("a"), ColorToken::new("red"), 9.9999, 2);
        assert_eq!(a, b);
        assert_eq!(a.as_f64(), Some(10.0));
        assert_eq!(a.to_string(), "a=10.00");
    }
}
