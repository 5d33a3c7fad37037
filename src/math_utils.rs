/// Mathematical utility functions for the cell model
///
/// Checked versions of the few operations the correlations can drive out of
/// their real domain (logarithms, fractional powers, divisions), plus the
/// percentage-deviation helpers used throughout the tests.
use crate::error::{ModelError, Result};

/// Assert that the deviation between two values is less than a threshold
///
/// This macro combines deviation calculation with assertion for cleaner test code.
/// It calculates the percentage deviation between `actual` and `expected`, then
/// asserts that this deviation is less than the specified `max_deviation`.
///
/// # Examples
/// See the test cases below for usage examples.
#[macro_export]
macro_rules! assert_deviation {
    ($actual:expr, $expected:expr, $max_deviation:expr) => {
        {
            let actual_val = $actual;
            let expected_val = $expected;
            let max_dev = $max_deviation;
            let actual_deviation = $crate::math_utils::deviation(actual_val, expected_val);

            if actual_deviation >= max_dev {
                panic!(
                    "assertion failed: deviation {:.2}% >= {:.2}%\n  actual: {:?},\n  expected: {:?}",
                    actual_deviation, max_dev, actual_val, expected_val
                );
            }
        }
    };
    ($actual:expr, $expected:expr, $max_deviation:expr, $($arg:tt)+) => {
        {
            let actual_val = $actual;
            let expected_val = $expected;
            let max_dev = $max_deviation;
            let actual_deviation = $crate::math_utils::deviation(actual_val, expected_val);

            if actual_deviation >= max_dev {
                panic!(
                    "assertion failed: deviation {:.2}% >= {:.2}%: {}\n  actual: {:?},\n  expected: {:?}",
                    actual_deviation, max_dev, format_args!($($arg)+), actual_val, expected_val
                );
            }
        }
    };
}

/// Arithmetic mean of two values
///
/// # Examples
/// ```
/// use hh_cell_model::math_utils::mean;
///
/// assert_eq!(mean(1850.0, 1750.0), 1800.0);
/// ```
pub fn mean(a: f64, b: f64) -> f64 {
    (a + b) / 2.0
}

/// Calculate the percentage deviation between two values
///
/// Returns the percentage difference of `actual` from `expected`.
/// Uses the expected value as the reference (base) for the percentage calculation.
///
/// # Examples
/// ```
/// use hh_cell_model::math_utils::deviation;
///
/// // 105 is 5% higher than 100
/// assert_eq!(deviation(105.0, 100.0), 5.0);
///
/// // 95 is 5% lower than 100
/// assert_eq!(deviation(95.0, 100.0), 5.0);
/// ```
pub fn deviation(actual: f64, expected: f64) -> f64 {
    if expected.abs() < f64::EPSILON {
        if actual.abs() < f64::EPSILON {
            0.0
        } else {
            f64::INFINITY
        }
    } else {
        ((actual - expected).abs() / expected.abs()) * 100.0
    }
}

/// Natural logarithm that refuses non-positive arguments.
pub fn checked_ln(quantity: &'static str, x: f64) -> Result<f64> {
    if x > 0.0 && x.is_finite() {
        Ok(x.ln())
    } else {
        Err(ModelError::domain(
            quantity,
            format!("logarithm of non-positive argument {x}"),
        ))
    }
}

/// `base^exponent` over the reals.
///
/// A negative base only has a real power for integer exponents; a zero base
/// with a negative exponent diverges. Both are reported as domain errors.
pub fn checked_powf(quantity: &'static str, base: f64, exponent: f64) -> Result<f64> {
    if base < 0.0 && exponent.fract() != 0.0 {
        return Err(ModelError::domain(
            quantity,
            format!("negative base {base} raised to non-integer power {exponent}"),
        ));
    }
    if base == 0.0 && exponent < 0.0 {
        return Err(ModelError::domain(
            quantity,
            format!("zero raised to negative power {exponent}"),
        ));
    }
    Ok(base.powf(exponent))
}

/// Square root that refuses negative arguments.
pub fn checked_sqrt(quantity: &'static str, x: f64) -> Result<f64> {
    if x >= 0.0 {
        Ok(x.sqrt())
    } else {
        Err(ModelError::domain(
            quantity,
            format!("square root of negative argument {x}"),
        ))
    }
}

/// Division that reports a zero denominator.
pub fn checked_div(quantity: &'static str, numerator: f64, denominator: f64) -> Result<f64> {
    if denominator == 0.0 {
        Err(ModelError::divide_by_zero(
            quantity,
            format!("denominator is zero (numerator {numerator})"),
        ))
    } else {
        Ok(numerator / denominator)
    }
}
