//! Utilities for converting between Celsius and Kelvin.

use crate::constants::TO_KELVIN;

/// Converts Celsius to Kelvin.
pub fn celsius_to_kelvin(temp_c: f64) -> f64 {
    temp_c + TO_KELVIN
}

/// Converts Kelvin to Celsius.
pub fn kelvin_to_celsius(temp_k: f64) -> f64 {
    temp_k - TO_KELVIN
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_celsius_kelvin_conversion() {
        let test_cases = vec![
            (0.0, 273.15),     // Freezing point of water
            (964.0, 1237.15),  // Reference bath temperature
            (1050.0, 1323.15), // Reference for the concentration limit correlation
            (1100.0, 1373.15), // Anode baking temperature
        ];

        for (celsius, expected_kelvin) in test_cases {
            let kelvin = celsius_to_kelvin(celsius);
            let back_to_celsius = kelvin_to_celsius(kelvin);

            assert_abs_diff_eq!(kelvin, expected_kelvin, epsilon = 0.01);
            assert_abs_diff_eq!(back_to_celsius, celsius, epsilon = 0.01);
        }
    }
}
