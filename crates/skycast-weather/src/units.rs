//! Temperature rounding and unit conversion.
//!
//! Values are stored in °C and converted only when displayed.

use crate::types::TemperatureUnit;

/// Round to the nearest integer, halves toward positive infinity.
///
/// `2.5 -> 3`, `-2.5 -> -2`, `-2.6 -> -3`.
pub fn round_half_up(value: f64) -> i32 {
    let floor = value.floor();
    let rounded = if value - floor >= 0.5 { floor + 1.0 } else { floor };
    rounded as i32
}

/// `round(celsius * 9/5 + 32)`
pub fn celsius_to_fahrenheit(celsius: f64) -> i32 {
    round_half_up(celsius * 9.0 / 5.0 + 32.0)
}

impl TemperatureUnit {
    /// Convert a °C reading into this unit for display
    pub fn convert(self, celsius: f64) -> i32 {
        match self {
            Self::Celsius => round_half_up(celsius),
            Self::Fahrenheit => celsius_to_fahrenheit(celsius),
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Celsius => "°C",
            Self::Fahrenheit => "°F",
        }
    }

    /// Format a °C reading, e.g. `"72°F"`
    pub fn display(self, celsius: f64) -> String {
        format!("{}{}", self.convert(celsius), self.symbol())
    }
}
