use serde::{Deserialize, Serialize};

/// Application-level constants
pub const APP_NAME: &str = "Vitalia";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default tracing filter when RUST_LOG is unset.
pub fn default_log_filter() -> String {
    format!("{}=info", env!("CARGO_PKG_NAME"))
}

/// Unit temperature readings are collected in. Fixed per deployment —
/// mixed units must never reach one evaluation. The engine itself always
/// works in degrees Celsius; conversion happens at the service boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn as_str(self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "celsius",
            TemperatureUnit::Fahrenheit => "fahrenheit",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "celsius" => Some(TemperatureUnit::Celsius),
            "fahrenheit" => Some(TemperatureUnit::Fahrenheit),
            _ => None,
        }
    }

    /// Display symbol for this unit.
    pub fn symbol(self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
        }
    }

    /// Convert a value collected in this unit to engine-canonical Celsius.
    pub fn to_celsius(self, value: f64) -> f64 {
        match self {
            TemperatureUnit::Celsius => value,
            TemperatureUnit::Fahrenheit => (value - 32.0) * 5.0 / 9.0,
        }
    }

    /// Convert a canonical Celsius value back into this unit for display.
    pub fn from_celsius(self, value: f64) -> f64 {
        match self {
            TemperatureUnit::Celsius => value,
            TemperatureUnit::Fahrenheit => value * 9.0 / 5.0 + 32.0,
        }
    }
}

/// Deployment-fixed settings threaded into the service layer.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DeploymentConfig {
    pub temperature_unit: TemperatureUnit,
}
