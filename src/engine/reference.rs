use serde::{Deserialize, Serialize};

use crate::config::TemperatureUnit;
use crate::models::VitalChannel;

/// Inclusive value band.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Band {
    pub low: f64,
    pub high: f64,
}

impl Band {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.low && value <= self.high
    }
}

/// Display-tier bands: drive per-channel UI status badges.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayBands {
    /// Heart rate band in bpm. Outside is Warning; heart rate has no
    /// Critical band in this tier.
    pub heart_rate: Band,
    /// Temperature band in °C (36.1–37.5, the familiar 97.0–99.5 °F range).
    pub temperature_c: Band,
    /// SpO2 at or above this is Normal.
    pub spo2_normal_min: i32,
    /// SpO2 at or above this but below normal is Warning; below is Critical.
    pub spo2_warning_min: i32,
}

/// Alerting-tier bands: wider per channel than the display tier, they decide
/// whether a reading persists with its alert flag raised.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertBands {
    /// Heart rate outside this band raises the alert.
    pub heart_rate: Band,
    /// Temperature strictly above this raises the alert (°C).
    pub temperature_max_c: f64,
    /// SpO2 strictly below this raises the alert.
    pub spo2_min: i32,
}

/// Physiological plausibility bounds. Validation only — a value outside
/// these is rejected, never classified and never clamped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlausibleBounds {
    pub heart_rate: Band,
    pub temperature_c: Band,
    pub spo2: Band,
}

/// The single authoritative vital-sign threshold table. Injected into every
/// classification call; screens must not re-declare their own cutoffs.
///
/// The display tier and the alerting tier are deliberately distinct:
/// collapsing them changes how often readings persist with an alert flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VitalReference {
    pub display: DisplayBands,
    pub alert: AlertBands,
    pub plausible: PlausibleBounds,
}

impl Default for VitalReference {
    fn default() -> Self {
        Self {
            display: DisplayBands {
                heart_rate: Band {
                    low: 60.0,
                    high: 100.0,
                },
                temperature_c: Band {
                    low: 36.1,
                    high: 37.5,
                },
                spo2_normal_min: 98,
                spo2_warning_min: 95,
            },
            alert: AlertBands {
                heart_rate: Band {
                    low: 60.0,
                    high: 120.0,
                },
                temperature_max_c: 38.0,
                spo2_min: 92,
            },
            plausible: PlausibleBounds {
                heart_rate: Band {
                    low: 1.0,
                    high: 300.0,
                },
                temperature_c: Band {
                    low: 25.0,
                    high: 45.0,
                },
                spo2: Band {
                    low: 0.0,
                    high: 100.0,
                },
            },
        }
    }
}

impl VitalReference {
    /// UI copy for a channel's acceptable range, in the deployment unit.
    pub fn range_label(&self, channel: VitalChannel, unit: TemperatureUnit) -> String {
        match channel {
            VitalChannel::HeartRate => format!(
                "{:.0}-{:.0} bpm",
                self.display.heart_rate.low, self.display.heart_rate.high
            ),
            VitalChannel::Temperature => format!(
                "{:.1}-{:.1} {}",
                unit.from_celsius(self.display.temperature_c.low),
                unit.from_celsius(self.display.temperature_c.high),
                unit.symbol()
            ),
            VitalChannel::Spo2 => format!("{}-100%", self.display.spo2_warning_min),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_contains_is_inclusive() {
        let band = Band {
            low: 60.0,
            high: 100.0,
        };
        assert!(band.contains(60.0));
        assert!(band.contains(100.0));
        assert!(!band.contains(59.9));
        assert!(!band.contains(100.1));
    }

    #[test]
    fn alert_tier_is_wider_than_display_tier() {
        let reference = VitalReference::default();
        assert!(reference.alert.heart_rate.low <= reference.display.heart_rate.low);
        assert!(reference.alert.heart_rate.high >= reference.display.heart_rate.high);
        assert!(reference.alert.temperature_max_c >= reference.display.temperature_c.high);
        assert!(reference.alert.spo2_min <= reference.display.spo2_warning_min);
    }

    #[test]
    fn display_bands_are_plausible() {
        let reference = VitalReference::default();
        assert!(reference
            .plausible
            .heart_rate
            .contains(reference.display.heart_rate.low));
        assert!(reference
            .plausible
            .temperature_c
            .contains(reference.display.temperature_c.high));
    }

    #[test]
    fn range_labels_follow_deployment_unit() {
        let reference = VitalReference::default();
        assert_eq!(
            reference.range_label(VitalChannel::HeartRate, TemperatureUnit::Celsius),
            "60-100 bpm"
        );
        assert_eq!(
            reference.range_label(VitalChannel::Temperature, TemperatureUnit::Celsius),
            "36.1-37.5 °C"
        );
        assert_eq!(
            reference.range_label(VitalChannel::Temperature, TemperatureUnit::Fahrenheit),
            "97.0-99.5 °F"
        );
        assert_eq!(
            reference.range_label(VitalChannel::Spo2, TemperatureUnit::Celsius),
            "95-100%"
        );
    }
}
