use crate::models::VitalChannel;

use super::reference::{DisplayBands, VitalReference};
use super::types::{ChannelStatus, EngineError, VitalsClassification, VitalsInput};

/// Classify one reading against the shared reference table.
///
/// Validation precedes classification: implausible values are rejected,
/// never clamped. A rejected reading has no effect on later evaluations.
pub fn classify(
    input: &VitalsInput,
    reference: &VitalReference,
) -> Result<VitalsClassification, EngineError> {
    validate(input, reference)?;

    let heart_rate = classify_heart_rate(input.heart_rate, &reference.display);
    let temperature = classify_temperature(input.temperature_c, &reference.display);
    let spo2 = classify_spo2(input.spo2, &reference.display);

    let alert_channel = alert_channel(input, spo2, reference);
    let any_critical = [heart_rate, temperature, spo2]
        .iter()
        .any(|&s| s == ChannelStatus::Critical);

    Ok(VitalsClassification {
        heart_rate,
        temperature,
        spo2,
        overall_alert: alert_channel.is_some() || any_critical,
        alert_channel,
    })
}

fn validate(input: &VitalsInput, reference: &VitalReference) -> Result<(), EngineError> {
    if !input.temperature_c.is_finite() {
        return Err(EngineError::NonFiniteValue {
            channel: VitalChannel::Temperature,
        });
    }

    let bounds = &reference.plausible;
    let checks = [
        (
            VitalChannel::HeartRate,
            f64::from(input.heart_rate),
            bounds.heart_rate,
        ),
        (
            VitalChannel::Temperature,
            input.temperature_c,
            bounds.temperature_c,
        ),
        (VitalChannel::Spo2, f64::from(input.spo2), bounds.spo2),
    ];

    for (channel, value, band) in checks {
        if !band.contains(value) {
            return Err(EngineError::ImplausibleValue {
                channel,
                value,
                low: band.low,
                high: band.high,
            });
        }
    }

    Ok(())
}

/// Heart rate has no critical display band: inside is Normal, outside Warning.
fn classify_heart_rate(value: i32, bands: &DisplayBands) -> ChannelStatus {
    if bands.heart_rate.contains(f64::from(value)) {
        ChannelStatus::Normal
    } else {
        ChannelStatus::Warning
    }
}

fn classify_temperature(value_c: f64, bands: &DisplayBands) -> ChannelStatus {
    if bands.temperature_c.contains(value_c) {
        ChannelStatus::Normal
    } else {
        ChannelStatus::Warning
    }
}

fn classify_spo2(value: i32, bands: &DisplayBands) -> ChannelStatus {
    if value >= bands.spo2_normal_min {
        ChannelStatus::Normal
    } else if value >= bands.spo2_warning_min {
        ChannelStatus::Warning
    } else {
        ChannelStatus::Critical
    }
}

/// First channel that trips the alerting tier, in render order. A critical
/// SpO2 display status counts even above the alert-tier cutoff.
fn alert_channel(
    input: &VitalsInput,
    spo2_status: ChannelStatus,
    reference: &VitalReference,
) -> Option<VitalChannel> {
    let alert = &reference.alert;

    if !alert.heart_rate.contains(f64::from(input.heart_rate)) {
        return Some(VitalChannel::HeartRate);
    }
    if input.temperature_c > alert.temperature_max_c {
        return Some(VitalChannel::Temperature);
    }
    if input.spo2 < alert.spo2_min || spo2_status == ChannelStatus::Critical {
        return Some(VitalChannel::Spo2);
    }
    None
}
