//! Threshold bands and health classification.
//!
//! Each metric carries two inclusive bands: a normal band nested inside a
//! warning band (by convention, not enforced). A value inside the normal band
//! is healthy, a value inside only the warning band needs attention, and
//! anything else is dangerous.

use serde::Deserialize;

use super::Reading;

/// An inclusive numeric range used to classify a value's health status.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ThresholdBand {
    pub min: f64,
    pub max: f64,
}

impl ThresholdBand {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Whether the value falls inside this band, boundaries included.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Health classification of a single metric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Status {
    Normal,
    Warning,
    Danger,
}

impl Status {
    /// Returns a short symbol for display.
    pub fn symbol(&self) -> &'static str {
        match self {
            Status::Normal => "OK",
            Status::Warning => "WARN",
            Status::Danger => "DANGER",
        }
    }
}

/// The normal and warning bands for one metric.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct MetricBands {
    pub normal: ThresholdBand,
    pub warning: ThresholdBand,
}

impl MetricBands {
    pub fn new(normal: ThresholdBand, warning: ThresholdBand) -> Self {
        Self { normal, warning }
    }

    /// Classify a value against these bands.
    ///
    /// The checks run in order: normal band first, then warning band, else
    /// danger. Band nesting is not validated; malformed bands still follow
    /// the literal inclusive-range checks in that order.
    pub fn classify(&self, value: f64) -> Status {
        if self.normal.contains(value) {
            Status::Normal
        } else if self.warning.contains(value) {
            Status::Warning
        } else {
            Status::Danger
        }
    }
}

/// Threshold bands for all four monitored metrics.
///
/// Each field defaults independently so a settings file may override just
/// one metric's bands.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Thresholds {
    #[serde(default = "default_temperature_bands")]
    pub temperature: MetricBands,
    #[serde(default = "default_ph_bands")]
    pub ph: MetricBands,
    #[serde(default = "default_dissolved_oxygen_bands")]
    pub dissolved_oxygen: MetricBands,
    #[serde(default = "default_rpm_bands")]
    pub rpm: MetricBands,
}

fn default_temperature_bands() -> MetricBands {
    MetricBands::new(
        ThresholdBand::new(22.0, 28.0),
        ThresholdBand::new(20.0, 30.0),
    )
}

fn default_ph_bands() -> MetricBands {
    MetricBands::new(ThresholdBand::new(6.8, 7.2), ThresholdBand::new(6.5, 7.5))
}

fn default_dissolved_oxygen_bands() -> MetricBands {
    MetricBands::new(
        ThresholdBand::new(90.0, 100.0),
        ThresholdBand::new(80.0, 100.0),
    )
}

fn default_rpm_bands() -> MetricBands {
    MetricBands::new(
        ThresholdBand::new(400.0, 800.0),
        ThresholdBand::new(300.0, 1000.0),
    )
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            temperature: default_temperature_bands(),
            ph: default_ph_bands(),
            dissolved_oxygen: default_dissolved_oxygen_bands(),
            rpm: default_rpm_bands(),
        }
    }
}

impl Thresholds {
    /// Classify every metric of a reading.
    pub fn classify(&self, reading: &Reading) -> ClassifiedReading {
        let temperature = self.temperature.classify(reading.temperature);
        let ph = self.ph.classify(reading.ph);
        let dissolved_oxygen = self.dissolved_oxygen.classify(reading.dissolved_oxygen);
        let rpm = self.rpm.classify(reading.rpm as f64);

        // Overall health is the worst metric
        let overall = temperature.max(ph).max(dissolved_oxygen).max(rpm);

        ClassifiedReading {
            reading: *reading,
            temperature,
            ph,
            dissolved_oxygen,
            rpm,
            overall,
        }
    }
}

/// A reading together with the classification of each metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifiedReading {
    pub reading: Reading,
    pub temperature: Status,
    pub ph: Status,
    pub dissolved_oxygen: Status,
    pub rpm: Status,
    pub overall: Status,
}
