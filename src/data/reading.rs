//! Sensor reading model and display formatting.
//!
//! A [`Reading`] is one snapshot of the four monitored metrics. Readings are
//! ephemeral: one is produced per sampler tick and feeds the readout cards,
//! the chart window, and the session history. Nothing is persisted.

use serde::{Deserialize, Serialize};

/// One snapshot of the bioreactor's monitored metrics.
///
/// This is also the wire format used by the stream link: readings arrive as
/// newline-delimited JSON objects with these field names.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Vessel temperature in degrees Celsius.
    pub temperature: f64,
    /// Culture pH.
    pub ph: f64,
    /// Dissolved oxygen saturation in percent.
    pub dissolved_oxygen: f64,
    /// Agitator speed in revolutions per minute.
    pub rpm: u32,
}

impl Reading {
    /// Format the temperature for display, e.g. `"25.0 °C"`.
    pub fn format_temperature(&self) -> String {
        format!("{:.1} °C", self.temperature)
    }

    /// Format the pH for display, e.g. `"7.00 pH"`.
    pub fn format_ph(&self) -> String {
        format!("{:.2} pH", self.ph)
    }

    /// Format the dissolved oxygen for display, e.g. `"95.0 %"`.
    pub fn format_dissolved_oxygen(&self) -> String {
        format!("{:.1} %", self.dissolved_oxygen)
    }

    /// Format the agitator speed for display, e.g. `"600 RPM"`.
    pub fn format_rpm(&self) -> String {
        format!("{} RPM", self.rpm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nominal() -> Reading {
        Reading {
            temperature: 25.0,
            ph: 7.0,
            dissolved_oxygen: 95.0,
            rpm: 600,
        }
    }

    #[test]
    fn test_format_precision_and_units() {
        let r = nominal();
        assert_eq!(r.format_temperature(), "25.0 °C");
        assert_eq!(r.format_ph(), "7.00 pH");
        assert_eq!(r.format_dissolved_oxygen(), "95.0 %");
        assert_eq!(r.format_rpm(), "600 RPM");
    }

    #[test]
    fn test_format_rounds_not_truncates() {
        let r = Reading {
            temperature: 24.96,
            ph: 6.855,
            dissolved_oxygen: 90.05,
            rpm: 450,
        };
        assert_eq!(r.format_temperature(), "25.0 °C");
        assert_eq!(r.format_ph(), "6.86 pH");
        assert_eq!(r.format_dissolved_oxygen(), "90.1 %");
    }

    #[test]
    fn test_wire_format_round_trip() {
        let r = nominal();
        let json = serde_json::to_string(&r).unwrap();
        assert!(json.contains("\"dissolved_oxygen\":95.0"));
        let back: Reading = serde_json::from_str(&json).unwrap();
        assert_eq!(back, r);
    }
}
