//! Session history for per-metric statistics.
//!
//! Keeps a rolling record of recent readings, beyond the chart window, so the
//! header and the export can show min/max/mean per metric.

use std::collections::VecDeque;

use super::Reading;

/// Maximum number of historical readings to keep.
const MAX_HISTORY_SIZE: usize = 240;

/// Summary statistics for one metric over the recorded session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

/// Rolling record of recent readings.
#[derive(Debug, Clone, Default)]
pub struct SessionHistory {
    readings: VecDeque<Reading>,
    /// Total readings seen this session, including evicted ones.
    total_samples: u64,
}

impl SessionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new reading, evicting the oldest when the buffer is full.
    pub fn record(&mut self, reading: &Reading) {
        self.readings.push_back(*reading);
        if self.readings.len() > MAX_HISTORY_SIZE {
            self.readings.pop_front();
        }
        self.total_samples += 1;
    }

    /// Total readings seen this session.
    pub fn total_samples(&self) -> u64 {
        self.total_samples
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    pub fn temperature_stats(&self) -> Option<MetricStats> {
        self.stats(|r| r.temperature)
    }

    pub fn ph_stats(&self) -> Option<MetricStats> {
        self.stats(|r| r.ph)
    }

    pub fn dissolved_oxygen_stats(&self) -> Option<MetricStats> {
        self.stats(|r| r.dissolved_oxygen)
    }

    pub fn rpm_stats(&self) -> Option<MetricStats> {
        self.stats(|r| r.rpm as f64)
    }

    fn stats(&self, metric: impl Fn(&Reading) -> f64) -> Option<MetricStats> {
        if self.readings.is_empty() {
            return None;
        }

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        for reading in &self.readings {
            let v = metric(reading);
            min = min.min(v);
            max = max.max(v);
            sum += v;
        }

        Some(MetricStats {
            min,
            max,
            mean: sum / self.readings.len() as f64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(temperature: f64) -> Reading {
        Reading {
            temperature,
            ph: 7.0,
            dissolved_oxygen: 95.0,
            rpm: 600,
        }
    }

    #[test]
    fn test_empty_history_has_no_stats() {
        let history = SessionHistory::new();
        assert!(history.temperature_stats().is_none());
        assert_eq!(history.total_samples(), 0);
    }

    #[test]
    fn test_stats_track_min_max_mean() {
        let mut history = SessionHistory::new();
        history.record(&reading(22.0));
        history.record(&reading(28.0));
        history.record(&reading(25.0));

        let stats = history.temperature_stats().unwrap();
        assert_eq!(stats.min, 22.0);
        assert_eq!(stats.max, 28.0);
        assert!((stats.mean - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_history_evicts_but_counts_all_samples() {
        let mut history = SessionHistory::new();
        for i in 0..(MAX_HISTORY_SIZE + 10) {
            history.record(&reading(20.0 + i as f64));
        }
        assert_eq!(history.total_samples(), (MAX_HISTORY_SIZE + 10) as u64);

        // The oldest ten readings were evicted, so the min reflects sample 10
        let stats = history.temperature_stats().unwrap();
        assert_eq!(stats.min, 30.0);
    }
}
