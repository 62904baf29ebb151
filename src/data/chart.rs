//! Rolling window of temperature points for the chart.

use std::collections::VecDeque;

use chrono::{DateTime, Local};

/// Default number of points the chart keeps.
pub const DEFAULT_CHART_CAPACITY: usize = 20;

/// A fixed-capacity rolling buffer of recent (time label, temperature) points.
///
/// Pushing beyond capacity evicts the oldest point, so the window never holds
/// more than `capacity` entries.
#[derive(Debug, Clone)]
pub struct ChartWindow {
    points: VecDeque<(String, f64)>,
    capacity: usize,
}

impl Default for ChartWindow {
    fn default() -> Self {
        Self::new(DEFAULT_CHART_CAPACITY)
    }
}

impl ChartWindow {
    /// Create an empty window with the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a temperature point labelled with the current wall-clock time.
    pub fn push_now(&mut self, temperature: f64) {
        self.push(time_label(Local::now()), temperature);
    }

    /// Append a labelled temperature point, evicting the oldest when full.
    pub fn push(&mut self, label: String, temperature: f64) {
        if self.points.len() == self.capacity {
            self.points.pop_front();
        }
        self.points.push_back((label, temperature));
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Time labels in window order, oldest first.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.points.iter().map(|(label, _)| label.as_str())
    }

    /// Chart coordinates (index, temperature), oldest first.
    pub fn coords(&self) -> Vec<(f64, f64)> {
        self.points.iter().enumerate().map(|(i, (_, t))| (i as f64, *t)).collect()
    }

    pub fn oldest(&self) -> Option<&(String, f64)> {
        self.points.front()
    }

    pub fn latest(&self) -> Option<&(String, f64)> {
        self.points.back()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}

/// Format a wall-clock timestamp as an axis label, e.g. "14:03:27".
pub fn time_label(time: DateTime<Local>) -> String {
    time.format("%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_never_exceeds_capacity() {
        let mut window = ChartWindow::new(20);
        for i in 0..100 {
            window.push(format!("t{}", i), i as f64);
            assert!(window.len() <= 20);
        }
        assert_eq!(window.len(), 20);
    }

    #[test]
    fn test_twenty_first_push_evicts_oldest() {
        let mut window = ChartWindow::new(20);
        for i in 0..20 {
            window.push(format!("t{}", i), i as f64);
        }
        assert_eq!(window.oldest().unwrap().0, "t0");

        window.push("t20".to_string(), 20.0);
        assert_eq!(window.len(), 20);
        assert_eq!(window.oldest().unwrap().0, "t1");
        assert_eq!(window.latest().unwrap().0, "t20");
    }

    #[test]
    fn test_coords_are_indexed_in_order() {
        let mut window = ChartWindow::new(3);
        window.push("a".to_string(), 22.5);
        window.push("b".to_string(), 24.0);
        let coords = window.coords();
        assert_eq!(coords, vec![(0.0, 22.5), (1.0, 24.0)]);
    }

    #[test]
    fn test_clear_empties_window() {
        let mut window = ChartWindow::default();
        window.push_now(25.0);
        assert!(!window.is_empty());
        window.clear();
        assert!(window.is_empty());
    }
}
