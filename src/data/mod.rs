//! Data models for readings, classification, and charting.
//!
//! ## Submodules
//!
//! - [`reading`]: The [`Reading`] snapshot type and its display formatting
//! - [`bands`]: Threshold bands and the normal/warning/danger classifier
//! - [`chart`]: The fixed-capacity rolling [`ChartWindow`] behind the chart
//! - [`history`]: Rolling session statistics per metric
//!
//! ## Data flow
//!
//! ```text
//! Reading (from a ControllerLink)
//!        │
//!        ▼
//! Thresholds::classify()
//!        │
//!        ├──▶ ClassifiedReading (status per metric, drives card colors)
//!        │
//!        ├──▶ ChartWindow::push_now() (temperature trend)
//!        │
//!        └──▶ SessionHistory::record() (min/max/mean stats)
//! ```

pub mod bands;
pub mod chart;
pub mod history;
pub mod reading;

pub use bands::{ClassifiedReading, MetricBands, Status, ThresholdBand, Thresholds};
pub use chart::ChartWindow;
pub use history::{MetricStats, SessionHistory};
pub use reading::Reading;
