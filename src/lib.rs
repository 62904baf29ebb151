// Library crate: public API items may not be used by the binary
#![allow(unused)]

//! # fermwatch
//!
//! A terminal dashboard and library for monitoring bioreactor sensor
//! readings: temperature, pH, dissolved oxygen, and agitator RPM.
//!
//! Readings arrive through a pluggable [`ControllerLink`], are classified
//! against per-metric threshold bands, and feed four readout cards, a
//! rolling temperature chart, and session statistics. An agitator setpoint
//! control forwards speed commands back through the same link.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐ │
//! │  │  app    │───▶│   data   │───▶│   ui    │───▶│ Terminal│ │
//! │  │ (state) │    │(classify)│    │(render) │    │         │ │
//! │  └────┬────┘    └──────────┘    └─────────┘    └─────────┘ │
//! │       │                                                     │
//! │       ▼                                                     │
//! │  ┌─────────┐                                                │
//! │  │  link   │◀── SimulatedLink | ReplayLink | StreamLink    │
//! │  │ (input) │        | ChannelLink                          │
//! │  └─────────┘                                                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: Application state - the connection toggle, sampler clock,
//!   agitator setpoint, and session export
//! - **[`link`]**: Controller link abstraction ([`ControllerLink`] trait)
//!   with a simulator, file replay, async stream, and channel implementations
//! - **[`data`]**: Data models - readings, threshold bands and the
//!   normal/warning/danger classifier, the rolling chart window, and session
//!   history
//! - **[`ui`]**: Terminal rendering using ratatui - metric cards, the
//!   temperature chart, controls, and theme support
//! - **[`settings`]**: Layered configuration (defaults, TOML file,
//!   environment)
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Simulated readings (default)
//! fermwatch
//!
//! # Replay a recorded reading from a file
//! fermwatch --replay reading.json
//!
//! # Connect to a controller bridge over TCP
//! fermwatch --connect vessel:9600
//! ```
//!
//! ### As a library with the simulator
//!
//! ```
//! use std::time::Duration;
//! use fermwatch::{App, SimulatedLink, Thresholds};
//!
//! let link = Box::new(SimulatedLink::new());
//! let mut app = App::new(link, Thresholds::default(), Duration::from_millis(2000));
//! app.connect();
//! ```
//!
//! ### As a library with a channel link (for custom device drivers)
//!
//! ```
//! use std::time::Duration;
//! use fermwatch::{App, ChannelLink, Thresholds};
//!
//! // The driver keeps reading_tx and command_rx
//! let (reading_tx, command_rx, link) = ChannelLink::create("driver: my-device");
//! let app = App::new(Box::new(link), Thresholds::default(), Duration::from_millis(500));
//! ```

pub mod app;
pub mod data;
pub mod events;
pub mod link;
pub mod settings;
pub mod ui;

// Re-export main types for convenience
pub use app::{App, ConnectionState};
pub use data::{
    ChartWindow, ClassifiedReading, MetricBands, MetricStats, Reading, SessionHistory, Status,
    ThresholdBand, Thresholds,
};
pub use link::{ChannelLink, Command, ControllerLink, ReplayLink, SimulatedLink, StreamLink};
pub use settings::Settings;
