//! Terminal rendering.
//!
//! ## Submodules
//!
//! - [`common`]: Header bar, status bar, and the help overlay
//! - [`cards`]: The four metric readout cards
//! - [`chart`]: The rolling temperature chart
//! - [`controls`]: Connection indicator and agitator gauge
//! - [`theme`]: Light/dark color themes

pub mod cards;
pub mod chart;
pub mod common;
pub mod controls;
pub mod theme;

pub use theme::Theme;
