//! Simulated controller link.
//!
//! Stands in for a real device connection: every poll produces one reading
//! with each metric drawn uniformly from its nominal range. Commands are
//! accepted and discarded.

use anyhow::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{Command, ControllerLink};
use crate::data::Reading;

/// A link that fabricates readings instead of talking to hardware.
///
/// Ranges match a healthy vessel: temperature 22-28 °C, pH 6.8-7.2,
/// dissolved oxygen 90-100 %, agitator 400-800 RPM.
#[derive(Debug)]
pub struct SimulatedLink {
    rng: StdRng,
    description: String,
}

impl SimulatedLink {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_os_rng())
    }

    /// Create a deterministic simulator for tests.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            rng,
            description: "simulator".to_string(),
        }
    }
}

impl Default for SimulatedLink {
    fn default() -> Self {
        Self::new()
    }
}

impl ControllerLink for SimulatedLink {
    fn poll(&mut self) -> Option<Reading> {
        Some(Reading {
            temperature: self.rng.random_range(22.0..=28.0),
            ph: self.rng.random_range(6.8..=7.2),
            dissolved_oxygen: self.rng.random_range(90.0..=100.0),
            rpm: self.rng.random_range(400..=800),
        })
    }

    fn send(&mut self, _command: Command) -> Result<()> {
        // No hardware behind the simulator; commands vanish
        Ok(())
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn last_error(&self) -> Option<String> {
        None
    }
}
