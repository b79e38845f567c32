//! Configuration loading and management for the tariff rate engine.
//!
//! This module loads a tariff directory: the engine-wide constants in
//! `tariff.yaml` and the rate tables that back the in-memory catalog.
//!
//! # Example
//!
//! ```no_run
//! use tariff_engine::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/ghc").unwrap();
//! println!("Minimum weight: {}", loader.tariff().minimum_domestic_weight);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{MonthDay, PeakWindow, TariffConfig};
