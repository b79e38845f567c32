//! Tariff Rate Engine for household goods moves
//!
//! This crate prices tariff line items (linehaul, shorthaul, service area
//! charges, storage in transit, packing, shuttling, crating, fuel surcharges
//! and task order fees) in integer cents from contract rate tables, and
//! records the audit parameters that explain each price.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod catalog;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod models;
