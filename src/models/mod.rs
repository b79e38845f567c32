//! Core data models for the tariff rate engine.
//!
//! This module contains the value types (money, weight, distance), the rate
//! catalog records and the audit display parameters used throughout the engine.

mod display_param;
mod rate;
mod service_code;
mod unit;

pub use display_param::{
    DisplayParam, DisplayParamKey, PriceResult, format_bool, format_cents, format_decimal,
    format_escalation, format_millicents, format_rate,
};
pub use rate::{ContractYear, Market, RatePrice, RateRecord};
pub use service_code::{ServiceCode, codes};
pub use unit::{Cents, CubicFeet, Miles, Millicents, Pound, checked_product};
