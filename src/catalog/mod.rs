//! The rate catalog seam.
//!
//! Pricers read tariff data only through the [`RateCatalog`] trait, so the
//! arithmetic has no knowledge of how or where rates are stored. The crate
//! ships [`InMemoryRateCatalog`], a YAML-backed implementation used by the
//! loader and by tests.

mod memory;
mod tables;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::EngineResult;
use crate::models::{ContractYear, Market, Miles, Pound, RateRecord, ServiceCode};

pub use memory::InMemoryRateCatalog;
pub use tables::{
    AccessorialPriceRow, ContractRow, ContractYearRow, IntlAccessorialPriceRow, LinehaulPriceRow,
    OtherPriceRow, ServiceAreaPriceRow, ShipmentTypeFactorRow, TariffTables, TaskOrderFeeRow,
};

/// Key for a domestic linehaul rate.
///
/// The catalog must select the one row whose weight band contains
/// `weight` and whose mileage band contains `distance`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinehaulRateQuery<'a> {
    /// The contract code.
    pub contract_code: &'a str,
    /// The reference date.
    pub reference_date: NaiveDate,
    /// Whether the peak rate applies.
    pub is_peak: bool,
    /// Effective (minimum-substituted) weight.
    pub weight: Pound,
    /// Raw distance.
    pub distance: Miles,
    /// Domestic service area.
    pub service_area: &'a str,
}

/// Read-only point lookups against the tariff tables.
///
/// Every method answers one row or fails: no match is a
/// [`NotFound`](crate::error::EngineError::NotFound) and more than one match
/// is an [`AmbiguousMatch`](crate::error::EngineError::AmbiguousMatch).
/// Implementations own their own pooling and read consistency.
pub trait RateCatalog: Send + Sync {
    /// Domestic linehaul price (millicents per CWT-mile).
    fn linehaul_rate(&self, query: &LinehaulRateQuery<'_>) -> EngineResult<RateRecord>;

    /// Domestic service area price (cents per CWT, or per CWT-mile for shorthaul).
    fn service_area_rate(
        &self,
        contract_code: &str,
        service_code: &ServiceCode,
        service_area: &str,
        is_peak: bool,
    ) -> EngineResult<RateRecord>;

    /// Domestic other price: pack/unpack and SIT pickup/delivery (cents per CWT).
    fn other_rate(
        &self,
        contract_code: &str,
        service_code: &ServiceCode,
        schedule: i64,
        is_peak: bool,
    ) -> EngineResult<RateRecord>;

    /// Domestic accessorial price (cents per CWT or per cubic foot).
    fn accessorial_rate(
        &self,
        contract_code: &str,
        service_code: &ServiceCode,
        schedule: i64,
    ) -> EngineResult<RateRecord>;

    /// International accessorial price for a market (cents per CWT or per
    /// cubic foot).
    fn intl_accessorial_rate(
        &self,
        contract_code: &str,
        service_code: &ServiceCode,
        market: Market,
    ) -> EngineResult<RateRecord>;

    /// Resolves a contract code to its id. International per-unit prices
    /// arrive with the request, so escalation only needs the contract.
    fn contract_by_code(&self, contract_code: &str) -> EngineResult<Uuid>;

    /// Shipment type factor, e.g. the NTS packing factor.
    fn shipment_type_factor(
        &self,
        contract_code: &str,
        service_code: &ServiceCode,
        market: Market,
    ) -> EngineResult<Decimal>;

    /// The single contract year of `contract_id` covering `date`.
    fn contract_year(&self, contract_id: Uuid, date: NaiveDate) -> EngineResult<ContractYear>;

    /// Flat task order fee for the contract year covering `date`.
    fn task_order_fee(
        &self,
        contract_code: &str,
        service_code: &ServiceCode,
        date: NaiveDate,
    ) -> EngineResult<RateRecord>;
}
