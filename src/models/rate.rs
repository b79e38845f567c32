//! Rate catalog records.
//!
//! These are the values a [`RateCatalog`](crate::catalog::RateCatalog)
//! returns. They are created fresh per lookup and never mutated.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};

use super::{Cents, Millicents};

/// The stored price on a rate row, in the unit that table is quoted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatePrice {
    /// Whole cents (service area, other and task order tables).
    Cents(Cents),
    /// Thousandths of a cent (linehaul table).
    Millicents(Millicents),
    /// Whole cents per unit (accessorial table: per CWT or per cubic foot).
    PerUnitCents(Cents),
}

impl RatePrice {
    /// The price as a decimal number of cents.
    pub fn to_cents_decimal(self) -> Decimal {
        match self {
            RatePrice::Cents(cents) | RatePrice::PerUnitCents(cents) => cents.to_decimal(),
            RatePrice::Millicents(millicents) => millicents.to_cents_decimal(),
        }
    }
}

/// A single rate row returned by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateRecord {
    /// The contract this row belongs to; used to resolve the contract year.
    pub contract_id: Uuid,
    /// The stored price.
    pub price: RatePrice,
}

/// One year of a pricing contract and its escalation factors.
///
/// Exactly one contract year covers any reference date for a contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractYear {
    /// The contract this year belongs to.
    pub contract_id: Uuid,
    /// Human-readable name, e.g. "Base Period Year 1".
    pub name: String,
    /// First day of the year (inclusive).
    pub start_date: NaiveDate,
    /// Last day of the year (inclusive).
    pub end_date: NaiveDate,
    /// Escalation for this year alone.
    pub escalation: Decimal,
    /// Escalation compounded over all prior years; the factor applied to prices.
    pub escalation_compounded: Decimal,
}

impl ContractYear {
    /// Whether `date` falls within `[start_date, end_date]`.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

/// The market a shipment type factor or international accessorial price
/// applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Market {
    /// Continental United States.
    #[serde(rename = "C")]
    Conus,
    /// Outside the continental United States.
    #[serde(rename = "O")]
    Oconus,
}

impl Market {
    /// Parses the `C`/`O` tag used in parameter bags. `field` names the
    /// parameter in the validation error.
    pub fn parse(field: &str, value: &str) -> EngineResult<Self> {
        match value {
            "C" => Ok(Market::Conus),
            "O" => Ok(Market::Oconus),
            "" => Err(EngineError::validation(field, "is required")),
            other => Err(EngineError::validation(
                field,
                format!("unsupported market of {}", other),
            )),
        }
    }
}

impl std::fmt::Display for Market {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Market::Conus => write!(f, "C"),
            Market::Oconus => write!(f, "O"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn year() -> ContractYear {
        ContractYear {
            contract_id: Uuid::nil(),
            name: "Base Period Year 1".to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
            escalation: Decimal::from_str("1.0197").unwrap(),
            escalation_compounded: Decimal::from_str("1.04071").unwrap(),
        }
    }

    #[test]
    fn test_contract_year_covers_inclusive_bounds() {
        let year = year();
        assert!(year.covers(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()));
        assert!(year.covers(NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()));
        assert!(!year.covers(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()));
        assert!(!year.covers(NaiveDate::from_ymd_opt(2023, 12, 31).unwrap()));
    }

    #[test]
    fn test_rate_price_to_cents_decimal() {
        assert_eq!(
            RatePrice::Millicents(Millicents(5000)).to_cents_decimal(),
            Decimal::from(5)
        );
        assert_eq!(
            RatePrice::Cents(Cents(1234)).to_cents_decimal(),
            Decimal::from(1234)
        );
        assert_eq!(
            RatePrice::PerUnitCents(Cents(77)).to_cents_decimal(),
            Decimal::from(77)
        );
    }

    #[test]
    fn test_market_serialization() {
        assert_eq!(serde_json::to_string(&Market::Conus).unwrap(), "\"C\"");
        let market: Market = serde_json::from_str("\"O\"").unwrap();
        assert_eq!(market, Market::Oconus);
    }

    #[test]
    fn test_market_parse() {
        assert_eq!(Market::parse("MarketOrigin", "C").unwrap(), Market::Conus);
        assert_eq!(Market::parse("MarketOrigin", "O").unwrap(), Market::Oconus);
        assert_eq!(
            Market::parse("MarketDest", "").unwrap_err().to_string(),
            "Invalid MarketDest: is required"
        );
        assert_eq!(
            Market::parse("MarketDest", "X").unwrap_err().to_string(),
            "Invalid MarketDest: unsupported market of X"
        );
    }
}
