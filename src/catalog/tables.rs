//! Tariff table rows as stored in `tables/*.yaml`.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Cents, Market, Miles, Millicents, Pound, ServiceCode};

/// A pricing contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractRow {
    /// Contract id.
    pub id: Uuid,
    /// Short code callers price against, e.g. "TRUSS_TEST".
    pub code: String,
    /// Display name.
    pub name: String,
}

/// One contract year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractYearRow {
    /// Owning contract code.
    pub contract_code: String,
    /// Year name.
    pub name: String,
    /// First day (inclusive).
    pub start_date: NaiveDate,
    /// Last day (inclusive).
    pub end_date: NaiveDate,
    /// Escalation for this year.
    pub escalation: Decimal,
    /// Compounded escalation applied to prices.
    pub escalation_compounded: Decimal,
}

/// A banded domestic linehaul price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinehaulPriceRow {
    /// Owning contract code.
    pub contract_code: String,
    /// Domestic service area.
    pub service_area: String,
    /// Peak or non-peak rate.
    pub is_peak: bool,
    /// Weight band lower bound (inclusive).
    pub weight_lower: Pound,
    /// Weight band upper bound (inclusive).
    pub weight_upper: Pound,
    /// Mileage band lower bound (inclusive).
    pub miles_lower: Miles,
    /// Mileage band upper bound (inclusive).
    pub miles_upper: Miles,
    /// Price per CWT-mile.
    pub price_millicents: Millicents,
}

/// A domestic service area price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceAreaPriceRow {
    /// Owning contract code.
    pub contract_code: String,
    /// Service code.
    pub service_code: ServiceCode,
    /// Domestic service area.
    pub service_area: String,
    /// Peak or non-peak rate.
    pub is_peak: bool,
    /// Price per CWT.
    pub price_cents: Cents,
}

/// A domestic "other" price keyed by schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtherPriceRow {
    /// Owning contract code.
    pub contract_code: String,
    /// Service code.
    pub service_code: ServiceCode,
    /// Services or SIT schedule.
    pub schedule: i64,
    /// Peak or non-peak rate.
    pub is_peak: bool,
    /// Price per CWT.
    pub price_cents: Cents,
}

/// A domestic accessorial price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessorialPriceRow {
    /// Owning contract code.
    pub contract_code: String,
    /// Service code.
    pub service_code: ServiceCode,
    /// Services schedule.
    pub schedule: i64,
    /// Price per unit.
    pub per_unit_cents: Cents,
}

/// An international accessorial price keyed by market.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntlAccessorialPriceRow {
    /// Owning contract code.
    pub contract_code: String,
    /// Service code.
    pub service_code: ServiceCode,
    /// CONUS or OCONUS.
    pub market: Market,
    /// Price per unit.
    pub per_unit_cents: Cents,
}

/// A shipment type price factor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentTypeFactorRow {
    /// Owning contract code.
    pub contract_code: String,
    /// Service code.
    pub service_code: ServiceCode,
    /// Market.
    pub market: Market,
    /// Multiplicative factor.
    pub factor: Decimal,
}

/// A flat task order fee for one contract year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskOrderFeeRow {
    /// Owning contract code.
    pub contract_code: String,
    /// Service code.
    pub service_code: ServiceCode,
    /// Name of the contract year the fee belongs to.
    pub contract_year: String,
    /// Final price.
    pub price_cents: Cents,
}

/// The full set of tariff tables. Every section is optional so tables can be
/// split over several files and merged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TariffTables {
    /// Contracts.
    pub contracts: Vec<ContractRow>,
    /// Contract years.
    pub contract_years: Vec<ContractYearRow>,
    /// Linehaul prices.
    pub linehaul_prices: Vec<LinehaulPriceRow>,
    /// Service area prices.
    pub service_area_prices: Vec<ServiceAreaPriceRow>,
    /// Other prices.
    pub other_prices: Vec<OtherPriceRow>,
    /// Accessorial prices.
    pub accessorial_prices: Vec<AccessorialPriceRow>,
    /// International accessorial prices.
    pub intl_accessorial_prices: Vec<IntlAccessorialPriceRow>,
    /// Shipment type factors.
    pub shipment_type_factors: Vec<ShipmentTypeFactorRow>,
    /// Task order fees.
    pub task_order_fees: Vec<TaskOrderFeeRow>,
}

impl TariffTables {
    /// Appends every row of `other`.
    pub fn merge(&mut self, other: TariffTables) {
        self.contracts.extend(other.contracts);
        self.contract_years.extend(other.contract_years);
        self.linehaul_prices.extend(other.linehaul_prices);
        self.service_area_prices.extend(other.service_area_prices);
        self.other_prices.extend(other.other_prices);
        self.accessorial_prices.extend(other.accessorial_prices);
        self.intl_accessorial_prices
            .extend(other.intl_accessorial_prices);
        self.shipment_type_factors.extend(other.shipment_type_factors);
        self.task_order_fees.extend(other.task_order_fees);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_parse_from_yaml() {
        let yaml = r#"
contracts:
  - id: 5a3b5f7e-98a4-4b43-8b0f-2f8d8f1a9c01
    code: TEST
    name: Test Contract
contract_years:
  - contract_code: TEST
    name: Base Period Year 1
    start_date: 2024-01-01
    end_date: 2024-12-31
    escalation: "1.0197"
    escalation_compounded: "1.04071"
other_prices:
  - contract_code: TEST
    service_code: DPK
    schedule: 2
    is_peak: true
    price_cents: 7395
intl_accessorial_prices:
  - contract_code: TEST
    service_code: IOSHUT
    market: O
    per_unit_cents: 1234
"#;
        let tables: TariffTables = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(tables.contracts.len(), 1);
        assert_eq!(tables.contract_years[0].name, "Base Period Year 1");
        assert_eq!(tables.other_prices[0].price_cents, Cents(7395));
        assert_eq!(tables.intl_accessorial_prices[0].market, Market::Oconus);
        assert!(tables.linehaul_prices.is_empty());
    }

    #[test]
    fn test_merge_appends_rows() {
        let mut tables = TariffTables::default();
        let mut other = TariffTables::default();
        other.contracts.push(ContractRow {
            id: Uuid::nil(),
            code: "TEST".to_string(),
            name: "Test".to_string(),
        });
        tables.merge(other.clone());
        tables.merge(other);
        assert_eq!(tables.contracts.len(), 2);
    }
}
