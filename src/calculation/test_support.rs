//! Shared fixtures for pricer tests.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::catalog::{
    AccessorialPriceRow, ContractRow, ContractYearRow, InMemoryRateCatalog,
    IntlAccessorialPriceRow, LinehaulPriceRow, OtherPriceRow, ServiceAreaPriceRow,
    ShipmentTypeFactorRow, TariffTables, TaskOrderFeeRow,
};
use crate::models::{Cents, Market, Miles, Millicents, Pound, ServiceCode};

pub const CONTRACT_CODE: &str = "TEST";
pub const SERVICE_AREA: &str = "004";
pub const TEST_ESCALATION: &str = "1.04071";

pub fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn peak_date() -> NaiveDate {
    date(2024, 6, 15)
}

pub fn non_peak_date() -> NaiveDate {
    date(2024, 2, 15)
}

pub fn contract_id() -> Uuid {
    Uuid::from_str("5a3b5f7e-98a4-4b43-8b0f-2f8d8f1a9c01").unwrap()
}

fn linehaul(is_peak: bool, miles: (i64, i64), millicents: i64) -> LinehaulPriceRow {
    LinehaulPriceRow {
        contract_code: CONTRACT_CODE.to_string(),
        service_area: SERVICE_AREA.to_string(),
        is_peak,
        weight_lower: Pound(500),
        weight_upper: Pound(4999),
        miles_lower: Miles(miles.0),
        miles_upper: Miles(miles.1),
        price_millicents: Millicents(millicents),
    }
}

fn service_area(code: &str, is_peak: bool, cents: i64) -> ServiceAreaPriceRow {
    ServiceAreaPriceRow {
        contract_code: CONTRACT_CODE.to_string(),
        service_code: ServiceCode::new(code),
        service_area: SERVICE_AREA.to_string(),
        is_peak,
        price_cents: Cents(cents),
    }
}

fn other(code: &str, schedule: i64, is_peak: bool, cents: i64) -> OtherPriceRow {
    OtherPriceRow {
        contract_code: CONTRACT_CODE.to_string(),
        service_code: ServiceCode::new(code),
        schedule,
        is_peak,
        price_cents: Cents(cents),
    }
}

fn accessorial(code: &str, schedule: i64, cents: i64) -> AccessorialPriceRow {
    AccessorialPriceRow {
        contract_code: CONTRACT_CODE.to_string(),
        service_code: ServiceCode::new(code),
        schedule,
        per_unit_cents: Cents(cents),
    }
}

fn intl_accessorial(code: &str, market: Market, cents: i64) -> IntlAccessorialPriceRow {
    IntlAccessorialPriceRow {
        contract_code: CONTRACT_CODE.to_string(),
        service_code: ServiceCode::new(code),
        market,
        per_unit_cents: Cents(cents),
    }
}

fn task_order_fee(code: &str, cents: i64) -> TaskOrderFeeRow {
    TaskOrderFeeRow {
        contract_code: CONTRACT_CODE.to_string(),
        service_code: ServiceCode::new(code),
        contract_year: "Base Period Year 1".to_string(),
        price_cents: Cents(cents),
    }
}

pub fn tables() -> TariffTables {
    TariffTables {
        contracts: vec![ContractRow {
            id: contract_id(),
            code: CONTRACT_CODE.to_string(),
            name: "Test Contract".to_string(),
        }],
        contract_years: vec![ContractYearRow {
            contract_code: CONTRACT_CODE.to_string(),
            name: "Base Period Year 1".to_string(),
            start_date: date(2024, 1, 1),
            end_date: date(2024, 12, 31),
            escalation: dec("1.0197"),
            escalation_compounded: dec(TEST_ESCALATION),
        }],
        linehaul_prices: vec![
            linehaul(true, (1001, 1500), 5000),
            linehaul(false, (1001, 1500), 4500),
            linehaul(true, (51, 1000), 5500),
        ],
        service_area_prices: vec![
            service_area("DSH", true, 26),
            service_area("DSH", false, 23),
            service_area("DOP", true, 631),
            service_area("DOP", false, 589),
            service_area("DDP", true, 740),
            service_area("DOFSIT", true, 1855),
            service_area("DDFSIT", true, 2021),
            service_area("DOASIT", true, 53),
            service_area("DDASIT", true, 58),
        ],
        other_prices: vec![
            other("DPK", 2, true, 7395),
            other("DPK", 2, false, 6432),
            other("DUPK", 2, true, 597),
            other("DOPSIT", 3, true, 2234),
            other("DDDSIT", 3, true, 2479),
        ],
        accessorial_prices: vec![
            accessorial("DOSHUT", 2, 505),
            accessorial("DDSHUT", 2, 505),
            accessorial("DCRT", 2, 2369),
            accessorial("DUCRT", 2, 595),
        ],
        intl_accessorial_prices: vec![
            intl_accessorial("IOSHUT", Market::Oconus, 1553),
            intl_accessorial("IDSHUT", Market::Conus, 1350),
            intl_accessorial("ICRT", Market::Oconus, 2500),
            intl_accessorial("IUCRT", Market::Conus, 700),
        ],
        shipment_type_factors: vec![ShipmentTypeFactorRow {
            contract_code: CONTRACT_CODE.to_string(),
            service_code: ServiceCode::new("DNPK"),
            market: Market::Conus,
            factor: dec("1.35"),
        }],
        task_order_fees: vec![task_order_fee("MS", 45115), task_order_fee("CS", 24123)],
    }
}

pub fn catalog() -> InMemoryRateCatalog {
    InMemoryRateCatalog::new(tables()).unwrap()
}
