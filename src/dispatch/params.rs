//! Parameter bags and the [`ParameterSource`] seam.
//!
//! A parameter bag is the loosely typed input of a dispatcher call: named
//! values with a declared type. Adapters read the keys their pricer needs
//! and fail with `NotFound` for a missing key or `TypeMismatch` for a value
//! of the wrong declared type.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Parameter bag key names.
pub mod keys {
    #![allow(missing_docs)]

    pub const CONTRACT_CODE: &str = "ContractCode";
    pub const REFERENCE_DATE: &str = "ReferenceDate";
    pub const ACTUAL_PICKUP_DATE: &str = "ActualPickupDate";
    pub const REQUESTED_PICKUP_DATE: &str = "RequestedPickupDate";
    pub const WEIGHT_BILLED: &str = "WeightBilled";
    pub const DISTANCE_ZIP: &str = "DistanceZip";
    pub const DISTANCE_ZIP_SIT_ORIGIN: &str = "DistanceZipSITOrigin";
    pub const DISTANCE_ZIP_SIT_DEST: &str = "DistanceZipSITDest";
    pub const SERVICE_AREA_ORIGIN: &str = "ServiceAreaOrigin";
    pub const SERVICE_AREA_DEST: &str = "ServiceAreaDest";
    pub const SERVICES_SCHEDULE_ORIGIN: &str = "ServicesScheduleOrigin";
    pub const SERVICES_SCHEDULE_DEST: &str = "ServicesScheduleDest";
    pub const SIT_SCHEDULE_ORIGIN: &str = "SITScheduleOrigin";
    pub const SIT_SCHEDULE_DEST: &str = "SITScheduleDest";
    pub const NUMBER_DAYS_SIT: &str = "NumberDaysSIT";
    pub const ZIP_PICKUP_ADDRESS: &str = "ZipPickupAddress";
    pub const ZIP_SIT_ORIGIN_HHG_ACTUAL_ADDRESS: &str = "ZipSITOriginHHGActualAddress";
    pub const ZIP_DEST_ADDRESS: &str = "ZipDestAddress";
    pub const ZIP_SIT_DEST_HHG_FINAL_ADDRESS: &str = "ZipSITDestHHGFinalAddress";
    pub const CUBIC_FEET_BILLED: &str = "CubicFeetBilled";
    pub const STANDALONE_CRATE: &str = "StandaloneCrate";
    pub const STANDALONE_CRATE_CAP: &str = "StandaloneCrateCap";
    pub const FSC_WEIGHT_BASED_DISTANCE_MULTIPLIER: &str = "FSCWeightBasedDistanceMultiplier";
    pub const EIA_FUEL_PRICE: &str = "EIAFuelPrice";
    pub const IS_PPM: &str = "IsPPM";
    pub const SHIPMENT_TYPE: &str = "ShipmentType";
    pub const MARKET_ORIGIN: &str = "MarketOrigin";
    pub const MARKET_DEST: &str = "MarketDest";
    pub const PER_UNIT_CENTS: &str = "PerUnitCents";
    pub const EXTERNAL_CRATE: &str = "ExternalCrate";
}

/// A typed parameter value.
///
/// Serialized as `{"type": "integer", "value": 4000}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ParamValue {
    /// Free text (codes, postal codes, service areas).
    String(String),
    /// Whole numbers (weights, miles, schedules, cents, millicents).
    Integer(i64),
    /// Exact decimals (cubic feet, multipliers).
    Decimal(Decimal),
    /// Calendar dates.
    Date(NaiveDate),
    /// Flags.
    Boolean(bool),
}

impl ParamValue {
    /// The declared type name.
    pub fn type_name(&self) -> &'static str {
        match self {
            ParamValue::String(_) => "string",
            ParamValue::Integer(_) => "integer",
            ParamValue::Decimal(_) => "decimal",
            ParamValue::Date(_) => "date",
            ParamValue::Boolean(_) => "boolean",
        }
    }
}

/// Read access to a bag of named, typed values.
pub trait ParameterSource: Send + Sync {
    /// Reads a string value.
    fn get_string(&self, key: &str) -> EngineResult<String>;
    /// Reads an integer value.
    fn get_int(&self, key: &str) -> EngineResult<i64>;
    /// Reads a decimal value.
    fn get_decimal(&self, key: &str) -> EngineResult<Decimal>;
    /// Reads a date value.
    fn get_date(&self, key: &str) -> EngineResult<NaiveDate>;
    /// Reads a boolean value.
    fn get_bool(&self, key: &str) -> EngineResult<bool>;
    /// Whether `key` is present at all.
    fn contains(&self, key: &str) -> bool;

    /// Reads an optional boolean, falling back to `default` when absent.
    fn get_bool_or(&self, key: &str, default: bool) -> EngineResult<bool> {
        if self.contains(key) {
            self.get_bool(key)
        } else {
            Ok(default)
        }
    }

    /// Reads an optional integer, falling back to `default` when absent.
    fn get_int_or(&self, key: &str, default: i64) -> EngineResult<i64> {
        if self.contains(key) {
            self.get_int(key)
        } else {
            Ok(default)
        }
    }
}

/// An in-memory parameter bag.
///
/// # Example
///
/// ```
/// use tariff_engine::dispatch::{ParamBag, ParameterSource};
///
/// let bag = ParamBag::new()
///     .with_string("ContractCode", "TEST")
///     .with_int("WeightBilled", 4000);
///
/// assert_eq!(bag.get_int("WeightBilled").unwrap(), 4000);
/// assert!(bag.get_int("ContractCode").is_err());
/// assert!(bag.get_string("ServiceAreaOrigin").is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParamBag {
    values: BTreeMap<String, ParamValue>,
}

impl ParamBag {
    /// Creates an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a value.
    pub fn insert(&mut self, key: impl Into<String>, value: ParamValue) {
        self.values.insert(key.into(), value);
    }

    /// Builder form of [`insert`](Self::insert) for a string.
    pub fn with_string(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, ParamValue::String(value.into()));
        self
    }

    /// Builder form of [`insert`](Self::insert) for an integer.
    pub fn with_int(mut self, key: impl Into<String>, value: i64) -> Self {
        self.insert(key, ParamValue::Integer(value));
        self
    }

    /// Builder form of [`insert`](Self::insert) for a decimal.
    pub fn with_decimal(mut self, key: impl Into<String>, value: Decimal) -> Self {
        self.insert(key, ParamValue::Decimal(value));
        self
    }

    /// Builder form of [`insert`](Self::insert) for a date.
    pub fn with_date(mut self, key: impl Into<String>, value: NaiveDate) -> Self {
        self.insert(key, ParamValue::Date(value));
        self
    }

    /// Builder form of [`insert`](Self::insert) for a boolean.
    pub fn with_bool(mut self, key: impl Into<String>, value: bool) -> Self {
        self.insert(key, ParamValue::Boolean(value));
        self
    }

    /// Number of values in the bag.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the bag is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn require(&self, key: &str) -> EngineResult<&ParamValue> {
        self.values.get(key).ok_or_else(|| {
            EngineError::not_found("param", format!("could not find param with key {}", key))
        })
    }
}

fn mismatch(key: &str, expected: &str, actual: &ParamValue) -> EngineError {
    EngineError::TypeMismatch {
        key: key.to_string(),
        expected: expected.to_string(),
        actual: actual.type_name().to_string(),
    }
}

impl ParameterSource for ParamBag {
    fn get_string(&self, key: &str) -> EngineResult<String> {
        match self.require(key)? {
            ParamValue::String(value) => Ok(value.clone()),
            other => Err(mismatch(key, "string", other)),
        }
    }

    fn get_int(&self, key: &str) -> EngineResult<i64> {
        match self.require(key)? {
            ParamValue::Integer(value) => Ok(*value),
            other => Err(mismatch(key, "integer", other)),
        }
    }

    fn get_decimal(&self, key: &str) -> EngineResult<Decimal> {
        match self.require(key)? {
            ParamValue::Decimal(value) => Ok(*value),
            other => Err(mismatch(key, "decimal", other)),
        }
    }

    fn get_date(&self, key: &str) -> EngineResult<NaiveDate> {
        match self.require(key)? {
            ParamValue::Date(value) => Ok(*value),
            other => Err(mismatch(key, "date", other)),
        }
    }

    fn get_bool(&self, key: &str) -> EngineResult<bool> {
        match self.require(key)? {
            ParamValue::Boolean(value) => Ok(*value),
            other => Err(mismatch(key, "boolean", other)),
        }
    }

    fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::str::FromStr;

    fn bag() -> ParamBag {
        ParamBag::new()
            .with_string(keys::CONTRACT_CODE, "TEST")
            .with_int(keys::WEIGHT_BILLED, 4000)
            .with_decimal(keys::CUBIC_FEET_BILLED, Decimal::from_str("12.5").unwrap())
            .with_date(
                keys::REFERENCE_DATE,
                NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
            )
            .with_bool(keys::IS_PPM, true)
    }

    #[test]
    fn test_typed_reads() {
        let bag = bag();
        assert_eq!(bag.get_string(keys::CONTRACT_CODE).unwrap(), "TEST");
        assert_eq!(bag.get_int(keys::WEIGHT_BILLED).unwrap(), 4000);
        assert_eq!(
            bag.get_decimal(keys::CUBIC_FEET_BILLED).unwrap(),
            Decimal::from_str("12.5").unwrap()
        );
        assert!(bag.get_bool(keys::IS_PPM).unwrap());
        assert_eq!(bag.len(), 5);
    }

    #[test]
    fn test_missing_key_is_not_found() {
        let err = bag().get_string(keys::SERVICE_AREA_ORIGIN).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(
            err.to_string(),
            "could not find param with key ServiceAreaOrigin"
        );
    }

    #[test]
    fn test_wrong_type_is_type_mismatch() {
        let err = bag().get_int(keys::CONTRACT_CODE).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        assert_eq!(
            err.to_string(),
            "Param ContractCode has type string, expected integer"
        );
    }

    #[test]
    fn test_optional_reads_default_when_absent() {
        let bag = ParamBag::new();
        assert!(!bag.get_bool_or(keys::STANDALONE_CRATE, false).unwrap());
        assert_eq!(bag.get_int_or(keys::STANDALONE_CRATE_CAP, 0).unwrap(), 0);
    }

    #[test]
    fn test_optional_reads_still_type_check() {
        let bag = ParamBag::new().with_string(keys::IS_PPM, "yes");
        assert_eq!(
            bag.get_bool_or(keys::IS_PPM, false).unwrap_err().kind(),
            ErrorKind::TypeMismatch
        );
    }

    #[test]
    fn test_json_shape() {
        let bag = ParamBag::new()
            .with_int(keys::WEIGHT_BILLED, 4000)
            .with_date(
                keys::REFERENCE_DATE,
                NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
            );
        let json = serde_json::to_value(&bag).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "ReferenceDate": {"type": "date", "value": "2024-06-15"},
                "WeightBilled": {"type": "integer", "value": 4000}
            })
        );

        let parsed: ParamBag = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, bag);
    }
}
