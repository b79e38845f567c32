//! Configuration types for the tariff rate engine.
//!
//! This module contains the strongly-typed engine constants that are
//! deserialized from `tariff.yaml`. Every field has a default, so an empty
//! file yields the standard tariff.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{CubicFeet, Miles, Millicents, Pound};

/// A month/day pair, independent of year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MonthDay {
    /// Month, 1 through 12.
    pub month: u32,
    /// Day of month, 1 through 31.
    pub day: u32,
}

impl MonthDay {
    /// Creates a month/day pair.
    pub const fn new(month: u32, day: u32) -> Self {
        Self { month, day }
    }

    /// Whether this day exists in some year. February 29 is accepted.
    pub fn is_valid(&self) -> bool {
        NaiveDate::from_ymd_opt(2000, self.month, self.day).is_some()
    }
}

/// The annual peak rate window, inclusive at both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeakWindow {
    /// First peak day.
    pub start: MonthDay,
    /// Last peak day.
    pub end: MonthDay,
}

impl PeakWindow {
    /// Checks both ends are real calendar days and the window does not wrap
    /// past the end of the year.
    pub fn validate(&self) -> EngineResult<()> {
        for (field, bound) in [("peak_period.start", self.start), ("peak_period.end", self.end)] {
            if !bound.is_valid() {
                return Err(EngineError::validation(
                    field,
                    format!("{}/{} is not a calendar day", bound.month, bound.day),
                ));
            }
        }
        if self.start > self.end {
            return Err(EngineError::validation(
                "peak_period",
                format!(
                    "start {}/{} is after end {}/{}",
                    self.start.month, self.start.day, self.end.month, self.end.day
                ),
            ));
        }
        Ok(())
    }
}

impl Default for PeakWindow {
    fn default() -> Self {
        Self {
            start: MonthDay::new(5, 15),
            end: MonthDay::new(9, 30),
        }
    }
}

/// Engine-wide tariff constants.
///
/// Resolved once at startup and handed to each pricer's constructor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TariffConfig {
    /// Minimum billable weight for domestic and HHG shipments.
    pub minimum_domestic_weight: Pound,
    /// Minimum billable weight for unaccompanied baggage.
    pub minimum_unaccompanied_baggage_weight: Pound,
    /// Shortest distance linehaul will price.
    pub minimum_linehaul_distance: Miles,
    /// Diesel baseline the fuel surcharge is measured against.
    pub base_fuel_price: Millicents,
    /// The annual peak window.
    pub peak_period: PeakWindow,
    /// Smallest crate volume that may be billed.
    pub minimum_crate_cubic_feet: CubicFeet,
    /// SIT pickup/delivery at or under this distance uses the local SIT rate.
    pub sit_local_distance_threshold: Miles,
    /// Minimum weight for international shuttling and SIT pickup/delivery.
    pub minimum_international_weight: Pound,
    /// Smallest volume an external international crate may be billed for.
    pub minimum_external_crate_cubic_feet: CubicFeet,
}

impl Default for TariffConfig {
    fn default() -> Self {
        Self {
            minimum_domestic_weight: Pound(500),
            minimum_unaccompanied_baggage_weight: Pound(300),
            minimum_linehaul_distance: Miles(50),
            base_fuel_price: Millicents(250_000),
            peak_period: PeakWindow::default(),
            minimum_crate_cubic_feet: CubicFeet(Decimal::new(40, 1)),
            sit_local_distance_threshold: Miles(50),
            minimum_international_weight: Pound(500),
            minimum_external_crate_cubic_feet: CubicFeet(Decimal::new(400, 2)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tariff_constants() {
        let config = TariffConfig::default();
        assert_eq!(config.minimum_domestic_weight, Pound(500));
        assert_eq!(config.minimum_unaccompanied_baggage_weight, Pound(300));
        assert_eq!(config.minimum_linehaul_distance, Miles(50));
        assert_eq!(config.base_fuel_price, Millicents(250_000));
        assert_eq!(config.peak_period.start, MonthDay::new(5, 15));
        assert_eq!(config.peak_period.end, MonthDay::new(9, 30));
        assert_eq!(config.minimum_crate_cubic_feet, CubicFeet(Decimal::from(4)));
        assert_eq!(config.minimum_international_weight, Pound(500));
        assert_eq!(
            config.minimum_external_crate_cubic_feet,
            CubicFeet(Decimal::from(4))
        );
    }

    #[test]
    fn test_default_peak_window_is_valid() {
        assert!(PeakWindow::default().validate().is_ok());
        let single_day = PeakWindow {
            start: MonthDay::new(2, 29),
            end: MonthDay::new(2, 29),
        };
        assert!(single_day.validate().is_ok());
    }

    #[test]
    fn test_peak_window_rejects_impossible_days() {
        for (start, end) in [
            (MonthDay::new(0, 1), MonthDay::new(9, 30)),
            (MonthDay::new(5, 15), MonthDay::new(13, 1)),
            (MonthDay::new(4, 31), MonthDay::new(9, 30)),
            (MonthDay::new(5, 0), MonthDay::new(9, 30)),
        ] {
            let err = PeakWindow { start, end }.validate().unwrap_err();
            assert!(err.to_string().contains("is not a calendar day"), "{}", err);
        }
    }

    #[test]
    fn test_peak_window_rejects_wrapping_range() {
        let wrapping = PeakWindow {
            start: MonthDay::new(11, 1),
            end: MonthDay::new(2, 28),
        };
        assert_eq!(
            wrapping.validate().unwrap_err().to_string(),
            "Invalid peak_period: start 11/1 is after end 2/28"
        );

        let same_month = PeakWindow {
            start: MonthDay::new(6, 20),
            end: MonthDay::new(6, 10),
        };
        assert!(same_month.validate().is_err());
    }

    #[test]
    fn test_empty_yaml_yields_defaults() {
        let config: TariffConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, TariffConfig::default());
    }

    #[test]
    fn test_partial_yaml_overrides_only_named_fields() {
        let yaml = r#"
base_fuel_price: 300000
peak_period:
  start: { month: 6, day: 1 }
  end: { month: 8, day: 31 }
"#;
        let config: TariffConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.base_fuel_price, Millicents(300_000));
        assert_eq!(config.peak_period.start, MonthDay::new(6, 1));
        assert_eq!(config.minimum_domestic_weight, Pound(500));
    }
}
