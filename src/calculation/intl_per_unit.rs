//! International pack/unpack and SIT priced from a caller-supplied rate.
//!
//! IHPK, IHUPK, IUBPK and IUBUPK (packing), IOFSIT and IDFSIT (first day
//! SIT) and IOASIT and IDASIT (additional days SIT) arrive with their
//! per-unit price already resolved for the port. Only escalation comes from
//! the catalog.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use crate::catalog::RateCatalog;
use crate::config::{PeakWindow, TariffConfig};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    Cents, DisplayParam, DisplayParamKey, Pound, PriceResult, ServiceCode, checked_product,
    codes, format_bool, format_cents, format_escalation,
};

use super::escalation::escalate_price;
use super::peak_period::is_peak_period;
use super::validation::require_contract_code;

/// Which per-unit family a code belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntlPerUnitFamily {
    /// Packing and unpacking, per CWT.
    PackUnpack,
    /// First day in storage, per CWT.
    FirstDaySit,
    /// Each further day in storage, per CWT per day.
    AdditionalDaysSit,
}

impl IntlPerUnitFamily {
    /// The family for `code`.
    pub fn of(code: &ServiceCode) -> EngineResult<Self> {
        match code.as_str() {
            codes::IHPK | codes::IHUPK | codes::IUBPK | codes::IUBUPK => {
                Ok(IntlPerUnitFamily::PackUnpack)
            }
            codes::IOFSIT | codes::IDFSIT => Ok(IntlPerUnitFamily::FirstDaySit),
            codes::IOASIT | codes::IDASIT => Ok(IntlPerUnitFamily::AdditionalDaysSit),
            other => Err(EngineError::validation(
                "ServiceCode",
                format!("unsupported international per-unit code of {}", other),
            )),
        }
    }
}

/// Inputs to an international per-unit price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntlPerUnitRequest<'a> {
    /// The contract code.
    pub contract_code: &'a str,
    /// The date peak and escalation are selected for.
    pub reference_date: NaiveDate,
    /// Billed weight, used as is.
    pub weight: Pound,
    /// Base price per CWT.
    pub per_unit_cents: Cents,
    /// Days in storage; required for the additional days codes.
    pub number_of_days_sit: Option<i64>,
}

/// Prices one international per-unit code.
///
/// # Example
///
/// ```
/// use tariff_engine::calculation::{IntlPerUnitFamily, IntlPerUnitPricer};
/// use tariff_engine::config::TariffConfig;
/// use tariff_engine::models::ServiceCode;
///
/// let config = TariffConfig::default();
/// let pricer = IntlPerUnitPricer::new(&config, ServiceCode::new("IOASIT")).unwrap();
/// assert_eq!(pricer.family(), IntlPerUnitFamily::AdditionalDaysSit);
/// assert!(IntlPerUnitPricer::new(&config, ServiceCode::new("DPK")).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct IntlPerUnitPricer {
    code: ServiceCode,
    family: IntlPerUnitFamily,
    peak_period: PeakWindow,
}

impl IntlPerUnitPricer {
    /// Creates a pricer for any of the eight per-unit codes.
    pub fn new(config: &TariffConfig, code: ServiceCode) -> EngineResult<Self> {
        let family = IntlPerUnitFamily::of(&code)?;
        Ok(Self {
            code,
            family,
            peak_period: config.peak_period,
        })
    }

    /// The family this pricer's code belongs to.
    pub fn family(&self) -> IntlPerUnitFamily {
        self.family
    }

    /// Computes `per unit cents × escalation × CWT`, times the day count for
    /// additional days SIT. Peak status is reported but does not change the
    /// price.
    pub fn price(
        &self,
        catalog: &dyn RateCatalog,
        request: &IntlPerUnitRequest<'_>,
    ) -> EngineResult<PriceResult> {
        require_contract_code(request.contract_code)?;
        let days = match self.family {
            IntlPerUnitFamily::AdditionalDaysSit => match request.number_of_days_sit {
                Some(days) if days > 0 => days,
                _ => return Err(EngineError::validation("NumberDaysSIT", "is required")),
            },
            _ => 1,
        };
        if request.per_unit_cents.0 == 0 {
            return Err(EngineError::validation("PerUnitCents", "is required"));
        }

        let is_peak = is_peak_period(request.reference_date, &self.peak_period);
        let contract_id = catalog.contract_by_code(request.contract_code)?;
        let escalation = escalate_price(
            catalog,
            contract_id,
            request.reference_date,
            request.per_unit_cents.to_decimal(),
        )?;

        let total = checked_product(&[
            escalation.escalated_price,
            request.weight.to_cwt(),
            Decimal::from(days),
        ])?;
        let price = Cents::round_from(total)?;

        debug!(
            service_code = %self.code,
            contract_code = request.contract_code,
            is_peak,
            weight = request.weight.0,
            days,
            price_cents = price.0,
            "Priced international per-unit item"
        );

        Ok(PriceResult::new(
            price,
            vec![
                DisplayParam::new(
                    DisplayParamKey::ContractYearName,
                    escalation.contract_year.name.clone(),
                ),
                DisplayParam::new(
                    DisplayParamKey::PriceRateOrFactor,
                    format_cents(request.per_unit_cents),
                ),
                DisplayParam::new(DisplayParamKey::IsPeak, format_bool(is_peak)),
                DisplayParam::new(
                    DisplayParamKey::EscalationCompounded,
                    format_escalation(escalation.contract_year.escalation_compounded),
                ),
            ],
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::test_support::{CONTRACT_CODE, catalog, non_peak_date, peak_date};
    use crate::error::ErrorKind;

    fn pricer(code: &str) -> IntlPerUnitPricer {
        IntlPerUnitPricer::new(&TariffConfig::default(), ServiceCode::new(code)).unwrap()
    }

    fn request(weight: i64, per_unit_cents: i64, days: Option<i64>) -> IntlPerUnitRequest<'static> {
        IntlPerUnitRequest {
            contract_code: CONTRACT_CODE,
            reference_date: peak_date(),
            weight: Pound(weight),
            per_unit_cents: Cents(per_unit_cents),
            number_of_days_sit: days,
        }
    }

    #[test]
    fn test_codes_map_to_families() {
        for code in ["IHPK", "IHUPK", "IUBPK", "IUBUPK"] {
            assert_eq!(pricer(code).family(), IntlPerUnitFamily::PackUnpack);
        }
        for code in ["IOFSIT", "IDFSIT"] {
            assert_eq!(pricer(code).family(), IntlPerUnitFamily::FirstDaySit);
        }
        for code in ["IOASIT", "IDASIT"] {
            assert_eq!(pricer(code).family(), IntlPerUnitFamily::AdditionalDaysSit);
        }
        let err = IntlPerUnitPricer::new(&TariffConfig::default(), ServiceCode::new("IOSHUT"))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid ServiceCode: unsupported international per-unit code of IOSHUT"
        );
    }

    #[test]
    fn test_packing_price() {
        let result = pricer("IHPK")
            .price(&catalog(), &request(1000, 6000, None))
            .unwrap();
        // 6000 × 1.04071 × 10 CWT = 62442.6
        assert_eq!(result.price, Cents(62443));
        assert_eq!(result.param(DisplayParamKey::PriceRateOrFactor), Some("60.00"));
        assert_eq!(result.param(DisplayParamKey::IsPeak), Some("true"));
        assert_eq!(result.param(DisplayParamKey::EscalationCompounded), Some("1.04071"));
    }

    #[test]
    fn test_peak_is_reported_not_priced() {
        let mut off_peak = request(1000, 6000, None);
        off_peak.reference_date = non_peak_date();
        let result = pricer("IUBUPK").price(&catalog(), &off_peak).unwrap();
        assert_eq!(result.price, Cents(62443));
        assert_eq!(result.param(DisplayParamKey::IsPeak), Some("false"));
    }

    #[test]
    fn test_light_weight_is_not_floored() {
        let result = pricer("IUBPK")
            .price(&catalog(), &request(100, 6000, None))
            .unwrap();
        // 6244.26 × 1 CWT
        assert_eq!(result.price, Cents(6244));
    }

    #[test]
    fn test_first_day_sit_ignores_day_count() {
        let result = pricer("IOFSIT")
            .price(&catalog(), &request(2000, 1500, Some(9)))
            .unwrap();
        // 1500 × 1.04071 × 20 CWT = 31221.3
        assert_eq!(result.price, Cents(31221));
    }

    #[test]
    fn test_additional_days_multiplies_by_days() {
        let result = pricer("IDASIT")
            .price(&catalog(), &request(2000, 150, Some(5)))
            .unwrap();
        // 150 × 1.04071 × 20 CWT × 5 days = 15610.65
        assert_eq!(result.price, Cents(15611));
    }

    #[test]
    fn test_additional_days_requires_days() {
        for days in [None, Some(0)] {
            let err = pricer("IOASIT")
                .price(&catalog(), &request(2000, 150, days))
                .unwrap_err();
            assert_eq!(err.to_string(), "Invalid NumberDaysSIT: is required");
        }
    }

    #[test]
    fn test_zero_per_unit_cents_rejected() {
        let err = pricer("IHUPK")
            .price(&catalog(), &request(1000, 0, None))
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid PerUnitCents: is required");
    }

    #[test]
    fn test_unknown_contract_is_not_found() {
        let mut bad = request(1000, 6000, None);
        bad.contract_code = "BOGUS";
        let err = pricer("IHPK").price(&catalog(), &bad).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_oversized_inputs_are_calculation_errors() {
        let err = pricer("IDASIT")
            .price(&catalog(), &request(i64::MAX, i64::MAX, Some(i64::MAX)))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Calculation);
    }
}
