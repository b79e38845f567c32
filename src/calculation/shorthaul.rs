//! Domestic shorthaul (DSH) pricing.

use chrono::NaiveDate;
use tracing::debug;

use crate::catalog::RateCatalog;
use crate::config::{PeakWindow, TariffConfig};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    Cents, DisplayParam, DisplayParamKey, Miles, Pound, PriceResult, ServiceCode,
    checked_product, codes, format_bool, format_escalation, format_rate,
};

use super::escalation::escalate_price;
use super::peak_period::is_peak_period;
use super::validation::{require_contract_code, require_service_area};
use super::weight_floor::{MinimumWeightPolicy, WeightFloor};

/// Inputs to a shorthaul price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShorthaulRequest<'a> {
    /// The contract code.
    pub contract_code: &'a str,
    /// The date rates and escalation are selected for.
    pub reference_date: NaiveDate,
    /// Zip-to-zip distance; must be positive.
    pub distance: Miles,
    /// Billed weight before the minimum is applied.
    pub weight: Pound,
    /// Origin service area.
    pub service_area: &'a str,
    /// Whether this is a PPM shipment.
    pub is_ppm: bool,
}

/// Prices domestic shorthaul from the service area table.
///
/// The rate is cents per hundredweight per mile. Weight floors behave as
/// they do for [`LinehaulPricer`](super::LinehaulPricer).
#[derive(Debug, Clone)]
pub struct ShorthaulPricer {
    floor: WeightFloor,
    peak_period: PeakWindow,
}

impl ShorthaulPricer {
    /// Creates a pricer that rejects sub-minimum non-PPM weights.
    pub fn new(config: &TariffConfig) -> Self {
        Self {
            floor: WeightFloor::new(
                config.minimum_domestic_weight,
                MinimumWeightPolicy::RejectBelowMinimum,
            )
            .with_ppm_policy(MinimumWeightPolicy::SubstituteMinimum),
            peak_period: config.peak_period,
        }
    }

    /// Creates a pricer that bills sub-minimum weights at the minimum.
    pub fn with_soft_floor(config: &TariffConfig) -> Self {
        Self {
            floor: WeightFloor::new(
                config.minimum_domestic_weight,
                MinimumWeightPolicy::SubstituteMinimum,
            ),
            peak_period: config.peak_period,
        }
    }

    /// The weight floor this pricer applies.
    pub fn weight_floor(&self) -> WeightFloor {
        self.floor
    }

    /// Computes the shorthaul price: `cents × escalation × CWT × miles`.
    pub fn price(
        &self,
        catalog: &dyn RateCatalog,
        request: &ShorthaulRequest<'_>,
    ) -> EngineResult<PriceResult> {
        require_contract_code(request.contract_code)?;
        require_service_area(request.service_area)?;
        if request.distance.0 <= 0 {
            return Err(EngineError::validation("Distance", "must be greater than 0"));
        }

        let billable = self.floor.resolve(request.weight, request.is_ppm)?;
        let is_peak = is_peak_period(request.reference_date, &self.peak_period);

        let rate = catalog.service_area_rate(
            request.contract_code,
            &ServiceCode::new(codes::DSH),
            request.service_area,
            is_peak,
        )?;
        let escalation = escalate_price(
            catalog,
            rate.contract_id,
            request.reference_date,
            rate.price.to_cents_decimal(),
        )?;

        let total = checked_product(&[
            escalation.escalated_price,
            billable.weight.to_cwt(),
            request.distance.to_decimal(),
        ])?;
        let price = Cents::round_from(total)?;

        debug!(
            contract_code = request.contract_code,
            service_area = request.service_area,
            is_peak,
            weight = billable.weight.0,
            distance = request.distance.0,
            price_cents = price.0,
            "Priced domestic shorthaul"
        );

        Ok(PriceResult::new(
            price,
            vec![
                DisplayParam::new(
                    DisplayParamKey::ContractYearName,
                    escalation.contract_year.name.clone(),
                ),
                DisplayParam::new(DisplayParamKey::PriceRateOrFactor, format_rate(rate.price)),
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
    use crate::calculation::test_support::{
        CONTRACT_CODE, SERVICE_AREA, catalog, non_peak_date, peak_date,
    };
    use crate::error::ErrorKind;

    fn request(reference_date: NaiveDate, weight: i64, distance: i64) -> ShorthaulRequest<'static> {
        ShorthaulRequest {
            contract_code: CONTRACT_CODE,
            reference_date,
            distance: Miles(distance),
            weight: Pound(weight),
            service_area: SERVICE_AREA,
            is_ppm: false,
        }
    }

    #[test]
    fn test_peak_shorthaul_price() {
        let pricer = ShorthaulPricer::new(&TariffConfig::default());
        let result = pricer.price(&catalog(), &request(peak_date(), 1000, 36)).unwrap();
        // 26 × 1.04071 × 10 CWT × 36 mi = 9741.0456
        assert_eq!(result.price, Cents(9741));
        assert_eq!(result.param(DisplayParamKey::PriceRateOrFactor), Some("0.26"));
        assert_eq!(result.display_params.len(), 4);
    }

    #[test]
    fn test_non_peak_shorthaul_price() {
        let pricer = ShorthaulPricer::new(&TariffConfig::default());
        let result = pricer
            .price(&catalog(), &request(non_peak_date(), 1000, 36))
            .unwrap();
        assert_eq!(result.price, Cents(8617));
        assert_eq!(result.param(DisplayParamKey::IsPeak), Some("false"));
    }

    #[test]
    fn test_zero_distance_rejected() {
        let pricer = ShorthaulPricer::new(&TariffConfig::default());
        let err = pricer.price(&catalog(), &request(peak_date(), 1000, 0)).unwrap_err();
        assert_eq!(err.to_string(), "Invalid Distance: must be greater than 0");
    }

    #[test]
    fn test_hard_and_soft_floor_paths() {
        let catalog = catalog();
        let hard = ShorthaulPricer::new(&TariffConfig::default());
        let soft = ShorthaulPricer::with_soft_floor(&TariffConfig::default());

        let err = hard.price(&catalog, &request(peak_date(), 499, 36)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        let substituted = soft.price(&catalog, &request(peak_date(), 499, 36)).unwrap();
        assert_eq!(substituted.price, Cents(4871));
    }

    #[test]
    fn test_missing_service_area_rejected() {
        let pricer = ShorthaulPricer::new(&TariffConfig::default());
        let mut bad = request(peak_date(), 1000, 36);
        bad.service_area = "";
        assert_eq!(
            pricer.price(&catalog(), &bad).unwrap_err().to_string(),
            "Invalid ServiceArea: is required"
        );
    }

    #[test]
    fn test_overflowing_total_is_calculation_error() {
        let pricer = ShorthaulPricer::new(&TariffConfig::default());
        let err = pricer
            .price(&catalog(), &request(peak_date(), i64::MAX, i64::MAX))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Calculation);
        assert!(err.to_string().starts_with("Calculation error:"));
    }
}
