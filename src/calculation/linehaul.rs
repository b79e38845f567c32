//! Domestic linehaul (DLH) pricing.
//!
//! Linehaul rates are quoted in millicents per hundredweight per mile and
//! selected by weight band and mileage band within a service area.

use chrono::NaiveDate;
use tracing::debug;

use crate::catalog::{LinehaulRateQuery, RateCatalog};
use crate::config::{PeakWindow, TariffConfig};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    Cents, DisplayParam, DisplayParamKey, Miles, Pound, PriceResult, checked_product,
    format_bool, format_escalation, format_rate,
};

use super::escalation::escalate_price;
use super::peak_period::is_peak_period;
use super::validation::{require_contract_code, require_service_area};
use super::weight_floor::{MinimumWeightPolicy, WeightFloor};

/// Inputs to a linehaul price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinehaulRequest<'a> {
    /// The contract code.
    pub contract_code: &'a str,
    /// The date rates and escalation are selected for.
    pub reference_date: NaiveDate,
    /// Zip-to-zip distance.
    pub distance: Miles,
    /// Billed weight before the minimum is applied.
    pub weight: Pound,
    /// Origin service area.
    pub service_area: &'a str,
    /// Whether this is a PPM shipment.
    pub is_ppm: bool,
}

/// Prices domestic linehaul.
///
/// The default constructor uses a hard weight floor: non-PPM weights below
/// the minimum are rejected. [`LinehaulPricer::with_soft_floor`] substitutes
/// the minimum instead.
///
/// # Example
///
/// ```no_run
/// use tariff_engine::calculation::{LinehaulPricer, LinehaulRequest};
/// use tariff_engine::config::ConfigLoader;
/// use tariff_engine::models::{Miles, Pound};
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/ghc").unwrap();
/// let pricer = LinehaulPricer::new(loader.tariff());
/// let request = LinehaulRequest {
///     contract_code: "TEST",
///     reference_date: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
///     distance: Miles(1200),
///     weight: Pound(4000),
///     service_area: "004",
///     is_ppm: false,
/// };
/// let result = pricer.price(loader.catalog(), &request).unwrap();
/// println!("Linehaul: {} cents", result.price);
/// ```
#[derive(Debug, Clone)]
pub struct LinehaulPricer {
    floor: WeightFloor,
    minimum_distance: Miles,
    peak_period: PeakWindow,
}

impl LinehaulPricer {
    /// Creates a pricer that rejects sub-minimum non-PPM weights.
    pub fn new(config: &TariffConfig) -> Self {
        Self {
            floor: WeightFloor::new(
                config.minimum_domestic_weight,
                MinimumWeightPolicy::RejectBelowMinimum,
            )
            .with_ppm_policy(MinimumWeightPolicy::SubstituteMinimum),
            minimum_distance: config.minimum_linehaul_distance,
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
            ..Self::new(config)
        }
    }

    /// The weight floor this pricer applies.
    pub fn weight_floor(&self) -> WeightFloor {
        self.floor
    }

    /// Computes the linehaul price.
    ///
    /// `price = millicents / 1000 × escalation × CWT × miles`, rounded once.
    pub fn price(
        &self,
        catalog: &dyn RateCatalog,
        request: &LinehaulRequest<'_>,
    ) -> EngineResult<PriceResult> {
        require_contract_code(request.contract_code)?;
        require_service_area(request.service_area)?;
        if request.distance < self.minimum_distance {
            return Err(EngineError::validation(
                "Distance",
                format!("must be at least {} miles", self.minimum_distance),
            ));
        }

        let billable = self.floor.resolve(request.weight, request.is_ppm)?;
        let is_peak = is_peak_period(request.reference_date, &self.peak_period);

        let rate = catalog.linehaul_rate(&LinehaulRateQuery {
            contract_code: request.contract_code,
            reference_date: request.reference_date,
            is_peak,
            weight: billable.weight,
            distance: request.distance,
            service_area: request.service_area,
        })?;

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
            "Priced domestic linehaul"
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
