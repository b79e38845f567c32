//! International origin SIT pickup (IOPSIT) and destination SIT delivery
//! (IDDSIT).
//!
//! The per-unit price comes with the request. Moves beyond the local SIT
//! threshold are also multiplied by distance.

use chrono::NaiveDate;
use tracing::debug;

use crate::catalog::RateCatalog;
use crate::config::{PeakWindow, TariffConfig};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    Cents, DisplayParam, DisplayParamKey, Miles, Pound, PriceResult, ServiceCode,
    checked_product, codes, format_bool, format_cents, format_escalation,
};

use super::escalation::escalate_price;
use super::peak_period::is_peak_period;
use super::validation::{require_contract_code, require_supported_code};
use super::weight_floor::{MinimumWeightPolicy, WeightFloor};

/// Inputs to an international SIT pickup or delivery price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntlPickupDeliverySitRequest<'a> {
    /// The contract code.
    pub contract_code: &'a str,
    /// The date peak and escalation are selected for.
    pub reference_date: NaiveDate,
    /// Billed weight; must meet the international minimum.
    pub weight: Pound,
    /// Base price per CWT (per CWT-mile past the threshold).
    pub per_unit_cents: Cents,
    /// Distance between the SIT facility and the address.
    pub distance: Miles,
}

/// Prices international SIT pickup or delivery.
#[derive(Debug, Clone)]
pub struct IntlPickupDeliverySitPricer {
    code: ServiceCode,
    floor: WeightFloor,
    local_threshold: Miles,
    peak_period: PeakWindow,
}

impl IntlPickupDeliverySitPricer {
    /// Creates a pricer for IOPSIT or IDDSIT.
    pub fn new(config: &TariffConfig, code: ServiceCode) -> EngineResult<Self> {
        require_supported_code(
            &code,
            &[codes::IOPSIT, codes::IDDSIT],
            "international SIT pickup/delivery",
        )?;
        Ok(Self {
            code,
            floor: WeightFloor::new(
                config.minimum_international_weight,
                MinimumWeightPolicy::RejectBelowMinimum,
            ),
            local_threshold: config.sit_local_distance_threshold,
            peak_period: config.peak_period,
        })
    }

    /// Computes `per unit cents × escalation × CWT`, also `× miles` when the
    /// distance exceeds the local threshold.
    pub fn price(
        &self,
        catalog: &dyn RateCatalog,
        request: &IntlPickupDeliverySitRequest<'_>,
    ) -> EngineResult<PriceResult> {
        require_contract_code(request.contract_code)?;
        let billable = self.floor.resolve(request.weight, false)?;
        if request.per_unit_cents.0 == 0 {
            return Err(EngineError::validation("PerUnitCents", "is required"));
        }
        if request.distance.0 <= 0 {
            return Err(EngineError::validation("Distance", "is required"));
        }

        let is_peak = is_peak_period(request.reference_date, &self.peak_period);
        let contract_id = catalog.contract_by_code(request.contract_code)?;
        let escalation = escalate_price(
            catalog,
            contract_id,
            request.reference_date,
            request.per_unit_cents.to_decimal(),
        )?;

        let beyond_local = request.distance > self.local_threshold;
        let total = if beyond_local {
            checked_product(&[
                escalation.escalated_price,
                billable.weight.to_cwt(),
                request.distance.to_decimal(),
            ])?
        } else {
            checked_product(&[escalation.escalated_price, billable.weight.to_cwt()])?
        };
        let price = Cents::round_from(total)?;

        debug!(
            service_code = %self.code,
            contract_code = request.contract_code,
            distance = request.distance.0,
            beyond_local,
            price_cents = price.0,
            "Priced international SIT pickup/delivery"
        );

        Ok(PriceResult::new(
            price,
            vec![
                DisplayParam::new(
                    DisplayParamKey::PriceRateOrFactor,
                    format_cents(request.per_unit_cents),
                ),
                DisplayParam::new(
                    DisplayParamKey::ContractYearName,
                    escalation.contract_year.name.clone(),
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
