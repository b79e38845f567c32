//! Domestic origin (DOSHUT) and destination (DDSHUT) shuttle service.

use chrono::NaiveDate;
use tracing::debug;

use crate::catalog::RateCatalog;
use crate::config::TariffConfig;
use crate::error::EngineResult;
use crate::models::{
    Cents, DisplayParam, DisplayParamKey, Pound, PriceResult, ServiceCode, checked_product,
    codes, format_escalation, format_rate,
};

use super::escalation::escalate_price;
use super::validation::{require_contract_code, require_schedule, require_supported_code};
use super::weight_floor::{MinimumWeightPolicy, WeightFloor};

/// Inputs to a shuttling price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShuttlingRequest<'a> {
    /// The contract code.
    pub contract_code: &'a str,
    /// The date escalation is selected for.
    pub reference_date: NaiveDate,
    /// Billed weight; must meet the minimum.
    pub weight: Pound,
    /// Services schedule of the origin or destination.
    pub services_schedule: i64,
}

/// Prices shuttle service from the accessorial table. No peak distinction.
#[derive(Debug, Clone)]
pub struct ShuttlingPricer {
    code: ServiceCode,
    floor: WeightFloor,
}

impl ShuttlingPricer {
    /// Creates a pricer for DOSHUT or DDSHUT.
    pub fn new(config: &TariffConfig, code: ServiceCode) -> EngineResult<Self> {
        require_supported_code(&code, &[codes::DOSHUT, codes::DDSHUT], "domestic shuttling")?;
        Ok(Self {
            code,
            floor: WeightFloor::new(
                config.minimum_domestic_weight,
                MinimumWeightPolicy::RejectBelowMinimum,
            ),
        })
    }

    /// Computes `per unit cents × escalation × CWT`, rounded once.
    pub fn price(
        &self,
        catalog: &dyn RateCatalog,
        request: &ShuttlingRequest<'_>,
    ) -> EngineResult<PriceResult> {
        require_contract_code(request.contract_code)?;
        let billable = self.floor.resolve(request.weight, false)?;
        require_schedule("ServicesSchedule", request.services_schedule)?;

        let rate = catalog.accessorial_rate(
            request.contract_code,
            &self.code,
            request.services_schedule,
        )?;
        let escalation = escalate_price(
            catalog,
            rate.contract_id,
            request.reference_date,
            rate.price.to_cents_decimal(),
        )?;

        let price = Cents::round_from(checked_product(&[
            escalation.escalated_price,
            billable.weight.to_cwt(),
        ])?)?;

        debug!(
            service_code = %self.code,
            contract_code = request.contract_code,
            schedule = request.services_schedule,
            price_cents = price.0,
            "Priced shuttling"
        );

        Ok(PriceResult::new(
            price,
            vec![
                DisplayParam::new(DisplayParamKey::PriceRateOrFactor, format_rate(rate.price)),
                DisplayParam::new(
                    DisplayParamKey::ContractYearName,
                    escalation.contract_year.name.clone(),
                ),
                DisplayParam::new(
                    DisplayParamKey::EscalationCompounded,
                    format_escalation(escalation.contract_year.escalation_compounded),
                ),
            ],
        ))
    }
}
