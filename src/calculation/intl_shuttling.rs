//! International origin (IOSHUT) and destination (IDSHUT) shuttle service.

use chrono::NaiveDate;
use tracing::debug;

use crate::catalog::RateCatalog;
use crate::config::TariffConfig;
use crate::error::EngineResult;
use crate::models::{
    Cents, DisplayParam, DisplayParamKey, Market, Pound, PriceResult, ServiceCode,
    checked_product, codes, format_escalation, format_rate,
};

use super::escalation::escalate_price;
use super::validation::{require_contract_code, require_supported_code};
use super::weight_floor::{MinimumWeightPolicy, WeightFloor};

/// Inputs to an international shuttling price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntlShuttlingRequest<'a> {
    /// The contract code.
    pub contract_code: &'a str,
    /// The date escalation is selected for.
    pub reference_date: NaiveDate,
    /// Billed weight; must meet the international minimum.
    pub weight: Pound,
    /// Market of the origin or destination.
    pub market: Market,
}

/// Prices international shuttle service from the international accessorial
/// table, keyed by market instead of schedule.
#[derive(Debug, Clone)]
pub struct IntlShuttlingPricer {
    code: ServiceCode,
    floor: WeightFloor,
}

impl IntlShuttlingPricer {
    /// Creates a pricer for IOSHUT or IDSHUT.
    pub fn new(config: &TariffConfig, code: ServiceCode) -> EngineResult<Self> {
        require_supported_code(
            &code,
            &[codes::IOSHUT, codes::IDSHUT],
            "international shuttling",
        )?;
        Ok(Self {
            code,
            floor: WeightFloor::new(
                config.minimum_international_weight,
                MinimumWeightPolicy::RejectBelowMinimum,
            ),
        })
    }

    /// Computes `per unit cents × escalation × CWT`, rounded once.
    pub fn price(
        &self,
        catalog: &dyn RateCatalog,
        request: &IntlShuttlingRequest<'_>,
    ) -> EngineResult<PriceResult> {
        require_contract_code(request.contract_code)?;
        let billable = self.floor.resolve(request.weight, false)?;

        let rate =
            catalog.intl_accessorial_rate(request.contract_code, &self.code, request.market)?;
        let escalation = escalate_price(
            catalog,
            rate.contract_id,
            request.reference_date,
            rate.price.to_cents_decimal(),
        )?;

        let total = checked_product(&[escalation.escalated_price, billable.weight.to_cwt()])?;
        let price = Cents::round_from(total)?;

        debug!(
            service_code = %self.code,
            contract_code = request.contract_code,
            market = %request.market,
            price_cents = price.0,
            "Priced international shuttling"
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
