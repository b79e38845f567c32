//! Service area flat pricing: origin and destination price, first day SIT
//! and additional days SIT.
//!
//! Every code in this family bills sub-minimum weights at the minimum, for
//! PPM and non-PPM shipments alike.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use crate::catalog::RateCatalog;
use crate::config::{PeakWindow, TariffConfig};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    Cents, DisplayParam, DisplayParamKey, Pound, PriceResult, ServiceCode, checked_product, codes,
    format_bool, format_escalation, format_rate,
};

use super::escalation::escalate_price;
use super::peak_period::is_peak_period;
use super::validation::{require_contract_code, require_service_area, require_supported_code};
use super::weight_floor::{MinimumWeightPolicy, WeightFloor};

const FLAT_CODES: [&str; 4] = [codes::DOP, codes::DDP, codes::DOFSIT, codes::DDFSIT];
const ADDITIONAL_DAYS_CODES: [&str; 2] = [codes::DOASIT, codes::DDASIT];

/// Inputs to a service area price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceAreaRequest<'a> {
    /// The contract code.
    pub contract_code: &'a str,
    /// The date rates and escalation are selected for.
    pub reference_date: NaiveDate,
    /// Billed weight before the minimum is applied.
    pub weight: Pound,
    /// Origin or destination service area.
    pub service_area: &'a str,
    /// Whether this is a PPM shipment.
    pub is_ppm: bool,
    /// Days in storage; required for the additional days SIT codes.
    pub number_of_days_sit: Option<i64>,
}

/// Prices one service area code.
///
/// # Example
///
/// ```
/// use tariff_engine::calculation::ServiceAreaPricer;
/// use tariff_engine::config::TariffConfig;
/// use tariff_engine::models::ServiceCode;
///
/// let config = TariffConfig::default();
/// assert!(ServiceAreaPricer::new(&config, ServiceCode::new("DOFSIT")).is_ok());
/// assert!(ServiceAreaPricer::new(&config, ServiceCode::new("DLH")).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct ServiceAreaPricer {
    code: ServiceCode,
    floor: WeightFloor,
    peak_period: PeakWindow,
}

impl ServiceAreaPricer {
    /// Creates a pricer for `code`, which must belong to this family.
    pub fn new(config: &TariffConfig, code: ServiceCode) -> EngineResult<Self> {
        let supported: Vec<&str> = FLAT_CODES
            .iter()
            .chain(ADDITIONAL_DAYS_CODES.iter())
            .copied()
            .collect();
        require_supported_code(&code, &supported, "service area")?;

        Ok(Self {
            code,
            floor: WeightFloor::new(
                config.minimum_domestic_weight,
                MinimumWeightPolicy::SubstituteMinimum,
            ),
            peak_period: config.peak_period,
        })
    }

    /// The service code this pricer handles.
    pub fn service_code(&self) -> &ServiceCode {
        &self.code
    }

    /// Whether the price is multiplied by days in storage.
    pub fn is_additional_days(&self) -> bool {
        ADDITIONAL_DAYS_CODES.iter().any(|c| self.code == *c)
    }

    /// Computes `cents × escalation × CWT`, times the SIT day count for the
    /// additional days codes. The day count itself is not range checked.
    pub fn price(
        &self,
        catalog: &dyn RateCatalog,
        request: &ServiceAreaRequest<'_>,
    ) -> EngineResult<PriceResult> {
        require_contract_code(request.contract_code)?;
        require_service_area(request.service_area)?;

        let days = if self.is_additional_days() {
            let days = request
                .number_of_days_sit
                .ok_or_else(|| EngineError::validation("NumberDaysSIT", "is required"))?;
            Decimal::from(days)
        } else {
            Decimal::ONE
        };

        let billable = self.floor.resolve(request.weight, request.is_ppm)?;
        let is_peak = is_peak_period(request.reference_date, &self.peak_period);

        let rate = catalog.service_area_rate(
            request.contract_code,
            &self.code,
            request.service_area,
            is_peak,
        )?;
        let escalation = escalate_price(
            catalog,
            rate.contract_id,
            request.reference_date,
            rate.price.to_cents_decimal(),
        )?;

        let total = checked_product(&[escalation.escalated_price, billable.weight.to_cwt(), days])?;
        let price = Cents::round_from(total)?;

        debug!(
            service_code = %self.code,
            contract_code = request.contract_code,
            service_area = request.service_area,
            is_peak,
            weight = billable.weight.0,
            price_cents = price.0,
            "Priced service area item"
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
