//! Domestic packing (DPK), NTS packing (DNPK) and unpacking (DUPK).
//!
//! NTS packing reuses the DPK rate and multiplies in the contract's NTS
//! shipment type factor before the final rounding. PPM shipments under the
//! minimum weight are priced at the minimum and scaled down by
//! `weight / minimum`.

use chrono::NaiveDate;
use tracing::debug;

use crate::catalog::RateCatalog;
use crate::config::{PeakWindow, TariffConfig};
use crate::error::EngineResult;
use crate::models::{
    Cents, DisplayParam, DisplayParamKey, Market, Pound, PriceResult, ServiceCode,
    checked_product, codes, format_bool, format_decimal, format_escalation, format_rate,
};

use super::escalation::escalate_price;
use super::peak_period::is_peak_period;
use super::validation::{require_contract_code, require_schedule, require_supported_code};
use super::weight_floor::{MinimumWeightPolicy, WeightFloor};

/// Inputs to a pack or unpack price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackUnpackRequest<'a> {
    /// The contract code.
    pub contract_code: &'a str,
    /// The date rates and escalation are selected for.
    pub reference_date: NaiveDate,
    /// Billed weight.
    pub weight: Pound,
    /// Services schedule of the origin (pack) or destination (unpack).
    pub services_schedule: i64,
    /// Whether this is a PPM shipment.
    pub is_ppm: bool,
}

/// Prices one pack/unpack code.
#[derive(Debug, Clone)]
pub struct PackUnpackPricer {
    code: ServiceCode,
    floor: WeightFloor,
    peak_period: PeakWindow,
}

impl PackUnpackPricer {
    /// Creates a pricer for DPK, DNPK or DUPK.
    pub fn new(config: &TariffConfig, code: ServiceCode) -> EngineResult<Self> {
        require_supported_code(&code, &[codes::DPK, codes::DNPK, codes::DUPK], "pack/unpack")?;

        Ok(Self {
            code,
            floor: WeightFloor::new(
                config.minimum_domestic_weight,
                MinimumWeightPolicy::RejectBelowMinimum,
            )
            .with_ppm_policy(MinimumWeightPolicy::ProrateBelowMinimum),
            peak_period: config.peak_period,
        })
    }

    /// The service code this pricer handles.
    pub fn service_code(&self) -> &ServiceCode {
        &self.code
    }

    fn is_nts(&self) -> bool {
        self.code == codes::DNPK
    }

    /// The code the "other price" table is keyed by.
    fn rate_code(&self) -> ServiceCode {
        if self.is_nts() {
            ServiceCode::new(codes::DPK)
        } else {
            self.code.clone()
        }
    }

    /// Computes `cents × escalation × CWT [× NTS factor] [× proration]`,
    /// rounded once.
    pub fn price(
        &self,
        catalog: &dyn RateCatalog,
        request: &PackUnpackRequest<'_>,
    ) -> EngineResult<PriceResult> {
        require_contract_code(request.contract_code)?;
        require_schedule("ServicesSchedule", request.services_schedule)?;

        let billable = self.floor.resolve(request.weight, request.is_ppm)?;
        let is_peak = is_peak_period(request.reference_date, &self.peak_period);

        let rate = catalog.other_rate(
            request.contract_code,
            &self.rate_code(),
            request.services_schedule,
            is_peak,
        )?;
        let escalation = escalate_price(
            catalog,
            rate.contract_id,
            request.reference_date,
            rate.price.to_cents_decimal(),
        )?;

        let mut total = checked_product(&[escalation.escalated_price, billable.weight.to_cwt()])?;

        let mut display_params = vec![
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
        ];

        if self.is_nts() {
            let factor =
                catalog.shipment_type_factor(request.contract_code, &self.code, Market::Conus)?;
            total = checked_product(&[total, factor])?;
            display_params.push(DisplayParam::new(
                DisplayParamKey::NtsPackingFactor,
                format_decimal(factor, 2),
            ));
        }

        let price = Cents::round_from(billable.prorate(total)?)?;

        debug!(
            service_code = %self.code,
            contract_code = request.contract_code,
            schedule = request.services_schedule,
            is_peak,
            prorated = billable.proration.is_some(),
            price_cents = price.0,
            "Priced pack/unpack"
        );

        Ok(PriceResult::new(price, display_params))
    }
}
