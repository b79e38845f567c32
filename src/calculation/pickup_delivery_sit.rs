//! Domestic SIT pickup (DOPSIT) and delivery (DDDSIT).
//!
//! Classifies the move from the two postal codes and distance, then either
//! delegates to shorthaul or linehaul or prices from the SIT schedule row
//! of the "other price" table.

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
use super::linehaul::{LinehaulPricer, LinehaulRequest};
use super::peak_period::is_peak_period;
use super::shorthaul::{ShorthaulPricer, ShorthaulRequest};
use super::validation::{require_contract_code, require_schedule, require_supported_code};
use super::weight_floor::{MinimumWeightPolicy, WeightFloor};

/// How a SIT pickup or delivery is priced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SitMoveKind {
    /// Both postal codes share a 3-digit prefix.
    SameZip3,
    /// Different prefixes and beyond the local distance threshold.
    LongDistance,
    /// Different prefixes within the local distance threshold.
    Local,
}

/// Inputs to a SIT pickup or delivery price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickupDeliverySitRequest<'a> {
    /// The contract code.
    pub contract_code: &'a str,
    /// The date rates and escalation are selected for.
    pub reference_date: NaiveDate,
    /// Billed weight; must meet the minimum.
    pub weight: Pound,
    /// Service area used by the shorthaul and linehaul cases.
    pub service_area: &'a str,
    /// SIT schedule used by the local case.
    pub sit_schedule: i64,
    /// The original postal code (SIT facility side).
    pub zip_original: &'a str,
    /// The actual pickup or final delivery postal code.
    pub zip_actual: &'a str,
    /// Distance between the two postal codes.
    pub distance: Miles,
}

/// Prices DOPSIT or DDDSIT.
#[derive(Debug, Clone)]
pub struct PickupDeliverySitPricer {
    code: ServiceCode,
    floor: WeightFloor,
    local_distance_threshold: Miles,
    peak_period: PeakWindow,
    shorthaul: ShorthaulPricer,
    linehaul: LinehaulPricer,
}

impl PickupDeliverySitPricer {
    /// Creates a pricer for DOPSIT or DDDSIT.
    pub fn new(config: &TariffConfig, code: ServiceCode) -> EngineResult<Self> {
        require_supported_code(
            &code,
            &[codes::DOPSIT, codes::DDDSIT],
            "pickup/delivery SIT",
        )?;
        Ok(Self {
            code,
            floor: WeightFloor::new(
                config.minimum_domestic_weight,
                MinimumWeightPolicy::RejectBelowMinimum,
            ),
            local_distance_threshold: config.sit_local_distance_threshold,
            peak_period: config.peak_period,
            shorthaul: ShorthaulPricer::new(config),
            linehaul: LinehaulPricer::new(config),
        })
    }

    fn zip_fields(&self) -> (&'static str, &'static str) {
        if self.code == codes::DOPSIT {
            ("ZipPickupAddress", "ZipSITOriginHHGActualAddress")
        } else {
            ("ZipDestAddress", "ZipSITDestHHGFinalAddress")
        }
    }

    /// Decides which pricing path a request takes.
    pub fn classify(&self, request: &PickupDeliverySitRequest<'_>) -> EngineResult<SitMoveKind> {
        let (original_field, actual_field) = self.zip_fields();
        let original = zip3(original_field, request.zip_original)?;
        let actual = zip3(actual_field, request.zip_actual)?;

        Ok(if original == actual {
            SitMoveKind::SameZip3
        } else if request.distance > self.local_distance_threshold {
            SitMoveKind::LongDistance
        } else {
            SitMoveKind::Local
        })
    }

    /// Prices the request along the path [`classify`](Self::classify) picks.
    pub fn price(
        &self,
        catalog: &dyn RateCatalog,
        request: &PickupDeliverySitRequest<'_>,
    ) -> EngineResult<PriceResult> {
        require_contract_code(request.contract_code)?;
        let billable = self.floor.resolve(request.weight, false)?;
        let kind = self.classify(request)?;

        debug!(
            service_code = %self.code,
            contract_code = request.contract_code,
            kind = ?kind,
            distance = request.distance.0,
            "Classified SIT pickup/delivery"
        );

        match kind {
            SitMoveKind::SameZip3 => self.shorthaul.price(
                catalog,
                &ShorthaulRequest {
                    contract_code: request.contract_code,
                    reference_date: request.reference_date,
                    distance: request.distance,
                    weight: billable.weight,
                    service_area: request.service_area,
                    is_ppm: false,
                },
            ),
            SitMoveKind::LongDistance => self.linehaul.price(
                catalog,
                &LinehaulRequest {
                    contract_code: request.contract_code,
                    reference_date: request.reference_date,
                    distance: request.distance,
                    weight: billable.weight,
                    service_area: request.service_area,
                    is_ppm: false,
                },
            ),
            SitMoveKind::Local => self.price_local(catalog, request, billable.weight),
        }
    }

    fn price_local(
        &self,
        catalog: &dyn RateCatalog,
        request: &PickupDeliverySitRequest<'_>,
        weight: Pound,
    ) -> EngineResult<PriceResult> {
        require_schedule("SITSchedule", request.sit_schedule)?;
        let is_peak = is_peak_period(request.reference_date, &self.peak_period);

        let rate = catalog.other_rate(
            request.contract_code,
            &self.code,
            request.sit_schedule,
            is_peak,
        )?;
        let escalation = escalate_price(
            catalog,
            rate.contract_id,
            request.reference_date,
            rate.price.to_cents_decimal(),
        )?;
        let total = checked_product(&[escalation.escalated_price, weight.to_cwt()])?;
        let price = Cents::round_from(total)?;

        Ok(PriceResult::new(
            price,
            vec![
                DisplayParam::new(DisplayParamKey::PriceRateOrFactor, format_rate(rate.price)),
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

/// The 3-digit prefix of a postal code of at least five characters.
fn zip3<'a>(field: &str, zip: &'a str) -> EngineResult<&'a str> {
    let invalid = || EngineError::validation(field, format!("invalid postal code of {}", zip));
    if zip.len() < 5 {
        return Err(invalid());
    }
    zip.get(..3).ok_or_else(invalid)
}
