//! Domestic crating (DCRT) and uncrating (DUCRT).
//!
//! Priced per cubic foot from the accessorial table. Volumes under the
//! minimum are rejected outright. A standalone crate may carry a price cap;
//! the uncapped total is always recorded for audit.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::catalog::RateCatalog;
use crate::config::TariffConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    Cents, CubicFeet, DisplayParam, DisplayParamKey, PriceResult, ServiceCode, checked_product,
    codes, format_cents, format_escalation, format_rate,
};

use super::escalation::escalate_price;
use super::validation::{require_contract_code, require_schedule, require_supported_code};

/// Inputs to a crating price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CratingRequest<'a> {
    /// The contract code.
    pub contract_code: &'a str,
    /// The date escalation is selected for.
    pub reference_date: NaiveDate,
    /// Billed crate volume.
    pub cubic_feet: CubicFeet,
    /// Services schedule of the origin or destination.
    pub services_schedule: i64,
    /// Whether the crate is ordered on its own.
    pub standalone_crate: bool,
    /// Price ceiling for a standalone crate.
    pub standalone_crate_cap: Cents,
}

/// Prices crating or uncrating.
#[derive(Debug, Clone)]
pub struct CratingPricer {
    code: ServiceCode,
    minimum_cubic_feet: CubicFeet,
}

impl CratingPricer {
    /// Creates a pricer for DCRT or DUCRT.
    pub fn new(config: &TariffConfig, code: ServiceCode) -> EngineResult<Self> {
        require_supported_code(&code, &[codes::DCRT, codes::DUCRT], "domestic crating")?;
        Ok(Self {
            code,
            minimum_cubic_feet: config.minimum_crate_cubic_feet,
        })
    }

    /// Computes `per unit cents × escalation × cubic feet`, rounded once,
    /// then applies the standalone cap.
    pub fn price(
        &self,
        catalog: &dyn RateCatalog,
        request: &CratingRequest<'_>,
    ) -> EngineResult<PriceResult> {
        require_contract_code(request.contract_code)?;
        if request.cubic_feet < self.minimum_cubic_feet {
            return Err(EngineError::validation(
                "CubicFeetBilled",
                format!(
                    "crate must be billed for a minimum of {} cubic feet",
                    self.minimum_cubic_feet
                ),
            ));
        }
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

        let uncapped = Cents::round_from(checked_product(&[
            escalation.escalated_price,
            request.cubic_feet.0,
        ])?)?;
        let price = if request.standalone_crate && uncapped > request.standalone_crate_cap {
            info!(
                service_code = %self.code,
                uncapped_cents = uncapped.0,
                cap_cents = request.standalone_crate_cap.0,
                "Standalone crate capped"
            );
            request.standalone_crate_cap
        } else {
            uncapped
        };

        debug!(
            service_code = %self.code,
            contract_code = request.contract_code,
            cubic_feet = %request.cubic_feet,
            price_cents = price.0,
            "Priced crating"
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
                DisplayParam::new(DisplayParamKey::UncappedRequestTotal, format_cents(uncapped)),
            ],
        ))
    }
}
