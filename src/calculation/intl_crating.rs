//! International crating (ICRT) and uncrating (IUCRT).
//!
//! Priced per cubic foot from the international accessorial table by
//! market. Only external crates carry a minimum volume. The standalone cap
//! works as it does domestically.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::catalog::RateCatalog;
use crate::config::TariffConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    Cents, CubicFeet, DisplayParam, DisplayParamKey, Market, PriceResult, ServiceCode,
    checked_product, codes, format_cents, format_escalation, format_rate,
};

use super::escalation::escalate_price;
use super::validation::{require_contract_code, require_supported_code};

/// Inputs to an international crating price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntlCratingRequest<'a> {
    /// The contract code.
    pub contract_code: &'a str,
    /// The date escalation is selected for.
    pub reference_date: NaiveDate,
    /// Billed crate volume.
    pub cubic_feet: CubicFeet,
    /// Market of the origin or destination.
    pub market: Market,
    /// Whether the crate is built for the outside of the shipment.
    pub external_crate: bool,
    /// Whether the crate is ordered on its own.
    pub standalone_crate: bool,
    /// Price ceiling for a standalone crate.
    pub standalone_crate_cap: Cents,
}

/// Prices international crating or uncrating.
#[derive(Debug, Clone)]
pub struct IntlCratingPricer {
    code: ServiceCode,
    minimum_external_cubic_feet: CubicFeet,
}

impl IntlCratingPricer {
    /// Creates a pricer for ICRT or IUCRT.
    pub fn new(config: &TariffConfig, code: ServiceCode) -> EngineResult<Self> {
        require_supported_code(
            &code,
            &[codes::ICRT, codes::IUCRT],
            "international crating/uncrating",
        )?;
        Ok(Self {
            code,
            minimum_external_cubic_feet: config.minimum_external_crate_cubic_feet,
        })
    }

    /// Computes `per unit cents × escalation × cubic feet`, rounded once,
    /// then applies the standalone cap.
    pub fn price(
        &self,
        catalog: &dyn RateCatalog,
        request: &IntlCratingRequest<'_>,
    ) -> EngineResult<PriceResult> {
        require_contract_code(request.contract_code)?;
        if request.external_crate && request.cubic_feet < self.minimum_external_cubic_feet {
            return Err(EngineError::validation(
                "CubicFeetBilled",
                format!(
                    "external crates must be billed for a minimum of {} cubic feet",
                    self.minimum_external_cubic_feet
                ),
            ));
        }

        let rate =
            catalog.intl_accessorial_rate(request.contract_code, &self.code, request.market)?;
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
            market = %request.market,
            cubic_feet = %request.cubic_feet,
            price_cents = price.0,
            "Priced international crating"
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
