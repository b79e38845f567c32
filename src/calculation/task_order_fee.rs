//! Task order flat fees: move management (MS) and counseling (CS).

use chrono::NaiveDate;
use tracing::debug;

use crate::catalog::RateCatalog;
use crate::error::EngineResult;
use crate::models::{Cents, PriceResult, ServiceCode, codes};

use super::validation::{require_contract_code, require_supported_code};

/// Inputs to a task order fee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskOrderFeeRequest<'a> {
    /// The contract code.
    pub contract_code: &'a str,
    /// Any date inside the contract year being billed.
    pub reference_date: NaiveDate,
}

/// Looks up a stored, already final task order fee.
#[derive(Debug, Clone)]
pub struct TaskOrderFeePricer {
    code: ServiceCode,
}

impl TaskOrderFeePricer {
    /// Creates a pricer for MS or CS.
    pub fn new(code: ServiceCode) -> EngineResult<Self> {
        require_supported_code(&code, &[codes::MS, codes::CS], "task order fee")?;
        Ok(Self { code })
    }

    /// Returns the stored fee. No display params are produced.
    pub fn price(
        &self,
        catalog: &dyn RateCatalog,
        request: &TaskOrderFeeRequest<'_>,
    ) -> EngineResult<PriceResult> {
        require_contract_code(request.contract_code)?;
        let fee = catalog.task_order_fee(request.contract_code, &self.code, request.reference_date)?;
        let price = Cents::round_from(fee.price.to_cents_decimal())?;

        debug!(
            service_code = %self.code,
            contract_code = request.contract_code,
            price_cents = price.0,
            "Looked up task order fee"
        );

        Ok(PriceResult::new(price, Vec::new()))
    }
}
