//! Contract year escalation.
//!
//! Base prices in the tariff tables are quoted for the first contract year.
//! Later years apply a compounded escalation factor. The escalated value is
//! left unrounded: callers multiply by weight, distance or days first and
//! round exactly once.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::catalog::RateCatalog;
use crate::error::EngineResult;
use crate::models::{ContractYear, checked_product};

/// The escalated (unrounded) price and the contract year that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EscalationResult {
    /// Base price times the compounded escalation.
    pub escalated_price: Decimal,
    /// The contract year covering the reference date.
    pub contract_year: ContractYear,
}

/// Escalates a base price to the contract year covering `reference_date`.
///
/// # Returns
///
/// The unrounded escalated price, or the catalog's lookup failure if zero
/// or more than one contract year covers the date. A product too large for
/// a decimal is a calculation error.
pub fn escalate_price(
    catalog: &dyn RateCatalog,
    contract_id: Uuid,
    reference_date: NaiveDate,
    base_price: Decimal,
) -> EngineResult<EscalationResult> {
    let contract_year = catalog.contract_year(contract_id, reference_date)?;
    let escalated_price = checked_product(&[base_price, contract_year.escalation_compounded])?;

    Ok(EscalationResult {
        escalated_price,
        contract_year,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::test_support::{
        TEST_ESCALATION, catalog, contract_id, date, dec, peak_date,
    };
    use crate::error::{EngineError, ErrorKind};

    #[test]
    fn test_escalation_multiplies_by_compounded_factor() {
        let catalog = catalog();
        let result = escalate_price(&catalog, contract_id(), peak_date(), dec("5")).unwrap();
        assert_eq!(result.escalated_price, dec("5.20355"));
        assert_eq!(result.contract_year.escalation_compounded, dec(TEST_ESCALATION));
        assert_eq!(result.contract_year.name, "Base Period Year 1");
    }

    #[test]
    fn test_escalation_never_rounds() {
        let catalog = catalog();
        let result = escalate_price(&catalog, contract_id(), peak_date(), dec("1855")).unwrap();
        assert_eq!(result.escalated_price, dec("1930.51705"));
    }

    #[test]
    fn test_date_outside_contract_years_is_not_found() {
        let catalog = catalog();
        let err = escalate_price(&catalog, contract_id(), date(2030, 1, 1), dec("5")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(matches!(err, EngineError::NotFound { .. }));
    }

    #[test]
    fn test_oversized_base_price_is_calculation_error() {
        let catalog = catalog();
        let err = escalate_price(&catalog, contract_id(), peak_date(), Decimal::MAX).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Calculation);
    }

    #[test]
    fn test_unknown_contract_is_not_found() {
        let catalog = catalog();
        let err = escalate_price(&catalog, Uuid::nil(), peak_date(), dec("5")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
