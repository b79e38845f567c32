//! Input checks shared by the pricers.

use crate::error::{EngineError, EngineResult};
use crate::models::ServiceCode;

pub(crate) fn require_contract_code(contract_code: &str) -> EngineResult<()> {
    if contract_code.trim().is_empty() {
        return Err(EngineError::validation("ContractCode", "is required"));
    }
    Ok(())
}

pub(crate) fn require_service_area(service_area: &str) -> EngineResult<()> {
    if service_area.trim().is_empty() {
        return Err(EngineError::validation("ServiceArea", "is required"));
    }
    Ok(())
}

/// Schedules are 1-based; zero means the caller never supplied one.
pub(crate) fn require_schedule(field: &str, schedule: i64) -> EngineResult<()> {
    if schedule <= 0 {
        return Err(EngineError::validation(field, "is required"));
    }
    Ok(())
}

/// Fails unless `code` is one of `supported`.
pub(crate) fn require_supported_code(
    code: &ServiceCode,
    supported: &[&str],
    family: &str,
) -> EngineResult<()> {
    if supported.iter().any(|candidate| code == candidate) {
        Ok(())
    } else {
        Err(EngineError::validation(
            "ServiceCode",
            format!("unsupported {} code of {}", family, code),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_contract_code_rejected() {
        let err = require_contract_code("  ").unwrap_err();
        assert_eq!(err.to_string(), "Invalid ContractCode: is required");
        assert!(require_contract_code("TEST").is_ok());
    }

    #[test]
    fn test_zero_schedule_rejected() {
        assert!(require_schedule("ServicesSchedule", 0).is_err());
        assert!(require_schedule("ServicesSchedule", 3).is_ok());
    }

    #[test]
    fn test_unsupported_code_message() {
        let err = require_supported_code(&ServiceCode::new("CS"), &["DPK"], "pack/unpack")
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid ServiceCode: unsupported pack/unpack code of CS"
        );
    }
}
