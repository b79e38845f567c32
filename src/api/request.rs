//! Request types for the tariff rate engine API.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dispatch::ParamBag;
use crate::models::ServiceCode;

/// Request body for the `/price` endpoint.
///
/// # Example
///
/// ```
/// use tariff_engine::api::PriceRequest;
///
/// let json = r#"{
///     "payment_service_item_id": "0f4b9d62-1f7c-4c6e-9d0a-3a1f2b7c8d90",
///     "service_code": "MS",
///     "params": {
///         "ContractCode": {"type": "string", "value": "TEST"},
///         "ReferenceDate": {"type": "date", "value": "2024-06-15"}
///     }
/// }"#;
/// let request: PriceRequest = serde_json::from_str(json).unwrap();
/// assert_eq!(request.service_code.as_str(), "MS");
/// assert_eq!(request.params.len(), 2);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceRequest {
    /// The payment service item being priced; audit records are keyed by it.
    pub payment_service_item_id: Uuid,
    /// The tariff line item code.
    pub service_code: ServiceCode,
    /// Typed pricing parameters.
    #[serde(default)]
    pub params: ParamBag,
}
