//! Tariff line item codes.
//!
//! Service codes are opaque short strings. The engine does not validate them
//! against a closed vocabulary; it only knows which codes it has pricers for.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An opaque tariff line item code such as `DLH` or `DDASIT`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceCode(String);

impl ServiceCode {
    /// Creates a service code from any string.
    pub fn new(code: impl Into<String>) -> Self {
        ServiceCode(code.into())
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServiceCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ServiceCode {
    fn from(code: &str) -> Self {
        ServiceCode::new(code)
    }
}

impl PartialEq<str> for ServiceCode {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ServiceCode {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Service codes the engine ships pricers for.
pub mod codes {
    /// Domestic linehaul.
    pub const DLH: &str = "DLH";
    /// Domestic shorthaul.
    pub const DSH: &str = "DSH";
    /// Domestic origin price.
    pub const DOP: &str = "DOP";
    /// Domestic destination price.
    pub const DDP: &str = "DDP";
    /// Domestic origin first day SIT.
    pub const DOFSIT: &str = "DOFSIT";
    /// Domestic destination first day SIT.
    pub const DDFSIT: &str = "DDFSIT";
    /// Domestic origin additional days SIT.
    pub const DOASIT: &str = "DOASIT";
    /// Domestic destination additional days SIT.
    pub const DDASIT: &str = "DDASIT";
    /// Domestic packing.
    pub const DPK: &str = "DPK";
    /// Domestic NTS packing.
    pub const DNPK: &str = "DNPK";
    /// Domestic unpacking.
    pub const DUPK: &str = "DUPK";
    /// Domestic origin shuttle service.
    pub const DOSHUT: &str = "DOSHUT";
    /// Domestic destination shuttle service.
    pub const DDSHUT: &str = "DDSHUT";
    /// Domestic crating.
    pub const DCRT: &str = "DCRT";
    /// Domestic uncrating.
    pub const DUCRT: &str = "DUCRT";
    /// Domestic origin SIT pickup.
    pub const DOPSIT: &str = "DOPSIT";
    /// Domestic destination SIT delivery.
    pub const DDDSIT: &str = "DDDSIT";
    /// Fuel surcharge.
    pub const FSC: &str = "FSC";
    /// Domestic origin SIT fuel surcharge.
    pub const DOSFSC: &str = "DOSFSC";
    /// Domestic destination SIT fuel surcharge.
    pub const DDSFSC: &str = "DDSFSC";
    /// Port of embarkation fuel surcharge.
    pub const POEFSC: &str = "POEFSC";
    /// Port of debarkation fuel surcharge.
    pub const PODFSC: &str = "PODFSC";
    /// International origin SIT fuel surcharge.
    pub const IOSFSC: &str = "IOSFSC";
    /// International destination SIT fuel surcharge.
    pub const IDSFSC: &str = "IDSFSC";
    /// International origin shuttle service.
    pub const IOSHUT: &str = "IOSHUT";
    /// International destination shuttle service.
    pub const IDSHUT: &str = "IDSHUT";
    /// International HHG packing.
    pub const IHPK: &str = "IHPK";
    /// International HHG unpacking.
    pub const IHUPK: &str = "IHUPK";
    /// International UB packing.
    pub const IUBPK: &str = "IUBPK";
    /// International UB unpacking.
    pub const IUBUPK: &str = "IUBUPK";
    /// International origin first day SIT.
    pub const IOFSIT: &str = "IOFSIT";
    /// International destination first day SIT.
    pub const IDFSIT: &str = "IDFSIT";
    /// International origin additional days SIT.
    pub const IOASIT: &str = "IOASIT";
    /// International destination additional days SIT.
    pub const IDASIT: &str = "IDASIT";
    /// International crating.
    pub const ICRT: &str = "ICRT";
    /// International uncrating.
    pub const IUCRT: &str = "IUCRT";
    /// International origin SIT pickup.
    pub const IOPSIT: &str = "IOPSIT";
    /// International destination SIT delivery.
    pub const IDDSIT: &str = "IDDSIT";
    /// Move management services task order fee.
    pub const MS: &str = "MS";
    /// Counseling services task order fee.
    pub const CS: &str = "CS";
}
