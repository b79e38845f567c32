//! Display parameters and the pricing result.
//!
//! Display parameters are a human-readable record of the inputs that
//! produced a price. They are written to the audit sink and never parsed
//! back by the engine.

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::{Cents, Millicents, RatePrice};

/// The key of a display parameter. Keys are unique within one pricing call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DisplayParamKey {
    /// Name of the contract year the escalation came from.
    ContractYearName,
    /// The base rate (or factor) read from the catalog.
    PriceRateOrFactor,
    /// Whether the peak rate was used.
    IsPeak,
    /// The compounded escalation factor applied.
    EscalationCompounded,
    /// NTS packing factor applied on top of the packing price.
    #[serde(rename = "NTSPackingFactor")]
    NtsPackingFactor,
    /// Fuel price difference from the baseline, in cents.
    #[serde(rename = "FSCPriceDifferenceInCents")]
    FscPriceDifferenceInCents,
    /// Weight-based distance multiplier times distance.
    #[serde(rename = "FSCMultiplier")]
    FscMultiplier,
    /// Crating total before the standalone crate cap.
    UncappedRequestTotal,
}

impl DisplayParamKey {
    /// The canonical key name.
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayParamKey::ContractYearName => "ContractYearName",
            DisplayParamKey::PriceRateOrFactor => "PriceRateOrFactor",
            DisplayParamKey::IsPeak => "IsPeak",
            DisplayParamKey::EscalationCompounded => "EscalationCompounded",
            DisplayParamKey::NtsPackingFactor => "NTSPackingFactor",
            DisplayParamKey::FscPriceDifferenceInCents => "FSCPriceDifferenceInCents",
            DisplayParamKey::FscMultiplier => "FSCMultiplier",
            DisplayParamKey::UncappedRequestTotal => "UncappedRequestTotal",
        }
    }
}

impl fmt::Display for DisplayParamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single audit key/value pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayParam {
    /// The parameter key.
    pub key: DisplayParamKey,
    /// The rendered value.
    pub value: String,
}

impl DisplayParam {
    /// Creates a display parameter.
    pub fn new(key: DisplayParamKey, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

/// The outcome of one pricing call.
///
/// # Example
///
/// ```
/// use tariff_engine::models::{Cents, PriceResult};
///
/// let result = PriceResult::new(Cents(1500), vec![]);
/// assert_eq!(result.price, Cents(1500));
/// assert!(result.display_params.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceResult {
    /// The final price, rounded once.
    pub price: Cents,
    /// The ordered audit parameters that explain the price.
    pub display_params: Vec<DisplayParam>,
}

impl PriceResult {
    /// Creates a pricing result.
    pub fn new(price: Cents, display_params: Vec<DisplayParam>) -> Self {
        Self {
            price,
            display_params,
        }
    }

    /// Looks up a display parameter value by key.
    pub fn param(&self, key: DisplayParamKey) -> Option<&str> {
        self.display_params
            .iter()
            .find(|p| p.key == key)
            .map(|p| p.value.as_str())
    }
}

/// Renders a decimal with exactly `places` fractional digits.
pub fn format_decimal(value: Decimal, places: u32) -> String {
    let rounded = value.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.*}", places as usize, rounded)
}

/// Renders cents as dollars, e.g. `Cents(5000)` as `"50.00"`.
pub fn format_cents(cents: Cents) -> String {
    format_decimal(cents.to_dollars(), 2)
}

/// Renders millicents as dollars with three places, e.g. `Millicents(5000)` as `"0.050"`.
pub fn format_millicents(millicents: Millicents) -> String {
    format_decimal(millicents.to_dollars(), 3)
}

/// Renders a catalog price in the precision of its table.
pub fn format_rate(price: RatePrice) -> String {
    match price {
        RatePrice::Cents(cents) | RatePrice::PerUnitCents(cents) => format_cents(cents),
        RatePrice::Millicents(millicents) => format_millicents(millicents),
    }
}

/// Renders an escalation factor with five places.
pub fn format_escalation(escalation: Decimal) -> String {
    format_decimal(escalation, 5)
}

/// Renders a flag as `true` or `false`.
pub fn format_bool(flag: bool) -> String {
    flag.to_string()
}
