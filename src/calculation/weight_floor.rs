//! Minimum billable weight policies.
//!
//! Tariff families disagree on what happens below the minimum weight: some
//! reject the shipment, some bill it as if it weighed the minimum, and PPM
//! packing shrinks the minimum-weight price proportionally. Each pricer
//! declares its policy once as a [`WeightFloor`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{Pound, checked_product};

/// What to do with a weight below the minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MinimumWeightPolicy {
    /// Fail validation.
    RejectBelowMinimum,
    /// Price as if the shipment weighed exactly the minimum.
    SubstituteMinimum,
    /// Price at the minimum, then scale by `weight / minimum`.
    ProrateBelowMinimum,
    /// Use the raw weight, however small.
    NoMinimum,
}

/// The weight a pricer multiplies by, plus any proration still to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BillableWeight {
    /// The weight to price at.
    pub weight: Pound,
    /// `weight / minimum` when the price must be scaled down afterwards.
    pub proration: Option<Decimal>,
}

impl BillableWeight {
    /// Applies the proration, if any, to an unrounded amount.
    pub fn prorate(&self, amount: Decimal) -> EngineResult<Decimal> {
        match self.proration {
            Some(factor) => checked_product(&[amount, factor]),
            None => Ok(amount),
        }
    }
}

/// A minimum weight with separate policies for standard and PPM shipments.
///
/// # Example
///
/// ```
/// use tariff_engine::calculation::{MinimumWeightPolicy, WeightFloor};
/// use tariff_engine::models::Pound;
///
/// let floor = WeightFloor::new(Pound(500), MinimumWeightPolicy::RejectBelowMinimum)
///     .with_ppm_policy(MinimumWeightPolicy::SubstituteMinimum);
///
/// assert!(floor.resolve(Pound(400), false).is_err());
/// assert_eq!(floor.resolve(Pound(400), true).unwrap().weight, Pound(500));
/// assert_eq!(floor.resolve(Pound(4000), false).unwrap().weight, Pound(4000));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightFloor {
    /// The minimum billable weight.
    pub minimum: Pound,
    /// Policy for non-PPM shipments.
    pub standard: MinimumWeightPolicy,
    /// Policy for PPM shipments.
    pub ppm: MinimumWeightPolicy,
}

impl WeightFloor {
    /// Creates a floor whose PPM policy matches the standard policy.
    pub fn new(minimum: Pound, policy: MinimumWeightPolicy) -> Self {
        Self {
            minimum,
            standard: policy,
            ppm: policy,
        }
    }

    /// Overrides the policy used for PPM shipments.
    pub fn with_ppm_policy(mut self, policy: MinimumWeightPolicy) -> Self {
        self.ppm = policy;
        self
    }

    /// The policy that applies to a shipment.
    pub fn policy_for(&self, is_ppm: bool) -> MinimumWeightPolicy {
        if is_ppm { self.ppm } else { self.standard }
    }

    /// Resolves a raw weight into the weight to bill.
    pub fn resolve(&self, weight: Pound, is_ppm: bool) -> EngineResult<BillableWeight> {
        if weight.0 < 0 {
            return Err(EngineError::validation("Weight", "must not be negative"));
        }

        if weight >= self.minimum {
            return Ok(BillableWeight {
                weight,
                proration: None,
            });
        }

        match self.policy_for(is_ppm) {
            MinimumWeightPolicy::RejectBelowMinimum => Err(EngineError::validation(
                "Weight",
                format!("must be a minimum of {}", self.minimum),
            )),
            MinimumWeightPolicy::SubstituteMinimum => Ok(BillableWeight {
                weight: self.minimum,
                proration: None,
            }),
            MinimumWeightPolicy::ProrateBelowMinimum => Ok(BillableWeight {
                weight: self.minimum,
                proration: Some(weight.to_decimal() / self.minimum.to_decimal()),
            }),
            MinimumWeightPolicy::NoMinimum => Ok(BillableWeight {
                weight,
                proration: None,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn floor(policy: MinimumWeightPolicy) -> WeightFloor {
        WeightFloor::new(Pound(500), policy)
    }

    #[test]
    fn test_reject_below_minimum() {
        let err = floor(MinimumWeightPolicy::RejectBelowMinimum)
            .resolve(Pound(499), false)
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid Weight: must be a minimum of 500");
    }

    #[test]
    fn test_reject_accepts_exact_minimum() {
        let billable = floor(MinimumWeightPolicy::RejectBelowMinimum)
            .resolve(Pound(500), false)
            .unwrap();
        assert_eq!(billable.weight, Pound(500));
        assert_eq!(billable.proration, None);
    }

    #[test]
    fn test_substitute_minimum() {
        let billable = floor(MinimumWeightPolicy::SubstituteMinimum)
            .resolve(Pound(250), false)
            .unwrap();
        assert_eq!(billable.weight, Pound(500));
        assert_eq!(billable.proration, None);
    }

    #[test]
    fn test_prorate_below_minimum() {
        let billable = floor(MinimumWeightPolicy::ProrateBelowMinimum)
            .resolve(Pound(250), false)
            .unwrap();
        assert_eq!(billable.weight, Pound(500));
        assert_eq!(billable.proration, Some(Decimal::new(5, 1)));
        assert_eq!(billable.prorate(Decimal::from(1000)).unwrap(), Decimal::from(500));
    }

    #[test]
    fn test_no_minimum_keeps_raw_weight() {
        let billable = floor(MinimumWeightPolicy::NoMinimum)
            .resolve(Pound(1), false)
            .unwrap();
        assert_eq!(billable.weight, Pound(1));
    }

    #[test]
    fn test_ppm_policy_is_separate() {
        let floor = floor(MinimumWeightPolicy::RejectBelowMinimum)
            .with_ppm_policy(MinimumWeightPolicy::ProrateBelowMinimum);
        assert!(floor.resolve(Pound(100), false).is_err());
        assert!(floor.resolve(Pound(100), true).unwrap().proration.is_some());
    }

    #[test]
    fn test_negative_weight_always_rejected() {
        let err = floor(MinimumWeightPolicy::NoMinimum)
            .resolve(Pound(-1), true)
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid Weight: must not be negative");
    }

    proptest! {
        #[test]
        fn prop_substitution_is_idempotent_below_minimum(weight in 0i64..500) {
            let floor = floor(MinimumWeightPolicy::SubstituteMinimum);
            let below = floor.resolve(Pound(weight), false).unwrap();
            let at_minimum = floor.resolve(Pound(500), false).unwrap();
            prop_assert_eq!(below, at_minimum);
        }

        #[test]
        fn prop_weights_at_or_above_minimum_pass_through(weight in 500i64..100_000) {
            for policy in [
                MinimumWeightPolicy::RejectBelowMinimum,
                MinimumWeightPolicy::SubstituteMinimum,
                MinimumWeightPolicy::ProrateBelowMinimum,
                MinimumWeightPolicy::NoMinimum,
            ] {
                let billable = floor(policy).resolve(Pound(weight), false).unwrap();
                prop_assert_eq!(billable.weight, Pound(weight));
                prop_assert_eq!(billable.proration, None);
            }
        }
    }
}
