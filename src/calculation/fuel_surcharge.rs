//! Fuel surcharges.
//!
//! No rate table is involved. The surcharge is
//! `(eia fuel price − base fuel price) / 1000 × (multiplier × miles) × 100`
//! in cents, rounded once. A fuel price below the baseline yields a
//! negative surcharge, which is returned as is.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::TariffConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    Cents, DisplayParam, DisplayParamKey, Miles, Millicents, Pound, PriceResult, ServiceCode,
    checked_product, codes, format_decimal,
};

use super::validation::require_supported_code;
use super::weight_floor::{MinimumWeightPolicy, WeightFloor};

/// Shipment types with distinct international minimum weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShipmentType {
    /// Household goods.
    #[serde(rename = "HHG")]
    HouseholdGoods,
    /// Unaccompanied baggage.
    #[serde(rename = "UB")]
    UnaccompaniedBaggage,
}

impl ShipmentType {
    /// Parses the `HHG`/`UB` tag used in parameter bags.
    pub fn parse(value: &str) -> EngineResult<Self> {
        match value {
            "HHG" => Ok(ShipmentType::HouseholdGoods),
            "UB" => Ok(ShipmentType::UnaccompaniedBaggage),
            other => Err(EngineError::validation(
                "ShipmentType",
                format!("unsupported shipment type of {}", other),
            )),
        }
    }
}

impl fmt::Display for ShipmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShipmentType::HouseholdGoods => write!(f, "HHG"),
            ShipmentType::UnaccompaniedBaggage => write!(f, "UB"),
        }
    }
}

/// Inputs to a fuel surcharge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuelSurchargeRequest {
    /// Actual pickup date; the EIA price is already resolved for it.
    pub actual_pickup_date: NaiveDate,
    /// Distance the surcharge covers.
    pub distance: Miles,
    /// Billed weight.
    pub weight: Pound,
    /// Weight-based distance multiplier.
    pub weight_based_distance_multiplier: Decimal,
    /// EIA diesel price for the pickup week.
    pub eia_fuel_price: Millicents,
    /// Whether this is a PPM shipment.
    pub is_ppm: bool,
}

/// Shared arithmetic for every fuel surcharge code.
fn compute_surcharge(
    base_fuel_price: Millicents,
    request: &FuelSurchargeRequest,
) -> EngineResult<PriceResult> {
    if request.weight_based_distance_multiplier.is_zero() {
        return Err(EngineError::validation(
            "WeightBasedDistanceMultiplier",
            "is required",
        ));
    }
    if request.eia_fuel_price.0 == 0 {
        return Err(EngineError::validation("EIAFuelPrice", "is required"));
    }

    let price_difference = request
        .eia_fuel_price
        .checked_sub(base_fuel_price)?
        .to_cents_decimal();
    let multiplier = checked_product(&[
        request.weight_based_distance_multiplier,
        request.distance.to_decimal(),
    ])?;
    let price = Cents::round_from(checked_product(&[
        multiplier,
        price_difference,
        Decimal::ONE_HUNDRED,
    ])?)?;

    Ok(PriceResult::new(
        price,
        vec![
            DisplayParam::new(
                DisplayParamKey::FscPriceDifferenceInCents,
                format_decimal(price_difference, 1),
            ),
            DisplayParam::new(DisplayParamKey::FscMultiplier, format_decimal(multiplier, 7)),
        ],
    ))
}

/// Prices the domestic fuel surcharges FSC, DOSFSC and DDSFSC.
///
/// Non-PPM shipments must meet the minimum weight and travel a positive
/// distance. PPM shipments use their raw weight and may price zero miles.
///
/// # Example
///
/// ```
/// use tariff_engine::calculation::{FuelSurchargePricer, FuelSurchargeRequest};
/// use tariff_engine::config::TariffConfig;
/// use tariff_engine::models::{Cents, Miles, Millicents, Pound, ServiceCode};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let pricer = FuelSurchargePricer::new(&TariffConfig::default(), ServiceCode::new("FSC")).unwrap();
/// let request = FuelSurchargeRequest {
///     actual_pickup_date: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
///     distance: Miles(2276),
///     weight: Pound(4025),
///     weight_based_distance_multiplier: Decimal::new(417, 6),
///     eia_fuel_price: Millicents(281_400),
///     is_ppm: false,
/// };
/// assert_eq!(pricer.price(&request).unwrap().price, Cents(2980));
/// ```
#[derive(Debug, Clone)]
pub struct FuelSurchargePricer {
    code: ServiceCode,
    floor: WeightFloor,
    base_fuel_price: Millicents,
}

impl FuelSurchargePricer {
    /// Creates a pricer for FSC, DOSFSC or DDSFSC.
    pub fn new(config: &TariffConfig, code: ServiceCode) -> EngineResult<Self> {
        require_supported_code(
            &code,
            &[codes::FSC, codes::DOSFSC, codes::DDSFSC],
            "fuel surcharge",
        )?;
        Ok(Self {
            code,
            floor: WeightFloor::new(
                config.minimum_domestic_weight,
                MinimumWeightPolicy::RejectBelowMinimum,
            )
            .with_ppm_policy(MinimumWeightPolicy::NoMinimum),
            base_fuel_price: config.base_fuel_price,
        })
    }

    /// Computes the surcharge.
    pub fn price(&self, request: &FuelSurchargeRequest) -> EngineResult<PriceResult> {
        if request.distance.0 < 0 || (!request.is_ppm && request.distance.0 == 0) {
            return Err(EngineError::validation("Distance", "must be greater than 0"));
        }
        self.floor.resolve(request.weight, request.is_ppm)?;

        let result = compute_surcharge(self.base_fuel_price, request)?;
        debug!(
            service_code = %self.code,
            actual_pickup_date = %request.actual_pickup_date,
            eia_fuel_price = request.eia_fuel_price.0,
            distance = request.distance.0,
            price_cents = result.price.0,
            "Priced fuel surcharge"
        );
        Ok(result)
    }
}

/// Inputs to a port or international SIT fuel surcharge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortFuelSurchargeRequest {
    /// The shared surcharge inputs; `is_ppm` is ignored.
    pub surcharge: FuelSurchargeRequest,
    /// Household goods or unaccompanied baggage.
    pub shipment_type: ShipmentType,
}

/// Prices POEFSC, PODFSC, IOSFSC and IDSFSC.
///
/// The minimum weight depends on the shipment type. The SIT codes accept a
/// zero distance (an OCONUS address) and price it to zero.
#[derive(Debug, Clone)]
pub struct PortFuelSurchargePricer {
    code: ServiceCode,
    household_goods: WeightFloor,
    unaccompanied_baggage: WeightFloor,
    base_fuel_price: Millicents,
}

impl PortFuelSurchargePricer {
    /// Creates a pricer for one of the port or international SIT codes.
    pub fn new(config: &TariffConfig, code: ServiceCode) -> EngineResult<Self> {
        require_supported_code(
            &code,
            &[codes::POEFSC, codes::PODFSC, codes::IOSFSC, codes::IDSFSC],
            "international fuel surcharge",
        )?;
        Ok(Self {
            code,
            household_goods: WeightFloor::new(
                config.minimum_domestic_weight,
                MinimumWeightPolicy::RejectBelowMinimum,
            ),
            unaccompanied_baggage: WeightFloor::new(
                config.minimum_unaccompanied_baggage_weight,
                MinimumWeightPolicy::RejectBelowMinimum,
            ),
            base_fuel_price: config.base_fuel_price,
        })
    }

    fn allows_zero_distance(&self) -> bool {
        self.code == codes::IOSFSC || self.code == codes::IDSFSC
    }

    /// The weight floor for a shipment type.
    pub fn weight_floor(&self, shipment_type: ShipmentType) -> WeightFloor {
        match shipment_type {
            ShipmentType::HouseholdGoods => self.household_goods,
            ShipmentType::UnaccompaniedBaggage => self.unaccompanied_baggage,
        }
    }

    /// Computes the surcharge.
    pub fn price(&self, request: &PortFuelSurchargeRequest) -> EngineResult<PriceResult> {
        let surcharge = &request.surcharge;
        if surcharge.distance.0 < 0 {
            return Err(EngineError::validation("Distance", "cannot be less than 0"));
        }
        if surcharge.distance.0 == 0 && !self.allows_zero_distance() {
            return Err(EngineError::validation("Distance", "must be greater than 0"));
        }
        self.weight_floor(request.shipment_type)
            .resolve(surcharge.weight, false)?;

        let result = compute_surcharge(self.base_fuel_price, surcharge)?;
        debug!(
            service_code = %self.code,
            shipment_type = %request.shipment_type,
            eia_fuel_price = surcharge.eia_fuel_price.0,
            distance = surcharge.distance.0,
            price_cents = result.price.0,
            "Priced international fuel surcharge"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::test_support::{dec, peak_date};
    use crate::error::ErrorKind;
    use proptest::prelude::*;

    fn fsc(code: &str) -> FuelSurchargePricer {
        FuelSurchargePricer::new(&TariffConfig::default(), ServiceCode::new(code)).unwrap()
    }

    fn port(code: &str) -> PortFuelSurchargePricer {
        PortFuelSurchargePricer::new(&TariffConfig::default(), ServiceCode::new(code)).unwrap()
    }

    fn request(eia: i64) -> FuelSurchargeRequest {
        FuelSurchargeRequest {
            actual_pickup_date: peak_date(),
            distance: Miles(2276),
            weight: Pound(4025),
            weight_based_distance_multiplier: dec("0.000417"),
            eia_fuel_price: Millicents(eia),
            is_ppm: false,
        }
    }

    #[test]
    fn test_surcharge_above_baseline() {
        let result = fsc("FSC").price(&request(281_400)).unwrap();
        assert_eq!(result.price, Cents(2980));
        assert_eq!(
            result.param(DisplayParamKey::FscPriceDifferenceInCents),
            Some("31.4")
        );
        assert_eq!(result.param(DisplayParamKey::FscMultiplier), Some("0.9490920"));
    }

    #[test]
    fn test_surcharge_below_baseline_is_negative() {
        let result = fsc("FSC").price(&request(242_400)).unwrap();
        assert_eq!(result.price, Cents(-721));
        assert_eq!(
            result.param(DisplayParamKey::FscPriceDifferenceInCents),
            Some("-7.6")
        );
    }

    #[test]
    fn test_sit_codes_share_formula() {
        for code in ["DOSFSC", "DDSFSC"] {
            assert_eq!(fsc(code).price(&request(281_400)).unwrap().price, Cents(2980));
        }
    }

    #[test]
    fn test_ppm_zero_distance_prices_to_zero() {
        let mut ppm = request(281_400);
        ppm.is_ppm = true;
        ppm.distance = Miles(0);
        assert_eq!(fsc("FSC").price(&ppm).unwrap().price, Cents(0));
    }

    #[test]
    fn test_non_ppm_zero_distance_rejected() {
        let mut zero = request(281_400);
        zero.distance = Miles(0);
        let err = fsc("FSC").price(&zero).unwrap_err();
        assert_eq!(err.to_string(), "Invalid Distance: must be greater than 0");
    }

    #[test]
    fn test_ppm_below_minimum_uses_raw_weight() {
        let mut ppm = request(281_400);
        ppm.is_ppm = true;
        ppm.weight = Pound(250);
        assert_eq!(fsc("FSC").price(&ppm).unwrap().price, Cents(2980));
    }

    #[test]
    fn test_non_ppm_below_minimum_rejected() {
        let mut light = request(281_400);
        light.weight = Pound(0);
        let err = fsc("FSC").price(&light).unwrap_err();
        assert_eq!(err.to_string(), "Invalid Weight: must be a minimum of 500");
    }

    #[test]
    fn test_missing_multiplier_and_fuel_price() {
        let mut no_multiplier = request(281_400);
        no_multiplier.weight_based_distance_multiplier = Decimal::ZERO;
        assert_eq!(
            fsc("FSC").price(&no_multiplier).unwrap_err().to_string(),
            "Invalid WeightBasedDistanceMultiplier: is required"
        );

        assert_eq!(
            fsc("FSC").price(&request(0)).unwrap_err().to_string(),
            "Invalid EIAFuelPrice: is required"
        );
    }

    #[test]
    fn test_oversized_inputs_are_calculation_errors() {
        let mut huge = request(281_400);
        huge.weight_based_distance_multiplier = Decimal::from(1_000_000_000_000_000_000i64);
        huge.distance = Miles(1_000_000_000_000);
        let err = fsc("FSC").price(&huge).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Calculation);

        let err = fsc("FSC").price(&request(i64::MIN)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Calculation);
    }

    #[test]
    fn test_port_surcharge_weight_floor_by_shipment_type() {
        let mut light = request(281_400);
        light.weight = Pound(400);

        let hhg = PortFuelSurchargeRequest {
            surcharge: light.clone(),
            shipment_type: ShipmentType::HouseholdGoods,
        };
        assert_eq!(port("POEFSC").price(&hhg).unwrap_err().kind(), ErrorKind::Validation);

        let ub = PortFuelSurchargeRequest {
            surcharge: light,
            shipment_type: ShipmentType::UnaccompaniedBaggage,
        };
        assert_eq!(port("PODFSC").price(&ub).unwrap().price, Cents(2980));
    }

    #[test]
    fn test_international_sit_zero_distance_allowed() {
        let mut zero = request(281_400);
        zero.distance = Miles(0);
        let req = PortFuelSurchargeRequest {
            surcharge: zero,
            shipment_type: ShipmentType::HouseholdGoods,
        };
        assert_eq!(port("IOSFSC").price(&req).unwrap().price, Cents(0));
        assert_eq!(port("IDSFSC").price(&req).unwrap().price, Cents(0));
        assert!(port("POEFSC").price(&req).is_err());
    }

    #[test]
    fn test_international_sit_negative_distance_rejected() {
        let mut negative = request(281_400);
        negative.distance = Miles(-1);
        let req = PortFuelSurchargeRequest {
            surcharge: negative,
            shipment_type: ShipmentType::HouseholdGoods,
        };
        assert_eq!(
            port("IOSFSC").price(&req).unwrap_err().to_string(),
            "Invalid Distance: cannot be less than 0"
        );
    }

    #[test]
    fn test_shipment_type_parse() {
        assert_eq!(ShipmentType::parse("HHG").unwrap(), ShipmentType::HouseholdGoods);
        assert_eq!(ShipmentType::parse("UB").unwrap(), ShipmentType::UnaccompaniedBaggage);
        assert!(ShipmentType::parse("NTS").is_err());
    }

    proptest! {
        #[test]
        fn prop_surcharge_monotonic_in_fuel_price(low in 1i64..400_000, step in 1i64..100_000) {
            let pricer = fsc("FSC");
            let cheaper = pricer.price(&request(low)).unwrap().price;
            let dearer = pricer.price(&request(low + step)).unwrap().price;
            prop_assert!(cheaper <= dearer);
        }

        #[test]
        fn prop_surcharge_negative_below_baseline(eia in 1i64..249_000) {
            let price = fsc("FSC").price(&request(eia)).unwrap().price;
            prop_assert!(price.0 < 0);
        }
    }
}
