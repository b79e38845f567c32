//! Parameter adapters: read a parameter bag into each pricer's typed request.

use chrono::NaiveDate;

use crate::calculation::{
    CratingPricer, CratingRequest, FuelSurchargePricer, FuelSurchargeRequest, IntlCratingPricer,
    IntlCratingRequest, IntlPerUnitFamily, IntlPerUnitPricer, IntlPerUnitRequest,
    IntlPickupDeliverySitPricer, IntlPickupDeliverySitRequest, IntlShuttlingPricer,
    IntlShuttlingRequest, LinehaulPricer, LinehaulRequest, PackUnpackPricer, PackUnpackRequest,
    PickupDeliverySitPricer, PickupDeliverySitRequest, PortFuelSurchargePricer,
    PortFuelSurchargeRequest, ServiceAreaPricer, ServiceAreaRequest, ShipmentType,
    ShorthaulPricer, ShorthaulRequest, ShuttlingPricer, ShuttlingRequest, TaskOrderFeePricer,
    TaskOrderFeeRequest,
};
use crate::catalog::RateCatalog;
use crate::error::EngineResult;
use crate::models::{Cents, CubicFeet, Market, Miles, Millicents, Pound, PriceResult};

use super::params::{ParameterSource, keys};

/// A pricer that reads its inputs from a parameter bag.
pub trait ParamPricer: Send + Sync {
    /// Adapts `params` and prices them.
    fn price_using_params(
        &self,
        catalog: &dyn RateCatalog,
        params: &dyn ParameterSource,
    ) -> EngineResult<PriceResult>;
}

/// Which end of the move a code prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    Origin,
    Destination,
}

impl Side {
    fn service_area_key(self) -> &'static str {
        match self {
            Side::Origin => keys::SERVICE_AREA_ORIGIN,
            Side::Destination => keys::SERVICE_AREA_DEST,
        }
    }

    fn services_schedule_key(self) -> &'static str {
        match self {
            Side::Origin => keys::SERVICES_SCHEDULE_ORIGIN,
            Side::Destination => keys::SERVICES_SCHEDULE_DEST,
        }
    }

    fn sit_schedule_key(self) -> &'static str {
        match self {
            Side::Origin => keys::SIT_SCHEDULE_ORIGIN,
            Side::Destination => keys::SIT_SCHEDULE_DEST,
        }
    }

    fn sit_distance_key(self) -> &'static str {
        match self {
            Side::Origin => keys::DISTANCE_ZIP_SIT_ORIGIN,
            Side::Destination => keys::DISTANCE_ZIP_SIT_DEST,
        }
    }

    fn market_key(self) -> &'static str {
        match self {
            Side::Origin => keys::MARKET_ORIGIN,
            Side::Destination => keys::MARKET_DEST,
        }
    }

    fn market(self, params: &dyn ParameterSource) -> EngineResult<Market> {
        let key = self.market_key();
        Market::parse(key, &params.get_string(key)?)
    }

    /// (original, actual) postal code keys for SIT pickup or delivery.
    fn sit_zip_keys(self) -> (&'static str, &'static str) {
        match self {
            Side::Origin => (
                keys::ZIP_PICKUP_ADDRESS,
                keys::ZIP_SIT_ORIGIN_HHG_ACTUAL_ADDRESS,
            ),
            Side::Destination => (keys::ZIP_DEST_ADDRESS, keys::ZIP_SIT_DEST_HHG_FINAL_ADDRESS),
        }
    }
}

/// `ReferenceDate`, or `RequestedPickupDate` when no reference date is given.
fn reference_date(params: &dyn ParameterSource) -> EngineResult<NaiveDate> {
    if !params.contains(keys::REFERENCE_DATE) && params.contains(keys::REQUESTED_PICKUP_DATE) {
        return params.get_date(keys::REQUESTED_PICKUP_DATE);
    }
    params.get_date(keys::REFERENCE_DATE)
}

fn is_ppm(params: &dyn ParameterSource) -> EngineResult<bool> {
    params.get_bool_or(keys::IS_PPM, false)
}

/// `(StandaloneCrate, StandaloneCrateCap)`. The cap only matters for
/// standalone crates, and then it is required.
fn standalone_crate_params(params: &dyn ParameterSource) -> EngineResult<(bool, Cents)> {
    let standalone = params.get_bool_or(keys::STANDALONE_CRATE, false)?;
    let cap = if standalone {
        params.get_int(keys::STANDALONE_CRATE_CAP)?
    } else {
        params.get_int_or(keys::STANDALONE_CRATE_CAP, 0)?
    };
    Ok((standalone, Cents(cap)))
}

pub(crate) struct LinehaulAdapter(pub LinehaulPricer);

impl ParamPricer for LinehaulAdapter {
    fn price_using_params(
        &self,
        catalog: &dyn RateCatalog,
        params: &dyn ParameterSource,
    ) -> EngineResult<PriceResult> {
        let contract_code = params.get_string(keys::CONTRACT_CODE)?;
        let service_area = params.get_string(keys::SERVICE_AREA_ORIGIN)?;
        self.0.price(
            catalog,
            &LinehaulRequest {
                contract_code: &contract_code,
                reference_date: reference_date(params)?,
                distance: Miles(params.get_int(keys::DISTANCE_ZIP)?),
                weight: Pound(params.get_int(keys::WEIGHT_BILLED)?),
                service_area: &service_area,
                is_ppm: is_ppm(params)?,
            },
        )
    }
}

pub(crate) struct ShorthaulAdapter(pub ShorthaulPricer);

impl ParamPricer for ShorthaulAdapter {
    fn price_using_params(
        &self,
        catalog: &dyn RateCatalog,
        params: &dyn ParameterSource,
    ) -> EngineResult<PriceResult> {
        let contract_code = params.get_string(keys::CONTRACT_CODE)?;
        let service_area = params.get_string(keys::SERVICE_AREA_ORIGIN)?;
        self.0.price(
            catalog,
            &ShorthaulRequest {
                contract_code: &contract_code,
                reference_date: reference_date(params)?,
                distance: Miles(params.get_int(keys::DISTANCE_ZIP)?),
                weight: Pound(params.get_int(keys::WEIGHT_BILLED)?),
                service_area: &service_area,
                is_ppm: is_ppm(params)?,
            },
        )
    }
}

pub(crate) struct ServiceAreaAdapter {
    pub pricer: ServiceAreaPricer,
    pub side: Side,
}

impl ParamPricer for ServiceAreaAdapter {
    fn price_using_params(
        &self,
        catalog: &dyn RateCatalog,
        params: &dyn ParameterSource,
    ) -> EngineResult<PriceResult> {
        let contract_code = params.get_string(keys::CONTRACT_CODE)?;
        let service_area = params.get_string(self.side.service_area_key())?;
        let number_of_days_sit = if self.pricer.is_additional_days() {
            Some(params.get_int(keys::NUMBER_DAYS_SIT)?)
        } else {
            None
        };

        self.pricer.price(
            catalog,
            &ServiceAreaRequest {
                contract_code: &contract_code,
                reference_date: reference_date(params)?,
                weight: Pound(params.get_int(keys::WEIGHT_BILLED)?),
                service_area: &service_area,
                is_ppm: is_ppm(params)?,
                number_of_days_sit,
            },
        )
    }
}

pub(crate) struct PackUnpackAdapter {
    pub pricer: PackUnpackPricer,
    pub side: Side,
}

impl ParamPricer for PackUnpackAdapter {
    fn price_using_params(
        &self,
        catalog: &dyn RateCatalog,
        params: &dyn ParameterSource,
    ) -> EngineResult<PriceResult> {
        let contract_code = params.get_string(keys::CONTRACT_CODE)?;
        self.pricer.price(
            catalog,
            &PackUnpackRequest {
                contract_code: &contract_code,
                reference_date: reference_date(params)?,
                weight: Pound(params.get_int(keys::WEIGHT_BILLED)?),
                services_schedule: params.get_int(self.side.services_schedule_key())?,
                is_ppm: is_ppm(params)?,
            },
        )
    }
}

pub(crate) struct ShuttlingAdapter {
    pub pricer: ShuttlingPricer,
    pub side: Side,
}

impl ParamPricer for ShuttlingAdapter {
    fn price_using_params(
        &self,
        catalog: &dyn RateCatalog,
        params: &dyn ParameterSource,
    ) -> EngineResult<PriceResult> {
        let contract_code = params.get_string(keys::CONTRACT_CODE)?;
        self.pricer.price(
            catalog,
            &ShuttlingRequest {
                contract_code: &contract_code,
                reference_date: reference_date(params)?,
                weight: Pound(params.get_int(keys::WEIGHT_BILLED)?),
                services_schedule: params.get_int(self.side.services_schedule_key())?,
            },
        )
    }
}

pub(crate) struct CratingAdapter {
    pub pricer: CratingPricer,
    pub side: Side,
}

impl ParamPricer for CratingAdapter {
    fn price_using_params(
        &self,
        catalog: &dyn RateCatalog,
        params: &dyn ParameterSource,
    ) -> EngineResult<PriceResult> {
        let contract_code = params.get_string(keys::CONTRACT_CODE)?;
        let (standalone_crate, standalone_crate_cap) = standalone_crate_params(params)?;

        self.pricer.price(
            catalog,
            &CratingRequest {
                contract_code: &contract_code,
                reference_date: reference_date(params)?,
                cubic_feet: CubicFeet(params.get_decimal(keys::CUBIC_FEET_BILLED)?),
                services_schedule: params.get_int(self.side.services_schedule_key())?,
                standalone_crate,
                standalone_crate_cap,
            },
        )
    }
}

pub(crate) struct PickupDeliverySitAdapter {
    pub pricer: PickupDeliverySitPricer,
    pub side: Side,
}

impl ParamPricer for PickupDeliverySitAdapter {
    fn price_using_params(
        &self,
        catalog: &dyn RateCatalog,
        params: &dyn ParameterSource,
    ) -> EngineResult<PriceResult> {
        let contract_code = params.get_string(keys::CONTRACT_CODE)?;
        let service_area = params.get_string(self.side.service_area_key())?;
        let (original_key, actual_key) = self.side.sit_zip_keys();
        let zip_original = params.get_string(original_key)?;
        let zip_actual = params.get_string(actual_key)?;

        self.pricer.price(
            catalog,
            &PickupDeliverySitRequest {
                contract_code: &contract_code,
                reference_date: reference_date(params)?,
                weight: Pound(params.get_int(keys::WEIGHT_BILLED)?),
                service_area: &service_area,
                sit_schedule: params.get_int(self.side.sit_schedule_key())?,
                zip_original: &zip_original,
                zip_actual: &zip_actual,
                distance: Miles(params.get_int(self.side.sit_distance_key())?),
            },
        )
    }
}

pub(crate) struct IntlShuttlingAdapter {
    pub pricer: IntlShuttlingPricer,
    pub side: Side,
}

impl ParamPricer for IntlShuttlingAdapter {
    fn price_using_params(
        &self,
        catalog: &dyn RateCatalog,
        params: &dyn ParameterSource,
    ) -> EngineResult<PriceResult> {
        let contract_code = params.get_string(keys::CONTRACT_CODE)?;
        self.pricer.price(
            catalog,
            &IntlShuttlingRequest {
                contract_code: &contract_code,
                reference_date: reference_date(params)?,
                weight: Pound(params.get_int(keys::WEIGHT_BILLED)?),
                market: self.side.market(params)?,
            },
        )
    }
}

pub(crate) struct IntlCratingAdapter {
    pub pricer: IntlCratingPricer,
    pub side: Side,
}

impl ParamPricer for IntlCratingAdapter {
    fn price_using_params(
        &self,
        catalog: &dyn RateCatalog,
        params: &dyn ParameterSource,
    ) -> EngineResult<PriceResult> {
        let contract_code = params.get_string(keys::CONTRACT_CODE)?;
        let (standalone_crate, standalone_crate_cap) = standalone_crate_params(params)?;

        self.pricer.price(
            catalog,
            &IntlCratingRequest {
                contract_code: &contract_code,
                reference_date: reference_date(params)?,
                cubic_feet: CubicFeet(params.get_decimal(keys::CUBIC_FEET_BILLED)?),
                market: self.side.market(params)?,
                external_crate: params.get_bool_or(keys::EXTERNAL_CRATE, false)?,
                standalone_crate,
                standalone_crate_cap,
            },
        )
    }
}

pub(crate) struct IntlPerUnitAdapter(pub IntlPerUnitPricer);

impl ParamPricer for IntlPerUnitAdapter {
    fn price_using_params(
        &self,
        catalog: &dyn RateCatalog,
        params: &dyn ParameterSource,
    ) -> EngineResult<PriceResult> {
        let contract_code = params.get_string(keys::CONTRACT_CODE)?;
        let number_of_days_sit = match self.0.family() {
            IntlPerUnitFamily::AdditionalDaysSit => Some(params.get_int(keys::NUMBER_DAYS_SIT)?),
            _ => None,
        };

        self.0.price(
            catalog,
            &IntlPerUnitRequest {
                contract_code: &contract_code,
                reference_date: reference_date(params)?,
                weight: Pound(params.get_int(keys::WEIGHT_BILLED)?),
                per_unit_cents: Cents(params.get_int(keys::PER_UNIT_CENTS)?),
                number_of_days_sit,
            },
        )
    }
}

pub(crate) struct IntlPickupDeliverySitAdapter {
    pub pricer: IntlPickupDeliverySitPricer,
    pub side: Side,
}

impl ParamPricer for IntlPickupDeliverySitAdapter {
    fn price_using_params(
        &self,
        catalog: &dyn RateCatalog,
        params: &dyn ParameterSource,
    ) -> EngineResult<PriceResult> {
        let contract_code = params.get_string(keys::CONTRACT_CODE)?;
        self.pricer.price(
            catalog,
            &IntlPickupDeliverySitRequest {
                contract_code: &contract_code,
                reference_date: reference_date(params)?,
                weight: Pound(params.get_int(keys::WEIGHT_BILLED)?),
                per_unit_cents: Cents(params.get_int(keys::PER_UNIT_CENTS)?),
                distance: Miles(params.get_int(self.side.sit_distance_key())?),
            },
        )
    }
}

/// Where a fuel surcharge reads its distance from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FuelDistance {
    /// `DistanceZip`.
    Shipment,
    /// `DistanceZipSITOrigin` or `DistanceZipSITDest`.
    Sit(Side),
}

impl FuelDistance {
    fn key(self) -> &'static str {
        match self {
            FuelDistance::Shipment => keys::DISTANCE_ZIP,
            FuelDistance::Sit(side) => side.sit_distance_key(),
        }
    }
}

fn fuel_surcharge_request(
    params: &dyn ParameterSource,
    distance: FuelDistance,
) -> EngineResult<FuelSurchargeRequest> {
    Ok(FuelSurchargeRequest {
        actual_pickup_date: params.get_date(keys::ACTUAL_PICKUP_DATE)?,
        distance: Miles(params.get_int(distance.key())?),
        weight: Pound(params.get_int(keys::WEIGHT_BILLED)?),
        weight_based_distance_multiplier: params
            .get_decimal(keys::FSC_WEIGHT_BASED_DISTANCE_MULTIPLIER)?,
        eia_fuel_price: Millicents(params.get_int(keys::EIA_FUEL_PRICE)?),
        is_ppm: is_ppm(params)?,
    })
}

pub(crate) struct FuelSurchargeAdapter {
    pub pricer: FuelSurchargePricer,
    pub distance: FuelDistance,
}

impl ParamPricer for FuelSurchargeAdapter {
    fn price_using_params(
        &self,
        _catalog: &dyn RateCatalog,
        params: &dyn ParameterSource,
    ) -> EngineResult<PriceResult> {
        self.pricer
            .price(&fuel_surcharge_request(params, self.distance)?)
    }
}

pub(crate) struct PortFuelSurchargeAdapter {
    pub pricer: PortFuelSurchargePricer,
    pub distance: FuelDistance,
}

impl ParamPricer for PortFuelSurchargeAdapter {
    fn price_using_params(
        &self,
        _catalog: &dyn RateCatalog,
        params: &dyn ParameterSource,
    ) -> EngineResult<PriceResult> {
        let shipment_type = ShipmentType::parse(&params.get_string(keys::SHIPMENT_TYPE)?)?;
        self.pricer.price(&PortFuelSurchargeRequest {
            surcharge: fuel_surcharge_request(params, self.distance)?,
            shipment_type,
        })
    }
}

pub(crate) struct TaskOrderFeeAdapter(pub TaskOrderFeePricer);

impl ParamPricer for TaskOrderFeeAdapter {
    fn price_using_params(
        &self,
        catalog: &dyn RateCatalog,
        params: &dyn ParameterSource,
    ) -> EngineResult<PriceResult> {
        let contract_code = params.get_string(keys::CONTRACT_CODE)?;
        self.0.price(
            catalog,
            &TaskOrderFeeRequest {
                contract_code: &contract_code,
                reference_date: reference_date(params)?,
            },
        )
    }
}
