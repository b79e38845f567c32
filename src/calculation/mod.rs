//! Pricing logic for the tariff rate engine.
//!
//! One pricer per tariff family. Each is constructed once from the
//! [`TariffConfig`](crate::config::TariffConfig), reads rates through a
//! [`RateCatalog`](crate::catalog::RateCatalog), and returns a
//! [`PriceResult`](crate::models::PriceResult) rounded exactly once.
//! Peak classification, contract year escalation and minimum weight
//! policies are shared building blocks.

mod crating;
mod escalation;
mod fuel_surcharge;
mod intl_crating;
mod intl_per_unit;
mod intl_pickup_delivery_sit;
mod intl_shuttling;
mod linehaul;
mod pack_unpack;
mod peak_period;
mod pickup_delivery_sit;
mod service_area;
mod shorthaul;
mod shuttling;
mod task_order_fee;
mod validation;
mod weight_floor;

#[cfg(test)]
pub(crate) mod test_support;

pub use crating::{CratingPricer, CratingRequest};
pub use escalation::{EscalationResult, escalate_price};
pub use fuel_surcharge::{
    FuelSurchargePricer, FuelSurchargeRequest, PortFuelSurchargePricer, PortFuelSurchargeRequest,
    ShipmentType,
};
pub use intl_crating::{IntlCratingPricer, IntlCratingRequest};
pub use intl_per_unit::{IntlPerUnitFamily, IntlPerUnitPricer, IntlPerUnitRequest};
pub use intl_pickup_delivery_sit::{IntlPickupDeliverySitPricer, IntlPickupDeliverySitRequest};
pub use intl_shuttling::{IntlShuttlingPricer, IntlShuttlingRequest};
pub use linehaul::{LinehaulPricer, LinehaulRequest};
pub use pack_unpack::{PackUnpackPricer, PackUnpackRequest};
pub use peak_period::is_peak_period;
pub use pickup_delivery_sit::{PickupDeliverySitPricer, PickupDeliverySitRequest, SitMoveKind};
pub use service_area::{ServiceAreaPricer, ServiceAreaRequest};
pub use shorthaul::{ShorthaulPricer, ShorthaulRequest};
pub use shuttling::{ShuttlingPricer, ShuttlingRequest};
pub use task_order_fee::{TaskOrderFeePricer, TaskOrderFeeRequest};
pub use weight_floor::{BillableWeight, MinimumWeightPolicy, WeightFloor};
