//! The pricing dispatcher.
//!
//! Maps a service code to its registered [`ParamPricer`], prices the
//! parameter bag, and forwards any display parameters to the audit sink.
//! The registry is built once at construction and never changes.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::calculation::{
    CratingPricer, FuelSurchargePricer, IntlCratingPricer, IntlPerUnitPricer,
    IntlPickupDeliverySitPricer, IntlShuttlingPricer, LinehaulPricer, PackUnpackPricer,
    PickupDeliverySitPricer, PortFuelSurchargePricer, ServiceAreaPricer, ShorthaulPricer,
    ShuttlingPricer, TaskOrderFeePricer,
};
use crate::catalog::RateCatalog;
use crate::config::TariffConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{PriceResult, ServiceCode, codes};

use super::adapters::{
    CratingAdapter, FuelDistance, FuelSurchargeAdapter, IntlCratingAdapter, IntlPerUnitAdapter,
    IntlPickupDeliverySitAdapter, IntlShuttlingAdapter, LinehaulAdapter, PackUnpackAdapter,
    ParamPricer, PickupDeliverySitAdapter, PortFuelSurchargeAdapter, ServiceAreaAdapter,
    ShorthaulAdapter, ShuttlingAdapter, Side, TaskOrderFeeAdapter,
};
use super::audit::AuditSink;
use super::params::ParameterSource;

type Registry = HashMap<String, Arc<dyn ParamPricer>>;

fn register(registry: &mut Registry, code: &str, pricer: impl ParamPricer + 'static) {
    registry.insert(code.to_string(), Arc::new(pricer));
}

/// Builds the service code to pricer registry.
fn build_registry(config: &TariffConfig) -> EngineResult<Registry> {
    let mut registry: Registry = HashMap::new();

    register(&mut registry, codes::DLH, LinehaulAdapter(LinehaulPricer::new(config)));
    register(&mut registry, codes::DSH, ShorthaulAdapter(ShorthaulPricer::new(config)));

    for (code, side) in [
        (codes::DOP, Side::Origin),
        (codes::DDP, Side::Destination),
        (codes::DOFSIT, Side::Origin),
        (codes::DDFSIT, Side::Destination),
        (codes::DOASIT, Side::Origin),
        (codes::DDASIT, Side::Destination),
    ] {
        let pricer = ServiceAreaPricer::new(config, ServiceCode::new(code))?;
        register(&mut registry, code, ServiceAreaAdapter { pricer, side });
    }

    for (code, side) in [
        (codes::DPK, Side::Origin),
        (codes::DNPK, Side::Origin),
        (codes::DUPK, Side::Destination),
    ] {
        let pricer = PackUnpackPricer::new(config, ServiceCode::new(code))?;
        register(&mut registry, code, PackUnpackAdapter { pricer, side });
    }

    for (code, side) in [(codes::DOSHUT, Side::Origin), (codes::DDSHUT, Side::Destination)] {
        let pricer = ShuttlingPricer::new(config, ServiceCode::new(code))?;
        register(&mut registry, code, ShuttlingAdapter { pricer, side });
    }

    for (code, side) in [(codes::DCRT, Side::Origin), (codes::DUCRT, Side::Destination)] {
        let pricer = CratingPricer::new(config, ServiceCode::new(code))?;
        register(&mut registry, code, CratingAdapter { pricer, side });
    }

    for (code, side) in [(codes::DOPSIT, Side::Origin), (codes::DDDSIT, Side::Destination)] {
        let pricer = PickupDeliverySitPricer::new(config, ServiceCode::new(code))?;
        register(&mut registry, code, PickupDeliverySitAdapter { pricer, side });
    }

    for (code, distance) in [
        (codes::FSC, FuelDistance::Shipment),
        (codes::DOSFSC, FuelDistance::Sit(Side::Origin)),
        (codes::DDSFSC, FuelDistance::Sit(Side::Destination)),
    ] {
        let pricer = FuelSurchargePricer::new(config, ServiceCode::new(code))?;
        register(&mut registry, code, FuelSurchargeAdapter { pricer, distance });
    }

    for (code, distance) in [
        (codes::POEFSC, FuelDistance::Shipment),
        (codes::PODFSC, FuelDistance::Shipment),
        (codes::IOSFSC, FuelDistance::Sit(Side::Origin)),
        (codes::IDSFSC, FuelDistance::Sit(Side::Destination)),
    ] {
        let pricer = PortFuelSurchargePricer::new(config, ServiceCode::new(code))?;
        register(&mut registry, code, PortFuelSurchargeAdapter { pricer, distance });
    }

    for (code, side) in [(codes::IOSHUT, Side::Origin), (codes::IDSHUT, Side::Destination)] {
        let pricer = IntlShuttlingPricer::new(config, ServiceCode::new(code))?;
        register(&mut registry, code, IntlShuttlingAdapter { pricer, side });
    }

    for (code, side) in [(codes::ICRT, Side::Origin), (codes::IUCRT, Side::Destination)] {
        let pricer = IntlCratingPricer::new(config, ServiceCode::new(code))?;
        register(&mut registry, code, IntlCratingAdapter { pricer, side });
    }

    for code in [
        codes::IHPK,
        codes::IHUPK,
        codes::IUBPK,
        codes::IUBUPK,
        codes::IOFSIT,
        codes::IDFSIT,
        codes::IOASIT,
        codes::IDASIT,
    ] {
        let pricer = IntlPerUnitPricer::new(config, ServiceCode::new(code))?;
        register(&mut registry, code, IntlPerUnitAdapter(pricer));
    }

    for (code, side) in [(codes::IOPSIT, Side::Origin), (codes::IDDSIT, Side::Destination)] {
        let pricer = IntlPickupDeliverySitPricer::new(config, ServiceCode::new(code))?;
        register(&mut registry, code, IntlPickupDeliverySitAdapter { pricer, side });
    }

    for code in [codes::MS, codes::CS] {
        let pricer = TaskOrderFeePricer::new(ServiceCode::new(code))?;
        register(&mut registry, code, TaskOrderFeeAdapter(pricer));
    }

    Ok(registry)
}

/// Routes pricing calls by service code.
///
/// Holds no per-call state: concurrent calls share the registry, the
/// catalog and the audit sink read-only (the sink synchronizes itself).
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use tariff_engine::catalog::{InMemoryRateCatalog, TariffTables};
/// use tariff_engine::config::TariffConfig;
/// use tariff_engine::dispatch::{InMemoryAuditSink, ParamBag, PricingDispatcher};
/// use tariff_engine::error::ErrorKind;
/// use tariff_engine::models::ServiceCode;
/// use uuid::Uuid;
///
/// let catalog = Arc::new(InMemoryRateCatalog::new(TariffTables::default()).unwrap());
/// let audit = Arc::new(InMemoryAuditSink::new());
/// let dispatcher = PricingDispatcher::new(&TariffConfig::default(), catalog, audit).unwrap();
///
/// let err = dispatcher
///     .price(Uuid::new_v4(), &ServiceCode::new("XYZ"), &ParamBag::new())
///     .unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::NotImplemented);
/// ```
pub struct PricingDispatcher {
    registry: Registry,
    catalog: Arc<dyn RateCatalog>,
    audit: Arc<dyn AuditSink>,
}

impl PricingDispatcher {
    /// Builds the registry from `config`.
    pub fn new(
        config: &TariffConfig,
        catalog: Arc<dyn RateCatalog>,
        audit: Arc<dyn AuditSink>,
    ) -> EngineResult<Self> {
        let registry = build_registry(config)?;
        debug!(pricers = registry.len(), "Built pricer registry");
        Ok(Self {
            registry,
            catalog,
            audit,
        })
    }

    /// The registered service codes, sorted.
    pub fn supported_codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.registry.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }

    /// The pricer registered for `service_code`.
    pub fn pricer(&self, service_code: &ServiceCode) -> EngineResult<&Arc<dyn ParamPricer>> {
        self.registry
            .get(service_code.as_str())
            .ok_or_else(|| EngineError::NotImplemented {
                service_code: service_code.to_string(),
            })
    }

    /// Prices one payment service item.
    ///
    /// Display parameters, when any were produced, go to the audit sink
    /// under `payment_service_item_id`. An empty list skips the sink. Any
    /// failure discards the partial result.
    pub fn price(
        &self,
        payment_service_item_id: Uuid,
        service_code: &ServiceCode,
        params: &dyn ParameterSource,
    ) -> EngineResult<PriceResult> {
        let pricer = match self.pricer(service_code) {
            Ok(pricer) => pricer,
            Err(err) => {
                warn!(service_code = %service_code, "No pricer registered for service code");
                return Err(err);
            }
        };

        let result = pricer.price_using_params(self.catalog.as_ref(), params)?;

        if !result.display_params.is_empty() {
            self.audit
                .record(payment_service_item_id, &result.display_params)?;
        }

        info!(
            payment_service_item_id = %payment_service_item_id,
            service_code = %service_code,
            price_cents = result.price.0,
            "Priced service item"
        );

        Ok(result)
    }
}
