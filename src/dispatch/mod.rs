//! Service code dispatch.
//!
//! This module turns a service code and a loosely typed parameter bag into
//! a price: a static registry selects the pricer, an adapter reads the
//! parameters it needs, and the resulting display parameters are passed to
//! an [`AuditSink`].

mod adapters;
mod audit;
mod dispatcher;
mod params;

pub use adapters::ParamPricer;
pub use audit::{AuditRecord, AuditSink, InMemoryAuditSink};
pub use dispatcher::PricingDispatcher;
pub use params::{ParamBag, ParamValue, ParameterSource, keys};
