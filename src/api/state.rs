//! Application state for the tariff rate engine API.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::dispatch::{InMemoryAuditSink, PricingDispatcher};
use crate::error::EngineResult;

/// Audit records the API keeps before dropping the oldest.
pub const AUDIT_CAPACITY: usize = 10_000;

/// Shared application state.
///
/// Holds the dispatcher built from a loaded tariff directory and the audit
/// sink it records into.
#[derive(Clone)]
pub struct AppState {
    dispatcher: Arc<PricingDispatcher>,
    audit: Arc<InMemoryAuditSink>,
}

impl AppState {
    /// Builds the dispatcher from a loaded tariff directory.
    pub fn new(config: ConfigLoader) -> EngineResult<Self> {
        let (tariff, catalog) = config.into_parts();
        let audit = Arc::new(InMemoryAuditSink::with_capacity(AUDIT_CAPACITY));
        let dispatcher = PricingDispatcher::new(&tariff, Arc::new(catalog), audit.clone())?;
        Ok(Self {
            dispatcher: Arc::new(dispatcher),
            audit,
        })
    }

    /// Returns the dispatcher.
    pub fn dispatcher(&self) -> &PricingDispatcher {
        &self.dispatcher
    }

    /// Returns the audit sink.
    pub fn audit(&self) -> &InMemoryAuditSink {
        &self.audit
    }
}
