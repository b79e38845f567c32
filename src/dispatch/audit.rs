//! Audit sink for pricer display parameters.

use std::collections::VecDeque;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::DisplayParam;

/// Receives the display parameters that explain each price.
pub trait AuditSink: Send + Sync {
    /// Records the parameters for a payment service item.
    ///
    /// Implementations must reject an empty list.
    fn record(&self, payment_service_item_id: Uuid, params: &[DisplayParam]) -> EngineResult<()>;
}

/// One recorded set of display parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    /// The payment service item the price belongs to.
    pub payment_service_item_id: Uuid,
    /// The parameters, in pricer order.
    pub display_params: Vec<DisplayParam>,
}

/// An [`AuditSink`] that keeps records in memory, for tests and the demo
/// server.
///
/// Records accumulate until [`drain`](Self::drain) is called. A sink built
/// with [`with_capacity`](Self::with_capacity) drops its oldest record once
/// full.
#[derive(Debug, Default)]
pub struct InMemoryAuditSink {
    records: Mutex<VecDeque<AuditRecord>>,
    capacity: Option<usize>,
}

impl InMemoryAuditSink {
    /// Creates an empty, unbounded sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a sink that keeps at most `capacity` records.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity: Some(capacity),
        }
    }

    /// A snapshot of everything recorded so far.
    pub fn records(&self) -> Vec<AuditRecord> {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .cloned()
            .collect()
    }

    /// Removes and returns every record, oldest first.
    pub fn drain(&self) -> Vec<AuditRecord> {
        let mut records = self
            .records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        records.drain(..).collect()
    }

    /// The records for one payment service item.
    pub fn records_for(&self, payment_service_item_id: Uuid) -> Vec<AuditRecord> {
        self.records()
            .into_iter()
            .filter(|record| record.payment_service_item_id == payment_service_item_id)
            .collect()
    }
}

impl AuditSink for InMemoryAuditSink {
    fn record(&self, payment_service_item_id: Uuid, params: &[DisplayParam]) -> EngineResult<()> {
        if params.is_empty() {
            return Err(EngineError::validation(
                "DisplayParams",
                "must not be empty",
            ));
        }

        let mut records = self.records.lock().map_err(|_| EngineError::CalculationError {
            message: "audit sink lock poisoned".to_string(),
        })?;
        if let Some(capacity) = self.capacity {
            if capacity == 0 {
                return Ok(());
            }
            while records.len() >= capacity {
                records.pop_front();
            }
        }
        records.push_back(AuditRecord {
            payment_service_item_id,
            display_params: params.to_vec(),
        });

        info!(
            payment_service_item_id = %payment_service_item_id,
            params = params.len(),
            "Recorded pricer display params"
        );
        Ok(())
    }
}
