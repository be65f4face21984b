//! Service context shared by all business operations.
//!
//! Carries the connection pool plus the injected capability gate.
//! Access decisions never come from ambient state; every operation asks
//! the gate for the specific actor and capability it needs.

use crate::error::{BusinessError, BusinessResult};
use sqlx::SqlitePool;
use staffledger_core::{Capability, PolicyGate};
use staffledger_persistence::Ledger;
use std::sync::Arc;

/// Context for business operations - database access plus policy gate
pub struct ServiceContext {
    pool: SqlitePool,
    gate: Arc<dyn PolicyGate>,
}

impl ServiceContext {
    /// Create a new service context from a ledger and a policy gate
    pub fn new(ledger: &Ledger, gate: Arc<dyn PolicyGate>) -> Self {
        Self {
            pool: ledger.pool().clone(),
            gate,
        }
    }

    /// Create from a pool directly
    pub fn from_pool(pool: SqlitePool, gate: Arc<dyn PolicyGate>) -> Self {
        Self { pool, gate }
    }

    /// Get the database pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Require a capability for an actor, or fail with PermissionDenied
    pub fn authorize(&self, actor: &str, capability: Capability) -> BusinessResult<()> {
        if self.gate.allows(actor, capability) {
            Ok(())
        } else {
            Err(BusinessError::permission_denied(actor, capability).into())
        }
    }
}
