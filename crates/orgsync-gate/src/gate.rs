//! Scope gate trait

use async_trait::async_trait;
use chrono::NaiveDate;
use orgsync_types::{OrgSyncError, Result};
use uuid::Uuid;

/// Authorization scope check for organizational units
#[async_trait]
pub trait ScopeGate: Send + Sync {
    /// Whether `unit` is inside the authorized scope as of `at`.
    ///
    /// Fails with `NotFound` when the unit (or an ancestor) is absent at
    /// `at`, never with a policy error.
    async fn is_authorized(&self, unit: Uuid, at: NaiveDate) -> Result<bool>;

    /// Like [`is_authorized`](Self::is_authorized), with an out-of-scope
    /// answer turned into a policy error
    async fn authorize(&self, unit: Uuid, at: NaiveDate) -> Result<()> {
        if self.is_authorized(unit, at).await? {
            Ok(())
        } else {
            Err(OrgSyncError::outside_allow_list(&unit))
        }
    }
}
