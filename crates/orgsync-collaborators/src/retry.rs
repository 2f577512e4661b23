//! Bounded retry decorators
//!
//! Only failures reporting [`Transient::is_transient`] are retried.
//! Rejections and malformed responses are returned on the first attempt.

use crate::directory::{Directory, DirectoryResult};
use crate::error::Transient;
use crate::hr::{HrResult, HrSystem};
use crate::source::{DepartmentSource, SourceResult};
use async_trait::async_trait;
use chrono::NaiveDate;
use orgsync_types::{AddressPayload, DepartmentRecord, OrgUnit, RetryConfig, UnitCreation};
use std::fmt::Display;
use std::future::Future;
use tracing::{debug, warn};
use uuid::Uuid;

/// Run `call` until it succeeds, fails permanently, or attempts run out
pub async fn with_retry<T, E, F, Fut>(
    policy: &RetryConfig,
    operation: &str,
    mut call: F,
) -> Result<T, E>
where
    E: Transient + Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match call().await {
            Ok(value) => {
                if attempt > 1 {
                    debug!(operation, attempt, "Succeeded after retry");
                }
                return Ok(value);
            }
            Err(err) if err.is_transient() && attempt < max_attempts => {
                let delay = policy.backoff(attempt);
                warn!(
                    operation,
                    attempt,
                    max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "Transient failure, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(err) => {
                if err.is_transient() {
                    warn!(operation, attempts = attempt, error = %err, "Giving up after retries");
                }
                return Err(err);
            }
        }
    }
}

/// Directory with bounded retry on unreachable reads
pub struct RetryingDirectory<D> {
    inner: D,
    policy: RetryConfig,
}

impl<D: Directory> RetryingDirectory<D> {
    pub fn new(inner: D, policy: RetryConfig) -> Self {
        Self { inner, policy }
    }

    pub fn inner(&self) -> &D {
        &self.inner
    }
}

#[async_trait]
impl<D: Directory> Directory for RetryingDirectory<D> {
    async fn read_unit(&self, uuid: Uuid, at: NaiveDate) -> DirectoryResult<Option<OrgUnit>> {
        with_retry(&self.policy, "directory.read_unit", || {
            self.inner.read_unit(uuid, at)
        })
        .await
    }

    async fn read_root(&self) -> DirectoryResult<Uuid> {
        with_retry(&self.policy, "directory.read_root", || self.inner.read_root()).await
    }
}

/// HR system with bounded retry on unreachable calls.
///
/// Repeating a call is safe because HR system calls are idempotent per
/// `(uuid, at)`.
pub struct RetryingHrSystem<H> {
    inner: H,
    policy: RetryConfig,
}

impl<H: HrSystem> RetryingHrSystem<H> {
    pub fn new(inner: H, policy: RetryConfig) -> Self {
        Self { inner, policy }
    }

    pub fn inner(&self) -> &H {
        &self.inner
    }
}

#[async_trait]
impl<H: HrSystem> HrSystem for RetryingHrSystem<H> {
    async fn create_unit(&self, creation: &UnitCreation) -> HrResult<()> {
        with_retry(&self.policy, "hr.create_unit", || self.inner.create_unit(creation)).await
    }

    async fn rename_unit(&self, uuid: Uuid, name: &str, at: NaiveDate) -> HrResult<()> {
        with_retry(&self.policy, "hr.rename_unit", || {
            self.inner.rename_unit(uuid, name, at)
        })
        .await
    }

    async fn move_unit(&self, uuid: Uuid, new_parent: Uuid, at: NaiveDate) -> HrResult<()> {
        with_retry(&self.policy, "hr.move_unit", || {
            self.inner.move_unit(uuid, new_parent, at)
        })
        .await
    }

    async fn create_address(
        &self,
        unit: Uuid,
        address: &AddressPayload,
        at: NaiveDate,
    ) -> HrResult<()> {
        with_retry(&self.policy, "hr.create_address", || {
            self.inner.create_address(unit, address, at)
        })
        .await
    }

    async fn edit_address(
        &self,
        unit: Uuid,
        address: &AddressPayload,
        at: NaiveDate,
    ) -> HrResult<()> {
        with_retry(&self.policy, "hr.edit_address", || {
            self.inner.edit_address(unit, address, at)
        })
        .await
    }
}

/// Department source with bounded retry on unreachable listings
pub struct RetryingDepartmentSource<S> {
    inner: S,
    policy: RetryConfig,
}

impl<S: DepartmentSource> RetryingDepartmentSource<S> {
    pub fn new(inner: S, policy: RetryConfig) -> Self {
        Self { inner, policy }
    }
}

#[async_trait]
impl<S: DepartmentSource> DepartmentSource for RetryingDepartmentSource<S> {
    async fn list_departments(&self) -> SourceResult<Vec<DepartmentRecord>> {
        with_retry(&self.policy, "source.list_departments", || {
            self.inner.list_departments()
        })
        .await
    }

    async fn list_organization(&self) -> SourceResult<Vec<DepartmentRecord>> {
        with_retry(&self.policy, "source.list_organization", || {
            self.inner.list_organization()
        })
        .await
    }
}
