//! HR system mutation capability

use crate::error::HrError;
use async_trait::async_trait;
use chrono::NaiveDate;
use orgsync_types::{AddressPayload, HrCommand, UnitCreation};
use uuid::Uuid;

/// Result type for HR system calls
pub type HrResult<T> = Result<T, HrError>;

/// Mutating calls against the HR system.
///
/// Implementations must be safe to repeat for the same `(uuid, at)`; a
/// repeated call is expected to either succeed or report one of the
/// configured duplicate rejection codes.
#[async_trait]
pub trait HrSystem: Send + Sync {
    async fn create_unit(&self, creation: &UnitCreation) -> HrResult<()>;

    async fn rename_unit(&self, uuid: Uuid, name: &str, at: NaiveDate) -> HrResult<()>;

    async fn move_unit(&self, uuid: Uuid, new_parent: Uuid, at: NaiveDate) -> HrResult<()>;

    async fn create_address(
        &self,
        unit: Uuid,
        address: &AddressPayload,
        at: NaiveDate,
    ) -> HrResult<()>;

    async fn edit_address(
        &self,
        unit: Uuid,
        address: &AddressPayload,
        at: NaiveDate,
    ) -> HrResult<()>;
}

/// Send a shaped command to the matching HR system call
pub async fn dispatch(hr: &dyn HrSystem, command: &HrCommand) -> HrResult<()> {
    match command {
        HrCommand::CreateUnit(creation) => hr.create_unit(creation).await,
        HrCommand::RenameUnit { uuid, name, at } => hr.rename_unit(*uuid, name, *at).await,
        HrCommand::MoveUnit {
            uuid,
            new_parent,
            at,
        } => hr.move_unit(*uuid, *new_parent, *at).await,
        HrCommand::CreateAddress { unit, address, at } => {
            hr.create_address(*unit, address, *at).await
        }
        HrCommand::EditAddress { unit, address, at } => hr.edit_address(*unit, address, *at).await,
    }
}
