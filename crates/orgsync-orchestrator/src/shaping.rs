//! Payload validation and HR command shaping
//!
//! Everything here is pure; it runs identically for live and dry-run events.

use chrono::NaiveDate;
use orgsync_types::{
    AddressPayload, HrCommand, HrSystemConfig, OrgSyncError, OrgUnit, ParentSnapshot, Result,
    UnitCreation, UnitPayload,
};
use uuid::Uuid;

/// HR-side values of a unit payload that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitFields {
    pub level: String,
    pub time_planning: Option<String>,
}

/// Validates payloads against the HR system configuration
pub struct CommandShaper<'a> {
    config: &'a HrSystemConfig,
}

impl<'a> CommandShaper<'a> {
    pub fn new(config: &'a HrSystemConfig) -> Self {
        Self { config }
    }

    /// Checks for a unit payload that need no directory access
    pub fn check_unit_payload(&self, payload: &UnitPayload) -> Result<UnitFields> {
        require_text("unit name", &payload.name)?;

        let level = payload
            .level
            .as_deref()
            .ok_or_else(|| OrgSyncError::Validation("unit level is required".into()))?;
        if !self.config.accepts_level(level) {
            return Err(OrgSyncError::Validation(format!(
                "unit level '{}' is not one of the HR level keys ({})",
                level,
                self.config.level_keys.join(", ")
            )));
        }

        let time_planning = payload
            .time_planning
            .as_deref()
            .map(|value| {
                self.config.time_planning_for(value).map(str::to_string).ok_or_else(|| {
                    OrgSyncError::Validation(format!(
                        "time planning '{}' has no HR system mapping",
                        value
                    ))
                })
            })
            .transpose()?;

        Ok(UnitFields {
            level: level.to_string(),
            time_planning,
        })
    }

    /// Shape a creation from a payload already checked by [`Self::check_unit_payload`]
    pub fn create_unit(
        &self,
        uuid: Uuid,
        payload: &UnitPayload,
        fields: UnitFields,
        parent: &OrgUnit,
        at: NaiveDate,
    ) -> HrCommand {
        HrCommand::CreateUnit(UnitCreation {
            uuid,
            name: payload.name.trim().to_string(),
            level: fields.level,
            time_planning: fields.time_planning,
            parent: ParentSnapshot::from(parent),
            at,
        })
    }

    pub fn rename_unit(&self, uuid: Uuid, new_name: &str, at: NaiveDate) -> Result<HrCommand> {
        require_text("new unit name", new_name)?;

        Ok(HrCommand::RenameUnit {
            uuid,
            name: new_name.trim().to_string(),
            at,
        })
    }

    pub fn move_unit(&self, uuid: Uuid, new_parent: Uuid, at: NaiveDate) -> Result<HrCommand> {
        if uuid == new_parent {
            return Err(OrgSyncError::Validation(format!(
                "unit {} cannot be moved under itself",
                uuid
            )));
        }

        Ok(HrCommand::MoveUnit {
            uuid,
            new_parent,
            at,
        })
    }

    pub fn check_address(&self, payload: &AddressPayload) -> Result<()> {
        require_text("address value", &payload.value)
    }
}

fn require_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(OrgSyncError::Validation(format!("{} must not be blank", field)));
    }
    Ok(())
}
