//! Static configuration values
//!
//! Configuration is loaded once at startup, validated, and then handed to
//! the gate and orchestrator constructors as immutable values.

use crate::error::{OrgSyncError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;
use uuid::Uuid;

/// Main OrgSync configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrgSyncConfig {
    /// Root units whose subtrees may be propagated to the HR system
    #[serde(default)]
    pub allow_list: Vec<Uuid>,

    #[serde(default)]
    pub hr_system: HrSystemConfig,

    #[serde(default)]
    pub retry: RetryConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl OrgSyncConfig {
    /// Check the configuration; any failure is fatal at startup
    pub fn validate(&self) -> Result<()> {
        if self.allow_list().is_empty() {
            return Err(OrgSyncError::Configuration(
                "allow_list must name at least one unit".into(),
            ));
        }
        self.hr_system.validate()?;
        self.retry.validate()?;
        Ok(())
    }

    pub fn allow_list(&self) -> AllowList {
        AllowList::new(self.allow_list.iter().copied())
    }
}

/// Immutable set of allow-listed root uuids
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowList {
    roots: BTreeSet<Uuid>,
}

impl AllowList {
    pub fn new(roots: impl IntoIterator<Item = Uuid>) -> Self {
        Self {
            roots: roots.into_iter().collect(),
        }
    }

    pub fn contains(&self, uuid: &Uuid) -> bool {
        self.roots.contains(uuid)
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

/// HR system payload shaping and response classification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HrSystemConfig {
    /// Level keys the HR system accepts for new units
    #[serde(default = "default_level_keys")]
    pub level_keys: Vec<String>,

    /// Directory time planning key -> HR time planning value
    #[serde(default)]
    pub time_planning: BTreeMap<String, String>,

    /// Rejection codes meaning the call was already applied
    #[serde(default = "default_duplicate_codes")]
    pub duplicate_codes: Vec<String>,

    /// Rejection codes meaning a postal address must exist first
    #[serde(default = "default_postal_address_codes")]
    pub postal_address_codes: Vec<String>,
}

impl Default for HrSystemConfig {
    fn default() -> Self {
        Self {
            level_keys: default_level_keys(),
            time_planning: BTreeMap::new(),
            duplicate_codes: default_duplicate_codes(),
            postal_address_codes: default_postal_address_codes(),
        }
    }
}

impl HrSystemConfig {
    fn validate(&self) -> Result<()> {
        if self.level_keys.is_empty() {
            return Err(OrgSyncError::Configuration(
                "hr_system.level_keys must not be empty".into(),
            ));
        }
        if let Some(code) = self
            .duplicate_codes
            .iter()
            .find(|code| self.postal_address_codes.contains(code))
        {
            return Err(OrgSyncError::Configuration(format!(
                "rejection code {} is listed as both duplicate and postal address precondition",
                code
            )));
        }
        Ok(())
    }

    pub fn accepts_level(&self, level: &str) -> bool {
        self.level_keys.iter().any(|key| key == level)
    }

    /// HR time planning value for a directory key. Keys match case-insensitively
    /// since layered config sources lowercase them, including non-ASCII letters.
    pub fn time_planning_for(&self, key: &str) -> Option<&str> {
        let key = key.to_lowercase();
        self.time_planning
            .iter()
            .find(|(candidate, _)| candidate.to_lowercase() == key)
            .map(|(_, value)| value.as_str())
    }
}

/// Bounded retry with exponential backoff for upstream calls
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Total attempts including the first one
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,

    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_backoff_ms: default_initial_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
        }
    }
}

impl RetryConfig {
    /// No retries, no waiting
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            initial_backoff_ms: 0,
            max_backoff_ms: 0,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.max_attempts == 0 {
            return Err(OrgSyncError::Configuration(
                "retry.max_attempts must be at least 1".into(),
            ));
        }
        if self.max_backoff_ms < self.initial_backoff_ms {
            return Err(OrgSyncError::Configuration(format!(
                "retry.max_backoff_ms ({}) is below retry.initial_backoff_ms ({})",
                self.max_backoff_ms, self.initial_backoff_ms
            )));
        }
        Ok(())
    }

    /// Delay before the given retry (1-based), doubling up to the ceiling
    pub fn backoff(&self, retry: u32) -> Duration {
        let factor = 1u64 << retry.saturating_sub(1).min(16);
        let millis = self
            .initial_backoff_ms
            .saturating_mul(factor)
            .min(self.max_backoff_ms);
        Duration::from_millis(millis)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// Default value helpers
fn default_level_keys() -> Vec<String> {
    vec![
        "NY6-niveau".into(),
        "NY5-niveau".into(),
        "NY4-niveau".into(),
        "NY3-niveau".into(),
        "NY2-niveau".into(),
        "NY1-niveau".into(),
        "Afdelings-niveau".into(),
    ]
}

fn default_duplicate_codes() -> Vec<String> {
    vec!["ALREADY_APPLIED".into(), "DUPLICATE".into()]
}

fn default_postal_address_codes() -> Vec<String> {
    vec!["MISSING_POSTAL_ADDRESS".into()]
}

fn default_max_attempts() -> u32 {
    3
}

fn default_initial_backoff_ms() -> u64 {
    200
}

fn default_max_backoff_ms() -> u64 {
    2000
}

fn default_log_level() -> String {
    "info".to_string()
}
