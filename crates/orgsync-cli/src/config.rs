//! Configuration loading
//!
//! Sources, lowest precedence first: built-in defaults, the optional config
//! file, then `ORGSYNC_` environment variables. Nested keys use a double
//! underscore (`ORGSYNC_RETRY__MAX_ATTEMPTS=5`); `ORGSYNC_ALLOW_LIST` takes a
//! comma-separated list of uuids.

use anyhow::Context;
use orgsync_types::OrgSyncConfig;

pub fn load(path: Option<&str>) -> anyhow::Result<OrgSyncConfig> {
    let config = build(path).context("failed to load configuration")?;
    config.validate()?;
    Ok(config)
}

fn build(path: Option<&str>) -> Result<OrgSyncConfig, config::ConfigError> {
    let mut builder = config::Config::builder();

    // Add default configuration
    builder = builder.add_source(config::Config::try_from(&OrgSyncConfig::default())?);

    // An explicitly named file must exist
    if let Some(path) = path {
        builder = builder.add_source(config::File::with_name(path).required(true));
    }

    // Add environment variables with ORGSYNC_ prefix
    builder = builder.add_source(
        config::Environment::with_prefix("ORGSYNC")
            .prefix_separator("_")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("allow_list")
            .try_parsing(true),
    );

    builder.build()?.try_deserialize()
}
