//! Subcommand implementations

pub mod authorize;
pub mod duplicates;
pub mod simulate;
pub mod tree;

use anyhow::Context;
use orgsync_collaborators::{DirectorySnapshot, InMemoryDirectory, RetryingDirectory};
use orgsync_types::RetryConfig;
use serde::de::DeserializeOwned;
use std::path::Path;

/// Read and parse a JSON export
pub fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
}

/// Directory backed by a snapshot file
pub fn snapshot_directory(
    path: &Path,
    retry: &RetryConfig,
) -> anyhow::Result<RetryingDirectory<InMemoryDirectory>> {
    let snapshot: DirectorySnapshot = read_json(path)?;
    Ok(RetryingDirectory::new(
        InMemoryDirectory::from_snapshot(snapshot),
        retry.clone(),
    ))
}
