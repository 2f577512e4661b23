//! Allow-list gate backed by directory reads

use crate::gate::ScopeGate;
use async_trait::async_trait;
use chrono::NaiveDate;
use orgsync_collaborators::Directory;
use orgsync_types::{AllowList, OrgSyncError, OrgUnit, Result};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, instrument};
use uuid::Uuid;

/// Walks ancestor links until an allow-listed root or the top of the tree
pub struct AllowListGate {
    allow_list: AllowList,
    directory: Arc<dyn Directory>,
}

impl AllowListGate {
    pub fn new(allow_list: AllowList, directory: Arc<dyn Directory>) -> Self {
        Self {
            allow_list,
            directory,
        }
    }

    async fn read(&self, uuid: Uuid, at: NaiveDate) -> Result<OrgUnit> {
        self.directory
            .read_unit(uuid, at)
            .await?
            .ok_or_else(|| OrgSyncError::unit_not_found(&uuid))
    }
}

#[async_trait]
impl ScopeGate for AllowListGate {
    #[instrument(skip(self), fields(allow_list = self.allow_list.len()))]
    async fn is_authorized(&self, unit: Uuid, at: NaiveDate) -> Result<bool> {
        let mut visited = HashSet::new();
        let mut current = self.read(unit, at).await?;

        loop {
            if !visited.insert(current.uuid) {
                return Err(OrgSyncError::Integrity(format!(
                    "parent cycle through {} while authorizing {}",
                    current.uuid, unit
                )));
            }

            if self.allow_list.contains(&current.uuid) {
                debug!(
                    root = %current.uuid,
                    depth = visited.len() - 1,
                    "Reached allow-listed root"
                );
                return Ok(true);
            }

            match current.parent {
                Some(parent) => {
                    debug!(from = %current.uuid, to = %parent, "Ascending");
                    current = self.read(parent, at).await?;
                }
                None => {
                    debug!(top = %current.uuid, "Chain exhausted without an allow-listed root");
                    return Ok(false);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orgsync_collaborators::InMemoryDirectory;
    use orgsync_types::Upstream;

    fn at() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    fn unit(uuid: Uuid, parent: Option<Uuid>) -> OrgUnit {
        OrgUnit::new(uuid, format!("unit-{}", &uuid.to_string()[..8]), parent, at())
    }

    /// root -> allowed -> mid -> leaf, plus root -> outside
    struct Fixture {
        directory: Arc<InMemoryDirectory>,
        allowed: Uuid,
        mid: Uuid,
        leaf: Uuid,
        outside: Uuid,
    }

    fn fixture() -> Fixture {
        let root = Uuid::new_v4();
        let allowed = Uuid::new_v4();
        let mid = Uuid::new_v4();
        let leaf = Uuid::new_v4();
        let outside = Uuid::new_v4();

        let directory = InMemoryDirectory::new(root)
            .with_unit(unit(root, None))
            .with_unit(unit(allowed, Some(root)))
            .with_unit(unit(mid, Some(allowed)))
            .with_unit(unit(leaf, Some(mid)))
            .with_unit(unit(outside, Some(root)));

        Fixture {
            directory: Arc::new(directory),
            allowed,
            mid,
            leaf,
            outside,
        }
    }

    fn gate(fixture: &Fixture) -> AllowListGate {
        AllowListGate::new(AllowList::new([fixture.allowed]), fixture.directory.clone())
    }

    #[tokio::test]
    async fn test_descendant_of_allowed_root_is_authorized() {
        let fixture = fixture();
        let gate = gate(&fixture);

        assert!(gate.is_authorized(fixture.leaf, at()).await.unwrap());
        assert!(gate.is_authorized(fixture.allowed, at()).await.unwrap());
        // three reads walking up from leaf, one for allowed itself
        assert_eq!(fixture.directory.reads().len(), 4);
    }

    #[tokio::test]
    async fn test_unit_outside_scope_is_not_authorized() {
        let fixture = fixture();
        let gate = gate(&fixture);

        assert!(!gate.is_authorized(fixture.outside, at()).await.unwrap());

        let err = gate.authorize(fixture.outside, at()).await.unwrap_err();
        assert!(matches!(err, OrgSyncError::Policy(_)));
    }

    #[tokio::test]
    async fn test_absent_unit_is_not_found() {
        let fixture = fixture();
        let gate = gate(&fixture);

        let err = gate.authorize(Uuid::new_v4(), at()).await.unwrap_err();
        assert!(matches!(err, OrgSyncError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_unit_not_yet_valid_is_not_found() {
        let fixture = fixture();
        let gate = gate(&fixture);
        let earlier = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();

        let err = gate.is_authorized(fixture.mid, earlier).await.unwrap_err();
        assert!(matches!(err, OrgSyncError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_cycle_is_integrity_error() {
        let root = Uuid::new_v4();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let directory = InMemoryDirectory::new(root)
            .with_unit(unit(a, Some(b)))
            .with_unit(unit(b, Some(a)));
        let gate = AllowListGate::new(AllowList::new([Uuid::new_v4()]), Arc::new(directory));

        let err = gate.is_authorized(a, at()).await.unwrap_err();
        assert!(matches!(err, OrgSyncError::Integrity(_)));
    }

    #[tokio::test]
    async fn test_unreachable_directory_is_upstream_unavailable() {
        let fixture = fixture();
        fixture.directory.fail_next_reads(1);
        let gate = gate(&fixture);

        let err = gate.is_authorized(fixture.leaf, at()).await.unwrap_err();
        assert!(matches!(
            err,
            OrgSyncError::UpstreamUnavailable {
                system: Upstream::Directory,
                ..
            }
        ));
    }
}
