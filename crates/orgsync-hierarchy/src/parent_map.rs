//! Parent map built from embedded department chains

use orgsync_types::DepartmentRecord;
use std::collections::BTreeMap;
use uuid::Uuid;

/// What the map knows about one department
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentEntry {
    pub identifier: String,
    pub level: String,
    pub parent: Option<Uuid>,
    /// Name carried on the chain record, if any
    pub name: Option<String>,
}

/// uuid -> entry, deduplicated with the first occurrence winning
#[derive(Debug, Clone, Default)]
pub struct ParentMap {
    entries: BTreeMap<Uuid, ParentEntry>,
}

impl ParentMap {
    pub fn build(records: &[DepartmentRecord]) -> Self {
        let mut entries = BTreeMap::new();

        for record in records {
            for link in record.chain() {
                // Everything above an already-known uuid is known too
                if entries.contains_key(&link.uuid) {
                    break;
                }
                entries.insert(
                    link.uuid,
                    ParentEntry {
                        identifier: link.identifier.clone(),
                        level: link.level.clone(),
                        parent: link.parent_uuid(),
                        name: link.name.clone(),
                    },
                );
            }
        }

        Self { entries }
    }

    pub fn get(&self, uuid: &Uuid) -> Option<&ParentEntry> {
        self.entries.get(uuid)
    }

    pub fn contains(&self, uuid: &Uuid) -> bool {
        self.entries.contains_key(uuid)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries with no parent, ordered by uuid
    pub fn roots(&self) -> Vec<Uuid> {
        self.entries
            .iter()
            .filter(|(_, entry)| entry.parent.is_none())
            .map(|(uuid, _)| *uuid)
            .collect()
    }

    /// parent -> children, each child list ordered by uuid
    pub fn children(&self) -> BTreeMap<Uuid, Vec<Uuid>> {
        let mut children: BTreeMap<Uuid, Vec<Uuid>> = BTreeMap::new();
        for (uuid, entry) in &self.entries {
            if let Some(parent) = entry.parent {
                children.entry(parent).or_default().push(*uuid);
            }
        }
        children
    }
}
