//! Forest construction and text rendering

use crate::parent_map::ParentMap;
use orgsync_types::{DepartmentRecord, OrgSyncError, Result};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use uuid::Uuid;

/// One department with its children ordered by uuid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub uuid: Uuid,
    pub name: String,
    pub identifier: String,
    pub level: String,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// `name (identifier, uuid)`
    pub fn label(&self) -> String {
        format!("{} ({}, {})", self.name, self.identifier, self.uuid)
    }

    /// Number of nodes in this subtree, itself included
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(TreeNode::size).sum::<usize>()
    }

    /// Pre-order text lines with tree-drawing prefixes
    pub fn lines(&self) -> Vec<String> {
        let mut out = vec![self.label()];
        push_children(self, "", &mut out);
        out
    }
}

fn push_children(node: &TreeNode, indent: &str, out: &mut Vec<String>) {
    let last = node.children.len().saturating_sub(1);
    for (i, child) in node.children.iter().enumerate() {
        let (branch, continuation) = if i == last {
            ("└── ", "    ")
        } else {
            ("├── ", "│   ")
        };
        out.push(format!("{}{}{}", indent, branch, child.label()));
        push_children(child, &format!("{}{}", indent, continuation), out);
    }
}

/// Trees with disjoint roots, ordered by root uuid
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Forest {
    trees: Vec<TreeNode>,
}

impl Forest {
    pub fn trees(&self) -> &[TreeNode] {
        &self.trees
    }

    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.trees.iter().map(TreeNode::size).sum()
    }
}

/// Each tree followed by a blank line
impl fmt::Display for Forest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for tree in &self.trees {
            for line in tree.lines() {
                writeln!(f, "{}", line)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Build the forest using names carried on the records themselves
pub fn build_forest(records: &[DepartmentRecord], root: Option<Uuid>) -> Result<Forest> {
    build_forest_with_listing(records, &[], root)
}

/// Build the forest from parent chains, labelling nodes from the flat
/// `listing` where it names them.
///
/// With `root` set, only that subtree is built. A root that no chain
/// mentions but the listing does becomes a single-node tree; a root in
/// neither is NotFound. Otherwise every department without a parent
/// starts a tree.
pub fn build_forest_with_listing(
    records: &[DepartmentRecord],
    listing: &[DepartmentRecord],
    root: Option<Uuid>,
) -> Result<Forest> {
    let map = ParentMap::build(records);

    let roots = match root {
        Some(root) if map.contains(&root) => vec![root],
        Some(root) => {
            let record = listing.iter().find(|record| record.uuid == root).ok_or_else(|| {
                OrgSyncError::NotFound(format!("department {} is not in the listing", root))
            })?;
            return Ok(Forest {
                trees: vec![TreeNode {
                    uuid: record.uuid,
                    name: record.name.clone().unwrap_or_else(|| record.identifier.clone()),
                    identifier: record.identifier.clone(),
                    level: record.level.clone(),
                    children: Vec::new(),
                }],
            });
        }
        None => map.roots(),
    };

    let names: HashMap<Uuid, String> = listing
        .iter()
        .filter_map(|record| record.name.clone().map(|name| (record.uuid, name)))
        .collect();

    let builder = Builder {
        map: &map,
        children: map.children(),
        names: &names,
    };

    let mut trees = Vec::with_capacity(roots.len());
    for uuid in roots {
        let mut path = HashSet::new();
        trees.push(builder.expand(uuid, &mut path)?);
    }

    Ok(Forest { trees })
}

struct Builder<'a> {
    map: &'a ParentMap,
    children: BTreeMap<Uuid, Vec<Uuid>>,
    names: &'a HashMap<Uuid, String>,
}

impl Builder<'_> {
    fn expand(&self, uuid: Uuid, path: &mut HashSet<Uuid>) -> Result<TreeNode> {
        if !path.insert(uuid) {
            return Err(OrgSyncError::Integrity(format!(
                "department {} is its own ancestor",
                uuid
            )));
        }

        let entry = self
            .map
            .get(&uuid)
            .ok_or_else(|| OrgSyncError::NotFound(format!("department {}", uuid)))?;

        let children = self
            .children
            .get(&uuid)
            .map(|kids| {
                kids.iter()
                    .map(|child| self.expand(*child, path))
                    .collect::<Result<Vec<_>>>()
            })
            .transpose()?
            .unwrap_or_default();

        path.remove(&uuid);

        let name = self
            .names
            .get(&uuid)
            .cloned()
            .or_else(|| entry.name.clone())
            .unwrap_or_else(|| entry.identifier.clone());

        Ok(TreeNode {
            uuid,
            name,
            identifier: entry.identifier.clone(),
            level: entry.level.clone(),
            children,
        })
    }
}
