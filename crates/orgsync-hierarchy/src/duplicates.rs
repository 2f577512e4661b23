//! Duplicate business identifier detection

use orgsync_types::DepartmentRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An identifier used by more than one department
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateIdentifier {
    pub identifier: String,
    pub count: usize,
}

/// Identifiers seen more than once, most frequent first, ties in first-seen order
pub fn count_duplicates<'a, I>(identifiers: I) -> Vec<DuplicateIdentifier>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<DuplicateIdentifier> = Vec::new();

    for identifier in identifiers {
        match index.get(identifier) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(identifier, counts.len());
                counts.push(DuplicateIdentifier {
                    identifier: identifier.to_string(),
                    count: 1,
                });
            }
        }
    }

    counts.retain(|entry| entry.count > 1);
    // stable, so ties keep first-seen order
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

pub fn duplicate_identifiers(records: &[DepartmentRecord]) -> Vec<DuplicateIdentifier> {
    count_duplicates(records.iter().map(|record| record.identifier.as_str()))
}
