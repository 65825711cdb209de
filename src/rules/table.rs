//! Endpoint path → [`Restriction`] lookup.
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Exact path match only, no prefixes or wildcards
//! - Duplicate endpoints: the later record wins

use std::collections::HashMap;

use crate::rules::record::RestrictionRecord;
use crate::rules::restriction::Restriction;

/// Process-wide rule set, shared behind an `Arc` once built.
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    restrictions: HashMap<String, Restriction>,
}

impl RuleTable {
    /// A table with no restricted endpoints: everything passes through.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build the table from records in file order.
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a RestrictionRecord>,
    {
        let mut restrictions = HashMap::new();
        for record in records {
            if restrictions
                .insert(record.endpoint.clone(), Restriction::from(record))
                .is_some()
            {
                tracing::debug!(
                    endpoint = %record.endpoint,
                    "duplicate endpoint in rules; later record wins"
                );
            }
        }
        Self { restrictions }
    }

    /// Restriction for `path`, if the endpoint is guarded.
    pub fn get(&self, path: &str) -> Option<&Restriction> {
        self.restrictions.get(path)
    }

    pub fn len(&self) -> usize {
        self.restrictions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.restrictions.is_empty()
    }

    /// Guarded endpoint paths, unordered.
    pub fn endpoints(&self) -> impl Iterator<Item = &str> {
        self.restrictions.keys().map(String::as_str)
    }
}
