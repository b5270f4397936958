use std::collections::HashSet;

use serde::Serialize;

use crate::model::Matchable;

/// Handle to one pool entry. Stays valid until the entry is consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct EntryId(usize);

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Shrinking set of not-yet-claimed candidates, in insertion order.
#[derive(Debug, Clone)]
pub struct MatchPool<R> {
    entries: Vec<(EntryId, R)>,
}

impl<R> Default for MatchPool<R> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<R: Matchable> MatchPool<R> {
    /// Build a pool, keeping the first record for each stable id.
    ///
    /// Records without a stable id are always kept.
    pub fn new(records: impl IntoIterator<Item = R>) -> Self {
        let mut seen: HashSet<String> = HashSet::new();
        let mut entries = Vec::new();

        for record in records {
            if let Some(id) = record.stable_id() {
                if !seen.insert(id.to_string()) {
                    log::warn!("dropping duplicate pool record with stable id '{id}'");
                    continue;
                }
            }
            let entry = EntryId(entries.len());
            entries.push((entry, record));
        }

        Self { entries }
    }
}

impl<R> MatchPool<R> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remaining entries in pool order.
    pub fn iter(&self) -> impl Iterator<Item = (EntryId, &R)> {
        self.entries.iter().map(|(entry, record)| (*entry, record))
    }

    pub fn get(&self, entry: EntryId) -> Option<&R> {
        self.entries
            .iter()
            .find(|(e, _)| *e == entry)
            .map(|(_, record)| record)
    }

    /// Remove an entry so it cannot be matched again.
    ///
    /// Returns `None` if the entry was already consumed.
    pub fn consume(&mut self, entry: EntryId) -> Option<R> {
        let pos = self.entries.iter().position(|(e, _)| *e == entry)?;
        Some(self.entries.remove(pos).1)
    }

    /// Unclaimed records, in pool order.
    pub fn into_remaining(self) -> Vec<R> {
        self.entries.into_iter().map(|(_, record)| record).collect()
    }
}
