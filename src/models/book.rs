use std::collections::BTreeMap;

use uuid::Uuid;

use super::enums::{Discipline, FrequencyStatus};
use super::frequency::{Frequency, FrequencyKey};

/// In-memory frequency collection for one episode, keyed by
/// `(discipline, status, is_pho)`.
#[derive(Debug, Clone, Default)]
pub struct FrequencyBook {
    entries: BTreeMap<FrequencyKey, Vec<Frequency>>,
}

impl FrequencyBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, frequency: Frequency) {
        self.entries.entry(frequency.key()).or_default().push(frequency);
    }

    pub fn get(&self, key: &FrequencyKey) -> &[Frequency] {
        self.entries.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// New and current frequencies of one scope, new rows last.
    pub fn scope(&self, discipline: Discipline, is_pho: bool) -> Vec<&Frequency> {
        [FrequencyStatus::Current, FrequencyStatus::New]
            .into_iter()
            .flat_map(|status| {
                self.get(&FrequencyKey {
                    discipline,
                    status,
                    is_pho,
                })
            })
            .collect()
    }

    /// Swaps in an updated record with the same id. Returns false when no
    /// saved record carries that id.
    pub fn replace(&mut self, updated: Frequency) -> bool {
        let Some(id) = updated.id else {
            return false;
        };
        let found = self.entries.iter().find_map(|(key, list)| {
            list.iter()
                .position(|f| f.id == Some(id))
                .map(|pos| (*key, pos))
        });
        let Some((key, pos)) = found else {
            return false;
        };
        if let Some(list) = self.entries.get_mut(&key) {
            list.remove(pos);
        }
        self.insert(updated);
        true
    }

    /// Drops an unsaved `new` row (the only case where a frequency is
    /// hard-deleted). Saved rows are left alone.
    pub fn cancel_unsaved(&mut self, key: &FrequencyKey, index: usize) -> Option<Frequency> {
        if key.status != FrequencyStatus::New {
            return None;
        }
        let list = self.entries.get_mut(key)?;
        if list.get(index).is_some_and(|f| !f.is_saved()) {
            Some(list.remove(index))
        } else {
            None
        }
    }

    pub fn find(&self, id: &Uuid) -> Option<&Frequency> {
        self.iter().find(|f| f.id.as_ref() == Some(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Frequency> {
        self.entries.values().flatten()
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FromIterator<Frequency> for FrequencyBook {
    fn from_iter<I: IntoIterator<Item = Frequency>>(iter: I) -> Self {
        let mut book = Self::new();
        for f in iter {
            book.insert(f);
        }
        book
    }
}
