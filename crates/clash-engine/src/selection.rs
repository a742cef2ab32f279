//! The working set of items a user is considering together.
//!
//! Items are unique by id and kept in insertion order. The engine functions
//! take plain slices; the methods here are shorthands that pass the current
//! contents through.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::conflict::{self, ClashPair, ClashResult};
use crate::grid::{self, GridConfig, WeeklyGrid};
use crate::slot::{ItemId, ScheduleItem};
use crate::time::WeekDay;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<ScheduleItem>", into = "Vec<ScheduleItem>")]
pub struct Selection {
    items: Vec<ScheduleItem>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `item`, replacing any entry with the same id in place.
    ///
    /// Returns the replaced entry, if there was one.
    pub fn insert(&mut self, item: ScheduleItem) -> Option<ScheduleItem> {
        match self.items.iter_mut().find(|existing| existing.id == item.id) {
            Some(existing) => {
                trace!(id = %item.id, "replacing selected item");
                Some(std::mem::replace(existing, item))
            }
            None => {
                trace!(id = %item.id, "adding selected item");
                self.items.push(item);
                None
            }
        }
    }

    pub fn remove(&mut self, id: &str) -> Option<ScheduleItem> {
        let pos = self.items.iter().position(|item| item.id.as_str() == id)?;
        Some(self.items.remove(pos))
    }

    pub fn get(&self, id: &str) -> Option<&ScheduleItem> {
        self.items.iter().find(|item| item.id.as_str() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn items(&self) -> &[ScheduleItem] {
        &self.items
    }

    pub fn ids(&self) -> impl Iterator<Item = &ItemId> {
        self.items.iter().map(|item| &item.id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn weekly_minutes(&self) -> u32 {
        self.items.iter().map(ScheduleItem::weekly_minutes).sum()
    }

    /// Selected items that would clash with `candidate`.
    pub fn clashes_with(&self, candidate: &ScheduleItem) -> Vec<&ScheduleItem> {
        conflict::find_clashes(candidate, &self.items)
    }

    pub fn detect_all_clashes(&self) -> Vec<ClashResult> {
        conflict::detect_all_clashes(&self.items)
    }

    pub fn clash_pairs(&self) -> Vec<ClashPair> {
        conflict::clash_pairs(&self.items)
    }

    pub fn weekly_grid(&self, days: &[WeekDay], config: &GridConfig) -> WeeklyGrid {
        grid::build_weekly_grid(&self.items, days, config)
    }
}

/// Later entries win when ids repeat.
impl From<Vec<ScheduleItem>> for Selection {
    fn from(items: Vec<ScheduleItem>) -> Self {
        items.into_iter().collect()
    }
}

impl From<Selection> for Vec<ScheduleItem> {
    fn from(selection: Selection) -> Self {
        selection.items
    }
}

impl FromIterator<ScheduleItem> for Selection {
    fn from_iter<I: IntoIterator<Item = ScheduleItem>>(iter: I) -> Self {
        let mut selection = Selection::new();
        selection.extend(iter);
        selection
    }
}

impl Extend<ScheduleItem> for Selection {
    fn extend<I: IntoIterator<Item = ScheduleItem>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item);
        }
    }
}

impl<'a> IntoIterator for &'a Selection {
    type Item = &'a ScheduleItem;
    type IntoIter = std::slice::Iter<'a, ScheduleItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
