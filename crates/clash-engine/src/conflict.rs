//! Detect clashing items in a weekly selection.
//!
//! Two items clash iff any slot of one overlaps any slot of the other (see
//! [`slots_overlap`]). An item never clashes with itself; entries sharing the
//! candidate's id are skipped rather than compared.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::slot::{slots_overlap, ItemId, ScheduleItem, SlotOverlap, TimeSlot};
use crate::time::WeekDay;

/// Per-item clash verdict from [`detect_all_clashes`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClashResult {
    pub item_id: ItemId,
    pub has_clash: bool,
    /// Ids of the clashing items, in input order.
    pub clashing_with: Vec<ItemId>,
}

/// Two clashing items and every range where their slots overlap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClashPair {
    pub item_a: ItemId,
    pub item_b: ItemId,
    pub overlaps: Vec<SlotOverlap>,
}

/// Return the entries of `existing` that clash with `candidate`, in the order
/// they appear in `existing`.
///
/// This is the add-time check: an empty result means the candidate fits.
pub fn find_clashes<'a>(
    candidate: &ScheduleItem,
    existing: &'a [ScheduleItem],
) -> Vec<&'a ScheduleItem> {
    existing
        .iter()
        .filter(|other| other.id != candidate.id && candidate.clashes_with(other))
        .collect()
}

/// Whether `candidate` can join `existing` without any clash.
pub fn fits(candidate: &ScheduleItem, existing: &[ScheduleItem]) -> bool {
    !existing
        .iter()
        .any(|other| other.id != candidate.id && candidate.clashes_with(other))
}

/// Compute a [`ClashResult`] for every item, in input order.
///
/// Equivalent to calling [`find_clashes`] for each item against the whole
/// list, but slots are first grouped by weekday so only same-day slots are
/// compared. The result is symmetric: if A lists B, B lists A.
pub fn detect_all_clashes(items: &[ScheduleItem]) -> Vec<ClashResult> {
    let n = items.len();
    let mut clash = vec![false; n * n];

    for day_slots in slots_by_day(items) {
        for (i, (a_idx, a)) in day_slots.iter().enumerate() {
            for (b_idx, b) in &day_slots[i + 1..] {
                if a_idx == b_idx || clash[a_idx * n + b_idx] {
                    continue;
                }
                if items[*a_idx].id != items[*b_idx].id && slots_overlap(a, b) {
                    clash[a_idx * n + b_idx] = true;
                    clash[b_idx * n + a_idx] = true;
                }
            }
        }
    }

    let results: Vec<ClashResult> = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let clashing_with: Vec<ItemId> = (0..n)
                .filter(|&j| clash[i * n + j])
                .map(|j| items[j].id.clone())
                .collect();
            ClashResult {
                item_id: item.id.clone(),
                has_clash: !clashing_with.is_empty(),
                clashing_with,
            }
        })
        .collect();

    debug!(
        items = n,
        clashing = results.iter().filter(|r| r.has_clash).count(),
        "detected clashes"
    );

    results
}

/// List every clashing pair once, with `item_a` earlier in `items` than
/// `item_b`, together with the overlapping ranges.
pub fn clash_pairs(items: &[ScheduleItem]) -> Vec<ClashPair> {
    let mut pairs = Vec::new();

    for (i, a) in items.iter().enumerate() {
        for b in &items[i + 1..] {
            if a.id == b.id {
                continue;
            }
            let overlaps = a.overlaps_with(b);
            if !overlaps.is_empty() {
                pairs.push(ClashPair {
                    item_a: a.id.clone(),
                    item_b: b.id.clone(),
                    overlaps,
                });
            }
        }
    }

    debug!(items = items.len(), pairs = pairs.len(), "computed clash pairs");
    pairs
}

/// Group every slot by weekday, tagged with the index of its owning item.
fn slots_by_day(items: &[ScheduleItem]) -> Vec<Vec<(usize, TimeSlot)>> {
    let mut by_day: Vec<Vec<(usize, TimeSlot)>> = vec![Vec::new(); WeekDay::ALL.len()];
    for (idx, item) in items.iter().enumerate() {
        for slot in &item.slots {
            by_day[slot.day().index()].push((idx, *slot));
        }
    }
    by_day
}
