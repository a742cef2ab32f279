//! Weekly time slots, schedulable items, and the overlap predicate.
//!
//! A [`TimeSlot`] occupies the half-open minute range `[start, end)` on one
//! weekday. Every clash decision in this crate reduces to [`slots_overlap`].

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ClashError, Result};
use crate::time::{parse_time_of_day, TimeOfDay, WeekDay};

/// One recurring weekly meeting. `start < end` always holds.
///
/// Ordering is by (day, start, end), which is the canonical display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawSlot")]
pub struct TimeSlot {
    day: WeekDay,
    start: TimeOfDay,
    end: TimeOfDay,
}

#[derive(Deserialize)]
struct RawSlot {
    day: WeekDay,
    start: TimeOfDay,
    end: TimeOfDay,
}

impl TryFrom<RawSlot> for TimeSlot {
    type Error = ClashError;

    fn try_from(raw: RawSlot) -> Result<Self> {
        TimeSlot::new(raw.day, raw.start, raw.end)
    }
}

impl TimeSlot {
    /// # Errors
    /// Returns `ClashError::InvalidSlot` when `start >= end`. A zero-length
    /// slot would silently overlap nothing, hiding real clashes.
    pub fn new(day: WeekDay, start: TimeOfDay, end: TimeOfDay) -> Result<Self> {
        if start >= end {
            return Err(ClashError::InvalidSlot { day, start, end });
        }
        Ok(Self { day, start, end })
    }

    /// Parse both ends with [`parse_time_of_day`] and build the slot.
    pub fn parse(day: WeekDay, start: &str, end: &str) -> Result<Self> {
        Self::new(day, parse_time_of_day(start)?, parse_time_of_day(end)?)
    }

    pub fn day(&self) -> WeekDay {
        self.day
    }

    pub fn start(&self) -> TimeOfDay {
        self.start
    }

    pub fn end(&self) -> TimeOfDay {
        self.end
    }

    pub fn duration_minutes(&self) -> u16 {
        self.end.minutes() - self.start.minutes()
    }

    /// The shared range with `other`, if the two slots overlap.
    pub fn overlap_with(&self, other: &TimeSlot) -> Option<SlotOverlap> {
        if !slots_overlap(self, other) {
            return None;
        }
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        Some(SlotOverlap {
            day: self.day,
            start,
            end,
            minutes: end.minutes() - start.minutes(),
        })
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}-{}", self.day.short_name(), self.start, self.end)
    }
}

/// True iff both slots fall on the same day and `[a.start, a.end)` intersects
/// `[b.start, b.end)`.
///
/// Back-to-back slots (`a.end == b.start`) do not overlap.
pub fn slots_overlap(a: &TimeSlot, b: &TimeSlot) -> bool {
    a.day == b.day && a.start < b.end && b.start < a.end
}

/// Sort slots by (weekday, start, end) ascending.
pub fn sort_slots(slots: &[TimeSlot]) -> Vec<TimeSlot> {
    let mut sorted = slots.to_vec();
    sorted.sort();
    sorted
}

/// The range two overlapping slots share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotOverlap {
    pub day: WeekDay,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    pub minutes: u16,
}

/// Stable identifier of a [`ScheduleItem`], unique within a working set.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        ItemId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        ItemId(s.to_string())
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        ItemId(s)
    }
}

impl Borrow<str> for ItemId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Which component of a course a section is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Lecture,
    Tutorial,
    Lab,
    Other,
}

/// A schedulable unit: a course, or one section/component of a course.
///
/// An item with no slots occupies no time and never clashes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleItem {
    pub id: ItemId,
    /// Short display label, e.g. "CSE102A".
    pub code: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<SectionKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructor: Option<String>,
    #[serde(default)]
    pub slots: Vec<TimeSlot>,
}

impl ScheduleItem {
    pub fn new(id: impl Into<ItemId>, code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            code: code.into(),
            name: name.into(),
            kind: None,
            instructor: None,
            slots: Vec::new(),
        }
    }

    pub fn with_slot(mut self, slot: TimeSlot) -> Self {
        self.slots.push(slot);
        self
    }

    pub fn with_slots(mut self, slots: impl IntoIterator<Item = TimeSlot>) -> Self {
        self.slots.extend(slots);
        self
    }

    pub fn with_kind(mut self, kind: SectionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_instructor(mut self, instructor: impl Into<String>) -> Self {
        self.instructor = Some(instructor.into());
        self
    }

    /// Total minutes this item meets per week.
    pub fn weekly_minutes(&self) -> u32 {
        self.slots.iter().map(|s| u32::from(s.duration_minutes())).sum()
    }

    /// Every overlap between this item's slots and `other`'s, in slot order.
    pub fn overlaps_with(&self, other: &ScheduleItem) -> Vec<SlotOverlap> {
        self.slots
            .iter()
            .flat_map(|a| other.slots.iter().filter_map(move |b| a.overlap_with(b)))
            .collect()
    }

    /// True as soon as any slot of `self` overlaps any slot of `other`.
    pub fn clashes_with(&self, other: &ScheduleItem) -> bool {
        self.slots
            .iter()
            .any(|a| other.slots.iter().any(|b| slots_overlap(a, b)))
    }
}
