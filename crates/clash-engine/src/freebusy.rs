//! Free periods left in a day of the selection.
//!
//! Collects every slot on the requested day, clips it to the grid window,
//! merges overlapping busy ranges, then returns the gaps between them.

use serde::{Deserialize, Serialize};

use crate::grid::GridConfig;
use crate::slot::ScheduleItem;
use crate::time::{TimeOfDay, WeekDay};

/// A gap with no item scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreePeriod {
    pub day: WeekDay,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    pub duration_minutes: u16,
}

/// Merge overlapping or adjacent busy ranges on `day`, clipped to the window.
///
/// Returns a sorted, non-overlapping list of (start, end) pairs.
fn merge_busy_periods(items: &[ScheduleItem], day: WeekDay, config: &GridConfig) -> Vec<(TimeOfDay, TimeOfDay)> {
    let window_start = config.day_start();
    let window_end = config.day_end();

    let mut intervals: Vec<(TimeOfDay, TimeOfDay)> = items
        .iter()
        .flat_map(|item| item.slots.iter())
        .filter(|s| s.day() == day && s.start() < window_end && s.end() > window_start)
        .map(|s| (s.start().max(window_start), s.end().min(window_end)))
        .collect();

    intervals.sort();

    let mut merged: Vec<(TimeOfDay, TimeOfDay)> = Vec::new();
    for (start, end) in intervals {
        if let Some(last) = merged.last_mut() {
            if start <= last.1 {
                last.1 = last.1.max(end);
                continue;
            }
        }
        merged.push((start, end));
    }

    merged
}

/// Free periods on `day` within the grid window, sorted by start.
pub fn free_periods(items: &[ScheduleItem], day: WeekDay, config: &GridConfig) -> Vec<FreePeriod> {
    let period = |start: TimeOfDay, end: TimeOfDay| FreePeriod {
        day,
        start,
        end,
        duration_minutes: end.minutes() - start.minutes(),
    };

    let mut free = Vec::new();
    let mut cursor = config.day_start();

    for (busy_start, busy_end) in merge_busy_periods(items, day, config) {
        if cursor < busy_start {
            free.push(period(cursor, busy_start));
        }
        cursor = cursor.max(busy_end);
    }

    if cursor < config.day_end() {
        free.push(period(cursor, config.day_end()));
    }

    free
}

/// The earliest free period on `day` lasting at least `min_minutes`.
pub fn first_free_period(
    items: &[ScheduleItem],
    day: WeekDay,
    config: &GridConfig,
    min_minutes: u16,
) -> Option<FreePeriod> {
    free_periods(items, day, config)
        .into_iter()
        .find(|p| p.duration_minutes >= min_minutes)
}
