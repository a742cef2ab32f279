//! Day × time-bucket occupancy grid for rendering a weekly timetable.
//!
//! Each day between `day_start` and `day_end` is cut into buckets of
//! `bucket_minutes`; the last bucket is truncated at `day_end` if the window
//! is not a multiple of the bucket size. A slot occupies every bucket whose
//! half-open range intersects its own, so the grid is a coarser restatement
//! of [`slots_overlap`](crate::slot::slots_overlap).
//!
//! Bucket-boundary rounding: an item that only partly covers a bucket (09:05–09:25
//! in the 09:00–09:30 bucket) is recorded with [`Coverage::Partial`]. Coverage
//! is judged on the item's same-day slots merged together, so a lecture at
//! 09:00–10:00 followed by a tutorial at 10:00–11:00 fully covers 09:30–10:30. Two
//! partial occupants may share a cell without actually overlapping, so only
//! cells with two or more [`Coverage::Full`] occupants are guaranteed clashes
//! ([`WeeklyGrid::clash_cells`]). Conversely, every clash whose overlap spans a
//! whole bucket inside the window shows up as such a cell.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ClashError, Result};
use crate::slot::{ItemId, ScheduleItem};
use crate::time::{TimeOfDay, WeekDay};

/// Window and resolution of a [`WeeklyGrid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGridConfig")]
pub struct GridConfig {
    day_start: TimeOfDay,
    day_end: TimeOfDay,
    bucket_minutes: u16,
}

#[derive(Deserialize)]
#[serde(default)]
struct RawGridConfig {
    day_start: TimeOfDay,
    day_end: TimeOfDay,
    bucket_minutes: u16,
}

impl Default for RawGridConfig {
    fn default() -> Self {
        let d = GridConfig::default();
        Self {
            day_start: d.day_start,
            day_end: d.day_end,
            bucket_minutes: d.bucket_minutes,
        }
    }
}

impl TryFrom<RawGridConfig> for GridConfig {
    type Error = ClashError;

    fn try_from(raw: RawGridConfig) -> Result<Self> {
        GridConfig::new(raw.day_start, raw.day_end, raw.bucket_minutes)
    }
}

/// 08:00 to 20:00 in 30-minute buckets.
impl Default for GridConfig {
    fn default() -> Self {
        Self {
            day_start: TimeOfDay::from_minutes(8 * 60).unwrap_or(TimeOfDay::MIDNIGHT),
            day_end: TimeOfDay::from_minutes(20 * 60).unwrap_or(TimeOfDay::MIDNIGHT),
            bucket_minutes: 30,
        }
    }
}

impl GridConfig {
    /// # Errors
    /// Returns `ClashError::InvalidGridConfig` if `bucket_minutes` is zero or
    /// the window is empty.
    pub fn new(day_start: TimeOfDay, day_end: TimeOfDay, bucket_minutes: u16) -> Result<Self> {
        if bucket_minutes == 0 {
            return Err(ClashError::InvalidGridConfig(
                "bucket size must be at least one minute".to_string(),
            ));
        }
        if day_start >= day_end {
            return Err(ClashError::InvalidGridConfig(format!(
                "day start {} is not before day end {}",
                day_start, day_end
            )));
        }
        Ok(Self {
            day_start,
            day_end,
            bucket_minutes,
        })
    }

    pub fn day_start(&self) -> TimeOfDay {
        self.day_start
    }

    pub fn day_end(&self) -> TimeOfDay {
        self.day_end
    }

    pub fn bucket_minutes(&self) -> u16 {
        self.bucket_minutes
    }

    pub fn bucket_count(&self) -> usize {
        let span = self.day_end.minutes() - self.day_start.minutes();
        usize::from(span.div_ceil(self.bucket_minutes))
    }

    /// `[start, end)` of bucket `index`, in minutes since midnight.
    fn bucket_bounds(&self, index: usize) -> (u16, u16) {
        let start = self.day_start.minutes() + index as u16 * self.bucket_minutes;
        let end = start
            .saturating_add(self.bucket_minutes)
            .min(self.day_end.minutes());
        (start, end)
    }
}

/// How much of a bucket an item's slot covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Coverage {
    Full,
    Partial,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occupant {
    pub item_id: ItemId,
    pub coverage: Coverage,
}

/// One bucket on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridCell {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    /// In the order the items were given, one entry per item.
    pub occupants: Vec<Occupant>,
}

impl GridCell {
    pub fn item_ids(&self) -> impl Iterator<Item = &ItemId> {
        self.occupants.iter().map(|o| &o.item_id)
    }

    pub fn full_occupants(&self) -> impl Iterator<Item = &ItemId> {
        self.occupants
            .iter()
            .filter(|o| o.coverage == Coverage::Full)
            .map(|o| &o.item_id)
    }

    /// Two or more items in this bucket, possibly only partially.
    pub fn is_contested(&self) -> bool {
        self.occupants.len() >= 2
    }

    /// Two or more items covering the whole bucket: a certain clash.
    pub fn is_clash(&self) -> bool {
        self.full_occupants().nth(1).is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayColumn {
    pub day: WeekDay,
    pub cells: Vec<GridCell>,
}

/// The rendered week: one column per requested day, one cell per bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyGrid {
    pub config: GridConfig,
    pub columns: Vec<DayColumn>,
}

impl WeeklyGrid {
    pub fn column(&self, day: WeekDay) -> Option<&DayColumn> {
        self.columns.iter().find(|c| c.day == day)
    }

    pub fn cell(&self, day: WeekDay, bucket: usize) -> Option<&GridCell> {
        self.column(day).and_then(|c| c.cells.get(bucket))
    }

    /// Cells where at least two items fully cover the bucket.
    pub fn clash_cells(&self) -> impl Iterator<Item = (WeekDay, &GridCell)> {
        self.cells().filter(|(_, cell)| cell.is_clash())
    }

    /// Cells shared by at least two items, including partial occupants.
    pub fn contested_cells(&self) -> impl Iterator<Item = (WeekDay, &GridCell)> {
        self.cells().filter(|(_, cell)| cell.is_contested())
    }

    fn cells(&self) -> impl Iterator<Item = (WeekDay, &GridCell)> {
        self.columns
            .iter()
            .flat_map(|col| col.cells.iter().map(move |cell| (col.day, cell)))
    }
}

/// Lay `items` out on a grid with one column per entry of `days`.
///
/// Columns follow the order of `days` with repeats dropped. Slots on days not
/// listed, and the parts of slots outside the window, are left out.
pub fn build_weekly_grid(items: &[ScheduleItem], days: &[WeekDay], config: &GridConfig) -> WeeklyGrid {
    let mut ordered_days: Vec<WeekDay> = Vec::with_capacity(days.len());
    for day in days {
        if !ordered_days.contains(day) {
            ordered_days.push(*day);
        }
    }

    let bucket_count = config.bucket_count();
    let window_start = config.day_start.minutes();
    let window_end = config.day_end.minutes();

    let columns: Vec<DayColumn> = ordered_days
        .into_iter()
        .map(|day| {
            let mut cells: Vec<GridCell> = (0..bucket_count)
                .map(|i| {
                    let (start, end) = config.bucket_bounds(i);
                    GridCell {
                        start: minutes_to_time(start),
                        end: minutes_to_time(end),
                        occupants: Vec::new(),
                    }
                })
                .collect();

            for item in items {
                for (from, to) in covered_ranges(item, day, window_start, window_end) {
                    let first = usize::from((from - window_start) / config.bucket_minutes);
                    for (idx, cell) in cells.iter_mut().enumerate().skip(first) {
                        let (bucket_start, bucket_end) = config.bucket_bounds(idx);
                        if bucket_start >= to {
                            break;
                        }
                        let coverage = if from <= bucket_start && to >= bucket_end {
                            Coverage::Full
                        } else {
                            Coverage::Partial
                        };
                        occupy(cell, &item.id, coverage);
                    }
                }
            }

            DayColumn { day, cells }
        })
        .collect();

    let grid = WeeklyGrid {
        config: *config,
        columns,
    };
    debug!(
        items = items.len(),
        days = grid.columns.len(),
        buckets = bucket_count,
        clash_cells = grid.clash_cells().count(),
        "built weekly grid"
    );
    grid
}

/// The item's slots on `day`, clipped to the window and merged where they
/// overlap or touch, as sorted `[from, to)` minute ranges.
fn covered_ranges(item: &ScheduleItem, day: WeekDay, window_start: u16, window_end: u16) -> Vec<(u16, u16)> {
    let mut ranges: Vec<(u16, u16)> = item
        .slots
        .iter()
        .filter(|s| s.day() == day)
        .map(|s| (s.start().minutes().max(window_start), s.end().minutes().min(window_end)))
        .filter(|(from, to)| from < to)
        .collect();
    ranges.sort_unstable();

    let mut merged: Vec<(u16, u16)> = Vec::with_capacity(ranges.len());
    for (from, to) in ranges {
        if let Some(last) = merged.last_mut() {
            if from <= last.1 {
                last.1 = last.1.max(to);
                continue;
            }
        }
        merged.push((from, to));
    }
    merged
}

/// Record `id` in `cell`, upgrading an existing partial entry to full.
fn occupy(cell: &mut GridCell, id: &ItemId, coverage: Coverage) {
    match cell.occupants.iter_mut().find(|o| &o.item_id == id) {
        Some(existing) => {
            if coverage == Coverage::Full {
                existing.coverage = Coverage::Full;
            }
        }
        None => cell.occupants.push(Occupant {
            item_id: id.clone(),
            coverage,
        }),
    }
}

// Bucket bounds never exceed day_end, which is itself a valid time.
fn minutes_to_time(minutes: u16) -> TimeOfDay {
    TimeOfDay::from_minutes(minutes).unwrap_or(TimeOfDay::MIDNIGHT)
}
