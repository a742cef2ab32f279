//! # clash-engine
//!
//! Clash detection for weekly recurring timetables.
//!
//! A course-selection UI hands the engine a flat list of [`ScheduleItem`]s
//! (course sections, each meeting in one or more weekly [`TimeSlot`]s) and
//! asks it three things: does this candidate clash with what is already
//! selected, which items in the selection clash with each other, and what
//! does the week look like as a renderable grid. Every operation is a pure
//! function over its inputs; the caller owns the [`Selection`].
//!
//! Slots are half-open: a slot ending at 10:30 and one starting at 10:30 on
//! the same day do not clash.
//!
//! ```rust
//! use clash_engine::{detect_all_clashes, ScheduleItem, TimeSlot, WeekDay};
//!
//! let a = ScheduleItem::new("A", "CSE101", "Programming")
//!     .with_slot(TimeSlot::parse(WeekDay::Monday, "09:00", "10:30").unwrap());
//! let b = ScheduleItem::new("B", "MTH102", "Calculus")
//!     .with_slot(TimeSlot::parse(WeekDay::Monday, "10:00 AM", "11:00 AM").unwrap());
//!
//! let report = detect_all_clashes(&[a, b]);
//! assert!(report[0].has_clash);
//! assert_eq!(report[1].clashing_with[0].as_str(), "A");
//! ```
//!
//! ## Modules
//!
//! - [`time`] — `TimeOfDay`, `WeekDay`, and the time-of-day parser
//! - [`slot`] — `TimeSlot`, `ScheduleItem`, the overlap predicate
//! - [`conflict`] — Incremental and batch clash detection
//! - [`grid`] — Day × bucket occupancy grid for rendering
//! - [`freebusy`] — Free periods left in a day
//! - [`selection`] — Id-keyed working set
//! - [`error`] — Error types

pub mod conflict;
pub mod error;
pub mod freebusy;
pub mod grid;
pub mod selection;
pub mod slot;
pub mod time;

pub use conflict::{clash_pairs, detect_all_clashes, find_clashes, fits, ClashPair, ClashResult};
pub use error::ClashError;
pub use freebusy::{first_free_period, free_periods, FreePeriod};
pub use grid::{build_weekly_grid, Coverage, DayColumn, GridCell, GridConfig, Occupant, WeeklyGrid};
pub use selection::Selection;
pub use slot::{slots_overlap, sort_slots, ItemId, ScheduleItem, SectionKind, SlotOverlap, TimeSlot};
pub use time::{compare_time_of_day, parse_time_of_day, TimeOfDay, WeekDay};
