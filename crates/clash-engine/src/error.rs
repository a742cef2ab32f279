//! Error types for clash-engine operations.

use thiserror::Error;

use crate::time::{TimeOfDay, WeekDay};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClashError {
    #[error("Invalid time format: {0}")]
    InvalidTimeFormat(String),

    /// A slot whose start is not strictly before its end.
    #[error("Invalid slot on {day}: start {start} is not before end {end}")]
    InvalidSlot {
        day: WeekDay,
        start: TimeOfDay,
        end: TimeOfDay,
    },

    #[error("Unknown weekday: {0}")]
    UnknownWeekDay(String),

    #[error("Invalid grid config: {0}")]
    InvalidGridConfig(String),
}

pub type Result<T> = std::result::Result<T, ClashError>;
