//! `clash` CLI — run the timetable clash engine over a JSON selection.
//!
//! A selection is a JSON array of items:
//! `[{"id": "A", "code": "CSE101", "name": "...", "slots": [{"day": "Mon", "start": "9:00", "end": "10:30"}]}]`
//!
//! ## Usage
//!
//! ```sh
//! # Per-item clash report (stdin → stdout)
//! clash check < selection.json
//!
//! # Fail with a non-zero exit status when anything clashes
//! clash check --strict -i selection.json
//!
//! # Would this section fit into the current selection?
//! clash fits --candidate lab.json -i selection.json
//!
//! # Which items does CSE101 (id "A") clash with?
//! clash fits --candidate A -i selection.json
//!
//! # Every clashing pair with the overlapping ranges
//! clash pairs -i selection.json --pretty
//!
//! # Text timetable, 15-minute rows from 08:00 to 18:00
//! clash grid -i selection.json --bucket-minutes 15 --day-end 18:00
//!
//! # Free periods on Wednesday of at least an hour
//! clash free --day Wed --min-minutes 60 -i selection.json
//!
//! # Normalize a time string
//! clash parse-time "2:30 PM"
//! ```

mod render;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use clash_engine::{GridConfig, ScheduleItem, TimeSlot, WeekDay};
use serde::Serialize;
use std::io::{self, Read};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "clash", version, about = "Weekly timetable clash checker")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log engine activity to stderr (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Report, for every item, which other items it clashes with
    Check {
        /// Selection JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Exit with an error if any item clashes
        #[arg(long)]
        strict: bool,
    },
    /// Check whether a candidate item fits into the selection
    Fits {
        /// Selection JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Id of an item already in the selection, or a JSON file holding the candidate item
        #[arg(short, long)]
        candidate: String,
    },
    /// List every clashing pair with the overlapping ranges
    Pairs {
        /// Selection JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Render the weekly grid
    Grid {
        /// Selection JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Emit the grid as JSON instead of a text table
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        window: WindowArgs,
    },
    /// List free periods on one day
    Free {
        /// Selection JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Day to inspect (e.g. "Mon", "wednesday", "FR")
        #[arg(long)]
        day: String,
        /// Only report periods at least this long
        #[arg(long, default_value_t = 0)]
        min_minutes: u16,
        #[command(flatten)]
        window: WindowArgs,
    },
    /// Normalize a time string to 24-hour HH:MM
    ParseTime {
        /// e.g. "14:00", "2:00 PM", "9 am"
        raw: String,
    },
    /// Sort a JSON array of slots by day, then start time
    Sort {
        /// Slots JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

/// Grid window flags shared by `grid` and `free`.
#[derive(Args)]
struct WindowArgs {
    /// First time shown
    #[arg(long, default_value = "08:00")]
    day_start: String,
    /// Time the last row ends
    #[arg(long, default_value = "20:00")]
    day_end: String,
    /// Row size in minutes
    #[arg(long, default_value_t = 30)]
    bucket_minutes: u16,
    /// Comma-separated days to show
    #[arg(long, default_value = "Mon,Tue,Wed,Thu,Fri,Sat")]
    days: String,
}

impl WindowArgs {
    fn grid_config(&self) -> Result<GridConfig> {
        let start = clash_engine::parse_time_of_day(&self.day_start).context("Invalid --day-start")?;
        let end = clash_engine::parse_time_of_day(&self.day_end).context("Invalid --day-end")?;
        Ok(GridConfig::new(start, end, self.bucket_minutes)?)
    }

    fn days(&self) -> Result<Vec<WeekDay>> {
        self.days
            .split(',')
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(|d| d.parse::<WeekDay>().with_context(|| format!("Invalid --days entry '{}'", d)))
            .collect()
    }
}

#[derive(Serialize)]
struct FitsReport<'a> {
    fits: bool,
    clashing_with: Vec<&'a str>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Check { input, strict } => {
            let items = read_items(input.as_deref())?;
            let report = clash_engine::detect_all_clashes(&items);
            print_json(&report, cli.pretty)?;

            let clashing = report.iter().filter(|r| r.has_clash).count();
            info!(items = items.len(), clashing, "checked selection");
            if strict && clashing > 0 {
                bail!("{} of {} items clash", clashing, items.len());
            }
        }
        Commands::Fits { input, candidate } => {
            let items = read_items(input.as_deref())?;
            let candidate = match items.iter().find(|item| item.id.as_str() == candidate) {
                Some(item) => item.clone(),
                None => {
                    let candidate_json = read_input(Some(&candidate))?;
                    serde_json::from_str::<ScheduleItem>(&candidate_json)
                        .context("Failed to parse candidate item")?
                }
            };

            let clashes = clash_engine::find_clashes(&candidate, &items);
            let report = FitsReport {
                fits: clashes.is_empty(),
                clashing_with: clashes.iter().map(|item| item.id.as_str()).collect(),
            };
            print_json(&report, cli.pretty)?;
        }
        Commands::Pairs { input } => {
            let items = read_items(input.as_deref())?;
            print_json(&clash_engine::clash_pairs(&items), cli.pretty)?;
        }
        Commands::Grid {
            input,
            json,
            window,
        } => {
            let items = read_items(input.as_deref())?;
            let grid = clash_engine::build_weekly_grid(&items, &window.days()?, &window.grid_config()?);
            if json {
                print_json(&grid, cli.pretty)?;
            } else {
                print!("{}", render::render_grid(&grid, &items));
            }
        }
        Commands::Free {
            input,
            day,
            min_minutes,
            window,
        } => {
            let items = read_items(input.as_deref())?;
            let day: WeekDay = day.parse().context("Invalid --day")?;
            let periods: Vec<_> = clash_engine::free_periods(&items, day, &window.grid_config()?)
                .into_iter()
                .filter(|p| p.duration_minutes >= min_minutes)
                .collect();
            print_json(&periods, cli.pretty)?;
        }
        Commands::ParseTime { raw } => {
            let time = clash_engine::parse_time_of_day(&raw)?;
            println!("{}", time);
        }
        Commands::Sort { input } => {
            let json = read_input(input.as_deref())?;
            let slots: Vec<TimeSlot> = serde_json::from_str(&json).context("Failed to parse slots JSON")?;
            print_json(&clash_engine::sort_slots(&slots), cli.pretty)?;
        }
    }

    Ok(())
}

/// Logs go to stderr so JSON on stdout stays clean. `-v` forces debug level;
/// otherwise `RUST_LOG` applies, defaulting to warnings only.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_items(path: Option<&str>) -> Result<Vec<ScheduleItem>> {
    let json = read_input(path)?;
    let items: Vec<ScheduleItem> =
        serde_json::from_str(&json).context("Failed to parse selection JSON")?;
    debug!(items = items.len(), "loaded selection");
    Ok(items)
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", out);
    Ok(())
}
