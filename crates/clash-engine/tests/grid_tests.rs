//! Tests for the weekly occupancy grid.

use clash_engine::{
    build_weekly_grid, detect_all_clashes, parse_time_of_day, ClashError, Coverage, GridConfig,
    ScheduleItem, TimeSlot, WeekDay,
};

fn item(id: &str, slots: &[(WeekDay, &str, &str)]) -> ScheduleItem {
    ScheduleItem::new(id, id, id).with_slots(
        slots
            .iter()
            .map(|(day, start, end)| TimeSlot::parse(*day, start, end).unwrap()),
    )
}

fn config(start: &str, end: &str, bucket: u16) -> GridConfig {
    GridConfig::new(
        parse_time_of_day(start).unwrap(),
        parse_time_of_day(end).unwrap(),
        bucket,
    )
    .unwrap()
}

fn occupants(grid: &clash_engine::WeeklyGrid, day: WeekDay, bucket: usize) -> Vec<(String, Coverage)> {
    grid.cell(day, bucket)
        .unwrap()
        .occupants
        .iter()
        .map(|o| (o.item_id.to_string(), o.coverage))
        .collect()
}

// ── Layout ──────────────────────────────────────────────────────────────────

#[test]
fn default_config_is_eight_to_eight_in_half_hours() {
    let config = GridConfig::default();
    assert_eq!(config.day_start().to_string(), "08:00");
    assert_eq!(config.day_end().to_string(), "20:00");
    assert_eq!(config.bucket_minutes(), 30);
    assert_eq!(config.bucket_count(), 24);
}

#[test]
fn cells_carry_bucket_bounds() {
    let grid = build_weekly_grid(&[], &WeekDay::TEACHING, &GridConfig::default());

    assert_eq!(grid.columns.len(), 6);
    let cell = grid.cell(WeekDay::Monday, 2).unwrap();
    assert_eq!(cell.start.to_string(), "09:00");
    assert_eq!(cell.end.to_string(), "09:30");
    assert!(cell.occupants.is_empty());
    assert!(grid.cell(WeekDay::Sunday, 0).is_none());
}

#[test]
fn last_bucket_is_truncated_at_day_end() {
    let config = config("08:00", "09:45", 30);
    assert_eq!(config.bucket_count(), 4);

    let a = item("A", &[(WeekDay::Monday, "09:30", "09:45")]);
    let grid = build_weekly_grid(&[a], &[WeekDay::Monday], &config);

    let last = grid.cell(WeekDay::Monday, 3).unwrap();
    assert_eq!(last.start.to_string(), "09:30");
    assert_eq!(last.end.to_string(), "09:45");
    assert_eq!(occupants(&grid, WeekDay::Monday, 3), vec![("A".to_string(), Coverage::Full)]);
}

#[test]
fn columns_follow_requested_day_order_without_repeats() {
    let grid = build_weekly_grid(
        &[],
        &[WeekDay::Wednesday, WeekDay::Monday, WeekDay::Wednesday],
        &GridConfig::default(),
    );
    let days: Vec<WeekDay> = grid.columns.iter().map(|c| c.day).collect();
    assert_eq!(days, vec![WeekDay::Wednesday, WeekDay::Monday]);
}

#[test]
fn unlisted_days_are_left_out() {
    let sunday = item("S", &[(WeekDay::Sunday, "10:00", "11:00")]);
    let grid = build_weekly_grid(&[sunday], &WeekDay::TEACHING, &GridConfig::default());
    assert_eq!(grid.contested_cells().count(), 0);
    assert!(grid
        .columns
        .iter()
        .all(|c| c.cells.iter().all(|cell| cell.occupants.is_empty())));
}

// ── Occupancy ───────────────────────────────────────────────────────────────

#[test]
fn seed_selection_grid() {
    let a = item("A", &[(WeekDay::Monday, "09:00", "10:30")]);
    let b = item("B", &[(WeekDay::Monday, "10:00", "11:00")]);
    let c = item("C", &[(WeekDay::Tuesday, "09:00", "10:30")]);

    let grid = build_weekly_grid(&[a, b, c], &WeekDay::TEACHING, &GridConfig::default());

    // 09:00, 09:30 → A only; 10:00 → A and B; 10:30 → B only.
    assert_eq!(occupants(&grid, WeekDay::Monday, 2), vec![("A".to_string(), Coverage::Full)]);
    assert_eq!(occupants(&grid, WeekDay::Monday, 3), vec![("A".to_string(), Coverage::Full)]);
    assert_eq!(
        occupants(&grid, WeekDay::Monday, 4),
        vec![("A".to_string(), Coverage::Full), ("B".to_string(), Coverage::Full)]
    );
    assert_eq!(occupants(&grid, WeekDay::Monday, 5), vec![("B".to_string(), Coverage::Full)]);
    assert!(occupants(&grid, WeekDay::Monday, 6).is_empty());
    assert_eq!(occupants(&grid, WeekDay::Tuesday, 4), vec![("C".to_string(), Coverage::Full)]);

    let clashes: Vec<(WeekDay, String)> = grid
        .clash_cells()
        .map(|(day, cell)| (day, cell.start.to_string()))
        .collect();
    assert_eq!(clashes, vec![(WeekDay::Monday, "10:00".to_string())]);
}

#[test]
fn slot_inside_a_bucket_is_partial() {
    let a = item("A", &[(WeekDay::Monday, "09:05", "09:25")]);
    let grid = build_weekly_grid(&[a], &[WeekDay::Monday], &GridConfig::default());

    assert_eq!(occupants(&grid, WeekDay::Monday, 2), vec![("A".to_string(), Coverage::Partial)]);
    assert!(occupants(&grid, WeekDay::Monday, 1).is_empty());
    assert!(occupants(&grid, WeekDay::Monday, 3).is_empty());
}

#[test]
fn partial_co_occupancy_is_contested_but_not_a_clash() {
    // Both land in 09:00–09:30 without touching each other.
    let a = item("A", &[(WeekDay::Monday, "09:00", "09:10")]);
    let b = item("B", &[(WeekDay::Monday, "09:20", "09:30")]);
    let items = vec![a, b];

    let grid = build_weekly_grid(&items, &[WeekDay::Monday], &GridConfig::default());

    assert_eq!(grid.contested_cells().count(), 1);
    assert_eq!(grid.clash_cells().count(), 0);
    assert!(detect_all_clashes(&items).iter().all(|r| !r.has_clash));
}

#[test]
fn bucket_exact_overlap_is_a_clash_cell() {
    let a = item("A", &[(WeekDay::Thursday, "09:00", "10:00")]);
    let b = item("B", &[(WeekDay::Thursday, "09:30", "10:30")]);
    let items = vec![a, b];

    let grid = build_weekly_grid(&items, &[WeekDay::Thursday], &GridConfig::default());

    let clash_starts: Vec<String> = grid
        .clash_cells()
        .map(|(_, cell)| cell.start.to_string())
        .collect();
    assert_eq!(clash_starts, vec!["09:30"]);
    assert!(detect_all_clashes(&items).iter().all(|r| r.has_clash));
}

#[test]
fn slots_are_clipped_to_the_window() {
    let early = item("E", &[(WeekDay::Friday, "07:00", "08:30")]);
    let late = item("L", &[(WeekDay::Friday, "19:45", "21:00")]);
    let outside = item("O", &[(WeekDay::Friday, "06:00", "07:00")]);

    let grid = build_weekly_grid(&[early, late, outside], &[WeekDay::Friday], &GridConfig::default());

    assert_eq!(occupants(&grid, WeekDay::Friday, 0), vec![("E".to_string(), Coverage::Full)]);
    assert!(occupants(&grid, WeekDay::Friday, 1).is_empty());
    assert_eq!(occupants(&grid, WeekDay::Friday, 23), vec![("L".to_string(), Coverage::Partial)]);
    let column = grid.column(WeekDay::Friday).unwrap();
    assert!(column
        .cells
        .iter()
        .all(|cell| cell.item_ids().all(|id| id.as_str() != "O")));
}

#[test]
fn item_listed_once_per_cell_even_with_two_slots() {
    // Two slots of the same item both touch 09:00–09:30.
    let a = item(
        "A",
        &[
            (WeekDay::Monday, "09:00", "09:10"),
            (WeekDay::Monday, "09:00", "09:30"),
        ],
    );
    let grid = build_weekly_grid(&[a], &[WeekDay::Monday], &GridConfig::default());

    assert_eq!(occupants(&grid, WeekDay::Monday, 2), vec![("A".to_string(), Coverage::Full)]);
}

// ── Config ──────────────────────────────────────────────────────────────────

#[test]
fn invalid_configs_are_rejected() {
    let nine = parse_time_of_day("09:00").unwrap();
    let five = parse_time_of_day("17:00").unwrap();

    assert!(matches!(
        GridConfig::new(nine, five, 0),
        Err(ClashError::InvalidGridConfig(_))
    ));
    assert!(matches!(
        GridConfig::new(five, nine, 30),
        Err(ClashError::InvalidGridConfig(_))
    ));
    assert!(matches!(
        GridConfig::new(nine, nine, 30),
        Err(ClashError::InvalidGridConfig(_))
    ));
}

#[test]
fn config_deserializes_with_defaults_and_validation() {
    let config: GridConfig = serde_json::from_str(r#"{"bucket_minutes": 15}"#).unwrap();
    assert_eq!(config.bucket_minutes(), 15);
    assert_eq!(config.day_start().to_string(), "08:00");
    assert_eq!(config.bucket_count(), 48);

    let config: GridConfig =
        serde_json::from_str(r#"{"day_start": "7:00 AM", "day_end": "6:00 PM"}"#).unwrap();
    assert_eq!(config.bucket_count(), 22);

    assert!(serde_json::from_str::<GridConfig>(r#"{"bucket_minutes": 0}"#).is_err());
}

#[test]
fn touching_slots_of_one_item_cover_the_bucket_between_them() {
    // Lecture then tutorial, back to back; the 09:30–10:30 row straddles both.
    let a = item(
        "A",
        &[
            (WeekDay::Monday, "10:00", "11:00"),
            (WeekDay::Monday, "09:00", "10:00"),
        ],
    );
    let b = item("B", &[(WeekDay::Monday, "09:00", "12:00")]);
    let items = vec![a, b];

    let grid = build_weekly_grid(&items, &[WeekDay::Monday], &config("08:30", "12:30", 60));

    let cell = grid.cell(WeekDay::Monday, 1).unwrap();
    assert_eq!(cell.start.to_string(), "09:30");
    assert_eq!(
        occupants(&grid, WeekDay::Monday, 1),
        vec![("A".to_string(), Coverage::Full), ("B".to_string(), Coverage::Full)]
    );
    assert!(cell.is_clash());
    assert!(detect_all_clashes(&items).iter().all(|r| r.has_clash));

    // 08:30–09:30 and 10:30–11:30 are only partly covered by A.
    assert_eq!(
        occupants(&grid, WeekDay::Monday, 0),
        vec![("A".to_string(), Coverage::Partial), ("B".to_string(), Coverage::Partial)]
    );
    assert_eq!(
        occupants(&grid, WeekDay::Monday, 2),
        vec![("A".to_string(), Coverage::Partial), ("B".to_string(), Coverage::Full)]
    );
}

#[test]
fn a_gap_between_slots_keeps_the_bucket_partial() {
    let a = item(
        "A",
        &[
            (WeekDay::Monday, "09:00", "09:10"),
            (WeekDay::Monday, "09:15", "09:30"),
        ],
    );
    let grid = build_weekly_grid(&[a], &[WeekDay::Monday], &GridConfig::default());

    assert_eq!(occupants(&grid, WeekDay::Monday, 2), vec![("A".to_string(), Coverage::Partial)]);
}
