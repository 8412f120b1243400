//! The fixed daily schedule template. Slot labels are generated from a
//! starting hour and a period length rather than hard-coded, so the morning
//! and afternoon blocks always stay arithmetically consistent.

/// Hour the first morning period starts (24-hour clock).
const MORNING_START_HOUR: u32 = 8;
/// Number of back-to-back morning periods before lunch.
const MORNING_PERIODS: usize = 4;
/// Hour the first afternoon period starts (24-hour clock).
const AFTERNOON_START_HOUR: u32 = 13;
/// Number of back-to-back afternoon periods.
const AFTERNOON_PERIODS: usize = 2;
/// Length of every teaching period in minutes.
const PERIOD_MINUTES: u32 = 50;

/// Label for the fixed lunch slot separating the two period blocks.
pub const LUNCH_SLOT: &str = "12:00 PM - 1:00 PM (Lunch Break)";

/// Produce the fixed, ordered list of the seven daily slot labels: four
/// morning periods, the lunch marker, then two afternoon periods. The output
/// is deterministic; every call returns the same labels in the same order.
pub fn time_slots() -> Vec<String> {
    let mut slots = Vec::with_capacity(MORNING_PERIODS + 1 + AFTERNOON_PERIODS);
    push_periods(&mut slots, MORNING_START_HOUR, MORNING_PERIODS);
    slots.push(LUNCH_SLOT.to_string());
    push_periods(&mut slots, AFTERNOON_START_HOUR, AFTERNOON_PERIODS);
    slots
}

/// Append `count` consecutive periods starting on the hour at `start_hour`.
fn push_periods(slots: &mut Vec<String>, start_hour: u32, count: usize) {
    let mut hour = start_hour;
    let mut minute = 0;
    for _ in 0..count {
        let (end_hour, end_minute) = advance(hour, minute, PERIOD_MINUTES);
        slots.push(format!(
            "{} - {}",
            format_time(hour, minute),
            format_time(end_hour, end_minute)
        ));
        hour = end_hour;
        minute = end_minute;
    }
}

/// Move a clock time forward by `by` minutes, carrying overflow into the hour.
fn advance(hour: u32, minute: u32, by: u32) -> (u32, u32) {
    let total = minute + by;
    (hour + total / 60, total % 60)
}

/// Render a 24-hour clock time as a 12-hour string with AM/PM suffix.
fn format_time(hour: u32, minute: u32) -> String {
    let period = if hour >= 12 { "PM" } else { "AM" };
    let display_hour = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{display_hour}:{minute:02} {period}")
}
