use std::cmp::Ordering;

pub const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const DAYS_IN_MONTH: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn days_in_year(year: i32) -> u32 {
    if is_leap_year(year) { 366 } else { 365 }
}

/// Days in a month. `month` is 0-indexed.
pub fn days_in_month(month: u32, year: i32) -> u32 {
    if month == 1 && is_leap_year(year) {
        return 29;
    }
    DAYS_IN_MONTH[month as usize % 12]
}

/// 1-based day of year from a 0-indexed month and 1-based day.
pub fn day_of_year_from_month_day(month: u32, day: u32, year: i32) -> u32 {
    let mut day_of_year = day;
    for m in 0..month.min(12) {
        day_of_year += days_in_month(m, year);
    }
    day_of_year
}

/// Inverse of [`day_of_year_from_month_day`]. Out-of-range input clamps to
/// December 31.
pub fn month_day_from_day_of_year(day_of_year: u32, year: i32) -> (u32, u32) {
    let mut remaining = day_of_year;
    for m in 0..12 {
        let days = days_in_month(m, year);
        if remaining <= days {
            return (m, remaining);
        }
        remaining -= days;
    }
    (11, 31)
}

/// Distance between two days of year on the circular calendar, wrapping
/// across the year boundary.
pub fn circular_day_distance(a: u32, b: u32, total_days: u32) -> u32 {
    let diff = a.abs_diff(b);
    diff.min(total_days - diff)
}

/// Angle in degrees for a (possibly fractional) day of year. Day zero sits at
/// the top of the ring and days progress clockwise.
pub fn date_to_angle(day_of_year: f32, total_days: u32) -> f32 {
    -90.0 + day_of_year / total_days as f32 * 360.0
}

/// Storage key for a date: `"month-day"` with a 1-indexed month.
pub fn date_key(month: u32, day: u32) -> String {
    format!("{}-{}", month + 1, day)
}

/// Parse a storage key back into a 0-indexed month and day.
pub fn parse_date_key(key: &str) -> Option<(u32, u32)> {
    let (month, day) = key.split_once('-')?;
    let month: u32 = month.parse().ok()?;
    let day: u32 = day.parse().ok()?;
    if month == 0 {
        return None;
    }
    Some((month - 1, day))
}

pub fn compare_dates(m1: u32, d1: u32, m2: u32, d2: u32) -> Ordering {
    m1.cmp(&m2).then(d1.cmp(&d2))
}

/// `"Jan 5"` style display label. `month` is 0-indexed.
pub fn format_date(month: u32, day: u32) -> String {
    format!("{} {}", &MONTHS[month as usize % 12][..3], day)
}

/// `"Jan 5-9"` within one month, `"Jan 30-Feb 2"` across months.
pub fn format_date_range(start_month: u32, start_day: u32, end_month: u32, end_day: u32) -> String {
    let start_abbr = &MONTHS[start_month as usize % 12][..3];
    if start_month == end_month {
        format!("{} {}-{}", start_abbr, start_day, end_day)
    } else {
        let end_abbr = &MONTHS[end_month as usize % 12][..3];
        format!("{} {}-{} {}", start_abbr, start_day, end_abbr, end_day)
    }
}

/// The reference "now" for priority scoring. Injected by the caller instead
/// of read from a clock so scoring is reproducible.
#[derive(Debug, Clone, Copy)]
pub struct Today {
    /// Fractional 1-based day of year; `60.5` is noon on day 60.
    pub day_of_year: f32,
    pub total_days: u32,
}

impl Today {
    /// Midnight at the start of the given date. `month` is 0-indexed.
    pub fn from_date(year: i32, month: u32, day: u32) -> Self {
        Self {
            day_of_year: day_of_year_from_month_day(month, day, year) as f32,
            total_days: days_in_year(year),
        }
    }

    /// Shift into the day by a fraction in `[0, 1)`.
    pub fn with_day_fraction(mut self, fraction: f32) -> Self {
        self.day_of_year += fraction.clamp(0.0, 1.0);
        self
    }
}
