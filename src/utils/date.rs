use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

/// Date-only layouts tried in order. Month-first wins for slashed dates,
/// which is how the activity export writes them.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d.%m.%Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %b %Y",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

/// Lenient date parsing: returns `None` for anything that is not a
/// recognizable date instead of failing.
pub fn parse_lenient(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive())
}

/// Strict `YYYY-MM-DD`, used for dates already normalized by the pipeline.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

pub fn format_date(d: &NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

/// ISO-8601 week number (weeks start Monday, week 1 holds the first Thursday).
pub fn iso_week(d: &NaiveDate) -> u32 {
    d.iso_week().week()
}
