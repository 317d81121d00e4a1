//! Date display shared by the HTML fragments, the default layout and DOCX.

use chrono::{Datelike, NaiveDate};

use crate::models::resume::PeriodEnd;
use crate::render::labels::Labels;

/// Month-year display, e.g. `May 2021`. A missing date renders as "".
pub fn format_date(date: Option<NaiveDate>, labels: &Labels) -> String {
    match date {
        Some(d) => format!("{} {}", labels.month(d.month()), d.year()),
        None => String::new(),
    }
}

/// Same as [`format_date`] for raw `YYYY-MM-DD` input.
///
/// Input that does not parse is returned unchanged. Stored dates decode to
/// `NaiveDate`, so this is the fallback for text that arrives undecoded.
#[allow(dead_code)]
pub(crate) fn format_date_str(raw: Option<&str>, labels: &Labels) -> String {
    let Some(raw) = raw else {
        return String::new();
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    match NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        Ok(d) => format_date(Some(d), labels),
        Err(_) => raw.to_string(),
    }
}

/// Year only, used for achievement bullets.
pub fn format_year(date: Option<NaiveDate>) -> String {
    date.map(|d| d.year().to_string()).unwrap_or_default()
}

/// `"<start> - <end>"`; an open period renders its start alone.
pub fn format_period(start: NaiveDate, end: PeriodEnd, labels: &Labels) -> String {
    let start = format_date(Some(start), labels);
    match end {
        PeriodEnd::Present => format!("{start} - {}", labels.present),
        PeriodEnd::Date(d) => format!("{start} - {}", format_date(Some(d), labels)),
        PeriodEnd::Open => start,
    }
}
