use chrono::{Duration, NaiveDate, Utc};
use chrono_tz::Tz;

/// The site publishes the daily strip at midnight in this timezone, so all
/// "what day is it" questions are answered against it rather than UTC or the
/// server's local zone.
pub const REFERENCE_TIMEZONE: Tz = chrono_tz::America::Chicago;

/// First strip available on the site.
pub const MIN_DATE_KEY: &str = "1989-04-16";

pub fn min_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1989, 4, 16).expect("static minimum date")
}

/// The current date as observed in the reference timezone.
pub fn today() -> NaiveDate {
    Utc::now().with_timezone(&REFERENCE_TIMEZONE).date_naive()
}

/// Calendar-day arithmetic. Saturates at chrono's representable range instead
/// of panicking; range clamping against [min_date, today] is the caller's job.
pub fn shift(date: NaiveDate, delta_days: i64) -> NaiveDate {
    date.checked_add_signed(Duration::days(delta_days))
        .unwrap_or(date)
}

/// Clamp a requested date into the navigable range [min_date, today].
pub fn clamp_to_available(date: NaiveDate, today: NaiveDate) -> NaiveDate {
    date.clamp(min_date(), today.max(min_date()))
}

/// Zero-padded `YYYY-MM-DD`, so string order equals date order.
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}
