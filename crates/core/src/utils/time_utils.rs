use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Calendar month key in `YYYY-MM` form.
pub fn month_key(at: NaiveDateTime) -> String {
    at.format("%Y-%m").to_string()
}

/// Human-readable day label, e.g. `Mon Oct 19 2026`.
pub fn day_label(at: NaiveDateTime) -> String {
    at.format("%a %b %d %Y").to_string()
}

/// Whole days from `now` until `deadline`, rounded up and floored at zero.
pub fn days_until(deadline: NaiveDateTime, now: NaiveDateTime) -> i64 {
    let millis = (deadline - now).num_milliseconds() as f64;
    (millis / MILLIS_PER_DAY).ceil().max(0.0) as i64
}

/// Same wall-clock time `months` calendar months earlier.
///
/// Day-of-month overflow clamps to the last day of the target month.
pub fn months_before(at: NaiveDateTime, months: u32) -> NaiveDateTime {
    at.checked_sub_months(Months::new(months))
        .unwrap_or(NaiveDateTime::MIN)
}

/// `at` moved forward by `days`, saturating instead of overflowing.
pub fn days_after(at: NaiveDateTime, days: i64) -> NaiveDateTime {
    match Duration::try_days(days).and_then(|d| at.checked_add_signed(d)) {
        Some(moved) => moved,
        None if days < 0 => NaiveDateTime::MIN,
        None => NaiveDateTime::MAX,
    }
}

/// First and last instant of the calendar month containing `at`.
pub fn month_bounds(at: NaiveDateTime) -> (NaiveDateTime, NaiveDateTime) {
    let first = NaiveDate::from_ymd_opt(at.year(), at.month(), 1).unwrap_or(at.date());
    let next = first
        .checked_add_months(Months::new(1))
        .unwrap_or(NaiveDate::MAX);
    let last = next.pred_opt().unwrap_or(first);
    (start_of_day(first), end_of_day(last))
}

/// First and last instant of the calendar year containing `at`.
pub fn year_bounds(at: NaiveDateTime) -> (NaiveDateTime, NaiveDateTime) {
    let first = NaiveDate::from_ymd_opt(at.year(), 1, 1).unwrap_or(at.date());
    let last = NaiveDate::from_ymd_opt(at.year(), 12, 31).unwrap_or(at.date());
    (start_of_day(first), end_of_day(last))
}

pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_milli_opt(23, 59, 59, 999)
        .unwrap_or_else(|| start_of_day(date))
}

/// Parses either an RFC 3339 timestamp or a bare `YYYY-MM-DD` date.
///
/// A bare date resolves to the start of that day.
pub fn parse_date_param(raw: &str) -> crate::Result<NaiveDateTime> {
    let trimmed = raw.trim();
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.naive_utc());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(dt);
    }
    let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")?;
    Ok(start_of_day(date))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn days_until_rounds_partial_days_up() {
        let now = at(2026, 1, 1, 12);
        assert_eq!(days_until(at(2026, 1, 2, 13), now), 2);
        assert_eq!(days_until(at(2026, 1, 2, 12), now), 1);
        assert_eq!(days_until(at(2025, 12, 1, 0), now), 0);
    }

    #[test]
    fn months_before_clamps_to_month_end() {
        assert_eq!(months_before(at(2026, 5, 31, 8), 3), at(2026, 2, 28, 8));
        assert_eq!(months_before(at(2026, 3, 15, 8), 3), at(2025, 12, 15, 8));
    }

    #[test]
    fn days_after_saturates_at_extreme_horizons() {
        let now = at(2026, 10, 19, 8);
        assert_eq!(days_after(now, 3), at(2026, 10, 22, 8));
        assert_eq!(days_after(now, i64::MAX), NaiveDateTime::MAX);
        assert_eq!(days_after(now, 1_000_000_000_000), NaiveDateTime::MAX);
        assert_eq!(days_after(now, i64::MIN), NaiveDateTime::MIN);
        assert_eq!(days_after(now, -1_000_000_000_000), NaiveDateTime::MIN);
    }

    #[test]
    fn month_bounds_cover_whole_month() {
        let (first, last) = month_bounds(at(2024, 2, 10, 9));
        assert_eq!(first, at(2024, 2, 1, 0));
        assert_eq!(last.date(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn parses_plain_dates_and_timestamps() {
        assert_eq!(parse_date_param("2026-03-01").unwrap(), at(2026, 3, 1, 0));
        assert_eq!(
            parse_date_param("2026-03-01T10:00:00Z").unwrap(),
            at(2026, 3, 1, 10)
        );
        assert!(parse_date_param("March first").is_err());
    }

    #[test]
    fn day_label_matches_short_weekday_format() {
        assert_eq!(day_label(at(2026, 10, 19, 0)), "Mon Oct 19 2026");
    }
}
