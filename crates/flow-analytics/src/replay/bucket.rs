use crate::model::TimeUnit;
use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

pub const LABEL_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Fixed bucket every timestamp collapses into under `TimeUnit::All`.
pub fn all_anchor() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2000, 1, 1)
        .unwrap_or_default()
        .and_time(NaiveTime::MIN)
}

/// Rounds `ts` down to the start of its bucket.
pub fn round_down(ts: NaiveDateTime, unit: TimeUnit) -> NaiveDateTime {
    let date = ts.date();
    match unit {
        TimeUnit::Minute => date.and_time(
            NaiveTime::from_hms_opt(ts.hour(), ts.minute(), 0).unwrap_or(NaiveTime::MIN),
        ),
        TimeUnit::Hour => {
            date.and_time(NaiveTime::from_hms_opt(ts.hour(), 0, 0).unwrap_or(NaiveTime::MIN))
        }
        TimeUnit::Day => date.and_time(NaiveTime::MIN),
        TimeUnit::Week => {
            let back = i64::from(date.weekday().num_days_from_monday());
            (date - Duration::days(back)).and_time(NaiveTime::MIN)
        }
        TimeUnit::Month => date.with_day(1).unwrap_or(date).and_time(NaiveTime::MIN),
        TimeUnit::Year => NaiveDate::from_ymd_opt(date.year(), 1, 1)
            .unwrap_or(date)
            .and_time(NaiveTime::MIN),
        TimeUnit::All => all_anchor(),
    }
}

/// Start of the bucket after `bucket`, or `None` past the calendar's end and
/// always for `TimeUnit::All`.
pub fn next_bucket(bucket: NaiveDateTime, unit: TimeUnit) -> Option<NaiveDateTime> {
    match unit {
        TimeUnit::Minute => bucket.checked_add_signed(Duration::minutes(1)),
        TimeUnit::Hour => bucket.checked_add_signed(Duration::hours(1)),
        TimeUnit::Day => bucket.checked_add_signed(Duration::days(1)),
        TimeUnit::Week => bucket.checked_add_signed(Duration::days(7)),
        TimeUnit::Month => bucket.checked_add_months(Months::new(1)),
        TimeUnit::Year => bucket.checked_add_months(Months::new(12)),
        TimeUnit::All => None,
    }
}

pub fn bucket_label(bucket: NaiveDateTime) -> String {
    bucket.format(LABEL_FORMAT).to_string()
}

/// Number of buckets from `first` to `last` inclusive, or `None` once the
/// walk would exceed `limit`.
pub fn count_buckets(
    first: NaiveDateTime,
    last: NaiveDateTime,
    unit: TimeUnit,
    limit: usize,
) -> Option<usize> {
    let mut count = 0usize;
    let mut cursor = Some(first);
    while let Some(bucket) = cursor {
        if bucket > last {
            break;
        }
        count += 1;
        if count > limit {
            return None;
        }
        cursor = next_bucket(bucket, unit);
    }
    Some(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn rounding_follows_unit_table() {
        let ts = at(2024, 5, 16, 13, 47, 29);
        assert_eq!(round_down(ts, TimeUnit::Minute), at(2024, 5, 16, 13, 47, 0));
        assert_eq!(round_down(ts, TimeUnit::Hour), at(2024, 5, 16, 13, 0, 0));
        assert_eq!(round_down(ts, TimeUnit::Day), at(2024, 5, 16, 0, 0, 0));
        // 2024-05-16 is a Thursday.
        assert_eq!(round_down(ts, TimeUnit::Week), at(2024, 5, 13, 0, 0, 0));
        assert_eq!(round_down(ts, TimeUnit::Month), at(2024, 5, 1, 0, 0, 0));
        assert_eq!(round_down(ts, TimeUnit::Year), at(2024, 1, 1, 0, 0, 0));
        assert_eq!(round_down(ts, TimeUnit::All), at(2000, 1, 1, 0, 0, 0));
    }

    #[test]
    fn week_rounding_keeps_mondays_and_crosses_months() {
        assert_eq!(
            round_down(at(2024, 5, 13, 0, 0, 0), TimeUnit::Week),
            at(2024, 5, 13, 0, 0, 0)
        );
        assert_eq!(
            round_down(at(2024, 3, 3, 23, 59, 59), TimeUnit::Week),
            at(2024, 2, 26, 0, 0, 0)
        );
    }

    #[test]
    fn month_and_year_step_on_the_calendar() {
        let jan = round_down(at(2024, 1, 31, 8, 0, 0), TimeUnit::Month);
        let feb = next_bucket(jan, TimeUnit::Month).unwrap();
        let mar = next_bucket(feb, TimeUnit::Month).unwrap();
        assert_eq!(feb, at(2024, 2, 1, 0, 0, 0));
        assert_eq!(mar, at(2024, 3, 1, 0, 0, 0));
        assert_eq!(
            next_bucket(at(2024, 1, 1, 0, 0, 0), TimeUnit::Year).unwrap(),
            at(2025, 1, 1, 0, 0, 0)
        );
        assert_eq!(next_bucket(all_anchor(), TimeUnit::All), None);
    }

    #[test]
    fn counting_stops_at_limit() {
        let first = at(2024, 1, 1, 0, 0, 0);
        let last = at(2024, 1, 10, 0, 0, 0);
        assert_eq!(count_buckets(first, last, TimeUnit::Day, 100), Some(10));
        assert_eq!(count_buckets(first, last, TimeUnit::Day, 9), None);
        assert_eq!(count_buckets(last, first, TimeUnit::Day, 9), Some(0));
        assert_eq!(
            count_buckets(all_anchor(), all_anchor(), TimeUnit::All, 1),
            Some(1)
        );
    }

    #[test]
    fn labels_have_no_offset() {
        assert_eq!(bucket_label(at(2024, 1, 2, 3, 4, 5)), "2024-01-02T03:04:05");
    }
}
