use crate::errors::{AnalyticsError, AnalyticsResult};
use crate::model::{ChartQuery, CountUnit, TimeUnit};
use crate::policy::AnalyticsPolicyView;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use futuboard_core_types::ScopeId;

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Validated replay parameters. Bounds are raw; the replay rounds them to
/// the bucket boundary itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayPlan {
    pub unit: TimeUnit,
    pub count_unit: CountUnit,
    pub start: Option<NaiveDateTime>,
    pub end: NaiveDateTime,
    pub scope_filter: Option<ScopeId>,
    pub max_buckets: usize,
}

impl ReplayPlan {
    pub fn new(unit: TimeUnit, end: NaiveDateTime) -> Self {
        Self {
            unit,
            count_unit: CountUnit::Size,
            start: None,
            end,
            scope_filter: None,
            max_buckets: AnalyticsPolicyView::default().max_buckets,
        }
    }

    /// Plan producing exactly one bucket holding the state after every event.
    pub fn single_bucket(end: NaiveDateTime) -> Self {
        Self::new(TimeUnit::All, end)
    }

    pub fn with_start(mut self, start: NaiveDateTime) -> Self {
        self.start = Some(start);
        self
    }

    pub fn with_scope(mut self, scope: ScopeId) -> Self {
        self.scope_filter = Some(scope);
        self
    }

    pub fn with_count_unit(mut self, count_unit: CountUnit) -> Self {
        self.count_unit = count_unit;
        self
    }

    pub fn with_max_buckets(mut self, max_buckets: usize) -> Self {
        self.max_buckets = max_buckets;
        self
    }
}

/// Validates a chart query. Nothing is fetched before this succeeds.
pub fn build_plan(
    query: &ChartQuery,
    policy: &AnalyticsPolicyView,
    now: DateTime<Utc>,
) -> AnalyticsResult<ReplayPlan> {
    let unit = match non_empty(query.time_unit.as_deref()) {
        Some(raw) => TimeUnit::parse_query(raw)?,
        None => policy.default_time_unit,
    };
    if unit == TimeUnit::All {
        return Err(AnalyticsError::InvalidGranularity(unit.as_str().into()));
    }

    let count_unit = match non_empty(query.count_unit.as_deref()) {
        Some(raw) => CountUnit::parse_query(raw)?,
        None => policy.default_count_unit,
    };

    let start = parse_timestamp("start_time", query.start_time.as_deref())?;
    let end = parse_timestamp("end_time", query.end_time.as_deref())?.unwrap_or(now.naive_utc());

    Ok(ReplayPlan {
        unit,
        count_unit,
        start,
        end,
        scope_filter: None,
        max_buckets: policy.max_buckets,
    })
}

/// Parses an optional ISO-8601 bound. Offsets are converted to UTC; naive
/// values are taken as UTC already.
pub fn parse_timestamp(
    field: &'static str,
    raw: Option<&str>,
) -> AnalyticsResult<Option<NaiveDateTime>> {
    let Some(raw) = non_empty(raw) else {
        return Ok(None);
    };

    if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Some(with_offset.with_timezone(&Utc).naive_utc()));
    }
    for format in NAIVE_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(Some(parsed));
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(Some(date.and_time(NaiveTime::MIN)));
    }

    Err(AnalyticsError::UnparsableTimestamp {
        field,
        value: raw.to_string(),
    })
}

fn non_empty(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, 12, 30, 0).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn defaults_come_from_policy_and_clock() {
        let plan = build_plan(&ChartQuery::default(), &AnalyticsPolicyView::default(), now())
            .unwrap();
        assert_eq!(plan.unit, TimeUnit::Day);
        assert_eq!(plan.count_unit, CountUnit::Size);
        assert_eq!(plan.start, None);
        assert_eq!(plan.end, at(2024, 3, 10, 12, 30, 0));
        assert_eq!(plan.max_buckets, 100_000);
    }

    #[test]
    fn accepts_dates_and_offsets() {
        let query = ChartQuery {
            time_unit: Some("hour".into()),
            start_time: Some("2024-01-02".into()),
            end_time: Some("2024-01-03T10:00:00+02:00".into()),
            count_unit: Some("count".into()),
        };
        let plan = build_plan(&query, &AnalyticsPolicyView::default(), now()).unwrap();
        assert_eq!(plan.unit, TimeUnit::Hour);
        assert_eq!(plan.count_unit, CountUnit::Count);
        assert_eq!(plan.start, Some(at(2024, 1, 2, 0, 0, 0)));
        assert_eq!(plan.end, at(2024, 1, 3, 8, 0, 0));
    }

    #[test]
    fn accepts_naive_datetimes_with_either_separator() {
        assert_eq!(
            parse_timestamp("start_time", Some("2024-01-02 03:04")).unwrap(),
            Some(at(2024, 1, 2, 3, 4, 0))
        );
        assert_eq!(
            parse_timestamp("start_time", Some("2024-01-02T03:04:05.250")).unwrap(),
            Some(
                NaiveDate::from_ymd_opt(2024, 1, 2)
                    .unwrap()
                    .and_hms_milli_opt(3, 4, 5, 250)
                    .unwrap()
            )
        );
        assert_eq!(parse_timestamp("start_time", Some("  ")).unwrap(), None);
    }

    #[test]
    fn rejects_bad_values_before_any_work() {
        let bad_unit = ChartQuery {
            time_unit: Some("fortnight".into()),
            ..ChartQuery::default()
        };
        assert!(matches!(
            build_plan(&bad_unit, &AnalyticsPolicyView::default(), now()),
            Err(AnalyticsError::InvalidGranularity(_))
        ));

        let bad_start = ChartQuery {
            start_time: Some("yesterday".into()),
            ..ChartQuery::default()
        };
        match build_plan(&bad_start, &AnalyticsPolicyView::default(), now()) {
            Err(AnalyticsError::UnparsableTimestamp { field, value }) => {
                assert_eq!(field, "start_time");
                assert_eq!(value, "yesterday");
            }
            other => panic!("unexpected {other:?}"),
        }

        let bad_count = ChartQuery {
            count_unit: Some("points".into()),
            ..ChartQuery::default()
        };
        assert!(matches!(
            build_plan(&bad_count, &AnalyticsPolicyView::default(), now()),
            Err(AnalyticsError::InvalidCountUnit(_))
        ));
    }
}
