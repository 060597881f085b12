//! Filters for call-event queries.

use crate::{Error, ErrorContext, Result};
use chrono::{DateTime, Utc};

/// Longest time range the call endpoints accept, in whole days.
pub const MAX_RANGE_DAYS: i64 = 31;

const WIRE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeWindow {
    /// Calls that started within the range (`StartTime` / `EndTime`).
    Started { start: DateTime<Utc>, end: DateTime<Utc> },
    /// Calls modified within the range (`ModifiedAfter` / `ModifiedBefore`).
    Modified { after: DateTime<Utc>, before: DateTime<Utc> },
}

/// Query filter for `/calls` and `/servicecall`.
///
/// Either a time window or (for user calls only) a `CallId` must be set; any
/// other filter parameter documented by the API can be added with [`param`](Self::param).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallFilter {
    window: Option<TimeWindow>,
    call_id: Option<String>,
    params: Vec<(String, String)>,
}

impl CallFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn started_between(
        start: impl Into<DateTime<Utc>>,
        end: impl Into<DateTime<Utc>>,
    ) -> Self {
        Self {
            window: Some(TimeWindow::Started {
                start: start.into(),
                end: end.into(),
            }),
            ..Self::default()
        }
    }

    pub fn modified_between(
        after: impl Into<DateTime<Utc>>,
        before: impl Into<DateTime<Utc>>,
    ) -> Self {
        Self {
            window: Some(TimeWindow::Modified {
                after: after.into(),
                before: before.into(),
            }),
            ..Self::default()
        }
    }

    pub fn for_call(call_id: impl Into<String>) -> Self {
        Self::default().call_id(call_id)
    }

    pub fn call_id(mut self, call_id: impl Into<String>) -> Self {
        self.call_id = Some(call_id.into());
        self
    }

    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((key.into(), value.to_string()));
        self
    }

    pub fn window(&self) -> Option<&TimeWindow> {
        self.window.as_ref()
    }

    /// Validate and render the filter as query parameters.
    ///
    /// `allow_call_id_only` permits a filter consisting of just a `CallId`.
    pub fn to_query(&self, allow_call_id_only: bool) -> Result<Vec<(String, String)>> {
        let mut query = Vec::new();
        match self.window {
            Some(TimeWindow::Started { start, end }) => {
                check_range(start, end, "StartTime")?;
                query.push(("StartTime".to_string(), format_time(start)));
                query.push(("EndTime".to_string(), format_time(end)));
            }
            Some(TimeWindow::Modified { after, before }) => {
                check_range(after, before, "ModifiedAfter")?;
                query.push(("ModifiedAfter".to_string(), format_time(after)));
                query.push(("ModifiedBefore".to_string(), format_time(before)));
            }
            None if allow_call_id_only && self.call_id.is_some() => {}
            None => {
                return Err(Error::validation_with_context(
                    "Must have StartTime and EndTime or ModifiedAfter and ModifiedBefore",
                    ErrorContext::new()
                        .with_field_path("filter")
                        .with_source("calls"),
                ));
            }
        }
        if let Some(call_id) = &self.call_id {
            query.push(("CallId".to_string(), call_id.clone()));
        }
        query.extend(self.params.iter().cloned());
        Ok(query)
    }
}

fn format_time(t: DateTime<Utc>) -> String {
    t.format(WIRE_TIME_FORMAT).to_string()
}

fn check_range(from: DateTime<Utc>, to: DateTime<Utc>, field: &str) -> Result<()> {
    if (to - from).num_days() > MAX_RANGE_DAYS {
        return Err(Error::validation_with_context(
            format!("Time range cannot be more than {} days", MAX_RANGE_DAYS),
            ErrorContext::new()
                .with_field_path(field)
                .with_details(format!("{} .. {}", format_time(from), format_time(to)))
                .with_source("calls"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, FixedOffset, TimeZone};

    #[test]
    fn window_is_rendered_in_utc() {
        let helsinki = FixedOffset::east_opt(2 * 3600).unwrap();
        let start = helsinki.with_ymd_and_hms(2025, 1, 1, 8, 0, 0).unwrap();
        let end = helsinki.with_ymd_and_hms(2025, 1, 2, 8, 0, 0).unwrap();
        let query = CallFilter::started_between(start, end)
            .param("UserId", "u-1")
            .to_query(true)
            .unwrap();
        assert_eq!(
            query,
            vec![
                ("StartTime".to_string(), "2025-01-01 06:00:00".to_string()),
                ("EndTime".to_string(), "2025-01-02 06:00:00".to_string()),
                ("UserId".to_string(), "u-1".to_string()),
            ]
        );
    }

    #[test]
    fn range_over_31_days_is_rejected() {
        let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let err = CallFilter::modified_between(start, start + Duration::days(32))
            .to_query(true)
            .unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
        assert!(err.to_string().contains("31 days"));

        // exactly 31 days and a few hours still fits
        CallFilter::started_between(start, start + Duration::days(31) + Duration::hours(5))
            .to_query(true)
            .unwrap();
    }

    #[test]
    fn call_id_alone_depends_on_endpoint() {
        let filter = CallFilter::for_call("specific-call");
        assert_eq!(
            filter.to_query(true).unwrap(),
            vec![("CallId".to_string(), "specific-call".to_string())]
        );
        assert!(filter.to_query(false).is_err());
        assert!(CallFilter::new().to_query(true).is_err());
    }
}
