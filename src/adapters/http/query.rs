use crate::domain::model::RepQuery;
use crate::utils::error::{AppError, Result};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::Deserialize;
use utoipa::IntoParams;

pub const MAX_PAGE_SIZE: usize = 100;

/// `GET /v1/reps` 的原始查詢字串，空字串視為未提供
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct RepsQueryParams {
    pub exercise_id: Option<String>,
    /// RFC 3339 timestamp or `YYYY-MM-DD` (UTC midnight)
    pub start_date: Option<String>,
    /// RFC 3339 timestamp or `YYYY-MM-DD` (UTC midnight)
    pub end_date: Option<String>,
    /// Only reps whose velocity lies inside this zone
    pub zone_id: Option<String>,
    /// Page size, 1 to 100
    pub limit: Option<String>,
    pub offset: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// RFC 3339，或 `YYYY-MM-DD` (UTC 午夜)
pub fn parse_date(field: &str, raw: &str) -> Result<DateTime<Utc>> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(timestamp.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| Utc.from_utc_datetime(&midnight))
        .ok_or_else(|| AppError::validation(format!("{} must be an ISO-8601 date, got '{}'", field, raw)))
}

fn parse_count(field: &str, raw: &str) -> Result<usize> {
    raw.parse::<usize>()
        .map_err(|_| AppError::validation(format!("{} must be a non-negative integer, got '{}'", field, raw)))
}

impl RepsQueryParams {
    pub fn into_query(self) -> Result<RepQuery> {
        let limit = non_empty(&self.limit)
            .map(|raw| parse_count("limit", raw))
            .transpose()?;
        if let Some(limit) = limit {
            if limit == 0 || limit > MAX_PAGE_SIZE {
                return Err(AppError::validation(format!(
                    "limit must be between 1 and {}",
                    MAX_PAGE_SIZE
                )));
            }
        }

        Ok(RepQuery {
            exercise_id: non_empty(&self.exercise_id).map(str::to_string),
            start_date: non_empty(&self.start_date)
                .map(|raw| parse_date("startDate", raw))
                .transpose()?,
            end_date: non_empty(&self.end_date)
                .map(|raw| parse_date("endDate", raw))
                .transpose()?,
            zone_id: non_empty(&self.zone_id).map(str::to_string),
            limit,
            offset: non_empty(&self.offset)
                .map(|raw| parse_count("offset", raw))
                .transpose()?,
        })
    }
}
