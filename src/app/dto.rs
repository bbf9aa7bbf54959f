use crate::domain::model::{format_timestamp, Metadata, Rep, Zone};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRepRequest {
    pub exercise_id: String,
    pub velocity: f64,
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub metadata: Option<Metadata>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RepResponse {
    pub id: String,
    pub exercise_id: String,
    pub velocity: f64,
    /// ISO-8601 in UTC with millisecond precision
    #[schema(example = "2024-03-01T12:30:00.000Z")]
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub metadata: Option<Metadata>,
}

impl From<&Rep> for RepResponse {
    fn from(rep: &Rep) -> Self {
        Self {
            id: rep.id().to_string(),
            exercise_id: rep.exercise_id().to_string(),
            velocity: rep.velocity(),
            timestamp: format_timestamp(&rep.timestamp()),
            metadata: rep.metadata().cloned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ZoneResponse {
    pub id: String,
    pub name: String,
    pub min_velocity: f64,
    pub max_velocity: f64,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub rep_count: usize,
}

impl ZoneResponse {
    pub fn from_zone(zone: &Zone, rep_count: usize) -> Self {
        Self {
            id: zone.id().to_string(),
            name: zone.name().to_string(),
            min_velocity: zone.min_velocity(),
            max_velocity: zone.max_velocity(),
            color: zone.color().to_string(),
            description: zone.description().map(str::to_string),
            rep_count,
        }
    }
}
