use crate::domain::events::DomainEvent;
use crate::domain::ports::EventSink;
use crate::utils::error::{AppError, Result};
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const MAX_VELOCITY: f64 = 10.0;
pub const DEFAULT_VELOCITY_UNIT: &str = "m/s";

/// Rep 上附帶的自由欄位
pub type Metadata = HashMap<String, serde_json::Value>;

/// 經過邊界檢查的速度值，只在建立 Rep 時使用
#[derive(Debug, Clone, PartialEq)]
pub struct VelocityValue {
    value: f64,
    unit: String,
}

impl VelocityValue {
    pub fn new(value: f64) -> Result<Self> {
        Self::with_unit(value, DEFAULT_VELOCITY_UNIT)
    }

    pub fn with_unit(value: f64, unit: impl Into<String>) -> Result<Self> {
        if !value.is_finite() {
            return Err(AppError::InvalidVelocity {
                value,
                reason: "Velocity must be a finite number".to_string(),
            });
        }
        if value < 0.0 {
            return Err(AppError::InvalidVelocity {
                value,
                reason: "Velocity cannot be negative".to_string(),
            });
        }
        if value > MAX_VELOCITY {
            return Err(AppError::InvalidVelocity {
                value,
                reason: "Velocity exceeds maximum allowed value".to_string(),
            });
        }

        Ok(Self {
            value,
            unit: unit.into(),
        })
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }
}

/// 命名的速度區間 `[min_velocity, max_velocity]`，兩端皆包含
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    id: String,
    name: String,
    min_velocity: f64,
    max_velocity: f64,
    color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl Zone {
    /// 不檢查 min < max，需要時請自行呼叫 `is_valid_range`
    pub fn create(
        name: impl Into<String>,
        min_velocity: f64,
        max_velocity: f64,
        color: impl Into<String>,
        description: Option<String>,
    ) -> Self {
        Self::from_persistence(
            uuid::Uuid::new_v4().to_string(),
            name,
            min_velocity,
            max_velocity,
            color,
            description,
        )
    }

    pub fn from_persistence(
        id: impl Into<String>,
        name: impl Into<String>,
        min_velocity: f64,
        max_velocity: f64,
        color: impl Into<String>,
        description: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            min_velocity,
            max_velocity,
            color: color.into(),
            description,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn min_velocity(&self) -> f64 {
        self.min_velocity
    }

    pub fn max_velocity(&self) -> f64 {
        self.max_velocity
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn contains_velocity(&self, velocity: f64) -> bool {
        velocity >= self.min_velocity && velocity <= self.max_velocity
    }

    /// 相接於單一點也算重疊
    pub fn overlaps_with_range(&self, min_velocity: f64, max_velocity: f64) -> bool {
        !(max_velocity < self.min_velocity || min_velocity > self.max_velocity)
    }

    pub fn is_valid_range(&self) -> bool {
        self.min_velocity < self.max_velocity
    }
}

/// 啟動時寫入的四個預設區間
pub fn seed_zones() -> Vec<Zone> {
    vec![
        Zone::from_persistence(
            "zone-strength",
            "Strength",
            0.0,
            0.3,
            "#ff4444",
            Some("Heavy resistance training zone".to_string()),
        ),
        Zone::from_persistence(
            "zone-power",
            "Power",
            0.3,
            0.6,
            "#ffaa00",
            Some("Power development zone".to_string()),
        ),
        Zone::from_persistence(
            "zone-speed-strength",
            "Speed-Strength",
            0.6,
            1.0,
            "#44ff44",
            Some("Speed-strength development zone".to_string()),
        ),
        Zone::from_persistence(
            "zone-speed",
            "Speed",
            1.0,
            2.0,
            "#4444ff",
            Some("Maximum speed zone".to_string()),
        ),
    ]
}

/// 一次動作紀錄。建立後不可變，`update_metadata` 會回傳新的實例
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rep {
    id: String,
    exercise_id: String,
    velocity: f64,
    #[serde(with = "iso8601_millis")]
    timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    metadata: Option<Metadata>,
}

impl Rep {
    pub fn create(
        exercise_id: impl Into<String>,
        velocity: f64,
        metadata: Option<Metadata>,
    ) -> Result<Self> {
        let velocity = VelocityValue::new(velocity)?;

        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            exercise_id: exercise_id.into(),
            velocity: velocity.value(),
            timestamp: Utc::now().trunc_subsecs(3),
            metadata,
        })
    }

    /// 與 `create` 相同，成功後再發出 `RepCreated`
    pub fn create_with_events(
        exercise_id: impl Into<String>,
        velocity: f64,
        metadata: Option<Metadata>,
        sink: &dyn EventSink,
    ) -> Result<Self> {
        let rep = Self::create(exercise_id, velocity, metadata)?;
        sink.publish(DomainEvent::rep_created(&rep));
        Ok(rep)
    }

    /// 從儲存層還原，不會重新檢查速度範圍
    pub fn from_persistence(
        id: impl Into<String>,
        exercise_id: impl Into<String>,
        velocity: f64,
        timestamp: DateTime<Utc>,
        metadata: Option<Metadata>,
    ) -> Self {
        Self {
            id: id.into(),
            exercise_id: exercise_id.into(),
            velocity,
            timestamp,
            metadata,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn exercise_id(&self) -> &str {
        &self.exercise_id
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn metadata(&self) -> Option<&Metadata> {
        self.metadata.as_ref()
    }

    pub fn velocity_value(&self) -> Result<VelocityValue> {
        VelocityValue::new(self.velocity)
    }

    pub fn update_metadata(&self, metadata: Metadata) -> Self {
        let mut merged = self.metadata.clone().unwrap_or_default();
        merged.extend(metadata);

        Self {
            metadata: Some(merged),
            ..self.clone()
        }
    }
}

/// 查詢條件；所有欄位皆為選填
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RepQuery {
    pub exercise_id: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub zone_id: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

impl RepQuery {
    pub fn with_exercise(mut self, exercise_id: impl Into<String>) -> Self {
        self.exercise_id = Some(exercise_id.into());
        self
    }

    pub fn between(mut self, start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    pub fn page(mut self, offset: usize, limit: usize) -> Self {
        self.offset = Some(offset);
        self.limit = Some(limit);
        self
    }
}

pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

pub(crate) mod iso8601_millis {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_timestamp(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
