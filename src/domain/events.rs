use crate::domain::model::{iso8601_millis, Rep};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "eventType", rename_all_fields = "camelCase")]
pub enum DomainEvent {
    RepCreated {
        rep_id: String,
        exercise_id: String,
        velocity: f64,
        #[serde(with = "iso8601_millis")]
        occurred_on: DateTime<Utc>,
    },
}

impl DomainEvent {
    pub fn rep_created(rep: &Rep) -> Self {
        DomainEvent::RepCreated {
            rep_id: rep.id().to_string(),
            exercise_id: rep.exercise_id().to_string(),
            velocity: rep.velocity(),
            occurred_on: Utc::now(),
        }
    }

    pub fn event_type(&self) -> &'static str {
        match self {
            DomainEvent::RepCreated { .. } => "RepCreated",
        }
    }

    pub fn occurred_on(&self) -> DateTime<Utc> {
        match self {
            DomainEvent::RepCreated { occurred_on, .. } => *occurred_on,
        }
    }
}
