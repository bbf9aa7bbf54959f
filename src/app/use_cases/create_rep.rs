use crate::app::dto::{CreateRepRequest, RepResponse};
use crate::domain::model::Rep;
use crate::domain::ports::{EventSink, RepRepository};
use crate::utils::error::Result;
use std::sync::Arc;

pub struct CreateRepUseCase {
    reps: Arc<dyn RepRepository>,
    events: Arc<dyn EventSink>,
}

impl CreateRepUseCase {
    pub fn new(reps: Arc<dyn RepRepository>, events: Arc<dyn EventSink>) -> Self {
        Self { reps, events }
    }

    /// 速度不合法時直接回傳錯誤，不會寫入儲存層
    pub async fn execute(&self, request: CreateRepRequest) -> Result<RepResponse> {
        let rep = Rep::create_with_events(
            request.exercise_id,
            request.velocity,
            request.metadata,
            self.events.as_ref(),
        )?;

        let saved = self.reps.save(rep).await?;
        tracing::debug!("Saved rep {} for exercise {}", saved.id(), saved.exercise_id());

        Ok(RepResponse::from(&saved))
    }
}
