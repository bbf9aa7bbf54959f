use crate::app::dto::RepResponse;
use crate::domain::model::{Rep, RepQuery};
use crate::domain::ports::{RepRepository, ZoneRepository};
use crate::domain::services::{matches_criteria, paginate};
use crate::utils::error::{AppError, Result};
use std::sync::Arc;

pub struct GetRepsUseCase {
    reps: Arc<dyn RepRepository>,
    zones: Arc<dyn ZoneRepository>,
}

impl GetRepsUseCase {
    pub fn new(reps: Arc<dyn RepRepository>, zones: Arc<dyn ZoneRepository>) -> Self {
        Self { reps, zones }
    }

    pub async fn execute(&self, query: RepQuery) -> Result<Vec<RepResponse>> {
        let reps = match &query.zone_id {
            None => self.reps.find_by_query(&query).await?,
            Some(zone_id) => self.find_in_zone(zone_id, &query).await?,
        };

        tracing::debug!("Query {:?} matched {} reps", query, reps.len());
        Ok(reps.iter().map(RepResponse::from).collect())
    }

    /// 區間條件與其他條件一起套用，最後才分頁
    async fn find_in_zone(&self, zone_id: &str, query: &RepQuery) -> Result<Vec<Rep>> {
        let zone = self
            .zones
            .find_by_id(zone_id)
            .await?
            .ok_or_else(|| AppError::not_found("Velocity zone", zone_id))?;

        let matching: Vec<Rep> = self
            .reps
            .find_all()
            .await?
            .into_iter()
            .filter(|rep| matches_criteria(rep, query) && zone.contains_velocity(rep.velocity()))
            .collect();

        Ok(paginate(matching, query))
    }
}

pub struct GetRepUseCase {
    reps: Arc<dyn RepRepository>,
}

impl GetRepUseCase {
    pub fn new(reps: Arc<dyn RepRepository>) -> Self {
        Self { reps }
    }

    pub async fn execute(&self, id: &str) -> Result<RepResponse> {
        self.reps
            .find_by_id(id)
            .await?
            .map(|rep| RepResponse::from(&rep))
            .ok_or_else(|| AppError::not_found("Rep", id))
    }
}
