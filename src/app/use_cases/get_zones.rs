use crate::app::dto::ZoneResponse;
use crate::domain::ports::{RepRepository, ZoneRepository};
use crate::domain::services::calculate_zone_distribution;
use crate::utils::error::{AppError, Result};
use std::sync::Arc;

/// 區間列表，附帶每個區間目前的 rep 數量
pub struct GetZonesUseCase {
    zones: Arc<dyn ZoneRepository>,
    reps: Arc<dyn RepRepository>,
}

impl GetZonesUseCase {
    pub fn new(zones: Arc<dyn ZoneRepository>, reps: Arc<dyn RepRepository>) -> Self {
        Self { zones, reps }
    }

    pub async fn execute(&self) -> Result<Vec<ZoneResponse>> {
        let zones = self.zones.find_all().await?;
        let reps = self.reps.find_all().await?;
        let distribution = calculate_zone_distribution(&reps, &zones);

        Ok(zones
            .iter()
            .map(|zone| {
                let count = distribution.get(zone.id()).copied().unwrap_or(0);
                ZoneResponse::from_zone(zone, count)
            })
            .collect())
    }

    /// 單一區間。計數以全部區間做 first-match，與列表結果相同
    pub async fn execute_one(&self, id: &str) -> Result<ZoneResponse> {
        self.execute()
            .await?
            .into_iter()
            .find(|zone| zone.id == id)
            .ok_or_else(|| AppError::not_found("Velocity zone", id))
    }
}
