use crate::domain::model::{seed_zones, Rep, RepQuery, Zone};
use crate::domain::ports::{RepRepository, ZoneRepository};
use crate::domain::services::filter_reps;
use crate::utils::error::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

/// 存在記憶體的 rep 清單，依寫入順序保存
#[derive(Debug, Default)]
pub struct InMemoryRepRepository {
    reps: RwLock<Vec<Rep>>,
}

impl InMemoryRepRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RepRepository for InMemoryRepRepository {
    async fn save(&self, rep: Rep) -> Result<Rep> {
        // 查找與寫入必須在同一個寫鎖內完成
        let mut reps = self.reps.write().await;
        match reps.iter_mut().find(|existing| existing.id() == rep.id()) {
            Some(existing) => *existing = rep.clone(),
            None => reps.push(rep.clone()),
        }
        Ok(rep)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Rep>> {
        let reps = self.reps.read().await;
        Ok(reps.iter().find(|rep| rep.id() == id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Rep>> {
        Ok(self.reps.read().await.clone())
    }

    async fn find_by_query(&self, query: &RepQuery) -> Result<Vec<Rep>> {
        let reps = self.reps.read().await;
        Ok(filter_reps(&reps, query))
    }
}

#[derive(Debug)]
pub struct InMemoryZoneRepository {
    zones: RwLock<Vec<Zone>>,
}

impl InMemoryZoneRepository {
    pub fn new() -> Self {
        Self::with_zones(seed_zones())
    }

    pub fn with_zones(zones: Vec<Zone>) -> Self {
        Self {
            zones: RwLock::new(zones),
        }
    }
}

impl Default for InMemoryZoneRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ZoneRepository for InMemoryZoneRepository {
    async fn find_all(&self) -> Result<Vec<Zone>> {
        Ok(self.zones.read().await.clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Zone>> {
        let zones = self.zones.read().await;
        Ok(zones.iter().find(|zone| zone.id() == id).cloned())
    }

    async fn save(&self, zone: Zone) -> Result<Zone> {
        let mut zones = self.zones.write().await;
        match zones.iter_mut().find(|existing| existing.id() == zone.id()) {
            Some(existing) => *existing = zone.clone(),
            None => zones.push(zone.clone()),
        }
        Ok(zone)
    }
}
