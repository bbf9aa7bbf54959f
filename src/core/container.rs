use crate::adapters::events::TracingEventSink;
use crate::adapters::storage::{
    InMemoryRepRepository, InMemoryZoneRepository, JsonFileRepRepository, JsonFileStore,
    JsonFileZoneRepository, JsonStoreOptions,
};
use crate::app::use_cases::{CreateRepUseCase, GetRepUseCase, GetRepsUseCase, GetZonesUseCase};
use crate::domain::ports::{EventSink, RepRepository, ServerSettings, StorageBackend, ZoneRepository};
use crate::utils::error::Result;
use std::path::Path;
use std::sync::Arc;

/// 組合根：依設定建立儲存層，並把同一組 repository 注入所有 use case
pub struct AppContainer {
    pub reps: Arc<dyn RepRepository>,
    pub zones: Arc<dyn ZoneRepository>,
    pub create_rep: CreateRepUseCase,
    pub get_reps: GetRepsUseCase,
    pub get_rep: GetRepUseCase,
    pub get_zones: GetZonesUseCase,
}

impl AppContainer {
    pub fn new(
        reps: Arc<dyn RepRepository>,
        zones: Arc<dyn ZoneRepository>,
        events: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            create_rep: CreateRepUseCase::new(Arc::clone(&reps), events),
            get_reps: GetRepsUseCase::new(Arc::clone(&reps), Arc::clone(&zones)),
            get_rep: GetRepUseCase::new(Arc::clone(&reps)),
            get_zones: GetZonesUseCase::new(Arc::clone(&zones), Arc::clone(&reps)),
            reps,
            zones,
        }
    }

    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryRepRepository::new()),
            Arc::new(InMemoryZoneRepository::new()),
            Arc::new(TracingEventSink),
        )
    }

    pub async fn json_file(data_dir: &Path, options: JsonStoreOptions) -> Result<Self> {
        let store = JsonFileStore::open(data_dir, options).await?;
        Ok(Self::new(
            Arc::new(JsonFileRepRepository::new(Arc::clone(&store))),
            Arc::new(JsonFileZoneRepository::new(store)),
            Arc::new(TracingEventSink),
        ))
    }

    pub async fn from_settings(settings: &dyn ServerSettings) -> Result<Self> {
        match settings.storage_backend() {
            StorageBackend::Memory => {
                tracing::info!("💾 Using in-memory storage (data is lost on restart)");
                Ok(Self::in_memory())
            }
            StorageBackend::File => {
                tracing::info!(
                    "💾 Using JSON file storage in {}",
                    settings.data_dir().display()
                );
                let options = JsonStoreOptions {
                    atomic_writes: settings.atomic_writes(),
                };
                Self::json_file(settings.data_dir(), options).await
            }
        }
    }
}
