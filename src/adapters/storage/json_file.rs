use crate::domain::model::{seed_zones, Rep, RepQuery, Zone};
use crate::domain::ports::{RepRepository, ZoneRepository};
use crate::domain::services::filter_reps;
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::Mutex;

pub const DB_FILE_NAME: &str = "db.json";

/// 磁碟上的 JSON 文件格式 `{ zones: [...], reps: [...] }`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatabaseDocument {
    #[serde(default)]
    pub zones: Vec<Zone>,
    #[serde(default)]
    pub reps: Vec<Rep>,
}

impl DatabaseDocument {
    pub fn seeded() -> Self {
        Self {
            zones: seed_zones(),
            reps: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonStoreOptions {
    /// 先寫暫存檔再 rename，避免寫到一半的檔案
    pub atomic_writes: bool,
}

/// 整份文件讀寫的 JSON 檔案儲存。
///
/// 同一個 process 內的寫入由 `write_lock` 串行化；多個 process 同時寫入
/// 同一個檔案仍然可能互相覆蓋。
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    options: JsonStoreOptions,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// 建立資料目錄，檔案不存在時寫入預設區間
    pub async fn open(data_dir: impl AsRef<Path>, options: JsonStoreOptions) -> Result<Arc<Self>> {
        let data_dir = data_dir.as_ref();
        fs::create_dir_all(data_dir).await?;

        let store = Self {
            path: data_dir.join(DB_FILE_NAME),
            options,
            write_lock: Mutex::new(()),
        };

        if fs::try_exists(&store.path).await? {
            tracing::debug!("Using existing data file {}", store.path.display());
        } else {
            tracing::info!("Creating data file with seed zones at {}", store.path.display());
            store.write(&DatabaseDocument::seeded()).await?;
        }

        Ok(Arc::new(store))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn read(&self) -> Result<DatabaseDocument> {
        let raw = fs::read_to_string(&self.path).await?;
        let document = serde_json::from_str(&raw)?;
        Ok(document)
    }

    pub async fn write(&self, document: &DatabaseDocument) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(document)?;

        if self.options.atomic_writes {
            let tmp_path = self.path.with_extension("json.tmp");
            fs::write(&tmp_path, json.as_bytes()).await?;
            fs::rename(&tmp_path, &self.path).await?;
        } else {
            fs::write(&self.path, json.as_bytes()).await?;
        }

        tracing::debug!("Wrote {} bytes to {}", json.len(), self.path.display());
        Ok(())
    }

    /// 讀取、修改、寫回整份文件
    pub async fn update<T, F>(&self, apply: F) -> Result<T>
    where
        T: Send,
        F: FnOnce(&mut DatabaseDocument) -> T + Send,
    {
        let _guard = self.write_lock.lock().await;
        let mut document = self.read().await?;
        let output = apply(&mut document);
        self.write(&document).await?;
        Ok(output)
    }
}

fn upsert_by_id<T: Clone>(items: &mut Vec<T>, item: &T, id_of: impl Fn(&T) -> &str) {
    let id = id_of(item);
    match items.iter().position(|existing| id_of(existing) == id) {
        Some(index) => items[index] = item.clone(),
        None => items.push(item.clone()),
    }
}

#[derive(Debug, Clone)]
pub struct JsonFileRepRepository {
    store: Arc<JsonFileStore>,
}

impl JsonFileRepRepository {
    pub fn new(store: Arc<JsonFileStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl RepRepository for JsonFileRepRepository {
    async fn save(&self, rep: Rep) -> Result<Rep> {
        self.store
            .update(|document| upsert_by_id(&mut document.reps, &rep, |r| r.id()))
            .await?;
        Ok(rep)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Rep>> {
        let document = self.store.read().await?;
        Ok(document.reps.into_iter().find(|rep| rep.id() == id))
    }

    async fn find_all(&self) -> Result<Vec<Rep>> {
        Ok(self.store.read().await?.reps)
    }

    async fn find_by_query(&self, query: &RepQuery) -> Result<Vec<Rep>> {
        let document = self.store.read().await?;
        Ok(filter_reps(&document.reps, query))
    }
}

#[derive(Debug, Clone)]
pub struct JsonFileZoneRepository {
    store: Arc<JsonFileStore>,
}

impl JsonFileZoneRepository {
    pub fn new(store: Arc<JsonFileStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ZoneRepository for JsonFileZoneRepository {
    async fn find_all(&self) -> Result<Vec<Zone>> {
        Ok(self.store.read().await?.zones)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Zone>> {
        let document = self.store.read().await?;
        Ok(document.zones.into_iter().find(|zone| zone.id() == id))
    }

    async fn save(&self, zone: Zone) -> Result<Zone> {
        self.store
            .update(|document| upsert_by_id(&mut document.zones, &zone, |z| z.id()))
            .await?;
        Ok(zone)
    }
}
