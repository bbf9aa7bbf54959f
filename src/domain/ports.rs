use crate::domain::events::DomainEvent;
use crate::domain::model::{Rep, RepQuery, Zone};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

/// Rep 的持久化介面。`save` 以 id 做 upsert
#[async_trait]
pub trait RepRepository: Send + Sync {
    async fn save(&self, rep: Rep) -> Result<Rep>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Rep>>;
    async fn find_all(&self) -> Result<Vec<Rep>>;
    async fn find_by_query(&self, query: &RepQuery) -> Result<Vec<Rep>>;
}

#[async_trait]
pub trait ZoneRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Zone>>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Zone>>;
    async fn save(&self, zone: Zone) -> Result<Zone>;
}

/// 領域事件的接收端
pub trait EventSink: Send + Sync {
    fn publish(&self, event: DomainEvent);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    File,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// 只有開發模式才把內部錯誤細節回給客戶端
    pub fn exposes_error_details(&self) -> bool {
        matches!(self, Environment::Development)
    }
}

pub trait ServerSettings: Send + Sync {
    fn bind_address(&self) -> SocketAddr;
    fn storage_backend(&self) -> StorageBackend;
    fn data_dir(&self) -> &Path;
    fn atomic_writes(&self) -> bool;
    fn cors_origin(&self) -> &str;
    fn environment(&self) -> Environment;
    fn body_limit_bytes(&self) -> usize;
}
