use crate::adapters::http::DEFAULT_BODY_LIMIT_BYTES;
use crate::config::validate_settings;
use crate::domain::ports::{Environment, ServerSettings, StorageBackend};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Parser)]
#[command(name = "velocity-zones")]
#[command(about = "REST API for velocity zones and recorded reps")]
pub struct CliConfig {
    #[arg(long, env = "API_HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    #[arg(long, env = "PORT", default_value = "3001")]
    pub port: u16,

    #[arg(long, env = "STORAGE_BACKEND", value_enum, default_value = "file")]
    pub storage: StorageBackend,

    #[arg(long, env = "API_DATA_DIR", default_value = "./data")]
    pub data_dir: PathBuf,

    #[arg(long, help = "Write db.json through a temp file and rename")]
    pub atomic_writes: bool,

    #[arg(long, env = "CORS_ORIGIN", default_value = "http://localhost:3000")]
    pub cors_origin: String,

    #[arg(long, env = "APP_ENV", value_enum, default_value = "development")]
    pub environment: Environment,

    #[arg(long, default_value_t = DEFAULT_BODY_LIMIT_BYTES)]
    pub body_limit_bytes: usize,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ServerSettings for CliConfig {
    fn bind_address(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    fn storage_backend(&self) -> StorageBackend {
        self.storage
    }

    fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn atomic_writes(&self) -> bool {
        self.atomic_writes
    }

    fn cors_origin(&self) -> &str {
        &self.cors_origin
    }

    fn environment(&self) -> Environment {
        self.environment
    }

    fn body_limit_bytes(&self) -> usize {
        self.body_limit_bytes
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_settings(self)
    }
}
