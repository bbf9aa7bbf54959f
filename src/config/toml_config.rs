use crate::adapters::http::DEFAULT_BODY_LIMIT_BYTES;
use crate::config::{
    validate_settings, DEFAULT_CORS_ORIGIN, DEFAULT_DATA_DIR, DEFAULT_HOST, DEFAULT_PORT,
};
use crate::domain::ports::{Environment, ServerSettings, StorageBackend};
use crate::utils::error::{AppError, Result};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub environment: Option<Environment>,
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub storage: StorageSection,
    #[serde(default)]
    pub cors: CorsSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerSection {
    pub host: Option<IpAddr>,
    pub port: Option<u16>,
    pub body_limit_bytes: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageSection {
    pub backend: Option<StorageBackend>,
    pub data_dir: Option<PathBuf>,
    pub atomic_writes: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CorsSection {
    pub origin: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingSection {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => AppError::MissingConfigError {
                field: path.display().to_string(),
            },
            _ => AppError::IoError(e),
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| AppError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${CORS_ORIGIN})，找不到的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| AppError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn verbose(&self) -> bool {
        self.logging.verbose.unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.logging.json.unwrap_or(false)
    }
}

impl ServerSettings for TomlConfig {
    fn bind_address(&self) -> SocketAddr {
        SocketAddr::new(
            self.server.host.unwrap_or(DEFAULT_HOST),
            self.server.port.unwrap_or(DEFAULT_PORT),
        )
    }

    fn storage_backend(&self) -> StorageBackend {
        self.storage.backend.unwrap_or(StorageBackend::File)
    }

    fn data_dir(&self) -> &Path {
        self.storage
            .data_dir
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_DATA_DIR))
    }

    fn atomic_writes(&self) -> bool {
        self.storage.atomic_writes.unwrap_or(false)
    }

    fn cors_origin(&self) -> &str {
        self.cors.origin.as_deref().unwrap_or(DEFAULT_CORS_ORIGIN)
    }

    fn environment(&self) -> Environment {
        self.environment.unwrap_or(Environment::Development)
    }

    fn body_limit_bytes(&self) -> usize {
        self.server
            .body_limit_bytes
            .unwrap_or(DEFAULT_BODY_LIMIT_BYTES)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_settings(self)
    }
}
