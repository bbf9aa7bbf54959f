#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::TomlConfig;

use crate::domain::ports::ServerSettings;
use crate::utils::error::Result;
use crate::utils::validation::{validate_origin, validate_path, validate_range};
use std::net::{IpAddr, Ipv4Addr};

pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_DATA_DIR: &str = "./data";
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";
pub const MIN_BODY_LIMIT_BYTES: usize = 1024;
pub const MAX_BODY_LIMIT_BYTES: usize = 50 * 1024 * 1024;

/// CLI 與 TOML 共用的檢查
pub fn validate_settings(settings: &dyn ServerSettings) -> Result<()> {
    validate_range("server.port", settings.bind_address().port(), 1, u16::MAX)?;
    validate_path(
        "storage.data_dir",
        &settings.data_dir().to_string_lossy(),
    )?;
    validate_origin("cors.origin", settings.cors_origin())?;
    validate_range(
        "server.body_limit_bytes",
        settings.body_limit_bytes(),
        MIN_BODY_LIMIT_BYTES,
        MAX_BODY_LIMIT_BYTES,
    )?;

    tracing::debug!("✅ Configuration validation passed");
    Ok(())
}
