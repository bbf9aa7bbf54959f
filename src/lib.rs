pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::http::{build_router, HttpOptions};
pub use core::{container::AppContainer, server::ApiServer};
pub use domain::model::{Rep, RepQuery, VelocityValue, Zone};
pub use utils::error::{AppError, Result};
