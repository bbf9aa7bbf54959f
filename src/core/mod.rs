pub mod container;
pub mod server;

pub use crate::domain::model::{Rep, RepQuery, Zone};
pub use crate::domain::ports::{RepRepository, ServerSettings, ZoneRepository};
pub use crate::utils::error::Result;
