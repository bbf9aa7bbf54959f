// Storage backends behind the repository ports: in-memory lists or one JSON document on disk.

pub mod json_file;
pub mod memory;

pub use json_file::{
    DatabaseDocument, JsonFileRepRepository, JsonFileStore, JsonFileZoneRepository,
    JsonStoreOptions, DB_FILE_NAME,
};
pub use memory::{InMemoryRepRepository, InMemoryZoneRepository};
