// Application layer: maps requests onto entities and ports, and entities onto response DTOs.

pub mod dto;
pub mod use_cases;
