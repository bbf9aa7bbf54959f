pub mod create_rep;
pub mod get_reps;
pub mod get_zones;

pub use create_rep::CreateRepUseCase;
pub use get_reps::{GetRepUseCase, GetRepsUseCase};
pub use get_zones::GetZonesUseCase;
