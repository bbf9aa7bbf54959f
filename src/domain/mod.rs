// Domain layer: entities, pure services and the ports the adapters implement.

pub mod events;
pub mod model;
pub mod ports;
pub mod services;
