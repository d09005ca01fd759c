// Domain layer: API value types, response models and the config port.

pub mod enums;
pub mod models;
pub mod ports;
pub mod steamid;
