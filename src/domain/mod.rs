// Domain layer: core models, the built-in catalog and ports (interfaces).

pub mod defaults;
pub mod model;
pub mod ports;
