// Domain layer: core models and ports (interfaces). No framework types here.

pub mod model;
pub mod ports;
