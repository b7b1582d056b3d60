// Domain layer: document models and ports (interfaces). Only std/chrono/serde here.

pub mod model;
pub mod ports;
