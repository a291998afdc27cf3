// Domain layer: resume document model, its canonical projection, and ports.

pub mod factory;
pub mod model;
pub mod ports;
