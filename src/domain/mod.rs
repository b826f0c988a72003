// Domain layer: transfer shapes owned by the backend and the ports the proxy depends on.

pub mod model;
pub mod ports;
