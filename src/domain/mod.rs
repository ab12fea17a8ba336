// Domain layer: countdown models and ports (clock, sink, scheduler, settings).

pub mod model;
pub mod ports;
