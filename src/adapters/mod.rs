// Adapters layer: concrete clocks, schedulers and render sinks.

pub mod clock;
pub mod scheduler;
pub mod sink;
