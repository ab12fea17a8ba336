pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod page;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{
    clock::{FixedClock, SystemClock},
    scheduler::{ManualScheduler, TokioScheduler},
    sink::PageSink,
};
pub use config::cli::{OutputFormat, TerminalSink};
pub use config::toml_config::CountdownConfig;
pub use crate::core::engine::{CountdownEngine, EngineOptions};
pub use utils::error::{CountdownError, Result};
