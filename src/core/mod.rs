pub mod countdown;
pub mod engine;

pub use crate::domain::model::{CountdownLabel, CountdownState, Remaining, TargetInstant, TickReport};
pub use crate::domain::ports::{Clock, CountdownSettings, RenderSink, Scheduler};
pub use crate::utils::error::Result;
