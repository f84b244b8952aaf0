pub mod models;
pub mod service;

pub use models::{counters, timestamps, StatsSnapshot};
pub use service::StatsAggregator;
