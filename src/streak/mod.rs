pub mod models;
pub mod service;

pub use models::{keys, DailyOutcome, StreakState};
pub use service::StreakTracker;
