pub mod catalog;
pub mod models;
pub mod service;

pub use catalog::default_catalog;
pub use models::{AchievementDefinition, Category, Rarity, UnlockRecord};
pub use service::AchievementEngine;
