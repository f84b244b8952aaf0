use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Achievement grouping shown as tabs in the host UI.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Streaks,
    Trivia,
    Discovery,
    Dedication,
    Social,
    Elite,
}

/// Rarity tier. Each tier carries a fixed XP multiplier over the base
/// reward, so rarer achievements always pay proportionally more.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    pub fn xp_multiplier(&self) -> u32 {
        match self {
            Rarity::Common => 2,
            Rarity::Uncommon => 4,
            Rarity::Rare => 8,
            Rarity::Epic => 20,
            Rarity::Legendary => 80,
        }
    }
}

/// Immutable catalog entry. The catalog is hand-authored, loaded once at
/// startup, and read-only for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievementDefinition {
    /// Stable string key, also the suffix of the persisted unlock keys.
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub rarity: Rarity,
    pub xp_reward: u32,
    /// Target value the progress counter must reach.
    pub requirement: i64,
    /// Requires an active subscription to unlock.
    pub is_premium: bool,
    /// Hidden from locked listings until unlocked.
    pub is_secret: bool,
    /// Stats counter this achievement tracks. `None` means manually gated:
    /// only an explicit `unlock` call from the host can unlock it, and it
    /// always reports zero progress.
    pub progress_key: Option<String>,
}

impl AchievementDefinition {
    pub fn new(
        id: &str,
        title: &str,
        description: &str,
        category: Category,
        rarity: Rarity,
        requirement: i64,
        progress_key: Option<&str>,
    ) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            category,
            rarity,
            xp_reward: BASE_XP * rarity.xp_multiplier(),
            requirement,
            is_premium: false,
            is_secret: false,
            progress_key: progress_key.map(str::to_string),
        }
    }

    pub fn premium(mut self) -> Self {
        self.is_premium = true;
        self
    }

    pub fn secret(mut self) -> Self {
        self.is_secret = true;
        self
    }
}

/// Base XP for a common achievement; rarity multiplies from here.
pub const BASE_XP: u32 = 25;

/// Persisted per-achievement unlock fact. Unlocks are one-way: once set,
/// never cleared.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnlockRecord {
    pub unlocked: bool,
    pub unlocked_at: Option<DateTime<Utc>>,
}
