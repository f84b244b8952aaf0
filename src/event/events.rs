use serde::{Deserialize, Serialize};

/// Facts the progress engine reports outward.
///
/// Events represent things that have already happened; the UI layer consumes
/// them to show unlock celebrations and new-record toasts without the engine
/// knowing anything about presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ProgressEvent {
    /// An achievement transitioned from locked to unlocked. Fired exactly
    /// once per achievement; XP has already been awarded when this is emitted.
    AchievementUnlocked { id: String, xp_reward: u32 },

    /// The correct-answer streak exceeded its previous best.
    NewStreakRecord { new_streak_value: u32 },
}

impl ProgressEvent {
    /// Get a human-readable description of the event type
    pub fn event_type(&self) -> &'static str {
        match self {
            ProgressEvent::AchievementUnlocked { .. } => "achievement_unlocked",
            ProgressEvent::NewStreakRecord { .. } => "new_streak_record",
        }
    }
}
