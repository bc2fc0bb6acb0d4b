use serde::{Deserialize, Serialize};

/// Player display identity, persisted locally and copied into
/// leaderboard submissions.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayerProfile {
    /// Display name shown on the leaderboard
    pub nickname: Option<String>,

    /// Avatar image as a data URL
    pub avatar: Option<String>,
}

impl PlayerProfile {
    /// Leaderboard display name: the nickname, or a shortened wallet
    /// address when no nickname was set.
    pub fn display_name(&self, address: &str) -> String {
        match &self.nickname {
            Some(name) if !name.trim().is_empty() => name.clone(),
            _ => {
                let head: String = address.chars().take(8).collect();
                format!("{head}...")
            }
        }
    }
}
