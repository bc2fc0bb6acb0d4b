use crate::models::achievement::{Achievement, AchievementStats, ACHIEVEMENTS};

/// Evaluates the achievement catalogue against a stats snapshot.
///
/// The unlocked set only ever grows: re-evaluating an already-unlocked
/// id is a no-op, so notifications can't fire twice.
pub struct AchievementService;

impl AchievementService {
    pub fn new() -> Self {
        Self
    }

    /// Check every locked catalogue entry against the snapshot.
    /// Newly satisfied entries are added to `unlocked` (in catalogue
    /// order) and returned so the caller can surface them.
    pub fn evaluate(
        &self,
        unlocked: &mut Vec<String>,
        snapshot: &AchievementStats,
    ) -> Vec<&'static Achievement> {
        let mut newly = Vec::new();
        for achievement in ACHIEVEMENTS.iter() {
            if unlocked.iter().any(|id| id == achievement.id) {
                continue;
            }
            if (achievement.condition)(snapshot) {
                unlocked.push(achievement.id.to_string());
                newly.push(achievement);
            }
        }
        newly
    }

    /// Look up a catalogue entry by id.
    pub fn find(&self, id: &str) -> Option<&'static Achievement> {
        ACHIEVEMENTS.iter().find(|a| a.id == id)
    }
}

impl Default for AchievementService {
    fn default() -> Self {
        Self::new()
    }
}
