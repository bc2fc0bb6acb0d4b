/// Snapshot of the numbers achievement predicates look at.
///
/// Assembled by the stats service after every trade; predicates are pure
/// functions of this struct and nothing else.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AchievementStats {
    pub total_trades: usize,
    pub profit: f64,
    pub win_streak: u32,
    pub biggest_trade: f64,
    pub max_holdings: f64,
    pub biggest_loss: f64,
}

/// A static catalogue entry. The catalogue is immutable and defined once;
/// which entries a player has earned lives in the persisted unlocked set.
pub struct Achievement {
    /// Unique key, stored in the unlocked set
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    /// Pure predicate over a stats snapshot
    pub condition: fn(&AchievementStats) -> bool,
}

impl std::fmt::Debug for Achievement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Achievement")
            .field("id", &self.id)
            .field("title", &self.title)
            .finish()
    }
}

/// The full achievement catalogue.
pub const ACHIEVEMENTS: [Achievement; 10] = [
    Achievement {
        id: "first_blood",
        title: "🎯 First Blood",
        description: "Complete your first trade",
        icon: "🎯",
        condition: |stats| stats.total_trades >= 1,
    },
    Achievement {
        id: "profitable",
        title: "💰 In The Money",
        description: "Make your first profit",
        icon: "💰",
        condition: |stats| stats.profit > 0.0,
    },
    Achievement {
        id: "trader",
        title: "📊 Active Trader",
        description: "Complete 10 trades",
        icon: "📊",
        condition: |stats| stats.total_trades >= 10,
    },
    Achievement {
        id: "day_trader",
        title: "🔥 Day Trader",
        description: "Complete 50 trades",
        icon: "🔥",
        condition: |stats| stats.total_trades >= 50,
    },
    Achievement {
        id: "rich",
        title: "💎 Getting Rich",
        description: "Earn +$500 profit",
        icon: "💎",
        condition: |stats| stats.profit >= 500.0,
    },
    Achievement {
        id: "millionaire",
        title: "🏆 Millionaire Mindset",
        description: "Earn +$1000 profit",
        icon: "🏆",
        condition: |stats| stats.profit >= 1000.0,
    },
    Achievement {
        id: "win_streak",
        title: "🎲 Hot Streak",
        description: "5 profitable trades in a row",
        icon: "🎲",
        condition: |stats| stats.win_streak >= 5,
    },
    Achievement {
        id: "high_roller",
        title: "💸 High Roller",
        description: "Make a single trade worth $1000+",
        icon: "💸",
        condition: |stats| stats.biggest_trade >= 1000.0,
    },
    Achievement {
        id: "risk_taker",
        title: "🎰 Risk Taker",
        description: "Survive a -$200 loss",
        icon: "🎰",
        condition: |stats| stats.biggest_loss <= -200.0,
    },
    Achievement {
        id: "diamond_hands",
        title: "💎🙌 Diamond Hands",
        description: "Hold 100+ tokens",
        icon: "💎",
        condition: |stats| stats.max_holdings >= 100.0,
    },
];
