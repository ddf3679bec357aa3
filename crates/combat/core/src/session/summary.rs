use crate::model::Side;

/// Round and damage totals for a finished encounter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatStats {
    pub rounds: u32,
    /// Damage the player dealt to the opponent.
    pub damage_dealt: u32,
    /// Damage the player took from the opponent.
    pub damage_taken: u32,
}

impl CombatStats {
    pub(crate) fn record(&mut self, actor: Side, damage: u32) {
        match actor {
            Side::Player => self.damage_dealt = self.damage_dealt.saturating_add(damage),
            Side::Opponent => self.damage_taken = self.damage_taken.saturating_add(damage),
        }
    }
}

/// End-of-combat record. Created once, when a knockout ends the fight.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatSummary {
    pub winner: Side,
    /// Narrative result shown on the summary card.
    pub results: String,
    pub stats: CombatStats,
}

impl CombatSummary {
    pub fn new(winner: Side, opponent_name: &str, stats: CombatStats) -> Self {
        let rounds = match stats.rounds {
            1 => "1 round".to_string(),
            n => format!("{n} rounds"),
        };
        let results = match winner {
            Side::Player => format!(
                "You are victorious! {opponent_name} is knocked out after {rounds}, \
                 having taken {} damage.",
                stats.damage_dealt
            ),
            Side::Opponent => format!(
                "You have been defeated. {opponent_name} knocks you out after {rounds}, \
                 dealing {} damage.",
                stats.damage_taken
            ),
        };
        Self {
            winner,
            results,
            stats,
        }
    }

    pub fn player_won(&self) -> bool {
        self.winner == Side::Player
    }
}
