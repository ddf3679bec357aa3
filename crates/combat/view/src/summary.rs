//! End-of-combat summary card.

use combat_core::{CombatSummary, Side};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SummaryCard {
    pub winner: Side,
    pub headline: &'static str,
    pub results: String,
    pub stat_lines: Vec<String>,
    pub prompt: &'static str,
}

impl SummaryCard {
    pub const RETURN_PROMPT: &'static str = "Press Enter to return to the story";

    pub fn new(summary: &CombatSummary) -> Self {
        let headline = if summary.player_won() {
            "Victory"
        } else {
            "Defeat"
        };
        let stats = summary.stats;
        Self {
            winner: summary.winner,
            headline,
            results: summary.results.clone(),
            stat_lines: vec![
                format!("Rounds fought: {}", stats.rounds),
                format!("Damage dealt: {}", stats.damage_dealt),
                format!("Damage taken: {}", stats.damage_taken),
            ],
            prompt: Self::RETURN_PROMPT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::CombatStats;

    #[test]
    fn victory_card() {
        let stats = CombatStats {
            rounds: 3,
            damage_dealt: 14,
            damage_taken: 5,
        };
        let card = SummaryCard::new(&CombatSummary::new(Side::Player, "Black Bart", stats));
        assert_eq!(card.headline, "Victory");
        assert!(card.results.contains("Black Bart"));
        assert_eq!(
            card.stat_lines,
            ["Rounds fought: 3", "Damage dealt: 14", "Damage taken: 5"]
        );
    }

    #[test]
    fn defeat_card() {
        let card = SummaryCard::new(&CombatSummary::new(
            Side::Opponent,
            "Black Bart",
            CombatStats::default(),
        ));
        assert_eq!(card.headline, "Defeat");
        assert_eq!(card.winner, Side::Opponent);
    }
}
