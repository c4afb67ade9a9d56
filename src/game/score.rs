//! Score derivation from the click path.

use crate::game::types::{ClickPathEntry, RewardTable};

/// Sum of the rewards of every clicked cell.
pub fn score_of(path: &[ClickPathEntry], rewards: &RewardTable) -> u32 {
    path.iter().map(|entry| rewards.reward(entry.symbol)).sum()
}

/// `🍊(1) → 🍎(2) → ...`, the play order as shown under the grid.
pub fn path_display(path: &[ClickPathEntry]) -> String {
    path.iter()
        .map(|entry| format!("{}({})", entry.symbol.emoji(), entry.index + 1))
        .collect::<Vec<_>>()
        .join(" → ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::types::Symbol;

    fn entry(index: usize, symbol: Symbol) -> ClickPathEntry {
        ClickPathEntry { row: 0, col: index, symbol, index }
    }

    #[test]
    fn test_empty_path_scores_zero() {
        assert_eq!(score_of(&[], &RewardTable::default()), 0);
        assert_eq!(path_display(&[]), "");
    }

    #[test]
    fn test_sum_of_rewards() {
        let path = [
            entry(0, Symbol::Orange),
            entry(1, Symbol::Apple),
            entry(2, Symbol::Lemon),
            entry(3, Symbol::Ball),
        ];
        assert_eq!(score_of(&path, &RewardTable::default()), 80);
    }

    #[test]
    fn test_custom_reward_table() {
        let rewards = RewardTable { orange: 1, apple: 2, lemon: 3, ball: 4 };
        let path = [entry(0, Symbol::Ball), entry(1, Symbol::Ball)];
        assert_eq!(score_of(&path, &rewards), 8);
    }

    #[test]
    fn test_path_display_is_one_based() {
        let path = [entry(0, Symbol::Orange), entry(1, Symbol::Ball)];
        assert_eq!(path_display(&path), "🍊(1) → 🏀(2)");
    }
}
