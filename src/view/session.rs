//! Session-scoped widget state.
//!
//! The store is owned by the GUI shell and handed to the controller every
//! frame. It survives across frames of one session and is never shared between
//! sessions.

use std::collections::HashMap;
use tracing::debug;

pub const SELECTED_GAMES: &str = "selected_games";
pub const SELECTED_RANKS: &str = "selected_ranks";

/// Games seeded from the end-date ranking on first render, and by the small top-N button.
pub const TOP_GAMES_SMALL: usize = 7;
pub const TOP_GAMES_LARGE: usize = 15;

/// Ranks 1 through 10.
pub const DEFAULT_RANKS: std::ops::RangeInclusive<i64> = 1..=10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionValue {
    Games(Vec<String>),
    Ranks(Vec<i64>),
}

/// Key-value store for selections that must outlive a single frame.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    values: HashMap<String, SessionValue>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&SessionValue> {
        self.values.get(key)
    }

    pub fn set(&mut self, key: &str, value: SessionValue) {
        self.values.insert(key.to_string(), value);
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn selected_games(&self) -> Option<&[String]> {
        match self.values.get(SELECTED_GAMES) {
            Some(SessionValue::Games(games)) => Some(games),
            _ => None,
        }
    }

    pub fn set_selected_games(&mut self, games: Vec<String>) {
        self.set(SELECTED_GAMES, SessionValue::Games(games));
    }

    pub fn selected_ranks(&self) -> Option<&[i64]> {
        match self.values.get(SELECTED_RANKS) {
            Some(SessionValue::Ranks(ranks)) => Some(ranks),
            _ => None,
        }
    }

    pub fn set_selected_ranks(&mut self, ranks: Vec<i64>) {
        self.set(SELECTED_RANKS, SessionValue::Ranks(ranks));
    }
}

/// Bulk actions offered next to the game multiselect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    SelectAll,
    SelectNone,
    /// First N games of the ranking at the end date
    Top(usize),
}

impl GameAction {
    /// Resolve the action against the candidate and end-date lists.
    pub fn apply(self, all_games: &[String], most_recent: &[String]) -> Vec<String> {
        debug!(action = ?self, "game selection bulk action");
        match self {
            GameAction::SelectAll => all_games.to_vec(),
            GameAction::SelectNone => Vec::new(),
            GameAction::Top(n) => most_recent.iter().take(n).cloned().collect(),
        }
    }
}

/// Bulk actions offered next to the rank multiselect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankAction {
    SelectAll,
    SelectNone,
    SelectDefault,
}

impl RankAction {
    pub fn apply(self, all_ranks: &[i64]) -> Vec<i64> {
        debug!(action = ?self, "rank selection bulk action");
        match self {
            RankAction::SelectAll => all_ranks.to_vec(),
            RankAction::SelectNone => Vec::new(),
            RankAction::SelectDefault => DEFAULT_RANKS.collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn typed_accessors_ignore_mismatched_values() {
        let mut session = SessionState::new();
        session.set(SELECTED_GAMES, SessionValue::Ranks(vec![1]));
        assert!(session.contains(SELECTED_GAMES));
        assert_eq!(session.selected_games(), None);

        session.set_selected_games(names(&["A"]));
        assert_eq!(session.selected_games(), Some(&names(&["A"])[..]));
    }

    #[test]
    fn game_actions_resolve() {
        let all = names(&["A", "B", "C"]);
        let recent = names(&["C", "A"]);
        assert_eq!(GameAction::SelectAll.apply(&all, &recent), all);
        assert!(GameAction::SelectNone.apply(&all, &recent).is_empty());
        assert_eq!(GameAction::Top(1).apply(&all, &recent), names(&["C"]));
        assert_eq!(GameAction::Top(15).apply(&all, &recent), recent);
    }

    #[test]
    fn rank_default_is_one_through_ten() {
        let ranks = RankAction::SelectDefault.apply(&[1, 2, 3]);
        assert_eq!(ranks, (1..=10).collect::<Vec<_>>());
        assert_eq!(RankAction::SelectAll.apply(&[4, 9]), vec![4, 9]);
        assert!(RankAction::SelectNone.apply(&[4, 9]).is_empty());
    }
}
