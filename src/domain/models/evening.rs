//! Evening records and their per-evening player roster.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A player on one evening's roster.
///
/// Players exist only inside their owning [`Evening`]; the saved-player
/// roster is a separate flat list of names with no id relationship.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub present: bool,
    /// Penalty id to occurrence count. Absent entries count as zero.
    #[serde(default)]
    pub penalty_counts: BTreeMap<String, u32>,
    /// Game-type id to free-form result text, stored verbatim.
    #[serde(default)]
    pub game_results: BTreeMap<String, String>,
}

impl Player {
    pub fn new(name: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            present: true,
            penalty_counts: BTreeMap::new(),
            game_results: BTreeMap::new(),
        }
    }

    /// Occurrence count for a penalty, zero when no entry exists.
    pub fn penalty_count(&self, penalty_id: &str) -> u32 {
        self.penalty_counts.get(penalty_id).copied().unwrap_or(0)
    }
}

/// One recorded bowling session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evening {
    pub id: String,
    pub date: NaiveDate,
    /// Insertion order is display order. Duplicate names are not rejected at
    /// this level.
    pub players: Vec<Player>,
    #[serde(default)]
    pub notes: String,
    /// Manual finalized flag. Closed evenings are not made immutable here;
    /// that is a presentation-layer convention.
    #[serde(default)]
    pub closed: bool,
}

impl Evening {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            date,
            players: Vec::new(),
            notes: String::new(),
            closed: false,
        }
    }

    pub fn player(&self, player_id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == player_id)
    }

    pub fn player_mut(&mut self, player_id: &str) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == player_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_player_starts_present_and_empty() {
        let player = Player::new("Anna");
        assert!(player.present);
        assert!(player.penalty_counts.is_empty());
        assert!(player.game_results.is_empty());
        assert_eq!(player.penalty_count("kalle"), 0);
    }

    #[test]
    fn player_ids_are_unique() {
        let a = Player::new("Anna");
        let b = Player::new("Anna");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn evening_starts_open_and_empty() {
        let evening = Evening::new(NaiveDate::from_ymd_opt(2024, 3, 8).unwrap());
        assert!(!evening.closed);
        assert!(evening.players.is_empty());
        assert!(evening.notes.is_empty());
    }
}
