//! Fee schedule configuration: entry fee, penalty definitions and game types.

use serde::{Deserialize, Serialize};

/// Derive a stable identifier from a display label.
///
/// Lowercases, maps whitespace to underscores and drops everything outside
/// `[a-z0-9_]`. The mapping is lossy, so visually distinct labels can
/// collide; collisions surface as a duplicate-id error when adding.
pub fn slug_id(label: &str) -> String {
    label
        .chars()
        .flat_map(char::to_lowercase)
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .filter(|c| matches!(c, 'a'..='z' | '0'..='9' | '_'))
        .collect()
}

/// A priced infraction category.
///
/// Normal penalties are paid by the player who incurred them. Inverted
/// penalties are paid by every *other* player on the evening instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PenaltyDefinition {
    pub id: String,
    pub label: String,
    pub description: String,
    pub unit_price: f64,
    #[serde(default)]
    pub inverted: bool,
}

impl PenaltyDefinition {
    /// Create a definition with an id derived from the label.
    pub fn new(label: &str, description: &str, unit_price: f64, inverted: bool) -> Self {
        Self {
            id: slug_id(label),
            label: label.to_string(),
            description: description.to_string(),
            unit_price: unit_price.max(0.0),
            inverted,
        }
    }
}

/// A named scoring category for free-form per-player results. Carries no
/// price semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameTypeDefinition {
    pub id: String,
    pub label: String,
    pub description: String,
}

impl GameTypeDefinition {
    pub fn new(label: &str, description: &str) -> Self {
        Self {
            id: slug_id(label),
            label: label.to_string(),
            description: description.to_string(),
        }
    }
}

/// The fee schedule. Penalty and game-type order is insertion order and
/// doubles as display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    pub entry_fee: f64,
    pub penalties: Vec<PenaltyDefinition>,
    pub game_types: Vec<GameTypeDefinition>,
    pub currency_symbol: String,
}

impl Configuration {
    pub fn penalty(&self, id: &str) -> Option<&PenaltyDefinition> {
        self.penalties.iter().find(|p| p.id == id)
    }

    pub fn game_type(&self, id: &str) -> Option<&GameTypeDefinition> {
        self.game_types.iter().find(|g| g.id == id)
    }
}

impl Default for Configuration {
    /// Built-in fee schedule used on first run and as the source of shipped
    /// defaults when merging a persisted configuration.
    fn default() -> Self {
        Self {
            entry_fee: 6.0,
            penalties: vec![
                PenaltyDefinition::new("Kalle", "Ball landed in the gutter", 0.5, false),
                PenaltyDefinition::new("Pudel", "Missed every pin", 0.5, false),
                PenaltyDefinition::new("Ratte", "Wrong lane or foul throw", 1.0, false),
                PenaltyDefinition::new("Kranz", "All pins but the king; the others pay", 0.5, true),
            ],
            game_types: vec![
                GameTypeDefinition::new("Meisterschaft", "Championship round"),
                GameTypeDefinition::new("Geldspiel", "Money game"),
            ],
            currency_symbol: "€".to_string(),
        }
    }
}
