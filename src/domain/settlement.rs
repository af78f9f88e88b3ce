//! Settlement engine: computes what each player owes for an evening.
//!
//! Totals are always derived on demand from the current roster and fee
//! schedule, never stored or persisted. All functions here are total over
//! well-formed input; empty rosters and unknown penalty ids are fine.

use serde::Serialize;

use crate::domain::models::{Configuration, Evening, Player};

/// Amount owed by one player.
///
/// Starts at the entry fee. Each non-inverted penalty adds the player's own
/// occurrence count times the unit price. Each inverted penalty adds the
/// summed occurrence counts of every *other* player on the roster times the
/// unit price; the triggering player pays nothing for their own occurrences.
pub fn player_total(player: &Player, config: &Configuration, roster: &[Player]) -> f64 {
    let mut total = config.entry_fee;
    for penalty in &config.penalties {
        let count = if penalty.inverted {
            roster
                .iter()
                .filter(|q| q.id != player.id)
                .map(|q| q.penalty_count(&penalty.id))
                .sum::<u32>()
        } else {
            player.penalty_count(&penalty.id)
        };
        total += f64::from(count) * penalty.unit_price;
    }
    total
}

/// Sum of [`player_total`] over the whole roster; zero for an empty roster.
///
/// Inverted penalties are redistributed money: one occurrence shows up once
/// per paying player, so it contributes `unit_price × (roster size − 1)`
/// here. That is intentional.
pub fn grand_total(roster: &[Player], config: &Configuration) -> f64 {
    roster
        .iter()
        .map(|player| player_total(player, config, roster))
        .sum()
}

/// One row of a computed settlement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettlementLine {
    pub player_id: String,
    pub name: String,
    pub amount: f64,
}

/// Per-player amounts and the grand total for one evening.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EveningSettlement {
    pub lines: Vec<SettlementLine>,
    pub grand_total: f64,
}

/// Compute the full settlement for an evening, in roster display order.
pub fn settle_evening(evening: &Evening, config: &Configuration) -> EveningSettlement {
    let lines: Vec<SettlementLine> = evening
        .players
        .iter()
        .map(|player| SettlementLine {
            player_id: player.id.clone(),
            name: player.name.clone(),
            amount: player_total(player, config, &evening.players),
        })
        .collect();
    let grand_total = lines.iter().map(|line| line.amount).sum();
    EveningSettlement { lines, grand_total }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::PenaltyDefinition;
    use chrono::NaiveDate;

    fn test_config() -> Configuration {
        Configuration {
            entry_fee: 6.0,
            penalties: vec![
                PenaltyDefinition::new("Kalle", "", 0.5, false),
                PenaltyDefinition::new("Kranz", "", 0.5, true),
            ],
            game_types: vec![],
            currency_symbol: "€".to_string(),
        }
    }

    fn player_with_counts(name: &str, counts: &[(&str, u32)]) -> Player {
        let mut player = Player::new(name);
        for (id, count) in counts {
            player.penalty_counts.insert((*id).to_string(), *count);
        }
        player
    }

    #[test]
    fn two_player_evening_settles_as_documented() {
        // A: two kalle, one kranz. B: nothing. A pays 6.0 + 2×0.5 = 7.0;
        // B pays 6.0 + A's kranz × 0.5 = 6.5.
        let config = test_config();
        let a = player_with_counts("A", &[("kalle", 2), ("kranz", 1)]);
        let b = player_with_counts("B", &[]);
        let roster = vec![a.clone(), b.clone()];

        assert_eq!(player_total(&a, &config, &roster), 7.0);
        assert_eq!(player_total(&b, &config, &roster), 6.5);
        assert_eq!(grand_total(&roster, &config), 13.5);
    }

    #[test]
    fn grand_total_of_empty_roster_is_zero() {
        assert_eq!(grand_total(&[], &test_config()), 0.0);
    }

    #[test]
    fn single_player_inverted_penalties_cost_only_the_entry_fee() {
        let config = test_config();
        let a = player_with_counts("A", &[("kranz", 5)]);
        let roster = vec![a.clone()];
        assert_eq!(player_total(&a, &config, &roster), 6.0);
    }

    #[test]
    fn unknown_penalty_ids_count_as_zero() {
        let config = test_config();
        let a = player_with_counts("A", &[("no_such_penalty", 9)]);
        let roster = vec![a.clone()];
        assert_eq!(player_total(&a, &config, &roster), 6.0);
    }

    #[test]
    fn normal_penalty_increment_raises_only_the_incurring_player() {
        let config = test_config();
        let a = player_with_counts("A", &[("kalle", 1)]);
        let b = player_with_counts("B", &[]);
        let before = vec![a.clone(), b.clone()];

        let mut a2 = a.clone();
        *a2.penalty_counts.get_mut("kalle").unwrap() += 1;
        let after = vec![a2.clone(), b.clone()];

        assert_eq!(
            player_total(&a2, &config, &after),
            player_total(&a, &config, &before) + 0.5
        );
        assert_eq!(
            player_total(&b, &config, &after),
            player_total(&b, &config, &before)
        );
    }

    #[test]
    fn inverted_penalty_increment_raises_every_other_player() {
        let config = test_config();
        let a = player_with_counts("A", &[]);
        let b = player_with_counts("B", &[]);
        let c = player_with_counts("C", &[]);
        let before = vec![a.clone(), b.clone(), c.clone()];

        let mut a2 = a.clone();
        a2.penalty_counts.insert("kranz".to_string(), 1);
        let after = vec![a2.clone(), b.clone(), c.clone()];

        assert_eq!(
            player_total(&a2, &config, &after),
            player_total(&a, &config, &before)
        );
        for other in [&b, &c] {
            assert_eq!(
                player_total(other, &config, &after),
                player_total(other, &config, &before) + 0.5
            );
        }
        // One occurrence, two paying players.
        assert_eq!(
            grand_total(&after, &config),
            grand_total(&before, &config) + 2.0 * 0.5
        );
    }

    #[test]
    fn grand_total_equals_sum_of_lines() {
        let config = test_config();
        let mut evening = Evening::new(NaiveDate::from_ymd_opt(2024, 3, 8).unwrap());
        evening.players = vec![
            player_with_counts("A", &[("kalle", 2), ("kranz", 1)]),
            player_with_counts("B", &[("kranz", 2)]),
            player_with_counts("C", &[("kalle", 1)]),
        ];

        let settlement = settle_evening(&evening, &config);
        assert_eq!(settlement.lines.len(), 3);
        let summed: f64 = settlement.lines.iter().map(|l| l.amount).sum();
        assert_eq!(settlement.grand_total, summed);
        assert_eq!(settlement.grand_total, grand_total(&evening.players, &config));
        // Lines come back in roster order.
        assert_eq!(settlement.lines[0].name, "A");
        assert_eq!(settlement.lines[2].name, "C");
    }
}
