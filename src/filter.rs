use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::roster::{Player, Roster};

/// One complete set of filter selections. The presentation layer owns the
/// current selections and hands a fresh query in on every change; the engine
/// keeps no state of its own.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterQuery {
    /// Inclusive [min, max] per numeric column. A range naming a column the
    /// dataset does not have is skipped, not an error.
    pub ranges: HashMap<String, (i64, i64)>,
    /// Empty set = no constraint, for each categorical field.
    pub skill_moves: HashSet<i64>,
    pub weak_foot: HashSet<i64>,
    pub preferred_foot: HashSet<String>,
    /// Position codes; a player passes when any of its own trimmed position
    /// tokens is selected.
    pub positions: HashSet<String>,
}

impl FilterQuery {
    pub fn is_unconstrained(&self) -> bool {
        self.ranges.is_empty()
            && self.skill_moves.is_empty()
            && self.weak_foot.is_empty()
            && self.preferred_foot.is_empty()
            && self.positions.is_empty()
    }
}

/// Apply every active constraint conjunctively. Returns indices into
/// `roster.players`, in original dataset order.
pub fn apply(roster: &Roster, query: &FilterQuery) -> Vec<usize> {
    let known: HashSet<&str> = roster.numeric_columns.iter().map(String::as_str).collect();
    roster
        .players
        .iter()
        .enumerate()
        .filter(|(_, p)| passes(p, query, &known))
        .map(|(i, _)| i)
        .collect()
}

fn passes(player: &Player, query: &FilterQuery, known: &HashSet<&str>) -> bool {
    for (name, (lo, hi)) in &query.ranges {
        if !known.contains(name.as_str()) {
            continue;
        }
        let v = player.stat(name).unwrap_or(0);
        if v < *lo || v > *hi {
            return false;
        }
    }
    if !query.skill_moves.is_empty() && !query.skill_moves.contains(&player.skill_moves()) {
        return false;
    }
    if !query.weak_foot.is_empty() && !query.weak_foot.contains(&player.weak_foot()) {
        return false;
    }
    if !query.preferred_foot.is_empty()
        && !query.preferred_foot.contains(player.preferred_foot.trim())
    {
        return false;
    }
    if !query.positions.is_empty()
        && !player.position_tokens().any(|t| query.positions.contains(t))
    {
        return false;
    }
    true
}
