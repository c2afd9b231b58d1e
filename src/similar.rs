use std::collections::HashSet;

use crate::roster::{Player, Roster};

/// One similarity lookup: which player to compare against, how many of the
/// reference's strongest attributes define the comparison, and how far a
/// candidate may drift on each of them.
#[derive(Debug, Clone)]
pub struct SimilarQuery {
    /// Short display name, matched exactly; first hit wins on duplicates.
    pub reference: String,
    pub top_n: usize,
    /// Maximum per-attribute absolute difference, inclusive. A difference of
    /// exactly `leeway` still qualifies.
    pub leeway: i64,
    pub age_min: i64,
    pub age_max: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimilarMatch {
    pub index: usize,
    /// Summed absolute difference over the compared attributes. Raw, not
    /// normalized; lower is more similar.
    pub score: i64,
}

#[derive(Debug, Clone, Default)]
pub struct SimilarResult {
    /// Index of the resolved reference player; `None` when the name was not
    /// found (and `matches` is empty).
    pub reference: Option<usize>,
    /// The attribute names the query compared on, strongest first.
    pub compared: Vec<String>,
    /// Qualifying candidates, ascending by score, dataset order on ties.
    pub matches: Vec<SimilarMatch>,
}

/// Rank players close to a reference player under a bounded-difference rule.
///
/// The comparison dimensions are the `top_n` stat columns where the
/// reference scores highest (ties broken by column order). A candidate is
/// disqualified outright when any single compared attribute differs by more
/// than `leeway`; otherwise its score is the sum of absolute differences.
/// Candidates must share at least one position token with the reference and
/// fall inside the inclusive age window. Scores live on the result rows,
/// never on the roster itself.
pub fn find_similar(roster: &Roster, query: &SimilarQuery) -> SimilarResult {
    let Some(ref_idx) = roster.find_player(&query.reference) else {
        return SimilarResult::default();
    };
    let reference = &roster.players[ref_idx];

    let mut ranked: Vec<(usize, &str)> = roster
        .stat_columns
        .iter()
        .enumerate()
        .map(|(i, c)| (i, c.as_str()))
        .collect();
    ranked.sort_by(|a, b| {
        let va = reference.stat(a.1).unwrap_or(0);
        let vb = reference.stat(b.1).unwrap_or(0);
        vb.cmp(&va).then(a.0.cmp(&b.0))
    });
    let compared: Vec<String> = ranked
        .into_iter()
        .take(query.top_n)
        .map(|(_, c)| c.to_string())
        .collect();

    let ref_positions: HashSet<&str> = reference.position_tokens().collect();

    let mut matches = Vec::new();
    for (idx, candidate) in roster.players.iter().enumerate() {
        if idx == ref_idx {
            continue;
        }
        if !candidate
            .position_tokens()
            .any(|t| ref_positions.contains(t))
        {
            continue;
        }
        let age = candidate.age();
        if age < query.age_min || age > query.age_max {
            continue;
        }
        let Some(score) = score_candidate(reference, candidate, &compared, query.leeway) else {
            continue;
        };
        matches.push(SimilarMatch { index: idx, score });
    }

    // sort_by_key is stable, so equal scores keep dataset order.
    matches.sort_by_key(|m| m.score);

    SimilarResult {
        reference: Some(ref_idx),
        compared,
        matches,
    }
}

/// `None` means disqualified: some compared attribute is missing or drifts
/// past the leeway. The cutoff is per attribute, not on the aggregate.
fn score_candidate(
    reference: &Player,
    candidate: &Player,
    compared: &[String],
    leeway: i64,
) -> Option<i64> {
    let mut total = 0i64;
    for col in compared {
        let r = reference.stat(col)?;
        let c = candidate.stat(col)?;
        let diff = (r - c).abs();
        if diff > leeway {
            return None;
        }
        total += diff;
    }
    Some(total)
}
