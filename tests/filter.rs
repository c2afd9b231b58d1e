use std::path::PathBuf;

use fc26_scout::filter::{FilterQuery, apply};
use fc26_scout::roster::{Roster, load_roster};

fn fixture_roster() -> Roster {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push("players_small.csv");
    load_roster(&path).expect("fixture roster should load")
}

#[test]
fn no_constraints_returns_everyone_in_order() {
    let roster = fixture_roster();
    let out = apply(&roster, &FilterQuery::default());
    assert_eq!(out, (0..roster.len()).collect::<Vec<_>>());
}

#[test]
fn constraints_combine_conjunctively() {
    let roster = fixture_roster();
    let mut q = FilterQuery::default();
    q.ranges.insert("age".to_string(), (24, 27));
    q.positions.insert("ST".to_string());
    // ST players aged 24-27: L. Martin (27), S. Byrne (26).
    assert_eq!(apply(&roster, &q), vec![0, 2]);
}

#[test]
fn every_returned_player_satisfies_every_constraint() {
    let roster = fixture_roster();
    let mut q = FilterQuery::default();
    q.ranges.insert("pace".to_string(), (60, 85));
    q.ranges.insert("age".to_string(), (20, 30));
    for idx in apply(&roster, &q) {
        let p = &roster.players[idx];
        let pace = p.stat("pace").unwrap();
        assert!((60..=85).contains(&pace));
        assert!((20..=30).contains(&p.age()));
    }
}

#[test]
fn removing_a_constraint_never_shrinks_the_result() {
    let roster = fixture_roster();
    let mut narrow = FilterQuery::default();
    narrow.ranges.insert("pace".to_string(), (60, 85));
    narrow.ranges.insert("age".to_string(), (20, 30));
    narrow.positions.insert("ST".to_string());

    let mut wide = narrow.clone();
    wide.positions.clear();

    let narrow_out = apply(&roster, &narrow);
    let wide_out = apply(&roster, &wide);
    assert!(narrow_out.iter().all(|i| wide_out.contains(i)));
    assert!(wide_out.len() >= narrow_out.len());
}

#[test]
fn filtering_is_idempotent() {
    let roster = fixture_roster();
    let mut q = FilterQuery::default();
    q.ranges.insert("overall".to_string(), (76, 99));
    let once = apply(&roster, &q);

    let refiltered = Roster::from_players(
        once.iter().map(|&i| roster.players[i].clone()).collect(),
        roster.numeric_columns.clone(),
    );
    let twice = apply(&refiltered, &q);
    assert_eq!(twice.len(), once.len());
    assert_eq!(twice, (0..once.len()).collect::<Vec<_>>());
}

#[test]
fn categorical_selection_is_membership() {
    let roster = fixture_roster();
    let mut q = FilterQuery::default();
    q.preferred_foot.insert("Left".to_string());
    assert_eq!(apply(&roster, &q), vec![1, 6]);

    let mut q = FilterQuery::default();
    q.skill_moves.insert(4);
    q.skill_moves.insert(5);
    assert_eq!(apply(&roster, &q), vec![0, 1, 6]);
}

#[test]
fn position_filter_matches_whole_tokens_only() {
    let roster = fixture_roster();
    let mut q = FilterQuery::default();
    q.positions.insert("CM".to_string());
    // "CM, CAM" matches; "CAM" alone must not match a "CM" selection.
    assert_eq!(apply(&roster, &q), vec![6]);

    let mut q = FilterQuery::default();
    q.positions.insert("CF".to_string());
    assert_eq!(apply(&roster, &q), vec![0, 1]);
}

#[test]
fn coerced_zero_values_respect_range_bounds() {
    let roster = fixture_roster();
    let mut q = FilterQuery::default();
    q.ranges.insert("pace".to_string(), (0, 99));
    assert_eq!(apply(&roster, &q).len(), roster.len());

    q.ranges.insert("pace".to_string(), (1, 99));
    // J. Weiss's blank pace coerced to 0 and now fails the lower bound.
    assert!(!apply(&roster, &q).contains(&5));
}

#[test]
fn unknown_attribute_ranges_are_ignored() {
    let roster = fixture_roster();
    let mut q = FilterQuery::default();
    q.ranges.insert("charisma".to_string(), (90, 99));
    assert_eq!(apply(&roster, &q).len(), roster.len());
}
