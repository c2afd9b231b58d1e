use std::path::PathBuf;

use fc26_scout::roster::{Roster, load_roster};
use fc26_scout::similar::{SimilarQuery, find_similar};

fn fixture_roster() -> Roster {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push("players_small.csv");
    load_roster(&path).expect("fixture roster should load")
}

fn query(reference: &str) -> SimilarQuery {
    SimilarQuery {
        reference: reference.to_string(),
        top_n: 3,
        leeway: 5,
        age_min: 23,
        age_max: 31,
    }
}

#[test]
fn compares_on_the_references_strongest_attributes() {
    let roster = fixture_roster();
    let out = find_similar(&roster, &query("L. Martin"));
    // L. Martin's top three stats: finishing 90, shot power 85, long shots 80.
    assert_eq!(out.compared, vec!["finishing", "shotpower", "longshots"]);
}

#[test]
fn scores_sum_absolute_differences_within_leeway() {
    let roster = fixture_roster();
    let out = find_similar(&roster, &query("L. Martin"));
    // D. Okafor: |90-94| + |85-83| + |80-82| = 8.
    let okafor = out.matches.iter().find(|m| m.index == 1).unwrap();
    assert_eq!(okafor.score, 8);
}

#[test]
fn one_attribute_past_leeway_disqualifies() {
    let roster = fixture_roster();
    let out = find_similar(&roster, &query("L. Martin"));
    // S. Byrne is 6 off on finishing; identical on the other two.
    assert!(!out.matches.iter().any(|m| m.index == 2));
}

#[test]
fn diff_equal_to_leeway_passes() {
    let roster = fixture_roster();
    let mut q = query("L. Martin");
    q.leeway = 6;
    let out = find_similar(&roster, &q);
    assert!(out.matches.iter().any(|m| m.index == 2));
}

#[test]
fn reference_is_never_its_own_match() {
    let roster = fixture_roster();
    let out = find_similar(&roster, &query("L. Martin"));
    assert_eq!(out.reference, Some(0));
    assert!(out.matches.iter().all(|m| m.index != 0));
}

#[test]
fn candidates_must_share_a_position_token() {
    let roster = fixture_roster();
    let out = find_similar(&roster, &query("L. Martin"));
    // M. Haddad matches every compared stat exactly but plays CB only.
    assert!(!out.matches.iter().any(|m| m.index == 3));
}

#[test]
fn age_window_is_inclusive_and_binding() {
    let roster = fixture_roster();
    let out = find_similar(&roster, &query("L. Martin"));
    // T. Costa (36) scores 3 but sits outside [23, 31].
    assert!(!out.matches.iter().any(|m| m.index == 4));

    let mut q = query("L. Martin");
    q.age_max = 36;
    let out = find_similar(&roster, &q);
    assert!(out.matches.iter().any(|m| m.index == 4));
}

#[test]
fn equal_scores_keep_dataset_order() {
    let roster = fixture_roster();
    let out = find_similar(&roster, &query("L. Martin"));
    // Both Okafors score 8; the earlier row must come first.
    let indices: Vec<usize> = out.matches.iter().map(|m| m.index).collect();
    assert_eq!(indices, vec![1, 7]);
}

#[test]
fn results_sort_ascending_by_score() {
    let roster = fixture_roster();
    let mut q = query("L. Martin");
    q.age_max = 36;
    let out = find_similar(&roster, &q);
    let scores: Vec<i64> = out.matches.iter().map(|m| m.score).collect();
    let mut sorted = scores.clone();
    sorted.sort();
    assert_eq!(scores, sorted);
    // T. Costa's 3 beats both 8s.
    assert_eq!(out.matches[0].index, 4);
}

#[test]
fn duplicate_reference_name_uses_first_row() {
    let roster = fixture_roster();
    let out = find_similar(&roster, &query("D. Okafor"));
    assert_eq!(out.reference, Some(1));
}

#[test]
fn unknown_reference_returns_empty() {
    let roster = fixture_roster();
    let out = find_similar(&roster, &query("Nobody"));
    assert!(out.reference.is_none());
    assert!(out.matches.is_empty());
}
