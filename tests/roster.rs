use std::path::PathBuf;

use fc26_scout::roster::{Roster, load_roster};

fn fixture_roster() -> Roster {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push("players_small.csv");
    load_roster(&path).expect("fixture roster should load")
}

#[test]
fn loads_all_rows_with_folded_headers() {
    let roster = fixture_roster();
    assert_eq!(roster.len(), 8);
    assert_eq!(roster.skipped_rows, 0);
    // "Short Name" / "Shot Power" fold to stable keys.
    assert_eq!(roster.players[0].short_name, "L. Martin");
    assert_eq!(roster.players[0].stat("shotpower"), Some(85));
}

#[test]
fn numeric_columns_keep_file_order() {
    let roster = fixture_roster();
    assert_eq!(
        roster.numeric_columns,
        vec![
            "skillmoves",
            "weakfoot",
            "age",
            "overall",
            "pace",
            "shooting",
            "passing",
            "dribbling",
            "defending",
            "physic",
            "finishing",
            "shotpower",
            "longshots",
        ]
    );
}

#[test]
fn stat_columns_exclude_identity_and_ordinals() {
    let roster = fixture_roster();
    assert!(!roster.stat_columns.iter().any(|c| c == "age"));
    assert!(!roster.stat_columns.iter().any(|c| c == "skillmoves"));
    assert!(!roster.stat_columns.iter().any(|c| c == "weakfoot"));
    assert!(roster.stat_columns.iter().any(|c| c == "finishing"));
}

#[test]
fn unparseable_numerics_coerce_to_zero() {
    let roster = fixture_roster();
    let weiss = &roster.players[5];
    assert_eq!(weiss.stat("pace"), Some(0));
    assert_eq!(weiss.stat("shooting"), Some(0));
    assert_eq!(weiss.stat("overall"), Some(70));
}

#[test]
fn height_converts_to_feet_inches_display() {
    let roster = fixture_roster();
    assert_eq!(roster.players[0].height, "5'11");
    assert_eq!(roster.players[1].height, "6'0");
    // Missing height renders empty, never errors.
    assert_eq!(roster.players[5].height, "");
}

#[test]
fn missing_money_fields_stay_none() {
    let roster = fixture_roster();
    assert_eq!(roster.players[0].value, Some(56_500_000));
    assert_eq!(roster.players[5].value, None);
    assert_eq!(roster.players[5].wage, None);
}

#[test]
fn duplicate_short_name_resolves_to_first() {
    let roster = fixture_roster();
    assert_eq!(roster.find_player("D. Okafor"), Some(1));
    assert_eq!(roster.find_player("Nobody"), None);
}

#[test]
fn live_bounds_and_domains_come_from_data() {
    let roster = fixture_roster();
    let bounds = roster.attribute_bounds();
    let age = bounds.iter().find(|b| b.name == "age").unwrap();
    assert_eq!((age.min, age.max), (24, 36));
    let pace = bounds.iter().find(|b| b.name == "pace").unwrap();
    assert_eq!((pace.min, pace.max), (0, 82));

    assert_eq!(roster.ordinal_domain("skillmoves"), vec![1, 2, 3, 4, 5]);
    assert_eq!(roster.foot_domain(), vec!["Left", "Right"]);
    assert_eq!(
        roster.position_vocabulary(),
        vec!["CAM", "CB", "CF", "CM", "GK", "LW", "ST"]
    );
}
