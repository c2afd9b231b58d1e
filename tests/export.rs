use std::fs;
use std::path::PathBuf;

use fc26_scout::export::{default_export_path, export_filtered, group_thousands};
use fc26_scout::roster::{Roster, load_roster};

fn fixture_roster() -> Roster {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push("players_small.csv");
    load_roster(&path).expect("fixture roster should load")
}

fn temp_export_path(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!("fc26_scout_export_{tag}_{}.csv", std::process::id()))
}

#[test]
fn exports_filtered_view_with_display_formatting() {
    let roster = fixture_roster();
    let path = temp_export_path("view");
    let report = export_filtered(&path, &roster, &[0, 5]).expect("export should succeed");
    assert_eq!(report.rows, 2);

    let raw = fs::read_to_string(&path).expect("export file should be readable");
    let mut lines = raw.lines();
    let header = lines.next().unwrap();
    assert!(header.starts_with("short_name,long_name,positions"));
    assert!(header.contains("finishing"));

    // Value and wage go out thousands-grouped, as displayed.
    let martin = lines.next().unwrap();
    assert!(martin.contains("L. Martin"));
    assert!(martin.contains("\"56,500,000\""));
    assert!(martin.contains("\"120,000\""));
    assert!(martin.contains("5'11"));

    // Missing money fields export as empty cells, coerced stats as 0.
    let weiss = lines.next().unwrap();
    assert!(weiss.contains("J. Weiss"));
    assert!(!weiss.contains("None"));

    assert!(lines.next().is_none());
    let _ = fs::remove_file(&path);
}

#[test]
fn empty_selection_exports_header_only() {
    let roster = fixture_roster();
    let path = temp_export_path("empty");
    let report = export_filtered(&path, &roster, &[]).expect("export should succeed");
    assert_eq!(report.rows, 0);

    let raw = fs::read_to_string(&path).expect("export file should be readable");
    assert_eq!(raw.lines().count(), 1);
    let _ = fs::remove_file(&path);
}

#[test]
fn default_path_is_timestamped_csv() {
    let path = default_export_path(&PathBuf::from("/tmp"));
    let name = path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("filtered_players_"));
    assert!(name.ends_with(".csv"));
}

#[test]
fn grouping_matches_display_rules() {
    assert_eq!(group_thousands(1_500), "1,500");
    assert_eq!(group_thousands(999), "999");
}
