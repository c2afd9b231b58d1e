use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result};
use csv::StringRecord;
use once_cell::sync::Lazy;

/// Numeric attribute columns we coerce on load. Anything listed here that is
/// missing from the input file simply yields no column (filters over it are
/// skipped); anything present but unparseable coerces to 0.
pub const NUMERIC_COLUMNS: &[&str] = &[
    "overall",
    "potential",
    "age",
    "skillmoves",
    "weakfoot",
    "pace",
    "shooting",
    "passing",
    "dribbling",
    "defending",
    "physic",
    "crossing",
    "finishing",
    "headingaccuracy",
    "shortpassing",
    "volleys",
    "curve",
    "freekick",
    "longpassing",
    "ballcontrol",
    "acceleration",
    "sprintspeed",
    "agility",
    "reactions",
    "balance",
    "shotpower",
    "jumping",
    "stamina",
    "strength",
    "longshots",
    "aggression",
    "interceptions",
    "defenderpositioning",
    "vision",
    "penalties",
    "composure",
    "markingawareness",
    "standingtackle",
    "slidingtackle",
    "diving",
    "handling",
    "kicking",
    "gkpositioning",
    "reflexes",
    "speed",
];

// Columns that never take part in similarity scoring: identity, categorical,
// financial and display-derived fields.
static STAT_EXCLUDES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "shortname",
        "longname",
        "positions",
        "value",
        "wage",
        "age",
        "dob",
        "league",
        "club",
        "nationality",
        "preferredfoot",
        "weakfoot",
        "skillmoves",
        "releaseclause",
        "playertraits",
        "height",
        "heightcm",
        "heightfeet",
        "feet",
    ]
    .into_iter()
    .collect()
});

#[derive(Debug, Clone, Default)]
pub struct Player {
    pub short_name: String,
    pub long_name: String,
    /// Raw comma-joined position list, as displayed ("ST, CF").
    pub positions: String,
    pub preferred_foot: String,
    pub league: String,
    pub club: String,
    pub nationality: String,
    /// Display-only feet'inches string, empty when the source height is
    /// missing or unparseable. Never used in numeric comparisons.
    pub height: String,
    pub value: Option<i64>,
    pub wage: Option<i64>,
    /// Every declared numeric column present in the file, coerced to an
    /// integer (0 on parse failure), keyed by canonical column name.
    pub stats: HashMap<String, i64>,
}

impl Player {
    pub fn stat(&self, name: &str) -> Option<i64> {
        self.stats.get(name).copied()
    }

    pub fn age(&self) -> i64 {
        self.stat("age").unwrap_or(0)
    }

    pub fn skill_moves(&self) -> i64 {
        self.stat("skillmoves").unwrap_or(0)
    }

    pub fn weak_foot(&self) -> i64 {
        self.stat("weakfoot").unwrap_or(0)
    }

    /// Trimmed position tokens ("ST, CF" -> "ST", "CF"). Matching is always
    /// exact on whole tokens, never substring containment.
    pub fn position_tokens(&self) -> impl Iterator<Item = &str> {
        self.positions
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Clone)]
pub struct AttributeBounds {
    pub name: String,
    pub min: i64,
    pub max: i64,
}

#[derive(Debug, Clone, Default)]
pub struct Roster {
    pub players: Vec<Player>,
    /// Declared numeric columns actually present in the file, in file order.
    pub numeric_columns: Vec<String>,
    /// `numeric_columns` minus identity/categorical/financial excludes; the
    /// dimensions the similarity engine picks from.
    pub stat_columns: Vec<String>,
    pub skipped_rows: usize,
}

impl Roster {
    pub fn from_players(players: Vec<Player>, numeric_columns: Vec<String>) -> Self {
        let stat_columns = numeric_columns
            .iter()
            .filter(|c| !STAT_EXCLUDES.contains(c.as_str()))
            .cloned()
            .collect();
        Self {
            players,
            numeric_columns,
            stat_columns,
            skipped_rows: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// First player whose short name matches exactly, in dataset order.
    pub fn find_player(&self, short_name: &str) -> Option<usize> {
        self.players.iter().position(|p| p.short_name == short_name)
    }

    /// Live [min, max] per numeric column, derived from the loaded data.
    /// The presentation layer seeds its range controls from these.
    pub fn attribute_bounds(&self) -> Vec<AttributeBounds> {
        self.numeric_columns
            .iter()
            .filter_map(|name| {
                let mut lo = i64::MAX;
                let mut hi = i64::MIN;
                for p in &self.players {
                    let v = p.stat(name)?;
                    lo = lo.min(v);
                    hi = hi.max(v);
                }
                if self.players.is_empty() {
                    return None;
                }
                Some(AttributeBounds {
                    name: name.clone(),
                    min: lo,
                    max: hi,
                })
            })
            .collect()
    }

    /// Sorted distinct values of an ordinal column (skill moves, weak foot).
    pub fn ordinal_domain(&self, name: &str) -> Vec<i64> {
        let values: BTreeSet<i64> = self.players.iter().filter_map(|p| p.stat(name)).collect();
        values.into_iter().collect()
    }

    /// Sorted distinct preferred-foot values as they appear in the data.
    pub fn foot_domain(&self) -> Vec<String> {
        let values: BTreeSet<&str> = self
            .players
            .iter()
            .map(|p| p.preferred_foot.trim())
            .filter(|v| !v.is_empty())
            .collect();
        values.into_iter().map(str::to_string).collect()
    }

    /// Sorted distinct trimmed position tokens across the whole roster.
    pub fn position_vocabulary(&self) -> Vec<String> {
        let tokens: BTreeSet<&str> = self
            .players
            .iter()
            .flat_map(|p| p.position_tokens())
            .collect();
        tokens.into_iter().map(str::to_string).collect()
    }
}

/// Load and normalize a delimited roster file.
///
/// Header names are matched case- and spacing-insensitively. Rows that the
/// reader cannot decode are skipped, not fatal.
pub fn load_roster(path: &Path) -> Result<Roster> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("open roster csv {}", path.display()))?;

    let normalized: Vec<String> = reader
        .headers()
        .context("read roster header row")?
        .iter()
        .map(normalize_header)
        .collect();
    let numeric_columns: Vec<String> = {
        let mut seen = HashSet::new();
        normalized
            .iter()
            .filter(|h| NUMERIC_COLUMNS.contains(&h.as_str()) && seen.insert(h.as_str()))
            .cloned()
            .collect()
    };
    reader.set_headers(StringRecord::from(normalized));

    let mut players = Vec::new();
    let mut skipped = 0usize;
    for row in reader.deserialize::<HashMap<String, String>>() {
        let Ok(fields) = row else {
            skipped += 1;
            continue;
        };
        players.push(player_from_fields(&fields, &numeric_columns));
    }

    let mut roster = Roster::from_players(players, numeric_columns);
    roster.skipped_rows = skipped;
    Ok(roster)
}

fn player_from_fields(fields: &HashMap<String, String>, numeric_columns: &[String]) -> Player {
    let mut stats = HashMap::with_capacity(numeric_columns.len());
    for col in numeric_columns {
        let raw = fields.get(col).map(String::as_str).unwrap_or("");
        stats.insert(col.clone(), coerce_int(raw));
    }

    Player {
        short_name: text_field(fields, &["shortname", "name"]),
        long_name: text_field(fields, &["longname", "fullname"]),
        positions: text_field(fields, &["positions", "playerpositions"]),
        preferred_foot: text_field(fields, &["preferredfoot"]),
        league: text_field(fields, &["league", "leaguename"]),
        club: text_field(fields, &["club", "clubname"]),
        nationality: text_field(fields, &["nationality", "nationalityname"]),
        height: opt_number_field(fields, &["heightcm", "height"])
            .map(format_height)
            .unwrap_or_default(),
        value: opt_number_field(fields, &["value", "valueeur"]).map(|v| v as i64),
        wage: opt_number_field(fields, &["wage", "wageeur"]).map(|v| v as i64),
        stats,
    }
}

fn text_field(fields: &HashMap<String, String>, aliases: &[&str]) -> String {
    for alias in aliases {
        if let Some(v) = fields.get(*alias) {
            let v = v.trim();
            if !v.is_empty() {
                return v.to_string();
            }
        }
    }
    String::new()
}

fn opt_number_field(fields: &HashMap<String, String>, aliases: &[&str]) -> Option<f64> {
    aliases
        .iter()
        .filter_map(|alias| fields.get(*alias))
        .find_map(|raw| parse_number(raw))
}

/// Stable lookup key for a header: case-folded, whitespace and underscores
/// removed ("Skill Moves" / "skill_moves" -> "skillmoves").
pub fn normalize_header(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_')
        .collect()
}

/// Coerce-or-zero numeric policy: downstream code never branches on null
/// for declared numeric columns.
pub fn coerce_int(raw: &str) -> i64 {
    parse_number(raw).map(|v| v as i64).unwrap_or(0)
}

fn parse_number(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() || s == "-" {
        return None;
    }
    // Strip currency symbols and grouping before parsing.
    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-' || *c == ',')
        .collect();
    let cleaned = cleaned.replace(',', "");
    if cleaned.is_empty() || cleaned == "-" {
        return None;
    }
    cleaned.parse::<f64>().ok()
}

/// Centimeters to a feet'inches display string. 180 -> "5'11". An inches
/// value that rounds to 12 carries into the next foot.
pub fn format_height(cm: f64) -> String {
    if !cm.is_finite() || cm <= 0.0 {
        return String::new();
    }
    let total_inches = cm / 2.54;
    let mut feet = (total_inches / 12.0).floor() as i64;
    let mut inches = (total_inches % 12.0).round() as i64;
    if inches == 12 {
        feet += 1;
        inches = 0;
    }
    format!("{feet}'{inches}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_normalization_folds_case_and_spacing() {
        assert_eq!(normalize_header("  Skill Moves "), "skillmoves");
        assert_eq!(normalize_header("preferred_foot"), "preferredfoot");
        assert_eq!(normalize_header("PACE"), "pace");
    }

    #[test]
    fn coerce_int_handles_garbage() {
        assert_eq!(coerce_int("78"), 78);
        assert_eq!(coerce_int("78.6"), 78);
        assert_eq!(coerce_int(""), 0);
        assert_eq!(coerce_int("n/a"), 0);
        assert_eq!(coerce_int("1,250"), 1250);
    }

    #[test]
    fn height_conversion_matches_known_values() {
        assert_eq!(format_height(180.0), "5'11");
        assert_eq!(format_height(165.0), "5'5");
        // 182.5cm is 71.85in; the remainder rounds up to a full foot.
        assert_eq!(format_height(183.0), "6'0");
        assert_eq!(format_height(f64::NAN), "");
        assert_eq!(format_height(0.0), "");
    }

    #[test]
    fn position_tokens_trim_and_skip_empty() {
        let p = Player {
            positions: " ST , CF,".to_string(),
            ..Player::default()
        };
        let tokens: Vec<&str> = p.position_tokens().collect();
        assert_eq!(tokens, vec!["ST", "CF"]);
    }

    #[test]
    fn stat_columns_drop_excluded_fields() {
        let cols = vec![
            "overall".to_string(),
            "age".to_string(),
            "skillmoves".to_string(),
            "pace".to_string(),
            "weakfoot".to_string(),
        ];
        let roster = Roster::from_players(Vec::new(), cols);
        assert_eq!(roster.stat_columns, vec!["overall", "pace"]);
    }
}
