//! Synthetic roster used when no CSV is configured, and by the bench.
//! Deterministic for a given seed so results are reproducible.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::roster::{NUMERIC_COLUMNS, Player, Roster, format_height};

const FIRST_NAMES: &[&str] = &[
    "A. Silva", "J. Moreno", "K. Sato", "L. Dubois", "M. Keita", "N. Petrov", "O. Jansen",
    "P. Costa", "R. Novak", "S. Haaland", "T. Mensah", "V. Rossi", "W. Kamau", "Y. Demir",
    "D. Olsen", "E. Varga", "F. Lima", "G. Eze", "H. Tanaka", "I. Baros",
];

const CLUBS: &[&str] = &[
    "Harbor City FC", "Atletico Norte", "Vale United", "Sporting Meridian", "FC Ostwald",
    "Riverton Albion", "Club Azul", "Dynamo Kesk", "Real Solano", "Northgate Rovers",
];

const LEAGUES: &[&str] = &["Division One", "Liga Central", "Primera Costa", "Eastern League"];

const NATIONS: &[&str] = &[
    "Brazil", "France", "Japan", "Ghana", "Poland", "Netherlands", "Portugal", "Turkey",
    "Argentina", "Norway",
];

// (position tokens, strong attributes boosted for that archetype)
const ARCHETYPES: &[(&str, &[&str])] = &[
    ("GK", &["diving", "handling", "kicking", "reflexes", "gkpositioning"]),
    ("CB", &["defending", "markingawareness", "standingtackle", "interceptions", "strength"]),
    ("LB, LWB", &["pace", "crossing", "stamina", "slidingtackle"]),
    ("RB, RWB", &["pace", "crossing", "stamina", "standingtackle"]),
    ("CDM, CM", &["interceptions", "shortpassing", "stamina", "aggression"]),
    ("CM, CAM", &["passing", "shortpassing", "vision", "ballcontrol", "dribbling"]),
    ("LW, LM", &["pace", "dribbling", "agility", "crossing", "curve"]),
    ("RW, RM", &["pace", "dribbling", "agility", "finishing"]),
    ("ST, CF", &["shooting", "finishing", "shotpower", "headingaccuracy", "composure"]),
    ("CF, CAM", &["finishing", "vision", "ballcontrol", "composure", "longshots"]),
];

pub fn demo_roster(count: usize, seed: u64) -> Roster {
    let mut rng = StdRng::seed_from_u64(seed);
    let players = (0..count).map(|i| demo_player(i, &mut rng)).collect();
    let numeric_columns = NUMERIC_COLUMNS.iter().map(|c| c.to_string()).collect();
    Roster::from_players(players, numeric_columns)
}

fn demo_player(i: usize, rng: &mut StdRng) -> Player {
    let (positions, strong) = ARCHETYPES[rng.gen_range(0..ARCHETYPES.len())];
    let overall: i64 = rng.gen_range(52..=92);
    let age: i64 = rng.gen_range(17..=38);
    let is_gk = positions.starts_with("GK");

    let mut stats: HashMap<String, i64> = HashMap::new();
    for col in NUMERIC_COLUMNS {
        let base = if strong.contains(col) {
            overall + rng.gen_range(-3..=5)
        } else if gk_only(col) != is_gk {
            // Outfielders get floor goalkeeping stats and vice versa.
            rng.gen_range(5..=20)
        } else {
            overall + rng.gen_range(-20..=2)
        };
        stats.insert(col.to_string(), base.clamp(1, 99));
    }
    stats.insert("overall".to_string(), overall);
    stats.insert("potential".to_string(), (overall + rng.gen_range(0..=8)).min(99));
    stats.insert("age".to_string(), age);
    stats.insert("skillmoves".to_string(), if is_gk { 1 } else { rng.gen_range(1..=5) });
    stats.insert("weakfoot".to_string(), rng.gen_range(1..=5));

    let value = overall.pow(3) * 150 + rng.gen_range(0..250_000);
    Player {
        short_name: format!("{} {}", FIRST_NAMES[i % FIRST_NAMES.len()], i / FIRST_NAMES.len() + 1),
        long_name: String::new(),
        positions: positions.to_string(),
        preferred_foot: if rng.gen_bool(0.75) { "Right" } else { "Left" }.to_string(),
        league: LEAGUES[rng.gen_range(0..LEAGUES.len())].to_string(),
        club: CLUBS[rng.gen_range(0..CLUBS.len())].to_string(),
        nationality: NATIONS[rng.gen_range(0..NATIONS.len())].to_string(),
        height: format_height(rng.gen_range(165.0..=200.0)),
        value: Some(value),
        wage: Some(value / 400),
        stats,
    }
}

fn gk_only(col: &str) -> bool {
    matches!(
        col,
        "diving" | "handling" | "kicking" | "gkpositioning" | "reflexes"
    )
}
