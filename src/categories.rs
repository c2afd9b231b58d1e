//! Display-only grouping of numeric attributes into sidebar sections.
//! Grouping has no effect on filter or similarity semantics.

pub const CATEGORIES: &[(&str, &[&str])] = &[
    ("Pace", &["pace", "acceleration", "sprintspeed", "speed"]),
    (
        "Shooting",
        &[
            "shooting",
            "finishing",
            "longshots",
            "volleys",
            "shotpower",
            "curve",
            "freekick",
            "headingaccuracy",
        ],
    ),
    (
        "Passing",
        &["passing", "shortpassing", "longpassing", "vision", "crossing"],
    ),
    (
        "Dribbling / Skill",
        &["dribbling", "ballcontrol", "agility", "balance", "reactions", "skillmoves"],
    ),
    (
        "Defending",
        &[
            "defending",
            "markingawareness",
            "standingtackle",
            "slidingtackle",
            "interceptions",
            "defenderpositioning",
            "aggression",
        ],
    ),
    (
        "Goalkeeping",
        &["diving", "handling", "kicking", "reflexes", "gkpositioning"],
    ),
    (
        "Physical / Power",
        &["physic", "stamina", "strength", "jumping"],
    ),
    ("Composure / Mentality", &["composure", "penalties"]),
];

/// Section an attribute is displayed under, if any. Ungrouped attributes
/// (overall, potential, age) are rendered outside the sections.
pub fn category_for(attribute: &str) -> Option<&'static str> {
    CATEGORIES
        .iter()
        .find(|(_, attrs)| attrs.contains(&attribute))
        .map(|(name, _)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_attributes_resolve_to_their_section() {
        assert_eq!(category_for("sprintspeed"), Some("Pace"));
        assert_eq!(category_for("penalties"), Some("Composure / Mentality"));
        assert_eq!(category_for("overall"), None);
    }
}
