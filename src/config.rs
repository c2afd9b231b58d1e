use std::env;
use std::path::PathBuf;

/// Runtime settings, resolved from `.env` / `.env.local` / the environment.
/// Everything has a usable default so the tool starts with no setup at all
/// (it falls back to the generated demo roster).
#[derive(Debug, Clone)]
pub struct ScoutConfig {
    /// Roster CSV to load; `None` means use the demo roster.
    pub roster_path: Option<PathBuf>,
    /// How many of the reference player's strongest attributes a similarity
    /// query compares on.
    pub top_n: usize,
    /// Maximum per-attribute difference for a similarity candidate.
    pub leeway: i64,
    /// Similarity age window: reference age +- this many years.
    pub age_span: i64,
    pub export_dir: PathBuf,
}

impl Default for ScoutConfig {
    fn default() -> Self {
        Self {
            roster_path: None,
            top_n: 4,
            leeway: 5,
            age_span: 4,
            export_dir: PathBuf::from("."),
        }
    }
}

impl ScoutConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let roster_path = env::var("ROSTER_CSV")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);
        let top_n = env::var("SIMILAR_TOP_N")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(defaults.top_n)
            .clamp(1, 10);
        let leeway = env::var("SIMILAR_LEEWAY")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(defaults.leeway)
            .clamp(0, 99);
        let age_span = env::var("SIMILAR_AGE_SPAN")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(defaults.age_span)
            .clamp(0, 50);
        let export_dir = env::var("EXPORT_DIR")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.export_dir);
        Self {
            roster_path,
            top_n,
            leeway,
            age_span,
            export_dir,
        }
    }
}
