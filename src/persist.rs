use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::filter::FilterQuery;

const CACHE_DIR: &str = "fc26_scout";
const SESSION_FILE: &str = "session.json";
const SESSION_VERSION: u32 = 1;

/// Last-used filter selections, restored on the next start. UI session
/// state only; the roster itself is never written back.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct SessionFile {
    version: u32,
    query: FilterQuery,
}

pub fn load_session() -> Option<FilterQuery> {
    let path = session_path()?;
    let raw = fs::read_to_string(path).ok()?;
    let session = serde_json::from_str::<SessionFile>(&raw).ok()?;
    if session.version != SESSION_VERSION {
        return None;
    }
    Some(session.query)
}

pub fn save_session(query: &FilterQuery) -> Result<()> {
    let Some(path) = session_path() else {
        return Ok(());
    };
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let session = SessionFile {
        version: SESSION_VERSION,
        query: query.clone(),
    };
    let tmp = path.with_extension("json.tmp");
    let json = serde_json::to_string(&session).context("serialize session")?;
    fs::write(&tmp, json).context("write session")?;
    fs::rename(&tmp, &path).context("swap session")?;
    Ok(())
}

fn session_path() -> Option<PathBuf> {
    if let Ok(base) = std::env::var("XDG_CACHE_HOME") {
        if !base.trim().is_empty() {
            return Some(PathBuf::from(base).join(CACHE_DIR).join(SESSION_FILE));
        }
    }
    let home = std::env::var("HOME").ok()?;
    if home.trim().is_empty() {
        return None;
    }
    Some(
        PathBuf::from(home)
            .join(".cache")
            .join(CACHE_DIR)
            .join(SESSION_FILE),
    )
}
