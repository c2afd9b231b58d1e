use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;

use crate::roster::Roster;

pub struct ExportReport {
    pub path: PathBuf,
    pub rows: usize,
}

/// Write the currently filtered view as UTF-8 CSV with a header row.
/// Value and wage go out as the thousands-grouped display strings, matching
/// what the table shows; everything else is raw.
pub fn export_filtered(path: &Path, roster: &Roster, indices: &[usize]) -> Result<ExportReport> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("create export file {}", path.display()))?;

    let mut header: Vec<&str> = vec![
        "short_name",
        "long_name",
        "positions",
        "preferred_foot",
        "league",
        "club",
        "nationality",
        "height",
        "value",
        "wage",
    ];
    header.extend(roster.numeric_columns.iter().map(String::as_str));
    writer.write_record(&header).context("write export header")?;

    for &idx in indices {
        let p = &roster.players[idx];
        let mut row = vec![
            p.short_name.clone(),
            p.long_name.clone(),
            p.positions.clone(),
            p.preferred_foot.clone(),
            p.league.clone(),
            p.club.clone(),
            p.nationality.clone(),
            p.height.clone(),
            p.value.map(group_thousands).unwrap_or_default(),
            p.wage.map(group_thousands).unwrap_or_default(),
        ];
        for col in &roster.numeric_columns {
            row.push(p.stat(col).unwrap_or(0).to_string());
        }
        writer.write_record(&row).context("write export row")?;
    }

    writer.flush().context("flush export file")?;
    Ok(ExportReport {
        path: path.to_path_buf(),
        rows: indices.len(),
    })
}

/// Timestamped default filename inside the configured export directory.
pub fn default_export_path(dir: &Path) -> PathBuf {
    let stamp = Local::now().format("%Y%m%d_%H%M%S");
    dir.join(format!("filtered_players_{stamp}.csv"))
}

/// 1234567 -> "1,234,567". Display formatting only; comparisons always use
/// the underlying integer.
pub fn group_thousands(v: i64) -> String {
    let digits = v.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if v < 0 {
        out.push('-');
    }
    let lead = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i != 0 && (i + 3 - lead) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_digits_in_threes() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(950), "950");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(103_500_000), "103,500,000");
        assert_eq!(group_thousands(-20_500), "-20,500");
    }
}
