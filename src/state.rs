use std::collections::{HashMap, VecDeque};

use crate::categories::{CATEGORIES, category_for};
use crate::config::ScoutConfig;
use crate::filter::{self, FilterQuery};
use crate::roster::Roster;
use crate::similar::{self, SimilarQuery, SimilarResult};

const MAX_LOG_LINES: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Finder,
    Similar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Filters,
    Results,
}

/// One selectable line in the filter sidebar. Section headers are rendered
/// but skipped by the cursor.
#[derive(Debug, Clone)]
pub enum FilterRow {
    Section(&'static str),
    /// Numeric range control; dataset-derived hard bounds.
    Range { name: String, min: i64, max: i64 },
    /// Ordinal multi-toggle (skill moves, weak foot), digits toggle values.
    Ordinal {
        label: &'static str,
        name: &'static str,
        domain: Vec<i64>,
    },
    /// Preferred-foot multi-toggle, digits toggle values.
    Foot { domain: Vec<String> },
    /// One toggleable position token.
    Position { token: String },
}

impl FilterRow {
    pub fn selectable(&self) -> bool {
        !matches!(self, FilterRow::Section(_))
    }
}

pub struct AppState {
    pub roster: Roster,
    pub config: ScoutConfig,
    pub query: FilterQuery,
    /// Indices into `roster.players`, original order, recomputed on every
    /// query change.
    pub filtered: Vec<usize>,
    pub screen: Screen,
    pub focus: Focus,
    pub filter_rows: Vec<FilterRow>,
    pub filter_selected: usize,
    pub result_selected: usize,
    pub similar: SimilarResult,
    pub similar_selected: usize,
    pub help_overlay: bool,
    pub log: VecDeque<String>,
}

impl AppState {
    pub fn new(roster: Roster, config: ScoutConfig, saved_query: Option<FilterQuery>) -> Self {
        let filter_rows = build_filter_rows(&roster);
        let mut state = Self {
            roster,
            config,
            query: saved_query.unwrap_or_default(),
            filtered: Vec::new(),
            screen: Screen::Finder,
            focus: Focus::Filters,
            filter_rows,
            filter_selected: 0,
            result_selected: 0,
            similar: SimilarResult::default(),
            similar_selected: 0,
            help_overlay: false,
            log: VecDeque::new(),
        };
        if !state.filter_rows.is_empty() && !state.filter_rows[0].selectable() {
            state.filter_selected = state
                .filter_rows
                .iter()
                .position(FilterRow::selectable)
                .unwrap_or(0);
        }
        state.refresh();
        state
    }

    pub fn push_log(&mut self, line: impl Into<String>) {
        self.log.push_back(line.into());
        while self.log.len() > MAX_LOG_LINES {
            self.log.pop_front();
        }
    }

    /// Recompute the filtered view from the current query.
    pub fn refresh(&mut self) {
        self.filtered = filter::apply(&self.roster, &self.query);
        if self.result_selected >= self.filtered.len() {
            self.result_selected = self.filtered.len().saturating_sub(1);
        }
    }

    pub fn select_next(&mut self) {
        match (self.screen, self.focus) {
            (Screen::Similar, _) => {
                bump(&mut self.similar_selected, self.similar.matches.len(), 1)
            }
            (Screen::Finder, Focus::Filters) => self.move_filter_cursor(1),
            (Screen::Finder, Focus::Results) => {
                bump(&mut self.result_selected, self.filtered.len(), 1)
            }
        }
    }

    pub fn select_prev(&mut self) {
        match (self.screen, self.focus) {
            (Screen::Similar, _) => {
                bump(&mut self.similar_selected, self.similar.matches.len(), -1)
            }
            (Screen::Finder, Focus::Filters) => self.move_filter_cursor(-1),
            (Screen::Finder, Focus::Results) => {
                bump(&mut self.result_selected, self.filtered.len(), -1)
            }
        }
    }

    fn move_filter_cursor(&mut self, step: i64) {
        let mut i = self.filter_selected as i64;
        loop {
            i += step;
            if i < 0 || i >= self.filter_rows.len() as i64 {
                return;
            }
            if self.filter_rows[i as usize].selectable() {
                self.filter_selected = i as usize;
                return;
            }
        }
    }

    pub fn selected_filter_row(&self) -> Option<&FilterRow> {
        self.filter_rows.get(self.filter_selected)
    }

    /// Current [lo, hi] selection for a range row (full bounds when no
    /// constraint is active).
    pub fn range_selection(&self, name: &str, min: i64, max: i64) -> (i64, i64) {
        self.query.ranges.get(name).copied().unwrap_or((min, max))
    }

    /// Nudge the lower (or upper) bound of the selected range row. Dropping
    /// back to the full dataset bounds removes the constraint entirely.
    pub fn adjust_range(&mut self, upper: bool, delta: i64) {
        let Some(FilterRow::Range { name, min, max }) = self.selected_filter_row().cloned() else {
            return;
        };
        let (mut lo, mut hi) = self.range_selection(&name, min, max);
        if upper {
            hi = (hi + delta).clamp(lo, max);
        } else {
            lo = (lo + delta).clamp(min, hi);
        }
        if lo == min && hi == max {
            self.query.ranges.remove(&name);
        } else {
            self.query.ranges.insert(name, (lo, hi));
        }
        self.refresh();
    }

    /// Digit key on an ordinal/foot row toggles that domain value; space on
    /// a position row toggles the token.
    pub fn toggle_digit(&mut self, digit: usize) {
        let Some(row) = self.selected_filter_row().cloned() else {
            return;
        };
        match row {
            FilterRow::Ordinal { name, domain, .. } => {
                let Some(value) = domain.iter().find(|v| **v == digit as i64) else {
                    return;
                };
                let set = match name {
                    "skillmoves" => &mut self.query.skill_moves,
                    _ => &mut self.query.weak_foot,
                };
                if !set.remove(value) {
                    set.insert(*value);
                }
                self.refresh();
            }
            FilterRow::Foot { domain } => {
                let Some(value) = domain.get(digit.wrapping_sub(1)) else {
                    return;
                };
                if !self.query.preferred_foot.remove(value) {
                    self.query.preferred_foot.insert(value.clone());
                }
                self.refresh();
            }
            _ => {}
        }
    }

    pub fn toggle_selected_position(&mut self) {
        let Some(FilterRow::Position { token }) = self.selected_filter_row().cloned() else {
            return;
        };
        if !self.query.positions.remove(&token) {
            self.query.positions.insert(token);
        }
        self.refresh();
    }

    /// Clear the constraint behind the selected row.
    pub fn reset_selected_filter(&mut self) {
        let Some(row) = self.selected_filter_row().cloned() else {
            return;
        };
        match row {
            FilterRow::Range { name, .. } => {
                self.query.ranges.remove(&name);
            }
            FilterRow::Ordinal { name, .. } => match name {
                "skillmoves" => self.query.skill_moves.clear(),
                _ => self.query.weak_foot.clear(),
            },
            FilterRow::Foot { .. } => self.query.preferred_foot.clear(),
            FilterRow::Position { .. } => self.query.positions.clear(),
            FilterRow::Section(_) => {}
        }
        self.refresh();
    }

    pub fn reset_all_filters(&mut self) {
        self.query = FilterQuery::default();
        self.refresh();
    }

    pub fn selected_result_player(&self) -> Option<usize> {
        self.filtered.get(self.result_selected).copied()
    }

    /// Run a similarity query for the highlighted result row and switch to
    /// the Similar screen.
    pub fn open_similar(&mut self) {
        let Some(idx) = self.selected_result_player() else {
            self.push_log("[INFO] No player selected for similarity");
            return;
        };
        self.open_similar_for(idx);
    }

    /// Re-run similarity with an arbitrary roster index as the reference
    /// (used to chain lookups from the Similar screen).
    pub fn open_similar_for(&mut self, idx: usize) {
        let reference = &self.roster.players[idx];
        let age = reference.age();
        let query = SimilarQuery {
            reference: reference.short_name.clone(),
            top_n: self.config.top_n,
            leeway: self.config.leeway,
            age_min: age - self.config.age_span,
            age_max: age + self.config.age_span,
        };
        self.similar = similar::find_similar(&self.roster, &query);
        self.similar_selected = 0;
        self.screen = Screen::Similar;
        self.push_log(format!(
            "[INFO] {} similar to {} on {}",
            self.similar.matches.len(),
            query.reference,
            self.similar.compared.join(", ")
        ));
    }
}

fn bump(selected: &mut usize, len: usize, step: i64) {
    if len == 0 {
        *selected = 0;
        return;
    }
    let next = (*selected as i64 + step).clamp(0, len as i64 - 1);
    *selected = next as usize;
}

/// Sidebar layout: ungrouped attributes first (overall, potential, age),
/// then the display sections, then the categorical and position toggles.
fn build_filter_rows(roster: &Roster) -> Vec<FilterRow> {
    let bound_list = roster.attribute_bounds();
    let bounds: HashMap<&str, (i64, i64)> = bound_list
        .iter()
        .map(|b| (b.name.as_str(), (b.min, b.max)))
        .collect();
    let mut rows = Vec::new();

    let range_row = |name: &str| -> Option<FilterRow> {
        let (min, max) = *bounds.get(name)?;
        Some(FilterRow::Range {
            name: name.to_string(),
            min,
            max,
        })
    };

    for name in &roster.numeric_columns {
        // skillmoves/weakfoot get dedicated toggle rows below.
        if matches!(name.as_str(), "skillmoves" | "weakfoot") {
            continue;
        }
        if category_for(name).is_none() {
            if let Some(row) = range_row(name) {
                rows.push(row);
            }
        }
    }

    for (section, attrs) in CATEGORIES {
        let present: Vec<FilterRow> = attrs
            .iter()
            .filter(|a| **a != "skillmoves")
            .filter_map(|a| range_row(a))
            .collect();
        if present.is_empty() {
            continue;
        }
        rows.push(FilterRow::Section(section));
        rows.extend(present);
    }

    let skill_domain = roster.ordinal_domain("skillmoves");
    let weak_domain = roster.ordinal_domain("weakfoot");
    let foot_domain = roster.foot_domain();
    if !skill_domain.is_empty() || !weak_domain.is_empty() || !foot_domain.is_empty() {
        rows.push(FilterRow::Section("Player"));
        if !skill_domain.is_empty() {
            rows.push(FilterRow::Ordinal {
                label: "Skill Moves",
                name: "skillmoves",
                domain: skill_domain,
            });
        }
        if !weak_domain.is_empty() {
            rows.push(FilterRow::Ordinal {
                label: "Weak Foot",
                name: "weakfoot",
                domain: weak_domain,
            });
        }
        if !foot_domain.is_empty() {
            rows.push(FilterRow::Foot {
                domain: foot_domain,
            });
        }
    }

    let vocab = roster.position_vocabulary();
    if !vocab.is_empty() {
        rows.push(FilterRow::Section("Positions"));
        rows.extend(
            vocab
                .into_iter()
                .map(|token| FilterRow::Position { token }),
        );
    }

    rows
}
