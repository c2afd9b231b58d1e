use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use fc26_scout::config::ScoutConfig;
use fc26_scout::demo_roster::demo_roster;
use fc26_scout::export;
use fc26_scout::persist;
use fc26_scout::roster::{self, Player};
use fc26_scout::state::{AppState, FilterRow, Focus, Screen};

const DEMO_ROSTER_SIZE: usize = 400;
const DEMO_ROSTER_SEED: u64 = 26;

struct App {
    state: AppState,
    source: String,
    should_quit: bool,
}

impl App {
    fn new(config: ScoutConfig) -> Self {
        let mut startup_log: Vec<String> = Vec::new();
        let (roster, source) = match &config.roster_path {
            Some(path) => match roster::load_roster(path) {
                Ok(r) => {
                    if r.skipped_rows > 0 {
                        startup_log.push(format!(
                            "[WARN] Skipped {} unreadable rows in {}",
                            r.skipped_rows,
                            path.display()
                        ));
                    }
                    (r, path.display().to_string())
                }
                Err(err) => {
                    startup_log.push(format!("[WARN] Roster load failed: {err:#}"));
                    startup_log.push("[INFO] Falling back to demo roster".to_string());
                    (demo_roster(DEMO_ROSTER_SIZE, DEMO_ROSTER_SEED), "demo".to_string())
                }
            },
            None => (
                demo_roster(DEMO_ROSTER_SIZE, DEMO_ROSTER_SEED),
                "demo".to_string(),
            ),
        };

        let saved = persist::load_session();
        let restored = saved.is_some();
        let mut state = AppState::new(roster, config, saved);
        state.push_log(format!(
            "[INFO] Loaded {} players from {source}",
            state.roster.len()
        ));
        if restored {
            state.push_log("[INFO] Restored previous filter session".to_string());
        }
        for line in startup_log {
            state.push_log(line);
        }

        Self {
            state,
            source,
            should_quit: false,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        if self.state.help_overlay {
            match key.code {
                KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q') => {
                    self.state.help_overlay = false;
                }
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.state.help_overlay = true,
            KeyCode::Char('j') | KeyCode::Down => self.state.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_prev(),
            _ => match self.state.screen {
                Screen::Finder => self.on_finder_key(key),
                Screen::Similar => self.on_similar_key(key),
            },
        }
    }

    fn on_finder_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab => {
                self.state.focus = match self.state.focus {
                    Focus::Filters => Focus::Results,
                    Focus::Results => Focus::Filters,
                };
            }
            KeyCode::Char('h') | KeyCode::Left => self.adjust(false, -1),
            KeyCode::Char('l') | KeyCode::Right => self.adjust(false, 1),
            KeyCode::Char('H') => self.adjust(true, -1),
            KeyCode::Char('L') => self.adjust(true, 1),
            KeyCode::Char(' ') => {
                if self.state.focus == Focus::Filters {
                    self.state.toggle_selected_position();
                }
            }
            KeyCode::Char('r') => {
                if self.state.focus == Focus::Filters {
                    self.state.reset_selected_filter();
                }
            }
            KeyCode::Char('R') => {
                self.state.reset_all_filters();
                self.state.push_log("[INFO] Cleared all filters");
            }
            KeyCode::Enter => match self.state.focus {
                Focus::Results => self.state.open_similar(),
                Focus::Filters => self.state.toggle_selected_position(),
            },
            KeyCode::Char('s') => self.state.open_similar(),
            KeyCode::Char('x') => self.export_filtered(),
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if self.state.focus == Focus::Filters {
                    self.state.toggle_digit((c as u8 - b'0') as usize);
                }
            }
            _ => {}
        }
    }

    fn on_similar_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('b') | KeyCode::Esc => self.state.screen = Screen::Finder,
            KeyCode::Enter | KeyCode::Char('s') => {
                let Some(m) = self
                    .state
                    .similar
                    .matches
                    .get(self.state.similar_selected)
                    .copied()
                else {
                    return;
                };
                self.state.open_similar_for(m.index);
            }
            _ => {}
        }
    }

    fn adjust(&mut self, upper: bool, delta: i64) {
        if self.state.focus == Focus::Filters {
            self.state.adjust_range(upper, delta);
        }
    }

    fn export_filtered(&mut self) {
        let path = export::default_export_path(&self.state.config.export_dir);
        match export::export_filtered(&path, &self.state.roster, &self.state.filtered) {
            Ok(report) => self.state.push_log(format!(
                "[INFO] Exported {} rows to {}",
                report.rows,
                report.path.display()
            )),
            Err(err) => self.state.push_log(format!("[WARN] Export failed: {err:#}")),
        }
    }
}

fn main() -> io::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let config = ScoutConfig::from_env();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let mut app = App::new(config);
    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = persist::save_session(&app.state.query) {
        eprintln!("session save failed: {err:#}");
    }
    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(2),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(app)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    match app.state.screen {
        Screen::Finder => render_finder(frame, chunks[1], &app.state),
        Screen::Similar => render_similar(frame, chunks[1], &app.state),
    }

    let log_line = app
        .state
        .log
        .back()
        .map(String::as_str)
        .unwrap_or("");
    let log = Paragraph::new(log_line).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(log, chunks[2]);

    let footer = Paragraph::new(footer_text(&app.state)).block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, chunks[3]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(app: &App) -> String {
    let state = &app.state;
    match state.screen {
        Screen::Finder => format!(
            "FC26 SCOUT | {} | {} players found",
            app.source,
            state.filtered.len()
        ),
        Screen::Similar => {
            let name = state
                .similar
                .reference
                .map(|i| state.roster.players[i].short_name.as_str())
                .unwrap_or("?");
            format!(
                "FC26 SCOUT | similar to {} | {} matches",
                name,
                state.similar.matches.len()
            )
        }
    }
}

fn footer_text(state: &AppState) -> String {
    match state.screen {
        Screen::Finder => match state.focus {
            Focus::Filters => {
                "Tab Results | j/k Move | h/l Min | H/L Max | 1-9 Toggle | Space Position | r Reset | R Reset all | x Export | ? Help | q Quit"
                    .to_string()
            }
            Focus::Results => {
                "Tab Filters | j/k Move | Enter/s Similar | x Export | ? Help | q Quit".to_string()
            }
        },
        Screen::Similar => {
            "b/Esc Back | j/k Move | Enter/s Chain similar | ? Help | q Quit".to_string()
        }
    }
}

fn render_finder(frame: &mut Frame, area: Rect, state: &AppState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(38), Constraint::Min(40)])
        .split(area);

    render_filter_sidebar(frame, columns[0], state);
    render_results(frame, columns[1], state);
}

fn render_filter_sidebar(frame: &mut Frame, area: Rect, state: &AppState) {
    let focused = state.focus == Focus::Filters;
    let title_style = if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);
    frame.render_widget(Paragraph::new("FILTERS").style(title_style), sections[0]);

    let list_area = sections[1];
    let visible = list_area.height as usize;
    let (start, end) = visible_range(state.filter_selected, state.filter_rows.len(), visible);

    let mut lines: Vec<Line> = Vec::with_capacity(end - start);
    for idx in start..end {
        let row = &state.filter_rows[idx];
        let selected = focused && idx == state.filter_selected;
        let style = match row {
            FilterRow::Section(_) => Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            _ if selected => Style::default().fg(Color::White).bg(Color::DarkGray),
            _ => Style::default(),
        };
        lines.push(Line::styled(filter_row_text(state, row), style));
    }
    frame.render_widget(Paragraph::new(lines), list_area);
}

fn filter_row_text(state: &AppState, row: &FilterRow) -> String {
    match row {
        FilterRow::Section(name) => format!("── {name} ──"),
        FilterRow::Range { name, min, max } => {
            let (lo, hi) = state.range_selection(name, *min, *max);
            let marker = if state.query.ranges.contains_key(name) {
                '*'
            } else {
                ' '
            };
            format!("{marker}{name:<18} {lo:>3}-{hi:<3} ({min}-{max})")
        }
        FilterRow::Ordinal {
            label,
            name,
            domain,
        } => {
            let selected = match *name {
                "skillmoves" => &state.query.skill_moves,
                _ => &state.query.weak_foot,
            };
            let cells: Vec<String> = domain
                .iter()
                .map(|v| {
                    if selected.contains(v) {
                        format!("[{v}]")
                    } else {
                        format!(" {v} ")
                    }
                })
                .collect();
            let marker = if selected.is_empty() { ' ' } else { '*' };
            format!("{marker}{label:<12} {}", cells.join(""))
        }
        FilterRow::Foot { domain } => {
            let cells: Vec<String> = domain
                .iter()
                .enumerate()
                .map(|(i, v)| {
                    if state.query.preferred_foot.contains(v) {
                        format!("[{} {v}]", i + 1)
                    } else {
                        format!(" {} {v} ", i + 1)
                    }
                })
                .collect();
            let marker = if state.query.preferred_foot.is_empty() {
                ' '
            } else {
                '*'
            };
            format!("{marker}{:<12} {}", "Foot", cells.join(""))
        }
        FilterRow::Position { token } => {
            let mark = if state.query.positions.contains(token) {
                "[x]"
            } else {
                "[ ]"
            };
            format!(" {mark} {token}")
        }
    }
}

fn render_results(frame: &mut Frame, area: Rect, state: &AppState) {
    let focused = state.focus == Focus::Results;
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);

    let header_style = if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    frame.render_widget(
        Paragraph::new(format!(
            "{:<18} {:<14} {:>3} {:>3} {:>4} {:>4} {:>4} {:>4} {:>4} {:>4}  {:>12}",
            "NAME", "POS", "AGE", "OVR", "PAC", "SHO", "PAS", "DRI", "DEF", "PHY", "VALUE"
        ))
        .style(header_style),
        sections[0],
    );

    let list_area = sections[1];
    if state.filtered.is_empty() {
        let empty =
            Paragraph::new("No players match").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, list_area);
        return;
    }

    let visible = list_area.height as usize;
    let (start, end) = visible_range(state.result_selected, state.filtered.len(), visible);

    let mut lines: Vec<Line> = Vec::with_capacity(end - start);
    for i in start..end {
        let player = &state.roster.players[state.filtered[i]];
        let style = if focused && i == state.result_selected {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        } else {
            Style::default()
        };
        lines.push(Line::styled(result_line(player), style));
    }
    frame.render_widget(Paragraph::new(lines), list_area);
}

fn result_line(player: &Player) -> String {
    format!(
        "{:<18} {:<14} {:>3} {:>3} {:>4} {:>4} {:>4} {:>4} {:>4} {:>4}  {:>12}",
        clip(&player.short_name, 18),
        clip(&player.positions, 14),
        player.age(),
        stat_cell(player, "overall"),
        stat_cell(player, "pace"),
        stat_cell(player, "shooting"),
        stat_cell(player, "passing"),
        stat_cell(player, "dribbling"),
        stat_cell(player, "defending"),
        stat_cell(player, "physic"),
        player
            .value
            .map(export::group_thousands)
            .unwrap_or_else(|| "-".to_string()),
    )
}

fn render_similar(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(ref_idx) = state.similar.reference else {
        let empty = Paragraph::new("Reference player not found")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, area);
        return;
    };
    let reference = &state.roster.players[ref_idx];

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .split(area);

    let summary = format!(
        "{} | {} | age {} | {}\nComparing on: {} (leeway {})",
        reference.short_name,
        reference.positions,
        reference.age(),
        reference.club,
        state.similar.compared.join(", "),
        state.config.leeway
    );
    frame.render_widget(Paragraph::new(summary), sections[0]);

    let mut header = format!("{:<18} {:<14} {:>3} {:>5}", "NAME", "POS", "AGE", "DIFF");
    for attr in &state.similar.compared {
        header.push_str(&format!(" {:>6}", clip(attr, 6).to_uppercase()));
    }
    frame.render_widget(
        Paragraph::new(header).style(Style::default().add_modifier(Modifier::BOLD)),
        sections[1],
    );

    let list_area = sections[2];
    if state.similar.matches.is_empty() {
        let empty = Paragraph::new("No similar players within leeway")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, list_area);
        return;
    }

    let visible = list_area.height as usize;
    let (start, end) = visible_range(
        state.similar_selected,
        state.similar.matches.len(),
        visible,
    );

    let mut lines: Vec<Line> = Vec::with_capacity(end - start);
    for i in start..end {
        let m = &state.similar.matches[i];
        let player = &state.roster.players[m.index];
        let mut text = format!(
            "{:<18} {:<14} {:>3} {:>5}",
            clip(&player.short_name, 18),
            clip(&player.positions, 14),
            player.age(),
            m.score
        );
        for attr in &state.similar.compared {
            text.push_str(&format!(" {:>6}", stat_cell(player, attr)));
        }
        let style = if i == state.similar_selected {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        } else {
            Style::default()
        };
        lines.push(Line::styled(text, style));
    }
    frame.render_widget(Paragraph::new(lines), list_area);
}

fn stat_cell(player: &Player, name: &str) -> String {
    player
        .stat(name)
        .map(|v| v.to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn clip(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        text.chars().take(width.saturating_sub(1)).collect::<String>() + "…"
    }
}

fn visible_range(selected: usize, total: usize, visible: usize) -> (usize, usize) {
    if total == 0 || visible == 0 {
        return (0, 0);
    }
    if total <= visible {
        return (0, total);
    }

    let mut start = selected.saturating_sub(visible / 2);
    if start + visible > total {
        start = total - visible;
    }
    (start, start + visible)
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "FC26 Scout - Help",
        "",
        "Finder:",
        "  Tab          Switch filters/results",
        "  j/k or ↑/↓   Move",
        "  h/l          Lower bound -/+",
        "  H/L          Upper bound -/+",
        "  1-9          Toggle skill moves / weak foot / foot",
        "  Space        Toggle position",
        "  r / R        Reset filter / reset all",
        "  Enter / s    Similar players for selection",
        "  x            Export filtered view as CSV",
        "",
        "Similar:",
        "  b / Esc      Back to finder",
        "  Enter / s    Chain: similar to this player",
        "",
        "  ?            Toggle help",
        "  q            Quit",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
