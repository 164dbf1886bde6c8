//! Flowline Live Viewer — interactive Ratatui TUI
//!
//! Layout:
//!   ┌─── header ──────────────────────────────────────────────────────────┐
//!   │  [1] Single Attempt  [2] Interleaved Sessions  [3] Legacy Logs      │
//!   ├─── left panel ───────────────────────────┬─── right panel ──────────┤
//!   │  Message Flow                            │  Entry Details           │
//!   ├──────────────────────────────────────────┴──────────────────────────┤
//!   │  footer (key bindings)                                              │
//!   └─────────────────────────────────────────────────────────────────────┘
//!
//! The viewer drives a replay source at the configured poll cadence.  Each
//! poll that yields a snapshot wholly replaces the previous log set and the
//! timeline is reconstructed from scratch — identities are stable, so rows
//! don't jump between refreshes.

use std::{
    io,
    path::Path,
    time::{Duration, Instant},
};

use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame, Terminal,
};

use flowline_contracts::{Phase, TimelineEntry};
use flowline_engine::reconstruct;
use flowline_feed::{decode_endpoint_label, ReplaySource, SnapshotSource, ViewerConfig};
use flowline_replay::Scenario;

/// Optional config file picked up from the working directory.
const CONFIG_FILE: &str = "flowline.toml";

// ── App state ─────────────────────────────────────────────────────────────────

struct App {
    scenario: Scenario,
    source: ReplaySource,
    config: ViewerConfig,

    // Current reconstruction, replaced wholesale on every new snapshot.
    timeline: Vec<TimelineEntry>,
    record_count: usize,
    polls_taken: usize,
    drained: bool,

    // Display toggles, seeded from config.
    show_details: bool,
    decode_labels: bool,

    selected: usize,
    last_poll: Instant,
}

impl App {
    fn new(config: ViewerConfig) -> Self {
        let scenario = Scenario::SingleAuth;
        let show_details = config.show_details;
        let decode_labels = config.decode_labels;
        Self {
            scenario,
            source: ReplaySource::new(scenario.script().polls),
            config,
            timeline: Vec::new(),
            record_count: 0,
            polls_taken: 0,
            drained: false,
            show_details,
            decode_labels,
            selected: 0,
            last_poll: Instant::now(),
        }
    }

    /// Switch to (or restart) a scenario with a fresh replay source.
    fn load(&mut self, scenario: Scenario) {
        self.scenario = scenario;
        self.source = ReplaySource::new(scenario.script().polls);
        self.timeline.clear();
        self.record_count = 0;
        self.polls_taken = 0;
        self.drained = false;
        self.selected = 0;
        self.last_poll = Instant::now();
    }

    /// Poll the source once if the cadence interval has elapsed.
    ///
    /// A `None` poll means the window is drained; an error keeps the prior
    /// timeline on screen (no new snapshot this tick).
    fn tick(&mut self) {
        if self.drained || self.last_poll.elapsed() < self.config.poll_interval() {
            return;
        }
        self.last_poll = Instant::now();

        match self.source.poll() {
            Ok(Some(snapshot)) => {
                self.record_count = snapshot.len();
                self.timeline = reconstruct(&snapshot);
                self.polls_taken += 1;
                if self.selected >= self.timeline.len() {
                    self.selected = self.timeline.len().saturating_sub(1);
                }
            }
            Ok(None) => self.drained = true,
            Err(_) => {}
        }
    }

    fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn select_next(&mut self) {
        if self.selected + 1 < self.timeline.len() {
            self.selected += 1;
        }
    }

    fn label(&self, raw: &str) -> String {
        if self.decode_labels {
            decode_endpoint_label(raw)
        } else {
            raw.to_string()
        }
    }
}

// ── Rendering ─────────────────────────────────────────────────────────────────

fn ui(f: &mut Frame, app: &App) {
    let full = f.area();

    let outer_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Min(10),   // flow + details
            Constraint::Length(3), // footer
        ])
        .split(full);

    render_header(f, outer_chunks[0], app);

    let mid_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(outer_chunks[1]);

    render_flow(f, mid_chunks[0], app);
    render_details(f, mid_chunks[1], app);
    render_footer(f, outer_chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let title_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);

    let mut spans: Vec<Span> = vec![Span::styled("Flowline Live Viewer    ", title_style)];

    let scenarios = [
        ("[1]", Scenario::SingleAuth),
        ("[2]", Scenario::Interleaved),
        ("[3]", Scenario::Legacy),
    ];

    for (key, scenario) in &scenarios {
        let is_selected = app.scenario == *scenario;
        let style = if is_selected {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(format!("{} {}  ", key, scenario.name()), style));
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(header, area);
}

fn render_flow(f: &mut Frame, area: Rect, app: &App) {
    let mut items: Vec<ListItem> = Vec::new();

    if app.timeline.is_empty() {
        let hint = if app.polls_taken == 0 {
            "  Waiting for the first poll…"
        } else {
            "  Log set is empty — attempt just started"
        };
        items.push(ListItem::new(Span::styled(
            hint,
            Style::default().fg(Color::DarkGray),
        )));
    }

    for entry in &app.timeline {
        items.push(ListItem::new(flow_line(entry, app)));
    }

    let status = if app.drained {
        format!(
            " Message Flow — {} record(s), settled after {} poll(s) ",
            app.record_count, app.polls_taken
        )
    } else {
        format!(
            " Message Flow — {} record(s), polling every {} ms ",
            app.record_count, app.config.poll_interval_ms
        )
    };

    let block = Block::default()
        .title(status)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("▸");

    let mut state = ListState::default();
    if !app.timeline.is_empty() {
        state.select(Some(app.selected));
    }
    f.render_stateful_widget(list, area, &mut state);
}

/// One rendered row of the message flow list.
fn flow_line(entry: &TimelineEntry, app: &App) -> Line<'static> {
    match entry {
        TimelineEntry::Session(marker) => Line::from(vec![
            Span::styled("● ", Style::default().fg(Color::Cyan)),
            Span::styled(
                format!("session {}", shorten(&marker.session, 16)),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}", format_ts(marker.ts)),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        TimelineEntry::Message(message) => {
            let event = &message.event;
            let tag = event.phase.tag().to_string();
            Line::from(vec![
                Span::styled(
                    format!("{:<22}", shorten(&app.label(&event.src), 22)),
                    Style::default().fg(Color::White),
                ),
                Span::raw(" "),
                Span::styled(
                    format!("[{:^4}]", tag),
                    Style::default()
                        .fg(phase_color(&event.phase))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" → "),
                Span::styled(
                    format!("{:<22}", shorten(&app.label(&event.dst), 22)),
                    Style::default().fg(Color::White),
                ),
                Span::styled(
                    format!("  {}", format_ts(event.ts)),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        }
    }
}

fn render_details(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Entry Details ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let Some(entry) = app.timeline.get(app.selected) else {
        let p = Paragraph::new(Span::styled(
            "  No entry selected.",
            Style::default().fg(Color::DarkGray),
        ))
        .block(block);
        f.render_widget(p, area);
        return;
    };

    let mut lines: Vec<Line> = Vec::new();
    let key_style = Style::default().fg(Color::Gray);

    match entry {
        TimelineEntry::Session(marker) => {
            lines.push(Line::from(vec![
                Span::styled("  Kind:     ", key_style),
                Span::styled("session marker", Style::default().fg(Color::Cyan)),
            ]));
            lines.push(Line::from(vec![
                Span::styled("  Session:  ", key_style),
                Span::raw(marker.session.clone()),
            ]));
            lines.push(Line::from(vec![
                Span::styled("  Id:       ", key_style),
                Span::raw(marker.id.to_string()),
            ]));
            lines.push(Line::from(vec![
                Span::styled("  Started:  ", key_style),
                Span::raw(format_ts(marker.ts)),
            ]));
        }
        TimelineEntry::Message(message) => {
            let event = &message.event;
            lines.push(Line::from(vec![
                Span::styled("  Phase:    ", key_style),
                Span::styled(
                    event.phase.tag().to_string(),
                    Style::default()
                        .fg(phase_color(&event.phase))
                        .add_modifier(Modifier::BOLD),
                ),
            ]));
            lines.push(Line::from(vec![
                Span::styled("  Id:       ", key_style),
                Span::raw(message.id.to_string()),
            ]));
            lines.push(Line::from(vec![
                Span::styled("  Session:  ", key_style),
                Span::raw(event.session_key().to_string()),
            ]));
            lines.push(Line::from(vec![
                Span::styled("  From:     ", key_style),
                Span::raw(app.label(&event.src)),
            ]));
            lines.push(Line::from(vec![
                Span::styled("  To:       ", key_style),
                Span::raw(app.label(&event.dst)),
            ]));
            lines.push(Line::from(vec![
                Span::styled("  Seq:      ", key_style),
                Span::raw(
                    event
                        .seq
                        .map(|seq| seq.to_string())
                        .unwrap_or_else(|| "(unset)".to_string()),
                ),
            ]));
            lines.push(Line::from(vec![
                Span::styled("  Time:     ", key_style),
                Span::raw(format_ts(event.ts)),
            ]));

            if app.show_details {
                lines.push(Line::from(""));
                match &event.details {
                    Some(details) if !details.is_empty() => {
                        for (key, value) in details {
                            lines.push(Line::from(vec![
                                Span::styled(format!("  {:<10}", key), key_style),
                                Span::raw(display_value(value)),
                            ]));
                        }
                    }
                    _ => {
                        lines.push(Line::from(Span::styled(
                            "  No details",
                            Style::default().fg(Color::DarkGray),
                        )));
                    }
                }
            }
        }
    }

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let details_label = if app.show_details {
        "details: ON"
    } else {
        "details: OFF"
    };
    let details_color = if app.show_details {
        Color::Green
    } else {
        Color::Red
    };

    let labels_label = if app.decode_labels {
        "labels: decoded"
    } else {
        "labels: raw"
    };
    let labels_color = if app.decode_labels {
        Color::Green
    } else {
        Color::Red
    };

    let spans: Vec<Span> = vec![
        Span::styled(" [1-3] ", Style::default().fg(Color::Cyan)),
        Span::raw("Scenario  "),
        Span::styled("[r] ", Style::default().fg(Color::Cyan)),
        Span::raw("Restart  "),
        Span::styled("[↑/↓] ", Style::default().fg(Color::Cyan)),
        Span::raw("Select  "),
        Span::styled("[d] ", Style::default().fg(Color::Cyan)),
        Span::styled(details_label, Style::default().fg(details_color)),
        Span::raw("  "),
        Span::styled("[l] ", Style::default().fg(Color::Cyan)),
        Span::styled(labels_label, Style::default().fg(labels_color)),
        Span::raw("  "),
        Span::styled("[q] ", Style::default().fg(Color::Cyan)),
        Span::raw("Quit"),
    ];

    let footer = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(footer, area);
}

// ── Utility helpers ───────────────────────────────────────────────────────────

fn phase_color(phase: &Phase) -> Color {
    match phase {
        Phase::M1 => Color::Cyan,
        Phase::M2 => Color::Yellow,
        Phase::M3 => Color::Magenta,
        Phase::M4 => Color::Green,
        Phase::Other(_) => Color::Gray,
    }
}

/// Detail values print bare for strings, JSON-encoded otherwise.
fn display_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Fractional epoch seconds → "HH:MM:SS" (UTC), or a placeholder when unset.
fn format_ts(ts: Option<f64>) -> String {
    let Some(ts) = ts else {
        return "--:--:--".to_string();
    };
    let secs = ts.trunc() as i64;
    let nanos = ((ts - ts.trunc()) * 1e9) as u32;
    chrono::DateTime::from_timestamp(secs, nanos)
        .map(|dt| dt.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "--:--:--".to_string())
}

/// Truncate a label to at most `max` chars, appending "…" if truncated.
fn shorten(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

// ── Terminal setup / teardown ─────────────────────────────────────────────────

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}

// ── Main event loop ───────────────────────────────────────────────────────────

fn main() -> io::Result<()> {
    // Optional config alongside the working directory; defaults otherwise.
    let config = if Path::new(CONFIG_FILE).exists() {
        match ViewerConfig::from_file(Path::new(CONFIG_FILE)) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("ignoring {}: {}", CONFIG_FILE, e);
                ViewerConfig::default()
            }
        }
    } else {
        ViewerConfig::default()
    };

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        default_hook(info);
    }));

    let mut terminal = setup_terminal()?;
    let mut app = App::new(config);

    loop {
        app.tick();
        terminal.draw(|f| ui(f, &app))?;

        // Wake up in time for the next poll tick, but stay responsive to
        // key input in between.
        let until_poll = app
            .config
            .poll_interval()
            .saturating_sub(app.last_poll.elapsed());
        let timeout = until_poll.min(Duration::from_millis(150));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('q') | KeyCode::Char('Q') => break,
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => break,

                    KeyCode::Char('1') => app.load(Scenario::SingleAuth),
                    KeyCode::Char('2') => app.load(Scenario::Interleaved),
                    KeyCode::Char('3') => app.load(Scenario::Legacy),
                    KeyCode::Char('r') | KeyCode::Char('R') => app.load(app.scenario),

                    KeyCode::Char('d') | KeyCode::Char('D') => {
                        app.show_details = !app.show_details;
                    }
                    KeyCode::Char('l') | KeyCode::Char('L') => {
                        app.decode_labels = !app.decode_labels;
                    }

                    KeyCode::Up => app.select_previous(),
                    KeyCode::Down => app.select_next(),

                    _ => {}
                }
            }
        }
    }

    restore_terminal(&mut terminal)?;
    Ok(())
}
