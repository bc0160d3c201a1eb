mod app;

use anyhow::{Context, Result};
use app::{Action, App, SegmentKind, status_marker};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};
use redline_config::Config;
use redline_engine::{SuggestionBatch, SuggestionSession, SuggestionStatus};
use std::{
    env,
    io::{Stdout, stdout},
    path::{Path, PathBuf},
    process,
};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let (suggestions_path, text_path) = match args.as_slice() {
        [_, suggestions] => (PathBuf::from(suggestions), None),
        [_, suggestions, text] => (PathBuf::from(suggestions), Some(PathBuf::from(text))),
        _ => {
            eprintln!("Usage: {} <suggestions.json> [text-file]", args[0]);
            process::exit(1);
        }
    };

    let config = match Config::load() {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => {
            eprintln!("Warning: {e}; using defaults");
            Config::default()
        }
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_level_or_default()),
    )
    .init();

    let session = load_session(&suggestions_path, text_path.as_deref(), &config)?;
    log::info!(
        "reviewing {} suggestions from {}",
        session.suggestions().len(),
        suggestions_path.display()
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(session);

    // Main loop
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("{err:?}");
        process::exit(1);
    }

    println!("{}", app.final_text());
    Ok(())
}

/// Read the batch and the text under review; the text file wins over the
/// batch's embedded text
fn load_session(
    suggestions_path: &Path,
    text_path: Option<&Path>,
    config: &Config,
) -> Result<SuggestionSession> {
    let json = std::fs::read_to_string(suggestions_path)
        .with_context(|| format!("reading {}", suggestions_path.display()))?;
    let batch = SuggestionBatch::from_json(&json)
        .with_context(|| format!("parsing {}", suggestions_path.display()))?;

    let text = match (text_path, batch.original_text) {
        (Some(path), _) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        (None, Some(text)) => text,
        (None, None) => anyhow::bail!(
            "{} has no originalText; pass the text file as a second argument",
            suggestions_path.display()
        ),
    };

    SuggestionSession::with_history_limit(&text, batch.suggestions, config.history_limit)
        .with_context(|| format!("loading suggestions from {}", suggestions_path.display()))
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && let Some(action) = Action::from_key(key)
            && !app.apply(action)
        {
            return Ok(());
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(2)].as_ref())
        .split(f.area());

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)].as_ref())
        .split(rows[0]);

    // Suggestion list panel
    let items: Vec<ListItem> = app
        .view()
        .suggestions
        .iter()
        .map(|s| {
            let style = match s.status {
                SuggestionStatus::Pending => Style::default(),
                SuggestionStatus::Accepted => Style::default().fg(Color::Green),
                SuggestionStatus::Rejected => Style::default().fg(Color::DarkGray),
            };
            let mut lines = vec![Line::from(vec![
                Span::styled(format!("{} ", status_marker(s.status)), style),
                Span::styled(s.original_span.clone(), Style::default().fg(Color::Red)),
                Span::raw(" → "),
                Span::styled(s.replacement_span.clone(), Style::default().fg(Color::Green)),
            ])];
            if !s.reason.is_empty() {
                lines.push(Line::from(Span::styled(
                    format!("  {}", s.reason),
                    Style::default().add_modifier(Modifier::ITALIC),
                )));
            }
            ListItem::new(lines)
        })
        .collect();

    let pending = app.view().pending().count();
    let title = format!("Suggestions ({pending} pending)");
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));

    f.render_stateful_widget(list, chunks[0], &mut app.list_state);

    // Text panel
    let spans: Vec<Span<'static>> = app
        .segments()
        .into_iter()
        .map(|segment| {
            let style = match segment.kind {
                SegmentKind::Plain => Style::default(),
                SegmentKind::Pending => Style::default().add_modifier(Modifier::UNDERLINED),
                SegmentKind::Selected => Style::default()
                    .bg(Color::Yellow)
                    .fg(Color::Black)
                    .add_modifier(Modifier::UNDERLINED),
            };
            Span::styled(segment.text, style)
        })
        .collect();
    let text_lines = split_lines(spans);

    let content = Paragraph::new(text_lines)
        .block(Block::default().borders(Borders::ALL).title("Text"))
        .wrap(Wrap { trim: false });

    f.render_widget(content, chunks[1]);

    // Status and instructions
    let status = Line::from(vec![
        Span::styled(app.history_hint(), Style::default().fg(Color::Cyan)),
        Span::raw(" "),
        Span::raw(app.status().to_string()),
    ]);
    let help = Line::from(vec![
        Span::raw("q: Quit | "),
        Span::raw("↑/k ↓/j: Move | "),
        Span::raw("a/r: Accept/Reject | "),
        Span::raw("A/R: All | "),
        Span::raw("u: Undo | Ctrl-r/U: Redo"),
    ]);

    f.render_widget(Paragraph::new(vec![status, help]), rows[1]);
}

/// Break styled spans on newlines so the paragraph keeps the text's lines
fn split_lines(spans: Vec<Span<'static>>) -> Vec<Line<'static>> {
    let mut lines = vec![Line::default()];
    for span in spans {
        let style = span.style;
        let mut parts = span.content.split('\n');
        if let Some(first) = parts.next()
            && let Some(line) = lines.last_mut()
        {
            line.push_span(Span::styled(first.to_string(), style));
        }
        for part in parts {
            lines.push(Line::from(Span::styled(part.to_string(), style)));
        }
    }
    lines
}
