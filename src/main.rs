//! ShowTUI - Terminal browser for TV show search and episode lists
//!
//! # Usage
//!
//! ```bash
//! # Launch interactive TUI
//! showtui
//!
//! # CLI mode (for automation)
//! showtui search "girls"
//! showtui episodes 139
//! showtui search bones --json
//! ```

use std::io::{stdout, Stdout};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use tokio::sync::mpsc;

use showtui::app::{App, AppAction, AppEvent, InputMode};
use showtui::cli::{Cli, Command, ExitCode, Output};
use showtui::commands;
use showtui::config::Config;
use showtui::ui::{self, Theme};
use showtui::TvMazeClient;

/// Terminal type alias for convenience
type Tui = Terminal<CrosstermBackend<Stdout>>;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.is_cli_mode() {
        // CLI mode: execute command and exit
        let exit_code = run_cli(cli).await;
        std::process::exit(exit_code.into());
    } else {
        // TUI mode: launch interactive interface
        run_tui(cli).await
    }
}

/// Run CLI command and return exit code
async fn run_cli(cli: Cli) -> ExitCode {
    let output = Output::new(&cli);
    let config_path = cli.config.as_deref();

    match cli.command {
        Some(Command::Search(cmd)) => commands::search_cmd(cmd, &output, config_path).await,

        Some(Command::Episodes(cmd)) => commands::episodes_cmd(cmd, &output, config_path).await,

        None => {
            // This shouldn't happen (handled by is_cli_mode check)
            ExitCode::Success
        }
    }
}

// =============================================================================
// TUI Mode
// =============================================================================

/// Initialize the terminal for TUI mode
fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal to normal state
fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run interactive TUI
async fn run_tui(cli: Cli) -> Result<()> {
    let config = match cli.config.as_deref() {
        Some(p) => Config::load_from(p).unwrap_or_default(),
        None => Config::load(),
    };
    let client = Arc::new(TvMazeClient::with_base_url(config.base_url()));

    // Initialize terminal
    let mut terminal = init_terminal()?;

    // Create app state
    let mut app = App::new();

    // Run the main event loop
    let result = run_event_loop(&mut terminal, &mut app, client).await;

    // Always restore terminal, even on error
    restore_terminal(&mut terminal)?;

    result
}

/// Main event loop - handles input, updates state, renders UI
async fn run_event_loop(terminal: &mut Tui, app: &mut App, client: Arc<TvMazeClient>) -> Result<()> {
    const TICK_RATE: Duration = Duration::from_millis(100);

    let (tx, mut rx) = mpsc::unbounded_channel::<AppEvent>();

    while app.running {
        // Render current state
        terminal.draw(|frame| render_ui(frame, app))?;

        // Poll for events with timeout so channel drains keep running
        if event::poll(TICK_RATE)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (ignore releases on Windows)
                if key.kind == KeyEventKind::Press {
                    if let Some(action) = app.handle_key(key) {
                        spawn_action(action, Arc::clone(&client), tx.clone());
                    }
                }
            }
        }

        // Apply completed network operations; stale generations are dropped
        // inside apply_event, so late responses never clobber newer state.
        while let Ok(event) = rx.try_recv() {
            app.apply_event(event);
        }
    }

    Ok(())
}

/// Start the network task for an action, reporting back over the channel
fn spawn_action(action: AppAction, client: Arc<TvMazeClient>, tx: mpsc::UnboundedSender<AppEvent>) {
    match action {
        AppAction::SubmitSearch { term, generation } => {
            tokio::spawn(async move {
                let result = client
                    .search_shows(&term)
                    .await
                    .map_err(|e| e.to_string());
                let _ = tx.send(AppEvent::ShowsLoaded { generation, result });
            });
        }
        AppAction::FetchEpisodes {
            show_id,
            generation,
        } => {
            tokio::spawn(async move {
                let result = client.episodes(show_id).await.map_err(|e| e.to_string());
                let _ = tx.send(AppEvent::EpisodesLoaded { generation, result });
            });
        }
    }
}

// =============================================================================
// UI Rendering
// =============================================================================

/// Main render function - lays out header, content, and status bar
fn render_ui(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Clear with background color
    frame.render_widget(Clear, area);
    frame.render_widget(
        Block::default().style(ratatui::style::Style::default().bg(Theme::BACKGROUND)),
        area,
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    render_header(frame, chunks[0], app);
    render_content(frame, chunks[1], app);
    render_status_bar(frame, chunks[2], app);

    // Render error overlay if present
    if let Some(ref error) = app.error {
        render_error_popup(frame, area, error);
    }
}

/// Render the header with logo and search box
fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(14), // Logo
            Constraint::Min(1),     // Search box
        ])
        .split(area);

    // Logo
    let logo = Paragraph::new(Line::from(vec![
        Span::styled(
            "SHOW",
            ratatui::style::Style::default()
                .fg(Theme::PRIMARY)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "TUI",
            ratatui::style::Style::default()
                .fg(Theme::SECONDARY)
                .add_modifier(Modifier::BOLD),
        ),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(ratatui::style::Style::default().fg(Theme::BORDER)),
    );
    frame.render_widget(logo, header_chunks[0]);

    // Search box
    let search_style = if app.input_mode == InputMode::Editing {
        Theme::border_focused()
    } else {
        Theme::border()
    };

    let search_text = if app.input_mode == InputMode::Editing {
        let query = &app.search.query;
        let cursor = app.search.cursor.min(query.len());
        let (before, after) = query.split_at(cursor);
        format!("⌕ {}│{}", before, after)
    } else if app.search.query.is_empty() {
        "⌕ Type / to search...".to_string()
    } else {
        format!("⌕ {}", app.search.query)
    };

    let search_box = Paragraph::new(search_text)
        .style(if app.input_mode == InputMode::Editing {
            Theme::input().fg(Theme::PRIMARY)
        } else {
            Theme::input()
        })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(search_style)
                .title(Span::styled(" SEARCH ", Theme::title())),
        );
    frame.render_widget(search_box, header_chunks[1]);
}

/// Render the main content: the show list, split with the episode region
/// while one is open
fn render_content(frame: &mut Frame, area: Rect, app: &App) {
    if app.episodes.visible {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        ui::shows::render(frame, chunks[0], app);
        ui::episodes::render(frame, chunks[1], app);
    } else {
        ui::shows::render(frame, area, app);
    }
}

/// Render status bar at bottom
fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mode_indicator = match app.input_mode {
        InputMode::Normal => Span::styled(
            " NORMAL ",
            ratatui::style::Style::default()
                .fg(Theme::BACKGROUND)
                .bg(Theme::PRIMARY),
        ),
        InputMode::Editing => Span::styled(
            " INSERT ",
            ratatui::style::Style::default()
                .fg(Theme::BACKGROUND)
                .bg(Theme::ACCENT),
        ),
    };

    let context = if app.episodes.visible {
        Span::styled(" EPISODES ", ratatui::style::Style::default().fg(Theme::DIM))
    } else {
        Span::styled(" SHOWS ", ratatui::style::Style::default().fg(Theme::DIM))
    };

    let mut status_spans = vec![mode_indicator, context, Span::raw(" │ ")];
    for (key, hint) in [
        (" q ", "quit  "),
        (" / ", "search  "),
        (" ↵ ", "episodes  "),
        (" ESC ", "back "),
    ] {
        status_spans.push(Span::styled(key, Theme::keybind()));
        status_spans.push(Span::styled(hint, Theme::dimmed()));
    }

    let status_line = Line::from(status_spans);

    let status = Paragraph::new(status_line).style(Theme::status_bar());
    frame.render_widget(status, area);
}

/// Render error popup overlay
fn render_error_popup(frame: &mut Frame, area: Rect, error: &str) {
    // Calculate centered popup
    let popup_width = 60.min(area.width.saturating_sub(4));
    let popup_height = 5;

    let popup_area = Rect {
        x: area.x + (area.width.saturating_sub(popup_width)) / 2,
        y: area.y + (area.height.saturating_sub(popup_height)) / 2,
        width: popup_width,
        height: popup_height,
    };

    frame.render_widget(Clear, popup_area);

    let error_block = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(error, Theme::error())),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Theme::error())
            .title(Span::styled(" ✗ ERROR ", Theme::error()))
            .style(ratatui::style::Style::default().bg(Theme::BACKGROUND)),
    );

    frame.render_widget(error_block, popup_area);
}
