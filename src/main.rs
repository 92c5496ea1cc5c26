use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::{
    fs::File,
    io::{stdout, Stdout},
    path::Path,
    sync::Mutex,
    time::{Duration, Instant},
};
use tracing::info;

use blockfall::config::{Args, Config};
use blockfall::game::{Game, GameEvent};
use blockfall::input::{key_to_command, Command};
use blockfall::scheduler::{drive, TickTimer};

// ============================================================================
// Visual Constants
// ============================================================================

const CELL_WIDTH: u16 = 2;
const BLOCK_CHAR: &str = "██";
const EMPTY_CHAR: &str = " ·";

/// How long the border stays lit after rows are cleared.
const CLEAR_FLASH: Duration = Duration::from_millis(150);

/// Input poll interval once the tick timer has been torn down.
const IDLE_POLL: Duration = Duration::from_millis(250);

// ============================================================================
// Color Mapping
// ============================================================================

/// Fixed palette for color ids 1..=7. Id 0 has no color.
fn cell_color(id: u8) -> Option<Color> {
    match id {
        1 => Some(Color::Cyan),
        2 => Some(Color::Yellow),
        3 => Some(Color::Magenta),
        4 => Some(Color::Green),
        5 => Some(Color::Red),
        6 => Some(Color::Blue),
        7 => Some(Color::Rgb(255, 165, 0)),
        _ => None,
    }
}

fn cell_span(id: u8) -> Span<'static> {
    match cell_color(id) {
        Some(color) => Span::styled(BLOCK_CHAR, Style::default().fg(color)),
        None => Span::styled(EMPTY_CHAR, Style::default().fg(Color::DarkGray)),
    }
}

// ============================================================================
// Clear Flash
// ============================================================================

/// Lights the playfield border for a moment after a line clear.
#[derive(Debug, Default)]
struct ClearFlash {
    until: Option<Instant>,
}

impl ClearFlash {
    fn observe(&mut self, events: &[GameEvent], now: Instant) {
        if events
            .iter()
            .any(|event| matches!(event, GameEvent::LinesCleared(_)))
        {
            self.until = Some(now + CLEAR_FLASH);
        }
    }

    fn is_active(&self, now: Instant) -> bool {
        self.until.is_some_and(|until| now < until)
    }
}

// ============================================================================
// Rendering
// ============================================================================

fn render(frame: &mut Frame, game: &Game, flash: bool) {
    let area = frame.size();
    render_game(frame, game, flash, area);
    if game.is_game_over() {
        render_game_over(frame, area);
    }
}

fn render_game(frame: &mut Frame, game: &Game, flash: bool, area: Rect) {
    let grid_display_width = (game.grid().width() as u16 * CELL_WIDTH) + 2;
    let grid_display_height = game.grid().height() as u16 + 2;
    let main_area = centered_rect(grid_display_width, grid_display_height + 2, area);

    let vertical = Layout::vertical([
        Constraint::Length(grid_display_height),
        Constraint::Fill(1),
    ])
    .split(main_area);

    render_grid(frame, game, flash, vertical[0]);

    let controls_area = Rect {
        x: area.x,
        y: vertical[0].y + vertical[0].height,
        width: area.width,
        height: 1,
    };
    if controls_area.y < area.height {
        let controls = Paragraph::new(Line::from("←→: Move | ↑↓: Rotate | Q/ESC: Quit"))
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(controls, controls_area);
    }
}

fn render_grid(frame: &mut Frame, game: &Game, flash: bool, area: Rect) {
    let border_style = if flash {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(" Blockfall ")
        .title_alignment(Alignment::Center);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let visual = game.render_grid();
    let lines: Vec<Line> = visual
        .rows()
        .iter()
        .map(|row| {
            let spans: Vec<Span> = row.iter().map(|&id| cell_span(id)).collect();
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_game_over(frame: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("GAME OVER", Style::default().fg(Color::Red))),
        Line::from(""),
        Line::from(Span::styled(
            "Press ESC to quit",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph = Paragraph::new(text).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Game Over ")
            .title_alignment(Alignment::Center)
            .style(Style::default().bg(Color::Black)),
    );

    let popup_area = centered_rect(24, 7, area);
    frame.render_widget(paragraph, popup_area);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let horizontal = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(width.min(area.width)),
        Constraint::Fill(1),
    ])
    .split(area);

    let vertical = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height.min(area.height)),
        Constraint::Fill(1),
    ])
    .split(horizontal[1]);

    vertical[1]
}

// ============================================================================
// Logging
// ============================================================================

fn init_logging(path: &Path, level: tracing::Level) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(level)
        .init();
    Ok(())
}

// ============================================================================
// Main Loop
// ============================================================================

fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, config: &Config) -> Result<()> {
    let mut game = Game::new(config)?;
    let mut timer = TickTimer::start(config.tick, Instant::now());
    let mut flash = ClearFlash::default();

    loop {
        let lit = flash.is_active(Instant::now());
        terminal.draw(|frame| render(frame, &game, lit))?;

        let timeout = timer.time_until_due(Instant::now()).unwrap_or(IDLE_POLL);

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key_to_command(key) {
                        Command::Quit => break,
                        Command::Play(intent) => game.handle(intent),
                        Command::None => {}
                    }
                }
            }
        }

        if timer.is_due(Instant::now()) {
            drive(&mut game, &mut timer);
        }
        // Drained every frame so the buffer never grows
        let events = game.take_events();
        flash.observe(&events, Instant::now());
    }

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::from_args(&args).context("invalid configuration")?;
    if let Some(path) = &args.log_file {
        init_logging(path, args.log_level)?;
    }
    info!(?config, "starting");

    enable_raw_mode().context("failed to enable raw mode")?;
    stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &config);

    // Restore the terminal before reporting any error from the loop
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}
