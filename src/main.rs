// Binary includes library modules - some public API items are only for library consumers
#![allow(unused)]

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    Terminal,
};

mod app;
mod data;
mod events;
mod link;
mod settings;
mod ui;

use app::App;
use link::{ControllerLink, ReplayLink, SimulatedLink, StreamLink};
use settings::Settings;

#[derive(Parser, Debug)]
#[command(name = "fermwatch")]
#[command(about = "Terminal dashboard for monitoring live bioreactor sensor readings")]
struct Args {
    /// Path to a TOML settings file (sampler period, threshold bands)
    #[arg(short = 'C', long)]
    config: Option<PathBuf>,

    /// Replay readings from a JSON file instead of simulating
    #[arg(short = 'f', long, conflicts_with = "connect")]
    replay: Option<PathBuf>,

    /// Connect to a controller bridge over TCP (host:port)
    #[arg(short, long, conflicts_with = "replay")]
    connect: Option<String>,

    /// Sampler period in milliseconds (overrides the settings file)
    #[arg(short, long)]
    tick_ms: Option<u64>,

    /// Export the reading from --replay to a JSON file and exit
    #[arg(short, long, requires = "replay", conflicts_with = "connect")]
    export: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = Settings::load(args.config.as_deref())?;
    if let Some(tick_ms) = args.tick_ms {
        settings.sampler.tick_ms = tick_ms;
    }

    // Handle export mode (non-interactive)
    if let Some(export_path) = args.export {
        let replay_path = args.replay.expect("clap enforces --replay with --export");
        return export_to_file(&replay_path, &export_path, &settings);
    }

    // Handle TCP connection mode
    if let Some(ref addr) = args.connect {
        return run_with_tcp(addr, settings);
    }

    // Handle file replay mode
    if let Some(ref path) = args.replay {
        let link = Box::new(ReplayLink::new(path));
        return run_tui(link, settings);
    }

    // Default: built-in simulator
    run_tui(Box::new(SimulatedLink::new()), settings)
}

/// Run with a TCP stream link to a controller bridge
fn run_with_tcp(addr: &str, settings: Settings) -> Result<()> {
    // Keep the runtime alive for the link's background tasks
    let rt = tokio::runtime::Runtime::new()?;

    let link = rt.block_on(async {
        use tokio::net::TcpStream;

        println!("Connecting to {}...", addr);
        match TcpStream::connect(addr).await {
            Ok(stream) => {
                println!("Connected!");
                let (read_half, write_half) = stream.into_split();
                Ok(Box::new(StreamLink::spawn(read_half, write_half, addr))
                    as Box<dyn ControllerLink>)
            }
            Err(e) => Err(anyhow::anyhow!("Failed to connect to {}: {}", addr, e)),
        }
    })?;

    run_tui(link, settings)
}

/// Run the TUI with the given controller link
fn run_tui(link: Box<dyn ControllerLink>, settings: Settings) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic);
    }));

    let mut app = App::new(link, settings.thresholds, settings.tick_period());

    // Run the main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    // Minimum terminal size for usable display
    const MIN_WIDTH: u16 = 60;
    const MIN_HEIGHT: u16 = 16;

    while app.running {
        // Draw UI
        terminal.draw(|frame| {
            let area = frame.area();

            // Check for minimum terminal size
            if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                let msg = format!(
                    "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
                    area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                );
                let paragraph = ratatui::widgets::Paragraph::new(msg)
                    .alignment(ratatui::layout::Alignment::Center)
                    .style(ratatui::style::Style::default().fg(ratatui::style::Color::Yellow));
                let centered = ratatui::layout::Rect::new(0, area.height / 2 - 2, area.width, 5);
                frame.render_widget(paragraph, centered);
                return;
            }

            let chunks = Layout::vertical([
                Constraint::Length(1), // Header bar
                Constraint::Length(5), // Metric cards
                Constraint::Min(6),    // Temperature chart
                Constraint::Length(3), // Connection + agitator controls
                Constraint::Length(1), // Status bar
            ])
            .split(area);

            ui::common::render_header(frame, app, chunks[0]);
            ui::cards::render(frame, app, chunks[1]);
            ui::chart::render(frame, app, chunks[2]);
            ui::controls::render(frame, app, chunks[3]);
            ui::common::render_status_bar(frame, app, chunks[4]);

            // Render help overlay if active
            if app.show_help {
                ui::common::render_help(frame, app, area);
            }
        })?;

        // Poll for events with a short timeout
        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Mouse(mouse) => events::handle_mouse_event(app, mouse),
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }

        // Fire the sampler when a period has elapsed (no-op while disconnected)
        app.tick();
    }

    Ok(())
}

/// Export a replayed reading and its classification to a JSON file
fn export_to_file(
    replay_path: &std::path::Path,
    export_path: &std::path::Path,
    settings: &Settings,
) -> Result<()> {
    let link = Box::new(ReplayLink::new(replay_path));
    let mut app = App::new(link, settings.thresholds, Duration::ZERO);

    app.connect();
    if !app.refresh() {
        anyhow::bail!(
            "No reading available from {}{}",
            replay_path.display(),
            app.link_error
                .as_deref()
                .map(|e| format!(" ({})", e))
                .unwrap_or_default()
        );
    }

    app.export_session(export_path)?;
    println!("Exported session to: {}", export_path.display());
    Ok(())
}
