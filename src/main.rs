use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
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
use tokio::runtime::Runtime;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use twinwatch::{
    events, ui, App, Export, FileSource, Overrides, Settings, SimulatedSource, StreamSource,
    TelemetrySource, Ticker, View,
};

/// How long `--once` waits for a source to deliver its first reading.
/// Recoverable errors, such as one malformed line, keep it waiting.
const ONCE_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Parser, Debug)]
#[command(name = "twinwatch")]
#[command(about = "Terminal dashboard for a simulated digital twin facility")]
#[command(version)]
struct Args {
    /// Settings file (TOML, YAML or JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Replay reading sets from a JSON file instead of simulating
    #[arg(long, conflicts_with = "connect")]
    replay: Option<PathBuf>,

    /// Read newline-delimited JSON reading sets from a TCP endpoint (host:port)
    #[arg(long, conflicts_with = "replay")]
    connect: Option<String>,

    /// Seed for reproducible simulation
    #[arg(long)]
    seed: Option<u64>,

    /// Telemetry refresh interval (e.g., "3s", "500ms")
    #[arg(long)]
    telemetry_interval: Option<String>,

    /// Clock refresh interval
    #[arg(long)]
    clock_interval: Option<String>,

    /// Connectivity sampling interval
    #[arg(long)]
    connectivity_interval: Option<String>,

    /// Probability that a connectivity sample reports the link as up
    #[arg(long)]
    uptime: Option<f64>,

    /// Print one classified reading set as JSON and exit
    #[arg(long)]
    once: bool,

    /// Export one classified reading set to a JSON file and exit
    #[arg(short, long)]
    export: Option<PathBuf>,

    /// Write logs to this file (the TUI owns the terminal otherwise)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let headless = args.once || args.export.is_some();

    init_tracing(args.log_file.as_deref(), headless)?;

    let overrides = Overrides {
        clock_interval: args.clock_interval.clone(),
        telemetry_interval: args.telemetry_interval.clone(),
        connectivity_interval: args.connectivity_interval.clone(),
        uptime: args.uptime,
        seed: args.seed,
    };
    let settings =
        Settings::load_layered(args.config.as_deref(), Settings::environment(), &overrides)
            .context("Failed to load settings")?;
    info!(?settings, "settings loaded");

    let rt = Runtime::new()?;
    let source = build_source(&rt, &args, &settings)?;

    if headless {
        return run_once(&rt, source, &settings, args.export.as_deref());
    }

    // Spawn the periodic tasks; they keep running on the runtime's workers
    // while the TUI owns the main thread.
    let (mut ticker, feeds) = rt.block_on(async { Ticker::spawn(source, &settings) });

    let result = run_tui(App::new(feeds, &settings));

    ticker.shutdown();
    result
}

/// Log to a file when asked, to stderr in headless mode, and not at all
/// while the TUI is drawing.
fn init_tracing(log_file: Option<&Path>, headless: bool) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("twinwatch=info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("Failed to create log file {}", path.display()))?;
        builder.with_ansi(false).with_writer(Mutex::new(file)).init();
    } else if headless {
        builder.with_writer(io::stderr).init();
    }
    Ok(())
}

fn build_source(
    rt: &Runtime,
    args: &Args,
    settings: &Settings,
) -> Result<Box<dyn TelemetrySource>> {
    if let Some(ref path) = args.replay {
        info!(path = %path.display(), "replaying reading sets");
        return Ok(Box::new(FileSource::new(path)));
    }

    if let Some(ref addr) = args.connect {
        return rt.block_on(async {
            use tokio::net::TcpStream;

            info!(%addr, "connecting");
            let stream = TcpStream::connect(addr)
                .await
                .with_context(|| format!("Failed to connect to {}", addr))?;
            Ok(Box::new(StreamSource::spawn(stream, addr)) as Box<dyn TelemetrySource>)
        });
    }

    Ok(Box::new(SimulatedSource::from_seed(settings.seed)))
}

/// Read a single reading set, then print it or write it to `export`.
fn run_once(
    rt: &Runtime,
    mut source: Box<dyn TelemetrySource>,
    settings: &Settings,
    export: Option<&Path>,
) -> Result<()> {
    let reading = rt.block_on(async {
        let deadline = tokio::time::Instant::now() + ONCE_TIMEOUT;
        loop {
            if let Some(reading) = source.read() {
                return Ok(reading);
            }
            if source.is_finished() {
                let err = source.error().unwrap_or("source finished");
                anyhow::bail!("{}: {}", source.description(), err);
            }
            if tokio::time::Instant::now() >= deadline {
                match source.error() {
                    Some(err) => anyhow::bail!(
                        "No reading from {} within {:?} (last error: {})",
                        source.description(),
                        ONCE_TIMEOUT,
                        err
                    ),
                    None => anyhow::bail!(
                        "No reading from {} within {:?}",
                        source.description(),
                        ONCE_TIMEOUT
                    ),
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
    })?;

    let export_data = Export::new(reading, &settings.policies, None);
    match export {
        Some(path) => {
            export_data.write(path)?;
            println!("Exported reading set to: {}", path.display());
        }
        None => println!("{}", export_data.to_json_pretty()?),
    }
    Ok(())
}

/// Run the TUI until the user quits.
fn run_tui(mut app: App) -> Result<()> {
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
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic);
    }));

    let _ = app.reload_data();

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        warn!(error = %e, "TUI exited with an error");
    }
    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    // Minimum terminal size for usable display
    const MIN_WIDTH: u16 = 60;
    const MIN_HEIGHT: u16 = 16;

    while app.running {
        terminal.draw(|frame| {
            let area = frame.area();

            if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                let msg = format!(
                    "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
                    area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                );
                let paragraph = ratatui::widgets::Paragraph::new(msg)
                    .alignment(ratatui::layout::Alignment::Center)
                    .style(ratatui::style::Style::default().fg(ratatui::style::Color::Yellow));
                let centered = ratatui::layout::Rect::new(
                    0,
                    (area.height / 2).saturating_sub(2),
                    area.width,
                    5.min(area.height),
                );
                frame.render_widget(paragraph, centered);
                return;
            }

            let chunks = Layout::vertical([
                Constraint::Length(1), // Header bar
                Constraint::Length(1), // Tabs
                Constraint::Min(12),   // Content
                Constraint::Length(1), // Status bar
            ])
            .split(area);

            ui::common::render_header(frame, app, chunks[0]);
            ui::common::render_tabs(frame, app, chunks[1]);

            match app.current_view {
                View::Overview => ui::overview::render(frame, app, chunks[2]),
                View::Trends => ui::trends::render(frame, app, chunks[2]),
            }

            ui::common::render_status_bar(frame, app, chunks[3]);

            if app.show_help {
                ui::common::render_help(frame, app, area);
            }
        })?;

        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                // Tabs sit on the second row, below the header
                Event::Mouse(mouse) => events::handle_mouse_event(app, mouse, 1),
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }

        // Feeds are pushed by the periodic tasks; picking them up never blocks
        app.reload_data();
    }

    Ok(())
}
