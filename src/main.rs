use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_subscriber::EnvFilter;

use fleetwatch::data::duration::parse_duration;
use fleetwatch::settings::{Intervals, ThemePreference};
use fleetwatch::{events, ui, App, Settings};

/// Event poll timeout; also the frame period of the dashboard.
const FRAME: Duration = Duration::from_millis(100);

#[derive(Parser, Debug)]
#[command(name = "fleetwatch")]
#[command(about = "Terminal dashboard for simulated bus fleet telemetry and alerts")]
struct Args {
    /// Settings file (TOML, YAML or JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// RNG seed; the same seed replays the same run
    #[arg(short, long)]
    seed: Option<u64>,

    /// How often the tracked bus reports (e.g., "3s", "500ms")
    #[arg(long)]
    telemetry_interval: Option<String>,

    /// How often a synthetic alert is raised
    #[arg(long)]
    alert_interval: Option<String>,

    /// How often alert age labels advance
    #[arg(long)]
    aging_interval: Option<String>,

    /// How often the fleet map markers move
    #[arg(long)]
    map_interval: Option<String>,

    /// Color theme
    #[arg(long, value_enum)]
    theme: Option<ThemePreference>,

    /// Run without a terminal for this many telemetry ticks, then print or export the state
    #[arg(long, value_name = "TICKS")]
    headless: Option<u64>,

    /// Write the final state as JSON (requires --headless)
    #[arg(short, long, requires = "headless")]
    export: Option<PathBuf>,

    /// Write logs to this file (RUST_LOG controls the level)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(ref path) = args.log_file {
        init_logging(path)?;
    }

    let mut settings = Settings::load(args.config.as_deref())?;
    if args.seed.is_some() {
        settings.seed = args.seed;
    }
    if let Some(theme) = args.theme {
        settings.theme = theme;
    }
    let intervals = resolve_intervals(&settings, &args)?;

    if let Some(ticks) = args.headless {
        return run_headless(&settings, intervals, ticks, args.export.as_deref());
    }

    run_tui(&settings, intervals)
}

/// Install a file-backed tracing subscriber. Stdout belongs to the dashboard.
fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install logger: {}", e))?;
    Ok(())
}

/// Settings intervals with command-line overrides applied.
fn resolve_intervals(settings: &Settings, args: &Args) -> Result<Intervals> {
    let mut intervals = settings.intervals.parse()?;
    let overrides = [
        (&args.telemetry_interval, &mut intervals.telemetry, "--telemetry-interval"),
        (&args.alert_interval, &mut intervals.alert, "--alert-interval"),
        (&args.aging_interval, &mut intervals.aging, "--aging-interval"),
        (&args.map_interval, &mut intervals.map, "--map-interval"),
    ];
    for (value, slot, flag) in overrides {
        if let Some(value) = value {
            *slot = parse_duration(value).context(flag)?;
        }
    }
    Ok(intervals)
}

/// Drive the scheduler on a simulated clock until `ticks` telemetry ticks have run.
fn run_headless(
    settings: &Settings,
    intervals: Intervals,
    ticks: u64,
    export: Option<&Path>,
) -> Result<()> {
    if ticks == 0 {
        bail!("--headless needs at least one tick");
    }

    let start = Instant::now();
    let theme = ui::Theme::from_preference(ThemePreference::Dark);
    let mut app = App::with_intervals(settings, intervals, theme, start)?;

    let step = FRAME.min(intervals.telemetry);
    let mut now = start;
    while app.ticks < ticks {
        now += step;
        app.update(now);
    }
    info!(ticks = app.ticks, alerts = app.alert_count(), "headless run finished");

    match export {
        Some(path) => {
            app.export_state(path, now)?;
            println!("Exported dashboard state to: {}", path.display());
        }
        None => {
            let json = serde_json::to_string_pretty(&app.snapshot(now))?;
            println!("{}", json);
        }
    }
    Ok(())
}

/// Run the interactive dashboard.
fn run_tui(settings: &Settings, intervals: Intervals) -> Result<()> {
    // Detect the theme before entering the alternate screen.
    let theme = ui::Theme::from_preference(settings.theme);
    let mut app = App::with_intervals(settings, intervals, theme, Instant::now())?;

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
    while app.running {
        terminal.draw(|frame| ui::draw(frame, app))?;

        if let Some(event) = events::poll_event(FRAME)? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Mouse(mouse) => events::handle_mouse_event(app, mouse),
                // Terminal will redraw on next iteration
                Event::Resize(_, _) => {}
                _ => {}
            }
        }

        app.update(Instant::now());
        app.prune_closed_sources();
    }

    info!(ticks = app.ticks, "dashboard closed");
    Ok(())
}
