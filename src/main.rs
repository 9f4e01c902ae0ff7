use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use ratatui::layout::Rect;
use tracing::Level;

use term_card::app::{CardApp, CardOptions};
use term_card::config::CardConfig;
use term_card::drivers::OutputDriver;
use term_card::drivers::console::{ConsoleInputDriver, ConsoleOutputDriver};
use term_card::error::CardError;
use term_card::geometry::CellMetrics;
use term_card::haptics::TerminalBell;
use term_card::input_mode::{InputMode, InputPreference};
use term_card::logging::{self, DEFAULT_MAX_LINES, LogHandle};
use term_card::runner::run_card;

#[derive(Parser, Debug)]
#[command(
    name = "term-card",
    version = env!("CARGO_PKG_VERSION"),
    about = "An interactive greeting card for the terminal"
)]
struct Cli {
    /// Card content as TOML. The built-in card is used when omitted.
    #[arg(long, value_name = "PATH")]
    card: Option<PathBuf>,

    /// Whether the pointer can hover. `auto` guesses from TERM.
    #[arg(long, value_enum, default_value_t = InputPreference::Auto)]
    input: InputPreference,

    /// Seed for every random choice, for repeatable sessions.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Pixel size of one terminal cell, overriding what the terminal reports.
    #[arg(long = "cell-size", value_name = "WxH", value_parser = parse_cell_size)]
    cell_size: Option<(f64, f64)>,

    /// Redraw rate.
    #[arg(long, value_name = "FPS", default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..=240))]
    fps: u32,

    /// Ring the terminal bell where a phone would vibrate.
    #[arg(long)]
    bell: bool,

    #[arg(long = "log-level", value_name = "LEVEL", default_value_t = Level::INFO)]
    log_level: Level,

    /// Print the captured log to stderr after the card closes.
    #[arg(long = "dump-log")]
    dump_log: bool,
}

impl Cli {
    fn poll_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.fps))
    }

    fn metrics(&self) -> CellMetrics {
        match self.cell_size {
            Some((width, height)) => CellMetrics::new(width, height),
            None => CellMetrics::detect(),
        }
    }
}

fn parse_cell_size(raw: &str) -> Result<(f64, f64), String> {
    let (width, height) = raw
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WxH, got `{raw}`"))?;
    let parse = |value: &str| {
        value
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 1.0)
            .ok_or_else(|| format!("invalid cell dimension `{value}`"))
    };
    Ok((parse(width)?, parse(height)?))
}

fn main() -> Result<(), CardError> {
    let cli = Cli::parse();

    let log = LogHandle::new(DEFAULT_MAX_LINES);
    logging::set_global_log(log.clone());
    logging::init(cli.log_level);

    let config = CardConfig::load_or_default(cli.card.as_deref())?;
    let options = CardOptions {
        input_mode: InputMode::detect_from_env(cli.input),
        seed: cli.seed,
        metrics: cli.metrics(),
    };
    tracing::info!(
        cell_width = options.metrics.cell_width,
        cell_height = options.metrics.cell_height,
        fps = cli.fps,
        "starting"
    );

    let mut app = CardApp::new(config, options, Instant::now());
    if cli.bell {
        app.set_haptics(Box::new(TerminalBell::stdout()));
    }
    let (columns, rows) = crossterm::terminal::size()?;
    app.set_viewport(Rect::new(0, 0, columns, rows));

    let mut output = ConsoleOutputDriver::new()?;
    output.enter()?;
    let result = run_card(
        ConsoleInputDriver::new(),
        &mut output,
        &mut app,
        cli.poll_interval(),
    );
    output.exit()?;

    if cli.dump_log {
        for line in log.lines() {
            eprintln!("{line}");
        }
    }
    result.map_err(CardError::from)
}
