use anyhow::{Context, Result};
use chrono::NaiveTime;
use clap::{Parser, ValueEnum};

use analogue_clock::logging::{init_logging, LoggingConfig};
use analogue_clock::{Clock, ClockConfig, SecondHandMode, Tick};

/// Real-time analogue clock face.
#[derive(Debug, Parser)]
#[command(name = "analogue-clock")]
#[command(about = "Analogue clock face synchronized to local time", version)]
struct Cli {
    #[arg(
        long,
        value_enum,
        default_value_t = SecondHand::Sweep,
        help = "Second hand motion (tick, sweep)"
    )]
    second_hand: SecondHand,

    #[arg(long, default_value_t = 300, help = "Window width and height in logical pixels")]
    size: usize,

    #[arg(long, default_value_t = 60.0, help = "Maximum animation frame rate")]
    fps: f64,

    #[arg(long, help = "Draw only the hour and minute hands")]
    hide_seconds: bool,

    #[arg(long, help = "Print an SVG snapshot to stdout instead of opening a window")]
    svg: bool,

    #[arg(
        long,
        requires = "svg",
        value_parser = parse_time,
        help = "Snapshot time as HH:MM:SS[.mmm] (defaults to now)"
    )]
    at: Option<NaiveTime>,

    #[arg(long, help = "Log filter in env_logger syntax (overrides RUST_LOG)")]
    log: Option<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SecondHand {
    Tick,
    Sweep,
}

impl From<SecondHand> for SecondHandMode {
    fn from(value: SecondHand) -> Self {
        match value {
            SecondHand::Tick => SecondHandMode::Ticking,
            SecondHand::Sweep => SecondHandMode::Sweeping,
        }
    }
}

fn parse_time(value: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(value, "%H:%M:%S%.f")
        .map_err(|err| format!("expected HH:MM:SS[.mmm]: {err}"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&LoggingConfig {
        filter: cli.log.clone(),
        ..LoggingConfig::default()
    });

    let config = ClockConfig::builder()
        .second_hand_mode(cli.second_hand.into())
        .show_second_hand(!cli.hide_seconds)
        .window_width(cli.size)
        .window_height(cli.size)
        .max_framerate(cli.fps)
        .build();
    let clock = Clock::new(config).context("invalid clock options")?;

    if cli.svg {
        let svg = match cli.at {
            Some(time) => clock.render_svg_at(Tick::from_time(&time)),
            None => clock.render_svg(),
        };
        print!("{svg}");
        return Ok(());
    }

    log::info!("opening clock window");
    clock.show().context("clock window failed")
}
