//! XController - gamepad input normalization
//!
//! Polls a gamepad and reports deadzone-corrected stick movement and
//! edge-triggered button presses/releases.

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use xcontroller::config::AppConfig;
use xcontroller::input::gamepad::{
    compare_states, falling_edges, rising_edges, ButtonState, ControllerEvent, DeadzoneMode,
    EventCallback, GamepadProvider, GilrsSource, Vector2,
};

/// XController - gamepad deadzones and button edge events
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "xcontroller.yaml")]
    config: String,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Poll the first connected gamepad and print events (default)
    Run,

    /// Show every deadzone algorithm's output for one stick sample
    Inspect {
        #[arg(long, allow_hyphen_values = true)]
        x: f64,
        #[arg(long, allow_hyphen_values = true)]
        y: f64,
        #[arg(long, default_value_t = 0.15)]
        deadzone: f64,
    },

    /// Classify the transition between two XInput button flag words
    Diff {
        /// Previous flags (decimal or 0x-prefixed hex)
        #[arg(long, value_parser = parse_flags)]
        prev: u16,
        /// Next flags (decimal or 0x-prefixed hex)
        #[arg(long, value_parser = parse_flags)]
        next: u16,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let args = Args::parse();

    init_logging(&args.log_level, args.log_json)?;

    match args.command.unwrap_or(Command::Run) {
        Command::Run => run(&args.config).await,
        Command::Inspect { x, y, deadzone } => {
            inspect(Vector2::new(x, y), deadzone);
            Ok(())
        },
        Command::Diff { prev, next } => {
            diff(prev, next);
            Ok(())
        },
    }
}

async fn run(config_path: &str) -> Result<()> {
    info!("Starting XController...");

    let config = if Path::new(config_path).exists() {
        info!("Configuration file: {}", config_path);
        AppConfig::load(config_path).await?
    } else {
        warn!("Config file {} not found, using defaults", config_path);
        AppConfig::default()
    };

    let listeners: Vec<EventCallback> = vec![Arc::new(print_event)];
    let mut provider = GamepadProvider::start(&config, listeners, GilrsSource::new).await?;

    shutdown_signal().await;
    provider.shutdown().await?;

    info!("XController shutdown complete");
    Ok(())
}

fn print_event(event: ControllerEvent) {
    match event {
        ControllerEvent::ButtonsPressed { just_pressed, .. } => {
            println!("{} {}", "Buttons pressed:".green().bold(), just_pressed);
        },
        ControllerEvent::ButtonsReleased { just_released, .. } => {
            println!("{} {}", "Buttons released:".yellow().bold(), just_released);
        },
        ControllerEvent::LeftThumbMoved { position } => {
            println!("{} {}", "Left thumb:".cyan(), position);
        },
        ControllerEvent::RightThumbMoved { position } => {
            println!("{} {}", "Right thumb:".cyan(), position);
        },
        ControllerEvent::TriggersMoved { left, right } => {
            println!("{} L {:.3} R {:.3}", "Triggers:".magenta(), left, right);
        },
    }
}

fn inspect(input: Vector2, deadzone: f64) {
    if !(0.0..1.0).contains(&deadzone) {
        warn!("Deadzone {} is outside [0, 1), results may be NaN", deadzone);
    }

    println!("\n{}", "=== Deadzone Inspection ===".bold().cyan());
    println!("  Input:    {}  (magnitude {:.3})", input, input.magnitude());
    println!("  Deadzone: {:.3}\n", deadzone);

    for mode in DeadzoneMode::ALL {
        let out = mode.apply(input, deadzone);
        println!(
            "  {:<20} {}  (magnitude {:.3})",
            mode.name().bold(),
            out,
            out.magnitude()
        );
    }
}

fn diff(prev: u16, next: u16) {
    let prev = ButtonState::from_xinput_flags(prev);
    let next = ButtonState::from_xinput_flags(next);

    println!("\n{}", "=== Button Transition ===".bold().cyan());
    println!("  Previous: [{}]", prev);
    println!("  Next:     [{}]", next);
    println!("  Result:   {:?}", compare_states(prev, next));
    println!("  Rising:   [{}]", rising_edges(prev, next).to_string().green());
    println!("  Falling:  [{}]", falling_edges(prev, next).to_string().yellow());
}

fn parse_flags(s: &str) -> Result<u16, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => s.parse::<u16>(),
    };
    parsed.map_err(|e| format!("invalid button flags '{}': {}", s, e))
}

fn init_logging(level: &str, json: bool) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_thread_names(false),
            )
            .init();
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for CTRL+C: {}", e);
    }
    info!("Shutdown signal received");
}
