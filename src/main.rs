//! detections-tui - A terminal dashboard for robot object detections
//!
//! Sign in against the detections backend, then browse what the robot has
//! logged.

mod action;
mod app;
mod component;
mod components;
mod config;
mod error;
mod model;
mod services;
mod tui;

use crate::action::Action;
use crate::app::App;
use crate::component::Component;
use crate::config::Config;
use crate::services::HttpApi;
use crate::tui::Tui;
use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::Event;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "detections-tui", version, about = "Terminal dashboard for robot detections")]
struct Cli {
    /// Base URL of the detections backend (overrides the config file)
    #[arg(long)]
    api_url: Option<String>,

    /// Write logs here instead of ~/.detections-tui/detections-tui.log
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Persist the effective configuration before starting
    #[arg(long)]
    save_config: bool,
}

/// Logs go to a file; the terminal belongs to the UI
fn init_logging(log_file: Option<PathBuf>) -> Result<()> {
    let path = match log_file {
        Some(path) => path,
        None => Config::config_dir()
            .context("Could not determine log directory")?
            .join("detections-tui.log"),
    };
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file)?;

    let config = Config::load().with_api_base_url(cli.api_url);
    if cli.save_config {
        config.save()?;
    }
    let api = Arc::new(HttpApi::new(config.api_base_url.clone()));
    log::info!("starting against {}", api.base_url());

    let mut tui = Tui::new()?.with_tick_rate(Duration::from_millis(100));
    tui.enter()?;

    let mut app = App::new(config, api);
    let result = run_app(&mut tui, &mut app);

    tui.exit()?;

    if let Err(err) = result {
        log::error!("exiting on error: {:?}", err);
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }

    Ok(())
}

/// Run the main application loop
fn run_app(tui: &mut Tui, app: &mut App) -> Result<()> {
    while !app.should_quit {
        let mut draw_result = Ok(());
        tui.draw(|frame| {
            let area = frame.area();
            draw_result = app.draw(frame, area);
        })?;
        draw_result?;

        let action = match tui.next_event()? {
            Some(Event::Key(key)) => app.handle_key_event(key)?,
            Some(Event::Resize(w, h)) => Some(Action::Resize(w, h)),
            Some(_) => None,
            // No event - tick so the background fetch gets polled
            None => Some(Action::Tick),
        };

        // An action may produce a follow-up (e.g. SubmitLogin -> LoggedIn)
        let mut current_action = action;
        while let Some(a) = current_action {
            if a != Action::Tick {
                log::debug!("action: {}", a);
            }
            current_action = app.update(a)?;
        }
    }

    Ok(())
}
