mod app;
mod cli;
mod ui;

use remotodo::api::TaskGateway;
use remotodo::config::Config;
use remotodo::storage::ThemePrefs;
use remotodo::task::{Filter, Task};
use remotodo::utils::paths::{get_crash_log_path, get_logs_dir};

use anyhow::{anyhow, Result};
use clap::Parser;
use cli::{Cli, Commands};
use std::fs;
use std::io::Write;
use std::panic;
use std::time::{SystemTime, UNIX_EPOCH};

/// Install a panic hook that writes crash information to a log file
fn install_crash_handler() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        if let Ok(crash_log_path) = get_crash_log_path() {
            let timestamp = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0);
            let mut crash_report = format!("=== CRASH at unix {} ===\n", timestamp);

            if let Some(message) = panic_info.payload().downcast_ref::<&str>() {
                crash_report.push_str(&format!("Message: {}\n", message));
            } else if let Some(message) = panic_info.payload().downcast_ref::<String>() {
                crash_report.push_str(&format!("Message: {}\n", message));
            }

            if let Some(location) = panic_info.location() {
                crash_report.push_str(&format!(
                    "Location: {}:{}:{}\n",
                    location.file(),
                    location.line(),
                    location.column()
                ));
            }

            crash_report.push_str(&format!(
                "\nBacktrace:\n{}\n\n",
                std::backtrace::Backtrace::force_capture()
            ));

            if let Ok(mut file) = fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&crash_log_path)
            {
                let _ = file.write_all(crash_report.as_bytes());
                eprintln!("\nCrash logged to: {}", crash_log_path.display());
            }
        }

        default_hook(panic_info);
    }));
}

/// Initialize file-based logging for the TUI mode.
///
/// Logs go to ~/.remotodo/logs/remotodo.log; level is controlled with
/// RUST_LOG (default: info). Stdout stays clean for the terminal UI,
/// which is also why remote failures are only ever visible here.
fn init_file_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let logs_dir = match get_logs_dir() {
        Ok(dir) => dir,
        Err(_) => return None,
    };

    if let Err(e) = fs::create_dir_all(&logs_dir) {
        eprintln!("Warning: Could not create logs directory: {}", e);
        return None;
    }

    let file_appender = tracing_appender::rolling::daily(&logs_dir, "remotodo.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .init();

    Some(guard)
}

fn main() -> Result<()> {
    install_crash_handler();

    let cli = Cli::parse();
    let config = Config::load()?;
    let api_url = cli.api_url.unwrap_or(config.api_url);
    let gateway = TaskGateway::new(&api_url)?;

    match cli.command {
        Some(Commands::Add { title }) => handle_add(&gateway, &title),
        Some(Commands::List { filter }) => handle_list(&gateway, &filter),
        Some(Commands::Done { id }) => handle_done(&gateway, id),
        Some(Commands::Rm { id }) => handle_rm(&gateway, id),
        None => {
            // Guard must be kept alive for the duration of the app
            let _log_guard = init_file_logging();

            tracing::info!(%api_url, "remotodo starting");

            // Theme is resolved before the first render; tasks are
            // fetched asynchronously after it.
            let prefs = ThemePrefs::open_default()?;
            let scheme = prefs.initial_scheme();
            let state = app::AppState::new(gateway, prefs, scheme);

            ui::run_tui(state)?;

            tracing::info!("remotodo exiting gracefully");
            Ok(())
        }
    }
}

fn handle_add(gateway: &TaskGateway, title: &str) -> Result<()> {
    let title = title.trim();
    if title.is_empty() {
        return Err(anyhow!("task title cannot be empty"));
    }

    let task = gateway.create_task(title)?;
    println!("Added #{}: {}", task.id, task.title);

    Ok(())
}

fn handle_list(gateway: &TaskGateway, filter: &str) -> Result<()> {
    let filter: Filter = filter.parse()?;
    let tasks = gateway.list_tasks()?;
    let visible = filter.apply(&tasks);

    if visible.is_empty() {
        println!("No tasks.");
        return Ok(());
    }

    for task in visible {
        let mark = if task.completed { 'x' } else { ' ' };
        println!("{:>4} [{}] {}", task.id, mark, task.title);
    }

    Ok(())
}

fn handle_done(gateway: &TaskGateway, id: i64) -> Result<()> {
    let tasks = gateway.list_tasks()?;
    let task = tasks
        .into_iter()
        .find(|t| t.id == id)
        .ok_or_else(|| anyhow!("no task with id {id}"))?;

    let updated = gateway.update_task(&Task {
        completed: !task.completed,
        ..task
    })?;

    let mark = if updated.completed { 'x' } else { ' ' };
    println!("{:>4} [{}] {}", updated.id, mark, updated.title);

    Ok(())
}

fn handle_rm(gateway: &TaskGateway, id: i64) -> Result<()> {
    gateway.delete_task(id)?;
    println!("Deleted #{id}");

    Ok(())
}
