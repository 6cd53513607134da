//! passbook - interactive credential store
//!
//! Entries live in a plain-text file (`passwords.txt` in the working directory
//! unless configured otherwise). Each entry is guarded by a security question
//! for viewing and editing, and by its own password for deletion.

mod console;
mod menu;

use clap::Parser;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use console::Console;
use passbook_core::{EntryStore, Settings, SettingsManager};

/// passbook - store website credentials behind security questions
#[derive(Parser, Debug)]
#[command(name = "passbook")]
#[command(version)]
#[command(about = "passbook - store website credentials behind security questions")]
struct Args {
    /// Entry store file (overrides the configured location)
    #[arg(short, long, env = "PASSBOOK_FILE")]
    file: Option<PathBuf>,

    /// Directory holding settings.json
    #[arg(long, env = "PASSBOOK_CONFIG_DIR")]
    config_dir: Option<PathBuf>,

    /// Save --file as the default store location
    #[arg(long, requires = "file")]
    remember: bool,

    /// Log store activity to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut settings = args
        .config_dir
        .clone()
        .or_else(SettingsManager::default_config_dir)
        .map(|dir| SettingsManager::new(&dir));

    init_logging(
        args.verbose,
        settings.as_ref().and_then(|m| m.get().log_filter.as_deref()),
    );

    if let Some(error) = settings.as_ref().and_then(|m| m.load_error()) {
        warn!("Settings ignored, using defaults: {}", error);
    }

    let store_file = match &args.file {
        Some(file) => file.clone(),
        None => settings
            .as_ref()
            .map(|m| m.get().effective_store_file())
            .unwrap_or_else(|| Settings::default().effective_store_file()),
    };

    if args.remember {
        match settings.as_mut() {
            Some(manager) => {
                manager
                    .set_store_file(store_file.clone())
                    .map_err(|e| format!("Failed to save settings: {}", e))?;
                info!(
                    "Remembered store file {:?} in {:?}",
                    store_file,
                    manager.settings_file()
                );
            }
            None => warn!("No configuration directory available; --remember ignored"),
        }
    }

    info!("Using store file {:?}", store_file);
    let mut store = EntryStore::open(&store_file);

    let stdin = io::stdin();
    let hide_secrets = stdin.is_terminal();
    let mut console = Console::new(stdin.lock(), io::stdout().lock(), hide_secrets);

    menu::show_load_warnings(&store, &mut console)?;
    menu::run(&mut store, &mut console)?;

    if store.is_dirty() {
        info!("Retrying save of unsaved changes before exit");
    }
    store
        .close()
        .map_err(|e| format!("Failed to save entries to {:?}: {}", store_file, e))?;

    Ok(())
}

/// RUST_LOG wins, then --verbose, then the configured filter, then "warn"
fn init_logging(verbose: bool, configured: Option<&str>) {
    let fallback = if verbose {
        "info"
    } else {
        configured.unwrap_or("warn")
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
