//! Reverie - a terminal journal with a rich-text editing surface.
//!
//! # Usage
//!
//! ```bash
//! reverie
//! reverie --entry 3 --hide-toolbar
//! reverie --input-mode html --dump
//! ```

use std::collections::BTreeMap;
use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use reverie::app::App;
use reverie::config::{
    ConfigFlags, InputMode, clear_config_flags, global_config_path, load_config_flags,
    local_override_path, parse_flag_tokens, save_config_flags,
};
use reverie::perf;

/// A terminal journal with a rich-text editing surface
#[derive(Parser, Debug)]
#[command(name = "reverie", version, about, long_about = None)]
struct Cli {
    /// Id of the entry to open
    #[arg(long, value_name = "ID")]
    entry: Option<String>,

    /// How stored entry content is interpreted
    #[arg(long, value_enum)]
    input_mode: Option<InputMode>,

    /// Start with the formatting toolbar hidden
    #[arg(long)]
    hide_toolbar: bool,

    /// Show the toolbar even if saved defaults hide it
    #[arg(long)]
    toolbar: bool,

    /// Log scope timings
    #[arg(long)]
    perf: bool,

    /// Write log output to a file instead of stderr
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Print every edited draft as JSON on exit
    #[arg(long)]
    dump: bool,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

fn init_logging(log_file: Option<&PathBuf>, perf: bool) -> Result<()> {
    let filter = perf::log_filter(perf);
    let (writer, ansi) = match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            (BoxMakeWriter::new(Mutex::new(file)), false)
        }
        None => (BoxMakeWriter::new(std::io::stderr), true),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(ansi)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    init_logging(effective.log_file.as_ref(), effective.perf)?;
    perf::set_enabled(effective.perf);
    tracing::debug!(?effective, "effective flags");

    let mut app = App::new()
        .with_entry(effective.entry.clone())
        .with_input_mode(effective.input_mode.unwrap_or_default())
        .with_toolbar_visible(effective.toolbar_visible())
        .with_config_paths(
            Some(global_path.clone()),
            if local_path.exists() {
                Some(local_path.clone())
            } else {
                None
            },
        );

    let drafts = app.run().context("Application error")?;

    if cli.dump {
        let drafts: BTreeMap<&str, &str> = drafts.sorted().into_iter().collect();
        let json = serde_json::to_string_pretty(&drafts).context("Failed to serialize drafts")?;
        println!("{json}");
    }
    Ok(())
}
