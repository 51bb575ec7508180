//! elmo - A small terminal text editor.
//!
//! # Usage
//!
//! ```bash
//! elmo src/main.rs
//! elmo --tab-width 8 Makefile
//! elmo --theme gruvbox --save
//! ```

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use elmo::app::App;
use elmo::config::{
    ConfigFlags, ThemeName, clear_config_flags, global_config_path, load_config_flags,
    local_override_path, parse_flag_tokens, save_config_flags,
};
use elmo::editor::{DEFAULT_SCROLL_MARGIN, DEFAULT_TAB_WIDTH};
use elmo::perf;

/// A small terminal text editor
#[derive(Parser, Debug)]
#[command(name = "elmo", version, about, long_about = None)]
struct Cli {
    /// File to edit (created on first save if missing)
    #[arg(value_name = "FILE", required_unless_present_any = ["save", "clear"])]
    file: Option<PathBuf>,

    /// Columns per tab stop
    #[arg(long, value_name = "N")]
    tab_width: Option<usize>,

    /// Lines kept visible above and below the cursor
    #[arg(long, value_name = "N")]
    scroll_margin: Option<usize>,

    /// Color palette
    #[arg(long, value_enum)]
    theme: Option<ThemeName>,

    /// Disable syntax highlighting
    #[arg(long)]
    no_highlight: bool,

    /// Log timing scopes and loop events
    #[arg(long)]
    perf: bool,

    /// Write debug logs to a file instead of stderr
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("Failed to create log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
            )
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
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

    init_logging(effective.log_file.as_deref())?;
    perf::set_enabled(effective.perf);
    tracing::debug!(?effective, config = %global_path.display(), "effective flags");

    let Some(file) = cli.file else {
        // --save or --clear without a file only manages the defaults
        return Ok(());
    };

    let mut app = App::new(file)
        .with_tab_width(effective.tab_width.unwrap_or(DEFAULT_TAB_WIDTH))
        .with_scroll_margin(effective.scroll_margin.unwrap_or(DEFAULT_SCROLL_MARGIN))
        .with_theme(effective.theme.unwrap_or_default())
        .with_highlighting(!effective.no_highlight);

    app.run().context("Application error")
}
