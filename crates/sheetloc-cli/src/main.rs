use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::Result;
use sheetloc_core::{Mode, UnlistedPolicy};
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

#[macro_use]
mod ui;
mod commands;
mod reporter;

#[derive(Parser)]
#[command(
    name = "sheetloc",
    version,
    about = "Sync translation catalogs with spreadsheet workbooks"
)]
struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Only print warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    cmd: Commands,
}

/// Which languages and categories take part in a run.
#[derive(Args, Debug, Clone, Default)]
pub struct SelectionArgs {
    /// Comma separated languages to include; overrides --ignore-languages
    #[arg(long)]
    languages: Option<String>,
    /// Comma separated categories to include; overrides --ignore-categories
    #[arg(long)]
    categories: Option<String>,
    /// Comma separated languages to leave out
    #[arg(long)]
    ignore_languages: Option<String>,
    /// Comma separated categories to leave out
    #[arg(long)]
    ignore_categories: Option<String>,
    /// Whether languages are selected when no language list is given (include|exclude)
    #[arg(long)]
    unlisted_languages: Option<UnlistedPolicy>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write one workbook per language from the catalogs
    Export {
        /// Run configuration file
        config: PathBuf,
        /// Existing directory the workbooks are written to
        out_dir: PathBuf,
        /// new: only untranslated entries, all: every entry
        mode: Option<Mode>,
        #[command(flatten)]
        selection: SelectionArgs,
        /// Fixed row height for data rows
        #[arg(long)]
        line_height: Option<f64>,
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Merge translated workbooks back into the catalogs
    Import {
        /// Run configuration file
        config: PathBuf,
        /// Directory holding `<language>.<extension>` workbooks
        in_dir: PathBuf,
        /// Workbook file extension (default xlsx)
        extension: Option<String>,
        /// new: keep existing translations, all: overwrite them
        mode: Option<Mode>,
        #[command(flatten)]
        selection: SelectionArgs,
        /// Report what would change without writing
        #[arg(long, default_value_t = false)]
        dry_run: bool,
        /// Copy each catalog to `<file>.bak` before overwriting it
        #[arg(long, default_value_t = false)]
        backup: bool,
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Dump JSON Schemas of the report types
    Schema {
        #[arg(long, default_value = "./docs/schemas")]
        out_dir: PathBuf,
    },
}

trait Runnable {
    fn run(self, quiet: bool) -> Result<()>;
}

impl Runnable for Commands {
    fn run(self, quiet: bool) -> Result<()> {
        let cmd_name = match &self {
            Commands::Export { .. } => "export",
            Commands::Import { .. } => "import",
            Commands::Schema { .. } => "schema",
        };
        info!(event = "command_started", command = cmd_name);

        let result = match self {
            Commands::Export {
                config,
                out_dir,
                mode,
                selection,
                line_height,
                format,
            } => commands::export::run_export(
                config,
                out_dir,
                mode,
                selection,
                line_height,
                format,
                quiet,
            ),
            Commands::Import {
                config,
                in_dir,
                extension,
                mode,
                selection,
                dry_run,
                backup,
                format,
            } => commands::import::run_import(commands::import::ImportParams {
                config,
                in_dir,
                extension,
                mode,
                selection,
                dry_run,
                backup,
                format,
                quiet,
            }),
            Commands::Schema { out_dir } => commands::schema::run_schema(out_dir),
        };

        match &result {
            Ok(_) => info!(event = "command_finished", command = cmd_name),
            Err(e) => error!(event = "command_failed", command = cmd_name, error = ?e),
        }
        result
    }
}

/// Console on stderr, plus a daily rolling debug log under `logs/`
/// (or `$SHEETLOC_LOG_DIR`). The returned guard flushes the file log on drop.
fn init_tracing(quiet: bool) -> Option<WorkerGuard> {
    let default_level = if quiet { "warn" } else { "info" };
    let console_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        );

    let log_dir = std::env::var_os("SHEETLOC_LOG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("logs"));
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("sheetloc")
        .filename_suffix("log")
        .build(&log_dir);

    let (file_layer, guard) = match appender {
        Ok(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(writer)
                .with_filter(EnvFilter::new("debug"));
            (Some(layer), Some(guard))
        }
        Err(_) => (None, None),
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
    if guard.is_none() {
        tracing::warn!(event = "file_log_disabled", dir = %log_dir.display());
    }
    guard
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let _guard = init_tracing(cli.quiet);

    ui::set_color(
        !cli.no_color
            && std::io::stdout().is_terminal()
            && std::env::var_os("NO_COLOR").is_none(),
    );

    cli.cmd.run(cli.quiet)
}
