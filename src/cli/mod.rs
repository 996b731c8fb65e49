//! Command-line parsing for the AgNP assay simulator.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the modeling/math code.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::domain::AssayKind;

pub mod config;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "agnp", version, about = "Silver nanoparticle (AgNP) assay response simulator")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compute all four datasets, print summary/tables/plots, and optionally export.
    Simulate(SimulateArgs),
    /// Plot datasets from a saved bundle JSON or an exported CSV.
    Plot(PlotArgs),
    /// Launch the interactive TUI.
    ///
    /// This uses the same underlying pipeline as `agnp simulate`, but renders the
    /// four charts in a terminal UI using Ratatui and Plotters.
    Tui(SimArgs),
}

/// Simulation parameters shared by `simulate` and `tui`.
///
/// Unset flags fall back to the `--config` file, then to built-in defaults.
#[derive(Debug, Args, Clone, Default)]
pub struct SimArgs {
    /// TOML file with `[sweep]`, `[degradation]` and `[models.*]` settings.
    #[arg(long, value_name = "TOML")]
    pub config: Option<PathBuf>,

    /// Maximum concentration in µg/ml (10-200) [default: 100].
    #[arg(short = 'm', long = "max-conc")]
    pub max_concentration: Option<f64>,

    /// Concentration step size in µg/ml (1-20) [default: 10].
    #[arg(short = 's', long = "step")]
    pub concentration_step: Option<f64>,

    /// First concentration of the sweep in µg/ml (0-200) [default: 0].
    #[arg(long = "min-conc")]
    pub min_concentration: Option<f64>,

    /// Dye degradation rate constant k (0.01-0.2) [default: 0.05].
    #[arg(short = 'k', long = "decay-rate")]
    pub decay_rate: Option<f64>,

    /// End of the degradation time sweep in minutes (5-240) [default: 60].
    #[arg(long)]
    pub time_max: Option<f64>,

    /// Degradation time step in minutes (1-30) [default: 5].
    #[arg(long)]
    pub time_step: Option<f64>,
}

/// Options for `agnp simulate`.
#[derive(Debug, Args, Clone)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub sim: SimArgs,

    /// Render ASCII plots in the terminal (enabled by default).
    #[arg(long, default_value_t = true)]
    pub plot: bool,

    /// Disable the terminal plots.
    #[arg(long)]
    pub no_plot: bool,

    /// Do not print the data tables.
    #[arg(long)]
    pub no_table: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 72)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 16)]
    pub height: usize,

    /// Export the concentration assays (combined table) to CSV.
    #[arg(long, value_name = "CSV")]
    pub export_applications: Option<PathBuf>,

    /// Export the dye degradation time course to CSV.
    #[arg(long, value_name = "CSV")]
    pub export_degradation: Option<PathBuf>,

    /// Write both CSV exports into this directory using their default file names.
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// With `--out-dir`, also write one CSV per assay.
    #[arg(long, requires = "out_dir")]
    pub separate: bool,

    /// Export configuration + all datasets to a JSON bundle.
    #[arg(long, value_name = "JSON")]
    pub export_bundle: Option<PathBuf>,

    /// Write a timestamped Markdown report into this directory.
    #[arg(long, value_name = "DIR")]
    pub report: Option<PathBuf>,
}

/// Options for plotting saved data.
#[derive(Debug, Args, Clone)]
pub struct PlotArgs {
    /// Bundle JSON produced by `agnp simulate --export-bundle`.
    #[arg(long, value_name = "JSON", conflicts_with = "csv", required_unless_present = "csv")]
    pub bundle: Option<PathBuf>,

    /// CSV produced by an export (requires `--assay`).
    #[arg(long, value_name = "CSV", requires = "assay")]
    pub csv: Option<PathBuf>,

    /// Which assay to plot (all assays in the bundle when omitted).
    #[arg(long, value_enum)]
    pub assay: Option<AssayKind>,

    /// Plot width (columns).
    #[arg(long, default_value_t = 72)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 16)]
    pub height: usize,
}

/// Initialize `env_logger`; `RUST_LOG` overrides the verbosity-derived default.
pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).try_init();
}
