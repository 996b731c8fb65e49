//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and the optional TOML config
//! - runs the simulation pipeline
//! - prints summaries/tables/plots
//! - writes optional exports

use std::io::IsTerminal;
use std::path::Path;

use clap::Parser;

use crate::cli::config::FileConfig;
use crate::cli::{Command, PlotArgs, SimArgs, SimulateArgs, init_logging};
use crate::domain::{AssayKind, ResponseDataset, SimConfig};
use crate::error::AppError;
use crate::io::export::{
    APPLICATIONS_FILE_NAME, DEGRADATION_FILE_NAME, file_name_for, format_dataset, parse_dataset, write_csv,
};

pub mod pipeline;

use pipeline::SimulationRun;

/// Entry point for the `agnp` binary.
pub fn run() -> Result<(), AppError> {
    // `.env` may carry RUST_LOG.
    dotenvy::dotenv().ok();

    // We want `agnp` and `agnp -m 150` to behave like `agnp tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    // Log lines would tear through the alternate screen.
    let is_tui = matches!(cli.command, Command::Tui(_));
    if !is_tui || !std::io::stderr().is_terminal() {
        init_logging(cli.verbose);
    }

    match cli.command {
        Command::Simulate(args) => handle_simulate(args),
        Command::Plot(args) => handle_plot(args),
        Command::Tui(args) => handle_tui(args),
    }
}

fn handle_simulate(args: SimulateArgs) -> Result<(), AppError> {
    let config = sim_config_from_args(&args.sim)?;
    let run = pipeline::run_simulation(&config)?;

    print!("{}", crate::report::format_run_summary(&run));

    if !args.no_table {
        println!("AgNPs applications data:");
        println!("{}", crate::report::format_applications_table(&run));
        println!("Dye degradation data:");
        println!(
            "{}",
            crate::report::format_dataset_table(run.dataset(AssayKind::PhotocatalyticDegradation))
        );
    }

    if args.plot && !args.no_plot {
        println!("{}", crate::plot::render_plots(run.datasets.iter(), args.width, args.height));
    }

    write_exports(&run, &args)
}

/// Write every export requested on the command line from the same run.
fn write_exports(run: &SimulationRun, args: &SimulateArgs) -> Result<(), AppError> {
    if let Some(path) = &args.export_applications {
        write_csv(path, &run.applications_csv()?)?;
    }
    if let Some(path) = &args.export_degradation {
        write_csv(path, &run.degradation_csv()?)?;
    }
    if let Some(dir) = &args.out_dir {
        export_to_dir(dir, run, args.separate)?;
    }
    if let Some(path) = &args.export_bundle {
        crate::io::bundle::write_bundle_json(path, run)?;
    }
    if let Some(dir) = &args.report {
        let path = crate::report::write_markdown_report(dir, run)?;
        println!("Wrote report: {}", path.display());
    }
    Ok(())
}

/// Write the default export files (and optionally one file per assay) into `dir`.
pub fn export_to_dir(dir: &Path, run: &SimulationRun, separate: bool) -> Result<(), AppError> {
    std::fs::create_dir_all(dir)
        .map_err(|e| AppError::new(2, format!("Failed to create export dir '{}': {e}", dir.display())))?;

    write_csv(&dir.join(APPLICATIONS_FILE_NAME), &run.applications_csv()?)?;
    write_csv(&dir.join(DEGRADATION_FILE_NAME), &run.degradation_csv()?)?;

    if separate {
        for kind in AssayKind::CONCENTRATION {
            write_csv(&dir.join(file_name_for(kind)), &format_dataset(run.dataset(kind))?)?;
        }
    }
    Ok(())
}

fn handle_tui(args: SimArgs) -> Result<(), AppError> {
    let config = sim_config_from_args(&args)?;
    crate::tui::run(config)
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let datasets: Vec<ResponseDataset> = match (&args.bundle, &args.csv) {
        (Some(path), _) => {
            let bundle = crate::io::bundle::read_bundle_json(path)?;
            match args.assay {
                Some(kind) => vec![bundle.dataset(kind).cloned().ok_or_else(|| {
                    AppError::new(2, format!("Bundle has no {} dataset.", kind.display_name()))
                })?],
                None => bundle.datasets,
            }
        }
        (None, Some(path)) => {
            let kind = args
                .assay
                .ok_or_else(|| AppError::new(2, "Plotting a CSV requires --assay."))?;
            let text = std::fs::read_to_string(path)
                .map_err(|e| AppError::new(2, format!("Failed to read CSV '{}': {e}", path.display())))?;
            vec![parse_dataset(&text, kind)?]
        }
        (None, None) => return Err(AppError::new(2, "Provide --bundle or --csv.")),
    };

    println!("{}", crate::plot::render_plots(datasets.iter(), args.width, args.height));
    Ok(())
}

/// Resolve the run configuration: CLI flag > TOML file > built-in default.
///
/// Validation happens once, in the pipeline.
pub fn sim_config_from_args(args: &SimArgs) -> Result<SimConfig, AppError> {
    let mut config = SimConfig::default();

    if let Some(path) = &args.config {
        FileConfig::from_file(path)?.apply(&mut config);
    }

    if let Some(v) = args.min_concentration {
        config.min_concentration = v;
    }
    if let Some(v) = args.max_concentration {
        config.max_concentration = v;
    }
    if let Some(v) = args.concentration_step {
        config.concentration_step = v;
    }
    if let Some(v) = args.decay_rate {
        config.params.decay.rate = v;
    }
    if let Some(v) = args.time_max {
        config.time_max = v;
    }
    if let Some(v) = args.time_step {
        config.time_step = v;
    }

    Ok(config)
}

/// Rewrite argv so `agnp` defaults to `agnp tui`.
///
/// Rules:
/// - `agnp`                       -> `agnp tui`
/// - `agnp -m 150 ...`            -> `agnp tui -m 150 ...`
/// - `agnp --help/--version/-h`   -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "simulate" | "plot" | "tui");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_opens_tui() {
        assert_eq!(rewrite_args(argv(&["agnp"])), argv(&["agnp", "tui"]));
        assert_eq!(
            rewrite_args(argv(&["agnp", "-m", "150"])),
            argv(&["agnp", "tui", "-m", "150"])
        );
        assert_eq!(
            rewrite_args(argv(&["agnp", "simulate", "-k", "0.1"])),
            argv(&["agnp", "simulate", "-k", "0.1"])
        );
        assert_eq!(rewrite_args(argv(&["agnp", "--help"])), argv(&["agnp", "--help"]));
    }

    #[test]
    fn flags_override_config_file_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agnp.toml");
        std::fs::write(&path, "[sweep]\nmax_concentration = 150.0\nconcentration_step = 5.0\n").unwrap();

        let args = SimArgs {
            config: Some(path),
            concentration_step: Some(2.0),
            ..SimArgs::default()
        };
        let config = sim_config_from_args(&args).unwrap();
        assert_eq!(config.max_concentration, 150.0);
        assert_eq!(config.concentration_step, 2.0);
        assert_eq!(config.params.decay.rate, 0.05);
    }

    #[test]
    fn export_to_dir_writes_default_files() {
        let run = pipeline::run_simulation(&SimConfig::default()).unwrap();
        let dir = tempfile::tempdir().unwrap();
        export_to_dir(dir.path(), &run, true).unwrap();

        let apps = std::fs::read_to_string(dir.path().join(APPLICATIONS_FILE_NAME)).unwrap();
        assert_eq!(apps, run.applications_csv().unwrap());
        let dye = std::fs::read_to_string(dir.path().join(DEGRADATION_FILE_NAME)).unwrap();
        assert_eq!(dye, run.degradation_csv().unwrap());
        assert!(dir.path().join("agnp_antioxidant.csv").exists());
    }
}
