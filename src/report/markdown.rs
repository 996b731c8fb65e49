//! Markdown report writer for sharing a simulation run.

use std::fs::{File, create_dir_all};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::app::pipeline::SimulationRun;
use crate::domain::{AssayKind, SaturationParams};
use crate::error::AppError;

/// Write a timestamped Markdown report into `dir` and return its path.
pub fn write_markdown_report(dir: &Path, run: &SimulationRun) -> Result<PathBuf, AppError> {
    create_dir_all(dir).map_err(|e| AppError::new(2, format!("Failed to create report dir: {e}")))?;

    let ts = Local::now().format("%Y%m%d_%H%M%S");
    let path = dir.join(format!("agnp_report_{ts}.md"));

    let mut file =
        File::create(&path).map_err(|e| AppError::new(2, format!("Failed to create report file: {e}")))?;
    file.write_all(render_markdown(run, &Local::now().to_rfc3339()).as_bytes())
        .map_err(|e| AppError::new(2, format!("Failed to write report: {e}")))?;

    log::info!("wrote report {}", path.display());
    Ok(path)
}

/// Render the report body. `generated` is printed verbatim in the header.
pub fn render_markdown(run: &SimulationRun, generated: &str) -> String {
    let config = &run.config;
    let mut out = String::new();

    out.push_str("# AgNP simulation report\n");
    out.push_str(&format!("- generated: {generated}\n"));
    out.push_str(&format!(
        "- concentration: {}..{} µg/ml, step {}\n",
        config.min_concentration, config.max_concentration, config.concentration_step
    ));
    out.push_str(&format!("- time: 0..{} min, step {}\n", config.time_max, config.time_step));
    out.push_str(&format!("- decay rate k: {:.3}\n", config.params.decay.rate));

    out.push_str("\n## Model constants\n");
    out.push_str("| assay | baseline | ceiling | half-saturation (µg/ml) |\n");
    out.push_str("| - | - | - | - |\n");
    for kind in AssayKind::CONCENTRATION {
        if let Some(p) = config.params.saturation(kind) {
            out.push_str(&saturation_row(kind, p));
        }
    }

    out.push_str("\n## Summary\n");
    for peak in &run.summary.peaks {
        out.push_str(&format!(
            "- max {}: {:.2} {} at {} µg/ml\n",
            peak.kind.meta().y_label,
            peak.max_y,
            peak.kind.meta().unit_y,
            peak.at_x
        ));
    }
    if let Some(end) = &run.summary.degradation {
        out.push_str(&format!(
            "- dye degradation after {} min: {:.2} %\n",
            end.time, end.degraded_pct
        ));
    }

    for ds in &run.datasets {
        out.push_str(&format!("\n## {}\n", ds.kind().display_name()));
        out.push_str(&format!("| {} | {} |\n", ds.meta.x_header(), ds.meta.y_header()));
        out.push_str("| - | - |\n");
        for p in &ds.points {
            out.push_str(&format!("| {} | {:.4} |\n", p.x, p.y));
        }
    }

    out
}

fn saturation_row(kind: AssayKind, p: &SaturationParams) -> String {
    format!(
        "| {} | {:.3} | {:.3} | {:.3} |\n",
        kind.display_name(),
        p.baseline,
        p.ceiling,
        p.half_saturation
    )
}
