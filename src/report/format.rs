//! Formatted terminal output: run header, summary metrics and data tables.

use crate::app::pipeline::SimulationRun;
use crate::domain::{AssayKind, ResponseDataset};

/// Format the run header plus summary metrics.
pub fn format_run_summary(run: &SimulationRun) -> String {
    let config = &run.config;
    let mut out = String::new();

    out.push_str("=== agnp - Silver Nanoparticle Assay Simulation ===\n");
    out.push_str(&format!(
        "Concentration: [{}, {}] µg/ml, step {} ({} points)\n",
        config.min_concentration,
        config.max_concentration,
        config.concentration_step,
        run.dataset(AssayKind::Antibacterial).len(),
    ));
    out.push_str(&format!(
        "Time: [0, {}] min, step {} ({} points) | k = {:.3}\n",
        config.time_max,
        config.time_step,
        run.dataset(AssayKind::PhotocatalyticDegradation).len(),
        config.params.decay.rate,
    ));

    out.push_str("\nSummary:\n");
    for peak in &run.summary.peaks {
        let unit = peak.kind.meta().unit_y;
        let sep = if unit == "%" { "" } else { " " };
        out.push_str(&format!(
            "- Max {:<20} {:>7.1}{sep}{unit} at {:.0} µg/ml\n",
            format!("{}:", peak.kind.meta().y_label),
            peak.max_y,
            peak.at_x,
        ));
    }
    if let Some(end) = &run.summary.degradation {
        out.push_str(&format!(
            "- Dye degradation ({:.0} min): {:>6.1}% (rate {:.3})\n",
            end.time, end.degraded_pct, end.rate
        ));
    }
    out.push('\n');

    out
}

/// Format the concentration assays as one table sharing the concentration column.
pub fn format_applications_table(run: &SimulationRun) -> String {
    let datasets: Vec<&ResponseDataset> = AssayKind::CONCENTRATION
        .iter()
        .map(|&kind| run.dataset(kind))
        .collect();
    format_table(&datasets)
}

/// Format a single dataset as a two-column table.
pub fn format_dataset_table(dataset: &ResponseDataset) -> String {
    format_table(&[dataset])
}

/// Datasets must share their x-sequence; rows follow the first dataset.
fn format_table(datasets: &[&ResponseDataset]) -> String {
    let mut out = String::new();
    let Some(first) = datasets.first() else {
        return out;
    };

    let mut header = format!("{:>24}", first.meta.x_header());
    let mut rule = format!("{:->24}", "");
    for ds in datasets {
        header.push_str(&format!(" {:>26}", ds.meta.y_header()));
        rule.push_str(&format!(" {:->26}", ""));
    }
    out.push_str(header.trim_end());
    out.push('\n');
    out.push_str(&rule);
    out.push('\n');

    for (i, p) in first.points.iter().enumerate() {
        let mut row = format!("{:>24.2}", p.x);
        for ds in datasets {
            let y = ds.points.get(i).map(|q| q.y).unwrap_or(f64::NAN);
            row.push_str(&format!(" {y:>26.2}"));
        }
        out.push_str(row.trim_end());
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::run_simulation;
    use crate::domain::SimConfig;

    #[test]
    fn summary_mentions_every_assay() {
        let run = run_simulation(&SimConfig::default()).unwrap();
        let text = format_run_summary(&run);
        assert!(text.contains("Zone of Inhibition"));
        assert!(text.contains("Biofilm Inhibition"));
        assert!(text.contains("Antioxidant RSA"));
        assert!(text.contains("Dye degradation (60 min)"));
    }

    #[test]
    fn table_has_one_row_per_point() {
        let run = run_simulation(&SimConfig::default()).unwrap();
        let table = format_applications_table(&run);
        // header + rule + 11 rows
        assert_eq!(table.lines().count(), 13);
        let table = format_dataset_table(run.dataset(AssayKind::PhotocatalyticDegradation));
        assert_eq!(table.lines().count(), 15);
        assert!(table.lines().nth(2).unwrap().trim_start().starts_with("0.00"));
    }
}
