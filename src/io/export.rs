//! Export response datasets to CSV (and read them back).
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.
//! Values are written with the shortest representation that parses back to the same
//! `f64`, so an exported file carries exactly the numbers that were charted.

use std::path::Path;

use crate::domain::{AssayKind, DataPoint, DatasetMeta, ResponseDataset};
use crate::error::{AppError, EngineError};

/// Default file name for the combined concentration assays.
pub const APPLICATIONS_FILE_NAME: &str = "agnp_applications.csv";
/// Default file name for the dye degradation time course.
pub const DEGRADATION_FILE_NAME: &str = "dye_degradation.csv";

/// Default file name when an assay is exported on its own.
pub fn file_name_for(kind: AssayKind) -> &'static str {
    match kind {
        AssayKind::Antibacterial => "agnp_antibacterial.csv",
        AssayKind::BiofilmInhibition => "agnp_biofilm_inhibition.csv",
        AssayKind::Antioxidant => "agnp_antioxidant.csv",
        AssayKind::PhotocatalyticDegradation => DEGRADATION_FILE_NAME,
    }
}

/// Serialize one dataset: an `x,y` header followed by one row per point, in order.
pub fn format_dataset(dataset: &ResponseDataset) -> Result<String, EngineError> {
    let mut wtr = csv_writer();
    wtr.write_record([dataset.meta.x_header(), dataset.meta.y_header()])
        .map_err(|e| EngineError::format(format!("failed to write CSV header: {e}")))?;

    for p in &dataset.points {
        wtr.write_record([p.x.to_string(), p.y.to_string()])
            .map_err(|e| EngineError::format(format!("failed to write CSV row: {e}")))?;
    }

    finish(wtr)
}

/// Serialize several datasets that share one x-sequence as a single table.
///
/// This is the "applications" layout: the shared concentration column followed by
/// one response column per assay.
pub fn format_combined(datasets: &[&ResponseDataset]) -> Result<String, EngineError> {
    let Some(first) = datasets.first() else {
        return Err(EngineError::format("no datasets to export"));
    };
    let x_header = first.meta.x_header();
    for ds in &datasets[1..] {
        if ds.meta.x_header() != x_header || ds.len() != first.len() {
            return Err(EngineError::format(format!(
                "cannot combine {} with {}: x columns differ",
                first.kind().display_name(),
                ds.kind().display_name()
            )));
        }
        if ds.points.iter().zip(&first.points).any(|(a, b)| a.x != b.x) {
            return Err(EngineError::format(format!(
                "cannot combine {} with {}: x values differ",
                first.kind().display_name(),
                ds.kind().display_name()
            )));
        }
    }

    let mut wtr = csv_writer();
    let mut header = vec![x_header];
    header.extend(datasets.iter().map(|ds| ds.meta.y_header()));
    wtr.write_record(&header)
        .map_err(|e| EngineError::format(format!("failed to write CSV header: {e}")))?;

    for (i, p) in first.points.iter().enumerate() {
        let mut row = Vec::with_capacity(datasets.len() + 1);
        row.push(p.x.to_string());
        row.extend(datasets.iter().map(|ds| ds.points[i].y.to_string()));
        wtr.write_record(&row)
            .map_err(|e| EngineError::format(format!("failed to write CSV row: {e}")))?;
    }

    finish(wtr)
}

/// Parse a dataset for `kind` from CSV text produced by `format_dataset` or
/// `format_combined`.
///
/// The first column must be `kind`'s x column; the response column is located by its
/// header, so combined files can be read one assay at a time.
pub fn parse_dataset(text: &str, kind: AssayKind) -> Result<ResponseDataset, EngineError> {
    let meta = DatasetMeta::for_kind(kind);
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(text.as_bytes());

    let headers = rdr
        .headers()
        .map_err(|e| EngineError::format(format!("failed to read CSV header: {e}")))?
        .clone();

    let x_header = meta.x_header();
    if headers.get(0) != Some(x_header.as_str()) {
        return Err(EngineError::format(format!(
            "expected first column '{x_header}', found '{}'",
            headers.get(0).unwrap_or("")
        )));
    }
    let y_header = meta.y_header();
    let y_col = headers
        .iter()
        .position(|h| h == y_header)
        .ok_or_else(|| EngineError::format(format!("missing column '{y_header}'")))?;

    let mut points = Vec::new();
    for (line, record) in rdr.records().enumerate() {
        let record = record.map_err(|e| EngineError::format(format!("invalid CSV row: {e}")))?;
        let x = parse_field(&record, 0, line)?;
        let y = parse_field(&record, y_col, line)?;
        points.push(DataPoint { x, y });
    }

    Ok(ResponseDataset { meta, points })
}

/// Write already formatted CSV text to disk.
pub fn write_csv(path: &Path, text: &str) -> Result<(), AppError> {
    std::fs::write(path, text)
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV '{}': {e}", path.display())))?;
    log::info!("wrote {} ({} bytes)", path.display(), text.len());
    Ok(())
}

fn csv_writer() -> csv::Writer<Vec<u8>> {
    csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new())
}

fn finish(wtr: csv::Writer<Vec<u8>>) -> Result<String, EngineError> {
    let bytes = wtr
        .into_inner()
        .map_err(|e| EngineError::format(format!("failed to flush CSV: {e}")))?;
    String::from_utf8(bytes).map_err(|e| EngineError::format(format!("CSV is not valid UTF-8: {e}")))
}

fn parse_field(record: &csv::StringRecord, col: usize, line: usize) -> Result<f64, EngineError> {
    let raw = record
        .get(col)
        .ok_or_else(|| EngineError::format(format!("row {}: missing column {col}", line + 1)))?;
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|e| EngineError::format(format!("row {}: invalid number '{raw}': {e}", line + 1)))?;
    if !value.is_finite() {
        return Err(EngineError::format(format!("row {}: non-finite value '{raw}'", line + 1)));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::build;
    use crate::domain::{ModelParams, SweepConfig};
    use crate::sweep::generate;

    fn dataset(kind: AssayKind) -> ResponseDataset {
        let series = generate(&SweepConfig::new(0.0, 20.0, 10.0)).unwrap();
        build(kind, &series, &ModelParams::default()).unwrap()
    }

    #[test]
    fn format_writes_header_then_rows_in_order() {
        let ds = ResponseDataset {
            meta: DatasetMeta::for_kind(AssayKind::PhotocatalyticDegradation),
            points: vec![DataPoint { x: 0.0, y: 0.0 }, DataPoint { x: 5.0, y: 22.5 }],
        };
        let text = format_dataset(&ds).unwrap();
        assert_eq!(text, "Time (min),Dye Degradation (%)\n0,0\n5,22.5\n");
    }

    #[test]
    fn parse_inverts_format_exactly() {
        let ds = dataset(AssayKind::Antibacterial);
        let text = format_dataset(&ds).unwrap();
        assert_eq!(parse_dataset(&text, AssayKind::Antibacterial).unwrap(), ds);
    }

    #[test]
    fn combined_file_can_be_read_per_assay() {
        let zoi = dataset(AssayKind::Antibacterial);
        let biofilm = dataset(AssayKind::BiofilmInhibition);
        let rsa = dataset(AssayKind::Antioxidant);
        let text = format_combined(&[&zoi, &biofilm, &rsa]).unwrap();

        let first_line = text.lines().next().unwrap();
        assert_eq!(
            first_line,
            "Concentration (µg/ml),Zone of Inhibition (mm),Biofilm Inhibition (%),Antioxidant RSA (%)"
        );
        assert_eq!(text.lines().count(), 4);
        assert_eq!(parse_dataset(&text, AssayKind::BiofilmInhibition).unwrap(), biofilm);
    }

    #[test]
    fn combining_mismatched_sweeps_fails() {
        let zoi = dataset(AssayKind::Antibacterial);
        let degradation = dataset(AssayKind::PhotocatalyticDegradation);
        assert!(matches!(
            format_combined(&[&zoi, &degradation]),
            Err(EngineError::Format(_))
        ));
        assert!(matches!(format_combined(&[]), Err(EngineError::Format(_))));
    }

    #[test]
    fn parse_rejects_wrong_header_and_bad_numbers() {
        let text = "Time (min),Dye Degradation (%)\n0,0\n";
        assert!(matches!(
            parse_dataset(text, AssayKind::Antioxidant),
            Err(EngineError::Format(_))
        ));
        let text = "Time (min),Dye Degradation (%)\n0,abc\n";
        assert!(matches!(
            parse_dataset(text, AssayKind::PhotocatalyticDegradation),
            Err(EngineError::Format(_))
        ));
    }

    #[test]
    fn write_csv_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEGRADATION_FILE_NAME);
        let text = format_dataset(&dataset(AssayKind::PhotocatalyticDegradation)).unwrap();
        write_csv(&path, &text).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), text);
    }
}
