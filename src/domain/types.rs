//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - built fresh on every recomputation
//! - exported to JSON/CSV
//! - reloaded later for plotting or comparisons

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Allowed range for the maximum concentration (µg/ml).
pub const CONCENTRATION_MAX_BOUNDS: (f64, f64) = (10.0, 200.0);
/// Allowed range for the concentration step size (µg/ml).
pub const CONCENTRATION_STEP_BOUNDS: (f64, f64) = (1.0, 20.0);
/// Allowed range for the first concentration of the sweep (µg/ml).
pub const CONCENTRATION_MIN_BOUNDS: (f64, f64) = (0.0, 200.0);
/// Allowed range for the first-order dye degradation rate constant.
pub const DECAY_RATE_BOUNDS: (f64, f64) = (0.01, 0.2);
/// Allowed range for the end of the degradation time sweep (min).
pub const TIME_MAX_BOUNDS: (f64, f64) = (5.0, 240.0);
/// Allowed range for the degradation time step (min).
pub const TIME_STEP_BOUNDS: (f64, f64) = (1.0, 30.0);

/// The four simulated assays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum AssayKind {
    /// Zone of inhibition against bacteria (mm).
    Antibacterial,
    /// Biofilm inhibition (%).
    #[value(alias = "biofilm")]
    BiofilmInhibition,
    /// Radical scavenging activity (RSA %).
    Antioxidant,
    /// Photocatalytic dye degradation over time (%).
    #[value(alias = "degradation")]
    PhotocatalyticDegradation,
}

/// Which independent variable an assay is swept over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndependentVariable {
    Concentration,
    Time,
}

/// Static labels, units and output bounds for an assay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssayMeta {
    pub x_label: &'static str,
    pub unit_x: &'static str,
    pub y_label: &'static str,
    pub unit_y: &'static str,
    /// Closed lower / upper output bound. Degradation never reaches its upper bound.
    pub bound: (f64, f64),
    pub variable: IndependentVariable,
}

impl AssayKind {
    /// All assays, in display/export order.
    pub const ALL: [AssayKind; 4] = [
        AssayKind::Antibacterial,
        AssayKind::BiofilmInhibition,
        AssayKind::Antioxidant,
        AssayKind::PhotocatalyticDegradation,
    ];

    /// Assays swept over concentration (the "applications" group).
    pub const CONCENTRATION: [AssayKind; 3] = [
        AssayKind::Antibacterial,
        AssayKind::BiofilmInhibition,
        AssayKind::Antioxidant,
    ];

    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            AssayKind::Antibacterial => "Antibacterial Activity",
            AssayKind::BiofilmInhibition => "Biofilm Inhibition",
            AssayKind::Antioxidant => "Antioxidant Activity",
            AssayKind::PhotocatalyticDegradation => "Photocatalytic Dye Degradation",
        }
    }

    /// Position of this assay in `AssayKind::ALL`.
    pub fn index(self) -> usize {
        match self {
            AssayKind::Antibacterial => 0,
            AssayKind::BiofilmInhibition => 1,
            AssayKind::Antioxidant => 2,
            AssayKind::PhotocatalyticDegradation => 3,
        }
    }

    pub fn meta(self) -> AssayMeta {
        match self {
            AssayKind::Antibacterial => AssayMeta {
                x_label: "Concentration",
                unit_x: "µg/ml",
                y_label: "Zone of Inhibition",
                unit_y: "mm",
                bound: (0.0, 30.0),
                variable: IndependentVariable::Concentration,
            },
            AssayKind::BiofilmInhibition => AssayMeta {
                x_label: "Concentration",
                unit_x: "µg/ml",
                y_label: "Biofilm Inhibition",
                unit_y: "%",
                bound: (0.0, 100.0),
                variable: IndependentVariable::Concentration,
            },
            AssayKind::Antioxidant => AssayMeta {
                x_label: "Concentration",
                unit_x: "µg/ml",
                y_label: "Antioxidant RSA",
                unit_y: "%",
                bound: (0.0, 100.0),
                variable: IndependentVariable::Concentration,
            },
            AssayKind::PhotocatalyticDegradation => AssayMeta {
                x_label: "Time",
                unit_x: "min",
                y_label: "Dye Degradation",
                unit_y: "%",
                bound: (0.0, 100.0),
                variable: IndependentVariable::Time,
            },
        }
    }
}

/// Min/max/step description of a sweep.
///
/// Constructed from user input on every recomputation; validated by
/// `sweep::generate`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl SweepConfig {
    pub fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }
}

/// Ordered, strictly increasing sweep values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndependentSeries(Vec<f64>);

impl IndependentSeries {
    /// Wrap values produced by the sweep generator.
    pub(crate) fn from_sorted(values: Vec<f64>) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.0.iter()
    }

    pub fn first(&self) -> Option<f64> {
        self.0.first().copied()
    }

    pub fn last(&self) -> Option<f64> {
        self.0.last().copied()
    }
}

/// Rate parameter for the first-order degradation model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecayConfig {
    pub rate: f64,
}

impl DecayConfig {
    pub fn new(rate: f64) -> Result<Self, EngineError> {
        let config = Self { rate };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        let (lo, hi) = DECAY_RATE_BOUNDS;
        if !(self.rate.is_finite() && self.rate >= lo && self.rate <= hi) {
            return Err(EngineError::domain(format!(
                "decay rate {} outside [{lo}, {hi}]",
                self.rate
            )));
        }
        Ok(())
    }
}

impl Default for DecayConfig {
    fn default() -> Self {
        Self { rate: 0.05 }
    }
}

/// Constants of a hyperbolic (Emax-type) dose-response curve.
///
/// `y(c) = baseline + (ceiling - baseline) * c / (half_saturation + c)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SaturationParams {
    /// Response at zero concentration.
    pub baseline: f64,
    /// Asymptotic response as concentration grows.
    pub ceiling: f64,
    /// Concentration at which half of `ceiling - baseline` is reached (µg/ml).
    pub half_saturation: f64,
}

impl SaturationParams {
    /// Check the constants against an assay's output bound.
    pub fn validate(&self, bound: (f64, f64)) -> Result<(), EngineError> {
        let Self {
            baseline,
            ceiling,
            half_saturation,
        } = *self;
        if !(baseline.is_finite() && ceiling.is_finite() && half_saturation.is_finite()) {
            return Err(EngineError::domain("saturation constants must be finite"));
        }
        if baseline < bound.0 || ceiling < baseline || ceiling > bound.1 {
            return Err(EngineError::domain(format!(
                "saturation constants need {} <= baseline ({baseline}) <= ceiling ({ceiling}) <= {}",
                bound.0, bound.1
            )));
        }
        if half_saturation <= 0.0 {
            return Err(EngineError::domain(format!(
                "half-saturation concentration must be > 0 (got {half_saturation})"
            )));
        }
        Ok(())
    }
}

/// Parameters for all four response models.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelParams {
    pub antibacterial: SaturationParams,
    pub biofilm: SaturationParams,
    pub antioxidant: SaturationParams,
    pub decay: DecayConfig,
}

impl ModelParams {
    /// Saturation constants for a concentration assay (`None` for degradation).
    pub fn saturation(&self, kind: AssayKind) -> Option<&SaturationParams> {
        match kind {
            AssayKind::Antibacterial => Some(&self.antibacterial),
            AssayKind::BiofilmInhibition => Some(&self.biofilm),
            AssayKind::Antioxidant => Some(&self.antioxidant),
            AssayKind::PhotocatalyticDegradation => None,
        }
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        for kind in AssayKind::CONCENTRATION {
            if let Some(params) = self.saturation(kind) {
                params
                    .validate(kind.meta().bound)
                    .map_err(|e| EngineError::domain(format!("{}: {e}", kind.display_name())))?;
            }
        }
        self.decay.validate()
    }
}

impl Default for ModelParams {
    /// Initial slopes match the linear terms of the classic quadratic fits
    /// (0.15 mm, 0.6 %, 0.7 % per µg/ml) while saturating instead of turning over.
    fn default() -> Self {
        Self {
            antibacterial: SaturationParams {
                baseline: 5.0,
                ceiling: 30.0,
                half_saturation: 25.0 / 0.15,
            },
            biofilm: SaturationParams {
                baseline: 20.0,
                ceiling: 100.0,
                half_saturation: 80.0 / 0.6,
            },
            antioxidant: SaturationParams {
                baseline: 10.0,
                ceiling: 100.0,
                half_saturation: 90.0 / 0.7,
            },
            decay: DecayConfig::default(),
        }
    }
}

/// One (x, y) observation of a response dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
}

/// Column names and units attached to a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetMeta {
    pub kind: AssayKind,
    pub x_label: String,
    pub unit_x: String,
    pub y_label: String,
    pub unit_y: String,
}

impl DatasetMeta {
    pub fn for_kind(kind: AssayKind) -> Self {
        let meta = kind.meta();
        Self {
            kind,
            x_label: meta.x_label.to_string(),
            unit_x: meta.unit_x.to_string(),
            y_label: meta.y_label.to_string(),
            unit_y: meta.unit_y.to_string(),
        }
    }

    /// Column header for the independent variable, e.g. `Concentration (µg/ml)`.
    pub fn x_header(&self) -> String {
        format!("{} ({})", self.x_label, self.unit_x)
    }

    /// Column header for the response, e.g. `Zone of Inhibition (mm)`.
    pub fn y_header(&self) -> String {
        format!("{} ({})", self.y_label, self.unit_y)
    }
}

/// A model evaluated over a sweep: one point per sweep value, in sweep order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseDataset {
    pub meta: DatasetMeta,
    pub points: Vec<DataPoint>,
}

impl ResponseDataset {
    pub fn kind(&self) -> AssayKind {
        self.meta.kind
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn xs(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.x).collect()
    }

    /// Points as `(x, y)` tuples, the shape chart backends consume.
    pub fn pairs(&self) -> Vec<(f64, f64)> {
        self.points.iter().map(|p| (p.x, p.y)).collect()
    }
}

/// A full run's configuration as understood by the pipeline.
///
/// Derived from CLI flags, an optional TOML file and defaults. The UI layer owns the
/// mutable copy; the engine only ever borrows it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    pub min_concentration: f64,
    pub max_concentration: f64,
    pub concentration_step: f64,
    pub time_max: f64,
    pub time_step: f64,
    pub params: ModelParams,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            min_concentration: 0.0,
            max_concentration: 100.0,
            concentration_step: 10.0,
            time_max: 60.0,
            time_step: 5.0,
            params: ModelParams::default(),
        }
    }
}

impl SimConfig {
    /// Validate the configuration against the UI bounds.
    pub fn validate(&self) -> Result<(), EngineError> {
        check_bounds("maximum concentration", self.max_concentration, CONCENTRATION_MAX_BOUNDS)?;
        check_bounds("concentration step", self.concentration_step, CONCENTRATION_STEP_BOUNDS)?;
        check_bounds("minimum concentration", self.min_concentration, CONCENTRATION_MIN_BOUNDS)?;
        if self.min_concentration > self.max_concentration {
            return Err(EngineError::invalid_range(format!(
                "minimum concentration {} exceeds maximum {}",
                self.min_concentration, self.max_concentration
            )));
        }
        check_bounds("time sweep end", self.time_max, TIME_MAX_BOUNDS)?;
        check_bounds("time step", self.time_step, TIME_STEP_BOUNDS)?;
        self.params.validate()
    }

    pub fn concentration_sweep(&self) -> SweepConfig {
        SweepConfig::new(self.min_concentration, self.max_concentration, self.concentration_step)
    }

    pub fn time_sweep(&self) -> SweepConfig {
        SweepConfig::new(0.0, self.time_max, self.time_step)
    }

    pub fn sweep_for(&self, kind: AssayKind) -> SweepConfig {
        match kind.meta().variable {
            IndependentVariable::Concentration => self.concentration_sweep(),
            IndependentVariable::Time => self.time_sweep(),
        }
    }
}

fn check_bounds(name: &str, value: f64, (lo, hi): (f64, f64)) -> Result<(), EngineError> {
    if !(value.is_finite() && value >= lo && value <= hi) {
        return Err(EngineError::invalid_range(format!(
            "{name} {value} outside [{lo}, {hi}]"
        )));
    }
    Ok(())
}
