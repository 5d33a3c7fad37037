//! Whole-cell evaluation of an immutable [`CellSnapshot`].
//!
//! Every derived quantity is computed on its own and kept as a separate
//! `Result`, so one quantity outside its correlation's domain does not hide
//! the others.

use crate::anode::{AnodeGeometryModel, ConcentrationLimitCorrelation};
use crate::anode_assembly::AnodeAssembly;
use crate::anode_geometry::{AnodeGeometry, CellOperatingPoint};
use crate::bath::{BathModel, ConductivityCorrelation};
use crate::bath_composition::BathComposition;
use crate::constants::DEFAULT_BUBBLE_LAYER_CM;
use crate::error::{ModelError, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Correlation choices and model constants that are not part of the cell itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ModelOptionsFields", into = "ModelOptionsFields")]
pub struct ModelOptions {
    conductivity: ConductivityCorrelation,
    concentration_limit: ConcentrationLimitCorrelation,
    bubble_layer_cm: f64,
}

#[derive(Serialize, Deserialize)]
#[serde(default)]
struct ModelOptionsFields {
    conductivity: ConductivityCorrelation,
    concentration_limit: ConcentrationLimitCorrelation,
    bubble_layer_cm: f64,
}

impl Default for ModelOptionsFields {
    fn default() -> Self {
        ModelOptions::default().into()
    }
}

impl TryFrom<ModelOptionsFields> for ModelOptions {
    type Error = ModelError;

    fn try_from(fields: ModelOptionsFields) -> Result<Self> {
        ModelOptions::new(fields.conductivity, fields.concentration_limit, fields.bubble_layer_cm)
    }
}

impl From<ModelOptions> for ModelOptionsFields {
    fn from(options: ModelOptions) -> Self {
        Self {
            conductivity: options.conductivity,
            concentration_limit: options.concentration_limit,
            bubble_layer_cm: options.bubble_layer_cm,
        }
    }
}

impl Default for ModelOptions {
    fn default() -> Self {
        Self {
            conductivity: ConductivityCorrelation::default(),
            concentration_limit: ConcentrationLimitCorrelation::default(),
            bubble_layer_cm: DEFAULT_BUBBLE_LAYER_CM,
        }
    }
}

fn validate_bubble_layer(bubble_layer_cm: f64) -> Result<()> {
    if !bubble_layer_cm.is_finite() || bubble_layer_cm < 0.0 {
        return Err(ModelError::invalid(
            "bubble_layer_cm",
            bubble_layer_cm,
            "bubble layer thickness cannot be negative",
        ));
    }
    Ok(())
}

impl ModelOptions {
    pub fn new(
        conductivity: ConductivityCorrelation,
        concentration_limit: ConcentrationLimitCorrelation,
        bubble_layer_cm: f64,
    ) -> Result<Self> {
        concentration_limit.validate()?;
        validate_bubble_layer(bubble_layer_cm)?;
        Ok(Self {
            conductivity,
            concentration_limit,
            bubble_layer_cm,
        })
    }

    pub fn with_conductivity(self, conductivity: ConductivityCorrelation) -> Self {
        Self { conductivity, ..self }
    }

    pub fn with_concentration_limit(self, concentration_limit: ConcentrationLimitCorrelation) -> Result<Self> {
        ModelOptions::new(self.conductivity, concentration_limit, self.bubble_layer_cm)
    }

    pub fn with_bubble_layer_cm(self, bubble_layer_cm: f64) -> Result<Self> {
        ModelOptions::new(self.conductivity, self.concentration_limit, bubble_layer_cm)
    }

    pub fn conductivity(&self) -> ConductivityCorrelation {
        self.conductivity
    }

    pub fn concentration_limit(&self) -> ConcentrationLimitCorrelation {
        self.concentration_limit
    }

    pub fn bubble_layer_cm(&self) -> f64 {
        self.bubble_layer_cm
    }
}

/// Everything needed to evaluate one cell state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CellSnapshot {
    pub bath: BathComposition,
    pub anode: AnodeGeometry,
    pub operating_point: CellOperatingPoint,
    pub options: ModelOptions,
    pub assembly: AnodeAssembly,
}

impl CellSnapshot {
    pub fn bath_model(&self) -> BathModel {
        BathModel::with_correlation(self.bath, self.options.conductivity())
    }

    pub fn anode_model(&self) -> AnodeGeometryModel {
        AnodeGeometryModel::with_concentration_limit(self.anode, self.options.concentration_limit())
    }

    /// Copy with a different alumina content; used for concentration sweeps.
    pub fn with_al2o3_wt_pct(&self, al2o3_wt_pct: f64) -> Result<Self> {
        Ok(Self {
            bath: self.bath.with_al2o3_wt_pct(al2o3_wt_pct)?,
            ..*self
        })
    }
}

/// Components of the modelled cell voltage, V.
#[derive(Debug, Clone, PartialEq)]
pub struct VoltageBreakdown {
    pub equilibrium_potential: Result<f64>,
    pub surface_overvoltage: Result<f64>,
    pub concentration_overvoltage: Result<f64>,
    pub bath_drop: Result<f64>,
    pub anode_assembly_drop: f64,
}

impl VoltageBreakdown {
    pub fn components(&self) -> [(&'static str, Result<f64>); 5] {
        [
            ("equilibrium potential", self.equilibrium_potential.clone()),
            ("surface overvoltage", self.surface_overvoltage.clone()),
            ("concentration overvoltage", self.concentration_overvoltage.clone()),
            ("bath drop", self.bath_drop.clone()),
            ("anode assembly drop", Ok(self.anode_assembly_drop)),
        ]
    }

    /// Sum of all components; the first failing component is returned instead.
    pub fn modelled_total(&self) -> Result<f64> {
        self.components()
            .into_iter()
            .map(|(_, value)| value)
            .sum()
    }
}

/// Derived quantities of one snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct CellEvaluation {
    pub snapshot: CellSnapshot,
    pub conductivity: Result<f64>,
    pub resistivity: Result<f64>,
    pub alumina_saturation: Result<f64>,
    pub relative_saturation: Result<f64>,
    pub bath_ratio: Result<f64>,
    pub cryolite_ratio: Result<f64>,
    pub reaction_limited_current_density: Result<f64>,
    pub footprint_cm2: f64,
    pub bath_effective_area_cm2: f64,
    pub current_density: Result<f64>,
    pub critical_current_density: Result<f64>,
    pub voltages: VoltageBreakdown,
}

fn record(quantity: &'static str, result: Result<f64>) -> Result<f64> {
    match &result {
        Ok(value) => debug!(quantity, value, "derived quantity"),
        Err(e) => warn!(quantity, error = %e, "derived quantity unavailable"),
    }
    result
}

/// Evaluate every derived quantity of the snapshot.
pub fn evaluate(snapshot: &CellSnapshot) -> CellEvaluation {
    let bath = snapshot.bath_model();
    let anode = snapshot.anode_model();
    let point = &snapshot.operating_point;

    let voltages = VoltageBreakdown {
        equilibrium_potential: record("equilibrium potential", bath.equilibrium_potential()),
        surface_overvoltage: record("surface overvoltage", anode.surface_overvoltage(point, &bath)),
        concentration_overvoltage: record(
            "concentration overvoltage",
            anode.concentration_overvoltage(point, &bath),
        ),
        bath_drop: record(
            "bath voltage drop",
            anode.bath_voltage_drop_with_bubble_layer(point, &bath, snapshot.options.bubble_layer_cm()),
        ),
        anode_assembly_drop: snapshot.assembly.total_voltage_drop(point.current_ka()),
    };

    CellEvaluation {
        snapshot: *snapshot,
        conductivity: record("conductivity", bath.conductivity()),
        resistivity: record("resistivity", bath.resistivity()),
        alumina_saturation: record("alumina saturation", bath.alumina_saturation()),
        relative_saturation: record("relative saturation", bath.relative_saturation()),
        bath_ratio: record("bath ratio", bath.bath_ratio()),
        cryolite_ratio: record("cryolite ratio", bath.cryolite_ratio()),
        reaction_limited_current_density: record(
            "reaction limited current density",
            bath.reaction_limited_current_density(),
        ),
        footprint_cm2: snapshot.anode.footprint_cm2(),
        bath_effective_area_cm2: anode.bath_effective_area(point.acd_cm()),
        current_density: record("current density", anode.current_density(point)),
        critical_current_density: record(
            "critical current density",
            anode.critical_current_density(point, &bath),
        ),
        voltages,
    }
}
