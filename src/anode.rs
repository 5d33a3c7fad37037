//! Anode model: bath-effective anode area and the electrode overvoltages.
//!
//! Correlations from Haupin, "Interpreting the components of cell voltage"
//! (https://doi.org/10.1007/978-3-319-48156-2_21) and Grjotheim & Welch,
//! "Aluminium Smelter Technology", ch. 5.

use crate::anode_geometry::{AnodeGeometry, CellOperatingPoint};
use crate::bath::BathModel;
use crate::constants::{
    DEFAULT_ANODE_EFFECT_AL2O3_WT_PCT, DEFAULT_BUBBLE_LAYER_CM, FARADAY_C_PER_MOL,
    GAS_CONSTANT_J_PER_MOL_K, KA_TO_A, SURFACE_OVERVOLTAGE_MIN_CURRENT_DENSITY,
};
use crate::error::{ModelError, Result};
use crate::math_utils::{checked_div, checked_ln, checked_powf, checked_sqrt};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Empirical correlation used for the concentration (mass transfer) limited current density.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "correlation")]
pub enum ConcentrationLimitCorrelation {
    /// Grjotheim & Welch, ch. 5 eq. 13.
    #[default]
    GrjotheimWelch,
    /// Haupin eq. 19, calibrated with a cell design factor so that the limit
    /// equals the operating current density when the alumina content falls
    /// to `anode_effect_al2o3_wt_pct`.
    ///
    /// The limit scales with the operating current density, so at zero cell
    /// current it is zero as well and the concentration overvoltage is 0 V.
    Haupin { anode_effect_al2o3_wt_pct: f64 },
}

impl ConcentrationLimitCorrelation {
    pub fn haupin() -> Self {
        ConcentrationLimitCorrelation::Haupin {
            anode_effect_al2o3_wt_pct: DEFAULT_ANODE_EFFECT_AL2O3_WT_PCT,
        }
    }

    /// Haupin limit reaching the anode effect at the given alumina content.
    pub fn haupin_at(anode_effect_al2o3_wt_pct: f64) -> Result<Self> {
        let correlation = ConcentrationLimitCorrelation::Haupin {
            anode_effect_al2o3_wt_pct,
        };
        correlation.validate()?;
        Ok(correlation)
    }

    pub fn validate(&self) -> Result<()> {
        match *self {
            ConcentrationLimitCorrelation::GrjotheimWelch => Ok(()),
            ConcentrationLimitCorrelation::Haupin {
                anode_effect_al2o3_wt_pct,
            } => {
                if !anode_effect_al2o3_wt_pct.is_finite() || anode_effect_al2o3_wt_pct <= 0.0 {
                    return Err(ModelError::invalid(
                        "anode_effect_al2o3_wt_pct",
                        anode_effect_al2o3_wt_pct,
                        "anode-effect alumina content must be positive",
                    ));
                }
                Ok(())
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConcentrationLimitCorrelation::GrjotheimWelch => "grjotheim_welch",
            ConcentrationLimitCorrelation::Haupin { .. } => "haupin",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnodeGeometryModel {
    geometry: AnodeGeometry,
    concentration_limit: ConcentrationLimitCorrelation,
}

impl AnodeGeometryModel {
    pub fn new(geometry: AnodeGeometry) -> Self {
        Self {
            geometry,
            concentration_limit: ConcentrationLimitCorrelation::default(),
        }
    }

    pub fn with_concentration_limit(
        geometry: AnodeGeometry,
        concentration_limit: ConcentrationLimitCorrelation,
    ) -> Self {
        Self {
            geometry,
            concentration_limit,
        }
    }

    pub fn geometry(&self) -> &AnodeGeometry {
        &self.geometry
    }

    pub fn concentration_limit(&self) -> ConcentrationLimitCorrelation {
        self.concentration_limit
    }

    /// Extra bath width recruited on one side of the anode by current spreading, cm.
    ///
    /// Haupin eq. 34. `acd_cm` is the anode-cathode distance and `spacing_cm`
    /// the gap to the next anode (or twice the gap to an insulating wall).
    pub fn fanning_factor(&self, acd_cm: f64, spacing_cm: f64) -> f64 {
        let depth = self.geometry.immersion_depth_cm();
        let perimeter_half = self.geometry.avg_length_cm() + self.geometry.avg_width_cm();

        let gap_term = 0.1656 * acd_cm - 0.0043 * acd_cm.powi(3) + 0.1270 * spacing_cm
            - 0.0034 * spacing_cm.powi(2)
            + 0.0394 * acd_cm * spacing_cm;
        let block_term =
            0.3844 + 0.06166 * depth + 0.001822 * perimeter_half - 0.000178 * depth * perimeter_half;

        gap_term * block_term
    }

    /// Effective (length, width) of the anode bottom once the fanning factors are added, cm.
    ///
    /// S1 and S2 widen the anode length, S3 and S4 its width.
    pub fn effective_sides_cm(&self, acd_cm: f64) -> (f64, f64) {
        let [s1, s2, s3, s4] = self.geometry.spacings_cm();
        let f1 = self.fanning_factor(acd_cm, s1);
        let f2 = self.fanning_factor(acd_cm, s2);
        let f3 = self.fanning_factor(acd_cm, s3);
        let f4 = self.fanning_factor(acd_cm, s4);
        debug!(f1, f2, f3, f4, acd_cm, "fanning factors");

        (
            self.geometry.avg_length_cm() + f1 + f2,
            self.geometry.avg_width_cm() + f3 + f4,
        )
    }

    /// Anode bottom area that carries current through the bath, cm².
    pub fn bath_effective_area(&self, acd_cm: f64) -> f64 {
        let (length, width) = self.effective_sides_cm(acd_cm);
        length * width
    }

    /// Anodic current density over the bath-effective area, A/cm².
    pub fn current_density(&self, point: &CellOperatingPoint) -> Result<f64> {
        let (length, width) = self.effective_sides_cm(point.acd_cm());
        let area = length * width;
        let anode_count = self.geometry.anode_count();

        // two negative sides would give a positive but meaningless area
        if length <= 0.0 || width <= 0.0 {
            return Err(ModelError::divide_by_zero(
                "current density",
                format!(
                    "bath-effective area is degenerate ({length:.3} cm × {width:.3} cm) at ACD {} cm",
                    point.acd_cm()
                ),
            ));
        }
        if anode_count == 0 {
            return Err(ModelError::divide_by_zero("current density", "no anodes in the cell"));
        }

        let i = point.current_ka() * KA_TO_A / (area * anode_count as f64);
        debug!(area_cm2 = area, current_density = i, "anode current density");
        Ok(i)
    }

    /// Surface (reaction) overvoltage at the anode, V.
    ///
    /// Haupin eq. 26. The correlation is only valid above 0.01 A/cm²; lower
    /// current densities are reported instead of extrapolated.
    pub fn surface_overvoltage(&self, point: &CellOperatingPoint, bath: &BathModel) -> Result<f64> {
        let i = self.current_density(point)?;
        if i <= SURFACE_OVERVOLTAGE_MIN_CURRENT_DENSITY {
            return Err(ModelError::domain(
                "surface overvoltage",
                format!(
                    "current density {i:.4} A/cm² is below the {SURFACE_OVERVOLTAGE_MIN_CURRENT_DENSITY} A/cm² validity floor"
                ),
            ));
        }
        let i_rx = bath.reaction_limited_current_density()?;
        let bake_temp_k = self.geometry.bake_temp_k();

        Ok(1.142e-5
            * checked_ln("surface overvoltage", bake_temp_k)?
            * bath.composition().temperature_k()
            * checked_ln("surface overvoltage", i / i_rx)?)
    }

    /// Current density at which alumina mass transfer becomes limiting, A/cm²
    /// (Grjotheim & Welch correlation).
    pub fn concentration_limited_current_density(&self, bath: &BathModel, anode_count: u32) -> Result<f64> {
        let c = bath.composition();
        let anode_area = self.geometry.new_anode_cross_section_cm2() * anode_count as f64;
        if anode_area <= 0.0 {
            return Err(ModelError::domain(
                "concentration limited current density",
                format!("total anode cross section is {anode_area} cm²"),
            ));
        }

        let temperature_term = 5.5 + 0.018 * (c.temperature_k() - 1323.0);
        let area_term = checked_powf("concentration limited current density", anode_area, -0.1)?;
        let alumina_term = -0.4 + checked_sqrt("concentration limited current density", c.al2o3_wt_pct())?;

        let i_c = temperature_term * area_term * alumina_term;
        debug!(i_c, anode_area_cm2 = anode_area, "concentration limited current density");
        Ok(i_c)
    }

    /// Haupin cell design factor D_sn: scales eq. 19 so that the limit is reached
    /// at the anode-effect alumina concentration for the present current density.
    pub fn cell_design_factor(
        &self,
        point: &CellOperatingPoint,
        bath: &BathModel,
        anode_effect_al2o3_wt_pct: f64,
    ) -> Result<f64> {
        let i = self.current_density(point)?;
        let at_anode_effect = self.haupin_unscaled(bath, anode_effect_al2o3_wt_pct)?;
        checked_div("cell design factor", i, at_anode_effect)
    }

    /// Haupin eq. 19 without the design factor.
    fn haupin_unscaled(&self, bath: &BathModel, al2o3_wt_pct: f64) -> Result<f64> {
        let r = bath.cryolite_ratio()?;
        let c_a = 1.443 - 1.985 * r + 1.131 * r.powi(2);
        let c_b = 0.4122 - 0.2037 * r;
        let temperature_term = 0.00464 * bath.composition().temperature_c() - 3.454;
        let area_term = checked_powf(
            "concentration limited current density",
            self.geometry.new_anode_cross_section_cm2(),
            -0.1,
        )?;

        Ok(temperature_term * (c_a * al2o3_wt_pct + c_b * al2o3_wt_pct.powi(2)) * area_term)
    }

    fn concentration_limit_for(&self, point: &CellOperatingPoint, bath: &BathModel) -> Result<f64> {
        match self.concentration_limit {
            ConcentrationLimitCorrelation::GrjotheimWelch => {
                self.concentration_limited_current_density(bath, self.geometry.anode_count())
            }
            ConcentrationLimitCorrelation::Haupin {
                anode_effect_al2o3_wt_pct,
            } => {
                self.concentration_limit.validate()?;
                // i_c = f(Al2O3)·D_sn with D_sn = i / f(anode effect), kept as a ratio
                // so that i_c == i exactly when the bath sits at the anode-effect level
                let i = self.current_density(point)?;
                let present = self.haupin_unscaled(bath, bath.composition().al2o3_wt_pct())?;
                let at_anode_effect = self.haupin_unscaled(bath, anode_effect_al2o3_wt_pct)?;
                Ok(i * checked_div("cell design factor", present, at_anode_effect)?)
            }
        }
    }

    /// Concentration limited current density under the selected correlation, A/cm².
    pub fn critical_current_density(&self, point: &CellOperatingPoint, bath: &BathModel) -> Result<f64> {
        self.concentration_limit_for(point, bath)
    }

    /// Concentration (mass transfer) overvoltage at the anode, V.
    ///
    /// Operating at or beyond the limiting current density is the onset of an
    /// anode effect and is reported as a domain error.
    pub fn concentration_overvoltage(&self, point: &CellOperatingPoint, bath: &BathModel) -> Result<f64> {
        let i = self.current_density(point)?;
        let i_c = self.concentration_limit_for(point, bath)?;

        // the Haupin limit vanishes together with the current
        if i == 0.0 && matches!(self.concentration_limit, ConcentrationLimitCorrelation::Haupin { .. }) {
            return Ok(0.0);
        }
        if i_c <= 0.0 {
            return Err(ModelError::domain(
                "concentration overvoltage",
                format!("concentration limited current density is non-positive ({i_c:.4} A/cm²)"),
            ));
        }
        if i >= i_c {
            return Err(ModelError::domain(
                "concentration overvoltage",
                format!(
                    "current density {i:.4} A/cm² at or above the mass transfer limit {i_c:.4} A/cm² (anode effect)"
                ),
            ));
        }

        let t = bath.composition().temperature_k();
        Ok((GAS_CONSTANT_J_PER_MOL_K * t) / (2.0 * FARADAY_C_PER_MOL)
            * checked_ln("concentration overvoltage", i_c / (i_c - i))?)
    }

    /// Ohmic drop across the bath between anode and metal pad, V, with the
    /// default gas bubble layer under the anode.
    pub fn bath_voltage_drop(&self, point: &CellOperatingPoint, bath: &BathModel) -> Result<f64> {
        self.bath_voltage_drop_with_bubble_layer(point, bath, DEFAULT_BUBBLE_LAYER_CM)
    }

    /// Ohmic bath drop, V: `(i / κ)·(ACD − bubble layer)`.
    ///
    /// The bubble layer is treated as non-conducting and removed from the
    /// current path; an ACD no thicker than the layer is a domain error.
    pub fn bath_voltage_drop_with_bubble_layer(
        &self,
        point: &CellOperatingPoint,
        bath: &BathModel,
        bubble_layer_cm: f64,
    ) -> Result<f64> {
        if !bubble_layer_cm.is_finite() || bubble_layer_cm < 0.0 {
            return Err(ModelError::invalid(
                "bubble_layer_cm",
                bubble_layer_cm,
                "bubble layer thickness cannot be negative",
            ));
        }
        let bath_gap = point.acd_cm() - bubble_layer_cm;
        if bath_gap <= 0.0 {
            return Err(ModelError::domain(
                "bath voltage drop",
                format!(
                    "ACD {:.3} cm does not exceed the bubble layer {bubble_layer_cm:.3} cm",
                    point.acd_cm()
                ),
            ));
        }

        let i = self.current_density(point)?;
        let kappa = bath.conductivity()?;
        Ok(checked_div("bath voltage drop", i, kappa)? * bath_gap)
    }
}
