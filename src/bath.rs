//! Bath model: electrical and chemical properties of the cryolite bath.
//!
//! Every quantity is derived on demand from a [`BathComposition`] snapshot.
//! The dependency order is
//! composition → solubility factors, bath ratio → saturation, cryolite ratio
//! → relative saturation, reaction limited current density → equilibrium potential.

use crate::bath_composition::BathComposition;
use crate::constants::{FARADAY_C_PER_MOL, GAS_CONSTANT_J_PER_MOL_K, TO_KELVIN};
use crate::error::{ModelError, Result};
use crate::math_utils::{checked_div, checked_ln, checked_powf};
use serde::{Deserialize, Serialize};

/// Empirical correlation used for bath electrical conductivity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConductivityCorrelation {
    /// Hives et al., exponential in composition and 1/T. https://doi.org/10.1007/BF02915051
    #[default]
    Hives,
    /// Chrenkova et al., polynomial in °C, AlF3, LiF and Al2O3 for low melting baths.
    Chrenkova,
    /// Linear in temperature, alumina, CaF2 and cryolite ratio.
    Arkp,
}

impl ConductivityCorrelation {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConductivityCorrelation::Hives => "hives",
            ConductivityCorrelation::Chrenkova => "chrenkova",
            ConductivityCorrelation::Arkp => "arkp",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "hives" => Some(ConductivityCorrelation::Hives),
            "chrenkova" => Some(ConductivityCorrelation::Chrenkova),
            "arkp" => Some(ConductivityCorrelation::Arkp),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BathModel {
    composition: BathComposition,
    correlation: ConductivityCorrelation,
}

impl BathModel {
    pub fn new(composition: BathComposition) -> Self {
        Self {
            composition,
            correlation: ConductivityCorrelation::default(),
        }
    }

    pub fn with_correlation(composition: BathComposition, correlation: ConductivityCorrelation) -> Self {
        Self {
            composition,
            correlation,
        }
    }

    pub fn composition(&self) -> &BathComposition {
        &self.composition
    }

    pub fn correlation(&self) -> ConductivityCorrelation {
        self.correlation
    }

    /// Bath electrical conductivity in S/cm using the selected correlation.
    pub fn conductivity(&self) -> Result<f64> {
        let kappa = match self.correlation {
            ConductivityCorrelation::Hives => self.conductivity_hives(),
            ConductivityCorrelation::Chrenkova => self.conductivity_chrenkova(),
            ConductivityCorrelation::Arkp => self.conductivity_arkp()?,
        };

        if !kappa.is_finite() {
            return Err(ModelError::domain(
                "bath conductivity",
                format!("{} correlation produced {kappa}", self.correlation.as_str()),
            ));
        }
        if kappa < 0.0 {
            return Err(ModelError::domain(
                "bath conductivity",
                format!(
                    "{} correlation is negative ({kappa:.4} S/cm) outside its fitted range",
                    self.correlation.as_str()
                ),
            ));
        }
        Ok(kappa)
    }

    fn conductivity_hives(&self) -> f64 {
        let c = &self.composition;
        (1.977 - 0.0200 * c.al2o3_wt_pct()
            - 0.0131 * c.alf3_wt_pct()
            - 0.0060 * c.caf2_wt_pct()
            - 0.0106 * c.mgf2_wt_pct()
            - 0.0019 * c.kf_wt_pct()
            + 0.0121 * c.lif_wt_pct()
            - 1204.3 / c.temperature_k())
        .exp()
    }

    fn conductivity_chrenkova(&self) -> f64 {
        let c = &self.composition;
        let t = c.temperature_c();
        let alf3 = c.alf3_wt_pct();
        let lif = c.lif_wt_pct();
        let al2o3 = c.al2o3_wt_pct();

        -7.332 + 1.742e-2 * t - 7.313e-6 * t.powi(2) - 1.866e-4 * alf3.powi(2) - 2.824e-5 * alf3 * t
            + 4.613e-2 * lif
            + 2.046e-4 * lif.powi(2)
            - 4.695e-5 * al2o3 * t
            + 2.462e-4 * alf3 * lif
            + 2.003e-3 * alf3 * al2o3
            - 5.546e-5 * alf3 * lif * al2o3
    }

    fn conductivity_arkp(&self) -> Result<f64> {
        let c = &self.composition;
        let cryolite_ratio = self.cryolite_ratio()?;
        Ok(-1.87 + 3.23e-3 * c.temperature_k() - 2.99e-2 * c.al2o3_wt_pct() + 0.470 * cryolite_ratio
            - 4.37e-2 * c.caf2_wt_pct())
    }

    /// Bath resistivity in Ω·cm.
    pub fn resistivity(&self) -> Result<f64> {
        let kappa = self.conductivity()?;
        checked_div("bath resistivity", 1.0, kappa)
    }

    /// Solubility factor A of the alumina saturation correlation.
    pub fn alumina_solubility_a(&self) -> Result<f64> {
        let c = &self.composition;
        let alf3 = c.alf3_wt_pct();
        let lif = c.lif_wt_pct();

        let denominator = 2000.0 + alf3 * lif;
        if denominator == 0.0 {
            return Err(ModelError::domain(
                "alumina solubility factor A",
                format!("AlF3·LiF = -2000 (AlF3 {alf3}, LiF {lif})"),
            ));
        }

        Ok(11.9 - 0.062 * alf3 - 0.0031 * alf3.powi(2) - 0.5 * lif - 0.2 * c.caf2_wt_pct()
            - 0.3 * c.mgf2_wt_pct()
            + (42.0 * lif * alf3) / denominator)
    }

    /// Solubility factor B (exponent) of the alumina saturation correlation.
    pub fn alumina_solubility_b(&self) -> Result<f64> {
        let c = &self.composition;
        let alf3 = c.alf3_wt_pct();
        let lif = c.lif_wt_pct();

        let denominator = 10.0 + lif + 0.001 * alf3;
        if denominator == 0.0 {
            return Err(ModelError::domain(
                "alumina solubility factor B",
                format!("10 + LiF + 0.001·AlF3 = 0 (AlF3 {alf3}, LiF {lif})"),
            ));
        }
        let lif_term = checked_powf("alumina solubility factor B", lif, 1.5)?;

        Ok(4.8 - 0.048 * alf3 + (2.2 * lif_term) / denominator)
    }

    /// Alumina content at saturation, wt%.
    pub fn alumina_saturation(&self) -> Result<f64> {
        let a = self.alumina_solubility_a()?;
        let b = self.alumina_solubility_b()?;
        let base = (self.composition.temperature_k() - TO_KELVIN) / 1000.0;

        if base <= 0.0 {
            return Err(ModelError::domain(
                "alumina saturation",
                format!(
                    "sub-freezing bath temperature ({:.2} K)",
                    self.composition.temperature_k()
                ),
            ));
        }
        Ok(a * checked_powf("alumina saturation", base, b)?)
    }

    /// Dissolved alumina as a fraction of its saturation value.
    pub fn relative_saturation(&self) -> Result<f64> {
        let saturation = self.alumina_saturation()?;
        if saturation <= 0.0 {
            return Err(ModelError::domain(
                "relative alumina saturation",
                format!("alumina saturation is non-positive ({saturation:.4} wt%)"),
            ));
        }
        Ok(self.composition.al2o3_wt_pct() / saturation)
    }

    /// Equilibrium (reversible) decomposition potential in volts.
    ///
    /// Haupin, "Interpreting the components of cell voltage", eq. 5.
    /// https://doi.org/10.1007/978-3-319-48156-2_21
    pub fn equilibrium_potential(&self) -> Result<f64> {
        let t = self.composition.temperature_k();
        let relative_saturation = self.relative_saturation()?;

        if relative_saturation >= 1.0 {
            return Err(ModelError::domain(
                "equilibrium potential",
                format!(
                    "bath at or above alumina saturation (relative saturation {relative_saturation:.4})"
                ),
            ));
        }
        let ln_term = checked_ln("equilibrium potential", 1.0 / relative_saturation)?;
        let activity_term = checked_powf("equilibrium potential", ln_term, 2.77)?;

        Ok(1.897 - 0.00056 * t
            + (GAS_CONSTANT_J_PER_MOL_K * t) / (12.0 * FARADAY_C_PER_MOL) * activity_term)
    }

    /// NaF/AlF3 weight ratio of the bath.
    ///
    /// Pure cryolite dissociates as Na3AlF6 = 3 NaF + AlF3, giving a weight
    /// ratio of 3·42/84 = 1.5; excess AlF3 lowers it.
    /// https://doi.org/10.1007/978-3-319-48156-2_118
    pub fn bath_ratio(&self) -> Result<f64> {
        let c = &self.composition;
        let remainder = 100.0 - c.caf2_wt_pct() - c.al2o3_wt_pct();
        checked_div(
            "bath ratio",
            1.5 * (remainder - c.alf3_wt_pct()),
            remainder + 1.5 * c.alf3_wt_pct(),
        )
    }

    /// NaF/AlF3 molar ratio (3.0 for pure cryolite).
    pub fn cryolite_ratio(&self) -> Result<f64> {
        Ok(2.0 * self.bath_ratio()?)
    }

    /// Current density at which the alumina reduction reaction becomes limiting, A/cm².
    ///
    /// Haupin, "Interpreting the components of cell voltage", eq. 25.
    pub fn reaction_limited_current_density(&self) -> Result<f64> {
        let c = &self.composition;
        let effective_alumina = c.al2o3_wt_pct() + c.lif_wt_pct() / 4.0;
        let ln_alumina = checked_ln("reaction limited current density", effective_alumina)?;
        let cryolite_ratio = self.cryolite_ratio()?;

        Ok((0.56 * ln_alumina + 0.276 * (cryolite_ratio - 1.5) - 5.849).exp())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bath_composition::BathAdditives;
    use crate::error::ErrorKind;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use more_asserts::assert_lt;

    fn bath_with(additives: BathAdditives, temperature_k: f64) -> BathModel {
        BathModel::new(BathComposition::new(additives, temperature_k).unwrap())
    }

    fn default_bath() -> BathModel {
        BathModel::new(BathComposition::default())
    }

    #[test]
    fn test_reference_conductivity() {
        let bath = default_bath();
        assert_abs_diff_eq!(bath.conductivity().unwrap(), 2.0944, epsilon = 1e-4);
        assert_abs_diff_eq!(bath.resistivity().unwrap(), 0.4775, epsilon = 1e-4);
    }

    #[test]
    fn test_conductivity_rises_with_temperature() {
        let cold = bath_with(BathAdditives::default(), 1220.0);
        let hot = bath_with(BathAdditives::default(), 1260.0);
        assert!(hot.conductivity().unwrap() > cold.conductivity().unwrap());
    }

    #[test]
    fn test_alternate_conductivity_correlations() {
        let c = BathComposition::default();
        let chrenkova = BathModel::with_correlation(c, ConductivityCorrelation::Chrenkova);
        let arkp = BathModel::with_correlation(c, ConductivityCorrelation::Arkp);

        assert_abs_diff_eq!(chrenkova.conductivity().unwrap(), 2.2613, epsilon = 1e-4);
        assert_abs_diff_eq!(arkp.conductivity().unwrap(), 2.7562, epsilon = 1e-4);
    }

    #[test]
    fn test_polynomial_correlation_outside_fitted_range() {
        // the Chrenkova polynomial turns negative far below the liquidus
        let cold = BathModel::with_correlation(
            BathComposition::new(BathAdditives::default(), 600.0).unwrap(),
            ConductivityCorrelation::Chrenkova,
        );
        assert_eq!(cold.conductivity().unwrap_err().kind(), ErrorKind::Domain);
        assert_eq!(cold.resistivity().unwrap_err().kind(), ErrorKind::Domain);
    }

    #[test]
    fn test_correlation_names_round_trip() {
        for c in [
            ConductivityCorrelation::Hives,
            ConductivityCorrelation::Chrenkova,
            ConductivityCorrelation::Arkp,
        ] {
            assert_eq!(ConductivityCorrelation::from_str(c.as_str()), Some(c));
        }
        assert_eq!(ConductivityCorrelation::from_str("ohm"), None);
    }

    #[test]
    fn test_solubility_factors() {
        let bath = default_bath();
        assert_abs_diff_eq!(bath.alumina_solubility_a().unwrap(), 9.442521, epsilon = 1e-9);
        assert_abs_diff_eq!(bath.alumina_solubility_b().unwrap(), 4.3056, epsilon = 1e-9);
        assert_abs_diff_eq!(bath.alumina_saturation().unwrap(), 8.0636, epsilon = 1e-4);
        assert_abs_diff_eq!(bath.relative_saturation().unwrap(), 0.5209, epsilon = 1e-4);
    }

    #[test]
    fn test_lithium_raises_saturation_exponent() {
        let lithium = bath_with(BathAdditives { lif_wt_pct: 3.0, ..BathAdditives::default() }, 1237.15);
        assert!(lithium.alumina_solubility_b().unwrap() > default_bath().alumina_solubility_b().unwrap());
    }

    #[test]
    fn test_sub_freezing_bath_temperature() {
        let bath = bath_with(BathAdditives::default(), 250.0);
        let err = bath.alumina_saturation().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Domain);
        assert!(err.to_string().contains("sub-freezing"));
    }

    #[test]
    fn test_reference_equilibrium_potential() {
        let bath = default_bath();
        assert_abs_diff_eq!(bath.equilibrium_potential().unwrap(), 1.2069, epsilon = 1e-4);
    }

    #[test]
    fn test_equilibrium_potential_rises_as_alumina_depletes() {
        let rich = bath_with(BathAdditives { al2o3_wt_pct: 6.0, ..BathAdditives::default() }, 1237.15);
        let lean = bath_with(BathAdditives { al2o3_wt_pct: 2.0, ..BathAdditives::default() }, 1237.15);
        assert!(lean.equilibrium_potential().unwrap() > rich.equilibrium_potential().unwrap());
    }

    #[test]
    fn test_supersaturated_bath_has_no_equilibrium_potential() {
        let bath = bath_with(BathAdditives { al2o3_wt_pct: 12.0, ..BathAdditives::default() }, 1237.15);
        assert!(bath.relative_saturation().unwrap() > 1.0);
        let err = bath.equilibrium_potential().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Domain);
        assert!(err.to_string().contains("at or above alumina saturation"));
    }

    #[test]
    fn test_alumina_free_bath_has_no_equilibrium_potential() {
        let bath = bath_with(BathAdditives { al2o3_wt_pct: 0.0, ..BathAdditives::default() }, 1237.15);
        assert_eq!(bath.equilibrium_potential().unwrap_err().kind(), ErrorKind::Domain);
    }

    #[test]
    fn test_bath_and_cryolite_ratio() {
        let bath = default_bath();
        assert_abs_diff_eq!(bath.bath_ratio().unwrap(), 1.1295, epsilon = 1e-4);
        assert_relative_eq!(bath.cryolite_ratio().unwrap(), 2.0 * bath.bath_ratio().unwrap());
    }

    #[test]
    fn test_pure_cryolite_bath_ratio() {
        let pure = BathAdditives {
            al2o3_wt_pct: 0.0,
            alf3_wt_pct: 0.0,
            caf2_wt_pct: 0.0,
            mgf2_wt_pct: 0.0,
            kf_wt_pct: 0.0,
            lif_wt_pct: 0.0,
        };
        let bath = bath_with(pure, 1273.15);
        assert_relative_eq!(bath.bath_ratio().unwrap(), 1.5, epsilon = 1e-12);
        assert_relative_eq!(bath.cryolite_ratio().unwrap(), 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_degenerate_bath_ratio_denominator() {
        // (100 - CaF2 - Al2O3) + 1.5·AlF3 = (100 - 130 - 0) + 1.5·20 = 0
        let degenerate = BathAdditives {
            al2o3_wt_pct: 0.0,
            alf3_wt_pct: 20.0,
            caf2_wt_pct: 130.0,
            ..BathAdditives::default()
        };
        let bath = bath_with(degenerate, 1237.15);
        assert_eq!(bath.bath_ratio().unwrap_err().kind(), ErrorKind::DivideByZero);
        assert_eq!(bath.cryolite_ratio().unwrap_err().kind(), ErrorKind::DivideByZero);
    }

    #[test]
    fn test_reaction_limited_current_density() {
        let bath = default_bath();
        assert_abs_diff_eq!(bath.reaction_limited_current_density().unwrap(), 0.00794, epsilon = 1e-5);
    }

    #[test]
    fn test_reaction_limit_without_alumina_or_lithium() {
        let bath = bath_with(
            BathAdditives { al2o3_wt_pct: 0.0, lif_wt_pct: 0.0, ..BathAdditives::default() },
            1237.15,
        );
        assert_eq!(bath.reaction_limited_current_density().unwrap_err().kind(), ErrorKind::Domain);

        // LiF alone keeps the logarithm defined
        let lithium = bath_with(
            BathAdditives { al2o3_wt_pct: 0.0, lif_wt_pct: 2.0, ..BathAdditives::default() },
            1237.15,
        );
        assert!(lithium.reaction_limited_current_density().is_ok());
    }

    #[test]
    fn test_vanishing_conductivity_has_no_resistivity() {
        // at a millikelvin the Hives exponential underflows to exactly zero
        let bath = bath_with(BathAdditives::default(), 1e-3);
        assert_eq!(bath.conductivity().unwrap(), 0.0);
        assert_eq!(bath.resistivity().unwrap_err().kind(), ErrorKind::DivideByZero);
    }

    #[test]
    fn test_negative_saturation_is_domain_error() {
        let bath = bath_with(
            BathAdditives {
                alf3_wt_pct: 60.0,
                ..BathAdditives::default()
            },
            1237.15,
        );
        assert_lt!(bath.alumina_saturation().unwrap(), 0.0);
        assert_eq!(bath.relative_saturation().unwrap_err().kind(), ErrorKind::Domain);

        let err = bath.equilibrium_potential().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Domain);
        assert!(err.to_string().contains("relative alumina saturation"));
    }
}
