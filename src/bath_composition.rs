use crate::constants::{
    DEFAULT_AL2O3_WT_PCT, DEFAULT_ALF3_WT_PCT, DEFAULT_BATH_TEMP_K, DEFAULT_CAF2_WT_PCT,
    DEFAULT_KF_WT_PCT, DEFAULT_LIF_WT_PCT, DEFAULT_MGF2_WT_PCT,
};
use crate::error::{ModelError, Result};
use crate::temp_utils::kelvin_to_celsius;
use serde::{Deserialize, Serialize};

/// Mass fractions of the bath additives, in wt%. Cryolite makes up the balance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BathAdditives {
    pub al2o3_wt_pct: f64,
    pub alf3_wt_pct: f64,
    pub caf2_wt_pct: f64,
    pub mgf2_wt_pct: f64,
    pub kf_wt_pct: f64,
    pub lif_wt_pct: f64,
}

impl Default for BathAdditives {
    fn default() -> Self {
        Self {
            al2o3_wt_pct: DEFAULT_AL2O3_WT_PCT,
            alf3_wt_pct: DEFAULT_ALF3_WT_PCT,
            caf2_wt_pct: DEFAULT_CAF2_WT_PCT,
            mgf2_wt_pct: DEFAULT_MGF2_WT_PCT,
            kf_wt_pct: DEFAULT_KF_WT_PCT,
            lif_wt_pct: DEFAULT_LIF_WT_PCT,
        }
    }
}

impl BathAdditives {
    fn validate(&self) -> Result<()> {
        let fields = [
            ("al2o3_wt_pct", self.al2o3_wt_pct),
            ("alf3_wt_pct", self.alf3_wt_pct),
            ("caf2_wt_pct", self.caf2_wt_pct),
            ("mgf2_wt_pct", self.mgf2_wt_pct),
            ("kf_wt_pct", self.kf_wt_pct),
            ("lif_wt_pct", self.lif_wt_pct),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(ModelError::invalid(name, value, "mass fraction must be finite"));
            }
            if value < 0.0 {
                return Err(ModelError::invalid(name, value, "mass fraction cannot be negative"));
            }
        }
        Ok(())
    }
}

/// Chemical composition and temperature of the bath.
///
/// Mass fractions are only required to be non-negative. Values above 100 wt%
/// are physically implausible but are passed through to the correlations,
/// which either produce a number or a domain error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BathCompositionFields", into = "BathCompositionFields")]
pub struct BathComposition {
    additives: BathAdditives,
    temperature_k: f64,
}

/// Unvalidated wire form; deserialization is routed through [`BathComposition::new`].
#[derive(Serialize, Deserialize)]
#[serde(default)]
struct BathCompositionFields {
    #[serde(flatten)]
    additives: BathAdditives,
    temperature_k: f64,
}

impl Default for BathCompositionFields {
    fn default() -> Self {
        Self {
            additives: BathAdditives::default(),
            temperature_k: DEFAULT_BATH_TEMP_K,
        }
    }
}

impl TryFrom<BathCompositionFields> for BathComposition {
    type Error = ModelError;

    fn try_from(fields: BathCompositionFields) -> Result<Self> {
        BathComposition::new(fields.additives, fields.temperature_k)
    }
}

impl From<BathComposition> for BathCompositionFields {
    fn from(composition: BathComposition) -> Self {
        Self {
            additives: composition.additives,
            temperature_k: composition.temperature_k,
        }
    }
}

impl Default for BathComposition {
    fn default() -> Self {
        Self {
            additives: BathAdditives::default(),
            temperature_k: DEFAULT_BATH_TEMP_K,
        }
    }
}

fn validate_temperature(temperature_k: f64) -> Result<()> {
    if !temperature_k.is_finite() || temperature_k <= 0.0 {
        return Err(ModelError::invalid(
            "temperature_k",
            temperature_k,
            "bath temperature must be a positive number of kelvin",
        ));
    }
    Ok(())
}

impl BathComposition {
    pub fn new(additives: BathAdditives, temperature_k: f64) -> Result<Self> {
        additives.validate()?;
        validate_temperature(temperature_k)?;
        Ok(Self {
            additives,
            temperature_k,
        })
    }

    /// Replace the composition. On error the current value is kept.
    pub fn set_composition(&mut self, additives: BathAdditives) -> Result<()> {
        additives.validate()?;
        self.additives = additives;
        Ok(())
    }

    /// Replace the temperature. On error the current value is kept.
    pub fn set_temperature_k(&mut self, temperature_k: f64) -> Result<()> {
        validate_temperature(temperature_k)?;
        self.temperature_k = temperature_k;
        Ok(())
    }

    /// Copy with a different alumina content, validated like any other assignment.
    pub fn with_al2o3_wt_pct(&self, al2o3_wt_pct: f64) -> Result<Self> {
        let additives = BathAdditives {
            al2o3_wt_pct,
            ..self.additives
        };
        BathComposition::new(additives, self.temperature_k)
    }

    pub fn additives(&self) -> &BathAdditives {
        &self.additives
    }

    pub fn al2o3_wt_pct(&self) -> f64 {
        self.additives.al2o3_wt_pct
    }

    pub fn alf3_wt_pct(&self) -> f64 {
        self.additives.alf3_wt_pct
    }

    pub fn caf2_wt_pct(&self) -> f64 {
        self.additives.caf2_wt_pct
    }

    pub fn mgf2_wt_pct(&self) -> f64 {
        self.additives.mgf2_wt_pct
    }

    pub fn kf_wt_pct(&self) -> f64 {
        self.additives.kf_wt_pct
    }

    pub fn lif_wt_pct(&self) -> f64 {
        self.additives.lif_wt_pct
    }

    pub fn temperature_k(&self) -> f64 {
        self.temperature_k
    }

    pub fn temperature_c(&self) -> f64 {
        kelvin_to_celsius(self.temperature_k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_default_is_reference_bath() {
        let bath = BathComposition::default();
        assert_eq!(bath.al2o3_wt_pct(), 4.2);
        assert_eq!(bath.alf3_wt_pct(), 10.3);
        assert_eq!(bath.caf2_wt_pct(), 7.0);
        assert_eq!(bath.mgf2_wt_pct(), 0.3);
        assert_eq!(bath.kf_wt_pct(), 0.1);
        assert_eq!(bath.lif_wt_pct(), 0.0);
        assert!((bath.temperature_k() - 1237.15).abs() < 1e-9);
        assert!((bath.temperature_c() - 964.0).abs() < 1e-9);
    }

    #[test]
    fn test_negative_fraction_is_rejected() {
        let additives = BathAdditives {
            caf2_wt_pct: -0.5,
            ..BathAdditives::default()
        };
        let err = BathComposition::new(additives, 1237.15).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParameter);
        assert!(err.to_string().contains("caf2_wt_pct"));
    }

    #[test]
    fn test_fraction_above_100_is_passed_through() {
        let additives = BathAdditives {
            alf3_wt_pct: 140.0,
            ..BathAdditives::default()
        };
        let bath = BathComposition::new(additives, 1237.15).unwrap();
        assert_eq!(bath.alf3_wt_pct(), 140.0);
    }

    #[test]
    fn test_non_positive_temperature_is_rejected() {
        for t in [0.0, -10.0, f64::NAN, f64::INFINITY] {
            let err = BathComposition::new(BathAdditives::default(), t).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidParameter);
        }
    }

    #[test]
    fn test_failed_assignment_keeps_previous_value() {
        let mut bath = BathComposition::default();
        let bad = BathAdditives {
            al2o3_wt_pct: f64::NAN,
            ..BathAdditives::default()
        };
        assert!(bath.set_composition(bad).is_err());
        assert!(bath.set_temperature_k(-1.0).is_err());
        assert_eq!(bath, BathComposition::default());

        bath.set_temperature_k(1250.0).unwrap();
        assert_eq!(bath.temperature_k(), 1250.0);
    }

    #[test]
    fn test_json_round_trip_and_partial_override() {
        let bath = BathComposition::default();
        let json = serde_json::to_string(&bath).unwrap();
        assert!(json.contains("\"al2o3_wt_pct\":4.2"));
        let back: BathComposition = serde_json::from_str(&json).unwrap();
        assert_eq!(back, bath);

        let partial: BathComposition =
            serde_json::from_str(r#"{"lif_wt_pct": 2.0, "temperature_k": 1230.0}"#).unwrap();
        assert_eq!(partial.lif_wt_pct(), 2.0);
        assert_eq!(partial.alf3_wt_pct(), 10.3);
        assert_eq!(partial.temperature_k(), 1230.0);
    }

    #[test]
    fn test_json_is_validated() {
        let result: std::result::Result<BathComposition, _> =
            serde_json::from_str(r#"{"kf_wt_pct": -1.0}"#);
        assert!(result.is_err());
    }
}
