use crate::constants::KA_TO_A;
use crate::error::{ModelError, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Conductors between the anode riser and the carbon block, in current order.
#[derive(Hash, Eq, PartialEq, Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum AssemblyComponent {
    Riser = 0,
    Flexibles = 1,
    AnodeBridge = 2,
    Clamp = 3,
    AnodeRod = 4,
    Yoke = 5,
    Thimble = 6,
    AnodeBlock = 7,
}

impl AssemblyComponent {
    pub const COUNT: usize = 8;

    pub const ALL: [AssemblyComponent; AssemblyComponent::COUNT] = [
        AssemblyComponent::Riser,
        AssemblyComponent::Flexibles,
        AssemblyComponent::AnodeBridge,
        AssemblyComponent::Clamp,
        AssemblyComponent::AnodeRod,
        AssemblyComponent::Yoke,
        AssemblyComponent::Thimble,
        AssemblyComponent::AnodeBlock,
    ];

    pub fn as_index(self) -> usize {
        self as usize
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AssemblyComponent::Riser => "riser",
            AssemblyComponent::Flexibles => "flexibles",
            AssemblyComponent::AnodeBridge => "anode bridge",
            AssemblyComponent::Clamp => "clamp",
            AssemblyComponent::AnodeRod => "anode rod",
            AssemblyComponent::Yoke => "yoke",
            AssemblyComponent::Thimble => "thimble",
            AssemblyComponent::AnodeBlock => "anode block",
        }
    }
}

/// Reference resistances of the anode assembly, Ω.
pub static DEFAULT_RESISTANCES_OHM: Lazy<HashMap<AssemblyComponent, f64>> = Lazy::new(|| {
    use AssemblyComponent::*;
    let mut m = HashMap::new();

    m.insert(Riser, 8.1978e-8);
    m.insert(Flexibles, 8.1978e-8);
    m.insert(AnodeBridge, 0.0);
    m.insert(Clamp, 4.28571e-8);
    m.insert(AnodeRod, 3.95556e-8);
    m.insert(Yoke, 1.01087e-7);
    m.insert(Thimble, 0.0);
    m.insert(AnodeBlock, 5.36087e-7);

    m
});

/// Series resistance chain of the anode assembly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "HashMap<AssemblyComponent, f64>", into = "HashMap<AssemblyComponent, f64>")]
pub struct AnodeAssembly {
    /// Indexed by [`AssemblyComponent::as_index`]
    resistances_ohm: [f64; AssemblyComponent::COUNT],
}

impl Default for AnodeAssembly {
    fn default() -> Self {
        let mut resistances_ohm = [0.0; AssemblyComponent::COUNT];
        for (component, resistance) in DEFAULT_RESISTANCES_OHM.iter() {
            resistances_ohm[component.as_index()] = *resistance;
        }
        Self { resistances_ohm }
    }
}

impl TryFrom<HashMap<AssemblyComponent, f64>> for AnodeAssembly {
    type Error = ModelError;

    /// Components missing from the map keep their reference resistance.
    fn try_from(overrides: HashMap<AssemblyComponent, f64>) -> Result<Self> {
        let mut assembly = AnodeAssembly::default();
        for (component, resistance) in overrides {
            assembly.set_resistance(component, resistance)?;
        }
        Ok(assembly)
    }
}

impl From<AnodeAssembly> for HashMap<AssemblyComponent, f64> {
    fn from(assembly: AnodeAssembly) -> Self {
        AssemblyComponent::ALL
            .into_iter()
            .map(|component| (component, assembly.resistance(component)))
            .collect()
    }
}

impl AnodeAssembly {
    pub fn resistance(&self, component: AssemblyComponent) -> f64 {
        self.resistances_ohm[component.as_index()]
    }

    pub fn set_resistance(&mut self, component: AssemblyComponent, resistance_ohm: f64) -> Result<()> {
        if !resistance_ohm.is_finite() || resistance_ohm < 0.0 {
            return Err(ModelError::invalid(
                "resistance_ohm",
                resistance_ohm,
                "component resistance cannot be negative",
            ));
        }
        self.resistances_ohm[component.as_index()] = resistance_ohm;
        Ok(())
    }

    pub fn total_resistance(&self) -> f64 {
        self.resistances_ohm.iter().sum()
    }

    /// Ohmic drop across each component at the given cell current, V.
    pub fn voltage_drops(&self, current_ka: f64) -> Vec<(AssemblyComponent, f64)> {
        let current_a = current_ka * KA_TO_A;
        AssemblyComponent::ALL
            .into_iter()
            .map(|component| (component, self.resistance(component) * current_a))
            .collect()
    }

    pub fn total_voltage_drop(&self, current_ka: f64) -> f64 {
        self.total_resistance() * current_ka * KA_TO_A
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_every_component_has_a_reference_resistance() {
        for component in AssemblyComponent::ALL {
            assert!(DEFAULT_RESISTANCES_OHM.contains_key(&component), "{}", component.as_str());
        }
        assert_eq!(DEFAULT_RESISTANCES_OHM.len(), AssemblyComponent::COUNT);
    }

    #[test]
    fn test_reference_voltage_drop() {
        let assembly = AnodeAssembly::default();
        assert_abs_diff_eq!(assembly.total_resistance(), 8.835427e-7, epsilon = 1e-13);
        assert_abs_diff_eq!(assembly.total_voltage_drop(280.0), 0.24739, epsilon = 1e-5);

        let drops = assembly.voltage_drops(280.0);
        assert_eq!(drops.len(), AssemblyComponent::COUNT);
        let sum: f64 = drops.iter().map(|(_, v)| v).sum();
        assert_abs_diff_eq!(sum, assembly.total_voltage_drop(280.0), epsilon = 1e-12);

        let (component, block_drop) = drops[AssemblyComponent::AnodeBlock.as_index()];
        assert_eq!(component, AssemblyComponent::AnodeBlock);
        assert_abs_diff_eq!(block_drop, 5.36087e-7 * 280_000.0, epsilon = 1e-12);
    }

    #[test]
    fn test_negative_resistance_is_rejected() {
        let mut assembly = AnodeAssembly::default();
        let err = assembly.set_resistance(AssemblyComponent::Yoke, -1e-8).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParameter);
        assert_eq!(assembly.resistance(AssemblyComponent::Yoke), 1.01087e-7);
    }

    #[test]
    fn test_json_overrides_single_component() {
        let assembly: AnodeAssembly = serde_json::from_str(r#"{"thimble": 2.0e-8}"#).unwrap();
        assert_eq!(assembly.resistance(AssemblyComponent::Thimble), 2.0e-8);
        assert_eq!(assembly.resistance(AssemblyComponent::Riser), 8.1978e-8);
    }
}
