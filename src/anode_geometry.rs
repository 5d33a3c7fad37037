use crate::constants::{
    DEFAULT_ACD_CM, DEFAULT_ANODE_COUNT, DEFAULT_ANODE_HEIGHT_MM, DEFAULT_ANODE_LENGTH_MM,
    DEFAULT_ANODE_WIDTH_MM, DEFAULT_BAKE_TEMP_C, DEFAULT_CELL_CURRENT_KA,
    DEFAULT_IMMERSION_DEPTH_CM, DEFAULT_SPACINGS_CM, MM_TO_CM, TO_KELVIN,
};
use crate::error::{ModelError, Result};
use crate::math_utils::mean;
use crate::temp_utils::celsius_to_kelvin;
use serde::{Deserialize, Serialize};

/// Raw anode block dimensions and layout, before validation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnodeDimensions {
    pub length_new_mm: f64,
    pub length_spent_mm: f64,
    pub width_new_mm: f64,
    pub width_spent_mm: f64,
    pub height_mm: f64,
    pub immersion_depth_cm: f64,
    pub age_days: f64,
    pub anode_count: u32,
    /// S1..S4: gap to the neighbouring anode, or twice the gap to an insulating wall (cm).
    /// S1 and S2 face the anode ends, S3 and S4 its long sides.
    pub spacings_cm: [f64; 4],
    pub bake_temp_c: f64,
}

impl Default for AnodeDimensions {
    fn default() -> Self {
        Self {
            length_new_mm: DEFAULT_ANODE_LENGTH_MM,
            length_spent_mm: DEFAULT_ANODE_LENGTH_MM,
            width_new_mm: DEFAULT_ANODE_WIDTH_MM,
            width_spent_mm: DEFAULT_ANODE_WIDTH_MM,
            height_mm: DEFAULT_ANODE_HEIGHT_MM,
            immersion_depth_cm: DEFAULT_IMMERSION_DEPTH_CM,
            age_days: 0.0,
            anode_count: DEFAULT_ANODE_COUNT,
            spacings_cm: DEFAULT_SPACINGS_CM,
            bake_temp_c: DEFAULT_BAKE_TEMP_C,
        }
    }
}

fn require_positive(name: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ModelError::invalid(name, value, "must be a positive length"));
    }
    Ok(())
}

impl AnodeDimensions {
    fn validate(&self) -> Result<()> {
        require_positive("length_new_mm", self.length_new_mm)?;
        require_positive("length_spent_mm", self.length_spent_mm)?;
        require_positive("width_new_mm", self.width_new_mm)?;
        require_positive("width_spent_mm", self.width_spent_mm)?;
        require_positive("height_mm", self.height_mm)?;
        require_positive("immersion_depth_cm", self.immersion_depth_cm)?;

        if !self.age_days.is_finite() || self.age_days < 0.0 {
            return Err(ModelError::invalid("age_days", self.age_days, "age cannot be negative"));
        }
        if self.anode_count == 0 {
            return Err(ModelError::invalid("anode_count", 0.0, "at least one anode is required"));
        }

        const SPACING_NAMES: [&str; 4] = ["spacing_s1_cm", "spacing_s2_cm", "spacing_s3_cm", "spacing_s4_cm"];
        for (name, spacing) in SPACING_NAMES.into_iter().zip(self.spacings_cm) {
            if !spacing.is_finite() || spacing < 0.0 {
                return Err(ModelError::invalid(name, spacing, "spacing cannot be negative"));
            }
        }

        if !self.bake_temp_c.is_finite() || self.bake_temp_c <= -TO_KELVIN {
            return Err(ModelError::invalid(
                "bake_temp_c",
                self.bake_temp_c,
                "baking temperature must be above absolute zero",
            ));
        }
        Ok(())
    }
}

/// Validated anode geometry shared by every anode in the cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AnodeDimensions", into = "AnodeDimensions")]
pub struct AnodeGeometry {
    dimensions: AnodeDimensions,
}

impl TryFrom<AnodeDimensions> for AnodeGeometry {
    type Error = ModelError;

    fn try_from(dimensions: AnodeDimensions) -> Result<Self> {
        AnodeGeometry::new(dimensions)
    }
}

impl From<AnodeGeometry> for AnodeDimensions {
    fn from(geometry: AnodeGeometry) -> Self {
        geometry.dimensions
    }
}

impl AnodeGeometry {
    pub fn new(dimensions: AnodeDimensions) -> Result<Self> {
        dimensions.validate()?;
        Ok(Self { dimensions })
    }

    /// Replace the geometry. On error the current value is kept.
    pub fn set_dimensions(&mut self, dimensions: AnodeDimensions) -> Result<()> {
        dimensions.validate()?;
        self.dimensions = dimensions;
        Ok(())
    }

    pub fn dimensions(&self) -> &AnodeDimensions {
        &self.dimensions
    }

    pub fn anode_count(&self) -> u32 {
        self.dimensions.anode_count
    }

    pub fn spacings_cm(&self) -> [f64; 4] {
        self.dimensions.spacings_cm
    }

    pub fn immersion_depth_cm(&self) -> f64 {
        self.dimensions.immersion_depth_cm
    }

    /// Mean of new and spent anode length, cm.
    pub fn avg_length_cm(&self) -> f64 {
        mean(self.dimensions.length_new_mm, self.dimensions.length_spent_mm) * MM_TO_CM
    }

    /// Mean of new and spent anode width, cm.
    pub fn avg_width_cm(&self) -> f64 {
        mean(self.dimensions.width_new_mm, self.dimensions.width_spent_mm) * MM_TO_CM
    }

    /// Bottom area of the averaged anode, without any current spreading, cm².
    pub fn footprint_cm2(&self) -> f64 {
        self.avg_length_cm() * self.avg_width_cm()
    }

    /// Cross section of a single new anode, cm².
    pub fn new_anode_cross_section_cm2(&self) -> f64 {
        self.dimensions.length_new_mm * MM_TO_CM * self.dimensions.width_new_mm * MM_TO_CM
    }

    pub fn bake_temp_k(&self) -> f64 {
        celsius_to_kelvin(self.dimensions.bake_temp_c)
    }
}

/// Electrical operating point of the cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "OperatingPointFields", into = "OperatingPointFields")]
pub struct CellOperatingPoint {
    current_ka: f64,
    acd_cm: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
struct OperatingPointFields {
    current_ka: f64,
    acd_cm: f64,
}

impl Default for OperatingPointFields {
    fn default() -> Self {
        Self {
            current_ka: DEFAULT_CELL_CURRENT_KA,
            acd_cm: DEFAULT_ACD_CM,
        }
    }
}

impl TryFrom<OperatingPointFields> for CellOperatingPoint {
    type Error = ModelError;

    fn try_from(fields: OperatingPointFields) -> Result<Self> {
        CellOperatingPoint::new(fields.current_ka, fields.acd_cm)
    }
}

impl From<CellOperatingPoint> for OperatingPointFields {
    fn from(point: CellOperatingPoint) -> Self {
        Self {
            current_ka: point.current_ka,
            acd_cm: point.acd_cm,
        }
    }
}

impl Default for CellOperatingPoint {
    fn default() -> Self {
        Self {
            current_ka: DEFAULT_CELL_CURRENT_KA,
            acd_cm: DEFAULT_ACD_CM,
        }
    }
}

impl CellOperatingPoint {
    pub fn new(current_ka: f64, acd_cm: f64) -> Result<Self> {
        if !current_ka.is_finite() || current_ka < 0.0 {
            return Err(ModelError::invalid("current_ka", current_ka, "cell current cannot be negative"));
        }
        if !acd_cm.is_finite() || acd_cm <= 0.0 {
            return Err(ModelError::invalid("acd_cm", acd_cm, "anode-cathode distance must be positive"));
        }
        Ok(Self { current_ka, acd_cm })
    }

    pub fn current_ka(&self) -> f64 {
        self.current_ka
    }

    pub fn acd_cm(&self) -> f64 {
        self.acd_cm
    }
}
