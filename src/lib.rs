pub mod constants;
pub mod error;
pub mod math_utils;
pub mod temp_utils;
pub mod bath_composition;
pub mod bath;
pub mod anode_geometry;
pub mod anode;
pub mod anode_assembly;
pub mod cell_evaluation;
pub mod report;
pub mod scenario;

pub use anode::{AnodeGeometryModel, ConcentrationLimitCorrelation};
pub use anode_assembly::{AnodeAssembly, AssemblyComponent};
pub use anode_geometry::{AnodeDimensions, AnodeGeometry, CellOperatingPoint};
pub use bath::{BathModel, ConductivityCorrelation};
pub use bath_composition::{BathAdditives, BathComposition};
pub use cell_evaluation::{evaluate, CellEvaluation, CellSnapshot, ModelOptions, VoltageBreakdown};
pub use error::{ErrorKind, ModelError, Result};
