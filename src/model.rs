//! Data structures for analyses and budgets

pub mod analysis;
pub mod budget;
pub mod geometry;

pub use analysis::{AnalysisResult, AnalysisStatus, ComponentSummary, FileFormat};
pub use budget::{
    AccessoryQuality, BudgetResult, BudgetSummary, ComplexityTier, ComponentCost, Material,
    PricingConfiguration,
};
pub use geometry::{Face, RawGeometryObject, Vertex};
