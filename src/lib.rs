//! # orca3d
//!
//! A pure Rust implementation of furniture cost estimation from 3D models.
//!
//! This library reads an uploaded mesh file, splits it into named components
//! (doors, drawers, shelves, ...), estimates each component's surface area
//! from its bounding box and prices it against sheet material, hardware and
//! labor tables.
//!
//! ## Features
//!
//! - Pure Rust implementation with no unsafe code
//! - Parse OBJ, DAE (Collada), ASCII STL and PLY headers
//! - Name-based component classification with a single shared keyword table
//! - Deterministic pricing against substitutable price tables
//! - Markdown report and lossless JSON export of the priced budget
//!
//! Parsing never fails on malformed content: anything the parsers cannot
//! interpret becomes a fallback analysis with one placeholder component, so
//! a budget can always be produced. The only errors of the
//! analyze → price pipeline are an unsupported extension and an upload
//! above the size ceiling.
//!
//! ## Example
//!
//! ```
//! use orca3d::{AnalysisResult, BudgetResult, PricingConfiguration};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let obj = b"o Porta\nv 0 0 0\nv 450 0 0\nv 450 700 18\n";
//! let analysis = AnalysisResult::from_bytes("cozinha.obj", obj)?;
//! let budget = BudgetResult::from_analysis(&analysis, &PricingConfiguration::default());
//!
//! println!("{} components, R$ {:.2}", budget.components.len(), budget.summary.final_value);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod analyzer;
pub mod classifier;
pub mod engine;
pub mod error;
pub mod mesh_ops;
pub mod model;
pub mod parser;
pub mod plans;
pub mod pricing;
pub mod report;

pub use analyzer::{AnalysisStatistics, Analyzer, AnalyzerConfig, ComplexityLabel};
pub use classifier::{ComponentType, classify};
pub use engine::{CostEngine, CostInput, MaterialComparison};
pub use error::{Error, Result};
pub use model::{
    AccessoryQuality, AnalysisResult, AnalysisStatus, BudgetResult, BudgetSummary,
    ComplexityTier, ComponentCost, ComponentSummary, Face, FileFormat, Material,
    PricingConfiguration, RawGeometryObject, Vertex,
};
pub use plans::{Plan, ProjectQuota};
pub use pricing::{PriceCatalog, PriceTables};

use std::path::Path;

impl AnalysisResult {
    /// Analyze an upload with the default 500 MB ceiling
    ///
    /// # Arguments
    ///
    /// * `file_name` - Upload name; its extension selects the parser
    /// * `bytes` - File contents
    pub fn from_bytes(file_name: &str, bytes: &[u8]) -> Result<Self> {
        Analyzer::default().analyze(file_name, bytes)
    }

    /// Analyze a file on disk with the default 500 MB ceiling
    ///
    /// # Example
    ///
    /// ```no_run
    /// use orca3d::AnalysisResult;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let analysis = AnalysisResult::from_path("armario.stl")?;
    /// println!("{} components", analysis.components.len());
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Analyzer::default().analyze_path(path)
    }

    /// Counts, area and size label of this analysis
    pub fn statistics(&self) -> AnalysisStatistics {
        AnalysisStatistics::from_analysis(self)
    }
}

impl BudgetResult {
    /// Price an analysis with the default price tables
    pub fn from_analysis(analysis: &AnalysisResult, config: &PricingConfiguration) -> Self {
        CostEngine::default().compute_budget(analysis, config)
    }

    /// Render the Markdown report; empty for an empty budget
    pub fn to_report(&self, client: &str, environment: &str) -> String {
        report::render_report(self, client, environment)
    }

    /// Export as pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        report::to_json(self)
    }

    /// Read back a JSON export
    pub fn from_json(json: &str) -> Result<Self> {
        report::from_json(json)
    }
}

/// Analyze and price an upload in one call
///
/// # Example
///
/// ```
/// use orca3d::{estimate, PricingConfiguration};
///
/// let budget = estimate("vazio.obj", b"", &PricingConfiguration::default()).unwrap();
/// assert_eq!(budget.components.len(), 1);
/// ```
pub fn estimate(
    file_name: &str,
    bytes: &[u8],
    config: &PricingConfiguration,
) -> Result<BudgetResult> {
    let analysis = AnalysisResult::from_bytes(file_name, bytes)?;
    Ok(BudgetResult::from_analysis(&analysis, config))
}
