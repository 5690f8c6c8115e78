//! Upload admission, parsing and aggregation into an [`AnalysisResult`]
//!
//! The analyzer is the boundary between raw uploads and the cost engine.
//! Only two conditions are reported as errors, both before any parsing
//! happens: an unsupported file extension and an upload above the size
//! ceiling. Everything that goes wrong afterwards is absorbed into a
//! fallback analysis with a single placeholder component.
//!
//! # Example
//!
//! ```
//! use orca3d::analyzer::Analyzer;
//! use orca3d::AnalysisStatus;
//!
//! let obj = b"o Prateleira\nv 0 0 0\nv 800 0 0\nv 800 300 18\n";
//! let analysis = Analyzer::default().analyze("estante.obj", obj).unwrap();
//!
//! assert_eq!(analysis.status, AnalysisStatus::Success);
//! assert_eq!(analysis.components[0].name, "Prateleira");
//! ```

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::classifier::ComponentType;
use crate::error::{Error, Result};
use crate::mesh_ops::{placeholder_component, summarize};
use crate::model::{AnalysisResult, AnalysisStatus, ComponentSummary, FileFormat, RawGeometryObject};
use crate::parser::{ParseOutcome, base_name, parse_mesh};
use crate::plans::Plan;

/// Default upload ceiling in megabytes
pub const DEFAULT_MAX_UPLOAD_MB: u64 = 500;

/// Environment variable overriding the upload ceiling
pub const MAX_UPLOAD_ENV: &str = "ORCA_MAX_UPLOAD_MB";

const BYTES_PER_MB: u64 = 1024 * 1024;

/// Note attached to every fallback analysis
const FALLBACK_NOTE: &str = "Análise simplificada devido a limitações do formato";

/// Analyzer settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyzerConfig {
    max_upload_mb: u64,
}

impl AnalyzerConfig {
    /// Configuration with the default 500 MB ceiling
    pub fn new() -> Self {
        Self {
            max_upload_mb: DEFAULT_MAX_UPLOAD_MB,
        }
    }

    /// Set the upload ceiling in megabytes
    pub fn with_max_upload_mb(mut self, max_upload_mb: u64) -> Self {
        self.max_upload_mb = max_upload_mb;
        self
    }

    /// Use the upload ceiling of a subscription plan
    pub fn for_plan(plan: Plan) -> Self {
        Self::new().with_max_upload_mb(plan.upload_max_mb())
    }

    /// Read the ceiling from `ORCA_MAX_UPLOAD_MB`, keeping the default when
    /// the variable is unset or not a number
    pub fn from_env() -> Self {
        let max_upload_mb = std::env::var(MAX_UPLOAD_ENV)
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(DEFAULT_MAX_UPLOAD_MB);
        Self { max_upload_mb }
    }

    /// Upload ceiling in megabytes
    pub fn max_upload_mb(&self) -> u64 {
        self.max_upload_mb
    }

    /// Upload ceiling in bytes
    pub fn max_upload_bytes(&self) -> u64 {
        self.max_upload_mb.saturating_mul(BYTES_PER_MB)
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Turns uploads into analyses
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: AnalyzerConfig,
}

impl Analyzer {
    /// Create an analyzer
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    /// Analyzer settings
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Check an upload before parsing
    ///
    /// The size is checked first, then the extension. Returns the detected
    /// format.
    pub fn validate_upload(&self, file_name: &str, size_bytes: u64) -> Result<FileFormat> {
        if size_bytes > self.config.max_upload_bytes() {
            return Err(Error::FileTooLarge {
                size_bytes,
                limit_mb: self.config.max_upload_mb,
            });
        }
        FileFormat::from_file_name(file_name)
    }

    /// Validate and analyze an upload
    ///
    /// Fails only on admission rejections; see [`Analyzer::validate_upload`].
    pub fn analyze(&self, file_name: &str, bytes: &[u8]) -> Result<AnalysisResult> {
        let format = self.validate_upload(file_name, bytes.len() as u64)?;
        Ok(self.analyze_as(format, file_name, bytes))
    }

    /// Analyze bytes of an already-known format
    ///
    /// Never fails and never returns an analysis without components.
    pub fn analyze_as(&self, format: FileFormat, file_name: &str, bytes: &[u8]) -> AnalysisResult {
        let analysis = match parse_mesh(format, file_name, bytes) {
            ParseOutcome::Parsed(objects) => aggregate(file_name, format, objects),
            ParseOutcome::Fallback { reason } => fallback_analysis(file_name, format, &reason),
        };
        tracing::info!(
            file_name,
            %format,
            components = analysis.components.len(),
            vertices = analysis.total_vertices,
            faces = analysis.total_faces,
            fallback = analysis.is_fallback(),
            "analysis complete"
        );
        analysis
    }

    /// Validate and analyze a file on disk
    ///
    /// The size ceiling is checked against file metadata before reading.
    pub fn analyze_path<P: AsRef<Path>>(&self, path: P) -> Result<AnalysisResult> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        let size = std::fs::metadata(path)?.len();
        let format = self.validate_upload(&file_name, size)?;
        let bytes = std::fs::read(path)?;
        Ok(self.analyze_as(format, &file_name, &bytes))
    }

    /// Analyze independent uploads in parallel
    ///
    /// Results are returned in input order.
    pub fn analyze_batch<N, B>(&self, uploads: &[(N, B)]) -> Vec<Result<AnalysisResult>>
    where
        N: AsRef<str> + Sync,
        B: AsRef<[u8]> + Sync,
    {
        uploads
            .par_iter()
            .map(|(name, bytes)| self.analyze(name.as_ref(), bytes.as_ref()))
            .collect()
    }
}

/// Summarize parsed objects into an analysis
///
/// Falls back to a placeholder analysis when `objects` is empty.
pub fn aggregate(
    file_name: &str,
    format: FileFormat,
    objects: Vec<RawGeometryObject>,
) -> AnalysisResult {
    aggregate_at(file_name, format, objects, Utc::now())
}

/// [`aggregate`] with an explicit timestamp
pub fn aggregate_at(
    file_name: &str,
    format: FileFormat,
    objects: Vec<RawGeometryObject>,
    analyzed_at: DateTime<Utc>,
) -> AnalysisResult {
    if objects.is_empty() {
        return fallback_analysis_at(
            file_name,
            format,
            "no components could be derived from the file",
            analyzed_at,
        );
    }
    let components: Vec<ComponentSummary> = objects.into_iter().map(summarize).collect();
    AnalysisResult {
        file_name: file_name.to_string(),
        format,
        total_vertices: components.iter().map(|c| c.vertex_count).sum(),
        total_faces: components.iter().map(|c| c.face_count).sum(),
        components,
        analyzed_at,
        status: AnalysisStatus::Success,
        note: None,
    }
}

/// Placeholder analysis for a file that could not be parsed
///
/// Holds one synthetic component named after the file's base name,
/// classified from the file name, with a 2.0 m² area.
pub fn fallback_analysis(file_name: &str, format: FileFormat, reason: &str) -> AnalysisResult {
    fallback_analysis_at(file_name, format, reason, Utc::now())
}

/// [`fallback_analysis`] with an explicit timestamp
pub fn fallback_analysis_at(
    file_name: &str,
    format: FileFormat,
    reason: &str,
    analyzed_at: DateTime<Utc>,
) -> AnalysisResult {
    tracing::warn!(file_name, %format, reason, "using fallback analysis");
    let component = placeholder_component(&base_name(file_name));
    AnalysisResult {
        file_name: file_name.to_string(),
        format,
        total_vertices: component.vertex_count,
        total_faces: component.face_count,
        components: vec![component],
        analyzed_at,
        status: AnalysisStatus::Fallback,
        note: Some(format!("{} ({})", FALLBACK_NOTE, reason)),
    }
}

/// Coarse project size label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComplexityLabel {
    /// Up to five components
    #[serde(rename = "baixa")]
    Low,
    /// Six to ten components
    #[serde(rename = "media")]
    Medium,
    /// More than ten components
    #[serde(rename = "alta")]
    High,
}

/// Overview of an analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisStatistics {
    /// Number of components
    #[serde(rename = "total_componentes")]
    pub component_count: usize,
    /// Sum of component areas
    #[serde(rename = "area_total_m2")]
    pub total_area_m2: f64,
    /// Distinct categories, in declaration order
    #[serde(rename = "tipos_componentes")]
    pub component_types: Vec<ComponentType>,
    /// Size label from the component count
    #[serde(rename = "complexidade")]
    pub complexity: ComplexityLabel,
    /// File format
    #[serde(rename = "formato_arquivo")]
    pub format: FileFormat,
    /// Analysis status
    #[serde(rename = "status_analise")]
    pub status: AnalysisStatus,
}

impl AnalysisStatistics {
    /// Compute statistics for an analysis
    pub fn from_analysis(analysis: &AnalysisResult) -> Self {
        let component_count = analysis.components.len();
        let complexity = match component_count {
            n if n > 10 => ComplexityLabel::High,
            n if n > 5 => ComplexityLabel::Medium,
            _ => ComplexityLabel::Low,
        };
        let component_types = ComponentType::ALL
            .into_iter()
            .filter(|kind| analysis.components.iter().any(|c| c.component_type == *kind))
            .collect();
        Self {
            component_count,
            total_area_m2: analysis.total_area_m2(),
            component_types,
            complexity,
            format: analysis.format,
            status: analysis.status,
        }
    }
}
