//! Analysis results produced from an uploaded model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use super::geometry::{Face, Vertex};
use crate::classifier::ComponentType;
use crate::error::{Error, Result};

/// Supported mesh file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileFormat {
    /// Wavefront OBJ (text, object/group markers)
    #[serde(rename = "OBJ")]
    Obj,
    /// Collada DAE (XML scene)
    #[serde(rename = "DAE")]
    Dae,
    /// Stereolithography STL (ASCII or binary triangles)
    #[serde(rename = "STL")]
    Stl,
    /// Polygon File Format PLY (header + element payload)
    #[serde(rename = "PLY")]
    Ply,
}

impl FileFormat {
    /// All supported formats
    pub const ALL: [FileFormat; 4] = [
        FileFormat::Obj,
        FileFormat::Dae,
        FileFormat::Stl,
        FileFormat::Ply,
    ];

    /// Lowercase extension including the leading dot
    pub fn extension(&self) -> &'static str {
        match self {
            FileFormat::Obj => ".obj",
            FileFormat::Dae => ".dae",
            FileFormat::Stl => ".stl",
            FileFormat::Ply => ".ply",
        }
    }

    /// Resolve a format from an extension, with or without the dot
    pub fn from_extension(extension: &str) -> Option<Self> {
        let ext = extension.trim_start_matches('.').to_ascii_lowercase();
        match ext.as_str() {
            "obj" => Some(FileFormat::Obj),
            "dae" => Some(FileFormat::Dae),
            "stl" => Some(FileFormat::Stl),
            "ply" => Some(FileFormat::Ply),
            _ => None,
        }
    }

    /// Resolve a format from a file name
    ///
    /// Returns [`Error::UnsupportedFormat`] when the extension is missing or
    /// not one of the supported formats.
    pub fn from_file_name(file_name: &str) -> Result<Self> {
        let extension = Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("");
        Self::from_extension(extension).ok_or_else(|| {
            let shown = if extension.is_empty() {
                file_name.to_string()
            } else {
                format!(".{}", extension.to_ascii_lowercase())
            };
            Error::UnsupportedFormat(shown)
        })
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FileFormat::Obj => "OBJ",
            FileFormat::Dae => "DAE",
            FileFormat::Stl => "STL",
            FileFormat::Ply => "PLY",
        };
        f.write_str(label)
    }
}

/// Outcome tag of an analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalysisStatus {
    /// Components were derived from the file content
    #[serde(rename = "sucesso")]
    Success,
    /// Parsing failed or produced nothing; a placeholder component was used
    #[serde(rename = "fallback")]
    Fallback,
}

/// Summary of one furniture component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentSummary {
    /// Component name
    #[serde(rename = "nome")]
    pub name: String,
    /// Furniture category
    #[serde(rename = "tipo")]
    pub component_type: ComponentType,
    /// Vertices copied from the source object
    pub vertices: Vec<Vertex>,
    /// Faces copied from the source object
    pub faces: Vec<Face>,
    /// Bounding box extents (width, height, depth) in millimeters
    #[serde(rename = "dimensoes_mm")]
    pub dimensions_mm: [f64; 3],
    /// Estimated surface area in square meters, never below 0.1
    pub area_m2: f64,
    /// Number of vertices
    #[serde(rename = "num_vertices")]
    pub vertex_count: usize,
    /// Number of faces
    #[serde(rename = "num_faces")]
    pub face_count: usize,
    /// True when the geometry is a placeholder
    #[serde(rename = "geometria_sintetica", default)]
    pub synthetic_geometry: bool,
}

/// Result of analyzing one uploaded file
///
/// `components` is never empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Uploaded file name
    #[serde(rename = "arquivo")]
    pub file_name: String,
    /// Detected format
    #[serde(rename = "formato")]
    pub format: FileFormat,
    /// Sum of component vertex counts
    pub total_vertices: usize,
    /// Sum of component face counts
    pub total_faces: usize,
    /// Components in discovery order
    #[serde(rename = "componentes")]
    pub components: Vec<ComponentSummary>,
    /// When the analysis was produced
    #[serde(rename = "data_analise")]
    pub analyzed_at: DateTime<Utc>,
    /// Success or fallback
    pub status: AnalysisStatus,
    /// Explanation, present only for fallback analyses
    #[serde(rename = "observacao", default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl AnalysisResult {
    /// Whether this analysis used placeholder data
    pub fn is_fallback(&self) -> bool {
        self.status == AnalysisStatus::Fallback
    }

    /// Total estimated area across components
    pub fn total_area_m2(&self) -> f64 {
        self.components.iter().map(|c| c.area_m2).sum()
    }
}
