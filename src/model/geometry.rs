//! Raw geometry produced by the mesh parsers

use serde::{Deserialize, Serialize};

/// A vertex in 3D space, in millimeters
///
/// Serializes as a `[x, y, z]` array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct Vertex {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
    /// Z coordinate
    pub z: f64,
}

impl Vertex {
    /// Create a new vertex
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Whether all coordinates are finite
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<[f64; 3]> for Vertex {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self { x, y, z }
    }
}

impl From<Vertex> for [f64; 3] {
    fn from(v: Vertex) -> Self {
        [v.x, v.y, v.z]
    }
}

/// A polygonal face as zero-based indices into the owning object's vertices
pub type Face = Vec<usize>;

/// One named object found while parsing a mesh file
///
/// Face indices are always in range for `vertices`; parsers drop invalid
/// indices instead of failing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawGeometryObject {
    /// Object name, from a file marker or a generated default
    pub name: String,
    /// Vertices in file order
    pub vertices: Vec<Vertex>,
    /// Faces with at least three indices each
    pub faces: Vec<Face>,
    /// True when the geometry is a stand-in rather than decoded from the file
    pub synthetic: bool,
}

impl RawGeometryObject {
    /// Create an empty object with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Create an object carrying placeholder geometry
    pub fn synthetic(name: impl Into<String>, vertices: Vec<Vertex>, faces: Vec<Face>) -> Self {
        Self {
            name: name.into(),
            vertices,
            faces,
            synthetic: true,
        }
    }

    /// Drop out-of-range indices, then faces left with fewer than three
    pub fn retain_valid_faces(&mut self) {
        let vertex_count = self.vertices.len();
        for face in &mut self.faces {
            face.retain(|&index| index < vertex_count);
        }
        self.faces.retain(|face| face.len() >= 3);
    }
}
