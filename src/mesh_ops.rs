//! Bounding-box geometry and component summaries
//!
//! This module provides the geometric side of the analysis:
//! - Axis-aligned bounding box of a vertex set
//! - Box surface-area estimate in square meters
//! - Conversion of a parsed object into a [`ComponentSummary`]
//! - Placeholder board geometry for formats whose payload is not decoded
//!
//! Areas are estimated from the bounding box rather than summed from the
//! faces, so partial or placeholder geometry still yields a usable value.

use nalgebra::Point3;

use crate::classifier::classify;
use crate::model::{ComponentSummary, Face, RawGeometryObject, Vertex};

/// Smallest area ever reported for a component
pub const MIN_AREA_M2: f64 = 0.1;

/// Area used when a component has no vertices
pub const DEFAULT_AREA_M2: f64 = 1.0;

/// Area of the placeholder component of a fallback analysis
pub const FALLBACK_AREA_M2: f64 = 2.0;

/// Extents used when a component has no vertices (a 1000×1000×20 mm board)
pub const DEFAULT_DIMENSIONS_MM: [f64; 3] = [1000.0, 1000.0, 20.0];

const MM2_PER_M2: f64 = 1_000_000.0;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Component-wise minimum
    pub min: Point3<f64>,
    /// Component-wise maximum
    pub max: Point3<f64>,
}

impl BoundingBox {
    /// Compute the bounding box of the finite vertices in `vertices`
    ///
    /// Returns `None` when there is no finite vertex.
    pub fn from_vertices(vertices: &[Vertex]) -> Option<Self> {
        let mut points = vertices
            .iter()
            .filter(|v| v.is_finite())
            .map(|v| Point3::new(v.x, v.y, v.z));
        let first = points.next()?;
        let (min, max) = points.fold((first, first), |(min, max), p| (min.inf(&p), max.sup(&p)));
        Some(Self { min, max })
    }

    /// Extents as absolute (width, height, depth)
    pub fn dimensions(&self) -> [f64; 3] {
        let d = self.max - self.min;
        [d.x.abs(), d.y.abs(), d.z.abs()]
    }
}

/// Surface area of a box with the given extents in millimeters, in m²
///
/// `2 * (w*h + w*d + h*d) / 1_000_000`, without any clamping.
pub fn box_surface_area_m2(dimensions_mm: [f64; 3]) -> f64 {
    let [w, h, d] = dimensions_mm.map(f64::abs);
    2.0 * (w * h + w * d + h * d) / MM2_PER_M2
}

/// Clamp an area to [`MIN_AREA_M2`]; NaN also maps to the minimum
pub fn clamp_area(area_m2: f64) -> f64 {
    if area_m2 >= MIN_AREA_M2 {
        area_m2
    } else {
        MIN_AREA_M2
    }
}

/// Round to a fixed number of decimal places
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Estimate extents and area of a vertex set
///
/// Returns the default board (1000×1000×20 mm, 1.0 m²) when there is no
/// usable vertex or the estimate overflows.
pub fn estimate_extents(vertices: &[Vertex]) -> ([f64; 3], f64) {
    let Some(bbox) = BoundingBox::from_vertices(vertices) else {
        return (DEFAULT_DIMENSIONS_MM, DEFAULT_AREA_M2);
    };
    let dimensions = bbox.dimensions();
    let area = box_surface_area_m2(dimensions);
    if !area.is_finite() {
        return (DEFAULT_DIMENSIONS_MM, DEFAULT_AREA_M2);
    }
    (dimensions, round_to(clamp_area(area), 3))
}

/// Turn a parsed object into a component summary
///
/// The category is derived from the object name. Vertices and faces are
/// moved into the summary unchanged.
pub fn summarize(object: RawGeometryObject) -> ComponentSummary {
    let (dimensions_mm, area_m2) = estimate_extents(&object.vertices);
    ComponentSummary {
        component_type: classify(&object.name),
        vertex_count: object.vertices.len(),
        face_count: object.faces.len(),
        name: object.name,
        vertices: object.vertices,
        faces: object.faces,
        dimensions_mm,
        area_m2,
        synthetic_geometry: object.synthetic,
    }
}

/// Corners of the placeholder board
const BOARD_CORNERS: [[f64; 3]; 8] = [
    [0.0, 0.0, 0.0],
    [1000.0, 0.0, 0.0],
    [1000.0, 1000.0, 0.0],
    [0.0, 1000.0, 0.0],
    [0.0, 0.0, 20.0],
    [1000.0, 0.0, 20.0],
    [1000.0, 1000.0, 20.0],
    [0.0, 1000.0, 20.0],
];

/// Triangles of the placeholder board (two per side)
const BOARD_TRIANGLES: [[usize; 3]; 12] = [
    [0, 1, 2],
    [0, 2, 3],
    [4, 7, 6],
    [4, 6, 5],
    [0, 4, 5],
    [0, 5, 1],
    [2, 6, 7],
    [2, 7, 3],
    [0, 3, 7],
    [0, 7, 4],
    [1, 5, 6],
    [1, 6, 2],
];

/// Placeholder vertices
///
/// At least the eight board corners; larger counts repeat the corners so the
/// bounding box stays that of the board.
pub fn placeholder_vertices(count: usize) -> Vec<Vertex> {
    BOARD_CORNERS
        .iter()
        .cycle()
        .take(count.max(BOARD_CORNERS.len()))
        .map(|&corner| Vertex::from(corner))
        .collect()
}

/// Placeholder faces over the board corners
///
/// At least the twelve board triangles; larger counts repeat them.
pub fn placeholder_faces(count: usize) -> Vec<Face> {
    BOARD_TRIANGLES
        .iter()
        .cycle()
        .take(count.max(BOARD_TRIANGLES.len()))
        .map(|triangle| triangle.to_vec())
        .collect()
}

/// Placeholder component used by fallback analyses
///
/// Named after the file, classified from the file name, with board
/// geometry and a fixed area of [`FALLBACK_AREA_M2`].
pub fn placeholder_component(name: &str) -> ComponentSummary {
    let vertices = placeholder_vertices(0);
    let faces = placeholder_faces(0);
    ComponentSummary {
        name: name.to_string(),
        component_type: classify(name),
        vertex_count: vertices.len(),
        face_count: faces.len(),
        vertices,
        faces,
        dimensions_mm: DEFAULT_DIMENSIONS_MM,
        area_m2: FALLBACK_AREA_M2,
        synthetic_geometry: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::ComponentType;

    fn board(w: f64, h: f64, d: f64) -> Vec<Vertex> {
        let mut vertices = Vec::new();
        for &x in &[0.0, w] {
            for &y in &[0.0, h] {
                for &z in &[0.0, d] {
                    vertices.push(Vertex::new(x, y, z));
                }
            }
        }
        vertices
    }

    #[test]
    fn test_bounding_box() {
        let bbox = BoundingBox::from_vertices(&board(600.0, 720.0, 18.0)).unwrap();
        assert_eq!(bbox.dimensions(), [600.0, 720.0, 18.0]);
        assert!(BoundingBox::from_vertices(&[]).is_none());
    }

    #[test]
    fn test_bounding_box_skips_non_finite() {
        let vertices = vec![
            Vertex::new(f64::NAN, 0.0, 0.0),
            Vertex::new(10.0, 10.0, 10.0),
            Vertex::new(-10.0, 0.0, 0.0),
        ];
        let bbox = BoundingBox::from_vertices(&vertices).unwrap();
        assert_eq!(bbox.dimensions(), [20.0, 10.0, 10.0]);
    }

    #[test]
    fn test_box_area() {
        // 1000 x 1000 x 20 mm -> 2 * (1.0 + 0.02 + 0.02) = 2.08 m²
        let area = box_surface_area_m2([1000.0, 1000.0, 20.0]);
        assert!((area - 2.08).abs() < 1e-12);
    }

    #[test]
    fn test_area_floor() {
        let (dims, area) = estimate_extents(&board(10.0, 10.0, 10.0));
        assert_eq!(dims, [10.0, 10.0, 10.0]);
        assert_eq!(area, MIN_AREA_M2);
        assert_eq!(clamp_area(f64::NAN), MIN_AREA_M2);
        assert_eq!(clamp_area(-3.0), MIN_AREA_M2);
    }

    #[test]
    fn test_degenerate_input_uses_default_board() {
        let (dims, area) = estimate_extents(&[]);
        assert_eq!(dims, DEFAULT_DIMENSIONS_MM);
        assert_eq!(area, DEFAULT_AREA_M2);

        let huge = vec![Vertex::new(-1e200, -1e200, 0.0), Vertex::new(1e200, 1e200, 0.0)];
        let (dims, area) = estimate_extents(&huge);
        assert_eq!(dims, DEFAULT_DIMENSIONS_MM);
        assert_eq!(area, DEFAULT_AREA_M2);
    }

    #[test]
    fn test_summarize() {
        let mut object = RawGeometryObject::new("Porta_Direita");
        object.vertices = board(450.0, 700.0, 18.0);
        object.faces = vec![vec![0, 1, 2]];
        let summary = summarize(object);

        assert_eq!(summary.component_type, ComponentType::Door);
        assert_eq!(summary.vertex_count, 8);
        assert_eq!(summary.face_count, 1);
        assert_eq!(summary.dimensions_mm, [450.0, 700.0, 18.0]);
        // 2 * (315000 + 8100 + 12600) / 1e6 = 0.6714 -> 0.671
        assert_eq!(summary.area_m2, 0.671);
        assert!(!summary.synthetic_geometry);
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(placeholder_vertices(0).len(), 8);
        assert_eq!(placeholder_vertices(20).len(), 20);
        assert_eq!(placeholder_faces(3).len(), 12);
        assert_eq!(placeholder_faces(30).len(), 30);

        let (dims, _) = estimate_extents(&placeholder_vertices(100));
        assert_eq!(dims, DEFAULT_DIMENSIONS_MM);

        let component = placeholder_component("gaveta");
        assert_eq!(component.component_type, ComponentType::Drawer);
        assert_eq!(component.area_m2, FALLBACK_AREA_M2);
        assert!(component.synthetic_geometry);
    }
}
