//! Wavefront OBJ parsing
//!
//! Only the statements needed for component decomposition are read:
//! `o`/`g` markers, `v` vertices and `f` faces. Everything else (normals,
//! texture coordinates, materials, smoothing groups) is ignored.
//!
//! A bare `o`/`g` line without a name is not a marker: the current object
//! stays open. Coordinates that do not parse to finite numbers (`nan`,
//! `inf`, `1e400`) make the whole `v` line malformed.

use super::text_lines;
use crate::error::Result;
use crate::model::{Face, RawGeometryObject, Vertex};

/// Object being accumulated between two markers
struct PendingObject {
    name: String,
    /// Global index of this object's first vertex
    first_vertex: usize,
    vertices: Vec<Vertex>,
    /// Global zero-based indices, rebased when the object is finished
    faces: Vec<Vec<i64>>,
}

impl PendingObject {
    fn new(name: String, first_vertex: usize) -> Self {
        Self {
            name,
            first_vertex,
            vertices: Vec::new(),
            faces: Vec::new(),
        }
    }

    fn finish(self) -> RawGeometryObject {
        let offset = self.first_vertex as i64;
        let faces = self
            .faces
            .into_iter()
            .map(|face| {
                face.into_iter()
                    .filter_map(|index| usize::try_from(index - offset).ok())
                    .collect::<Face>()
            })
            .collect();
        let mut object = RawGeometryObject {
            name: self.name,
            vertices: self.vertices,
            faces,
            synthetic: false,
        };
        object.retain_valid_faces();
        object
    }
}

/// Parse a `v x y z [w]` statement body
///
/// Returns `None` unless three coordinates parse to finite numbers.
fn parse_vertex(fields: &[&str]) -> Option<Vertex> {
    if fields.len() < 3 {
        return None;
    }
    let x = fields[0].parse::<f64>().ok()?;
    let y = fields[1].parse::<f64>().ok()?;
    let z = fields[2].parse::<f64>().ok()?;
    Some(Vertex::new(x, y, z)).filter(Vertex::is_finite)
}

/// Parse an `f` statement body into global zero-based indices
///
/// Each token may be `v`, `v/vt`, `v//vn` or `v/vt/vn`; only `v` is used.
/// Tokens that are not integers are skipped.
fn parse_face(fields: &[&str]) -> Vec<i64> {
    fields
        .iter()
        .filter_map(|token| token.split('/').next())
        .filter_map(|index| index.parse::<i64>().ok())
        .map(|index| index - 1)
        .collect()
}

/// Parse OBJ text into one object per `o`/`g` marker
///
/// Faces are rebased to the owning object's vertices; indices that fall
/// outside the object are dropped, and faces left with fewer than three
/// indices are dropped. Objects without vertices are skipped. When the file
/// has no markers but does have vertices, a single object named
/// `default_name` holds everything.
pub fn parse_obj(bytes: &[u8], default_name: &str) -> Result<Vec<RawGeometryObject>> {
    let text = String::from_utf8_lossy(bytes);

    let mut all_vertices: Vec<Vertex> = Vec::new();
    let mut all_faces: Vec<Vec<i64>> = Vec::new();
    let mut finished: Vec<RawGeometryObject> = Vec::new();
    let mut markers = 0usize;
    let mut current: Option<PendingObject> = None;
    let mut skipped_vertices = 0usize;

    for line in text_lines(&text) {
        let mut fields = line.split_whitespace();
        let Some(keyword) = fields.next() else {
            continue;
        };
        let rest: Vec<&str> = fields.collect();

        match keyword {
            "o" | "g" if !rest.is_empty() => {
                if let Some(done) = current.take() {
                    finished.push(done.finish());
                }
                markers += 1;
                current = Some(PendingObject::new(rest.join(" "), all_vertices.len()));
            }
            "v" => match parse_vertex(&rest) {
                Some(vertex) => {
                    all_vertices.push(vertex);
                    if let Some(object) = current.as_mut() {
                        object.vertices.push(vertex);
                    }
                }
                None => skipped_vertices += 1,
            },
            "f" => {
                let face = parse_face(&rest);
                if face.len() >= 3 {
                    if let Some(object) = current.as_mut() {
                        object.faces.push(face.clone());
                    }
                    all_faces.push(face);
                }
            }
            _ => {}
        }
    }

    if let Some(done) = current.take() {
        finished.push(done.finish());
    }

    if skipped_vertices > 0 {
        tracing::debug!(skipped_vertices, "skipped malformed OBJ vertex lines");
    }

    if markers == 0 && !all_vertices.is_empty() {
        let mut whole = PendingObject::new(default_name.to_string(), 0);
        whole.vertices = all_vertices;
        whole.faces = all_faces;
        finished.push(whole.finish());
    }

    finished.retain(|object| !object.vertices.is_empty());
    tracing::debug!(objects = finished.len(), markers, "parsed OBJ");
    Ok(finished)
}
