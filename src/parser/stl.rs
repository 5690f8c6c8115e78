//! STL (Stereolithography) parsing
//!
//! # Format Detection
//!
//! Input starting with `solid` is treated as ASCII; anything else as binary.
//! Binary payloads are recognized but not decoded: they always produce
//! [`Error::Unsupported`], which the analyzer turns into a fallback analysis.
//!
//! # ASCII Format
//!
//! ```text
//! solid name
//!   facet normal ni nj nk
//!     outer loop
//!       vertex v1x v1y v1z
//!       vertex v2x v2y v2z
//!       vertex v3x v3y v3z
//!     endloop
//!   endfacet
//! endsolid name
//! ```
//!
//! Every three consecutive `vertex` lines form one triangle. A `vertex`
//! line with a coordinate that is not a finite number is skipped.

use super::text_lines;
use crate::error::{Error, Result};
use crate::model::{Face, RawGeometryObject, Vertex};

/// ASCII signature at the start of a text STL
const ASCII_SIGNATURE: &[u8] = b"solid";

/// STL flavor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StlEncoding {
    /// Text STL (`solid ...`)
    Ascii,
    /// Binary STL (80-byte header, triangle records)
    Binary,
}

/// Detect ASCII vs binary from the leading signature
pub fn detect_stl_encoding(bytes: &[u8]) -> StlEncoding {
    if bytes.starts_with(ASCII_SIGNATURE) {
        StlEncoding::Ascii
    } else {
        StlEncoding::Binary
    }
}

/// Parse an STL file into a single object named `name`
///
/// Returns an empty list when an ASCII file contains no vertex.
pub fn parse_stl(bytes: &[u8], name: &str) -> Result<Vec<RawGeometryObject>> {
    match detect_stl_encoding(bytes) {
        StlEncoding::Ascii => parse_ascii(bytes, name),
        StlEncoding::Binary => Err(Error::Unsupported(
            "binary STL payloads are not decoded".to_string(),
        )),
    }
}

fn parse_ascii(bytes: &[u8], name: &str) -> Result<Vec<RawGeometryObject>> {
    let text = String::from_utf8_lossy(bytes);
    let mut vertices = Vec::new();

    for line in text_lines(&text) {
        let mut fields = line.split_whitespace();
        if fields.next() != Some("vertex") {
            continue;
        }
        let coords: Vec<f64> = fields.take(3).filter_map(|f| f.parse().ok()).collect();
        if let [x, y, z] = coords[..] {
            let vertex = Vertex::new(x, y, z);
            if vertex.is_finite() {
                vertices.push(vertex);
            }
        }
    }

    if vertices.is_empty() {
        return Ok(Vec::new());
    }

    let faces: Vec<Face> = (0..vertices.len())
        .collect::<Vec<_>>()
        .chunks_exact(3)
        .map(<[usize]>::to_vec)
        .collect();

    tracing::debug!(vertices = vertices.len(), faces = faces.len(), "parsed ASCII STL");
    Ok(vec![RawGeometryObject {
        name: name.to_string(),
        vertices,
        faces,
        synthetic: false,
    }])
}
