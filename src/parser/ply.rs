//! PLY (Polygon File Format) header reading
//!
//! Only the header is interpreted. The declared vertex and face element
//! counts size a placeholder component; the element payload itself is not
//! decoded, so ASCII and binary PLY files are handled the same way.
//!
//! ```text
//! ply
//! format ascii 1.0
//! element vertex 8
//! property float x
//! ...
//! element face 12
//! property list uchar int vertex_indices
//! end_header
//! <payload>
//! ```

use crate::error::{Error, Result};
use crate::mesh_ops::{placeholder_faces, placeholder_vertices};
use crate::model::RawGeometryObject;

const MAGIC: &str = "ply";
const END_HEADER: &[u8] = b"end_header";

/// Element counts declared in a PLY header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlyHeader {
    /// `element vertex N`
    pub vertex_count: usize,
    /// `element face N`
    pub face_count: usize,
    /// Bytes following the `end_header` line
    pub payload_len: usize,
}

/// Read the header of a PLY file
///
/// Fails when the `ply` magic line or the `end_header` line is missing, or
/// when an element count is not an integer.
pub fn parse_ply_header(bytes: &[u8]) -> Result<PlyHeader> {
    let end = memchr::memmem::find(bytes, END_HEADER)
        .ok_or_else(|| Error::Parse("PLY header is missing 'end_header'".to_string()))?;
    let header_end = memchr::memchr(b'\n', &bytes[end..])
        .map(|p| end + p + 1)
        .unwrap_or(bytes.len());

    let text = String::from_utf8_lossy(&bytes[..end]);
    let mut lines = text.lines().map(str::trim).filter(|l| !l.is_empty());
    if lines.next() != Some(MAGIC) {
        return Err(Error::Parse("missing 'ply' signature".to_string()));
    }

    let mut header = PlyHeader {
        payload_len: bytes.len() - header_end,
        ..Default::default()
    };
    for line in lines {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if let ["element", kind, count] = fields[..] {
            let parsed = count
                .parse::<usize>()
                .map_err(|_| Error::parse_error_with_context("PLY element count", count, "integer"))?;
            match kind {
                "vertex" => header.vertex_count = parsed,
                "face" => header.face_count = parsed,
                _ => {}
            }
        }
    }
    Ok(header)
}

/// Build one placeholder component from a PLY header
///
/// Zero counts default to the 8-corner / 12-triangle board. Counts larger
/// than the payload could possibly encode are rejected.
pub fn parse_ply(bytes: &[u8], name: &str) -> Result<Vec<RawGeometryObject>> {
    let header = parse_ply_header(bytes)?;
    let largest = header.vertex_count.max(header.face_count);
    if largest > header.payload_len {
        return Err(Error::Parse(format!(
            "PLY header declares {} elements but only {} payload bytes follow",
            largest, header.payload_len
        )));
    }

    tracing::debug!(
        vertices = header.vertex_count,
        faces = header.face_count,
        "read PLY header"
    );
    Ok(vec![RawGeometryObject::synthetic(
        name,
        placeholder_vertices(header.vertex_count),
        placeholder_faces(header.face_count),
    )])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ply_with_payload(vertices: usize, faces: usize, payload: usize) -> Vec<u8> {
        let mut bytes = format!(
            "ply\nformat ascii 1.0\nelement vertex {}\nproperty float x\nelement face {}\nend_header\n",
            vertices, faces
        )
        .into_bytes();
        bytes.extend(std::iter::repeat_n(b'0', payload));
        bytes
    }

    #[test]
    fn test_header_counts() {
        let header = parse_ply_header(&ply_with_payload(20, 30, 100)).unwrap();
        assert_eq!(header.vertex_count, 20);
        assert_eq!(header.face_count, 30);
        assert_eq!(header.payload_len, 100);
    }

    #[test]
    fn test_placeholder_sized_from_header() {
        let objects = parse_ply(&ply_with_payload(20, 30, 100), "Estante").unwrap();
        assert_eq!(objects.len(), 1);
        assert_eq!(objects[0].name, "Estante");
        assert_eq!(objects[0].vertices.len(), 20);
        assert_eq!(objects[0].faces.len(), 30);
        assert!(objects[0].synthetic);
    }

    #[test]
    fn test_missing_counts_default_to_board() {
        let objects = parse_ply(b"ply\nformat ascii 1.0\nend_header\n", "x").unwrap();
        assert_eq!(objects[0].vertices.len(), 8);
        assert_eq!(objects[0].faces.len(), 12);
    }

    #[test]
    fn test_malformed_headers() {
        assert!(parse_ply(b"format ascii 1.0\nend_header\n", "x").is_err());
        assert!(parse_ply(b"ply\nelement vertex 8\n", "x").is_err());
        assert!(parse_ply(b"ply\nelement vertex eight\nend_header\n", "x").is_err());
    }

    #[test]
    fn test_implausible_counts_rejected() {
        let bytes = ply_with_payload(1_000_000_000, 0, 10);
        assert!(parse_ply(&bytes, "x").is_err());
    }
}
