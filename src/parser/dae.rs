//! Collada (DAE) scanning
//!
//! Only component names are extracted: every `<geometry id="...">`
//! element becomes one component carrying placeholder board geometry.
//! Vertex payloads (`<float_array>`, `<p>`) are not decoded.
//!
//! The document is tokenized with quick-xml. When the tokenizer hits a
//! syntax error or finds nothing, the whole text is rescanned for `<geometry ... id="...">`
//! tags instead, so a malformed prolog or DOCTYPE does not hide geometries
//! that follow it.

use memchr::memmem;
use quick_xml::Reader;
use quick_xml::events::Event;

use crate::error::Result;
use crate::mesh_ops::{placeholder_faces, placeholder_vertices};
use crate::model::RawGeometryObject;

/// Default buffer capacity for XML scanning (4KB)
const XML_BUFFER_CAPACITY: usize = 4096;

/// Scan a DAE document for geometry identifiers
///
/// Mismatched end tags are accepted. On a syntax error, or when the
/// tokenizer finds no geometry, the ids come from [`scan_geometry_ids`] over
/// the whole text; a syntax error is returned only when that scan finds
/// nothing either. Geometries with an empty `id` are
/// named `Component_<n>`.
pub fn parse_dae(bytes: &[u8]) -> Result<Vec<RawGeometryObject>> {
    let text = String::from_utf8_lossy(bytes);
    let mut reader = Reader::from_str(&text);
    reader.config_mut().check_end_names = false;

    let mut buf = Vec::with_capacity(XML_BUFFER_CAPACITY);
    let mut ids: Vec<String> = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e))
                if e.local_name().as_ref() == b"geometry" =>
            {
                let id = e
                    .attributes()
                    .with_checks(false)
                    .filter_map(|attr| attr.ok())
                    .find(|attr| attr.key.local_name().as_ref() == b"id")
                    .map(|attr| String::from_utf8_lossy(&attr.value).into_owned());
                if let Some(id) = id {
                    ids.push(id);
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                let found = scan_geometry_ids(text.as_bytes());
                if found.is_empty() {
                    return Err(e.into());
                }
                tracing::warn!(
                    error = %e,
                    tokenized = ids.len(),
                    geometries = found.len(),
                    "malformed DAE, rescanned as text"
                );
                ids = found;
                break;
            }
        }
        buf.clear();
    }

    if ids.is_empty() {
        ids = scan_geometry_ids(text.as_bytes());
    }

    tracing::debug!(geometries = ids.len(), "scanned DAE");
    Ok(ids
        .into_iter()
        .enumerate()
        .map(|(i, id)| {
            let name = if id.trim().is_empty() {
                format!("Component_{}", i + 1)
            } else {
                id
            };
            RawGeometryObject::synthetic(name, placeholder_vertices(0), placeholder_faces(0))
        })
        .collect())
}

/// Find the `id` of every `<geometry>` tag by plain text search
///
/// Tags whose `id` value has no closing quote before the end of the tag are
/// skipped.
pub fn scan_geometry_ids(bytes: &[u8]) -> Vec<String> {
    const OPEN: &[u8] = b"<geometry";
    const ID: &[u8] = b"id=\"";

    let id_finder = memmem::Finder::new(ID);
    let mut ids = Vec::new();

    for start in memmem::find_iter(bytes, OPEN) {
        let after = start + OPEN.len();
        // `<geometry_library>` and friends are other elements
        match bytes.get(after) {
            Some(b) if b.is_ascii_whitespace() => {}
            _ => continue,
        }
        let tag_end = memchr::memchr(b'>', &bytes[after..])
            .map(|p| after + p)
            .unwrap_or(bytes.len());
        let tag = &bytes[after..tag_end];

        let value = id_finder
            .find_iter(tag)
            .filter(|&p| p > 0 && (tag[p - 1].is_ascii_whitespace() || tag[p - 1] == b':'))
            .find_map(|p| {
                let value = &tag[p + ID.len()..];
                memchr::memchr(b'"', value).map(|close| &value[..close])
            });
        if let Some(value) = value {
            ids.push(String::from_utf8_lossy(value).into_owned());
        }
    }
    ids
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<COLLADA xmlns="http://www.collada.org/2005/11/COLLADASchema" version="1.4.1">
  <library_geometries>
    <geometry id="Gaveta_01-mesh" name="Gaveta_01">
      <mesh><source id="s"><float_array id="a" count="3">0 0 0</float_array></source></mesh>
    </geometry>
    <geometry id="" name="sem_id"/>
    <geometry name="ignored"/>
    <geometry id="Tampo-mesh"></geometry>
  </library_geometries>
</COLLADA>"#;

    #[test]
    fn test_geometry_ids() {
        let objects = parse_dae(SCENE.as_bytes()).unwrap();
        let names: Vec<&str> = objects.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["Gaveta_01-mesh", "Component_2", "Tampo-mesh"]);
        assert!(objects.iter().all(|o| o.synthetic));
        assert_eq!(objects[0].vertices.len(), 8);
        assert_eq!(objects[0].faces.len(), 12);
    }

    #[test]
    fn test_no_geometries() {
        let objects = parse_dae(b"<COLLADA><asset/></COLLADA>").unwrap();
        assert!(objects.is_empty());
    }

    #[test]
    fn test_truncated_document_keeps_found_ids() {
        let text = r#"<COLLADA><geometry id="Porta"/><geometry id="Fundo"/><float_array count="#;
        let objects = parse_dae(text.as_bytes()).unwrap();
        assert_eq!(objects.len(), 2);
    }

    #[test]
    fn test_malformed_prefix_rescanned_as_text() {
        let text = r#"<COLLADA><!DOCTYPE x [ <geometry id="q"/> <library_geometries><geometry id="Porta"/><geometry name="x" id="Fundo">"#;
        let objects = parse_dae(text.as_bytes()).unwrap();
        let names: Vec<&str> = objects.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["q", "Porta", "Fundo"]);
    }

    #[test]
    fn test_malformed_without_geometries_is_an_error() {
        assert!(parse_dae(b"<COLLADA><!DOCTYPE x [ <asset/>").is_err());
    }

    #[test]
    fn test_scan_geometry_ids() {
        let text = br#"<geometry id="a"/><geometry_extra id="b"/><geometry	name="n" xml:id="c"><geometry gid="d" id="e"><geometry id="open"#;
        assert_eq!(scan_geometry_ids(text), vec!["a", "c", "e"]);
        assert!(scan_geometry_ids(b"").is_empty());
    }
}
