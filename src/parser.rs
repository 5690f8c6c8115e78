//! Mesh file parsing
//!
//! One submodule per supported format, each turning raw bytes into a list of
//! [`RawGeometryObject`]s. Parsers are tolerant: malformed numbers and
//! out-of-range indices are skipped, and anything that cannot be
//! interpreted at all is reported as an error which [`parse_mesh`] turns
//! into [`ParseOutcome::Fallback`].

mod dae;
mod obj;
mod ply;
mod stl;

use std::path::Path;

use crate::error::Result;
use crate::model::{FileFormat, RawGeometryObject};

pub use dae::parse_dae;
pub use obj::parse_obj;
pub use ply::{PlyHeader, parse_ply, parse_ply_header};
pub use stl::{StlEncoding, detect_stl_encoding, parse_stl};

/// Result of running a format parser
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    /// At least one object was recovered from the file
    Parsed(Vec<RawGeometryObject>),
    /// Nothing usable was recovered; carries a human-readable reason
    Fallback {
        /// Why the parser could not produce components
        reason: String,
    },
}

impl ParseOutcome {
    /// Wrap a parser result, mapping errors and empty results to a fallback
    fn from_result(result: Result<Vec<RawGeometryObject>>) -> Self {
        match result {
            Ok(objects) if !objects.is_empty() => ParseOutcome::Parsed(objects),
            Ok(_) => ParseOutcome::Fallback {
                reason: "no components could be derived from the file".to_string(),
            },
            Err(e) => ParseOutcome::Fallback {
                reason: e.to_string(),
            },
        }
    }

    /// Whether the parser fell back
    pub fn is_fallback(&self) -> bool {
        matches!(self, ParseOutcome::Fallback { .. })
    }
}

/// Parse mesh bytes of a declared format
///
/// `file_name` is used to name components in formats without per-object
/// names. This never fails: malformed input yields [`ParseOutcome::Fallback`].
pub fn parse_mesh(format: FileFormat, file_name: &str, bytes: &[u8]) -> ParseOutcome {
    let base_name = base_name(file_name);
    tracing::debug!(%format, file_name, size = bytes.len(), "parsing mesh");

    let result = match format {
        FileFormat::Obj => parse_obj(bytes, &base_name),
        FileFormat::Dae => parse_dae(bytes),
        FileFormat::Stl => parse_stl(bytes, &base_name),
        FileFormat::Ply => parse_ply(bytes, &base_name),
    };
    ParseOutcome::from_result(result)
}

/// File name without directory or extension
///
/// `"uploads/Cozinha.obj"` becomes `"Cozinha"`. Falls back to the input
/// when there is no file stem.
pub fn base_name(file_name: &str) -> String {
    Path::new(file_name)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .unwrap_or(file_name)
        .to_string()
}

/// Iterate over trimmed lines of a lossily decoded text payload
pub(crate) fn text_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().map(str::trim)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_base_name() {
        assert_eq!(base_name("Cozinha.obj"), "Cozinha");
        assert_eq!(base_name("uploads/Sala.tar.stl"), "Sala.tar");
        assert_eq!(base_name("noext"), "noext");
    }

    #[test]
    fn test_outcome_from_result() {
        assert!(ParseOutcome::from_result(Ok(vec![])).is_fallback());
        let outcome = ParseOutcome::from_result(Err(Error::Parse("bad header".into())));
        match outcome {
            ParseOutcome::Fallback { reason } => assert!(reason.contains("bad header")),
            ParseOutcome::Parsed(_) => panic!("expected fallback"),
        }
        let parsed = ParseOutcome::from_result(Ok(vec![RawGeometryObject::new("Tampo")]));
        assert!(!parsed.is_fallback());
    }

    #[test]
    fn test_parse_mesh_never_fails() {
        for format in FileFormat::ALL {
            let outcome = parse_mesh(format, "lixo.bin", &[0xff, 0x00, 0x13, 0x37]);
            assert!(outcome.is_fallback(), "{format} should fall back on garbage");
        }
    }
}
