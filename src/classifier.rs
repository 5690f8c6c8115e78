//! Furniture component classification
//!
//! Maps a free-text object name to one of a closed set of furniture part
//! categories by case-insensitive keyword substring matching. The keyword
//! table is shared by the mesh parsers and the cost engine.
//!
//! Categories are evaluated in declaration order and the first one with a
//! matching keyword wins, so names such as `"Porta_Gaveta"` resolve
//! deterministically (drawer is declared before door). Names that match no
//! keyword resolve to [`ComponentType::Cabinet`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Furniture part category
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum ComponentType {
    /// Cabinet carcass (also the default category)
    #[default]
    #[serde(rename = "armario")]
    Cabinet,
    /// Drawer box
    #[serde(rename = "gaveta")]
    Drawer,
    /// Door leaf
    #[serde(rename = "porta")]
    Door,
    /// Shelf
    #[serde(rename = "prateleira")]
    Shelf,
    /// Side or partition panel
    #[serde(rename = "painel")]
    Panel,
    /// Back panel
    #[serde(rename = "fundo")]
    BackPanel,
    /// Top / countertop
    #[serde(rename = "tampo")]
    Top,
}

/// Ordered keyword table. Order is the tie-break order.
const KEYWORDS: [(ComponentType, &[&str]); 7] = [
    (
        ComponentType::Cabinet,
        &["cabinet", "wardrobe", "armario", "guarda"],
    ),
    (ComponentType::Drawer, &["drawer", "gaveta", "cajao"]),
    (ComponentType::Door, &["door", "porta", "folha"]),
    (ComponentType::Shelf, &["shelf", "prateleira", "estante"]),
    (ComponentType::Panel, &["panel", "painel", "lateral"]),
    (ComponentType::BackPanel, &["back", "fundo", "traseira"]),
    (ComponentType::Top, &["top", "tampo", "superior"]),
];

impl ComponentType {
    /// All categories in declaration order
    pub const ALL: [ComponentType; 7] = [
        ComponentType::Cabinet,
        ComponentType::Drawer,
        ComponentType::Door,
        ComponentType::Shelf,
        ComponentType::Panel,
        ComponentType::BackPanel,
        ComponentType::Top,
    ];

    /// Category code as used in exports
    pub fn code(&self) -> &'static str {
        match self {
            ComponentType::Cabinet => "armario",
            ComponentType::Drawer => "gaveta",
            ComponentType::Door => "porta",
            ComponentType::Shelf => "prateleira",
            ComponentType::Panel => "painel",
            ComponentType::BackPanel => "fundo",
            ComponentType::Top => "tampo",
        }
    }

    /// Human-readable name for reports
    pub fn display_name(&self) -> &'static str {
        match self {
            ComponentType::Cabinet => "Armário",
            ComponentType::Drawer => "Gaveta",
            ComponentType::Door => "Porta",
            ComponentType::Shelf => "Prateleira",
            ComponentType::Panel => "Painel",
            ComponentType::BackPanel => "Fundo",
            ComponentType::Top => "Tampo",
        }
    }

    /// Keywords that select this category
    pub fn keywords(&self) -> &'static [&'static str] {
        KEYWORDS
            .iter()
            .find(|(kind, _)| kind == self)
            .map(|(_, words)| *words)
            .unwrap_or(&[])
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ComponentType {
    type Err = Error;

    /// Parse a category code (Portuguese or English)
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "armario" | "cabinet" => Ok(ComponentType::Cabinet),
            "gaveta" | "drawer" => Ok(ComponentType::Drawer),
            "porta" | "door" => Ok(ComponentType::Door),
            "prateleira" | "shelf" => Ok(ComponentType::Shelf),
            "painel" | "panel" => Ok(ComponentType::Panel),
            "fundo" | "back_panel" | "back-panel" => Ok(ComponentType::BackPanel),
            "tampo" | "top" => Ok(ComponentType::Top),
            other => Err(Error::unknown_code(
                "component type",
                other,
                &ComponentType::ALL.map(|t| t.code()),
            )),
        }
    }
}

/// Classify a component from its name
///
/// Matching is case-insensitive on substrings. Returns
/// [`ComponentType::Cabinet`] when no keyword matches.
///
/// # Example
///
/// ```
/// use orca3d::classifier::{classify, ComponentType};
///
/// assert_eq!(classify("Gaveta_Superior"), ComponentType::Drawer);
/// assert_eq!(classify("Mesh.001"), ComponentType::Cabinet);
/// ```
pub fn classify(name: &str) -> ComponentType {
    let lowered = name.to_lowercase();
    KEYWORDS
        .iter()
        .find(|(_, words)| words.iter().any(|word| lowered.contains(word)))
        .map(|(kind, _)| *kind)
        .unwrap_or_default()
}
