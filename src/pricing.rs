//! Price tables used by the cost engine
//!
//! [`PriceTables`] bundles every number the engine needs: sheet prices and
//! waste fractions per material, hardware line items per component type and
//! quality tier, labor rates, and complexity multipliers. The default tables
//! carry the supplier list the system ships with; substituted tables can be
//! loaded from JSON and passed to [`CostEngine::new`](crate::engine::CostEngine::new).
//!
//! # JSON layout
//!
//! ```json
//! {
//!   "materiais": { "mdf_15mm": { "preco_m2": 69.15, "desperdicio": 0.15 } },
//!   "acessorios": { "porta": { "comum": [ { "item": "dobradica", "custo": 12.5 } ] } },
//!   "mao_obra": { "corte_reto": 2.5, "furo_dobradica": 1.5, "taxa_minima": 15.0 },
//!   "complexidade": { "simples": 1.0, "media": 1.2 },
//!   "fornecedor": "Léo Madeiras",
//!   "data_atualizacao": "30/06/2025"
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::classifier::ComponentType;
use crate::error::{Error, Result};
use crate::model::{AccessoryQuality, ComplexityTier, Material};

/// Unit price used when a material has no table entry
pub const FALLBACK_UNIT_PRICE: f64 = 69.15;

/// Waste fraction used when a material has no table entry
pub const FALLBACK_WASTE_FRACTION: f64 = 0.15;

/// Multiplier used when a complexity tier has no table entry
pub const FALLBACK_COMPLEXITY_MULTIPLIER: f64 = 1.0;

/// Sheet price of one material
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialPrice {
    /// Price per square meter
    #[serde(rename = "preco_m2")]
    pub unit_price: f64,
    /// Fraction of extra sheet bought to cover offcuts
    #[serde(rename = "desperdicio")]
    pub waste_fraction: f64,
}

impl MaterialPrice {
    /// Create a price entry
    pub const fn new(unit_price: f64, waste_fraction: f64) -> Self {
        Self {
            unit_price,
            waste_fraction,
        }
    }

    /// `unit_price * (1 + waste_fraction)`
    pub fn effective_price(&self) -> f64 {
        self.unit_price * (1.0 + self.waste_fraction)
    }
}

/// One hardware line item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessoryItem {
    /// Item code (`dobradica`, `puxador`, ...)
    #[serde(rename = "item")]
    pub name: String,
    /// Cost per component
    #[serde(rename = "custo")]
    pub unit_cost: f64,
}

impl AccessoryItem {
    /// Create a line item
    pub fn new(name: impl Into<String>, unit_cost: f64) -> Self {
        Self {
            name: name.into(),
            unit_cost,
        }
    }
}

/// Labor rates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaborRates {
    /// Straight cut, per linear meter
    #[serde(rename = "corte_reto")]
    pub straight_cut_per_m: f64,
    /// Hinge drilling, per hole (catalogued only)
    #[serde(rename = "furo_dobradica")]
    pub hinge_drilling_per_hole: f64,
    /// Floor applied to the cutting cost of every piece
    #[serde(rename = "taxa_minima")]
    pub minimum_piece_rate: f64,
}

impl Default for LaborRates {
    fn default() -> Self {
        Self {
            straight_cut_per_m: 2.50,
            hinge_drilling_per_hole: 1.50,
            minimum_piece_rate: 15.00,
        }
    }
}

type AccessoryTable = BTreeMap<ComponentType, BTreeMap<AccessoryQuality, Vec<AccessoryItem>>>;

/// Every lookup table consumed by the cost engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceTables {
    /// Sheet prices by material
    #[serde(rename = "materiais")]
    pub materials: BTreeMap<Material, MaterialPrice>,
    /// Hardware by component type, then quality tier
    #[serde(rename = "acessorios")]
    pub accessories: AccessoryTable,
    /// Labor rates
    #[serde(rename = "mao_obra")]
    pub labor: LaborRates,
    /// Cost multipliers by complexity tier
    #[serde(rename = "complexidade")]
    pub complexity: BTreeMap<ComplexityTier, f64>,
    /// Supplier the prices were taken from
    #[serde(rename = "fornecedor")]
    pub supplier: String,
    /// Date of the price list, as printed in reports
    #[serde(rename = "data_atualizacao")]
    pub updated_on: String,
}

impl PriceTables {
    /// Provenance label stamped on every budget
    pub fn source_label(&self) -> String {
        format!("{} - Atualizado em {}", self.supplier, self.updated_on)
    }

    /// Price of a material, or the MDF 15 mm price when missing
    pub fn material_price(&self, material: Material) -> MaterialPrice {
        self.materials
            .get(&material)
            .copied()
            .unwrap_or(MaterialPrice::new(FALLBACK_UNIT_PRICE, FALLBACK_WASTE_FRACTION))
    }

    /// Hardware for a component type and quality; empty when missing
    pub fn accessory_items(
        &self,
        component_type: ComponentType,
        quality: AccessoryQuality,
    ) -> &[AccessoryItem] {
        self.accessories
            .get(&component_type)
            .and_then(|by_quality| by_quality.get(&quality))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Sum of the hardware costs for a component type and quality
    pub fn accessory_cost(&self, component_type: ComponentType, quality: AccessoryQuality) -> f64 {
        self.accessory_items(component_type, quality)
            .iter()
            .map(|item| item.unit_cost)
            .sum()
    }

    /// Multiplier of a complexity tier, 1.0 when missing
    pub fn complexity_multiplier(&self, tier: ComplexityTier) -> f64 {
        self.complexity
            .get(&tier)
            .copied()
            .unwrap_or(FALLBACK_COMPLEXITY_MULTIPLIER)
    }

    /// Load tables from a JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let tables: PriceTables = serde_json::from_str(json)?;
        tables.validate()?;
        Ok(tables)
    }

    /// Load tables from a JSON file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tables = Self::from_json_str(&json)?;
        tracing::debug!(
            path = %path.as_ref().display(),
            materials = tables.materials.len(),
            "loaded price tables"
        );
        Ok(tables)
    }

    /// Reject negative or non-finite numbers
    pub fn validate(&self) -> Result<()> {
        let check = |what: String, value: f64| {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(Error::InvalidConfiguration(format!(
                    "{} must be a non-negative number, got {}",
                    what, value
                )))
            }
        };
        for (material, price) in &self.materials {
            check(format!("price of {}", material), price.unit_price)?;
            check(format!("waste of {}", material), price.waste_fraction)?;
        }
        for (kind, by_quality) in &self.accessories {
            for (quality, items) in by_quality {
                for item in items {
                    check(format!("{} {} {}", kind, quality, item.name), item.unit_cost)?;
                }
            }
        }
        check("cut rate".to_string(), self.labor.straight_cut_per_m)?;
        check("drilling rate".to_string(), self.labor.hinge_drilling_per_hole)?;
        check("minimum piece rate".to_string(), self.labor.minimum_piece_rate)?;
        for (tier, multiplier) in &self.complexity {
            check(format!("multiplier of {}", tier), *multiplier)?;
        }
        Ok(())
    }

    /// Serializable snapshot of the tables with display names
    pub fn catalog(&self) -> PriceCatalog {
        PriceCatalog {
            materials: self
                .materials
                .iter()
                .map(|(&material, price)| MaterialListing {
                    material,
                    display_name: material.display_name().to_string(),
                    unit_price: price.unit_price,
                    waste_fraction: price.waste_fraction,
                })
                .collect(),
            accessories: self.accessories.clone(),
            labor: self.labor,
            complexity: self.complexity.clone(),
            updated_on: self.updated_on.clone(),
            supplier: self.supplier.clone(),
        }
    }
}

fn items(entries: &[(&str, f64)]) -> Vec<AccessoryItem> {
    entries
        .iter()
        .map(|&(name, cost)| AccessoryItem::new(name, cost))
        .collect()
}

fn tiers(
    standard: &[(&str, f64)],
    premium: &[(&str, f64)],
) -> BTreeMap<AccessoryQuality, Vec<AccessoryItem>> {
    BTreeMap::from([
        (AccessoryQuality::Standard, items(standard)),
        (AccessoryQuality::Premium, items(premium)),
    ])
}

impl Default for PriceTables {
    fn default() -> Self {
        let materials = BTreeMap::from([
            (Material::Mdf15, MaterialPrice::new(69.15, 0.15)),
            (Material::Mdf18, MaterialPrice::new(79.50, 0.15)),
            (Material::Plywood15, MaterialPrice::new(64.00, 0.12)),
            (Material::Plywood18, MaterialPrice::new(72.80, 0.12)),
            (Material::Melamine15, MaterialPrice::new(89.50, 0.18)),
            (Material::Melamine18, MaterialPrice::new(98.20, 0.18)),
        ]);

        let accessories = BTreeMap::from([
            (
                ComponentType::Cabinet,
                tiers(
                    &[("dobradica", 12.50), ("puxador", 8.90), ("corredicao", 25.00)],
                    &[("dobradica", 18.75), ("puxador", 15.50), ("corredicao", 45.00)],
                ),
            ),
            (
                ComponentType::Drawer,
                tiers(
                    &[("corredicao_gaveta", 35.00), ("puxador", 8.90)],
                    &[("corredicao_gaveta", 65.00), ("puxador", 15.50)],
                ),
            ),
            (
                ComponentType::Door,
                tiers(
                    &[("dobradica", 12.50), ("puxador", 8.90)],
                    &[("dobradica", 18.75), ("puxador", 15.50)],
                ),
            ),
            (
                ComponentType::Shelf,
                tiers(&[("suporte", 4.50)], &[("suporte", 8.00)]),
            ),
            (
                ComponentType::Panel,
                tiers(&[("fixacao", 3.00)], &[("fixacao", 5.50)]),
            ),
            (
                ComponentType::BackPanel,
                tiers(&[("fixacao", 2.50)], &[("fixacao", 4.00)]),
            ),
            (
                ComponentType::Top,
                tiers(
                    &[("suporte", 6.00), ("acabamento", 8.00)],
                    &[("suporte", 12.00), ("acabamento", 15.00)],
                ),
            ),
        ]);

        let complexity = BTreeMap::from([
            (ComplexityTier::Simple, 1.0),
            (ComplexityTier::Medium, 1.2),
            (ComplexityTier::Complex, 1.5),
            (ComplexityTier::Premium, 2.0),
        ]);

        Self {
            materials,
            accessories,
            labor: LaborRates::default(),
            complexity,
            supplier: "Léo Madeiras".to_string(),
            updated_on: "30/06/2025".to_string(),
        }
    }
}

/// Catalog entry for one material
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialListing {
    /// Material code
    pub material: Material,
    /// Human-readable name
    #[serde(rename = "nome")]
    pub display_name: String,
    /// Price per square meter
    #[serde(rename = "preco_m2")]
    pub unit_price: f64,
    /// Waste fraction
    #[serde(rename = "desperdicio")]
    pub waste_fraction: f64,
}

/// Current prices as shown to users
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceCatalog {
    /// Materials in catalog order
    #[serde(rename = "materiais")]
    pub materials: Vec<MaterialListing>,
    /// Hardware tables
    #[serde(rename = "acessorios")]
    pub accessories: AccessoryTable,
    /// Labor rates
    #[serde(rename = "mao_obra")]
    pub labor: LaborRates,
    /// Complexity multipliers
    #[serde(rename = "complexidade")]
    pub complexity: BTreeMap<ComplexityTier, f64>,
    /// Date of the price list
    #[serde(rename = "data_atualizacao")]
    pub updated_on: String,
    /// Supplier
    #[serde(rename = "fonte")]
    pub supplier: String,
}
