//! Pricing configuration and priced results

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::geometry::{Face, Vertex};
use crate::classifier::ComponentType;
use crate::error::{Error, Result};

/// Sheet material code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Material {
    /// MDF, 15 mm
    #[serde(rename = "mdf_15mm")]
    Mdf15,
    /// MDF, 18 mm
    #[serde(rename = "mdf_18mm")]
    Mdf18,
    /// Plywood, 15 mm
    #[serde(rename = "compensado_15mm")]
    Plywood15,
    /// Plywood, 18 mm
    #[serde(rename = "compensado_18mm")]
    Plywood18,
    /// Melamine-faced MDF, 15 mm
    #[serde(rename = "melamina_15mm")]
    Melamine15,
    /// Melamine-faced MDF, 18 mm
    #[serde(rename = "melamina_18mm")]
    Melamine18,
}

impl Material {
    /// All materials in catalog order
    pub const ALL: [Material; 6] = [
        Material::Mdf15,
        Material::Mdf18,
        Material::Plywood15,
        Material::Plywood18,
        Material::Melamine15,
        Material::Melamine18,
    ];

    /// Material code
    pub fn code(&self) -> &'static str {
        match self {
            Material::Mdf15 => "mdf_15mm",
            Material::Mdf18 => "mdf_18mm",
            Material::Plywood15 => "compensado_15mm",
            Material::Plywood18 => "compensado_18mm",
            Material::Melamine15 => "melamina_15mm",
            Material::Melamine18 => "melamina_18mm",
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            Material::Mdf15 => "MDF 15mm",
            Material::Mdf18 => "MDF 18mm",
            Material::Plywood15 => "Compensado 15mm",
            Material::Plywood18 => "Compensado 18mm",
            Material::Melamine15 => "Melamina 15mm",
            Material::Melamine18 => "Melamina 18mm",
        }
    }

    /// Longer description
    pub fn description(&self) -> &'static str {
        match self {
            Material::Mdf15 => "Medium Density Fiberboard 15mm",
            Material::Mdf18 => "Medium Density Fiberboard 18mm",
            Material::Plywood15 => "Compensado multilaminado 15mm",
            Material::Plywood18 => "Compensado multilaminado 18mm",
            Material::Melamine15 => "MDF revestido com melamina 15mm",
            Material::Melamine18 => "MDF revestido com melamina 18mm",
        }
    }

    /// Material family (`mdf`, `compensado`, `melamina`)
    pub fn family(&self) -> &'static str {
        match self {
            Material::Mdf15 | Material::Mdf18 => "mdf",
            Material::Plywood15 | Material::Plywood18 => "compensado",
            Material::Melamine15 | Material::Melamine18 => "melamina",
        }
    }

    /// Sheet thickness in millimeters
    pub fn thickness_mm(&self) -> u32 {
        match self {
            Material::Mdf15 | Material::Plywood15 | Material::Melamine15 => 15,
            Material::Mdf18 | Material::Plywood18 | Material::Melamine18 => 18,
        }
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Material {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let code = s.trim().to_lowercase();
        Material::ALL
            .into_iter()
            .find(|m| m.code() == code)
            .ok_or_else(|| Error::unknown_code("material", &code, &Material::ALL.map(|m| m.code())))
    }
}

/// Hardware quality tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AccessoryQuality {
    /// Standard hardware
    #[serde(rename = "comum", alias = "standard")]
    Standard,
    /// Premium hardware
    #[serde(rename = "premium")]
    Premium,
}

impl AccessoryQuality {
    /// Quality code
    pub fn code(&self) -> &'static str {
        match self {
            AccessoryQuality::Standard => "comum",
            AccessoryQuality::Premium => "premium",
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            AccessoryQuality::Standard => "Comum",
            AccessoryQuality::Premium => "Premium",
        }
    }
}

impl fmt::Display for AccessoryQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for AccessoryQuality {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "comum" | "standard" => Ok(AccessoryQuality::Standard),
            "premium" => Ok(AccessoryQuality::Premium),
            other => Err(Error::unknown_code(
                "accessory quality",
                other,
                &["comum", "standard", "premium"],
            )),
        }
    }
}

/// Project complexity tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ComplexityTier {
    /// Basic project with few details
    #[serde(rename = "simples", alias = "simple")]
    Simple,
    /// Moderate complexity
    #[serde(rename = "media", alias = "medium")]
    Medium,
    /// Many details and finishes
    #[serde(rename = "complexa", alias = "complex")]
    Complex,
    /// High complexity and finish
    #[serde(rename = "premium")]
    Premium,
}

impl ComplexityTier {
    /// All tiers, cheapest first
    pub const ALL: [ComplexityTier; 4] = [
        ComplexityTier::Simple,
        ComplexityTier::Medium,
        ComplexityTier::Complex,
        ComplexityTier::Premium,
    ];

    /// Tier code
    pub fn code(&self) -> &'static str {
        match self {
            ComplexityTier::Simple => "simples",
            ComplexityTier::Medium => "media",
            ComplexityTier::Complex => "complexa",
            ComplexityTier::Premium => "premium",
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            ComplexityTier::Simple => "Simples",
            ComplexityTier::Medium => "Média",
            ComplexityTier::Complex => "Complexa",
            ComplexityTier::Premium => "Premium",
        }
    }
}

impl fmt::Display for ComplexityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ComplexityTier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "simples" | "simple" => Ok(ComplexityTier::Simple),
            "media" | "média" | "medium" => Ok(ComplexityTier::Medium),
            "complexa" | "complex" => Ok(ComplexityTier::Complex),
            "premium" => Ok(ComplexityTier::Premium),
            other => Err(Error::unknown_code(
                "complexity tier",
                other,
                &["simples", "media", "complexa", "premium"],
            )),
        }
    }
}

/// Caller-supplied pricing options
///
/// The profit margin is not bounds-checked; front ends usually restrict it
/// to 10–50 %.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingConfiguration {
    /// Sheet material
    pub material: Material,
    /// Hardware quality tier
    #[serde(rename = "qualidade_acessorios")]
    pub accessory_quality: AccessoryQuality,
    /// Complexity tier
    #[serde(rename = "complexidade")]
    pub complexity_tier: ComplexityTier,
    /// Profit margin in percent
    #[serde(rename = "margem_lucro")]
    pub profit_margin_pct: f64,
}

impl PricingConfiguration {
    /// Create a configuration
    pub fn new(
        material: Material,
        accessory_quality: AccessoryQuality,
        complexity_tier: ComplexityTier,
        profit_margin_pct: f64,
    ) -> Self {
        Self {
            material,
            accessory_quality,
            complexity_tier,
            profit_margin_pct,
        }
    }

    /// Set the material
    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    /// Set the accessory quality
    pub fn with_accessory_quality(mut self, quality: AccessoryQuality) -> Self {
        self.accessory_quality = quality;
        self
    }

    /// Set the complexity tier
    pub fn with_complexity(mut self, tier: ComplexityTier) -> Self {
        self.complexity_tier = tier;
        self
    }

    /// Set the profit margin in percent
    pub fn with_profit_margin(mut self, pct: f64) -> Self {
        self.profit_margin_pct = pct;
        self
    }
}

impl Default for PricingConfiguration {
    fn default() -> Self {
        Self::new(
            Material::Mdf15,
            AccessoryQuality::Standard,
            ComplexityTier::Medium,
            30.0,
        )
    }
}

/// Priced component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentCost {
    /// Component name
    #[serde(rename = "nome")]
    pub name: String,
    /// Furniture category
    #[serde(rename = "tipo")]
    pub component_type: ComponentType,
    /// Area used for pricing
    pub area_m2: f64,
    /// Sheet material including waste
    #[serde(rename = "custo_material")]
    pub material_cost: f64,
    /// Hardware
    #[serde(rename = "custo_acessorios")]
    pub accessory_cost: f64,
    /// Cutting labor
    #[serde(rename = "custo_corte")]
    pub cutting_cost: f64,
    /// Complexity multiplier applied to the three costs
    #[serde(rename = "multiplicador_complexidade")]
    pub complexity_multiplier: f64,
    /// `(material + accessory + cutting) * multiplier`
    #[serde(rename = "custo_total")]
    pub total_cost: f64,
    /// `total / area`
    #[serde(rename = "preco_por_m2")]
    pub price_per_m2: f64,
    /// Pass-through geometry
    pub vertices: Vec<Vertex>,
    /// Pass-through geometry
    pub faces: Vec<Face>,
    /// Pass-through bounding box extents
    #[serde(rename = "dimensoes_mm")]
    pub dimensions_mm: [f64; 3],
}

/// Aggregate totals of a budget
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BudgetSummary {
    /// Number of priced components
    #[serde(rename = "quantidade_componentes")]
    pub component_count: usize,
    /// Sum of component areas
    #[serde(rename = "area_total_m2")]
    pub total_area_m2: f64,
    /// Sum of material costs
    #[serde(rename = "custo_material")]
    pub material_cost: f64,
    /// Sum of accessory costs
    #[serde(rename = "custo_acessorios")]
    pub accessory_cost: f64,
    /// Sum of cutting costs
    #[serde(rename = "custo_corte")]
    pub cutting_cost: f64,
    /// material + accessory + cutting
    pub subtotal: f64,
    /// Profit margin in percent
    #[serde(rename = "margem_lucro_pct")]
    pub profit_margin_pct: f64,
    /// subtotal * margin
    #[serde(rename = "valor_lucro")]
    pub profit_value: f64,
    /// subtotal + profit
    #[serde(rename = "valor_final")]
    pub final_value: f64,
    /// final / total area, 0 when the area is 0
    #[serde(rename = "preco_por_m2")]
    pub price_per_m2: f64,
}

/// Final priced output for one project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetResult {
    /// Priced components in analysis order
    #[serde(rename = "componentes")]
    pub components: Vec<ComponentCost>,
    /// Aggregate totals
    #[serde(rename = "resumo")]
    pub summary: BudgetSummary,
    /// Configuration used
    #[serde(rename = "configuracoes")]
    pub configuration: PricingConfiguration,
    /// When the budget was computed
    #[serde(rename = "data_calculo")]
    pub computed_at: DateTime<Utc>,
    /// Price table provenance
    #[serde(rename = "fonte_precos")]
    pub price_source: String,
}

impl BudgetResult {
    /// Budget with no components, returned when there is nothing to price
    pub fn empty(configuration: PricingConfiguration, computed_at: DateTime<Utc>) -> Self {
        Self {
            components: Vec::new(),
            summary: BudgetSummary::default(),
            configuration,
            computed_at,
            price_source: String::new(),
        }
    }

    /// Whether the budget priced nothing
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}
