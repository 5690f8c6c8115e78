//! Cost engine
//!
//! Turns an [`AnalysisResult`] and a [`PricingConfiguration`] into a
//! [`BudgetResult`]. Pricing is a pure function of its inputs and the
//! [`PriceTables`] the engine was built with.
//!
//! Per component:
//!
//! ```text
//! material  = area * unit_price * (1 + waste)
//! accessory = sum(hardware items for (type, quality))
//! cutting   = max(8 * sqrt(area) * cut_rate, minimum_piece_rate)
//! total     = (material + accessory + cutting) * complexity_multiplier
//! ```
//!
//! Each term is rounded to cents and the total is computed from the rounded
//! terms, so the printed figures always add up.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::classifier::{ComponentType, classify};
use crate::mesh_ops::{
    DEFAULT_AREA_M2, DEFAULT_DIMENSIONS_MM, box_surface_area_m2, clamp_area, round_to,
};
use crate::model::{
    AnalysisResult, BudgetResult, BudgetSummary, ComponentCost, ComponentSummary, Face, Material,
    PricingConfiguration, Vertex,
};
use crate::pricing::{PriceCatalog, PriceTables};

/// Perimeter of a component, estimated as `PERIMETER_FACTOR * sqrt(area)`
const PERIMETER_FACTOR: f64 = 8.0;

fn cents(value: f64) -> f64 {
    round_to(value, 2)
}

/// One component as seen by the engine
///
/// Every geometric field is optional so hand-built inputs can be priced;
/// missing values are resolved by [`CostEngine::price_component`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CostInput {
    /// Component name
    pub name: String,
    /// Category; derived from `name` when absent
    pub component_type: Option<ComponentType>,
    /// Area in m²; derived from `dimensions_mm` when absent
    pub area_m2: Option<f64>,
    /// Bounding box extents in millimeters
    pub dimensions_mm: Option<[f64; 3]>,
    /// Pass-through geometry
    pub vertices: Vec<Vertex>,
    /// Pass-through geometry
    pub faces: Vec<Face>,
}

impl CostInput {
    /// Input with only a name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the area
    pub fn with_area(mut self, area_m2: f64) -> Self {
        self.area_m2 = Some(area_m2);
        self
    }

    /// Set the extents
    pub fn with_dimensions(mut self, dimensions_mm: [f64; 3]) -> Self {
        self.dimensions_mm = Some(dimensions_mm);
        self
    }

    /// Set the category
    pub fn with_type(mut self, component_type: ComponentType) -> Self {
        self.component_type = Some(component_type);
        self
    }

    /// Area used for pricing
    ///
    /// The explicit area floored at 0.1 m²; otherwise the box estimate from
    /// the extents, floored the same way; otherwise 1.0 m².
    pub fn resolved_area(&self) -> f64 {
        match (self.area_m2, self.dimensions_mm) {
            (Some(area), _) => clamp_area(area),
            (None, Some(dimensions)) => {
                let area = box_surface_area_m2(dimensions);
                if area.is_finite() {
                    clamp_area(area)
                } else {
                    DEFAULT_AREA_M2
                }
            }
            (None, None) => DEFAULT_AREA_M2,
        }
    }

    /// Category used for pricing
    pub fn resolved_type(&self) -> ComponentType {
        self.component_type.unwrap_or_else(|| classify(&self.name))
    }
}

impl From<&ComponentSummary> for CostInput {
    fn from(summary: &ComponentSummary) -> Self {
        Self {
            name: summary.name.clone(),
            component_type: Some(summary.component_type),
            area_m2: Some(summary.area_m2),
            dimensions_mm: Some(summary.dimensions_mm),
            vertices: summary.vertices.clone(),
            faces: summary.faces.clone(),
        }
    }
}

/// Raw sheet cost of the current material vs an alternative
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialComparison {
    /// Material of the budget
    #[serde(rename = "material_atual")]
    pub current_material: Material,
    /// Material compared against
    #[serde(rename = "material_alternativo")]
    pub alternative_material: Material,
    /// Unit price of the current material
    #[serde(rename = "preco_atual")]
    pub current_unit_price: f64,
    /// Unit price of the alternative
    #[serde(rename = "preco_alternativo")]
    pub alternative_unit_price: f64,
    /// Sum of component areas
    #[serde(rename = "area_total")]
    pub total_area_m2: f64,
    /// `area * current price`
    #[serde(rename = "custo_atual")]
    pub current_cost: f64,
    /// `area * alternative price`
    #[serde(rename = "custo_alternativo")]
    pub alternative_cost: f64,
    /// `current - alternative`; negative when the alternative costs more
    #[serde(rename = "economia")]
    pub savings: f64,
    /// Savings relative to the current cost, 0 when that cost is 0
    #[serde(rename = "percentual_economia")]
    pub savings_pct: f64,
}

/// Prices analyses against a set of [`PriceTables`]
#[derive(Debug, Clone, Default)]
pub struct CostEngine {
    tables: PriceTables,
}

impl CostEngine {
    /// Create an engine with the given tables
    pub fn new(tables: PriceTables) -> Self {
        Self { tables }
    }

    /// Tables in use
    pub fn tables(&self) -> &PriceTables {
        &self.tables
    }

    /// Current prices with display names
    pub fn catalog(&self) -> PriceCatalog {
        self.tables.catalog()
    }

    /// Price a single component
    pub fn price_component(
        &self,
        input: &CostInput,
        config: &PricingConfiguration,
    ) -> ComponentCost {
        let area = input.resolved_area();
        let component_type = input.resolved_type();
        let tables = &self.tables;

        let material_cost = cents(area * tables.material_price(config.material).effective_price());
        let accessory_cost = cents(tables.accessory_cost(component_type, config.accessory_quality));
        let perimeter = PERIMETER_FACTOR * area.sqrt();
        let cutting_cost = cents(
            (perimeter * tables.labor.straight_cut_per_m).max(tables.labor.minimum_piece_rate),
        );
        let complexity_multiplier = tables.complexity_multiplier(config.complexity_tier);
        let total_cost =
            cents((material_cost + accessory_cost + cutting_cost) * complexity_multiplier);

        let name = if input.name.is_empty() {
            format!("Componente_{}", component_type.code())
        } else {
            input.name.clone()
        };

        ComponentCost {
            name,
            component_type,
            area_m2: area,
            material_cost,
            accessory_cost,
            cutting_cost,
            complexity_multiplier,
            total_cost,
            price_per_m2: cents(total_cost / area),
            vertices: input.vertices.clone(),
            faces: input.faces.clone(),
            dimensions_mm: input.dimensions_mm.unwrap_or(DEFAULT_DIMENSIONS_MM),
        }
    }

    /// Price every component of an analysis
    ///
    /// Returns [`BudgetResult::empty`] when the analysis has no component.
    pub fn compute_budget(
        &self,
        analysis: &AnalysisResult,
        config: &PricingConfiguration,
    ) -> BudgetResult {
        self.compute_budget_at(analysis, config, Utc::now())
    }

    /// [`CostEngine::compute_budget`] with an explicit timestamp
    pub fn compute_budget_at(
        &self,
        analysis: &AnalysisResult,
        config: &PricingConfiguration,
        computed_at: DateTime<Utc>,
    ) -> BudgetResult {
        let inputs: Vec<CostInput> = analysis.components.iter().map(CostInput::from).collect();
        self.price_components(&inputs, config, computed_at)
    }

    /// Price hand-built components
    pub fn price_components(
        &self,
        inputs: &[CostInput],
        config: &PricingConfiguration,
        computed_at: DateTime<Utc>,
    ) -> BudgetResult {
        if inputs.is_empty() {
            tracing::info!("nothing to price");
            return BudgetResult::empty(config.clone(), computed_at);
        }

        let components: Vec<ComponentCost> = inputs
            .iter()
            .map(|input| self.price_component(input, config))
            .collect();
        let summary = summarize_costs(&components, config.profit_margin_pct);

        tracing::info!(
            components = summary.component_count,
            area_m2 = summary.total_area_m2,
            subtotal = summary.subtotal,
            final_value = summary.final_value,
            material = %config.material,
            "budget computed"
        );

        BudgetResult {
            components,
            summary,
            configuration: config.clone(),
            computed_at,
            price_source: self.tables.source_label(),
        }
    }

    /// Compare the raw sheet cost of a budget with another material
    ///
    /// Waste is not included. Returns `None` for an empty budget.
    pub fn compare_material(
        &self,
        budget: &BudgetResult,
        alternative: Material,
    ) -> Option<MaterialComparison> {
        if budget.is_empty() {
            return None;
        }
        let current = budget.configuration.material;
        let current_unit_price = self.tables.material_price(current).unit_price;
        let alternative_unit_price = self.tables.material_price(alternative).unit_price;
        let total_area_m2: f64 = budget.components.iter().map(|c| c.area_m2).sum();

        let current_cost = total_area_m2 * current_unit_price;
        let alternative_cost = total_area_m2 * alternative_unit_price;
        let savings = current_cost - alternative_cost;
        let savings_pct = if current_cost > 0.0 {
            round_to(savings / current_cost * 100.0, 1)
        } else {
            0.0
        };

        Some(MaterialComparison {
            current_material: current,
            alternative_material: alternative,
            current_unit_price,
            alternative_unit_price,
            total_area_m2,
            current_cost: cents(current_cost),
            alternative_cost: cents(alternative_cost),
            savings: cents(savings),
            savings_pct,
        })
    }
}

/// Aggregate priced components into budget totals
///
/// Totals are sums of the already-rounded component figures.
pub fn summarize_costs(components: &[ComponentCost], profit_margin_pct: f64) -> BudgetSummary {
    let total_area_m2 = round_to(components.iter().map(|c| c.area_m2).sum(), 3);
    let material_cost = cents(components.iter().map(|c| c.material_cost).sum());
    let accessory_cost = cents(components.iter().map(|c| c.accessory_cost).sum());
    let cutting_cost = cents(components.iter().map(|c| c.cutting_cost).sum());
    let subtotal = cents(material_cost + accessory_cost + cutting_cost);
    let profit_value = cents(subtotal * profit_margin_pct / 100.0);
    let final_value = cents(subtotal + profit_value);
    let price_per_m2 = if total_area_m2 > 0.0 {
        cents(final_value / total_area_m2)
    } else {
        0.0
    };

    BudgetSummary {
        component_count: components.len(),
        total_area_m2,
        material_cost,
        accessory_cost,
        cutting_cost,
        subtotal,
        profit_margin_pct: round_to(profit_margin_pct, 1),
        profit_value,
        final_value,
        price_per_m2,
    }
}
