//! Integration tests for pricing analyses end to end

use chrono::{TimeZone, Utc};
use orca3d::{
    AccessoryQuality, Analyzer, BudgetResult, ComplexityTier, CostEngine, CostInput, Material,
    PriceTables, PricingConfiguration, estimate,
};

fn cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn assert_within_cent(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() <= 0.01 + 1e-9,
        "expected {} to be within one cent of {}",
        actual,
        expected
    );
}

const KITCHEN: &str = "\
o Armario_Cozinha
v 0 0 0
v 1000 0 0
v 1000 1000 0
v 0 1000 0
v 0 0 20
v 1000 0 20
v 1000 1000 20
v 0 1000 20
o Porta_Esquerda
v 0 0 0
v 450 0 0
v 450 700 18
o Gaveta
v 0 0 0
v 400 150 0
v 400 150 450
o Prateleira
v 0 0 0
v 800 300 18
";

fn kitchen_budget(config: &PricingConfiguration) -> BudgetResult {
    let analysis = Analyzer::default()
        .analyze("cozinha.obj", KITCHEN.as_bytes())
        .unwrap();
    CostEngine::default().compute_budget(&analysis, config)
}

#[test]
fn test_cabinet_box_material_cost() {
    let budget = kitchen_budget(&PricingConfiguration::default());
    let cabinet = &budget.components[0];

    assert_eq!(cabinet.name, "Armario_Cozinha");
    assert!((cabinet.area_m2 - 2.08).abs() < 1e-9);
    // 2.08 * 69.15 * 1.15
    assert_within_cent(cabinet.material_cost, 165.41);
}

#[test]
fn test_profit_on_round_subtotal() {
    // 2.0 m² at a flat 400/m², no waste, no hardware, floor-only cutting
    let mut tables = PriceTables::default();
    tables
        .materials
        .insert(Material::Mdf15, orca3d::pricing::MaterialPrice::new(400.0, 0.0));
    tables.accessories.clear();
    tables.labor.straight_cut_per_m = 0.0;
    tables.labor.minimum_piece_rate = 100.0;
    let engine = CostEngine::new(tables);

    let config = PricingConfiguration::default()
        .with_complexity(ComplexityTier::Simple)
        .with_profit_margin(30.0);
    let budget = engine.price_components(
        &[
            CostInput::named("Painel_A").with_area(1.0),
            CostInput::named("Painel_B").with_area(1.0),
        ],
        &config,
        Utc::now(),
    );

    assert_eq!(budget.summary.subtotal, 1000.0);
    assert_eq!(budget.summary.profit_value, 300.0);
    assert_eq!(budget.summary.final_value, 1300.0);
}

#[test]
fn test_component_totals_reconcile() {
    for tier in ComplexityTier::ALL {
        for quality in [AccessoryQuality::Standard, AccessoryQuality::Premium] {
            let config = PricingConfiguration::default()
                .with_complexity(tier)
                .with_accessory_quality(quality)
                .with_material(Material::Melamine18);
            for c in kitchen_budget(&config).components {
                let expected = cents(
                    (c.material_cost + c.accessory_cost + c.cutting_cost) * c.complexity_multiplier,
                );
                assert_within_cent(c.total_cost, expected);
                assert_within_cent(c.price_per_m2, c.total_cost / c.area_m2);
            }
        }
    }
}

#[test]
fn test_summary_reconciles() {
    for margin in [10.0, 22.5, 30.0, 50.0] {
        let budget = kitchen_budget(&PricingConfiguration::default().with_profit_margin(margin));
        let s = &budget.summary;

        assert_eq!(s.component_count, 4);
        assert_within_cent(s.subtotal, s.material_cost + s.accessory_cost + s.cutting_cost);
        assert_within_cent(s.final_value, cents(s.subtotal * (1.0 + margin / 100.0)));

        let material: f64 = budget.components.iter().map(|c| c.material_cost).sum();
        assert_within_cent(s.material_cost, material);
    }
}

#[test]
fn test_components_keep_analysis_order() {
    let budget = kitchen_budget(&PricingConfiguration::default());
    let names: Vec<&str> = budget.components.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Armario_Cozinha", "Porta_Esquerda", "Gaveta", "Prateleira"]
    );
}

#[test]
fn test_fallback_analysis_still_priced() {
    let budget = estimate("danificado.stl", &[0u8; 200], &PricingConfiguration::default()).unwrap();
    assert_eq!(budget.components.len(), 1);
    assert_eq!(budget.components[0].area_m2, 2.0);
    assert!(budget.summary.final_value > 0.0);
}

#[test]
fn test_substituted_tables_from_json() {
    let mut tables = PriceTables::default();
    tables.supplier = "Madeireira Teste".to_string();
    tables.updated_on = "01/01/2026".to_string();
    let json = serde_json::to_string(&tables).unwrap();

    let engine = CostEngine::new(PriceTables::from_json_str(&json).unwrap());
    let at = Utc.with_ymd_and_hms(2026, 1, 2, 9, 0, 0).unwrap();
    let budget = engine.price_components(
        &[CostInput::named("Tampo").with_area(1.0)],
        &PricingConfiguration::default(),
        at,
    );
    assert_eq!(budget.price_source, "Madeireira Teste - Atualizado em 01/01/2026");
    assert_eq!(budget.computed_at, at);
}

#[test]
fn test_material_comparison_on_budget() {
    let engine = CostEngine::default();
    let budget = kitchen_budget(&PricingConfiguration::default().with_material(Material::Mdf18));
    let cmp = engine.compare_material(&budget, Material::Mdf15).unwrap();

    assert_eq!(cmp.current_material, Material::Mdf18);
    assert!(cmp.savings > 0.0);
    assert_within_cent(cmp.savings, cmp.current_cost - cmp.alternative_cost);
}

#[test]
fn test_catalog_lists_every_material() {
    let catalog = CostEngine::default().catalog();
    let materials: Vec<Material> = catalog.materials.iter().map(|m| m.material).collect();
    assert_eq!(materials, Material::ALL.to_vec());
    assert_eq!(catalog.labor.minimum_piece_rate, 15.0);
}
