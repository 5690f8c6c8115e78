//! Property-based tests for orca3d
//!
//! These tests use proptest to generate arbitrary uploads, geometry and
//! pricing configurations and verify that the pipeline invariants hold.

use orca3d::{
    AccessoryQuality, Analyzer, BudgetResult, ComplexityTier, ComponentType, CostEngine, CostInput, FileFormat,
    Material, PricingConfiguration, RawGeometryObject, Vertex, classify, mesh_ops,
};
use proptest::prelude::*;

// ============================================================================
// Generators
// ============================================================================

fn format_strategy() -> impl Strategy<Value = FileFormat> {
    prop::sample::select(FileFormat::ALL.to_vec())
}

/// Byte payloads biased towards the line structure the parsers look for
fn payload_strategy() -> impl Strategy<Value = Vec<u8>> {
    let line = prop_oneof![
        "(o|g) [A-Za-z_]{0,12}",
        "v -?[0-9]{1,5}(\\.[0-9]{1,3})? -?[0-9]{1,5} -?[0-9]{1,5}",
        "v (nan|inf|-inf|infinity|1e400) 0 [0-9]{1,3}",
        "f( -?[0-9]{1,3}(/[0-9]{0,2}){0,2}){0,5}",
        "solid [a-z]{0,6}",
        "vertex [0-9]{1,4} [0-9]{1,4} [0-9]{1,4}",
        "vertex (NaN|-1e999) [0-9]{1,4} 0",
        "ply|end_header|element (vertex|face) [0-9]{1,4}",
        "<geometry id=\"[A-Za-z_]{0,10}\"/>",
        "[ -~]{0,40}",
    ];
    prop_oneof![
        prop::collection::vec(any::<u8>(), 0..512),
        prop::collection::vec(line, 0..40).prop_map(|lines| lines.join("\n").into_bytes()),
    ]
}

fn vertex_strategy() -> impl Strategy<Value = Vertex> {
    (
        prop::num::f64::ANY,
        prop::num::f64::ANY,
        prop::num::f64::ANY,
    )
        .prop_map(|(x, y, z)| Vertex::new(x, y, z))
}

fn config_strategy() -> impl Strategy<Value = PricingConfiguration> {
    (
        prop::sample::select(Material::ALL.to_vec()),
        prop::sample::select(vec![AccessoryQuality::Standard, AccessoryQuality::Premium]),
        prop::sample::select(ComplexityTier::ALL.to_vec()),
        0.0f64..100.0,
    )
        .prop_map(|(material, quality, tier, margin)| {
            PricingConfiguration::new(material, quality, tier, margin)
        })
}

fn cost_input_strategy() -> impl Strategy<Value = CostInput> {
    (
        "[A-Za-z_]{0,16}",
        prop::option::of(0.0f64..50.0),
        prop::option::of((0.0f64..3000.0, 0.0f64..3000.0, 0.0f64..100.0)),
    )
        .prop_map(|(name, area, dims)| CostInput {
            name,
            area_m2: area,
            dimensions_mm: dims.map(|(w, h, d)| [w, h, d]),
            ..Default::default()
        })
}

fn within_cent(a: f64, b: f64) -> bool {
    (a - b).abs() <= 0.01 + 1e-9
}

fn cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_analysis_never_empty(format in format_strategy(), bytes in payload_strategy()) {
        let analysis = Analyzer::default().analyze_as(format, "upload", &bytes);
        prop_assert!(!analysis.components.is_empty());
        prop_assert_eq!(
            analysis.total_vertices,
            analysis.components.iter().map(|c| c.vertex_count).sum::<usize>()
        );
    }

    #[test]
    fn prop_component_area_floor(format in format_strategy(), bytes in payload_strategy()) {
        let analysis = Analyzer::default().analyze_as(format, "upload", &bytes);
        for component in &analysis.components {
            prop_assert!(component.area_m2 >= 0.1, "area {}", component.area_m2);
            prop_assert!(component.area_m2.is_finite());
        }
    }

    #[test]
    fn prop_json_round_trip(
        format in format_strategy(),
        bytes in payload_strategy(),
        config in config_strategy(),
    ) {
        let analysis = Analyzer::default().analyze_as(format, "upload", &bytes);
        let budget = BudgetResult::from_analysis(&analysis, &config);
        let json = budget.to_json().unwrap();
        let restored = BudgetResult::from_json(&json).unwrap();
        prop_assert_eq!(restored, budget);
    }

    #[test]
    fn prop_summarize_area_floor(vertices in prop::collection::vec(vertex_strategy(), 0..20)) {
        let mut object = RawGeometryObject::new("peca");
        object.vertices = vertices;
        let summary = mesh_ops::summarize(object);
        prop_assert!(summary.area_m2 >= 0.1);
        prop_assert!(summary.area_m2.is_finite());
    }

    #[test]
    fn prop_component_cost_reconciles(
        input in cost_input_strategy(),
        config in config_strategy(),
    ) {
        let cost = CostEngine::default().price_component(&input, &config);
        let expected = cents(
            (cost.material_cost + cost.accessory_cost + cost.cutting_cost)
                * cost.complexity_multiplier,
        );
        prop_assert!(within_cent(cost.total_cost, expected));
        prop_assert!(cost.area_m2 >= 0.1);
        prop_assert!(cost.cutting_cost >= 15.0);
    }

    #[test]
    fn prop_summary_reconciles(
        inputs in prop::collection::vec(cost_input_strategy(), 1..12),
        config in config_strategy(),
    ) {
        let budget = CostEngine::default().price_components(&inputs, &config, chrono::Utc::now());
        let s = &budget.summary;
        prop_assert_eq!(s.component_count, inputs.len());
        prop_assert!(within_cent(s.subtotal, s.material_cost + s.accessory_cost + s.cutting_cost));
        prop_assert!(within_cent(
            s.final_value,
            cents(s.subtotal * (1.0 + config.profit_margin_pct / 100.0))
        ));
    }

    #[test]
    fn prop_classifier_deterministic(name in "\\PC{0,24}") {
        prop_assert_eq!(classify(&name), classify(&name));
    }

    #[test]
    fn prop_unknown_names_are_cabinets(name in "[0-9 _.\\-]{0,24}") {
        prop_assert_eq!(classify(&name), ComponentType::Cabinet);
    }
}
