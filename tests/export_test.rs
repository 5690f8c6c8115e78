//! Integration tests for the report and JSON export

use orca3d::{
    AnalysisResult, BudgetResult, ComponentType, PricingConfiguration, estimate, report,
};

const WARDROBE: &str = "\
o Guarda_Roupa
v 0 0 0
v 1800 2400 600
o Porta_Correr
v 0 0 0
v 900 2300 18
o Gaveta_Interna
v 0 0 0
v 800 200 500
";

fn wardrobe_budget() -> BudgetResult {
    estimate(
        "quarto.obj",
        WARDROBE.as_bytes(),
        &PricingConfiguration::default().with_profit_margin(35.0),
    )
    .unwrap()
}

#[test]
fn test_json_round_trip() {
    let budget = wardrobe_budget();
    let json = budget.to_json().unwrap();
    let restored = BudgetResult::from_json(&json).unwrap();
    assert_eq!(restored, budget);

    // exporting again gives the same document
    assert_eq!(restored.to_json().unwrap(), json);
}

#[test]
fn test_json_round_trip_of_fallback_budget() {
    let budget = estimate("quebrado.stl", &[1u8; 300], &PricingConfiguration::default()).unwrap();
    let restored = report::from_json(&report::to_json(&budget).unwrap()).unwrap();
    assert_eq!(restored, budget);
}

#[test]
fn test_json_round_trip_ignores_non_finite_coordinates() {
    let obj = b"o Porta\nv 0 0 0\nv 450 700 18\nv nan 0 0\nv 1e400 0 0\n";
    let budget = estimate("porta.obj", obj, &PricingConfiguration::default()).unwrap();
    assert_eq!(budget.components[0].vertices.len(), 2);

    let json = budget.to_json().unwrap();
    assert!(!json.contains("null"));
    assert_eq!(BudgetResult::from_json(&json).unwrap(), budget);

    let stl = b"solid x\nvertex 0 0 0\nvertex inf 0 0\nvertex 600 0 0\nvertex 600 400 18\n";
    let budget = estimate("tampo.stl", stl, &PricingConfiguration::default()).unwrap();
    assert_eq!(budget.components[0].vertices.len(), 3);
    assert_eq!(BudgetResult::from_json(&budget.to_json().unwrap()).unwrap(), budget);
}

#[test]
fn test_json_structure() {
    let budget = wardrobe_budget();
    let value: serde_json::Value = serde_json::from_str(&budget.to_json().unwrap()).unwrap();

    assert_eq!(value["componentes"].as_array().unwrap().len(), 3);
    assert_eq!(value["componentes"][0]["tipo"], "armario");
    assert_eq!(value["componentes"][1]["tipo"], "porta");
    assert_eq!(value["resumo"]["quantidade_componentes"], 3);
    assert_eq!(value["configuracoes"]["material"], "mdf_15mm");
    assert_eq!(value["configuracoes"]["qualidade_acessorios"], "comum");
    assert_eq!(value["configuracoes"]["complexidade"], "media");
    assert_eq!(value["configuracoes"]["margem_lucro"], 35.0);
    assert_eq!(
        value["fonte_precos"],
        "Léo Madeiras - Atualizado em 30/06/2025"
    );
    assert!(value["data_calculo"].as_str().unwrap().contains('T'));
    assert!(value["componentes"][0]["dimensoes_mm"].is_array());
}

#[test]
fn test_analysis_json_round_trip() {
    let analysis = AnalysisResult::from_bytes("quarto.obj", WARDROBE.as_bytes()).unwrap();
    let json = serde_json::to_string(&analysis).unwrap();
    assert!(json.contains("\"status\":\"sucesso\""));
    assert!(!json.contains("observacao"));
    let restored: AnalysisResult = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, analysis);
}

#[test]
fn test_report_contents() {
    let budget = wardrobe_budget();
    let text = budget.to_report("Ana Souza", "Quarto de Casal");

    assert!(text.starts_with(report::REPORT_TITLE));
    assert!(text.contains("**Cliente:** Ana Souza"));
    assert!(text.contains("**Ambiente:** Quarto de Casal"));
    assert!(text.contains("- **Quantidade de Componentes:** 3"));
    assert!(text.contains(&format!(
        "- **Valor Final:** {}",
        report::format_currency(budget.summary.final_value)
    )));
    assert!(text.contains("Margem de Lucro (35.0%)"));
    assert!(text.contains("### 3. Gaveta_Interna"));
    assert!(text.contains(&format!(
        "- **Tipo:** {}",
        ComponentType::Drawer.display_name()
    )));

    let summary = text.find("## RESUMO EXECUTIVO").unwrap();
    let breakdown = text.find("## BREAKDOWN DE CUSTOS").unwrap();
    let detail = text.find("## DETALHAMENTO POR COMPONENTE").unwrap();
    assert!(summary < breakdown && breakdown < detail);
}
