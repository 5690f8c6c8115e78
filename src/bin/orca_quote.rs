//! Command-line quoting tool
//!
//! Analyzes one model file, prices it and prints either the Markdown
//! report or the JSON export.

use anyhow::Context;
use clap::Parser;
use orca3d::{
    AccessoryQuality, Analyzer, AnalyzerConfig, ComplexityTier, CostEngine, Material, Plan,
    PriceTables, PricingConfiguration, report,
};
use std::path::PathBuf;

/// Command-line arguments for the quoting tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Model file to quote (.obj, .dae, .stl, .ply)
    #[arg(value_name = "FILE")]
    file_path: PathBuf,

    /// Sheet material code
    #[arg(short, long, default_value = "mdf_15mm")]
    material: Material,

    /// Hardware quality (comum, premium)
    #[arg(short, long, default_value = "comum")]
    quality: AccessoryQuality,

    /// Complexity tier (simples, media, complexa, premium)
    #[arg(short, long, default_value = "media")]
    complexity: ComplexityTier,

    /// Profit margin in percent
    #[arg(long, default_value_t = 30.0)]
    margin: f64,

    /// Client name shown in the report header
    #[arg(long, default_value = "Cliente")]
    client: String,

    /// Room name shown in the report header
    #[arg(long, default_value = "Ambiente")]
    environment: String,

    /// Print the JSON export instead of the report
    #[arg(long)]
    json: bool,

    /// Subscription plan whose upload ceiling applies
    #[arg(long, value_name = "PLAN")]
    plan: Option<String>,

    /// Load price tables from a JSON file
    #[arg(long, value_name = "PRICES")]
    prices: Option<PathBuf>,

    /// Also compare raw sheet cost against another material
    #[arg(long, value_name = "MATERIAL")]
    compare: Option<Material>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let analyzer_config = match args.plan.as_deref() {
        Some(code) => AnalyzerConfig::for_plan(Plan::lookup(code)),
        None => AnalyzerConfig::from_env(),
    };
    let tables = match &args.prices {
        Some(path) => PriceTables::from_path(path)
            .with_context(|| format!("loading price tables from {}", path.display()))?,
        None => PriceTables::default(),
    };

    let analysis = Analyzer::new(analyzer_config)
        .analyze_path(&args.file_path)
        .with_context(|| format!("analyzing {}", args.file_path.display()))?;
    if let Some(note) = &analysis.note {
        tracing::warn!("{}", note);
    }

    let config = PricingConfiguration::new(args.material, args.quality, args.complexity, args.margin);
    let engine = CostEngine::new(tables);
    let budget = engine.compute_budget(&analysis, &config);

    if args.json {
        println!("{}", report::to_json(&budget)?);
    } else {
        print!("{}", report::render_report(&budget, &args.client, &args.environment));
    }

    if let Some(cmp) = args
        .compare
        .and_then(|alternative| engine.compare_material(&budget, alternative))
    {
        eprintln!(
            "{} -> {}: {} vs {} ({} / {:.1}%)",
            cmp.current_material.display_name(),
            cmp.alternative_material.display_name(),
            report::format_currency(cmp.current_cost),
            report::format_currency(cmp.alternative_cost),
            report::format_currency(cmp.savings),
            cmp.savings_pct
        );
    }

    Ok(())
}
