//! Text report and JSON export of a budget
//!
//! The text report is a Markdown document with a fixed section order:
//! header, executive summary, cost breakdown, then one numbered section per
//! component. The JSON export is the serde form of [`BudgetResult`] and
//! reads back into an equal value with [`from_json`].

use std::fmt;

use crate::error::Result;
use crate::model::BudgetResult;

/// Report title line
pub const REPORT_TITLE: &str = "# ORÇAMENTO DETALHADO - ORCA INTERIORES";

const DATE_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Format a number with thousands separators and a fixed number of decimals
///
/// `1234567.891` with 2 decimals becomes `1,234,567.89`.
pub fn format_grouped(value: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(fixed.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if let Some(frac_part) = frac_part {
        grouped.push('.');
        grouped.push_str(frac_part);
    }

    let is_negative = value < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0');
    if is_negative {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Format an amount in reais: `R$ 1,234.56`
pub fn format_currency(value: f64) -> String {
    format!("R$ {}", format_grouped(value, 2))
}

/// Renderable report for one budget
///
/// Prefer [`render_report`], which returns an empty string for an empty
/// budget.
pub struct Report<'a> {
    budget: &'a BudgetResult,
    client: &'a str,
    environment: &'a str,
}

impl<'a> Report<'a> {
    /// Wrap a budget with the client and room names shown in the header
    pub fn new(budget: &'a BudgetResult, client: &'a str, environment: &'a str) -> Self {
        Self {
            budget,
            client,
            environment,
        }
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let budget = self.budget;
        let s = &budget.summary;

        writeln!(f, "{}", REPORT_TITLE)?;
        writeln!(f)?;
        writeln!(f, "**Cliente:** {}", self.client)?;
        writeln!(f, "**Ambiente:** {}", self.environment)?;
        writeln!(f, "**Data:** {}", budget.computed_at.format(DATE_FORMAT))?;
        writeln!(f, "**Fonte de Preços:** {}", budget.price_source)?;
        writeln!(f)?;

        writeln!(f, "## RESUMO EXECUTIVO")?;
        writeln!(f)?;
        writeln!(f, "- **Quantidade de Componentes:** {}", s.component_count)?;
        writeln!(f, "- **Área Total:** {} m²", s.total_area_m2)?;
        writeln!(f, "- **Valor Final:** {}", format_currency(s.final_value))?;
        writeln!(f, "- **Preço por m²:** {}", format_currency(s.price_per_m2))?;
        writeln!(f)?;

        writeln!(f, "## BREAKDOWN DE CUSTOS")?;
        writeln!(f)?;
        writeln!(f, "- **Material:** {}", format_currency(s.material_cost))?;
        writeln!(f, "- **Acessórios:** {}", format_currency(s.accessory_cost))?;
        writeln!(f, "- **Corte/Usinagem:** {}", format_currency(s.cutting_cost))?;
        writeln!(f, "- **Subtotal:** {}", format_currency(s.subtotal))?;
        writeln!(
            f,
            "- **Margem de Lucro ({:.1}%):** {}",
            s.profit_margin_pct,
            format_currency(s.profit_value)
        )?;
        writeln!(f)?;

        writeln!(f, "## DETALHAMENTO POR COMPONENTE")?;
        for (i, c) in budget.components.iter().enumerate() {
            writeln!(f)?;
            writeln!(f, "### {}. {}", i + 1, c.name)?;
            writeln!(f, "- **Tipo:** {}", c.component_type.display_name())?;
            writeln!(f, "- **Área:** {} m²", c.area_m2)?;
            writeln!(f, "- **Material:** {}", format_currency(c.material_cost))?;
            writeln!(f, "- **Acessórios:** {}", format_currency(c.accessory_cost))?;
            writeln!(f, "- **Corte:** {}", format_currency(c.cutting_cost))?;
            writeln!(f, "- **Total:** {}", format_currency(c.total_cost))?;
            writeln!(f, "- **Preço/m²:** {}", format_currency(c.price_per_m2))?;
        }

        writeln!(f)?;
        writeln!(f, "---")?;
        writeln!(f, "*Orçamento gerado automaticamente pelo sistema Orca Interiores*")?;
        writeln!(f, "*Preços sujeitos a alteração conforme disponibilidade de material*")
    }
}

/// Render the text report of a budget
///
/// Returns an empty string when the budget has no component.
pub fn render_report(budget: &BudgetResult, client: &str, environment: &str) -> String {
    if budget.is_empty() {
        return String::new();
    }
    Report::new(budget, client, environment).to_string()
}

/// Export a budget as pretty-printed JSON
///
/// Non-ASCII text is written as-is.
pub fn to_json(budget: &BudgetResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(budget)?)
}

/// Read a budget back from its JSON export
pub fn from_json(json: &str) -> Result<BudgetResult> {
    Ok(serde_json::from_str(json)?)
}
