//! Subscription plans
//!
//! Plans bound two things in this crate: the upload size accepted by the
//! [`Analyzer`](crate::analyzer::Analyzer) (see
//! [`AnalyzerConfig::for_plan`](crate::analyzer::AnalyzerConfig::for_plan))
//! and the number of projects a user may price per calendar month.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Subscription plan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Plan {
    /// Free tier
    #[default]
    #[serde(rename = "gratuito")]
    Free,
    /// Basic tier
    #[serde(rename = "basico")]
    Basic,
    /// Professional tier
    #[serde(rename = "profissional")]
    Professional,
    /// Enterprise tier
    #[serde(rename = "empresarial")]
    Enterprise,
}

const COMMON_FEATURES: [&str; 2] = ["upload_basico", "orcamento_simples"];

impl Plan {
    /// All plans, cheapest first
    pub const ALL: [Plan; 4] = [Plan::Free, Plan::Basic, Plan::Professional, Plan::Enterprise];

    /// Resolve a plan code; unknown codes resolve to [`Plan::Free`]
    pub fn lookup(code: &str) -> Plan {
        let code = code.trim().to_lowercase();
        Plan::ALL
            .into_iter()
            .find(|plan| plan.code() == code)
            .unwrap_or_else(|| {
                tracing::debug!(code, "unknown plan, using free tier");
                Plan::Free
            })
    }

    /// Plan code
    pub fn code(&self) -> &'static str {
        match self {
            Plan::Free => "gratuito",
            Plan::Basic => "basico",
            Plan::Professional => "profissional",
            Plan::Enterprise => "empresarial",
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            Plan::Free => "Gratuito",
            Plan::Basic => "Básico",
            Plan::Professional => "Profissional",
            Plan::Enterprise => "Empresarial",
        }
    }

    /// Monthly price in reais
    pub fn monthly_price(&self) -> f64 {
        match self {
            Plan::Free => 0.00,
            Plan::Basic => 49.90,
            Plan::Professional => 99.90,
            Plan::Enterprise => 299.90,
        }
    }

    /// Projects that may be priced per calendar month
    pub fn projects_per_month(&self) -> u32 {
        match self {
            Plan::Free => 3,
            Plan::Basic => 50,
            Plan::Professional => 200,
            Plan::Enterprise => 999_999,
        }
    }

    /// Upload ceiling in megabytes
    pub fn upload_max_mb(&self) -> u64 {
        match self {
            Plan::Free => 50,
            Plan::Basic => 200,
            Plan::Professional => 500,
            Plan::Enterprise => 1000,
        }
    }

    /// Feature codes enabled by the plan
    pub fn features(&self) -> Vec<&'static str> {
        let extra: &[&str] = match self {
            Plan::Free => &["suporte_email"],
            Plan::Basic => &[
                "visualizacao_3d",
                "precos_atualizados",
                "relatorios_pdf",
                "suporte_prioritario",
            ],
            Plan::Professional => &[
                "visualizacao_3d",
                "precos_atualizados",
                "relatorios_pdf",
                "api_integracao",
                "white_label",
                "suporte_prioritario",
            ],
            Plan::Enterprise => &[
                "visualizacao_3d",
                "precos_atualizados",
                "relatorios_pdf",
                "api_integracao",
                "white_label",
                "multi_usuarios",
                "dashboard_avancado",
                "consultoria_inclusa",
                "suporte_24h",
            ],
        };
        COMMON_FEATURES.iter().chain(extra).copied().collect()
    }

    /// Whether a feature code is enabled
    pub fn has_feature(&self, feature: &str) -> bool {
        self.features().contains(&feature)
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Monthly project counter of one user
///
/// The counter restarts whenever a check happens in a different calendar
/// month than the last reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectQuota {
    /// Subscription plan
    #[serde(rename = "plano")]
    pub plan: Plan,
    /// Projects priced since the last reset
    #[serde(rename = "projetos_mes")]
    pub projects_this_month: u32,
    /// Date of the last reset
    #[serde(rename = "ultimo_reset_projetos")]
    pub last_reset: NaiveDate,
}

impl ProjectQuota {
    /// Fresh counter
    pub fn new(plan: Plan, today: NaiveDate) -> Self {
        Self {
            plan,
            projects_this_month: 0,
            last_reset: today,
        }
    }

    /// Reset the counter when `today` falls in a new month
    pub fn roll_over(&mut self, today: NaiveDate) {
        if today.year() != self.last_reset.year() || today.month() != self.last_reset.month() {
            self.projects_this_month = 0;
            self.last_reset = today;
        }
    }

    /// Projects left this month
    pub fn remaining(&self) -> u32 {
        self.plan
            .projects_per_month()
            .saturating_sub(self.projects_this_month)
    }

    /// Count one project if the plan allows it
    ///
    /// Returns `false` when the monthly limit is already reached.
    pub fn try_record_project(&mut self, today: NaiveDate) -> bool {
        self.roll_over(today);
        if self.remaining() == 0 {
            return false;
        }
        self.projects_this_month += 1;
        true
    }
}
