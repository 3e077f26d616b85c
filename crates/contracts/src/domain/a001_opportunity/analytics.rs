use crate::shared::serde_utils::null_as_default;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Reporting period accepted by `GET /api/opportunities/analytics`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalyticsPeriod {
    Weekly,
    #[default]
    Monthly,
    Quarterly,
    Yearly,
}

impl AnalyticsPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalyticsPeriod::Weekly => "weekly",
            AnalyticsPeriod::Monthly => "monthly",
            AnalyticsPeriod::Quarterly => "quarterly",
            AnalyticsPeriod::Yearly => "yearly",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "weekly" => Some(AnalyticsPeriod::Weekly),
            "monthly" => Some(AnalyticsPeriod::Monthly),
            "quarterly" => Some(AnalyticsPeriod::Quarterly),
            "yearly" => Some(AnalyticsPeriod::Yearly),
            _ => None,
        }
    }
}

/// Query string of the analytics endpoint
#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsQuery {
    pub period: AnalyticsPeriod,
}

/// Backend-computed pipeline analytics for one reporting period.
///
/// Replaced wholesale on every fetch; absent metrics read as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpportunityAnalytics {
    #[serde(default)]
    pub period: Option<String>,
    #[serde(default)]
    pub total_opportunities: Option<f64>,
    #[serde(default)]
    pub new_opportunities: Option<f64>,
    #[serde(default)]
    pub closed_opportunities: Option<f64>,
    #[serde(default)]
    pub won_opportunities: Option<f64>,
    #[serde(default)]
    pub lost_opportunities: Option<f64>,
    #[serde(default)]
    pub total_pipeline_value: Option<f64>,
    #[serde(default)]
    pub won_revenue: Option<f64>,
    #[serde(default)]
    pub lost_revenue: Option<f64>,
    #[serde(default)]
    pub average_deal_size: Option<f64>,
    #[serde(default)]
    pub win_rate: Option<f64>,
    #[serde(default)]
    pub loss_rate: Option<f64>,
    #[serde(default)]
    pub average_sales_cycle: Option<f64>,
    #[serde(default)]
    pub qualification_completion_rate: Option<f64>,
    #[serde(default)]
    pub stage_distribution: Option<Value>,
}

// ============================================================================
// KPIs
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerformanceStatus {
    Exceeded,
    OnTrack,
    AtRisk,
    Critical,
    Unknown,
}

impl PerformanceStatus {
    pub fn from_code(code: &str) -> Self {
        match code {
            "exceeded" => PerformanceStatus::Exceeded,
            "on_track" => PerformanceStatus::OnTrack,
            "at_risk" => PerformanceStatus::AtRisk,
            "critical" => PerformanceStatus::Critical,
            _ => PerformanceStatus::Unknown,
        }
    }

    /// BEM modifier used by the KPI list
    pub fn css_modifier(&self) -> &'static str {
        match self {
            PerformanceStatus::Exceeded => "success",
            PerformanceStatus::OnTrack => "info",
            PerformanceStatus::AtRisk => "warning",
            PerformanceStatus::Critical => "error",
            PerformanceStatus::Unknown => "neutral",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Kpi {
    #[serde(default, deserialize_with = "null_as_default")]
    pub kpi_code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub kpi_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub actual_value: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub target_value: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub performance_status: String,
}

impl Kpi {
    pub fn status(&self) -> PerformanceStatus {
        PerformanceStatus::from_code(&self.performance_status)
    }
}

// ============================================================================
// Team performance
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamMemberPerformance {
    #[serde(default, deserialize_with = "null_as_default")]
    pub owner_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_opportunities: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub won_opportunities: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub win_rate: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_pipeline_value: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamTotals {
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_opportunities: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_pipeline_value: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub team_win_rate: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamPerformance {
    #[serde(default, deserialize_with = "null_as_default")]
    pub team_performance: Vec<TeamMemberPerformance>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub team_totals: TeamTotals,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_parse() {
        assert_eq!(AnalyticsPeriod::parse("Quarterly"), Some(AnalyticsPeriod::Quarterly));
        assert_eq!(AnalyticsPeriod::parse("daily"), None);
        assert_eq!(AnalyticsPeriod::default().as_str(), "monthly");
    }

    #[test]
    fn test_analytics_partial_payload() {
        let a: OpportunityAnalytics =
            serde_json::from_str(r#"{"period": "monthly", "win_rate": 42.5, "average_deal_size": null}"#)
                .unwrap();
        assert_eq!(a.win_rate, Some(42.5));
        assert_eq!(a.average_deal_size, None);
        assert_eq!(a.total_pipeline_value, None);
    }

    #[test]
    fn test_kpi_status_mapping() {
        let k: Kpi = serde_json::from_str(
            r#"{"kpi_code": "WIN_RATE", "kpi_name": "Win Rate", "actual_value": 30, "target_value": 25, "performance_status": "exceeded"}"#,
        )
        .unwrap();
        assert_eq!(k.status(), PerformanceStatus::Exceeded);
        assert_eq!(PerformanceStatus::from_code("at_risk").css_modifier(), "warning");
        assert_eq!(PerformanceStatus::from_code("???"), PerformanceStatus::Unknown);
    }

    #[test]
    fn test_team_performance_defaults() {
        let t: TeamPerformance = serde_json::from_str(
            r#"{"team_performance": [{"owner_name": "Asha", "total_opportunities": 4, "won_opportunities": 1, "win_rate": 25.0, "total_pipeline_value": 90000}]}"#,
        )
        .unwrap();
        assert_eq!(t.team_performance.len(), 1);
        assert_eq!(t.team_totals.total_opportunities, 0);
    }
}
