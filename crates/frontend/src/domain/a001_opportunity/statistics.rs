//! Summary counters shown above the opportunity table

use chrono::{Datelike, NaiveDate};
use contracts::domain::a001_opportunity::aggregate::{Opportunity, OpportunityType};
use contracts::domain::a001_opportunity::analytics::OpportunityAnalytics;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpportunityStatistics {
    pub total_opportunities: usize,
    pub open_opportunities: usize,
    pub tender_opportunities: usize,
    pub non_tender_opportunities: usize,
    pub this_month_opportunities: usize,
    pub win_rate: f64,
    pub average_deal_size: f64,
    pub average_sales_cycle: f64,
    pub qualification_rate: f64,
    pub total_pipeline_value: f64,
}

impl OpportunityStatistics {
    /// Counts come from the loaded list, rates and values from the analytics snapshot.
    ///
    /// `today` is the local calendar date; an opportunity counts toward
    /// `this_month_opportunities` when it was created in that month and year.
    pub fn calculate(
        opportunities: &[Opportunity],
        analytics: Option<&OpportunityAnalytics>,
        today: NaiveDate,
    ) -> Self {
        let count_type = |t: OpportunityType| {
            opportunities
                .iter()
                .filter(|o| o.opportunity_type == t.as_str())
                .count()
        };

        let this_month = opportunities
            .iter()
            .filter_map(Opportunity::created_at_local)
            .filter(|created| created.year() == today.year() && created.month() == today.month())
            .count();

        let metric = |pick: fn(&OpportunityAnalytics) -> Option<f64>| {
            analytics.and_then(pick).unwrap_or(0.0)
        };

        Self {
            total_opportunities: opportunities.len(),
            open_opportunities: opportunities.iter().filter(|o| o.is_open()).count(),
            tender_opportunities: count_type(OpportunityType::Tender),
            non_tender_opportunities: count_type(OpportunityType::NonTender),
            this_month_opportunities: this_month,
            win_rate: metric(|a| a.win_rate),
            average_deal_size: metric(|a| a.average_deal_size),
            average_sales_cycle: metric(|a| a.average_sales_cycle),
            qualification_rate: metric(|a| a.qualification_completion_rate),
            total_pipeline_value: metric(|a| a.total_pipeline_value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opp(state: &str, kind: &str, created_at: &str) -> Opportunity {
        Opportunity {
            id: format!("{}-{}-{}", state, kind, created_at),
            state: state.into(),
            opportunity_type: kind.into(),
            created_at: created_at.into(),
            ..Default::default()
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 20).unwrap()
    }

    #[test]
    fn test_empty_inputs_are_all_zero() {
        let stats = OpportunityStatistics::calculate(&[], None, today());
        assert_eq!(stats, OpportunityStatistics::default());
    }

    #[test]
    fn test_counts() {
        let list = vec![
            opp("Open", "Tender", "2024-03-02T10:00:00"),
            opp("Open", "Non-Tender", "2024-02-28T10:00:00"),
            opp("Won", "Tender", "2023-03-10T10:00:00"),
            opp("Lost", "Framework", "2024-03-19"),
            opp("Open", "", "not a date"),
        ];
        let stats = OpportunityStatistics::calculate(&list, None, today());

        assert_eq!(stats.total_opportunities, 5);
        assert_eq!(stats.open_opportunities, 3);
        assert_eq!(stats.tender_opportunities, 2);
        assert_eq!(stats.non_tender_opportunities, 1);
        assert!(stats.tender_opportunities + stats.non_tender_opportunities <= list.len());
        // same month of a different year does not count
        assert_eq!(stats.this_month_opportunities, 2);
    }

    #[test]
    fn test_state_match_is_exact() {
        let list = vec![opp("open", "Tender", ""), opp("Open ", "Tender", "")];
        let stats = OpportunityStatistics::calculate(&list, None, today());
        assert_eq!(stats.open_opportunities, 0);
    }

    #[test]
    fn test_analytics_passthrough_defaults_to_zero() {
        let analytics = OpportunityAnalytics {
            win_rate: Some(37.5),
            total_pipeline_value: Some(2_500_000.0),
            qualification_completion_rate: Some(80.0),
            ..Default::default()
        };
        let stats = OpportunityStatistics::calculate(&[], Some(&analytics), today());

        assert_eq!(stats.win_rate, 37.5);
        assert_eq!(stats.total_pipeline_value, 2_500_000.0);
        assert_eq!(stats.qualification_rate, 80.0);
        assert_eq!(stats.average_deal_size, 0.0);
        assert_eq!(stats.average_sales_cycle, 0.0);
    }
}
