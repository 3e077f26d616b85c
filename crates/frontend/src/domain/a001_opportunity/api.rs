use contracts::domain::a001_opportunity::aggregate::{
    AutoConvertResult, CreateOpportunityDto, CreatedOpportunity, Opportunity,
};
use contracts::domain::a001_opportunity::analytics::{
    AnalyticsPeriod, AnalyticsQuery, Kpi, OpportunityAnalytics, TeamPerformance,
};
use contracts::domain::a001_opportunity::details::{
    ImportantDate, OpportunityClause, OpportunityDocument, QualificationRule, QualificationStatus,
    StageHistoryEntry,
};
use contracts::domain::a002_lead::aggregate::{Lead, APPROVAL_STATUS_APPROVED};
use contracts::shared::master_data::{ActiveUser, Company, Currency, DocumentType};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use crate::shared::http::{unwrap_envelope, ApiError, ApiTransport};

pub const OPPORTUNITIES_PATH: &str = "/api/opportunities";

#[derive(Serialize)]
struct LeadQuery<'a> {
    status: &'a str,
}

fn query_string<Q: Serialize>(query: &Q) -> Result<String, ApiError> {
    serde_qs::to_string(query).map_err(|e| ApiError::Encode(e.to_string()))
}

fn opportunity_path(id: &str, resource: &str) -> String {
    format!("{}/{}/{}", OPPORTUNITIES_PATH, urlencoding::encode(id), resource)
}

/// Typed access to the opportunity endpoints and the master data they depend on
pub struct OpportunityApi<T> {
    transport: Arc<T>,
}

impl<T> Clone for OpportunityApi<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<T: ApiTransport> OpportunityApi<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }

    async fn get_data<D: DeserializeOwned>(&self, path: &str) -> Result<Option<D>, ApiError> {
        let value = self.transport.get(path).await?;
        unwrap_envelope(value)
    }

    /// List payloads; a missing `data` reads as empty
    async fn get_list<D: DeserializeOwned>(&self, path: &str) -> Result<Vec<D>, ApiError> {
        Ok(self.get_data(path).await?.unwrap_or_default())
    }

    // ------------------------------------------------------------------
    // Opportunities
    // ------------------------------------------------------------------

    pub async fn list_opportunities(&self) -> Result<Vec<Opportunity>, ApiError> {
        self.get_list(OPPORTUNITIES_PATH).await
    }

    pub async fn analytics(
        &self,
        period: AnalyticsPeriod,
    ) -> Result<Option<OpportunityAnalytics>, ApiError> {
        let query = query_string(&AnalyticsQuery { period })?;
        self.get_data(&format!("{}/analytics?{}", OPPORTUNITIES_PATH, query))
            .await
    }

    pub async fn kpis(&self) -> Result<Vec<Kpi>, ApiError> {
        self.get_list(&format!("{}/kpis", OPPORTUNITIES_PATH)).await
    }

    pub async fn team_performance(&self) -> Result<Option<TeamPerformance>, ApiError> {
        self.get_data(&format!("{}/team-performance", OPPORTUNITIES_PATH))
            .await
    }

    pub async fn create_opportunity(
        &self,
        dto: &CreateOpportunityDto,
    ) -> Result<Option<CreatedOpportunity>, ApiError> {
        let body = serde_json::to_value(dto).map_err(|e| ApiError::Encode(e.to_string()))?;
        let value = self.transport.post(OPPORTUNITIES_PATH, body).await?;
        unwrap_envelope(value)
    }

    pub async fn auto_convert(&self) -> Result<AutoConvertResult, ApiError> {
        let value = self
            .transport
            .post(
                &format!("{}/auto-convert", OPPORTUNITIES_PATH),
                Value::Object(Default::default()),
            )
            .await?;
        Ok(unwrap_envelope(value)?.unwrap_or_default())
    }

    // ------------------------------------------------------------------
    // Per-opportunity details
    // ------------------------------------------------------------------

    pub async fn qualification_rules(&self, id: &str) -> Result<Vec<QualificationRule>, ApiError> {
        self.get_list(&opportunity_path(id, "qualification-rules"))
            .await
    }

    pub async fn qualification_status(
        &self,
        id: &str,
    ) -> Result<Option<QualificationStatus>, ApiError> {
        self.get_data(&opportunity_path(id, "qualification-status"))
            .await
    }

    pub async fn stage_history(&self, id: &str) -> Result<Vec<StageHistoryEntry>, ApiError> {
        self.get_list(&opportunity_path(id, "stage-history")).await
    }

    pub async fn documents(&self, id: &str) -> Result<Vec<OpportunityDocument>, ApiError> {
        self.get_list(&opportunity_path(id, "documents")).await
    }

    pub async fn clauses(&self, id: &str) -> Result<Vec<OpportunityClause>, ApiError> {
        self.get_list(&opportunity_path(id, "clauses")).await
    }

    /// Tender calendar; callers only ask for tenders
    pub async fn important_dates(&self, id: &str) -> Result<Vec<ImportantDate>, ApiError> {
        self.get_list(&opportunity_path(id, "important-dates")).await
    }

    pub async fn won_details(&self, id: &str) -> Result<Option<Value>, ApiError> {
        self.get_data(&opportunity_path(id, "won-details")).await
    }

    pub async fn order_analysis(&self, id: &str) -> Result<Option<Value>, ApiError> {
        self.get_data(&opportunity_path(id, "order-analysis")).await
    }

    // ------------------------------------------------------------------
    // Master data
    // ------------------------------------------------------------------

    pub async fn approved_leads(&self) -> Result<Vec<Lead>, ApiError> {
        let query = query_string(&LeadQuery {
            status: APPROVAL_STATUS_APPROVED,
        })?;
        self.get_list(&format!("/api/leads?{}", query)).await
    }

    pub async fn companies(&self) -> Result<Vec<Company>, ApiError> {
        self.get_list("/api/companies").await
    }

    pub async fn active_users(&self) -> Result<Vec<ActiveUser>, ApiError> {
        self.get_list("/api/users/active").await
    }

    pub async fn currencies(&self) -> Result<Vec<Currency>, ApiError> {
        self.get_list("/api/master/currencies").await
    }

    pub async fn document_types(&self) -> Result<Vec<DocumentType>, ApiError> {
        self.get_list("/api/master/document-types").await
    }
}

#[cfg(test)]
impl OpportunityApi<crate::shared::http::testing::MockTransport> {
    pub fn mock(&self) -> &crate::shared::http::testing::MockTransport {
        &self.transport
    }
}
