use crate::shared::serde_utils::{lenient_f64, null_as_default};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

pub const STATE_OPEN: &str = "Open";
pub const DEFAULT_CURRENCY_SYMBOL: &str = "₹";

// ============================================================================
// Opportunity type
// ============================================================================

/// Closed set of opportunity types known to the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OpportunityType {
    #[serde(rename = "Tender")]
    Tender,
    #[serde(rename = "Non-Tender")]
    NonTender,
}

impl OpportunityType {
    pub const ALL: [OpportunityType; 2] = [OpportunityType::Tender, OpportunityType::NonTender];

    pub fn as_str(&self) -> &'static str {
        match self {
            OpportunityType::Tender => "Tender",
            OpportunityType::NonTender => "Non-Tender",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Tender" => Some(OpportunityType::Tender),
            "Non-Tender" => Some(OpportunityType::NonTender),
            _ => None,
        }
    }

    /// Type an opportunity inherits from its source lead:
    /// "Tender" and "Pretender" leads become tenders, everything else is direct sales.
    pub fn from_lead_subtype(subtype: &str) -> Self {
        match subtype {
            "Tender" | "Pretender" => OpportunityType::Tender,
            _ => OpportunityType::NonTender,
        }
    }
}

// ============================================================================
// Aggregate
// ============================================================================

/// Opportunity record as listed by `GET /api/opportunities`.
///
/// `opportunity_type` and `state` stay raw strings: the backend owns both sets
/// and the client only recognises a subset of values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Opportunity {
    pub id: String,

    /// Display code, e.g. `OPP-0000001`
    #[serde(default, deserialize_with = "null_as_default")]
    pub opportunity_id: String,

    #[serde(default)]
    pub sr_no: Option<i64>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub opportunity_title: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub opportunity_type: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub company_id: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub company_name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub opportunity_owner_id: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub owner_name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub current_stage_code: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub current_stage_name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub state: String,

    #[serde(default, deserialize_with = "lenient_f64")]
    pub expected_revenue: Option<f64>,

    #[serde(default)]
    pub currency_symbol: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,

    /// Source lead (database id)
    #[serde(default)]
    pub lead_id: Option<String>,

    /// Source lead display code
    #[serde(default)]
    pub linked_lead_id: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub auto_converted: bool,

    #[serde(default)]
    pub project_description: Option<String>,

    #[serde(default)]
    pub remarks: Option<String>,
}

impl Opportunity {
    pub fn kind(&self) -> Option<OpportunityType> {
        OpportunityType::parse(&self.opportunity_type)
    }

    pub fn is_tender(&self) -> bool {
        self.kind() == Some(OpportunityType::Tender)
    }

    pub fn is_open(&self) -> bool {
        self.state == STATE_OPEN
    }

    pub fn currency_symbol_or_default(&self) -> &str {
        self.currency_symbol
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_CURRENCY_SYMBOL)
    }

    /// Creation time on the local wall clock, `None` when the timestamp cannot be read
    pub fn created_at_local(&self) -> Option<NaiveDateTime> {
        parse_local_timestamp(&self.created_at)
    }

    /// Whether this opportunity was created from the given lead
    pub fn references_lead(&self, lead_id: &str) -> bool {
        self.lead_id.as_deref() == Some(lead_id)
    }
}

/// Reads an ISO-8601 timestamp as local wall-clock time.
///
/// Offsets are converted to the local zone; naive values are taken as local.
pub fn parse_local_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(dt);
    }
    let date_part = value.get(..10).unwrap_or(value);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

// ============================================================================
// Write DTOs
// ============================================================================

/// Create request for `POST /api/opportunities`; also the client-side draft
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOpportunityDto {
    pub lead_id: String,
    pub opportunity_title: String,
    pub opportunity_type: String,
    pub company_id: String,
    pub opportunity_owner_id: String,
    pub partner_id: String,
    pub expected_closure_date: String,
    pub remarks: String,
}

/// Identifiers assigned by the backend on create
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreatedOpportunity {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub opportunity_id: Option<String>,
    #[serde(default)]
    pub sr_no: Option<i64>,
}

/// Result of `POST /api/opportunities/auto-convert`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AutoConvertResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub converted_count: u32,
}
