use crate::domain::a002_lead::aggregate::Lead;
use crate::shared::serde_utils::null_as_default;
use serde::{Deserialize, Serialize};

/// Company reference used by the opportunity form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub company_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub company_name: String,
}

/// Active user, candidate opportunity owner
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActiveUser {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl ActiveUser {
    /// Best available display name
    pub fn display_name(&self) -> String {
        self.full_name
            .as_deref()
            .or(self.name.as_deref())
            .or(self.username.as_deref())
            .or(self.email.as_deref())
            .unwrap_or(&self.id)
            .to_string()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Currency {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub currency_code: String,
    #[serde(default)]
    pub currency_name: Option<String>,
    #[serde(default)]
    pub currency_symbol: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentType {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub document_type_name: String,
}

/// Master data collections loaded for the opportunity page in one batch.
///
/// `approved_leads` holds only the leads still eligible for conversion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MasterData {
    pub approved_leads: Vec<Lead>,
    pub companies: Vec<Company>,
    pub users: Vec<ActiveUser>,
    pub currencies: Vec<Currency>,
    pub document_types: Vec<DocumentType>,
}

impl MasterData {
    pub fn find_lead(&self, id: &str) -> Option<&Lead> {
        self.approved_leads.iter().find(|lead| lead.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_company_ignores_unknown_fields() {
        let c: Company = serde_json::from_str(
            r#"{"id": "x", "company_id": "c1", "company_name": "Acme", "gst_no": null}"#,
        )
        .unwrap();
        assert_eq!(c.company_id, "c1");
        assert_eq!(c.company_name, "Acme");
    }

    #[test]
    fn test_company_null_name() {
        let c: Company =
            serde_json::from_str(r#"{"company_id": "c1", "company_name": null}"#).unwrap();
        assert_eq!(c.company_name, "");
    }

    #[test]
    fn test_user_display_name_fallbacks() {
        let mut u = ActiveUser {
            id: "u1".into(),
            ..Default::default()
        };
        assert_eq!(u.display_name(), "u1");
        u.username = Some("jdoe".into());
        assert_eq!(u.display_name(), "jdoe");
        u.full_name = Some("John Doe".into());
        assert_eq!(u.display_name(), "John Doe");
    }
}
