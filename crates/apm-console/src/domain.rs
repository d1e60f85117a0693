use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Civil status codes accepted by the credit application API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MaritalStatus {
    #[default]
    NeverMarried,
    Married,
    Divorced,
    Widowed,
    Cohabiting,
    Separated,
}

impl MaritalStatus {
    pub const ALL: [MaritalStatus; 6] = [
        MaritalStatus::NeverMarried,
        MaritalStatus::Married,
        MaritalStatus::Divorced,
        MaritalStatus::Widowed,
        MaritalStatus::Cohabiting,
        MaritalStatus::Separated,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            MaritalStatus::NeverMarried => "NEVER_MARRIED",
            MaritalStatus::Married => "MARRIED",
            MaritalStatus::Divorced => "DIVORCED",
            MaritalStatus::Widowed => "WIDOWED",
            MaritalStatus::Cohabiting => "COHABITING",
            MaritalStatus::Separated => "SEPARATED",
        }
    }
}

impl fmt::Display for MaritalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for MaritalStatus {
    type Err = UnknownMaritalStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_uppercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|status| status.code() == normalized)
            .ok_or_else(|| UnknownMaritalStatus(value.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown marital status '{0}'")]
pub struct UnknownMaritalStatus(pub String);

/// Applicant block nested under `applicant` in the creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Applicant {
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    pub passport: String,
    pub marital_status: MaritalStatus,
    pub address: String,
    pub phone: String,
    pub organization_name: String,
    pub position: String,
    pub employment_period: String,
}

/// Body of `POST /v1/credit-application`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditApplicationRequest {
    pub applicant: Applicant,
    pub amount: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "PENDING",
            ApplicationStatus::Approved => "APPROVED",
            ApplicationStatus::Rejected => "REJECTED",
        }
    }
}

/// Credit application as returned by the creation call and the applications list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditApplication {
    pub id: i64,
    pub applicant_id: i64,
    pub requested_amount: Decimal,
    pub status: ApplicationStatus,
    #[serde(default)]
    pub approved_amount: Option<Decimal>,
    #[serde(default)]
    pub approved_term: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit_agreement_id: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SigningStatus {
    Signed,
    NotSigned,
}

impl SigningStatus {
    pub fn label(&self) -> &'static str {
        match self {
            SigningStatus::Signed => "SIGNED",
            SigningStatus::NotSigned => "NOT_SIGNED",
        }
    }
}

/// Contract instance tied to one credit application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agreement {
    pub id: i64,
    pub application_id: i64,
    pub signing_status: SigningStatus,
    #[serde(default)]
    pub signed_at: Option<NaiveDateTime>,
}

/// Client row returned by the client search.
///
/// The server sends the full applicant record; only the identifying fields are
/// guaranteed, the rest are kept when present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub middle_name: Option<String>,
    pub phone: String,
    pub passport: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marital_status: Option<MaritalStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employment_period: Option<String>,
}

/// Shared envelope of every list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total: u64,
    pub page_size: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn marital_status_parses_codes_loosely() {
        assert_eq!(
            "never-married".parse::<MaritalStatus>(),
            Ok(MaritalStatus::NeverMarried)
        );
        assert_eq!(" Widowed ".parse::<MaritalStatus>(), Ok(MaritalStatus::Widowed));
        assert!("ENGAGED".parse::<MaritalStatus>().is_err());
    }

    #[test]
    fn applicant_omits_missing_middle_name() {
        let applicant = Applicant {
            first_name: "Ivan".to_string(),
            last_name: "Petrov".to_string(),
            middle_name: None,
            passport: "1234567890".to_string(),
            marital_status: MaritalStatus::Married,
            address: "Lenina 1".to_string(),
            phone: "+12345678901".to_string(),
            organization_name: "Acme".to_string(),
            position: "Engineer".to_string(),
            employment_period: "PT72H".to_string(),
        };

        let value = serde_json::to_value(&applicant).expect("serializes");
        assert!(value.get("middleName").is_none());
        assert_eq!(value["maritalStatus"], "MARRIED");
        assert_eq!(value["organizationName"], "Acme");
    }

    #[test]
    fn page_decodes_server_envelope() {
        let payload = json!({
            "page": 2,
            "pageSize": 10,
            "total": 11,
            "content": [{
                "id": 7,
                "applicationId": 3,
                "signingStatus": "SIGNED",
                "signedAt": "2025-02-01T10:15:30.123"
            }]
        });

        let page: Page<Agreement> = serde_json::from_value(payload).expect("decodes");
        assert_eq!(page.total, 11);
        assert_eq!(page.page_size, 10);
        assert_eq!(page.content[0].signing_status, SigningStatus::Signed);
        assert!(page.content[0].signed_at.is_some());
    }

    #[test]
    fn credit_application_accepts_numeric_amounts() {
        let payload = json!({
            "id": 1,
            "applicantId": 4,
            "requestedAmount": 15000.50,
            "status": "APPROVED",
            "approvedAmount": 12000,
            "approvedTerm": 12
        });

        let application: CreditApplication = serde_json::from_value(payload).expect("decodes");
        assert_eq!(application.status, ApplicationStatus::Approved);
        assert_eq!(application.approved_term, Some(12));
        assert_eq!(application.approved_amount, Some(Decimal::from(12000)));
    }
}
