use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::{ApplicationStatus, CreditApplication};

pub const REJECTION_NOTICE: &str = "Your application has been rejected.";
pub const SIGNED_CONFIRMATION: &str = "Agreement signed successfully.";

/// What the result panel shows after a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultPanel {
    pub application_id: i64,
    pub status: ApplicationStatus,
    pub decision: PanelDecision,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PanelDecision {
    #[serde(rename_all = "camelCase")]
    Approved {
        approved_amount: Option<Decimal>,
        approved_term: Option<i32>,
        signing: SigningAction,
    },
    Rejected {
        notice: &'static str,
    },
    Pending,
}

/// Sign button before signing, confirmation afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SigningAction {
    Available,
    Signed,
}

impl ResultPanel {
    pub fn build(application: &CreditApplication, signed: bool) -> Self {
        let decision = match application.status {
            ApplicationStatus::Approved => PanelDecision::Approved {
                approved_amount: application.approved_amount,
                approved_term: application.approved_term,
                signing: if signed {
                    SigningAction::Signed
                } else {
                    SigningAction::Available
                },
            },
            ApplicationStatus::Rejected => PanelDecision::Rejected {
                notice: REJECTION_NOTICE,
            },
            ApplicationStatus::Pending => PanelDecision::Pending,
        };

        Self {
            application_id: application.id,
            status: application.status,
            decision,
        }
    }

    pub fn can_sign(&self) -> bool {
        matches!(
            self.decision,
            PanelDecision::Approved {
                signing: SigningAction::Available,
                ..
            }
        )
    }

    /// Plain-text rendering for terminals.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Application ID: {}", self.application_id),
            format!("Status: {}", self.status.label()),
        ];

        match &self.decision {
            PanelDecision::Approved {
                approved_amount,
                approved_term,
                signing,
            } => {
                let amount = approved_amount
                    .map(|amount| format!("{amount:.2}"))
                    .unwrap_or_else(|| "-".to_string());
                let term = approved_term
                    .map(|term| term.to_string())
                    .unwrap_or_else(|| "-".to_string());
                lines.push(format!("Approved amount: {amount}"));
                lines.push(format!("Approved term: {term}"));
                match signing {
                    SigningAction::Available => {
                        lines.push("Agreement is ready to be signed.".to_string())
                    }
                    SigningAction::Signed => lines.push(SIGNED_CONFIRMATION.to_string()),
                }
            }
            PanelDecision::Rejected { notice } => lines.push((*notice).to_string()),
            PanelDecision::Pending => {}
        }

        lines
    }
}
