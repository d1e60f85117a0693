use tracing::{info, warn};

use super::panel::ResultPanel;
use crate::api::{ApiClient, ApiError};
use crate::domain::{CreditApplication, CreditApplicationRequest};

/// Create-then-sign flow behind the application form.
///
/// Holds the current result, the last error message and the signed flag, the
/// only state the form screen keeps between calls.
#[derive(Debug)]
pub struct ApplicationWorkflow {
    client: ApiClient,
    result: Option<CreditApplication>,
    error: Option<String>,
    signed: bool,
}

/// Outcome of a signing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignOutcome {
    Signed,
    /// No application result is held, so no call was made.
    Skipped,
}

impl ApplicationWorkflow {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            result: None,
            error: None,
            signed: false,
        }
    }

    pub fn result(&self) -> Option<&CreditApplication> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_signed(&self) -> bool {
        self.signed
    }

    pub fn panel(&self) -> Option<ResultPanel> {
        self.result
            .as_ref()
            .map(|application| ResultPanel::build(application, self.signed))
    }

    /// Posts the application. Any previous result, error and signed flag are
    /// cleared before the call is made.
    pub async fn submit(
        &mut self,
        request: &CreditApplicationRequest,
    ) -> Result<&CreditApplication, WorkflowError> {
        self.result = None;
        self.error = None;
        self.signed = false;

        match self.client.create_application(request).await {
            Ok(application) => {
                info!(
                    application_id = application.id,
                    status = application.status.label(),
                    "credit application created"
                );
                Ok(&*self.result.insert(application))
            }
            Err(source) => {
                warn!(error = %source, "credit application creation failed");
                let err = WorkflowError::CreationFailed(source);
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Signs the agreement of the held application. Without a result this is a
    /// no-op and no request is sent.
    pub async fn sign(&mut self) -> Result<SignOutcome, WorkflowError> {
        let Some(application_id) = self.result.as_ref().map(|application| application.id) else {
            return Ok(SignOutcome::Skipped);
        };

        match self.client.sign_agreement(application_id).await {
            Ok(()) => {
                info!(application_id, "credit agreement signed");
                self.signed = true;
                Ok(SignOutcome::Signed)
            }
            Err(source) => {
                warn!(application_id, error = %source, "credit agreement signing failed");
                let err = WorkflowError::SigningFailed(source);
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }
}

/// Generic per-operation failures; transport and status errors are not
/// distinguished in the message.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("failed to create credit application")]
    CreationFailed(#[source] ApiError),
    #[error("failed to sign credit agreement")]
    SigningFailed(#[source] ApiError),
}
