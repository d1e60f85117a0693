//! Create-application form gating and the apply-then-sign workflow.

pub mod form;
pub mod panel;
pub mod validation;
pub mod workflow;

#[cfg(test)]
mod tests;

pub use form::{
    ApplicationForm, FieldProblem, FieldViolation, FormError, RawApplicationForm, ViolationView,
};
pub use panel::{PanelDecision, ResultPanel, SigningAction};
pub use validation::{accept_edit, EditOutcome, FormField, UnknownField};
pub use workflow::{ApplicationWorkflow, SignOutcome, WorkflowError};
