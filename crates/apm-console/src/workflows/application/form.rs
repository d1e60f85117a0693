use std::fmt;

use serde::{Deserialize, Serialize};

use super::validation::{accept_edit, complete_employment_period, EditOutcome, FormField};
use crate::domain::{Applicant, CreditApplicationRequest, MaritalStatus};

/// In-memory state of the create-application form.
///
/// Every mutation goes through [`ApplicationForm::edit`], so stored values always
/// satisfy the per-field edit patterns. Completeness is only checked by
/// [`ApplicationForm::to_request`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationForm {
    first_name: String,
    last_name: String,
    middle_name: String,
    passport: String,
    marital_status: String,
    address: String,
    phone: String,
    organization_name: String,
    position: String,
    employment_period: String,
    amount: String,
}

impl Default for ApplicationForm {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            middle_name: String::new(),
            passport: String::new(),
            marital_status: MaritalStatus::default().code().to_string(),
            address: String::new(),
            phone: String::new(),
            organization_name: String::new(),
            position: String::new(),
            employment_period: String::new(),
            amount: String::new(),
        }
    }
}

impl ApplicationForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a batch of edits.
    ///
    /// When any edit is rejected the error lists every failing field in form
    /// order: rejected edits as invalid, the rest by the submission check on
    /// whatever was stored.
    pub fn from_entries<I, S>(entries: I) -> Result<Self, FormError>
    where
        I: IntoIterator<Item = (FormField, S)>,
        S: AsRef<str>,
    {
        let mut form = Self::default();
        let mut rejected = Vec::new();
        for (field, value) in entries {
            if !form.edit(field, value.as_ref()).is_accepted() && !rejected.contains(&field) {
                rejected.push(field);
            }
        }

        if rejected.is_empty() {
            return Ok(form);
        }

        let violations = FormField::ALL
            .into_iter()
            .filter_map(|field| {
                let problem = if rejected.contains(&field) {
                    Some(FieldProblem::InvalidFormat)
                } else {
                    check_field(field, form.value(field))
                };
                problem.map(|problem| FieldViolation::new(field, problem))
            })
            .collect();
        Err(FormError { violations })
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::FirstName => &self.first_name,
            FormField::LastName => &self.last_name,
            FormField::MiddleName => &self.middle_name,
            FormField::Passport => &self.passport,
            FormField::MaritalStatus => &self.marital_status,
            FormField::Address => &self.address,
            FormField::Phone => &self.phone,
            FormField::OrganizationName => &self.organization_name,
            FormField::Position => &self.position,
            FormField::EmploymentPeriod => &self.employment_period,
            FormField::Amount => &self.amount,
        }
    }

    fn slot(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::FirstName => &mut self.first_name,
            FormField::LastName => &mut self.last_name,
            FormField::MiddleName => &mut self.middle_name,
            FormField::Passport => &mut self.passport,
            FormField::MaritalStatus => &mut self.marital_status,
            FormField::Address => &mut self.address,
            FormField::Phone => &mut self.phone,
            FormField::OrganizationName => &mut self.organization_name,
            FormField::Position => &mut self.position,
            FormField::EmploymentPeriod => &mut self.employment_period,
            FormField::Amount => &mut self.amount,
        }
    }

    /// Stores `candidate` if the field's edit pattern accepts it; otherwise the
    /// previous value is kept.
    pub fn edit(&mut self, field: FormField, candidate: &str) -> EditOutcome {
        let outcome = accept_edit(field, candidate);
        if outcome.is_accepted() {
            *self.slot(field) = candidate.to_string();
        }
        outcome
    }

    /// Runs the submission constraints and reports every failing field in form order.
    pub fn violations(&self) -> Vec<FieldViolation> {
        FormField::ALL
            .into_iter()
            .filter_map(|field| {
                check_field(field, self.value(field)).map(|problem| FieldViolation::new(field, problem))
            })
            .collect()
    }

    /// Builds the creation request body once the form is complete.
    pub fn to_request(&self) -> Result<CreditApplicationRequest, FormError> {
        let violations = self.violations();
        if !violations.is_empty() {
            return Err(FormError { violations });
        }

        let invalid = |field| FormError {
            violations: vec![FieldViolation::new(field, FieldProblem::InvalidFormat)],
        };
        let marital_status = self
            .marital_status
            .parse::<MaritalStatus>()
            .map_err(|_| invalid(FormField::MaritalStatus))?;
        let amount = self
            .amount
            .parse::<f64>()
            .map_err(|_| invalid(FormField::Amount))?;

        let middle_name = if self.middle_name.trim().is_empty() {
            None
        } else {
            Some(self.middle_name.clone())
        };

        Ok(CreditApplicationRequest {
            applicant: Applicant {
                first_name: self.first_name.clone(),
                last_name: self.last_name.clone(),
                middle_name,
                passport: self.passport.clone(),
                marital_status,
                address: self.address.clone(),
                phone: self.phone.clone(),
                organization_name: self.organization_name.clone(),
                position: self.position.clone(),
                employment_period: self.employment_period.clone(),
            },
            amount,
        })
    }
}

struct LengthRule {
    required: bool,
    min: usize,
    max: usize,
}

fn length_rule(field: FormField) -> LengthRule {
    let (required, min, max) = match field {
        FormField::FirstName | FormField::LastName | FormField::Position => (true, 1, 64),
        FormField::MiddleName => (false, 0, 64),
        FormField::Passport => (true, 10, 10),
        FormField::MaritalStatus => (true, 1, 32),
        FormField::Address => (true, 1, 128),
        FormField::Phone => (true, 11, 12),
        FormField::OrganizationName => (true, 1, 96),
        FormField::EmploymentPeriod => (true, 1, 16),
        FormField::Amount => (true, 1, 10),
    };
    LengthRule { required, min, max }
}

fn check_field(field: FormField, value: &str) -> Option<FieldProblem> {
    let rule = length_rule(field);
    let len = value.chars().count();

    if len == 0 {
        return rule.required.then_some(FieldProblem::Required);
    }
    if rule.min == rule.max && len != rule.min {
        return Some(FieldProblem::WrongLength { expected: rule.min });
    }
    if len < rule.min {
        return Some(FieldProblem::TooShort { min: rule.min });
    }
    if len > rule.max {
        return Some(FieldProblem::TooLong { max: rule.max });
    }
    if !accept_edit(field, value).is_accepted() {
        return Some(FieldProblem::InvalidFormat);
    }

    match field {
        FormField::MaritalStatus if value.parse::<MaritalStatus>().is_err() => {
            Some(FieldProblem::InvalidFormat)
        }
        FormField::EmploymentPeriod if !complete_employment_period().is_match(value) => {
            Some(FieldProblem::InvalidFormat)
        }
        FormField::Amount => match value.parse::<f64>() {
            Ok(amount) if amount >= 1.0 => None,
            Ok(_) => Some(FieldProblem::BelowMinimum),
            Err(_) => Some(FieldProblem::InvalidFormat),
        },
        _ => None,
    }
}

/// Reason a field fails the submission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldProblem {
    Required,
    TooShort { min: usize },
    TooLong { max: usize },
    WrongLength { expected: usize },
    InvalidFormat,
    BelowMinimum,
}

impl fmt::Display for FieldProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldProblem::Required => write!(f, "is required"),
            FieldProblem::TooShort { min } => write!(f, "must be at least {min} characters"),
            FieldProblem::TooLong { max } => write!(f, "must be at most {max} characters"),
            FieldProblem::WrongLength { expected } => {
                write!(f, "must be exactly {expected} characters")
            }
            FieldProblem::InvalidFormat => write!(f, "has an invalid format"),
            FieldProblem::BelowMinimum => write!(f, "must be at least 1"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: FormField,
    pub problem: FieldProblem,
}

impl FieldViolation {
    pub fn new(field: FormField, problem: FieldProblem) -> Self {
        Self { field, problem }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.problem)
    }
}

/// Serializable form of a violation for API responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViolationView {
    pub field: FormField,
    pub message: String,
}

/// The form is not ready to be submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormError {
    pub violations: Vec<FieldViolation>,
}

impl FormError {
    pub fn fields(&self) -> Vec<ViolationView> {
        self.violations
            .iter()
            .map(|violation| ViolationView {
                field: violation.field,
                message: violation.to_string(),
            })
            .collect()
    }
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid application form")?;
        for (index, violation) in self.violations.iter().enumerate() {
            let separator = if index == 0 { ": " } else { "; " };
            write!(f, "{separator}{violation}")?;
        }
        Ok(())
    }
}

impl std::error::Error for FormError {}

/// Raw field values as posted by a browser form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawApplicationForm {
    pub first_name: String,
    pub last_name: String,
    pub middle_name: String,
    pub passport: String,
    pub marital_status: Option<String>,
    pub address: String,
    pub phone: String,
    pub organization_name: String,
    pub position: String,
    pub employment_period: String,
    pub amount: String,
}

impl TryFrom<RawApplicationForm> for ApplicationForm {
    type Error = FormError;

    fn try_from(raw: RawApplicationForm) -> Result<Self, Self::Error> {
        let mut entries = vec![
            (FormField::FirstName, raw.first_name),
            (FormField::LastName, raw.last_name),
            (FormField::MiddleName, raw.middle_name),
            (FormField::Passport, raw.passport),
        ];
        if let Some(status) = raw.marital_status {
            entries.push((FormField::MaritalStatus, status));
        }
        entries.extend([
            (FormField::Address, raw.address),
            (FormField::Phone, raw.phone),
            (FormField::OrganizationName, raw.organization_name),
            (FormField::Position, raw.position),
            (FormField::EmploymentPeriod, raw.employment_period),
            (FormField::Amount, raw.amount),
        ]);
        ApplicationForm::from_entries(entries)
    }
}
