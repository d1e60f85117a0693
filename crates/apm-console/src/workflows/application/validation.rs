use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Fields of the create-application form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    FirstName,
    LastName,
    MiddleName,
    Passport,
    MaritalStatus,
    Address,
    Phone,
    OrganizationName,
    Position,
    EmploymentPeriod,
    Amount,
}

impl FormField {
    pub const ALL: [FormField; 11] = [
        FormField::FirstName,
        FormField::LastName,
        FormField::MiddleName,
        FormField::Passport,
        FormField::MaritalStatus,
        FormField::Address,
        FormField::Phone,
        FormField::OrganizationName,
        FormField::Position,
        FormField::EmploymentPeriod,
        FormField::Amount,
    ];

    /// Wire name of the field.
    pub fn name(&self) -> &'static str {
        match self {
            FormField::FirstName => "firstName",
            FormField::LastName => "lastName",
            FormField::MiddleName => "middleName",
            FormField::Passport => "passport",
            FormField::MaritalStatus => "maritalStatus",
            FormField::Address => "address",
            FormField::Phone => "phone",
            FormField::OrganizationName => "organizationName",
            FormField::Position => "position",
            FormField::EmploymentPeriod => "employmentPeriod",
            FormField::Amount => "amount",
        }
    }

    fn edit_pattern(&self) -> Option<&'static Regex> {
        match self {
            FormField::FirstName | FormField::LastName | FormField::MiddleName => {
                Some(name_pattern())
            }
            FormField::Passport => Some(passport_pattern()),
            FormField::Phone => Some(phone_pattern()),
            FormField::EmploymentPeriod => Some(employment_period_pattern()),
            FormField::Amount => Some(amount_pattern()),
            FormField::MaritalStatus
            | FormField::Address
            | FormField::OrganizationName
            | FormField::Position => None,
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FormField {
    type Err = UnknownField;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.name() == value)
            .ok_or_else(|| UnknownField(value.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown form field '{0}'")]
pub struct UnknownField(pub String);

/// Result of gating a single edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Accepted,
    Rejected,
}

impl EditOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, EditOutcome::Accepted)
    }
}

fn compile(pattern: &str) -> Regex {
    match Regex::new(pattern) {
        Ok(regex) => regex,
        Err(err) => unreachable!("static field pattern failed to compile: {err}"),
    }
}

fn name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| compile(r"^(?:[A-Z][a-z]*(?:[ '-][A-Za-z]+)*)?$"))
}

fn passport_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| compile(r"^[0-9]*$"))
}

fn phone_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| compile(r"^\+?[0-9]*$"))
}

fn employment_period_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| compile(r"^$|^PT[0-9]*$|^PT[0-9]+H$"))
}

fn amount_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| compile(r"^[0-9]*\.?[0-9]{0,2}$"))
}

/// Completed employment period, required at submission.
pub(crate) fn complete_employment_period() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| compile(r"^PT[0-9]+H$"))
}

/// Decides whether `candidate` may replace the current value of `field`.
///
/// Fields without a pattern accept every edit. Digit classes are ASCII only.
pub fn accept_edit(field: FormField, candidate: &str) -> EditOutcome {
    match field.edit_pattern() {
        Some(pattern) if !pattern.is_match(candidate) => EditOutcome::Rejected,
        _ => EditOutcome::Accepted,
    }
}
