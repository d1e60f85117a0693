use crate::workflows::application::{accept_edit, FormField};
use regex::Regex;

fn accepted(field: FormField, candidates: &[&str]) -> Vec<String> {
    candidates
        .iter()
        .filter(|candidate| accept_edit(field, candidate).is_accepted())
        .map(|candidate| candidate.to_string())
        .collect()
}

const NAME_CANDIDATES: &[&str] = &[
    "", "I", "Iv", "Ivan", "ivan", "IVAN", "Ivan ", "Ivan-Petr", "O'Neil", "Anna Maria",
    "Anna  Maria", "Jean-", "Mary-Jane Smith", "Ivan1", "Ёжик", " Ivan", "A'b'c", "Ab-Cd-Ef",
];

const AMOUNT_CANDIDATES: &[&str] = &[
    "", "1", "15000", "15000.", "15000.5", "15000.50", "15000.505", ".", ".5", "1.2.3", "-1",
    "1e5", "12,50", "00.00", " 1",
];

const PERIOD_CANDIDATES: &[&str] = &[
    "", "P", "PT", "PT7", "PT72", "PT72H", "PTH", "PT72HH", "pt72h", "PT7.5H", "T72H", "PT72M",
];

#[test]
fn accepted_names_match_the_name_shape() {
    let shape = Regex::new(r"^$|^[A-Z][a-z]*([ '-][A-Za-z]+)*$").expect("valid regex");
    for field in [FormField::FirstName, FormField::LastName, FormField::MiddleName] {
        let accepted = accepted(field, NAME_CANDIDATES);
        assert!(accepted.iter().all(|value| shape.is_match(value)));
        assert!(accepted.contains(&"O'Neil".to_string()));
        assert!(accepted.contains(&"Mary-Jane Smith".to_string()));
    }
}

#[test]
fn name_edits_reject_lowercase_start_and_trailing_separators() {
    for value in ["ivan", "IVAN", "Ivan ", "Jean-", "Anna  Maria", "Ivan1", "Ёжик"] {
        assert!(
            !accept_edit(FormField::FirstName, value).is_accepted(),
            "{value:?} should be rejected"
        );
    }
}

#[test]
fn accepted_amounts_have_at_most_two_decimals() {
    let shape = Regex::new(r"^\d*\.?\d{0,2}$").expect("valid regex");
    let accepted = accepted(FormField::Amount, AMOUNT_CANDIDATES);
    assert!(accepted.iter().all(|value| shape.is_match(value)));
    assert_eq!(
        accepted,
        vec!["", "1", "15000", "15000.", "15000.5", "15000.50", ".", ".5", "00.00"]
    );
}

#[test]
fn accepted_employment_periods_follow_hour_durations() {
    let shape = Regex::new(r"^$|^PT$|^PT\d*$|^PT\d+H$").expect("valid regex");
    let accepted = accepted(FormField::EmploymentPeriod, PERIOD_CANDIDATES);
    assert!(accepted.iter().all(|value| shape.is_match(value)));
    assert_eq!(accepted, vec!["", "PT", "PT7", "PT72", "PT72H"]);
}

#[test]
fn passport_and_phone_accept_digits_only() {
    assert!(accept_edit(FormField::Passport, "").is_accepted());
    assert!(accept_edit(FormField::Passport, "123456789012").is_accepted());
    assert!(!accept_edit(FormField::Passport, "12 34").is_accepted());
    assert!(!accept_edit(FormField::Passport, "+123").is_accepted());

    assert!(accept_edit(FormField::Phone, "+").is_accepted());
    assert!(accept_edit(FormField::Phone, "+12345678901").is_accepted());
    assert!(accept_edit(FormField::Phone, "89991234567").is_accepted());
    assert!(!accept_edit(FormField::Phone, "1+2").is_accepted());
    assert!(!accept_edit(FormField::Phone, "+7 999").is_accepted());
}
