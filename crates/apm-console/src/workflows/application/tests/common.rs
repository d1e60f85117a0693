use serde_json::{json, Value};
use wiremock::MockServer;

use crate::api::ApiClient;
use crate::workflows::application::{ApplicationForm, FormField};

pub(super) fn complete_form() -> ApplicationForm {
    ApplicationForm::from_entries([
        (FormField::FirstName, "Ivan"),
        (FormField::LastName, "Petrov"),
        (FormField::Passport, "1234567890"),
        (FormField::MaritalStatus, "MARRIED"),
        (FormField::Address, "Lenina 1, Moscow"),
        (FormField::Phone, "+12345678901"),
        (FormField::OrganizationName, "Acme"),
        (FormField::Position, "Engineer"),
        (FormField::EmploymentPeriod, "PT72H"),
        (FormField::Amount, "15000.50"),
    ])
    .expect("fixture edits are accepted")
}

pub(super) fn approved_body() -> Value {
    json!({
        "id": 17,
        "applicantId": 3,
        "requestedAmount": 15000.50,
        "status": "APPROVED",
        "approvedAmount": 12000.00,
        "approvedTerm": 12,
        "createdAt": "2025-03-01T09:30:00"
    })
}

pub(super) fn rejected_body() -> Value {
    json!({
        "id": 18,
        "applicantId": 3,
        "requestedAmount": 15000.50,
        "status": "REJECTED"
    })
}

pub(super) fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(&format!("{}/api", server.uri())).expect("mock server url is valid")
}
