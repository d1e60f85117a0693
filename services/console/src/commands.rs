use crate::infra::api_client;
use crate::render::{render_page, OutputFormat, TableRow};
use apm_console::config::AppConfig;
use apm_console::error::AppError;
use apm_console::workflows::application::panel::SIGNED_CONFIRMATION;
use apm_console::workflows::application::{
    ApplicationForm, ApplicationWorkflow, FormField, SignOutcome, WorkflowError,
};
use apm_console::workflows::listing::{ClientFilters, FetchOutcome, ListController, ListResource};
use clap::Args;
use serde::Serialize;
use std::io::Write;
use tracing::info;

#[derive(Args, Debug)]
pub(crate) struct ApplyArgs {
    /// Applicant first name, capitalized (e.g. Ivan)
    #[arg(long)]
    pub(crate) first_name: String,
    /// Applicant last name, capitalized
    #[arg(long)]
    pub(crate) last_name: String,
    /// Optional middle name, capitalized
    #[arg(long)]
    pub(crate) middle_name: Option<String>,
    /// Passport number, exactly 10 digits
    #[arg(long)]
    pub(crate) passport: String,
    /// NEVER_MARRIED, MARRIED, DIVORCED, WIDOWED, COHABITING or SEPARATED
    #[arg(long)]
    pub(crate) marital_status: Option<String>,
    /// Postal address (1-128 characters)
    #[arg(long)]
    pub(crate) address: String,
    /// Phone number, 11 digits with an optional leading +
    #[arg(long)]
    pub(crate) phone: String,
    /// Employer name (1-96 characters)
    #[arg(long)]
    pub(crate) organization_name: String,
    /// Job title (1-64 characters)
    #[arg(long)]
    pub(crate) position: String,
    /// Employment period in hours, e.g. PT72H
    #[arg(long)]
    pub(crate) employment_period: String,
    /// Requested amount, at most two decimals (e.g. 15000.50)
    #[arg(long)]
    pub(crate) amount: String,
    /// Sign the agreement right away when the application is approved
    #[arg(long)]
    pub(crate) sign: bool,
}

impl ApplyArgs {
    fn entries(&self) -> Vec<(FormField, &str)> {
        let mut entries = vec![
            (FormField::FirstName, self.first_name.as_str()),
            (FormField::LastName, self.last_name.as_str()),
            (FormField::Passport, self.passport.as_str()),
            (FormField::Address, self.address.as_str()),
            (FormField::Phone, self.phone.as_str()),
            (FormField::OrganizationName, self.organization_name.as_str()),
            (FormField::Position, self.position.as_str()),
            (FormField::EmploymentPeriod, self.employment_period.as_str()),
            (FormField::Amount, self.amount.as_str()),
        ];
        if let Some(middle_name) = &self.middle_name {
            entries.push((FormField::MiddleName, middle_name.as_str()));
        }
        if let Some(status) = &self.marital_status {
            entries.push((FormField::MaritalStatus, status.as_str()));
        }
        entries
    }
}

#[derive(Args, Debug)]
pub(crate) struct SignArgs {
    /// Identifier of the approved credit application
    #[arg(long)]
    pub(crate) application_id: i64,
}

#[derive(Args, Debug)]
pub(crate) struct ListArgs {
    /// Page number, starting at 1
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub(crate) page: u32,
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub(crate) format: OutputFormat,
}

#[derive(Args, Debug)]
pub(crate) struct ClientSearchArgs {
    #[command(flatten)]
    pub(crate) list: ListArgs,
    #[arg(long)]
    pub(crate) first_name: Option<String>,
    #[arg(long)]
    pub(crate) last_name: Option<String>,
    #[arg(long)]
    pub(crate) middle_name: Option<String>,
    #[arg(long)]
    pub(crate) phone: Option<String>,
    #[arg(long)]
    pub(crate) passport: Option<String>,
}

impl ClientSearchArgs {
    pub(crate) fn filters(&self) -> ClientFilters {
        ClientFilters {
            first_name: self.first_name.clone().unwrap_or_default(),
            last_name: self.last_name.clone().unwrap_or_default(),
            middle_name: self.middle_name.clone().unwrap_or_default(),
            phone: self.phone.clone().unwrap_or_default(),
            passport: self.passport.clone().unwrap_or_default(),
        }
    }
}

pub(crate) async fn run_apply(config: &AppConfig, args: ApplyArgs) -> Result<(), AppError> {
    let form = ApplicationForm::from_entries(args.entries())?;
    let request = form.to_request()?;

    let mut workflow = ApplicationWorkflow::new(api_client(config)?);
    workflow.submit(&request).await?;

    let mut stdout = std::io::stdout().lock();
    let Some(panel) = workflow.panel() else {
        return Ok(());
    };
    for line in panel.lines() {
        writeln!(stdout, "{line}")?;
    }

    if !args.sign {
        return Ok(());
    }
    if !panel.can_sign() {
        writeln!(stdout, "Signing skipped: the application is not approved.")?;
        return Ok(());
    }

    if workflow.sign().await? == SignOutcome::Signed {
        writeln!(stdout, "{SIGNED_CONFIRMATION}")?;
    }
    Ok(())
}

pub(crate) async fn run_sign(config: &AppConfig, args: SignArgs) -> Result<(), AppError> {
    let client = api_client(config)?;
    client
        .sign_agreement(args.application_id)
        .await
        .map_err(WorkflowError::SigningFailed)?;

    info!(application_id = args.application_id, "credit agreement signed");
    println!("Agreement for application {} signed.", args.application_id);
    Ok(())
}

/// Fetches one page and prints it. A failed fetch is logged and the untouched
/// view is printed.
pub(crate) async fn run_list<T>(
    config: &AppConfig,
    args: ListArgs,
    filters: T::Filters,
) -> Result<(), AppError>
where
    T: ListResource + TableRow + Serialize,
{
    let mut controller = ListController::<T>::with_filters(api_client(config)?, filters);
    if let FetchOutcome::Failed(_) = controller.fetch_page(args.page).await {
        eprintln!("Could not load page {}; showing the last known data.", args.page);
    }

    let snapshot = controller.view().snapshot();
    let mut stdout = std::io::stdout().lock();
    render_page(&snapshot, args.format, &mut stdout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct Harness {
        #[command(flatten)]
        apply: ApplyArgs,
    }

    #[test]
    fn apply_entries_skip_unset_optional_fields() {
        let harness = Harness::parse_from([
            "apm-console",
            "--first-name",
            "Ivan",
            "--last-name",
            "Petrov",
            "--passport",
            "1234567890",
            "--address",
            "Lenina 1",
            "--phone",
            "+12345678901",
            "--organization-name",
            "Acme",
            "--position",
            "Engineer",
            "--employment-period",
            "PT72H",
            "--amount",
            "15000.50",
        ]);

        let entries = harness.apply.entries();
        assert_eq!(entries.len(), 9);
        assert!(!entries
            .iter()
            .any(|(field, _)| *field == FormField::MiddleName));

        let request = ApplicationForm::from_entries(entries)
            .expect("edits accepted")
            .to_request()
            .expect("form complete");
        assert_eq!(request.amount, 15000.5);
    }

    #[test]
    fn client_search_args_build_filters() {
        #[derive(Parser, Debug)]
        struct SearchHarness {
            #[command(flatten)]
            search: ClientSearchArgs,
        }

        let harness = SearchHarness::parse_from(["apm-console", "--phone", "555", "--page", "2"]);
        let filters = harness.search.filters();
        assert_eq!(filters.phone, "555");
        assert!(filters.first_name.is_empty());
        assert_eq!(harness.search.list.page, 2);
    }

    #[test]
    fn page_zero_is_rejected() {
        #[derive(Parser, Debug)]
        struct ListHarness {
            #[command(flatten)]
            list: ListArgs,
        }

        assert!(ListHarness::try_parse_from(["apm-console", "--page", "0"]).is_err());
    }
}
