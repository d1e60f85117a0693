use crate::commands::{
    run_apply, run_list, run_sign, ApplyArgs, ClientSearchArgs, ListArgs, SignArgs,
};
use crate::server;
use apm_console::config::{ApiConfig, AppConfig};
use apm_console::domain::{Agreement, Client, CreditApplication};
use apm_console::error::AppError;
use apm_console::telemetry;
use apm_console::workflows::listing::NoFilters;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "apm-console",
    about = "Submit, sign and browse credit applications from the command line",
    version
)]
struct Cli {
    /// Override the configured base URL of the credit application API
    #[arg(long, global = true)]
    api_base_url: Option<String>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP console backend (default command)
    Serve(ServeArgs),
    /// Submit a credit application and print the decision
    Apply(ApplyArgs),
    /// Sign the agreement of an approved application
    Sign(SignArgs),
    /// List credit applications
    Applications(ListArgs),
    /// List credit agreements
    Agreements(ListArgs),
    /// Search clients
    Clients(ClientSearchArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let mut config = AppConfig::load()?;
    if let Some(base_url) = cli.api_base_url {
        config.api = ApiConfig::with_base_url(&base_url)?;
    }

    telemetry::init(&config.telemetry)?;

    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(config, args).await,
        Command::Apply(args) => run_apply(&config, args).await,
        Command::Sign(args) => run_sign(&config, args).await,
        Command::Applications(args) => {
            run_list::<CreditApplication>(&config, args, NoFilters).await
        }
        Command::Agreements(args) => run_list::<Agreement>(&config, args, NoFilters).await,
        Command::Clients(args) => {
            let filters = args.filters();
            run_list::<Client>(&config, args.list, filters).await
        }
    }
}
