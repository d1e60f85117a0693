mod cli;
mod commands;
mod infra;
mod render;
mod routes;
mod server;

use apm_console::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
