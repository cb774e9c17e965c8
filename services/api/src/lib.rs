mod cli;
mod infra;
mod offers_report;
mod routes;
mod server;

use loan_advisor::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
