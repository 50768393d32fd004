mod cli;
mod demo;
mod infra;
mod quote;
mod routes;
mod server;

use growfund::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
