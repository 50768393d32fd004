use crate::demo::{run_demo, DemoArgs};
use crate::quote::{run_quote, QuoteArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use growfund::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "GrowFund",
    about = "Run the GrowFund savings and microloan service or explore loan pricing",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Show unlocked loan offers and price an application without storing it
    Quote(QuoteArgs),
    /// Run an end-to-end walkthrough from first savings payment to repaid loan
    Demo(DemoArgs),
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
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Quote(args) => run_quote(args),
        Command::Demo(args) => run_demo(args),
    }
}
