use crate::report::{run_demo, run_report, ReportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use usestage_carbon::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Use-Stage Carbon Dashboard",
    about = "Serve or print the building use-stage carbon and cost dashboard",
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
    /// Print one dashboard section as plain text
    Report(ReportArgs),
    /// Print every section of the built-in sample building
    Demo,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Override DB_URL (sqlite://<file>, csv://<dir>, or sample://)
    #[arg(long)]
    pub(crate) db_url: Option<String>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Report(args) => run_report(args),
        Command::Demo => run_demo(),
    }
}
