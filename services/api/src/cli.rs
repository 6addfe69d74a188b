use crate::demo::{run_demo, run_match, run_score, DemoArgs, MatchArgs, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use role_match::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Role Match",
    about = "Score employees against open roles and serve the matching API",
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
    /// Rank every employee against every role from JSON files
    Match(MatchArgs),
    /// Score a single employee against a single role
    Score(ScoreArgs),
    /// Run the matcher over a built-in sample workforce
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
    /// JSON file seeding the employee directory
    #[arg(long)]
    pub(crate) employees: Option<PathBuf>,
    /// JSON file seeding the role catalog
    #[arg(long)]
    pub(crate) roles: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Match(args) => run_match(args),
        Command::Score(args) => run_score(args),
        Command::Demo(args) => run_demo(args),
    }
}
