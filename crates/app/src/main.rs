//! Waitline Application CLI

use std::process;

use clap::{Args, Parser, Subcommand};
use waitline_app::database;

#[derive(Debug, Parser)]
#[command(name = "waitline-app", about = "Waitline CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Db(DbCommand),
}

#[derive(Debug, Args)]
struct DbCommand {
    #[command(subcommand)]
    command: DbSubcommand,
}

#[derive(Debug, Subcommand)]
enum DbSubcommand {
    /// Create the waitlist table if it does not exist
    Init(InitArgs),
}

#[derive(Debug, Args)]
struct InitArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
}

#[tokio::main]
pub async fn main() {
    let _env = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(error) = run(cli).await {
        #[expect(
            clippy::print_stderr,
            reason = "CLI reports failures directly on the terminal"
        )]
        {
            eprintln!("{error}");
        }

        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Commands::Db(DbCommand {
            command: DbSubcommand::Init(args),
        }) => init_schema(args).await,
    }
}

async fn init_schema(args: InitArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    database::ensure_schema(&pool)
        .await
        .map_err(|error| format!("failed to initialize schema: {error}"))?;

    #[expect(
        clippy::print_stdout,
        reason = "CLI confirms completion directly on the terminal"
    )]
    {
        println!("waitlist schema is ready");
    }

    Ok(())
}
