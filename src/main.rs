use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use parkctl::{
    cli::{commands, tui},
    config::AppConfig,
    context::AppContext,
    logging,
};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "parkctl")]
#[command(about = "Terminal client for the parking spot reservation service", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    overrides: Overrides,
}

/// CLI-level config overrides, merged over file and env by figment.
#[derive(Args, Serialize)]
struct Overrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[arg(long, global = true)]
    auth_url: Option<String>,

    /// Run against the in-process simulated backend.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[arg(long, global = true)]
    demo: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[arg(long, global = true)]
    verbose: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[arg(long, global = true)]
    log_json: Option<bool>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive grid/table view (default).
    Tui,
    /// Print the current spot table.
    List,
    /// Reserve a free spot by number or id.
    Reserve {
        spot: String,
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value_t = 30)]
        minutes: u32,
    },
    /// Move a reserved spot to occupied.
    Occupy { spot: String },
    /// Release a reserved or occupied spot.
    Free { spot: String },
    /// Log in and persist the session.
    Login {
        #[arg(long)]
        email: Option<String>,
    },
    /// Create an account and persist the session.
    Signup {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    /// Drop the persisted session.
    Logout,
    /// Show the current session.
    Whoami,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::new(Some(&cli.overrides))?;
    let command = cli.command.unwrap_or(Commands::Tui);

    // The TUI owns the terminal; don't write log lines into it.
    if !matches!(command, Commands::Tui) {
        logging::init(logging::LogConfig {
            json: config.log_json,
            verbose: config.verbose,
        });
    }

    let ctx = AppContext::new(config);

    match command {
        Commands::Tui => {
            commands::require_session(&ctx)?;
            tui::run(ctx).await.context("TUI exited with an error")?
        }
        Commands::List => commands::list(&ctx).await?,
        Commands::Reserve {
            spot,
            name,
            minutes,
        } => commands::reserve(&ctx, &spot, &name, minutes).await?,
        Commands::Occupy { spot } => commands::occupy(&ctx, &spot).await?,
        Commands::Free { spot } => commands::free(&ctx, &spot).await?,
        Commands::Login { email } => commands::login(&ctx, email).await?,
        Commands::Signup { name, email } => commands::signup(&ctx, name, email).await?,
        Commands::Logout => commands::logout(&ctx)?,
        Commands::Whoami => commands::whoami(&ctx)?,
    }

    Ok(())
}
