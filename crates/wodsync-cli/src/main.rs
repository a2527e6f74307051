use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "wodsync",
    version,
    about = "Sync Wodify coaching classes to Google Calendar"
)]
struct Cli {
    /// Compute and log actions without touching the calendar
    #[arg(long, global = true)]
    dry_run: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Full reconciliation: create missing class events, delete stale ones
    Sync,
    /// Delete every upcoming event you have declined, managed or not
    CleanDeclined,
    /// Delete every wodsync-managed event
    Purge,
    /// Google authorization management
    Auth {
        #[command(subcommand)]
        action: commands::auth::AuthAction,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    wodsync_core::init()?;

    let cli = Cli::parse();
    let (config, _validation) = wodsync_core::Config::load_validated()?;
    let dry_run = cli.dry_run || config.sync.print_only;

    match cli.command {
        Commands::Sync => commands::sync::run(&config, dry_run).await,
        Commands::CleanDeclined => commands::clean::run(&config, dry_run).await,
        Commands::Purge => commands::purge::run(&config, dry_run).await,
        Commands::Auth { action } => commands::auth::run(&config, action).await,
    }
}
