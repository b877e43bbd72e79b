//! Starboard CLI - search the GitHub catalog and keep local favorites.

mod commands;
mod config;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::Term;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "starboard")]
#[command(version)]
#[command(about = "Search GitHub repositories and keep local favorites")]
#[command(
    long_about = "Starboard searches the GitHub repository catalog and maintains a local \
database of favorites. Favorites survive offline: repository details are \
fetched from the network first and served from the local copy when the \
network is unavailable."
)]
#[command(after_long_help = r#"EXAMPLES
    Search the catalog:
        $ starboard search "rust http client"

    Fetch the third page of results:
        $ starboard search "rust http client" --page 3

    Show one repository by id:
        $ starboard show 108110

    Toggle a favorite:
        $ starboard fav 108110

    List saved favorites:
        $ starboard favorites

    Generate shell completions:
        $ starboard completions bash > ~/.local/share/bash-completion/completions/starboard

CONFIGURATION
    Starboard reads configuration from:
      1. ~/.config/starboard/config.toml (or $XDG_CONFIG_HOME/starboard/config.toml)
      2. ./starboard.toml in the current directory
      3. Environment variables (STARBOARD_* prefix)
      4. .env file in current directory

ENVIRONMENT VARIABLES
    STARBOARD_DATABASE_URL    Database connection string (default: ~/.local/state/starboard/starboard.db)
    STARBOARD_GITHUB_TOKEN    GitHub personal access token (raises rate limits)
"#)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search repositories by keyword
    Search {
        /// Search query
        query: String,

        /// Page to fetch (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },
    /// Show one repository by its numeric id
    Show {
        /// Repository id
        id: i64,
    },
    /// Toggle the favorite state of a repository
    Fav {
        /// Repository id
        id: i64,
    },
    /// List saved favorites
    Favorites,
    /// Run database migrations
    Migrate {
        #[command(subcommand)]
        action: MigrateAction,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
    /// Generate man page(s)
    Man {
        /// Output directory for man pages (prints to stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum MigrateAction {
    /// Apply all pending migrations
    Up,
    /// Rollback the last migration
    Down,
    /// Show migration status
    Status,
    /// Fresh install - drop all tables and reapply migrations
    Fresh,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Structured logging only outside a TTY; interactive output stays clean.
    if !Term::stdout().is_term() {
        let env_filter = match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => EnvFilter::new("starboard=info,starboard_cli=info"),
        };

        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .init();
    }

    let config = config::Config::load();

    let cli = Cli::parse();

    // Commands that never touch the database.
    match &cli.command {
        Commands::Completions { shell } => {
            commands::meta::handle_completions(*shell)?;
            return Ok(());
        }
        Commands::Man { output } => {
            commands::meta::handle_man(output.clone())?;
            return Ok(());
        }
        _ => {}
    }

    let database_url = config
        .database_url()
        .ok_or("Failed to determine database URL")?;

    // Ensure the database directory exists for SQLite.
    if database_url.starts_with("sqlite://") {
        let db_path = database_url.trim_start_matches("sqlite://");
        // Strip query parameters (e.g., ?mode=rwc) before path operations
        let db_path = db_path.split('?').next().unwrap_or(db_path);
        let db_path = std::path::Path::new(db_path);

        if db_path.is_relative() && !db_path.as_os_str().is_empty() {
            tracing::warn!(
                "Database path '{}' is relative - behavior depends on current directory. \
                 Consider using an absolute path.",
                db_path.display()
            );
        }

        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
    }

    match cli.command {
        Commands::Search { query, page } => {
            commands::search::handle_search(&query, page, &config, &database_url).await?;
        }
        Commands::Show { id } => {
            commands::show::handle_show(id, &config, &database_url).await?;
        }
        Commands::Fav { id } => {
            commands::fav::handle_fav(id, &config, &database_url).await?;
        }
        Commands::Favorites => {
            commands::favorites::handle_favorites(&database_url).await?;
        }
        Commands::Migrate { action } => {
            commands::migrate::handle_migrate(action, &database_url).await?;
        }
        Commands::Completions { .. } | Commands::Man { .. } => {}
    }

    Ok(())
}
