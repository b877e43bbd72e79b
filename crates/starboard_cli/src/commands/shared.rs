//! Helpers shared across commands.

use console::style;
use starboard::{connect_and_migrate, FavoriteStore, Repo, SearchClient, Starboard};

use crate::config::Config;

/// Open the database, bring the schema up to date, and build the facade.
pub(crate) async fn open_board(
    config: &Config,
    database_url: &str,
) -> Result<Starboard, Box<dyn std::error::Error>> {
    let db = connect_and_migrate(database_url).await?;
    let store = FavoriteStore::new(db).await?;
    let client = SearchClient::github(config.github_token());
    Ok(Starboard::new(client, store))
}

/// Open just the favorites store; works without any network configuration.
pub(crate) async fn open_store(
    database_url: &str,
) -> Result<FavoriteStore, Box<dyn std::error::Error>> {
    let db = connect_and_migrate(database_url).await?;
    Ok(FavoriteStore::new(db).await?)
}

/// One-line rendering of a repository for list output.
pub(crate) fn repo_line(repo: &Repo) -> String {
    let marker = if repo.is_favorite { "★" } else { " " };
    let language = repo.language.as_deref().unwrap_or("-");
    format!(
        "{} {:>9}  {} {:>8}★ {:>7}⑂  {}",
        style(marker).yellow(),
        repo.id,
        style(&repo.full_name).cyan().bold(),
        repo.stars,
        repo.forks,
        style(language).dim(),
    )
}

/// Multi-line rendering of a single repository.
pub(crate) fn print_repo(repo: &Repo) {
    println!("{}", style(&repo.full_name).cyan().bold());
    if let Some(description) = &repo.description {
        println!("  {description}");
    }
    println!("  {}", style(&repo.html_url).underlined());
    println!(
        "  id {}  ★ {}  ⑂ {}  watchers {}  open issues {}",
        repo.id, repo.stars, repo.forks, repo.watchers, repo.open_issues
    );
    if let Some(language) = &repo.language {
        println!("  language: {language}");
    }
    println!(
        "  favorite: {}",
        if repo.is_favorite {
            style("yes").yellow().to_string()
        } else {
            "no".to_string()
        }
    );
}
