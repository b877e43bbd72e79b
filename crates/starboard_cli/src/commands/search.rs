//! Keyword search against the remote catalog.

use console::style;

use crate::commands::shared::{open_board, repo_line};
use crate::config::Config;

pub(crate) async fn handle_search(
    query: &str,
    page: u32,
    config: &Config,
    database_url: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let board = open_board(config, database_url).await?;
    let result = board.search_page(query, page).await?;

    if result.items.is_empty() {
        println!("No results for {:?} on page {page}.", query);
        return Ok(());
    }

    println!(
        "{} page {page} for {:?}",
        style("Results").green().bold(),
        query
    );
    for repo in &result.items {
        println!("{}", repo_line(repo));
    }

    if let Some(next) = result.next {
        println!(
            "\n{}",
            style(format!("More results: --page {next}")).dim()
        );
    }

    Ok(())
}
