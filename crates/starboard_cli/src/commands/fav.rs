//! Favorite toggling.

use console::style;

use crate::commands::shared::open_board;
use crate::config::Config;

pub(crate) async fn handle_fav(
    id: i64,
    config: &Config,
    database_url: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let board = open_board(config, database_url).await?;

    // Resolve first so a fresh field snapshot is persisted on favorite.
    let repo = board.get_repo(id).await?;
    let now_favorite = board.toggle_favorite(&repo).await?;

    if now_favorite {
        println!(
            "{} {} added to favorites",
            style("★").yellow(),
            style(&repo.full_name).cyan().bold()
        );
    } else {
        println!(
            "{} {} removed from favorites",
            style("☆").dim(),
            style(&repo.full_name).cyan().bold()
        );
    }

    Ok(())
}
