//! Single-repository detail lookup.

use crate::commands::shared::{open_board, print_repo};
use crate::config::Config;

pub(crate) async fn handle_show(
    id: i64,
    config: &Config,
    database_url: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let board = open_board(config, database_url).await?;
    // Network first; a favorited repo still resolves from the local copy
    // when the network is down.
    let repo = board.get_repo(id).await?;
    print_repo(&repo);
    Ok(())
}
