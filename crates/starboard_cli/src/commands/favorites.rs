//! Saved favorites listing. Works fully offline.

use console::style;
use starboard::Repo;

use crate::commands::shared::{open_store, repo_line};

pub(crate) async fn handle_favorites(
    database_url: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store(database_url).await?;

    let mut models = store.list_all().await?;
    if models.is_empty() {
        println!("No favorites saved yet. Try `starboard fav <id>`.");
        return Ok(());
    }

    // Newest first.
    models.sort_by(|a, b| b.saved_at.cmp(&a.saved_at));

    println!(
        "{} ({})",
        style("Favorites").yellow().bold(),
        models.len()
    );
    for model in &models {
        println!("{}", repo_line(&Repo::from_entity(model)));
    }

    Ok(())
}
