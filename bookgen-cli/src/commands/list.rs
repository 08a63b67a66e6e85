//! List command implementation

use super::load_config;
use anyhow::Result;
use serde::Serialize;
use std::path::Path;

/// One row of the chapter listing
#[derive(Serialize)]
struct ChapterInfo<'a> {
    number: usize,
    id: &'a str,
    title: &'a str,
    page: String,
}

/// Print the chapter order with resolved titles
pub fn list(config_path: &Path, json: bool) -> Result<()> {
    let config = load_config(config_path)?;

    let chapters: Vec<ChapterInfo> = config
        .order()
        .iter()
        .enumerate()
        .map(|(i, id)| ChapterInfo {
            number: i + 1,
            id,
            title: config.resolve_title(id),
            page: config.page_name(id),
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&chapters)?);
    } else {
        for chapter in &chapters {
            println!(
                "{:>3}. {:<16} {}",
                chapter.number, chapter.id, chapter.title
            );
        }
        println!("     {:<16} {}", config.combined_name(), config.default_title());
    }

    Ok(())
}
