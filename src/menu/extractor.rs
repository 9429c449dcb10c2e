use super::models::{MenuRecord, CURRENCY, NO_DESCRIPTION, PRICE_NOT_AVAILABLE};
use super::node::{MenuItemNode, NodeError};

/// Why an item block produced no record
#[derive(Debug)]
enum Skip {
    Title(NodeError),
    EmptyName,
}

/// Turn rendered item blocks into menu records.
///
/// Each block is handled on its own: a block whose title cannot be read is
/// logged and skipped, while a missing description or price only degrades
/// that field. Output order is input order and this never fails.
pub fn extract<N: MenuItemNode>(items: &[N]) -> Vec<MenuRecord> {
    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| match extract_item(item) {
            Ok(record) => Some(record),
            Err(Skip::Title(err)) => {
                log::warn!("Could not extract details for menu item #{}: {}", index, err);
                None
            }
            Err(Skip::EmptyName) => {
                log::debug!("Menu item #{} has an empty name, skipping", index);
                None
            }
        })
        .collect()
}

fn extract_item<N: MenuItemNode>(item: &N) -> Result<MenuRecord, Skip> {
    let title = item.title().map_err(Skip::Title)?;
    let name = clean_name(&title);
    if name.is_empty() {
        return Err(Skip::EmptyName);
    }

    Ok(MenuRecord {
        name: name.to_string(),
        description: join_description(&item.description_paragraphs()),
        price: format_price(item.price_text()),
    })
}

/// Strip exactly one trailing comma
pub fn clean_name(title: &str) -> &str {
    title.strip_suffix(',').unwrap_or(title)
}

/// Join non-empty paragraphs with newlines, falling back to "No description"
pub fn join_description(paragraphs: &[String]) -> String {
    let joined = paragraphs
        .iter()
        .filter(|p| !p.is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join("\n");

    match joined.trim() {
        "" => NO_DESCRIPTION.to_string(),
        trimmed => trimmed.to_string(),
    }
}

pub fn format_price(price_text: Result<String, NodeError>) -> String {
    match price_text {
        Ok(text) => format!("{} {}", CURRENCY, text),
        Err(err) => {
            log::debug!("Price unavailable: {}", err);
            PRICE_NOT_AVAILABLE.to_string()
        }
    }
}
