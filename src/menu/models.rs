use serde::{Deserialize, Serialize};

/// Substituted when an item has no non-empty description paragraph
pub const NO_DESCRIPTION: &str = "No description";

/// Substituted when an item's price block is missing or unreadable
pub const PRICE_NOT_AVAILABLE: &str = "Price not available";

/// Currency prefix prepended to the raw price text
pub const CURRENCY: &str = "CHF";

/// One dish as served by `GET /menu`
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct MenuRecord {
    pub name: String,
    pub description: String,
    pub price: String,
}
