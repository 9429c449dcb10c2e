//! Menu extraction: from a rendered page to [`MenuRecord`]s
//!
//! [`page::MenuPage`] locates the item blocks in the browser's HTML snapshot,
//! [`extractor::extract`] turns each block into a record.

pub mod extractor;
pub mod models;
pub mod node;
pub mod page;

pub use extractor::extract;
pub use models::MenuRecord;
pub use node::{MenuItemNode, NodeError};
pub use page::{HtmlMenuItem, MenuPage, PageError};
