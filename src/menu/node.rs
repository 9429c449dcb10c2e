/// Read-only view of one rendered menu item block.
///
/// Implementations only read from the underlying DOM; the extractor never
/// keeps a node past the call that received it.
pub trait MenuItemNode {
    /// Text of the item's title element.
    fn title(&self) -> Result<String, NodeError>;

    /// Texts of every description paragraph, in document order. Empty
    /// paragraphs are included; the extractor decides what to keep.
    fn description_paragraphs(&self) -> Vec<String>;

    /// Raw text of the price span, without currency.
    fn price_text(&self) -> Result<String, NodeError>;
}

/// Failure to read part of a menu item block
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum NodeError {
    /// The markup does not contain the expected element
    #[error("missing element: {0}")]
    MissingElement(&'static str),
}
