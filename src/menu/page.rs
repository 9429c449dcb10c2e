//! Rendered menu page parsing
//!
//! Turns the HTML snapshot taken by the browser into [`MenuItemNode`]s. The
//! selectors below describe the Eurest "tw-menuplan" markup: an Angular
//! Material tab group where only the active tab body holds visible dishes.

use super::node::{MenuItemNode, NodeError};
use scraper::node::{Element, Node};
use scraper::{ElementRef, Html, Selector};

/// Active tab body holding the currently displayed menu
pub const CONTAINER_SELECTOR: &str =
    r#"tw-menuplan mat-tab-group mat-tab-body[class*="mat-tab-body-active"]"#;
/// One dish block inside the container
pub const ITEM_SELECTOR: &str = r#"div[class*="cols"]"#;

const TITLE_SELECTOR: &str = "h3";
const DESCRIPTION_BLOCK_SELECTOR: &str = r#"div[class*="wide"]"#;
const PARAGRAPH_SELECTOR: &str = "p";
const PRICE_WRAPPER_SELECTOR: &str = r#"div[class*="price-wrapper"]"#;
const PRICE_PARAGRAPH_SELECTOR: &str = r#"p[class*="main"]"#;
const PRICE_TEXT_SELECTOR: &str = "span";

#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("invalid selector {selector}: {reason}")]
    InvalidSelector {
        selector: &'static str,
        reason: String,
    },

    #[error("menu container not found")]
    ContainerNotFound,
}

/// Compiled selectors for the menu markup
#[derive(Debug)]
pub struct MenuSelectors {
    container: Selector,
    item: Selector,
    title: Selector,
    description_block: Selector,
    paragraph: Selector,
    price_wrapper: Selector,
    price_paragraph: Selector,
    price_text: Selector,
}

impl MenuSelectors {
    pub fn new() -> Result<Self, PageError> {
        Ok(Self {
            container: compile(CONTAINER_SELECTOR)?,
            item: compile(ITEM_SELECTOR)?,
            title: compile(TITLE_SELECTOR)?,
            description_block: compile(DESCRIPTION_BLOCK_SELECTOR)?,
            paragraph: compile(PARAGRAPH_SELECTOR)?,
            price_wrapper: compile(PRICE_WRAPPER_SELECTOR)?,
            price_paragraph: compile(PRICE_PARAGRAPH_SELECTOR)?,
            price_text: compile(PRICE_TEXT_SELECTOR)?,
        })
    }
}

fn compile(selector: &'static str) -> Result<Selector, PageError> {
    Selector::parse(selector).map_err(|e| PageError::InvalidSelector {
        selector,
        reason: e.to_string(),
    })
}

/// A parsed snapshot of the rendered menu page
pub struct MenuPage {
    document: Html,
    selectors: MenuSelectors,
}

impl MenuPage {
    pub fn parse(html: &str) -> Result<Self, PageError> {
        Ok(Self {
            document: Html::parse_document(html),
            selectors: MenuSelectors::new()?,
        })
    }

    /// Item blocks of the active menu tab, in source order
    pub fn items(&self) -> Result<Vec<HtmlMenuItem<'_>>, PageError> {
        let container = self
            .document
            .select(&self.selectors.container)
            .next()
            .ok_or(PageError::ContainerNotFound)?;

        Ok(container
            .select(&self.selectors.item)
            .map(|element| HtmlMenuItem {
                element,
                selectors: &self.selectors,
            })
            .collect())
    }
}

/// [`MenuItemNode`] backed by an element of a parsed [`MenuPage`]
#[derive(Clone, Copy)]
pub struct HtmlMenuItem<'a> {
    element: ElementRef<'a>,
    selectors: &'a MenuSelectors,
}

impl<'a> HtmlMenuItem<'a> {
    /// Descendants matching `target` that sit below an element matching
    /// `block`, where that block is itself inside this item.
    fn nested_in(
        &self,
        block: &'a Selector,
        target: &'a Selector,
    ) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        let scope = self.element;
        scope.select(target).filter(move |found| {
            found
                .ancestors()
                .take_while(|node| node.id() != scope.id())
                .filter_map(ElementRef::wrap)
                .any(|ancestor| block.matches(&ancestor))
        })
    }
}

impl MenuItemNode for HtmlMenuItem<'_> {
    fn title(&self) -> Result<String, NodeError> {
        self.element
            .select(&self.selectors.title)
            .next()
            .map(element_text)
            .ok_or(NodeError::MissingElement(TITLE_SELECTOR))
    }

    fn description_paragraphs(&self) -> Vec<String> {
        let selectors = self.selectors;
        self.nested_in(&selectors.description_block, &selectors.paragraph)
            .map(element_text)
            .collect()
    }

    fn price_text(&self) -> Result<String, NodeError> {
        let selectors = self.selectors;
        let paragraph = self
            .nested_in(&selectors.price_wrapper, &selectors.price_paragraph)
            .next()
            .ok_or(NodeError::MissingElement(PRICE_PARAGRAPH_SELECTOR))?;

        paragraph
            .select(&selectors.price_text)
            .next()
            .map(element_text)
            .ok_or(NodeError::MissingElement(PRICE_TEXT_SELECTOR))
    }
}

/// Rendered text of an element, close to what the browser reports.
///
/// Whitespace runs collapse to one space, `<br>` starts a new line and hidden
/// elements contribute nothing.
fn element_text(element: ElementRef<'_>) -> String {
    let mut raw = String::new();
    collect_text(element, &mut raw);

    raw.split('\n')
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            // Source line breaks are plain whitespace
            Node::Text(text) => out.extend(
                text.chars()
                    .map(|c| if c.is_whitespace() { ' ' } else { c }),
            ),
            Node::Element(el) if el.name() == "br" => out.push('\n'),
            Node::Element(el) if !is_hidden(el) => {
                if let Some(child) = ElementRef::wrap(child) {
                    collect_text(child, out);
                }
            }
            _ => {}
        }
    }
}

fn is_hidden(element: &Element) -> bool {
    if matches!(element.name(), "script" | "style" | "template")
        || element.attr("hidden").is_some()
    {
        return true;
    }

    element.attr("style").is_some_and(|style| {
        let style: String = style
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_lowercase();
        style.contains("display:none") || style.contains("visibility:hidden")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(body: &str) -> MenuPage {
        let html = format!(
            r#"<html><body><tw-menuplan><mat-tab-group>
                <mat-tab-body class="mat-tab-body"><div class="cols"><h3>Hidden tab</h3></div></mat-tab-body>
                <mat-tab-body class="mat-tab-body mat-tab-body-active">{body}</mat-tab-body>
            </mat-tab-group></tw-menuplan></body></html>"#
        );
        MenuPage::parse(&html).unwrap()
    }

    #[test]
    fn test_selectors_compile() {
        assert!(MenuSelectors::new().is_ok());
    }

    #[test]
    fn test_items_come_from_active_tab_only() {
        let page = page(
            r#"<div class="cols menu-line"><h3>Soup</h3></div>
               <div class="cols menu-line"><h3>Salad</h3></div>"#,
        );
        let titles: Vec<String> = page
            .items()
            .unwrap()
            .iter()
            .map(|item| item.title().unwrap())
            .collect();
        assert_eq!(titles, vec!["Soup", "Salad"]);
    }

    #[test]
    fn test_missing_container() {
        let page = MenuPage::parse("<html><body><p>Loading</p></body></html>").unwrap();
        assert!(matches!(page.items(), Err(PageError::ContainerNotFound)));
    }

    #[test]
    fn test_title_text_is_whitespace_normalized() {
        let page = page("<div class=\"cols\"><h3>\n  Pasta\n   al  forno,\n</h3></div>");
        let items = page.items().unwrap();
        assert_eq!(items[0].title().unwrap(), "Pasta al forno,");
    }

    #[test]
    fn test_line_breaks_survive_in_description() {
        let page = page(
            r#"<div class="cols"><h3>Bowl</h3>
                 <div class="wide"><p>Rice <br>
                   with   black beans</p></div>
               </div>"#,
        );
        let items = page.items().unwrap();
        assert_eq!(
            items[0].description_paragraphs(),
            vec!["Rice\nwith black beans"]
        );
    }

    #[test]
    fn test_hidden_text_is_left_out() {
        let page = page(
            r#"<div class="cols"><h3>Soup <span style="display: none">#4711</span><span hidden>draft</span><script>track()</script>of the day</h3></div>"#,
        );
        let items = page.items().unwrap();
        assert_eq!(items[0].title().unwrap(), "Soup of the day");
    }

    #[test]
    fn test_missing_title() {
        let page = page(r#"<div class="cols"><p>No heading here</p></div>"#);
        let items = page.items().unwrap();
        assert_eq!(items[0].title(), Err(NodeError::MissingElement("h3")));
    }

    #[test]
    fn test_description_only_inside_wide_block() {
        let page = page(
            r#"<div class="cols">
                 <h3>Curry</h3>
                 <p>outside</p>
                 <div class="col wide"><p>Rice</p><p></p><div><p>Mango chutney</p></div></div>
               </div>"#,
        );
        let items = page.items().unwrap();
        assert_eq!(
            items[0].description_paragraphs(),
            vec!["Rice", "", "Mango chutney"]
        );
    }

    #[test]
    fn test_nested_wide_blocks_do_not_duplicate_paragraphs() {
        let page = page(
            r#"<div class="cols"><h3>Stew</h3>
                 <div class="wide"><div class="wide"><p>Beef</p></div></div>
               </div>"#,
        );
        let items = page.items().unwrap();
        assert_eq!(items[0].description_paragraphs(), vec!["Beef"]);
    }

    #[test]
    fn test_price_text() {
        let page = page(
            r#"<div class="cols"><h3>Soup</h3>
                 <div class="price-wrapper">
                   <p class="secondary"><span>9.00</span></p>
                   <p class="main"><span> 12.50 </span></p>
                 </div>
               </div>"#,
        );
        let items = page.items().unwrap();
        assert_eq!(items[0].price_text().unwrap(), "12.50");
    }

    #[test]
    fn test_price_paragraph_without_span() {
        let page = page(
            r#"<div class="cols"><h3>Soup</h3>
                 <div class="price-wrapper"><p class="main">12.50</p></div>
               </div>"#,
        );
        let items = page.items().unwrap();
        assert_eq!(items[0].price_text(), Err(NodeError::MissingElement("span")));
    }

    #[test]
    fn test_main_paragraph_outside_price_wrapper_is_ignored() {
        let page = page(
            r#"<div class="cols"><h3>Soup</h3><p class="main"><span>1.00</span></p></div>"#,
        );
        let items = page.items().unwrap();
        assert!(items[0].price_text().is_err());
    }
}
