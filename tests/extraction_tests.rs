/// Extraction tests against a rendered snapshot of the menu page
/// No browser needed: the fixture is what Chrome hands back after rendering
use rust_menu_scraper::fetcher::{parse_menu, FetchError};
use rust_menu_scraper::menu::{extract, MenuItemNode, MenuPage, MenuRecord, PageError};

const MENU_PAGE: &str = include_str!("fixtures/menu_page.html");

fn record(name: &str, description: &str, price: &str) -> MenuRecord {
    MenuRecord {
        name: name.to_string(),
        description: description.to_string(),
        price: price.to_string(),
    }
}

#[test]
fn test_rendered_page_to_records() {
    let records = parse_menu(MENU_PAGE).expect("fixture should parse");

    assert_eq!(
        records,
        vec![
            record("Rindsgeschnetzeltes", "mit Rösti\nund Saisongemüse", "CHF 12.50"),
            record("Tagessuppe", "No description", "CHF 4.80"),
            record("Salatbuffet", "pro 100g", "Price not available"),
        ]
    );
}

#[test]
fn test_items_without_title_are_dropped() {
    let page = MenuPage::parse(MENU_PAGE).unwrap();
    let items = page.items().unwrap();

    // Four blocks in the active tab, one of them without a title
    assert_eq!(items.len(), 4);
    assert!(items[2].title().is_err());

    let records = extract(&items);
    assert_eq!(records.len(), 3);
    assert!(records.len() <= items.len());
    assert!(records.iter().all(|r| !r.name.is_empty()));
}

#[test]
fn test_inactive_tabs_are_ignored() {
    let records = parse_menu(MENU_PAGE).unwrap();
    assert!(records.iter().all(|r| r.name != "Gestriges Menü"));
}

#[test]
fn test_empty_active_tab_yields_no_records() {
    let html = r#"<html><body><tw-menuplan><mat-tab-group>
        <mat-tab-body class="mat-tab-body-active"></mat-tab-body>
    </mat-tab-group></tw-menuplan></body></html>"#;

    let records = parse_menu(html).unwrap();
    assert!(records.is_empty());
}

#[test]
fn test_page_without_menu_container() {
    let html = "<html><body><app-root>Loading…</app-root></body></html>";
    assert!(matches!(
        parse_menu(html),
        Err(FetchError::Page(PageError::ContainerNotFound))
    ));
}

#[test]
fn test_records_serialize_as_name_description_price() {
    let records = parse_menu(MENU_PAGE).unwrap();
    let json = serde_json::to_value(&records[0]).unwrap();

    assert_eq!(
        json,
        serde_json::json!({
            "name": "Rindsgeschnetzeltes",
            "description": "mit Rösti\nund Saisongemüse",
            "price": "CHF 12.50",
        })
    );
}
