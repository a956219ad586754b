use pricedesk_core::{CatalogItem, PriceChange};

const TITLE_WIDTH: usize = 40;

fn truncate(title: &str) -> String {
    if title.chars().count() > TITLE_WIDTH {
        format!("{}...", title.chars().take(TITLE_WIDTH - 3).collect::<String>())
    } else {
        title.to_owned()
    }
}

pub(crate) fn items_table(items: &[CatalogItem]) -> String {
    let mut out = format!("{:<8}{:<42}{:<20}{:>12}\n", "ID", "TITLE", "BRAND", "PRICE");
    for item in items {
        let price = format!("{:.2}", item.price);
        out.push_str(&format!(
            "{:<8}{:<42}{:<20}{:>12}\n",
            item.id,
            truncate(&item.title),
            item.brand,
            price
        ));
    }
    out
}

pub(crate) fn changes_table(changes: &[PriceChange]) -> String {
    let mut out = format!(
        "{:<8}{:<42}{:>12}{:>12}\n",
        "ID", "TITLE", "OLD PRICE", "NEW PRICE"
    );
    for change in changes {
        let old = change
            .original_price
            .map_or_else(|| "-".to_owned(), |p| format!("{p:.2}"));
        let new = format!("{:.2}", change.item.price);
        out.push_str(&format!(
            "{:<8}{:<42}{:>12}{:>12}\n",
            change.item.id,
            truncate(&change.item.title),
            old,
            new
        ));
    }
    out
}
