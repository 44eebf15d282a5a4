//! Product list view.

use console::style;
use storefront_commerce::catalog::{Pagination, Product};
use storefront_commerce::Currency;

use crate::output::format_row;

const WIDTHS: [usize; 3] = [4, 32, 12];

/// Render one page of the catalog.
pub fn render_product_list(products: &[Product], pagination: &Pagination, currency: Currency) -> String {
    let mut out = format!("{}\n", style(page_title(pagination)).bold().underlined());

    if products.is_empty() {
        out.push_str(&format!("\n  {}\n", style("No products found").dim()));
        return out;
    }

    out.push('\n');
    out.push_str(&format!(
        "  {}\n",
        style(format_row(&["#", "Name", "Price"], &WIDTHS)).dim()
    ));
    for (i, product) in products.iter().enumerate() {
        let number = (i + 1).to_string();
        let price = product
            .unit_price(currency)
            .map(|price| price.display())
            .unwrap_or_else(|_| "n/a".to_string());
        out.push_str(&format!(
            "  {}\n",
            format_row(&[&number, &product.name, &price], &WIDTHS)
        ));
    }

    let nav = render_page_nav(pagination);
    if !nav.is_empty() {
        out.push('\n');
        out.push_str(&nav);
        out.push('\n');
    }
    out
}

fn page_title(pagination: &Pagination) -> String {
    match pagination.total_pages {
        Some(pages) => format!("Products (page {} of {})", pagination.page, pages),
        None => format!("Products (page {})", pagination.page),
    }
}

fn render_page_nav(pagination: &Pagination) -> String {
    let mut hints = Vec::new();
    if pagination.has_prev {
        hints.push("prev");
    }
    if pagination.has_next {
        hints.push("next");
    }
    if hints.is_empty() {
        return String::new();
    }
    format!("  {}", style(hints.join(" | ")).dim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::tests::product;

    #[test]
    fn test_render_product_list() {
        let products = vec![product("p-1", "Lamp", 9.5), product("p-2", "Mug", 4.0)];
        let rendered = render_product_list(&products, &Pagination::new(1, 2, 5), Currency::USD);
        let plain = console::strip_ansi_codes(&rendered);

        assert!(plain.starts_with("Products (page 1 of 3)"));
        assert!(plain.contains("1     Lamp"));
        assert!(plain.contains("$9.50"));
        assert!(plain.contains("$4.00"));
        assert!(plain.contains("next"));
        assert!(!plain.contains("prev"));
    }

    #[test]
    fn test_render_empty_list() {
        let rendered = render_product_list(&[], &Pagination::open_ended(1, 6, 0), Currency::USD);
        let plain = console::strip_ansi_codes(&rendered);

        assert!(plain.starts_with("Products (page 1)"));
        assert!(plain.contains("No products found"));
    }

    #[test]
    fn test_render_invalid_price() {
        let products = vec![product("p-1", "Broken", -1.0)];
        let rendered = render_product_list(&products, &Pagination::new(1, 6, 1), Currency::USD);
        let plain = console::strip_ansi_codes(&rendered);

        assert!(plain.contains("Broken"));
        assert!(plain.contains("n/a"));
    }
}
