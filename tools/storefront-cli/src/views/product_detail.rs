//! Product detail view.

use console::style;
use storefront_commerce::cart::CartStore;
use storefront_commerce::{Currency, Money};
use storefront_router::ProductDetailProps;

use crate::output::stock_badge;

/// Render a product as its link described it, with live stock.
pub fn render_product_detail(
    props: &ProductDetailProps,
    stock: Option<i64>,
    cart: &CartStore,
    currency: Currency,
) -> String {
    let name = props.name.as_deref().unwrap_or(props.id.as_str());
    let mut out = format!("{}\n", style(name).bold().underlined());
    out.push_str(&format!("  {}\n", style(format!("id {}", props.id)).dim()));

    if let Some(description) = props.description.as_deref().filter(|d| !d.is_empty()) {
        out.push_str(&format!("\n  {description}\n"));
    }

    out.push('\n');
    match props.price {
        Some(price) => out.push_str(&format!(
            "  Price: {} {}\n",
            style(Money::from_decimal(price, currency).display()).bold(),
            style("(as listed)").dim()
        )),
        None => out.push_str(&format!("  Price: {}\n", style("unavailable").dim())),
    }

    let stock_text = match stock {
        Some(stock) => stock_badge(stock),
        None => style("stock unknown").dim().to_string(),
    };
    out.push_str(&format!("  Stock: {stock_text}\n"));

    if let Some(line) = cart.get(&props.id) {
        out.push_str(&format!("  In cart: {}\n", line.quantity));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_commerce::cart::CartProduct;
    use storefront_commerce::ProductId;

    fn props() -> ProductDetailProps {
        ProductDetailProps {
            id: ProductId::new("42"),
            name: Some("Lamp".to_string()),
            description: Some("LED desk lamp".to_string()),
            price: Some(9.5),
        }
    }

    #[test]
    fn test_render_detail() {
        let mut cart = CartStore::new(Currency::USD);
        cart.add_to_cart(CartProduct {
            id: ProductId::new("42"),
            name: "Lamp".to_string(),
            price: Money::new(950, Currency::USD),
            stock: 3,
        })
        .unwrap();

        let rendered = render_product_detail(&props(), Some(3), &cart, Currency::USD);
        let plain = console::strip_ansi_codes(&rendered);

        assert!(plain.starts_with("Lamp"));
        assert!(plain.contains("LED desk lamp"));
        assert!(plain.contains("Price: $9.50 (as listed)"));
        assert!(plain.contains("Stock: only 3 left"));
        assert!(plain.contains("In cart: 1"));
    }

    #[test]
    fn test_render_detail_with_missing_fields() {
        let props = ProductDetailProps {
            name: None,
            description: None,
            price: None,
            ..props()
        };
        let rendered = render_product_detail(&props, None, &CartStore::default(), Currency::USD);
        let plain = console::strip_ansi_codes(&rendered);

        assert!(plain.starts_with("42"));
        assert!(plain.contains("Price: unavailable"));
        assert!(plain.contains("Stock: stock unknown"));
        assert!(!plain.contains("In cart"));
    }
}
