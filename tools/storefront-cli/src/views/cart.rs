//! Cart view.

use console::style;
use storefront_commerce::cart::CartStore;

use crate::output::format_row;

const WIDTHS: [usize; 5] = [12, 28, 5, 12, 12];

/// Render the cart with per-line subtotals and the total.
pub fn render_cart(cart: &CartStore) -> String {
    let mut out = format!("{}\n", style("Your cart").bold().underlined());

    if cart.is_empty() {
        out.push_str(&format!("\n  {}\n", style("Your cart is empty").dim()));
        return out;
    }

    out.push('\n');
    out.push_str(&format!(
        "  {}\n",
        style(format_row(&["Id", "Name", "Qty", "Price", "Subtotal"], &WIDTHS)).dim()
    ));
    for line in cart.items() {
        let quantity = line.quantity.to_string();
        let price = line.price.display();
        let subtotal = line.subtotal().display();
        out.push_str(&format!(
            "  {}\n",
            format_row(
                &[line.id.as_str(), &line.name, &quantity, &price, &subtotal],
                &WIDTHS
            )
        ));
    }

    out.push_str(&format!(
        "\n  {} {}  {}\n",
        style("Total:").bold(),
        style(cart.total_price().display()).bold(),
        style(format!("({} items)", cart.item_count())).dim()
    ));
    out
}
