//! Purchase confirmation view.

use console::style;

use crate::session::PurchaseSummary;

pub fn render_success(summary: Option<&PurchaseSummary>) -> String {
    let mut out = format!("{}\n", style("Thank you for your purchase!").green().bold());
    if let Some(summary) = summary {
        out.push_str(&format!(
            "\n  {} items across {} products, {} in total\n",
            summary.items,
            summary.lines,
            style(summary.total.display()).bold()
        ));
    }
    out.push_str(&format!("\n  {}\n", style("Type `list` to keep shopping.").dim()));
    out
}
