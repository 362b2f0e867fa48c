//! Printable invoice
//!
//! Plain-text layout of an invoice for the terminal or a file.

use std::io::{self, Write};

use crate::models::InvoiceDocument;

const WIDTH: usize = 72;

/// Write the full invoice to `out`
pub fn render_invoice<W: Write + ?Sized>(
    invoice: &InvoiceDocument,
    symbol: &str,
    out: &mut W,
) -> io::Result<()> {
    writeln!(out, "{:<40}{:>32}", "INVOICE", format!("#{}", invoice.number))?;
    writeln!(out, "{}", "=".repeat(WIDTH))?;
    writeln!(out, "Logo: {}", invoice.logo_url)?;
    writeln!(out)?;
    writeln!(out, "Bill To:   {}", invoice.client_name)?;
    writeln!(out, "Project:   {}", invoice.project_title)?;
    writeln!(out, "Date:      {}", invoice.invoice_date.format("%Y-%m-%d"))?;
    writeln!(out, "Due Date:  {}", invoice.due_date.format("%Y-%m-%d"))?;
    writeln!(out)?;

    writeln!(
        out,
        "{:<30} {:<14} {:>5} {:>9} {:>10}",
        "Description", "Category", "Qty", "Price", "Amount"
    )?;
    writeln!(out, "{}", "-".repeat(WIDTH))?;

    if invoice.lines.is_empty() {
        writeln!(out, "  (no line items)")?;
    }
    for line in &invoice.lines {
        let description = if line.description.is_empty() {
            "-"
        } else {
            line.description.as_str()
        };
        writeln!(
            out,
            "{:<30} {:<14} {:>5} {:>9} {:>10}",
            clip(description, 30),
            clip(&line.category, 14),
            line.quantity,
            line.unit_price.format_with_symbol(symbol),
            line.amount.format_with_symbol(symbol)
        )?;
    }

    writeln!(out, "{}", "-".repeat(WIDTH))?;
    writeln!(out, "{:>58} {:>13}", "Subtotal:", invoice.subtotal.format_with_symbol(symbol))?;
    if invoice.discount.is_positive() {
        writeln!(
            out,
            "{:>58} {:>13}",
            "Discount:",
            format!("-{}", invoice.discount.format_with_symbol(symbol))
        )?;
    }
    writeln!(out, "{:>58} {:>13}", "Total:", invoice.grand_total.format_with_symbol(symbol))?;
    writeln!(out)?;
    writeln!(out, "Payment Terms")?;
    writeln!(out, "{}", invoice.payment_terms)?;
    Ok(())
}

fn clip(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max - 1).collect();
        format!("{}~", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::InvoiceDefaults;
    use crate::models::{ExpenseItem, ExpenseItemPatch, InvoiceConfig, Money, Project};
    use chrono::NaiveDate;

    #[test]
    fn test_render_contains_totals() {
        let mut project = Project::new("Spring Launch", Money::from_units(1000), "Jan 1, 2025");
        let mut item = ExpenseItem::new();
        item.apply(&ExpenseItemPatch {
            description: Some("Video shoot".into()),
            quantity: Some(2),
            unit_price: Some(Money::from_units(50)),
            ..Default::default()
        });
        project.add_item(item);

        let config = InvoiceConfig {
            client_name: "Acme".into(),
            invoice_number: Some("INV-12345".into()),
            discount: Some(Money::from_units(10)),
            ..Default::default()
        };
        let today = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        let invoice =
            InvoiceDocument::build(&project, &config, &InvoiceDefaults::default(), today).unwrap();

        let mut out = Vec::new();
        render_invoice(&invoice, "$", &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("#INV-12345"));
        assert!(text.contains("Video shoot"));
        assert!(text.contains("-$10.00"));
        assert!(text.contains("$90.00"));
        assert!(text.contains("2025-02-09"));
    }
}
