//! Plain-text quotation report.

use std::fmt::Write;

use toxquote_core::format::format_full;
use toxquote_core::{Money, QuotationSummary};

const RULE: &str = "────────────────────────────────────────────────────────────";

/// Renders `summary` as a fixed-layout text report.
pub fn render_text(summary: &QuotationSummary) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    write_report(&mut out, summary)?;
    Ok(out)
}

fn write_report(out: &mut String, summary: &QuotationSummary) -> std::fmt::Result {
    writeln!(out, "Quotation {}", summary.quotation_id)?;
    writeln!(out, "Standard: {}   Mode: {}", summary.standard, summary.mode)?;
    writeln!(out, "{}", RULE)?;

    let mut number = 0;
    for line in &summary.lines {
        let price = match line.price() {
            Some(price) => format_full(price),
            None => "price on request".to_string(),
        };
        let route = line.route.map(|r| format!(" [{}]", r)).unwrap_or_default();

        if line.is_option {
            writeln!(out, "      └ {}{}  {:>18}", line.name(), route, price)?;
        } else {
            number += 1;
            writeln!(out, "{:>4}. {}{}  {:>18}", number, line.name(), route, price)?;
        }
    }

    let totals = &summary.totals;
    let surcharge = &summary.surcharge;

    writeln!(out, "{}", RULE)?;
    amount_row(out, "Subtotal", totals.subtotal)?;
    amount_row(out, "Surcharge", totals.surcharge)?;
    if !surcharge.validation_base.is_zero() {
        amount_row(out, "  validation", surcharge.validation_base)?;
    }
    if !surcharge.analysis_total.is_zero() {
        amount_row(out, "  analysis", surcharge.analysis_total)?;
    }
    if !surcharge.alternate_formulation_charge.is_zero() {
        amount_row(out, "  formulation", surcharge.alternate_formulation_charge)?;
    }
    if !totals.discount_rate.is_zero() {
        let label = format!("Discount ({}%)", totals.discount_rate.percentage());
        writeln!(out, "{:<20}{:>24}", label, format!("-{}", format_full(totals.discount_amount)))?;
    }
    writeln!(out, "{}", RULE)?;
    writeln!(
        out,
        "{:<20}{:>24}  ({})",
        "Total", summary.total_full, summary.total_abbreviated
    )?;

    if summary.price_on_request_lines > 0 {
        writeln!(
            out,
            "\n{} line(s) are price on request and were counted as 0",
            summary.price_on_request_lines
        )?;
    }

    Ok(())
}

fn amount_row(out: &mut String, label: &str, amount: Money) -> std::fmt::Result {
    writeln!(out, "{:<20}{:>24}", label, format_full(amount))
}
