use std::collections::BTreeMap;
use std::fmt::Write;

use crate::data::aggregate::Summary;
use crate::data::filter::FilteredView;

/// Message shown when the current selection matches no records.
pub const NO_DATA_MESSAGE: &str = "No data matches the current filters.";

// ---------------------------------------------------------------------------
// Number formatting
// ---------------------------------------------------------------------------

/// Group the integer part of a non-negative number with thousands commas.
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `1234567.891` → `"$ 1,234,567.89"`.
fn money(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let formatted = format!("{:.2}", value.abs());
    let (int_part, frac_part) = formatted.split_once('.').unwrap_or((&formatted, "00"));
    format!("$ {sign}{}.{frac_part}", group_thousands(int_part))
}

/// `1234567` → `"1,234,567"`.
fn count(value: i64) -> String {
    let sign = if value < 0 { "-" } else { "" };
    format!("{sign}{}", group_thousands(&value.abs().to_string()))
}

// ---------------------------------------------------------------------------
// Report rendering
// ---------------------------------------------------------------------------

fn grouped_section<T, F>(out: &mut String, title: &str, groups: &BTreeMap<String, T>, fmt: F)
where
    F: Fn(&T) -> String,
{
    writeln!(out, "{title}").unwrap();
    let width = groups.keys().map(String::len).max().unwrap_or(0);
    for (key, value) in groups {
        writeln!(out, "  {key:width$}  {}", fmt(value)).unwrap();
    }
    writeln!(out).unwrap();
}

/// Render the KPI block and the four grouped tables. An empty view renders
/// the no-data message instead of a wall of zeros.
pub fn render(summary: &Summary) -> String {
    if summary.row_count == 0 {
        return format!("{NO_DATA_MESSAGE}\n");
    }

    // Means are always present here; row_count > 0.
    let average_sale = summary.average_sale_amount.unwrap_or_default();
    let average_units = summary.average_units.unwrap_or_default();

    let mut out = String::new();
    writeln!(out, "Sales Report").unwrap();
    writeln!(out, "============").unwrap();
    writeln!(out, "Total Sales Amount (USD):    {}", money(summary.total_sale_amount)).unwrap();
    writeln!(out, "Average Sales Amount (USD):  {}", money(average_sale)).unwrap();
    writeln!(out, "Total Units Sold:            {}", count(summary.total_units)).unwrap();
    writeln!(out, "Average Units of Items:      {average_units:.2}").unwrap();
    writeln!(out, "Total Managers:              {}", summary.distinct_manager_count).unwrap();
    writeln!(out, "Total Employees:             {}", summary.distinct_sales_man_count).unwrap();
    writeln!(out).unwrap();

    grouped_section(&mut out, "Sales Man by Sale Amount", &summary.sale_amount_by_sales_man, |v| money(*v));
    grouped_section(&mut out, "Units Sold by Item", &summary.units_by_item, |v| count(*v));
    grouped_section(&mut out, "Sale Amount by Region", &summary.sale_amount_by_region, |v| money(*v));
    grouped_section(&mut out, "Manager by Sale Amount", &summary.sale_amount_by_manager, |v| money(*v));

    out
}

/// Render the filtered records as an aligned plain-text table.
pub fn render_table(view: &FilteredView) -> String {
    let headers = ["Item", "SalesMan", "Manager", "Region", "Sale_amt", "Units"];
    let rows: Vec<[String; 6]> = view
        .records()
        .map(|r| {
            [
                r.item.clone(),
                r.sales_man.clone(),
                r.manager.clone(),
                r.region.clone(),
                format!("{:.2}", r.sale_amount),
                r.units.to_string(),
            ]
        })
        .collect();

    let mut widths: [usize; 6] = headers.map(str::len);
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.len());
        }
    }

    let mut out = String::new();
    for (i, (header, width)) in headers.iter().zip(widths).enumerate() {
        if i > 0 {
            out.push_str("  ");
        }
        write!(out, "{header:width$}").unwrap();
    }
    out.push('\n');
    for row in &rows {
        for (i, (cell, width)) in row.iter().zip(widths).enumerate() {
            if i > 0 {
                out.push_str("  ");
            }
            write!(out, "{cell:width$}").unwrap();
        }
        out.push('\n');
    }
    out
}
