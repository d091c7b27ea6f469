//! Presentation of a roster view as an HTML table or plain text.

use std::fmt::Write;

use rust_decimal::Decimal;

use crate::calculation::{HoursTier, classify_remaining_hours};
use crate::config::AccrualPolicy;
use crate::models::{ROSTER_COLUMNS, RosterView};

/// Stylesheet for the HTML table.
pub const TABLE_CSS: &str = "\
.table { width: 100%; margin-bottom: 1rem; color: #212529; border-collapse: collapse; }
.table th, .table td { padding: 0.75rem; border: 1px solid #dee2e6; }
.table thead th { background-color: #f8f9fa; border-bottom: 2px solid #dee2e6; }
.tier-over { background-color: lightgreen; }
.tier-low { background-color: #fff3cd; }
";

/// Formats an hours value with exactly two decimal places.
///
/// ```
/// use pto_burn::render::format_hours;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_hours(Decimal::new(255, 1)), "25.50");
/// assert_eq!(format_hours(Decimal::from(-95)), "-95.00");
/// ```
pub fn format_hours(value: Decimal) -> String {
    format!("{:.2}", value)
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders a view as an HTML `<table class="table">` fragment.
///
/// Remaining-hours cells carry their tier's CSS class; over-threshold
/// cells also get an inline light green background so the highlight
/// survives without [`TABLE_CSS`].
pub fn render_html(view: &RosterView, policy: &AccrualPolicy) -> String {
    let mut html = String::from("<table class=\"table\">");

    match view {
        RosterView::Message { message } => {
            let _ = write!(html, "<tbody><tr><td>{}</td></tr></tbody>", escape_html(message));
        }
        RosterView::Table(table) => {
            html.push_str("<thead><tr>");
            for column in ROSTER_COLUMNS {
                let _ = write!(html, "<th>{}</th>", column);
            }
            html.push_str("</tr></thead><tbody>");

            for row in &table.rows {
                let tier = classify_remaining_hours(row.remaining_hours, policy);
                let style = match tier {
                    HoursTier::OverThreshold => " style=\"background-color: lightgreen\"",
                    _ => "",
                };
                let _ = write!(
                    html,
                    "<tr><td>{}</td><td>{}</td><td>{}</td><td class=\"{}\"{}>{}</td></tr>",
                    escape_html(&row.employee_name),
                    escape_html(&row.pay_type),
                    format_hours(row.regular_hours),
                    tier.css_class(),
                    style,
                    format_hours(row.remaining_hours),
                );
            }
            html.push_str("</tbody>");
        }
    }

    html.push_str("</table>");
    html
}

/// Wraps [`render_html`] in a standalone page with [`TABLE_CSS`].
pub fn render_html_page(view: &RosterView, policy: &AccrualPolicy) -> String {
    format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>PTO Hours Calculator</title>\
         <style>{}</style></head><body><h2>PTO Hours Calculator</h2>{}</body></html>",
        TABLE_CSS,
        render_html(view, policy)
    )
}

/// Renders a view as an aligned plain-text table for terminals.
///
/// Rows outside the normal tier are marked in a trailing column.
pub fn render_text(view: &RosterView, policy: &AccrualPolicy) -> String {
    let table = match view {
        RosterView::Message { message } => return format!("{}\n", message),
        RosterView::Table(table) => table,
    };

    let cells: Vec<[String; 5]> = table
        .rows
        .iter()
        .map(|row| {
            let tier = classify_remaining_hours(row.remaining_hours, policy);
            let marker = match tier {
                HoursTier::Normal => String::new(),
                other => other.to_string(),
            };
            [
                row.employee_name.clone(),
                row.pay_type.clone(),
                format_hours(row.regular_hours),
                format_hours(row.remaining_hours),
                marker,
            ]
        })
        .collect();

    let mut widths: [usize; 4] = ROSTER_COLUMNS.map(|c| c.chars().count());
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<w0$}  {:<w1$}  {:>w2$}  {:>w3$}",
        ROSTER_COLUMNS[0],
        ROSTER_COLUMNS[1],
        ROSTER_COLUMNS[2],
        ROSTER_COLUMNS[3],
        w0 = widths[0],
        w1 = widths[1],
        w2 = widths[2],
        w3 = widths[3],
    );
    for row in &cells {
        let line = format!(
            "{:<w0$}  {:<w1$}  {:>w2$}  {:>w3$}  {}",
            row[0],
            row[1],
            row[2],
            row[3],
            row[4],
            w0 = widths[0],
            w1 = widths[1],
            w2 = widths[2],
            w3 = widths[3],
        );
        let _ = writeln!(out, "{}", line.trim_end());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccrualBasis, RosterRow, RosterTable, TransformSummary};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn view_with(rows: Vec<(&str, &str, &str)>) -> RosterView {
        RosterView::Table(RosterTable {
            rows: rows
                .into_iter()
                .map(|(name, regular, remaining)| RosterRow {
                    employee_name: name.to_string(),
                    pay_type: "R".to_string(),
                    regular_hours: dec(regular),
                    remaining_hours: dec(remaining),
                })
                .collect(),
            basis: AccrualBasis::fixed(dec("580")),
            summary: TransformSummary::default(),
        })
    }

    #[test]
    fn test_html_message_row() {
        let html = render_html(&RosterView::no_file(), &AccrualPolicy::default());
        assert_eq!(
            html,
            "<table class=\"table\"><tbody><tr><td>Please upload an Excel file</td></tr></tbody></table>"
        );
    }

    #[test]
    fn test_html_headers_and_tiers() {
        let view = view_with(vec![
            ("Alice", "1320.5", "25.5"),
            ("Bob", "1200", "-95"),
            ("Cy", "1400", "105"),
        ]);
        let html = render_html(&view, &AccrualPolicy::default());

        assert!(html.contains("<th>Employee Name</th><th>Pay Type</th><th>Regular Hours</th><th>Remaining Hours</th>"));
        assert!(html.contains("<td>1320.50</td><td class=\"tier-low\">25.50</td>"));
        assert!(html.contains(
            "<td class=\"tier-over\" style=\"background-color: lightgreen\">-95.00</td>"
        ));
        assert!(html.contains("<td class=\"tier-normal\">105.00</td>"));
    }

    #[test]
    fn test_html_escapes_names() {
        let view = view_with(vec![("<b>O'Neil & Co</b>", "1", "1")]);
        let html = render_html(&view, &AccrualPolicy::default());
        assert!(html.contains("&lt;b&gt;O&#39;Neil &amp; Co&lt;/b&gt;"));
    }

    #[test]
    fn test_html_page_includes_css() {
        let page = render_html_page(&RosterView::no_file(), &AccrualPolicy::default());
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains(".tier-over"));
    }

    #[test]
    fn test_text_table_alignment() {
        let view = view_with(vec![("Alice", "1320.5", "25.5"), ("Bob", "1400", "105")]);
        let text = render_text(&view, &AccrualPolicy::default());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            "Employee Name  Pay Type  Regular Hours  Remaining Hours"
        );
        assert_eq!(
            lines[1],
            "Alice          R               1320.50            25.50  low"
        );
        assert_eq!(
            lines[2],
            "Bob            R               1400.00           105.00"
        );
    }

    #[test]
    fn test_text_message() {
        let text = render_text(&RosterView::message_of("nothing"), &AccrualPolicy::default());
        assert_eq!(text, "nothing\n");
    }
}
