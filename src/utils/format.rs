//! Formatting utilities for listings and host information.

use crate::models::ListEntry;

/// Render a listing as a bordered table with an index column.
///
/// ```text
/// ┌─────────┬───────┬───────────┐
/// │ (index) │ Name  │ Type      │
/// ├─────────┼───────┼───────────┤
/// │ 0       │ docs  │ directory │
/// │ 1       │ a.txt │ file      │
/// └─────────┴───────┴───────────┘
/// ```
pub fn render_listing(entries: &[ListEntry]) -> String {
    let header = ["(index)", "Name", "Type"];
    let rows: Vec<[String; 3]> = entries
        .iter()
        .enumerate()
        .map(|(i, e)| [i.to_string(), e.name.clone(), e.kind.label().to_string()])
        .collect();

    let mut widths = header.map(|h| h.chars().count());
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let rule = |left: &str, mid: &str, right: &str| {
        let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{}{}{}", left, segments.join(mid), right)
    };
    let line = |cells: &[&str]| {
        let padded: Vec<String> = cells
            .iter()
            .zip(widths)
            .map(|(c, w)| format!(" {}{} ", c, " ".repeat(w - c.chars().count())))
            .collect();
        format!("│{}│", padded.join("│"))
    };

    let mut out = vec![rule("┌", "┬", "┐"), line(&header), rule("├", "┼", "┤")];
    for row in &rows {
        out.push(line(&[row[0].as_str(), row[1].as_str(), row[2].as_str()]));
    }
    out.push(rule("└", "┴", "┘"));
    out.join("\n")
}

/// Quote a line terminator with its escapes visible (e.g. `"\n"`).
pub fn format_eol(eol: &str) -> String {
    format!("{:?}", eol)
}

/// Format a clock speed given in MHz as GHz (e.g. `2.4GHz`).
pub fn format_ghz(mhz: u64) -> String {
    let ghz = mhz as f64 / 1000.0;
    format!("{}GHz", trim_float(ghz))
}

fn trim_float(value: f64) -> String {
    let s = format!("{:.2}", value);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}
