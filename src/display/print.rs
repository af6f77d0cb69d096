//! Printable statement layout
//!
//! A landscape text page: period on the left, the category's print title
//! centred, the direction on the right, then the statement table.

use crate::models::Declaration;

use super::declaration::{format_declaration_table, DisplayOptions};

/// Page width in characters
pub const PAGE_WIDTH: usize = 132;

/// Width reserved for the left and right header blocks
const SIDE_WIDTH: usize = 34;

const SUBTITLE: &str = "Déclaration Fiscale";

fn width(s: &str) -> usize {
    s.chars().count()
}

/// Place three blocks on one line: left-aligned, centred, right-aligned
fn header_line(left: &str, center: &str, right: &str) -> String {
    let middle = PAGE_WIDTH.saturating_sub(2 * SIDE_WIDTH);
    let pad_total = middle.saturating_sub(width(center));
    let pad_left = pad_total / 2;

    format!(
        "{:<side$}{}{}{}{:>side$}",
        left,
        " ".repeat(pad_left),
        center,
        " ".repeat(pad_total - pad_left),
        right,
        side = SIDE_WIDTH
    )
    .trim_end()
    .to_string()
}

/// Render the full print page for a declaration
pub fn render_print_layout(decl: &Declaration, opts: &DisplayOptions) -> String {
    let mut output = String::new();
    let title = decl.category().title();

    output.push_str(&header_line("Période", title, ""));
    output.push('\n');
    output.push_str(&header_line(
        &decl.period.to_string(),
        SUBTITLE,
        decl.direction.trim(),
    ));
    output.push('\n');
    output.push_str(&"═".repeat(PAGE_WIDTH));
    output.push_str("\n\n");
    output.push_str(&format_declaration_table(&decl.body, opts));
    output.push('\n');

    output
}
