//! Plain-text tables for console listings.

/// Renders `rows` under `headers` with each column padded to its widest cell.
pub fn render(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let separator = format!(
        "+{}+",
        widths
            .iter()
            .map(|w| "-".repeat(w + 2))
            .collect::<Vec<_>>()
            .join("+")
    );

    let mut out = Vec::with_capacity(rows.len() + 4);
    out.push(separator.clone());
    out.push(line(headers.iter().copied(), &widths));
    out.push(separator.clone());
    for row in rows {
        out.push(line(row.iter().map(String::as_str), &widths));
    }
    if !rows.is_empty() {
        out.push(separator);
    }
    out.join("\n")
}

fn line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect();
    format!("| {} |", padded.join(" | "))
}
