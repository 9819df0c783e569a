#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

const MIN_COLUMN_WIDTH: usize = 4;

/// Render an aligned table for string rows. Widths count characters, so
/// accented labels (island and entry point names) line up.
#[must_use]
pub fn render_entity_table(headers: &[&str], rows: &[Vec<String>], options: TableOptions) -> String {
    let mut widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| width_of(cell))
                .max()
                .unwrap_or(0)
                .max(width_of(header))
                .max(MIN_COLUMN_WIDTH)
        })
        .collect();

    fit_widths(&mut widths, headers, options.max_width);

    let header_line = headers
        .iter()
        .zip(&widths)
        .map(|(header, width)| pad(&truncate_text(header, *width), *width, false))
        .collect::<Vec<_>>()
        .join("  ");
    let divider = "-".repeat(width_of(&header_line));

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(header_line);
    lines.push(divider);
    for row in rows {
        let line = widths
            .iter()
            .enumerate()
            .map(|(index, width)| {
                let cell = row.get(index).map_or("-", String::as_str);
                let text = truncate_text(cell, *width);
                let padded = pad(&text, *width, looks_numeric(&text));
                if options.color {
                    colorize(&text, padded)
                } else {
                    padded
                }
            })
            .collect::<Vec<_>>()
            .join("  ");
        lines.push(line);
    }
    lines.join("\n")
}

fn width_of(text: &str) -> usize {
    text.chars().count()
}

/// Shrink the widest columns one character at a time until the table fits,
/// never below the header width.
fn fit_widths(widths: &mut [usize], headers: &[&str], max_width: Option<usize>) {
    let Some(max_width) = max_width else {
        return;
    };
    let separators = widths.len().saturating_sub(1) * 2;

    while widths.iter().sum::<usize>() + separators > max_width {
        let widest = widths
            .iter()
            .enumerate()
            .filter(|(idx, width)| **width > width_of(headers[*idx]).max(MIN_COLUMN_WIDTH))
            .max_by_key(|(_, width)| **width)
            .map(|(idx, _)| idx);
        let Some(idx) = widest else {
            break;
        };
        widths[idx] -= 1;
    }
}

fn truncate_text(value: &str, width: usize) -> String {
    if width_of(value) <= width {
        return value.to_string();
    }
    if width <= 1 {
        return "…".to_string();
    }
    let mut out: String = value.chars().take(width - 1).collect();
    out.push('…');
    out
}

fn looks_numeric(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty() && trimmed.parse::<f64>().is_ok()
}

fn pad(value: &str, width: usize, right_align: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(width_of(value)));
    if right_align {
        format!("{fill}{value}")
    } else {
        format!("{value}{fill}")
    }
}

/// Highlight boolean flags and missing values; padding stays outside the
/// escape codes.
fn colorize(text: &str, padded: String) -> String {
    let code = match text {
        "true" | "success" => "32",
        "false" => "31",
        "null" | "-" => "2",
        _ => return padded,
    };
    padded.replacen(text, &format!("\u{1b}[{code}m{text}\u{1b}[0m"), 1)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const PLAIN: TableOptions = TableOptions {
        max_width: None,
        color: false,
    };

    #[test]
    fn aligns_mixed_widths() {
        let headers = ["EP", "Island"];
        let rows = vec![
            vec!["Harbour".to_string(), "North".to_string()],
            vec!["Old Airport".to_string(), "South".to_string()],
        ];
        let table = render_entity_table(&headers, &rows, PLAIN);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[1].chars().all(|c| c == '-'));
        assert_eq!(lines[0].find("Island"), lines[2].find("North"));
    }

    #[test]
    fn numbers_are_right_aligned() {
        let rows = vec![vec!["7".to_string()], vec!["1234".to_string()]];
        let table = render_entity_table(&["count"], &rows, PLAIN);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[2], "    7");
        assert_eq!(lines[3], " 1234");
    }

    #[test]
    fn counts_characters_not_bytes() {
        let rows = vec![vec!["Gáldar".to_string(), "x".to_string()]];
        let table = render_entity_table(&["EP", "n"], &rows, PLAIN);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(
            lines[0].chars().position(|c| c == 'n'),
            lines[2].chars().position(|c| c == 'x')
        );
    }

    #[test]
    fn shrinks_to_max_width() {
        let rows = vec![vec!["a very long entry point label".to_string(), "1".to_string()]];
        let options = TableOptions {
            max_width: Some(20),
            color: false,
        };
        let table = render_entity_table(&["EP", "ID"], &rows, options);
        for line in table.lines().skip(2) {
            assert!(width_of(line) <= 20, "{line}");
            assert!(line.contains('…'));
        }
    }

    #[test]
    fn color_wraps_flags_only() {
        let options = TableOptions {
            max_width: None,
            color: true,
        };
        let rows = vec![vec!["true".to_string(), "Harbour".to_string()]];
        let table = render_entity_table(&["flag", "EP"], &rows, options);
        assert!(table.contains("\u{1b}[32mtrue\u{1b}[0m"));
        assert!(!table.contains("\u{1b}[32mHarbour"));
    }
}
