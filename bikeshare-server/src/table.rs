//! Plain-text station tables for the CLI.

use crate::domain::StationRecord;

const TITLE: &str = "Bikes";

#[derive(Clone, Copy)]
enum Align {
    Left,
    Right,
}

struct Column {
    header: &'static str,
    align: Align,
}

const COLUMNS: [Column; 4] = [
    Column {
        header: "Station",
        align: Align::Left,
    },
    Column {
        header: "Address",
        align: Align::Left,
    },
    Column {
        header: "# Bikes",
        align: Align::Right,
    },
    Column {
        header: "# Docks",
        align: Align::Right,
    },
];

fn cells(record: &StationRecord) -> [String; 4] {
    [
        record.name.clone(),
        record.address.clone().unwrap_or_default(),
        record.num_bikes_available.to_string(),
        record.num_docks_available.to_string(),
    ]
}

fn pad(text: &str, width: usize, align: Align) -> String {
    let fill = " ".repeat(width.saturating_sub(text.chars().count()));
    match align {
        Align::Left => format!("{text}{fill}"),
        Align::Right => format!("{fill}{text}"),
    }
}

fn line(values: &[String], widths: &[usize], separator: &str) -> String {
    let padded: Vec<String> = values
        .iter()
        .zip(widths)
        .zip(&COLUMNS)
        .map(|((v, w), c)| pad(v, *w, c.align))
        .collect();
    padded.join(separator).trim_end().to_string()
}

/// Render stations as a table of name, address, bikes and docks.
pub fn render_stations(records: &[StationRecord]) -> String {
    render(records, false)
}

/// Render with a title and box-drawing column rules.
pub fn render_stations_pretty(records: &[StationRecord]) -> String {
    render(records, true)
}

fn render(records: &[StationRecord], pretty: bool) -> String {
    let headers: Vec<String> = COLUMNS.iter().map(|c| c.header.to_string()).collect();
    let rows: Vec<[String; 4]> = records.iter().map(cells).collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let separator = if pretty { " │ " } else { "  " };
    let total: usize = widths.iter().sum::<usize>() + separator.chars().count() * (widths.len() - 1);

    let mut out = Vec::with_capacity(rows.len() + 3);
    if pretty {
        let indent = total.saturating_sub(TITLE.len()) / 2;
        out.push(format!("{}{TITLE}", " ".repeat(indent)));
    }
    out.push(line(&headers, &widths, separator));
    if pretty {
        let rule: Vec<String> = widths.iter().map(|w| "═".repeat(*w)).collect();
        out.push(rule.join("═╪═"));
    }
    for row in &rows {
        out.push(line(row, &widths, separator));
    }

    let mut text = out.join("\n");
    text.push('\n');
    text
}
