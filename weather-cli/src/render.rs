//! Plain-text rendering of a [`Report`].

use std::fmt::Write;

use weather_core::{Block, Panel, Report, Table};

const RULE: &str = "======================================================================";
const PANEL_GAP: usize = 4;

pub fn render_report(report: &Report) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}\n", report.title);

    for block in &report.blocks {
        match block {
            Block::Panels(panels) => out.push_str(&render_panels(panels)),
            Block::Heading(heading) => {
                let _ = writeln!(out, "\n{RULE}\n{heading}\n");
            }
            Block::Table(table) => out.push_str(&render_table(table)),
            Block::Error(msg) => {
                let _ = writeln!(out, "error: {msg}");
            }
            Block::Warning(msg) => {
                let _ = writeln!(out, "warning: {msg}");
            }
        }
    }

    out
}

/// Panels side by side, one `label: value` per line.
fn render_panels(panels: &[Panel]) -> String {
    let columns: Vec<Vec<String>> = panels
        .iter()
        .map(|p| p.metrics.iter().map(|m| format!("{}: {}", m.label, m.value)).collect())
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .map(|lines| lines.iter().map(|l| text_width(l)).max().unwrap_or(0))
        .collect();
    let height = columns.iter().map(Vec::len).max().unwrap_or(0);

    let mut out = String::new();
    for row in 0..height {
        let line: Vec<String> = columns
            .iter()
            .zip(&widths)
            .map(|(lines, &width)| pad(lines.get(row).map_or("", String::as_str), width + PANEL_GAP))
            .collect();
        let _ = writeln!(out, "{}", line.concat().trim_end());
    }

    out
}

fn render_table(table: &Table) -> String {
    let column_count = table.header.len();
    let mut widths: Vec<usize> = table.header.iter().map(|h| text_width(h)).collect();
    for row in &table.rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(text_width(cell));
        }
    }

    let format_row = |cells: &[String]| {
        let padded: Vec<String> = cells
            .iter()
            .take(column_count)
            .zip(&widths)
            .map(|(cell, &width)| pad(cell, width))
            .collect();
        padded.join(" | ").trim_end().to_string()
    };

    let mut out = String::new();
    let _ = writeln!(out, "{}", format_row(&table.header));
    let _ = writeln!(out, "{}", widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("-+-"));
    for row in &table.rows {
        let _ = writeln!(out, "{}", format_row(row));
    }

    out
}

// Counts chars; emoji render wider in most terminals, close enough for alignment.
fn text_width(s: &str) -> usize {
    s.chars().count()
}

fn pad(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(text_width(s));
    format!("{s}{}", " ".repeat(fill))
}
