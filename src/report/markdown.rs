use std::fmt::Write;

use tabled::builder::Builder;
use tabled::settings::Style;

use super::{Block, Document, Section, Table};

const CONTENTS_TITLE: &str = "Contents";

/// Renders the document as GitHub-flavoured markdown.
///
/// The table of contents is derived from the finished section list but is
/// written directly below the title.
pub fn render(document: &Document) -> String {
    let mut out = String::new();

    setext(&mut out, &document.title);
    setext(&mut out, CONTENTS_TITLE);
    for title in document.contents() {
        let _ = writeln!(out, "* [{}](#{})", title, anchor(title));
    }
    out.push('\n');

    for section in &document.sections {
        render_section(&mut out, section);
    }

    out
}

/// GitHub heading anchor: lowercase, punctuation dropped, spaces to hyphens.
pub fn anchor(title: &str) -> String {
    title
        .trim()
        .to_lowercase()
        .chars()
        .filter_map(|c| match c {
            ' ' => Some('-'),
            c if c.is_alphanumeric() || c == '-' || c == '_' => Some(c),
            _ => None,
        })
        .collect()
}

fn setext(out: &mut String, title: &str) {
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "{}", "=".repeat(title.chars().count().max(3)));
    out.push('\n');
}

fn render_section(out: &mut String, section: &Section) {
    let level = usize::from(section.level.clamp(1, 6));
    let _ = writeln!(out, "{} {}", "#".repeat(level), section.title);
    out.push('\n');

    for block in &section.body {
        match block {
            Block::Paragraph(text) | Block::Placeholder(text) => {
                let _ = writeln!(out, "{text}");
            }
            Block::Table(table) => {
                let _ = writeln!(out, "{}", render_table(table));
            }
        }
        out.push('\n');
    }
}

fn render_table(table: &Table) -> String {
    let mut builder = Builder::default();
    builder.push_record(table.headers.iter().map(|header| escape_cell(header)));
    for row in &table.rows {
        builder.push_record(row.iter().map(|cell| escape_cell(cell)));
    }

    let mut rendered = builder.build();
    rendered.with(Style::markdown());
    rendered.to_string()
}

// NOTE: A raw `|` or newline would split the markdown row
fn escape_cell(cell: &str) -> String {
    cell.replace('|', "\\|").replace("\r\n", "<br>").replace('\n', "<br>")
}
