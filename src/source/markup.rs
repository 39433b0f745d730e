//! HTML `<table>` parsing.
//!
//! Header labels come from `<th>` cells, data rows from `<tr>` elements with
//! `<td>` cells. An empty `<td>` becomes [`CellValue::Empty`]. Cell content is
//! reduced to its text; nested inline markup is flattened. Named HTML
//! entities such as `&nbsp;` are decoded.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{GridbookError, Result};
use crate::types::{CellValue, TableData};

#[derive(Clone, Copy, PartialEq, Eq)]
enum CellKind {
    Header,
    Data,
}

#[derive(Default)]
struct TableBuilder {
    id: Option<String>,
    headers: Vec<String>,
    rows: Vec<Vec<CellValue>>,
    row: Vec<(CellKind, Option<String>)>,
    cell: Option<(CellKind, Option<String>)>,
}

impl TableBuilder {
    fn open_cell(&mut self, kind: CellKind) {
        self.finish_cell();
        self.cell = Some((kind, None));
    }

    fn push_text(&mut self, text: &str) {
        if let Some((_, content)) = self.cell.as_mut() {
            match content {
                Some(existing) => {
                    existing.push(' ');
                    existing.push_str(text);
                }
                None => *content = Some(text.to_string()),
            }
        }
    }

    fn finish_cell(&mut self) {
        if let Some(cell) = self.cell.take() {
            self.row.push(cell);
        }
    }

    fn finish_row(&mut self) {
        self.finish_cell();
        if self.row.is_empty() {
            return;
        }
        let cells = std::mem::take(&mut self.row);
        let header_only = cells.iter().all(|(kind, _)| *kind == CellKind::Header);
        if header_only && self.headers.is_empty() && self.rows.is_empty() {
            self.headers = cells
                .into_iter()
                .map(|(_, text)| text.unwrap_or_default())
                .collect();
        } else {
            self.rows.push(
                cells
                    .into_iter()
                    .map(|(_, text)| text.map_or(CellValue::Empty, CellValue::Text))
                    .collect(),
            );
        }
    }

    fn build(mut self) -> Result<TableData> {
        self.finish_row();
        Ok(TableData::new(self.headers, self.rows)?.with_title(self.id))
    }
}

/// Attribute lookup with HTML rules: unquoted values and bare names are allowed.
fn attr(e: &BytesStart, key: &[u8]) -> Option<String> {
    e.html_attributes()
        .flatten()
        .find(|a| a.key.as_ref().eq_ignore_ascii_case(key))
        .and_then(|a| a.unescape_value().ok().map(|v| v.into_owned()))
}

fn lower_name(e: &BytesStart) -> Vec<u8> {
    e.local_name().as_ref().to_ascii_lowercase()
}

/// Parse every top-level `<table>` in `html`.
///
/// The table's `id` attribute becomes its title. Tables nested inside a
/// cell are flattened into that cell's text.
pub fn parse_markup_tables(html: &str) -> Result<Vec<TableData>> {
    let mut reader = Reader::from_str(html);
    reader.trim_text(true);
    reader.check_end_names(false);

    let mut tables = Vec::new();
    let mut current: Option<TableBuilder> = None;
    let mut nested = 0usize;

    loop {
        match reader.read_event()? {
            Event::Start(ref e) => {
                let name = lower_name(e);
                match (name.as_slice(), current.as_mut()) {
                    (b"table", None) => {
                        current = Some(TableBuilder {
                            id: attr(e, b"id"),
                            ..TableBuilder::default()
                        });
                    }
                    (b"table", Some(_)) => nested += 1,
                    (b"tr", Some(table)) if nested == 0 => table.finish_row(),
                    (b"th", Some(table)) if nested == 0 => table.open_cell(CellKind::Header),
                    (b"td", Some(table)) if nested == 0 => table.open_cell(CellKind::Data),
                    _ => {}
                }
            }
            Event::Empty(ref e) => {
                let name = lower_name(e);
                if let Some(table) = current.as_mut().filter(|_| nested == 0) {
                    match name.as_slice() {
                        b"th" => {
                            table.open_cell(CellKind::Header);
                            table.finish_cell();
                        }
                        b"td" => {
                            table.open_cell(CellKind::Data);
                            table.finish_cell();
                        }
                        _ => {}
                    }
                }
            }
            Event::Text(ref t) => {
                if let Some(table) = current.as_mut() {
                    let text = match t.unescape() {
                        Ok(s) => s.into_owned(),
                        Err(_) => String::from_utf8_lossy(t).into_owned(),
                    };
                    table.push_text(&text);
                }
            }
            Event::CData(ref t) => {
                if let Some(table) = current.as_mut() {
                    table.push_text(&String::from_utf8_lossy(t));
                }
            }
            Event::End(ref e) => {
                let name = e.local_name().as_ref().to_ascii_lowercase();
                match (name.as_slice(), current.as_mut()) {
                    (b"table", Some(_)) if nested > 0 => nested -= 1,
                    (b"table", Some(_)) => {
                        if let Some(table) = current.take() {
                            tables.push(table.build()?);
                        }
                    }
                    (b"tr", Some(table)) if nested == 0 => table.finish_row(),
                    (b"th" | b"td", Some(table)) if nested == 0 => table.finish_cell(),
                    _ => {}
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(table) = current.take() {
        tables.push(table.build()?);
    }
    if tables.is_empty() {
        return Err(GridbookError::parse("markup contains no <table> element"));
    }
    Ok(tables)
}

/// Parse the first `<table>` in `html`.
pub fn parse_markup(html: &str) -> Result<TableData> {
    parse_markup_tables(html)?
        .into_iter()
        .next()
        .ok_or_else(|| GridbookError::parse("markup contains no <table> element"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn thead_and_tbody() {
        let table = parse_markup(
            "<table id=\"stock\"><thead><tr><th>A</th><th>B</th></tr></thead>\
             <tbody><tr><td>1</td><td></td></tr><tr><td>3</td><td>4</td></tr></tbody></table>",
        )
        .unwrap();
        assert_eq!(table.title.as_deref(), Some("stock"));
        assert_eq!(table.headers, vec!["A", "B"]);
        assert_eq!(table.rows[0][1], CellValue::Empty);
        assert_eq!(table.rows[1][1], CellValue::text("4"));
    }

    #[test]
    fn header_row_without_thead() {
        let table =
            parse_markup("<table><tr><th>X</th></tr><tr><td>y</td></tr></table>").unwrap();
        assert_eq!(table.headers, vec!["X"]);
        assert_eq!(table.rows, vec![vec![CellValue::text("y")]]);
    }

    #[test]
    fn inline_markup_is_flattened() {
        let table =
            parse_markup("<table><tr><th>H</th></tr><tr><td><b>bold</b> &amp; plain</td></tr></table>")
                .unwrap();
        assert_eq!(table.rows[0][0], CellValue::text("bold & plain"));
    }

    #[test]
    fn html_entities_are_decoded() {
        let table = parse_markup(
            "<table><tr><td>Caf&eacute;</td><td>a&nbsp;b &amp; c</td><td>&#233;</td></tr></table>",
        )
        .unwrap();
        assert_eq!(
            table.rows[0],
            vec![
                CellValue::text("Caf\u{e9}"),
                CellValue::text("a\u{a0}b & c"),
                CellValue::text("\u{e9}"),
            ]
        );
    }

    #[test]
    fn unquoted_id_becomes_title() {
        let table = parse_markup("<table ID=stock><tr><td>1</td></tr></table>").unwrap();
        assert_eq!(table.title.as_deref(), Some("stock"));
    }

    #[test]
    fn self_closing_cell_is_empty() {
        let table = parse_markup("<table><tr><th>H</th></tr><tr><td/></tr></table>").unwrap();
        assert_eq!(table.rows[0][0], CellValue::Empty);
    }

    #[test]
    fn no_table_is_an_error() {
        assert!(parse_markup("<div>nothing here</div>").is_err());
    }

    #[test]
    fn several_tables() {
        let tables = parse_markup_tables(
            "<table id=\"a\"><tr><td>1</td></tr></table><table id=\"b\"><tr><td>2</td></tr></table>",
        )
        .unwrap();
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[1].title.as_deref(), Some("b"));
        assert!(!tables[0].has_header_row);
    }
}
