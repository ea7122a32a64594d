// src/csv.rs
use std::io::{self, Write};
use std::mem::take;

/* ---------------- Parsing ---------------- */

/// Minimal CSV/TSV tokenizer.
/// - `"..."` quoting with `""` escapes; separators and newlines inside quotes are data
/// - LF, CRLF and lone CR line endings
/// - leading UTF-8 BOM dropped (Sheets exports carry one)
/// - empty lines dropped; a line of bare separators is kept (the caller decides)
/// - a quote still open at end of input is re-read as a literal `"`, so only
///   that row is affected and the lines after it parse normally
pub fn parse_rows(text: &str, sep: char) -> Vec<Vec<String>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut rows = Vec::new();
    let mut at = 0;
    let mut literal_quotes = false;

    while at < text.len() {
        let scan = scan_row(&text[at..], sep, literal_quotes);
        if scan.unterminated {
            // Rewind to the start of this row.
            literal_quotes = true;
            continue;
        }
        literal_quotes = false;
        at += scan.consumed;

        let empty_line = scan.cells.len() == 1 && scan.cells[0].is_empty();
        if !empty_line {
            rows.push(scan.cells);
        }
    }

    rows
}

struct RowScan {
    cells: Vec<String>,
    /// Bytes read, line ending included
    consumed: usize,
    /// Input ended inside a quoted section
    unterminated: bool,
}

/// Read one logical row from the front of `text`.
fn scan_row(text: &str, sep: char, literal_quotes: bool) -> RowScan {
    let mut cells = Vec::new();
    let mut field = s!();
    let mut in_quotes = false;
    let mut chars = text.char_indices().peekable();

    while let Some((i, ch)) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek().map(|&(_, c)| c) == Some('"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(ch);
            }
            continue;
        }

        match ch {
            // A quote only opens a quoted section at the start of a field
            '"' if field.is_empty() && !literal_quotes => in_quotes = true,
            c if c == sep => cells.push(take(&mut field)),
            '\r' | '\n' => {
                let mut consumed = i + 1;
                if ch == '\r' && chars.peek().map(|&(_, c)| c) == Some('\n') {
                    consumed += 1;
                }
                cells.push(field);
                return RowScan { cells, consumed, unterminated: false };
            }
            _ => field.push(ch),
        }
    }

    cells.push(field);
    RowScan { cells, consumed: text.len(), unterminated: in_quotes }
}

/* ---------------- Writing ---------------- */

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV/TSV row to any writer.
pub fn write_row<W: Write>(mut w: W, row: &[String], sep: char) -> io::Result<()> {
    for (i, cell) in row.iter().enumerate() {
        if i > 0 {
            write!(w, "{}", sep)?;
        }
        if needs_quotes(cell, sep) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

/// Render an optional header plus rows into one delimited string.
pub fn to_delimited_string(headers: Option<&[String]>, rows: &[Vec<String>], sep: char) -> String {
    let mut buf: Vec<u8> = Vec::new();

    if let Some(h) = headers {
        let _ = write_row(&mut buf, h, sep);
    }
    for r in rows {
        let _ = write_row(&mut buf, r, sep);
    }

    match String::from_utf8(buf) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(&e.into_bytes()).into_owned(),
    }
}
