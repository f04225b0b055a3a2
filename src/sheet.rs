//! Parsing of published-sheet CSV text into headers and rows.
//!
//! The dialect is deliberately narrow: commas delimit cells and a `"`
//! toggles a quoted span in which commas are kept. Quote characters are
//! dropped, and `""` is not an escape, so a literal quote cannot appear
//! in a cell. Parsing never fails; unbalanced quotes just run to the end
//! of the line.

use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParsedSheet {
    pub headers: Vec<String>,
    /// Data rows in source order. Blank rows are dropped, ragged rows are
    /// kept as they are.
    pub rows: Vec<Vec<String>>,
}

impl ParsedSheet {
    /// Header text for display, falling back to `Column N` for blanks.
    pub fn header_label(&self, index: usize) -> String {
        match self.headers.get(index) {
            Some(header) if !header.is_empty() => header.clone(),
            _ => format!("Column {}", index + 1),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.rows.is_empty()
    }
}

/// Parses CSV text. The first line is the header line whatever it holds.
pub fn parse(text: &str) -> ParsedSheet {
    let text = text.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    if text.is_empty() {
        return ParsedSheet::default();
    }

    let mut lines = text.split('\n');
    let headers = lines.next().map(parse_line).unwrap_or_default();
    let rows = lines
        .map(parse_line)
        .filter(|cells| cells.iter().any(|cell| !cell.is_empty()))
        .collect();

    ParsedSheet { headers, rows }
}

/// Splits one line into trimmed cells.
fn parse_line(line: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                cells.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    cells.push(current.trim().to_string());
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse(""), ParsedSheet::default());
        assert_eq!(parse("  \n\t\n "), ParsedSheet::default());
    }

    #[test]
    fn test_plain_fields_are_split_and_trimmed() {
        let sheet = parse("Name , Meals,Rate\n Alice, 20 ,55.5\nBob,18,55.5");
        assert_eq!(sheet.headers, cells(&["Name", "Meals", "Rate"]));
        assert_eq!(
            sheet.rows,
            vec![cells(&["Alice", "20", "55.5"]), cells(&["Bob", "18", "55.5"])]
        );
    }

    #[test]
    fn test_quotes_keep_commas_and_are_dropped() {
        let sheet = parse("h\na,\"b,c\",d");
        assert_eq!(sheet.rows, vec![cells(&["a", "b,c", "d"])]);
    }

    #[test]
    fn test_doubled_quote_is_not_an_escape() {
        // The two quotes toggle twice and vanish.
        let sheet = parse("h\n\"say \"\"hi\"\"\",x");
        assert_eq!(sheet.rows, vec![cells(&["say hi", "x"])]);
    }

    #[test]
    fn test_trailing_empty_field() {
        let sheet = parse("a,b,");
        assert_eq!(sheet.headers, cells(&["a", "b", ""]));
    }

    #[test]
    fn test_blank_rows_are_dropped() {
        let sheet = parse("h1,h2\n,\n  ,   \nx,\n\n,y");
        assert_eq!(sheet.rows, vec![cells(&["x", ""]), cells(&["", "y"])]);
    }

    #[test]
    fn test_ragged_rows_are_not_padded() {
        let sheet = parse("a,b,c\n1\n1,2,3,4");
        assert_eq!(sheet.rows, vec![cells(&["1"]), cells(&["1", "2", "3", "4"])]);
    }

    #[test]
    fn test_unbalanced_quote_runs_to_end_of_line() {
        let sheet = parse("h\na,\"b,c,d\ne,f");
        assert_eq!(sheet.rows, vec![cells(&["a", "b,c,d"]), cells(&["e", "f"])]);
    }

    #[test]
    fn test_header_line_is_kept_even_if_blank_cells() {
        let sheet = parse(",,\n1,2,3");
        assert_eq!(sheet.headers, cells(&["", "", ""]));
        assert_eq!(sheet.rows.len(), 1);
    }

    #[test]
    fn test_crlf_and_bom() {
        let sheet = parse("\u{feff}a,b\r\n1,2\r\n");
        assert_eq!(sheet.headers, cells(&["a", "b"]));
        assert_eq!(sheet.rows, vec![cells(&["1", "2"])]);
    }

    #[test]
    fn test_is_empty() {
        assert!(parse("").is_empty());
        assert!(parse(" \n ").is_empty());
        // A lone header line still counts as content.
        assert!(!parse("Name,Meals").is_empty());
        assert!(!parse("Name\nAlice").is_empty());
    }

    #[test]
    fn test_header_label_fallback() {
        let sheet = parse("Name,,Rate");
        assert_eq!(sheet.header_label(0), "Name");
        assert_eq!(sheet.header_label(1), "Column 2");
        assert_eq!(sheet.header_label(5), "Column 6");
    }
}
