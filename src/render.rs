//! Text rendering of the board and grid coordinates.
//!
//! Columns are lettered (`A`, `B`, ... `Z`, `AA`, ...) and rows numbered from 1,
//! so `B3` is column 1, row 2. Each cell is two characters wide:
//! `##` face-down, the symbol label when face-up, blank once matched.

use colored::Colorize;
use thiserror::Error;

use crate::core::{Board, CardFace, SymbolId};

const GLYPHS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// A coordinate string that does not name a cell.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoordinateError {
    #[error("expected a cell like B3, got {0:?}")]
    Malformed(String),

    #[error("{0} is outside the board")]
    OutOfRange(String),
}

/// Two-character label for a symbol.
#[must_use]
pub fn symbol_label(symbol: SymbolId) -> String {
    let n = GLYPHS.len();
    let raw = symbol.raw() as usize;
    if raw < n {
        format!(" {}", GLYPHS[raw] as char)
    } else if raw < n * n {
        format!("{}{}", GLYPHS[raw / n - 1] as char, GLYPHS[raw % n] as char)
    } else {
        "??".to_string()
    }
}

/// Spreadsheet-style column letters: 0 -> `A`, 25 -> `Z`, 26 -> `AA`.
#[must_use]
pub fn column_label(mut column: usize) -> String {
    let mut label = Vec::new();
    loop {
        label.push(b'A' + (column % 26) as u8);
        if column < 26 {
            break;
        }
        column = column / 26 - 1;
    }
    label.reverse();
    String::from_utf8_lossy(&label).into_owned()
}

/// Parse `"B3"` into `(column, row)`, zero-based.
pub fn parse_coordinate(
    input: &str,
    columns: usize,
    rows: usize,
) -> Result<(usize, usize), CoordinateError> {
    let input = input.trim();
    let split = input
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(input.len());
    let (letters, digits) = input.split_at(split);

    if letters.is_empty() || digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(CoordinateError::Malformed(input.to_string()));
    }

    let mut column = 0usize;
    for c in letters.to_ascii_uppercase().bytes() {
        column = column
            .checked_mul(26)
            .and_then(|v| v.checked_add((c - b'A') as usize + 1))
            .ok_or_else(|| CoordinateError::OutOfRange(input.to_string()))?;
    }
    let column = column - 1;

    let row: usize = digits
        .parse()
        .map_err(|_| CoordinateError::OutOfRange(input.to_string()))?;
    if row == 0 || row > rows || column >= columns {
        return Err(CoordinateError::OutOfRange(input.to_string()));
    }

    Ok((column, row - 1))
}

/// Render the board as a grid with column and row headers.
#[must_use]
pub fn render_board(board: &Board, color: bool) -> String {
    let row_width = board.rows().to_string().len();
    let mut out = String::new();

    out.push_str(&" ".repeat(row_width));
    for column in 0..board.columns() {
        out.push_str(&format!(" {:>2}", column_label(column)));
    }
    out.push('\n');

    for row in 0..board.rows() {
        out.push_str(&format!("{:>width$}", row + 1, width = row_width));
        for column in 0..board.columns() {
            out.push(' ');
            let cell = match board.card_at(column, row) {
                None => "  ".to_string(),
                Some(card) => match card.face {
                    CardFace::Hidden if color => "##".dimmed().to_string(),
                    CardFace::Hidden => "##".to_string(),
                    CardFace::Revealed if color => {
                        symbol_label(card.symbol).yellow().bold().to_string()
                    }
                    CardFace::Revealed => symbol_label(card.symbol),
                    CardFace::Matched => "  ".to_string(),
                },
            };
            out.push_str(&cell);
        }
        out.push('\n');
    }

    out
}
