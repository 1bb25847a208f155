//! Caret positions given on the command line.
//!
//! A position is either a byte offset (`120`) or a 1-based `line:col`
//! pair (`7:5`), where the column counts characters.

use std::fmt;
use std::str::FromStr;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Position {
    Offset(u32),
    LineCol { line: u32, col: u32 },
}

/// A position argument that is neither an offset nor `line:col`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvalidPosition(pub String);

impl fmt::Display for InvalidPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid position '{}': expected an offset or <line>:<col>",
            self.0
        )
    }
}

impl std::error::Error for InvalidPosition {}

impl FromStr for Position {
    type Err = InvalidPosition;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidPosition(s.to_owned());
        match s.split_once(':') {
            None => s.parse().map(Position::Offset).map_err(|_| invalid()),
            Some((line, col)) => {
                let line: u32 = line.parse().map_err(|_| invalid())?;
                let col: u32 = col.parse().map_err(|_| invalid())?;
                if line == 0 || col == 0 {
                    return Err(invalid());
                }
                Ok(Position::LineCol { line, col })
            }
        }
    }
}

impl Position {
    /// Byte offset of this position in `text`.
    ///
    /// `None` if the position lies past the end of its line or the text.
    /// Column `len + 1` (just after the last character) is allowed.
    pub fn to_offset(self, text: &str) -> Option<u32> {
        let offset = match self {
            Position::Offset(offset) => {
                let offset = usize::try_from(offset).ok()?;
                (offset <= text.len() && text.is_char_boundary(offset)).then_some(offset)?
            }
            Position::LineCol { line, col } => {
                if line == 0 {
                    return None;
                }
                let mut lines = text.split('\n');
                let mut line_start = 0;
                for _ in 1..line {
                    line_start += lines.next()?.len() + 1;
                }
                let line_text = lines.next()?;
                let col = usize::try_from(col.checked_sub(1)?).ok()?;
                let in_line = line_text
                    .char_indices()
                    .map(|(i, _)| i)
                    .chain(std::iter::once(line_text.len()))
                    .nth(col)?;
                line_start + in_line
            }
        };
        u32::try_from(offset).ok()
    }
}

/// 1-based `(line, col)` of a byte offset, for messages.
pub fn line_col(text: &str, offset: u32) -> (usize, usize) {
    let offset = usize::try_from(offset).unwrap_or(usize::MAX).min(text.len());
    let before = text.get(..offset).unwrap_or(text);
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let col = before[line_start..].chars().count() + 1;
    (line, col)
}
