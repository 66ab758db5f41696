//! The line-oriented mapping file format.
//!
//! ```text
//! img/food/plate.png food
//! >img/food/fries.png french fries
//! img/clothing/hanger.png clothing
//! >img/clothing/shirt.png collared shirt
//! ```
//!
//! A line without a leading `>` declares a category: the first token is the
//! selector image shown on the home page, the rest of the line is the
//! category name. A line starting with `>` adds an item to the most recently
//! declared category: the first token is the image, the rest is the text to
//! speak. Tokens are separated by single spaces and nothing is escaped.

use std::fmt;

use crate::error::{BoardError, Result};

/// Prefix that marks an item line.
pub const ITEM_MARKER: char = '>';

/// One parsed line of a mapping file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MappingLine {
    /// A home selector image and the name of the category it opens.
    Category { image: String, name: String },
    /// An image in the current category and the text it speaks.
    Item { image: String, text: String },
}

impl MappingLine {
    pub fn image(&self) -> &str {
        match self {
            Self::Category { image, .. } | Self::Item { image, .. } => image,
        }
    }
}

/// Parse one line of a mapping file. `line_no` is 1-based and only used in
/// error reports.
///
/// Trailing whitespace (including a `\r` from CRLF files) is ignored and
/// blank lines yield `Ok(None)`.
pub fn parse_line(line_no: usize, line: &str) -> Result<Option<MappingLine>> {
    let line = line.trim_end();
    if line.trim_start().is_empty() {
        return Ok(None);
    }

    let (is_item, body) = match line.strip_prefix(ITEM_MARKER) {
        Some(rest) => (true, rest),
        None => (false, line),
    };

    let Some((image, text)) = body.split_once(' ') else {
        return Err(parse_error(line_no, "expected an image location followed by text"));
    };
    if image.is_empty() {
        return Err(parse_error(line_no, "missing image location"));
    }
    if text.is_empty() {
        return Err(parse_error(line_no, "missing text after image location"));
    }

    let image = image.to_string();
    let text = text.to_string();
    Ok(Some(if is_item {
        MappingLine::Item { image, text }
    } else {
        MappingLine::Category { image, name: text }
    }))
}

fn parse_error(line: usize, reason: &str) -> BoardError {
    BoardError::Parse {
        line,
        reason: reason.to_string(),
    }
}

impl fmt::Display for MappingLine {
    /// Writes the line as it appears in a mapping file, without the newline.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Category { image, name } => write!(f, "{image} {name}"),
            Self::Item { image, text } => write!(f, "{ITEM_MARKER}{image} {text}"),
        }
    }
}
