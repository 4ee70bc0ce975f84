//! Argument format and argument parsing.
//!
//! A command declares its arguments with a format string, one character per
//! positional argument:
//!
//! | Char | Kind | Taken from |
//! |------|------|------------|
//! | `w` | one word, up to the next space | plain text |
//! | `W` | one word, up to the next space | markup |
//! | `s` | the rest of the line | plain text |
//! | `S` | the rest of the line | markup |
//!
//! Markup arguments are located in the plain text first, then the same span
//! of visible characters is sliced out of the markup with
//! [`markup::slice`](crate::markup::slice), so formatting around the
//! argument is kept.

use log::{debug, warn};

use crate::markup;

/// Kind of one positional argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgKind {
    /// `w`
    Word,
    /// `W`
    MarkupWord,
    /// `s`
    Rest,
    /// `S`
    MarkupRest,
}

impl ArgKind {
    /// Maps a format character to its argument kind.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'w' => Some(ArgKind::Word),
            'W' => Some(ArgKind::MarkupWord),
            's' => Some(ArgKind::Rest),
            'S' => Some(ArgKind::MarkupRest),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            ArgKind::Word => 'w',
            ArgKind::MarkupWord => 'W',
            ArgKind::Rest => 's',
            ArgKind::MarkupRest => 'S',
        }
    }
}

/// Parses a format string such as `"ws"`.
///
/// Returns the first unknown character as the error.
pub fn parse_format(format: &str) -> Result<Vec<ArgKind>, char> {
    format
        .chars()
        .map(|c| ArgKind::from_char(c).ok_or(c))
        .collect()
}

/// Parsed arguments handed to a command handler.
///
/// There is exactly one slot per format character. A slot is `None` only
/// when the command tolerates wrong arguments and the line was too short.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Args {
    values: Vec<Option<String>>,
}

impl Args {
    pub(crate) fn new(values: Vec<Option<String>>) -> Self {
        Self { values }
    }

    /// Argument at `index`, if it was supplied.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.values.get(index).and_then(|v| v.as_deref())
    }

    /// Number of slots, which is the length of the format.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<&str>> + '_ {
        self.values.iter().map(|v| v.as_deref())
    }
}

/// Splits `raw` (and its markup rendition `markup`) according to `format`.
///
/// Returns `None` when the line has too few or too many arguments, unless
/// `tolerant` is set, in which case whatever could be parsed is returned.
pub fn parse_args(format: &[ArgKind], tolerant: bool, raw: &str, markup: &str) -> Option<Args> {
    let mut values: Vec<Option<String>> = vec![None; format.len()];
    // Byte offset into `raw`, always on a char boundary
    let mut cursor = 0;
    let mut next = 0;

    while next < format.len() && cursor < raw.len() {
        let remaining = &raw[cursor..];

        let value = match format[next] {
            ArgKind::Word | ArgKind::MarkupWord => {
                let len = remaining.find(' ').unwrap_or(remaining.len());
                let (start, end) = (cursor, cursor + len);
                // Skip the separating space, if any
                cursor = if len < remaining.len() { end + 1 } else { end };

                match format[next] {
                    ArgKind::Word => raw[start..end].to_owned(),
                    _ => markup_span(raw, markup, start, end),
                }
            }
            ArgKind::Rest => {
                cursor = raw.len();
                remaining.to_owned()
            }
            ArgKind::MarkupRest => {
                let start = cursor;
                cursor = raw.len();
                markup_span(raw, markup, start, raw.len())
            }
        };

        values[next] = Some(value);
        next += 1;
    }

    let too_few = next < format.len();
    let too_many = cursor < raw.len();
    if (too_few || too_many) && !tolerant {
        debug!(
            "wrong arguments for format {:?} in {:?} (too few: {}, too many: {})",
            format, raw, too_few, too_many
        );
        return None;
    }

    Some(Args::new(values))
}

/// Slices from `markup` the visible characters matching `raw[start..end]`.
fn markup_span(raw: &str, markup: &str, start: usize, end: usize) -> String {
    let x = raw[..start].chars().count();
    let y = x + raw[start..end].chars().count();

    markup::slice(markup, x, y).unwrap_or_else(|e| {
        warn!("malformed markup {:?}: {}, using plain text", markup, e);
        markup::escape_text(&raw[start..end])
    })
}
