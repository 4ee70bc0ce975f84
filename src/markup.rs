//! HTML-like markup helpers used by the command engine.
//!
//! A conversation entry produces two renditions of the same input: the plain
//! text line and its markup. Word and rest-of-line arguments can be sliced
//! from either one. The functions here convert between the two by counting
//! *visible characters*: tags count for nothing, entities count for one
//! character.
//!
//! All offsets are code-point offsets, never byte offsets.

use thiserror::Error;

/// Errors raised while walking malformed markup.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MarkupError {
    /// A `<` was never closed by a `>`.
    #[error("unterminated tag at byte {0}")]
    UnterminatedTag(usize),
    /// A `&` was never closed by a `;`.
    #[error("unterminated entity at byte {0}")]
    UnterminatedEntity(usize),
    /// The requested slice starts after it ends.
    #[error("invalid slice range {start}..{end}")]
    InvalidRange { start: usize, end: usize },
}

/// Removes the leading command word from a markup string.
///
/// Tags are skipped over and kept, so formatting wrapped around the command
/// word survives as empty elements. Every visible character up to the first
/// whitespace is removed, then that single whitespace character is removed
/// and the rest of the string is returned untouched.
///
/// # Errors
///
/// Returns [`MarkupError::UnterminatedTag`] when a tag met before the first
/// whitespace is never closed.
///
/// # Examples
///
/// ```
/// use imcmd::markup::strip_command;
///
/// assert_eq!(strip_command("me <i>waves</i>").unwrap(), "<i>waves</i>");
/// assert_eq!(strip_command("<b>me</b> waves").unwrap(), "<b></b>waves");
/// ```
pub fn strip_command(markup: &str) -> Result<String, MarkupError> {
    let mut stripped = String::with_capacity(markup.len());
    let mut pos = 0;

    while let Some(c) = markup[pos..].chars().next() {
        if c == '<' {
            let close = markup[pos..]
                .find('>')
                .ok_or(MarkupError::UnterminatedTag(pos))?;
            stripped.push_str(&markup[pos..=pos + close]);
            pos += close + 1;
        } else if c.is_whitespace() {
            stripped.push_str(&markup[pos + c.len_utf8()..]);
            return Ok(stripped);
        } else {
            pos += c.len_utf8();
        }
    }

    Ok(stripped)
}

/// Returns the markup covering the visible characters `start..end`.
///
/// Counting rules: tags are zero characters, an entity such as `&amp;` is one
/// character, `<br>` is one, `<img ...>` is seven (`[Image]`) and `<hr>` is
/// five. Tags still open when `start` is reached are re-emitted in front of
/// the first visible character, and tags still open when `end` is reached are
/// closed, innermost first.
///
/// # Errors
///
/// - [`MarkupError::InvalidRange`] when `start > end`
/// - [`MarkupError::UnterminatedTag`] / [`MarkupError::UnterminatedEntity`]
///   when the markup scanned before `end` is malformed
///
/// # Examples
///
/// ```
/// use imcmd::markup::slice;
///
/// assert_eq!(slice("<b>bob</b> alice", 0, 3).unwrap(), "<b>bob</b>");
/// assert_eq!(slice("<b>bob alice</b>", 4, 9).unwrap(), "<b>alice</b>");
/// ```
pub fn slice(markup: &str, start: usize, end: usize) -> Result<String, MarkupError> {
    if start > end {
        return Err(MarkupError::InvalidRange { start, end });
    }
    if start == end {
        return Ok(String::new());
    }

    let mut sliced = String::new();
    // Open tags, outermost first
    let mut open_tags: Vec<&str> = Vec::new();
    let mut reopened = false;
    let mut visible = 0;
    let mut pos = 0;

    while visible < end {
        let Some(c) = markup[pos..].chars().next() else {
            break;
        };

        // Tags opened before the slice starts wrap its content
        if visible >= start && !reopened {
            for tag in &open_tags {
                sliced.push_str(tag);
            }
            reopened = true;
        }

        match c {
            '<' => {
                let close = markup[pos..]
                    .find('>')
                    .ok_or(MarkupError::UnterminatedTag(pos))?;
                let tag = &markup[pos..=pos + close];

                if starts_with_ignore_case(tag, "<img ") {
                    visible += "[Image]".len();
                } else if starts_with_ignore_case(tag, "<br") {
                    visible += 1;
                } else if starts_with_ignore_case(tag, "<hr>") {
                    visible += "\n---\n".len();
                } else if tag.starts_with("</") {
                    open_tags.pop();
                } else {
                    open_tags.push(tag);
                }

                if visible >= start {
                    sliced.push_str(tag);
                }
                pos += close + 1;
            }
            '&' => {
                let close = markup[pos..]
                    .find(';')
                    .ok_or(MarkupError::UnterminatedEntity(pos))?;
                if visible >= start {
                    sliced.push_str(&markup[pos..=pos + close]);
                }
                visible += 1;
                pos += close + 1;
            }
            _ => {
                if visible >= start {
                    sliced.push(c);
                }
                visible += 1;
                pos += c.len_utf8();
            }
        }
    }

    for tag in open_tags.iter().rev() {
        sliced.push_str("</");
        sliced.push_str(tag_name(tag));
        sliced.push('>');
    }

    Ok(sliced)
}

fn starts_with_ignore_case(tag: &str, prefix: &str) -> bool {
    tag.len() >= prefix.len()
        && tag.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}

/// Name of an opening tag: the alphanumeric run after `<`.
fn tag_name(tag: &str) -> &str {
    let body = &tag[1..];
    let len = body
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(body.len());
    &body[..len]
}

/// Escapes plain text so it can be used as markup.
///
/// # Examples
///
/// ```
/// use imcmd::markup::escape_text;
///
/// assert_eq!(escape_text("a < b & c"), "a &lt; b &amp; c");
/// ```
pub fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '\'' => escaped.push_str("&#39;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Renders markup as plain text for terminal display.
///
/// Tags are dropped, `<br>` becomes a newline and the basic entities are
/// decoded. Unknown entities and malformed fragments are kept verbatim.
pub fn to_plain(markup: &str) -> String {
    let mut plain = String::with_capacity(markup.len());
    let mut pos = 0;

    while let Some(c) = markup[pos..].chars().next() {
        match c {
            '<' => match markup[pos..].find('>') {
                Some(close) => {
                    if starts_with_ignore_case(&markup[pos..], "<br") {
                        plain.push('\n');
                    }
                    pos += close + 1;
                }
                None => {
                    plain.push_str(&markup[pos..]);
                    break;
                }
            },
            '&' => {
                let decoded = markup[pos..].find(';').and_then(|close| {
                    let entity = &markup[pos..=pos + close];
                    decode_entity(entity).map(|c| (c, entity.len()))
                });
                match decoded {
                    Some((c, len)) => {
                        plain.push(c);
                        pos += len;
                    }
                    None => {
                        plain.push('&');
                        pos += 1;
                    }
                }
            }
            _ => {
                plain.push(c);
                pos += c.len_utf8();
            }
        }
    }

    plain
}

fn decode_entity(entity: &str) -> Option<char> {
    match entity {
        "&amp;" => Some('&'),
        "&lt;" => Some('<'),
        "&gt;" => Some('>'),
        "&apos;" | "&#39;" => Some('\''),
        "&quot;" => Some('"'),
        "&nbsp;" => Some(' '),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_command_plain() {
        assert_eq!(strip_command("help me").unwrap(), "me");
        assert_eq!(strip_command("say hello there").unwrap(), "hello there");
    }

    #[test]
    fn test_strip_command_single_word() {
        assert_eq!(strip_command("clear").unwrap(), "");
    }

    #[test]
    fn test_strip_command_keeps_tags() {
        assert_eq!(
            strip_command("<b>say</b> <i>hi</i>").unwrap(),
            "<b></b><i>hi</i>"
        );
        assert_eq!(
            strip_command("<font color=\"red\">me</font>").unwrap(),
            "<font color=\"red\"></font>"
        );
    }

    #[test]
    fn test_strip_command_removes_only_one_space() {
        assert_eq!(strip_command("say  two").unwrap(), " two");
    }

    #[test]
    fn test_strip_command_multibyte() {
        assert_eq!(strip_command("café crème").unwrap(), "crème");
    }

    #[test]
    fn test_strip_command_unterminated_tag() {
        assert_eq!(
            strip_command("<b say"),
            Err(MarkupError::UnterminatedTag(0))
        );
    }

    #[test]
    fn test_strip_command_ignores_malformed_arguments() {
        // Only the command word is scanned
        assert_eq!(strip_command("say <b oops").unwrap(), "<b oops");
    }

    #[test]
    fn test_slice_plain_text() {
        assert_eq!(slice("alice hello", 0, 5).unwrap(), "alice");
        assert_eq!(slice("alice hello", 6, 11).unwrap(), "hello");
    }

    #[test]
    fn test_slice_keeps_wrapping_tags() {
        assert_eq!(slice("<b>bob</b>", 0, 3).unwrap(), "<b>bob</b>");
    }

    #[test]
    fn test_slice_reopens_tags_at_start() {
        assert_eq!(
            slice("<b><i>one two</i></b>", 4, 7).unwrap(),
            "<b><i>two</i></b>"
        );
    }

    #[test]
    fn test_slice_entity_counts_as_one() {
        assert_eq!(slice("a&amp;b c", 0, 3).unwrap(), "a&amp;b");
        assert_eq!(slice("a&amp;b c", 4, 5).unwrap(), "c");
    }

    #[test]
    fn test_slice_multibyte() {
        assert_eq!(slice("héllo wörld", 6, 11).unwrap(), "wörld");
    }

    #[test]
    fn test_slice_empty_range() {
        assert_eq!(slice("<b>x</b>", 1, 1).unwrap(), "");
    }

    #[test]
    fn test_slice_invalid_range() {
        assert_eq!(
            slice("abc", 2, 1),
            Err(MarkupError::InvalidRange { start: 2, end: 1 })
        );
    }

    #[test]
    fn test_slice_unterminated_entity() {
        assert_eq!(slice("a &amp b", 0, 4), Err(MarkupError::UnterminatedEntity(2)));
    }

    #[test]
    fn test_slice_line_break_counts_as_one() {
        assert_eq!(slice("a<br>b", 0, 3).unwrap(), "a<br>b");
    }

    #[test]
    fn test_escape_text() {
        assert_eq!(
            escape_text("<b>\"it's\" & more</b>"),
            "&lt;b&gt;&quot;it&#39;s&quot; &amp; more&lt;/b&gt;"
        );
    }

    #[test]
    fn test_to_plain() {
        assert_eq!(to_plain("<b>bold</b> &amp; <i>italic</i>"), "bold & italic");
        assert_eq!(to_plain("one<br>two"), "one\ntwo");
        assert_eq!(to_plain("fish &chips"), "fish &chips");
        assert_eq!(to_plain("it&#39;s, it&apos;s"), "it's, it's");
    }

    #[test]
    fn test_to_plain_reverses_escape() {
        let text = "x < y && \"z\" isn't";
        assert_eq!(to_plain(&escape_text(text)), text);
    }
}
