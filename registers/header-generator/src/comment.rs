// Licensed under the Apache-2.0 license

//! Doxygen comment blocks.
//!
//! A block is built from text fragments. Each fragment has its placeholders
//! substituted and is then word-wrapped at [`WRAP_WIDTH`] columns:
//!
//! ```text
//! /** First fragment, wrapped with a "/** " prefix on its first line and
//!  * " * " on the following ones.
//!  *
//!  * Second fragment, separated by a bare " *" line.
//!  *
//!  * @defgroup consecutive_tags are not separated
//!  * @{
//!  */
//! ```

use crate::error::GeneratorResult;
use crate::template::Placeholders;

/// Maximum width of a line inside a comment block, prefixes included.
pub const WRAP_WIDTH: usize = 80;

/// Closing marker of a documentation group.
pub const GROUP_CLOSE: &str = "/** @} */\n";

/// Render `fragments` into one comment block, terminated by ` */` and a newline.
pub fn comment_block(fragments: &[&str], placeholders: &Placeholders) -> GeneratorResult<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut previous_is_tag = false;

    for (i, fragment) in fragments.iter().enumerate() {
        let is_tag = fragment.starts_with('@');
        let text = placeholders.render(fragment)?;
        if i == 0 {
            lines.extend(wrap(&text, WRAP_WIDTH, "/** ", " * "));
            if lines.is_empty() {
                lines.push("/**".to_string());
            }
        } else {
            // Doxygen wants tags such as `@defgroup` and `@{` on adjacent lines.
            if !(previous_is_tag && is_tag) {
                lines.push(" *".to_string());
            }
            lines.extend(wrap(&text, WRAP_WIDTH, " * ", " * "));
        }
        previous_is_tag = is_tag;
    }
    if lines.is_empty() {
        lines.push("/**".to_string());
    }

    let mut block = lines.join("\n");
    block.push_str("\n */\n");
    Ok(block)
}

/// Tab stops used when expanding tabs before wrapping.
const TAB_SIZE: usize = 8;

/// Greedy word wrap, line-for-line compatible with the wrapping of the
/// existing headers.
///
/// Tabs expand to eight-column tab stops and every other whitespace character
/// becomes a space. Runs of spaces inside a line are kept; whitespace at the
/// end of a line and at the start of a continuation line is dropped. Words
/// break after hyphens and around `--` dashes. A word too long for a line is
/// chopped, filling the current line first, unless it is an `@` tag, which is
/// always kept whole on a line of its own.
pub fn wrap(text: &str, width: usize, initial_indent: &str, subsequent_indent: &str) -> Vec<String> {
    let mut chunks = split_chunks(&normalize_whitespace(text));
    chunks.reverse();
    let mut lines: Vec<String> = Vec::new();

    while !chunks.is_empty() {
        let indent = if lines.is_empty() {
            initial_indent
        } else {
            subsequent_indent
        };
        let room = width.saturating_sub(indent.chars().count());

        if !lines.is_empty() && chunks.last().is_some_and(|c| is_blank(c)) {
            chunks.pop();
        }

        let mut line: Vec<Vec<char>> = Vec::new();
        let mut len = 0;
        while let Some(chunk) = chunks.pop() {
            if len + chunk.len() > room {
                chunks.push(chunk);
                break;
            }
            len += chunk.len();
            line.push(chunk);
        }

        if let Some(chunk) = chunks.pop() {
            if chunk.len() > room {
                break_long_word(chunk, &mut chunks, &mut line, len, room);
            } else {
                chunks.push(chunk);
            }
        }

        if line.last().is_some_and(|c| is_blank(c)) {
            line.pop();
        }
        if !line.is_empty() {
            let mut text = indent.to_string();
            text.extend(line.iter().flatten());
            lines.push(text);
        }
    }
    lines
}

fn normalize_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut column = 0;
    for c in text.chars() {
        match c {
            '\t' => {
                let n = TAB_SIZE - column % TAB_SIZE;
                out.extend(std::iter::repeat(' ').take(n));
                column += n;
            }
            '\n' | '\r' => {
                out.push(' ');
                column = 0;
            }
            '\x0b' | '\x0c' => {
                out.push(' ');
                column += 1;
            }
            c => {
                out.push(c);
                column += 1;
            }
        }
    }
    out
}

/// Whitespace or empty.
fn is_blank(chunk: &[char]) -> bool {
    chunk.iter().all(|c| c.is_whitespace())
}

/// Put as much of an overlong `chunk` on the current line as fits, preferring
/// to break after a hyphen, and push the rest back.
fn break_long_word(
    chunk: Vec<char>,
    chunks: &mut Vec<Vec<char>>,
    line: &mut Vec<Vec<char>>,
    len: usize,
    room: usize,
) {
    if chunk.first() == Some(&'@') {
        if line.is_empty() {
            line.push(chunk);
        } else {
            chunks.push(chunk);
        }
        return;
    }

    let space_left = if room < 1 { 1 } else { room - len };
    let mut end = space_left;
    if let Some(hyphen) = chunk[..space_left].iter().rposition(|&c| c == '-') {
        if hyphen > 0 && chunk[..hyphen].iter().any(|&c| c != '-') {
            end = hyphen + 1;
        }
    }
    let rest = chunk[end..].to_vec();
    line.push(chunk[..end].to_vec());
    chunks.push(rest);
}

/// Split text into whitespace runs and words, with words further split after
/// hyphens and around `--` dashes. `@` tags stay whole.
fn split_chunks(text: &str) -> Vec<Vec<char>> {
    let chars: Vec<char> = text.chars().collect();
    let mut chunks = Vec::new();
    let mut start = 0;
    while start < chars.len() {
        let end = chunk_end(&chars, start);
        chunks.push(chars[start..end].to_vec());
        start = end;
    }
    chunks
}

fn chunk_end(chars: &[char], start: usize) -> usize {
    let run_end = |pred: fn(char) -> bool| {
        chars[start..]
            .iter()
            .position(|&c| !pred(c))
            .map_or(chars.len(), |n| start + n)
    };
    if chars[start].is_whitespace() {
        return run_end(char::is_whitespace);
    }
    if chars[start] == '@' {
        return run_end(|c| !c.is_whitespace());
    }
    if chars[start] == '-' && start > 0 && is_punct(chars, start - 1) {
        if let Some(end) = dash_end(chars, start) {
            return end;
        }
    }

    let mut k = start + 1;
    loop {
        if chars.get(k) == Some(&'-') && breaks_after_hyphen(chars, k) {
            return k + 1;
        }
        if k == chars.len() || chars[k].is_whitespace() {
            return k;
        }
        if is_punct(chars, k - 1) && dash_end(chars, k).is_some() {
            return k;
        }
        k += 1;
    }
}

fn is_word(chars: &[char], i: usize) -> bool {
    chars.get(i).is_some_and(|&c| c.is_alphanumeric() || c == '_')
}

fn is_letter(chars: &[char], i: usize) -> bool {
    chars.get(i).is_some_and(|&c| c.is_alphabetic() || c == '_')
}

/// Characters after which a `--` dash may start a new chunk.
fn is_punct(chars: &[char], i: usize) -> bool {
    is_word(chars, i) || chars.get(i).is_some_and(|c| "!\"'&.,?".contains(*c))
}

/// End of a dash of two or more hyphens at `start` that is followed by a word.
fn dash_end(chars: &[char], start: usize) -> Option<usize> {
    let end = chars[start..]
        .iter()
        .position(|&c| c != '-')
        .map_or(chars.len(), |n| start + n);
    (end - start >= 2 && is_word(chars, end)).then_some(end)
}

/// Whether a word may break after the hyphen at `i`: "well-known",
/// "a-b-cd", but not "x-1" or "-flag".
fn breaks_after_hyphen(chars: &[char], i: usize) -> bool {
    let behind = (i >= 2 && is_letter(chars, i - 2) && is_letter(chars, i - 1))
        || (i >= 3 && is_letter(chars, i - 3) && chars[i - 2] == '-' && is_letter(chars, i - 1));
    let ahead = is_letter(chars, i + 1)
        && (is_letter(chars, i + 2)
            || (chars.get(i + 2) == Some(&'-') && is_letter(chars, i + 3)));
    behind && ahead
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HeaderConfig;
    use crate::resolve::{resolve, Peripheral};
    use crate::types::PeripheralSpec;

    fn peripheral() -> Peripheral {
        let spec = PeripheralSpec::from_yaml(
            "shortname: FOO\nlongname: Foo Peripheral\nshortdocname: EFM32TG_FOO\nregisters: []\n",
        )
        .unwrap();
        resolve(spec, &HeaderConfig::with_defaults()).unwrap()
    }

    #[test]
    fn test_wrap_short_text() {
        assert_eq!(wrap("hello world", 80, "/** ", " * "), vec!["/** hello world"]);
        assert!(wrap("   ", 80, "/** ", " * ").is_empty());
        assert_eq!(wrap("end.   ", 80, " * ", " * "), vec![" * end."]);
    }

    #[test]
    fn test_wrap_keeps_inner_spaces() {
        assert_eq!(wrap("a  b", 80, " * ", " * "), vec![" * a  b"]);
        // Tabs expand to the next multiple of eight columns.
        assert_eq!(wrap("a \t  b", 80, " * ", " * "), vec![" * a         b"]);
        assert_eq!(wrap("a\nb", 80, " * ", " * "), vec![" * a b"]);
    }

    #[test]
    fn test_wrap_breaks_after_hyphen() {
        let text = format!("{} Reload-Start-Sets-Compare", "x".repeat(60));
        assert_eq!(
            wrap(&text, 80, " * ", " * "),
            vec![
                format!(" * {} Reload-Start-", "x".repeat(60)),
                " * Sets-Compare".to_string(),
            ]
        );
        assert_eq!(
            wrap(
                "See the manual for definitions (the well-known twelve-bit register -- see above).",
                40,
                " * ",
                " * "
            ),
            vec![
                " * See the manual for definitions (the",
                " * well-known twelve-bit register -- see",
                " * above).",
            ]
        );
    }

    #[test]
    fn test_wrap_breaks_before_dash() {
        assert_eq!(
            wrap("Counter register--see also CNT", 20, " * ", " * "),
            vec![" * Counter register", " * --see also CNT"]
        );
    }

    #[test]
    fn test_wrap_width() {
        let text = "word ".repeat(60);
        let lines = wrap(&text, 80, "/** ", " * ");
        assert!(lines.len() > 1);
        assert!(lines[0].starts_with("/** "));
        for line in &lines {
            assert!(line.len() <= 80, "line too long: {:?}", line);
        }
        for line in &lines[1..] {
            assert!(line.starts_with(" * "));
        }
    }

    #[test]
    fn test_wrap_long_word_fills_current_line() {
        let word = "x".repeat(100);
        let lines = wrap(&format!("start {}", word), 20, " * ", " * ");
        assert_eq!(lines[0], format!(" * start {}", "x".repeat(11)));
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[6], " * xxxx");
        for line in &lines {
            assert!(line.len() <= 20);
        }
        let rejoined: String = lines.iter().map(|l| &l[3..]).collect();
        assert_eq!(rejoined, format!("start {}", word));
    }

    #[test]
    fn test_wrap_never_splits_tag() {
        let tag = format!("@defgroup_{}", "y".repeat(30));
        let lines = wrap(&format!("a {}", tag), 20, " * ", " * ");
        assert_eq!(lines, vec![" * a".to_string(), format!(" * {}", tag)]);

        let lines = wrap("a @defgroup-with-hyphens-x", 20, " * ", " * ");
        assert_eq!(lines, vec![" * a", " * @defgroup-with-hyphens-x"]);
    }

    #[test]
    fn test_tag_fragments_are_contiguous() {
        let p = peripheral();
        let block = comment_block(&["@file", "@see {shortdocname}"], &Placeholders::new(&p)).unwrap();
        assert_eq!(block, "/** @file\n * @see EFM32TG_FOO\n */\n");
    }

    #[test]
    fn test_separator_between_text_fragments() {
        let p = peripheral();
        let block = comment_block(
            &[
                "Definitions for the {shortname} subsystem ({longname}).",
                "@defgroup {shortdocname} {longdocname}",
                "@{{",
            ],
            &Placeholders::new(&p),
        )
        .unwrap();
        assert_eq!(
            block,
            "/** Definitions for the FOO subsystem (Foo Peripheral).\n\
             \x20*\n\
             \x20* @defgroup EFM32TG_FOO Foo Peripheral\n\
             \x20* @{\n\
             \x20*/\n"
        );
    }

    #[test]
    fn test_text_after_tag_gets_separator() {
        let p = peripheral();
        let block = comment_block(&["@brief x", "plain"], &Placeholders::new(&p)).unwrap();
        assert_eq!(block, "/** @brief x\n *\n * plain\n */\n");
    }

    #[test]
    fn test_block_lines_fit_width() {
        let p = peripheral();
        let long = "lorem ipsum dolor sit amet ".repeat(10);
        let block = comment_block(&[long.as_str(), long.as_str()], &Placeholders::new(&p)).unwrap();
        for line in block.lines() {
            assert!(line.len() <= WRAP_WIDTH, "line too long: {:?}", line);
        }
    }
}
