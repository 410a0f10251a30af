//! Greedy word wrapping
//!
//! Lines are packed greedily on single-space boundaries; there is no
//! hyphenation. A word that overflows a partly filled line is carried whole
//! onto the next line, even when it is longer than the limit. Only a word
//! that is too long for an empty line is cut to the limit and gets a line to
//! itself. Lengths count characters, not bytes.
//!
//! Every yielded line borrows from the input: consecutive words joined by
//! their single separating space are a contiguous slice of the source.

/// Wrap `text` into lines of `max_chars` characters
///
/// Text that already fits is returned unchanged as the only line. A line
/// exceeds `max_chars` only when it is a single word carried over from a
/// full line.
pub fn wrap_text(text: &str, max_chars: usize) -> WrapLines<'_> {
    WrapLines {
        text,
        max_chars,
        next_word: Some(0),
        check_whole: true,
        carried: false,
    }
}

/// Iterator over wrapped lines, see [`wrap_text`]
#[derive(Debug, Clone)]
pub struct WrapLines<'a> {
    text: &'a str,
    max_chars: usize,
    /// Byte offset of the next unconsumed word, `None` once all are consumed
    next_word: Option<usize>,
    check_whole: bool,
    /// The next word overflowed the previous line and starts this one whole
    carried: bool,
}

impl WrapLines<'_> {
    /// Peek the next word as (start, end) byte offsets
    fn peek_word(&self) -> Option<(usize, usize)> {
        let start = self.next_word?;
        let end = self.text[start..]
            .find(' ')
            .map_or(self.text.len(), |offset| start + offset);
        Some((start, end))
    }

    /// Consume the word ending at `end`
    fn consume(&mut self, end: usize) {
        self.next_word = if end < self.text.len() {
            Some(end + 1)
        } else {
            None
        };
    }
}

impl<'a> Iterator for WrapLines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.check_whole {
            self.check_whole = false;
            if self.text.chars().count() <= self.max_chars {
                self.next_word = None;
                return Some(self.text);
            }
        }

        let carried = core::mem::replace(&mut self.carried, false);

        // Current line as (start, end, char count); an empty line is
        // replaced by the next word rather than extended
        let mut line: Option<(usize, usize, usize)> = None;

        while let Some((start, end)) = self.peek_word() {
            let word = &self.text[start..end];
            let word_chars = word.chars().count();

            match line {
                Some((line_start, _, line_chars)) if line_chars > 0 => {
                    let joined = line_chars + 1 + word_chars;
                    if joined > self.max_chars {
                        // Word starts the next line
                        self.carried = true;
                        break;
                    }
                    line = Some((line_start, end, joined));
                    self.consume(end);
                }
                _ => {
                    let keep_whole = carried && line.is_none();
                    self.consume(end);
                    if word_chars > self.max_chars && !keep_whole {
                        return Some(truncate_chars(word, self.max_chars));
                    }
                    line = Some((start, end, word_chars));
                }
            }
        }

        match line {
            Some((start, end, chars)) if chars > 0 => Some(&self.text[start..end]),
            _ => None,
        }
    }
}

/// Cut `text` to at most `max_chars` characters
fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}
