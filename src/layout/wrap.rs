//! String shaping for the character grid. All widths are counted in grapheme clusters.

use unicode_segmentation::UnicodeSegmentation;

use crate::config::MarkupWidths;

pub fn grapheme_len(s: &str) -> usize {
    s.graphemes(true).count()
}

fn take_graphemes(s: &str, n: usize) -> &str {
    match s.grapheme_indices(true).nth(n) {
        Some((byte, _)) => &s[..byte],
        None => s,
    }
}

/// Replace each pause marker with its run of spaces.
pub fn expand_markup(text: &str, widths: &MarkupWidths) -> String {
    widths
        .tokens()
        .iter()
        .fold(text.to_owned(), |acc, (token, width)| {
            acc.replace(token, &" ".repeat(*width))
        })
}

/// `left`, then spaces, then `right`, filling exactly `width` cells.
///
/// When both do not fit, `left` keeps priority and `right` is cut.
pub fn space_between(left: &str, right: &str, width: usize) -> String {
    let left = take_graphemes(left, width);
    let left_len = grapheme_len(left);
    let right = take_graphemes(right, width - left_len);
    let gap = width - left_len - grapheme_len(right);
    format!("{left}{}{right}", " ".repeat(gap))
}

/// Right-pad `s` with spaces to `width` cells. Longer input is returned unchanged.
pub fn pad_end(s: &str, width: usize) -> String {
    let len = grapheme_len(s);
    format!("{s}{}", " ".repeat(width.saturating_sub(len)))
}

/// Greedy word wrap breaking only at spaces.
///
/// Leading spaces of a line are dropped, and a space falling exactly on the line boundary is
/// swallowed. A word wider than `width` is kept whole on its own line.
pub fn line_wrap(text: &str, width: usize) -> Vec<String> {
    struct Wrapper {
        width: usize,
        lines: Vec<String>,
        line: String,
        line_len: usize,
        word: String,
        word_len: usize,
    }

    impl Wrapper {
        fn push_line(&mut self) {
            self.lines.push(std::mem::take(&mut self.line));
            self.line_len = 0;
        }

        fn push_word(&mut self) {
            if self.line_len > 0 && self.line_len + self.word_len > self.width {
                self.push_line();
            }
            self.line.push_str(&self.word);
            self.line_len += self.word_len;
            self.word.clear();
            self.word_len = 0;
        }

        fn push_space(&mut self) {
            if self.line_len == 0 {
                return;
            }
            if self.line_len >= self.width {
                self.push_line();
                return;
            }
            self.line.push(' ');
            self.line_len += 1;
        }
    }

    let mut w = Wrapper {
        width,
        lines: Vec::new(),
        line: String::new(),
        line_len: 0,
        word: String::new(),
        word_len: 0,
    };

    for g in text.graphemes(true) {
        if g == " " {
            w.push_word();
            w.push_space();
        } else {
            w.word.push_str(g);
            w.word_len += 1;
        }
    }
    w.push_word();
    if w.line_len > 0 {
        w.push_line();
    }
    w.lines
}

#[cfg(test)]
#[path = "../../tests/unit/layout/wrap.rs"]
mod tests;
