use crate::style::TextStyle;
use std::mem;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// A piece of styled text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Text {
    pub(crate) content: String,
    pub(crate) style: TextStyle,
}

impl Text {
    pub(crate) fn new<S: Into<String>>(content: S, style: TextStyle) -> Self {
        Self { content: content.into(), style }
    }

    pub(crate) fn width(&self) -> usize {
        self.content.width()
    }
}

impl From<&str> for Text {
    fn from(content: &str) -> Self {
        Self::new(content, TextStyle::default())
    }
}

impl From<String> for Text {
    fn from(content: String) -> Self {
        Self::new(content, TextStyle::default())
    }
}

/// A line of text made out of pieces with different styles.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Line(pub(crate) Vec<Text>);

impl Line {
    /// Append text to this line, merging it into the last piece if they share a style.
    pub(crate) fn push<T: Into<Text>>(&mut self, text: T) {
        let text = text.into();
        if text.content.is_empty() {
            return;
        }
        match self.0.last_mut() {
            Some(last) if last.style == text.style => last.content.push_str(&text.content),
            _ => self.0.push(text),
        }
    }

    pub(crate) fn texts(&self) -> &[Text] {
        &self.0
    }

    pub(crate) fn width(&self) -> usize {
        self.0.iter().map(Text::width).sum()
    }

    /// Apply a style to every piece of this line, keeping the colors each piece already has.
    pub(crate) fn apply_style(&mut self, style: &TextStyle) {
        for text in &mut self.0 {
            text.style = text.style.merged(style);
        }
    }

    /// Word wrap this line so that no resulting line is wider than `max_width`.
    ///
    /// Words that are wider than `max_width` are split. This always returns at least one line.
    pub(crate) fn wrap(&self, max_width: usize) -> Vec<Line> {
        let max_width = max_width.max(1);
        let mut lines = Vec::new();
        let mut current = Line::default();
        let mut current_width = 0;
        for text in &self.0 {
            for word in text.content.split_inclusive(' ') {
                let trimmed = word.trim_end_matches(' ');
                let word_width = trimmed.width();
                if current_width > 0 && current_width + word_width > max_width {
                    lines.push(mem::take(&mut current).trimmed());
                    current_width = 0;
                }
                // Whitespace between words never starts a wrapped line.
                if current_width == 0 && trimmed.is_empty() && !lines.is_empty() {
                    continue;
                }
                let mut chunks = split_at_width(trimmed, max_width);
                let last = chunks.pop().unwrap_or_default();
                for chunk in chunks {
                    current.push(Text::new(chunk, text.style));
                    lines.push(mem::take(&mut current));
                }
                current.push(Text::new(last, text.style));
                current.push(Text::new(&word[trimmed.len()..], text.style));
                current_width = current.width();
            }
        }
        lines.push(current.trimmed());
        lines
    }

    /// Split this line at exactly `max_width` columns, keeping all whitespace.
    pub(crate) fn split(&self, max_width: usize) -> Vec<Line> {
        let max_width = max_width.max(1);
        let mut lines = Vec::new();
        let mut current = Line::default();
        let mut current_width = 0;
        for text in &self.0 {
            let mut start = 0;
            for (index, c) in text.content.char_indices() {
                let width = c.width().unwrap_or(0);
                if current_width + width > max_width && current_width > 0 {
                    current.push(Text::new(&text.content[start..index], text.style));
                    lines.push(mem::take(&mut current));
                    current_width = 0;
                    start = index;
                }
                current_width += width;
            }
            current.push(Text::new(&text.content[start..], text.style));
        }
        lines.push(current);
        lines
    }

    fn trimmed(mut self) -> Self {
        while let Some(last) = self.0.last_mut() {
            let length = last.content.trim_end_matches(' ').len();
            last.content.truncate(length);
            if !last.content.is_empty() {
                break;
            }
            self.0.pop();
        }
        self
    }
}

impl From<Text> for Line {
    fn from(text: Text) -> Self {
        let mut line = Self::default();
        line.push(text);
        line
    }
}

impl From<&str> for Line {
    fn from(text: &str) -> Self {
        Text::from(text).into()
    }
}

impl From<String> for Line {
    fn from(text: String) -> Self {
        Text::from(text).into()
    }
}

fn split_at_width(word: &str, max_width: usize) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut start = 0;
    let mut width = 0;
    for (index, c) in word.char_indices() {
        let char_width = c.width().unwrap_or(0);
        if width + char_width > max_width && width > 0 {
            chunks.push(&word[start..index]);
            start = index;
            width = 0;
        }
        width += char_width;
    }
    chunks.push(&word[start..]);
    chunks
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;

    fn contents(lines: &[Line]) -> Vec<String> {
        lines.iter().map(|line| line.texts().iter().map(|t| t.content.as_str()).collect()).collect()
    }

    #[rstest]
    #[case::fits("hello world", 20, &["hello world"])]
    #[case::exact("hello world", 11, &["hello world"])]
    #[case::two_lines("hello world", 8, &["hello", "world"])]
    #[case::many("one two three four", 9, &["one two", "three", "four"])]
    #[case::long_word("abcdefghij", 4, &["abcd", "efgh", "ij"])]
    #[case::long_word_after_text("hi abcdefghij", 4, &["hi", "abcd", "efgh", "ij"])]
    #[case::empty("", 10, &[""])]
    #[case::double_spaces("aaaa  bbbb", 5, &["aaaa", "bbbb"])]
    fn word_wrapping(#[case] input: &str, #[case] width: usize, #[case] expected: &[&str]) {
        let line = Line::from(input);
        assert_eq!(contents(&line.wrap(width)), expected);
    }

    #[test]
    fn wrapping_keeps_styles() {
        let mut line = Line::from("hello ");
        line.push(Text::new("bold world", TextStyle::default().bold()));
        let lines = line.wrap(10);
        assert_eq!(contents(&lines), &["hello bold", "world"]);
        assert_eq!(lines[0].texts()[1].style, TextStyle::default().bold());
        assert_eq!(lines[1].texts()[0].style, TextStyle::default().bold());
    }

    #[test]
    fn wide_characters() {
        let line = Line::from("🛒 cart");
        assert_eq!(line.width(), 7);
        assert_eq!(contents(&line.wrap(3)), &["🛒", "car", "t"]);
    }

    #[rstest]
    #[case::fits("  a b", 10, &["  a b"])]
    #[case::split("  abcdef", 4, &["  ab", "cdef"])]
    #[case::exact("abcd", 2, &["ab", "cd"])]
    fn splitting(#[case] input: &str, #[case] width: usize, #[case] expected: &[&str]) {
        let line = Line::from(input);
        assert_eq!(contents(&line.split(width)), expected);
    }

    #[test]
    fn push_merges_styles() {
        let mut line = Line::from("a");
        line.push("b");
        line.push(Text::new("c", TextStyle::default().bold()));
        assert_eq!(line.texts().len(), 2);
        assert_eq!(line.texts()[0].content, "ab");
    }
}
