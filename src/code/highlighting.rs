use std::{fmt::Write, mem};

/// The words that get styled as query keywords.
const KEYWORDS: &[&str] = &["query", "mutation", "site", "product", "cart", "checkout"];

/// The words that get styled as field names.
const FIELDS: &[&str] = &["entityId", "name", "description", "prices", "variants"];

/// The words that get styled as scalar type names.
const TYPES: &[&str] = &["String", "Int", "Float", "Boolean"];

/// The class a highlighted token belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TokenKind {
    Keyword,
    Field,
    Type,
    String,
    Plain,
}

impl TokenKind {
    /// The CSS class used for this kind of token in HTML output.
    pub(crate) fn css_class(&self) -> Option<&'static str> {
        match self {
            Self::Keyword => Some("graphql-keyword"),
            Self::Field => Some("graphql-field"),
            Self::Type => Some("graphql-type"),
            Self::String => Some("graphql-string"),
            Self::Plain => None,
        }
    }
}

/// A piece of source text along with its classification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Token<'a> {
    pub(crate) kind: TokenKind,
    pub(crate) text: &'a str,
}

impl<'a> Token<'a> {
    fn new(kind: TokenKind, text: &'a str) -> Self {
        Self { kind, text }
    }
}

/// The set of words a highlighter recognizes.
#[derive(Clone, Debug)]
pub(crate) struct Vocabulary {
    keywords: &'static [&'static str],
    fields: &'static [&'static str],
    types: &'static [&'static str],
}

impl Vocabulary {
    fn classify(&self, word: &str) -> Option<TokenKind> {
        if self.keywords.contains(&word) {
            Some(TokenKind::Keyword)
        } else if self.fields.contains(&word) {
            Some(TokenKind::Field)
        } else if self.types.contains(&word) {
            Some(TokenKind::Type)
        } else {
            None
        }
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self { keywords: KEYWORDS, fields: FIELDS, types: TYPES }
    }
}

/// Highlights query language samples.
///
/// Input is split into tokens in a single pass and every token is classified exactly once, so
/// the output of one class can never be re-matched as another one.
#[derive(Clone, Debug, Default)]
pub(crate) struct CodeHighlighter {
    vocabulary: Vocabulary,
}

impl CodeHighlighter {
    /// Split the input into classified tokens.
    ///
    /// Concatenating the text of all returned tokens always yields the input back.
    pub(crate) fn tokenize<'a>(&self, source: &'a str) -> Vec<Token<'a>> {
        let mut tokens = Vec::new();
        let mut plain_start = 0;
        let mut chars = source.char_indices().peekable();
        while let Some((start, c)) = chars.next() {
            let (kind, end) = if is_word_char(c) {
                let mut end = start + c.len_utf8();
                while let Some((index, next)) = chars.next_if(|(_, next)| is_word_char(*next)) {
                    end = index + next.len_utf8();
                }
                match self.vocabulary.classify(&source[start..end]) {
                    Some(kind) => (kind, end),
                    None => continue,
                }
            } else if c == '"' {
                // An unterminated quote is just text.
                let Some(length) = source[start + 1..].find('"') else {
                    continue;
                };
                let end = start + 1 + length + 1;
                while chars.next_if(|(index, _)| *index < end).is_some() {}
                (TokenKind::String, end)
            } else {
                continue;
            };
            if plain_start < start {
                tokens.push(Token::new(TokenKind::Plain, &source[plain_start..start]));
            }
            tokens.push(Token::new(kind, &source[start..end]));
            plain_start = end;
        }
        if plain_start < source.len() {
            tokens.push(Token::new(TokenKind::Plain, &source[plain_start..]));
        }
        tokens
    }

    /// Tokenize the input and split the tokens into lines.
    ///
    /// Tokens spanning multiple lines, like multi line strings, are split at every line break.
    pub(crate) fn highlight_lines<'a>(&self, source: &'a str) -> Vec<Vec<Token<'a>>> {
        let mut lines = Vec::new();
        let mut current = Vec::new();
        for token in self.tokenize(source) {
            let mut pieces = token.text.split('\n').peekable();
            while let Some(piece) = pieces.next() {
                if !piece.is_empty() {
                    current.push(Token::new(token.kind, piece));
                }
                if pieces.peek().is_some() {
                    lines.push(mem::take(&mut current));
                }
            }
        }
        lines.push(current);
        lines
    }

    /// Render the input as HTML, wrapping every classified token in a span.
    pub(crate) fn highlight_html(&self, source: &str) -> String {
        let mut output = String::with_capacity(source.len());
        for token in self.tokenize(source) {
            let text = escape_html(token.text);
            match token.kind.css_class() {
                Some(class) => {
                    let _ = write!(output, "<span class=\"{class}\">{text}</span>");
                }
                None => output.push_str(&text),
            }
        }
        output
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Escape the characters that would otherwise be interpreted as markup.
pub(crate) fn escape_html(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            _ => output.push(c),
        }
    }
    output
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;

    fn kinds<'a>(tokens: &[Token<'a>]) -> Vec<(TokenKind, &'a str)> {
        tokens.iter().map(|t| (t.kind, t.text)).collect()
    }

    #[test]
    fn product_query() {
        let highlighter = CodeHighlighter::default();
        let tokens = highlighter.tokenize("site { product(entityId: 123) { name } }");
        let expected = vec![
            (TokenKind::Keyword, "site"),
            (TokenKind::Plain, " { "),
            (TokenKind::Keyword, "product"),
            (TokenKind::Plain, "("),
            (TokenKind::Field, "entityId"),
            (TokenKind::Plain, ": 123) { "),
            (TokenKind::Field, "name"),
            (TokenKind::Plain, " } }"),
        ];
        assert_eq!(kinds(&tokens), expected);
    }

    #[test]
    fn product_query_html() {
        let html = CodeHighlighter::default().highlight_html("site { product(entityId: 123) { name } }");
        let expected = concat!(
            "<span class=\"graphql-keyword\">site</span> { ",
            "<span class=\"graphql-keyword\">product</span>(",
            "<span class=\"graphql-field\">entityId</span>: 123) { ",
            "<span class=\"graphql-field\">name</span> } }"
        );
        assert_eq!(html, expected);
    }

    #[rstest]
    #[case::string("say \"hello\" now", "say <span class=\"graphql-string\">\"hello\"</span> now")]
    #[case::scalar_type("($id: Int!)", "($id: <span class=\"graphql-type\">Int</span>!)")]
    #[case::untouched("{ edges { node { sku } } }", "{ edges { node { sku } } }")]
    #[case::empty("", "")]
    #[case::partial_words("productId carts Integer", "productId carts Integer")]
    #[case::keyword_in_string("\"query\"", "<span class=\"graphql-string\">\"query\"</span>")]
    #[case::unterminated_quote("a \"query", "a \"<span class=\"graphql-keyword\">query</span>")]
    #[case::escaped_markup("a < b && c", "a &lt; b &amp;&amp; c")]
    #[case::empty_string("\"\"", "<span class=\"graphql-string\">\"\"</span>")]
    fn html_rendering(#[case] input: &str, #[case] expected: &str) {
        let html = CodeHighlighter::default().highlight_html(input);
        assert_eq!(html, expected);
    }

    #[test]
    fn markup_is_never_rematched() {
        // Class names contain words from the vocabulary; they must not be re-highlighted.
        let html = CodeHighlighter::default().highlight_html("cart \"x\" name");
        assert_eq!(
            html,
            concat!(
                "<span class=\"graphql-keyword\">cart</span> ",
                "<span class=\"graphql-string\">\"x\"</span> ",
                "<span class=\"graphql-field\">name</span>"
            )
        );
    }

    #[rstest]
    #[case::ascii("query Foo { cart }")]
    #[case::unicode("→ mutation ✅ \"ünïcode\" Boolean")]
    #[case::multiline("query {\n  site {\n    name\n  }\n}")]
    fn tokens_cover_input(#[case] input: &str) {
        let tokens = CodeHighlighter::default().tokenize(input);
        let joined: String = tokens.iter().map(|t| t.text).collect();
        assert_eq!(joined, input);
    }

    #[test]
    fn split_lines() {
        let lines = CodeHighlighter::default().highlight_lines("query {\n  \"a\nb\"\n}");
        let lines: Vec<_> = lines.iter().map(|line| kinds(line)).collect();
        let expected = vec![
            vec![(TokenKind::Keyword, "query"), (TokenKind::Plain, " {")],
            vec![(TokenKind::Plain, "  "), (TokenKind::String, "\"a")],
            vec![(TokenKind::String, "b\"")],
            vec![(TokenKind::Plain, "}")],
        ];
        assert_eq!(lines, expected);
    }
}
