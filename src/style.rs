use crossterm::style::{StyledContent, Stylize};
use hex::{FromHex, FromHexError};
use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::{
    fmt::{self, Display},
    str::FromStr,
};

/// The style of a piece of text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct TextStyle {
    flags: u8,
    pub(crate) colors: Colors,
}

impl TextStyle {
    pub(crate) fn colored(colors: Colors) -> Self {
        Self { flags: Default::default(), colors }
    }

    /// Add bold to this style.
    pub(crate) fn bold(self) -> Self {
        self.add_flag(TextFormatFlags::Bold)
    }

    /// Add italics to this style.
    pub(crate) fn italics(self) -> Self {
        self.add_flag(TextFormatFlags::Italics)
    }

    /// Add underline to this style.
    pub(crate) fn underlined(self) -> Self {
        self.add_flag(TextFormatFlags::Underlined)
    }

    /// Render this text with reduced intensity.
    pub(crate) fn dim(self) -> Self {
        self.add_flag(TextFormatFlags::Dim)
    }

    pub(crate) fn is_bold(&self) -> bool {
        self.has_flag(TextFormatFlags::Bold)
    }

    pub(crate) fn is_italics(&self) -> bool {
        self.has_flag(TextFormatFlags::Italics)
    }

    pub(crate) fn is_underlined(&self) -> bool {
        self.has_flag(TextFormatFlags::Underlined)
    }

    pub(crate) fn is_dim(&self) -> bool {
        self.has_flag(TextFormatFlags::Dim)
    }

    /// Merge this style with another one, keeping our own colors when both are set.
    pub(crate) fn merged(mut self, other: &TextStyle) -> Self {
        self.flags |= other.flags;
        self.colors = self.colors.merge(&other.colors);
        self
    }

    /// Apply this style to a piece of text.
    pub(crate) fn apply<T: Into<String>>(&self, text: T) -> StyledContent<String> {
        let text: String = text.into();
        let mut styled = text.stylize();
        if self.is_bold() {
            styled = styled.bold();
        }
        if self.is_italics() {
            styled = styled.italic();
        }
        if self.is_underlined() {
            styled = styled.underlined();
        }
        if self.is_dim() {
            styled = styled.dim();
        }
        if let Some(color) = self.colors.background {
            styled = styled.on(color.into());
        }
        if let Some(color) = self.colors.foreground {
            styled = styled.with(color.into());
        }
        styled
    }

    fn add_flag(mut self, flag: TextFormatFlags) -> Self {
        self.flags |= flag as u8;
        self
    }

    fn has_flag(&self, flag: TextFormatFlags) -> bool {
        self.flags & flag as u8 != 0
    }
}

#[derive(Debug)]
enum TextFormatFlags {
    Bold = 1,
    Italics = 2,
    Underlined = 4,
    Dim = 8,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, SerializeDisplay, DeserializeFromStr)]
pub(crate) enum Color {
    Black,
    DarkGrey,
    Red,
    DarkRed,
    Green,
    DarkGreen,
    Yellow,
    DarkYellow,
    Blue,
    DarkBlue,
    Magenta,
    DarkMagenta,
    Cyan,
    DarkCyan,
    White,
    Grey,
    Rgb { r: u8, g: u8, b: u8 },
}

impl Color {
    pub(crate) fn new(r: u8, g: u8, b: u8) -> Self {
        Self::Rgb { r, g, b }
    }

    /// The CSS representation of this color.
    pub(crate) fn to_html(&self) -> String {
        match self {
            Self::Black => "#000000".into(),
            Self::DarkGrey => "#5a5a5a".into(),
            Self::Red => "#ff0000".into(),
            Self::DarkRed => "#8b0000".into(),
            Self::Green => "#00ff00".into(),
            Self::DarkGreen => "#006400".into(),
            Self::Yellow => "#ffff00".into(),
            Self::DarkYellow => "#8b8000".into(),
            Self::Blue => "#0000ff".into(),
            Self::DarkBlue => "#00008b".into(),
            Self::Magenta => "#ff00ff".into(),
            Self::DarkMagenta => "#8b008b".into(),
            Self::Cyan => "#00ffff".into(),
            Self::DarkCyan => "#008b8b".into(),
            Self::White => "#ffffff".into(),
            Self::Grey => "#808080".into(),
            Self::Rgb { r, g, b } => format!("#{r:02x}{g:02x}{b:02x}"),
        }
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let output = match input {
            "black" => Self::Black,
            "white" => Self::White,
            "grey" => Self::Grey,
            "dark_grey" => Self::DarkGrey,
            "red" => Self::Red,
            "dark_red" => Self::DarkRed,
            "green" => Self::Green,
            "dark_green" => Self::DarkGreen,
            "blue" => Self::Blue,
            "dark_blue" => Self::DarkBlue,
            "yellow" => Self::Yellow,
            "dark_yellow" => Self::DarkYellow,
            "magenta" => Self::Magenta,
            "dark_magenta" => Self::DarkMagenta,
            "cyan" => Self::Cyan,
            "dark_cyan" => Self::DarkCyan,
            // Fallback to hex-encoded rgb
            _ => {
                let values = <[u8; 3]>::from_hex(input.trim_start_matches('#'))?;
                Self::Rgb { r: values[0], g: values[1], b: values[2] }
            }
        };
        Ok(output)
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rgb { r, g, b } => write!(f, "{}", hex::encode([*r, *g, *b])),
            Self::Black => write!(f, "black"),
            Self::White => write!(f, "white"),
            Self::Grey => write!(f, "grey"),
            Self::DarkGrey => write!(f, "dark_grey"),
            Self::Red => write!(f, "red"),
            Self::DarkRed => write!(f, "dark_red"),
            Self::Green => write!(f, "green"),
            Self::DarkGreen => write!(f, "dark_green"),
            Self::Blue => write!(f, "blue"),
            Self::DarkBlue => write!(f, "dark_blue"),
            Self::Yellow => write!(f, "yellow"),
            Self::DarkYellow => write!(f, "dark_yellow"),
            Self::Magenta => write!(f, "magenta"),
            Self::DarkMagenta => write!(f, "dark_magenta"),
            Self::Cyan => write!(f, "cyan"),
            Self::DarkCyan => write!(f, "dark_cyan"),
        }
    }
}

impl From<Color> for crossterm::style::Color {
    fn from(value: Color) -> Self {
        use crossterm::style::Color as C;
        match value {
            Color::Black => C::Black,
            Color::DarkGrey => C::DarkGrey,
            Color::Red => C::Red,
            Color::DarkRed => C::DarkRed,
            Color::Green => C::Green,
            Color::DarkGreen => C::DarkGreen,
            Color::Yellow => C::Yellow,
            Color::DarkYellow => C::DarkYellow,
            Color::Blue => C::Blue,
            Color::DarkBlue => C::DarkBlue,
            Color::Magenta => C::Magenta,
            Color::DarkMagenta => C::DarkMagenta,
            Color::Cyan => C::Cyan,
            Color::DarkCyan => C::DarkCyan,
            Color::White => C::White,
            Color::Grey => C::Grey,
            Color::Rgb { r, g, b } => C::Rgb { r, g, b },
        }
    }
}

/// Text colors.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Colors {
    /// The background color.
    #[serde(default)]
    pub(crate) background: Option<Color>,

    /// The foreground color.
    #[serde(default)]
    pub(crate) foreground: Option<Color>,
}

impl Colors {
    pub(crate) fn merge(&self, other: &Colors) -> Self {
        let background = self.background.or(other.background);
        let foreground = self.foreground.or(other.foreground);
        Self { background, foreground }
    }
}

impl From<Colors> for crossterm::style::Colors {
    fn from(value: Colors) -> Self {
        let foreground = value.foreground.map(Color::into);
        let background = value.background.map(Color::into);
        Self { foreground, background }
    }
}

#[derive(thiserror::Error, Debug)]
pub(crate) enum ParseColorError {
    #[error("invalid hex color: {0}")]
    Hex(#[from] FromHexError),
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;

    #[test]
    fn color_serde() {
        let color: Color = "beef42".parse().unwrap();
        assert_eq!(color.to_string(), "beef42");
    }

    #[rstest]
    #[case::named("dark_cyan", Color::DarkCyan)]
    #[case::hex("0a0b0c", Color::new(10, 11, 12))]
    #[case::hash_prefixed("#ff0080", Color::new(255, 0, 128))]
    fn parse_color(#[case] input: &str, #[case] expected: Color) {
        let color = Color::from_str(input).expect("failed to parse");
        assert_eq!(color, expected);
    }

    #[rstest]
    #[case::too_short("abc")]
    #[case::not_hex("zzzzzz")]
    #[case::unknown_name("purple")]
    fn invalid_colors(#[case] input: &str) {
        Color::from_str(input).expect_err("not an error");
    }

    #[rstest]
    #[case::named(Color::Grey, "#808080")]
    #[case::rgb(Color::new(1, 2, 3), "#010203")]
    fn html_colors(#[case] color: Color, #[case] expected: &str) {
        assert_eq!(color.to_html(), expected);
    }

    #[test]
    fn merge_prefers_own_colors() {
        let style = TextStyle::colored(Colors { foreground: Some(Color::Red), background: None }).bold();
        let other = TextStyle::colored(Colors { foreground: Some(Color::Blue), background: Some(Color::Black) });
        let merged = style.merged(&other);
        assert_eq!(merged.colors.foreground, Some(Color::Red));
        assert_eq!(merged.colors.background, Some(Color::Black));
        assert!(merged.is_bold());
    }
}
