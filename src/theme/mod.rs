//! Presentation themes.
//!
//! A theme describes the colors and text attributes used for every element drawn on a slide.

use crate::{
    code::highlighting::TokenKind,
    deck::{BadgeVariant, Tone},
    style::{Color, Colors, TextStyle},
};
use serde::Deserialize;
use std::{fs, path::Path};

pub(crate) mod registry;

pub use registry::{LoadThemeError, PresentationThemeRegistry};

/// A presentation theme.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PresentationTheme {
    /// The colors used for the slide's background and any text without its own colors.
    #[serde(default)]
    pub(crate) default_style: ElementStyle,

    #[serde(default)]
    pub(crate) header: HeaderStyle,

    #[serde(default)]
    pub(crate) body: BodyStyle,

    #[serde(default)]
    pub(crate) cards: CardStyle,

    #[serde(default)]
    pub(crate) badges: BadgeStyle,

    #[serde(default)]
    pub(crate) code: CodeStyle,

    #[serde(default)]
    pub(crate) controls: ControlsStyle,

    #[serde(default)]
    pub(crate) modals: ModalStyle,
}

impl PresentationTheme {
    /// Construct a presentation from a path.
    pub(crate) fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LoadThemeError> {
        let contents = fs::read_to_string(&path)?;
        let theme = serde_yaml::from_str(&contents)
            .map_err(|e| LoadThemeError::Corrupted(path.as_ref().display().to_string(), e.into()))?;
        Ok(theme)
    }

    /// The base colors for the whole presentation.
    pub(crate) fn colors(&self) -> Colors {
        self.default_style.colors
    }
}

/// The style of a single element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ElementStyle {
    #[serde(default)]
    pub(crate) colors: Colors,

    #[serde(default)]
    pub(crate) bold: bool,

    #[serde(default)]
    pub(crate) italics: bool,

    #[serde(default)]
    pub(crate) dim: bool,

    #[serde(default)]
    pub(crate) underlined: bool,
}

impl ElementStyle {
    pub(crate) fn style(&self) -> TextStyle {
        let mut style = TextStyle::colored(self.colors);
        if self.bold {
            style = style.bold();
        }
        if self.italics {
            style = style.italics();
        }
        if self.dim {
            style = style.dim();
        }
        if self.underlined {
            style = style.underlined();
        }
        style
    }
}

/// The style of the row at the top of every slide.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct HeaderStyle {
    #[serde(default)]
    pub(crate) title: ElementStyle,

    /// The `current / total` position indicator.
    #[serde(default)]
    pub(crate) position: ElementStyle,

    #[serde(default)]
    pub(crate) dot: ElementStyle,

    #[serde(default)]
    pub(crate) current_dot: ElementStyle,

    #[serde(default)]
    pub(crate) separator: ElementStyle,
}

/// The style of the free standing blocks in a slide's body.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct BodyStyle {
    #[serde(default)]
    pub(crate) lead: ElementStyle,

    #[serde(default)]
    pub(crate) text: ElementStyle,

    #[serde(default)]
    pub(crate) muted: ElementStyle,

    #[serde(default)]
    pub(crate) heading: ElementStyle,

    /// The style of bullet markers and step numbers.
    #[serde(default)]
    pub(crate) marker: ElementStyle,

    #[serde(default)]
    pub(crate) feature_icon: ElementStyle,

    #[serde(default)]
    pub(crate) feature_label: ElementStyle,
}

/// The style of card titles, per tone.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct CardStyle {
    #[serde(default)]
    pub(crate) plain: ElementStyle,

    #[serde(default)]
    pub(crate) primary: ElementStyle,

    #[serde(default)]
    pub(crate) accent: ElementStyle,

    #[serde(default)]
    pub(crate) destructive: ElementStyle,

    /// The style of the rule drawn under a card's title.
    #[serde(default)]
    pub(crate) rule: ElementStyle,
}

impl CardStyle {
    pub(crate) fn title(&self, tone: Tone) -> &ElementStyle {
        match tone {
            Tone::Plain => &self.plain,
            Tone::Primary => &self.primary,
            Tone::Accent => &self.accent,
            Tone::Destructive => &self.destructive,
        }
    }
}

/// The style of badges, per variant.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct BadgeStyle {
    #[serde(default)]
    pub(crate) default: ElementStyle,

    #[serde(default)]
    pub(crate) secondary: ElementStyle,

    #[serde(default)]
    pub(crate) outline: ElementStyle,

    #[serde(default)]
    pub(crate) destructive: ElementStyle,
}

impl BadgeStyle {
    pub(crate) fn variant(&self, variant: BadgeVariant) -> &ElementStyle {
        match variant {
            BadgeVariant::Default => &self.default,
            BadgeVariant::Secondary => &self.secondary,
            BadgeVariant::Outline => &self.outline,
            BadgeVariant::Destructive => &self.destructive,
        }
    }
}

/// The style of query samples.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct CodeStyle {
    /// The color of the block the sample is drawn on.
    pub(crate) background: Option<Color>,

    /// The number of columns between the block and the screen's edges.
    #[serde(default = "default_code_margin")]
    pub(crate) margin: u16,

    #[serde(default)]
    pub(crate) plain: ElementStyle,

    #[serde(default)]
    pub(crate) keyword: ElementStyle,

    #[serde(default)]
    pub(crate) field: ElementStyle,

    #[serde(default, rename = "type")]
    pub(crate) type_name: ElementStyle,

    #[serde(default)]
    pub(crate) string: ElementStyle,
}

impl CodeStyle {
    pub(crate) fn token(&self, kind: TokenKind) -> &ElementStyle {
        match kind {
            TokenKind::Keyword => &self.keyword,
            TokenKind::Field => &self.field,
            TokenKind::Type => &self.type_name,
            TokenKind::String => &self.string,
            TokenKind::Plain => &self.plain,
        }
    }
}

impl Default for CodeStyle {
    fn default() -> Self {
        Self {
            background: None,
            margin: default_code_margin(),
            plain: Default::default(),
            keyword: Default::default(),
            field: Default::default(),
            type_name: Default::default(),
            string: Default::default(),
        }
    }
}

fn default_code_margin() -> u16 {
    2
}

/// The style of the previous/restart/next strip at the bottom of every slide.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ControlsStyle {
    #[serde(default)]
    pub(crate) enabled: ElementStyle,

    #[serde(default)]
    pub(crate) disabled: ElementStyle,
}

/// The style of modals.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ModalStyle {
    #[serde(default)]
    pub(crate) base: ElementStyle,

    /// The style of the highlighted row.
    #[serde(default)]
    pub(crate) selection: ElementStyle,
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Write;

    #[test]
    fn element_style() {
        let style: ElementStyle =
            serde_yaml::from_str("colors:\n  foreground: red\nbold: true\ndim: true").expect("invalid style");
        let expected = TextStyle::colored(Colors { foreground: Some(Color::Red), background: None }).bold().dim();
        assert_eq!(style.style(), expected);
    }

    #[test]
    fn code_token_styles() {
        let code: CodeStyle = serde_yaml::from_str("type:\n  bold: true").expect("invalid style");
        assert!(code.token(TokenKind::Type).bold);
        assert!(!code.token(TokenKind::Keyword).bold);
        assert_eq!(code.margin, 2);
    }

    #[test]
    fn unknown_fields_rejected() {
        serde_yaml::from_str::<PresentationTheme>("potato: true").expect_err("parsed invalid theme");
    }

    #[test]
    fn from_path() {
        let mut file = tempfile::NamedTempFile::new().expect("failed to create file");
        writeln!(file, "badges:\n  outline:\n    italics: true").expect("failed to write");
        let theme = PresentationTheme::from_path(file.path()).expect("failed to load");
        assert!(theme.badges.variant(BadgeVariant::Outline).italics);
    }
}
