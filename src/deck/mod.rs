//! The slide deck: an ordered, immutable list of slides made of structured content blocks.

use serde::Serialize;

mod content;

/// An icon shown next to titles and feature tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum Icon {
    Globe,
    Code,
    Database,
    ShoppingCart,
    Zap,
    Settings,
}

impl Icon {
    /// The glyph used to draw this icon.
    pub(crate) fn glyph(&self) -> &'static str {
        match self {
            Self::Globe => "🌐",
            Self::Code => "</>",
            Self::Database => "🗄",
            Self::ShoppingCart => "🛒",
            Self::Zap => "⚡",
            Self::Settings => "⚙",
        }
    }
}

/// The visual variant of a badge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum BadgeVariant {
    #[default]
    Default,
    Secondary,
    Outline,
    Destructive,
}

/// The accent used for a card's title.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum Tone {
    #[default]
    Plain,
    Primary,
    Accent,
    Destructive,
}

/// A tile with an icon, a label, and an optional caption.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub(crate) struct Feature {
    pub(crate) icon: Icon,
    pub(crate) label: String,
    pub(crate) caption: Option<String>,
}

/// A row made of a badge followed by some text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub(crate) struct LabeledItem {
    pub(crate) badge: String,
    pub(crate) text: String,
}

/// A titled group of blocks.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub(crate) struct Card {
    pub(crate) title: Option<String>,
    pub(crate) icon: Option<Icon>,
    pub(crate) tone: Tone,
    pub(crate) body: Vec<Block>,
}

impl Card {
    pub(crate) fn new<S: Into<String>>(title: S) -> Self {
        Self { title: Some(title.into()), ..Default::default() }
    }

    pub(crate) fn icon(mut self, icon: Icon) -> Self {
        self.icon = Some(icon);
        self
    }

    pub(crate) fn tone(mut self, tone: Tone) -> Self {
        self.tone = tone;
        self
    }

    pub(crate) fn body(mut self, body: Vec<Block>) -> Self {
        self.body = body;
        self
    }
}

/// A unit of slide body content.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub(crate) enum Block {
    /// A prominent, centered line.
    Lead { text: String },

    /// Regular text.
    Text { text: String },

    /// Secondary text.
    Muted { text: String },

    /// A small heading inside a card.
    Heading { text: String },

    /// A bullet list.
    Bullets { items: Vec<String> },

    /// A group of badges that share a variant.
    Badges { variant: BadgeVariant, labels: Vec<String> },

    /// Rows made of a badge and some text.
    Labeled { variant: BadgeVariant, items: Vec<LabeledItem> },

    /// A numbered sequence of steps.
    Steps { steps: Vec<String> },

    /// A set of feature tiles.
    Features { features: Vec<Feature> },

    /// A query language sample.
    ///
    /// The sample is opaque: it is displayed and highlighted but never parsed.
    Code { source: String },

    /// A titled group of blocks.
    Card(Card),
}

impl Block {
    pub(crate) fn lead<S: Into<String>>(text: S) -> Self {
        Self::Lead { text: text.into() }
    }

    pub(crate) fn text<S: Into<String>>(text: S) -> Self {
        Self::Text { text: text.into() }
    }

    pub(crate) fn muted<S: Into<String>>(text: S) -> Self {
        Self::Muted { text: text.into() }
    }

    pub(crate) fn heading<S: Into<String>>(text: S) -> Self {
        Self::Heading { text: text.into() }
    }

    pub(crate) fn bullets<const N: usize>(items: [&str; N]) -> Self {
        Self::Bullets { items: items.into_iter().map(String::from).collect() }
    }

    pub(crate) fn badges<const N: usize>(variant: BadgeVariant, labels: [&str; N]) -> Self {
        Self::Badges { variant, labels: labels.into_iter().map(String::from).collect() }
    }

    pub(crate) fn labeled<const N: usize>(variant: BadgeVariant, items: [(&str, &str); N]) -> Self {
        let items = items.into_iter().map(|(badge, text)| LabeledItem { badge: badge.into(), text: text.into() });
        Self::Labeled { variant, items: items.collect() }
    }

    pub(crate) fn steps<const N: usize>(steps: [&str; N]) -> Self {
        Self::Steps { steps: steps.into_iter().map(String::from).collect() }
    }

    pub(crate) fn features<const N: usize>(features: [(Icon, &str, Option<&str>); N]) -> Self {
        let features = features.into_iter().map(|(icon, label, caption)| Feature {
            icon,
            label: label.into(),
            caption: caption.map(String::from),
        });
        Self::Features { features: features.collect() }
    }

    pub(crate) fn code<S: Into<String>>(source: S) -> Self {
        Self::Code { source: source.into() }
    }
}

impl From<Card> for Block {
    fn from(card: Card) -> Self {
        Self::Card(card)
    }
}

/// A slide.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub(crate) struct Slide {
    /// The slide's position within the deck.
    pub(crate) id: usize,
    pub(crate) title: String,
    pub(crate) icon: Option<Icon>,
    pub(crate) body: Vec<Block>,
}

/// The definition of a slide before it gets its position assigned.
pub(crate) struct SlideDefinition {
    title: String,
    icon: Option<Icon>,
    body: Vec<Block>,
}

impl SlideDefinition {
    pub(crate) fn new<S: Into<String>>(title: S, icon: Icon, body: Vec<Block>) -> Self {
        Self { title: title.into(), icon: Some(icon), body }
    }
}

/// An ordered collection of slides.
///
/// Slide ids always match their position in the deck.
#[derive(Clone, Debug, Serialize)]
pub struct Deck {
    slides: Vec<Slide>,
}

impl Deck {
    /// Construct a deck, assigning every slide its position as id.
    pub(crate) fn new(definitions: Vec<SlideDefinition>) -> Self {
        let slides = definitions
            .into_iter()
            .enumerate()
            .map(|(id, SlideDefinition { title, icon, body })| Slide { id, title, icon, body })
            .collect();
        Self { slides }
    }

    /// The built-in deck about the storefront GraphQL API.
    pub fn storefront() -> Self {
        Self::new(content::slides())
    }

    pub(crate) fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Serialize this deck as pretty printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn collect_code(blocks: &[Block], output: &mut Vec<String>) {
        for block in blocks {
            match block {
                Block::Code { source } => output.push(source.clone()),
                Block::Card(card) => collect_code(&card.body, output),
                _ => (),
            }
        }
    }

    #[test]
    fn ids_match_positions() {
        let deck = Deck::storefront();
        assert_eq!(deck.len(), 10);
        for (index, slide) in deck.slides().iter().enumerate() {
            assert_eq!(slide.id, index);
        }
    }

    #[test]
    fn every_slide_has_content() {
        let deck = Deck::storefront();
        for slide in deck.slides() {
            assert!(!slide.title.is_empty());
            assert!(slide.icon.is_some());
            assert!(!slide.body.is_empty(), "slide {} is empty", slide.id);
        }
    }

    #[test]
    fn code_samples() {
        let deck = Deck::storefront();
        let mut samples = Vec::new();
        for slide in deck.slides() {
            collect_code(&slide.body, &mut samples);
        }
        assert_eq!(samples.len(), 9);
        assert!(samples[0].starts_with("query GetProducts {"));
        assert!(samples.iter().any(|s| s.starts_with("mutation completeCheckout(")));
    }

    #[test]
    fn json_dump() {
        let deck = Deck::new(vec![SlideDefinition::new("Hi", Icon::Zap, vec![Block::text("hello")])]);
        let json = deck.to_json().expect("serialization failed");
        let value: serde_json::Value = serde_json::from_str(&json).expect("invalid json");
        assert_eq!(value["slides"][0]["id"], 0);
        assert_eq!(value["slides"][0]["icon"], "zap");
        assert_eq!(value["slides"][0]["body"][0]["type"], "text");
    }
}
