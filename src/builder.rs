use crate::{
    code::highlighting::CodeHighlighter,
    deck::{BadgeVariant, Block, Card, Deck, Feature, LabeledItem},
    navigation::{BoundaryPolicy, Navigator},
    presentation::{Presentation, Slide},
    render::{
        operation::{Alignment, BlockLine, RenderOperation},
        text::{Line, Text},
    },
    theme::PresentationTheme,
    ui::{
        footer::{ControlsBuilder, CONTROLS_ROW},
        header::{SlideHeader, HEADER_ROW},
    },
};
use std::mem;

/// The left margin for a slide's body.
const BODY_MARGIN: u16 = 4;

/// How much deeper a card's body is indented compared to its title.
const CARD_INDENT: u16 = 2;

#[derive(Clone, Debug, Default)]
pub struct PresentationBuilderOptions {
    pub policy: BoundaryPolicy,
}

/// Builds a presentation out of a deck.
pub struct PresentationBuilder<'a> {
    slide_operations: Vec<RenderOperation>,
    slides: Vec<Slide>,
    highlighter: CodeHighlighter,
    theme: &'a PresentationTheme,
    options: PresentationBuilderOptions,
}

impl<'a> PresentationBuilder<'a> {
    pub fn new(theme: &'a PresentationTheme, options: PresentationBuilderOptions) -> Self {
        Self {
            slide_operations: Vec::new(),
            slides: Vec::new(),
            highlighter: CodeHighlighter::default(),
            theme,
            options,
        }
    }

    pub fn build(mut self, deck: &Deck) -> Presentation {
        for slide in deck.slides() {
            self.push_slide_prelude(slide, deck.len());
            for (index, block) in slide.body.iter().enumerate() {
                if index > 0 {
                    self.push_line_break();
                }
                self.push_block(block, BODY_MARGIN);
            }
            self.push_controls(slide.id, deck.len());
            let operations = mem::take(&mut self.slide_operations);
            self.slides.push(Slide::new(&slide.title, operations));
        }
        tracing::debug!("built presentation with {} slides", self.slides.len());
        Presentation::new(self.slides, self.options.policy)
    }

    fn push_slide_prelude(&mut self, slide: &crate::deck::Slide, total: usize) {
        let header = SlideHeader::new(slide.icon, &slide.title, slide.id, total, &self.theme.header);
        self.slide_operations.extend([
            RenderOperation::SetColors(self.theme.colors()),
            RenderOperation::ClearScreen,
            header.into(),
            RenderOperation::JumpToRow { index: HEADER_ROW + 1 },
            RenderOperation::RenderSeparator { style: self.theme.header.separator.style() },
            RenderOperation::RenderLineBreak,
            // The body stops right above the controls.
            RenderOperation::BeginViewport {
                bottom_margin: CONTROLS_ROW + 1,
                indicator: self.theme.controls.enabled.style(),
            },
        ]);
    }

    fn push_controls(&mut self, index: usize, total: usize) {
        self.slide_operations.push(RenderOperation::EndViewport);
        // Controls only depend on the slide they're drawn on, so they're computed upfront.
        let mut navigator = Navigator::new(total, self.options.policy);
        navigator.jump_to(index);
        let operations = ControlsBuilder::new(&self.theme.controls).build(&navigator);
        self.slide_operations.extend(operations);
    }

    fn push_block(&mut self, block: &Block, indent: u16) {
        let theme = self.theme;
        let body = &theme.body;
        match block {
            Block::Lead { text } => {
                self.push_text(Text::new(text, body.lead.style()), Alignment::Center { margin: indent })
            }
            Block::Text { text } => {
                self.push_text(Text::new(text, body.text.style()), Alignment::Left { margin: indent })
            }
            Block::Muted { text } => {
                self.push_text(Text::new(text, body.muted.style()), Alignment::Left { margin: indent })
            }
            Block::Heading { text } => {
                self.push_text(Text::new(text, body.heading.style()), Alignment::Left { margin: indent })
            }
            Block::Bullets { items } => self.push_bullets(items, indent),
            Block::Badges { variant, labels } => self.push_badges(*variant, labels, indent),
            Block::Labeled { variant, items } => self.push_labeled(*variant, items, indent),
            Block::Steps { steps } => self.push_steps(steps, indent),
            Block::Features { features } => self.push_features(features, indent),
            Block::Code { source } => self.push_code(source, indent),
            Block::Card(card) => self.push_card(card, indent),
        };
    }

    fn push_text<L: Into<Line>>(&mut self, line: L, alignment: Alignment) {
        self.slide_operations.push(RenderOperation::RenderText { line: line.into(), alignment });
    }

    fn push_line_break(&mut self) {
        self.slide_operations.push(RenderOperation::RenderLineBreak);
    }

    fn push_bullets(&mut self, items: &[String], indent: u16) {
        for item in items {
            let mut line = Line::from(Text::new("• ", self.theme.body.marker.style()));
            line.push(Text::new(item, self.theme.body.text.style()));
            self.push_text(line, Alignment::Left { margin: indent });
        }
    }

    fn badge(&self, variant: BadgeVariant, label: &str) -> Text {
        let content = match variant {
            BadgeVariant::Outline => format!("[{label}]"),
            _ => format!(" {label} "),
        };
        Text::new(content, self.theme.badges.variant(variant).style())
    }

    fn push_badges(&mut self, variant: BadgeVariant, labels: &[String], indent: u16) {
        let mut line = Line::default();
        for (index, label) in labels.iter().enumerate() {
            if index > 0 {
                line.push(" ");
            }
            line.push(self.badge(variant, label));
        }
        self.push_text(line, Alignment::Left { margin: indent });
    }

    fn push_labeled(&mut self, variant: BadgeVariant, items: &[LabeledItem], indent: u16) {
        for item in items {
            let mut line = Line::from(self.badge(variant, &item.badge));
            line.push(" ");
            line.push(Text::new(&item.text, self.theme.body.text.style()));
            self.push_text(line, Alignment::Left { margin: indent });
        }
    }

    fn push_steps(&mut self, steps: &[String], indent: u16) {
        let marker = self.theme.body.marker.style();
        let mut line = Line::default();
        for (index, step) in steps.iter().enumerate() {
            if index > 0 {
                line.push(Text::new("  →  ", marker));
            }
            line.push(Text::new(format!("{}.", index + 1), marker.bold()));
            line.push(Text::new(format!(" {step}"), self.theme.body.text.style()));
        }
        self.push_text(line, Alignment::Left { margin: indent });
    }

    fn feature(&self, feature: &Feature) -> Line {
        let icon = Text::new(format!("{} ", feature.icon.glyph()), self.theme.body.feature_icon.style());
        let mut line = Line::from(icon);
        line.push(Text::new(&feature.label, self.theme.body.feature_label.style()));
        line
    }

    fn push_features(&mut self, features: &[Feature], indent: u16) {
        // Tiles without captions fit in a single row.
        if features.iter().all(|feature| feature.caption.is_none()) {
            let mut line = Line::default();
            for (index, feature) in features.iter().enumerate() {
                if index > 0 {
                    line.push("    ");
                }
                for text in self.feature(feature).texts() {
                    line.push(text.clone());
                }
            }
            self.push_text(line, Alignment::Center { margin: indent });
            return;
        }
        for feature in features {
            let mut line = self.feature(feature);
            if let Some(caption) = &feature.caption {
                line.push(Text::new(format!("  {caption}"), self.theme.body.muted.style()));
            }
            self.push_text(line, Alignment::Left { margin: indent });
        }
    }

    fn push_code(&mut self, source: &str, indent: u16) {
        let theme = self.theme;
        let style = &theme.code;
        let margin = indent + style.margin;
        let mut lines = vec![Line::default()];
        for tokens in self.highlighter.highlight_lines(source) {
            let mut line = Line::default();
            for token in tokens {
                line.push(Text::new(token.text, style.token(token.kind).style()));
            }
            lines.push(line);
        }
        lines.push(Line::default());
        for line in lines {
            // A one column gap keeps text off the block's edge.
            let mut padded = Line::from(Text::new(" ", style.plain.style()));
            for text in line.texts() {
                padded.push(text.clone());
            }
            let block = BlockLine { line: padded, margin, width: None, background: style.background };
            self.slide_operations.push(RenderOperation::RenderBlockLine(block));
        }
    }

    fn push_card(&mut self, card: &Card, indent: u16) {
        if let Some(title) = &card.title {
            let style = self.theme.cards.title(card.tone).style();
            let mut line = Line::default();
            if let Some(icon) = card.icon {
                line.push(Text::new(format!("{} ", icon.glyph()), style));
            }
            line.push(Text::new(title, style));
            let rule = "─".repeat(line.width());
            self.push_text(line, Alignment::Left { margin: indent });
            self.push_text(Text::new(rule, self.theme.cards.rule.style()), Alignment::Left { margin: indent });
        }
        let indent = indent + CARD_INDENT;
        for (index, block) in card.body.iter().enumerate() {
            if index > 0 && matches!(block, Block::Heading { .. }) {
                self.push_line_break();
            }
            self.push_block(block, indent);
        }
    }
}
