//! Exports a deck into a standalone HTML document.

use crate::{
    code::highlighting::{escape_html, CodeHighlighter},
    deck::{Block, Card, Deck, Feature, Slide},
    theme::PresentationTheme,
};
use html::{badge_class, tone_class, Stylesheet};
use std::{fmt::Write, fs, io, path::Path};

mod html;

/// Allows exporting decks into HTML.
pub struct HtmlExporter<'a> {
    theme: &'a PresentationTheme,
    highlighter: CodeHighlighter,
}

impl<'a> HtmlExporter<'a> {
    pub fn new(theme: &'a PresentationTheme) -> Self {
        Self { theme, highlighter: CodeHighlighter::default() }
    }

    /// Export a deck into an HTML file.
    pub fn export(&self, deck: &Deck, output_path: &Path) -> Result<(), ExportError> {
        let html = self.render(deck);
        fs::write(output_path, html)?;
        tracing::info!("exported {} slides to {}", deck.len(), output_path.display());
        Ok(())
    }

    /// Render a deck as an HTML document.
    pub(crate) fn render(&self, deck: &Deck) -> String {
        let css = Stylesheet::new(self.theme).build();
        let mut body = String::new();
        for slide in deck.slides() {
            self.push_slide(&mut body, slide, deck.len());
        }
        format!(
            r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
{css}</style>
</head>
<body>
{body}</body>
</html>
"#,
            title = deck.slides().first().map(|slide| escape_html(&slide.title)).unwrap_or_default()
        )
    }

    fn push_slide(&self, html: &mut String, slide: &Slide, total: usize) {
        let _ = writeln!(html, r#"<section class="slide" id="slide-{}">"#, slide.id + 1);
        html.push_str("<header>\n<h2 class=\"title\">");
        if let Some(icon) = slide.icon {
            let _ = write!(html, "<span class=\"icon\">{}</span> ", icon.glyph());
        }
        let _ = writeln!(html, "{}</h2>", escape_html(&slide.title));
        let _ = write!(html, "<div><span class=\"position\">{} / {total}</span> ", slide.id + 1);
        for index in 0..total {
            match index == slide.id {
                true => html.push_str("<span class=\"dot current\">●</span>"),
                false => html.push_str("<span class=\"dot\">○</span>"),
            };
        }
        html.push_str("</div>\n</header>\n");
        for block in &slide.body {
            self.push_block(html, block);
        }
        html.push_str("</section>\n");
    }

    fn push_block(&self, html: &mut String, block: &Block) {
        match block {
            Block::Lead { text } => push_element(html, "p", "lead", text),
            Block::Text { text } => push_element(html, "p", "text", text),
            Block::Muted { text } => push_element(html, "p", "muted", text),
            Block::Heading { text } => push_element(html, "h4", "heading", text),
            Block::Bullets { items } => {
                html.push_str("<ul class=\"bullets\">\n");
                for item in items {
                    push_element(html, "li", "text", item);
                }
                html.push_str("</ul>\n");
            }
            Block::Badges { variant, labels } => {
                html.push_str("<div class=\"badges\">");
                let class = badge_class(*variant);
                for label in labels {
                    let _ = write!(html, "<span class=\"badge {class}\">{}</span>", escape_html(label));
                }
                html.push_str("</div>\n");
            }
            Block::Labeled { variant, items } => {
                html.push_str("<ul class=\"labeled\">\n");
                for item in items {
                    let _ = writeln!(
                        html,
                        "<li><span class=\"badge {}\">{}</span> <span class=\"text\">{}</span></li>",
                        badge_class(*variant),
                        escape_html(&item.badge),
                        escape_html(&item.text)
                    );
                }
                html.push_str("</ul>\n");
            }
            Block::Steps { steps } => {
                html.push_str("<ol class=\"steps\">\n");
                for step in steps {
                    push_element(html, "li", "text", step);
                }
                html.push_str("</ol>\n");
            }
            Block::Features { features } => self.push_features(html, features),
            Block::Code { source } => {
                let code = self.highlighter.highlight_html(source);
                let _ = writeln!(html, "<pre class=\"code\"><code>{code}</code></pre>");
            }
            Block::Card(card) => self.push_card(html, card),
        }
    }

    fn push_features(&self, html: &mut String, features: &[Feature]) {
        html.push_str("<div class=\"features\">\n");
        for feature in features {
            let _ = write!(
                html,
                "<div class=\"feature\"><span class=\"feature-icon\">{}</span><span class=\"feature-label\">{}</span>",
                feature.icon.glyph(),
                escape_html(&feature.label)
            );
            if let Some(caption) = &feature.caption {
                let _ = write!(html, "<span class=\"muted\">{}</span>", escape_html(caption));
            }
            html.push_str("</div>\n");
        }
        html.push_str("</div>\n");
    }

    fn push_card(&self, html: &mut String, card: &Card) {
        let _ = writeln!(html, "<div class=\"card {}\">", tone_class(card.tone));
        if let Some(title) = &card.title {
            html.push_str("<h3 class=\"card-title\">");
            if let Some(icon) = card.icon {
                let _ = write!(html, "{} ", icon.glyph());
            }
            let _ = writeln!(html, "{}</h3>\n<hr class=\"rule\">", escape_html(title));
        }
        for block in &card.body {
            self.push_block(html, block);
        }
        html.push_str("</div>\n");
    }
}

fn push_element(html: &mut String, tag: &str, class: &str, text: &str) {
    let _ = writeln!(html, "<{tag} class=\"{class}\">{}</{tag}>", escape_html(text));
}

/// An error during an export.
#[derive(thiserror::Error, Debug)]
pub enum ExportError {
    #[error("io: {0}")]
    Io(#[from] io::Error),
}
