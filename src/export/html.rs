use crate::{
    deck::{BadgeVariant, Tone},
    style::TextStyle,
    theme::{ElementStyle, PresentationTheme},
};
use std::{borrow::Cow, fmt::Write};

/// Turn a text style into CSS declarations.
pub(crate) fn css_declarations(style: &TextStyle) -> String {
    let mut css_styles: Vec<Cow<'static, str>> = Vec::new();
    if style.is_bold() {
        css_styles.push("font-weight: bold".into());
    }
    if style.is_italics() {
        css_styles.push("font-style: italic".into());
    }
    if style.is_underlined() {
        css_styles.push("text-decoration: underline".into());
    }
    if style.is_dim() {
        css_styles.push("opacity: 0.6".into());
    }
    if let Some(color) = &style.colors.foreground {
        css_styles.push(format!("color: {}", color.to_html()).into());
    }
    if let Some(color) = &style.colors.background {
        css_styles.push(format!("background-color: {}", color.to_html()).into());
    }
    css_styles.join("; ")
}

pub(crate) fn tone_class(tone: Tone) -> &'static str {
    match tone {
        Tone::Plain => "tone-plain",
        Tone::Primary => "tone-primary",
        Tone::Accent => "tone-accent",
        Tone::Destructive => "tone-destructive",
    }
}

pub(crate) fn badge_class(variant: BadgeVariant) -> &'static str {
    match variant {
        BadgeVariant::Default => "badge-default",
        BadgeVariant::Secondary => "badge-secondary",
        BadgeVariant::Outline => "badge-outline",
        BadgeVariant::Destructive => "badge-destructive",
    }
}

/// Builds the stylesheet for an exported deck out of a theme.
pub(crate) struct Stylesheet<'a> {
    theme: &'a PresentationTheme,
    css: String,
}

impl<'a> Stylesheet<'a> {
    pub(crate) fn new(theme: &'a PresentationTheme) -> Self {
        Self { theme, css: String::new() }
    }

    pub(crate) fn build(mut self) -> String {
        let theme = self.theme;
        self.push_layout();
        self.push_rule("body", &theme.default_style);
        self.push_rule(".title", &theme.header.title);
        self.push_rule(".position", &theme.header.position);
        self.push_rule(".dot", &theme.header.dot);
        self.push_rule(".dot.current", &theme.header.current_dot);
        self.push_rule(".lead", &theme.body.lead);
        self.push_rule(".text", &theme.body.text);
        self.push_rule(".muted", &theme.body.muted);
        self.push_rule(".heading", &theme.body.heading);
        self.push_rule(".marker", &theme.body.marker);
        self.push_rule(".feature-icon", &theme.body.feature_icon);
        self.push_rule(".feature-label", &theme.body.feature_label);
        for tone in [Tone::Plain, Tone::Primary, Tone::Accent, Tone::Destructive] {
            self.push_rule(&format!(".{} .card-title", tone_class(tone)), theme.cards.title(tone));
        }
        self.push_rule(".rule", &theme.cards.rule);
        for variant in [BadgeVariant::Default, BadgeVariant::Secondary, BadgeVariant::Outline, BadgeVariant::Destructive]
        {
            self.push_rule(&format!(".{}", badge_class(variant)), theme.badges.variant(variant));
        }
        self.push_rule("pre.code", &theme.code.plain);
        if let Some(color) = &theme.code.background {
            let _ = writeln!(self.css, "pre.code {{ background-color: {}; }}", color.to_html());
        }
        self.push_rule(".graphql-keyword", &theme.code.keyword);
        self.push_rule(".graphql-field", &theme.code.field);
        self.push_rule(".graphql-type", &theme.code.type_name);
        self.push_rule(".graphql-string", &theme.code.string);
        self.css
    }

    fn push_layout(&mut self) {
        self.css.push_str(
            r"body { margin: 0; font-family: sans-serif; }
section.slide { min-height: 100vh; box-sizing: border-box; padding: 2em 4em; }
section.slide > header { display: flex; justify-content: space-between; align-items: baseline; }
.card { margin: 1em 0; }
.card-title { margin-bottom: 0.25em; }
hr.rule { border: 0; border-top: 1px solid; }
.badge { display: inline-block; padding: 0 0.5em; margin-right: 0.5em; border-radius: 0.5em; }
.badge-outline { border: 1px solid; }
.features { display: flex; gap: 2em; flex-wrap: wrap; }
.feature { display: flex; flex-direction: column; }
pre.code { padding: 1em; overflow-x: auto; }
",
        );
    }

    fn push_rule(&mut self, selector: &str, style: &ElementStyle) {
        let declarations = css_declarations(&style.style());
        if !declarations.is_empty() {
            let _ = writeln!(self.css, "{selector} {{ {declarations}; }}");
        }
    }
}
