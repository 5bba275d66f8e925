use crate::{
    commands::keyboard::KeyBinding,
    config::KeyBindingsConfig,
    render::{
        operation::{AsRenderOperations, BlockLine, RenderOperation},
        properties::WindowSize,
        text::{Line, Text},
    },
    style::TextStyle,
    theme::{ModalStyle, PresentationTheme},
};
use itertools::Itertools;
use std::rc::Rc;
use unicode_width::UnicodeWidthStr;

const MINIMUM_CONTENT_WIDTH: usize = 12;

// "│  <content>  │"
const HORIZONTAL_PADDING: usize = 6;

// The top border, the heading, the separator, and the bottom border.
const CHROME_ROWS: usize = 4;

/// Builds the modal that lists every slide in the deck.
#[derive(Default)]
pub(crate) struct IndexBuilder {
    titles: Vec<String>,
}

impl IndexBuilder {
    pub(crate) fn add_title<S: Into<String>>(&mut self, title: S) {
        self.titles.push(title.into());
    }

    pub(crate) fn build(self, theme: &PresentationTheme, current_slide: usize) -> Vec<RenderOperation> {
        let digits = self.titles.len().to_string().len();
        let rows = self
            .titles
            .into_iter()
            .enumerate()
            .map(|(index, title)| Line::from(format!("{:>digits$}: {title}", index + 1)))
            .collect();
        let drawer = ModalDrawer { heading: "Slides".into(), rows, selected: Some(current_slide), style: theme.modals };
        vec![RenderOperation::RenderDynamic(Rc::new(drawer))]
    }
}

/// Builds the modal that shows the key bindings for every command.
pub(crate) struct KeyBindingsModalBuilder;

impl KeyBindingsModalBuilder {
    pub(crate) fn build(theme: &PresentationTheme, config: &KeyBindingsConfig) -> Vec<RenderOperation> {
        let rows = vec![
            Self::build_line("Next", &config.next),
            Self::build_line("Previous", &config.previous),
            Self::build_line("First slide", &config.restart),
            Self::build_line("Last slide", &config.last_slide),
            Self::build_line("Go to slide", &config.go_to_slide),
            Self::build_line("Scroll down", &config.scroll_down),
            Self::build_line("Scroll up", &config.scroll_up),
            Self::build_line("Toggle slide index", &config.toggle_slide_index),
            Self::build_line("Toggle key bindings", &config.toggle_bindings),
            Self::build_line("Close modal", &config.close_modal),
            Self::build_line("Exit", &config.exit),
        ];
        let drawer = ModalDrawer { heading: "Key bindings".into(), rows, selected: None, style: theme.modals };
        vec![RenderOperation::RenderDynamic(Rc::new(drawer))]
    }

    fn build_line(label: &str, bindings: &[KeyBinding]) -> Line {
        let mut line = Line::from(Text::new(label, TextStyle::default().bold()));
        line.push(": ");
        line.push(Text::new(bindings.iter().join(", "), TextStyle::default().italics()));
        line
    }
}

/// Draws a bordered box in the middle of the screen.
#[derive(Debug)]
struct ModalDrawer {
    heading: String,
    rows: Vec<Line>,
    selected: Option<usize>,
    style: ModalStyle,
}

impl ModalDrawer {
    fn visible_rows(&self, dimensions: &WindowSize) -> (usize, usize) {
        let max_rows = ((dimensions.rows as usize * 8) / 10).saturating_sub(CHROME_ROWS).max(1);
        if self.rows.len() <= max_rows {
            return (0, self.rows.len());
        }
        // Keep the selected row in the middle of the visible ones.
        let selected = self.selected.unwrap_or(0);
        let start = selected.saturating_sub(max_rows / 2).min(self.rows.len() - max_rows);
        (start, max_rows)
    }

    fn border(&self, left: char, right: char, content_width: usize) -> Line {
        let mut border = String::from(left);
        border.push_str(&"─".repeat(content_width + HORIZONTAL_PADDING - 2));
        border.push(right);
        Line::from(Text::new(border, self.style.base.style()))
    }

    fn row(&self, content: &Line, content_width: usize, style: TextStyle) -> Line {
        let border_style = self.style.base.style();
        let mut styled = content.clone();
        styled.apply_style(&style);
        let mut line = Line::from(Text::new("│ ", border_style));
        line.push(Text::new(" ", style));
        for text in styled.texts() {
            line.push(text.clone());
        }
        let missing = content_width.saturating_sub(content.width()) + 1;
        line.push(Text::new(" ".repeat(missing), style));
        line.push(Text::new(" │", border_style));
        line
    }
}

impl AsRenderOperations for ModalDrawer {
    fn as_render_operations(&self, dimensions: &WindowSize) -> Vec<RenderOperation> {
        let content_width = self
            .rows
            .iter()
            .map(Line::width)
            .chain([self.heading.width(), MINIMUM_CONTENT_WIDTH])
            .max()
            .unwrap_or(MINIMUM_CONTENT_WIDTH);
        let box_width = (content_width + HORIZONTAL_PADDING) as u16;
        let margin = dimensions.columns.saturating_sub(box_width) / 2;
        let (skip, take) = self.visible_rows(dimensions);
        let target_row = dimensions.rows.saturating_sub((take + CHROME_ROWS) as u16) / 2;

        let base_style = self.style.base.style();
        let missing = content_width.saturating_sub(self.heading.width());
        let heading = format!("{}{}", " ".repeat(missing / 2), self.heading);
        let heading = Line::from(Text::new(heading, base_style.bold()));

        let mut lines = vec![self.border('┌', '┐', content_width), self.row(&heading, content_width, base_style)];
        lines.push(self.border('├', '┤', content_width));
        for (index, row) in self.rows.iter().enumerate().skip(skip).take(take) {
            let style = match self.selected == Some(index) {
                true => self.style.selection.style(),
                false => base_style,
            };
            lines.push(self.row(row, content_width, style));
        }
        lines.push(self.border('└', '┘', content_width));

        let mut operations = vec![RenderOperation::JumpToRow { index: target_row }];
        for line in lines {
            operations.push(RenderOperation::RenderBlockLine(BlockLine {
                line,
                margin,
                width: Some(box_width),
                background: self.style.base.colors.background,
            }));
        }
        operations
    }
}
