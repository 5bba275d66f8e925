use crate::{
    deck::Icon,
    render::{
        operation::{Alignment, AsRenderOperations, RenderOperation},
        properties::WindowSize,
        text::{Line, Text},
    },
    theme::HeaderStyle,
};
use std::rc::Rc;
use unicode_width::UnicodeWidthStr;

/// The row the header is drawn at.
pub(crate) const HEADER_ROW: u16 = 1;

pub(crate) const HEADER_MARGIN: u16 = 2;

const CURRENT_DOT: &str = "●";
const DOT: &str = "○";
const ELLIPSIS: &str = "…";

/// The row at the top of a slide: its title on the left and its position within the deck on the right.
#[derive(Debug)]
pub(crate) struct SlideHeader {
    title: Line,
    position: Text,
    dots: Line,
}

impl SlideHeader {
    pub(crate) fn new(icon: Option<Icon>, title: &str, index: usize, total: usize, style: &HeaderStyle) -> Self {
        let mut title_line = Line::default();
        if let Some(icon) = icon {
            title_line.push(Text::new(format!("{} ", icon.glyph()), style.title.style()));
        }
        title_line.push(Text::new(title, style.title.style()));

        let position = Text::new(format!("{} / {total}", index + 1), style.position.style());
        let mut dots = Line::default();
        for dot in 0..total {
            if dot > 0 {
                dots.push(" ");
            }
            match dot == index {
                true => dots.push(Text::new(CURRENT_DOT, style.current_dot.style())),
                false => dots.push(Text::new(DOT, style.dot.style())),
            };
        }
        Self { title: title_line, position, dots }
    }

    fn right_side(&self, max_width: usize) -> Line {
        let mut line = Line::from(self.position.clone());
        // Dots are dropped before they squeeze the title out.
        if self.position.width() + self.dots.width() + 2 <= max_width / 2 {
            line.push("  ");
            for text in self.dots.texts() {
                line.push(text.clone());
            }
        }
        line
    }
}

impl From<SlideHeader> for RenderOperation {
    fn from(header: SlideHeader) -> Self {
        Self::RenderDynamic(Rc::new(header))
    }
}

impl AsRenderOperations for SlideHeader {
    fn as_render_operations(&self, dimensions: &WindowSize) -> Vec<RenderOperation> {
        let available = dimensions.columns.saturating_sub(HEADER_MARGIN * 2) as usize;
        let right = self.right_side(available);
        let title_width = available.saturating_sub(right.width() + 2);
        vec![
            RenderOperation::JumpToRow { index: HEADER_ROW },
            RenderOperation::RenderText {
                line: truncate(&self.title, title_width),
                alignment: Alignment::Left { margin: HEADER_MARGIN },
            },
            RenderOperation::JumpToRow { index: HEADER_ROW },
            RenderOperation::RenderText { line: right, alignment: Alignment::Right { margin: HEADER_MARGIN } },
        ]
    }
}

/// Cut a line so it fits in `max_width` columns, marking the cut with an ellipsis.
fn truncate(line: &Line, max_width: usize) -> Line {
    if line.width() <= max_width {
        return line.clone();
    }
    let mut output = Line::default();
    let mut remaining = max_width.saturating_sub(ELLIPSIS.width());
    let mut last_style = Default::default();
    for text in line.texts() {
        let mut content = String::new();
        for c in text.content.chars() {
            let width = c.to_string().width();
            if width > remaining {
                break;
            }
            remaining -= width;
            content.push(c);
        }
        last_style = text.style;
        output.push(Text::new(content, text.style));
        if remaining == 0 {
            break;
        }
    }
    output.push(Text::new(ELLIPSIS, last_style));
    output
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{render::engine::RenderEngine, terminal::virt::VirtualTerminal, theme::ElementStyle};
    use rstest::rstest;

    fn styles() -> HeaderStyle {
        HeaderStyle {
            current_dot: ElementStyle { bold: true, ..Default::default() },
            dot: ElementStyle { dim: true, ..Default::default() },
            ..Default::default()
        }
    }

    fn render(header: SlideHeader, dimensions: WindowSize) -> crate::terminal::virt::TerminalGrid {
        let mut terminal = VirtualTerminal::new(dimensions);
        let operation = RenderOperation::from(header);
        RenderEngine::new(&mut terminal, dimensions, Default::default())
            .render([operation].iter())
            .expect("render failed");
        terminal.into_contents()
    }

    #[rstest]
    #[case(0, "1 / 3  ● ○ ○")]
    #[case(1, "2 / 3  ○ ● ○")]
    #[case(2, "3 / 3  ○ ○ ●")]
    fn position_and_dots(#[case] index: usize, #[case] expected: &str) {
        let header = SlideHeader::new(Some(Icon::Zap), "Checkout", index, 3, &styles());
        let grid = render(header, WindowSize { rows: 3, columns: 60 });
        let row = grid.row_text(HEADER_ROW as usize);
        assert!(row.starts_with("  ⚡ Checkout"), "unexpected row: {row:?}");
        assert!(row.ends_with(expected), "unexpected row: {row:?}");
    }

    #[test]
    fn one_distinguished_dot() {
        let header = SlideHeader::new(None, "Title", 4, 10, &styles());
        let current: Vec<_> = header.dots.texts().iter().filter(|t| t.content == CURRENT_DOT).collect();
        assert_eq!(current.len(), 1);
        assert!(current[0].style.is_bold());
        let others = header.dots.texts().iter().filter(|t| t.content == DOT).count();
        assert_eq!(others, 9);
    }

    #[test]
    fn narrow_screen_drops_dots_and_truncates() {
        let header = SlideHeader::new(None, "A very long slide title", 0, 10, &styles());
        let grid = render(header, WindowSize { rows: 3, columns: 24 });
        let row = grid.row_text(HEADER_ROW as usize);
        assert_eq!(row, "  A very long…  1 / 10");
    }

    #[test]
    fn truncation() {
        let line = Line::from("abcdef");
        let output = truncate(&line, 4);
        let text: String = output.texts().iter().map(|t| t.content.as_str()).collect();
        assert_eq!(text, "abc…");
    }
}
