use crate::{
    navigation::{Control, Navigator},
    render::{
        operation::{Alignment, RenderOperation},
        text::{Line, Text},
    },
    theme::ControlsStyle,
};

/// The row, counted from the bottom, the controls are drawn at.
pub(crate) const CONTROLS_ROW: u16 = 1;

const BUTTONS: [(Control, &str); 3] =
    [(Control::Previous, " ◀ Previous "), (Control::Restart, " ↺ Restart "), (Control::Next, " Next ▶ ")];

/// Builds the previous/restart/next strip at the bottom of a slide.
///
/// Controls that can't be activated in the navigator's current state are drawn using the disabled
/// style.
pub(crate) struct ControlsBuilder<'a> {
    style: &'a ControlsStyle,
}

impl<'a> ControlsBuilder<'a> {
    pub(crate) fn new(style: &'a ControlsStyle) -> Self {
        Self { style }
    }

    pub(crate) fn build(&self, navigator: &Navigator) -> Vec<RenderOperation> {
        vec![
            RenderOperation::JumpToBottomRow { index: CONTROLS_ROW },
            RenderOperation::RenderText {
                line: self.build_line(navigator),
                alignment: Alignment::Center { margin: 1 },
            },
        ]
    }

    fn build_line(&self, navigator: &Navigator) -> Line {
        let mut line = Line::default();
        for (index, (control, label)) in BUTTONS.into_iter().enumerate() {
            if index > 0 {
                line.push("   ");
            }
            let style = match navigator.is_enabled(control) {
                true => self.style.enabled.style(),
                false => self.style.disabled.style(),
            };
            line.push(Text::new(label, style));
        }
        line
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        navigation::BoundaryPolicy,
        render::{engine::RenderEngine, properties::WindowSize},
        style::TextStyle,
        terminal::virt::VirtualTerminal,
        theme::ElementStyle,
    };
    use rstest::rstest;

    fn style() -> ControlsStyle {
        ControlsStyle {
            enabled: ElementStyle { bold: true, ..Default::default() },
            disabled: ElementStyle { dim: true, ..Default::default() },
        }
    }

    fn button_styles(navigator: &Navigator) -> Vec<TextStyle> {
        let style = style();
        let line = ControlsBuilder::new(&style).build_line(navigator);
        line.texts().iter().filter(|t| t.content.trim() != "").map(|t| t.style).collect()
    }

    #[rstest]
    #[case::first(0, [false, true, true])]
    #[case::middle(4, [true, true, true])]
    #[case::last(9, [true, true, false])]
    fn disabled_at_boundaries(#[case] index: usize, #[case] enabled: [bool; 3]) {
        let mut navigator = Navigator::new(10, BoundaryPolicy::Stop);
        navigator.jump_to(index);
        let styles = button_styles(&navigator);
        let expected: Vec<_> = enabled
            .into_iter()
            .map(|enabled| match enabled {
                true => style().enabled.style(),
                false => style().disabled.style(),
            })
            .collect();
        assert_eq!(styles, expected);
    }

    #[test]
    fn wrapping_never_disables() {
        let navigator = Navigator::new(10, BoundaryPolicy::Wrap);
        let styles = button_styles(&navigator);
        assert!(styles.iter().all(|style| style.is_bold()));
    }

    #[test]
    fn drawn_at_the_bottom() {
        let dimensions = WindowSize { rows: 5, columns: 40 };
        let style = style();
        let operations = ControlsBuilder::new(&style).build(&Navigator::new(3, BoundaryPolicy::Stop));
        let mut terminal = VirtualTerminal::new(dimensions);
        let engine = RenderEngine::new(&mut terminal, dimensions, Default::default());
        engine.render(operations.iter()).expect("render failed");
        let grid = terminal.into_contents();
        assert_eq!(grid.find_row("Restart"), Some(3));
        assert!(grid.style_at("◀ Previous").expect("no previous button").is_dim());
        assert!(grid.style_at("Next ▶").expect("no next button").is_bold());
    }
}
