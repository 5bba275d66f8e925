use crate::{
    commands::listener::{Command, CommandListener},
    config::KeyBindingsConfig,
    navigation::Control,
    presentation::Presentation,
    render::{operation::RenderOperation, RenderError, RenderResult, TerminalDrawer},
    terminal::printer::TerminalWrite,
    theme::PresentationTheme,
    ui::modals::{IndexBuilder, KeyBindingsModalBuilder},
};
use std::{
    io::{self, Stdout},
    mem,
};

pub struct PresenterOptions {
    pub bindings: KeyBindingsConfig,
    pub max_columns: u16,
}

/// A slideshow presenter.
///
/// This type puts everything else together.
pub struct Presenter<'a> {
    theme: &'a PresentationTheme,
    commands: CommandListener,
    state: PresenterState,
    options: PresenterOptions,
}

impl<'a> Presenter<'a> {
    /// Construct a new presenter.
    pub fn new(
        theme: &'a PresentationTheme,
        commands: CommandListener,
        presentation: Presentation,
        options: PresenterOptions,
    ) -> Self {
        Self { theme, commands, state: PresenterState::Presenting(presentation), options }
    }

    /// Run a presentation until the user exits.
    pub fn present(mut self) -> Result<(), PresentationError> {
        let mut drawer = TerminalDrawer::new(io::stdout(), self.options.max_columns)?;
        loop {
            self.render(&mut drawer)?;
            loop {
                let Some(command) = self.commands.try_next_command()? else {
                    continue;
                };
                tracing::trace!("processing command {command:?}");
                match self.apply_command(command) {
                    CommandSideEffect::Exit => return Ok(()),
                    CommandSideEffect::Redraw => break,
                    CommandSideEffect::None => (),
                };
            }
        }
    }

    fn render(&mut self, drawer: &mut TerminalDrawer<Stdout>) -> RenderResult {
        match self.render_state(drawer) {
            Ok(max_scroll) => {
                self.state.presentation_mut().limit_scroll(max_scroll);
                Ok(())
            }
            // If the screen is too small, simply ignore this. Eventually the user will resize the
            // screen.
            Err(RenderError::TerminalTooSmall) => {
                tracing::debug!("terminal too small to render");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    fn render_state<W: TerminalWrite>(&self, drawer: &mut TerminalDrawer<W>) -> Result<u16, RenderError> {
        let presentation = self.state.presentation();
        let Some(slide) = presentation.current_slide() else {
            drawer.render_error("presentation has no slides")?;
            return Ok(0);
        };
        let modal = match &self.state {
            PresenterState::Presenting(_) | PresenterState::Empty => Vec::new(),
            PresenterState::SlideIndex(_) => self.build_index(presentation),
            PresenterState::KeyBindings(_) => KeyBindingsModalBuilder::build(self.theme, &self.options.bindings),
        };
        drawer.render_operations(slide.iter_operations().chain(modal.iter()), presentation.scroll())
    }

    fn build_index(&self, presentation: &Presentation) -> Vec<RenderOperation> {
        let mut builder = IndexBuilder::default();
        for slide in presentation.iter_slides() {
            builder.add_title(slide.title());
        }
        builder.build(self.theme, presentation.current_slide_index())
    }

    fn apply_command(&mut self, command: Command) -> CommandSideEffect {
        let presentation = match &mut self.state {
            PresenterState::Presenting(presentation)
            | PresenterState::SlideIndex(presentation)
            | PresenterState::KeyBindings(presentation) => presentation,
            PresenterState::Empty => return CommandSideEffect::None,
        };
        let needs_redraw = match command {
            Command::Exit => return CommandSideEffect::Exit,
            Command::Redraw => true,
            Command::Next => presentation.activate(Control::Next),
            Command::Previous => presentation.activate(Control::Previous),
            Command::Restart => presentation.activate(Control::Restart),
            Command::LastSlide => presentation.jump_last_slide(),
            Command::GoToSlide(number) => match number.checked_sub(1) {
                Some(index) => presentation.activate(Control::Select(index as usize)),
                None => false,
            },
            Command::ScrollDown => presentation.scroll_down(),
            Command::ScrollUp => presentation.scroll_up(),
            Command::ToggleSlideIndex => {
                self.toggle_slide_index();
                true
            }
            Command::ToggleKeyBindings => {
                self.toggle_key_bindings();
                true
            }
            Command::CloseModal => self.close_modal(),
        };
        if needs_redraw {
            CommandSideEffect::Redraw
        } else {
            CommandSideEffect::None
        }
    }

    fn toggle_slide_index(&mut self) {
        let state = mem::take(&mut self.state);
        self.state = match state {
            PresenterState::Presenting(presentation) | PresenterState::KeyBindings(presentation) => {
                PresenterState::SlideIndex(presentation)
            }
            PresenterState::SlideIndex(presentation) => PresenterState::Presenting(presentation),
            other => other,
        };
    }

    fn toggle_key_bindings(&mut self) {
        let state = mem::take(&mut self.state);
        self.state = match state {
            PresenterState::Presenting(presentation) | PresenterState::SlideIndex(presentation) => {
                PresenterState::KeyBindings(presentation)
            }
            PresenterState::KeyBindings(presentation) => PresenterState::Presenting(presentation),
            other => other,
        };
    }

    fn close_modal(&mut self) -> bool {
        let state = mem::take(&mut self.state);
        let (state, closed) = match state {
            PresenterState::SlideIndex(presentation) | PresenterState::KeyBindings(presentation) => {
                (PresenterState::Presenting(presentation), true)
            }
            other => (other, false),
        };
        self.state = state;
        closed
    }
}

#[derive(Debug, PartialEq)]
enum CommandSideEffect {
    Exit,
    Redraw,
    None,
}

#[derive(Default)]
enum PresenterState {
    #[default]
    Empty,
    Presenting(Presentation),
    SlideIndex(Presentation),
    KeyBindings(Presentation),
}

impl PresenterState {
    fn presentation(&self) -> &Presentation {
        match self {
            Self::Presenting(presentation) | Self::SlideIndex(presentation) | Self::KeyBindings(presentation) => {
                presentation
            }
            Self::Empty => panic!("state is empty"),
        }
    }

    fn presentation_mut(&mut self) -> &mut Presentation {
        match self {
            Self::Presenting(presentation) | Self::SlideIndex(presentation) | Self::KeyBindings(presentation) => {
                presentation
            }
            Self::Empty => panic!("state is empty"),
        }
    }
}

/// An error during the presentation.
#[derive(thiserror::Error, Debug)]
pub enum PresentationError {
    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("io: {0}")]
    Io(#[from] io::Error),
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{navigation::BoundaryPolicy, presentation::Slide};
    use rstest::rstest;

    fn make_presenter(theme: &PresentationTheme, policy: BoundaryPolicy, start: usize) -> Presenter<'_> {
        let slides = (0..5).map(|index| Slide::new(format!("slide {index}"), Vec::new())).collect();
        let presentation = Presentation::new(slides, policy).starting_at(start);
        let bindings = KeyBindingsConfig::default();
        let commands = CommandListener::new(bindings.clone()).expect("invalid bindings");
        Presenter::new(theme, commands, presentation, PresenterOptions { bindings, max_columns: u16::MAX })
    }

    fn current(presenter: &Presenter) -> usize {
        presenter.state.presentation().current_slide_index()
    }

    #[rstest]
    #[case::next_at_end(BoundaryPolicy::Stop, 4, Command::Next, 4, CommandSideEffect::None)]
    #[case::previous_at_start(BoundaryPolicy::Stop, 0, Command::Previous, 0, CommandSideEffect::None)]
    #[case::restart_at_start(BoundaryPolicy::Stop, 0, Command::Restart, 0, CommandSideEffect::None)]
    #[case::next(BoundaryPolicy::Stop, 1, Command::Next, 2, CommandSideEffect::Redraw)]
    #[case::previous(BoundaryPolicy::Stop, 1, Command::Previous, 0, CommandSideEffect::Redraw)]
    #[case::restart(BoundaryPolicy::Stop, 3, Command::Restart, 0, CommandSideEffect::Redraw)]
    #[case::wrap_next(BoundaryPolicy::Wrap, 4, Command::Next, 0, CommandSideEffect::Redraw)]
    #[case::wrap_previous(BoundaryPolicy::Wrap, 0, Command::Previous, 4, CommandSideEffect::Redraw)]
    #[case::last_slide(BoundaryPolicy::Stop, 0, Command::LastSlide, 4, CommandSideEffect::Redraw)]
    #[case::go_to_slide(BoundaryPolicy::Stop, 0, Command::GoToSlide(3), 2, CommandSideEffect::Redraw)]
    #[case::go_to_current_slide(BoundaryPolicy::Stop, 2, Command::GoToSlide(3), 2, CommandSideEffect::None)]
    #[case::go_to_slide_zero(BoundaryPolicy::Stop, 2, Command::GoToSlide(0), 2, CommandSideEffect::None)]
    #[case::go_past_end(BoundaryPolicy::Stop, 2, Command::GoToSlide(6), 2, CommandSideEffect::None)]
    fn navigation(
        #[case] policy: BoundaryPolicy,
        #[case] start: usize,
        #[case] command: Command,
        #[case] expected_slide: usize,
        #[case] expected_effect: CommandSideEffect,
    ) {
        let theme = PresentationTheme::default();
        let mut presenter = make_presenter(&theme, policy, start);
        assert_eq!(presenter.apply_command(command), expected_effect);
        assert_eq!(current(&presenter), expected_slide);
    }

    #[test]
    fn scrolling() {
        let theme = PresentationTheme::default();
        let mut presenter = make_presenter(&theme, BoundaryPolicy::Stop, 0);
        assert_eq!(presenter.apply_command(Command::ScrollDown), CommandSideEffect::None);
        assert_eq!(presenter.apply_command(Command::ScrollUp), CommandSideEffect::None);

        presenter.state.presentation_mut().limit_scroll(1);
        assert_eq!(presenter.apply_command(Command::ScrollDown), CommandSideEffect::Redraw);
        assert_eq!(presenter.apply_command(Command::ScrollDown), CommandSideEffect::None);
        assert_eq!(presenter.state.presentation().scroll(), 1);
        assert_eq!(presenter.apply_command(Command::ScrollUp), CommandSideEffect::Redraw);
        assert_eq!(current(&presenter), 0);
    }

    #[test]
    fn exit() {
        let theme = PresentationTheme::default();
        let mut presenter = make_presenter(&theme, BoundaryPolicy::Stop, 0);
        assert_eq!(presenter.apply_command(Command::Exit), CommandSideEffect::Exit);
    }

    #[test]
    fn modals() {
        let theme = PresentationTheme::default();
        let mut presenter = make_presenter(&theme, BoundaryPolicy::Stop, 0);
        assert_eq!(presenter.apply_command(Command::CloseModal), CommandSideEffect::None);

        presenter.apply_command(Command::ToggleSlideIndex);
        assert!(matches!(presenter.state, PresenterState::SlideIndex(_)));
        presenter.apply_command(Command::ToggleKeyBindings);
        assert!(matches!(presenter.state, PresenterState::KeyBindings(_)));

        // Navigation keeps working while a modal is open.
        assert_eq!(presenter.apply_command(Command::Next), CommandSideEffect::Redraw);
        assert_eq!(current(&presenter), 1);

        assert_eq!(presenter.apply_command(Command::CloseModal), CommandSideEffect::Redraw);
        assert!(matches!(presenter.state, PresenterState::Presenting(_)));
    }

    #[test]
    fn toggling_twice_closes() {
        let theme = PresentationTheme::default();
        let mut presenter = make_presenter(&theme, BoundaryPolicy::Stop, 0);
        presenter.apply_command(Command::ToggleSlideIndex);
        presenter.apply_command(Command::ToggleSlideIndex);
        assert!(matches!(presenter.state, PresenterState::Presenting(_)));
    }
}
