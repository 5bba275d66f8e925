use super::keyboard::{CommandKeyBindings, KeyBindingsValidationError, KeyboardListener};
use crate::config::KeyBindingsConfig;
use std::{io, time::Duration};
use strum::EnumDiscriminants;

/// How long to wait for input before giving up on a poll.
const POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// A command listener that turns user input into commands.
pub struct CommandListener {
    keyboard: KeyboardListener,
}

impl CommandListener {
    /// Create a new listener using the given key bindings.
    pub fn new(config: KeyBindingsConfig) -> Result<Self, KeyBindingsValidationError> {
        let bindings = CommandKeyBindings::try_from(config)?;
        Ok(Self { keyboard: KeyboardListener::new(bindings) })
    }

    /// Try to get the next command.
    ///
    /// This attempts to get a command and returns `Ok(None)` on timeout.
    pub(crate) fn try_next_command(&mut self) -> io::Result<Option<Command>> {
        self.keyboard.poll_next_command(POLL_TIMEOUT)
    }
}

/// A command.
#[derive(Clone, Debug, PartialEq, Eq, EnumDiscriminants)]
pub(crate) enum Command {
    /// Redraw the presentation.
    ///
    /// This can happen on terminal resize.
    Redraw,

    /// Move to the next slide.
    Next,

    /// Move to the previous slide.
    Previous,

    /// Go back to the first slide.
    Restart,

    /// Go to the last slide.
    LastSlide,

    /// Go to one particular slide, counting from 1.
    GoToSlide(u32),

    /// Scroll the current slide's body down.
    ScrollDown,

    /// Scroll the current slide's body up.
    ScrollUp,

    /// Toggle the slide index view.
    ToggleSlideIndex,

    /// Toggle the key bindings view.
    ToggleKeyBindings,

    /// Hide the currently open modal, if any.
    CloseModal,

    /// Exit the presentation.
    Exit,
}
