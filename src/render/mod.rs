pub(crate) mod engine;
pub(crate) mod operation;
pub(crate) mod properties;
pub(crate) mod text;

use crate::{
    render::{
        operation::{Alignment, RenderOperation},
        properties::WindowSize,
        text::{Line, Text},
    },
    style::{Color, Colors, TextStyle},
    terminal::printer::{Terminal, TerminalError, TerminalWrite},
};
use engine::{RenderEngine, RenderEngineOptions};
use std::io;

/// The smallest window we're able to draw a slide in.
pub(crate) const MINIMUM_SIZE: WindowSize = WindowSize { rows: 8, columns: 24 };

/// The result of a render operation.
pub(crate) type RenderResult = Result<(), RenderError>;

/// Allows drawing on the terminal.
pub(crate) struct TerminalDrawer<W: TerminalWrite> {
    terminal: Terminal<W>,
    max_columns: u16,
}

impl<W> TerminalDrawer<W>
where
    W: TerminalWrite,
{
    pub(crate) fn new(handle: W, max_columns: u16) -> io::Result<Self> {
        let terminal = Terminal::new(handle)?;
        Ok(Self { terminal, max_columns })
    }

    /// Render operations with the viewport scrolled down by `scroll` rows.
    ///
    /// Returns the number of rows the viewport can be scrolled by at the current window size.
    pub(crate) fn render_operations<'a>(
        &mut self,
        operations: impl Iterator<Item = &'a RenderOperation>,
        scroll: u16,
    ) -> Result<u16, RenderError> {
        let dimensions = WindowSize::current()?;
        if dimensions.rows < MINIMUM_SIZE.rows || dimensions.columns < MINIMUM_SIZE.columns {
            return Err(RenderError::TerminalTooSmall);
        }
        let engine = self.create_engine(dimensions, scroll);
        engine.render(operations)
    }

    /// Render an error message in the middle of the screen.
    pub(crate) fn render_error(&mut self, message: &str) -> RenderResult {
        let dimensions = WindowSize::current()?;
        let starting_row = (dimensions.rows / 2).saturating_sub(1);
        let heading = Line::from(Text::new("Error", TextStyle::default().bold()));
        let alignment = Alignment::Center { margin: 1 };
        let operations = [
            RenderOperation::SetColors(Colors {
                foreground: Some(Color::new(255, 0, 0)),
                background: Some(Color::new(0, 0, 0)),
            }),
            RenderOperation::ClearScreen,
            RenderOperation::JumpToRow { index: starting_row },
            RenderOperation::RenderText { line: heading, alignment },
            RenderOperation::RenderText { line: message.into(), alignment },
        ];
        let engine = self.create_engine(dimensions, 0);
        engine.render(operations.iter())?;
        Ok(())
    }

    fn create_engine(&mut self, dimensions: WindowSize, scroll: u16) -> RenderEngine<'_, Terminal<W>> {
        let options = RenderEngineOptions { max_columns: self.max_columns, scroll };
        RenderEngine::new(&mut self.terminal, dimensions, options)
    }
}

/// A rendering error.
#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error("io: {0}")]
    Io(#[from] io::Error),

    #[error("terminal: {0}")]
    Terminal(#[from] TerminalError),

    #[error("screen is too small")]
    TerminalTooSmall,
}
