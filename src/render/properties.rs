use crossterm::terminal;
use std::io;

/// The size of the terminal window, in cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowSize {
    pub rows: u16,
    pub columns: u16,
}

impl WindowSize {
    /// Query the size of the terminal we're attached to.
    pub fn current() -> io::Result<Self> {
        let (columns, rows) = terminal::size()?;
        Ok(Self { rows, columns })
    }

    /// Cap the number of columns to some maximum.
    pub(crate) fn capped(self, max_columns: u16) -> Self {
        Self { rows: self.rows, columns: self.columns.min(max_columns) }
    }

    /// The first column to draw at so content is centered once capped.
    pub(crate) fn start_column(&self, full: &WindowSize) -> u16 {
        full.columns.saturating_sub(self.columns) / 2
    }
}
