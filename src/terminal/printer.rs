use crate::style::{Colors, TextStyle};
use crossterm::{
    cursor, style,
    terminal::{self},
    QueueableCommand,
};
use std::io::{self, Write};
use unicode_width::UnicodeWidthStr;

#[derive(Debug, PartialEq)]
pub(crate) enum TerminalCommand<'a> {
    BeginUpdate,
    EndUpdate,
    MoveTo { column: u16, row: u16 },
    PrintText { content: &'a str, style: TextStyle },
    ClearScreen,
    SetColors(Colors),
    SetCursorBoundaries { rows: u16 },
    Flush,
}

pub(crate) trait TerminalIo {
    fn execute(&mut self, command: &TerminalCommand<'_>) -> Result<(), TerminalError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TerminalError {
    #[error("io: {0}")]
    Io(#[from] io::Error),
}

/// A wrapper over the terminal write handle.
pub(crate) struct Terminal<I: TerminalWrite> {
    writer: I,
    cursor_row: u16,
    rows: u16,
}

impl<I: TerminalWrite> Terminal<I> {
    pub(crate) fn new(mut writer: I) -> io::Result<Self> {
        writer.init()?;
        Ok(Self { writer, cursor_row: 0, rows: u16::MAX })
    }

    fn move_to(&mut self, column: u16, row: u16) -> io::Result<()> {
        self.writer.queue(cursor::MoveTo(column, row))?;
        self.cursor_row = row;
        Ok(())
    }

    fn print_text(&mut self, content: &str, style: &TextStyle) -> io::Result<()> {
        // Don't print text if it overflows vertically.
        if self.cursor_row >= self.rows || content.width() == 0 {
            return Ok(());
        }
        self.writer.queue(style::PrintStyledContent(style.apply(content)))?;
        Ok(())
    }

    fn clear_screen(&mut self) -> io::Result<()> {
        self.writer.queue(terminal::Clear(terminal::ClearType::All))?;
        self.cursor_row = 0;
        Ok(())
    }

    fn set_colors(&mut self, colors: Colors) -> io::Result<()> {
        self.writer.queue(style::ResetColor)?;
        self.writer.queue(style::SetColors(colors.into()))?;
        Ok(())
    }
}

impl<I: TerminalWrite> TerminalIo for Terminal<I> {
    fn execute(&mut self, command: &TerminalCommand<'_>) -> Result<(), TerminalError> {
        use TerminalCommand::*;
        match command {
            BeginUpdate => {
                self.writer.queue(terminal::BeginSynchronizedUpdate)?;
            }
            EndUpdate => {
                self.writer.queue(terminal::EndSynchronizedUpdate)?;
            }
            MoveTo { column, row } => self.move_to(*column, *row)?,
            PrintText { content, style } => self.print_text(content, style)?,
            ClearScreen => self.clear_screen()?,
            SetColors(colors) => self.set_colors(*colors)?,
            SetCursorBoundaries { rows } => self.rows = *rows,
            Flush => self.writer.flush()?,
        };
        Ok(())
    }
}

impl<I: TerminalWrite> Drop for Terminal<I> {
    fn drop(&mut self) {
        self.writer.deinit();
    }
}

pub(crate) trait TerminalWrite: io::Write {
    fn init(&mut self) -> io::Result<()>;
    fn deinit(&mut self);
}

impl TerminalWrite for io::Stdout {
    fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        self.queue(cursor::Hide)?;
        self.queue(terminal::EnterAlternateScreen)?;
        Ok(())
    }

    fn deinit(&mut self) {
        let _ = self.queue(terminal::LeaveAlternateScreen);
        let _ = self.queue(cursor::Show);
        let _ = self.flush();
        let _ = terminal::disable_raw_mode();
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        output: Vec<u8>,
        initialized: bool,
    }

    impl io::Write for Recorder {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.output.write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl TerminalWrite for Recorder {
        fn init(&mut self) -> io::Result<()> {
            self.initialized = true;
            Ok(())
        }

        fn deinit(&mut self) {
            self.initialized = false;
        }
    }

    #[test]
    fn tracks_cursor_row() {
        let mut terminal = Terminal::new(Recorder::default()).expect("init failed");
        assert!(terminal.writer.initialized);
        terminal.execute(&TerminalCommand::MoveTo { column: 2, row: 4 }).unwrap();
        assert_eq!(terminal.cursor_row, 4);
        terminal.execute(&TerminalCommand::ClearScreen).unwrap();
        assert_eq!(terminal.cursor_row, 0);
    }

    #[test]
    fn text_past_boundaries_is_skipped() {
        let mut terminal = Terminal::new(Recorder::default()).expect("init failed");
        terminal.execute(&TerminalCommand::SetCursorBoundaries { rows: 2 }).unwrap();
        terminal.execute(&TerminalCommand::MoveTo { column: 0, row: 2 }).unwrap();
        let before = terminal.writer.output.len();
        terminal.execute(&TerminalCommand::PrintText { content: "hidden", style: TextStyle::default() }).unwrap();
        assert_eq!(terminal.writer.output.len(), before);
    }
}
