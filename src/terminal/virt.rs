use super::printer::{TerminalCommand, TerminalError, TerminalIo};
use crate::{
    render::properties::WindowSize,
    style::{Colors, TextStyle},
};
use unicode_width::UnicodeWidthChar;

const WIDE_PADDING: char = '\0';

/// The contents of a [VirtualTerminal] once drawing is done.
pub(crate) struct TerminalGrid {
    pub(crate) rows: Vec<Vec<StyledChar>>,
    pub(crate) background: Colors,
}

impl TerminalGrid {
    /// Get the characters in a row as a string, with trailing whitespace removed.
    pub(crate) fn row_text(&self, index: usize) -> String {
        let row: String = self.visible_cells(index).map(|c| c.character).collect();
        row.trim_end().to_string()
    }

    // Cells covered by a wide character are skipped.
    fn visible_cells(&self, index: usize) -> impl Iterator<Item = &StyledChar> {
        self.rows.get(index).into_iter().flatten().filter(|c| c.character != WIDE_PADDING)
    }

    /// Find the first row that contains a piece of text.
    pub(crate) fn find_row(&self, needle: &str) -> Option<usize> {
        (0..self.rows.len()).find(|index| self.row_text(*index).contains(needle))
    }

    /// Get the style of the first cell in a row that starts some text.
    pub(crate) fn style_at(&self, needle: &str) -> Option<TextStyle> {
        let row = self.find_row(needle)?;
        let cells: Vec<_> = self.visible_cells(row).collect();
        let needle: Vec<char> = needle.chars().collect();
        let column =
            cells.windows(needle.len()).position(|window| window.iter().map(|c| c.character).eq(needle.iter().copied()))?;
        Some(cells[column].style)
    }
}

/// A terminal that draws into an in-memory grid.
pub(crate) struct VirtualTerminal {
    row: u16,
    column: u16,
    colors: Colors,
    rows: Vec<Vec<StyledChar>>,
    background: Colors,
}

impl VirtualTerminal {
    pub(crate) fn new(dimensions: WindowSize) -> Self {
        let rows = vec![vec![StyledChar::default(); dimensions.columns as usize]; dimensions.rows as usize];
        Self { row: 0, column: 0, colors: Default::default(), rows, background: Default::default() }
    }

    pub(crate) fn into_contents(self) -> TerminalGrid {
        TerminalGrid { rows: self.rows, background: self.background }
    }

    fn print_text(&mut self, content: &str, style: &TextStyle) {
        let style = style.merged(&TextStyle::colored(self.colors));
        for c in content.chars() {
            let width = c.width().unwrap_or(0) as u16;
            if width == 0 {
                continue;
            }
            if let Some(cell) = self.rows.get_mut(self.row as usize).and_then(|row| row.get_mut(self.column as usize))
            {
                *cell = StyledChar { character: c, style };
            }
            // Wide characters take up their cell plus a padding one.
            for offset in 1..width {
                let column = (self.column + offset) as usize;
                if let Some(cell) = self.rows.get_mut(self.row as usize).and_then(|row| row.get_mut(column)) {
                    *cell = StyledChar { character: WIDE_PADDING, style };
                }
            }
            self.column += width;
        }
    }

    fn clear_screen(&mut self) {
        for row in &mut self.rows {
            row.fill(StyledChar::default());
        }
        self.background = self.colors;
        self.row = 0;
        self.column = 0;
    }
}

impl TerminalIo for VirtualTerminal {
    fn execute(&mut self, command: &TerminalCommand<'_>) -> Result<(), TerminalError> {
        use TerminalCommand::*;
        match command {
            BeginUpdate | EndUpdate | SetCursorBoundaries { .. } | Flush => (),
            MoveTo { column, row } => {
                self.column = *column;
                self.row = *row;
            }
            PrintText { content, style } => self.print_text(content, style),
            ClearScreen => self.clear_screen(),
            SetColors(colors) => self.colors = *colors,
        };
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct StyledChar {
    pub(crate) character: char,
    pub(crate) style: TextStyle,
}

impl Default for StyledChar {
    fn default() -> Self {
        Self { character: ' ', style: Default::default() }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn assert_contents(grid: &TerminalGrid, lines: &[&str]) {
        assert_eq!(grid.rows.len(), lines.len());
        for (index, expected) in lines.iter().enumerate() {
            let line: String = grid.rows[index].iter().map(|c| c.character).collect();
            assert_eq!(line, *expected);
        }
    }

    fn print(term: &mut VirtualTerminal, content: &str) {
        term.execute(&TerminalCommand::PrintText { content, style: TextStyle::default() }).expect("print failed");
    }

    #[test]
    fn text() {
        let mut term = VirtualTerminal::new(WindowSize { rows: 2, columns: 3 });
        for c in ["a", "b", "c", "d"] {
            print(&mut term, c);
        }
        term.execute(&TerminalCommand::MoveTo { column: 0, row: 1 }).unwrap();
        print(&mut term, "A");
        assert_contents(&term.into_contents(), &["abc", "A  "]);
    }

    #[test]
    fn movement() {
        let mut term = VirtualTerminal::new(WindowSize { rows: 2, columns: 3 });
        print(&mut term, "A");
        term.execute(&TerminalCommand::MoveTo { column: 2, row: 0 }).unwrap();
        print(&mut term, "C");
        term.execute(&TerminalCommand::MoveTo { column: 1, row: 1 }).unwrap();
        print(&mut term, "B");
        assert_contents(&term.into_contents(), &["A C", " B "]);
    }

    #[test]
    fn wide_characters() {
        let mut term = VirtualTerminal::new(WindowSize { rows: 1, columns: 4 });
        print(&mut term, "🛒x");
        let grid = term.into_contents();
        assert_eq!(grid.rows[0][0].character, '🛒');
        assert_eq!(grid.rows[0][2].character, 'x');
        assert_eq!(grid.row_text(0), "🛒x");
    }

    #[test]
    fn colors_apply_to_text() {
        let colors = Colors { foreground: Some(crate::style::Color::Red), background: None };
        let mut term = VirtualTerminal::new(WindowSize { rows: 1, columns: 4 });
        term.execute(&TerminalCommand::SetColors(colors)).unwrap();
        print(&mut term, "hi");
        let grid = term.into_contents();
        assert_eq!(grid.style_at("hi"), Some(TextStyle::colored(colors)));
    }
}
