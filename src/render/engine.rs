use super::{
    operation::{Alignment, AsRenderOperations, BlockLine, RenderOperation},
    properties::WindowSize,
    text::{Line, Text},
    RenderError, RenderResult,
};
use crate::{
    style::{Colors, TextStyle},
    terminal::printer::{TerminalCommand, TerminalIo},
};

const SEPARATOR: &str = "─";

#[derive(Debug)]
pub(crate) struct RenderEngineOptions {
    pub(crate) max_columns: u16,

    /// The number of rows the viewport's contents are scrolled down by.
    pub(crate) scroll: u16,
}

impl Default for RenderEngineOptions {
    fn default() -> Self {
        Self { max_columns: u16::MAX, scroll: 0 }
    }
}

/// A region of the screen whose contents can be scrolled vertically.
#[derive(Clone, Copy, Debug)]
struct Viewport {
    top: u16,
    bottom: u16,
    indicator: TextStyle,
}

/// Executes render operations against a terminal.
///
/// The engine keeps track of the row being drawn at. Inside a viewport that row is relative to
/// the contents rather than the screen.
pub(crate) struct RenderEngine<'a, T>
where
    T: TerminalIo,
{
    terminal: &'a mut T,
    dimensions: WindowSize,
    start_column: u16,
    colors: Colors,
    row: u16,
    viewport: Option<Viewport>,
    scroll: u16,
    max_scroll: u16,
    measuring: bool,
}

impl<'a, T> RenderEngine<'a, T>
where
    T: TerminalIo,
{
    pub(crate) fn new(terminal: &'a mut T, window_dimensions: WindowSize, options: RenderEngineOptions) -> Self {
        let dimensions = window_dimensions.capped(options.max_columns);
        let start_column = dimensions.start_column(&window_dimensions);
        Self {
            terminal,
            dimensions,
            start_column,
            colors: Default::default(),
            row: 0,
            viewport: None,
            scroll: options.scroll,
            max_scroll: 0,
            measuring: false,
        }
    }

    /// Render a list of operations.
    ///
    /// Returns the number of rows the viewport's contents can be scrolled by.
    pub(crate) fn render<'b>(
        mut self,
        operations: impl Iterator<Item = &'b RenderOperation>,
    ) -> Result<u16, RenderError> {
        let operations: Vec<_> = operations.collect();

        // A first pass that draws nothing finds out how tall the viewport's contents are.
        self.measuring = true;
        for operation in &operations {
            self.render_one(operation)?;
        }
        self.end_viewport()?;
        self.measuring = false;
        self.scroll = self.scroll.min(self.max_scroll);
        self.row = 0;
        self.colors = Default::default();

        self.execute(&TerminalCommand::BeginUpdate)?;
        self.execute(&TerminalCommand::SetCursorBoundaries { rows: self.dimensions.rows })?;
        for operation in &operations {
            self.render_one(operation)?;
        }
        self.end_viewport()?;
        self.execute(&TerminalCommand::EndUpdate)?;
        self.execute(&TerminalCommand::Flush)?;
        Ok(self.max_scroll)
    }

    fn render_one(&mut self, operation: &RenderOperation) -> RenderResult {
        match operation {
            RenderOperation::ClearScreen => self.clear_screen(),
            RenderOperation::SetColors(colors) => self.set_colors(colors),
            RenderOperation::JumpToRow { index } => self.jump_to_row(*index),
            RenderOperation::JumpToBottomRow { index } => {
                self.jump_to_row(self.dimensions.rows.saturating_sub(index.saturating_add(1)))
            }
            RenderOperation::RenderText { line, alignment } => self.render_text(line, alignment),
            RenderOperation::RenderLineBreak => self.render_line_break(),
            RenderOperation::RenderSeparator { style } => self.render_separator(style),
            RenderOperation::RenderBlockLine(block) => self.render_block_line(block),
            RenderOperation::RenderDynamic(generator) => self.render_dynamic(generator.as_ref()),
            RenderOperation::BeginViewport { bottom_margin, indicator } => {
                self.begin_viewport(*bottom_margin, *indicator)
            }
            RenderOperation::EndViewport => self.end_viewport(),
        }
    }

    fn execute(&mut self, command: &TerminalCommand<'_>) -> RenderResult {
        if !self.measuring {
            self.terminal.execute(command)?;
        }
        Ok(())
    }

    /// Move the cursor to a column in the current row.
    ///
    /// Returns `false` if the current row can't be seen, in which case nothing should be printed.
    fn move_to_column(&mut self, column: u16) -> Result<bool, RenderError> {
        let row = match &self.viewport {
            Some(viewport) => {
                let first = viewport.top.saturating_add(self.scroll);
                let last = viewport.bottom.saturating_add(self.scroll);
                if self.row < first || self.row >= last {
                    return Ok(false);
                }
                self.row - self.scroll
            }
            None => self.row,
        };
        if row >= self.dimensions.rows {
            return Ok(false);
        }
        self.execute(&TerminalCommand::MoveTo { column: self.start_column + column, row })?;
        Ok(true)
    }

    fn clear_screen(&mut self) -> RenderResult {
        self.execute(&TerminalCommand::ClearScreen)?;
        self.row = 0;
        Ok(())
    }

    fn set_colors(&mut self, colors: &Colors) -> RenderResult {
        self.colors = *colors;
        self.execute(&TerminalCommand::SetColors(*colors))?;
        Ok(())
    }

    fn jump_to_row(&mut self, row: u16) -> RenderResult {
        self.row = row;
        Ok(())
    }

    fn render_line_break(&mut self) -> RenderResult {
        self.row = self.row.saturating_add(1);
        Ok(())
    }

    fn begin_viewport(&mut self, bottom_margin: u16, indicator: TextStyle) -> RenderResult {
        self.end_viewport()?;
        let bottom = self.dimensions.rows.saturating_sub(bottom_margin).max(self.row);
        self.viewport = Some(Viewport { top: self.row, bottom, indicator });
        Ok(())
    }

    fn end_viewport(&mut self) -> RenderResult {
        let Some(viewport) = self.viewport.take() else {
            return Ok(());
        };
        if self.measuring {
            let height = self.row.saturating_sub(viewport.top);
            let visible = viewport.bottom - viewport.top;
            self.max_scroll = height.saturating_sub(visible);
            self.row = self.row.min(viewport.bottom);
            return Ok(());
        }
        self.row = self.row.saturating_sub(self.scroll).min(viewport.bottom);
        self.render_scroll_indicator(&viewport)
    }

    // Arrows on the bottom row point to the contents that don't fit in the viewport.
    fn render_scroll_indicator(&mut self, viewport: &Viewport) -> RenderResult {
        let indicator = match (self.scroll > 0, self.scroll < self.max_scroll) {
            (false, false) => return Ok(()),
            (true, false) => "▲",
            (false, true) => "▼",
            (true, true) => "▲▼",
        };
        let row = self.row;
        self.row = self.dimensions.rows.saturating_sub(1);
        let line = Line::from(Text::new(indicator, viewport.indicator));
        self.render_text(&line, &Alignment::Right { margin: 1 })?;
        self.row = row;
        Ok(())
    }

    fn render_text(&mut self, line: &Line, alignment: &Alignment) -> RenderResult {
        let columns = self.dimensions.columns;
        let margin = match alignment {
            Alignment::Left { margin } | Alignment::Right { margin } => *margin,
            Alignment::Center { margin } => margin.saturating_mul(2),
        };
        let max_width = columns.saturating_sub(margin);
        for wrapped in line.wrap(max_width as usize) {
            let width = wrapped.width() as u16;
            let column = match alignment {
                Alignment::Left { margin } => *margin,
                Alignment::Right { margin } => columns.saturating_sub(margin.saturating_add(width)),
                Alignment::Center { .. } => columns.saturating_sub(width) / 2,
            };
            if self.move_to_column(column)? {
                self.print_line(&wrapped, &TextStyle::colored(self.colors))?;
            }
            self.render_line_break()?;
        }
        Ok(())
    }

    fn render_separator(&mut self, style: &TextStyle) -> RenderResult {
        let separator = SEPARATOR.repeat(self.dimensions.columns as usize);
        let style = style.merged(&TextStyle::colored(self.colors));
        if self.move_to_column(0)? {
            self.execute(&TerminalCommand::PrintText { content: &separator, style })?;
        }
        self.render_line_break()
    }

    fn render_block_line(&mut self, block: &BlockLine) -> RenderResult {
        let BlockLine { line, margin, width, background } = block;
        let available = self.dimensions.columns.saturating_sub(margin.saturating_mul(2));
        let width = width.unwrap_or(available).min(self.dimensions.columns.saturating_sub(*margin)).max(1);
        let colors = Colors { background: *background, foreground: self.colors.foreground };
        let base_style = TextStyle::colored(colors.merge(&self.colors));
        for piece in line.split(width as usize) {
            if self.move_to_column(*margin)? {
                self.print_line(&piece, &base_style)?;
                let padding = " ".repeat((width as usize).saturating_sub(piece.width()));
                self.execute(&TerminalCommand::PrintText { content: &padding, style: base_style })?;
            }
            self.render_line_break()?;
        }
        Ok(())
    }

    fn render_dynamic(&mut self, generator: &dyn AsRenderOperations) -> RenderResult {
        let operations = generator.as_render_operations(&self.dimensions);
        for operation in operations {
            self.render_one(&operation)?;
        }
        Ok(())
    }

    fn print_line(&mut self, line: &Line, base_style: &TextStyle) -> RenderResult {
        for text in line.texts() {
            let style = text.style.merged(base_style);
            self.execute(&TerminalCommand::PrintText { content: &text.content, style })?;
        }
        Ok(())
    }
}
