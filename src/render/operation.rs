use super::{properties::WindowSize, text::Line};
use crate::style::{Color, Colors, TextStyle};
use std::{fmt::Debug, rc::Rc};

/// How a line of text is laid out horizontally.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Alignment {
    /// Left aligned, starting `margin` columns from the left edge.
    Left { margin: u16 },

    /// Right aligned, ending `margin` columns from the right edge.
    Right { margin: u16 },

    /// Centered, keeping at least `margin` columns free on both sides.
    Center { margin: u16 },
}

impl Default for Alignment {
    fn default() -> Self {
        Self::Left { margin: 0 }
    }
}

/// A line of preformatted text drawn on top of a solid block of color.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct BlockLine {
    pub(crate) line: Line,

    /// The column the block starts at.
    pub(crate) margin: u16,

    /// The block's width. When unset, the block takes all the space up to the right margin.
    pub(crate) width: Option<u16>,

    pub(crate) background: Option<Color>,
}

/// A render operation.
///
/// Render operations decouple the deck's content from what is actually drawn on the screen.
#[derive(Clone, Debug)]
pub(crate) enum RenderOperation {
    /// Clear the entire screen.
    ClearScreen,

    /// Set the colors to be used for any subsequent operations.
    SetColors(Colors),

    /// Jumps to the N-th row, where 0 is the top row.
    JumpToRow { index: u16 },

    /// Jumps to the N-th to last row, where 0 is the bottom row.
    JumpToBottomRow { index: u16 },

    /// Render a line of text, wrapping it if needed.
    RenderText { line: Line, alignment: Alignment },

    /// Render a line break.
    RenderLineBreak,

    /// Render a horizontal rule across the whole screen.
    RenderSeparator { style: TextStyle },

    /// Render a line on top of a block of color.
    RenderBlockLine(BlockLine),

    /// Render operations that can only be generated once the window size is known.
    RenderDynamic(Rc<dyn AsRenderOperations>),

    /// Start a scrollable region at the current row that ends `bottom_margin` rows above the
    /// bottom of the screen.
    ///
    /// Anything rendered until the matching [RenderOperation::EndViewport] is clipped to it, and
    /// `indicator` is the style of the arrows drawn when some of it doesn't fit.
    BeginViewport { bottom_margin: u16, indicator: TextStyle },

    /// End the current scrollable region.
    EndViewport,
}

/// A type that can generate render operations.
pub(crate) trait AsRenderOperations: Debug + 'static {
    /// Generate render operations.
    fn as_render_operations(&self, dimensions: &WindowSize) -> Vec<RenderOperation>;
}
