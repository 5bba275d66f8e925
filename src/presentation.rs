use crate::{
    navigation::{BoundaryPolicy, Control, Navigator},
    render::operation::RenderOperation,
};

/// A slide ready to be drawn.
#[derive(Debug)]
pub(crate) struct Slide {
    title: String,
    operations: Vec<RenderOperation>,
}

impl Slide {
    pub(crate) fn new<S: Into<String>>(title: S, operations: Vec<RenderOperation>) -> Self {
        Self { title: title.into(), operations }
    }

    pub(crate) fn title(&self) -> &str {
        &self.title
    }

    /// Iterate the operations that draw this slide.
    pub(crate) fn iter_operations(&self) -> impl Iterator<Item = &RenderOperation> {
        self.operations.iter()
    }
}

/// A presentation: the slides in a deck plus the state of the navigation through them.
#[derive(Debug)]
pub struct Presentation {
    slides: Vec<Slide>,
    navigator: Navigator,
    scroll: u16,
    max_scroll: u16,
}

impl Presentation {
    /// Construct a new presentation, starting at the first slide.
    pub(crate) fn new(slides: Vec<Slide>, policy: BoundaryPolicy) -> Self {
        let navigator = Navigator::new(slides.len(), policy);
        Self { slides, navigator, scroll: 0, max_scroll: 0 }
    }

    /// Start at a specific slide, clamping it into the deck.
    pub fn starting_at(mut self, index: usize) -> Self {
        let last = self.slides.len().saturating_sub(1);
        self.navigator.jump_to(index.min(last));
        self
    }

    /// Iterate the slides in this presentation.
    pub(crate) fn iter_slides(&self) -> impl Iterator<Item = &Slide> {
        self.slides.iter()
    }

    /// Get the current slide, if there's any.
    pub(crate) fn current_slide(&self) -> Option<&Slide> {
        self.slides.get(self.navigator.current())
    }

    pub(crate) fn current_slide_index(&self) -> usize {
        self.navigator.current()
    }

    pub fn total_slides(&self) -> usize {
        self.slides.len()
    }

    /// Activate one of the navigation controls. Returns whether the current slide changed.
    pub(crate) fn activate(&mut self, control: Control) -> bool {
        let changed = self.navigator.activate(control);
        if changed {
            tracing::debug!("moved to slide {} of {}", self.navigator.current() + 1, self.slides.len());
            self.scroll = 0;
            self.max_scroll = 0;
        }
        changed
    }

    /// The number of rows the current slide's body is scrolled down by.
    pub(crate) fn scroll(&self) -> u16 {
        self.scroll
    }

    /// Set how far the current slide can be scrolled, as found out when drawing it.
    pub(crate) fn limit_scroll(&mut self, max_scroll: u16) {
        self.max_scroll = max_scroll;
        self.scroll = self.scroll.min(max_scroll);
    }

    /// Scroll the current slide's body down by a row. Returns whether anything moved.
    pub(crate) fn scroll_down(&mut self) -> bool {
        if self.scroll >= self.max_scroll {
            return false;
        }
        self.scroll += 1;
        true
    }

    /// Scroll the current slide's body up by a row. Returns whether anything moved.
    pub(crate) fn scroll_up(&mut self) -> bool {
        if self.scroll == 0 {
            return false;
        }
        self.scroll -= 1;
        true
    }

    /// Jump to the last slide.
    pub(crate) fn jump_last_slide(&mut self) -> bool {
        let last = self.slides.len().saturating_sub(1);
        self.activate(Control::Select(last))
    }
}
