use serde::Deserialize;

/// What the previous/next controls do when they reach either end of the deck.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "json-schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "snake_case")]
pub enum BoundaryPolicy {
    /// The control is disabled at the boundary.
    #[default]
    Stop,

    /// The control wraps around to the other end of the deck.
    Wrap,
}

/// A control on the presentation's control surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Control {
    Previous,
    Restart,
    Next,

    /// One of the per slide selectors.
    Select(usize),
}

/// Keeps track of the slide being displayed.
///
/// The arithmetic operations always wrap around; boundaries are only enforced when going through
/// [Navigator::activate].
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Navigator {
    current: usize,
    total: usize,
    policy: BoundaryPolicy,
}

impl Navigator {
    pub(crate) fn new(total: usize, policy: BoundaryPolicy) -> Self {
        Self { current: 0, total, policy }
    }

    /// The index of the slide being displayed.
    pub(crate) fn current(&self) -> usize {
        self.current
    }

    pub(crate) fn is_first(&self) -> bool {
        self.current == 0
    }

    pub(crate) fn is_last(&self) -> bool {
        self.current + 1 >= self.total
    }

    /// Move to the next slide, wrapping from the last one to the first one.
    pub(crate) fn next(&mut self) {
        if self.total > 0 {
            self.current = (self.current + 1) % self.total;
        }
    }

    /// Move to the previous slide, wrapping from the first one to the last one.
    pub(crate) fn previous(&mut self) {
        if self.total > 0 {
            self.current = (self.current + self.total - 1) % self.total;
        }
    }

    /// Jump to a specific slide.
    ///
    /// Returns `false` and leaves the state untouched if the index is out of range.
    pub(crate) fn jump_to(&mut self, index: usize) -> bool {
        if index < self.total {
            self.current = index;
            true
        } else {
            false
        }
    }

    /// Go back to the first slide.
    pub(crate) fn restart(&mut self) {
        self.current = 0;
    }

    /// Checks whether a control can be activated in the current state.
    pub(crate) fn is_enabled(&self, control: Control) -> bool {
        let wraps = self.policy == BoundaryPolicy::Wrap && self.total > 0;
        match control {
            Control::Previous => wraps || !self.is_first(),
            Control::Next => wraps || !self.is_last(),
            Control::Restart => true,
            Control::Select(index) => index < self.total,
        }
    }

    /// Activate a control.
    ///
    /// Disabled controls are inert. Returns whether the current slide changed.
    pub(crate) fn activate(&mut self, control: Control) -> bool {
        if !self.is_enabled(control) {
            return false;
        }
        let before = self.current;
        match control {
            Control::Previous => self.previous(),
            Control::Next => self.next(),
            Control::Restart => self.restart(),
            Control::Select(index) => {
                self.jump_to(index);
            }
        };
        before != self.current
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;

    fn navigator(total: usize) -> Navigator {
        Navigator::new(total, BoundaryPolicy::Stop)
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(10)]
    fn next_wraps_around(#[case] total: usize) {
        let mut navigator = navigator(total);
        for _ in 0..total {
            navigator.next();
        }
        assert_eq!(navigator.current(), 0);
    }

    #[rstest]
    #[case(1)]
    #[case(3)]
    #[case(10)]
    fn previous_wraps_around(#[case] total: usize) {
        let mut navigator = navigator(total);
        navigator.previous();
        assert_eq!(navigator.current(), total - 1);
    }

    #[rstest]
    #[case(0)]
    #[case(4)]
    #[case(9)]
    fn restart(#[case] index: usize) {
        let mut navigator = navigator(10);
        assert!(navigator.jump_to(index));
        navigator.restart();
        assert_eq!(navigator.current(), 0);
    }

    #[test]
    fn out_of_range_jump_is_rejected() {
        let mut navigator = navigator(3);
        navigator.next();
        assert!(!navigator.jump_to(3));
        assert_eq!(navigator.current(), 1);
    }

    #[test]
    fn empty_deck() {
        let mut navigator = navigator(0);
        navigator.next();
        navigator.previous();
        navigator.restart();
        assert_eq!(navigator.current(), 0);
        assert!(!navigator.activate(Control::Next));
        assert!(!navigator.activate(Control::Previous));
        assert!(!navigator.activate(Control::Select(0)));
    }

    #[test]
    fn previous_control_inert_at_start() {
        let mut navigator = navigator(10);
        assert!(!navigator.is_enabled(Control::Previous));
        assert!(!navigator.activate(Control::Previous));
        assert_eq!(navigator.current(), 0);
    }

    #[test]
    fn next_control_inert_at_end() {
        let mut navigator = navigator(10);
        navigator.jump_to(9);
        assert!(!navigator.is_enabled(Control::Next));
        assert!(!navigator.activate(Control::Next));
        assert_eq!(navigator.current(), 9);
    }

    #[test]
    fn controls_walk_the_deck() {
        let mut navigator = navigator(3);
        assert!(navigator.activate(Control::Next));
        assert!(navigator.activate(Control::Next));
        assert_eq!(navigator.current(), 2);
        assert!(navigator.activate(Control::Previous));
        assert_eq!(navigator.current(), 1);
        assert!(navigator.activate(Control::Restart));
        assert_eq!(navigator.current(), 0);
        assert!(!navigator.activate(Control::Restart));
    }

    #[test]
    fn selectors() {
        let mut navigator = navigator(10);
        for index in 0..10 {
            navigator.activate(Control::Select(index));
            assert_eq!(navigator.current(), index);
        }
        assert!(!navigator.is_enabled(Control::Select(10)));
    }

    #[test]
    fn wrapping_controls() {
        let mut navigator = Navigator::new(4, BoundaryPolicy::Wrap);
        assert!(navigator.activate(Control::Previous));
        assert_eq!(navigator.current(), 3);
        assert!(navigator.activate(Control::Next));
        assert_eq!(navigator.current(), 0);
    }

    #[test]
    fn single_slide_wrap_does_not_move() {
        let mut navigator = Navigator::new(1, BoundaryPolicy::Wrap);
        assert!(navigator.is_enabled(Control::Next));
        assert!(!navigator.activate(Control::Next));
        assert_eq!(navigator.current(), 0);
    }
}
