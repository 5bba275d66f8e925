use super::listener::{Command, CommandDiscriminants};
use crate::config::KeyBindingsConfig;
use crossterm::event::{poll, read, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use serde_with::DeserializeFromStr;
use std::{fmt, io, iter, mem, str::FromStr, time::Duration};

/// Named keys and the aliases they can be spelled with in a binding.
const NAMED_KEYS: &[(&[&str], KeyCode)] = &[
    (&["<PageUp>", "<page_up>"], KeyCode::PageUp),
    (&["<PageDown>", "<page_down>"], KeyCode::PageDown),
    (&["<cr>", "<CR>", "<Enter>", "<enter>"], KeyCode::Enter),
    (&["<Home>", "<home>"], KeyCode::Home),
    (&["<End>", "<end>"], KeyCode::End),
    (&["<Left>", "<left>"], KeyCode::Left),
    (&["<Right>", "<right>"], KeyCode::Right),
    (&["<Up>", "<up>"], KeyCode::Up),
    (&["<Down>", "<down>"], KeyCode::Down),
    (&["<Esc>", "<esc>"], KeyCode::Esc),
    (&["<Tab>", "<tab>"], KeyCode::Tab),
    (&["<Backspace>", "<backspace>"], KeyCode::Backspace),
];

/// A keyboard command listener.
pub struct KeyboardListener {
    bindings: CommandKeyBindings,
    events: Vec<KeyEvent>,
}

impl KeyboardListener {
    pub fn new(bindings: CommandKeyBindings) -> Self {
        Self { bindings, events: Vec::new() }
    }

    /// Polls for the next input command coming from the keyboard.
    pub(crate) fn poll_next_command(&mut self, timeout: Duration) -> io::Result<Option<Command>> {
        if poll(timeout)? {
            self.next_command()
        } else {
            Ok(None)
        }
    }

    /// Blocks waiting for the next command.
    pub(crate) fn next_command(&mut self) -> io::Result<Option<Command>> {
        let event = read()?;
        Ok(self.process_event(event))
    }

    fn process_event(&mut self, event: Event) -> Option<Command> {
        let events = mem::take(&mut self.events);
        let (command, events) = match event {
            // Ignore release events
            Event::Key(event) if event.kind == KeyEventKind::Release => (None, events),
            Event::Key(event) => {
                let mut events = events;
                events.push(event);
                self.match_events(events)
            }
            Event::Resize(..) => (Some(Command::Redraw), events),
            _ => (None, Vec::new()),
        };
        self.events = events;
        command
    }

    fn match_events(&self, events: Vec<KeyEvent>) -> (Option<Command>, Vec<KeyEvent>) {
        match self.bindings.apply(&events) {
            InputAction::Emit(command) => (Some(command), Vec::new()),
            InputAction::Buffer => (None, events),
            InputAction::Reset => (None, Vec::new()),
        }
    }
}

enum InputAction {
    Buffer,
    Reset,
    Emit(Command),
}

/// The validated set of key bindings for every command.
pub struct CommandKeyBindings {
    bindings: Vec<(KeyBinding, CommandDiscriminants)>,
}

impl CommandKeyBindings {
    fn apply(&self, events: &[KeyEvent]) -> InputAction {
        let mut any_partials = false;
        for (binding, identifier) in &self.bindings {
            match binding.match_events(events) {
                BindingMatch::Full(context) => return Self::instantiate(identifier, context),
                BindingMatch::Partial => any_partials = true,
                BindingMatch::None => (),
            }
        }
        if any_partials {
            InputAction::Buffer
        } else {
            InputAction::Reset
        }
    }

    fn instantiate(discriminant: &CommandDiscriminants, context: MatchContext) -> InputAction {
        use CommandDiscriminants::*;
        let command = match discriminant {
            Redraw => Command::Redraw,
            Next => Command::Next,
            Previous => Command::Previous,
            Restart => Command::Restart,
            LastSlide => Command::LastSlide,
            GoToSlide => match context {
                // Bindings without a number are rejected when validating the config.
                MatchContext::None => return InputAction::Reset,
                MatchContext::Number(number) => Command::GoToSlide(number),
            },
            ScrollDown => Command::ScrollDown,
            ScrollUp => Command::ScrollUp,
            ToggleSlideIndex => Command::ToggleSlideIndex,
            ToggleKeyBindings => Command::ToggleKeyBindings,
            CloseModal => Command::CloseModal,
            Exit => Command::Exit,
        };
        InputAction::Emit(command)
    }

    fn validate_conflicts<'a>(
        bindings: impl Iterator<Item = &'a KeyBinding>,
    ) -> Result<(), KeyBindingsValidationError> {
        let mut bindings: Vec<_> = bindings.map(|binding| &binding.0).collect();
        bindings.sort_by(|a, b| a.partial_cmp(b).expect("key bindings are totally ordered"));
        for window in bindings.windows(2) {
            let (shorter, longer) = (window[0], window[1]);
            if shorter.iter().eq(longer.iter().take(shorter.len())) {
                return Err(KeyBindingsValidationError::Conflict(
                    KeyBinding(shorter.clone()),
                    KeyBinding(longer.clone()),
                ));
            }
        }
        Ok(())
    }
}

impl TryFrom<KeyBindingsConfig> for CommandKeyBindings {
    type Error = KeyBindingsValidationError;

    fn try_from(config: KeyBindingsConfig) -> Result<Self, Self::Error> {
        let zip = |discriminant, bindings: Vec<KeyBinding>| bindings.into_iter().zip(iter::repeat(discriminant));
        if !config.go_to_slide.iter().all(|k| k.expects_number()) {
            return Err(KeyBindingsValidationError::Invalid("go_to_slide", "<number> matcher required"));
        }
        let bindings: Vec<_> = iter::empty()
            .chain(zip(CommandDiscriminants::Next, config.next))
            .chain(zip(CommandDiscriminants::Previous, config.previous))
            .chain(zip(CommandDiscriminants::Restart, config.restart))
            .chain(zip(CommandDiscriminants::LastSlide, config.last_slide))
            .chain(zip(CommandDiscriminants::GoToSlide, config.go_to_slide))
            .chain(zip(CommandDiscriminants::ScrollDown, config.scroll_down))
            .chain(zip(CommandDiscriminants::ScrollUp, config.scroll_up))
            .chain(zip(CommandDiscriminants::ToggleSlideIndex, config.toggle_slide_index))
            .chain(zip(CommandDiscriminants::ToggleKeyBindings, config.toggle_bindings))
            .chain(zip(CommandDiscriminants::CloseModal, config.close_modal))
            .chain(zip(CommandDiscriminants::Exit, config.exit))
            .collect();
        Self::validate_conflicts(bindings.iter().map(|binding| &binding.0))?;
        Ok(Self { bindings })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum KeyBindingsValidationError {
    #[error("invalid binding for {0}: {1}")]
    Invalid(&'static str, &'static str),

    #[error("conflicting keybindings: {0} and {1}")]
    Conflict(KeyBinding, KeyBinding),
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum BindingMatch {
    Full(MatchContext),
    Partial,
    None,
}

/// A sequence of keys that triggers a command.
#[derive(Clone, Debug, PartialEq, Eq, DeserializeFromStr)]
#[cfg_attr(feature = "json-schema", derive(schemars::JsonSchema))]
pub struct KeyBinding(#[cfg_attr(feature = "json-schema", schemars(with = "String"))] Vec<KeyMatcher>);

impl KeyBinding {
    fn match_events(&self, mut events: &[KeyEvent]) -> BindingMatch {
        let mut output_context = MatchContext::None;
        for (index, matcher) in self.0.iter().enumerate() {
            let Some((context, rest)) = matcher.try_match_events(events) else {
                return BindingMatch::None;
            };
            if context != MatchContext::None {
                output_context = context;
            }
            events = rest;

            // Matchers are left but there's no more input: wait for more keys.
            if index != self.0.len() - 1 && events.is_empty() {
                return BindingMatch::Partial;
            }
        }
        BindingMatch::Full(output_context)
    }

    fn expects_number(&self) -> bool {
        self.0.iter().any(|m| matches!(m, KeyMatcher::Number))
    }
}

impl FromStr for KeyBinding {
    type Err = KeyBindingParseError;

    fn from_str(mut input: &str) -> Result<Self, Self::Err> {
        let mut matchers = Vec::new();
        while !input.is_empty() {
            let (matcher, rest) = KeyMatcher::parse(input)?;
            if matcher == KeyMatcher::Number && matchers.contains(&KeyMatcher::Number) {
                return Err(KeyBindingParseError::TooManyNumbers);
            }
            matchers.push(matcher);
            input = rest;
        }
        if matchers.is_empty() {
            return Err(KeyBindingParseError::NoInput);
        }
        Ok(Self(matchers))
    }
}

impl fmt::Display for KeyBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for matcher in &self.0 {
            write!(f, "{matcher}")?;
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum KeyBindingParseError {
    #[error("no input")]
    NoInput,

    #[error("not a valid key: {0}")]
    InvalidKey(char),

    #[error("too many number placeholders")]
    TooManyNumbers,

    #[error("invalid control sequence")]
    InvalidControlSequence,
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd)]
enum KeyMatcher {
    Key(KeyCombination),
    Number,
}

impl KeyMatcher {
    fn try_match_events<'a>(&self, events: &'a [KeyEvent]) -> Option<(MatchContext, &'a [KeyEvent])> {
        match self {
            Self::Key(combo) => Self::try_match_key(combo, events),
            Self::Number => Self::try_match_number(events),
        }
    }

    fn try_match_key<'a>(combo: &KeyCombination, events: &'a [KeyEvent]) -> Option<(MatchContext, &'a [KeyEvent])> {
        let (event, rest) = events.split_first()?;
        let is_control = event.modifiers == KeyModifiers::CONTROL;
        if combo.key == event.code && combo.control == is_control {
            Some((MatchContext::None, rest))
        } else {
            None
        }
    }

    fn try_match_number(mut events: &[KeyEvent]) -> Option<(MatchContext, &[KeyEvent])> {
        let mut number: Option<u32> = None;
        while let Some((head, rest)) = events.split_first() {
            let KeyCode::Char(c) = head.code else {
                break;
            };
            let Some(digit) = c.to_digit(10) else {
                break;
            };
            // Overflowing numbers never match.
            let next = number.unwrap_or(0).checked_mul(10)?.checked_add(digit)?;
            number = Some(next);
            events = rest;
        }
        number.map(|number| (MatchContext::Number(number), events))
    }

    fn parse(input: &str) -> Result<(Self, &str), KeyBindingParseError> {
        if let Some(input) = input.strip_prefix("<number>") {
            Ok((Self::Number, input))
        } else if let Some(input) = strip_any_prefix(input, &["<c-", "<C-"]) {
            let (key, input) = Self::parse_key_code(input)?;
            let input = input.strip_prefix('>').ok_or(KeyBindingParseError::InvalidControlSequence)?;
            Ok((Self::Key(KeyCombination { key, control: true }), input))
        } else {
            let (key, input) = Self::parse_key_code(input)?;
            Ok((Self::Key(KeyCombination { key, control: false }), input))
        }
    }

    fn parse_key_code(input: &str) -> Result<(KeyCode, &str), KeyBindingParseError> {
        for (aliases, code) in NAMED_KEYS {
            if let Some(rest) = strip_any_prefix(input, aliases) {
                return Ok((*code, rest));
            }
        }
        if let Some(input) = strip_any_prefix(input, &["<F", "<f"]) {
            let (number, rest) = input.split_once('>').ok_or(KeyBindingParseError::InvalidControlSequence)?;
            let number: u8 = number.parse().map_err(|_| KeyBindingParseError::InvalidControlSequence)?;
            return match number {
                1..=12 => Ok((KeyCode::F(number), rest)),
                _ => Err(KeyBindingParseError::InvalidControlSequence),
            };
        }
        let next = input.chars().next().ok_or(KeyBindingParseError::NoInput)?;
        match next {
            // these would make bindings ambiguous
            '<' | '>' => Err(KeyBindingParseError::InvalidKey(next)),
            c if c.is_alphanumeric() || c.is_ascii_punctuation() || c == ' ' => {
                Ok((KeyCode::Char(c), &input[c.len_utf8()..]))
            }
            c => Err(KeyBindingParseError::InvalidKey(c)),
        }
    }
}

fn strip_any_prefix<'a>(input: &'a str, prefixes: &[&str]) -> Option<&'a str> {
    prefixes.iter().find_map(|prefix| input.strip_prefix(prefix))
}

impl fmt::Display for KeyMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self::Key(combo) = self else {
            return write!(f, "<number>");
        };
        if combo.control {
            write!(f, "<c-")?;
        }
        match combo.key {
            KeyCode::Char(' ') => write!(f, "' '")?,
            KeyCode::Char(c) => write!(f, "{c}")?,
            other => write!(f, "<{other:?}>")?,
        };
        if combo.control {
            write!(f, ">")?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum MatchContext {
    Number(u32),
    None,
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd)]
struct KeyCombination {
    key: KeyCode,
    control: bool,
}

impl KeyCombination {
    #[cfg(test)]
    fn char(c: char) -> Self {
        Self { key: KeyCode::Char(c), control: false }
    }

    #[cfg(test)]
    fn control_char(c: char) -> Self {
        Self { key: KeyCode::Char(c), control: true }
    }
}

#[cfg(test)]
impl From<KeyCode> for KeyCombination {
    fn from(key: KeyCode) -> Self {
        Self { key, control: false }
    }
}
