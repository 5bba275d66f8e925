use crate::{commands::keyboard::KeyBinding, navigation::BoundaryPolicy};
use serde::Deserialize;
use std::{
    fs, io,
    path::{Path, PathBuf},
};

#[derive(Clone, Debug, Default, Deserialize)]
#[cfg_attr(feature = "json-schema", derive(schemars::JsonSchema))]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// The default configuration for the presentation.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    #[serde(default)]
    pub options: OptionsConfig,

    #[serde(default)]
    pub bindings: KeyBindingsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load the config from a path.
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(ConfigLoadError::NotFound),
            Err(e) => return Err(e.into()),
        };
        let config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("io: {0}")]
    Io(#[from] io::Error),

    #[error("config file not found")]
    NotFound,

    #[error("invalid configuration: {0}")]
    Invalid(#[from] serde_yaml::Error),
}

#[derive(Clone, Debug, Deserialize)]
#[cfg_attr(feature = "json-schema", derive(schemars::JsonSchema))]
#[serde(deny_unknown_fields)]
pub struct DefaultsConfig {
    /// The theme to use unless overridden in the command line.
    pub theme: Option<String>,

    /// A max width in columns that the presentation must always be capped to.
    #[serde(default = "default_max_columns")]
    pub max_columns: u16,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self { theme: None, max_columns: default_max_columns() }
    }
}

pub(crate) fn default_max_columns() -> u16 {
    u16::MAX
}

#[derive(Clone, Debug, Default, Deserialize)]
#[cfg_attr(feature = "json-schema", derive(schemars::JsonSchema))]
#[serde(deny_unknown_fields)]
pub struct OptionsConfig {
    /// Whether moving past the last slide goes back to the first one and vice versa.
    pub wrap_navigation: Option<bool>,
}

impl OptionsConfig {
    pub fn boundary_policy(&self) -> BoundaryPolicy {
        match self.wrap_navigation {
            Some(true) => BoundaryPolicy::Wrap,
            _ => BoundaryPolicy::Stop,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[cfg_attr(feature = "json-schema", derive(schemars::JsonSchema))]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// The file to write logs to. Nothing is logged unless this is set.
    pub path: Option<PathBuf>,

    /// The log filter to use, in `RUST_LOG` syntax.
    pub level: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[cfg_attr(feature = "json-schema", derive(schemars::JsonSchema))]
#[serde(deny_unknown_fields)]
pub struct KeyBindingsConfig {
    /// The keys that move to the next slide.
    #[serde(default = "default_next_bindings")]
    pub(crate) next: Vec<KeyBinding>,

    /// The keys that move to the previous slide.
    #[serde(default = "default_previous_bindings")]
    pub(crate) previous: Vec<KeyBinding>,

    /// The keys that go back to the first slide.
    #[serde(default = "default_restart_bindings")]
    pub(crate) restart: Vec<KeyBinding>,

    /// The key binding to jump to the last slide.
    #[serde(default = "default_last_slide_bindings")]
    pub(crate) last_slide: Vec<KeyBinding>,

    /// The key binding to jump to a specific slide.
    #[serde(default = "default_go_to_slide_bindings")]
    pub(crate) go_to_slide: Vec<KeyBinding>,

    /// The keys that scroll the slide's body down when it doesn't fit in the screen.
    #[serde(default = "default_scroll_down_bindings")]
    pub(crate) scroll_down: Vec<KeyBinding>,

    /// The keys that scroll the slide's body up.
    #[serde(default = "default_scroll_up_bindings")]
    pub(crate) scroll_up: Vec<KeyBinding>,

    /// The key binding to toggle the slide index modal.
    #[serde(default = "default_toggle_index_bindings")]
    pub(crate) toggle_slide_index: Vec<KeyBinding>,

    /// The key binding to toggle the key bindings modal.
    #[serde(default = "default_toggle_bindings_modal_bindings")]
    pub(crate) toggle_bindings: Vec<KeyBinding>,

    /// The key binding to close the currently open modal.
    #[serde(default = "default_close_modal_bindings")]
    pub(crate) close_modal: Vec<KeyBinding>,

    /// The key binding to close the application.
    #[serde(default = "default_exit_bindings")]
    pub(crate) exit: Vec<KeyBinding>,
}

impl Default for KeyBindingsConfig {
    fn default() -> Self {
        Self {
            next: default_next_bindings(),
            previous: default_previous_bindings(),
            restart: default_restart_bindings(),
            last_slide: default_last_slide_bindings(),
            go_to_slide: default_go_to_slide_bindings(),
            scroll_down: default_scroll_down_bindings(),
            scroll_up: default_scroll_up_bindings(),
            toggle_slide_index: default_toggle_index_bindings(),
            toggle_bindings: default_toggle_bindings_modal_bindings(),
            close_modal: default_close_modal_bindings(),
            exit: default_exit_bindings(),
        }
    }
}

fn make_keybindings<const N: usize>(raw_bindings: [&str; N]) -> Vec<KeyBinding> {
    let mut bindings = Vec::new();
    for binding in raw_bindings {
        bindings.push(binding.parse().expect("invalid binding"));
    }
    bindings
}

fn default_next_bindings() -> Vec<KeyBinding> {
    make_keybindings(["l", "<right>", "<page_down>", " "])
}

fn default_previous_bindings() -> Vec<KeyBinding> {
    make_keybindings(["h", "<left>", "<page_up>"])
}

fn default_restart_bindings() -> Vec<KeyBinding> {
    make_keybindings(["gg", "r", "<home>"])
}

fn default_last_slide_bindings() -> Vec<KeyBinding> {
    make_keybindings(["G", "<end>"])
}

fn default_go_to_slide_bindings() -> Vec<KeyBinding> {
    make_keybindings(["<number>G"])
}

fn default_scroll_down_bindings() -> Vec<KeyBinding> {
    make_keybindings(["j", "<down>"])
}

fn default_scroll_up_bindings() -> Vec<KeyBinding> {
    make_keybindings(["k", "<up>"])
}

fn default_toggle_index_bindings() -> Vec<KeyBinding> {
    make_keybindings(["<c-p>"])
}

fn default_toggle_bindings_modal_bindings() -> Vec<KeyBinding> {
    make_keybindings(["?"])
}

fn default_close_modal_bindings() -> Vec<KeyBinding> {
    make_keybindings(["<esc>"])
}

fn default_exit_bindings() -> Vec<KeyBinding> {
    make_keybindings(["<c-c>", "q"])
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::commands::keyboard::CommandKeyBindings;
    use std::io::Write;

    #[test]
    fn default_bindings() {
        let config = KeyBindingsConfig::default();
        CommandKeyBindings::try_from(config).expect("construction failed");
    }

    #[test]
    fn default_options_serde() {
        let options = serde_yaml::from_str::<'_, OptionsConfig>("wrap_navigation: true").expect("failed to parse");
        assert_eq!(options.boundary_policy(), BoundaryPolicy::Wrap);
    }

    #[test]
    fn boundary_policy_defaults_to_stop() {
        assert_eq!(OptionsConfig::default().boundary_policy(), BoundaryPolicy::Stop);
    }

    #[test]
    fn partial_bindings() {
        let config: KeyBindingsConfig = serde_yaml::from_str("next: [\"n\"]").expect("failed to parse");
        assert_eq!(config.next, vec!["n".parse::<KeyBinding>().unwrap()]);
        assert_eq!(config.previous, default_previous_bindings());
    }

    #[test]
    fn unknown_fields_rejected() {
        serde_yaml::from_str::<'_, Config>("potato: 42").expect_err("parsed unknown field");
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("failed to create file");
        writeln!(file, "defaults:\n  theme: light\nlogging:\n  level: debug").expect("failed to write");
        let config = Config::load(file.path()).expect("failed to load");
        assert_eq!(config.defaults.theme.as_deref(), Some("light"));
        assert_eq!(config.defaults.max_columns, u16::MAX);
        assert_eq!(config.logging.level.as_deref(), Some("debug"));
    }

    #[test]
    fn load_missing_file() {
        let dir = tempfile::tempdir().expect("failed to create dir");
        let result = Config::load(&dir.path().join("config.yaml"));
        assert!(matches!(result, Err(ConfigLoadError::NotFound)));
    }
}
