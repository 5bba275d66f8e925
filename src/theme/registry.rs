use super::PresentationTheme;
use itertools::Itertools;
use std::{collections::BTreeMap, fs, io, path::Path};

include!(concat!(env!("OUT_DIR"), "/themes.rs"));

/// The themes available to a presentation: the built-in ones plus any found in the user's
/// themes directory.
#[derive(Default)]
pub struct PresentationThemeRegistry {
    custom_themes: BTreeMap<String, PresentationTheme>,
}

impl PresentationThemeRegistry {
    /// Loads a theme from its name.
    pub fn load_by_name(&self, name: &str) -> Option<PresentationTheme> {
        match THEMES.get(name) {
            Some(contents) => {
                // Built-in themes are validated by the tests down here.
                let theme = serde_yaml::from_slice(contents).expect("corrupted theme");
                Some(theme)
            }
            None => self.custom_themes.get(name).cloned(),
        }
    }

    /// Register all the themes in the given directory.
    ///
    /// A directory that doesn't exist contains no themes.
    pub fn register_from_directory<P: AsRef<Path>>(&mut self, path: P) -> Result<(), LoadThemeError> {
        let handle = match fs::read_dir(&path) {
            Ok(handle) => handle,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e.into()),
        };
        for entry in handle {
            let entry = entry?;
            let metadata = entry.metadata()?;
            let Some(file_name) = entry.file_name().to_str().map(ToOwned::to_owned) else {
                continue;
            };
            let Some(theme_name) = file_name.strip_suffix(".yaml") else {
                continue;
            };
            if !metadata.is_file() {
                continue;
            }
            if THEMES.contains_key(theme_name) {
                return Err(LoadThemeError::Duplicate(theme_name.into()));
            }
            let theme = PresentationTheme::from_path(entry.path())?;
            tracing::debug!("registered theme {theme_name} from {}", entry.path().display());
            self.custom_themes.insert(theme_name.into(), theme);
        }
        Ok(())
    }

    /// Get all the registered theme names.
    pub fn theme_names(&self) -> Vec<String> {
        let builtin_themes = THEMES.keys().map(|name| name.to_string());
        self.custom_themes.keys().cloned().chain(builtin_themes).sorted().collect()
    }
}

/// An error loading a presentation theme.
#[derive(thiserror::Error, Debug)]
pub enum LoadThemeError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("theme '{0}' is corrupted: {1}")]
    Corrupted(String, Box<dyn std::error::Error>),

    #[error("duplicate custom theme '{0}'")]
    Duplicate(String),
}

#[cfg(test)]
mod test {
    use super::*;
    use std::fs::File;
    use tempfile::tempdir;

    fn write_theme(name: &str, directory: &Path) {
        let theme = PresentationTheme::default();
        let contents = format!("code:\n  margin: {}", theme.code.margin + 1);
        fs::write(directory.join(format!("{name}.yaml")), contents).expect("writing theme failed");
    }

    #[test]
    fn validate_builtin_themes() {
        let registry = PresentationThemeRegistry::default();
        for theme_name in THEMES.keys() {
            let Some(theme) = registry.load_by_name(theme_name) else {
                panic!("theme '{theme_name}' is corrupted");
            };
            // Every built-in theme must tell disabled controls apart.
            assert_ne!(theme.controls.enabled, theme.controls.disabled, "theme '{theme_name}'");
        }
    }

    #[test]
    fn builtin_names() {
        let registry = PresentationThemeRegistry::default();
        assert_eq!(registry.theme_names(), &["dark", "light"]);
    }

    #[test]
    fn load_custom() {
        let directory = tempdir().expect("creating tempdir");
        write_theme("potato", directory.path());
        File::create(directory.path().join("readme.md")).expect("creating file");

        let mut registry = PresentationThemeRegistry::default();
        registry.register_from_directory(directory.path()).expect("loading failed");
        let theme = registry.load_by_name("potato").expect("theme not found");
        assert_eq!(theme.code.margin, 3);
        assert_eq!(registry.theme_names(), &["dark", "light", "potato"]);
    }

    #[test]
    fn missing_directory() {
        let directory = tempdir().expect("creating tempdir");
        let mut registry = PresentationThemeRegistry::default();
        registry.register_from_directory(directory.path().join("nope")).expect("loading failed");
        assert_eq!(registry.theme_names().len(), 2);
    }

    #[test]
    fn duplicate_builtin() {
        let directory = tempdir().expect("creating tempdir");
        write_theme("dark", directory.path());
        let mut registry = PresentationThemeRegistry::default();
        let result = registry.register_from_directory(directory.path());
        assert!(matches!(result, Err(LoadThemeError::Duplicate(name)) if name == "dark"));
    }

    #[test]
    fn corrupted_theme() {
        let directory = tempdir().expect("creating tempdir");
        fs::write(directory.path().join("broken.yaml"), "code: 42").expect("writing theme failed");
        let mut registry = PresentationThemeRegistry::default();
        let result = registry.register_from_directory(directory.path());
        assert!(matches!(result, Err(LoadThemeError::Corrupted(..))));
    }
}
