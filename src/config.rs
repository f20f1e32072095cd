// User configuration, stored as TOML in the platform config directory

use crate::action::Action;
use crate::markers::{MarkerTable, MarkupOptions};
use crate::shortcuts::Keymap;
use crate::toggle::Toggler;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::{fs, io};
use thiserror::Error;

const QUALIFIER: &str = "";
const ORGANIZATION: &str = "";
const APPLICATION: &str = "mdtoggle";
const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("keymap binds `{chord}` to unknown action `{action}`")]
    UnknownAction { chord: String, action: String },
    #[error("toml serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("failed to write config file {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// Contents of `config.toml`. Every section is optional.
///
/// ```toml
/// [markup]
/// bullet = "-"
/// link_placeholder = "https://"
///
/// [keymap]
/// "Cmd-Shift-L" = "toggle-unordered-list"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub markup: MarkupOptions,
    /// Extra chord bindings layered over the defaults, chord to action name
    pub keymap: BTreeMap<String, String>,
}

impl Config {
    pub fn from_toml(path: &Path, contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Default keymap with the configured bindings applied on top
    pub fn keymap(&self) -> Result<Keymap, ConfigError> {
        let mut keymap = Keymap::default();
        for (chord, name) in &self.keymap {
            let action = name
                .parse::<Action>()
                .map_err(|_| ConfigError::UnknownAction {
                    chord: chord.clone(),
                    action: name.clone(),
                })?;
            keymap.bind(chord, action);
        }
        Ok(keymap)
    }

    pub fn toggler(&self) -> Toggler {
        Toggler::new(MarkerTable::new(&self.markup))
    }
}

pub fn config_file_path() -> Option<PathBuf> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

/// Load the config at `path`. A missing file yields the defaults.
pub fn load(path: &Path) -> Result<Config, ConfigError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    Config::from_toml(path, &contents)
}

pub fn save(path: &Path, config: &Config) -> Result<(), ConfigError> {
    let write_err = |source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    let toml = toml::to_string_pretty(config)?;
    fs::write(path, toml).map_err(write_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markers::Bullet;
    use crate::shortcuts::Platform;

    fn parse(contents: &str) -> Result<Config, ConfigError> {
        Config::from_toml(Path::new("config.toml"), contents)
    }

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(parse("").unwrap(), Config::default());
    }

    #[test]
    fn test_markup_and_keymap_sections() {
        let config = parse(
            r#"
            [markup]
            bullet = "-"

            [keymap]
            "Ctrl-Shift-8" = "toggle-unordered-list"
            "Cmd-B" = "toggle-italic"
            "#,
        )
        .unwrap();

        assert_eq!(config.markup.bullet, Bullet::Dash);
        assert_eq!(config.markup.link_placeholder, "http://");

        let keymap = config.keymap().unwrap();
        assert_eq!(
            keymap.lookup("Ctrl-Shift-8", Platform::Other),
            Some(Action::ToggleUnorderedList)
        );
        assert_eq!(keymap.lookup("Ctrl-B", Platform::Other), Some(Action::ToggleItalic));
    }

    #[test]
    fn test_unknown_bullet_is_rejected() {
        let err = parse("[markup]\nbullet = \"#\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }), "{err}");
    }

    #[test]
    fn test_unknown_action_is_rejected() {
        let config = parse("[keymap]\n\"Cmd-J\" = \"toggle-strike\"\n").unwrap();
        let err = config.keymap().unwrap_err();
        assert_eq!(
            err.to_string(),
            "keymap binds `Cmd-J` to unknown action `toggle-strike`"
        );
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let path = std::env::temp_dir().join("mdtoggle-does-not-exist/config.toml");
        assert_eq!(load(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = std::env::temp_dir().join(format!("mdtoggle-config-{}", std::process::id()));
        let path = dir.join(CONFIG_FILE_NAME);

        let mut config = Config::default();
        config.markup.bullet = Bullet::Plus;
        config
            .keymap
            .insert("Cmd-Shift-7".to_string(), "toggle-ordered-list".to_string());

        save(&path, &config).unwrap();
        assert_eq!(load(&path).unwrap(), config);
        let _ = fs::remove_dir_all(&dir);
    }
}
