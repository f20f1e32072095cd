use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Logical editor actions a toolbar button or key chord can invoke
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    ToggleBold,
    ToggleItalic,
    DrawLink,
    DrawImage,
    ToggleBlockquote,
    ToggleOrderedList,
    ToggleUnorderedList,
    Undo,
    Redo,
}

impl Action {
    pub const ALL: [Action; 9] = [
        Action::ToggleBold,
        Action::ToggleItalic,
        Action::DrawLink,
        Action::DrawImage,
        Action::ToggleBlockquote,
        Action::ToggleOrderedList,
        Action::ToggleUnorderedList,
        Action::Undo,
        Action::Redo,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Action::ToggleBold => "toggle-bold",
            Action::ToggleItalic => "toggle-italic",
            Action::DrawLink => "draw-link",
            Action::DrawImage => "draw-image",
            Action::ToggleBlockquote => "toggle-blockquote",
            Action::ToggleOrderedList => "toggle-ordered-list",
            Action::ToggleUnorderedList => "toggle-unordered-list",
            Action::Undo => "undo",
            Action::Redo => "redo",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown action `{0}`")]
pub struct UnknownAction(pub String);

impl FromStr for Action {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|action| action.name() == s)
            .ok_or_else(|| UnknownAction(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_match_serde() {
        #[derive(Deserialize)]
        struct Binding {
            action: Action,
        }

        for action in Action::ALL {
            let binding: Binding =
                toml::from_str(&format!("action = \"{}\"", action.name())).unwrap();
            assert_eq!(binding.action, action);
            assert_eq!(action.name().parse(), Ok(action));
        }
    }

    #[test]
    fn test_unknown_action() {
        let err = "toggle-strike".parse::<Action>().unwrap_err();
        assert_eq!(err.to_string(), "unknown action `toggle-strike`");
    }
}
