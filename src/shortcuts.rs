// Key chords for toolbar actions and their platform specific labels
// Chords are written with `Cmd` and rewritten to `Ctrl` off macOS

use crate::action::Action;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Mac,
    Other,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::Mac
        } else {
            Platform::Other
        }
    }
}

/// Use the platform's primary modifier: `Cmd` on macOS, `Ctrl` elsewhere
pub fn fix_shortcut(chord: &str, platform: Platform) -> String {
    match platform {
        Platform::Mac => chord.replacen("Ctrl", "Cmd", 1),
        Platform::Other => chord.replacen("Cmd", "Ctrl", 1),
    }
}

/// Tooltip text for a chord, with macOS modifier symbols
pub fn shortcut_label(chord: &str, platform: Platform) -> String {
    let label = fix_shortcut(chord, platform).replacen("Cmd", "⌘", 1);
    match platform {
        Platform::Mac => label.replacen("Alt", "⌥", 1),
        Platform::Other => label,
    }
}

const DEFAULT_BINDINGS: [(&str, Action); 7] = [
    ("Cmd-B", Action::ToggleBold),
    ("Cmd-I", Action::ToggleItalic),
    ("Cmd-K", Action::DrawLink),
    ("Cmd-Alt-I", Action::DrawImage),
    ("Cmd-'", Action::ToggleBlockquote),
    ("Cmd-Alt-L", Action::ToggleOrderedList),
    ("Cmd-L", Action::ToggleUnorderedList),
];

/// Chord to action bindings. Built once at startup and then only read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keymap {
    bindings: Vec<(String, Action)>,
}

impl Keymap {
    pub fn empty() -> Self {
        Keymap {
            bindings: Vec::new(),
        }
    }

    /// Bind `chord`, replacing whatever it was bound to before.
    /// `Ctrl-X` and `Cmd-X` name the same chord.
    pub fn bind(&mut self, chord: &str, action: Action) {
        let canonical = fix_shortcut(chord, Platform::Mac);
        match self
            .bindings
            .iter_mut()
            .find(|(bound, _)| fix_shortcut(bound, Platform::Mac) == canonical)
        {
            Some(binding) => binding.1 = action,
            None => self.bindings.push((chord.to_string(), action)),
        }
    }

    /// The action a pressed chord triggers
    pub fn lookup(&self, chord: &str, platform: Platform) -> Option<Action> {
        let pressed = fix_shortcut(chord, platform);
        self.bindings
            .iter()
            .find(|(bound, _)| fix_shortcut(bound, platform) == pressed)
            .map(|(_, action)| *action)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Action)> {
        self.bindings
            .iter()
            .map(|(chord, action)| (chord.as_str(), *action))
    }

    /// One line per binding, label then action name
    pub fn render(&self, platform: Platform) -> String {
        let labels: Vec<String> = self
            .bindings
            .iter()
            .map(|(chord, _)| shortcut_label(chord, platform))
            .collect();
        let width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);

        labels
            .iter()
            .zip(&self.bindings)
            .map(|(label, (_, action))| {
                let pad = width - label.chars().count();
                format!("{label}{:pad$}  {action}", "")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for Keymap {
    fn default() -> Self {
        let mut keymap = Keymap::empty();
        for (chord, action) in DEFAULT_BINDINGS {
            keymap.bind(chord, action);
        }
        keymap
    }
}
