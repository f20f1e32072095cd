use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A Markdown markup style the toolbar can toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Style {
    Bold,
    Italic,
    Quote,
    UnorderedList,
    OrderedList,
    Link,
    Image,
}

impl Style {
    pub const ALL: [Style; 7] = [
        Style::Bold,
        Style::Italic,
        Style::Quote,
        Style::UnorderedList,
        Style::OrderedList,
        Style::Link,
        Style::Image,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Style::Bold => "bold",
            Style::Italic => "italic",
            Style::Quote => "quote",
            Style::UnorderedList => "unordered-list",
            Style::OrderedList => "ordered-list",
            Style::Link => "link",
            Style::Image => "image",
        }
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown style `{0}`")]
pub struct UnknownStyle(pub String);

impl FromStr for Style {
    type Err = UnknownStyle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Style::ALL
            .into_iter()
            .find(|style| style.name() == s)
            .ok_or_else(|| UnknownStyle(s.to_string()))
    }
}

/// The styles active at one position. Computed per call, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StyleSet(u8);

impl StyleSet {
    pub const fn new() -> Self {
        StyleSet(0)
    }

    pub fn insert(&mut self, style: Style) {
        self.0 |= style.bit();
    }

    pub fn contains(&self, style: Style) -> bool {
        self.0 & style.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Style> + '_ {
        Style::ALL.into_iter().filter(move |style| self.contains(*style))
    }
}

impl FromIterator<Style> for StyleSet {
    fn from_iter<I: IntoIterator<Item = Style>>(iter: I) -> Self {
        let mut set = StyleSet::new();
        for style in iter {
            set.insert(style);
        }
        set
    }
}

impl fmt::Display for StyleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(Style::name).collect();
        f.write_str(&names.join(" "))
    }
}
