// Style-to-marker table
// Every style keeps the text it inserts next to the pattern that detects and strips it

use crate::style::Style;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

// Inline markers accept either `*` or `_` on removal
static BOLD_BEFORE_CARET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*)?(\*|_){2}(\S+.*)?$").unwrap());
static BOLD_AFTER_CARET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*\S+)?(\*|_){2}(\s+.*)?$").unwrap());
static ITALIC_BEFORE_CARET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*)?(\*|_)(\S+.*)?$").unwrap());
static ITALIC_AFTER_CARET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*\S+)?(\*|_)(\s+.*)?$").unwrap());

static QUOTE_PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\s*)>\s+").unwrap());
static BULLET_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)(\*|-|\+)\s+").unwrap());
static NUMBER_PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\s*)\d+\.\s+").unwrap());

/// A line that reads as an ordered list item
pub static ORDERED_ITEM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*\d+\.\s").unwrap());

/// Character used when inserting an unordered list item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Bullet {
    #[default]
    #[serde(rename = "*")]
    Star,
    #[serde(rename = "-")]
    Dash,
    #[serde(rename = "+")]
    Plus,
}

impl Bullet {
    pub fn as_str(self) -> &'static str {
        match self {
            Bullet::Star => "*",
            Bullet::Dash => "-",
            Bullet::Plus => "+",
        }
    }
}

/// User adjustable parts of the inserted syntax
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkupOptions {
    pub bullet: Bullet,
    /// Target written into freshly drawn links and images
    pub link_placeholder: String,
}

impl Default for MarkupOptions {
    fn default() -> Self {
        MarkupOptions {
            bullet: Bullet::default(),
            link_placeholder: "http://".to_string(),
        }
    }
}

/// Wrapping marker for bold and italic
#[derive(Debug, Clone)]
pub struct InlineMarker {
    literal: &'static str,
    before_caret: Regex,
    after_caret: Regex,
}

impl InlineMarker {
    /// Number of columns the marker occupies
    pub fn width(&self) -> usize {
        self.literal.chars().count()
    }

    pub fn wrap(&self, text: &str) -> String {
        format!("{0}{text}{0}", self.literal)
    }

    /// Remove the last marker from the text left of the caret
    pub fn strip_before_caret(&self, head: &str) -> String {
        self.before_caret.replace(head, "${1}${3}").into_owned()
    }

    /// Remove the first marker from the text right of the caret
    pub fn strip_after_caret(&self, tail: &str) -> String {
        self.after_caret.replace(tail, "${1}${3}").into_owned()
    }
}

/// Line prefix marker for quotes and lists
#[derive(Debug, Clone)]
pub struct LineMarker {
    literal: String,
    pattern: Regex,
}

impl LineMarker {
    pub fn prefix(&self, line: &str) -> String {
        format!("{}{line}", self.literal)
    }

    /// Drop the marker, keeping any indentation in front of it
    pub fn strip(&self, line: &str) -> String {
        self.pattern.replace(line, "${1}").into_owned()
    }
}

/// Literal pair placed around the selection for links and images
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrapMarker {
    pub before: String,
    pub after: String,
}

/// Marker syntax for every style, built once and shared by all toggles
#[derive(Debug, Clone)]
pub struct MarkerTable {
    bold: InlineMarker,
    italic: InlineMarker,
    quote: LineMarker,
    unordered_list: LineMarker,
    ordered_list: LineMarker,
    link: WrapMarker,
    image: WrapMarker,
}

impl MarkerTable {
    pub fn new(options: &MarkupOptions) -> Self {
        let target_suffix = format!("]({})", options.link_placeholder);

        MarkerTable {
            bold: InlineMarker {
                literal: "**",
                before_caret: BOLD_BEFORE_CARET.clone(),
                after_caret: BOLD_AFTER_CARET.clone(),
            },
            italic: InlineMarker {
                literal: "*",
                before_caret: ITALIC_BEFORE_CARET.clone(),
                after_caret: ITALIC_AFTER_CARET.clone(),
            },
            quote: LineMarker {
                literal: "> ".to_string(),
                pattern: QUOTE_PREFIX.clone(),
            },
            unordered_list: LineMarker {
                literal: format!("{} ", options.bullet.as_str()),
                pattern: BULLET_PREFIX.clone(),
            },
            ordered_list: LineMarker {
                literal: "1. ".to_string(),
                pattern: NUMBER_PREFIX.clone(),
            },
            link: WrapMarker {
                before: "[".to_string(),
                after: target_suffix.clone(),
            },
            image: WrapMarker {
                before: "![".to_string(),
                after: target_suffix,
            },
        }
    }

    pub fn inline(&self, style: Style) -> Option<&InlineMarker> {
        match style {
            Style::Bold => Some(&self.bold),
            Style::Italic => Some(&self.italic),
            _ => None,
        }
    }

    pub fn line(&self, style: Style) -> Option<&LineMarker> {
        match style {
            Style::Quote => Some(&self.quote),
            Style::UnorderedList => Some(&self.unordered_list),
            Style::OrderedList => Some(&self.ordered_list),
            _ => None,
        }
    }

    pub fn wrap(&self, style: Style) -> Option<&WrapMarker> {
        match style {
            Style::Link => Some(&self.link),
            Style::Image => Some(&self.image),
            _ => None,
        }
    }
}

impl Default for MarkerTable {
    fn default() -> Self {
        MarkerTable::new(&MarkupOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_style_has_exactly_one_marker() {
        let table = MarkerTable::default();
        for style in Style::ALL {
            let kinds = [
                table.inline(style).is_some(),
                table.line(style).is_some(),
                table.wrap(style).is_some(),
            ];
            assert_eq!(kinds.iter().filter(|k| **k).count(), 1, "{style}");
        }
    }

    #[test]
    fn test_line_markers_detect_what_they_insert() {
        for bullet in [Bullet::Star, Bullet::Dash, Bullet::Plus] {
            let table = MarkerTable::new(&MarkupOptions {
                bullet,
                ..MarkupOptions::default()
            });
            for style in [Style::Quote, Style::UnorderedList, Style::OrderedList] {
                let marker = table.line(style).unwrap();
                let prefixed = marker.prefix("text");
                assert_ne!(prefixed, "text");
                assert_eq!(marker.strip(&prefixed), "text", "{style} with {bullet:?}");
            }
        }
    }

    #[test]
    fn test_line_strip_keeps_indentation() {
        let table = MarkerTable::default();
        let list = table.line(Style::UnorderedList).unwrap();
        assert_eq!(list.strip("   - nested"), "   nested");
        let ordered = table.line(Style::OrderedList).unwrap();
        assert_eq!(ordered.strip("  12.  twelfth"), "  twelfth");
        let quote = table.line(Style::Quote).unwrap();
        assert_eq!(quote.strip(">no space"), ">no space");
    }

    #[test]
    fn test_inline_strip_around_caret() {
        let table = MarkerTable::default();
        let bold = table.inline(Style::Bold).unwrap();
        assert_eq!(bold.strip_before_caret("say **"), "say ");
        assert_eq!(bold.strip_after_caret("hello** world"), "hello world");
        assert_eq!(bold.strip_before_caret("__hello"), "hello");

        let italic = table.inline(Style::Italic).unwrap();
        assert_eq!(italic.strip_before_caret("*"), "");
        assert_eq!(italic.strip_after_caret("world*"), "world");
    }

    #[test]
    fn test_inline_strip_needs_text_beside_marker() {
        let table = MarkerTable::default();
        let bold = table.inline(Style::Bold).unwrap();
        // nothing but whitespace after the marker: left alone
        assert_eq!(bold.strip_before_caret("a ** "), "a ** ");
    }

    #[test]
    fn test_link_placeholder_is_configurable() {
        let table = MarkerTable::new(&MarkupOptions {
            link_placeholder: "https://".to_string(),
            ..MarkupOptions::default()
        });
        assert_eq!(table.wrap(Style::Link).unwrap().after, "](https://)");
        assert_eq!(table.wrap(Style::Image).unwrap().before, "![");
    }

    #[test]
    fn test_ordered_item_pattern() {
        assert!(ORDERED_ITEM.is_match("  3. third"));
        assert!(!ORDERED_ITEM.is_match("* 1. not ordered"));
        assert!(!ORDERED_ITEM.is_match("1.no space"));
    }
}
