// Toggle engines
// Each toggle classifies the selection start, then either inserts or strips markup

use crate::action::Action;
use crate::host::{CursorEnd, TextHost, split_at_column};
use crate::markers::MarkerTable;
use crate::state::classify;
use crate::style::Style;

/// What a toggle ended up doing to the buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Inserted,
    Removed,
    /// Passed straight through to the host (undo, redo)
    Delegated,
    /// The style has no marker of the kind the toggle handles
    Unsupported,
}

/// Applies markup toggles to a host using a fixed marker table
#[derive(Debug, Clone, Default)]
pub struct Toggler {
    markers: MarkerTable,
}

impl Toggler {
    pub fn new(markers: MarkerTable) -> Self {
        Toggler { markers }
    }

    /// Run a toolbar or keyboard action
    pub fn apply<H: TextHost + ?Sized>(&self, host: &mut H, action: Action) -> Outcome {
        match action {
            Action::ToggleBold => self.toggle_inline(host, Style::Bold),
            Action::ToggleItalic => self.toggle_inline(host, Style::Italic),
            Action::DrawLink => self.draw(host, Style::Link),
            Action::DrawImage => self.draw(host, Style::Image),
            Action::ToggleBlockquote => self.toggle_line_prefix(host, Style::Quote),
            Action::ToggleOrderedList => self.toggle_line_prefix(host, Style::OrderedList),
            Action::ToggleUnorderedList => self.toggle_line_prefix(host, Style::UnorderedList),
            Action::Undo => {
                host.undo();
                host.focus();
                Outcome::Delegated
            }
            Action::Redo => {
                host.redo();
                host.focus();
                Outcome::Delegated
            }
        }
    }

    /// Toggle a wrapping marker (bold or italic) at the selection.
    ///
    /// When the style is already active the marker pair surrounding the
    /// selection start is stripped from the whole line; otherwise the selected
    /// text is wrapped. The selection moves with the text in both cases.
    pub fn toggle_inline<H: TextHost + ?Sized>(&self, host: &mut H, style: Style) -> Outcome {
        let Some(marker) = self.markers.inline(style) else {
            tracing::warn!(%style, "no inline marker for style");
            return Outcome::Unsupported;
        };

        let active = classify(&*host, None).contains(style);
        let start = host.cursor(CursorEnd::Start);
        let end = host.cursor(CursorEnd::End);
        tracing::debug!(%style, active, %start, %end, "toggling inline marker");

        let (start, end, outcome) = if active {
            let text = host.line(start.line);
            let (head, tail) = split_at_column(&text, start.column);
            let rewritten = format!(
                "{}{}",
                marker.strip_before_caret(head),
                marker.strip_after_caret(tail)
            );
            host.set_line(start.line, &rewritten);
            (
                start.shifted_left(marker.width()),
                end.shifted_left(marker.width()),
                Outcome::Removed,
            )
        } else {
            let text = host.selection();
            host.replace_selection(&marker.wrap(&text));
            (
                start.shifted_right(marker.width()),
                end.shifted_right(marker.width()),
                Outcome::Inserted,
            )
        };

        host.set_selection(start, end);
        host.focus();
        outcome
    }

    /// Toggle a line prefix (quote or list) on every line the selection touches.
    ///
    /// The style is looked up once at the selection start and that answer is
    /// used for all lines, so a mixed block gets prefixed again rather than
    /// cleaned up. Selection columns are left as they were.
    pub fn toggle_line_prefix<H: TextHost + ?Sized>(&self, host: &mut H, style: Style) -> Outcome {
        let Some(marker) = self.markers.line(style) else {
            tracing::warn!(%style, "no line marker for style");
            return Outcome::Unsupported;
        };

        let active = classify(&*host, None).contains(style);
        let start = host.cursor(CursorEnd::Start);
        let end = host.cursor(CursorEnd::End);
        tracing::debug!(%style, active, first = start.line, last = end.line, "toggling line prefix");

        for line in start.line..=end.line {
            let text = host.line(line);
            let text = if active {
                marker.strip(&text)
            } else {
                marker.prefix(&text)
            };
            host.set_line(line, &text);
        }

        host.focus();
        if active {
            Outcome::Removed
        } else {
            Outcome::Inserted
        }
    }

    /// Wrap the selection in a `before`/`after` pair, or strip the pair
    /// around the selection when `active` is set.
    ///
    /// Stripping is all or nothing: `before` must end the text left of the
    /// selection and `after` must start the text right of it.
    pub fn wrap_selection<H: TextHost + ?Sized>(
        &self,
        host: &mut H,
        active: bool,
        before: &str,
        after: &str,
    ) -> Outcome {
        let mut start = host.cursor(CursorEnd::Start);
        let mut end = host.cursor(CursorEnd::End);
        tracing::debug!(before, after, active, %start, "wrapping selection");

        let outcome = if active {
            let first = host.line(start.line);
            let last = if end.line == start.line {
                first.clone()
            } else {
                host.line(end.line)
            };
            let (head, inner_first) = split_at_column(&first, start.column);
            let (inner_last, tail) = split_at_column(&last, end.column);

            match (head.strip_suffix(before), tail.strip_prefix(after)) {
                (Some(head), Some(tail)) => {
                    let width = before.chars().count();
                    if end.line == start.line {
                        let (inner, _) = split_at_column(inner_first, end.column - start.column);
                        host.set_line(start.line, &format!("{head}{inner}{tail}"));
                        end = end.shifted_left(width);
                    } else {
                        host.set_line(end.line, &format!("{inner_last}{tail}"));
                        host.set_line(start.line, &format!("{head}{inner_first}"));
                    }
                    start = start.shifted_left(width);
                }
                _ => tracing::debug!(before, after, "selection is not wrapped in the pair"),
            }
            Outcome::Removed
        } else {
            let text = host.selection();
            host.replace_selection(&format!("{before}{text}{after}"));
            let width = before.chars().count();
            start = start.shifted_right(width);
            end = end.shifted_right(width);
            Outcome::Inserted
        };

        host.set_selection(start, end);
        host.focus();
        outcome
    }

    /// Draw a link or image around the selection
    fn draw<H: TextHost + ?Sized>(&self, host: &mut H, style: Style) -> Outcome {
        let Some(marker) = self.markers.wrap(style) else {
            return Outcome::Unsupported;
        };
        // the classifier does not report links or images, so this inserts
        let active = classify(&*host, None).contains(style);
        self.wrap_selection(host, active, &marker.before, &marker.after)
    }
}
