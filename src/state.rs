use crate::host::{CursorEnd, Position, TextHost};
use crate::markers::ORDERED_ITEM;
use crate::style::{Style, StyleSet};

/// Styles active at `pos`, or at the selection start when no position is given.
///
/// Only the token labels reported by the host are consulted. A list label is
/// resolved to ordered or unordered by looking at the text of its line.
pub fn classify<H: TextHost + ?Sized>(host: &H, pos: Option<Position>) -> StyleSet {
    let pos = pos.unwrap_or_else(|| host.cursor(CursorEnd::Start));
    let labels = host.token_labels(pos);

    let mut styles = StyleSet::new();
    for label in labels.iter().flat_map(|l| l.split_whitespace()) {
        match label {
            "strong" => styles.insert(Style::Bold),
            "em" => styles.insert(Style::Italic),
            "atom" => styles.insert(Style::Quote),
            "variable-2" => {
                if ORDERED_ITEM.is_match(&host.line(pos.line)) {
                    styles.insert(Style::OrderedList);
                } else {
                    styles.insert(Style::UnorderedList);
                }
            }
            _ => {}
        }
    }

    tracing::trace!(%pos, ?labels, %styles, "classified position");
    styles
}
