// Token labels for Markdown source, derived from pulldown-cmark's offset iterator

use pulldown_cmark::{Event, Options, Parser, Tag};
use std::ops::Range;

/// A labelled byte range of the source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSpan {
    pub range: Range<usize>,
    pub label: &'static str,
}

fn label_for(tag: &Tag<'_>) -> Option<&'static str> {
    match tag {
        Tag::Strong => Some("strong"),
        Tag::Emphasis => Some("em"),
        Tag::BlockQuote(_) => Some("atom"),
        Tag::Item => Some("variable-2"),
        Tag::Link { .. } => Some("link"),
        Tag::Image { .. } => Some("image"),
        Tag::Heading { .. } => Some("header"),
        Tag::CodeBlock(_) => Some("comment"),
        _ => None,
    }
}

/// Scan `source` and collect the spans of every labelled element
pub fn token_spans(source: &str) -> Vec<TokenSpan> {
    let mut spans = Vec::new();

    for (event, range) in Parser::new_ext(source, Options::empty()).into_offset_iter() {
        let label = match &event {
            Event::Start(tag) => label_for(tag),
            Event::Code(_) => Some("comment"),
            _ => None,
        };
        if let Some(label) = label {
            spans.push(TokenSpan { range, label });
        }
    }

    spans
}

/// Labels of all spans containing the byte at `offset`, outermost first
pub fn labels_at(spans: &[TokenSpan], offset: usize) -> Vec<&'static str> {
    let mut labels: Vec<&'static str> = Vec::new();
    for span in spans.iter().filter(|span| span.range.contains(&offset)) {
        if !labels.contains(&span.label) {
            labels.push(span.label);
        }
    }
    labels
}
