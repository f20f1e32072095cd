// Reference text host: gap buffer, Markdown token labels and a document tying them together

pub mod document;
pub mod text_buffer;
pub mod tokens;

pub use document::MarkdownDocument;
