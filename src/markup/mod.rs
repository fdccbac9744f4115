//! Declarative markup: tokenizer and parser for HTML fragments.
//!
//! Markup is the declarative front door of the runtime: a fragment such as
//! `<aui-tabs value="a">...</aui-tabs>` becomes light-DOM nodes whose
//! attributes are the components' initial configuration.

pub mod parser;
pub mod tokenizer;

pub use parser::parse_into;
pub use tokenizer::{tokenize, MarkupToken};

/// Errors produced while parsing markup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MarkupError {
    #[error("unterminated tag <{0}>")]
    UnterminatedTag(String),

    #[error("unterminated comment")]
    UnterminatedComment,

    #[error("stray '=' in tag <{0}>")]
    StrayEquals(String),

    #[error("closing tag </{found}> does not match open tag <{expected}>")]
    MismatchedClose { expected: String, found: String },

    #[error("closing tag </{0}> has no matching open tag")]
    UnmatchedClose(String),

    #[error("tag <{0}> is never closed")]
    Unclosed(String),
}
