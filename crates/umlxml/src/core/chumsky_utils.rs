//! Shared chumsky parser utilities for diagram parsing
//!
//! Line-level combinators used by the class diagram statement and member
//! grammars. Input is always a single trimmed line, so none of these
//! consume newlines.

use chumsky::prelude::*;

/// Parse inline whitespace only (spaces and tabs, no newlines).
pub fn inline_whitespace<'src>() -> impl Parser<'src, &'src str, ()> + Clone {
    one_of(" \t").repeated().ignored()
}

/// Parse at least one space or tab.
pub fn inline_whitespace_required<'src>() -> impl Parser<'src, &'src str, ()> + Clone {
    one_of(" \t").repeated().at_least(1).ignored()
}

/// Parse a word: one or more alphanumeric characters or underscores.
///
/// Unicode letters are accepted, so `Dirección` or `año` are single words.
pub fn word<'src>() -> impl Parser<'src, &'src str, &'src str> + Clone {
    any()
        .filter(|c: &char| c.is_alphanumeric() || *c == '_')
        .repeated()
        .at_least(1)
        .to_slice()
}

/// Parse a double-quoted token and yield its (possibly empty) contents.
pub fn quoted<'src>() -> impl Parser<'src, &'src str, &'src str> + Clone {
    just('"')
        .ignore_then(none_of('"').repeated().to_slice())
        .then_ignore(just('"'))
}

/// Parse an optional trailing `: label`, discarding it.
pub fn trailing_label<'src>() -> impl Parser<'src, &'src str, ()> + Clone {
    inline_whitespace()
        .ignore_then(just(':'))
        .ignore_then(any().repeated())
        .ignored()
        .or_not()
        .ignored()
}
