#![deny(missing_docs)]

//! # Exactification
//!
//! Lowers path templates and concrete paths into *exact forms*: segment
//! sequences with placeholders widened to literal sets or wildcards. Two
//! paths are the same route when either exact form subsumes the other across
//! all segments simultaneously.

use crate::oas::models::{ParamWidening, PathTemplate};
use std::fmt;

/// One widened path segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A fixed path chunk, matched verbatim.
    Literal(String),
    /// A bounded literal set from an `enum`/`const` parameter schema.
    Choice(Vec<String>),
    /// A numeric primitive parameter: accepts tokens that parse as numbers.
    Number,
    /// Any string-or-number token.
    Any,
}

/// A path lowered to widened segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExactForm {
    segments: Vec<Token>,
}

impl ExactForm {
    /// Exactifies a declared template: placeholders widen per their declared
    /// parameter schema, one segment at a time, left to right.
    pub fn of_template(template: &PathTemplate) -> ExactForm {
        let segments = split_segments(&template.path)
            .map(|segment| match placeholder_name(segment) {
                Some(name) => match template.param(name).map(|p| &p.widening) {
                    Some(ParamWidening::Choice(values)) => Token::Choice(values.clone()),
                    Some(ParamWidening::Numeric) => Token::Number,
                    _ => Token::Any,
                },
                None if segment.contains('{') => Token::Any,
                None => Token::Literal(segment.to_string()),
            })
            .collect();
        ExactForm { segments }
    }

    /// Exactifies a caller-supplied concrete path. Bracketed segments (the
    /// editor-completion form) widen to the any-token wildcard.
    pub fn of_concrete(path: &str) -> ExactForm {
        let segments = split_segments(path)
            .map(|segment| {
                if placeholder_name(segment).is_some() || segment.contains('{') {
                    Token::Any
                } else {
                    Token::Literal(segment.to_string())
                }
            })
            .collect();
        ExactForm { segments }
    }

    /// True when every token of `other` is accepted by the matching token of
    /// `self` — whole-path subsumption in one fixed direction.
    pub fn subsumes(&self, other: &ExactForm) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|(a, b)| segment_subsumes(a, b))
    }

    /// Structural compatibility in either direction, not identity.
    pub fn equivalent(&self, other: &ExactForm) -> bool {
        self.subsumes(other) || other.subsumes(self)
    }
}

impl fmt::Display for ExactForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.segments {
            write!(f, "/")?;
            match token {
                Token::Literal(s) => write!(f, "{}", s)?,
                Token::Choice(values) => write!(f, "({})", values.join("|"))?,
                Token::Number => write!(f, "{{number}}")?,
                Token::Any => write!(f, "{{string|number}}")?,
            }
        }
        Ok(())
    }
}

fn split_segments(path: &str) -> impl Iterator<Item = &str> {
    path.trim_start_matches('/').split('/')
}

fn placeholder_name(segment: &str) -> Option<&str> {
    segment
        .strip_prefix('{')
        .and_then(|rest| rest.strip_suffix('}'))
}

fn segment_subsumes(a: &Token, b: &Token) -> bool {
    match (a, b) {
        (Token::Any, _) => true,
        (Token::Literal(x), Token::Literal(y)) => x == y,
        (Token::Number, Token::Literal(y)) => is_numeric_token(y),
        (Token::Number, Token::Number) => true,
        (Token::Choice(set), Token::Literal(y)) => set.iter().any(|v| v == y),
        (Token::Choice(set), Token::Choice(subset)) => {
            subset.iter().all(|v| set.iter().any(|w| w == v))
        }
        _ => false,
    }
}

/// Whether a path token has a numeric shape.
///
/// The original accepted any token where a numeric parameter was declared and
/// flagged that as a pending fix; this adopts the stricter behavior.
fn is_numeric_token(token: &str) -> bool {
    !token.is_empty() && token.parse::<f64>().is_ok()
}
