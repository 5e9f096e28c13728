//! Error type definitions for the query compiler
//!
//! This module defines every error type the pipeline can raise, following a
//! hierarchical scheme: each stage has its own error enum, and all of them
//! roll up into [`ParseError`] via `#[from]` so the façade can return a
//! single uniform type.

use thiserror::Error;

/// Which pipeline stage produced a [`ParseError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Input exceeded the façade's length limit, before tokenization ran.
    Input,
    /// Malformed tokens: unterminated phrases, stray sigils, bad operators.
    Lexical,
    /// Unbalanced parens, empty groups, missing operands, duplicated options.
    Syntactic,
    /// Unrecognized field prefixes, out-of-range values.
    Semantic,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Input => write!(f, "input"),
            Stage::Lexical => write!(f, "lexical"),
            Stage::Syntactic => write!(f, "syntactic"),
            Stage::Semantic => write!(f, "semantic"),
        }
    }
}

/// Top-level compiler error type
///
/// This is the one error type the façade returns. It carries the stage that
/// failed, an optional source position, and a human-readable message
/// suitable for direct display in chat.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ParseError {
    pub stage: Stage,
    pub position: Option<usize>,
    pub message: String,
}

impl ParseError {
    pub fn new(stage: Stage, position: Option<usize>, message: impl Into<String>) -> Self {
        Self {
            stage,
            position,
            message: message.into(),
        }
    }

    /// Input exceeded the maximum accepted length.
    pub fn input_too_long(limit: usize) -> Self {
        Self::new(
            Stage::Input,
            None,
            format!("Input exceeds the maximum length of {limit} bytes"),
        )
    }

    pub fn lexical(position: usize, message: impl Into<String>) -> Self {
        Self::new(Stage::Lexical, Some(position), message)
    }

    pub fn syntactic(position: Option<usize>, message: impl Into<String>) -> Self {
        Self::new(Stage::Syntactic, position, message)
    }

    pub fn semantic(message: impl Into<String>) -> Self {
        Self::new(Stage::Semantic, None, message)
    }
}

impl From<TokenError> for ParseError {
    fn from(err: TokenError) -> Self {
        Self::lexical(err.position, err.message)
    }
}

impl From<ParseFailure> for ParseError {
    fn from(err: ParseFailure) -> Self {
        Self::syntactic(err.position, err.message)
    }
}

impl From<TransformFailure> for ParseError {
    fn from(err: TransformFailure) -> Self {
        Self::semantic(err.message)
    }
}

/// Tokenizer-stage error: malformed lexical input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct TokenError {
    pub position: usize,
    pub message: String,
}

impl TokenError {
    pub fn new(position: usize, message: impl Into<String>) -> Self {
        Self {
            position,
            message: message.into(),
        }
    }

    pub fn unterminated_phrase(position: usize) -> Self {
        Self::new(position, "Unterminated phrase")
    }

    pub fn empty_phrase(position: usize) -> Self {
        Self::new(position, "Empty phrase is not allowed")
    }

    pub fn stray_sigil(position: usize, sigil: char) -> Self {
        Self::new(position, format!("Sigil '{sigil}' has nothing following it"))
    }

    pub fn bare_or(position: usize) -> Self {
        Self::new(
            position,
            "'|' must be surrounded by whitespace or parentheses",
        )
    }

    pub fn bare_negation(position: usize) -> Self {
        Self::new(position, "'-' must be immediately followed by a term")
    }
}

/// Parser-stage error: malformed grammar.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ParseFailure {
    pub position: Option<usize>,
    pub message: String,
}

impl ParseFailure {
    pub fn new(position: Option<usize>, message: impl Into<String>) -> Self {
        Self {
            position,
            message: message.into(),
        }
    }

    pub fn unmatched_paren(position: usize) -> Self {
        Self::new(Some(position), "Unmatched parenthesis")
    }

    pub fn empty_group(position: usize) -> Self {
        Self::new(Some(position), "Empty group")
    }

    pub fn missing_operand(position: Option<usize>, what: &str) -> Self {
        Self::new(position, format!("Expected {what} but found end of input"))
    }

    pub fn dangling_operator(position: usize, operator: &str) -> Self {
        Self::new(
            Some(position),
            format!("Operator '{operator}' has no left-hand operand"),
        )
    }

    pub fn consecutive_or(position: usize) -> Self {
        Self::new(Some(position), "Two 'OR' operators in a row")
    }

    pub fn duplicate_number(position: usize) -> Self {
        Self::new(
            Some(position),
            "Only one numeric result-count option is allowed",
        )
    }

    pub fn duplicate_sort(position: usize) -> Self {
        Self::new(Some(position), "Only one sort option is allowed")
    }

    pub fn results_out_of_range(position: usize, floor: u32, ceiling: u32) -> Self {
        Self::new(
            Some(position),
            format!("Number of results must be between {floor} and {ceiling}"),
        )
    }
}

/// Transformer-stage error: malformed semantics.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct TransformFailure {
    pub message: String,
}

impl TransformFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn unrecognized_field(prefix: &str) -> Self {
        Self::new(format!("Unrecognized field: {prefix}"))
    }
}
