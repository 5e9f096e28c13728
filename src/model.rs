//! Shared data types produced and consumed across pipeline stages: tokens,
//! the AST, compile-time options, and the compiled query itself.

use serde::{Deserialize, Serialize};

/// A recognized archive search field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Field {
    Title,
    Author,
    Abstract,
    Category,
    All,
}

/// The lexical category a [`Token`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenKind {
    Keyword,
    Phrase,
    Author,
    Category,
    Abstract,
    All,
    Field,
    Number,
    Sort,
    Or,
    Not,
    LParen,
    RParen,
}

/// A single lexical token, with its source position preserved for error
/// reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub position: usize,
    /// Only populated for `TokenKind::Field`: the explicit prefix before
    /// the colon, e.g. `ti` in `ti:quantum`.
    pub prefix: Option<String>,
    /// True if `value` was lexed out of a double-quoted phrase rather than
    /// a bare identifier run (whether the token itself is a `Phrase`, or a
    /// sigil/field token whose value happened to be quoted, e.g. `@"hinton
    /// lecun"`).
    pub phrase: bool,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>, position: usize) -> Self {
        Self {
            kind,
            value: value.into(),
            position,
            prefix: None,
            phrase: false,
        }
    }

    pub fn phrase(kind: TokenKind, value: impl Into<String>, position: usize) -> Self {
        Self {
            kind,
            value: value.into(),
            position,
            prefix: None,
            phrase: true,
        }
    }

    pub fn field(
        prefix: impl Into<String>,
        value: impl Into<String>,
        position: usize,
        phrase: bool,
    ) -> Self {
        Self {
            kind: TokenKind::Field,
            value: value.into(),
            position,
            prefix: Some(prefix.into()),
            phrase,
        }
    }
}

/// How a leaf [`Expr::Term`] addresses a field.
///
/// The distilled data model describes a leaf's field as `Option<Field>`,
/// with `None` meaning "inherit the ambient context". That alone can't
/// distinguish "no field given" from "an *explicit* field prefix was given,
/// but it isn't one the archive recognizes" — and §4.2 rule 7 requires the
/// tokenizer (and therefore the parser) to accept any syntactically valid
/// `prefix:value` token, deferring the recognized/unrecognized judgment to
/// the transformer. `FieldRef` is that three-way split; `Known` and
/// `Inherit` together are exactly the spec's `Option<Field>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldRef {
    /// No field was given; take the ambient field, or `Title` if there is
    /// none.
    Inherit,
    /// A field the archive grammar recognizes (sigil-derived, or an
    /// explicit prefix in the recognized set).
    Known(Field),
    /// An explicit `prefix:value` whose prefix isn't a recognized archive
    /// field. Carried through to the transformer so it can be reported as
    /// `Unrecognized field: <prefix>`.
    Unrecognized(String),
}

/// The boolean-expression AST produced by the parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Expr {
    Term {
        field: FieldRef,
        value: String,
        phrase: bool,
    },
    And(Vec<Expr>),
    Or(Vec<Expr>),
    Not(Box<Expr>),
    Group(Box<Expr>, Option<Field>),
}

/// Result-count and sort options, parsed out of the input independently of
/// its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Options {
    pub max_results: u32,
    pub sort_criterion: SortCriterion,
    pub sort_direction: SortDirection,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_results: 10,
            sort_criterion: SortCriterion::SubmittedDate,
            sort_direction: SortDirection::Descending,
        }
    }
}

/// Resource bounds the parser enforces on the `Number` option, and the
/// façade enforces on input length before tokenizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum accepted input length, in bytes, checked before tokenizing.
    pub max_input_bytes: usize,
    pub max_results_floor: u32,
    pub max_results_ceiling: u32,
    pub default_max_results: u32,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_input_bytes: 4096,
            max_results_floor: 1,
            max_results_ceiling: 1000,
            default_max_results: 10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortCriterion {
    Relevance,
    SubmittedDate,
    LastUpdatedDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// The transformer's output, handed to the archive search client verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledQuery {
    pub query_string: String,
    pub max_results: u32,
    pub sort_criterion: SortCriterion,
    pub sort_direction: SortDirection,
    /// Human-readable rendering used by the chat surface to show what was
    /// understood, e.g. `ti:quantum AND au:hinton (20 results, Relevance
    /// Descending)`.
    pub echo: String,
}
