//! `paperquery` compiles a compact search DSL into the boolean query grammar
//! of a scholarly preprint archive.
//!
//! ```
//! let compiled = paperquery::parse("quantum @hinton #cs.AI 20 rd").unwrap();
//! assert_eq!(compiled.query_string, "ti:quantum AND au:hinton AND cat:cs.AI");
//! assert_eq!(compiled.max_results, 20);
//! ```
//!
//! The pipeline is pure, synchronous, and allocation-only: tokenize, parse,
//! transform. Each stage is a free function in its own module; this file is
//! only the façade over them.

pub mod error;
pub mod model;
pub mod parser;
pub mod tables;
pub mod tokenizer;
pub mod transformer;

use tracing::{debug, trace};

pub use error::{ParseError, Stage};
pub use model::{
    CompiledQuery, Expr, Field, FieldRef, Limits, Options, SortCriterion, SortDirection, Token,
    TokenKind,
};

/// Compiles `input` with the default [`Limits`]. The entry point most
/// callers want.
pub fn parse(input: &str) -> Result<CompiledQuery, ParseError> {
    Compiler::new().parse(input).map(|outcome| outcome.query)
}

/// The result of [`Compiler::parse`]: always the compiled query, plus the
/// intermediate tokens and AST when the compiler was built with debug mode
/// enabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub query: CompiledQuery,
    pub tokens: Option<Vec<Token>>,
    pub expr: Option<Expr>,
    pub options: Option<Options>,
}

/// Builder over the compiler's resource limits and debug introspection.
///
/// Debug mode is a construction-time choice, not a per-call argument: a
/// `Compiler` built with `.with_debug(true)` returns the intermediate
/// tokens and AST on every subsequent `parse` call, so a caller doesn't
/// juggle two call shapes for the same pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct Compiler {
    limits: Limits,
    debug: bool,
}

impl Compiler {
    pub fn new() -> Self {
        Self {
            limits: Limits::default(),
            debug: false,
        }
    }

    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn parse(&self, input: &str) -> Result<Outcome, ParseError> {
        if input.len() > self.limits.max_input_bytes {
            return Err(ParseError::input_too_long(self.limits.max_input_bytes));
        }

        trace!(bytes = input.len(), "tokenizing");
        let tokens = tokenizer::tokenize(input)?;
        debug!(count = tokens.len(), "tokenized");

        trace!("parsing");
        let (expr, options) = parser::parse(&tokens, &self.limits)?;
        debug!(?options, "parsed");

        trace!("transforming");
        let query_string = transformer::render(&expr)?;
        debug!(%query_string, "transformed");

        let query = CompiledQuery {
            echo: render_echo(&query_string, &options),
            query_string,
            max_results: options.max_results,
            sort_criterion: options.sort_criterion,
            sort_direction: options.sort_direction,
        };

        Ok(Outcome {
            query,
            tokens: self.debug.then(|| tokens),
            expr: self.debug.then(|| expr),
            options: self.debug.then_some(options),
        })
    }
}

fn render_echo(query_string: &str, options: &Options) -> String {
    format!(
        "{query_string} ({} results, {} {})",
        options.max_results,
        sort_criterion_label(options.sort_criterion),
        sort_direction_label(options.sort_direction),
    )
}

fn sort_criterion_label(criterion: SortCriterion) -> &'static str {
    match criterion {
        SortCriterion::Relevance => "Relevance",
        SortCriterion::SubmittedDate => "Submitted",
        SortCriterion::LastUpdatedDate => "Last Updated",
    }
}

fn sort_direction_label(direction: SortDirection) -> &'static str {
    match direction {
        SortDirection::Ascending => "Ascending",
        SortDirection::Descending => "Descending",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_no_options_given() {
        let compiled = parse("quantum").unwrap();
        assert_eq!(compiled.query_string, "ti:quantum");
        assert_eq!(compiled.max_results, 10);
        assert_eq!(compiled.sort_criterion, SortCriterion::SubmittedDate);
        assert_eq!(compiled.sort_direction, SortDirection::Descending);
        assert_eq!(compiled.echo, "ti:quantum (10 results, Submitted Descending)");
    }

    #[test]
    fn explicit_options_override_defaults() {
        let compiled = parse("quantum @hinton #cs.AI 20 rd").unwrap();
        assert_eq!(compiled.query_string, "ti:quantum AND au:hinton AND cat:cs.AI");
        assert_eq!(compiled.max_results, 20);
        assert_eq!(compiled.sort_criterion, SortCriterion::Relevance);
        assert_eq!(compiled.sort_direction, SortDirection::Descending);
    }

    #[test]
    fn oversized_input_is_rejected_before_tokenizing() {
        let oversized = "a".repeat(Limits::default().max_input_bytes + 1);
        let err = parse(&oversized).unwrap_err();
        assert_eq!(err.stage, Stage::Input);
    }

    #[test]
    fn debug_mode_returns_intermediate_stages() {
        let outcome = Compiler::new().with_debug(true).parse("quantum").unwrap();
        assert!(outcome.tokens.is_some());
        assert!(outcome.expr.is_some());
        assert!(outcome.options.is_some());
    }

    #[test]
    fn non_debug_mode_omits_intermediate_stages() {
        let outcome = Compiler::new().parse("quantum").unwrap();
        assert!(outcome.tokens.is_none());
        assert!(outcome.expr.is_none());
        assert!(outcome.options.is_none());
    }

    #[test]
    fn unrecognized_field_propagates_as_semantic_error() {
        let err = parse("foo:bar").unwrap_err();
        assert_eq!(err.stage, Stage::Semantic);
    }

    #[test]
    fn custom_limits_shrink_the_accepted_input_length() {
        let compiler = Compiler::new().with_limits(Limits {
            max_input_bytes: 4,
            ..Limits::default()
        });
        assert!(compiler.parse("quantum").is_err());
        assert!(compiler.parse("q").is_ok());
    }

    #[test]
    fn custom_limits_shrink_the_accepted_result_count_end_to_end() {
        let compiler = Compiler::new().with_limits(Limits {
            max_results_ceiling: 50,
            default_max_results: 25,
            ..Limits::default()
        });

        let outcome = compiler.parse("quantum").unwrap();
        assert_eq!(outcome.query.max_results, 25);

        let err = compiler.parse("quantum 100").unwrap_err();
        assert_eq!(err.stage, Stage::Syntactic);
        assert!(err.message.contains("between 1 and 50"));
    }
}
