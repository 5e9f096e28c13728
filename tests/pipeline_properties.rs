//! Property-style tests for the pipeline's documented invariants:
//! determinism, idempotent category normalization, parenthesization
//! round-trip, option exclusivity, and default discipline.

use paperquery::Stage;

#[test]
fn compilation_is_deterministic() {
    let a = paperquery::parse("(bert | gpt) @google -@bengio #cs.CL 50 rd").unwrap();
    let b = paperquery::parse("(bert | gpt) @google -@bengio #cs.CL 50 rd").unwrap();
    assert_eq!(a, b);
}

#[test]
fn category_normalization_is_idempotent() {
    let once = paperquery::parse("#cs.AI").unwrap();
    let twice_input = once.query_string.replace("cat:", "#");
    let twice = paperquery::parse(&twice_input).unwrap();
    assert_eq!(once.query_string, twice.query_string);
}

#[test]
fn rendering_is_pure_and_reproducible_from_the_same_ast() {
    let tokens = paperquery::tokenizer::tokenize("(bert | gpt) @google -@bengio #cs.CL").unwrap();
    let (expr, _) = paperquery::parser::parse(&tokens, &paperquery::Limits::default()).unwrap();

    let first = paperquery::transformer::render(&expr).unwrap();
    let second = paperquery::transformer::render(&expr).unwrap();
    assert_eq!(first, second);
}

/// Distinct ASTs (an OR nested inside an AND, vs. the same operands at a
/// single AND/OR level) must render to distinct strings: the transformer's
/// parenthesization is what keeps those two shapes unambiguous to a reader
/// of the archive's own grammar.
#[test]
fn parenthesization_keeps_distinct_shapes_distinct() {
    let flat = paperquery::parse("bert gpt").unwrap();
    let grouped = paperquery::parse("(bert | gpt) quantum").unwrap();
    assert_ne!(flat.query_string, grouped.query_string);
    assert!(grouped.query_string.contains("(ti:bert OR ti:gpt)"));
}

#[test]
fn at_most_one_number_option_is_accepted() {
    let err = paperquery::parse("quantum 5 10").unwrap_err();
    assert_eq!(err.stage, Stage::Syntactic);
}

#[test]
fn at_most_one_sort_option_is_accepted() {
    let err = paperquery::parse("quantum rd sa").unwrap_err();
    assert_eq!(err.stage, Stage::Syntactic);
}

#[test]
fn defaults_hold_when_no_options_are_given() {
    let compiled = paperquery::parse("quantum").unwrap();
    assert_eq!(compiled.max_results, 10);
    assert_eq!(
        compiled.sort_criterion,
        paperquery::SortCriterion::SubmittedDate
    );
    assert_eq!(
        compiled.sort_direction,
        paperquery::SortDirection::Descending
    );
}

#[test]
fn input_at_the_length_limit_is_accepted_one_byte_over_is_rejected() {
    let limits = paperquery::Limits::default();
    let at_limit = "a".repeat(limits.max_input_bytes);
    assert!(paperquery::parse(&at_limit).is_ok());

    let over_limit = "a".repeat(limits.max_input_bytes + 1);
    let err = paperquery::parse(&over_limit).unwrap_err();
    assert_eq!(err.stage, Stage::Input);
}
