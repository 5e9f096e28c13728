//! Scenario-level tests exercising the whole pipeline through the public
//! façade, one file per concern, matching the split between unit tests
//! (inside each module) and cross-module integration tests.

use paperquery::{SortCriterion, SortDirection, Stage};

#[test]
fn bare_keyword_defaults_to_title_and_default_options() {
    let compiled = paperquery::parse("quantum").unwrap();
    assert_eq!(compiled.query_string, "ti:quantum");
    assert_eq!(compiled.max_results, 10);
    assert_eq!(compiled.sort_criterion, SortCriterion::SubmittedDate);
    assert_eq!(compiled.sort_direction, SortDirection::Descending);
}

#[test]
fn sigils_and_explicit_options_compile_together() {
    let compiled = paperquery::parse("quantum @hinton #cs.AI 20 rd").unwrap();
    assert_eq!(
        compiled.query_string,
        "ti:quantum AND au:hinton AND cat:cs.AI"
    );
    assert_eq!(compiled.max_results, 20);
    assert_eq!(compiled.sort_criterion, SortCriterion::Relevance);
    assert_eq!(compiled.sort_direction, SortDirection::Descending);
}

#[test]
fn nested_or_group_with_negation_and_category() {
    let compiled = paperquery::parse("(bert | gpt) @google -@bengio #cs.CL 50 rd").unwrap();
    assert_eq!(
        compiled.query_string,
        "(ti:bert OR ti:gpt) AND au:google AND NOT ( au:bengio ) AND cat:cs.CL"
    );
    assert_eq!(compiled.max_results, 50);
    assert_eq!(compiled.sort_criterion, SortCriterion::Relevance);
    assert_eq!(compiled.sort_direction, SortDirection::Descending);
}

#[test]
fn sigil_led_group_propagates_field_to_a_phrase_sibling() {
    let compiled = paperquery::parse("@(hinton lecun) \"vision transformer\"").unwrap();
    assert_eq!(
        compiled.query_string,
        "au:(hinton AND lecun) AND ti:\"vision transformer\""
    );
}

#[test]
fn unrecognized_field_prefix_is_a_semantic_error() {
    let err = paperquery::parse("quantum foo:bar").unwrap_err();
    assert_eq!(err.stage, Stage::Semantic);
    assert!(err.message.contains("foo"));
}

#[test]
fn out_of_range_result_count_is_a_syntactic_error() {
    let err = paperquery::parse("quantum 0").unwrap_err();
    assert_eq!(err.stage, Stage::Syntactic);

    let err = paperquery::parse("quantum 1001").unwrap_err();
    assert_eq!(err.stage, Stage::Syntactic);
}

#[test]
fn empty_group_is_a_syntactic_error() {
    let err = paperquery::parse("(quantum | )").unwrap_err();
    assert_eq!(err.stage, Stage::Syntactic);
}

#[test]
fn unterminated_phrase_is_a_lexical_error() {
    let err = paperquery::parse("\"vision transformer").unwrap_err();
    assert_eq!(err.stage, Stage::Lexical);
}

#[test]
fn single_letter_sort_codes_pick_the_default_direction() {
    let compiled = paperquery::parse("quantum l").unwrap();
    assert_eq!(compiled.sort_criterion, SortCriterion::LastUpdatedDate);
    assert_eq!(compiled.sort_direction, SortDirection::Descending);
}
