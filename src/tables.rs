//! Build-time normalization tables consulted by the parser and transformer.
//!
//! Every table here is expressed as a plain `match` over `&str`/`char`
//! rather than a runtime-built `HashMap`: the tables are small and fixed, so
//! the match expression *is* the constant table. There is nothing to
//! initialize and nothing to lock.

use crate::model::{Field, SortCriterion, SortDirection};

/// Maps a sigil character to the archive field it addresses.
pub fn field_for_sigil(sigil: char) -> Option<Field> {
    match sigil {
        '@' => Some(Field::Author),
        '#' => Some(Field::Category),
        '$' => Some(Field::Abstract),
        '*' => Some(Field::All),
        _ => None,
    }
}

/// Maps an explicit archive-style field prefix (`ti:`, `au:`, ...) to a
/// [`Field`]. Returns `None` for prefixes the archive grammar doesn't know.
pub fn field_for_prefix(prefix: &str) -> Option<Field> {
    match prefix {
        "ti" => Some(Field::Title),
        "au" => Some(Field::Author),
        "abs" => Some(Field::Abstract),
        "cat" => Some(Field::Category),
        "all" => Some(Field::All),
        _ => None,
    }
}

/// The archive's external prefix string for a resolved field.
pub fn prefix_for_field(field: Field) -> &'static str {
    match field {
        Field::Title => "ti",
        Field::Author => "au",
        Field::Abstract => "abs",
        Field::Category => "cat",
        Field::All => "all",
    }
}

/// Maps a sort code (1 or 2 letters, case-insensitive) to a criterion and
/// direction. `s`/`sd`, `r`/`rd`, `l`/`ld` default to descending.
pub fn sort_code(code: &str) -> Option<(SortCriterion, SortDirection)> {
    use SortCriterion::*;
    use SortDirection::*;

    match code.to_ascii_lowercase().as_str() {
        "s" | "sd" => Some((SubmittedDate, Descending)),
        "sa" => Some((SubmittedDate, Ascending)),
        "r" | "rd" => Some((Relevance, Descending)),
        "ra" => Some((Relevance, Ascending)),
        "l" | "ld" => Some((LastUpdatedDate, Descending)),
        "la" => Some((LastUpdatedDate, Ascending)),
        _ => None,
    }
}

/// True if `word` is a recognized sort code, independent of case. Used by
/// the tokenizer to decide whether a bare alphabetic run of length 1-2 is a
/// `Sort` token rather than a `Keyword`.
pub fn is_sort_code(word: &str) -> bool {
    matches!(word.len(), 1 | 2) && sort_code(word).is_some()
}

/// Maps a short category group (lowercase, no sigil) to its wildcarded
/// archive form, e.g. `cs` -> `cs.*`.
pub fn category_alias(group: &str) -> Option<&'static str> {
    match group {
        "cs" => Some("cs.*"),
        "physics" => Some("physics.*"),
        "math" => Some("math.*"),
        "stat" => Some("stat.*"),
        "econ" => Some("econ.*"),
        "q-bio" => Some("q-bio.*"),
        "q-fin" => Some("q-fin.*"),
        _ => None,
    }
}

/// Maps a lowercase category value to its canonical archive spelling.
/// Values absent from this table are passed through unchanged.
pub fn category_case(lowercase: &str) -> Option<&'static str> {
    match lowercase {
        "cs.ai" => Some("cs.AI"),
        "cs.lg" => Some("cs.LG"),
        "cs.cv" => Some("cs.CV"),
        "cs.cl" => Some("cs.CL"),
        "cs.ne" => Some("cs.NE"),
        "cs.ro" => Some("cs.RO"),
        "cs.cr" => Some("cs.CR"),
        "cs.db" => Some("cs.DB"),
        "cs.dc" => Some("cs.DC"),
        "cs.se" => Some("cs.SE"),
        "cs.pl" => Some("cs.PL"),
        "cs.ir" => Some("cs.IR"),
        "cs.hc" => Some("cs.HC"),
        "cs.gt" => Some("cs.GT"),
        "stat.ml" => Some("stat.ML"),
        "stat.me" => Some("stat.ME"),
        "stat.ap" => Some("stat.AP"),
        "math.co" => Some("math.CO"),
        "math.na" => Some("math.NA"),
        "math.pr" => Some("math.PR"),
        "math.st" => Some("math.ST"),
        "physics.optics" => Some("physics.optics"),
        "physics.soc-ph" => Some("physics.soc-ph"),
        "quant-ph" => Some("quant-ph"),
        "q-bio.nc" => Some("q-bio.NC"),
        "q-fin.cp" => Some("q-fin.CP"),
        "econ.em" => Some("econ.EM"),
        _ => None,
    }
}
