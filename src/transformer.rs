//! Stage 3 of the compilation pipeline: walks the AST with an ambient field
//! context, normalizes category values, and renders the archive's native
//! boolean query grammar, or returns a [`TransformFailure`] for an
//! unrecognized field.
//!
//! The walk threads two pieces of context downward: the `Option<Field>`
//! "ambient field" (started `None`, set by a `Group`'s field context,
//! consulted by a bare `Term` with no field of its own), and a
//! `suppress` field that is `Some(f)` exactly while rendering the body of a
//! sigil-led group for field `f` — a leaf that resolves to `f` purely by
//! inheriting the ambient context renders bare, because the group already
//! hoists the `f:` prefix once in front of its parentheses (e.g.
//! `au:(hinton AND lecun)`, not `(au:hinton AND au:lecun)`). A leaf with its
//! own explicit field is never suppressed. This is the visitor-as-plain-
//! function style the data model favors over virtual dispatch: one
//! recursive function, not a trait per node kind.

use crate::error::TransformFailure;
use crate::model::{Expr, Field, FieldRef};
use crate::tables;

pub fn render(expr: &Expr) -> Result<String, TransformFailure> {
    render_with_context(expr, None, None)
}

fn render_with_context(
    expr: &Expr,
    ambient: Option<Field>,
    suppress: Option<Field>,
) -> Result<String, TransformFailure> {
    match expr {
        Expr::Term { field, value, phrase } => render_term(field, value, *phrase, ambient, suppress),
        Expr::Not(inner) => {
            let rendered = render_with_context(inner, ambient, suppress)?;
            Ok(format!("NOT ( {rendered} )"))
        }
        Expr::And(children) => render_combinator(children, ambient, suppress, "AND"),
        Expr::Or(children) => render_combinator(children, ambient, suppress, "OR"),
        Expr::Group(inner, field_context) => match field_context {
            Some(f) => {
                let body = render_with_context(inner, Some(*f), Some(*f))?;
                Ok(format!("{}:({body})", tables::prefix_for_field(*f)))
            }
            None => {
                let rendered = render_with_context(inner, ambient, suppress)?;
                Ok(format!("({rendered})"))
            }
        },
    }
}

fn render_term(
    field: &FieldRef,
    value: &str,
    phrase: bool,
    ambient: Option<Field>,
    suppress: Option<Field>,
) -> Result<String, TransformFailure> {
    let resolved = match field {
        FieldRef::Known(f) => *f,
        FieldRef::Inherit => ambient.unwrap_or(Field::Title),
        FieldRef::Unrecognized(prefix) => {
            return Err(TransformFailure::unrecognized_field(prefix));
        }
    };

    let rendered_value = if resolved == Field::Category {
        normalize_category(value)
    } else if phrase {
        format!("\"{value}\"")
    } else {
        value.to_string()
    };

    let hoisted_by_enclosing_group =
        matches!(field, FieldRef::Inherit) && suppress == Some(resolved);
    if hoisted_by_enclosing_group {
        Ok(rendered_value)
    } else {
        Ok(format!(
            "{}:{}",
            tables::prefix_for_field(resolved),
            rendered_value
        ))
    }
}

fn render_combinator(
    children: &[Expr],
    ambient: Option<Field>,
    suppress: Option<Field>,
    operator: &str,
) -> Result<String, TransformFailure> {
    let mut parts = Vec::with_capacity(children.len());
    for child in children {
        let rendered = render_with_context(child, ambient, suppress)?;
        parts.push(parenthesize_operand(child, &rendered));
    }
    Ok(parts.join(&format!(" {operator} ")))
}

/// Wraps a rendered child in parentheses when its own top-level operator is
/// looser-or-equal precedence than the parent's, so the rendering is
/// unambiguous to the archive's own grammar. `Term`, `Not`, and `Group`
/// never need extra parens: a `Term`/`Group` is already atomic, and `NOT`
/// binds tighter than both `AND` and `OR`. Only a nested `And`/`Or` inside
/// another combinator needs wrapping.
fn parenthesize_operand(expr: &Expr, rendered: &str) -> String {
    match expr {
        Expr::And(children) | Expr::Or(children) if children.len() > 1 => {
            format!("({rendered})")
        }
        _ => rendered.to_string(),
    }
}

/// Lowercase, then alias a bare group (`cs` -> `cs.*`), then correct the
/// subcategory's case against the archive's canonical spelling, else pass
/// the lowercased value through unchanged.
fn normalize_category(value: &str) -> String {
    let lowered = value.to_ascii_lowercase();

    if let Some(aliased) = tables::category_alias(&lowered) {
        return aliased.to_string();
    }

    if let Some(cased) = tables::category_case(&lowered) {
        return cased.to_string();
    }

    lowered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Limits;
    use crate::parser::parse;
    use crate::tokenizer::tokenize;

    fn render_input(input: &str) -> String {
        let tokens = tokenize(input).unwrap();
        let (expr, _) = parse(&tokens, &Limits::default()).unwrap();
        render(&expr).unwrap()
    }

    #[test]
    fn bare_term_defaults_to_title() {
        assert_eq!(render_input("quantum"), "ti:quantum");
    }

    #[test]
    fn sigils_render_their_field() {
        assert_eq!(render_input("@hinton"), "au:hinton");
    }

    #[test]
    fn category_alias_expands_to_wildcard() {
        assert_eq!(render_input("#cs"), "cat:cs.*");
    }

    #[test]
    fn category_case_is_corrected() {
        assert_eq!(render_input("#cs.ai"), "cat:cs.AI");
    }

    #[test]
    fn implicit_and_renders_with_operator() {
        assert_eq!(
            render_input("quantum @hinton #cs.AI"),
            "ti:quantum AND au:hinton AND cat:cs.AI"
        );
    }

    #[test]
    fn or_groups_parenthesize_inside_and() {
        assert_eq!(render_input("(bert | gpt) @google"), "(ti:bert OR ti:gpt) AND au:google");
    }

    #[test]
    fn not_binds_to_its_operand_only() {
        assert_eq!(render_input("-@bengio"), "NOT ( au:bengio )");
    }

    #[test]
    fn sigil_group_hoists_the_field_prefix_once() {
        assert_eq!(render_input("@(hinton lecun)"), "au:(hinton AND lecun)");
    }

    #[test]
    fn sigil_group_leaf_with_its_own_field_is_not_suppressed() {
        assert_eq!(
            render_input("@(hinton cat:cs.AI)"),
            "au:(hinton AND cat:cs.AI)"
        );
    }

    #[test]
    fn phrase_term_is_quoted() {
        assert_eq!(render_input("\"vision transformer\""), "ti:\"vision transformer\"");
    }

    #[test]
    fn unrecognized_field_is_an_error() {
        let tokens = tokenize("foo:bar").unwrap();
        let (expr, _) = parse(&tokens, &Limits::default()).unwrap();
        assert!(render(&expr).is_err());
    }

    #[test]
    fn nested_precedence_matches_spec_example() {
        assert_eq!(
            render_input("(bert | gpt) @google -@bengio #cs.CL"),
            "(ti:bert OR ti:gpt) AND au:google AND NOT ( au:bengio ) AND cat:cs.CL"
        );
    }

    #[test]
    fn sigil_group_and_phrase_sibling_match_spec_example() {
        assert_eq!(
            render_input("@(hinton lecun) \"vision transformer\""),
            "au:(hinton AND lecun) AND ti:\"vision transformer\""
        );
    }
}
