//! Stage 2 of the compilation pipeline: turns a token vector into a boolean
//! expression AST plus a sibling [`Options`] value, or a [`ParseFailure`]
//! describing the first syntax problem found.
//!
//! ```text
//! expr     := or_expr
//! or_expr  := and_expr ( "|" and_expr )*
//! and_expr := not_expr ( not_expr )*
//! not_expr := "-" not_expr | atom
//! atom     := PHRASE | KEYWORD | FIELD
//!           | SIGIL identifier | SIGIL phrase
//!           | SIGIL "(" expr ")"
//!           | "(" expr ")"
//! ```
//!
//! OR binds loosest, then implicit AND by juxtaposition, then NOT, then
//! atoms. OR and AND are left-associative and collapsed into flat n-ary
//! nodes; a single-child combinator degenerates to its child.

use crate::error::ParseFailure;
use crate::model::{
    Expr, Field, FieldRef, Limits, Options, SortCriterion, SortDirection, Token, TokenKind,
};
use crate::tables;

pub fn parse(tokens: &[Token], limits: &Limits) -> Result<(Expr, Options), ParseFailure> {
    let (core, options) = extract_options(tokens, limits)?;

    let mut cursor = Cursor::new(&core);
    let expr = cursor.parse_expr()?;

    if let Some(token) = cursor.peek() {
        return Err(match token.kind {
            TokenKind::RParen => ParseFailure::unmatched_paren(token.position),
            _ => ParseFailure::new(
                Some(token.position),
                format!("Unexpected token after expression: '{}'", token.value),
            ),
        });
    }

    Ok((expr, options))
}

/// Pre-pass: removes every `Number`/`Sort` token from the stream (wherever
/// it appears) and folds them into an [`Options`] value, enforcing at most
/// one of each. The `Number` bound and default result count are taken from
/// `limits` rather than hardcoded, so a caller-supplied [`Limits`] actually
/// governs what the parser accepts.
fn extract_options(tokens: &[Token], limits: &Limits) -> Result<(Vec<Token>, Options), ParseFailure> {
    let mut options = Options {
        max_results: limits.default_max_results,
        sort_criterion: SortCriterion::SubmittedDate,
        sort_direction: SortDirection::Descending,
    };
    let mut seen_number = false;
    let mut seen_sort = false;
    let mut core = Vec::with_capacity(tokens.len());

    for token in tokens {
        match token.kind {
            TokenKind::Number => {
                if seen_number {
                    return Err(ParseFailure::duplicate_number(token.position));
                }
                seen_number = true;
                let value: u32 = token.value.parse().map_err(|_| {
                    ParseFailure::results_out_of_range(
                        token.position,
                        limits.max_results_floor,
                        limits.max_results_ceiling,
                    )
                })?;
                if !(limits.max_results_floor..=limits.max_results_ceiling).contains(&value) {
                    return Err(ParseFailure::results_out_of_range(
                        token.position,
                        limits.max_results_floor,
                        limits.max_results_ceiling,
                    ));
                }
                options.max_results = value;
            }
            TokenKind::Sort => {
                if seen_sort {
                    return Err(ParseFailure::duplicate_sort(token.position));
                }
                seen_sort = true;
                let (criterion, direction) = tables::sort_code(&token.value)
                    .expect("tokenizer only emits Sort tokens for recognized codes");
                options.sort_criterion = criterion;
                options.sort_direction = direction;
            }
            _ => core.push(token.clone()),
        }
    }

    Ok((core, options))
}

struct Cursor<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn parse_expr(&mut self) -> Result<Expr, ParseFailure> {
        self.parse_or()
    }

    fn parse_or(&mut self) -> Result<Expr, ParseFailure> {
        if let Some(token) = self.peek() {
            if token.kind == TokenKind::Or {
                return Err(ParseFailure::dangling_operator(token.position, "|"));
            }
        }

        let first = self.parse_and()?;
        let mut children = vec![first];

        while let Some(token) = self.peek() {
            if token.kind != TokenKind::Or {
                break;
            }
            let or_position = token.position;
            self.advance();

            if let Some(next) = self.peek() {
                if next.kind == TokenKind::Or {
                    return Err(ParseFailure::consecutive_or(next.position));
                }
            } else {
                return Err(ParseFailure::dangling_operator(or_position, "|"));
            }

            children.push(self.parse_and()?);
        }

        Ok(flatten(children, Expr::Or))
    }

    fn parse_and(&mut self) -> Result<Expr, ParseFailure> {
        let first = self.parse_not()?;
        let mut children = vec![first];

        while let Some(token) = self.peek() {
            if !starts_atom(token.kind) {
                break;
            }
            children.push(self.parse_not()?);
        }

        Ok(flatten(children, Expr::And))
    }

    fn parse_not(&mut self) -> Result<Expr, ParseFailure> {
        if let Some(token) = self.peek() {
            if token.kind == TokenKind::Not {
                self.advance();
                let inner = self.parse_not()?;
                return Ok(Expr::Not(Box::new(inner)));
            }
        }
        self.parse_atom()
    }

    fn parse_atom(&mut self) -> Result<Expr, ParseFailure> {
        let token = self.advance().ok_or_else(|| {
            ParseFailure::missing_operand(self.last_position(), "an expression")
        })?;

        match token.kind {
            TokenKind::Phrase => Ok(Expr::Term {
                field: FieldRef::Inherit,
                value: token.value.clone(),
                phrase: true,
            }),
            TokenKind::Keyword => Ok(Expr::Term {
                field: FieldRef::Inherit,
                value: token.value.clone(),
                phrase: false,
            }),
            TokenKind::Field => {
                let prefix = token.prefix.as_deref().unwrap_or_default();
                let field = match tables::field_for_prefix(prefix) {
                    Some(f) => FieldRef::Known(f),
                    None => FieldRef::Unrecognized(prefix.to_string()),
                };
                Ok(Expr::Term {
                    field,
                    value: token.value.clone(),
                    phrase: token.phrase,
                })
            }
            TokenKind::Author | TokenKind::Category | TokenKind::Abstract | TokenKind::All => {
                let field = sigil_field(token.kind);
                if token.value.is_empty() {
                    self.parse_sigil_group(field)
                } else {
                    Ok(Expr::Term {
                        field: FieldRef::Known(field),
                        value: token.value.clone(),
                        phrase: token.phrase,
                    })
                }
            }
            TokenKind::LParen => self.parse_group(None, token.position),
            other => Err(ParseFailure::new(
                Some(token.position),
                format!("Unexpected token '{:?}' where an expression was expected", other),
            )),
        }
    }

    fn parse_sigil_group(&mut self, field: Field) -> Result<Expr, ParseFailure> {
        let lparen = self.advance().filter(|t| t.kind == TokenKind::LParen);
        let position = lparen
            .map(|t| t.position)
            .ok_or_else(|| ParseFailure::missing_operand(self.last_position(), "'('"))?;
        self.parse_group(Some(field), position)
    }

    /// Parses the body of a group whose opening `(` is at `lparen_position`
    /// (already consumed by the caller), through the closing `)`.
    fn parse_group(
        &mut self,
        field_context: Option<Field>,
        lparen_position: usize,
    ) -> Result<Expr, ParseFailure> {
        if let Some(token) = self.peek() {
            if token.kind == TokenKind::RParen {
                return Err(ParseFailure::empty_group(lparen_position));
            }
        } else {
            return Err(ParseFailure::unmatched_paren(lparen_position));
        }

        let inner = self.parse_expr()?;

        match self.advance() {
            Some(token) if token.kind == TokenKind::RParen => {
                Ok(Expr::Group(Box::new(inner), field_context))
            }
            _ => Err(ParseFailure::unmatched_paren(lparen_position)),
        }
    }

    fn last_position(&self) -> Option<usize> {
        self.tokens.last().map(|t| t.position + 1)
    }
}

fn starts_atom(kind: TokenKind) -> bool {
    !matches!(kind, TokenKind::Or | TokenKind::RParen)
}

fn sigil_field(kind: TokenKind) -> Field {
    match kind {
        TokenKind::Author => Field::Author,
        TokenKind::Category => Field::Category,
        TokenKind::Abstract => Field::Abstract,
        TokenKind::All => Field::All,
        _ => unreachable!("caller only passes sigil-derived token kinds"),
    }
}

/// Collapses a list of parsed operands into a flat n-ary node, or returns
/// the lone child unwrapped when there's only one — both OR and AND
/// degenerate this way per the combinator invariant.
fn flatten(mut children: Vec<Expr>, wrap: fn(Vec<Expr>) -> Expr) -> Expr {
    if children.len() == 1 {
        children.pop().expect("checked len == 1")
    } else {
        wrap(children)
    }
}
