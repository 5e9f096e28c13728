//! Stage 1 of the compilation pipeline: turns an input string into an
//! ordered vector of [`Token`]s, or a [`TokenError`] describing the first
//! lexical problem found.
//!
//! Positions are tracked in characters (not bytes) so error columns stay
//! correct for any UTF-8 input, even though the DSL's own syntax is ASCII.

use crate::error::TokenError;
use crate::model::{Token, TokenKind};
use crate::tables;

const SIGILS: [char; 4] = ['@', '#', '$', '*'];

pub fn tokenize(input: &str) -> Result<Vec<Token>, TokenError> {
    Cursor::new(input).run()
}

struct Cursor {
    chars: Vec<char>,
    pos: usize,
}

impl Cursor {
    fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    fn len(&self) -> usize {
        self.chars.len()
    }

    fn at(&self, index: usize) -> Option<char> {
        self.chars.get(index).copied()
    }

    fn peek(&self) -> Option<char> {
        self.at(self.pos)
    }

    fn run(mut self) -> Result<Vec<Token>, TokenError> {
        let mut tokens = Vec::new();

        while self.pos < self.len() {
            let c = self.peek().expect("pos < len");

            if c.is_whitespace() {
                self.pos += 1;
                continue;
            }

            if c == '(' {
                tokens.push(Token::new(TokenKind::LParen, "(", self.pos));
                self.pos += 1;
                continue;
            }
            if c == ')' {
                tokens.push(Token::new(TokenKind::RParen, ")", self.pos));
                self.pos += 1;
                continue;
            }

            if c == '"' {
                let start = self.pos;
                let (text, end) = self.scan_phrase(start)?;
                tokens.push(Token::phrase(TokenKind::Phrase, text, start));
                self.pos = end;
                continue;
            }

            if c == '|' {
                self.lex_or(&mut tokens)?;
                continue;
            }

            if c == '-' {
                self.lex_not(&mut tokens)?;
                continue;
            }

            if SIGILS.contains(&c) {
                self.lex_sigil(&mut tokens, c)?;
                continue;
            }

            if c.is_ascii_digit() {
                self.lex_number_or_keyword(&mut tokens);
                continue;
            }

            if c.is_alphabetic() {
                self.lex_field_sort_or_keyword(&mut tokens)?;
                continue;
            }

            return Err(TokenError::new(
                self.pos,
                format!("Unexpected character '{c}'"),
            ));
        }

        Ok(tokens)
    }

    /// Scans from the position of an opening `"` and returns the inner text
    /// plus the index just past the closing `"`.
    fn scan_phrase(&self, start: usize) -> Result<(String, usize), TokenError> {
        let mut i = start + 1;
        let mut text = String::new();
        while let Some(c) = self.at(i) {
            if c == '"' {
                if text.is_empty() {
                    return Err(TokenError::empty_phrase(start));
                }
                return Ok((text, i + 1));
            }
            text.push(c);
            i += 1;
        }
        Err(TokenError::unterminated_phrase(start))
    }

    fn is_boundary_for_or(c: Option<char>) -> bool {
        match c {
            None => true,
            Some(c) => c.is_whitespace() || c == '(' || c == ')',
        }
    }

    fn lex_or(&mut self, tokens: &mut Vec<Token>) -> Result<(), TokenError> {
        let pos = self.pos;
        let before = if pos == 0 { None } else { self.at(pos - 1) };
        let after = self.at(pos + 1);

        if Self::is_boundary_for_or(before) && Self::is_boundary_for_or(after) {
            tokens.push(Token::new(TokenKind::Or, "|", pos));
            self.pos += 1;
            Ok(())
        } else {
            Err(TokenError::bare_or(pos))
        }
    }

    fn lex_not(&mut self, tokens: &mut Vec<Token>) -> Result<(), TokenError> {
        let pos = self.pos;
        match self.at(pos + 1) {
            Some(c) if !c.is_whitespace() => {
                tokens.push(Token::new(TokenKind::Not, "-", pos));
                self.pos += 1;
                Ok(())
            }
            _ => Err(TokenError::bare_negation(pos)),
        }
    }

    fn lex_sigil(&mut self, tokens: &mut Vec<Token>, sigil: char) -> Result<(), TokenError> {
        let pos = self.pos;
        let kind = sigil_token_kind(sigil);

        match self.at(pos + 1) {
            Some('"') => {
                let (text, end) = self.scan_phrase(pos + 1)?;
                tokens.push(Token::phrase(kind, text, pos));
                self.pos = end;
                Ok(())
            }
            Some('(') => {
                tokens.push(Token::new(kind, "", pos));
                self.pos += 1;
                Ok(())
            }
            Some(c) if is_identifier_char(c) => {
                let (word, end) = self.scan_identifier_run(pos + 1);
                tokens.push(Token::new(kind, word, pos));
                self.pos = end;
                Ok(())
            }
            _ => Err(TokenError::stray_sigil(pos, sigil)),
        }
    }

    /// Scans a contiguous run of `letters/digits/./-/_` starting at `start`.
    /// Returns the run and the index just past it. The caller guarantees
    /// `start` itself begins such a run.
    fn scan_identifier_run(&self, start: usize) -> (String, usize) {
        let mut i = start;
        let mut word = String::new();
        while let Some(c) = self.at(i) {
            if is_identifier_char(c) {
                word.push(c);
                i += 1;
            } else {
                break;
            }
        }
        (word, i)
    }

    /// Scans a contiguous run of `letters/digits/_` (no `.`/`-`) starting at
    /// `start`, for recognizing a candidate explicit field prefix.
    fn scan_prefix_run(&self, start: usize) -> (String, usize) {
        let mut i = start;
        let mut word = String::new();
        while let Some(c) = self.at(i) {
            if c.is_ascii_alphanumeric() || c == '_' {
                word.push(c);
                i += 1;
            } else {
                break;
            }
        }
        (word, i)
    }

    fn lex_number_or_keyword(&mut self, tokens: &mut Vec<Token>) {
        let pos = self.pos;
        let (word, end) = self.scan_identifier_run(pos);

        if word.chars().all(|c| c.is_ascii_digit()) {
            tokens.push(Token::new(TokenKind::Number, word, pos));
        } else {
            tokens.push(Token::new(TokenKind::Keyword, word, pos));
        }
        self.pos = end;
    }

    fn lex_field_sort_or_keyword(&mut self, tokens: &mut Vec<Token>) -> Result<(), TokenError> {
        let pos = self.pos;
        let (prefix_candidate, after_prefix) = self.scan_prefix_run(pos);

        if self.at(after_prefix) == Some(':') {
            if let Some(value_start_char) = self.at(after_prefix + 1) {
                if value_start_char == '"' {
                    let (text, end) = self.scan_phrase(after_prefix + 1)?;
                    tokens.push(Token::field(prefix_candidate, text, pos, true));
                    self.pos = end;
                    return Ok(());
                }
                if is_identifier_char(value_start_char) {
                    let (value, end) = self.scan_identifier_run(after_prefix + 1);
                    tokens.push(Token::field(prefix_candidate, value, pos, false));
                    self.pos = end;
                    return Ok(());
                }
            }
        }

        let (word, end) = self.scan_identifier_run(pos);
        if tables::is_sort_code(&word) {
            tokens.push(Token::new(TokenKind::Sort, word, pos));
        } else {
            tokens.push(Token::new(TokenKind::Keyword, word, pos));
        }
        self.pos = end;
        Ok(())
    }
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_'
}

fn sigil_token_kind(sigil: char) -> TokenKind {
    match sigil {
        '@' => TokenKind::Author,
        '#' => TokenKind::Category,
        '$' => TokenKind::Abstract,
        '*' => TokenKind::All,
        _ => unreachable!("caller only passes a recognized sigil"),
    }
}
