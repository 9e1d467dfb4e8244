use std::collections::HashMap;
use std::fmt;

use log::{debug, trace};

use crate::token::{Keyword, Span, Token, TokenKind};

lazy_static::lazy_static! {
    /// Reserved spellings, built once on first use and never mutated.
    static ref KEYWORDS: HashMap<&'static str, Keyword> = {
        let mut map: HashMap<&'static str, Keyword> = Keyword::ALL.iter().copied().collect();
        map.insert("starlight", Keyword::Truth);
        map
    };
}

/// Classifies a lexical error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LexErrorKind {
    /// Double-quoted string with no closing quote.
    UnterminatedString,
    /// `/*` comment with no closing `*/`.
    UnterminatedBlockComment,
    /// Character that cannot start any token.
    UnexpectedCharacter(char),
}

impl LexErrorKind {
    /// Diagnostic text stored as the lexeme of an error token.
    #[must_use]
    pub fn message(self) -> String {
        match self {
            Self::UnterminatedString => "Unterminated string.".to_string(),
            Self::UnterminatedBlockComment => "Unterminated block comment.".to_string(),
            Self::UnexpectedCharacter(ch) => format!("Unexpected character '{ch}'."),
        }
    }
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnterminatedString => write!(f, "unterminated string"),
            Self::UnterminatedBlockComment => {
                write!(f, "unterminated block comment")
            }
            Self::UnexpectedCharacter(ch) => {
                write!(f, "unexpected character '{ch}'")
            }
        }
    }
}

/// A lexical error recovered from an error token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at line {}, column {}", span.line, span.column)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
}

impl Token {
    /// The structured error behind an error token, `None` for any
    /// other kind.
    #[must_use]
    pub const fn lex_error(&self) -> Option<LexError> {
        match self.kind {
            TokenKind::Error(kind) => Some(LexError {
                kind,
                span: self.span,
            }),
            _ => None,
        }
    }
}

/// All lexical errors in a token stream, in source order.
pub fn lex_errors(tokens: &[Token]) -> impl Iterator<Item = LexError> + '_ {
    tokens.iter().filter_map(Token::lex_error)
}

/// Scan a source string into tokens.
///
/// Never fails: malformed input produces `TokenKind::Error` tokens
/// in place and scanning resumes after them. The last token is
/// always `TokenKind::Eof`.
#[must_use]
pub fn scan(input: &str) -> Vec<Token> {
    Scanner::new(input).scan()
}

struct Scanner<'a> {
    input: &'a str,
    pos: usize,
    line: usize,
    col: usize,
    /// Byte offset where the current token starts.
    start: usize,
    start_span: Span,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        let input = input.strip_prefix('\u{FEFF}').unwrap_or(input);
        Self {
            input,
            pos: 0,
            line: 1,
            col: 1,
            start: 0,
            start_span: Span { line: 1, column: 1 },
        }
    }

    fn scan(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace();
            self.start = self.pos;
            self.start_span = self.span();

            let Some(ch) = self.advance() else {
                break;
            };
            let token = self.scan_token(ch);
            trace!("{token}");
            tokens.push(token);
        }

        tokens.push(Token {
            kind: TokenKind::Eof,
            lexeme: String::new(),
            literal: None,
            span: self.span(),
        });

        debug!("scanned {} tokens over {} line(s)", tokens.len(), self.line);
        tokens
    }

    const fn span(&self) -> Span {
        Span {
            line: self.line,
            column: self.col,
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_next(&self) -> Option<char> {
        let mut chars = self.input[self.pos..].chars();
        chars.next();
        chars.next()
    }

    /// Consume one code point, keeping line and column current.
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(ch)
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(' ' | '\t' | '\r')) {
            self.advance();
        }
    }

    fn lexeme(&self) -> &'a str {
        &self.input[self.start..self.pos]
    }

    fn make_token(&self, kind: TokenKind) -> Token {
        Token {
            kind,
            lexeme: self.lexeme().to_string(),
            literal: None,
            span: self.start_span,
        }
    }

    fn error_token(&self, kind: LexErrorKind) -> Token {
        Token {
            kind: TokenKind::Error(kind),
            lexeme: kind.message(),
            literal: None,
            span: self.start_span,
        }
    }

    /// `long` if the next character is `next`, otherwise `short`.
    fn either(&mut self, next: char, long: TokenKind, short: TokenKind) -> Token {
        let kind = if self.match_char(next) { long } else { short };
        self.make_token(kind)
    }

    fn scan_token(&mut self, ch: char) -> Token {
        match ch {
            '(' => self.make_token(TokenKind::LeftParen),
            ')' => self.make_token(TokenKind::RightParen),
            '{' => self.make_token(TokenKind::LeftBrace),
            '}' => self.make_token(TokenKind::RightBrace),
            ',' => self.make_token(TokenKind::Comma),
            '.' => self.make_token(TokenKind::Dot),
            ';' => self.make_token(TokenKind::Semicolon),
            ':' => self.make_token(TokenKind::Colon),
            '^' => self.make_token(TokenKind::Caret),
            '\n' => self.make_token(TokenKind::Newline),

            '+' => {
                let kind = if self.match_char('+') {
                    TokenKind::PlusPlus
                } else if self.match_char('=') {
                    TokenKind::PlusEqual
                } else {
                    TokenKind::Plus
                };
                self.make_token(kind)
            }
            '-' => {
                let kind = if self.match_char('-') {
                    TokenKind::MinusMinus
                } else if self.match_char('=') {
                    TokenKind::MinusEqual
                } else if self.match_char('>') {
                    TokenKind::Arrow
                } else {
                    TokenKind::Minus
                };
                self.make_token(kind)
            }
            '*' => self.either('=', TokenKind::StarEqual, TokenKind::Star),
            '/' => {
                if self.match_char('/') {
                    self.line_comment()
                } else if self.match_char('*') {
                    self.block_comment()
                } else {
                    self.either('=', TokenKind::SlashEqual, TokenKind::Slash)
                }
            }
            '%' => self.either('=', TokenKind::PercentEqual, TokenKind::Percent),
            '!' => self.either('=', TokenKind::BangEqual, TokenKind::Bang),
            '=' => self.either('=', TokenKind::EqualEqual, TokenKind::Equal),
            '>' => self.either('=', TokenKind::GreaterEqual, TokenKind::Greater),
            '<' => self.either('=', TokenKind::LessEqual, TokenKind::Less),
            '&' => self.either('&', TokenKind::And, TokenKind::BitAnd),
            '|' => self.either('|', TokenKind::Or, TokenKind::BitOr),

            '"' => self.string(),
            c if c.is_ascii_digit() => self.number(),
            c if is_alpha(c) => self.identifier(),
            c => self.error_token(LexErrorKind::UnexpectedCharacter(c)),
        }
    }

    fn line_comment(&mut self) -> Token {
        while self.peek().is_some_and(|c| c != '\n') {
            self.advance();
        }
        self.make_token(TokenKind::LineComment)
    }

    fn block_comment(&mut self) -> Token {
        loop {
            match self.peek() {
                None => {
                    return self.error_token(LexErrorKind::UnterminatedBlockComment);
                }
                Some('*') if self.peek_next() == Some('/') => {
                    self.advance();
                    self.advance();
                    return self.make_token(TokenKind::BlockComment);
                }
                Some(_) => {
                    self.advance();
                }
            }
        }
    }

    fn string(&mut self) -> Token {
        while self.peek().is_some_and(|c| c != '"') {
            self.advance();
        }

        if !self.match_char('"') {
            return self.error_token(LexErrorKind::UnterminatedString);
        }

        // Strip the quotes; no escape decoding.
        let value = &self.input[self.start + 1..self.pos - 1];
        Token {
            kind: TokenKind::String,
            lexeme: value.to_string(),
            literal: Some(value.to_string()),
            span: self.start_span,
        }
    }

    fn number(&mut self) -> Token {
        self.digits();

        // A fractional part needs a digit after the dot.
        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
            self.digits();
        }

        let value = self.lexeme();
        Token {
            kind: TokenKind::Number,
            lexeme: value.to_string(),
            literal: Some(value.to_string()),
            span: self.start_span,
        }
    }

    fn digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
    }

    fn identifier(&mut self) -> Token {
        while self.peek().is_some_and(is_alphanumeric) {
            self.advance();
        }

        let kind = KEYWORDS
            .get(self.lexeme())
            .map_or(TokenKind::Identifier, |kw| TokenKind::Keyword(*kw));
        self.make_token(kind)
    }
}

const fn is_alpha(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

const fn is_alphanumeric(c: char) -> bool {
    is_alpha(c) || c.is_ascii_digit()
}
