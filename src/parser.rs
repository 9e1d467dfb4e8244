use std::fmt;

use log::debug;

use crate::ast::{
    Block, Expr, ForStmt, FunctionDecl, IfStmt, Program, ReturnStmt, Stmt, VarDecl, WhileStmt,
};
use crate::scanner::LexErrorKind;
use crate::token::{Keyword, Span, Token, TokenKind};

/// Classifies a parser error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A required token is missing. `found` is `None` at end of input.
    ExpectedToken {
        expected: TokenKind,
        context: &'static str,
        found: Option<String>,
    },
    /// An expression is required but the next token cannot start one.
    ExpectedExpression { found: Option<String> },
    /// The parser reached a lexical error token.
    Lexical(LexErrorKind),
    /// Statements nest deeper than `MAX_DEPTH`.
    NestingTooDeep,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExpectedToken {
                expected,
                context,
                found,
            } => {
                write!(f, "expected {expected} {context}, ")?;
                write_found(f, found.as_deref())
            }
            Self::ExpectedExpression { found } => {
                write!(f, "expected expression, ")?;
                write_found(f, found.as_deref())
            }
            Self::Lexical(kind) => write!(f, "{kind}"),
            Self::NestingTooDeep => {
                write!(f, "statements nested deeper than {MAX_DEPTH} levels")
            }
        }
    }
}

fn write_found(f: &mut fmt::Formatter<'_>, found: Option<&str>) -> fmt::Result {
    match found {
        Some(text) => write!(f, "found '{text}'"),
        None => write!(f, "found end of input"),
    }
}

/// Deepest statement nesting accepted before parsing gives up.
pub const MAX_DEPTH: usize = 128;

/// Error produced during parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at line {}, column {}", span.line, span.column)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
}

/// Parse a token stream into a `Program`.
///
/// Newline and comment tokens are skipped. The stream is expected
/// to end with `TokenKind::Eof`, as produced by `scan`; a missing
/// sentinel is treated as end of input.
///
/// # Errors
///
/// Returns `ParseError` at the first point the grammar cannot
/// continue: a missing required token, a lexical error token where
/// the cursor stands, or nesting past `MAX_DEPTH`. No partial
/// program is returned.
pub fn parse(tokens: &[Token]) -> Result<Program, ParseError> {
    let result = Parser::new(tokens).parse();
    match &result {
        Ok(program) => debug!("parsed {} top-level statement(s)", program.len()),
        Err(err) => debug!("parse failed: {err}"),
    }
    result
}

struct Parser<'a> {
    tokens: Vec<&'a Token>,
    pos: usize,
    depth: usize,
    /// Position reported when the stream has no `Eof` token.
    end_span: Span,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        let end_span = tokens
            .last()
            .map_or(Span { line: 1, column: 1 }, |last| last.span);
        Self {
            tokens: tokens.iter().filter(|t| !t.kind.is_trivia()).collect(),
            pos: 0,
            depth: 0,
            end_span,
        }
    }

    fn parse(mut self) -> Result<Program, ParseError> {
        let mut statements = Vec::new();
        while !self.is_at_end() {
            statements.push(self.declaration()?);
        }
        Ok(Program { statements })
    }

    // -- Cursor --

    fn peek(&self) -> Option<&'a Token> {
        self.tokens
            .get(self.pos)
            .copied()
            .filter(|t| t.kind != TokenKind::Eof)
    }

    fn is_at_end(&self) -> bool {
        self.peek().is_none()
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek().is_some_and(|t| t.kind == kind)
    }

    fn check_type_keyword(&self) -> bool {
        self.peek().is_some_and(|t| t.kind.is_type_keyword())
    }

    fn match_kind(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn match_keyword(&mut self, keyword: Keyword) -> bool {
        self.match_kind(TokenKind::Keyword(keyword))
    }

    fn current_span(&self) -> Span {
        self.peek().map_or(self.end_span, |t| t.span)
    }

    fn found(&self) -> Option<String> {
        self.peek().map(|t| t.lexeme.clone())
    }

    /// Error at the cursor. A lexical error token under the cursor
    /// takes precedence over `kind`.
    fn error(&self, kind: ParseErrorKind) -> ParseError {
        match self.peek().and_then(Token::lex_error) {
            Some(lex) => ParseError {
                kind: ParseErrorKind::Lexical(lex.kind),
                span: lex.span,
            },
            None => ParseError {
                kind,
                span: self.current_span(),
            },
        }
    }

    /// Consume a token of `kind` or fail naming what was expected.
    fn expect(&mut self, kind: TokenKind, context: &'static str) -> Result<&'a Token, ParseError> {
        match self.peek() {
            Some(token) if token.kind == kind => {
                self.pos += 1;
                Ok(token)
            }
            _ => Err(self.error(ParseErrorKind::ExpectedToken {
                expected: kind,
                context,
                found: self.found(),
            })),
        }
    }

    // -- Declarations --

    fn declaration(&mut self) -> Result<Stmt, ParseError> {
        if !self.check_type_keyword() {
            return self.statement();
        }

        let ty = self.advance_cloned();
        let name = self.expect(TokenKind::Identifier, "after type")?.clone();

        if self.match_kind(TokenKind::LeftParen) {
            return self.function(ty, name);
        }
        self.var_declaration(ty, name, "after variable declaration")
    }

    /// Function form; `(` is already consumed. Parameters are not
    /// part of the grammar yet, so the list is always empty.
    fn function(&mut self, return_type: Token, name: Token) -> Result<Stmt, ParseError> {
        self.expect(TokenKind::RightParen, "after function parameters")?;
        let body = self.block()?;
        Ok(Stmt::Function(FunctionDecl {
            return_type,
            name,
            params: Vec::new(),
            body,
        }))
    }

    /// Variable form; type and name are already consumed.
    fn var_declaration(
        &mut self,
        ty: Token,
        name: Token,
        context: &'static str,
    ) -> Result<Stmt, ParseError> {
        let initializer = if self.match_kind(TokenKind::Equal) {
            Some(self.expression()?)
        } else {
            None
        };
        self.expect(TokenKind::Semicolon, context)?;
        Ok(Stmt::Var(VarDecl {
            ty,
            name,
            initializer,
        }))
    }

    /// Clone of the current token, which the caller has already checked.
    fn advance_cloned(&mut self) -> Token {
        let token = self.tokens[self.pos].clone();
        self.pos += 1;
        token
    }

    // -- Statements --

    /// Run `parse` one nesting level deeper.
    fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth == MAX_DEPTH {
            return Err(self.error(ParseErrorKind::NestingTooDeep));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// Body of a control statement.
    fn body(&mut self) -> Result<Box<Stmt>, ParseError> {
        self.nested(Self::statement).map(Box::new)
    }

    fn statement(&mut self) -> Result<Stmt, ParseError> {
        if self.match_keyword(Keyword::Phase) {
            return self.if_statement();
        }
        if self.match_keyword(Keyword::Rotate) {
            return self.for_statement();
        }
        if self.match_keyword(Keyword::Orbit) {
            return self.while_statement();
        }
        if self.match_keyword(Keyword::BlackHole) {
            return self.return_statement();
        }
        if self.match_keyword(Keyword::DarkMatter) {
            self.expect(TokenKind::Semicolon, "after 'darkMatter'")?;
            return Ok(Stmt::Break);
        }
        if self.match_keyword(Keyword::Warp) {
            self.expect(TokenKind::Semicolon, "after 'warp'")?;
            return Ok(Stmt::Continue);
        }
        if self.check(TokenKind::LeftBrace) {
            return Ok(Stmt::Block(self.block()?));
        }
        self.expression_statement()
    }

    fn block(&mut self) -> Result<Block, ParseError> {
        self.expect(TokenKind::LeftBrace, "to open block")?;
        let statements = self.nested(|parser| {
            let mut statements = Vec::new();
            while !parser.check(TokenKind::RightBrace) && !parser.is_at_end() {
                statements.push(parser.declaration()?);
            }
            Ok(statements)
        })?;
        self.expect(TokenKind::RightBrace, "to close block")?;
        Ok(Block { statements })
    }

    /// `( expression )` after a control keyword.
    fn condition(&mut self, keyword: &'static str) -> Result<Expr, ParseError> {
        self.expect(TokenKind::LeftParen, keyword)?;
        let condition = self.expression()?;
        self.expect(TokenKind::RightParen, "after condition")?;
        Ok(condition)
    }

    fn if_statement(&mut self) -> Result<Stmt, ParseError> {
        let condition = self.condition("after 'phase'")?;
        let then_branch = self.body()?;
        let else_branch = if self.match_keyword(Keyword::Eclipse) {
            Some(self.body()?)
        } else {
            None
        };
        Ok(Stmt::If(IfStmt {
            condition,
            then_branch,
            else_branch,
        }))
    }

    fn while_statement(&mut self) -> Result<Stmt, ParseError> {
        let condition = self.condition("after 'orbit'")?;
        let body = self.body()?;
        Ok(Stmt::While(WhileStmt { condition, body }))
    }

    fn for_statement(&mut self) -> Result<Stmt, ParseError> {
        self.expect(TokenKind::LeftParen, "after 'rotate'")?;

        let initializer = if self.match_kind(TokenKind::Semicolon) {
            None
        } else if self.check_type_keyword() {
            let ty = self.advance_cloned();
            let name = self.expect(TokenKind::Identifier, "after type")?.clone();
            Some(Box::new(self.var_declaration(ty, name, "after loop initializer")?))
        } else {
            let expr = self.expression()?;
            self.expect(TokenKind::Semicolon, "after loop initializer")?;
            Some(Box::new(Stmt::Expression(expr)))
        };

        let condition = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.expression()?)
        };
        self.expect(TokenKind::Semicolon, "after loop condition")?;

        let increment = if self.check(TokenKind::RightParen) {
            None
        } else {
            Some(self.expression()?)
        };
        self.expect(TokenKind::RightParen, "after loop clauses")?;

        let body = self.body()?;
        Ok(Stmt::For(ForStmt {
            initializer,
            condition,
            increment,
            body,
        }))
    }

    fn return_statement(&mut self) -> Result<Stmt, ParseError> {
        let value = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.expression()?)
        };
        self.expect(TokenKind::Semicolon, "after return value")?;
        Ok(Stmt::Return(ReturnStmt { value }))
    }

    fn expression_statement(&mut self) -> Result<Stmt, ParseError> {
        let expr = self.expression()?;
        self.expect(TokenKind::Semicolon, "after expression")?;
        Ok(Stmt::Expression(expr))
    }

    // -- Expressions --

    fn expression(&mut self) -> Result<Expr, ParseError> {
        self.term()
    }

    fn term(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.factor()?;
        while let Some(op) = self.match_operator(&[TokenKind::Plus, TokenKind::Minus]) {
            let right = self.factor()?;
            expr = Expr::binary(expr, op, right);
        }
        Ok(expr)
    }

    fn factor(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.primary()?;
        while let Some(op) = self.match_operator(&[TokenKind::Star, TokenKind::Slash]) {
            let right = self.primary()?;
            expr = Expr::binary(expr, op, right);
        }
        Ok(expr)
    }

    fn match_operator(&mut self, kinds: &[TokenKind]) -> Option<Token> {
        let token = self.peek()?;
        if kinds.contains(&token.kind) {
            self.pos += 1;
            Some(token.clone())
        } else {
            None
        }
    }

    fn primary(&mut self) -> Result<Expr, ParseError> {
        match self.peek().map(|t| t.kind) {
            Some(TokenKind::Number | TokenKind::String) => {
                Ok(Expr::Literal(self.advance_cloned()))
            }
            Some(TokenKind::Keyword(kw)) if kw.is_boolean() => {
                Ok(Expr::Literal(self.advance_cloned()))
            }
            Some(TokenKind::Identifier) => Ok(Expr::Variable(self.advance_cloned())),
            _ => Err(self.error(ParseErrorKind::ExpectedExpression {
                found: self.found(),
            })),
        }
    }
}
