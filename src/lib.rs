//! Scanner, parser, and formatter for Aster, a toy language with
//! space-themed keywords.
//!
//! The pipeline has two stages: [`scan`] turns source text into a
//! token stream that always ends with [`TokenKind::Eof`], and
//! [`parse`] turns that stream into a [`Program`] of statements.
//!
//! # Quick start
//!
//! ```
//! use aster::{scan, parse, format, Stmt};
//!
//! let tokens = scan("vacuum x = 5;");
//! let program = parse(&tokens).unwrap();
//! assert!(matches!(program.statements[0], Stmt::Var(_)));
//! assert_eq!(format(&program), "vacuum x = 5;\n");
//! ```
//!
//! Lexical errors do not stop the scanner; they appear in the stream
//! as [`TokenKind::Error`] tokens:
//!
//! ```
//! use aster::{scan, LexErrorKind, TokenKind};
//!
//! let tokens = scan("\"abc");
//! assert_eq!(tokens[0].kind, TokenKind::Error(LexErrorKind::UnterminatedString));
//! assert_eq!(tokens[0].lexeme, "Unterminated string.");
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod ast;
pub mod formatter;
pub mod parser;
pub mod scanner;
pub mod token;

pub use ast::{
    AssignExpr, BinaryExpr, Block, Expr, ForStmt, FunctionDecl, IfStmt, Program, ReturnStmt, Stmt,
    VarDecl, WhileStmt,
};
pub use formatter::format;
pub use parser::{MAX_DEPTH, ParseError, ParseErrorKind, parse};
pub use scanner::{LexError, LexErrorKind, lex_errors, scan};
pub use token::{Keyword, Span, Token, TokenKind};

/// Scan and parse a source string in one step.
pub fn parse_str(input: &str) -> Result<Program, ParseError> {
    let tokens = scan(input);
    parse(&tokens)
}
