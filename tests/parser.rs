//! Parser structure, edge cases, and error tests.

mod common;

use aster::{
    Expr, Keyword, LexErrorKind, MAX_DEPTH, ParseErrorKind, Span, Stmt, TokenKind, parse,
    parse_str, scan,
};
use common::parse_ok;

// -----------------------------------------------------------
// Declarations.
// -----------------------------------------------------------

#[test]
fn parse_empty_program() {
    let program = parse_ok("");
    assert!(program.is_empty());
}

#[test]
fn parse_comments_only() {
    let program = parse_ok("// nothing here\n/* still nothing */\n");
    assert!(program.is_empty());
}

#[test]
fn parse_each_type_keyword() {
    let program = parse_ok("vacuum a; mass b; flux c; quantum d;");
    let types: Vec<_> = program
        .statements
        .iter()
        .map(|stmt| match stmt {
            Stmt::Var(var) => var.ty.kind,
            other => panic!("unexpected statement {other:?}"),
        })
        .collect();
    assert_eq!(
        types,
        vec![
            TokenKind::Keyword(Keyword::Vacuum),
            TokenKind::Keyword(Keyword::Mass),
            TokenKind::Keyword(Keyword::Flux),
            TokenKind::Keyword(Keyword::Quantum),
        ]
    );
}

#[test]
fn parse_nested_declarations() {
    let program = parse_ok("vacuum outer() { mass x = 1; vacuum inner() { flux y; } }");
    let Stmt::Function(outer) = &program.statements[0] else {
        panic!("expected function");
    };
    assert_eq!(outer.body.statements.len(), 2);
    let Stmt::Function(inner) = &outer.body.statements[1] else {
        panic!("expected nested function");
    };
    assert_eq!(inner.name.lexeme, "inner");
    assert!(matches!(inner.body.statements[0], Stmt::Var(_)));
}

#[test]
fn parse_declaration_keeps_tokens() {
    let program = parse_ok("\n  mass total = 10;");
    let Stmt::Var(var) = &program.statements[0] else {
        panic!("expected variable declaration");
    };
    assert_eq!(var.ty.span, Span { line: 2, column: 3 });
    assert_eq!(var.name.span, Span { line: 2, column: 8 });
}

// -----------------------------------------------------------
// Statements.
// -----------------------------------------------------------

#[test]
fn parse_while_single_statement_body() {
    let program = parse_ok("orbit (x) warp; darkMatter;");
    assert_eq!(program.len(), 2);
    let Stmt::While(while_stmt) = &program.statements[0] else {
        panic!("expected while");
    };
    assert!(matches!(&while_stmt.condition, Expr::Variable(t) if t.lexeme == "x"));
    assert_eq!(*while_stmt.body, Stmt::Continue);
    assert_eq!(program.statements[1], Stmt::Break);
}

#[test]
fn parse_dangling_else_binds_inner() {
    let program = parse_ok("phase (a) phase (b) warp; eclipse darkMatter;");
    let Stmt::If(outer) = &program.statements[0] else {
        panic!("expected if");
    };
    assert!(outer.else_branch.is_none());
    let Stmt::If(inner) = &*outer.then_branch else {
        panic!("expected nested if");
    };
    assert_eq!(inner.else_branch.as_deref(), Some(&Stmt::Break));
}

#[test]
fn parse_for_expression_initializer() {
    let program = parse_ok("rotate (i; i; 1) warp;");
    let Stmt::For(for_stmt) = &program.statements[0] else {
        panic!("expected for");
    };
    assert!(matches!(
        for_stmt.initializer.as_deref(),
        Some(Stmt::Expression(Expr::Variable(_)))
    ));
}

#[test]
fn parse_for_without_initializer_value() {
    let program = parse_ok("rotate (mass i; ; ) { }");
    let Stmt::For(for_stmt) = &program.statements[0] else {
        panic!("expected for");
    };
    assert!(matches!(
        for_stmt.initializer.as_deref(),
        Some(Stmt::Var(var)) if var.initializer.is_none()
    ));
    assert!(for_stmt.condition.is_none());
    assert!(for_stmt.increment.is_none());
}

#[test]
fn parse_return_with_value() {
    let program = parse_ok("blackHole 1 + x;");
    let Stmt::Return(ret) = &program.statements[0] else {
        panic!("expected return");
    };
    assert!(matches!(&ret.value, Some(Expr::Binary(b)) if b.operator.kind == TokenKind::Plus));
}

#[test]
fn parse_literal_primaries() {
    let program = parse_ok("\"text\"; truth; starlight; voidness; 1.5;");
    let literals: Vec<_> = program
        .statements
        .iter()
        .map(|stmt| match stmt {
            Stmt::Expression(Expr::Literal(token)) => token.lexeme.as_str(),
            other => panic!("unexpected statement {other:?}"),
        })
        .collect();
    assert_eq!(literals, vec!["text", "truth", "starlight", "voidness", "1.5"]);
}

#[test]
fn parse_binary_keeps_operator_token() {
    let program = parse_ok("a / b;");
    let Stmt::Expression(Expr::Binary(div)) = &program.statements[0] else {
        panic!("expected binary");
    };
    assert_eq!(div.operator.lexeme, "/");
    assert_eq!(div.operator.span, Span { line: 1, column: 3 });
    assert_eq!(div.left.first_token().lexeme, "a");
}

// -----------------------------------------------------------
// Errors.
// -----------------------------------------------------------

#[test]
fn parse_error_missing_name() {
    let err = parse_str("mass = 3;").unwrap_err();
    assert_eq!(
        err.kind,
        ParseErrorKind::ExpectedToken {
            expected: TokenKind::Identifier,
            context: "after type",
            found: Some("=".to_string()),
        }
    );
    assert_eq!(err.span, Span { line: 1, column: 6 });
}

#[test]
fn parse_error_function_needs_block() {
    let err = parse_str("vacuum main() blackHole;").unwrap_err();
    assert!(matches!(
        err.kind,
        ParseErrorKind::ExpectedToken {
            expected: TokenKind::LeftBrace,
            ..
        }
    ));
}

#[test]
fn parse_error_parameters_not_supported() {
    let err = parse_str("vacuum main(mass x) { }").unwrap_err();
    assert!(matches!(
        err.kind,
        ParseErrorKind::ExpectedToken {
            expected: TokenKind::RightParen,
            ..
        }
    ));
}

#[test]
fn parse_error_unclosed_block() {
    let err = parse_str("{\n\tmass x;\n").unwrap_err();
    assert_eq!(
        err.kind,
        ParseErrorKind::ExpectedToken {
            expected: TokenKind::RightBrace,
            context: "to close block",
            found: None,
        }
    );
    assert_eq!(err.span, Span { line: 3, column: 1 });
}

#[test]
fn parse_error_expected_expression() {
    let err = parse_str("blackHole );").unwrap_err();
    assert_eq!(
        err.kind,
        ParseErrorKind::ExpectedExpression {
            found: Some(")".to_string())
        }
    );
}

#[test]
fn parse_error_declaration_as_control_body() {
    let err = parse_str("orbit (x) mass y;").unwrap_err();
    assert!(matches!(err.kind, ParseErrorKind::ExpectedExpression { .. }));
}

#[test]
fn parse_error_comparison_not_reachable() {
    let err = parse_str("x < 1;").unwrap_err();
    assert!(matches!(
        err.kind,
        ParseErrorKind::ExpectedToken {
            expected: TokenKind::Semicolon,
            found: Some(ref found),
            ..
        } if found == "<"
    ));
}

#[test]
fn parse_error_assignment_not_reachable() {
    let err = parse_str("x = 1;").unwrap_err();
    assert!(matches!(
        err.kind,
        ParseErrorKind::ExpectedToken {
            expected: TokenKind::Semicolon,
            ..
        }
    ));
}

#[test]
fn parse_error_break_needs_semicolon() {
    let err = parse_str("darkMatter").unwrap_err();
    assert_eq!(
        err.to_string(),
        "expected ';' after 'darkMatter', found end of input at line 1, column 11"
    );
}

#[test]
fn parse_error_reports_first_lexical_error() {
    let err = parse_str("mass x = 1; @ /* open").unwrap_err();
    assert_eq!(
        err.kind,
        ParseErrorKind::Lexical(LexErrorKind::UnexpectedCharacter('@'))
    );
    assert_eq!(err.span, Span { line: 1, column: 13 });
    assert_eq!(
        err.to_string(),
        "unexpected character '@' at line 1, column 13"
    );
}

#[test]
fn parse_error_syntax_before_bad_character() {
    let err = parse_str("mass x = ; @").unwrap_err();
    assert_eq!(
        err.kind,
        ParseErrorKind::ExpectedExpression {
            found: Some(";".to_string())
        }
    );
    assert_eq!(err.span, Span { line: 1, column: 10 });
}

#[test]
fn parse_error_lexical_token_where_terminal_expected() {
    let err = parse_str("mass x @ 1;").unwrap_err();
    assert_eq!(
        err.kind,
        ParseErrorKind::Lexical(LexErrorKind::UnexpectedCharacter('@'))
    );
    assert_eq!(err.span, Span { line: 1, column: 8 });
}

// -----------------------------------------------------------
// Nesting depth.
// -----------------------------------------------------------

#[test]
fn parse_moderate_nesting() {
    let depth = MAX_DEPTH / 2;
    let program = parse_ok(&format!("{}{}", "{".repeat(depth), "}".repeat(depth)));
    assert_eq!(program.len(), 1);
}

#[test]
fn parse_error_deep_blocks() {
    let input = format!("{}{}", "{".repeat(10_000), "}".repeat(10_000));
    let err = parse_str(&input).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::NestingTooDeep);
    assert_eq!(
        err.span,
        Span {
            line: 1,
            column: MAX_DEPTH + 2
        }
    );
}

#[test]
fn parse_error_deep_control_bodies() {
    let input = format!("{}warp;", "phase (x) ".repeat(10_000));
    let err = parse_str(&input).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::NestingTooDeep);
}

#[test]
fn parse_error_deep_functions() {
    let input = format!("{}{}", "vacuum f() { ".repeat(10_000), "}".repeat(10_000));
    let err = parse_str(&input).unwrap_err();
    let column = 13 * (MAX_DEPTH + 1) + 1;
    assert_eq!(
        err.to_string(),
        format!("statements nested deeper than {MAX_DEPTH} levels at line 1, column {column}")
    );
}

#[test]
fn parse_without_sentinel() {
    let mut tokens = scan("mass x;");
    tokens.pop();
    let program = parse(&tokens).expect("parse failed");
    assert_eq!(program.len(), 1);
}

#[test]
fn parse_error_without_sentinel_uses_last_token() {
    let mut tokens = scan("mass x");
    tokens.pop();
    let err = parse(&tokens).unwrap_err();
    assert_eq!(err.span, Span { line: 1, column: 6 });
}
