//! Pretty-printer that serializes an AST back into canonical source.
//!
//! Produces tab-indented output with one statement per line.

use std::fmt::{self, Write as _};

use crate::ast::{Block, Expr, ForStmt, IfStmt, Program, Stmt};
use crate::token::TokenKind;

/// Format a `Program` into canonical source text.
///
/// Block bodies of control statements stay on the header line;
/// any other body moves to the next line, one level deeper.
///
/// Output parses back to an equal tree for every `Program` that
/// `parse` can produce. Hand-built trees may hold nodes the grammar
/// has no syntax for (`Expr::Assign`, a grouped operand such as
/// `(1 + 2) * 3`); they are printed in conventional notation but do
/// not parse again.
#[must_use]
pub fn format(program: &Program) -> String {
    let mut out = String::new();
    for stmt in &program.statements {
        format_stmt(&mut out, stmt, 0);
    }
    out
}

fn indent(out: &mut String, level: usize) {
    for _ in 0..level {
        out.push('\t');
    }
}

/// One statement on its own line(s), including indentation and the
/// trailing newline.
fn format_stmt(out: &mut String, stmt: &Stmt, level: usize) {
    indent(out, level);
    write_stmt(out, stmt, level);
    out.push('\n');
}

/// Statement text starting at the current position, without a
/// trailing newline. `level` is the indentation of the line the
/// statement starts on.
fn write_stmt(out: &mut String, stmt: &Stmt, level: usize) {
    match stmt {
        Stmt::Var(var) => {
            let _ = write!(out, "{} {}", var.ty.lexeme, var.name.lexeme);
            if let Some(init) = &var.initializer {
                let _ = write!(out, " = {init}");
            }
            out.push(';');
        }
        Stmt::Function(func) => {
            let _ = write!(out, "{} {}() ", func.return_type.lexeme, func.name.lexeme);
            write_block(out, &func.body, level);
        }
        Stmt::Block(block) => write_block(out, block, level),
        Stmt::Expression(expr) => {
            let _ = write!(out, "{expr};");
        }
        Stmt::If(if_stmt) => write_if(out, if_stmt, level),
        Stmt::While(while_stmt) => {
            let _ = write!(out, "orbit ({})", while_stmt.condition);
            write_body(out, &while_stmt.body, level);
        }
        Stmt::For(for_stmt) => write_for(out, for_stmt, level),
        Stmt::Return(ret) => {
            out.push_str("blackHole");
            if let Some(value) = &ret.value {
                let _ = write!(out, " {value}");
            }
            out.push(';');
        }
        Stmt::Break => out.push_str("darkMatter;"),
        Stmt::Continue => out.push_str("warp;"),
    }
}

fn write_block(out: &mut String, block: &Block, level: usize) {
    if block.statements.is_empty() {
        out.push_str("{ }");
        return;
    }
    out.push_str("{\n");
    for stmt in &block.statements {
        format_stmt(out, stmt, level + 1);
    }
    indent(out, level);
    out.push('}');
}

/// Body of a control statement, written after its header.
fn write_body(out: &mut String, body: &Stmt, level: usize) {
    if let Stmt::Block(block) = body {
        out.push(' ');
        write_block(out, block, level);
    } else {
        out.push('\n');
        indent(out, level + 1);
        write_stmt(out, body, level + 1);
    }
}

fn write_if(out: &mut String, if_stmt: &IfStmt, level: usize) {
    let _ = write!(out, "phase ({})", if_stmt.condition);
    write_body(out, &if_stmt.then_branch, level);

    if let Some(else_branch) = &if_stmt.else_branch {
        if matches!(*if_stmt.then_branch, Stmt::Block(_)) {
            out.push(' ');
        } else {
            out.push('\n');
            indent(out, level);
        }
        out.push_str("eclipse");
        if let Stmt::If(chained) = &**else_branch {
            out.push(' ');
            write_if(out, chained, level);
        } else {
            write_body(out, else_branch, level);
        }
    }
}

fn write_for(out: &mut String, for_stmt: &ForStmt, level: usize) {
    out.push_str("rotate (");
    // The initializer carries its own `;`.
    match for_stmt.initializer.as_deref() {
        Some(init) => write_stmt(out, init, level),
        None => out.push(';'),
    }
    if let Some(condition) = &for_stmt.condition {
        let _ = write!(out, " {condition}");
    }
    out.push(';');
    if let Some(increment) = &for_stmt.increment {
        let _ = write!(out, " {increment}");
    }
    out.push(')');
    write_body(out, &for_stmt.body, level);
}

/// Binding strength used to decide where parentheses are needed.
fn precedence(expr: &Expr) -> u8 {
    match expr {
        Expr::Assign(_) => 0,
        Expr::Binary(binary) => match binary.operator.kind {
            TokenKind::Plus | TokenKind::Minus => 1,
            _ => 2,
        },
        Expr::Literal(_) | Expr::Variable(_) => u8::MAX,
    }
}

fn write_operand(f: &mut fmt::Formatter<'_>, operand: &Expr, parens: bool) -> fmt::Result {
    if parens {
        write!(f, "({operand})")
    } else {
        write!(f, "{operand}")
    }
}

/// Source form of an expression. Parentheses appear only where the
/// tree shape differs from what left-associative parsing produces.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Binary(binary) => {
                let own = precedence(self);
                write_operand(f, &binary.left, precedence(&binary.left) < own)?;
                write!(f, " {} ", binary.operator.lexeme)?;
                write_operand(f, &binary.right, precedence(&binary.right) <= own)
            }
            Self::Literal(token) if token.kind == TokenKind::String => {
                write!(f, "\"{}\"", token.lexeme)
            }
            Self::Literal(token) | Self::Variable(token) => f.write_str(&token.lexeme),
            Self::Assign(assign) => write!(f, "{} = {}", assign.name.lexeme, assign.value),
        }
    }
}
