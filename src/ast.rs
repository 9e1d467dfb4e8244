use crate::token::Token;

/// A parsed source file: its top-level statements in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

/// Statement nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    /// `mass x = 1;`
    Var(VarDecl),
    /// `vacuum main() { ... }`
    Function(FunctionDecl),
    Block(Block),
    /// Expression followed by `;`.
    Expression(Expr),
    /// `phase (cond) ... eclipse ...`
    If(IfStmt),
    /// `orbit (cond) ...`
    While(WhileStmt),
    /// `rotate (init; cond; incr) ...`
    For(ForStmt),
    /// `blackHole value;`
    Return(ReturnStmt),
    /// `darkMatter;`
    Break,
    /// `warp;`
    Continue,
}

/// Variable declaration with an optional initializer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarDecl {
    /// The type keyword token.
    pub ty: Token,
    pub name: Token,
    pub initializer: Option<Expr>,
}

/// Function declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDecl {
    pub return_type: Token,
    pub name: Token,
    /// Always empty: the grammar does not accept parameters yet.
    pub params: Vec<Token>,
    pub body: Block,
}

/// Brace-delimited statement list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block {
    pub statements: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IfStmt {
    pub condition: Expr,
    pub then_branch: Box<Stmt>,
    pub else_branch: Option<Box<Stmt>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhileStmt {
    pub condition: Expr,
    pub body: Box<Stmt>,
}

/// C-style loop. Every header clause is optional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForStmt {
    /// `Stmt::Var` or `Stmt::Expression`.
    pub initializer: Option<Box<Stmt>>,
    pub condition: Option<Expr>,
    pub increment: Option<Expr>,
    pub body: Box<Stmt>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnStmt {
    pub value: Option<Expr>,
}

/// Expression nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Binary(BinaryExpr),
    /// Number, string, or boolean keyword token.
    Literal(Token),
    /// Identifier reference.
    Variable(Token),
    /// `name = value`. Not produced by the parser yet.
    Assign(AssignExpr),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryExpr {
    pub left: Box<Expr>,
    pub operator: Token,
    pub right: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignExpr {
    pub name: Token,
    pub value: Box<Expr>,
}

impl Expr {
    /// Build a binary node, boxing both operands.
    #[must_use]
    pub fn binary(left: Self, operator: Token, right: Self) -> Self {
        Self::Binary(BinaryExpr {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        })
    }

    /// Build an assignment node.
    #[must_use]
    pub fn assign(name: Token, value: Self) -> Self {
        Self::Assign(AssignExpr {
            name,
            value: Box::new(value),
        })
    }

    /// The token at the start of this expression, for diagnostics.
    #[must_use]
    pub fn first_token(&self) -> &Token {
        match self {
            Self::Binary(binary) => binary.left.first_token(),
            Self::Literal(token) | Self::Variable(token) => token,
            Self::Assign(assign) => &assign.name,
        }
    }
}

impl Program {
    /// Number of top-level statements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}
