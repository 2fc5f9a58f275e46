use std::fmt::{Debug, Display};

use crate::{lexer::tokens::Token, Span};

use super::{
    expressions::{
        ArrayExpr, AssignmentExpr, BinaryExpr, BooleanExpr, CallExpr, FunctionExpr, Identifier,
        IfExpr, IndexExpr, IntegerExpr, PrefixExpr, StringExpr,
    },
    statements::{ExpressionStmt, LetStmt, ReturnStmt},
};

/// Root of the tree: top-level statements in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

impl Program {
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for stmt in &self.statements {
            writeln!(f, "{}", stmt)?;
        }
        Ok(())
    }
}

/// Statement kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Let(LetStmt),
    Return(ReturnStmt),
    Expression(ExpressionStmt),
}

impl Stmt {
    /// The token the statement started at.
    pub fn token(&self) -> &Token {
        match self {
            Stmt::Let(stmt) => &stmt.token,
            Stmt::Return(stmt) => &stmt.token,
            Stmt::Expression(stmt) => &stmt.token,
        }
    }

    pub fn get_span(&self) -> &Span {
        &self.token().span
    }
}

impl Display for Stmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stmt::Let(stmt) => write!(f, "let {} = {};", stmt.name, stmt.value),
            Stmt::Return(ReturnStmt { value: Some(value), .. }) => write!(f, "return {};", value),
            Stmt::Return(ReturnStmt { value: None, .. }) => write!(f, "return;"),
            Stmt::Expression(stmt) => write!(f, "{}", stmt.expression),
        }
    }
}

/// Expression kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Identifier(Identifier),
    Integer(IntegerExpr),
    String(StringExpr),
    Boolean(BooleanExpr),
    Prefix(PrefixExpr),
    Binary(BinaryExpr),
    Assignment(AssignmentExpr),
    If(IfExpr),
    Function(FunctionExpr),
    Call(CallExpr),
    Array(ArrayExpr),
    Index(IndexExpr),
}

impl Expr {
    pub fn token(&self) -> &Token {
        match self {
            Expr::Identifier(expr) => &expr.token,
            Expr::Integer(expr) => &expr.token,
            Expr::String(expr) => &expr.token,
            Expr::Boolean(expr) => &expr.token,
            Expr::Prefix(expr) => &expr.token,
            Expr::Binary(expr) => &expr.token,
            Expr::Assignment(expr) => &expr.token,
            Expr::If(expr) => &expr.token,
            Expr::Function(expr) => &expr.token,
            Expr::Call(expr) => &expr.token,
            Expr::Array(expr) => &expr.token,
            Expr::Index(expr) => &expr.token,
        }
    }

    pub fn get_span(&self) -> &Span {
        &self.token().span
    }
}

// Fully parenthesized so tests can compare operator binding as text.
impl Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Identifier(expr) => write!(f, "{}", expr),
            Expr::Integer(expr) => write!(f, "{}", expr.value),
            Expr::String(expr) => write!(f, "{:?}", expr.value),
            Expr::Boolean(expr) => write!(f, "{}", expr.value),
            Expr::Prefix(expr) => write!(f, "({}{})", expr.operator.value, expr.right),
            Expr::Binary(expr) => {
                write!(f, "({} {} {})", expr.left, expr.operator.value, expr.right)
            }
            Expr::Assignment(expr) => write!(f, "({} = {})", expr.assignee, expr.value),
            Expr::If(expr) => {
                write!(f, "if {} {}", expr.condition, expr.consequence)?;
                if let Some(alternative) = &expr.alternative {
                    write!(f, " else {}", alternative)?;
                }
                Ok(())
            }
            Expr::Function(expr) => {
                let parameters: Vec<String> =
                    expr.parameters.iter().map(|p| p.to_string()).collect();
                write!(f, "fn({}) {}", parameters.join(", "), expr.body)
            }
            Expr::Call(expr) => write!(f, "{}({})", expr.callee, join(&expr.arguments)),
            Expr::Array(expr) => write!(f, "[{}]", join(&expr.elements)),
            Expr::Index(expr) => write!(f, "({}[{}])", expr.left, expr.index),
        }
    }
}

fn join(exprs: &[Expr]) -> String {
    exprs.iter().map(|expr| expr.to_string()).collect::<Vec<_>>().join(", ")
}
