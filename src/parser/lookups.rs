use std::collections::HashMap;

use crate::{
    ast::ast::{Expr, Stmt},
    lexer::tokens::TokenKind,
};

use super::{expr::*, parser::Parser, stmt::*};

/// Operator precedence, lowest first.
#[derive(PartialEq, PartialOrd, Clone, Copy, Debug)]
pub enum BindingPower {
    Default,
    Assignment,
    Logical,
    Equality,
    Relational,
    Additive,
    Multiplicative,
    Unary,
    Call,
    Index,
}

impl BindingPower {
    /// The next weaker level. `Default` has nothing below it.
    pub fn lower(self) -> BindingPower {
        match self {
            BindingPower::Default | BindingPower::Assignment => BindingPower::Default,
            BindingPower::Logical => BindingPower::Assignment,
            BindingPower::Equality => BindingPower::Logical,
            BindingPower::Relational => BindingPower::Equality,
            BindingPower::Additive => BindingPower::Relational,
            BindingPower::Multiplicative => BindingPower::Additive,
            BindingPower::Unary => BindingPower::Multiplicative,
            BindingPower::Call => BindingPower::Unary,
            BindingPower::Index => BindingPower::Call,
        }
    }
}

/// Deepest expression nesting `parse_expr` accepts.
pub const MAX_NESTING_DEPTH: usize = 64;

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Associativity {
    Left,
    Right,
}

pub type StmtHandler = fn(&mut Parser) -> Option<Stmt>;
pub type NUDHandler = fn(&mut Parser) -> Option<Expr>;
/// Called with `current` on the operator. The binding power is the one the
/// right operand must be parsed at.
pub type LEDHandler = fn(&mut Parser, Expr, BindingPower) -> Option<Expr>;

/// The grammar table. Operator precedence and associativity live only here.
pub fn create_token_lookups(parser: &mut Parser) {
    parser.led(
        TokenKind::Assignment,
        BindingPower::Assignment,
        Associativity::Right,
        parse_assignment_expr,
    );

    // Logical
    parser.led(TokenKind::And, BindingPower::Logical, Associativity::Left, parse_binary_expr);
    parser.led(TokenKind::Or, BindingPower::Logical, Associativity::Left, parse_binary_expr);

    // Equality and relational
    parser.led(TokenKind::Equals, BindingPower::Equality, Associativity::Left, parse_binary_expr);
    parser.led(
        TokenKind::NotEquals,
        BindingPower::Equality,
        Associativity::Left,
        parse_binary_expr,
    );
    parser.led(TokenKind::Less, BindingPower::Relational, Associativity::Left, parse_binary_expr);
    parser.led(
        TokenKind::LessEquals,
        BindingPower::Relational,
        Associativity::Left,
        parse_binary_expr,
    );
    parser.led(
        TokenKind::Greater,
        BindingPower::Relational,
        Associativity::Left,
        parse_binary_expr,
    );
    parser.led(
        TokenKind::GreaterEquals,
        BindingPower::Relational,
        Associativity::Left,
        parse_binary_expr,
    );

    // Additive and multiplicative
    parser.led(TokenKind::Plus, BindingPower::Additive, Associativity::Left, parse_binary_expr);
    parser.led(TokenKind::Dash, BindingPower::Additive, Associativity::Left, parse_binary_expr);
    parser.led(
        TokenKind::Star,
        BindingPower::Multiplicative,
        Associativity::Left,
        parse_binary_expr,
    );
    parser.led(
        TokenKind::Slash,
        BindingPower::Multiplicative,
        Associativity::Left,
        parse_binary_expr,
    );
    parser.led(
        TokenKind::Percent,
        BindingPower::Multiplicative,
        Associativity::Left,
        parse_binary_expr,
    );

    parser.led(TokenKind::OpenParen, BindingPower::Call, Associativity::Left, parse_call_expr);
    parser.led(TokenKind::OpenBracket, BindingPower::Index, Associativity::Left, parse_index_expr);

    // Literals and symbols
    parser.nud(TokenKind::Identifier, parse_identifier_expr);
    parser.nud(TokenKind::Number, parse_integer_expr);
    parser.nud(TokenKind::String, parse_string_expr);
    parser.nud(TokenKind::True, parse_boolean_expr);
    parser.nud(TokenKind::False, parse_boolean_expr);
    parser.nud(TokenKind::Not, parse_prefix_expr);
    parser.nud(TokenKind::Dash, parse_prefix_expr);
    parser.nud(TokenKind::OpenParen, parse_grouping_expr);
    parser.nud(TokenKind::OpenBracket, parse_array_expr);
    parser.nud(TokenKind::If, parse_if_expr);
    parser.nud(TokenKind::Fn, parse_function_expr);

    // Statements
    parser.stmt(TokenKind::Let, parse_let_stmt);
    parser.stmt(TokenKind::Return, parse_return_stmt);
}

// Lookup tables inside parser struct, so it's easier
pub type StmtLookup = HashMap<TokenKind, StmtHandler>;
pub type NUDLookup = HashMap<TokenKind, NUDHandler>;
pub type LEDLookup = HashMap<TokenKind, LEDHandler>;
pub type BPLookup = HashMap<TokenKind, BindingPower>;
pub type AssociativityLookup = HashMap<TokenKind, Associativity>;
