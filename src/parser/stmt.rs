use log::trace;

use crate::{
    ast::{
        ast::Stmt,
        expressions::Identifier,
        statements::{BlockStmt, ExpressionStmt, LetStmt, ReturnStmt},
    },
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
};

use super::parser::Parser;

/// Dispatches on `current`. Tokens without a statement handler start an
/// expression statement; a lone `;` is an empty statement.
pub fn parse_stmt(parser: &mut Parser) -> Option<Stmt> {
    let kind = parser.current_token_kind();
    trace!("Parsing statement at {}", parser.current_token());

    if let Some(handler) = parser.get_stmt_lookup().get(&kind).copied() {
        return handler(parser);
    }

    if kind == TokenKind::Semicolon {
        return None;
    }

    parse_expression_stmt(parser)
}

/// `let IDENT = EXPR ;`
pub fn parse_let_stmt(parser: &mut Parser) -> Option<Stmt> {
    let token = parser.current_token().clone();

    if !parser.expect(TokenKind::Identifier) {
        parser.synchronize();
        return None;
    }

    let name = Identifier::from_token(parser.current_token());

    if !parser.expect(TokenKind::Assignment) {
        parser.synchronize();
        return None;
    }

    parser.advance();

    let Some(value) = parse_expr(parser, BindingPower::Default) else {
        parser.synchronize();
        return None;
    };

    parser.expect_terminator();

    Some(Stmt::Let(LetStmt { token, name, value }))
}

/// `return [EXPR] ;`
pub fn parse_return_stmt(parser: &mut Parser) -> Option<Stmt> {
    let token = parser.current_token().clone();

    if parser.peek_is(TokenKind::Semicolon) {
        parser.advance();
        return Some(Stmt::Return(ReturnStmt { token, value: None }));
    }

    if parser.peek_is(TokenKind::CloseCurly) {
        return Some(Stmt::Return(ReturnStmt { token, value: None }));
    }

    parser.advance();

    let Some(value) = parse_expr(parser, BindingPower::Default) else {
        parser.synchronize();
        return None;
    };

    parser.expect_terminator();

    Some(Stmt::Return(ReturnStmt {
        token,
        value: Some(value),
    }))
}

/// `EXPR [;]`
pub fn parse_expression_stmt(parser: &mut Parser) -> Option<Stmt> {
    let token = parser.current_token().clone();

    let Some(expression) = parse_expr(parser, BindingPower::Default) else {
        parser.synchronize();
        return None;
    };

    if parser.peek_is(TokenKind::Semicolon) {
        parser.advance();
    }

    Some(Stmt::Expression(ExpressionStmt { token, expression }))
}

/// `{ STMT* }`, entered with `current` on `{` and left on `}`.
///
/// Running into `EOF` first is reported and yields `None`.
pub fn parse_block_stmt(parser: &mut Parser) -> Option<BlockStmt> {
    let token = parser.current_token().clone();
    parser.advance();

    let mut statements = Vec::new();
    while !parser.current_is(TokenKind::CloseCurly) {
        if parser.current_is(TokenKind::EOF) {
            parser.peek_error(TokenKind::CloseCurly);
            return None;
        }

        if let Some(stmt) = parse_stmt(parser) {
            statements.push(stmt);
        }
        // A statement that broke off on this block's `}` leaves it in `current`
        if !parser.take_stopped_at_close_curly() {
            parser.advance();
        }
    }

    Some(BlockStmt { token, statements })
}
