use crate::{
    ast::{
        ast::Expr,
        expressions::{
            ArrayExpr, AssignmentExpr, BinaryExpr, BooleanExpr, CallExpr, FunctionExpr, Identifier,
            IfExpr, IndexExpr, IntegerExpr, PrefixExpr, StringExpr,
        },
    },
    errors::errors::ErrorImpl,
    lexer::tokens::TokenKind,
};

use super::{lookups::BindingPower, parser::Parser, stmt::parse_block_stmt};

/// Precedence climbing, entered with `current` on the first token of the
/// expression and left on its last token.
pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Option<Expr> {
    if !parser.enter_nesting() {
        return None;
    }

    let expr = parse_nested_expr(parser, bp);
    parser.leave_nesting();

    expr
}

fn parse_nested_expr(parser: &mut Parser, bp: BindingPower) -> Option<Expr> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let Some(nud) = parser.get_nud_lookup().get(&token_kind).copied() else {
        let position = parser.current_token().span.start.clone();
        parser.error(ErrorImpl::NoPrefixParseFn { kind: token_kind }, position);
        if token_kind == TokenKind::CloseCurly {
            parser.stop_at_close_curly();
        }
        return None;
    };

    let mut left = nud(parser)?;

    // While the next operator binds tighter than the caller, it takes `left` as its lhs
    while bp < parser.peek_binding_power() {
        let token_kind = parser.peek_token_kind();
        let Some(led) = parser.get_led_lookup().get(&token_kind).copied() else {
            return Some(left);
        };

        parser.advance();
        let right_bp = parser.right_binding_power(token_kind);
        left = led(parser, left, right_bp)?;
    }

    Some(left)
}

pub fn parse_identifier_expr(parser: &mut Parser) -> Option<Expr> {
    Some(Expr::Identifier(Identifier::from_token(parser.current_token())))
}

pub fn parse_integer_expr(parser: &mut Parser) -> Option<Expr> {
    let token = parser.current_token().clone();

    match token.value.parse::<i64>() {
        Ok(value) => Some(Expr::Integer(IntegerExpr { token, value })),
        Err(_) => {
            parser.error(
                ErrorImpl::NumberParseError {
                    token: token.value.clone(),
                },
                token.span.start,
            );
            None
        }
    }
}

pub fn parse_string_expr(parser: &mut Parser) -> Option<Expr> {
    let token = parser.current_token().clone();
    let value = token.value.clone();

    Some(Expr::String(StringExpr { token, value }))
}

pub fn parse_boolean_expr(parser: &mut Parser) -> Option<Expr> {
    let token = parser.current_token().clone();
    let value = token.kind == TokenKind::True;

    Some(Expr::Boolean(BooleanExpr { token, value }))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Option<Expr> {
    let operator = parser.advance();
    let right = parse_expr(parser, BindingPower::Unary)?;

    Some(Expr::Prefix(PrefixExpr {
        token: operator.clone(),
        operator,
        right: Box::new(right),
    }))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Option<Expr> {
    parser.advance();
    let expr = parse_expr(parser, BindingPower::Default)?;

    if !parser.expect(TokenKind::CloseParen) {
        return None;
    }

    Some(expr)
}

/// `if ( EXPR ) BLOCK [else BLOCK]`
pub fn parse_if_expr(parser: &mut Parser) -> Option<Expr> {
    let token = parser.current_token().clone();

    if !parser.expect(TokenKind::OpenParen) {
        return None;
    }

    parser.advance();
    let condition = parse_expr(parser, BindingPower::Default)?;

    if !parser.expect(TokenKind::CloseParen) || !parser.expect(TokenKind::OpenCurly) {
        return None;
    }

    let consequence = parse_block_stmt(parser)?;

    let alternative = if parser.peek_is(TokenKind::Else) {
        parser.advance();

        if !parser.expect(TokenKind::OpenCurly) {
            return None;
        }

        Some(parse_block_stmt(parser)?)
    } else {
        None
    };

    Some(Expr::If(IfExpr {
        token,
        condition: Box::new(condition),
        consequence,
        alternative,
    }))
}

/// `fn ( [IDENT {, IDENT}] ) BLOCK`
pub fn parse_function_expr(parser: &mut Parser) -> Option<Expr> {
    let token = parser.current_token().clone();

    if !parser.expect(TokenKind::OpenParen) {
        return None;
    }

    let parameters = parse_function_parameters(parser)?;

    if !parser.expect(TokenKind::OpenCurly) {
        return None;
    }

    let body = parse_block_stmt(parser)?;

    Some(Expr::Function(FunctionExpr {
        token,
        parameters,
        body,
    }))
}

fn parse_function_parameters(parser: &mut Parser) -> Option<Vec<Identifier>> {
    let mut parameters = Vec::new();

    if parser.peek_is(TokenKind::CloseParen) {
        parser.advance();
        return Some(parameters);
    }

    if !parser.expect(TokenKind::Identifier) {
        return None;
    }
    parameters.push(Identifier::from_token(parser.current_token()));

    while parser.peek_is(TokenKind::Comma) {
        parser.advance();

        if !parser.expect(TokenKind::Identifier) {
            return None;
        }
        parameters.push(Identifier::from_token(parser.current_token()));
    }

    if !parser.expect(TokenKind::CloseParen) {
        return None;
    }

    Some(parameters)
}

pub fn parse_array_expr(parser: &mut Parser) -> Option<Expr> {
    let token = parser.current_token().clone();
    let elements = parse_expr_list(parser, TokenKind::CloseBracket)?;

    Some(Expr::Array(ArrayExpr { token, elements }))
}

/// Comma separated expressions up to `end`, entered with `current` on the
/// opening delimiter and left on `end`.
fn parse_expr_list(parser: &mut Parser, end: TokenKind) -> Option<Vec<Expr>> {
    let mut list = Vec::new();

    if parser.peek_is(end) {
        parser.advance();
        return Some(list);
    }

    parser.advance();
    list.push(parse_expr(parser, BindingPower::Default)?);

    while parser.peek_is(TokenKind::Comma) {
        parser.advance();
        parser.advance();
        list.push(parse_expr(parser, BindingPower::Default)?);
    }

    if !parser.expect(end) {
        return None;
    }

    Some(list)
}

pub fn parse_binary_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Option<Expr> {
    let operator = parser.advance();
    let right = parse_expr(parser, bp)?;

    Some(Expr::Binary(BinaryExpr {
        token: operator.clone(),
        left: Box::new(left),
        operator,
        right: Box::new(right),
    }))
}

pub fn parse_assignment_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Option<Expr> {
    if !matches!(left, Expr::Identifier(_) | Expr::Index(_)) {
        let position = parser.current_token().span.start.clone();
        parser.error(
            ErrorImpl::InvalidAssignmentTarget {
                target: left.to_string(),
            },
            position,
        );
        return None;
    }

    let token = parser.advance();
    let value = parse_expr(parser, bp)?;

    Some(Expr::Assignment(AssignmentExpr {
        token,
        assignee: Box::new(left),
        value: Box::new(value),
    }))
}

pub fn parse_call_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Option<Expr> {
    let token = parser.current_token().clone();
    let arguments = parse_expr_list(parser, TokenKind::CloseParen)?;

    Some(Expr::Call(CallExpr {
        token,
        callee: Box::new(left),
        arguments,
    }))
}

pub fn parse_index_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Option<Expr> {
    let token = parser.advance();
    let index = parse_expr(parser, BindingPower::Default)?;

    if !parser.expect(TokenKind::CloseBracket) {
        return None;
    }

    Some(Expr::Index(IndexExpr {
        token,
        left: Box::new(left),
        index: Box::new(index),
    }))
}
