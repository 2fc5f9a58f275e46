//! Unit tests for the parser module.

use crate::{
    ast::{
        ast::{Expr, Program, Stmt},
        statements::ReturnStmt,
    },
    lexer::{lexer::Lexer, tokens::TokenKind},
};

use super::parser::{parse, Parser};

fn lexer(source: &str) -> Lexer {
    Lexer::new(source.to_string(), Some("test.mk".to_string()))
}

fn parse_source(source: &str) -> (Parser, Program) {
    parse(lexer(source))
}

fn parse_clean(source: &str) -> Program {
    let (parser, program) = parse_source(source);
    assert!(
        parser.errors().is_empty(),
        "unexpected diagnostics for {:?}: {:?}",
        source,
        parser.errors()
    );
    program
}

fn single_expr(source: &str) -> Expr {
    let program = parse_clean(source);
    assert_eq!(program.len(), 1, "{:?}", program);

    match &program.statements[0] {
        Stmt::Expression(stmt) => stmt.expression.clone(),
        other => panic!("expected an expression statement, got {:?}", other),
    }
}

#[test]
fn test_parse_let_statements() {
    let program = parse_clean("let x = 5; let y = true; let foobar = y;");

    assert_eq!(program.len(), 3);
    let names: Vec<&str> = program
        .statements
        .iter()
        .map(|stmt| match stmt {
            Stmt::Let(stmt) => stmt.name.value.as_str(),
            other => panic!("expected let, got {:?}", other),
        })
        .collect();
    assert_eq!(names, vec!["x", "y", "foobar"]);
}

#[test]
fn test_let_statement_keeps_tokens() {
    let program = parse_clean("let answer = 42;");

    let Stmt::Let(stmt) = &program.statements[0] else {
        panic!("expected let");
    };
    assert_eq!(stmt.token.kind, TokenKind::Let);
    assert_eq!(stmt.token.value, "let");
    assert_eq!(stmt.name.token.kind, TokenKind::Identifier);
    assert_eq!(stmt.name.token.span.start.0, 4);
    assert_eq!(stmt.value.to_string(), "42");
    assert_eq!(program.statements[0].get_span().start.0, 0);
    assert_eq!(stmt.value.get_span().start.0, 13);
}

#[test]
fn test_let_missing_assignment() {
    let (parser, program) = parse_source("let x 5;");

    assert!(program.is_empty());
    assert_eq!(
        parser.errors(),
        vec!["expected next token to be Assignment, got Number instead"]
    );
    assert_eq!(parser.diagnostics()[0].get_position().0, 6);
}

#[test]
fn test_let_missing_identifier() {
    let (parser, program) = parse_source("let = 5;");

    assert!(program.is_empty());
    assert_eq!(
        parser.errors(),
        vec!["expected next token to be Identifier, got Assignment instead"]
    );
}

#[test]
fn test_collects_every_error_in_one_pass() {
    let (parser, program) = parse_source("let x 5; let = 10; let 838383;");

    assert!(program.is_empty());
    assert_eq!(
        parser.errors(),
        vec![
            "expected next token to be Assignment, got Number instead",
            "expected next token to be Identifier, got Assignment instead",
            "expected next token to be Identifier, got Number instead",
        ]
    );
}

#[test]
fn test_diagnostics_keep_detection_order() {
    let (parser, _) = parse_source("let = 1; let x = ); let y 2;");

    assert_eq!(
        parser.errors(),
        vec![
            "expected next token to be Identifier, got Assignment instead",
            "no prefix parse function for CloseParen found",
            "expected next token to be Assignment, got Number instead",
        ]
    );
}

#[test]
fn test_recovers_after_broken_statement() {
    let (parser, program) = parse_source("let a 1; let b = 2; let c = 3;");

    assert_eq!(parser.errors().len(), 1);
    assert_eq!(program.len(), 2);
    assert_eq!(program.statements[0].to_string(), "let b = 2;");
    assert_eq!(program.statements[1].to_string(), "let c = 3;");
}

#[test]
fn test_let_without_semicolon_at_eof() {
    let (parser, program) = parse_source("let x = 5");

    assert_eq!(program.len(), 1);
    assert_eq!(
        parser.errors(),
        vec!["expected next token to be Semicolon, got EOF instead"]
    );
}

#[test]
fn test_let_with_trailing_junk() {
    let (parser, program) = parse_source("let x = 5 6; let y = 7;");

    assert_eq!(
        parser.errors(),
        vec!["expected next token to be Semicolon, got Number instead"]
    );
    assert_eq!(program.len(), 2);
    assert_eq!(program.statements[1].to_string(), "let y = 7;");
}

#[test]
fn test_return_statements() {
    let program = parse_clean("return 5; return; return add(1, 2);");

    assert_eq!(program.len(), 3);
    assert_eq!(program.statements[0].to_string(), "return 5;");
    assert!(matches!(
        &program.statements[1],
        Stmt::Return(ReturnStmt { value: None, .. })
    ));
    assert_eq!(program.statements[2].to_string(), "return add(1, 2);");
}

#[test]
fn test_unknown_leading_token_is_reported() {
    let (parser, program) = parse_source("let x = 5; ) let y = 6;");

    assert_eq!(parser.errors(), vec!["no prefix parse function for CloseParen found"]);
    assert_eq!(program.len(), 2);
}

#[test]
fn test_illegal_token_is_reported() {
    let (parser, program) = parse_source("let x = @;");

    assert!(program.is_empty());
    assert_eq!(parser.errors(), vec!["no prefix parse function for Illegal found"]);
}

#[test]
fn test_colon_is_reserved() {
    let (parser, program) = parse_source("let a = 1; : let b = 2;");

    assert_eq!(parser.errors(), vec!["no prefix parse function for Colon found"]);
    assert_eq!(program.len(), 2);
}

#[test]
fn test_empty_statements_are_skipped() {
    let (parser, program) = parse_source(";;;");

    assert!(program.is_empty());
    assert!(parser.errors().is_empty());
}

#[test]
fn test_parse_empty_program() {
    let (parser, program) = parse_source("");

    assert!(program.is_empty());
    assert!(parser.errors().is_empty());
}

#[test]
fn test_identifier_expression() {
    let expr = single_expr("foobar;");

    let Expr::Identifier(identifier) = expr else {
        panic!("expected identifier");
    };
    assert_eq!(identifier.value, "foobar");
}

#[test]
fn test_literal_expressions() {
    assert!(matches!(single_expr("5;"), Expr::Integer(ref e) if e.value == 5));
    assert!(matches!(single_expr("true;"), Expr::Boolean(ref e) if e.value));
    assert!(matches!(single_expr("false"), Expr::Boolean(ref e) if !e.value));
    assert!(matches!(
        single_expr(r#""hello world";"#),
        Expr::String(ref e) if e.value == "hello world"
    ));
}

#[test]
fn test_integer_overflow_is_reported() {
    let (parser, program) = parse_source("let x = 99999999999999999999;");

    assert!(program.is_empty());
    assert_eq!(
        parser.errors(),
        vec!["could not parse \"99999999999999999999\" as integer"]
    );
}

#[test]
fn test_operator_precedence() {
    let cases = [
        ("1 + 2 * 3", "(1 + (2 * 3))"),
        ("-a * b", "((-a) * b)"),
        ("!-a", "(!(-a))"),
        ("a + b + c", "((a + b) + c)"),
        ("a + b - c", "((a + b) - c)"),
        ("a * b * c", "((a * b) * c)"),
        ("a % b * c", "((a % b) * c)"),
        ("a + b / c", "(a + (b / c))"),
        ("a + b * c + d / e - f", "(((a + (b * c)) + (d / e)) - f)"),
        ("5 > 4 == 3 < 4", "((5 > 4) == (3 < 4))"),
        ("a < b != c >= d", "((a < b) != (c >= d))"),
        ("3 + 4 * 5 == 3 * 1 + 4 * 5", "((3 + (4 * 5)) == ((3 * 1) + (4 * 5)))"),
        ("a == b && c <= d", "((a == b) && (c <= d))"),
        ("a || b && c", "((a || b) && c)"),
        ("1 + (2 + 3) + 4", "((1 + (2 + 3)) + 4)"),
        ("(5 + 5) * 2", "((5 + 5) * 2)"),
        ("-(5 + 5)", "(-(5 + 5))"),
        ("!(true == true)", "(!(true == true))"),
        ("a + add(b * c) + d", "((a + add((b * c))) + d)"),
        (
            "add(a, b, 1, 2 * 3, 4 + 5, add(6, 7 * 8))",
            "add(a, b, 1, (2 * 3), (4 + 5), add(6, (7 * 8)))",
        ),
        ("a * [1, 2, 3, 4][b * c] * d", "((a * ([1, 2, 3, 4][(b * c)])) * d)"),
        (
            "add(a * b[2], b[1], 2 * [1, 2][1])",
            "add((a * (b[2])), (b[1]), (2 * ([1, 2][1])))",
        ),
        ("x = 1 + 2", "(x = (1 + 2))"),
        ("x = y = 5", "(x = (y = 5))"),
        ("a[0] = b", "((a[0]) = b)"),
    ];

    for (source, expected) in cases {
        assert_eq!(single_expr(source).to_string(), expected, "source: {}", source);
    }
}

#[test]
fn test_multiplication_binds_tighter_in_tree() {
    let Expr::Binary(root) = single_expr("1 + 2 * 3") else {
        panic!("expected binary expression");
    };

    assert_eq!(root.operator.kind, TokenKind::Plus);
    assert!(matches!(*root.left, Expr::Integer(ref e) if e.value == 1));

    let Expr::Binary(right) = *root.right else {
        panic!("expected binary right operand");
    };
    assert_eq!(right.operator.kind, TokenKind::Star);
}

#[test]
fn test_invalid_assignment_target() {
    let (parser, program) = parse_source("1 + 2 = 3;");

    assert!(program.is_empty());
    assert_eq!(parser.errors(), vec!["invalid assignment target: (1 + 2)"]);
}

#[test]
fn test_if_expression() {
    let Expr::If(expr) = single_expr("if (x < y) { x }") else {
        panic!("expected if expression");
    };

    assert_eq!(expr.condition.to_string(), "(x < y)");
    assert_eq!(expr.consequence.statements.len(), 1);
    assert_eq!(expr.consequence.statements[0].to_string(), "x");
    assert!(expr.alternative.is_none());
}

#[test]
fn test_if_else_expression() {
    let Expr::If(expr) = single_expr("if (x < y) { x } else { y; z }") else {
        panic!("expected if expression");
    };

    let alternative = expr.alternative.expect("else branch");
    assert_eq!(alternative.statements.len(), 2);
    assert_eq!(alternative.to_string(), "{ y z }");
}

#[test]
fn test_function_literal() {
    let Expr::Function(function) = single_expr("fn(x, y) { x + y; }") else {
        panic!("expected function literal");
    };

    let parameters: Vec<&str> = function.parameters.iter().map(|p| p.value.as_str()).collect();
    assert_eq!(parameters, vec!["x", "y"]);
    assert_eq!(function.body.statements.len(), 1);
    assert_eq!(function.body.statements[0].to_string(), "(x + y)");
}

#[test]
fn test_function_parameters() {
    let cases: [(&str, &[&str]); 3] = [
        ("fn() {};", &[]),
        ("fn(x) {};", &["x"]),
        ("fn(x, y, z) {};", &["x", "y", "z"]),
    ];

    for (source, expected) in cases {
        let Expr::Function(function) = single_expr(source) else {
            panic!("expected function literal for {}", source);
        };
        let parameters: Vec<&str> = function.parameters.iter().map(|p| p.value.as_str()).collect();
        assert_eq!(parameters, expected.to_vec());
    }
}

#[test]
fn test_function_with_let_before_closing_brace() {
    let program = parse_clean("let add = fn(a, b) { let sum = a + b; return sum };");

    assert_eq!(program.len(), 1);
    assert_eq!(
        program.statements[0].to_string(),
        "let add = fn(a, b) { let sum = (a + b); return sum; };"
    );
}

#[test]
fn test_call_expression() {
    let Expr::Call(call) = single_expr("add(1, 2 * 3, 4 + 5);") else {
        panic!("expected call expression");
    };

    assert_eq!(call.callee.to_string(), "add");
    assert_eq!(call.arguments.len(), 3);
    assert_eq!(call.arguments[1].to_string(), "(2 * 3)");
}

#[test]
fn test_empty_array_and_call() {
    assert_eq!(single_expr("[]").to_string(), "[]");
    assert_eq!(single_expr("f()").to_string(), "f()");
}

#[test]
fn test_unterminated_block() {
    let (parser, program) = parse_source("let f = fn() { let x = 1;");

    assert!(program.is_empty());
    assert_eq!(
        parser.errors(),
        vec!["expected next token to be CloseCurly, got EOF instead"]
    );
}

#[test]
fn test_missing_operand_before_block_end_keeps_later_statements() {
    let (parser, program) = parse_source("let f = fn() { return 1 + }; let y = 2;");

    assert_eq!(parser.errors(), vec!["no prefix parse function for CloseCurly found"]);
    assert_eq!(program.len(), 2);
    assert_eq!(program.statements[0].to_string(), "let f = fn() { };");
    assert_eq!(program.statements[1].to_string(), "let y = 2;");
}

#[test]
fn test_missing_let_value_before_block_end() {
    let (parser, program) = parse_source("if (a) { let x = } else { b }\nc;");

    assert_eq!(parser.errors(), vec!["no prefix parse function for CloseCurly found"]);
    assert_eq!(program.len(), 2);
    assert_eq!(program.statements[0].to_string(), "if a { } else { b }");
    assert_eq!(program.statements[1].to_string(), "c");
}

#[test]
fn test_stray_close_curly_at_top_level() {
    let (parser, program) = parse_source("let x = 1 + } let y = 2;");

    assert_eq!(parser.errors(), vec!["no prefix parse function for CloseCurly found"]);
    assert_eq!(program.len(), 1);
    assert_eq!(program.statements[0].to_string(), "let y = 2;");
}

#[test]
fn test_deep_nesting_is_reported() {
    let depth = 100_000;
    let source = format!("{}1{};", "(".repeat(depth), ")".repeat(depth));
    let (parser, program) = parse_source(&source);

    assert!(program.is_empty());
    assert_eq!(parser.errors(), vec!["expression nested deeper than 64 levels"]);
    assert_eq!(parser.diagnostics()[0].get_error_name(), "NestingTooDeep");
}

#[test]
fn test_nesting_within_limit_parses() {
    let source = format!("{}1{};", "(".repeat(50), ")".repeat(50));
    assert_eq!(single_expr(&source).to_string(), "1");

    let program = parse_clean(&format!("{}x;", "-".repeat(50)));
    assert_eq!(program.len(), 1);
}

#[test]
fn test_missing_close_paren() {
    let (parser, program) = parse_source("let x = (1 + 2;");

    assert!(program.is_empty());
    assert_eq!(
        parser.errors(),
        vec!["expected next token to be CloseParen, got Semicolon instead"]
    );
}

#[test]
fn test_input_ending_mid_expression_terminates() {
    let (parser, program) = parse_source("let x = (1 + ");

    assert!(program.is_empty());
    assert_eq!(parser.errors(), vec!["no prefix parse function for EOF found"]);
}

#[test]
fn test_lookahead_predicates_do_not_mutate() {
    let parser = Parser::new(lexer("let x = 5;"));
    let current = parser.current_token().clone();
    let peek = parser.peek_token().clone();

    for _ in 0..5 {
        assert!(parser.current_is(TokenKind::Let));
        assert!(parser.peek_is(TokenKind::Identifier));
        assert!(!parser.current_is(TokenKind::Identifier));
        assert!(!parser.peek_is(TokenKind::Let));
    }

    assert_eq!(parser.current_token(), &current);
    assert_eq!(parser.peek_token(), &peek);
    assert!(parser.errors().is_empty());
}

#[test]
fn test_expect_mismatch_leaves_state() {
    let mut parser = Parser::new(lexer("let x"));

    assert!(!parser.expect(TokenKind::Assignment));
    assert!(parser.current_is(TokenKind::Let));
    assert!(parser.peek_is(TokenKind::Identifier));
    assert_eq!(
        parser.errors(),
        vec!["expected next token to be Assignment, got Identifier instead"]
    );

    assert!(parser.expect(TokenKind::Identifier));
    assert!(parser.current_is(TokenKind::Identifier));
    assert!(parser.peek_is(TokenKind::EOF));
    assert_eq!(parser.errors().len(), 1);
}

#[test]
fn test_advance_reaches_sticky_eof() {
    let mut parser = Parser::new(lexer("a"));

    assert_eq!(parser.advance().value, "a");
    assert!(parser.current_is(TokenKind::EOF));
    assert!(parser.peek_is(TokenKind::EOF));

    assert_eq!(parser.advance().kind, TokenKind::EOF);
    assert!(parser.current_is(TokenKind::EOF));
    assert!(parser.peek_is(TokenKind::EOF));
}

#[test]
fn test_errors_accessor_does_not_clear() {
    let (parser, _) = parse_source("let = 1;");

    assert_eq!(parser.errors().len(), 1);
    assert_eq!(parser.errors().len(), 1);
    assert_eq!(parser.diagnostics()[0].get_error_name(), "UnexpectedToken");
}

#[test]
fn test_grammar_table_orders_operators() {
    let parser = Parser::new(lexer(""));
    let bp = parser.get_bp_lookup();

    assert!(bp[&TokenKind::Star] > bp[&TokenKind::Plus]);
    assert!(bp[&TokenKind::Plus] > bp[&TokenKind::Less]);
    assert!(bp[&TokenKind::Less] > bp[&TokenKind::Equals]);
    assert!(bp[&TokenKind::OpenBracket] > bp[&TokenKind::OpenParen]);
    assert!(!bp.contains_key(&TokenKind::Semicolon));
    assert!(parser.get_stmt_lookup().contains_key(&TokenKind::Let));
    assert!(parser.get_nud_lookup().contains_key(&TokenKind::Dash));
    assert!(parser.get_led_lookup().contains_key(&TokenKind::Dash));
}
