//! Integration tests for the public parsing API.
//!
//! These go through the crate root the way an embedding tool would: build a
//! token source, parse, then decide what to do with the diagnostics.

use monkey_parser::{
    ast::ast::{Expr, Stmt},
    lexer::tokens::TokenKind,
    parse, tokenize, Lexer, Parser, TokenStream,
};

fn lexer(source: &str) -> Lexer {
    Lexer::new(source.to_string(), Some("program.mk".to_string()))
}

#[test]
fn test_parse_full_program() {
    let source = r#"
        let five = 5;
        let ten = 10;

        let add = fn(x, y) {
            x + y;
        };

        let result = add(five, ten);
        let adults = filter(people, fn(p) { return p[1] >= 18; });

        if (result > 10 && result != 15) {
            return true;
        } else {
            return false;
        }

        names[0] = "first";
    "#;

    let (parser, program) = parse(lexer(source));

    assert!(parser.errors().is_empty(), "{:?}", parser.errors());
    assert_eq!(program.len(), 7);
    assert!(matches!(
        program.statements[5],
        Stmt::Expression(ref stmt) if matches!(stmt.expression, Expr::If(_))
    ));
    assert_eq!(program.statements[6].to_string(), "((names[0]) = \"first\")");
}

#[test]
fn test_parser_new_then_parse_program() {
    let mut parser = Parser::new(lexer("let a = 1; let b = 2; let c = 3;"));

    assert!(parser.current_is(TokenKind::Let));
    assert!(parser.peek_is(TokenKind::Identifier));

    let program = parser.parse_program();
    assert_eq!(program.len(), 3);
    assert!(parser.errors().is_empty());
    assert!(parser.current_is(TokenKind::EOF));
}

#[test]
fn test_parse_from_token_stream() {
    let tokens = tokenize("let x = 1 + 2 * 3;".to_string(), None).unwrap();
    let (parser, program) = parse(TokenStream::new(tokens));

    assert!(parser.errors().is_empty());
    assert_eq!(program.to_string(), "let x = (1 + (2 * 3));\n");
}

#[test]
fn test_diagnostics_reject_program() {
    let (parser, program) = parse(lexer("let x 5;\nlet y = 10;\nlet = 3;"));

    // Best-effort program still contains the statement that parsed
    assert_eq!(program.len(), 1);

    let diagnostics = parser.diagnostics();
    assert_eq!(diagnostics.len(), 2);
    assert_eq!(diagnostics[0].get_position().1.as_str(), "program.mk");
    assert_eq!(
        diagnostics[1].to_string(),
        "expected next token to be Identifier, got Assignment instead"
    );
}

#[test]
fn test_nested_blocks_report_missing_brace_once() {
    let (parser, program) = parse(lexer("if (a) { if (b) { c }"));

    assert!(program.is_empty());
    assert_eq!(
        parser.errors(),
        vec!["expected next token to be CloseCurly, got EOF instead"]
    );
}

#[test]
fn test_function_literal_as_call_argument() {
    let (parser, program) = parse(lexer("apply(fn(x) { x * 2 }, 21);"));

    assert!(parser.errors().is_empty());
    assert_eq!(program.statements[0].to_string(), "apply(fn(x) { (x * 2) }, 21)");
}
