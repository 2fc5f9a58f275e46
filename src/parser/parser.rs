//! Parser state and the program driver.
//!
//! The parser looks at two tokens at a time (`current` and `peek`) and keeps
//! lookup tables for:
//! - Statement handlers
//! - NUD (null denotation) handlers for prefix expressions
//! - LED (left denotation) handlers for infix expressions
//! - Binding powers and associativity for operator precedence
//!
//! Problems are recorded as diagnostics and parsing carries on with the next
//! statement, so one pass reports as many errors as it can.

use std::collections::HashMap;

use log::{debug, trace};

use crate::{
    ast::ast::Program,
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::TokenSource,
        tokens::{Token, TokenKind},
    },
    Position,
};

use super::{
    lookups::{
        create_token_lookups, Associativity, AssociativityLookup, BPLookup, BindingPower,
        LEDHandler, LEDLookup, NUDHandler, NUDLookup, StmtHandler, StmtLookup,
        MAX_NESTING_DEPTH,
    },
    stmt::parse_stmt,
};

/// The main parser structure that maintains parsing state.
pub struct Parser {
    /// Where tokens come from
    lexer: Box<dyn TokenSource>,
    /// The token under examination
    current: Token,
    /// The token after `current`
    peek: Token,
    /// Diagnostics in the order they were found
    errors: Vec<Error>,
    /// How many `parse_expr` calls are active
    depth: usize,
    /// Set when an expression ran into a `}` it does not own
    stopped_at_close_curly: bool,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix) expression handlers
    led_lookup: LEDLookup,
    /// Lookup table for infix binding powers (precedence)
    binding_power_lookup: BPLookup,
    /// Lookup table for infix associativity
    associativity_lookup: AssociativityLookup,
}

impl Parser {
    /// Creates a parser with two tokens already read ahead and the grammar
    /// tables registered.
    pub fn new<L: TokenSource + 'static>(lexer: L) -> Self {
        let mut lexer: Box<dyn TokenSource> = Box::new(lexer);
        let current = lexer.next_token();
        let peek = lexer.next_token();

        let mut parser = Parser {
            lexer,
            current,
            peek,
            errors: vec![],
            depth: 0,
            stopped_at_close_curly: false,
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
            associativity_lookup: HashMap::new(),
        };
        create_token_lookups(&mut parser);

        parser
    }

    /// Parses statements until `EOF`.
    ///
    /// Never fails: statements that could not be parsed are left out and
    /// their diagnostics are available through [`Parser::errors`].
    pub fn parse_program(&mut self) -> Program {
        let mut program = Program::default();

        while !self.current_is(TokenKind::EOF) {
            if let Some(stmt) = parse_stmt(self) {
                program.statements.push(stmt);
            }
            // A stray `}` at the top level is just skipped
            self.take_stopped_at_close_curly();
            // Each statement handler leaves `current` on its last token
            self.advance();
        }

        program
    }

    /// Diagnostic messages in detection order.
    pub fn errors(&self) -> Vec<String> {
        self.errors.iter().map(|error| error.to_string()).collect()
    }

    /// Diagnostics in detection order, with positions.
    pub fn diagnostics(&self) -> &[Error] {
        &self.errors
    }

    pub fn current_token(&self) -> &Token {
        &self.current
    }

    pub fn current_token_kind(&self) -> TokenKind {
        self.current.kind
    }

    pub fn peek_token(&self) -> &Token {
        &self.peek
    }

    pub fn peek_token_kind(&self) -> TokenKind {
        self.peek.kind
    }

    pub fn current_is(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    pub fn peek_is(&self, kind: TokenKind) -> bool {
        self.peek.kind == kind
    }

    /// Shifts `peek` into `current`, reads a new `peek` and returns the token
    /// that was `current`.
    pub fn advance(&mut self) -> Token {
        let next = self.lexer.next_token();
        let previous_peek = std::mem::replace(&mut self.peek, next);
        std::mem::replace(&mut self.current, previous_peek)
    }

    /// Advances if `peek` is `expected_kind`. Otherwise records a diagnostic
    /// and leaves the state untouched.
    pub fn expect(&mut self, expected_kind: TokenKind) -> bool {
        if self.peek_is(expected_kind) {
            self.advance();
            true
        } else {
            self.peek_error(expected_kind);
            false
        }
    }

    /// Checks the end of a `let`/`return` statement.
    ///
    /// A `;` is consumed. A `}` is left for the enclosing block to consume.
    /// Anything else is reported, and the rest of the statement is skipped.
    pub fn expect_terminator(&mut self) -> bool {
        if self.peek_is(TokenKind::Semicolon) {
            self.advance();
            return true;
        }

        if self.peek_is(TokenKind::CloseCurly) {
            return true;
        }

        self.peek_error(TokenKind::Semicolon);
        self.synchronize();
        false
    }

    /// Skips to the end of a broken statement.
    ///
    /// Stops with `current` on `;` or `EOF`, or just before a `}`, `EOF` or a
    /// token that starts a statement. A `}` that an expression stopped on is
    /// left in `current` for the enclosing block.
    pub fn synchronize(&mut self) {
        if self.stopped_at_close_curly {
            return;
        }

        while !self.current.is_one_of_many(&[TokenKind::Semicolon, TokenKind::EOF])
            && !self.peek_is(TokenKind::CloseCurly)
            && !self.peek_is(TokenKind::EOF)
            && !self.stmt_lookup.contains_key(&self.peek.kind)
        {
            self.advance();
        }
    }

    /// Records an `expected next token to be ...` diagnostic against `peek`.
    pub fn peek_error(&mut self, expected: TokenKind) {
        let received = self.peek.kind;
        let position = self.peek.span.start.clone();
        self.error(ErrorImpl::UnexpectedToken { expected, received }, position);
    }

    pub fn error(&mut self, error_impl: ErrorImpl, position: Position) {
        let error = Error::new(error_impl, position);
        debug!("Diagnostic at {}: {}", error.get_position(), error);
        self.errors.push(error);
    }

    /// Marks `current` as a `}` that belongs to an enclosing block.
    pub fn stop_at_close_curly(&mut self) {
        self.stopped_at_close_curly = true;
    }

    /// Clears the mark set by [`Parser::stop_at_close_curly`], returning
    /// whether it was set.
    pub fn take_stopped_at_close_curly(&mut self) -> bool {
        std::mem::take(&mut self.stopped_at_close_curly)
    }

    /// Enters one more level of expression nesting. Past
    /// `MAX_NESTING_DEPTH` a diagnostic is recorded and `false` returned.
    pub fn enter_nesting(&mut self) -> bool {
        if self.depth >= MAX_NESTING_DEPTH {
            let position = self.current.span.start.clone();
            self.error(ErrorImpl::NestingTooDeep { limit: MAX_NESTING_DEPTH }, position);
            return false;
        }

        self.depth += 1;
        true
    }

    pub fn leave_nesting(&mut self) {
        self.depth -= 1;
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Returns a reference to the NUD (null denotation) lookup table.
    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    /// Returns a reference to the LED (left denotation) lookup table.
    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    /// Returns a reference to the binding power lookup table.
    pub fn get_bp_lookup(&self) -> &BPLookup {
        &self.binding_power_lookup
    }

    /// Binding power of `peek` as an infix operator, `Default` if it is not one.
    pub fn peek_binding_power(&self) -> BindingPower {
        self.binding_power_lookup
            .get(&self.peek.kind)
            .copied()
            .unwrap_or(BindingPower::Default)
    }

    /// Binding power the right operand of `kind` is parsed at.
    pub fn right_binding_power(&self, kind: TokenKind) -> BindingPower {
        let bp = self.binding_power_lookup.get(&kind).copied().unwrap_or(BindingPower::Default);

        match self.associativity_lookup.get(&kind) {
            Some(Associativity::Right) => bp.lower(),
            _ => bp,
        }
    }

    /// Registers a left denotation (infix) handler for a token.
    pub fn led(
        &mut self,
        kind: TokenKind,
        binding_power: BindingPower,
        associativity: Associativity,
        led_fn: LEDHandler,
    ) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.associativity_lookup.insert(kind, associativity);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        trace!("Registered statement handler for {}", kind);
        self.stmt_lookup.insert(kind, stmt_fn);
    }
}

/// Parses everything `source` yields.
///
/// Returns the parser as well so the caller can inspect its diagnostics.
pub fn parse<L: TokenSource + 'static>(source: L) -> (Parser, Program) {
    let mut parser = Parser::new(source);
    let program = parser.parse_program();

    (parser, program)
}
