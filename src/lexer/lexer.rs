use std::{rc::Rc, vec::IntoIter};

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

/// Produces tokens one at a time.
///
/// Once the input is exhausted every further call must return an `EOF`
/// token.
pub trait TokenSource {
    fn next_token(&mut self) -> Token;
}

/// Handles one pattern match. Returns `None` for input that produces no token
/// (whitespace, comments).
pub type RegexHandler = fn(&mut Lexer, &str) -> Option<Token>;

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

// Order matters: longer operators must come before their prefixes.
lazy_static! {
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern {
            regex: Regex::new("^[a-zA-Z_][a-zA-Z0-9_]*").unwrap(),
            handler: symbol_handler,
        },
        RegexPattern {
            regex: Regex::new("^[0-9]+").unwrap(),
            handler: number_handler,
        },
        RegexPattern {
            regex: Regex::new("^\\s+").unwrap(),
            handler: skip_handler,
        },
        RegexPattern {
            regex: Regex::new("^\"(?:[^\"\\\\]|\\\\.)*\"").unwrap(),
            handler: string_handler,
        },
        RegexPattern {
            regex: Regex::new("^//[^\\n]*").unwrap(),
            handler: skip_handler,
        },
        RegexPattern {
            regex: Regex::new("^\\[").unwrap(),
            handler: MK_DEFAULT_HANDLER!(TokenKind::OpenBracket, "["),
        },
        RegexPattern {
            regex: Regex::new("^\\]").unwrap(),
            handler: MK_DEFAULT_HANDLER!(TokenKind::CloseBracket, "]"),
        },
        RegexPattern {
            regex: Regex::new("^\\{").unwrap(),
            handler: MK_DEFAULT_HANDLER!(TokenKind::OpenCurly, "{"),
        },
        RegexPattern {
            regex: Regex::new("^\\}").unwrap(),
            handler: MK_DEFAULT_HANDLER!(TokenKind::CloseCurly, "}"),
        },
        RegexPattern {
            regex: Regex::new("^\\(").unwrap(),
            handler: MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "("),
        },
        RegexPattern {
            regex: Regex::new("^\\)").unwrap(),
            handler: MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")"),
        },
        RegexPattern {
            regex: Regex::new("^==").unwrap(),
            handler: MK_DEFAULT_HANDLER!(TokenKind::Equals, "=="),
        },
        RegexPattern {
            regex: Regex::new("^!=").unwrap(),
            handler: MK_DEFAULT_HANDLER!(TokenKind::NotEquals, "!="),
        },
        RegexPattern {
            regex: Regex::new("^!").unwrap(),
            handler: MK_DEFAULT_HANDLER!(TokenKind::Not, "!"),
        },
        RegexPattern {
            regex: Regex::new("^=").unwrap(),
            handler: MK_DEFAULT_HANDLER!(TokenKind::Assignment, "="),
        },
        RegexPattern {
            regex: Regex::new("^<=").unwrap(),
            handler: MK_DEFAULT_HANDLER!(TokenKind::LessEquals, "<="),
        },
        RegexPattern {
            regex: Regex::new("^<").unwrap(),
            handler: MK_DEFAULT_HANDLER!(TokenKind::Less, "<"),
        },
        RegexPattern {
            regex: Regex::new("^>=").unwrap(),
            handler: MK_DEFAULT_HANDLER!(TokenKind::GreaterEquals, ">="),
        },
        RegexPattern {
            regex: Regex::new("^>").unwrap(),
            handler: MK_DEFAULT_HANDLER!(TokenKind::Greater, ">"),
        },
        RegexPattern {
            regex: Regex::new("^\\|\\|").unwrap(),
            handler: MK_DEFAULT_HANDLER!(TokenKind::Or, "||"),
        },
        RegexPattern {
            regex: Regex::new("^&&").unwrap(),
            handler: MK_DEFAULT_HANDLER!(TokenKind::And, "&&"),
        },
        RegexPattern {
            regex: Regex::new("^;").unwrap(),
            handler: MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";"),
        },
        RegexPattern {
            regex: Regex::new("^:").unwrap(),
            handler: MK_DEFAULT_HANDLER!(TokenKind::Colon, ":"),
        },
        RegexPattern {
            regex: Regex::new("^,").unwrap(),
            handler: MK_DEFAULT_HANDLER!(TokenKind::Comma, ","),
        },
        RegexPattern {
            regex: Regex::new("^\\+").unwrap(),
            handler: MK_DEFAULT_HANDLER!(TokenKind::Plus, "+"),
        },
        RegexPattern {
            regex: Regex::new("^-").unwrap(),
            handler: MK_DEFAULT_HANDLER!(TokenKind::Dash, "-"),
        },
        RegexPattern {
            regex: Regex::new("^/").unwrap(),
            handler: MK_DEFAULT_HANDLER!(TokenKind::Slash, "/"),
        },
        RegexPattern {
            regex: Regex::new("^\\*").unwrap(),
            handler: MK_DEFAULT_HANDLER!(TokenKind::Star, "*"),
        },
        RegexPattern {
            regex: Regex::new("^%").unwrap(),
            handler: MK_DEFAULT_HANDLER!(TokenKind::Percent, "%"),
        },
    ];
}

/// Lazily scans a source string into tokens.
///
/// Characters no pattern accepts come out as `Illegal` tokens so the parser
/// can report them instead of the lexer stopping early.
pub struct Lexer {
    source: String,
    pos: usize,
    file: Rc<String>,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            source,
            pos: 0,
            file: file_name,
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    pub fn position(&self) -> Position {
        Position(self.pos as u32, Rc::clone(&self.file))
    }

    /// Span covering the next `len` bytes.
    pub fn span_for(&self, len: usize) -> Span {
        Span {
            start: self.position(),
            end: Position((self.pos + len) as u32, Rc::clone(&self.file)),
        }
    }

    fn illegal(&mut self) -> Token {
        let ch = self.remainder().chars().next().unwrap_or('\0');
        let span = self.span_for(ch.len_utf8());
        debug!("Unrecognised character {:?} at {}", ch, span.start);
        self.advance_n(ch.len_utf8());
        MK_TOKEN!(TokenKind::Illegal, ch.to_string(), span)
    }
}

impl TokenSource for Lexer {
    fn next_token(&mut self) -> Token {
        loop {
            if self.at_eof() {
                return Token::eof(self.span_for(0));
            }

            let remainder = self.remainder();
            let matched = PATTERNS.iter().find_map(|pattern| {
                pattern
                    .regex
                    .find(remainder)
                    .map(|found| (pattern.handler, found.as_str().to_string()))
            });

            match matched {
                Some((handler, text)) => {
                    if let Some(token) = handler(self, &text) {
                        return token;
                    }
                }
                None => return self.illegal(),
            }
        }
    }
}

fn number_handler(lexer: &mut Lexer, matched: &str) -> Option<Token> {
    let span = lexer.span_for(matched.len());
    lexer.advance_n(matched.len());
    Some(MK_TOKEN!(TokenKind::Number, matched.to_string(), span))
}

fn skip_handler(lexer: &mut Lexer, matched: &str) -> Option<Token> {
    lexer.advance_n(matched.len());
    None
}

fn string_handler(lexer: &mut Lexer, matched: &str) -> Option<Token> {
    let span = lexer.span_for(matched.len());
    lexer.advance_n(matched.len());

    let mut result = String::new();
    let mut chars = matched[1..matched.len() - 1].chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            result.push(ch);
            continue;
        }

        match chars.next() {
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some('r') => result.push('\r'),
            Some('0') => result.push('\0'),
            Some('\\') => result.push('\\'),
            Some('"') => result.push('"'),
            Some(other) => {
                // Unknown escapes keep the backslash
                result.push('\\');
                result.push(other);
            }
            None => result.push('\\'),
        }
    }

    Some(MK_TOKEN!(TokenKind::String, result, span))
}

fn symbol_handler(lexer: &mut Lexer, matched: &str) -> Option<Token> {
    let span = lexer.span_for(matched.len());
    lexer.advance_n(matched.len());

    let kind = RESERVED_LOOKUP.get(matched).copied().unwrap_or(TokenKind::Identifier);
    Some(MK_TOKEN!(kind, matched.to_string(), span))
}

/// A pre-built token sequence exposed as a `TokenSource`.
///
/// A trailing `EOF` is optional; the stream yields `EOF` forever once the
/// tokens run out.
pub struct TokenStream {
    tokens: IntoIter<Token>,
    eof: Token,
    finished: bool,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        let eof_span = tokens.last().map(|token| token.span.clone()).unwrap_or_else(Span::null);

        TokenStream {
            tokens: tokens.into_iter(),
            eof: Token::eof(eof_span),
            finished: false,
        }
    }
}

impl TokenSource for TokenStream {
    fn next_token(&mut self) -> Token {
        if self.finished {
            return self.eof.clone();
        }

        match self.tokens.next() {
            Some(token) if token.kind != TokenKind::EOF => token,
            _ => {
                self.finished = true;
                self.eof.clone()
            }
        }
    }
}

/// Scans the whole source up front, failing on the first unrecognised
/// character. The returned vector always ends with `EOF`.
pub fn tokenize(source: String, file: Option<String>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source, file);
    let mut tokens = vec![];

    loop {
        let token = lex.next_token();

        match token.kind {
            TokenKind::Illegal => {
                return Err(Error::new(
                    ErrorImpl::UnrecognisedToken { token: token.value },
                    token.span.start,
                ));
            }
            TokenKind::EOF => {
                tokens.push(token);
                return Ok(tokens);
            }
            _ => tokens.push(token),
        }
    }
}
