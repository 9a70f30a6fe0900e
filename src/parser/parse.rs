//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct, the error type, the shared
//! token helpers and the dispatcher that picks a statement parser from the
//! leading token.
//!
//! # Parser Architecture
//!
//! - This module: Parser struct, helper methods, dispatch
//! - `types`: the compound type grammar
//! - `declarations`: methods, properties, interfaces, protocols
//! - `definitions`: enums, structs, variables, functions
//!
//! # Implementation
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared cursor.

use crate::parser::ast::*;
use crate::parser::cursor::TokenCursor;
use crate::parser::lexer::{Keyword, KeywordTable, Lexer, Token, TokenKind};
use serde::Serialize;
use std::fmt;

/// Parser error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    UnexpectedToken {
        found: String,
        expected: String,
        location: SourceLocation,
    },
    UnrecognizedAttribute {
        name: String,
        location: SourceLocation,
    },
    UnrecognizedQualifier {
        name: String,
        location: SourceLocation,
    },
    /// End of input reached before the closing delimiter.
    UnterminatedGroup {
        delimiter: char,
        location: SourceLocation,
    },
    UnknownStartToken {
        found: String,
        location: SourceLocation,
    },
}

impl ParseError {
    pub fn location(&self) -> SourceLocation {
        match self {
            ParseError::UnexpectedToken { location, .. }
            | ParseError::UnrecognizedAttribute { location, .. }
            | ParseError::UnrecognizedQualifier { location, .. }
            | ParseError::UnterminatedGroup { location, .. }
            | ParseError::UnknownStartToken { location, .. } => *location,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let loc = self.location();
        write!(f, "Parse error at line {}, column {}: ", loc.line, loc.column)?;
        match self {
            ParseError::UnexpectedToken {
                found, expected, ..
            } => write!(f, "expected {}, found {}", expected, found),
            ParseError::UnrecognizedAttribute { name, .. } => {
                write!(f, "unrecognized property attribute '{}'", name)
            }
            ParseError::UnrecognizedQualifier { name, .. } => {
                write!(f, "qualifier '{}' is not allowed here", name)
            }
            ParseError::UnterminatedGroup { delimiter, .. } => {
                write!(f, "missing closing '{}'", delimiter)
            }
            ParseError::UnknownStartToken { found, .. } => {
                write!(f, "unable to parse declaration starting with {}", found)
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Grammar selector for declarations without a self-identifying first token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Hint {
    #[default]
    None,
    Variable,
    EnumCase,
    Function,
}

/// Recursive descent parser for a single declaration
pub struct Parser {
    pub(crate) cursor: TokenCursor,
    pub(crate) hint: Hint,
}

impl Parser {
    /// Parser over `source` using [`KeywordTable::standard`].
    pub fn new(source: &str) -> Self {
        Self::with_keywords(source, KeywordTable::standard())
    }

    pub fn with_keywords(source: &str, keywords: &KeywordTable) -> Self {
        let tokens = Lexer::new(source, keywords).tokenize();
        let mut cursor = TokenCursor::new(tokens);
        cursor.set_skip_whitespace(true);
        Self {
            cursor,
            hint: Hint::None,
        }
    }

    pub fn with_hint(mut self, hint: Hint) -> Self {
        self.hint = hint;
        self
    }

    /// Parse the whole input as one declaration.
    pub fn parse(&mut self) -> Result<Statement, ParseError> {
        let typedef = self.match_token(TokenKind::Keyword(Keyword::Typedef));
        let start = self.cursor.peek();

        let decl = match start.kind {
            TokenKind::Plus | TokenKind::Minus if !typedef => Decl::Method(self.parse_method()?),
            TokenKind::Keyword(Keyword::Property) if !typedef => {
                Decl::Property(self.parse_property()?)
            }
            TokenKind::Keyword(Keyword::Interface) if !typedef => {
                Decl::Interface(self.parse_interface()?)
            }
            TokenKind::Keyword(Keyword::Protocol) if !typedef => {
                Decl::Protocol(self.parse_protocol()?)
            }
            TokenKind::Plus
            | TokenKind::Minus
            | TokenKind::Keyword(Keyword::Property)
            | TokenKind::Keyword(Keyword::Interface)
            | TokenKind::Keyword(Keyword::Protocol) => {
                return Err(self.unexpected(&start, "type after 'typedef'"));
            }
            TokenKind::Keyword(Keyword::Enum) if self.body_follows(Keyword::Enum) => {
                Decl::Enum(self.parse_enum()?)
            }
            TokenKind::Keyword(Keyword::Struct) if self.body_follows(Keyword::Struct) => {
                Decl::Struct(self.parse_struct()?)
            }
            // A function hint covers `const char *NSFoo(void)`
            TokenKind::Qualifier(Qualifier::Const)
                if !typedef && self.hint != Hint::Function =>
            {
                Decl::Variable(self.parse_variable()?)
            }
            _ if typedef => Decl::TypeAlias(self.parse_type(false)?),
            _ => match self.hint {
                Hint::Variable => Decl::Variable(self.parse_variable()?),
                Hint::EnumCase => Decl::Variable(self.parse_enum_case()?),
                Hint::Function => Decl::Function(self.parse_function()?),
                Hint::None => {
                    return Err(ParseError::UnknownStartToken {
                        found: start.to_string(),
                        location: start.location,
                    })
                }
            },
        };

        let mut statement = Statement::new(decl);
        if typedef {
            statement.typedef = self.finish_typedef(&statement)?;
        }

        self.match_token(TokenKind::Semicolon);
        self.expect_token(TokenKind::Eof, "end of declaration")?;
        Ok(statement)
    }

    /// Trailing alias name of a `typedef`. Block and function pointer
    /// aliases may carry the name inside the type instead.
    fn finish_typedef(&mut self, statement: &Statement) -> Result<Option<String>, ParseError> {
        if self.check(TokenKind::Ident) {
            return Ok(Some(self.cursor.scan().literal));
        }
        match statement.alias_name() {
            Some(_) => Ok(None),
            None => Err(self.unexpected_next("typedef name")),
        }
    }

    /// Whether `enum`/`struct` at the cursor opens a body rather than naming a type.
    fn body_follows(&mut self, keyword: Keyword) -> bool {
        let checkpoint = self.cursor.checkpoint();
        self.cursor.scan();
        if self.check(TokenKind::Ident) {
            self.cursor.scan();
        }
        let next = self.cursor.peek_kind();
        self.cursor.restore(checkpoint);
        next == TokenKind::LBrace || (keyword == Keyword::Enum && next == TokenKind::Colon)
    }

    // ===== Helper methods =====

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.cursor.peek_kind() == kind
    }

    pub(crate) fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.cursor.scan();
            true
        } else {
            false
        }
    }

    /// Whether the next token is a word with the given spelling.
    pub(crate) fn check_word(&mut self, word: &str) -> bool {
        let token = self.cursor.peek();
        token.kind.is_word() && token.literal == word
    }

    pub(crate) fn expect_token(
        &mut self,
        kind: TokenKind,
        expected: &str,
    ) -> Result<Token, ParseError> {
        let token = self.cursor.scan();
        if token.kind == kind {
            return Ok(token);
        }
        self.cursor.unscan();

        let delimiter = match kind {
            TokenKind::RParen => Some(')'),
            TokenKind::RAngle => Some('>'),
            TokenKind::RBrace => Some('}'),
            _ => None,
        };
        match delimiter {
            Some(delimiter) if token.kind == TokenKind::Eof => Err(ParseError::UnterminatedGroup {
                delimiter,
                location: token.location,
            }),
            _ => Err(self.unexpected(&token, expected)),
        }
    }

    pub(crate) fn expect_identifier(&mut self, expected: &str) -> Result<String, ParseError> {
        Ok(self.expect_token(TokenKind::Ident, expected)?.literal)
    }

    /// Like [`expect_identifier`](Self::expect_identifier) but also accepts
    /// registered words, for selector labels and attribute names.
    pub(crate) fn expect_word(&mut self, expected: &str) -> Result<Token, ParseError> {
        let token = self.cursor.scan();
        if token.kind.is_word() {
            Ok(token)
        } else {
            self.cursor.unscan();
            Err(self.unexpected(&token, expected))
        }
    }

    /// `...` written as three adjacent dots.
    pub(crate) fn expect_ellipsis(&mut self) -> Result<(), ParseError> {
        let first = self.expect_token(TokenKind::Dot, "'...'")?;
        let mut end = first.span.1;
        for _ in 0..2 {
            let dot = self.cursor.scan();
            if dot.kind != TokenKind::Dot || dot.span.0 != end {
                self.cursor.unscan();
                return Err(self.unexpected(&dot, "'...'"));
            }
            end = dot.span.1;
        }
        Ok(())
    }

    pub(crate) fn unexpected(&self, found: &Token, expected: &str) -> ParseError {
        ParseError::UnexpectedToken {
            found: found.to_string(),
            expected: expected.to_string(),
            location: found.location,
        }
    }

    pub(crate) fn unexpected_next(&mut self, expected: &str) -> ParseError {
        let token = self.cursor.peek();
        self.unexpected(&token, expected)
    }
}

/// Parse one declaration with no hint.
pub fn parse(source: &str) -> Result<Statement, ParseError> {
    Parser::new(source).parse()
}

pub fn parse_with_hint(source: &str, hint: Hint) -> Result<Statement, ParseError> {
    Parser::new(source).with_hint(hint).parse()
}
