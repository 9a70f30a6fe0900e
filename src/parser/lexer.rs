//! Lexer (tokenizer) for declaration text
//!
//! Converts raw declaration text into a flat [`Token`] stream consumed by the
//! [`TokenCursor`](super::cursor::TokenCursor). Whitespace is kept as one
//! token per contiguous run so the parser can decide whether to honor it.
//!
//! The lexer knows no grammar words. Every identifier (and every `@word`) is
//! looked up in a [`KeywordTable`] handed in at construction time; the table
//! decides whether the word is a keyword, a type qualifier or a plain
//! identifier.

use super::ast::{Qualifier, SourceLocation};
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::fmt;
use std::sync::OnceLock;

/// Grammar keywords registered through the [`KeywordTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Keyword {
    Property,
    Interface,
    Protocol,
    Typedef,
    Enum,
    Struct,
}

impl Keyword {
    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Property => "@property",
            Keyword::Interface => "@interface",
            Keyword::Protocol => "@protocol",
            Keyword::Typedef => "typedef",
            Keyword::Enum => "enum",
            Keyword::Struct => "struct",
        }
    }
}

/// Token kinds produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    Illegal,
    Eof,
    Whitespace,
    Ident,
    Number,

    // Punctuation
    LParen,     // (
    RParen,     // )
    LAngle,     // <
    RAngle,     // >
    LBrace,     // {
    RBrace,     // }
    LBracket,   // [
    RBracket,   // ]
    Star,       // *
    DoubleStar, // **
    Plus,       // +
    Minus,      // -
    Semicolon,  // ;
    Colon,      // :
    Comma,      // ,
    Equal,      // =
    Caret,      // ^
    Dot,        // .
    Pipe,       // |
    Amp,        // &
    Tilde,      // ~
    Slash,      // /
    Percent,    // %
    Bang,       // !
    Question,   // ?

    Keyword(Keyword),
    Qualifier(Qualifier),
}

impl TokenKind {
    /// Words that may stand in for an identifier where the grammar only
    /// inspects the literal, e.g. property attributes.
    pub fn is_word(self) -> bool {
        matches!(
            self,
            TokenKind::Ident | TokenKind::Keyword(_) | TokenKind::Qualifier(_)
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Illegal => write!(f, "ILLEGAL"),
            TokenKind::Eof => write!(f, "EOF"),
            TokenKind::Whitespace => write!(f, "WS"),
            TokenKind::Ident => write!(f, "IDENT"),
            TokenKind::Number => write!(f, "NUMBER"),
            TokenKind::LParen => write!(f, "'('"),
            TokenKind::RParen => write!(f, "')'"),
            TokenKind::LAngle => write!(f, "'<'"),
            TokenKind::RAngle => write!(f, "'>'"),
            TokenKind::LBrace => write!(f, "'{{'"),
            TokenKind::RBrace => write!(f, "'}}'"),
            TokenKind::LBracket => write!(f, "'['"),
            TokenKind::RBracket => write!(f, "']'"),
            TokenKind::Star => write!(f, "'*'"),
            TokenKind::DoubleStar => write!(f, "'**'"),
            TokenKind::Plus => write!(f, "'+'"),
            TokenKind::Minus => write!(f, "'-'"),
            TokenKind::Semicolon => write!(f, "';'"),
            TokenKind::Colon => write!(f, "':'"),
            TokenKind::Comma => write!(f, "','"),
            TokenKind::Equal => write!(f, "'='"),
            TokenKind::Caret => write!(f, "'^'"),
            TokenKind::Dot => write!(f, "'.'"),
            TokenKind::Pipe => write!(f, "'|'"),
            TokenKind::Amp => write!(f, "'&'"),
            TokenKind::Tilde => write!(f, "'~'"),
            TokenKind::Slash => write!(f, "'/'"),
            TokenKind::Percent => write!(f, "'%'"),
            TokenKind::Bang => write!(f, "'!'"),
            TokenKind::Question => write!(f, "'?'"),
            TokenKind::Keyword(kw) => write!(f, "'{}'", kw.as_str()),
            TokenKind::Qualifier(q) => write!(f, "qualifier '{}'", q.as_str()),
        }
    }
}

/// A scanned token. `span` is the half-open range of character offsets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
    pub location: SourceLocation,
    pub span: (usize, usize),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Eof => write!(f, "end of input"),
            TokenKind::Ident => write!(f, "identifier '{}'", self.literal),
            TokenKind::Number => write!(f, "number '{}'", self.literal),
            TokenKind::Whitespace => write!(f, "whitespace"),
            TokenKind::Illegal => write!(f, "illegal token '{}'", self.literal),
            kind => write!(f, "{}", kind),
        }
    }
}

impl Token {
    /// One-line dump: `[line:col] Kind literal`.
    pub fn dump(&self) -> String {
        format!(
            "[{}:{}] {:?} {}",
            self.location.line, self.location.column, self.kind, self.literal
        )
    }
}

/// Word → token kind table consulted for every identifier and `@word`.
///
/// Built once and read-only afterwards, so one table can back any number of
/// concurrent parses.
#[derive(Debug, Clone, Default)]
pub struct KeywordTable {
    words: FxHashMap<String, TokenKind>,
}

impl KeywordTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The table for header declarations: `@property`, `@interface`,
    /// `@protocol`, `typedef`, `enum`, `struct` and every [`Qualifier`].
    pub fn declarations() -> Self {
        let mut table = Self::new();
        for kw in [
            Keyword::Property,
            Keyword::Interface,
            Keyword::Protocol,
            Keyword::Typedef,
            Keyword::Enum,
            Keyword::Struct,
        ] {
            table.register(kw.as_str(), TokenKind::Keyword(kw));
        }
        for q in Qualifier::ALL {
            table.register(q.as_str(), TokenKind::Qualifier(q));
        }
        table
    }

    /// Shared instance of [`KeywordTable::declarations`].
    pub fn standard() -> &'static KeywordTable {
        static STANDARD: OnceLock<KeywordTable> = OnceLock::new();
        STANDARD.get_or_init(KeywordTable::declarations)
    }

    pub fn register(&mut self, word: &str, kind: TokenKind) {
        self.words.insert(word.to_string(), kind);
    }

    pub fn lookup(&self, word: &str) -> Option<TokenKind> {
        self.words.get(word).copied()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Lexer for declaration text
pub struct Lexer<'k> {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
    keywords: &'k KeywordTable,
}

impl<'k> Lexer<'k> {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str, keywords: &'k KeywordTable) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
            keywords,
        }
    }

    /// Tokenize the entire input. The last token is always [`TokenKind::Eof`].
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.scan();
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                break;
            }
        }
        tokens
    }

    /// Scan the next token
    pub fn scan(&mut self) -> Token {
        let loc = self.current_location();
        let start = self.position;

        let Some(ch) = self.advance() else {
            return self.token(TokenKind::Eof, String::new(), loc, start);
        };

        let kind = match ch {
            c if is_whitespace(c) => {
                let mut literal = String::from(c);
                while let Some(next) = self.peek().filter(|c| is_whitespace(*c)) {
                    literal.push(next);
                    self.advance();
                }
                return self.token(TokenKind::Whitespace, literal, loc, start);
            }

            'a'..='z' | 'A'..='Z' | '_' => {
                let word = self.identifier(ch);
                let kind = self.keywords.lookup(&word).unwrap_or(TokenKind::Ident);
                return self.token(kind, word, loc, start);
            }

            '0'..='9' => {
                let mut literal = String::from(ch);
                while let Some(next) = self
                    .peek()
                    .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '.')
                {
                    literal.push(next);
                    self.advance();
                }
                return self.token(TokenKind::Number, literal, loc, start);
            }

            // `@word` is only meaningful when registered
            '@' => {
                let word = match self.peek() {
                    Some(c) if c.is_ascii_alphabetic() || c == '_' => {
                        self.advance();
                        format!("@{}", self.identifier(c))
                    }
                    _ => String::from("@"),
                };
                let kind = self.keywords.lookup(&word).unwrap_or(TokenKind::Illegal);
                return self.token(kind, word, loc, start);
            }

            '*' => {
                if self.peek() == Some('*') {
                    self.advance();
                    return self.token(TokenKind::DoubleStar, "**".to_string(), loc, start);
                }
                TokenKind::Star
            }
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '<' => TokenKind::LAngle,
            '>' => TokenKind::RAngle,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            ';' => TokenKind::Semicolon,
            ':' => TokenKind::Colon,
            ',' => TokenKind::Comma,
            '=' => TokenKind::Equal,
            '^' => TokenKind::Caret,
            '.' => TokenKind::Dot,
            '|' => TokenKind::Pipe,
            '&' => TokenKind::Amp,
            '~' => TokenKind::Tilde,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '!' => TokenKind::Bang,
            '?' => TokenKind::Question,
            _ => TokenKind::Illegal,
        };

        self.token(kind, ch.to_string(), loc, start)
    }

    fn token(&self, kind: TokenKind, literal: String, location: SourceLocation, start: usize) -> Token {
        Token {
            kind,
            literal,
            location,
            span: (start, self.position),
        }
    }

    /// Consume the rest of an identifier whose first character was already read
    fn identifier(&mut self, first_char: char) -> String {
        let mut ident = String::from(first_char);
        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        ident
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = *self.input.get(self.position)?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    /// Get current source location
    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

fn is_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\r' | '\n')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source, KeywordTable::standard())
            .tokenize()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_method_tokens() {
        let tokens = kinds("- (void)alloc;");
        assert_eq!(
            tokens,
            vec![
                TokenKind::Minus,
                TokenKind::Whitespace,
                TokenKind::LParen,
                TokenKind::Ident,
                TokenKind::RParen,
                TokenKind::Ident,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_whitespace_runs_coalesce() {
        let tokens = Lexer::new("a \t\n b", KeywordTable::standard()).tokenize();
        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens[1].kind, TokenKind::Whitespace);
        assert_eq!(tokens[1].literal, " \t\n ");
        assert_eq!(tokens[2].location, SourceLocation::new(2, 2));
    }

    #[test]
    fn test_at_keywords() {
        let tokens = kinds("@property @interface @protocol @end");
        assert_eq!(tokens[0], TokenKind::Keyword(Keyword::Property));
        assert_eq!(tokens[2], TokenKind::Keyword(Keyword::Interface));
        assert_eq!(tokens[4], TokenKind::Keyword(Keyword::Protocol));
        assert_eq!(tokens[6], TokenKind::Illegal);
    }

    #[test]
    fn test_qualifiers_come_from_table() {
        let tokens = kinds("const __kindof _Nullable nullable");
        assert_eq!(tokens[0], TokenKind::Qualifier(Qualifier::Const));
        assert_eq!(tokens[2], TokenKind::Qualifier(Qualifier::Kindof));
        assert_eq!(tokens[4], TokenKind::Qualifier(Qualifier::NullableAnnot));
        assert_eq!(tokens[6], TokenKind::Qualifier(Qualifier::Nullable));

        // An empty table makes the scanner grammar-agnostic
        let empty = KeywordTable::new();
        let tokens = Lexer::new("const @property", &empty).tokenize();
        assert_eq!(tokens[0].kind, TokenKind::Ident);
        assert_eq!(tokens[2].kind, TokenKind::Illegal);
        assert_eq!(tokens[2].literal, "@property");
    }

    #[test]
    fn test_pointer_markers() {
        assert_eq!(
            kinds("** * *"),
            vec![
                TokenKind::DoubleStar,
                TokenKind::Whitespace,
                TokenKind::Star,
                TokenKind::Whitespace,
                TokenKind::Star,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_numbers_and_illegal() {
        let tokens = Lexer::new("0x1F 1UL # $", KeywordTable::standard()).tokenize();
        assert_eq!(tokens[0].kind, TokenKind::Number);
        assert_eq!(tokens[0].literal, "0x1F");
        assert_eq!(tokens[2].literal, "1UL");
        assert_eq!(tokens[4].kind, TokenKind::Illegal);
        assert_eq!(tokens[6].kind, TokenKind::Illegal);
    }

    #[test]
    fn test_dump() {
        let tokens = Lexer::new("\n@property", KeywordTable::standard()).tokenize();
        assert_eq!(tokens[1].dump(), "[2:1] Keyword(Property) @property");
        assert_eq!(tokens[1].span, (1, 10));
    }

    #[test]
    fn test_eof_is_last() {
        let tokens = Lexer::new("", KeywordTable::standard()).tokenize();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Eof);
        assert_eq!(tokens[0].to_string(), "end of input");
    }
}
