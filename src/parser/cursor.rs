//! Index-based token cursor
//!
//! The cursor owns the token vector for one parse and walks it with a plain
//! index. Backtracking is a saved index: take a [`Checkpoint`], attempt a
//! sub-parse, [`restore`](TokenCursor::restore) on a dead end. `unscan` is
//! the one-token special case of the same idea.

use super::lexer::{Token, TokenKind};

/// Saved cursor position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint(usize);

pub struct TokenCursor {
    tokens: Vec<Token>,
    position: usize,
    last: Option<usize>,
    skip_whitespace: bool,
}

impl TokenCursor {
    /// `tokens` must end with an end-of-input token, as [`Lexer::tokenize`]
    /// guarantees.
    ///
    /// [`Lexer::tokenize`]: super::lexer::Lexer::tokenize
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            position: 0,
            last: None,
            skip_whitespace: false,
        }
    }

    /// When enabled, `scan` and `peek` never return whitespace tokens.
    pub fn set_skip_whitespace(&mut self, skip: bool) {
        self.skip_whitespace = skip;
    }

    /// Return the next token and advance past it. At end of input the
    /// end-of-input token is returned again on every call.
    pub fn scan(&mut self) -> Token {
        self.last = Some(self.position);
        if self.skip_whitespace {
            while self.current().kind == TokenKind::Whitespace {
                self.position += 1;
            }
        }
        let token = self.current().clone();
        if token.kind != TokenKind::Eof {
            self.position += 1;
        }
        token
    }

    /// Step back over the most recent `scan`. A second `unscan` without an
    /// intervening `scan` does nothing.
    pub fn unscan(&mut self) {
        if let Some(position) = self.last.take() {
            self.position = position;
        }
    }

    pub fn peek(&mut self) -> Token {
        let token = self.scan();
        self.unscan();
        token
    }

    /// Kind of the next token without cloning it.
    pub fn peek_kind(&self) -> TokenKind {
        let mut position = self.position;
        if self.skip_whitespace {
            while self.tokens[position].kind == TokenKind::Whitespace {
                position += 1;
            }
        }
        self.tokens[position].kind
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.position)
    }

    pub fn restore(&mut self, checkpoint: Checkpoint) {
        self.position = checkpoint.0;
        self.last = None;
    }

    /// Every token between two checkpoints, whitespace included.
    pub fn raw_between(&self, from: Checkpoint, to: Checkpoint) -> &[Token] {
        &self.tokens[from.0..to.0.max(from.0)]
    }

    /// The token most recently returned by `scan`.
    pub fn previous(&self) -> Option<&Token> {
        self.tokens[..self.position]
            .iter()
            .rev()
            .find(|t| !self.skip_whitespace || t.kind != TokenKind::Whitespace)
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    fn current(&self) -> &Token {
        // The end-of-input token is never stepped over, so the index stays in bounds
        &self.tokens[self.position]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::{KeywordTable, Lexer};

    fn cursor(source: &str) -> TokenCursor {
        TokenCursor::new(Lexer::new(source, KeywordTable::standard()).tokenize())
    }

    #[test]
    fn test_scan_and_unscan() {
        let mut c = cursor("a b");
        assert_eq!(c.scan().literal, "a");
        assert_eq!(c.scan().kind, TokenKind::Whitespace);
        c.unscan();
        c.unscan();
        assert_eq!(c.scan().kind, TokenKind::Whitespace);
        assert_eq!(c.scan().literal, "b");
    }

    #[test]
    fn test_skip_whitespace() {
        let mut c = cursor("  a \n b  ");
        c.set_skip_whitespace(true);
        assert_eq!(c.peek().literal, "a");
        assert_eq!(c.peek_kind(), TokenKind::Ident);
        assert_eq!(c.scan().literal, "a");
        assert_eq!(c.scan().literal, "b");
        assert_eq!(c.previous().map(|t| t.literal.as_str()), Some("b"));
        assert_eq!(c.scan().kind, TokenKind::Eof);
    }

    #[test]
    fn test_eof_is_sticky() {
        let mut c = cursor("x");
        c.scan();
        for _ in 0..3 {
            assert_eq!(c.scan().kind, TokenKind::Eof);
        }
        c.unscan();
        assert_eq!(c.peek().kind, TokenKind::Eof);
    }

    #[test]
    fn test_checkpoint_restore() {
        let mut c = cursor("(^name)");
        c.set_skip_whitespace(true);
        let cp = c.checkpoint();
        c.scan();
        c.scan();
        c.scan();
        c.restore(cp);
        assert_eq!(c.scan().kind, TokenKind::LParen);
    }

    #[test]
    fn test_raw_between_keeps_whitespace() {
        let mut c = cursor("1 <<  2;");
        c.set_skip_whitespace(true);
        let start = c.checkpoint();
        while c.peek_kind() != TokenKind::Semicolon {
            c.scan();
        }
        let raw: String = c
            .raw_between(start, c.checkpoint())
            .iter()
            .map(|t| t.literal.as_str())
            .collect();
        assert_eq!(raw, "1 <<  2");
    }
}
