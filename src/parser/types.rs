//! Type grammar
//!
//! ```text
//! type       ::= prefix_qual* base generics? ("**" outer_qual* | single)
//! single     ::= "*"? func? suffix_qual* ("*" outer_qual*)?
//! base       ::= ("struct" | "enum") identifier
//!              | multiword
//!              | identifier
//! multiword  ::= ("unsigned" | "signed" | "long" | "oneway") builtin? builtin?
//! generics   ::= "<" type ("," type)* ">"
//! func       ::= "(" ("^" | "*") suffix_qual* identifier? ")" "(" args ")"
//! args       ::= ε | arg ("," arg)* ("," "...")?
//! arg        ::= type identifier? | "..."
//! ```
//!
//! A parenthesized type (method return and argument types) wraps the whole
//! production in `(` `)`.

use crate::parser::ast::*;
use crate::parser::lexer::{Keyword, TokenKind};
use crate::parser::parse::{ParseError, Parser};

/// Words that open a multi-word built-in type name.
const MULTIWORD_STARTERS: [&str; 4] = ["unsigned", "signed", "long", "oneway"];

/// Words that may continue a multi-word built-in type name.
const MULTIWORD_CONTINUATIONS: [&str; 6] = ["long", "int", "short", "char", "double", "void"];

impl Parser {
    /// Parse one type. With `parens` the type must be wrapped in `(` `)`.
    pub(crate) fn parse_type(&mut self, parens: bool) -> Result<TypeInfo, ParseError> {
        if parens {
            self.expect_token(TokenKind::LParen, "'(' before type")?;
        }

        let mut ti = TypeInfo::named("");
        self.parse_qualifiers(&mut ti, Placement::Prefix)?;
        ti.kind = TypeKind::Named(self.parse_type_name()?);

        if self.match_token(TokenKind::LAngle) {
            loop {
                ti.params.push(self.parse_type(false)?);
                if !self.match_token(TokenKind::Comma) || self.check(TokenKind::Eof) {
                    break;
                }
            }
            self.expect_token(TokenKind::RAngle, "'>' after type parameters")?;
        }

        if self.match_token(TokenKind::Star) {
            ti.is_ptr = true;
        } else if self.match_token(TokenKind::DoubleStar) {
            ti.is_ptr = true;
            ti.is_ptr_ptr = true;
            // `NSError ** _Nullable` qualifies the outer pointer
            self.parse_qualifiers(&mut ti, Placement::Outer)?;
            if parens {
                self.expect_token(TokenKind::RParen, "')' after type")?;
            }
            return Ok(ti);
        }

        if let Some(func_ti) = self.parse_function_type(&ti)? {
            ti = func_ti;
        }

        self.parse_qualifiers(&mut ti, Placement::Suffix)?;

        if self.match_token(TokenKind::Star) {
            ti.is_ptr_ptr = true;
            self.parse_qualifiers(&mut ti, Placement::Outer)?;
        }

        if parens {
            self.expect_token(TokenKind::RParen, "')' after type")?;
        }

        Ok(ti)
    }

    /// Consume qualifiers at one placement. Prefix-only qualifiers are
    /// rejected anywhere else.
    fn parse_qualifiers(
        &mut self,
        ti: &mut TypeInfo,
        placement: Placement,
    ) -> Result<(), ParseError> {
        while let TokenKind::Qualifier(qualifier) = self.cursor.peek_kind() {
            let token = self.cursor.scan();
            if !qualifier.allowed_at(placement) {
                return Err(ParseError::UnrecognizedQualifier {
                    name: token.literal,
                    location: token.location,
                });
            }
            ti.qualifiers.push(QualifierInfo {
                qualifier,
                placement,
            });
        }
        Ok(())
    }

    fn parse_type_name(&mut self) -> Result<String, ParseError> {
        for keyword in [Keyword::Struct, Keyword::Enum] {
            if self.match_token(TokenKind::Keyword(keyword)) {
                let name = self.expect_identifier("type name")?;
                return Ok(format!("{} {}", keyword.as_str(), name));
            }
        }

        let mut name = self.expect_identifier("type name")?;
        if MULTIWORD_STARTERS.contains(&name.as_str()) {
            for _ in 0..2 {
                let next = self.cursor.peek();
                if next.kind != TokenKind::Ident
                    || !MULTIWORD_CONTINUATIONS.contains(&next.literal.as_str())
                {
                    break;
                }
                self.cursor.scan();
                name.push(' ');
                name.push_str(&next.literal);
            }
        }
        Ok(name)
    }

    /// `(^name)(args)` or `(*name)(args)` after a return type. Returns the
    /// outer function type, or `None` with the cursor untouched when the next
    /// tokens are not a block or function pointer group.
    fn parse_function_type(&mut self, return_type: &TypeInfo) -> Result<Option<TypeInfo>, ParseError> {
        let checkpoint = self.cursor.checkpoint();
        if !self.match_token(TokenKind::LParen) {
            return Ok(None);
        }
        let kind = match self.cursor.scan().kind {
            TokenKind::Caret => FunctionKind::Block,
            TokenKind::Star => FunctionKind::Pointer,
            _ => {
                self.cursor.restore(checkpoint);
                return Ok(None);
            }
        };

        let mut outer = TypeInfo::named("");
        self.parse_qualifiers(&mut outer, Placement::Suffix)?;

        let name = if self.check(TokenKind::Ident) {
            Some(self.cursor.scan().literal)
        } else {
            None
        };
        self.expect_token(TokenKind::RParen, "')' after block or function pointer name")?;
        self.expect_token(TokenKind::LParen, "'(' before argument list")?;
        let args = self.parse_function_args()?;

        // The type parsed so far, prefix qualifiers included, is the return type
        outer.kind = TypeKind::Function(Box::new(FunctionDecl {
            name,
            return_type: return_type.clone(),
            args,
            kind,
        }));
        Ok(Some(outer))
    }

    /// Argument list after its opening `(`, through the closing `)`.
    pub(crate) fn parse_function_args(&mut self) -> Result<Vec<ArgInfo>, ParseError> {
        let mut args = Vec::new();
        if self.match_token(TokenKind::RParen) {
            return Ok(args);
        }

        loop {
            if self.check(TokenKind::Eof) {
                break;
            }
            if self.check(TokenKind::Dot) {
                self.expect_ellipsis()?;
                args.push(ArgInfo::variadic());
                break;
            }

            let ty = self.parse_type(false)?;
            let arg = if self.check(TokenKind::Ident) {
                ArgInfo::new(ty, self.cursor.scan().literal)
            } else {
                ArgInfo::unnamed(ty)
            };
            args.push(arg);

            if !self.match_token(TokenKind::Comma) {
                break;
            }
        }

        self.expect_token(TokenKind::RParen, "')' after arguments")?;
        Ok(args)
    }
}
