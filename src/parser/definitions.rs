//! C definition parsing: enums, structs, variables and functions
//!
//! ```text
//! enum      ::= "enum" name? (":" type)? "{" (case ("," case)* ","?)? "}"
//! case      ::= name ("=" value)?
//! struct    ::= "struct" name? "{" (variable ";")* "}"
//! variable  ::= type name? ("=" value)?
//! function  ::= type name "(" args ")"
//! ```
//!
//! `value` is captured as text: every token up to the terminator at nesting
//! depth zero, with whitespace runs collapsed to one space.

use crate::parser::ast::*;
use crate::parser::lexer::{Keyword, TokenKind};
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse enum definition: enum Name : Type { A, B = 1 }
    pub(crate) fn parse_enum(&mut self) -> Result<EnumDecl, ParseError> {
        self.expect_token(TokenKind::Keyword(Keyword::Enum), "'enum'")?;

        let name = if self.check(TokenKind::Ident) {
            Some(self.cursor.scan().literal)
        } else {
            None
        };
        let ty = if self.match_token(TokenKind::Colon) {
            Some(self.parse_type(false)?)
        } else {
            None
        };

        self.expect_token(TokenKind::LBrace, "'{' before enumeration cases")?;
        let mut cases = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.check(TokenKind::Eof) {
            cases.push(self.parse_enum_case()?);
            if !self.match_token(TokenKind::Comma) {
                break;
            }
        }
        self.expect_token(TokenKind::RBrace, "'}' after enumeration cases")?;

        Ok(EnumDecl { name, ty, cases })
    }

    /// Parse one enumeration case: Name or Name = value
    pub(crate) fn parse_enum_case(&mut self) -> Result<VariableDecl, ParseError> {
        let name = self.expect_identifier("enumeration case name")?;
        let value = if self.match_token(TokenKind::Equal) {
            Some(self.parse_value_text(&[TokenKind::Comma, TokenKind::Semicolon])?)
        } else {
            None
        };
        Ok(VariableDecl {
            ty: None,
            name,
            value,
        })
    }

    /// Parse struct definition: struct Name { fields }
    pub(crate) fn parse_struct(&mut self) -> Result<StructDecl, ParseError> {
        self.expect_token(TokenKind::Keyword(Keyword::Struct), "'struct'")?;

        let name = if self.check(TokenKind::Ident) {
            Some(self.cursor.scan().literal)
        } else {
            None
        };

        self.expect_token(TokenKind::LBrace, "'{' before struct fields")?;
        let mut fields = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.check(TokenKind::Eof) {
            fields.push(self.parse_variable()?);
            self.expect_token(TokenKind::Semicolon, "';' after struct field")?;
        }
        self.expect_token(TokenKind::RBrace, "'}' after struct fields")?;

        Ok(StructDecl { name, fields })
    }

    /// Parse variable declaration: type name = value
    pub(crate) fn parse_variable(&mut self) -> Result<VariableDecl, ParseError> {
        let ty = self.parse_type(false)?;
        let name = self.parse_declared_name(&ty, "variable name")?;
        let value = if self.match_token(TokenKind::Equal) {
            Some(self.parse_value_text(&[TokenKind::Semicolon])?)
        } else {
            None
        };
        Ok(VariableDecl {
            ty: Some(ty),
            name,
            value,
        })
    }

    /// Parse function declaration: type name(args)
    pub(crate) fn parse_function(&mut self) -> Result<FunctionDecl, ParseError> {
        let return_type = self.parse_type(false)?;
        let name = self.expect_identifier("function name")?;
        self.expect_token(TokenKind::LParen, "'(' after function name")?;
        let args = self.parse_function_args()?;

        Ok(FunctionDecl {
            name: Some(name),
            return_type,
            args,
            kind: FunctionKind::TopLevel,
        })
    }

    /// Raw text of a value expression, up to a terminator at depth zero or
    /// a closing bracket that would unbalance it.
    fn parse_value_text(&mut self, terminators: &[TokenKind]) -> Result<String, ParseError> {
        let start = self.cursor.checkpoint();
        let mut depth = 0usize;

        loop {
            let kind = self.cursor.peek_kind();
            match kind {
                TokenKind::Eof => break,
                k if depth == 0 && terminators.contains(&k) => break,
                TokenKind::LParen | TokenKind::LBrace | TokenKind::LBracket => depth += 1,
                TokenKind::RParen | TokenKind::RBrace | TokenKind::RBracket => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                }
                _ => {}
            }
            self.cursor.scan();
        }

        let mut text = String::new();
        for token in self.cursor.raw_between(start, self.cursor.checkpoint()) {
            if token.kind == TokenKind::Whitespace {
                text.push(' ');
            } else {
                text.push_str(&token.literal);
            }
        }

        let text = text.trim();
        if text.is_empty() {
            return Err(self.unexpected_next("value expression"));
        }
        Ok(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::*;
    use crate::parser::parse::{parse, parse_with_hint, Hint, ParseError};

    #[test]
    fn test_enum_cases() {
        match parse("enum Color { Red, Green = 1, Blue };").unwrap().decl {
            Decl::Enum(e) => {
                assert_eq!(e.name.as_deref(), Some("Color"));
                assert_eq!(e.cases.len(), 3);
                assert_eq!(e.cases[1].name, "Green");
                assert_eq!(e.cases[1].value.as_deref(), Some("1"));
                assert_eq!(e.cases[2].value, None);
            }
            other => panic!("Expected enum, got {:?}", other),
        }
    }

    #[test]
    fn test_enum_backing_type_and_trailing_comma() {
        match parse("enum : NSUInteger { A = (1 << 2), B = MAKE(1, 2), };").unwrap().decl {
            Decl::Enum(e) => {
                assert_eq!(e.name, None);
                assert_eq!(e.ty.unwrap().name(), Some("NSUInteger"));
                assert_eq!(e.cases[0].value.as_deref(), Some("(1 << 2)"));
                assert_eq!(e.cases[1].value.as_deref(), Some("MAKE(1, 2)"));
            }
            other => panic!("Expected enum, got {:?}", other),
        }
    }

    #[test]
    fn test_value_whitespace_collapses() {
        let stmt = parse_with_hint("NSFoo = 1   <<\t 3", Hint::EnumCase).unwrap();
        match stmt.decl {
            Decl::Variable(v) => assert_eq!(v.value.as_deref(), Some("1 << 3")),
            other => panic!("Expected enum case, got {:?}", other),
        }
    }

    #[test]
    fn test_struct_fields() {
        match parse("struct CGSize { CGFloat width; CGFloat height; };").unwrap().decl {
            Decl::Struct(s) => {
                assert_eq!(s.name.as_deref(), Some("CGSize"));
                let names: Vec<_> = s.fields.iter().map(|f| f.name.as_str()).collect();
                assert_eq!(names, vec!["width", "height"]);
            }
            other => panic!("Expected struct, got {:?}", other),
        }
    }

    #[test]
    fn test_const_variable() {
        match parse("const CGFloat NSFontWeightBold = 0.4;").unwrap().decl {
            Decl::Variable(v) => {
                let ty = v.ty.unwrap();
                assert!(ty.has_qualifier(Qualifier::Const));
                assert_eq!(ty.name(), Some("CGFloat"));
                assert_eq!(v.name, "NSFontWeightBold");
                assert_eq!(v.value.as_deref(), Some("0.4"));
            }
            other => panic!("Expected variable, got {:?}", other),
        }
    }

    #[test]
    fn test_function() {
        let stmt = parse_with_hint(
            "NSString * NSStringFromSelector(SEL aSelector);",
            Hint::Function,
        )
        .unwrap();
        match stmt.decl {
            Decl::Function(f) => {
                assert_eq!(f.kind, FunctionKind::TopLevel);
                assert_eq!(f.name.as_deref(), Some("NSStringFromSelector"));
                assert!(f.return_type.is_ptr);
                assert_eq!(f.args[0].name.as_deref(), Some("aSelector"));
            }
            other => panic!("Expected function, got {:?}", other),
        }
    }

    #[test]
    fn test_variadic_function() {
        let stmt = parse_with_hint("void NSLog(NSString *format, ...);", Hint::Function).unwrap();
        match stmt.decl {
            Decl::Function(f) => {
                assert!(f.is_variadic());
                assert_eq!(f.args.len(), 2);
            }
            other => panic!("Expected function, got {:?}", other),
        }
    }

    #[test]
    fn test_const_returning_function() {
        let source = "const char *NSGetSizeAndAlignment(const char *typePtr, ...);";
        let stmt = parse_with_hint(source, Hint::Function).unwrap();
        match &stmt.decl {
            Decl::Function(f) => {
                assert_eq!(f.name.as_deref(), Some("NSGetSizeAndAlignment"));
                assert!(f.return_type.has_qualifier(Qualifier::Const));
                assert!(f.return_type.is_ptr);
                assert!(f.is_variadic());
            }
            other => panic!("Expected function, got {:?}", other),
        }
        assert_eq!(stmt.to_string(), source);

        // Without a function hint a leading `const` still reads a variable
        let var = parse("const char *NSDefaultRunLoopMode;").unwrap();
        assert!(matches!(var.decl, Decl::Variable(_)));
    }

    #[test]
    fn test_unterminated_lists_after_comma() {
        let err = parse("enum { A,").unwrap_err();
        assert!(matches!(err, ParseError::UnterminatedGroup { delimiter: '}', .. }));

        let err = parse("enum Color {").unwrap_err();
        assert!(matches!(err, ParseError::UnterminatedGroup { delimiter: '}', .. }));

        let err = parse_with_hint("void f(int x,", Hint::Function).unwrap_err();
        assert!(matches!(err, ParseError::UnterminatedGroup { delimiter: ')', .. }));
    }

    #[test]
    fn test_missing_value() {
        assert!(parse_with_hint("NSFoo = ;", Hint::EnumCase).is_err());
    }
}
