//! Objective-C declaration parsing
//!
//! This module handles the declarations introduced by a method marker or an
//! `@` keyword:
//!
//! - Methods: `- (void)setValue:(id)value forKey:(NSString *)key;`
//! - Properties: `@property (nonatomic, copy) NSString *title;`
//! - Interfaces: `@interface NSArray<__covariant ObjectType> : NSObject <NSCopying>`
//! - Protocols: `@protocol NSTableViewDelegate <NSControlTextEditingDelegate>`
//!
//! # Grammar
//!
//! ```text
//! method     ::= ("+" | "-") "(" type ")" label (";" | ":" method_args)
//! method_args ::= "(" type ")" name (label ":" "(" type ")" name)* ("," "...")? ";"
//! property   ::= "@property" ("(" attr ("," attr)* ")")? type name? ";"
//! attr       ::= word | ("getter" | "setter") "=" word ":"?
//! interface  ::= "@interface" name type_params? (":" name)? protocols?
//! protocol   ::= "@protocol" name (":" name)? protocols?
//! type_params ::= "<" variance? name ("," variance? name)* ">"
//! protocols  ::= "<" name ("," name)* ">"
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::{Keyword, TokenKind};
use crate::parser::parse::{ParseError, Parser};
use std::collections::BTreeMap;

impl Parser {
    /// Parse method declaration: -/+ (type)label:(type)name ...;
    pub(crate) fn parse_method(&mut self) -> Result<MethodDecl, ParseError> {
        let marker = self.cursor.scan();
        let is_class = match marker.kind {
            TokenKind::Plus => true,
            TokenKind::Minus => false,
            _ => return Err(self.unexpected(&marker, "'+' or '-'")),
        };

        let return_type = self.parse_type(true)?;
        let mut name_parts = vec![self.expect_word("method name")?.literal];
        let mut args = Vec::new();
        let mut variadic = false;

        if self.match_token(TokenKind::Semicolon) {
            return Ok(MethodDecl {
                is_class,
                return_type,
                name_parts,
                args,
                variadic,
            });
        }

        self.expect_token(TokenKind::Colon, "':' or ';' after method name")?;
        loop {
            let ty = self.parse_type(true)?;
            let name = self.expect_word("argument name")?.literal;
            args.push(ArgInfo::new(ty, name));

            if self.match_token(TokenKind::Comma) {
                self.expect_ellipsis()?;
                args.push(ArgInfo::variadic());
                variadic = true;
                self.expect_token(TokenKind::Semicolon, "';' after '...'")?;
                break;
            }

            if self.cursor.peek_kind().is_word() {
                name_parts.push(self.cursor.scan().literal);
                self.expect_token(TokenKind::Colon, "':' after method label")?;
                continue;
            }

            self.expect_token(TokenKind::Semicolon, "';' after method arguments")?;
            break;
        }

        Ok(MethodDecl {
            is_class,
            return_type,
            name_parts,
            args,
            variadic,
        })
    }

    /// Parse property declaration: @property (attrs) type name;
    pub(crate) fn parse_property(&mut self) -> Result<PropertyDecl, ParseError> {
        self.expect_token(TokenKind::Keyword(Keyword::Property), "'@property'")?;

        let mut attrs = BTreeMap::new();
        if self.match_token(TokenKind::LParen) && !self.match_token(TokenKind::RParen) {
            loop {
                self.parse_property_attr(&mut attrs)?;
                if !self.match_token(TokenKind::Comma) {
                    break;
                }
            }
            self.expect_token(TokenKind::RParen, "')' after property attributes")?;
        }

        let ty = self.parse_type(false)?;
        let name = self.parse_declared_name(&ty, "property name")?;
        self.expect_token(TokenKind::Semicolon, "';' after property")?;

        Ok(PropertyDecl { name, ty, attrs })
    }

    fn parse_property_attr(
        &mut self,
        attrs: &mut BTreeMap<PropertyAttr, AttrValue>,
    ) -> Result<(), ParseError> {
        let token = self.expect_word("property attribute")?;
        let attr = match token.literal.as_str() {
            "class" => PropertyAttr::Class,
            "nonatomic" => PropertyAttr::Nonatomic,
            "readonly" => PropertyAttr::Readonly,
            "weak" => PropertyAttr::Weak,
            "copy" => PropertyAttr::Copy,
            "retain" => PropertyAttr::Retain,
            "unsafe_unretained" => PropertyAttr::UnsafeUnretained,
            "nullable" => PropertyAttr::Nullable,
            "nonnull" => PropertyAttr::Nonnull,
            "null_unspecified" => PropertyAttr::NullUnspecified,
            "null_resettable" => PropertyAttr::NullResettable,
            "getter" => PropertyAttr::Getter,
            "setter" => PropertyAttr::Setter,
            // Defaults: recorded as absence
            "readwrite" | "strong" | "assign" | "atomic" => return Ok(()),
            _ => {
                return Err(ParseError::UnrecognizedAttribute {
                    name: token.literal,
                    location: token.location,
                })
            }
        };

        let value = match attr {
            PropertyAttr::Getter | PropertyAttr::Setter => {
                self.expect_token(TokenKind::Equal, "'=' after accessor attribute")?;
                let mut selector = self.expect_word("accessor name")?.literal;
                if attr == PropertyAttr::Setter && self.match_token(TokenKind::Colon) {
                    selector.push(':');
                }
                AttrValue::Value(selector)
            }
            _ => AttrValue::Flag,
        };
        attrs.insert(attr, value);
        Ok(())
    }

    /// Name after a type. Falls back to the name embedded in a block or
    /// function pointer type: `void (^handler)(void)`.
    pub(crate) fn parse_declared_name(
        &mut self,
        ty: &TypeInfo,
        expected: &str,
    ) -> Result<String, ParseError> {
        if self.cursor.peek_kind().is_word() {
            return Ok(self.cursor.scan().literal);
        }
        match ty.func().and_then(|f| f.name.clone()) {
            Some(name) => Ok(name),
            None => Err(self.unexpected_next(expected)),
        }
    }

    /// Parse interface header: @interface Name<Params> : Super <Protocols>
    pub(crate) fn parse_interface(&mut self) -> Result<InterfaceDecl, ParseError> {
        self.expect_token(TokenKind::Keyword(Keyword::Interface), "'@interface'")?;
        let name_token = self.expect_token(TokenKind::Ident, "interface name")?;

        // `Name<T>` declares type parameters, `Name <P>` adopts protocols
        let mut type_params = Vec::new();
        let next = self.cursor.peek();
        if next.kind == TokenKind::LAngle && next.span.0 == name_token.span.1 {
            self.cursor.scan();
            loop {
                let variance = if self.check_word(Variance::Covariant.as_str()) {
                    self.cursor.scan();
                    Some(Variance::Covariant)
                } else if self.check_word(Variance::Contravariant.as_str()) {
                    self.cursor.scan();
                    Some(Variance::Contravariant)
                } else {
                    None
                };
                let name = self.expect_identifier("type parameter name")?;
                type_params.push(TypeParam { variance, name });
                if !self.match_token(TokenKind::Comma) {
                    break;
                }
            }
            self.expect_token(TokenKind::RAngle, "'>' after type parameters")?;
        }

        let super_name = self.parse_super_name("superclass name")?;
        let protocols = self.parse_protocol_list()?;

        Ok(InterfaceDecl {
            name: name_token.literal,
            type_params,
            super_name,
            protocols,
        })
    }

    /// Parse protocol header: @protocol Name <Protocols>
    pub(crate) fn parse_protocol(&mut self) -> Result<ProtocolDecl, ParseError> {
        self.expect_token(TokenKind::Keyword(Keyword::Protocol), "'@protocol'")?;
        let name = self.expect_identifier("protocol name")?;
        let super_name = self.parse_super_name("superprotocol name")?;
        let protocols = self.parse_protocol_list()?;

        Ok(ProtocolDecl {
            name,
            super_name,
            protocols,
        })
    }

    fn parse_super_name(&mut self, expected: &str) -> Result<Option<String>, ParseError> {
        if self.match_token(TokenKind::Colon) {
            Ok(Some(self.expect_identifier(expected)?))
        } else {
            Ok(None)
        }
    }

    fn parse_protocol_list(&mut self) -> Result<Vec<String>, ParseError> {
        let mut protocols = Vec::new();
        if !self.match_token(TokenKind::LAngle) {
            return Ok(protocols);
        }
        loop {
            protocols.push(self.expect_identifier("protocol name")?);
            if !self.match_token(TokenKind::Comma) {
                break;
            }
        }
        self.expect_token(TokenKind::RAngle, "'>' after protocol list")?;
        Ok(protocols)
    }
}
