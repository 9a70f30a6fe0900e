//! Objective-C declaration parser
//!
//! This module transforms one header declaration into an AST and back:
//! - [`lexer`]: Tokenization (declaration text → tokens)
//! - [`cursor`]: Indexed token cursor with checkpoints
//! - [`parse`]: Dispatch (tokens → [`Statement`](ast::Statement))
//! - [`ast`]: AST node definitions
//! - `printer`: canonical text through `Display`
//!
//! # Supported Declarations
//!
//! - Methods: `- (void)setValue:(id)value forKey:(NSString *)key;`
//! - Properties, class interfaces and protocols
//! - Enums, structs, variables, functions and `typedef` aliases
//! - Types with qualifiers, nested generics, pointers, blocks and function pointers
//!
//! Only single standalone declarations are accepted: no preprocessor, no
//! comments, no method bodies.
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser over an index-based cursor.
//! No external parser generator dependencies.

pub mod ast;
pub mod cursor;
mod declarations;
mod definitions;
pub mod lexer;
pub mod parse;
mod printer;
mod types;

pub use parse::{parse, parse_with_hint, Hint, ParseError, Parser};
