//! # Introduction
//!
//! objcdecl parses single Objective-C header declarations (methods,
//! properties, interfaces, protocols, enums, structs, variables, functions
//! and type aliases) into a typed AST, and prints any AST back as canonical
//! declaration text. A terminal inspector shows how a batch of declarations
//! tokenizes, parses and round-trips.
//!
//! ## Pipeline
//!
//! ```text
//! Text → Lexer → TokenCursor → Parser → Statement → Display (canonical text)
//! ```
//!
//! 1. [`parser`]: tokenizes a declaration, dispatches on its first token
//!    (or a [`parser::Hint`]) and builds a [`parser::ast::Statement`].
//!    Every AST node implements `Display` with its canonical form.
//! 2. [`topic`]: documentation topic records, the label → hint mapping and
//!    the skip policy for unsupported forms.
//! 3. [`entries`]: loads declaration files and analyzes each entry.
//! 4. [`ui`]: ratatui-based inspector; not part of the stable library API.
//!
//! ## Example
//!
//! ```
//! use objcdecl::parser::{parse, ast::Decl};
//!
//! let stmt = parse("- (void)setValue:(id)value forKey:(NSString *)key;").unwrap();
//! match &stmt.decl {
//!     Decl::Method(m) => assert_eq!(m.selector(), "setValue:forKey:"),
//!     _ => unreachable!(),
//! }
//! assert_eq!(stmt.to_string(), "- (void)setValue:(id)value forKey:(NSString *)key;");
//! ```

pub mod entries;
pub mod parser;
pub mod topic;
pub mod ui;
