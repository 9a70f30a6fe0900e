//! Documentation topics
//!
//! A topic is one documented symbol as delivered by the documentation
//! fetcher: its declaration text plus the classification label shown on the
//! page ("Instance Method", "Enumeration Case", ...). The label is decided by
//! page structure, not by parsing, and selects the parser [`Hint`] for
//! declarations that do not identify themselves.

use crate::parser::ast::Statement;
use crate::parser::{Hint, ParseError, Parser};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification labels used on documentation pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TopicKind {
    InstanceMethod,
    TypeMethod,
    InstanceProperty,
    TypeProperty,
    Class,
    Protocol,
    Enumeration,
    EnumerationCase,
    Structure,
    TypeAlias,
    GlobalVariable,
    Function,
    Macro,
    ApiCollection,
}

impl TopicKind {
    pub const ALL: [TopicKind; 14] = [
        TopicKind::InstanceMethod,
        TopicKind::TypeMethod,
        TopicKind::InstanceProperty,
        TopicKind::TypeProperty,
        TopicKind::Class,
        TopicKind::Protocol,
        TopicKind::Enumeration,
        TopicKind::EnumerationCase,
        TopicKind::Structure,
        TopicKind::TypeAlias,
        TopicKind::GlobalVariable,
        TopicKind::Function,
        TopicKind::Macro,
        TopicKind::ApiCollection,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TopicKind::InstanceMethod => "Instance Method",
            TopicKind::TypeMethod => "Type Method",
            TopicKind::InstanceProperty => "Instance Property",
            TopicKind::TypeProperty => "Type Property",
            TopicKind::Class => "Class",
            TopicKind::Protocol => "Protocol",
            TopicKind::Enumeration => "Enumeration",
            TopicKind::EnumerationCase => "Enumeration Case",
            TopicKind::Structure => "Structure",
            TopicKind::TypeAlias => "Type Alias",
            TopicKind::GlobalVariable => "Global Variable",
            TopicKind::Function => "Function",
            TopicKind::Macro => "Macro",
            TopicKind::ApiCollection => "API Collection",
        }
    }

    /// Case-insensitive label lookup; surrounding whitespace is ignored.
    pub fn from_label(label: &str) -> Option<TopicKind> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.label().eq_ignore_ascii_case(label))
    }

    /// Parser hint for declarations of this kind.
    pub fn hint(self) -> Hint {
        match self {
            TopicKind::EnumerationCase => Hint::EnumCase,
            TopicKind::GlobalVariable => Hint::Variable,
            TopicKind::Function => Hint::Function,
            _ => Hint::None,
        }
    }
}

impl fmt::Display for TopicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One fetched documentation page, as stored by the fetcher.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Topic {
    pub path: String,
    pub title: String,
    #[serde(rename = "Type")]
    pub kind: String,
    pub description: String,
    pub declaration: String,
}

impl Topic {
    pub fn topic_kind(&self) -> Option<TopicKind> {
        TopicKind::from_label(&self.kind)
    }

    pub fn hint(&self) -> Hint {
        self.topic_kind().map_or(Hint::None, TopicKind::hint)
    }

    /// Parse the declaration with the hint its label selects.
    pub fn parse(&self) -> Result<Statement, ParseError> {
        Parser::new(self.declaration.trim())
            .with_hint(self.hint())
            .parse()
    }
}

/// Whether an aggregation run may skip a declaration that failed with `err`.
///
/// Unsupported `typedef` and `const` forms are skipped; every other error
/// must fail the run.
pub fn is_skippable(err: &ParseError) -> bool {
    let text = err.to_string();
    text.contains("typedef") || text.contains("const")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ast::Decl;

    #[test]
    fn test_labels_round_trip() {
        for kind in TopicKind::ALL {
            assert_eq!(TopicKind::from_label(kind.label()), Some(kind));
        }
        assert_eq!(
            TopicKind::from_label(" enumeration case "),
            Some(TopicKind::EnumerationCase)
        );
        assert_eq!(TopicKind::from_label("Article"), None);
    }

    #[test]
    fn test_hints() {
        assert_eq!(TopicKind::EnumerationCase.hint(), Hint::EnumCase);
        assert_eq!(TopicKind::GlobalVariable.hint(), Hint::Variable);
        assert_eq!(TopicKind::Function.hint(), Hint::Function);
        assert_eq!(TopicKind::InstanceMethod.hint(), Hint::None);
    }

    #[test]
    fn test_topic_from_json() {
        let json = r#"{
            "Path": "/documentation/appkit/nswindowstylemask/titled",
            "Title": "NSWindowStyleMaskTitled",
            "Type": "Enumeration Case",
            "Declaration": "NSWindowStyleMaskTitled = 1 << 0"
        }"#;
        let topic: Topic = serde_json::from_str(json).unwrap();
        assert_eq!(topic.topic_kind(), Some(TopicKind::EnumerationCase));
        let stmt = topic.parse().unwrap();
        assert!(matches!(stmt.decl, Decl::Variable(ref v) if v.ty.is_none()));
    }

    #[test]
    fn test_skip_policy() {
        let typedef_err = Parser::new("typedef NS_ENUM(NSInteger, NSFoo) { A };")
            .parse()
            .unwrap_err();
        assert!(is_skippable(&typedef_err), "{}", typedef_err);

        let other = Parser::new("- (void)close").parse().unwrap_err();
        assert!(!is_skippable(&other), "{}", other);
    }
}
