//! Declaration entries loaded for inspection
//!
//! An input file is either a JSON array of [`Topic`] records or plain text
//! with one declaration per line. Text lines may carry a topic label before
//! a tab (`Enumeration Case<TAB>NSFoo = 1`) and lines starting with `#` are
//! ignored.
//!
//! Every entry is analyzed once on load: tokens, parse result, canonical text
//! and the round-trip verdict. The TUI and the batch modes only read them.

use crate::parser::ast::Statement;
use crate::parser::lexer::{KeywordTable, Lexer, Token, TokenKind};
use crate::parser::{Hint, ParseError, Parser};
use crate::topic::{is_skippable, Topic, TopicKind};

/// Outcome of printing a parsed declaration and parsing the output again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundTrip {
    /// Canonical text equals the input up to whitespace runs.
    Exact,
    /// Text differs but the reparsed tree is equal.
    Equivalent,
    /// The canonical text does not parse back to the same tree.
    Unstable,
    /// The input did not parse.
    NotParsed,
}

impl RoundTrip {
    pub fn as_str(self) -> &'static str {
        match self {
            RoundTrip::Exact => "exact",
            RoundTrip::Equivalent => "equivalent",
            RoundTrip::Unstable => "unstable",
            RoundTrip::NotParsed => "not parsed",
        }
    }
}

pub struct Entry {
    /// 1-based line in the input file, or the index for JSON input.
    pub line: usize,
    pub kind: Option<TopicKind>,
    pub source: String,
    pub tokens: Vec<Token>,
    pub result: Result<Statement, ParseError>,
    pub canonical: Option<String>,
    pub round_trip: RoundTrip,
}

impl Entry {
    pub fn new(line: usize, kind: Option<TopicKind>, source: &str) -> Self {
        let source = source.trim().to_string();
        let hint = kind.map_or(Hint::None, TopicKind::hint);
        let tokens = Lexer::new(&source, KeywordTable::standard()).tokenize();
        let result = Parser::new(&source).with_hint(hint).parse();

        let (canonical, round_trip) = match &result {
            Ok(stmt) => {
                let canonical = stmt.to_string();
                let round_trip = match Parser::new(&canonical).with_hint(hint).parse() {
                    Ok(reparsed) if reparsed == *stmt => {
                        if collapse_whitespace(&source) == canonical {
                            RoundTrip::Exact
                        } else {
                            RoundTrip::Equivalent
                        }
                    }
                    _ => RoundTrip::Unstable,
                };
                (Some(canonical), round_trip)
            }
            Err(_) => (None, RoundTrip::NotParsed),
        };

        Entry {
            line,
            kind,
            source,
            tokens,
            result,
            canonical,
            round_trip,
        }
    }

    pub fn hint(&self) -> Hint {
        self.kind.map_or(Hint::None, TopicKind::hint)
    }

    /// Failed to parse with an error the skip policy tolerates.
    pub fn is_skipped(&self) -> bool {
        self.result.as_ref().err().is_some_and(is_skippable)
    }

    /// Failed to parse with a non-skippable error, or did not round-trip.
    pub fn is_failure(&self) -> bool {
        match &self.result {
            Ok(_) => self.round_trip == RoundTrip::Unstable,
            Err(err) => !is_skippable(err),
        }
    }

    /// Tokens without whitespace and the end-of-input marker.
    pub fn visible_tokens(&self) -> impl Iterator<Item = &Token> {
        self.tokens
            .iter()
            .filter(|t| !matches!(t.kind, TokenKind::Whitespace | TokenKind::Eof))
    }
}

/// Collapse whitespace runs to one space and trim both ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Load entries from file contents, detecting JSON topic arrays.
pub fn load_entries(text: &str) -> Result<Vec<Entry>, serde_json::Error> {
    if text.trim_start().starts_with('[') {
        let topics: Vec<Topic> = serde_json::from_str(text)?;
        return Ok(topics
            .iter()
            .filter(|t| !t.declaration.trim().is_empty())
            .enumerate()
            .map(|(idx, t)| Entry::new(idx + 1, t.topic_kind(), &t.declaration))
            .collect());
    }

    Ok(text
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(idx, line)| match line.split_once('\t') {
            Some((label, decl)) => Entry::new(idx + 1, TopicKind::from_label(label), decl),
            None => Entry::new(idx + 1, None, line),
        })
        .collect())
}

/// Counts reported by `--check` and the status bar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub exact: usize,
    pub equivalent: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl Summary {
    pub fn of(entries: &[Entry]) -> Self {
        let mut summary = Summary {
            total: entries.len(),
            ..Summary::default()
        };
        for entry in entries {
            match entry.round_trip {
                RoundTrip::Exact => summary.exact += 1,
                RoundTrip::Equivalent => summary.equivalent += 1,
                _ if entry.is_skipped() => summary.skipped += 1,
                _ => summary.failed += 1,
            }
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_input() {
        let text = "# AppKit samples\n\
                    - (void)close;\n\
                    \n\
                    Enumeration Case\tNSFoo = 1 << 2\n\
                    Global Variable\tNSString*  const NSBar;\n";
        let entries = load_entries(text).unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].line, 2);
        assert_eq!(entries[0].round_trip, RoundTrip::Exact);
        assert_eq!(entries[1].kind, Some(TopicKind::EnumerationCase));
        assert_eq!(entries[1].hint(), Hint::EnumCase);
        assert!(entries[1].result.is_ok());
        assert_eq!(entries[2].canonical.as_deref(), Some("NSString * const NSBar;"));
        assert_eq!(entries[2].round_trip, RoundTrip::Equivalent);
    }

    #[test]
    fn test_json_input() {
        let text = r#"[
            {"Type": "Instance Method", "Title": "close", "Declaration": "- (void)close;"},
            {"Type": "Article", "Title": "About Windows", "Declaration": ""},
            {"Type": "Type Alias", "Title": "NSFoo", "Declaration": "typedef NS_ENUM(NSInteger, NSFoo) {};"}
        ]"#;
        let entries = load_entries(text).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].kind, Some(TopicKind::InstanceMethod));
        assert!(entries[1].is_skipped());
        assert!(!entries[1].is_failure());

        let summary = Summary::of(&entries);
        assert_eq!(summary.total, 2);
        assert_eq!(summary.exact, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.failed, 0);
    }

    #[test]
    fn test_failure_counts() {
        let entries = load_entries("@property (sticky) id x;\n").unwrap();
        assert!(entries[0].is_failure());
        assert_eq!(entries[0].round_trip, RoundTrip::NotParsed);
        assert_eq!(Summary::of(&entries).failed, 1);
    }

    #[test]
    fn test_visible_tokens() {
        let entry = Entry::new(1, None, "- (void) close ;");
        let literals: Vec<&str> = entry.visible_tokens().map(|t| t.literal.as_str()).collect();
        assert_eq!(literals, vec!["-", "(", "void", ")", "close", ";"]);
    }

    #[test]
    fn test_bad_json() {
        assert!(load_entries("[{").is_err());
    }
}
