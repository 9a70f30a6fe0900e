//! Declaration list rendering with syntax highlighting
//!
//! This module renders the left pane: every loaded declaration, one per row,
//! with a round-trip marker, its input line number and highlighting driven by
//! the lexer's own tokens.

use super::{pane_block, visible_height};
use crate::entries::{Entry, RoundTrip};
use crate::parser::lexer::{Token, TokenKind};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Built-in and common framework type names
const TYPE_WORDS: [&str; 14] = [
    "void",
    "id",
    "instancetype",
    "BOOL",
    "int",
    "char",
    "short",
    "long",
    "float",
    "double",
    "unsigned",
    "signed",
    "NSInteger",
    "NSUInteger",
];

fn token_style(token: &Token) -> Style {
    match token.kind {
        TokenKind::Keyword(_) => Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD),
        TokenKind::Qualifier(_) => Style::default().fg(DEFAULT_THEME.qualifier),
        TokenKind::Number => Style::default().fg(DEFAULT_THEME.number),
        TokenKind::Illegal => Style::default()
            .fg(DEFAULT_THEME.error)
            .add_modifier(Modifier::UNDERLINED),
        TokenKind::Ident if TYPE_WORDS.contains(&token.literal.as_str()) => {
            Style::default().fg(DEFAULT_THEME.type_name)
        }
        TokenKind::LParen
        | TokenKind::RParen
        | TokenKind::LBrace
        | TokenKind::RBrace
        | TokenKind::LBracket
        | TokenKind::RBracket
        | TokenKind::LAngle
        | TokenKind::RAngle => Style::default().fg(DEFAULT_THEME.primary), // Brackets
        TokenKind::Plus | TokenKind::Minus | TokenKind::Caret | TokenKind::Star | TokenKind::DoubleStar => {
            Style::default().fg(DEFAULT_THEME.secondary)
        }
        _ => Style::default().fg(DEFAULT_THEME.fg),
    }
}

/// Highlight a declaration from its tokens
fn highlight_declaration(tokens: &[Token]) -> Vec<Span<'_>> {
    tokens
        .iter()
        .filter(|t| t.kind != TokenKind::Eof)
        .map(|t| {
            if t.kind == TokenKind::Whitespace {
                Span::raw(" ")
            } else {
                Span::styled(t.literal.as_str(), token_style(t))
            }
        })
        .collect()
}

fn marker(entry: &Entry) -> Span<'static> {
    match entry.round_trip {
        RoundTrip::Exact => Span::styled("✓ ", Style::default().fg(DEFAULT_THEME.success)),
        RoundTrip::Equivalent => Span::styled("≈ ", Style::default().fg(DEFAULT_THEME.primary)),
        RoundTrip::Unstable => Span::styled("! ", Style::default().fg(DEFAULT_THEME.warning)),
        RoundTrip::NotParsed if entry.is_skipped() => {
            Span::styled("- ", Style::default().fg(DEFAULT_THEME.comment))
        }
        RoundTrip::NotParsed => Span::styled("✗ ", Style::default().fg(DEFAULT_THEME.error)),
    }
}

/// Keep the selected row inside the visible window
fn follow_selection(scroll: &mut usize, selected: usize, visible: usize) {
    if selected < *scroll {
        *scroll = selected;
    } else if selected >= *scroll + visible {
        *scroll = selected + 1 - visible;
    }
}

/// Render the declaration list pane
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    entries: &[Entry],
    selected: usize,
    is_focused: bool,
    scroll: &mut usize,
) {
    let block = pane_block(" Declarations ", is_focused);
    let visible = visible_height(area);
    follow_selection(scroll, selected, visible);

    let lines: Vec<Line> = entries
        .iter()
        .enumerate()
        .skip(*scroll)
        .take(visible)
        .map(|(idx, entry)| {
            let is_current = idx == selected;
            let num_style = if is_current {
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.comment) // Line numbers
            };

            let mut spans = vec![marker(entry), Span::styled(format!("{:4} ", entry.line), num_style)];
            spans.extend(highlight_declaration(&entry.tokens));

            if is_current {
                for span in &mut spans {
                    span.style = span.style.bg(DEFAULT_THEME.current_line_bg);
                }
            }
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}
