//! Canonical text pane
//!
//! Shows the input declaration, its canonical rendering and the round-trip
//! verdict, or the parse error and whether the skip policy tolerates it.

use super::pane_block;
use crate::entries::{Entry, RoundTrip};
use crate::topic::is_skippable;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

fn heading(text: &str) -> Line<'_> {
    Line::from(Span::styled(
        text,
        Style::default()
            .fg(DEFAULT_THEME.primary)
            .add_modifier(Modifier::BOLD),
    ))
}

pub fn render_canonical_pane(
    frame: &mut Frame,
    area: Rect,
    entry: Option<&Entry>,
    is_focused: bool,
    scroll: &mut usize,
) {
    let block = pane_block(" Canonical ", is_focused);
    let Some(entry) = entry else {
        frame.render_widget(Paragraph::new("").block(block), area);
        return;
    };

    let mut lines = vec![
        heading("Input"),
        Line::from(entry.source.as_str()),
        Line::from(""),
    ];

    let hint = match entry.kind {
        Some(kind) => format!("{} (hint {:?})", kind, entry.hint()),
        None => "unlabeled".to_string(),
    };
    lines.push(Line::from(vec![
        Span::styled("Label: ", Style::default().fg(DEFAULT_THEME.comment)),
        Span::raw(hint),
    ]));
    lines.push(Line::from(""));

    match &entry.result {
        Ok(stmt) => {
            lines.push(heading("Canonical"));
            lines.push(Line::from(entry.canonical.clone().unwrap_or_default()));
            lines.push(Line::from(""));

            let color = match entry.round_trip {
                RoundTrip::Exact => DEFAULT_THEME.success,
                RoundTrip::Equivalent => DEFAULT_THEME.primary,
                _ => DEFAULT_THEME.warning,
            };
            lines.push(Line::from(vec![
                Span::styled("Round trip: ", Style::default().fg(DEFAULT_THEME.comment)),
                Span::styled(
                    entry.round_trip.as_str(),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
            ]));
            lines.push(Line::from(vec![
                Span::styled("Kind: ", Style::default().fg(DEFAULT_THEME.comment)),
                Span::raw(stmt.decl.kind_name()),
            ]));
        }
        Err(err) => {
            lines.push(heading("Error"));
            lines.push(Line::from(Span::styled(
                err.to_string(),
                Style::default().fg(DEFAULT_THEME.error),
            )));
            lines.push(Line::from(""));
            let verdict = if is_skippable(err) {
                Span::styled("skippable", Style::default().fg(DEFAULT_THEME.comment))
            } else {
                Span::styled(
                    "fatal",
                    Style::default()
                        .fg(DEFAULT_THEME.error)
                        .add_modifier(Modifier::BOLD),
                )
            };
            lines.push(Line::from(vec![
                Span::styled("Policy: ", Style::default().fg(DEFAULT_THEME.comment)),
                verdict,
            ]));
        }
    }

    // Wrapped rows are not known up front; only stop scrolling past the content
    *scroll = (*scroll).min(lines.len().saturating_sub(1));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((*scroll as u16, 0));
    frame.render_widget(paragraph, area);
}
