//! Token pane: the lexer's view of the selected declaration

use super::{clamp_scroll, pane_block, visible_height};
use crate::entries::Entry;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn render_tokens_pane(
    frame: &mut Frame,
    area: Rect,
    entry: Option<&Entry>,
    is_focused: bool,
    scroll: &mut usize,
) {
    let block = pane_block(" Tokens ", is_focused);

    let lines: Vec<Line> = match entry {
        Some(entry) => entry
            .visible_tokens()
            .map(|token| {
                Line::from(vec![
                    Span::styled(
                        format!("{:>3}:{:<3} ", token.location.line, token.location.column),
                        Style::default().fg(DEFAULT_THEME.comment),
                    ),
                    Span::styled(
                        format!("{:<22} ", format!("{:?}", token.kind)),
                        Style::default().fg(DEFAULT_THEME.type_name),
                    ),
                    Span::styled(token.literal.as_str(), Style::default().fg(DEFAULT_THEME.fg)),
                ])
            })
            .collect(),
        None => vec![Line::from(Span::styled(
            "(no declarations loaded)",
            Style::default().fg(DEFAULT_THEME.comment),
        ))],
    };

    let visible = visible_height(area);
    clamp_scroll(scroll, lines.len(), visible);

    let visible_lines: Vec<Line> = lines.into_iter().skip(*scroll).take(visible).collect();
    frame.render_widget(Paragraph::new(visible_lines).block(block), area);
}
