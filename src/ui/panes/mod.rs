//! TUI pane rendering modules
//!
//! This module provides the rendering logic for all visual panes in the
//! inspector, one module per pane.
//!
//! # Pane Modules
//!
//! - [`source`]: Declaration list with token-based highlighting and round-trip markers
//! - [`tokens`]: Token dump of the selected declaration
//! - [`outline`]: AST outline of the selected declaration
//! - [`canonical`]: Canonical text, round-trip verdict and parse errors
//! - [`status`]: Status bar with keybindings and totals
//!
//! # Architecture
//!
//! Each pane module exports a primary `render_*_pane()` function taking the
//! frame, its area, the data to show, whether it is focused and its scroll
//! offset.

pub mod canonical;
pub mod outline;
pub mod source;
pub mod status;
pub mod tokens;

pub use canonical::render_canonical_pane;
pub use outline::render_outline_pane;
pub use source::render_source_pane;
pub use status::render_status_bar;
pub use tokens::render_tokens_pane;

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders},
};

/// Bordered block with the focus color applied.
fn pane_block(title: &str, is_focused: bool) -> Block<'_> {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style)
}

/// Rows available inside a bordered pane, at least one.
fn visible_height(area: Rect) -> usize {
    area.height.saturating_sub(2).max(1) as usize
}

/// Clamp a scroll offset so the last page stays full.
fn clamp_scroll(scroll: &mut usize, total: usize, visible: usize) {
    *scroll = (*scroll).min(total.saturating_sub(visible));
}
