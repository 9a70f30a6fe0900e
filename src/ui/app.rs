//! Main TUI application state and logic

use crate::entries::{Entry, Summary};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Declarations,
    Tokens,
    Outline,
    Canonical,
}

impl FocusedPane {
    /// Move focus to the next pane (clockwise: declarations -> canonical -> tokens -> outline)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Declarations => FocusedPane::Canonical,
            FocusedPane::Canonical => FocusedPane::Tokens,
            FocusedPane::Tokens => FocusedPane::Outline,
            FocusedPane::Outline => FocusedPane::Declarations,
        }
    }

    /// Move focus to the previous pane (counter-clockwise)
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Declarations => FocusedPane::Outline,
            FocusedPane::Canonical => FocusedPane::Declarations,
            FocusedPane::Tokens => FocusedPane::Canonical,
            FocusedPane::Outline => FocusedPane::Tokens,
        }
    }
}

/// The main application state
pub struct App {
    /// Loaded declarations, analyzed up front
    pub entries: Vec<Entry>,

    /// Totals shown in the status bar
    pub summary: Summary,

    /// Index of the selected declaration
    pub selected: usize,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub list_scroll: usize,
    pub tokens_scroll: usize,
    pub outline_scroll: usize,
    pub canonical_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    pub fn new(entries: Vec<Entry>) -> Self {
        let summary = Summary::of(&entries);
        App {
            entries,
            summary,
            selected: 0,
            focused_pane: FocusedPane::Declarations,
            list_scroll: 0,
            tokens_scroll: 0,
            outline_scroll: 0,
            canonical_scroll: 0,
            should_quit: false,
            status_message: String::from("Ready!"),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    pub fn current(&self) -> Option<&Entry> {
        self.entries.get(self.selected)
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Create layout: 4 panes in 2 columns, plus status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let pane_area = main_chunks[0];
        let status_area = main_chunks[1];

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(pane_area);

        // Left column: Declarations (top) | Canonical (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(columns[0]);

        // Right column: Tokens (top) | AST (bottom)
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(columns[1]);

        let current = self.entries.get(self.selected);

        super::panes::render_source_pane(
            frame,
            left_rows[0],
            &self.entries,
            self.selected,
            self.focused_pane == FocusedPane::Declarations,
            &mut self.list_scroll,
        );

        super::panes::render_canonical_pane(
            frame,
            left_rows[1],
            current,
            self.focused_pane == FocusedPane::Canonical,
            &mut self.canonical_scroll,
        );

        super::panes::render_tokens_pane(
            frame,
            right_rows[0],
            current,
            self.focused_pane == FocusedPane::Tokens,
            &mut self.tokens_scroll,
        );

        super::panes::render_outline_pane(
            frame,
            right_rows[1],
            current,
            self.focused_pane == FocusedPane::Outline,
            &mut self.outline_scroll,
        );

        super::panes::render_status_bar(
            frame,
            status_area,
            &self.status_message,
            self.selected,
            &self.summary,
        );
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Declarations => self.select(self.selected.saturating_sub(1)),
                FocusedPane::Tokens => self.tokens_scroll = self.tokens_scroll.saturating_sub(1),
                FocusedPane::Outline => self.outline_scroll = self.outline_scroll.saturating_sub(1),
                FocusedPane::Canonical => {
                    self.canonical_scroll = self.canonical_scroll.saturating_sub(1)
                }
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Declarations => self.select(self.selected.saturating_add(1)),
                FocusedPane::Tokens => self.tokens_scroll = self.tokens_scroll.saturating_add(1),
                FocusedPane::Outline => self.outline_scroll = self.outline_scroll.saturating_add(1),
                FocusedPane::Canonical => {
                    self.canonical_scroll = self.canonical_scroll.saturating_add(1)
                }
            },
            KeyCode::Home => self.select(0),
            KeyCode::End => self.select(self.entries.len().saturating_sub(1)),
            _ => {}
        }
    }

    /// Select a declaration and reset the detail panes
    fn select(&mut self, index: usize) {
        if self.entries.is_empty() {
            return;
        }
        self.selected = index.min(self.entries.len() - 1);
        self.tokens_scroll = 0;
        self.outline_scroll = 0;
        self.canonical_scroll = 0;

        let entry = &self.entries[self.selected];
        self.status_message = match &entry.result {
            Ok(stmt) => format!("line {}: {}", entry.line, stmt.decl.kind_name()),
            Err(_) => format!("line {}: parse error", entry.line),
        };
    }
}
