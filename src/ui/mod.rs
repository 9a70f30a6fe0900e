//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into three layers:
//!
//! - **[`app`]**: application state, keyboard event loop, pane focus, selection
//! - **[`panes`]**: stateless render functions for each visible pane (declarations,
//!   tokens, AST outline, canonical text, status bar)
//! - **[`theme`]**: centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it with the loaded
//! [`Entry`] list and call [`App::run`] to start the event loop.
//!
//! [`Entry`]: crate::entries::Entry
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
