//! Terminal output for the operator CLI.
//!
//! This module provides:
//! - [`UserInterface`] trait for output abstraction
//! - [`TerminalUI`] for styled terminal output
//! - [`MockUI`] capturing output for tests
//!
//! # Example
//!
//! ```
//! use depverify::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.show_header("plugin_active");
//! ui.success("All dependencies are fulfilled");
//! assert!(ui.has_success("fulfilled"));
//! ```

pub mod mock;
pub mod terminal;
pub mod theme;

pub use mock::{Channel, MockUI};
pub use terminal::TerminalUI;
pub use theme::{should_use_colors, Theme};

/// Output sink for CLI commands.
///
/// Commands write through this trait so their output can be captured by
/// [`MockUI`] in tests. Each method writes one line.
pub trait UserInterface {
    /// Plain line, used for report items.
    fn message(&mut self, msg: &str);

    /// Fulfilled verdict.
    fn success(&mut self, msg: &str);

    /// Optional dependencies missing, or a non-fatal manifest problem.
    fn warning(&mut self, msg: &str);

    /// Required dependencies missing, or a load failure.
    fn error(&mut self, msg: &str);

    /// Opens the section for one handler identifier.
    fn show_header(&mut self, identifier: &str);

    /// Unstyled text such as JSON.
    fn raw(&mut self, text: &str);
}
