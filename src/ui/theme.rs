//! Styling for check reports.
//!
//! Colors follow the outcome they describe: fulfilled is green, optional
//! gaps are orange, required gaps are red.

use console::Style;

#[derive(Debug, Clone)]
pub struct Theme {
    pub fulfilled: Style,
    pub optional_gap: Style,
    pub required_gap: Style,
    pub identifier: Style,
    pub marker: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self::new()
    }
}

impl Theme {
    pub fn new() -> Self {
        Self {
            fulfilled: Style::new().green(),
            optional_gap: Style::new().color256(208),
            required_gap: Style::new().red().bold(),
            identifier: Style::new().bold(),
            marker: Style::new().cyan(),
        }
    }

    /// Theme for non-TTY output or `--no-color`.
    pub fn plain() -> Self {
        Self {
            fulfilled: Style::new(),
            optional_gap: Style::new(),
            required_gap: Style::new(),
            identifier: Style::new(),
            marker: Style::new(),
        }
    }

    pub fn format_success(&self, msg: &str) -> String {
        self.fulfilled.apply_to(format!("✓ {}", msg)).to_string()
    }

    pub fn format_warning(&self, msg: &str) -> String {
        self.optional_gap.apply_to(format!("⚠ {}", msg)).to_string()
    }

    pub fn format_error(&self, msg: &str) -> String {
        self.required_gap.apply_to(format!("✗ {}", msg)).to_string()
    }

    /// Handler identifier line opening a report section.
    pub fn format_header(&self, identifier: &str) -> String {
        format!(
            "{} {}",
            self.marker.apply_to("◆"),
            self.identifier.apply_to(identifier)
        )
    }
}

/// Colors are used only on a terminal and never when `NO_COLOR` is set.
pub fn should_use_colors() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    console::Term::stdout().is_term()
}
