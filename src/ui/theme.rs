//! Visual theme and styling.

use console::Style;

use crate::runner::Outcome;

/// rigger's visual theme.
#[derive(Debug, Clone)]
pub struct RiggerTheme {
    /// Style for success messages (green).
    pub success: Style,
    /// Style for warning messages (orange).
    pub warning: Style,
    /// Style for error messages (red bold).
    pub error: Style,
    /// Style for informational/running elements (cyan).
    pub info: Style,
    /// Style for dim/secondary text.
    pub dim: Style,
    /// Style for highlighted/important text (bold).
    pub highlight: Style,
    /// Style for headers (cyan bold).
    pub header: Style,
    /// Style for prompts (bold).
    pub prompt: Style,
    /// Style for box-drawing borders (dim).
    pub border: Style,
}

impl Default for RiggerTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl RiggerTheme {
    /// Create the default theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().color256(208),
            error: Style::new().red().bold(),
            info: Style::new().cyan(),
            dim: Style::new().dim(),
            highlight: Style::new().bold(),
            header: Style::new().bold().cyan(),
            prompt: Style::new().bold(),
            border: Style::new().dim(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            info: Style::new(),
            dim: Style::new(),
            highlight: Style::new(),
            header: Style::new(),
            prompt: Style::new(),
            border: Style::new(),
        }
    }

    /// Format an informational message.
    pub fn format_info(&self, msg: &str) -> String {
        format!("{}", self.info.apply_to(format!("• {}", msg)))
    }

    /// Format a success message (icon + text in green).
    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    /// Format a warning message (icon + text in orange).
    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    /// Format an error message (icon + text in red bold).
    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    /// Format a skipped message (icon + text in dim).
    pub fn format_skipped(&self, msg: &str) -> String {
        format!("{}", self.dim.apply_to(format!("○ {}", msg)))
    }

    /// Format a header banner.
    pub fn format_header(&self, title: &str) -> String {
        format!(
            "{} {}",
            self.header.apply_to("⚙"),
            self.highlight.apply_to(title)
        )
    }

    /// Style an outcome's icon.
    pub fn outcome_icon(&self, outcome: Outcome) -> String {
        let icon = outcome.display_char().to_string();
        let style = match outcome {
            Outcome::Succeeded => &self.success,
            Outcome::Failed { critical: true } => &self.error,
            Outcome::Failed { critical: false } => &self.warning,
            Outcome::Declined | Outcome::Satisfied => &self.dim,
        };
        style.apply_to(icon).to_string()
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // https://no-color.org/
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    console::Term::stdout().is_term()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_theme_prefixes() {
        let theme = RiggerTheme::plain();
        assert_eq!(theme.format_info("Running a"), "• Running a");
        assert_eq!(theme.format_success("a completed"), "✓ a completed");
        assert_eq!(theme.format_warning("a failed"), "⚠ a failed");
        assert_eq!(theme.format_error("b failed"), "✗ b failed");
        assert_eq!(theme.format_skipped("c declined"), "○ c declined");
    }

    #[test]
    fn theme_formats_header() {
        let theme = RiggerTheme::plain();
        let msg = theme.format_header("desktop");
        assert!(msg.contains("desktop"));
    }

    #[test]
    fn outcome_icons() {
        let theme = RiggerTheme::plain();
        assert_eq!(theme.outcome_icon(Outcome::Succeeded), "✓");
        assert_eq!(theme.outcome_icon(Outcome::Failed { critical: true }), "✗");
        assert_eq!(theme.outcome_icon(Outcome::Satisfied), "○");
    }

    #[test]
    fn default_impl_matches_new() {
        let default = RiggerTheme::default();
        let new = RiggerTheme::new();
        assert_eq!(default.format_success("test"), new.format_success("test"));
    }
}
