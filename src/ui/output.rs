//! Output verbosity.

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Also show step descriptions and failure details in the summary.
    Verbose,
    /// Show progress and status.
    #[default]
    Normal,
    /// Show prompts, warnings, errors and the summary only.
    Quiet,
}

impl OutputMode {
    /// Check if this mode shows informational status lines.
    pub fn shows_status(&self) -> bool {
        !matches!(self, Self::Quiet)
    }

    /// Check if this mode shows extra detail.
    pub fn shows_details(&self) -> bool {
        matches!(self, Self::Verbose)
    }
}
